use std::path::Path;

use crate::codec::raster::Image;
use crate::codec::store::ImageStore;
use crate::foundation::error::TgaResult;
use crate::ops::blend::{blend, combine};
use crate::ops::channel::{add_in_place, isolate_in_place, scale_in_place};
use crate::ops::geometry::rotate180;
use crate::pipeline::opts::PipelineOpts;
use crate::pipeline::plan::{Plan, Step};

/// Counters for one pipeline run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub steps_applied: usize,
    pub steps_skipped: usize,
    /// Number of times the output path was written.
    pub writes: usize,
}

/// Final image plus counters.
#[derive(Clone, Debug)]
pub struct RunOutcome {
    pub image: Image,
    pub stats: RunStats,
}

/// Applies one step to the current image, loading any operand images from `store`.
///
/// When `output_is_current` is set, an operand naming `opts.output` resolves to `current`
/// itself: the output path holds the previous step's result, whether or not it has been
/// written yet. Binary steps keep the header of the current image.
pub fn apply_step(
    current: Image,
    step: &Step,
    opts: &PipelineOpts,
    store: &mut dyn ImageStore,
    output_is_current: bool,
) -> TgaResult<Image> {
    let mut operand = |path: &Path, current: &Image| -> TgaResult<Image> {
        if output_is_current && path == opts.output {
            tracing::debug!(
                path = %path.display(),
                "operand names the output; using current result"
            );
            return Ok(current.clone());
        }
        store.load(path)
    };

    match step {
        Step::Blend { mode, operand: path } => {
            let other = operand(path, &current)?;
            let pixels = blend(*mode, current.pixels(), other.pixels())?;
            current.with_pixels(pixels)
        }
        Step::Combine { green, blue } => {
            let green = operand(green, &current)?;
            let blue = operand(blue, &current)?;
            let pixels = combine(
                current.pixels(),
                green.pixels(),
                blue.pixels(),
                opts.combine_sampling,
            )?;
            current.with_pixels(pixels)
        }
        Step::Flip => {
            let pixels = rotate180(current.pixels())?;
            current.with_pixels(pixels)
        }
        Step::Isolate { channel } => {
            let mut current = current;
            isolate_in_place(current.pixels_mut(), *channel)?;
            Ok(current)
        }
        Step::Add { channel, delta } => {
            let mut current = current;
            add_in_place(current.pixels_mut(), *channel, *delta)?;
            Ok(current)
        }
        Step::Scale { channel, factor } => {
            let mut current = current;
            scale_in_place(current.pixels_mut(), *channel, *factor)?;
            Ok(current)
        }
    }
}

/// Runs `plan` starting from the image at `input`.
///
/// The current image is threaded through the steps in memory and written to `opts.output`
/// once at the end, or after every step when `opts.persist_intermediate` is set. Any error
/// aborts the run; without `persist_intermediate` the output is then left untouched.
/// From the second step on, an operand naming the output path reads the previous step's
/// result. An empty plan copies the input to the output.
#[tracing::instrument(
    skip(plan, opts, store),
    fields(steps = plan.steps.len(), output = %opts.output.display())
)]
pub fn run_pipeline(
    input: &Path,
    plan: &Plan,
    opts: &PipelineOpts,
    store: &mut dyn ImageStore,
) -> TgaResult<RunOutcome> {
    let mut current = store.load(input)?;
    let mut stats = RunStats {
        steps_skipped: plan.skipped.len(),
        ..RunStats::default()
    };

    for (idx, step) in plan.steps.iter().enumerate() {
        tracing::debug!(idx, step = %step.name(), "applying step");
        current = apply_step(current, step, opts, store, idx > 0)?;
        stats.steps_applied += 1;

        if opts.persist_intermediate {
            store.store(&opts.output, &current)?;
            stats.writes += 1;
        }
    }

    if !opts.persist_intermediate || plan.steps.is_empty() {
        store.store(&opts.output, &current)?;
        stats.writes += 1;
    }

    tracing::debug!(?stats, "pipeline finished");
    Ok(RunOutcome {
        image: current,
        stats,
    })
}
