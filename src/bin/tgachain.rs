use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{CommandFactory as _, Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

const COMMANDS_HELP: &str = "\
Commands (applied left to right, each to the previous result):
  multiply <image>            normalized multiply
  subtract <image>            current minus image, floored at 0
  overlay <image>             overlay, threshold on <image>
  screen <image>              screen
  combine <green> <blue>      current supplies red
  flip                        rotate 180 degrees
  onlyred | onlygreen | onlyblue
  addred | addgreen | addblue <int>
  scalered | scalegreen | scaleblue <int>

Options must come before <OUTPUT>.";

/// Apply a chain of blend and channel operations to a 24-bit TGA image.
#[derive(Parser, Debug)]
#[command(name = "tgachain", version, about, after_help = COMMANDS_HELP)]
struct Cli {
    /// Output TGA path, written with the final result.
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// First input TGA path.
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Command chain with operands.
    #[arg(value_name = "COMMAND", trailing_var_arg = true, allow_hyphen_values = true)]
    commands: Vec<String>,

    /// Skip unrecognized commands with a warning instead of failing.
    #[arg(long)]
    skip_unknown: bool,

    /// Channel wiring for red/blue add and scale commands.
    #[arg(long, value_enum, default_value_t = MappingChoice::Strict)]
    channel_mapping: MappingChoice,

    /// Which byte of each source `combine` reads.
    #[arg(long, value_enum, default_value_t = SamplingChoice::PerChannel)]
    combine_sampling: SamplingChoice,

    /// Write the output after every command instead of once at the end.
    #[arg(long)]
    persist_intermediate: bool,

    /// Print the parsed command plan as JSON and exit without running it.
    #[arg(long)]
    dry_run: bool,

    /// Also export the final image as an upright RGB PNG.
    #[arg(long, value_name = "PNG")]
    preview: Option<PathBuf>,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MappingChoice {
    Strict,
    Swapped,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SamplingChoice {
    PerChannel,
    FirstByte,
}

fn main() -> ExitCode {
    if std::env::args_os().len() <= 1 {
        return match Cli::command().print_long_help() {
            Ok(()) => ExitCode::SUCCESS,
            Err(_) => ExitCode::FAILURE,
        };
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            print!("{err}");
            return ExitCode::FAILURE;
        }
        Err(err) => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
    };

    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("tgachain={level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn make_opts(cli: &Cli) -> tgachain::PipelineOpts {
    let mut opts = tgachain::PipelineOpts::new(&cli.output);
    if cli.skip_unknown {
        opts.unknown_commands = tgachain::UnknownCommandPolicy::Skip;
    }
    opts.channel_mapping = match cli.channel_mapping {
        MappingChoice::Strict => tgachain::ChannelMapping::Strict,
        MappingChoice::Swapped => tgachain::ChannelMapping::Swapped,
    };
    opts.combine_sampling = match cli.combine_sampling {
        SamplingChoice::PerChannel => tgachain::CombineSampling::PerChannel,
        SamplingChoice::FirstByte => tgachain::CombineSampling::FirstByte,
    };
    opts.persist_intermediate = cli.persist_intermediate;
    opts
}

fn run(cli: Cli) -> anyhow::Result<()> {
    tgachain::validate_output_path(&cli.output)?;
    tgachain::validate_input_path(&cli.input)?;

    let opts = make_opts(&cli);
    let plan = tgachain::parse_commands(&cli.commands, &opts)?;

    if cli.dry_run {
        let doc = serde_json::json!({
            "output": cli.output,
            "input": cli.input,
            "channel_mapping": opts.channel_mapping,
            "combine_sampling": opts.combine_sampling,
            "plan": plan,
        });
        println!("{}", serde_json::to_string_pretty(&doc).context("serialize plan")?);
        return Ok(());
    }

    let outcome = tgachain::run_pipeline(&cli.input, &plan, &opts, &mut tgachain::FsImageStore)?;

    if let Some(preview) = &cli.preview {
        tgachain::export_png(&outcome.image, preview)?;
        eprintln!("wrote {}", preview.display());
    }

    eprintln!(
        "wrote {} ({} step(s) applied, {} skipped)",
        cli.output.display(),
        outcome.stats.steps_applied,
        outcome.stats.steps_skipped
    );
    Ok(())
}
