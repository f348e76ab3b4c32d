//! tgachain applies chains of per-pixel transforms to uncompressed 24-bit TGA images.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: command tokens `->` [`Plan`] (operands resolved, all syntax errors up front)
//! 2. **Load**: the first input through an [`ImageStore`] into an [`Image`]
//! 3. **Apply**: each [`Step`] maps the current image to the next one, in memory
//! 4. **Store**: the final image goes to the single output path
//!
//! Pixel buffers are interleaved blue-green-red triplets exactly as stored on disk; the codec
//! never reorders samples. Blend math normalizes samples to `[0, 1]` and converts back with
//! round-half-up (`x * 255 + 0.5`, truncated), except `subtract`, which is integer arithmetic.
#![forbid(unsafe_code)]

mod codec;
mod foundation;
mod ops;
mod pipeline;
mod preview;

pub use codec::header::{HEADER_LEN, Header, IMAGE_TYPE_TRUE_COLOR, ScanlineOrder};
pub use codec::io::{load, read_image, store, write_image};
pub use codec::raster::Image;
pub use codec::store::{FsImageStore, ImageStore, MemoryImageStore};
pub use foundation::core::{BYTES_PER_PIXEL, Channel, denormalize, normalize};
pub use foundation::error::{TgaError, TgaResult};
pub use ops::blend::{
    BlendMode, CombineSampling, blend, combine, multiply, overlay, screen, subtract,
};
pub use ops::channel::{add_in_place, isolate_in_place, scale_in_place};
pub use ops::geometry::rotate180;
pub use pipeline::opts::{ChannelMapping, PipelineOpts, UnknownCommandPolicy};
pub use pipeline::paths::{TGA_EXTENSION, validate_input_path, validate_output_path};
pub use pipeline::plan::{Plan, Step, parse_commands};
pub use pipeline::runner::{RunOutcome, RunStats, apply_step, run_pipeline};
pub use preview::{export_png, to_rgb8_top_down};
