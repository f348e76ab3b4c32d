use std::path::Path;

use anyhow::Context as _;

use crate::codec::header::ScanlineOrder;
use crate::codec::raster::Image;
use crate::foundation::core::BYTES_PER_PIXEL;
use crate::foundation::error::{TgaError, TgaResult};

/// Converts stored blue-green-red triplets into a top-down RGB8 buffer.
pub fn to_rgb8_top_down(image: &Image) -> TgaResult<image::RgbImage> {
    let header = image.header();
    let (width, height) = (header.width(), header.height());
    let row_len = width as usize * BYTES_PER_PIXEL;

    let mut rgb = Vec::with_capacity(image.pixels().len());
    let rows = image.pixels().chunks_exact(row_len);
    let mut push_row = |row: &[u8]| {
        for px in row.chunks_exact(BYTES_PER_PIXEL) {
            rgb.extend_from_slice(&[px[2], px[1], px[0]]);
        }
    };
    match header.scanline_order() {
        ScanlineOrder::TopDown => rows.for_each(&mut push_row),
        ScanlineOrder::BottomUp => rows.rev().for_each(&mut push_row),
    }

    let len = rgb.len();
    image::RgbImage::from_raw(width, height, rgb)
        .ok_or_else(|| TgaError::shape_mismatch("preview", header.buffer_len(), len))
}

/// Writes `image` as an upright RGB PNG.
pub fn export_png(image: &Image, path: &Path) -> TgaResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create preview dir '{}'", parent.display()))?;
    }
    to_rgb8_top_down(image)?
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
