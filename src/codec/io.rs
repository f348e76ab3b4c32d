use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::codec::header::{HEADER_LEN, Header};
use crate::codec::raster::Image;
use crate::foundation::error::{TgaError, TgaResult};

/// Decodes one image from `reader`. `path` only labels errors.
///
/// Short reads are reported as [`TgaError::Truncated`]; bytes after the pixel data are ignored.
pub fn read_image<R: Read>(mut reader: R, path: &Path) -> TgaResult<Image> {
    let mut head = Vec::with_capacity(HEADER_LEN);
    reader
        .by_ref()
        .take(HEADER_LEN as u64)
        .read_to_end(&mut head)
        .map_err(|e| TgaError::io(path, e))?;
    let head: [u8; HEADER_LEN] = head.try_into().map_err(|short: Vec<u8>| TgaError::Truncated {
        path: path.to_path_buf(),
        expected: HEADER_LEN,
        actual: short.len(),
    })?;

    let header = Header::from_bytes(&head);
    header.validate()?;
    if !header.is_plain_true_color() {
        tracing::warn!(
            path = %path.display(),
            image_type = header.image_type,
            color_map_type = header.color_map_type,
            bits_per_pixel = header.bits_per_pixel,
            "header is not 24-bit uncompressed true-color; treating data as raw bgr triplets"
        );
    }

    let expected = header.buffer_len();
    // Grow with the bytes actually present; the header alone may claim gigabytes.
    let mut pixels = Vec::new();
    reader
        .take(expected as u64)
        .read_to_end(&mut pixels)
        .map_err(|e| TgaError::io(path, e))?;
    if pixels.len() != expected {
        return Err(TgaError::Truncated {
            path: path.to_path_buf(),
            expected: HEADER_LEN + expected,
            actual: HEADER_LEN + pixels.len(),
        });
    }

    Image::new(header, pixels)
}

/// Encodes `image` as the 18 header bytes followed by the pixel buffer, verbatim.
pub fn write_image<W: Write>(mut writer: W, image: &Image, path: &Path) -> TgaResult<()> {
    writer
        .write_all(&image.header().to_bytes())
        .and_then(|()| writer.write_all(image.pixels()))
        .and_then(|()| writer.flush())
        .map_err(|e| TgaError::io(path, e))
}

pub fn load(path: &Path) -> TgaResult<Image> {
    let f = File::open(path).map_err(|e| TgaError::io(path, e))?;
    read_image(BufReader::new(f), path)
}

/// Creates or truncates `path` and writes `image` to it.
pub fn store(path: &Path, image: &Image) -> TgaResult<()> {
    let f = File::create(path).map_err(|e| TgaError::io(path, e))?;
    write_image(BufWriter::new(f), image, path)
}
