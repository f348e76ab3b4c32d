use crate::codec::header::Header;
use crate::foundation::core::BYTES_PER_PIXEL;
use crate::foundation::error::{TgaError, TgaResult};

/// A header paired with its interleaved blue-green-red pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    header: Header,
    pixels: Vec<u8>,
}

impl Image {
    /// Pairs `header` with `pixels`, requiring `pixels.len() == width * height * 3`.
    pub fn new(header: Header, pixels: Vec<u8>) -> TgaResult<Self> {
        header.validate()?;
        let expected = header.buffer_len();
        if pixels.len() != expected {
            return Err(TgaError::shape_mismatch("image", expected, pixels.len()));
        }
        Ok(Self { header, pixels })
    }

    /// Solid image filled with one `[blue, green, red]` triplet.
    pub fn filled(width: i16, height: i16, bgr: [u8; 3]) -> TgaResult<Self> {
        let header = Header::new(width, height)?;
        let pixels = bgr
            .iter()
            .copied()
            .cycle()
            .take(header.buffer_len())
            .collect();
        Self::new(header, pixels)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn into_parts(self) -> (Header, Vec<u8>) {
        (self.header, self.pixels)
    }

    /// Replaces the pixel buffer, keeping the header. The new buffer must have the same length.
    pub fn with_pixels(self, pixels: Vec<u8>) -> TgaResult<Self> {
        Self::new(self.header, pixels)
    }

    /// The `[blue, green, red]` triplet at pixel index `idx` in storage order.
    pub fn pixel(&self, idx: usize) -> Option<[u8; 3]> {
        let start = idx.checked_mul(BYTES_PER_PIXEL)?;
        let px = self.pixels.get(start..start + BYTES_PER_PIXEL)?;
        Some([px[0], px[1], px[2]])
    }
}
