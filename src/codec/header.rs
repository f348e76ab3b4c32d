use crate::foundation::core::BYTES_PER_PIXEL;
use crate::foundation::error::{TgaError, TgaResult};

/// Encoded size of [`Header`] on disk.
pub const HEADER_LEN: usize = 18;

/// Image type code for uncompressed true-color data.
pub const IMAGE_TYPE_TRUE_COLOR: u8 = 2;

const DESCRIPTOR_TOP_DOWN: u8 = 0x20;

/// Row order of the pixel data, taken from bit 5 of the image descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanlineOrder {
    /// First stored row is the bottom of the picture.
    BottomUp,
    /// First stored row is the top of the picture.
    TopDown,
}

/// The fixed 18-byte container header. Multi-byte fields are little-endian.
///
/// Fields are kept verbatim so that a load/store cycle reproduces the header bytes exactly,
/// including fields this crate never interprets (color map, origin, id length).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub id_length: u8,
    pub color_map_type: u8,
    pub image_type: u8,
    pub color_map_origin: i16,
    pub color_map_length: i16,
    pub color_map_depth: u8,
    pub x_origin: i16,
    pub y_origin: i16,
    pub width: i16,
    pub height: i16,
    pub bits_per_pixel: u8,
    pub image_descriptor: u8,
}

impl Header {
    /// Header for a bottom-up 24-bit true-color image of the given size.
    pub fn new(width: i16, height: i16) -> TgaResult<Self> {
        let header = Self {
            id_length: 0,
            color_map_type: 0,
            image_type: IMAGE_TYPE_TRUE_COLOR,
            color_map_origin: 0,
            color_map_length: 0,
            color_map_depth: 0,
            x_origin: 0,
            y_origin: 0,
            width,
            height,
            bits_per_pixel: 24,
            image_descriptor: 0,
        };
        header.validate()?;
        Ok(header)
    }

    pub fn from_bytes(b: &[u8; HEADER_LEN]) -> Self {
        let le = |i: usize| i16::from_le_bytes([b[i], b[i + 1]]);
        Self {
            id_length: b[0],
            color_map_type: b[1],
            image_type: b[2],
            color_map_origin: le(3),
            color_map_length: le(5),
            color_map_depth: b[7],
            x_origin: le(8),
            y_origin: le(10),
            width: le(12),
            height: le(14),
            bits_per_pixel: b[16],
            image_descriptor: b[17],
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0] = self.id_length;
        out[1] = self.color_map_type;
        out[2] = self.image_type;
        out[3..5].copy_from_slice(&self.color_map_origin.to_le_bytes());
        out[5..7].copy_from_slice(&self.color_map_length.to_le_bytes());
        out[7] = self.color_map_depth;
        out[8..10].copy_from_slice(&self.x_origin.to_le_bytes());
        out[10..12].copy_from_slice(&self.y_origin.to_le_bytes());
        out[12..14].copy_from_slice(&self.width.to_le_bytes());
        out[14..16].copy_from_slice(&self.height.to_le_bytes());
        out[16] = self.bits_per_pixel;
        out[17] = self.image_descriptor;
        out
    }

    /// Width and height must both be positive.
    pub fn validate(&self) -> TgaResult<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(TgaError::invalid_header(format!(
                "dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Whether this header describes the only layout the pixel operators understand.
    /// Other layouts are still carried byte-for-byte.
    pub fn is_plain_true_color(&self) -> bool {
        self.color_map_type == 0
            && self.image_type == IMAGE_TYPE_TRUE_COLOR
            && self.bits_per_pixel == 24
    }

    pub fn width(&self) -> u32 {
        self.width.max(0) as u32
    }

    pub fn height(&self) -> u32 {
        self.height.max(0) as u32
    }

    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Pixel buffer length implied by the dimensions.
    pub fn buffer_len(&self) -> usize {
        self.pixel_count() * BYTES_PER_PIXEL
    }

    pub fn scanline_order(&self) -> ScanlineOrder {
        if self.image_descriptor & DESCRIPTOR_TOP_DOWN != 0 {
            ScanlineOrder::TopDown
        } else {
            ScanlineOrder::BottomUp
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_are_little_endian_and_unpadded() {
        let mut h = Header::new(0x0102, 3).unwrap();
        h.color_map_origin = -2;
        h.image_descriptor = 0x20;

        let b = h.to_bytes();
        assert_eq!(b.len(), HEADER_LEN);
        assert_eq!(b[2], IMAGE_TYPE_TRUE_COLOR);
        assert_eq!(&b[3..5], &[0xFE, 0xFF]);
        assert_eq!(&b[12..14], &[0x02, 0x01]);
        assert_eq!(&b[14..16], &[3, 0]);
        assert_eq!(b[16], 24);
        assert_eq!(b[17], 0x20);
        assert_eq!(Header::from_bytes(&b), h);
    }

    #[test]
    fn validate_rejects_non_positive_dimensions() {
        assert!(Header::new(0, 4).is_err());
        assert!(Header::new(4, -1).is_err());
        assert!(Header::new(1, 1).is_ok());
    }

    #[test]
    fn buffer_len_is_three_bytes_per_pixel() {
        let h = Header::new(4, 5).unwrap();
        assert_eq!(h.pixel_count(), 20);
        assert_eq!(h.buffer_len(), 60);
    }

    #[test]
    fn scanline_order_reads_descriptor_bit_5() {
        let mut h = Header::new(1, 1).unwrap();
        assert_eq!(h.scanline_order(), ScanlineOrder::BottomUp);
        h.image_descriptor |= 0x20;
        assert_eq!(h.scanline_order(), ScanlineOrder::TopDown);
    }
}
