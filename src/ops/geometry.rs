use crate::foundation::core::BYTES_PER_PIXEL;
use crate::foundation::error::{TgaError, TgaResult};

/// Reverses pixel order. Bytes inside each pixel keep their relative order.
pub fn rotate180(buf: &[u8]) -> TgaResult<Vec<u8>> {
    if !buf.len().is_multiple_of(BYTES_PER_PIXEL) {
        return Err(TgaError::shape_mismatch(
            "flip",
            buf.len(),
            buf.len() - buf.len() % BYTES_PER_PIXEL,
        ));
    }
    Ok(buf
        .chunks_exact(BYTES_PER_PIXEL)
        .rev()
        .flatten()
        .copied()
        .collect())
}
