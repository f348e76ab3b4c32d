use crate::foundation::core::{BYTES_PER_PIXEL, Channel, denormalize, normalize};
use crate::foundation::error::{TgaError, TgaResult};

fn check_triplets(op: &'static str, buf: &[u8]) -> TgaResult<()> {
    if !buf.len().is_multiple_of(BYTES_PER_PIXEL) {
        return Err(TgaError::shape_mismatch(
            op,
            buf.len(),
            buf.len() - buf.len() % BYTES_PER_PIXEL,
        ));
    }
    Ok(())
}

/// Copies `channel`'s sample into all three slots of every pixel, yielding a grayscale view of
/// that channel.
pub fn isolate_in_place(buf: &mut [u8], channel: Channel) -> TgaResult<()> {
    check_triplets("isolate", buf)?;
    let slot = channel.slot();
    for px in buf.chunks_exact_mut(BYTES_PER_PIXEL) {
        let v = px[slot];
        px.fill(v);
    }
    Ok(())
}

/// Adds `delta` to `channel` in every pixel, clamped to `0..=255`.
pub fn add_in_place(buf: &mut [u8], channel: Channel, delta: i32) -> TgaResult<()> {
    check_triplets("add", buf)?;
    let slot = channel.slot();
    for px in buf.chunks_exact_mut(BYTES_PER_PIXEL) {
        let v = i64::from(px[slot]) + i64::from(delta);
        px[slot] = v.clamp(0, 255) as u8;
    }
    Ok(())
}

/// Multiplies `channel` by the integer `factor` in normalized space, clamped to `0..=255`.
pub fn scale_in_place(buf: &mut [u8], channel: Channel, factor: i32) -> TgaResult<()> {
    check_triplets("scale", buf)?;
    let slot = channel.slot();
    let factor = factor as f32;
    for px in buf.chunks_exact_mut(BYTES_PER_PIXEL) {
        px[slot] = denormalize(normalize(px[slot]) * factor);
    }
    Ok(())
}
