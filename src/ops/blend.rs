use crate::foundation::core::{BYTES_PER_PIXEL, denormalize, normalize};
use crate::foundation::error::{TgaError, TgaResult};

/// Two-image blend applied sample by sample. `a` is the current image, `b` the operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    Multiply,
    Subtract,
    Overlay,
    Screen,
}

impl BlendMode {
    pub fn name(self) -> &'static str {
        match self {
            BlendMode::Multiply => "multiply",
            BlendMode::Subtract => "subtract",
            BlendMode::Overlay => "overlay",
            BlendMode::Screen => "screen",
        }
    }

    pub fn apply(self, a: u8, b: u8) -> u8 {
        match self {
            BlendMode::Multiply => multiply(a, b),
            BlendMode::Subtract => subtract(a, b),
            BlendMode::Overlay => overlay(a, b),
            BlendMode::Screen => screen(a, b),
        }
    }
}

pub fn multiply(a: u8, b: u8) -> u8 {
    denormalize(normalize(a) * normalize(b))
}

/// Plain integer difference, floored at zero.
pub fn subtract(a: u8, b: u8) -> u8 {
    a.saturating_sub(b)
}

/// The threshold is taken on the operand `b`, not on `a`.
pub fn overlay(a: u8, b: u8) -> u8 {
    let (na, nb) = (normalize(a), normalize(b));
    if nb <= 0.5 {
        denormalize(2.0 * na * nb)
    } else {
        denormalize(1.0 - 2.0 * (1.0 - na) * (1.0 - nb))
    }
}

pub fn screen(a: u8, b: u8) -> u8 {
    let (na, nb) = (normalize(a), normalize(b));
    denormalize(1.0 - (1.0 - na) * (1.0 - nb))
}

/// Blends two equal-length buffers into a new one.
pub fn blend(mode: BlendMode, a: &[u8], b: &[u8]) -> TgaResult<Vec<u8>> {
    if a.len() != b.len() {
        return Err(TgaError::shape_mismatch(mode.name(), a.len(), b.len()));
    }
    Ok(a.iter().zip(b).map(|(&a, &b)| mode.apply(a, b)).collect())
}

/// Which byte of each source triplet `combine` reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CombineSampling {
    /// Each source contributes its own channel: blue from slot 0 of the blue source, green
    /// from slot 1 of the green source, red from slot 2 of the red source.
    #[default]
    PerChannel,
    /// Each source contributes byte 0 of its triplet, whatever channel that byte holds.
    /// Sources that went through the matching `only*` isolation give the same result either way.
    FirstByte,
}

/// Builds one buffer out of three equal-length sources, writing blue, green and red storage
/// slots of every pixel from the blue, green and red source respectively.
pub fn combine(
    red: &[u8],
    green: &[u8],
    blue: &[u8],
    sampling: CombineSampling,
) -> TgaResult<Vec<u8>> {
    if red.len() != green.len() {
        return Err(TgaError::shape_mismatch("combine", red.len(), green.len()));
    }
    if red.len() != blue.len() {
        return Err(TgaError::shape_mismatch("combine", red.len(), blue.len()));
    }
    if !red.len().is_multiple_of(BYTES_PER_PIXEL) {
        return Err(TgaError::shape_mismatch(
            "combine",
            red.len(),
            red.len() - red.len() % BYTES_PER_PIXEL,
        ));
    }

    let [b_off, g_off, r_off] = match sampling {
        CombineSampling::PerChannel => [0, 1, 2],
        CombineSampling::FirstByte => [0, 0, 0],
    };

    let mut out = vec![0u8; red.len()];
    for (j, px) in out.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
        let j = j * BYTES_PER_PIXEL;
        px[0] = blue[j + b_off];
        px[1] = green[j + g_off];
        px[2] = red[j + r_off];
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiply_by_white_is_identity() {
        for a in 0..=255u8 {
            assert_eq!(multiply(a, 255), a);
        }
        assert_eq!(multiply(128, 128), 64);
        assert_eq!(multiply(200, 0), 0);
    }

    #[test]
    fn screen_with_black_is_identity() {
        for a in 0..=255u8 {
            assert_eq!(screen(a, 0), a);
        }
        assert_eq!(screen(0, 255), 255);
    }

    #[test]
    fn subtract_clamps_at_zero() {
        for a in (0..=255u8).step_by(17) {
            for b in (0..=255u8).step_by(15) {
                assert_eq!(i32::from(subtract(a, b)), (i32::from(a) - i32::from(b)).max(0));
            }
        }
    }

    #[test]
    fn overlay_switches_on_operand_threshold() {
        // b = 127 is at or below one half: 2ab
        assert_eq!(overlay(255, 127), 254);
        // b = 128 is above one half: 1 - 2(1-a)(1-b)
        assert_eq!(overlay(0, 128), 1);
        assert_eq!(overlay(255, 200), 255);
        assert_eq!(overlay(100, 0), 0);
    }

    #[test]
    fn blend_rejects_length_mismatch() {
        let err = blend(BlendMode::Overlay, &[1, 2, 3], &[1, 2, 3, 4, 5, 6]).unwrap_err();
        assert!(matches!(
            err,
            TgaError::ShapeMismatch {
                op: "overlay",
                left: 3,
                right: 6
            }
        ));
    }

    #[test]
    fn blend_applies_mode_per_sample() {
        let out = blend(BlendMode::Subtract, &[10, 200, 5], &[20, 100, 5]).unwrap();
        assert_eq!(out, vec![0, 100, 0]);
    }

    #[test]
    fn combine_per_channel_picks_each_sources_own_slot() {
        let out = combine(
            &[0, 0, 111],
            &[0, 222, 0],
            &[55, 0, 0],
            CombineSampling::PerChannel,
        )
        .unwrap();
        assert_eq!(out, vec![55, 222, 111]);
    }

    #[test]
    fn combine_first_byte_reads_offset_zero_of_each_source() {
        let out = combine(
            &[0, 0, 111],
            &[0, 222, 0],
            &[55, 0, 0],
            CombineSampling::FirstByte,
        )
        .unwrap();
        assert_eq!(out, vec![55, 0, 0]);

        let red = [111, 0, 0, 1, 2, 3];
        let green = [222, 0, 0, 4, 5, 6];
        let blue = [55, 0, 0, 7, 8, 9];
        assert_eq!(
            combine(&red, &green, &blue, CombineSampling::FirstByte).unwrap(),
            vec![55, 222, 111, 7, 4, 1]
        );
    }

    #[test]
    fn combine_samplings_agree_on_isolated_sources() {
        let red = [9, 9, 9, 1, 1, 1];
        let green = [8, 8, 8, 2, 2, 2];
        let blue = [7, 7, 7, 3, 3, 3];
        assert_eq!(
            combine(&red, &green, &blue, CombineSampling::PerChannel).unwrap(),
            combine(&red, &green, &blue, CombineSampling::FirstByte).unwrap()
        );
    }

    #[test]
    fn combine_rejects_mismatched_sources() {
        let s = CombineSampling::PerChannel;
        assert!(combine(&[0; 6], &[0; 6], &[0; 3], s).is_err());
        assert!(combine(&[0; 3], &[0; 6], &[0; 6], s).is_err());
        assert!(combine(&[0; 4], &[0; 4], &[0; 4], s).is_err());
    }
}
