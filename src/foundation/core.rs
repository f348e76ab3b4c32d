/// Samples per stored pixel (blue, green, red; no alpha).
pub const BYTES_PER_PIXEL: usize = 3;

/// One color channel, identified by its storage slot inside a pixel triplet.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Blue,
    Green,
    Red,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Blue, Channel::Green, Channel::Red];

    /// Offset of this channel within a stored triplet.
    pub fn slot(self) -> usize {
        match self {
            Channel::Blue => 0,
            Channel::Green => 1,
            Channel::Red => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Channel::Blue => "blue",
            Channel::Green => "green",
            Channel::Red => "red",
        }
    }

    /// Red and blue trade places; green is its own mirror.
    pub fn mirrored(self) -> Self {
        match self {
            Channel::Blue => Channel::Red,
            Channel::Green => Channel::Green,
            Channel::Red => Channel::Blue,
        }
    }
}

pub fn normalize(sample: u8) -> f32 {
    f32::from(sample) / 255.0
}

/// Maps a normalized value back to a sample: scale by 255, add 0.5, truncate.
/// Out-of-range inputs saturate to `0..=255`.
pub fn denormalize(value: f32) -> u8 {
    (value * 255.0 + 0.5).clamp(0.0, 255.0) as u8
}
