use std::path::PathBuf;

use crate::foundation::core::Channel;
use crate::ops::blend::CombineSampling;

/// What to do with a command token that names no known operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownCommandPolicy {
    /// Fail the whole invocation with [`crate::TgaError::UnknownCommand`].
    #[default]
    Reject,
    /// Log a warning and move on to the next token, leaving the current image untouched.
    Skip,
}

/// How channel-named `add*` and `scale*` commands map to storage slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelMapping {
    /// `addred`/`scalered` change red, `addblue`/`scaleblue` change blue.
    #[default]
    Strict,
    /// Red-named and blue-named commands trade channels: `addred`/`scalered` change blue and
    /// `addblue`/`scaleblue` change red. Green is unaffected.
    Swapped,
}

impl ChannelMapping {
    pub fn resolve(self, named: Channel) -> Channel {
        match self {
            ChannelMapping::Strict => named,
            ChannelMapping::Swapped => named.mirrored(),
        }
    }
}

/// Pipeline configuration, fixed for the whole invocation.
#[derive(Clone, Debug)]
pub struct PipelineOpts {
    /// Every command's result goes here.
    pub output: PathBuf,
    pub unknown_commands: UnknownCommandPolicy,
    pub channel_mapping: ChannelMapping,
    pub combine_sampling: CombineSampling,
    /// Write the output file after every step instead of once at the end.
    pub persist_intermediate: bool,
}

impl PipelineOpts {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            unknown_commands: UnknownCommandPolicy::default(),
            channel_mapping: ChannelMapping::default(),
            combine_sampling: CombineSampling::default(),
            persist_intermediate: false,
        }
    }
}
