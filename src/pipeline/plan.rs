//! Command-chain parsing.
//!
//! Tokens are consumed left to right. Each keyword takes a fixed number of trailing operand
//! tokens; the operands are resolved here, so a plan that parses can be executed without
//! looking at the token list again.

use std::path::PathBuf;

use crate::foundation::core::Channel;
use crate::foundation::error::{TgaError, TgaResult};
use crate::ops::blend::BlendMode;
use crate::pipeline::opts::{PipelineOpts, UnknownCommandPolicy};

/// One resolved pipeline step. The current image is always the implicit first input.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Step {
    /// Blend the current image with the image at `operand`.
    Blend { mode: BlendMode, operand: PathBuf },
    /// Current image supplies red; the operands supply green and blue.
    Combine { green: PathBuf, blue: PathBuf },
    /// Rotate by 180 degrees.
    Flip,
    /// Keep only one channel, copied into all three slots.
    Isolate { channel: Channel },
    Add { channel: Channel, delta: i32 },
    Scale { channel: Channel, factor: i32 },
}

impl Step {
    /// Command keyword this step was parsed from (after channel mapping).
    pub fn name(&self) -> String {
        match self {
            Step::Blend { mode, .. } => mode.name().to_string(),
            Step::Combine { .. } => "combine".to_string(),
            Step::Flip => "flip".to_string(),
            Step::Isolate { channel } => format!("only{}", channel.name()),
            Step::Add { channel, .. } => format!("add{}", channel.name()),
            Step::Scale { channel, .. } => format!("scale{}", channel.name()),
        }
    }
}

/// A parsed command chain.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Plan {
    pub steps: Vec<Step>,
    /// Tokens passed over under [`UnknownCommandPolicy::Skip`], in order.
    pub skipped: Vec<String>,
}

enum Keyword {
    Blend(BlendMode),
    Combine,
    Flip,
    Only(Channel),
    Add(Channel),
    Scale(Channel),
}

fn keyword(token: &str) -> Option<Keyword> {
    let kw = match token {
        "multiply" => Keyword::Blend(BlendMode::Multiply),
        "subtract" => Keyword::Blend(BlendMode::Subtract),
        "overlay" => Keyword::Blend(BlendMode::Overlay),
        "screen" => Keyword::Blend(BlendMode::Screen),
        "combine" => Keyword::Combine,
        "flip" => Keyword::Flip,
        "onlyred" => Keyword::Only(Channel::Red),
        "onlygreen" => Keyword::Only(Channel::Green),
        "onlyblue" => Keyword::Only(Channel::Blue),
        "addred" => Keyword::Add(Channel::Red),
        "addgreen" => Keyword::Add(Channel::Green),
        "addblue" => Keyword::Add(Channel::Blue),
        "scalered" => Keyword::Scale(Channel::Red),
        "scalegreen" => Keyword::Scale(Channel::Green),
        "scaleblue" => Keyword::Scale(Channel::Blue),
        _ => return None,
    };
    Some(kw)
}

struct Tokens<'a, S> {
    items: &'a [S],
    pos: usize,
}

impl<'a, S: AsRef<str>> Tokens<'a, S> {
    fn advance(&mut self) -> Option<&'a str> {
        let t = self.items.get(self.pos)?;
        self.pos += 1;
        Some(t.as_ref())
    }

    fn operand(&mut self, command: &str) -> TgaResult<&'a str> {
        self.advance().ok_or_else(|| TgaError::missing_operand(command))
    }

    fn integer(&mut self, command: &str) -> TgaResult<i32> {
        let token = self.operand(command)?;
        token
            .parse::<i32>()
            .map_err(|_| TgaError::InvalidNumericArgument {
                command: command.to_string(),
                token: token.to_string(),
            })
    }
}

/// Parses the command tokens that follow the output and first-input paths.
///
/// Fails on the first missing operand, non-numeric parameter, or (under
/// [`UnknownCommandPolicy::Reject`]) unknown keyword. Nothing is loaded or written here.
pub fn parse_commands<S: AsRef<str>>(tokens: &[S], opts: &PipelineOpts) -> TgaResult<Plan> {
    let mut it = Tokens {
        items: tokens,
        pos: 0,
    };
    let mut plan = Plan::default();

    while let Some(token) = it.advance() {
        let Some(kw) = keyword(token) else {
            match opts.unknown_commands {
                UnknownCommandPolicy::Reject => {
                    return Err(TgaError::UnknownCommand(token.to_string()));
                }
                UnknownCommandPolicy::Skip => {
                    tracing::warn!(token, "skipping unrecognized command");
                    plan.skipped.push(token.to_string());
                    continue;
                }
            }
        };

        let step = match kw {
            Keyword::Blend(mode) => Step::Blend {
                mode,
                operand: PathBuf::from(it.operand(token)?),
            },
            Keyword::Combine => {
                let green = PathBuf::from(it.operand(token)?);
                let blue = PathBuf::from(it.operand(token)?);
                Step::Combine { green, blue }
            }
            Keyword::Flip => Step::Flip,
            Keyword::Only(channel) => Step::Isolate { channel },
            Keyword::Add(named) => Step::Add {
                channel: opts.channel_mapping.resolve(named),
                delta: it.integer(token)?,
            },
            Keyword::Scale(named) => Step::Scale {
                channel: opts.channel_mapping.resolve(named),
                factor: it.integer(token)?,
            },
        };
        plan.steps.push(step);
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::opts::ChannelMapping;

    fn opts() -> PipelineOpts {
        PipelineOpts::new("out.tga")
    }

    #[test]
    fn parses_every_arity() {
        let plan = parse_commands(
            &[
                "multiply", "a.tga", "flip", "combine", "g.tga", "b.tga", "addred", "-20",
                "scalegreen", "3", "onlyblue",
            ],
            &opts(),
        )
        .unwrap();

        assert_eq!(
            plan.steps,
            vec![
                Step::Blend {
                    mode: BlendMode::Multiply,
                    operand: PathBuf::from("a.tga"),
                },
                Step::Flip,
                Step::Combine {
                    green: PathBuf::from("g.tga"),
                    blue: PathBuf::from("b.tga"),
                },
                Step::Add {
                    channel: Channel::Red,
                    delta: -20,
                },
                Step::Scale {
                    channel: Channel::Green,
                    factor: 3,
                },
                Step::Isolate {
                    channel: Channel::Blue,
                },
            ]
        );
        assert!(plan.skipped.is_empty());
    }

    #[test]
    fn missing_operand_is_fatal() {
        for tokens in [
            vec!["multiply"],
            vec!["flip", "screen"],
            vec!["addgreen"],
            vec!["combine", "g.tga"],
        ] {
            let err = parse_commands(&tokens, &opts()).unwrap_err();
            assert!(matches!(err, TgaError::MissingOperand { .. }), "{tokens:?}");
        }
    }

    #[test]
    fn non_numeric_parameter_is_fatal() {
        for bad in ["abc", "12abc", "", "1.5"] {
            let err = parse_commands(&["scalered", bad], &opts()).unwrap_err();
            assert!(
                matches!(&err, TgaError::InvalidNumericArgument { command, token }
                    if command == "scalered" && token == bad),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn unknown_command_rejected_by_default() {
        let err = parse_commands(&["flip", "blur"], &opts()).unwrap_err();
        assert!(matches!(err, TgaError::UnknownCommand(t) if t == "blur"));
    }

    #[test]
    fn unknown_command_skipped_when_configured() {
        let mut o = opts();
        o.unknown_commands = UnknownCommandPolicy::Skip;
        let plan = parse_commands(&["blur", "flip", "MULTIPLY"], &o).unwrap();
        assert_eq!(plan.steps, vec![Step::Flip]);
        assert_eq!(plan.skipped, vec!["blur".to_string(), "MULTIPLY".to_string()]);
    }

    #[test]
    fn swapped_mapping_rewires_red_and_blue_params() {
        let mut o = opts();
        o.channel_mapping = ChannelMapping::Swapped;
        let plan = parse_commands(
            &["scalered", "2", "addblue", "5", "addgreen", "1", "onlyred"],
            &o,
        )
        .unwrap();
        assert_eq!(
            plan.steps,
            vec![
                Step::Scale {
                    channel: Channel::Blue,
                    factor: 2,
                },
                Step::Add {
                    channel: Channel::Red,
                    delta: 5,
                },
                Step::Add {
                    channel: Channel::Green,
                    delta: 1,
                },
                Step::Isolate {
                    channel: Channel::Red,
                },
            ]
        );
    }

    #[test]
    fn empty_chain_is_empty_plan() {
        let plan = parse_commands::<&str>(&[], &opts()).unwrap();
        assert_eq!(plan, Plan::default());
    }

    #[test]
    fn plan_serializes_with_op_tags() {
        let plan = parse_commands(&["overlay", "x.tga", "addblue", "7"], &opts()).unwrap();
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["steps"][0]["op"], "blend");
        assert_eq!(json["steps"][0]["mode"], "overlay");
        assert_eq!(json["steps"][1]["op"], "add");
        assert_eq!(json["steps"][1]["channel"], "blue");
        assert_eq!(json["steps"][1]["delta"], 7);
    }

    #[test]
    fn step_names_round_trip_to_keywords() {
        assert_eq!(Step::Flip.name(), "flip");
        assert_eq!(
            Step::Isolate {
                channel: Channel::Green
            }
            .name(),
            "onlygreen"
        );
        assert_eq!(
            Step::Scale {
                channel: Channel::Red,
                factor: 1
            }
            .name(),
            "scalered"
        );
    }
}
