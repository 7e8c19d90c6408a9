//! Scripted decisions: a front end that replays a fixed list of player inputs.
//!
//! Script format, one decision per line (`#` starts a comment):
//!
//! ```text
//! roll
//! reroll 0 3 4      # die indices, 0-based
//! keep              # reroll nothing
//! score full_house
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::category::Category;
use crate::dice::{Dice, RerollMask};
use crate::engine::Player;
use crate::frontend::{Event, Frontend, InputError, ScoreUpdate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Roll,
    Reroll(RerollMask),
    Score(Category),
}

impl Decision {
    fn kind(&self) -> &'static str {
        match self {
            Decision::Roll => "roll",
            Decision::Reroll(_) => "reroll",
            Decision::Score(_) => "score",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Roll => f.write_str("roll"),
            Decision::Reroll(mask) if mask.is_empty() => f.write_str("keep"),
            Decision::Reroll(mask) => {
                f.write_str("reroll")?;
                for i in mask.indices() {
                    write!(f, " {i}")?;
                }
                Ok(())
            }
            Decision::Score(c) => write!(f, "score {c}"),
        }
    }
}

impl FromStr for Decision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let verb = words.next().ok_or("empty decision")?;
        let rest: Vec<&str> = words.collect();
        match verb.to_ascii_lowercase().as_str() {
            "roll" if rest.is_empty() => Ok(Decision::Roll),
            "keep" if rest.is_empty() => Ok(Decision::Reroll(RerollMask::NONE)),
            "reroll" => {
                let indices = rest
                    .iter()
                    .map(|w| {
                        w.trim_end_matches(',')
                            .parse::<usize>()
                            .map_err(|_| format!("bad die index {w:?}"))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                RerollMask::from_indices(indices)
                    .map(Decision::Reroll)
                    .map_err(|e| e.to_string())
            }
            "score" if !rest.is_empty() => rest
                .join("_")
                .parse::<Category>()
                .map(Decision::Score)
                .map_err(|e| e.to_string()),
            _ => Err("expected roll, keep, reroll <indices> or score <category>".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("line {line}: {message}: {text:?}")]
    BadLine {
        line: usize,
        text: String,
        message: String,
    },
}

/// Parse a script; blank lines and `#` comments are skipped.
pub fn parse_script(text: &str) -> Result<Vec<Decision>, ScriptError> {
    let mut out = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let decision = line.parse::<Decision>().map_err(|message| ScriptError::BadLine {
            line: i + 1,
            text: raw.to_string(),
            message,
        })?;
        out.push(decision);
    }
    Ok(out)
}

/// Replays decisions in order and records every notification.
#[derive(Debug, Default)]
pub struct ScriptedFrontend {
    decisions: VecDeque<Decision>,
    events: Vec<Event>,
}

impl ScriptedFrontend {
    pub fn new<I: IntoIterator<Item = Decision>>(decisions: I) -> Self {
        Self {
            decisions: decisions.into_iter().collect(),
            events: Vec::new(),
        }
    }

    pub fn from_script(text: &str) -> Result<Self, ScriptError> {
        Ok(Self::new(parse_script(text)?))
    }

    pub fn remaining(&self) -> usize {
        self.decisions.len()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(|e| match e {
            Event::Message { text } => Some(text.as_str()),
            _ => None,
        })
    }

    fn next(&mut self, expected: &'static str) -> Result<Decision, InputError> {
        let d = self
            .decisions
            .pop_front()
            .ok_or(InputError::Exhausted { expected })?;
        if d.kind() != expected {
            return Err(InputError::UnexpectedDecision {
                expected,
                got: d.to_string(),
            });
        }
        Ok(d)
    }
}

impl Frontend for ScriptedFrontend {
    fn request_roll_trigger(&mut self, _player: &Player) -> Result<(), InputError> {
        self.next("roll").map(|_| ())
    }

    fn request_reroll_selection(
        &mut self,
        _player: &Player,
        _dice: &Dice,
    ) -> Result<RerollMask, InputError> {
        match self.next("reroll")? {
            Decision::Reroll(mask) => Ok(mask),
            other => Err(InputError::UnexpectedDecision {
                expected: "reroll",
                got: other.to_string(),
            }),
        }
    }

    fn request_category_selection(
        &mut self,
        _player: &Player,
        _dice: &Dice,
    ) -> Result<Category, InputError> {
        match self.next("score")? {
            Decision::Score(c) => Ok(c),
            other => Err(InputError::UnexpectedDecision {
                expected: "score",
                got: other.to_string(),
            }),
        }
    }

    fn report_turn_start(&mut self, player: &Player) {
        self.events.push(Event::TurnStarted {
            player: player.index,
        });
    }

    fn report_dice(&mut self, dice: &Dice) {
        self.events.push(Event::DiceRolled { dice: *dice });
    }

    fn report_score_update(&mut self, update: ScoreUpdate) {
        self.events.push(Event::ScoreChanged { update });
    }

    fn report_message(&mut self, text: &str) {
        self.events.push(Event::Message {
            text: text.to_string(),
        });
    }
}
