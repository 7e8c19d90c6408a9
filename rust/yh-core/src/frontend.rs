//! The interface between the session and whatever shows the game to players.
//!
//! Requests block until the front end has an answer. Reports are
//! fire-and-forget notifications; front ends never get mutable access to
//! session state.

use std::io;

use serde::Serialize;
use thiserror::Error;

use crate::category::{Category, ScoreRow};
use crate::dice::{Dice, RerollMask};
use crate::engine::Player;
use crate::rules::RulesError;

#[derive(Debug, Error)]
pub enum InputError {
    /// The input side went away (window closed, stdin EOF, handle dropped).
    #[error("input closed")]
    Closed,
    #[error("invalid input: {0}")]
    Invalid(#[from] RulesError),
    #[error("expected a {expected} decision, got {got:?}")]
    UnexpectedDecision { expected: &'static str, got: String },
    #[error("no decision left while waiting for {expected}")]
    Exhausted { expected: &'static str },
    #[error("input I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A scorecard cell changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreUpdate {
    pub row: ScoreRow,
    pub player: usize,
    pub score: u16,
}

/// Notifications produced while the game advances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    TurnStarted { player: usize },
    DiceRolled { dice: Dice },
    ScoreChanged { update: ScoreUpdate },
    Message { text: String },
}

pub trait Frontend {
    /// Block until `player` asks for the opening roll.
    fn request_roll_trigger(&mut self, player: &Player) -> Result<(), InputError>;

    /// Block until `player` picks the dice to reroll. An empty mask keeps every die.
    fn request_reroll_selection(
        &mut self,
        player: &Player,
        dice: &Dice,
    ) -> Result<RerollMask, InputError>;

    /// Block until `player` picks a category for `dice`.
    fn request_category_selection(
        &mut self,
        player: &Player,
        dice: &Dice,
    ) -> Result<Category, InputError>;

    /// Highlight the player whose turn begins.
    fn report_turn_start(&mut self, _player: &Player) {}

    fn report_dice(&mut self, dice: &Dice);

    fn report_score_update(&mut self, update: ScoreUpdate);

    fn report_message(&mut self, text: &str);

    /// Route an engine event to the matching `report_*` call.
    fn report(&mut self, event: &Event, players: &[Player]) {
        match event {
            Event::TurnStarted { player } => {
                if let Some(p) = players.get(*player) {
                    self.report_turn_start(p);
                }
            }
            Event::DiceRolled { dice } => self.report_dice(dice),
            Event::ScoreChanged { update } => self.report_score_update(*update),
            Event::Message { text } => self.report_message(text),
        }
    }
}

macro_rules! forward_frontend {
    ($ty:ty) => {
        impl<F: Frontend + ?Sized> Frontend for $ty {
            fn request_roll_trigger(&mut self, player: &Player) -> Result<(), InputError> {
                (**self).request_roll_trigger(player)
            }

            fn request_reroll_selection(
                &mut self,
                player: &Player,
                dice: &Dice,
            ) -> Result<RerollMask, InputError> {
                (**self).request_reroll_selection(player, dice)
            }

            fn request_category_selection(
                &mut self,
                player: &Player,
                dice: &Dice,
            ) -> Result<Category, InputError> {
                (**self).request_category_selection(player, dice)
            }

            fn report_turn_start(&mut self, player: &Player) {
                (**self).report_turn_start(player)
            }

            fn report_dice(&mut self, dice: &Dice) {
                (**self).report_dice(dice)
            }

            fn report_score_update(&mut self, update: ScoreUpdate) {
                (**self).report_score_update(update)
            }

            fn report_message(&mut self, text: &str) {
                (**self).report_message(text)
            }
        }
    };
}

forward_frontend!(Box<F>);
forward_frontend!(&mut F);
