//! Greedy bot front end, used for simulations and as a stand-in opponent.
//!
//! Rerolls every die that does not show its most common face (ties go to the
//! higher face), then marks the highest-scoring unused category (ties go to
//! the earliest category in scorecard order). The bot learns which categories
//! are used from score updates, so it never needs scorecard access.

use crate::category::{Category, ScoreRow};
use crate::dice::{Dice, RerollMask};
use crate::engine::Player;
use crate::frontend::{Frontend, InputError, ScoreUpdate};
use crate::rules::{MAX_PLAYERS, NUM_CATEGORIES};
use crate::scoring::classify;

#[derive(Debug, Clone)]
pub struct GreedyBot {
    used: [[bool; NUM_CATEGORIES]; MAX_PLAYERS],
}

impl Default for GreedyBot {
    fn default() -> Self {
        Self::new()
    }
}

impl GreedyBot {
    pub fn new() -> Self {
        Self {
            used: [[false; NUM_CATEGORIES]; MAX_PLAYERS],
        }
    }

    /// Dice not showing the most common face.
    pub fn choose_reroll(dice: &Dice) -> RerollMask {
        let counts = dice.face_counts();
        let mut target = 0usize;
        for (i, &c) in counts.iter().enumerate() {
            if c >= counts[target] {
                target = i;
            }
        }
        let face = target as u8 + 1;
        let bits = dice
            .faces()
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d != face)
            .fold(0u8, |acc, (i, _)| acc | (1 << i));
        RerollMask::from_bits(bits).unwrap_or(RerollMask::NONE)
    }

    /// Best unused category for `dice`, or `None` if every category is used.
    pub fn choose_category(&self, player: usize, dice: &Dice) -> Option<Category> {
        let used = self.used.get(player)?;
        let mut best: Option<(Category, u16)> = None;
        for cat in Category::ALL {
            if used[cat.index()] {
                continue;
            }
            let score = classify(dice, cat).score;
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((cat, score));
            }
        }
        best.map(|(c, _)| c)
    }
}

impl Frontend for GreedyBot {
    fn request_roll_trigger(&mut self, _player: &Player) -> Result<(), InputError> {
        Ok(())
    }

    fn request_reroll_selection(
        &mut self,
        _player: &Player,
        dice: &Dice,
    ) -> Result<RerollMask, InputError> {
        Ok(Self::choose_reroll(dice))
    }

    fn request_category_selection(
        &mut self,
        player: &Player,
        dice: &Dice,
    ) -> Result<Category, InputError> {
        self.choose_category(player.index, dice)
            .ok_or(InputError::Exhausted {
                expected: "an unused category",
            })
    }

    fn report_dice(&mut self, _dice: &Dice) {}

    fn report_score_update(&mut self, update: ScoreUpdate) {
        if let ScoreRow::Category(c) = update.row {
            if let Some(used) = self.used.get_mut(update.player) {
                used[c.index()] = true;
            }
        }
    }

    fn report_message(&mut self, _text: &str) {}
}
