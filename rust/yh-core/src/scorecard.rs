//! Per-player scorecard bookkeeping: entries, subtotals, bonus and winners.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::category::{Category, ScoreRow};
use crate::rules::{RulesError, NUM_CATEGORIES, UPPER_BONUS_SCORE, UPPER_BONUS_THRESHOLD};

/// Derived totals for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PlayerTotals {
    pub upper: u16,
    /// 0 until bonuses are applied at game end.
    pub bonus: u16,
    pub lower: u16,
    pub total: u16,
}

impl PlayerTotals {
    pub fn row(&self, row: ScoreRow) -> Option<u16> {
        match row {
            ScoreRow::Category(_) => None,
            ScoreRow::UpperScore => Some(self.upper),
            ScoreRow::UpperBonus => Some(self.bonus),
            ScoreRow::LowerScore => Some(self.lower),
            ScoreRow::Total => Some(self.total),
        }
    }
}

/// Outcome of trying to fill a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Recorded { totals: PlayerTotals },
    /// The player already used this category (even if it scored 0).
    AlreadyUsed,
}

/// Bonus earned by an upper subtotal.
pub fn upper_bonus(upper_subtotal: u16) -> u16 {
    if upper_subtotal >= UPPER_BONUS_THRESHOLD {
        UPPER_BONUS_SCORE
    } else {
        0
    }
}

/// Indices of every player whose total equals the maximum. Ties yield several winners.
pub fn winners(totals: &[u16]) -> Vec<usize> {
    let Some(&best) = totals.iter().max() else {
        return Vec::new();
    };
    totals
        .iter()
        .enumerate()
        .filter(|&(_, &t)| t == best)
        .map(|(i, _)| i)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scorecard {
    entries: Vec<[Option<u16>; NUM_CATEGORIES]>,
    bonuses_applied: bool,
}

impl Scorecard {
    pub fn new(num_players: usize) -> Self {
        Self {
            entries: vec![[None; NUM_CATEGORIES]; num_players],
            bonuses_applied: false,
        }
    }

    pub fn num_players(&self) -> usize {
        self.entries.len()
    }

    fn column(&self, player: usize) -> Result<&[Option<u16>; NUM_CATEGORIES], RulesError> {
        self.entries.get(player).ok_or(RulesError::PlayerOutOfRange {
            player,
            num_players: self.entries.len(),
        })
    }

    pub fn entry(&self, player: usize, category: Category) -> Result<Option<u16>, RulesError> {
        Ok(self.column(player)?[category.index()])
    }

    pub fn is_used(&self, player: usize, category: Category) -> Result<bool, RulesError> {
        Ok(self.entry(player, category)?.is_some())
    }

    /// Categories the player may still choose, in scorecard order.
    pub fn available(&self, player: usize) -> Result<Vec<Category>, RulesError> {
        let col = self.column(player)?;
        Ok(Category::ALL
            .iter()
            .copied()
            .filter(|c| col[c.index()].is_none())
            .collect())
    }

    pub fn is_complete(&self, player: usize) -> Result<bool, RulesError> {
        Ok(self.column(player)?.iter().all(Option::is_some))
    }

    /// Fill `category` for `player`. A used category is left untouched.
    pub fn record(
        &mut self,
        player: usize,
        category: Category,
        score: u16,
    ) -> Result<RecordOutcome, RulesError> {
        let num_players = self.entries.len();
        let col = self
            .entries
            .get_mut(player)
            .ok_or(RulesError::PlayerOutOfRange {
                player,
                num_players,
            })?;
        let cell = &mut col[category.index()];
        if cell.is_some() {
            return Ok(RecordOutcome::AlreadyUsed);
        }
        *cell = Some(score);
        Ok(RecordOutcome::Recorded {
            totals: self.totals(player)?,
        })
    }

    pub fn totals(&self, player: usize) -> Result<PlayerTotals, RulesError> {
        let col = self.column(player)?;
        let mut upper = 0u16;
        let mut lower = 0u16;
        for cat in Category::ALL {
            let v = col[cat.index()].unwrap_or(0);
            if cat.is_upper() {
                upper += v;
            } else {
                lower += v;
            }
        }
        let bonus = if self.bonuses_applied {
            upper_bonus(upper)
        } else {
            0
        };
        Ok(PlayerTotals {
            upper,
            bonus,
            lower,
            total: upper + bonus + lower,
        })
    }

    pub fn bonuses_applied(&self) -> bool {
        self.bonuses_applied
    }

    /// Award the upper bonus to every qualifying player. Returns the players awarded.
    ///
    /// Calling this again awards nothing new.
    pub fn apply_bonuses(&mut self) -> Vec<usize> {
        if self.bonuses_applied {
            return Vec::new();
        }
        self.bonuses_applied = true;
        (0..self.entries.len())
            .filter(|&p| matches!(self.totals(p), Ok(t) if t.bonus > 0))
            .collect()
    }

    /// Read-only copy for front ends.
    pub fn snapshot(&self, names: &[String]) -> ScorecardSnapshot {
        let players = self
            .entries
            .iter()
            .enumerate()
            .map(|(p, col)| PlayerColumn {
                name: names.get(p).cloned().unwrap_or_default(),
                entries: Category::ALL
                    .iter()
                    .map(|c| (*c, col[c.index()]))
                    .collect(),
                totals: self.totals(p).unwrap_or_default(),
            })
            .collect();
        ScorecardSnapshot { players }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerColumn {
    pub name: String,
    pub entries: BTreeMap<Category, Option<u16>>,
    pub totals: PlayerTotals,
}

impl PlayerColumn {
    /// Cell value for any row; `None` for an unfilled category.
    pub fn cell(&self, row: ScoreRow) -> Option<u16> {
        match row {
            ScoreRow::Category(c) => self.entries.get(&c).copied().flatten(),
            other => self.totals.row(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScorecardSnapshot {
    pub players: Vec<PlayerColumn>,
}
