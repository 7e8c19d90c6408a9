//! Fixed rule parameters and the contract-violation error shared by the rule core.

use thiserror::Error;

pub const NUM_DICE: usize = 5;
pub const NUM_FACES: usize = 6;
pub const NUM_CATEGORIES: usize = 13;
/// One round per category, so every scorecard ends up exactly filled.
pub const NUM_ROUNDS: usize = NUM_CATEGORIES;
/// Reroll opportunities after the first roll of a turn.
pub const NUM_REROLLS: u8 = 2;
pub const MAX_PLAYERS: usize = 4;

pub const UPPER_BONUS_THRESHOLD: u16 = 63;
pub const UPPER_BONUS_SCORE: u16 = 35;
pub const FULL_HOUSE_SCORE: u16 = 25;
pub const SMALL_STRAIGHT_SCORE: u16 = 30;
pub const LARGE_STRAIGHT_SCORE: u16 = 40;
pub const YAHTZEE_SCORE: u16 = 50;

/// Identifies this ruleset in logs.
pub const RULESET_ID: &str = "yahtzee_classic_v1";

/// Caller contract violations. These are never coerced into a valid value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("expected {expected} dice, got {got}", expected = NUM_DICE)]
    WrongDiceCount { got: usize },
    #[error("die {index} shows {value}, faces must be in 1..=6")]
    DieOutOfRange { index: usize, value: u8 },
    #[error("die index {index} out of range 0..{max}", max = NUM_DICE)]
    DieIndexOutOfRange { index: usize },
    #[error("unknown category: {0:?}")]
    UnknownCategory(String),
    #[error("category index out of range: {0}")]
    CategoryIndexOutOfRange(u8),
    #[error("player {player} out of range for {num_players} players")]
    PlayerOutOfRange { player: usize, num_players: usize },
    #[error("a game needs at least one player")]
    NoPlayers,
    #[error("too many players: {got} (max {max})", max = MAX_PLAYERS)]
    TooManyPlayers { got: usize },
}

/// A game seats 1..=`MAX_PLAYERS` players.
pub fn check_player_count(count: usize) -> Result<(), RulesError> {
    match count {
        0 => Err(RulesError::NoPlayers),
        n if n > MAX_PLAYERS => Err(RulesError::TooManyPlayers { got: n }),
        _ => Ok(()),
    }
}
