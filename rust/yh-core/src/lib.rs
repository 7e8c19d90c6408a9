//! yh-core: Yahtzee rules, scoring, turn engine, game session and configuration.

pub mod bot;
pub mod category;
pub mod chance;
pub mod config;
pub mod dice;
pub mod engine;
pub mod frontend;
pub mod rendezvous;
pub mod rules;
pub mod scorecard;
pub mod scoring;
pub mod script;
pub mod session;
pub mod sim;

#[cfg(test)]
mod chance_tests;
#[cfg(test)]
mod scorecard_tests;
#[cfg(test)]
mod session_tests;

pub use bot::GreedyBot;
pub use category::{Category, ScoreRow, Section};
pub use chance::{ChanceError, ChanceMode, EventKey};
pub use config::{ChanceKind, Config, ConfigError};
pub use dice::{Dice, RerollMask};
pub use engine::{Action, ApplyError, Game, GameOutcome, Phase, Player, StepResult, StepStatus};
pub use frontend::{Event, Frontend, InputError, ScoreUpdate};
pub use rules::{RulesError, RULESET_ID};
pub use scorecard::{
    upper_bonus, winners, PlayerColumn, PlayerTotals, RecordOutcome, Scorecard, ScorecardSnapshot,
};
pub use scoring::{classify, classify_and_score, scores_for_dice, Classification};
pub use script::{parse_script, Decision, ScriptError, ScriptedFrontend};
pub use session::{GameSession, SessionError};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_nonempty() {
        assert!(!VERSION.is_empty());
    }
}
