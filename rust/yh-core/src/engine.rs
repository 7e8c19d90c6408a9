//! Turn state machine: the single place that mutates game state via rules.
//!
//! A turn is: `Roll`, then exactly `NUM_REROLLS` `Reroll`s (an empty mask
//! keeps every die), then `Mark` until an unused category is chosen. After
//! the last player's last round bonuses are applied and winners computed.

use serde::Serialize;
use thiserror::Error;

use crate::category::{Category, ScoreRow};
use crate::chance::{ChanceError, ChanceMode, EventKey};
use crate::dice::{Dice, RerollMask};
use crate::frontend::{Event, ScoreUpdate};
use crate::rules::{check_player_count, RulesError, NUM_DICE, NUM_REROLLS, NUM_ROUNDS};
use crate::scorecard::{winners, PlayerTotals, RecordOutcome, Scorecard, ScorecardSnapshot};
use crate::scoring::classify;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub index: usize,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    AwaitRoll,
    AwaitReroll { rerolls_left: u8 },
    AwaitCategory,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Roll,
    Reroll(RerollMask),
    Mark(Category),
}

#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("action {action:?} is not allowed in phase {phase:?}")]
    WrongPhase { phase: Phase, action: Action },
    #[error("the game is over")]
    GameOver,
    #[error("invalid state: {msg}")]
    InvalidState { msg: &'static str },
    #[error(transparent)]
    Rules(#[from] RulesError),
    #[error(transparent)]
    Chance(#[from] ChanceError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Progress,
    /// The category was already used by this player; ask again.
    CategoryRejected,
    Terminal,
}

#[derive(Debug)]
pub struct StepResult {
    pub status: StepStatus,
    pub events: Vec<Event>,
}

/// Final standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameOutcome {
    pub players: Vec<Player>,
    pub totals: Vec<PlayerTotals>,
    /// Indices of every player tied at the best total.
    pub winners: Vec<usize>,
}

impl GameOutcome {
    pub fn winner_names(&self) -> Vec<&str> {
        self.winners
            .iter()
            .filter_map(|&i| self.players.get(i).map(|p| p.name.as_str()))
            .collect()
    }
}

const NO_DICE: ApplyError = ApplyError::InvalidState {
    msg: "no dice on the table",
};

pub struct Game {
    players: Vec<Player>,
    scorecard: Scorecard,
    chance: ChanceMode,
    phase: Phase,
    player_to_move: usize,
    round_idx: usize,
    dice: Option<Dice>,
}

impl Game {
    /// Start a game. Blank names become "Player N".
    pub fn new(names: Vec<String>, chance: ChanceMode) -> Result<Self, RulesError> {
        check_player_count(names.len())?;
        let players: Vec<Player> = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| {
                let name = name.trim();
                Player {
                    index,
                    name: if name.is_empty() {
                        format!("Player {}", index + 1)
                    } else {
                        name.to_string()
                    },
                }
            })
            .collect();
        Ok(Self {
            scorecard: Scorecard::new(players.len()),
            players,
            chance,
            phase: Phase::AwaitRoll,
            player_to_move: 0,
            round_idx: 0,
            dice: None,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.player_to_move]
    }

    /// 1-based round number.
    pub fn round(&self) -> usize {
        self.round_idx + 1
    }

    /// Dice on the table; `None` before the opening roll of a turn.
    pub fn dice(&self) -> Option<Dice> {
        self.dice
    }

    pub(crate) fn require_dice(&self) -> Result<Dice, ApplyError> {
        self.dice.ok_or(NO_DICE)
    }

    pub fn scorecard(&self) -> &Scorecard {
        &self.scorecard
    }

    pub fn chance_kind(&self) -> &'static str {
        self.chance.kind()
    }

    pub fn snapshot(&self) -> ScorecardSnapshot {
        let names: Vec<String> = self.players.iter().map(|p| p.name.clone()).collect();
        self.scorecard.snapshot(&names)
    }

    /// Standings so far; final once the game is over.
    pub fn outcome(&self) -> GameOutcome {
        let totals: Vec<PlayerTotals> = (0..self.players.len())
            .map(|p| self.scorecard.totals(p).unwrap_or_default())
            .collect();
        let grand: Vec<u16> = totals.iter().map(|t| t.total).collect();
        GameOutcome {
            players: self.players.clone(),
            totals,
            winners: winners(&grand),
        }
    }

    /// Status line for the current phase.
    pub fn prompt(&self) -> String {
        let name = &self.current_player().name;
        match self.phase {
            Phase::AwaitRoll => format!("{name}, roll the dice!"),
            Phase::AwaitReroll { .. } => format!("{name}, select the dice and reroll."),
            Phase::AwaitCategory => format!("{name}, select a category."),
            Phase::GameOver => winner_message(&self.outcome()),
        }
    }

    pub fn apply(&mut self, action: Action) -> Result<StepResult, ApplyError> {
        match (self.phase, action) {
            (Phase::GameOver, _) => Err(ApplyError::GameOver),
            (Phase::AwaitRoll, Action::Roll) => self.roll(),
            (Phase::AwaitReroll { rerolls_left }, Action::Reroll(mask)) => {
                self.reroll(rerolls_left, mask)
            }
            (Phase::AwaitCategory, Action::Mark(category)) => self.mark(category),
            (phase, action) => Err(ApplyError::WrongPhase { phase, action }),
        }
    }

    fn event_key(&self, roll_idx: u8) -> EventKey {
        EventKey {
            episode_seed: 0,
            player: self.player_to_move as u8,
            round_idx: self.round_idx as u8,
            roll_idx,
        }
    }

    fn roll(&mut self) -> Result<StepResult, ApplyError> {
        let draws = self.chance.draw(self.event_key(0), NUM_DICE)?;
        let dice = Dice::new(draws)?;
        self.dice = Some(dice);
        self.phase = Phase::AwaitReroll {
            rerolls_left: NUM_REROLLS,
        };
        Ok(StepResult {
            status: StepStatus::Progress,
            events: vec![Event::DiceRolled { dice }],
        })
    }

    fn reroll(&mut self, rerolls_left: u8, mask: RerollMask) -> Result<StepResult, ApplyError> {
        let mut dice = self.dice.ok_or(NO_DICE)?;
        let roll_idx = NUM_REROLLS - rerolls_left + 1;
        let draws = self.chance.draw(self.event_key(roll_idx), mask.count())?;
        dice.apply_reroll(mask, &draws[..mask.count()]);
        self.dice = Some(dice);
        self.phase = match rerolls_left - 1 {
            0 => Phase::AwaitCategory,
            n => Phase::AwaitReroll { rerolls_left: n },
        };
        Ok(StepResult {
            status: StepStatus::Progress,
            events: vec![Event::DiceRolled { dice }],
        })
    }

    fn mark(&mut self, category: Category) -> Result<StepResult, ApplyError> {
        let dice = self.dice.ok_or(NO_DICE)?;
        let player = self.player_to_move;
        let score = classify(&dice, category).score;

        let totals = match self.scorecard.record(player, category, score)? {
            RecordOutcome::AlreadyUsed => {
                let name = &self.players[player].name;
                return Ok(StepResult {
                    status: StepStatus::CategoryRejected,
                    events: vec![Event::Message {
                        text: format!(
                            "{name}, that category has already been selected. \
                             Please choose another one."
                        ),
                    }],
                });
            }
            RecordOutcome::Recorded { totals } => totals,
        };

        let section_row = if category.is_upper() {
            (ScoreRow::UpperScore, totals.upper)
        } else {
            (ScoreRow::LowerScore, totals.lower)
        };
        let mut events = vec![
            score_event(ScoreRow::Category(category), player, score),
            score_event(section_row.0, player, section_row.1),
            score_event(ScoreRow::Total, player, totals.total),
        ];

        self.dice = None;
        self.player_to_move += 1;
        if self.player_to_move == self.players.len() {
            self.player_to_move = 0;
            self.round_idx += 1;
        }

        if self.round_idx == NUM_ROUNDS {
            events.extend(self.finish());
            return Ok(StepResult {
                status: StepStatus::Terminal,
                events,
            });
        }

        self.phase = Phase::AwaitRoll;
        Ok(StepResult {
            status: StepStatus::Progress,
            events,
        })
    }

    fn finish(&mut self) -> Vec<Event> {
        self.phase = Phase::GameOver;
        self.player_to_move = 0;
        let mut events = Vec::new();
        for player in self.scorecard.apply_bonuses() {
            if let Ok(t) = self.scorecard.totals(player) {
                events.push(score_event(ScoreRow::UpperBonus, player, t.bonus));
                events.push(score_event(ScoreRow::Total, player, t.total));
            }
        }
        events.push(Event::Message {
            text: winner_message(&self.outcome()),
        });
        events
    }
}

fn score_event(row: ScoreRow, player: usize, score: u16) -> Event {
    Event::ScoreChanged {
        update: ScoreUpdate { row, player, score },
    }
}

fn winner_message(outcome: &GameOutcome) -> String {
    format!("Winner: {}", outcome.winner_names().join(", "))
}
