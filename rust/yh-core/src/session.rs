//! Blocking session driver.
//!
//! Runs a [`Game`] to completion against a [`Frontend`], suspending at the
//! three input points (roll trigger, reroll selection, category selection).
//! Exactly one request is outstanding at a time.

use thiserror::Error;

use crate::chance::ChanceMode;
use crate::engine::{Action, ApplyError, Game, GameOutcome, Phase, StepStatus};
use crate::frontend::{Frontend, InputError};
use crate::rules::RulesError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Rules(#[from] RulesError),
    #[error(transparent)]
    Apply(#[from] ApplyError),
    #[error(transparent)]
    Input(#[from] InputError),
}

pub struct GameSession {
    game: Game,
}

impl GameSession {
    pub fn new(names: Vec<String>, chance: ChanceMode) -> Result<Self, SessionError> {
        Ok(Self {
            game: Game::new(names, chance)?,
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Play every remaining turn. Returns the final standings.
    pub fn run<F: Frontend + ?Sized>(
        &mut self,
        frontend: &mut F,
    ) -> Result<GameOutcome, SessionError> {
        while self.step_turn(frontend)? {}
        Ok(self.game.outcome())
    }

    /// Play one full turn of the current player. Returns `false` once the game is over.
    pub fn step_turn<F: Frontend + ?Sized>(
        &mut self,
        frontend: &mut F,
    ) -> Result<bool, SessionError> {
        loop {
            let player = self.game.current_player().clone();
            match self.game.phase() {
                Phase::GameOver => return Ok(false),
                Phase::AwaitRoll => {
                    frontend.report_turn_start(&player);
                    frontend.report_message(&self.game.prompt());
                    frontend.request_roll_trigger(&player)?;
                    self.apply(frontend, Action::Roll)?;
                }
                Phase::AwaitReroll { .. } => {
                    frontend.report_message(&self.game.prompt());
                    let dice = self.game.require_dice()?;
                    let mask = frontend.request_reroll_selection(&player, &dice)?;
                    self.apply(frontend, Action::Reroll(mask))?;
                }
                Phase::AwaitCategory => {
                    frontend.report_message(&self.game.prompt());
                    let dice = self.game.require_dice()?;
                    // A used category is re-requested without limit.
                    loop {
                        let category = frontend.request_category_selection(&player, &dice)?;
                        match self.apply(frontend, Action::Mark(category))? {
                            StepStatus::CategoryRejected => continue,
                            StepStatus::Terminal => return Ok(false),
                            StepStatus::Progress => return Ok(true),
                        }
                    }
                }
            }
        }
    }

    fn apply<F: Frontend + ?Sized>(
        &mut self,
        frontend: &mut F,
        action: Action,
    ) -> Result<StepStatus, SessionError> {
        let step = self.game.apply(action)?;
        for event in &step.events {
            frontend.report(event, self.game.players());
        }
        Ok(step.status)
    }
}
