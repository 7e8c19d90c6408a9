//! Thread rendezvous between the session and an interactive UI.
//!
//! The session runs on its own thread with a [`ChannelFrontend`]. Each request
//! sends a [`Notice::Prompt`] to the UI and then blocks on a single-slot
//! channel until the UI calls [`InputHandle::answer`]. Reports travel to the
//! UI as [`Notice::Event`]s on the same ordered channel, so the UI sees dice
//! and score updates before the prompt that follows them.
//!
//! Dropping the [`InputHandle`] unblocks a waiting session with
//! [`InputError::Closed`], which is how a UI cancels a game.

use std::sync::mpsc::{self, Receiver, Sender, SyncSender};

use crate::category::Category;
use crate::dice::{Dice, RerollMask};
use crate::engine::Player;
use crate::frontend::{Event, Frontend, InputError, ScoreUpdate};

/// What the session is waiting for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Roll { player: Player },
    Reroll { player: Player, dice: Dice },
    Category { player: Player, dice: Dice },
}

/// Messages from the session to the UI, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Event(Event),
    Prompt(Prompt),
}

/// The UI's reply to the current prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Roll,
    Reroll(RerollMask),
    Category(Category),
}

/// Engine-side end of the rendezvous.
pub struct ChannelFrontend {
    notices: Sender<Notice>,
    answers: Receiver<Answer>,
}

/// UI-side end of the rendezvous.
pub struct InputHandle {
    notices: Receiver<Notice>,
    answers: SyncSender<Answer>,
}

/// Create a connected pair.
pub fn channel() -> (ChannelFrontend, InputHandle) {
    let (notice_tx, notice_rx) = mpsc::channel();
    // One slot: at most one answer is ever in flight.
    let (answer_tx, answer_rx) = mpsc::sync_channel(1);
    (
        ChannelFrontend {
            notices: notice_tx,
            answers: answer_rx,
        },
        InputHandle {
            notices: notice_rx,
            answers: answer_tx,
        },
    )
}

impl ChannelFrontend {
    fn ask(&mut self, prompt: Prompt) -> Result<Answer, InputError> {
        self.notices
            .send(Notice::Prompt(prompt))
            .map_err(|_| InputError::Closed)?;
        self.answers.recv().map_err(|_| InputError::Closed)
    }

    fn notify(&mut self, event: Event) {
        // A UI that has gone away surfaces as Closed at the next request.
        let _ = self.notices.send(Notice::Event(event));
    }
}

fn unexpected(expected: &'static str, got: Answer) -> InputError {
    InputError::UnexpectedDecision {
        expected,
        got: format!("{got:?}"),
    }
}

impl Frontend for ChannelFrontend {
    fn request_roll_trigger(&mut self, player: &Player) -> Result<(), InputError> {
        match self.ask(Prompt::Roll {
            player: player.clone(),
        })? {
            Answer::Roll => Ok(()),
            other => Err(unexpected("roll", other)),
        }
    }

    fn request_reroll_selection(
        &mut self,
        player: &Player,
        dice: &Dice,
    ) -> Result<RerollMask, InputError> {
        match self.ask(Prompt::Reroll {
            player: player.clone(),
            dice: *dice,
        })? {
            Answer::Reroll(mask) => Ok(mask),
            other => Err(unexpected("reroll", other)),
        }
    }

    fn request_category_selection(
        &mut self,
        player: &Player,
        dice: &Dice,
    ) -> Result<Category, InputError> {
        match self.ask(Prompt::Category {
            player: player.clone(),
            dice: *dice,
        })? {
            Answer::Category(c) => Ok(c),
            other => Err(unexpected("category", other)),
        }
    }

    fn report_turn_start(&mut self, player: &Player) {
        self.notify(Event::TurnStarted {
            player: player.index,
        });
    }

    fn report_dice(&mut self, dice: &Dice) {
        self.notify(Event::DiceRolled { dice: *dice });
    }

    fn report_score_update(&mut self, update: ScoreUpdate) {
        self.notify(Event::ScoreChanged { update });
    }

    fn report_message(&mut self, text: &str) {
        self.notify(Event::Message {
            text: text.to_string(),
        });
    }
}

impl InputHandle {
    /// Block for the next notice. `None` once the session has finished and dropped its end.
    pub fn recv(&self) -> Option<Notice> {
        self.notices.recv().ok()
    }

    /// Wake the session with the answer to its current prompt.
    pub fn answer(&self, answer: Answer) -> Result<(), InputError> {
        self.answers.send(answer).map_err(|_| InputError::Closed)
    }
}
