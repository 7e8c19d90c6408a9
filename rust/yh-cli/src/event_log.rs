//! NDJSON event logging around any front end.

use std::path::Path;

use yh_core::{
    Category, Dice, Frontend, Game, GameOutcome, InputError, Player, RerollMask, ScoreUpdate,
    RULESET_ID,
};
use yh_logging::{
    now_ms, DiceEventV1, GameEndEventV1, GameStartEventV1, MessageEventV1, NdjsonError,
    NdjsonWriter, ScoreEventV1, TurnEventV1, VersionInfoV1,
};

/// Forwards every call to `inner` and appends one event per report.
///
/// A failed write is reported once on stderr; logging then stops and the game goes on.
pub struct EventLogFrontend<F> {
    inner: F,
    writer: Option<NdjsonWriter>,
    game_id: String,
    player: usize,
    round: usize,
}

impl<F: Frontend> EventLogFrontend<F> {
    pub fn open(
        inner: F,
        path: impl AsRef<Path>,
        flush_every_lines: u64,
        game_id: String,
    ) -> Result<Self, NdjsonError> {
        Ok(Self {
            inner,
            writer: Some(NdjsonWriter::open_append_with_flush(path, flush_every_lines)?),
            game_id,
            player: 0,
            round: 0,
        })
    }

    fn write<T: serde::Serialize>(&mut self, event: &T) {
        let Some(w) = self.writer.as_mut() else {
            return;
        };
        if let Err(e) = w.write_event(event) {
            eprintln!("warning: event log disabled: {e}");
            self.writer = None;
        }
    }

    pub fn log_game_start(&mut self, game: &Game, seed: Option<u64>) {
        let ev = GameStartEventV1 {
            event: "game_start",
            ts_ms: now_ms(),
            v: VersionInfoV1::new(RULESET_ID),
            game_id: self.game_id.clone(),
            players: game.players().iter().map(|p| p.name.clone()).collect(),
            chance: game.chance_kind(),
            seed,
        };
        self.write(&ev);
    }

    pub fn log_game_end(&mut self, outcome: &GameOutcome) {
        let ev = GameEndEventV1 {
            event: "game_end",
            ts_ms: now_ms(),
            v: VersionInfoV1::new(RULESET_ID),
            game_id: self.game_id.clone(),
            totals: outcome.totals.iter().map(|t| t.total).collect(),
            winners: outcome.winners.clone(),
        };
        self.write(&ev);
        if let Some(w) = self.writer.as_mut() {
            if let Err(e) = w.flush() {
                eprintln!("warning: event log flush failed: {e}");
            }
        }
    }
}

impl<F: Frontend> Frontend for EventLogFrontend<F> {
    fn request_roll_trigger(&mut self, player: &Player) -> Result<(), InputError> {
        self.inner.request_roll_trigger(player)
    }

    fn request_reroll_selection(
        &mut self,
        player: &Player,
        dice: &Dice,
    ) -> Result<RerollMask, InputError> {
        self.inner.request_reroll_selection(player, dice)
    }

    fn request_category_selection(
        &mut self,
        player: &Player,
        dice: &Dice,
    ) -> Result<Category, InputError> {
        self.inner.request_category_selection(player, dice)
    }

    fn report_turn_start(&mut self, player: &Player) {
        if player.index == 0 {
            self.round += 1;
        }
        self.player = player.index;
        let ev = TurnEventV1 {
            event: "turn",
            ts_ms: now_ms(),
            v: VersionInfoV1::new(RULESET_ID),
            game_id: self.game_id.clone(),
            player: player.index,
            round: self.round,
        };
        self.write(&ev);
        self.inner.report_turn_start(player);
    }

    fn report_dice(&mut self, dice: &Dice) {
        let ev = DiceEventV1 {
            event: "dice",
            ts_ms: now_ms(),
            v: VersionInfoV1::new(RULESET_ID),
            game_id: self.game_id.clone(),
            player: self.player,
            round: self.round,
            dice: dice.faces(),
        };
        self.write(&ev);
        self.inner.report_dice(dice);
    }

    fn report_score_update(&mut self, update: ScoreUpdate) {
        let ev = ScoreEventV1 {
            event: "score",
            ts_ms: now_ms(),
            v: VersionInfoV1::new(RULESET_ID),
            game_id: self.game_id.clone(),
            player: update.player,
            row: update.row.name(),
            score: update.score,
        };
        self.write(&ev);
        self.inner.report_score_update(update);
    }

    fn report_message(&mut self, text: &str) {
        let ev = MessageEventV1 {
            event: "message",
            ts_ms: now_ms(),
            v: VersionInfoV1::new(RULESET_ID),
            game_id: self.game_id.clone(),
            text: text.to_string(),
        };
        self.write(&ev);
        self.inner.report_message(text);
    }
}
