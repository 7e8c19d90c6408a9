//! Line-based interactive front end over any reader/writer pair.
//!
//! Bad input is reported and asked for again; end of input or `q` ends the
//! game with `InputError::Closed`.

use std::io::{BufRead, Write};

use yh_core::{
    Category, Dice, Frontend, InputError, Player, RerollMask, ScoreRow, ScoreUpdate,
    ScorecardSnapshot,
};

use crate::render::{dice_line, scorecard_table};

pub struct TerminalFrontend<R, W> {
    input: R,
    out: W,
    /// Mirror of the scorecard, kept current from score updates.
    card: ScorecardSnapshot,
}

impl<R: BufRead, W: Write> TerminalFrontend<R, W> {
    pub fn new(input: R, out: W, card: ScorecardSnapshot) -> Self {
        Self { input, out, card }
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.out
    }

    fn say(&mut self, text: &str) {
        // Output errors surface as Closed on the next read.
        let _ = writeln!(self.out, "{text}");
    }

    /// Next non-empty-or-empty line, trimmed. `q`/`quit` and EOF close the input.
    fn ask(&mut self, prompt: &str) -> Result<String, InputError> {
        write!(self.out, "{prompt} ")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputError::Closed);
        }
        let line = line.trim().to_string();
        if matches!(line.to_ascii_lowercase().as_str(), "q" | "quit" | "exit") {
            return Err(InputError::Closed);
        }
        Ok(line)
    }

    fn used(&self, player: usize, category: Category) -> bool {
        self.card
            .players
            .get(player)
            .and_then(|col| col.entries.get(&category).copied().flatten())
            .is_some()
    }

    fn list_options(&mut self, player: usize, dice: &Dice) {
        let lines: Vec<String> = Category::ALL
            .iter()
            .filter(|&&c| !self.used(player, c))
            .map(|&c| {
                let score = yh_core::classify(dice, c).score;
                format!("  {:<16} {:>3}", c.name(), score)
            })
            .collect();
        for l in lines {
            self.say(&l);
        }
    }
}

fn parse_reroll(line: &str) -> Result<RerollMask, String> {
    if line.is_empty() || line.eq_ignore_ascii_case("keep") {
        return Ok(RerollMask::NONE);
    }
    if line.eq_ignore_ascii_case("all") {
        return Ok(RerollMask::ALL);
    }
    let indices = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|w| !w.is_empty())
        .map(|w| w.parse::<usize>().map_err(|_| format!("not a die index: {w:?}")))
        .collect::<Result<Vec<_>, _>>()?;
    RerollMask::from_indices(indices).map_err(|e| e.to_string())
}

impl<R: BufRead, W: Write> Frontend for TerminalFrontend<R, W> {
    fn request_roll_trigger(&mut self, _player: &Player) -> Result<(), InputError> {
        loop {
            let line = self.ask("Press Enter to roll (q quits):")?;
            if line.is_empty() || line.eq_ignore_ascii_case("r") || line.eq_ignore_ascii_case("roll")
            {
                return Ok(());
            }
            self.say("Just press Enter to roll.");
        }
    }

    fn request_reroll_selection(
        &mut self,
        _player: &Player,
        _dice: &Dice,
    ) -> Result<RerollMask, InputError> {
        loop {
            let line = self.ask("Dice to reroll (0-4, blank keeps all):")?;
            match parse_reroll(&line) {
                Ok(mask) => return Ok(mask),
                Err(e) => self.say(&e),
            }
        }
    }

    fn request_category_selection(
        &mut self,
        player: &Player,
        dice: &Dice,
    ) -> Result<Category, InputError> {
        loop {
            let line = self.ask("Category ('?' lists options, 'card' shows scores):")?;
            match line.as_str() {
                "?" | "" => self.list_options(player.index, dice),
                "card" => {
                    let table = scorecard_table(&self.card);
                    self.say(&table);
                }
                other => match other.parse::<Category>() {
                    Ok(c) => return Ok(c),
                    Err(e) => self.say(&e.to_string()),
                },
            }
        }
    }

    fn report_turn_start(&mut self, player: &Player) {
        self.say(&format!("\n=== {} ===", player.name));
    }

    fn report_dice(&mut self, dice: &Dice) {
        self.say(&format!("Dice: {}", dice_line(dice)));
    }

    fn report_score_update(&mut self, update: ScoreUpdate) {
        let Some(col) = self.card.players.get_mut(update.player) else {
            return;
        };
        match update.row {
            ScoreRow::Category(c) => {
                col.entries.insert(c, Some(update.score));
            }
            ScoreRow::UpperScore => col.totals.upper = update.score,
            ScoreRow::UpperBonus => col.totals.bonus = update.score,
            ScoreRow::LowerScore => col.totals.lower = update.score,
            ScoreRow::Total => col.totals.total = update.score,
        }
        if let ScoreRow::Category(c) = update.row {
            let name = col.name.clone();
            self.say(&format!("{name}: {} = {}", c.label(), update.score));
        }
    }

    fn report_message(&mut self, text: &str) {
        self.say(text);
    }
}
