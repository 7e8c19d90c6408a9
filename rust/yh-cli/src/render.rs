//! Plain-text rendering: scorecard table, dice line, histogram, rules.

use std::fmt::Write as _;

use yh_core::{Dice, Event, Player, ScoreRow, ScorecardSnapshot};

const LABEL_WIDTH: usize = 26;
const COLUMN_WIDTH: usize = 10;

/// Scorecard as a fixed-width table, one column per player. Empty cells are blank.
pub fn scorecard_table(snapshot: &ScorecardSnapshot) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:<LABEL_WIDTH$}", "");
    for col in &snapshot.players {
        let _ = write!(out, "{:>COLUMN_WIDTH$}", truncate(&col.name, COLUMN_WIDTH - 1));
    }
    out.push('\n');
    let width = LABEL_WIDTH + COLUMN_WIDTH * snapshot.players.len();
    out.push_str(&"─".repeat(width));
    out.push('\n');

    for row in ScoreRow::ALL {
        let _ = write!(out, "{:<LABEL_WIDTH$}", row.label());
        for col in &snapshot.players {
            match col.cell(row) {
                Some(v) => {
                    let _ = write!(out, "{v:>COLUMN_WIDTH$}");
                }
                None => {
                    let _ = write!(out, "{:>COLUMN_WIDTH$}", "");
                }
            }
        }
        out.push('\n');
        if matches!(row, ScoreRow::UpperBonus | ScoreRow::LowerScore) {
            out.push_str(&"─".repeat(width));
            out.push('\n');
        }
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// `[0]4 [1]4 [2]1 [3]6 [4]2`: faces labelled with their 0-based reroll index.
pub fn dice_line(dice: &Dice) -> String {
    dice.faces()
        .iter()
        .enumerate()
        .map(|(i, f)| format!("[{i}]{f}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Transcript line for an event; `None` for derived subtotal updates.
pub fn event_line(event: &Event, players: &[Player]) -> Option<String> {
    let name = |i: usize| players.get(i).map_or("?", |p| p.name.as_str());
    match event {
        Event::TurnStarted { player } => Some(format!("\n=== {} ===", name(*player))),
        Event::DiceRolled { dice } => Some(format!("Dice: {}", dice_line(dice))),
        Event::ScoreChanged { update } => match update.row {
            ScoreRow::Category(c) => Some(format!(
                "{}: {} = {}",
                name(update.player),
                c.label(),
                update.score
            )),
            ScoreRow::UpperBonus => Some(format!(
                "{}: {} = {}",
                name(update.player),
                update.row.label(),
                update.score
            )),
            _ => None,
        },
        Event::Message { text } => Some(text.clone()),
    }
}

const HIST_BIN: u16 = 10;
const HIST_BAR: usize = 50;

/// Score histogram in bins of ten, bars scaled to the fullest bin. Empty input renders nothing.
pub fn histogram(scores: &[u16]) -> String {
    let (Some(&lo), Some(&hi)) = (scores.iter().min(), scores.iter().max()) else {
        return String::new();
    };
    let first = lo / HIST_BIN;
    let mut bins = vec![0usize; (hi / HIST_BIN - first) as usize + 1];
    for &s in scores {
        bins[(s / HIST_BIN - first) as usize] += 1;
    }
    let fullest = bins.iter().copied().max().unwrap_or(1).max(1);
    let rule = "─".repeat(70);

    let mut out = String::new();
    let _ = writeln!(out, "\nScore histogram (N={}, bin={HIST_BIN}):", scores.len());
    let _ = writeln!(out, "{rule}");
    for (i, &count) in bins.iter().enumerate() {
        let start = (first + i as u16) * HIST_BIN;
        let bar = "█".repeat(count * HIST_BAR / fullest);
        let pct = count as f64 * 100.0 / scores.len() as f64;
        let _ = writeln!(
            out,
            "{start:3}-{:3} │{bar:<HIST_BAR$} {count:4} ({pct:.1}%)",
            start + HIST_BIN - 1
        );
    }
    let _ = writeln!(out, "{rule}");
    out
}

pub const RULES: &str = r#"HOW TO PLAY YAHTZEE

Each game lasts 13 rounds. On your turn you roll five dice, then you may
reroll any of them twice more. After the third roll you must fill one empty
box on your scorecard; each box is used exactly once, even if it scores 0.

UPPER SECTION
    Ones .. Sixes        Sum of the dice showing that face
    Upper Bonus          35 points if the upper section totals 63 or more

LOWER SECTION
    Three of a Kind      At least three alike: sum of all dice
    Four of a Kind       At least four alike: sum of all dice
    Full House           Three of one face and two of another: 25
    Small Straight       Four in a row (1-4, 2-5 or 3-6): 30
    Large Straight       Five in a row (1-5 or 2-6): 40
    Yahtzee              All five alike: 50
    Chance               Any dice: sum of all dice

The highest grand total wins. Equal totals share the win.

More: http://www.yahtzee-game.com/#rules
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use yh_core::{Category, Scorecard};

    #[test]
    fn table_shows_filled_cells_only() {
        let mut sc = Scorecard::new(2);
        sc.record(0, Category::FullHouse, 25).unwrap();
        sc.record(1, Category::Sixes, 24).unwrap();
        let table = scorecard_table(&sc.snapshot(&["Ada".into(), "Grace".into()]));

        let header = table.lines().next().unwrap();
        assert!(header.contains("Ada") && header.contains("Grace"));
        let fh = table
            .lines()
            .find(|l| l.starts_with("Full House"))
            .unwrap();
        assert_eq!(fh.split_whitespace().last(), Some("25"));
        let ones = table.lines().find(|l| l.starts_with("Ones")).unwrap();
        assert_eq!(ones.trim(), "Ones");
        let total = table.lines().find(|l| l.starts_with("TOTAL")).unwrap();
        assert_eq!(
            total.split_whitespace().collect::<Vec<_>>(),
            vec!["TOTAL", "25", "24"]
        );
    }

    #[test]
    fn dice_line_labels_indices() {
        let dice = Dice::new([4, 4, 1, 6, 2]).unwrap();
        assert_eq!(dice_line(&dice), "[0]4 [1]4 [2]1 [3]6 [4]2");
    }

    #[test]
    fn histogram_bins_by_ten_and_keeps_empty_bins() {
        let text = histogram(&[101, 105, 109, 131]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "Score histogram (N=4, bin=10):");
        let bins: Vec<&str> = lines.iter().copied().filter(|l| l.contains('│')).collect();
        assert_eq!(bins.len(), 4);
        assert!(bins[0].starts_with("100-109 │"));
        assert_eq!(bins[0].matches('█').count(), 50);
        assert!(bins[0].ends_with("   3 (75.0%)"), "{}", bins[0]);
        assert_eq!(bins[1].matches('█').count(), 0);
        assert!(bins[1].ends_with("   0 (0.0%)"));
        assert_eq!(bins[3].matches('█').count(), 16);
        assert!(histogram(&[]).is_empty());
    }
}
