//! Scoring categories and scorecard rows.
//!
//! The category set is closed: 6 upper categories scored by face value and
//! 7 lower categories scored by fixed amounts or dice sums. Each category
//! carries a static rule entry so callers never do index arithmetic.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::rules::{
    RulesError, FULL_HOUSE_SCORE, LARGE_STRAIGHT_SCORE, NUM_CATEGORIES, SMALL_STRAIGHT_SCORE,
    YAHTZEE_SCORE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Yahtzee,
    Chance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Upper,
    Lower,
}

/// Static rule entry for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRule {
    pub section: Section,
    /// Score awarded on a match when it does not depend on the dice.
    pub fixed_score: Option<u16>,
}

impl Category {
    /// All categories in scorecard order.
    pub const ALL: [Category; NUM_CATEGORIES] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yahtzee,
        Category::Chance,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: u8) -> Result<Self, RulesError> {
        Category::ALL
            .get(idx as usize)
            .copied()
            .ok_or(RulesError::CategoryIndexOutOfRange(idx))
    }

    pub fn rule(self) -> CategoryRule {
        use Category::*;
        let (section, fixed_score) = match self {
            Ones | Twos | Threes | Fours | Fives | Sixes => (Section::Upper, None),
            ThreeOfAKind | FourOfAKind | Chance => (Section::Lower, None),
            FullHouse => (Section::Lower, Some(FULL_HOUSE_SCORE)),
            SmallStraight => (Section::Lower, Some(SMALL_STRAIGHT_SCORE)),
            LargeStraight => (Section::Lower, Some(LARGE_STRAIGHT_SCORE)),
            Yahtzee => (Section::Lower, Some(YAHTZEE_SCORE)),
        };
        CategoryRule {
            section,
            fixed_score,
        }
    }

    #[inline]
    pub fn is_upper(self) -> bool {
        self.rule().section == Section::Upper
    }

    /// Face value counted by an upper category.
    pub fn face(self) -> Option<u8> {
        if self.is_upper() {
            Some(self.index() as u8 + 1)
        } else {
            None
        }
    }

    /// Stable snake_case identifier (used by scripts, config and logs).
    pub fn name(self) -> &'static str {
        match self {
            Category::Ones => "ones",
            Category::Twos => "twos",
            Category::Threes => "threes",
            Category::Fours => "fours",
            Category::Fives => "fives",
            Category::Sixes => "sixes",
            Category::ThreeOfAKind => "three_of_a_kind",
            Category::FourOfAKind => "four_of_a_kind",
            Category::FullHouse => "full_house",
            Category::SmallStraight => "small_straight",
            Category::LargeStraight => "large_straight",
            Category::Yahtzee => "yahtzee",
            Category::Chance => "chance",
        }
    }

    /// Scorecard label.
    pub fn label(self) -> &'static str {
        match self {
            Category::Ones => "Ones",
            Category::Twos => "Twos",
            Category::Threes => "Threes",
            Category::Fours => "Fours",
            Category::Fives => "Fives",
            Category::Sixes => "Sixes",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::FourOfAKind => "Four of a Kind",
            Category::FullHouse => "Full House (25)",
            Category::SmallStraight => "Small Straight (30)",
            Category::LargeStraight => "Large Straight (40)",
            Category::Yahtzee => "Yahtzee (50)",
            Category::Chance => "Chance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = RulesError;

    /// Accepts the snake_case name in any case, with `-` or spaces in place of `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.name() == norm)
            .ok_or_else(|| RulesError::UnknownCategory(s.to_string()))
    }
}

/// A cell row on the scorecard: every category plus the derived totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreRow {
    Category(Category),
    UpperScore,
    UpperBonus,
    LowerScore,
    Total,
}

impl ScoreRow {
    /// Rows in display order.
    pub const ALL: [ScoreRow; NUM_CATEGORIES + 4] = [
        ScoreRow::Category(Category::Ones),
        ScoreRow::Category(Category::Twos),
        ScoreRow::Category(Category::Threes),
        ScoreRow::Category(Category::Fours),
        ScoreRow::Category(Category::Fives),
        ScoreRow::Category(Category::Sixes),
        ScoreRow::UpperScore,
        ScoreRow::UpperBonus,
        ScoreRow::Category(Category::ThreeOfAKind),
        ScoreRow::Category(Category::FourOfAKind),
        ScoreRow::Category(Category::FullHouse),
        ScoreRow::Category(Category::SmallStraight),
        ScoreRow::Category(Category::LargeStraight),
        ScoreRow::Category(Category::Yahtzee),
        ScoreRow::Category(Category::Chance),
        ScoreRow::LowerScore,
        ScoreRow::Total,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScoreRow::Category(c) => c.name(),
            ScoreRow::UpperScore => "upper_score",
            ScoreRow::UpperBonus => "upper_bonus",
            ScoreRow::LowerScore => "lower_score",
            ScoreRow::Total => "total",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreRow::Category(c) => c.label(),
            ScoreRow::UpperScore => "Upper Score",
            ScoreRow::UpperBonus => "Upper Bonus (35 if >= 63)",
            ScoreRow::LowerScore => "Lower Score",
            ScoreRow::Total => "TOTAL",
        }
    }
}
