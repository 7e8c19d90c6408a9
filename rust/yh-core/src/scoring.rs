//! Scoring engine: classify five dice against a category and score them.
//!
//! Pure functions of the dice and category; no state, no randomness.

use serde::Serialize;

use crate::category::Category;
use crate::dice::Dice;
use crate::rules::{RulesError, NUM_CATEGORIES};

const SMALL_STRAIGHTS: [&[u8]; 3] = [&[1, 2, 3, 4], &[2, 3, 4, 5], &[3, 4, 5, 6]];
const LARGE_STRAIGHTS: [&[u8]; 2] = [&[1, 2, 3, 4, 5], &[2, 3, 4, 5, 6]];

/// Result of checking dice against a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Whether the dice satisfy the category's shape requirement.
    pub matches: bool,
    /// Score to record; 0 whenever `matches` is false.
    pub score: u16,
}

/// Whether `dice` satisfy the shape requirement of `category`.
pub fn matches_category(dice: &Dice, category: Category) -> bool {
    let counts = dice.face_counts();
    match category {
        Category::Ones
        | Category::Twos
        | Category::Threes
        | Category::Fours
        | Category::Fives
        | Category::Sixes
        | Category::Chance => true,
        Category::ThreeOfAKind => counts.iter().any(|&c| c >= 3),
        Category::FourOfAKind => counts.iter().any(|&c| c >= 4),
        // Needs an exact pair and an exact triple, so five of a kind is not a full house.
        Category::FullHouse => counts.contains(&2) && counts.contains(&3),
        Category::SmallStraight => SMALL_STRAIGHTS.iter().any(|run| dice.contains_all(run)),
        Category::LargeStraight => LARGE_STRAIGHTS.iter().any(|run| dice.contains_all(run)),
        Category::Yahtzee => counts.contains(&5),
    }
}

/// Classify `dice` against `category` and compute the score to record.
pub fn classify(dice: &Dice, category: Category) -> Classification {
    if !matches_category(dice, category) {
        return Classification {
            matches: false,
            score: 0,
        };
    }
    let score = match (category.rule().fixed_score, category.face()) {
        (Some(fixed), _) => fixed,
        (None, Some(face)) => {
            let count = dice.face_counts()[(face - 1) as usize];
            face as u16 * count as u16
        }
        (None, None) => dice.sum(),
    };
    Classification {
        matches: true,
        score,
    }
}

/// Checked entry point over raw faces.
///
/// Fails fast on a wrong dice count or a face outside 1..=6.
pub fn classify_and_score(dice: &[u8], category: Category) -> Result<Classification, RulesError> {
    let dice = Dice::from_slice(dice)?;
    Ok(classify(&dice, category))
}

/// Scores for every category, in [`Category::ALL`] order.
pub fn scores_for_dice(dice: &Dice) -> [u16; NUM_CATEGORIES] {
    let mut out = [0u16; NUM_CATEGORIES];
    for (slot, &cat) in out.iter_mut().zip(Category::ALL.iter()) {
        *slot = classify(dice, cat).score;
    }
    out
}
