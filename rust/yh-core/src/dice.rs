//! Dice values and reroll selections.

use std::fmt;

use serde::Serialize;

use crate::rules::{RulesError, NUM_DICE, NUM_FACES};

/// Five die faces, each in 1..=6. Order is the on-table order and is preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Dice([u8; NUM_DICE]);

impl Dice {
    pub fn new(faces: [u8; NUM_DICE]) -> Result<Self, RulesError> {
        for (index, &value) in faces.iter().enumerate() {
            if !(1..=NUM_FACES as u8).contains(&value) {
                return Err(RulesError::DieOutOfRange { index, value });
            }
        }
        Ok(Self(faces))
    }

    pub fn from_slice(faces: &[u8]) -> Result<Self, RulesError> {
        let arr: [u8; NUM_DICE] = faces
            .try_into()
            .map_err(|_| RulesError::WrongDiceCount { got: faces.len() })?;
        Self::new(arr)
    }

    #[inline]
    pub fn faces(&self) -> [u8; NUM_DICE] {
        self.0
    }

    /// Occurrences of each face; slot `f - 1` counts face `f`.
    pub fn face_counts(&self) -> [u8; NUM_FACES] {
        let mut counts = [0u8; NUM_FACES];
        for &d in &self.0 {
            counts[(d - 1) as usize] += 1;
        }
        counts
    }

    pub fn sum(&self) -> u16 {
        self.0.iter().map(|&d| d as u16).sum()
    }

    /// True if every face in `faces` shows on at least one die.
    pub fn contains_all(&self, faces: &[u8]) -> bool {
        faces.iter().all(|f| self.0.contains(f))
    }

    /// Replace the rerolled positions with `draws`, consumed in index order.
    pub(crate) fn apply_reroll(&mut self, mask: RerollMask, draws: &[u8]) {
        for (pos, &face) in mask.indices().zip(draws) {
            debug_assert!((1..=NUM_FACES as u8).contains(&face));
            self.0[pos] = face;
        }
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

/// Dice chosen for a reroll. Bit `i` set means die `i` is rerolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct RerollMask(u8);

impl RerollMask {
    /// Keep every die.
    pub const NONE: RerollMask = RerollMask(0);
    pub const ALL: RerollMask = RerollMask((1 << NUM_DICE) - 1);

    pub fn from_indices<I>(indices: I) -> Result<Self, RulesError>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut bits = 0u8;
        for index in indices {
            if index >= NUM_DICE {
                return Err(RulesError::DieIndexOutOfRange { index });
            }
            bits |= 1 << index;
        }
        Ok(Self(bits))
    }

    pub fn from_bits(bits: u8) -> Result<Self, RulesError> {
        if bits > Self::ALL.0 {
            let index = 7 - bits.leading_zeros() as usize;
            return Err(RulesError::DieIndexOutOfRange { index });
        }
        Ok(Self(bits))
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn contains(self, index: usize) -> bool {
        index < NUM_DICE && (self.0 >> index) & 1 == 1
    }

    pub fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn indices(self) -> impl Iterator<Item = usize> {
        (0..NUM_DICE).filter(move |&i| self.contains(i))
    }
}
