//! Dice sources.
//!
//! Three ways to produce faces:
//! - a seeded ChaCha8 PRNG (normal play),
//! - a deterministic event-keyed stream, where dice are a function of
//!   (seed, player, round, roll_idx) rather than of evolving RNG state,
//! - a scripted queue of faces for tests and replays.
//!
//! In event-keyed mode a reroll of k dice takes the first k values of the
//! event's 5-value stream, so which dice are rerolled never changes the draws.

use std::collections::VecDeque;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;
use thiserror::Error;

use crate::rules::{NUM_DICE, NUM_FACES};

/// Structural event key for deterministic dice generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventKey {
    pub episode_seed: u64,
    pub player: u8,
    pub round_idx: u8,
    /// 0 for the opening roll, 1..=2 for rerolls.
    pub roll_idx: u8,
}

/// SplitMix64 step.
fn splitmix64_next(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

fn mix_seed(key: EventKey) -> u64 {
    // Fixed mixing, independent of std Hash/RandomState.
    let mut x = key.episode_seed;
    x ^= (key.player as u64).wrapping_mul(0xD6E8FEB86659FD93);
    x ^= (key.round_idx as u64).wrapping_mul(0xA5A35625E4F7C1AD);
    x ^= (key.roll_idx as u64).wrapping_mul(0x9E3779B97F4A7C15);
    let mut s = x;
    splitmix64_next(&mut s)
}

/// Deterministically generate 5 faces for the given event key.
pub fn roll5(key: EventKey) -> [u8; NUM_DICE] {
    let mut state = mix_seed(key);
    let mut out = [0u8; NUM_DICE];
    for o in &mut out {
        let r = splitmix64_next(&mut state);
        *o = ((r % NUM_FACES as u64) + 1) as u8;
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChanceError {
    #[error("scripted dice exhausted: needed {needed}, {remaining} left")]
    ScriptExhausted { needed: usize, remaining: usize },
    #[error("scripted die #{position} is {value}, faces must be in 1..=6")]
    ScriptedFaceOutOfRange { position: usize, value: u8 },
}

/// How dice are generated.
pub enum ChanceMode {
    /// Event-keyed stream; same seed and same decisions give the same game.
    DeterministicEventKeyed { episode_seed: u64 },
    /// Pseudorandom stream backed by a small PRNG.
    Rng { rng: Box<ChaCha8Rng> },
    /// Pre-chosen faces, consumed front to back.
    Scripted { faces: VecDeque<u8> },
}

impl ChanceMode {
    pub fn deterministic(episode_seed: u64) -> Self {
        ChanceMode::DeterministicEventKeyed { episode_seed }
    }

    pub fn rng(seed: u64) -> Self {
        ChanceMode::Rng {
            rng: Box::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    pub fn scripted<I>(faces: I) -> Result<Self, ChanceError>
    where
        I: IntoIterator<Item = u8>,
    {
        let faces: VecDeque<u8> = faces.into_iter().collect();
        if let Some((position, &value)) = faces
            .iter()
            .enumerate()
            .find(|&(_, &v)| !(1..=NUM_FACES as u8).contains(&v))
        {
            return Err(ChanceError::ScriptedFaceOutOfRange { position, value });
        }
        Ok(ChanceMode::Scripted { faces })
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ChanceMode::DeterministicEventKeyed { .. } => "deterministic",
            ChanceMode::Rng { .. } => "rng",
            ChanceMode::Scripted { .. } => "scripted",
        }
    }

    /// Draw `k` faces (k <= 5) for event `key`. Only the first `k` slots are meaningful.
    pub fn draw(&mut self, key: EventKey, k: usize) -> Result<[u8; NUM_DICE], ChanceError> {
        debug_assert!(k <= NUM_DICE);
        match self {
            ChanceMode::DeterministicEventKeyed { episode_seed } => Ok(roll5(EventKey {
                episode_seed: *episode_seed,
                ..key
            })),
            ChanceMode::Rng { rng } => {
                let mut out = [0u8; NUM_DICE];
                for o in out.iter_mut().take(k) {
                    *o = rng.gen_range(1..=NUM_FACES as u8);
                }
                Ok(out)
            }
            ChanceMode::Scripted { faces } => {
                if faces.len() < k {
                    return Err(ChanceError::ScriptExhausted {
                        needed: k,
                        remaining: faces.len(),
                    });
                }
                let mut out = [0u8; NUM_DICE];
                for (o, face) in out.iter_mut().zip(faces.drain(..k)) {
                    *o = face;
                }
                Ok(out)
            }
        }
    }
}
