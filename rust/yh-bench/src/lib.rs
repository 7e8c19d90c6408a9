//! Shared inputs for the yh benchmarks.

use yh_core::Dice;

/// Deterministic dice hands from a xorshift64 stream, no rand dependency.
pub fn gen_dice_samples(n: usize) -> Vec<Dice> {
    let mut x: u64 = 0x1234_5678_9ABC_DEF0;
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let mut d = [0u8; 5];
        for face in d.iter_mut() {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            *face = (x % 6) as u8 + 1;
        }
        if let Ok(dice) = Dice::new(d) {
            out.push(dice);
        }
    }
    out
}
