#[cfg(test)]
mod tests {
    use crate::chance::{roll5, ChanceError, ChanceMode, EventKey};

    fn key(seed: u64, roll_idx: u8) -> EventKey {
        EventKey {
            episode_seed: seed,
            player: 0,
            round_idx: 3,
            roll_idx,
        }
    }

    #[test]
    fn roll5_is_deterministic() {
        assert_eq!(roll5(key(123, 1)), roll5(key(123, 1)));
    }

    #[test]
    fn roll5_values_in_range() {
        for seed in 0..200u64 {
            for x in roll5(key(seed, 0)) {
                assert!((1..=6).contains(&x), "die out of range: {}", x);
            }
        }
    }

    #[test]
    fn roll_idx_changes_stream() {
        assert_ne!(roll5(key(42, 0)), roll5(key(42, 1)));
    }

    #[test]
    fn deterministic_mode_uses_its_own_seed() {
        let mut mode = ChanceMode::deterministic(9);
        let got = mode.draw(key(0, 2), 5).unwrap();
        assert_eq!(got, roll5(key(9, 2)));
    }

    #[test]
    fn rng_mode_same_seed_same_faces() {
        let mut a = ChanceMode::rng(7);
        let mut b = ChanceMode::rng(7);
        for _ in 0..20 {
            let da = a.draw(key(0, 0), 5).unwrap();
            let db = b.draw(key(0, 0), 5).unwrap();
            assert_eq!(da, db);
            assert!(da.iter().all(|x| (1..=6).contains(x)));
        }
    }

    #[test]
    fn scripted_mode_consumes_in_order() {
        let mut mode = ChanceMode::scripted([1, 2, 3, 4, 5, 6, 6]).unwrap();
        assert_eq!(mode.draw(key(0, 0), 5).unwrap(), [1, 2, 3, 4, 5]);
        assert_eq!(mode.draw(key(0, 1), 2).unwrap()[..2], [6, 6]);
        assert_eq!(
            mode.draw(key(0, 2), 1),
            Err(ChanceError::ScriptExhausted {
                needed: 1,
                remaining: 0
            })
        );
    }

    #[test]
    fn scripted_mode_rejects_bad_faces_up_front() {
        let err = ChanceMode::scripted([1, 2, 7]).err().unwrap();
        assert_eq!(
            err,
            ChanceError::ScriptedFaceOutOfRange {
                position: 2,
                value: 7
            }
        );
    }

    #[test]
    fn zero_draw_never_fails() {
        let mut mode = ChanceMode::scripted([]).unwrap();
        assert!(mode.draw(key(0, 1), 0).is_ok());
    }
}
