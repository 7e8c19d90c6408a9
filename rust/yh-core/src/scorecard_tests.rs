#[cfg(test)]
mod tests {
    use crate::{
        upper_bonus, winners, Category, RecordOutcome, RulesError, ScoreRow, Scorecard,
    };

    #[test]
    fn category_is_exclusive_per_player_even_for_zero() {
        let mut sc = Scorecard::new(2);
        assert!(matches!(
            sc.record(0, Category::Yahtzee, 0).unwrap(),
            RecordOutcome::Recorded { .. }
        ));
        assert_eq!(
            sc.record(0, Category::Yahtzee, 50).unwrap(),
            RecordOutcome::AlreadyUsed
        );
        assert_eq!(sc.entry(0, Category::Yahtzee).unwrap(), Some(0));
        assert!(sc.is_used(0, Category::Yahtzee).unwrap());
        assert!(!sc.is_used(1, Category::Yahtzee).unwrap());
        assert!(matches!(
            sc.is_used(2, Category::Yahtzee),
            Err(RulesError::PlayerOutOfRange { player: 2, .. })
        ));
        // A different player may still use it.
        assert!(matches!(
            sc.record(1, Category::Yahtzee, 50).unwrap(),
            RecordOutcome::Recorded { .. }
        ));
    }

    #[test]
    fn subtotals_split_by_section() {
        let mut sc = Scorecard::new(1);
        sc.record(0, Category::Sixes, 18).unwrap();
        sc.record(0, Category::Twos, 4).unwrap();
        let out = sc.record(0, Category::FullHouse, 25).unwrap();
        let RecordOutcome::Recorded { totals } = out else {
            panic!("expected record");
        };
        assert_eq!(totals.upper, 22);
        assert_eq!(totals.lower, 25);
        assert_eq!(totals.bonus, 0);
        assert_eq!(totals.total, 47);
    }

    fn fill_upper(sc: &mut Scorecard, player: usize, scores: [u16; 6]) {
        for (cat, s) in Category::ALL.iter().take(6).zip(scores) {
            sc.record(player, *cat, s).unwrap();
        }
    }

    #[test]
    fn bonus_at_exactly_threshold_not_below() {
        let mut sc = Scorecard::new(2);
        fill_upper(&mut sc, 0, [3, 6, 9, 12, 15, 18]); // 63
        fill_upper(&mut sc, 1, [2, 6, 9, 12, 15, 18]); // 62
        sc.record(0, Category::Chance, 20).unwrap();
        sc.record(1, Category::Chance, 20).unwrap();

        assert_eq!(sc.totals(0).unwrap().total, 83, "bonus waits for game end");
        assert!(!sc.bonuses_applied());
        let awarded = sc.apply_bonuses();
        assert_eq!(awarded, vec![0]);
        assert!(sc.bonuses_applied());

        let t0 = sc.totals(0).unwrap();
        assert_eq!((t0.upper, t0.bonus, t0.total), (63, 35, 118));
        let t1 = sc.totals(1).unwrap();
        assert_eq!((t1.upper, t1.bonus, t1.total), (62, 0, 82));

        assert!(sc.apply_bonuses().is_empty());
        assert_eq!(sc.totals(0).unwrap().total, 118);
    }

    #[test]
    fn upper_bonus_threshold() {
        assert_eq!(upper_bonus(62), 0);
        assert_eq!(upper_bonus(63), 35);
        assert_eq!(upper_bonus(105), 35);
    }

    #[test]
    fn winners_report_every_tied_player() {
        assert_eq!(winners(&[150, 200, 200]), vec![1, 2]);
        assert_eq!(winners(&[90]), vec![0]);
        assert_eq!(winners(&[10, 9]), vec![0]);
        assert!(winners(&[]).is_empty());
    }

    #[test]
    fn available_and_complete() {
        let mut sc = Scorecard::new(1);
        assert_eq!(sc.available(0).unwrap().len(), 13);
        for cat in Category::ALL {
            assert!(!sc.is_complete(0).unwrap());
            sc.record(0, cat, 0).unwrap();
        }
        assert!(sc.is_complete(0).unwrap());
        assert!(sc.available(0).unwrap().is_empty());
    }

    #[test]
    fn player_out_of_range_is_a_contract_violation() {
        let mut sc = Scorecard::new(2);
        assert_eq!(
            sc.record(2, Category::Ones, 1),
            Err(RulesError::PlayerOutOfRange {
                player: 2,
                num_players: 2
            })
        );
        assert!(sc.totals(5).is_err());
    }

    #[test]
    fn snapshot_exposes_cells_and_totals() {
        let mut sc = Scorecard::new(1);
        sc.record(0, Category::Fours, 12).unwrap();
        let snap = sc.snapshot(&["Ada".to_string()]);
        let col = &snap.players[0];
        assert_eq!(col.name, "Ada");
        assert_eq!(col.cell(ScoreRow::Category(Category::Fours)), Some(12));
        assert_eq!(col.cell(ScoreRow::Category(Category::Fives)), None);
        assert_eq!(col.cell(ScoreRow::UpperScore), Some(12));
        assert_eq!(col.cell(ScoreRow::Total), Some(12));
    }
}
