#[cfg(test)]
mod tests {
    use std::thread;

    use crate::rendezvous::{self, Answer, Notice, Prompt};
    use crate::{
        Category, ChanceMode, Event, GameSession, GreedyBot, InputError, ScoreRow, ScoreUpdate,
        ScriptedFrontend, SessionError,
    };

    /// One hand per category, in scorecard order: upper 63, lower 212.
    const PERFECT_BONUS_GAME: [(Category, [u8; 5]); 13] = [
        (Category::Ones, [1, 1, 1, 2, 3]),
        (Category::Twos, [2, 2, 2, 1, 3]),
        (Category::Threes, [3, 3, 3, 1, 2]),
        (Category::Fours, [4, 4, 4, 1, 2]),
        (Category::Fives, [5, 5, 5, 1, 2]),
        (Category::Sixes, [6, 6, 6, 1, 2]),
        (Category::ThreeOfAKind, [6, 6, 6, 5, 4]),
        (Category::FourOfAKind, [6, 6, 6, 6, 1]),
        (Category::FullHouse, [2, 2, 2, 5, 5]),
        (Category::SmallStraight, [1, 2, 3, 4, 4]),
        (Category::LargeStraight, [2, 3, 4, 5, 6]),
        (Category::Yahtzee, [4, 4, 4, 4, 4]),
        (Category::Chance, [1, 2, 3, 4, 5]),
    ];

    fn script_for(turns: &[(Category, [u8; 5])], players: usize) -> (String, Vec<u8>) {
        let mut script = String::new();
        let mut faces = Vec::new();
        for (cat, dice) in turns {
            for _ in 0..players {
                script.push_str(&format!("roll\nkeep\nkeep\nscore {cat}\n"));
                faces.extend(dice);
            }
        }
        (script, faces)
    }

    #[test]
    fn scripted_single_player_game_reaches_310() {
        let (script, faces) = script_for(&PERFECT_BONUS_GAME, 1);
        let mut fe = ScriptedFrontend::from_script(&script).unwrap();
        let mut session = GameSession::new(
            vec!["Ann".into()],
            ChanceMode::scripted(faces).unwrap(),
        )
        .unwrap();

        let outcome = session.run(&mut fe).unwrap();
        assert_eq!(fe.remaining(), 0);
        let t = outcome.totals[0];
        assert_eq!((t.upper, t.bonus, t.lower, t.total), (63, 35, 212, 310));
        assert_eq!(outcome.winners, vec![0]);
        assert_eq!(fe.messages().last(), Some("Winner: Ann"));

        let snap = session.game().snapshot();
        let col = &snap.players[0];
        for (cat, _) in PERFECT_BONUS_GAME {
            assert!(col.cell(ScoreRow::Category(cat)).is_some());
        }
        assert_eq!(col.cell(ScoreRow::UpperBonus), Some(35));
        assert_eq!(col.cell(ScoreRow::Total), Some(310));
    }

    #[test]
    fn turn_reports_arrive_in_order() {
        let (script, faces) = script_for(&PERFECT_BONUS_GAME[..1], 1);
        let mut fe = ScriptedFrontend::from_script(&script).unwrap();
        let mut session =
            GameSession::new(vec!["Ann".into()], ChanceMode::scripted(faces).unwrap()).unwrap();
        assert!(session.step_turn(&mut fe).unwrap());

        let dice = crate::Dice::new([1, 1, 1, 2, 3]).unwrap();
        let msg = |s: &str| Event::Message { text: s.into() };
        let score = |row, score| Event::ScoreChanged {
            update: ScoreUpdate {
                row,
                player: 0,
                score,
            },
        };
        assert_eq!(
            fe.events(),
            &[
                Event::TurnStarted { player: 0 },
                msg("Ann, roll the dice!"),
                Event::DiceRolled { dice },
                msg("Ann, select the dice and reroll."),
                Event::DiceRolled { dice },
                msg("Ann, select the dice and reroll."),
                Event::DiceRolled { dice },
                msg("Ann, select a category."),
                score(ScoreRow::Category(Category::Ones), 3),
                score(ScoreRow::UpperScore, 3),
                score(ScoreRow::Total, 3),
            ]
        );
        assert_eq!(session.game().round(), 2);
    }

    #[test]
    fn used_category_is_asked_for_again() {
        let script = "roll\nkeep\nkeep\nscore chance\n\
                      roll\nkeep\nkeep\nscore chance\nscore chance\nscore sixes\n";
        let faces = [1, 2, 3, 4, 6, 6, 6, 6, 6, 2];
        let mut fe = ScriptedFrontend::from_script(script).unwrap();
        let mut session =
            GameSession::new(vec!["Bo".into()], ChanceMode::scripted(faces).unwrap()).unwrap();
        session.step_turn(&mut fe).unwrap();
        session.step_turn(&mut fe).unwrap();

        let rejection = "Bo, that category has already been selected. Please choose another one.";
        assert_eq!(fe.messages().filter(|m| *m == rejection).count(), 2);
        // The category prompt is not repeated after a rejection.
        assert_eq!(
            fe.messages()
                .filter(|m| *m == "Bo, select a category.")
                .count(),
            2
        );
        let sc = session.game().scorecard();
        assert_eq!(sc.entry(0, Category::Chance).unwrap(), Some(16));
        assert_eq!(sc.entry(0, Category::Sixes).unwrap(), Some(24));
        assert_eq!(fe.remaining(), 0);
    }

    #[test]
    fn identical_play_ties_every_player() {
        let (script, faces) = script_for(&PERFECT_BONUS_GAME, 2);
        let mut fe = ScriptedFrontend::from_script(&script).unwrap();
        let mut session = GameSession::new(
            vec!["A".into(), "B".into()],
            ChanceMode::scripted(faces).unwrap(),
        )
        .unwrap();
        let outcome = session.run(&mut fe).unwrap();
        assert_eq!(outcome.winners, vec![0, 1]);
        assert_eq!(outcome.winner_names(), vec!["A", "B"]);
        assert_eq!(fe.messages().last(), Some("Winner: A, B"));
    }

    #[test]
    fn running_out_of_script_is_an_input_error() {
        let mut fe = ScriptedFrontend::from_script("roll\nkeep\n").unwrap();
        let mut session = GameSession::new(vec!["C".into()], ChanceMode::rng(5)).unwrap();
        let err = session.run(&mut fe).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Input(InputError::Exhausted { expected: "reroll" })
        ));
    }

    #[test]
    fn channel_frontend_drives_a_game_across_threads() {
        let (frontend, handle) = rendezvous::channel();
        let engine = thread::spawn(move || {
            let mut frontend = frontend;
            let mut session =
                GameSession::new(vec!["X".into(), "Y".into()], ChanceMode::deterministic(3))?;
            session.run(&mut frontend)
        });

        // The UI side tracks used categories from the notices alone.
        let mut bot = GreedyBot::new();
        let mut prompts = 0usize;
        while let Some(notice) = handle.recv() {
            match notice {
                Notice::Event(Event::ScoreChanged { update }) => {
                    crate::Frontend::report_score_update(&mut bot, update)
                }
                Notice::Event(_) => {}
                Notice::Prompt(p) => {
                    prompts += 1;
                    let answer = match p {
                        Prompt::Roll { .. } => Answer::Roll,
                        Prompt::Reroll { dice, .. } => {
                            Answer::Reroll(GreedyBot::choose_reroll(&dice))
                        }
                        Prompt::Category { player, dice } => Answer::Category(
                            bot.choose_category(player.index, &dice).unwrap(),
                        ),
                    };
                    handle.answer(answer).unwrap();
                }
            }
        }

        let outcome = engine.join().unwrap().unwrap();
        assert_eq!(prompts, 2 * 13 * 4);
        assert!(!outcome.winners.is_empty());
    }

    #[test]
    fn mismatched_answer_is_rejected() {
        let (frontend, handle) = rendezvous::channel();
        let engine = thread::spawn(move || {
            let mut frontend = frontend;
            let mut session = GameSession::new(vec!["X".into()], ChanceMode::rng(1))?;
            session.run(&mut frontend)
        });
        loop {
            match handle.recv() {
                Some(Notice::Prompt(Prompt::Roll { .. })) => break,
                Some(_) => continue,
                None => panic!("session ended before prompting"),
            }
        }
        handle.answer(Answer::Category(Category::Chance)).unwrap();
        let err = engine.join().unwrap().unwrap_err();
        assert!(matches!(
            err,
            SessionError::Input(InputError::UnexpectedDecision {
                expected: "roll",
                ..
            })
        ));
    }

    #[test]
    fn dropping_the_handle_closes_the_session() {
        let (frontend, handle) = rendezvous::channel();
        drop(handle);
        let mut frontend = frontend;
        let mut session = GameSession::new(vec!["Z".into()], ChanceMode::rng(2)).unwrap();
        let err = session.run(&mut frontend).unwrap_err();
        assert!(matches!(err, SessionError::Input(InputError::Closed)));
    }
}
