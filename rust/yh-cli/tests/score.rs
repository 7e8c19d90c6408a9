use std::process::Command;

fn yh_bin() -> String {
    env!("CARGO_BIN_EXE_yh").to_string()
}

fn run(args: &[&str]) -> (bool, String, String) {
    let out = Command::new(yh_bin()).args(args).output().unwrap();
    (
        out.status.success(),
        String::from_utf8_lossy(&out.stdout).into_owned(),
        String::from_utf8_lossy(&out.stderr).into_owned(),
    )
}

#[test]
fn scores_a_full_house() {
    let (ok, stdout, stderr) = run(&["score", "full_house", "2", "2", "3", "3", "3"]);
    assert!(ok, "stderr:\n{stderr}");
    assert_eq!(stdout.trim(), "full_house: 25 (match)");
}

#[test]
fn non_matching_hand_scores_zero() {
    let (ok, stdout, _) = run(&["score", "Large-Straight", "1", "2", "3", "4", "6"]);
    assert!(ok);
    assert_eq!(stdout.trim(), "large_straight: 0 (no match)");
}

#[test]
fn contract_violations_exit_with_an_error() {
    let (ok, _, stderr) = run(&["score", "chance", "1", "2", "3", "4"]);
    assert!(!ok);
    assert!(stderr.contains("expected 5 dice, got 4"), "{stderr}");

    let (ok, _, stderr) = run(&["score", "chance", "1", "2", "3", "4", "7"]);
    assert!(!ok);
    assert!(stderr.contains("faces must be in 1..=6"), "{stderr}");

    let (ok, _, stderr) = run(&["score", "pair", "1", "1", "3", "4", "5"]);
    assert!(!ok);
    assert!(stderr.contains("unknown category"), "{stderr}");
}

#[test]
fn rules_and_version_print() {
    let (ok, stdout, _) = run(&["rules"]);
    assert!(ok);
    assert!(stdout.contains("Full House"));
    assert!(stdout.contains("63"));

    let (ok, stdout, _) = run(&["--version"]);
    assert!(ok);
    assert!(stdout.starts_with("yh "));
}
