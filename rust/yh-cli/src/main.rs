//! yh: command-line Yahtzee.
//!
//! Subcommands:
//! - play     interactive game on stdin/stdout
//! - script   replay scripted decisions
//! - sim      greedy-bot simulation
//! - score    classify one hand
//! - rules    print how to play

mod event_log;
mod render;
mod terminal;

use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use yh_core::config::LoggingConfig;
use yh_core::{
    classify_and_score, sim, Category, ChanceError, ChanceMode, Config, ConfigError, Frontend,
    GameOutcome, GameSession, InputError, RulesError, ScriptError, ScriptedFrontend,
    SessionError,
};
use yh_logging::{debug_log, now_ms, NdjsonError, DEBUG_ENV};

use crate::event_log::EventLogFrontend;
use crate::terminal::TerminalFrontend;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Rules(#[from] RulesError),
    #[error(transparent)]
    Chance(#[from] ChanceError),
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error("failed to open event log: {0}")]
    Log(#[from] NdjsonError),
    #[error("{path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("{0}")]
    Usage(String),
}

#[derive(Parser, Debug)]
#[command(name = "yh", version, about = "Yahtzee for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play an interactive game
    Play(PlayArgs),
    /// Replay a file of scripted decisions
    Script(ScriptArgs),
    /// Simulate greedy-bot games and summarize the scores
    Sim(SimArgs),
    /// Score one hand against a category
    Score(ScoreArgs),
    /// Print the rules
    Rules,
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// YAML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of players (1-4)
    #[arg(long)]
    players: Option<usize>,

    /// Player name; repeat for each player
    #[arg(long = "name")]
    names: Vec<String>,

    /// Dice seed
    #[arg(long)]
    seed: Option<u64>,

    /// Append NDJSON game events to this file
    #[arg(long)]
    events: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ScriptArgs {
    /// Decision script: roll / keep / reroll 0 3 / score full_house
    #[arg(long)]
    script: PathBuf,

    /// Dice faces to deal in order, e.g. "1 2 3 4 5 6 6"
    #[arg(long)]
    dice: Option<String>,

    /// Seed for event-keyed dice when --dice is not given
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Player name; repeat for each player
    #[arg(long = "name")]
    names: Vec<String>,

    /// Append NDJSON game events to this file
    #[arg(long)]
    events: Option<PathBuf>,

    /// Print the final standings as JSON instead of a transcript
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct SimArgs {
    /// Number of games to simulate
    #[arg(long, default_value_t = 1000)]
    games: usize,

    /// Bots per game
    #[arg(long, default_value_t = 1)]
    players: usize,

    /// RNG seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Skip printing histogram
    #[arg(long)]
    no_hist: bool,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Category name, e.g. full_house
    category: String,

    /// Five die faces
    #[arg(num_args = 1..)]
    dice: Vec<u8>,
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn parse_faces(text: &str) -> Result<Vec<u8>, CliError> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|w| !w.is_empty())
        .map(|w| {
            w.parse::<u8>()
                .map_err(|_| CliError::Usage(format!("invalid die face in --dice: {w:?}")))
        })
        .collect()
}

/// Run a session, logging to `logging.events_path` when set.
fn run_game<F: Frontend>(
    session: &mut GameSession,
    frontend: &mut F,
    logging: &LoggingConfig,
    seed: Option<u64>,
) -> Result<GameOutcome, CliError> {
    let Some(path) = logging.events_path.as_deref() else {
        return Ok(session.run(frontend)?);
    };
    let game_id = format!("g{}", now_ms());
    let mut logged =
        EventLogFrontend::open(frontend, path, logging.flush_every_lines as u64, game_id)?;
    logged.log_game_start(session.game(), seed);
    let outcome = session.run(&mut logged)?;
    logged.log_game_end(&outcome);
    Ok(outcome)
}

fn print_standings(session: &GameSession, outcome: &GameOutcome) {
    println!();
    print!("{}", render::scorecard_table(&session.game().snapshot()));
    println!("Winner: {}", outcome.winner_names().join(", "));
}

fn cmd_play(args: PlayArgs) -> Result<(), CliError> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if !args.names.is_empty() {
        config.players = args.names;
    }
    if let Some(n) = args.players {
        config.players.resize(n, String::new());
    }
    if args.seed.is_some() {
        config.chance.seed = args.seed;
    }
    if let Some(path) = args.events {
        config.logging.events_path = Some(path.display().to_string());
    }
    config.validate()?;
    if config.logging.debug_log {
        std::env::set_var(DEBUG_ENV, "1");
    }

    let mut session = GameSession::new(config.players.clone(), config.chance_mode())?;
    debug_log(
        "yh-cli/play",
        "session created",
        serde_json::json!({
            "players": config.players,
            "chance": session.game().chance_kind(),
            "seed": config.chance.seed,
        }),
    );

    let stdin = io::stdin();
    let mut terminal = TerminalFrontend::new(stdin.lock(), io::stdout(), session.game().snapshot());
    match run_game(&mut session, &mut terminal, &config.logging, config.chance.seed) {
        Ok(outcome) => {
            print_standings(&session, &outcome);
            Ok(())
        }
        Err(CliError::Session(SessionError::Input(InputError::Closed))) => {
            println!("\nGame abandoned.");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn cmd_script(args: ScriptArgs) -> Result<(), CliError> {
    let text = read_file(&args.script)?;
    let mut frontend = ScriptedFrontend::from_script(&text)?;
    let chance = match &args.dice {
        Some(d) => ChanceMode::scripted(parse_faces(d)?)?,
        None => ChanceMode::deterministic(args.seed),
    };
    let names = if args.names.is_empty() {
        vec![String::new()]
    } else {
        args.names
    };
    let logging = LoggingConfig {
        events_path: args.events.map(|p| p.display().to_string()),
        ..LoggingConfig::default()
    };

    let mut session = GameSession::new(names, chance)?;
    let seed = args.dice.is_none().then_some(args.seed);
    let result = run_game(&mut session, &mut frontend, &logging, seed);

    if !args.json {
        let players = session.game().players();
        for line in frontend
            .events()
            .iter()
            .filter_map(|e| render::event_line(e, players))
        {
            println!("{line}");
        }
    }
    let outcome = result?;
    if args.json {
        let json = serde_json::to_string_pretty(&outcome)
            .map_err(|e| CliError::Usage(format!("failed to encode outcome: {e}")))?;
        println!("{json}");
    } else {
        print_standings(&session, &outcome);
    }
    Ok(())
}

fn cmd_sim(args: SimArgs) -> Result<(), CliError> {
    println!("Running simulation...");
    let report = sim::simulate(args.games, args.players, args.seed)?;

    println!();
    println!("Evaluation:");
    println!("  - Games: {}", report.games);
    println!("  - Players per game: {}", args.players);
    if let Some(s) = &report.summary {
        println!(
            "  - Score: mean={:.2}, median={}, std={:.2}, min={}, max={}",
            s.mean, s.median, s.std_dev, s.min, s.max
        );
    }
    println!("  - Upper bonus rate: {:.1}%", report.bonus_rate * 100.0);

    if !args.no_hist {
        print!("{}", render::histogram(&report.scores));
    }
    Ok(())
}

fn cmd_score(args: ScoreArgs) -> Result<(), CliError> {
    let category: Category = args.category.parse()?;
    let c = classify_and_score(&args.dice, category)?;
    println!(
        "{}: {} ({})",
        category,
        c.score,
        if c.matches { "match" } else { "no match" }
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Play(args) => cmd_play(args),
        Command::Script(args) => cmd_script(args),
        Command::Sim(args) => cmd_sim(args),
        Command::Score(args) => cmd_score(args),
        Command::Rules => {
            print!("{}", render::RULES);
            Ok(())
        }
    };
    if let Err(e) = result {
        eprintln!("yh: {e}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_faces_with_commas_and_spaces() {
        assert_eq!(parse_faces("1, 2 3,4  5").unwrap(), vec![1, 2, 3, 4, 5]);
        assert!(matches!(parse_faces("1 x"), Err(CliError::Usage(_))));
    }
}
