//! yh-logging: NDJSON game event logs and opt-in debug logging.
//!
//! Event logs are append-only, one JSON object per line, so a crashed game
//! still leaves every complete line readable.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Bumped whenever an event struct below changes shape.
pub const EVENT_SCHEMA_VERSION: u32 = 1;

/// Environment switch for [`debug_log`].
pub const DEBUG_ENV: &str = "YH_DEBUG_LOG";

pub fn now_ms() -> u64 {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    d.as_millis() as u64
}

/// Versioning fields carried by every event.
#[derive(Debug, Clone, Serialize)]
pub struct VersionInfoV1 {
    pub event_schema_version: u32,
    pub ruleset_id: &'static str,
}

impl VersionInfoV1 {
    pub fn new(ruleset_id: &'static str) -> Self {
        Self {
            event_schema_version: EVENT_SCHEMA_VERSION,
            ruleset_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GameStartEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub game_id: String,
    pub players: Vec<String>,
    /// "rng", "deterministic" or "scripted".
    pub chance: &'static str,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TurnEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub game_id: String,
    pub player: usize,
    pub round: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiceEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub game_id: String,
    pub player: usize,
    pub round: usize,
    pub dice: [u8; 5],
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub game_id: String,
    pub player: usize,
    /// Scorecard row name, e.g. "full_house" or "upper_bonus".
    pub row: &'static str,
    pub score: u16,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub game_id: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameEndEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub game_id: String,
    pub totals: Vec<u16>,
    pub winners: Vec<usize>,
}

#[derive(Debug, Error)]
pub enum NdjsonError {
    #[error("event log I/O: {0}")]
    Io(#[from] io::Error),
    #[error("event log JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Append-only NDJSON writer.
///
/// Contract: each call writes exactly one JSON object followed by a newline.
pub struct NdjsonWriter {
    w: BufWriter<File>,
    lines_since_flush: u64,
    flush_every_lines: u64,
}

impl NdjsonWriter {
    /// Open a file for append. Creates it if it doesn't exist.
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self, NdjsonError> {
        Self::open_append_with_flush(path, 0)
    }

    /// `flush_every_lines=0` disables periodic flushing.
    pub fn open_append_with_flush(
        path: impl AsRef<Path>,
        flush_every_lines: u64,
    ) -> Result<Self, NdjsonError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            w: BufWriter::new(f),
            lines_since_flush: 0,
            flush_every_lines,
        })
    }

    pub fn write_event<T: Serialize>(&mut self, event: &T) -> Result<(), NdjsonError> {
        let mut buf = serde_json::to_vec(event)?;
        buf.push(b'\n');
        self.w.write_all(&buf)?;
        self.lines_since_flush += 1;
        if self.flush_every_lines > 0 && self.lines_since_flush >= self.flush_every_lines {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), NdjsonError> {
        self.w.flush()?;
        self.lines_since_flush = 0;
        Ok(())
    }
}

impl Drop for NdjsonWriter {
    fn drop(&mut self) {
        let _ = self.w.flush();
    }
}

/// Read every complete JSON line; blank and unparsable lines are skipped.
pub fn read_ndjson_lenient(path: impl AsRef<Path>) -> Result<Vec<Value>, NdjsonError> {
    let s = std::fs::read_to_string(path)?;
    Ok(s.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| serde_json::from_str::<Value>(line).ok())
        .collect())
}

/// True when `YH_DEBUG_LOG` is `1`, `true` or `yes`. Read once per process.
pub fn debug_enabled() -> bool {
    static ON: OnceLock<bool> = OnceLock::new();
    *ON.get_or_init(|| matches!(std::env::var(DEBUG_ENV).as_deref(), Ok("1" | "true" | "yes")))
}

/// One JSON line on stderr when debug logging is on.
pub fn debug_log(location: &str, message: &str, data: Value) {
    if !debug_enabled() {
        return;
    }
    let payload = serde_json::json!({
        "timestamp": now_ms(),
        "location": location,
        "message": message,
        "data": data,
    });
    let mut err = io::stderr().lock();
    let _ = writeln!(err, "{payload}");
}
