// ABOUTME: Run log that mirrors every workflow event to the console and a log file.
// ABOUTME: Supports normal, quiet (CI), and JSON console modes.

use chrono::{DateTime, Local};
use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

/// Timestamp layout shared by the console and the log file.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Output mode for console feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Every event, human readable
    #[default]
    Normal,
    /// Warnings and errors only
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Severity of a recorded event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn prefix(&self) -> &'static str {
        match self {
            Level::Info => "",
            Level::Success => "SUCCESS: ",
            Level::Warning => "WARNING: ",
            Level::Error => "ERROR: ",
        }
    }
}

/// One discrete thing that happened during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub level: Level,
    pub message: String,
}

impl Event {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Level::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Level::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.level.prefix(), self.message)
    }
}

/// A recorded event with the local time it was recorded at.
#[derive(Debug, Clone)]
pub struct Entry {
    pub timestamp: DateTime<Local>,
    pub event: Event,
}

impl Entry {
    /// `YYYY-MM-DD HH:MM:SS - <message>`
    pub fn line(&self) -> String {
        format!("{} - {}", self.timestamp.format(TIMESTAMP_FORMAT), self.event)
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    timestamp: String,
    level: Level,
    message: &'a str,
}

struct Inner {
    file: Option<File>,
    file_failed: bool,
    entries: Vec<Entry>,
}

/// The single sink every phase writes through.
///
/// Console and file targets are fixed at construction. The file, when
/// present, is opened in append mode and receives every event regardless
/// of the console mode.
pub struct RunLog {
    mode: OutputMode,
    start_time: Instant,
    inner: Mutex<Inner>,
}

impl RunLog {
    /// Console-only log.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: Instant::now(),
            inner: Mutex::new(Inner {
                file: None,
                file_failed: false,
                entries: Vec::new(),
            }),
        }
    }

    /// Console log that also appends to `path`, creating it if needed.
    pub fn with_file(mode: OutputMode, path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let log = Self::new(mode);
        log.inner.lock().file = Some(file);
        Ok(log)
    }

    /// Record an event on every configured target.
    pub fn record(&self, event: Event) {
        tracing::debug!(level = ?event.level, "{}", event.message);

        let entry = Entry {
            timestamp: Local::now(),
            event,
        };
        let line = entry.line();

        match self.mode {
            OutputMode::Normal => println!("{line}"),
            OutputMode::Quiet => {
                if matches!(entry.event.level, Level::Warning | Level::Error) {
                    println!("{line}");
                }
            }
            OutputMode::Json => {
                let json = JsonEvent {
                    timestamp: entry.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                    level: entry.event.level,
                    message: &entry.event.message,
                };
                if let Ok(json) = serde_json::to_string(&json) {
                    println!("{json}");
                }
            }
        }

        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        if let Some(file) = inner.file.as_mut()
            && let Err(e) = writeln!(file, "{line}")
            && !inner.file_failed
        {
            tracing::warn!("failed to write run log file: {}", e);
            inner.file_failed = true;
        }
        inner.entries.push(entry);
    }

    /// Every event recorded so far, in order.
    pub fn entries(&self) -> Vec<Entry> {
        self.inner.lock().entries.clone()
    }

    /// Formatted lines of every event recorded so far.
    pub fn lines(&self) -> Vec<String> {
        self.inner.lock().entries.iter().map(Entry::line).collect()
    }

    /// Seconds since the log was created.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }
}
