use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use log::info;

use crate::tracking::LookAccumulator;

const DELIMITER: &str = ";";
const HEADER_LINE: &str = "Timestamp;ObjectName;ProductCategory;TotalLookTime(sec)";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Accumulated totals below this are dropped at flush time, never written.
pub const MIN_LOOK_TIME_SECS: f64 = 0.05;

/// Default file name of the session log in the host's data directory.
pub const SESSION_LOG_FILE_NAME: &str = "LookTimeData_Acc_Sessions.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderPhase {
    Uninitialized,
    Loaded,
    Flushed,
}

/// Bridges the in-memory accumulator to the durable session log.
///
/// Lifecycle is load-once, flush-once: `load` at startup carries prior
/// sessions forward and stamps a separator, `flush` at shutdown writes the
/// combined history back in a single operation.
pub struct SessionRecorder {
    path: PathBuf,
    phase: RecorderPhase,
    carried: String,
}

impl SessionRecorder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            phase: RecorderPhase::Uninitialized,
            carried: String::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn phase(&self) -> RecorderPhase {
        self.phase
    }

    /// Read any prior session text and stamp the new-session separator.
    /// An absent file is the first-run case: start from the column header.
    pub fn load(&mut self, now: DateTime<Utc>) -> Result<()> {
        if self.phase != RecorderPhase::Uninitialized {
            bail!("session recorder already loaded");
        }

        let separator = session_separator(now);

        if self.path.exists() {
            let previous = fs::read_to_string(&self.path).with_context(|| {
                format!("failed to read session log {}", self.path.display())
            })?;
            self.carried = format!("{previous}\n\n{separator}\n");
            info!("previous session data loaded from {}", self.path.display());
        } else {
            self.carried = format!("{HEADER_LINE}\n{separator}\n");
            info!("no prior session log, starting fresh at {}", self.path.display());
        }

        self.phase = RecorderPhase::Loaded;
        Ok(())
    }

    /// Write carried history plus this session's qualifying totals back to
    /// the log in one operation. Terminal: the recorder is spent afterwards
    /// even if the write fails (the process is exiting regardless).
    pub fn flush(&mut self, times: &LookAccumulator, now: DateTime<Utc>) -> Result<()> {
        if self.phase != RecorderPhase::Loaded {
            bail!("session recorder not in loaded state");
        }
        self.phase = RecorderPhase::Flushed;

        let mut output = std::mem::take(&mut self.carried);
        let rows = render_session_rows(times, now);
        output.push_str(&rows);

        fs::write(&self.path, output).with_context(|| {
            format!("failed to write session log {}", self.path.display())
        })?;

        info!(
            "session data written to {} ({} tracked objects)",
            self.path.display(),
            times.len()
        );
        Ok(())
    }
}

fn session_separator(now: DateTime<Utc>) -> String {
    format!(
        "{DELIMITER}{DELIMITER}--- NEW SESSION STARTED ON {} ---{DELIMITER}",
        now.format(TIMESTAMP_FORMAT)
    )
}

fn render_session_rows(times: &LookAccumulator, now: DateTime<Utc>) -> String {
    let timestamp = now.format(TIMESTAMP_FORMAT).to_string();

    let mut entries: Vec<(&str, f64)> = times
        .iter()
        .filter(|(_, total)| *total >= MIN_LOOK_TIME_SECS)
        .collect();
    // The accumulator iterates in hash order; sort so the log is stable.
    entries.sort_by_key(|entry| entry.0);

    let mut rows = String::new();
    for (key, total) in entries {
        // The category column mirrors the resolved key.
        rows.push_str(&format!(
            "{timestamp}{DELIMITER}{key}{DELIMITER}{key}{DELIMITER}{total:.2}\n"
        ));
    }
    rows
}
