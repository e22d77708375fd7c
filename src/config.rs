use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::recorder::SESSION_LOG_FILE_NAME;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerConfig {
    /// Maximum ray distance; hits beyond this are misses.
    pub look_distance: f32,
    /// Simulation tick interval driving the sampler.
    pub tick_interval_ms: u64,
    /// Session log file name, joined onto the host data directory.
    pub log_file_name: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            look_distance: 10.0,
            tick_interval_ms: 100,
            log_file_name: SESSION_LOG_FILE_NAME.to_string(),
        }
    }
}

/// JSON-backed config store. An absent or unparsable file falls back to
/// defaults; the file is only (re)written through `update`.
///
/// Host-facing entry point: read it once at startup and hand the resulting
/// [`TrackerConfig`] to [`TrackerController::new`](crate::TrackerController::new).
/// The tracker itself never re-reads the file.
pub struct ConfigStore {
    path: PathBuf,
    data: RwLock<TrackerConfig>,
}

impl ConfigStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            TrackerConfig::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn config(&self) -> TrackerConfig {
        self.data.read().unwrap().clone()
    }

    pub fn update(&self, config: TrackerConfig) -> Result<()> {
        {
            let mut guard = self.data.write().unwrap();
            *guard = config;
            self.persist(&guard)?;
        }
        Ok(())
    }

    fn persist(&self, data: &TrackerConfig) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("failed to write config to {}", self.path.display()))
    }
}
