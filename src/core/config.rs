use super::error::WorldResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Timing and tuning knobs for the world-state node.
///
/// Grid geometry (dimension, neutral, ceiling, origin) is a wire format and
/// lives in constants, not here.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Cell value moved toward neutral on every decay tick
    pub decay_amount: u8,
    /// Seconds between pheromone decay ticks
    pub decay_interval_secs: u64,
    /// Seconds between compiled map rebuilds
    pub compile_interval_secs: u64,
    /// Seconds between run log rows
    pub log_interval_secs: u64,
    /// Ray length (cells) for the pheromone cone scan
    pub scan_radius: i32,
    /// Directory receiving run log CSV files
    pub log_dir: PathBuf,
    /// File name prefix for run logs
    pub log_file_prefix: String,
}

impl WorldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a JSON file. Missing keys fall back to defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> WorldResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> WorldResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            decay_amount: 1,
            decay_interval_secs: 50,
            compile_interval_secs: 1,
            log_interval_secs: 1,
            scan_radius: 20,
            log_dir: PathBuf::from("logs"),
            log_file_prefix: "swarmieTestLog-".to_string(),
        }
    }
}
