//! Run Log
//!
//! CSV trail of one swarm test run: a parameter header block followed by one
//! `datetime,tagsFound,obstacleCalls,TBD` row per log tick.

use super::config::WorldConfig;
use super::error::WorldResult;
use crate::world::{ParameterSet, RunCounters, SharedWorld};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Column header for the per-tick rows.
pub const ROW_HEADER: &str = "Date-time,numTagsFound,numObstacleCalls,numDeadRobots";
/// Placeholder for the dead-robot column, which nothing reports yet.
pub const DEAD_ROBOTS_PLACEHOLDER: &str = "TBD";

/// Local time as `YYYYmmdd_HH:MM:SS`.
pub fn timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H:%M:%S").to_string()
}

pub fn format_row(stamp: &str, counters: RunCounters) -> String {
    format!(
        "{},{},{},{}",
        stamp, counters.tags_found, counters.obstacle_calls, DEAD_ROBOTS_PLACEHOLDER
    )
}

/// Writes run logs; owns no world state.
#[derive(Debug)]
pub struct RunLogger {
    dir: PathBuf,
    prefix: String,
    current: Option<PathBuf>,
    // Header still to be written after a failed start.
    pending: Option<ParameterSet>,
}

impl RunLogger {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        RunLogger {
            dir: dir.into(),
            prefix: prefix.into(),
            current: None,
            pending: None,
        }
    }

    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(config.log_dir.clone(), config.log_file_prefix.clone())
    }

    /// File of the run in progress, if any.
    pub fn current_file(&self) -> Option<&Path> {
        self.current.as_deref()
    }

    /// Open `<dir>/<prefix><stamp>.csv` and write the header block.
    pub fn start_run(&mut self, params: &ParameterSet, stamp: &str) -> WorldResult<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{}{}.csv", self.prefix, stamp));

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(file, "{}", ParameterSet::CSV_HEADER)?;
        writeln!(file, "{}", params.csv_row())?;
        writeln!(file, "{}", ROW_HEADER)?;

        info!("📝 [RunLog] New run log: {}", path.display());
        self.current = Some(path.clone());
        Ok(path)
    }

    /// Append one counters row to the current run. No-op before the first run.
    pub fn append_row(&mut self, stamp: &str, counters: RunCounters) -> WorldResult<()> {
        let Some(path) = self.current.as_ref() else {
            return Ok(());
        };
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", format_row(stamp, counters))?;
        Ok(())
    }

    /// One log period: start a requested run, then record the counters.
    /// Returns `true` when a row was written. A failed header is retried next tick.
    pub fn tick(&mut self, world: &SharedWorld) -> WorldResult<bool> {
        if let Some((params, _)) = world.begin_requested_run() {
            self.current = None;
            self.pending = Some(params);
        }

        let stamp = timestamp();
        if let Some(params) = self.pending {
            self.start_run(&params, &stamp)?;
            self.pending = None;
        }

        if self.current.is_none() {
            return Ok(false);
        }
        self.append_row(&stamp, world.counters())?;
        Ok(true)
    }
}
