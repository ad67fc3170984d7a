//! Runtime plumbing around the map engine: configuration, errors, the run
//! log writer and the periodic task service.

pub mod config;
pub mod error;
pub mod run_log;
pub mod runner;

pub use config::WorldConfig;
pub use error::{WorldError, WorldResult};
pub use run_log::RunLogger;
pub use runner::WorldService;
