//! Swarm World State v0.4.0 - Shared Map Engine for Swarm Agents
//!
//! One fixed 300×300 world model per swarm: an obstacle layer, an evaporating
//! pheromone-trail layer and a target-sighting layer. Agents paint sensed
//! events as blobs, scan a cone for the strongest trail, harvest tags, and
//! read back a compiled overlay for display.

pub mod core;
pub mod swarm;
pub mod world;

// Re-export key types for internal use
pub use core::config::WorldConfig;
pub use core::error::{WorldError, WorldResult};
pub use core::run_log::RunLogger;
pub use core::runner::WorldService;
pub use swarm::{ConeScanner, DecayStep, FieldLayer, GridMap, ScanResult, CEILING, MAP_SIZE, NEUTRAL, ORIGIN};
pub use world::{ParameterSet, RunCounters, SharedWorld, TagList, TagRegistry, WorldState};

/// Initialize tracing for the library.
pub fn setup_logging(level: Option<String>) {
    let filter = level.unwrap_or_else(|| "info".to_string());
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(feature = "python")]
mod python {
    use pyo3::prelude::*;

    /// Initialize tracing from Python.
    #[pyfunction]
    #[pyo3(signature = (level = None))]
    fn setup_logging(level: Option<String>) {
        super::setup_logging(level);
    }

    /// Python module initialization
    #[pymodule]
    fn swarm_world_state(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_class::<crate::world::py_api::PyWorldState>()?;
        m.add_function(wrap_pyfunction!(setup_logging, m)?)?;
        m.add("MAP_SIZE", crate::swarm::MAP_SIZE)?;
        m.add("NEUTRAL", crate::swarm::NEUTRAL)?;
        m.add("CEILING", crate::swarm::CEILING)?;
        Ok(())
    }
}
