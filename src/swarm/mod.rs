//! Swarm Map Engine
//!
//! Grid layers shared by the swarm and the algorithms that read and write them:
//! pheromone decay, blob deposits, cone scans and layer compositing.

pub mod blob;
pub mod compositor;
pub mod grid;
pub mod pheromone;
pub mod scan;

pub use blob::{paint_blob, FieldLayer};
pub use compositor::compile;
pub use grid::{GridMap, CEILING, MAP_SIZE, NEUTRAL, ORIGIN};
pub use pheromone::DecayStep;
pub use scan::{ConeScanner, ScanResult};
