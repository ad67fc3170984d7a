use super::SharedWorld;
use crate::core::config::WorldConfig;
use crate::swarm::FieldLayer;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

fn parse_layer(name: &str) -> PyResult<FieldLayer> {
    match name.to_lowercase().as_str() {
        "obstacle" => Ok(FieldLayer::Obstacle),
        "pheromone" => Ok(FieldLayer::Pheromone),
        "target" => Ok(FieldLayer::Target),
        other => Err(pyo3::exceptions::PyValueError::new_err(format!(
            "Unknown layer '{}': expected obstacle, pheromone or target",
            other
        ))),
    }
}

/// Python handle to a shared world. Clones of the handle see the same maps.
#[pyclass]
pub struct PyWorldState {
    world: SharedWorld,
}

#[pymethods]
impl PyWorldState {
    #[new]
    #[pyo3(signature = (config_json = None))]
    pub fn new(config_json: Option<String>) -> PyResult<Self> {
        let config = match config_json {
            Some(raw) => WorldConfig::from_json_str(&raw)?,
            None => WorldConfig::default(),
        };
        Ok(Self {
            world: SharedWorld::new(&config),
        })
    }

    /// Deposit a blob; the layer is chosen by cost (-10, 20, -100).
    /// Returns False when the cost selects no layer.
    pub fn update_map(&self, x: i32, y: i32, size: i32, cost: i32) -> bool {
        self.world.update_map(x, y, size, cost).is_some()
    }

    /// Deposit a blob into a named layer.
    pub fn paint(&self, layer: &str, x: i32, y: i32, size: i32, cost: i32) -> PyResult<usize> {
        Ok(self.world.paint(parse_layer(layer)?, x, y, size, cost))
    }

    /// Returns (found, heading_deg).
    pub fn track_pheromone(&self, x: i32, y: i32, heading_deg: f32, cone_half_angle_deg: f32) -> (bool, f32) {
        let result = self
            .world
            .track_pheromone(x, y, heading_deg, cone_half_angle_deg);
        (result.found, result.heading_deg)
    }

    pub fn harvest_tag(&self, tag_id: i32) -> bool {
        self.world.harvest_tag(tag_id)
    }

    pub fn increment_obstacle_count(&self) -> u64 {
        self.world.increment_obstacle_count()
    }

    pub fn ingest_parameter_vector(&self, values: Vec<f32>) -> PyResult<()> {
        self.world.ingest_parameter_vector(&values)?;
        Ok(())
    }

    pub fn decay_tick(&self) -> usize {
        self.world.decay_tick()
    }

    pub fn compile_tick(&self) {
        self.world.compile_tick();
    }

    /// Row-major MONO8 bytes of the last compiled map.
    pub fn compiled_map<'py>(&self, py: Python<'py>) -> Bound<'py, PyBytes> {
        PyBytes::new_bound(py, self.world.current_compiled_map().as_bytes())
    }

    pub fn pheromone_map<'py>(&self, py: Python<'py>) -> Bound<'py, PyBytes> {
        PyBytes::new_bound(py, self.world.current_pheromone_map().as_bytes())
    }

    pub fn target_map<'py>(&self, py: Python<'py>) -> Bound<'py, PyBytes> {
        PyBytes::new_bound(py, self.world.current_target_map().as_bytes())
    }

    pub fn tags_found_count(&self) -> u32 {
        self.world.tags_found_count()
    }

    pub fn obstacle_call_count(&self) -> u64 {
        self.world.obstacle_call_count()
    }

    pub fn tag_ids(&self) -> Vec<i32> {
        self.world.tag_list().tag_ids
    }

    pub fn __repr__(&self) -> String {
        let counters = self.world.counters();
        format!(
            "PyWorldState(tags_found={}, obstacle_calls={})",
            counters.tags_found, counters.obstacle_calls
        )
    }
}
