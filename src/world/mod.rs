//! World State
//!
//! The aggregate every swarm operation goes through: three map layers, the
//! compiled overlay, the tag registry and the run counters. `WorldState` holds
//! no locks; share it through [`SharedWorld`].

pub mod params;
pub mod shared;
pub mod tags;

#[cfg(feature = "python")]
pub mod py_api;

use crate::core::config::WorldConfig;
use crate::core::error::WorldResult;
use crate::swarm::{compile, paint_blob, ConeScanner, DecayStep, FieldLayer, GridMap, ScanResult, MAP_SIZE, ORIGIN};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub use params::{ParameterSet, PARAMETER_COUNT};
pub use shared::SharedWorld;
pub use tags::{TagList, TagRegistry};

/// Counters written to the run log.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounters {
    pub tags_found: u32,
    pub obstacle_calls: u64,
}

/// Shared world model for one swarm.
#[derive(Clone, Debug)]
pub struct WorldState {
    obstacle: GridMap,
    pheromone: GridMap,
    target: GridMap,
    // Last compile result; starts with the origin marked black.
    compiled: GridMap,

    tags: TagRegistry,
    obstacle_calls: u64,

    parameters: Option<ParameterSet>,
    new_run_requested: bool,

    decay: DecayStep,
    scanner: ConeScanner,
}

impl WorldState {
    pub fn new(config: &WorldConfig) -> Self {
        let mut compiled = GridMap::new(MAP_SIZE);
        compiled.set(ORIGIN.1, ORIGIN.0, 0);

        info!(
            "🌐 [WorldState] Initialized {}x{} layers (decay step {}, scan radius {})",
            MAP_SIZE, MAP_SIZE, config.decay_amount, config.scan_radius
        );

        WorldState {
            obstacle: GridMap::new(MAP_SIZE),
            pheromone: GridMap::new(MAP_SIZE),
            target: GridMap::new(MAP_SIZE),
            compiled,
            tags: TagRegistry::new(),
            obstacle_calls: 0,
            parameters: None,
            new_run_requested: false,
            decay: DecayStep::new(config.decay_amount),
            scanner: ConeScanner::new(config.scan_radius),
        }
    }

    pub fn layer(&self, layer: FieldLayer) -> &GridMap {
        match layer {
            FieldLayer::Obstacle => &self.obstacle,
            FieldLayer::Pheromone => &self.pheromone,
            FieldLayer::Target => &self.target,
        }
    }

    fn layer_mut(&mut self, layer: FieldLayer) -> &mut GridMap {
        match layer {
            FieldLayer::Obstacle => &mut self.obstacle,
            FieldLayer::Pheromone => &mut self.pheromone,
            FieldLayer::Target => &mut self.target,
        }
    }

    // ── Inbound operations ───────────────────────────────────────────────────

    /// Deposit a blob into an explicit layer. Returns the number of cells written.
    pub fn paint(&mut self, layer: FieldLayer, x: i32, y: i32, size: i32, cost: i32) -> usize {
        paint_blob(self.layer_mut(layer), x, y, size, cost)
    }

    /// `updateMap`: the layer is implied by the cost
    /// (−10 pheromone, 20 obstacle, −100 target). Other costs are ignored.
    pub fn update_map(&mut self, x: i32, y: i32, size: i32, cost: i32) -> Option<FieldLayer> {
        match FieldLayer::from_legacy_cost(cost) {
            Some(layer) => {
                self.paint(layer, x, y, size, cost);
                Some(layer)
            }
            None => {
                warn!("[WorldState] updateMap cost {} selects no layer; ignored", cost);
                None
            }
        }
    }

    /// `trackPheromone`: cone scan over the pheromone layer.
    pub fn track_pheromone(&self, x: i32, y: i32, heading_deg: f32, cone_half_angle_deg: f32) -> ScanResult {
        debug!(
            "[WorldState] Requested pheromones: {}, {}, heading {}, cone {}",
            x,
            y,
            heading_deg,
            cone_half_angle_deg * 2.0
        );
        self.scanner.scan(&self.pheromone, x, y, heading_deg, cone_half_angle_deg)
    }

    /// `harvestTag`: `true` only the first time an id is seen.
    pub fn harvest_tag(&mut self, tag_id: i32) -> bool {
        if self.tags.harvest(tag_id) {
            info!("🏷️  [WorldState] Harvested new tag: {}", tag_id);
            true
        } else {
            info!("[WorldState] Tag {} has already been found", tag_id);
            false
        }
    }

    /// Count one new obstacle-avoidance episode. Returns the new total.
    pub fn increment_obstacle_count(&mut self) -> u64 {
        self.obstacle_calls += 1;
        self.obstacle_calls
    }

    /// Store a controller parameter vector and request a fresh run log.
    /// A malformed vector leaves the previous parameters and flag untouched.
    pub fn ingest_parameter_vector(&mut self, values: &[f32]) -> WorldResult<&ParameterSet> {
        let params = ParameterSet::from_slice(values)?;
        info!("[WorldState] Parameters received: {}", params.csv_row());
        self.new_run_requested = true;
        let stored = self.parameters.insert(params);
        Ok(&*stored)
    }

    // ── Periodic work ────────────────────────────────────────────────────────

    /// One evaporation step on the pheromone layer.
    pub fn decay_pheromones(&mut self) -> usize {
        self.decay.apply(&mut self.pheromone)
    }

    /// Rebuild the compiled overlay from the three layers.
    pub fn compile(&mut self) -> &GridMap {
        self.compiled = compile(&self.obstacle, &self.pheromone, &self.target);
        &self.compiled
    }

    /// Consume a pending new-run request: reset tags and obstacle counter
    /// (grids are left alone) and hand back the parameters for the log header.
    pub fn begin_requested_run(&mut self) -> Option<ParameterSet> {
        if !std::mem::take(&mut self.new_run_requested) {
            return None;
        }
        self.reset_counters();
        self.parameters
    }

    pub fn reset_counters(&mut self) {
        self.tags.clear();
        self.obstacle_calls = 0;
    }

    // ── Snapshot reads ───────────────────────────────────────────────────────

    pub fn compiled_map(&self) -> &GridMap {
        &self.compiled
    }

    pub fn pheromone_map(&self) -> &GridMap {
        &self.pheromone
    }

    pub fn target_map(&self) -> &GridMap {
        &self.target
    }

    pub fn obstacle_map(&self) -> &GridMap {
        &self.obstacle
    }

    pub fn tags_found_count(&self) -> u32 {
        self.tags.found_count()
    }

    pub fn obstacle_call_count(&self) -> u64 {
        self.obstacle_calls
    }

    pub fn tag_list(&self) -> TagList {
        self.tags.snapshot()
    }

    pub fn counters(&self) -> RunCounters {
        RunCounters {
            tags_found: self.tags_found_count(),
            obstacle_calls: self.obstacle_calls,
        }
    }

    pub fn parameters(&self) -> Option<&ParameterSet> {
        self.parameters.as_ref()
    }

    pub fn new_run_requested(&self) -> bool {
        self.new_run_requested
    }
}

impl Default for WorldState {
    fn default() -> Self {
        Self::new(&WorldConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::WorldError;
    use crate::swarm::{CEILING, NEUTRAL};

    #[test]
    fn fresh_world_marks_origin_only_on_compiled_map() {
        let world = WorldState::default();
        assert!(world.pheromone_map().is_uniform(NEUTRAL));
        assert!(world.target_map().is_uniform(NEUTRAL));
        assert!(world.obstacle_map().is_uniform(NEUTRAL));
        assert_eq!(world.compiled_map().get(150, 150), Some(0));
        assert_eq!(world.compiled_map().get(150, 151), Some(NEUTRAL));
    }

    #[test]
    fn update_map_routes_by_cost() {
        let mut world = WorldState::default();
        assert_eq!(world.update_map(10, 20, 2, -10), Some(FieldLayer::Pheromone));
        assert_eq!(world.update_map(30, 40, 2, 20), Some(FieldLayer::Obstacle));
        assert_eq!(world.update_map(50, 60, 2, -100), Some(FieldLayer::Target));

        assert_eq!(world.pheromone_map().get(20, 10), Some(NEUTRAL - 10));
        assert_eq!(world.obstacle_map().get(40, 30), Some(NEUTRAL + 20));
        assert_eq!(world.target_map().get(60, 50), Some(28));

        // Only the selected layer moves.
        assert_eq!(world.obstacle_map().get(20, 10), Some(NEUTRAL));
        assert_eq!(world.target_map().get(40, 30), Some(NEUTRAL));
    }

    #[test]
    fn unknown_cost_is_a_no_op() {
        let mut world = WorldState::default();
        assert_eq!(world.update_map(100, 100, 5, 7), None);
        assert!(world.pheromone_map().is_uniform(NEUTRAL));
        assert!(world.obstacle_map().is_uniform(NEUTRAL));
        assert!(world.target_map().is_uniform(NEUTRAL));
    }

    #[test]
    fn negative_x_matches_clamped_x() {
        let mut a = WorldState::default();
        let mut b = WorldState::default();
        a.update_map(-50, 10, 3, 20);
        b.update_map(0, 10, 3, 20);
        assert_eq!(a.obstacle_map(), b.obstacle_map());
        assert_ne!(a.obstacle_map().get(10, 0), Some(NEUTRAL));
    }

    #[test]
    fn explicit_paint_decouples_layer_from_cost() {
        let mut world = WorldState::default();
        world.paint(FieldLayer::Obstacle, 5, 5, 0, 100);
        assert_eq!(world.obstacle_map().get(5, 5), Some(228));
        world.paint(FieldLayer::Obstacle, 5, 5, 0, 100);
        assert_eq!(world.obstacle_map().get(5, 5), Some(CEILING));
    }

    #[test]
    fn harvest_twice_counts_once() {
        let mut world = WorldState::default();
        let before = world.tags_found_count();
        assert!(world.harvest_tag(7));
        assert!(!world.harvest_tag(7));
        assert_eq!(world.tags_found_count(), before + 1);
        assert_eq!(world.tag_list().tag_ids, vec![7]);
    }

    #[test]
    fn obstacle_counter_is_unbounded() {
        let mut world = WorldState::default();
        for _ in 0..1000 {
            world.increment_obstacle_count();
        }
        assert_eq!(world.obstacle_call_count(), 1000);
    }

    #[test]
    fn track_pheromone_follows_laid_trail() {
        let mut world = WorldState::default();
        world.update_map(150, 160, 3, -10);
        let result = world.track_pheromone(150, 150, 90.0, 45.0);
        assert!(result.found);
        assert!((result.heading_deg - 90.0).abs() <= 1.0);

        // Obstacles and targets are invisible to the trail scan.
        let mut world = WorldState::default();
        world.update_map(150, 160, 3, -100);
        let result = world.track_pheromone(150, 150, 90.0, 45.0);
        assert!(!result.found);
        assert_eq!(result.heading_deg, 90.0);
    }

    #[test]
    fn compile_overlays_layers() {
        let mut world = WorldState::default();
        world.paint(FieldLayer::Obstacle, 40, 40, 0, 60);
        world.paint(FieldLayer::Pheromone, 40, 40, 0, -10);
        world.paint(FieldLayer::Target, 40, 40, 0, -100);
        world.paint(FieldLayer::Obstacle, 80, 80, 0, 60);

        let compiled = world.compile().clone();
        assert_eq!(compiled.get(40, 40), Some(28));
        assert_eq!(compiled.get(80, 80), Some(188));
        // The origin marker does not survive a rebuild.
        assert_eq!(compiled.get(150, 150), Some(NEUTRAL));
    }

    #[test]
    fn decay_only_touches_pheromones() {
        let mut world = WorldState::default();
        world.update_map(10, 10, 0, -10);
        world.update_map(20, 20, 0, 20);
        world.update_map(30, 30, 0, -100);

        assert_eq!(world.decay_pheromones(), 1);
        assert_eq!(world.pheromone_map().get(10, 10), Some(NEUTRAL - 9));
        assert_eq!(world.obstacle_map().get(20, 20), Some(NEUTRAL + 20));
        assert_eq!(world.target_map().get(30, 30), Some(28));
    }

    #[test]
    fn malformed_parameters_leave_state_alone() {
        let mut world = WorldState::default();
        let err = world.ingest_parameter_vector(&[1.0; 4]).unwrap_err();
        assert!(matches!(err, WorldError::MalformedParameterVector { actual: 4, .. }));
        assert!(world.parameters().is_none());
        assert!(!world.new_run_requested());

        world.ingest_parameter_vector(&[0.5; 9]).unwrap();
        world.ingest_parameter_vector(&[2.0; 3]).unwrap_err();
        assert_eq!(world.parameters().map(|p| p.pherom_decay), Some(0.5));
    }

    #[test]
    fn new_run_resets_counters_but_not_grids() {
        let mut world = WorldState::default();
        world.update_map(60, 60, 2, 20);
        world.harvest_tag(3);
        world.increment_obstacle_count();

        assert_eq!(world.begin_requested_run(), None);
        assert_eq!(world.tags_found_count(), 1);

        world.ingest_parameter_vector(&[1.0; 9]).unwrap();
        let params = world.begin_requested_run().unwrap();
        assert_eq!(params.site_fidelity, 1.0);
        assert_eq!(world.counters(), RunCounters::default());
        assert_eq!(world.obstacle_map().get(60, 60), Some(NEUTRAL + 20));

        // The request is consumed.
        assert_eq!(world.begin_requested_run(), None);
        assert!(world.harvest_tag(3));
    }
}
