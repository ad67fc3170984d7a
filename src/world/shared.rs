//! Shared World Handle
//!
//! One `parking_lot::Mutex` guards the whole `WorldState` so every operation,
//! including `compile`, sees the three layers as a consistent unit.
//! Snapshots are cloned under the lock and published to `watch` channels
//! after it is released.

use super::{ParameterSet, RunCounters, TagList, WorldState};
use crate::core::config::WorldConfig;
use crate::core::error::WorldResult;
use crate::swarm::{FieldLayer, GridMap, ScanResult};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;

struct Channels {
    compiled: watch::Sender<Arc<GridMap>>,
    pheromone: watch::Sender<Arc<GridMap>>,
    target: watch::Sender<Arc<GridMap>>,
    tags: watch::Sender<TagList>,
}

/// Cloneable, thread-safe handle to one world.
#[derive(Clone)]
pub struct SharedWorld {
    state: Arc<Mutex<WorldState>>,
    channels: Arc<Channels>,
}

impl SharedWorld {
    pub fn new(config: &WorldConfig) -> Self {
        Self::from_state(WorldState::new(config))
    }

    pub fn from_state(state: WorldState) -> Self {
        // Receivers are created on demand through `subscribe_*`.
        let (compiled, _) = watch::channel(Arc::new(state.compiled_map().clone()));
        let (pheromone, _) = watch::channel(Arc::new(state.pheromone_map().clone()));
        let (target, _) = watch::channel(Arc::new(state.target_map().clone()));
        let (tags, _) = watch::channel(state.tag_list());

        SharedWorld {
            state: Arc::new(Mutex::new(state)),
            channels: Arc::new(Channels {
                compiled,
                pheromone,
                target,
                tags,
            }),
        }
    }

    /// Run a read-only closure under the lock.
    pub fn read<R>(&self, f: impl FnOnce(&WorldState) -> R) -> R {
        let state = self.state.lock();
        f(&state)
    }

    // ── Inbound operations ───────────────────────────────────────────────────

    /// `updateMap` with the cost-selects-layer convention.
    pub fn update_map(&self, x: i32, y: i32, size: i32, cost: i32) -> Option<FieldLayer> {
        let (layer, pheromone, target, tags) = {
            let mut state = self.state.lock();
            let layer = state.update_map(x, y, size, cost);
            (
                layer,
                Arc::new(state.pheromone_map().clone()),
                Arc::new(state.target_map().clone()),
                state.tag_list(),
            )
        };
        self.channels.pheromone.send_replace(pheromone);
        self.channels.target.send_replace(target);
        self.channels.tags.send_replace(tags);
        layer
    }

    /// Deposit into an explicit layer.
    pub fn paint(&self, layer: FieldLayer, x: i32, y: i32, size: i32, cost: i32) -> usize {
        let (written, pheromone, target, tags) = {
            let mut state = self.state.lock();
            let written = state.paint(layer, x, y, size, cost);
            (
                written,
                Arc::new(state.pheromone_map().clone()),
                Arc::new(state.target_map().clone()),
                state.tag_list(),
            )
        };
        self.channels.pheromone.send_replace(pheromone);
        self.channels.target.send_replace(target);
        self.channels.tags.send_replace(tags);
        written
    }

    pub fn track_pheromone(&self, x: i32, y: i32, heading_deg: f32, cone_half_angle_deg: f32) -> ScanResult {
        self.state
            .lock()
            .track_pheromone(x, y, heading_deg, cone_half_angle_deg)
    }

    pub fn harvest_tag(&self, tag_id: i32) -> bool {
        let harvested = {
            let mut state = self.state.lock();
            state.harvest_tag(tag_id).then(|| state.tag_list())
        };
        match harvested {
            Some(tags) => {
                self.channels.tags.send_replace(tags);
                true
            }
            None => false,
        }
    }

    pub fn increment_obstacle_count(&self) -> u64 {
        self.state.lock().increment_obstacle_count()
    }

    pub fn ingest_parameter_vector(&self, values: &[f32]) -> WorldResult<ParameterSet> {
        self.state.lock().ingest_parameter_vector(values).copied()
    }

    // ── Periodic work ────────────────────────────────────────────────────────

    /// Evaporate pheromones and publish the result. Returns cells moved.
    pub fn decay_tick(&self) -> usize {
        let (moved, pheromone) = {
            let mut state = self.state.lock();
            let moved = state.decay_pheromones();
            (moved, Arc::new(state.pheromone_map().clone()))
        };
        self.channels.pheromone.send_replace(pheromone);
        moved
    }

    /// Rebuild and publish the compiled map.
    pub fn compile_tick(&self) -> Arc<GridMap> {
        let compiled = Arc::new(self.state.lock().compile().clone());
        self.channels.compiled.send_replace(compiled.clone());
        compiled
    }

    /// Start a run if one was requested; counters are reset atomically with the claim.
    pub fn begin_requested_run(&self) -> Option<(ParameterSet, RunCounters)> {
        let started = {
            let mut state = self.state.lock();
            state
                .begin_requested_run()
                .map(|params| (params, state.counters(), state.tag_list()))
        };
        started.map(|(params, counters, tags)| {
            self.channels.tags.send_replace(tags);
            (params, counters)
        })
    }

    // ── Snapshot reads ───────────────────────────────────────────────────────

    pub fn current_compiled_map(&self) -> Arc<GridMap> {
        self.channels.compiled.borrow().clone()
    }

    pub fn current_pheromone_map(&self) -> Arc<GridMap> {
        Arc::new(self.read(|s| s.pheromone_map().clone()))
    }

    pub fn current_target_map(&self) -> Arc<GridMap> {
        Arc::new(self.read(|s| s.target_map().clone()))
    }

    pub fn tags_found_count(&self) -> u32 {
        self.read(|s| s.tags_found_count())
    }

    pub fn obstacle_call_count(&self) -> u64 {
        self.read(|s| s.obstacle_call_count())
    }

    pub fn counters(&self) -> RunCounters {
        self.read(|s| s.counters())
    }

    pub fn tag_list(&self) -> TagList {
        self.read(|s| s.tag_list())
    }

    // ── Subscriptions ────────────────────────────────────────────────────────

    pub fn subscribe_compiled(&self) -> watch::Receiver<Arc<GridMap>> {
        self.channels.compiled.subscribe()
    }

    pub fn subscribe_pheromone(&self) -> watch::Receiver<Arc<GridMap>> {
        self.channels.pheromone.subscribe()
    }

    pub fn subscribe_target(&self) -> watch::Receiver<Arc<GridMap>> {
        self.channels.target.subscribe()
    }

    pub fn subscribe_tags(&self) -> watch::Receiver<TagList> {
        self.channels.tags.subscribe()
    }
}

impl Default for SharedWorld {
    fn default() -> Self {
        Self::new(&WorldConfig::default())
    }
}
