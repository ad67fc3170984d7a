use crate::core::config::WorldConfig;
use crate::core::run_log::RunLogger;
use crate::world::SharedWorld;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Runs the periodic world tasks: pheromone decay, compiled map rebuild and
/// the run log. Each task has its own timer and only meets the others at the
/// world lock.
pub struct WorldService {
    world: SharedWorld,
    tasks: Vec<JoinHandle<()>>,
}

fn period(secs: u64) -> Duration {
    // A zero period would make `interval` panic.
    Duration::from_secs(secs.max(1))
}

impl WorldService {
    /// Spawn the periodic tasks on the current tokio runtime.
    pub fn start(world: SharedWorld, config: &WorldConfig) -> Self {
        let decay_every = period(config.decay_interval_secs);
        let compile_every = period(config.compile_interval_secs);
        let log_every = period(config.log_interval_secs);

        info!(
            "🛰️  [Service] Starting: decay every {:?}, compile every {:?}, log every {:?} into {}",
            decay_every,
            compile_every,
            log_every,
            config.log_dir.display()
        );

        let tasks = vec![
            tokio::spawn(decay_loop(world.clone(), decay_every)),
            tokio::spawn(compile_loop(world.clone(), compile_every)),
            tokio::spawn(log_loop(world.clone(), RunLogger::from_config(config), log_every)),
        ];

        WorldService { world, tasks }
    }

    pub fn world(&self) -> &SharedWorld {
        &self.world
    }

    /// Stop all periodic tasks. The world itself stays usable.
    pub async fn shutdown(self) {
        for task in &self.tasks {
            task.abort();
        }
        for task in self.tasks {
            let _ = task.await;
        }
        info!("[Service] Periodic tasks stopped");
    }
}

async fn decay_loop(world: SharedWorld, every: Duration) {
    let mut ticker = interval_at(Instant::now() + every, every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let moved = world.decay_tick();
        debug!("[Service] Decay tick moved {} cells", moved);
    }
}

async fn compile_loop(world: SharedWorld, every: Duration) {
    let mut ticker = interval_at(Instant::now() + every, every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        world.compile_tick();
    }
}

async fn log_loop(world: SharedWorld, mut logger: RunLogger, every: Duration) {
    let mut ticker = interval_at(Instant::now() + every, every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        // A failed write only costs this row; the next period tries again.
        if let Err(e) = logger.tick(&world) {
            warn!("[RunLog] Log tick failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swarm::NEUTRAL;
    use tempfile::tempdir;
    use tokio::time::sleep;

    fn config_in(dir: &std::path::Path) -> WorldConfig {
        WorldConfig {
            log_dir: dir.to_path_buf(),
            ..WorldConfig::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn decay_runs_on_its_own_period() {
        let dir = tempdir().unwrap();
        let world = SharedWorld::default();
        world.update_map(100, 100, 0, -10);
        let service = WorldService::start(world.clone(), &config_in(dir.path()));

        sleep(Duration::from_millis(49_500)).await;
        assert_eq!(world.current_pheromone_map().get(100, 100), Some(NEUTRAL - 10));

        sleep(Duration::from_secs(1)).await;
        assert_eq!(world.current_pheromone_map().get(100, 100), Some(NEUTRAL - 9));

        sleep(Duration::from_secs(50)).await;
        assert_eq!(world.current_pheromone_map().get(100, 100), Some(NEUTRAL - 8));

        service.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn compiled_map_refreshes_every_second() {
        let dir = tempdir().unwrap();
        let world = SharedWorld::default();
        let mut compiled = world.subscribe_compiled();
        let service = WorldService::start(world.clone(), &config_in(dir.path()));

        world.update_map(20, 30, 0, -100);
        sleep(Duration::from_millis(1_500)).await;

        assert!(compiled.has_changed().unwrap());
        assert_eq!(compiled.borrow_and_update().get(30, 20), Some(28));
        service.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn log_task_writes_rows_once_parameters_arrive() {
        let dir = tempdir().unwrap();
        let world = SharedWorld::default();
        let service = WorldService::start(world.clone(), &config_in(dir.path()));

        sleep(Duration::from_millis(2_500)).await;
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

        world.ingest_parameter_vector(&[1.0; 9]).unwrap();
        world.increment_obstacle_count(); // cleared when the run starts
        sleep(Duration::from_secs(3)).await;
        service.shutdown().await;

        let files: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(files.len(), 1);
        let content = std::fs::read_to_string(&files[0]).unwrap();
        let rows: Vec<_> = content.lines().skip(3).collect();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.ends_with(",0,0,TBD")));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_periodic_work() {
        let dir = tempdir().unwrap();
        let world = SharedWorld::default();
        world.update_map(5, 5, 0, -10);
        let service = WorldService::start(world.clone(), &config_in(dir.path()));
        service.shutdown().await;

        sleep(Duration::from_secs(500)).await;
        assert_eq!(world.current_pheromone_map().get(5, 5), Some(NEUTRAL - 10));
    }
}
