//! Map Compositor
//!
//! Flattens the three world layers into one display/consumer map.
//! Z-order, bottom to top: obstacle, pheromone, target. Upper layers only
//! show where they are attractive (below neutral).

use super::grid::{GridMap, NEUTRAL};
use rayon::prelude::*;

/// Overlay `pheromone` then `target` onto a copy of `obstacle`.
///
/// All three grids must share one size; the obstacle grid sets it.
pub fn compile(obstacle: &GridMap, pheromone: &GridMap, target: &GridMap) -> GridMap {
    debug_assert_eq!(obstacle.size(), pheromone.size());
    debug_assert_eq!(obstacle.size(), target.size());

    let mut compiled = obstacle.clone();
    compiled
        .cells_mut()
        .par_iter_mut()
        .zip(pheromone.as_bytes().par_iter())
        .zip(target.as_bytes().par_iter())
        .for_each(|((cell, &trail), &sighting)| {
            if trail < NEUTRAL {
                *cell = trail;
            }
            if sighting < NEUTRAL {
                *cell = sighting;
            }
        });
    compiled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swarm::grid::CEILING;

    #[test]
    fn target_beats_pheromone_beats_obstacle() {
        let mut obstacle = GridMap::new(4);
        let mut pheromone = GridMap::new(4);
        let mut target = GridMap::new(4);

        obstacle.set(1, 1, 200);
        pheromone.set(1, 1, 90);
        target.set(1, 1, 20);

        let compiled = compile(&obstacle, &pheromone, &target);
        assert_eq!(compiled.get(1, 1), Some(20));
    }

    #[test]
    fn only_attractive_values_show_through() {
        let mut obstacle = GridMap::new(4);
        let mut pheromone = GridMap::new(4);
        let mut target = GridMap::new(4);

        obstacle.set(0, 0, 180);
        pheromone.set(0, 0, CEILING); // repulsive pheromone stays hidden
        pheromone.set(2, 3, 100);
        target.set(3, 3, NEUTRAL);

        let compiled = compile(&obstacle, &pheromone, &target);
        assert_eq!(compiled.get(0, 0), Some(180));
        assert_eq!(compiled.get(2, 3), Some(100));
        assert_eq!(compiled.get(3, 3), Some(NEUTRAL));
    }

    #[test]
    fn inputs_are_not_modified() {
        let mut obstacle = GridMap::new(3);
        obstacle.set(0, 1, 140);
        let mut pheromone = GridMap::new(3);
        pheromone.set(0, 1, 30);
        let target = GridMap::new(3);

        let before = (obstacle.clone(), pheromone.clone());
        let _ = compile(&obstacle, &pheromone, &target);
        assert_eq!((obstacle, pheromone), before);
    }
}
