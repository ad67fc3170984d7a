//! Tag Registry
//!
//! Remembers which target tags the swarm has already harvested.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Published view of the registry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagList {
    pub tags_found: u32,
    /// Harvest order
    pub tag_ids: Vec<i32>,
}

/// Unique harvested ids plus their count.
#[derive(Clone, Debug, Default)]
pub struct TagRegistry {
    seen: HashSet<i32>,
    order: Vec<i32>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `tag_id`. Returns `false` (and changes nothing) if it was already harvested.
    pub fn harvest(&mut self, tag_id: i32) -> bool {
        if !self.seen.insert(tag_id) {
            return false;
        }
        self.order.push(tag_id);
        true
    }

    pub fn contains(&self, tag_id: i32) -> bool {
        self.seen.contains(&tag_id)
    }

    pub fn found_count(&self) -> u32 {
        self.order.len() as u32
    }

    pub fn ids(&self) -> &[i32] {
        &self.order
    }

    pub fn snapshot(&self) -> TagList {
        TagList {
            tags_found: self.found_count(),
            tag_ids: self.order.clone(),
        }
    }

    pub fn clear(&mut self) {
        self.seen.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_harvest_is_refused() {
        let mut registry = TagRegistry::new();
        assert!(registry.harvest(7));
        assert!(!registry.harvest(7));
        assert_eq!(registry.found_count(), 1);
        assert_eq!(registry.ids(), &[7]);
    }

    #[test]
    fn count_tracks_cardinality_in_harvest_order() {
        let mut registry = TagRegistry::new();
        for id in [4, 2, 4, 9, 2, -1] {
            registry.harvest(id);
        }
        let list = registry.snapshot();
        assert_eq!(list.tags_found, 4);
        assert_eq!(list.tag_ids, vec![4, 2, 9, -1]);
        assert!(registry.contains(9));
        assert!(!registry.contains(5));
    }

    #[test]
    fn clear_allows_reharvest() {
        let mut registry = TagRegistry::new();
        registry.harvest(1);
        registry.clear();
        assert_eq!(registry.found_count(), 0);
        assert!(registry.harvest(1));
    }
}
