use std::collections::{HashMap, VecDeque};

use glam::Vec2;

use crate::caster::RayHit;

/// Default number of memoized casts held before eviction starts.
const DEFAULT_CAPACITY: usize = 4096;

/// Cache key: origin quantized to one decimal, angle to two decimals.
///
/// Many rays per frame originate from near-identical positions; snapping
/// trades a sub-cell keying error for reuse across those queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RayKey {
    pub qx: i32,
    pub qy: i32,
    pub qangle: i32,
}

impl RayKey {
    pub fn quantize(origin: Vec2, angle: f32) -> Self {
        Self {
            qx: (origin.x * 10.0).round() as i32,
            qy: (origin.y * 10.0).round() as i32,
            qangle: (angle * 100.0).round() as i32,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct CachedRay {
    hit: RayHit,
    /// Horizon the march was run with. A miss only answers queries this
    /// horizon covers; a hit only answers queries that can reach it.
    max_distance: f32,
}

/// Fixed-capacity memoization of cast results with deterministic FIFO
/// eviction: at capacity, the oldest insertion is dropped, one per insert.
///
/// Re-inserting an existing key updates it in place without refreshing its
/// age. The cache holds no grid reference; the owner clears it on level
/// transitions.
#[derive(Debug)]
pub struct RayCache {
    capacity: usize,
    entries: HashMap<RayKey, CachedRay>,
    order: VecDeque<RayKey>,
}

impl RayCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            order: VecDeque::new(),
        }
    }

    /// Look up a cached result that correctly answers a query at
    /// `max_distance`. Returns `None` when the entry cannot answer it (the
    /// caller re-marches and replaces the entry).
    pub fn lookup(&self, key: RayKey, max_distance: f32) -> Option<RayHit> {
        let entry = self.entries.get(&key)?;
        if entry.hit.hit {
            // A known wall answers any horizon that reaches it.
            if entry.hit.distance <= max_distance {
                return Some(entry.hit);
            }
            // Horizon stops short of the known wall: clear by definition.
            return Some(RayHit::clear(max_distance));
        }
        // A known miss answers only horizons it covered.
        if entry.max_distance >= max_distance {
            return Some(RayHit::clear(max_distance));
        }
        None
    }

    pub fn insert(&mut self, key: RayKey, hit: RayHit, max_distance: f32) {
        if self.capacity == 0 {
            return;
        }
        let cached = CachedRay { hit, max_distance };
        if self.entries.insert(key, cached).is_some() {
            return;
        }
        self.order.push_back(key);
        if self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                tracing::trace!(?oldest, "ray cache evicted oldest entry");
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

impl Default for RayCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
