//! Caches keyed by [`SystemPath`] with a cube-shaped window around a centre.
//!
//! Refreshing fills the active window of radius `R` nearest-first and drops
//! anything further than the survivor radius `3R`, so moving back and forth
//! across a sector boundary does not regenerate what was just left behind.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use star_system::SystemPath;

/// Multiple of the active radius beyond which entries are evicted.
pub const SURVIVOR_FACTOR: i32 = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug, Clone)]
pub struct WindowedCache<V> {
    entries: BTreeMap<SystemPath, V>,
    stats: CacheStats,
}

impl<V> Default for WindowedCache<V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            stats: CacheStats::default(),
        }
    }
}

impl<V> WindowedCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, path: &SystemPath) -> bool {
        self.entries.contains_key(path)
    }

    /// Looks up an entry without touching the hit counters.
    pub fn get(&self, path: &SystemPath) -> Option<&V> {
        self.entries.get(path)
    }

    /// Returns the cached entry for `path`, building it with `make` on a miss.
    pub fn get_or_insert_with(&mut self, path: SystemPath, make: impl FnOnce() -> V) -> &V {
        match self.entries.entry(path) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                self.stats.misses += 1;
                entry.insert(make())
            }
        }
    }

    /// Like [`get_or_insert_with`](Self::get_or_insert_with) for builders that
    /// can fail; nothing is cached when `make` returns `None`.
    pub fn get_or_try_insert_with(
        &mut self,
        path: SystemPath,
        make: impl FnOnce() -> Option<V>,
    ) -> Option<&V> {
        match self.entries.entry(path) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                Some(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                self.stats.misses += 1;
                let value: &V = entry.insert(make()?);
                Some(value)
            }
        }
    }

    /// Drops every entry whose sector lies more than `radius` sectors from
    /// `centre` (Chebyshev distance). Returns the number evicted.
    pub fn evict_outside(&mut self, centre: &SystemPath, radius: i32) -> usize {
        let before = self.entries.len();
        self.entries.retain(|path, _| path.sector_distance(centre) <= radius);
        before - self.entries.len()
    }

    pub fn paths(&self) -> impl Iterator<Item = &SystemPath> {
        self.entries.keys()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Sector paths in the cube of half-width `radius` around `centre`'s sector,
/// ordered by Euclidean distance from the centre, ties broken by path order.
///
/// # Examples
///
/// ```
/// use galaxy::window_nearest_first;
/// use star_system::SystemPath;
///
/// let window = window_nearest_first(&SystemPath::system(5, 5, 5, 3), 1);
/// assert_eq!(window.len(), 27);
/// assert_eq!(window[0], SystemPath::sector(5, 5, 5));
/// assert_eq!(window[1], SystemPath::sector(4, 5, 5));
/// ```
pub fn window_nearest_first(centre: &SystemPath, radius: i32) -> Vec<SystemPath> {
    let (cx, cy, cz) = centre.sector_coords();
    let radius = radius.max(0);
    let side = (2 * radius + 1) as usize;

    let mut sectors = Vec::with_capacity(side * side * side);
    for dx in -radius..=radius {
        for dy in -radius..=radius {
            for dz in -radius..=radius {
                sectors.push(SystemPath::sector(cx + dx, cy + dy, cz + dz));
            }
        }
    }

    sectors.sort_by_key(|path| {
        let (x, y, z) = path.sector_coords();
        let d2 = [x - cx, y - cy, z - cz]
            .iter()
            .map(|d| i64::from(*d).pow(2))
            .sum::<i64>();
        (d2, *path)
    });
    sectors
}
