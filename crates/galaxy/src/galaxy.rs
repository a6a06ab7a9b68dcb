use std::sync::Arc;

use nalgebra::Vector3;
use star_system::{StarSystem, SystemPath};
use system_generator::StarSystemGenerator;
use tracing::{debug, warn};
use units::Length;

use crate::cache::{window_nearest_first, CacheStats, WindowedCache, SURVIVOR_FACTOR};
use crate::config::GalaxyConfig;
use crate::sector::{Sector, SectorSystem};

/// What a call to [`Galaxy::refresh_around`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub sectors_evicted: usize,
    pub sectors_generated: usize,
    pub systems_evicted: usize,
    pub systems_generated: usize,
}

/// Sector and system generation behind two windowed caches.
///
/// Sectors and systems are handed out as `Arc`s, so a running simulation keeps
/// its system alive after the cache has moved on.
///
/// # Examples
///
/// ```
/// use galaxy::{Galaxy, GalaxyConfig};
/// use star_system::SystemPath;
/// use std::sync::Arc;
///
/// let mut galaxy = Galaxy::new(GalaxyConfig::default());
/// let path = SystemPath::system(10, -3, 2, 0);
///
/// let first = galaxy.star_system(&path).unwrap();
/// let again = galaxy.star_system(&path).unwrap();
/// assert!(Arc::ptr_eq(&first, &again));
/// assert_eq!(first.path, path);
/// ```
#[derive(Debug)]
pub struct Galaxy {
    config: GalaxyConfig,
    generator: StarSystemGenerator,
    sectors: WindowedCache<Arc<Sector>>,
    systems: WindowedCache<Arc<StarSystem>>,
}

impl Galaxy {
    pub fn new(config: GalaxyConfig) -> Self {
        let generator = StarSystemGenerator::new(config.generator_config());
        Self {
            config,
            generator,
            sectors: WindowedCache::new(),
            systems: WindowedCache::new(),
        }
    }

    pub fn config(&self) -> &GalaxyConfig {
        &self.config
    }

    pub fn generator(&self) -> &StarSystemGenerator {
        &self.generator
    }

    /// The sector containing `path`, generated on first use.
    pub fn sector(&mut self, path: &SystemPath) -> Arc<Sector> {
        cached_sector(&mut self.sectors, &self.config, path)
    }

    /// The sector entry for a system path.
    pub fn sector_system(&mut self, path: &SystemPath) -> Option<SectorSystem> {
        sector_entry(&mut self.sectors, &self.config, path)
    }

    /// The generated body tree for the system at `path`; body indices are
    /// ignored. `None` for sector paths and indices past the sector's list.
    pub fn star_system(&mut self, path: &SystemPath) -> Option<Arc<StarSystem>> {
        let path = path.system_only();
        let Self {
            config,
            generator,
            sectors,
            systems,
        } = self;

        let system = systems.get_or_try_insert_with(path, || {
            let entry = sector_entry(sectors, config, &path)?;
            let system = generator.generate(&entry.descriptor());
            debug!(
                %path,
                name = %system.name,
                stars = entry.num_stars(),
                bodies = system.len(),
                "generated system"
            );
            Some(Arc::new(system))
        })?;
        Some(Arc::clone(system))
    }

    /// Re-centres both caches on `path`: evicts entries beyond the survivor
    /// radius, then fills the active windows nearest-first.
    pub fn refresh_around(&mut self, path: &SystemPath) -> RefreshReport {
        let sector_radius = self.config.sector_radius.max(0);
        let system_radius = self.config.system_radius.max(0);

        let sectors_evicted = self
            .sectors
            .evict_outside(path, SURVIVOR_FACTOR * sector_radius);
        let systems_evicted = self
            .systems
            .evict_outside(path, SURVIVOR_FACTOR * system_radius);

        let sectors_before = self.sectors.len();
        for sector in window_nearest_first(path, sector_radius) {
            self.sector(&sector);
        }

        let systems_before = self.systems.len();
        for sector_path in window_nearest_first(path, system_radius) {
            let sector = self.sector(&sector_path);
            for system in &sector.systems {
                self.star_system(&system.path);
            }
        }

        let report = RefreshReport {
            sectors_evicted,
            sectors_generated: self.sectors.len().saturating_sub(sectors_before),
            systems_evicted,
            systems_generated: self.systems.len().saturating_sub(systems_before),
        };
        debug!(
            centre = %path,
            sectors = self.sectors.len(),
            systems = self.systems.len(),
            ?report,
            "refreshed galaxy caches"
        );
        report
    }

    /// Galactic position of a system, in light years.
    pub fn system_position(&mut self, path: &SystemPath) -> Option<Vector3<f64>> {
        self.sector_system(path).map(|system| system.galactic_position())
    }

    /// Straight-line distance between two systems.
    pub fn distance_between(&mut self, a: &SystemPath, b: &SystemPath) -> Option<Length> {
        let a = self.sector_system(a)?;
        let b = self.sector_system(b)?;
        Some(a.distance_to(&b))
    }

    /// Source and destination positions for a jump, in light years, as the
    /// hyperspace arrival computation expects them.
    pub fn jump_vector(
        &mut self,
        source: &SystemPath,
        dest: &SystemPath,
    ) -> Option<(Vector3<f64>, Vector3<f64>)> {
        Some((self.system_position(source)?, self.system_position(dest)?))
    }

    pub fn cached_sectors(&self) -> usize {
        self.sectors.len()
    }

    pub fn cached_systems(&self) -> usize {
        self.systems.len()
    }

    pub fn is_sector_cached(&self, path: &SystemPath) -> bool {
        self.sectors.contains(&path.sector_only())
    }

    pub fn is_system_cached(&self, path: &SystemPath) -> bool {
        self.systems.contains(&path.system_only())
    }

    pub fn sector_stats(&self) -> CacheStats {
        self.sectors.stats()
    }

    pub fn system_stats(&self) -> CacheStats {
        self.systems.stats()
    }

    /// Drops every cached sector and system.
    pub fn clear(&mut self) {
        self.sectors.clear();
        self.systems.clear();
    }
}

fn cached_sector(
    sectors: &mut WindowedCache<Arc<Sector>>,
    config: &GalaxyConfig,
    path: &SystemPath,
) -> Arc<Sector> {
    let sector =
        sectors.get_or_insert_with(path.sector_only(), || Arc::new(Sector::generate(path, config)));
    Arc::clone(sector)
}

fn sector_entry(
    sectors: &mut WindowedCache<Arc<Sector>>,
    config: &GalaxyConfig,
    path: &SystemPath,
) -> Option<SectorSystem> {
    let index = path.system_index?;
    let sector = cached_sector(sectors, config, path);
    let entry = sector.system(index).cloned();
    if entry.is_none() {
        warn!(%path, systems = sector.len(), "system index out of range");
    }
    entry
}
