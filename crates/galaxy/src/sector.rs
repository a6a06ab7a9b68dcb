//! Procedural sector contents.
//!
//! A sector's random source is seeded from `(x, y, z, universe seed)` and
//! consumed in a fixed order per system: star count, position, primary type,
//! companion types, name, seed. Reordering any draw changes every sector.

use nalgebra::Vector3;
use seeded_random::Random;
use serde::{Deserialize, Serialize};
use star_system::{BodyType, SystemPath};
use system_generator::SystemDescriptor;
use units::Length;

use crate::config::GalaxyConfig;

/// Edge length of a sector cube, in light years.
pub const SECTOR_SIZE_LY: f64 = 8.0;

const NAME_FRAGMENTS: [&str; 32] = [
    "en", "la", "can", "be", "and", "phi", "eth", "ol", "ve", "ho", "a", "lia", "an", "ar", "ur",
    "mi", "in", "ti", "qu", "so", "ed", "ess", "ex", "io", "ce", "ze", "fa", "ay", "wa", "da",
    "ack", "gre",
];

/// One system listed in a sector, before its body tree is generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorSystem {
    pub path: SystemPath,
    pub name: String,
    /// Position inside the sector cube, in light years, each axis in `[0, 8)`.
    pub position: Vector3<f64>,
    /// Primary first; companions are never hotter than the primary.
    pub star_types: Vec<BodyType>,
    pub seed: u32,
}

impl SectorSystem {
    pub fn num_stars(&self) -> usize {
        self.star_types.len()
    }

    /// Position relative to the galactic origin, in light years.
    pub fn galactic_position(&self) -> Vector3<f64> {
        let (x, y, z) = self.path.sector_coords();
        Vector3::new(x as f64, y as f64, z as f64) * SECTOR_SIZE_LY + self.position
    }

    /// Straight-line distance between two systems.
    pub fn distance_to(&self, other: &SectorSystem) -> Length {
        Length::from_light_years((self.galactic_position() - other.galactic_position()).norm())
    }

    /// What the system generator needs to build this system's body tree.
    pub fn descriptor(&self) -> SystemDescriptor {
        SystemDescriptor {
            path: self.path,
            name: self.name.clone(),
            seed: self.seed,
            star_types: self.star_types.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub path: SystemPath,
    pub systems: Vec<SectorSystem>,
}

impl Sector {
    /// Generates the sector containing `path`. System and body indices on
    /// `path` are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use galaxy::{GalaxyConfig, Sector};
    /// use star_system::SystemPath;
    ///
    /// let config = GalaxyConfig::default();
    /// let a = Sector::generate(&SystemPath::sector(3, 0, -1), &config);
    /// let b = Sector::generate(&SystemPath::system(3, 0, -1, 2), &config);
    /// assert_eq!(a, b);
    /// assert!((4..=20).contains(&a.systems.len()));
    /// ```
    pub fn generate(path: &SystemPath, config: &GalaxyConfig) -> Sector {
        let (sx, sy, sz) = path.sector_coords();
        let mut rng = Random::new(&[sx as u32, sy as u32, sz as u32, config.universe_seed]);

        let count = rng.int32_range(config.min_systems, config.max_systems).max(0) as u32;
        let systems = (0..count)
            .map(|index| make_system(SystemPath::system(sx, sy, sz, index), &mut rng))
            .collect();

        Sector {
            path: path.sector_only(),
            systems,
        }
    }

    pub fn system(&self, index: u32) -> Option<&SectorSystem> {
        self.systems.get(index as usize)
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}

fn make_system(path: SystemPath, rng: &mut Random) -> SectorSystem {
    let num_stars = match rng.int32_below(15) {
        0 => 4,
        1 | 2 => 3,
        3..=6 => 2,
        _ => 1,
    };

    let position = Vector3::new(
        rng.double_max(SECTOR_SIZE_LY),
        rng.double_max(SECTOR_SIZE_LY),
        rng.double_max(SECTOR_SIZE_LY),
    );

    let primary = primary_star_type(rng.int32_below(1_000_000));
    let mut star_types = vec![primary];
    if num_stars > 1 {
        star_types.push(companion_of(primary, rng));
        if num_stars > 2 {
            let third = companion_of(primary, rng);
            star_types.push(third);
            star_types.push(companion_of(third, rng));
        }
    }
    // Triples draw a fourth type too, keeping the stream aligned with quadruples.
    star_types.truncate(num_stars);

    let name = system_name(&path, primary, rng);
    let seed = rng.int32();

    SectorSystem {
        path,
        name,
        position,
        star_types,
        seed,
    }
}

/// Primary star type for a draw in `[0, 1_000_000)`.
pub fn primary_star_type(weight: u32) -> BodyType {
    match weight {
        0..=99 => BodyType::StarO,
        100..=1_299 => BodyType::StarB,
        1_300..=7_299 => BodyType::StarA,
        7_300..=37_299 => BodyType::StarF,
        37_300..=113_299 => BodyType::StarG,
        113_300..=234_299 => BodyType::StarK,
        234_300..=249_999 => BodyType::WhiteDwarf,
        250_000..=899_999 => BodyType::StarM,
        _ => BodyType::BrownDwarf,
    }
}

fn companion_of(star: BodyType, rng: &mut Random) -> BodyType {
    let ceiling = star.star_index().unwrap_or(0) as i32;
    BodyType::star_from_index(rng.int32_range(0, ceiling) as usize)
}

/// Catalogue or proper name. Hot, bright primaries near the core usually get a
/// proper name; faint stars far out mostly end up with survey numbers.
fn system_name(path: &SystemPath, primary: BodyType, rng: &mut Random) -> String {
    let (sx, sy, sz) = path.sector_coords();
    let dist = sx.unsigned_abs().max(sy.unsigned_abs()).max(sz.unsigned_abs());

    let spread = match primary {
        BodyType::StarO | BodyType::StarB => 0,
        BodyType::StarA => 1,
        BodyType::StarF => 2,
        BodyType::StarG => 4,
        BodyType::StarK => 8,
        _ => 16,
    };
    let chance = dist.saturating_mul(spread).saturating_add(100);

    match rng.int32_below(chance) {
        0..=499 => {
            let fragments = rng.int32_range(2, 3);
            let last = NAME_FRAGMENTS.len() as i32 - 1;
            let name: String = (0..fragments)
                .map(|_| NAME_FRAGMENTS[rng.int32_range(0, last) as usize])
                .collect();
            capitalize(&name)
        }
        500..=799 => format!("MJBN {}{:+}{:+}", rng.int32_range(10, 999), sx, sy),
        800..=1_199 => format!("SC {}{:+}{:+}", rng.int32_range(1000, 9999), sx, sy),
        _ => format!("DSC {}{:+}{:+}", rng.int32_range(1000, 9999), sx, sy),
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

