//! Planet classification seam.

use seeded_random::Random;
use star_system::{BodyType, SystemBody};
use units::Fixed;

/// Heating context for a freshly placed planet or moon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StellarHeating {
    /// Radius of the nearest star, meters.
    pub star_radius_m: f64,
    /// Surface temperature of the nearest star, kelvin.
    pub star_temp: i32,
    /// Mean distance from that star, meters.
    pub mean_distance_m: f64,
}

impl StellarHeating {
    /// Blackbody equilibrium temperature with the given albedo.
    pub fn equilibrium_temp(&self, albedo: f64) -> i32 {
        if self.mean_distance_m <= 0.0 {
            return self.star_temp;
        }
        let t = self.star_temp as f64
            * (self.star_radius_m / (2.0 * self.mean_distance_m)).sqrt()
            * (1.0 - albedo).powf(0.25);
        t.round() as i32
    }
}

/// Assigns a category and physical attributes to a placed planet or moon.
///
/// Runs once per body right after its orbit and mass are fixed. Any random
/// draws it makes become part of the generation sequence.
pub trait PlanetClassifier {
    fn classify(&self, body: &mut SystemBody, heating: &StellarHeating, rng: &mut Random);
}

/// Classifies by mass alone and derives radius from it. Draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct MassClassifier;

impl MassClassifier {
    /// Above this many Earth masses a body keeps its gas envelope.
    pub const GAS_GIANT_MASS: Fixed = Fixed::from_int(6);

    /// Radius floor of roughly ten kilometres, in Earth radii.
    pub const MIN_RADIUS: Fixed = Fixed::ratio(1, 630);

    /// Below this many Earth masses a body is an asteroid.
    pub const ASTEROID_MASS: Fixed = Fixed::ratio(1, 15_000);
}

impl PlanetClassifier for MassClassifier {
    fn classify(&self, body: &mut SystemBody, heating: &StellarHeating, _rng: &mut Random) {
        body.radius = body.mass.cbrt().max(Self::MIN_RADIUS);
        body.average_temp = heating.equilibrium_temp(0.0);
        body.body_type = if body.mass > Self::GAS_GIANT_MASS {
            BodyType::PlanetGasGiant
        } else if body.mass < Self::ASTEROID_MASS {
            BodyType::PlanetAsteroid
        } else {
            BodyType::PlanetTerrestrial
        };
    }
}
