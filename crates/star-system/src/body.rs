//! A single node of the generated body tree.

use serde::{Deserialize, Serialize};
use units::{Fixed, Length, Mass, AU, G};

use crate::body_type::{BodyType, SuperType};
use crate::orbit::Orbit;
use crate::path::SystemPath;

/// Index of a body in its [`StarSystem`](crate::StarSystem) arena.
///
/// After the system is finalized this equals the body's pre-order position,
/// which is also its [`SystemPath`] body index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SystemBodyId(pub u32);

impl SystemBodyId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Generation-time description of a star, planet, moon or installation.
///
/// Mass and radius are fixed-point values in solar units for stars and
/// grav-points and in Earth units for everything else; use [`SystemBody::mass`]
/// and [`SystemBody::radius`] to get unit-carrying values. Orbital distances
/// (`semi_major_axis`, `orb_min`, `orb_max`) are in AU, angles in radians and
/// `rotation_period` in days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemBody {
    pub id: SystemBodyId,
    pub parent: Option<SystemBodyId>,
    pub children: Vec<SystemBodyId>,
    pub path: SystemPath,
    pub name: String,
    pub body_type: BodyType,
    pub seed: u32,
    pub mass: Fixed,
    pub radius: Fixed,
    pub aspect_ratio: Fixed,
    pub average_temp: i32,
    pub semi_major_axis: Fixed,
    pub eccentricity: Fixed,
    pub orbital_offset: Fixed,
    pub orbital_phase_at_start: Fixed,
    pub axial_tilt: Fixed,
    pub inclination: Fixed,
    pub rotation_period: Fixed,
    pub rotational_phase_at_start: Fixed,
    pub orb_min: Fixed,
    pub orb_max: Fixed,
    pub orbit: Orbit,
    /// Hand-authored body; placement keeps its authored position when possible.
    pub is_custom: bool,
}

impl SystemBody {
    pub fn new(id: SystemBodyId, name: impl Into<String>, body_type: BodyType) -> Self {
        Self {
            id,
            parent: None,
            children: Vec::new(),
            path: SystemPath::default(),
            name: name.into(),
            body_type,
            seed: 0,
            mass: Fixed::ZERO,
            radius: Fixed::ZERO,
            aspect_ratio: Fixed::ONE,
            average_temp: 0,
            semi_major_axis: Fixed::ZERO,
            eccentricity: Fixed::ZERO,
            orbital_offset: Fixed::ZERO,
            orbital_phase_at_start: Fixed::ZERO,
            axial_tilt: Fixed::ZERO,
            inclination: Fixed::ZERO,
            rotation_period: Fixed::ZERO,
            rotational_phase_at_start: Fixed::ZERO,
            orb_min: Fixed::ZERO,
            orb_max: Fixed::ZERO,
            orbit: Orbit::default(),
            is_custom: false,
        }
    }

    pub fn super_type(&self) -> SuperType {
        self.body_type.super_type()
    }

    pub fn is_star(&self) -> bool {
        self.body_type.is_star()
    }

    pub fn is_gravpoint(&self) -> bool {
        self.body_type == BodyType::Gravpoint
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn mass(&self) -> Mass {
        if self.body_type.uses_solar_units() {
            Mass::from_solar_masses(self.mass.to_f64())
        } else {
            Mass::from_earth_masses(self.mass.to_f64())
        }
    }

    pub fn radius(&self) -> Length {
        if self.body_type.uses_solar_units() {
            Length::from_solar_radii(self.radius.to_f64())
        } else {
            Length::from_earth_radii(self.radius.to_f64())
        }
    }

    /// Mass in kilograms.
    pub fn mass_kg(&self) -> f64 {
        self.mass().to_kg()
    }

    /// Physical radius in meters.
    pub fn radius_m(&self) -> f64 {
        self.radius().to_meters()
    }

    /// Standard gravitational parameter `G·M` in m³/s².
    pub fn gm(&self) -> f64 {
        G * self.mass_kg()
    }

    pub fn semi_major_axis_m(&self) -> f64 {
        self.semi_major_axis.to_f64() * AU
    }

    /// Closest approach to the parent, in meters.
    pub fn orb_min_m(&self) -> f64 {
        self.orb_min.to_f64() * AU
    }

    /// Farthest distance from the parent, in meters.
    pub fn orb_max_m(&self) -> f64 {
        self.orb_max.to_f64() * AU
    }

    /// Rotation period in seconds; zero for non-rotating bodies.
    pub fn rotation_period_s(&self) -> f64 {
        self.rotation_period.to_f64() * units::DAY_SECONDS
    }
}
