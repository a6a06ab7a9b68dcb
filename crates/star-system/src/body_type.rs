//! Body categories and the per-type lookup table.
//!
//! Behaviour that differs between stars, planets and installations dispatches
//! on [`BodyType`] through [`BodyType::super_type`] and the star table rather
//! than through a type hierarchy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a generated body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BodyType {
    Gravpoint,
    BrownDwarf,
    WhiteDwarf,
    StarM,
    StarK,
    StarG,
    StarF,
    StarA,
    StarB,
    StarO,
    PlanetGasGiant,
    PlanetAsteroid,
    PlanetTerrestrial,
    StarportOrbital,
    StarportSurface,
}

/// Coarse grouping used by frame building and unit conversion.
///
/// Ordering matters: everything up to and including `Star` stores mass and
/// radius in solar units, everything after in Earth units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SuperType {
    None,
    Star,
    RockyPlanet,
    GasGiant,
    Starport,
}

/// Generation ranges for one star type.
///
/// Mass and radius are percentages of solar values, temperature is in kelvin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarTypeInfo {
    pub mass: (i32, i32),
    pub radius: (i32, i32),
    pub temp: (i32, i32),
}

/// Star types from coolest to hottest.
pub const STAR_TYPES: [BodyType; 9] = [
    BodyType::BrownDwarf,
    BodyType::WhiteDwarf,
    BodyType::StarM,
    BodyType::StarK,
    BodyType::StarG,
    BodyType::StarF,
    BodyType::StarA,
    BodyType::StarB,
    BodyType::StarO,
];

const STAR_INFO: [StarTypeInfo; 9] = [
    StarTypeInfo {
        mass: (2, 8),
        radius: (10, 30),
        temp: (1000, 2000),
    },
    StarTypeInfo {
        mass: (20, 100),
        radius: (1, 2),
        temp: (4000, 40000),
    },
    StarTypeInfo {
        mass: (10, 47),
        radius: (30, 60),
        temp: (2000, 3500),
    },
    StarTypeInfo {
        mass: (50, 78),
        radius: (60, 100),
        temp: (3500, 5000),
    },
    StarTypeInfo {
        mass: (80, 110),
        radius: (80, 120),
        temp: (5000, 6000),
    },
    StarTypeInfo {
        mass: (115, 170),
        radius: (110, 150),
        temp: (6000, 7500),
    },
    StarTypeInfo {
        mass: (180, 320),
        radius: (120, 220),
        temp: (7500, 10000),
    },
    StarTypeInfo {
        mass: (200, 300),
        radius: (120, 290),
        temp: (10000, 30000),
    },
    StarTypeInfo {
        mass: (300, 400),
        radius: (200, 310),
        temp: (30000, 60000),
    },
];

impl BodyType {
    pub fn super_type(self) -> SuperType {
        match self {
            BodyType::Gravpoint => SuperType::None,
            BodyType::PlanetGasGiant => SuperType::GasGiant,
            BodyType::PlanetAsteroid | BodyType::PlanetTerrestrial => SuperType::RockyPlanet,
            BodyType::StarportOrbital | BodyType::StarportSurface => SuperType::Starport,
            _ => SuperType::Star,
        }
    }

    pub fn is_star(self) -> bool {
        self.super_type() == SuperType::Star
    }

    /// Mass and radius are stored in solar units (stars and grav-points).
    pub fn uses_solar_units(self) -> bool {
        self.super_type() <= SuperType::Star
    }

    /// Position of a star type in [`STAR_TYPES`]; `None` for non-stars.
    pub fn star_index(self) -> Option<usize> {
        STAR_TYPES.iter().position(|t| *t == self)
    }

    /// Star type at `index` in [`STAR_TYPES`], clamped to the table.
    pub fn star_from_index(index: usize) -> BodyType {
        STAR_TYPES[index.min(STAR_TYPES.len() - 1)]
    }

    /// Generation ranges for a star type.
    pub fn star_info(self) -> Option<&'static StarTypeInfo> {
        self.star_index().map(|i| &STAR_INFO[i])
    }

    /// Hot stars are generated as oblate spheroids.
    pub fn is_oblate(self) -> bool {
        matches!(
            self,
            BodyType::StarF | BodyType::StarA | BodyType::StarB | BodyType::StarO
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            BodyType::Gravpoint => "Gravpoint",
            BodyType::BrownDwarf => "Brown dwarf",
            BodyType::WhiteDwarf => "White dwarf",
            BodyType::StarM => "Type 'M' red star",
            BodyType::StarK => "Type 'K' orange star",
            BodyType::StarG => "Type 'G' yellow star",
            BodyType::StarF => "Type 'F' white star",
            BodyType::StarA => "Type 'A' hot white star",
            BodyType::StarB => "Type 'B' hot blue star",
            BodyType::StarO => "Type 'O' hot blue super giant",
            BodyType::PlanetGasGiant => "Gas giant",
            BodyType::PlanetAsteroid => "Asteroid",
            BodyType::PlanetTerrestrial => "Terrestrial planet",
            BodyType::StarportOrbital => "Orbital starport",
            BodyType::StarportSurface => "Starport",
        }
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
