use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Mass of the Sun in kilograms (1.98892 × 10³⁰ kg)
pub const SOLAR_MASS_KG: f64 = 1.98892e30;

/// Mass of the Earth in kilograms (5.9742 × 10²⁴ kg)
pub const EARTH_MASS_KG: f64 = 5.9742e24;

/// Earth masses per solar mass, rounded the way body generation uses it.
pub const SUN_MASS_TO_EARTH_MASS: i64 = 332_998;

/// A physical mass quantity using f64 precision.
///
/// The `Mass` struct represents mass values with solar masses as the base unit.
/// Stars and grav-points carry their generated mass in solar masses, planets and
/// moons in Earth masses, and the runtime needs kilograms; `Mass` converts between all three.
///
/// # Examples
///
/// ```rust
/// use units::Mass;
///
/// let sun_mass = Mass::from_solar_masses(1.0);
/// let earth_mass = Mass::from_earth_masses(1.0);
///
/// let earth_in_solar = earth_mass.to_solar_masses();
/// let sun_in_kg = sun_mass.to_kg();
/// assert!(earth_in_solar < 1e-5);
/// assert!(sun_in_kg > 1e30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Mass(f64); // Base unit: Solar Masses

impl Mass {
    /// Creates a zero mass value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Mass` from a value in solar masses.
    ///
    /// This is the most direct constructor since solar masses are the base unit.
    ///
    /// # Arguments
    ///
    /// * `value` - The mass value in solar masses
    pub fn from_solar_masses(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Mass` from a value in Earth masses.
    ///
    /// # Arguments
    ///
    /// * `value` - The mass value in Earth masses
    ///
    /// # Examples
    ///
    /// ```rust
    /// use units::Mass;
    ///
    /// let jupiter = Mass::from_earth_masses(317.8);
    /// assert!((jupiter.to_earth_masses() - 317.8).abs() < 1e-9);
    /// ```
    pub fn from_earth_masses(value: f64) -> Self {
        Self(value * EARTH_MASS_KG / SOLAR_MASS_KG)
    }

    /// Creates a new `Mass` from a value in kilograms.
    pub fn from_kg(value: f64) -> Self {
        Self(value / SOLAR_MASS_KG)
    }

    /// Returns the mass value in solar masses.
    pub fn to_solar_masses(&self) -> f64 {
        self.0
    }

    /// Converts the mass to Earth masses.
    pub fn to_earth_masses(&self) -> f64 {
        self.0 * SOLAR_MASS_KG / EARTH_MASS_KG
    }

    /// Converts the mass to kilograms.
    pub fn to_kg(&self) -> f64 {
        self.0 * SOLAR_MASS_KG
    }
}

impl Add for Mass {
    type Output = Mass;

    fn add(self, rhs: Mass) -> Mass {
        Mass(self.0 + rhs.0)
    }
}

impl Sub for Mass {
    type Output = Mass;

    fn sub(self, rhs: Mass) -> Mass {
        Mass(self.0 - rhs.0)
    }
}

impl Mul<f64> for Mass {
    type Output = Mass;

    fn mul(self, rhs: f64) -> Mass {
        Mass(self.0 * rhs)
    }
}

impl Div<f64> for Mass {
    type Output = Mass;

    fn div(self, rhs: f64) -> Mass {
        Mass(self.0 / rhs)
    }
}

/// Division of Mass by Mass returns a dimensionless ratio
impl Div for Mass {
    type Output = f64;

    fn div(self, rhs: Mass) -> f64 {
        self.0 / rhs.0
    }
}

/// Allow f64 * Mass (commutative multiplication)
impl Mul<Mass> for f64 {
    type Output = Mass;

    fn mul(self, rhs: Mass) -> Mass {
        rhs * self
    }
}
