//! Keplerian orbits in SI units.

use nalgebra::{Matrix3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use units::G;

/// An elliptical orbit around a primary or a barycentre.
///
/// Lengths are meters, times are seconds. The orbital plane is a rotation
/// applied to the canonical ellipse lying in the XY plane with periapsis on
/// the negative X axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orbit {
    pub eccentricity: f64,
    pub semi_major_axis: f64,
    pub orbital_phase_at_start: f64,
    pub velocity_area_per_second: f64,
    pub period: f64,
    pub plane: Matrix3<f64>,
}

impl Default for Orbit {
    fn default() -> Self {
        Self {
            eccentricity: 0.0,
            semi_major_axis: 0.0,
            orbital_phase_at_start: 0.0,
            velocity_area_per_second: 0.0,
            period: 0.0,
            plane: Matrix3::identity(),
        }
    }
}

fn ellipse_area(semi_major_axis: f64, eccentricity: f64) -> f64 {
    PI * semi_major_axis * semi_major_axis * (1.0 - eccentricity * eccentricity).sqrt()
}

impl Orbit {
    /// Orbit of a body around a primary of `central_mass` kilograms.
    pub fn around_primary(
        semi_major_axis: f64,
        eccentricity: f64,
        central_mass: f64,
        plane: Matrix3<f64>,
        phase: f64,
    ) -> Self {
        let period = if central_mass > 0.0 {
            2.0 * PI * (semi_major_axis.powi(3) / (G * central_mass)).sqrt()
        } else {
            0.0
        };
        Self::with_period(semi_major_axis, eccentricity, period, plane, phase)
    }

    /// Orbit of one member of a pair around their barycentre.
    ///
    /// `semi_major_axis` is this body's share of the separation; `total_mass`
    /// and `body_mass` are kilograms.
    pub fn around_barycentre(
        semi_major_axis: f64,
        eccentricity: f64,
        total_mass: f64,
        body_mass: f64,
        plane: Matrix3<f64>,
        phase: f64,
    ) -> Self {
        let other = total_mass - body_mass;
        let period = if other > 0.0 {
            let separation = semi_major_axis * total_mass / other;
            2.0 * PI * (separation.powi(3) / (G * total_mass)).sqrt()
        } else {
            0.0
        };
        Self::with_period(semi_major_axis, eccentricity, period, plane, phase)
    }

    fn with_period(
        semi_major_axis: f64,
        eccentricity: f64,
        period: f64,
        plane: Matrix3<f64>,
        phase: f64,
    ) -> Self {
        let velocity_area_per_second = if period > 0.0 {
            ellipse_area(semi_major_axis, eccentricity) / period
        } else {
            0.0
        };
        Self {
            eccentricity,
            semi_major_axis,
            orbital_phase_at_start: phase,
            velocity_area_per_second,
            period,
            plane,
        }
    }

    /// True when the orbit describes motion at all.
    pub fn is_valid(&self) -> bool {
        self.period > 0.0 && self.semi_major_axis > 0.0
    }

    pub fn mean_anomaly_at(&self, t: f64) -> f64 {
        if self.period <= 0.0 {
            return self.orbital_phase_at_start;
        }
        2.0 * PI * t / self.period + self.orbital_phase_at_start
    }

    /// Position relative to the focus at time `t`.
    pub fn position_at(&self, t: f64) -> Vector3<f64> {
        if !self.is_valid() {
            return Vector3::zeros();
        }
        let e = self.eccentricity;
        let ecc_anomaly = solve_kepler(self.mean_anomaly_at(t), e);
        let (sin_e, cos_e) = ecc_anomaly.sin_cos();
        let denom = 1.0 - e * cos_e;
        let cos_v = (cos_e - e) / denom;
        let sin_v = (1.0 - e * e).sqrt() * sin_e / denom;
        let r = self.semi_major_axis * denom;
        self.plane * Vector3::new(-cos_v * r, sin_v * r, 0.0)
    }

    /// Velocity at time `t`, by one-second difference.
    pub fn velocity_at(&self, t: f64) -> Vector3<f64> {
        self.position_at(t + 1.0) - self.position_at(t)
    }

    pub fn periapsis(&self) -> Vector3<f64> {
        self.plane * Vector3::new(-self.semi_major_axis * (1.0 - self.eccentricity), 0.0, 0.0)
    }

    pub fn apoapsis(&self) -> Vector3<f64> {
        self.plane * Vector3::new(self.semi_major_axis * (1.0 + self.eccentricity), 0.0, 0.0)
    }
}

/// Solves `M = E - e sin(E)` for the eccentric anomaly by Newton-Raphson.
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let mut ecc_anomaly = mean_anomaly + eccentricity * mean_anomaly.sin();

    for _ in 0..10 {
        let f = ecc_anomaly - eccentricity * ecc_anomaly.sin() - mean_anomaly;
        let f_prime = 1.0 - eccentricity * ecc_anomaly.cos();
        let delta = f / f_prime;
        ecc_anomaly -= delta;
        if delta.abs() < 1e-10 {
            break;
        }
    }

    ecc_anomaly
}

/// Rotation about the X axis.
pub fn rotate_x(angle: f64) -> Matrix3<f64> {
    Rotation3::from_axis_angle(&Vector3::x_axis(), angle).into_inner()
}

/// Rotation about the Y axis.
pub fn rotate_y(angle: f64) -> Matrix3<f64> {
    Rotation3::from_axis_angle(&Vector3::y_axis(), angle).into_inner()
}

/// Rotation about the Z axis.
pub fn rotate_z(angle: f64) -> Matrix3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), angle).into_inner()
}
