//! Physical bodies living in a [`Space`](crate::Space).

use nalgebra::{Matrix3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};
use star_system::SystemBodyId;

use crate::frame::FrameId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

impl BodyId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a body is, for queries such as "nearest starport".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    Star,
    Planet,
    Starport,
    Ship,
    Cargo,
}

/// Linear and angular state of a freely moving body, SI units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dynamics {
    pub velocity: Vector3<f64>,
    pub angular_velocity: Vector3<f64>,
    /// kg
    pub mass: f64,
    /// kg·m²
    pub angular_inertia: f64,
    /// Force applied during the next integration step, N. Cleared afterwards.
    pub force: Vector3<f64>,
}

impl Dynamics {
    /// A solid sphere of `mass` and `radius` at rest.
    pub fn sphere(mass: f64, radius: f64) -> Self {
        Self {
            velocity: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
            mass,
            angular_inertia: 0.4 * mass * radius * radius,
            force: Vector3::zeros(),
        }
    }

    pub fn inv_mass(&self) -> f64 {
        if self.mass > 0.0 {
            1.0 / self.mass
        } else {
            0.0
        }
    }

    pub fn inv_angular_inertia(&self) -> f64 {
        if self.angular_inertia > 0.0 {
            1.0 / self.angular_inertia
        } else {
            0.0
        }
    }

    pub fn momentum(&self) -> Vector3<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }
}

/// How a body's position changes over time.
///
/// A body is either carried by its frame along an orbit, fixed inside its
/// frame, or integrated; never more than one of these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// Sits at the origin of a frame that follows an orbit rail.
    Rail,
    /// Fixed inside its frame, e.g. a starport on a planet's surface.
    Fixed,
    Dynamic(Dynamics),
}

/// Bounding sphere used for contacts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionGeom {
    pub radius: f64,
}

/// A body in normal space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub label: String,
    pub kind: BodyKind,
    /// Owning frame; `None` once detached.
    pub frame: Option<FrameId>,
    /// Position in the owning frame, meters.
    pub position: Vector3<f64>,
    pub orientation: Matrix3<f64>,
    pub motion: Motion,
    pub geom: CollisionGeom,
    /// Descriptor the body was generated from.
    pub system_body: Option<SystemBodyId>,
    /// Set for the body higher-level code must keep alive after death.
    pub is_player: bool,
    /// Held by another subsystem (for instance a hyperspace transit) and
    /// saved by it rather than with the space.
    pub in_transit: bool,
    dead: bool,
}

impl Body {
    /// A body at the origin with identity orientation. The id is assigned when
    /// it is added to a space.
    pub fn new(label: impl Into<String>, kind: BodyKind, motion: Motion, radius: f64) -> Self {
        Self {
            id: BodyId(0),
            label: label.into(),
            kind,
            frame: None,
            position: Vector3::zeros(),
            orientation: Matrix3::identity(),
            motion,
            geom: CollisionGeom { radius },
            system_body: None,
            is_player: false,
            in_transit: false,
            dead: false,
        }
    }

    /// A freely moving sphere placed in `frame` at `position`.
    pub fn dynamic(
        label: impl Into<String>,
        kind: BodyKind,
        mass: f64,
        radius: f64,
        frame: FrameId,
        position: Vector3<f64>,
    ) -> Self {
        let motion = Motion::Dynamic(Dynamics::sphere(mass, radius));
        let mut body = Self::new(label, kind, motion, radius);
        body.frame = Some(frame);
        body.position = position;
        body
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub(crate) fn mark_dead(&mut self) {
        self.dead = true;
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self.motion, Motion::Dynamic(_))
    }

    pub fn dynamics(&self) -> Option<&Dynamics> {
        match &self.motion {
            Motion::Dynamic(d) => Some(d),
            _ => None,
        }
    }

    pub fn dynamics_mut(&mut self) -> Option<&mut Dynamics> {
        match &mut self.motion {
            Motion::Dynamic(d) => Some(d),
            _ => None,
        }
    }

    /// Velocity inside the owning frame; zero unless dynamic.
    pub fn velocity(&self) -> Vector3<f64> {
        self.dynamics().map_or_else(Vector3::zeros, |d| d.velocity)
    }

    pub fn set_velocity(&mut self, velocity: Vector3<f64>) {
        if let Some(d) = self.dynamics_mut() {
            d.velocity = velocity;
        }
    }

    pub fn apply_force(&mut self, force: Vector3<f64>) {
        if let Some(d) = self.dynamics_mut() {
            d.force += force;
        }
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.position - other.position).norm()
    }

    /// One semi-implicit Euler step with extra acceleration `accel`.
    pub(crate) fn integrate(&mut self, accel: Vector3<f64>, step: f64) {
        let Motion::Dynamic(d) = &mut self.motion else {
            return;
        };
        d.velocity += (accel + d.force * d.inv_mass()) * step;
        d.force = Vector3::zeros();
        self.position += d.velocity * step;

        let spin = d.angular_velocity * step;
        if spin.norm_squared() > 0.0 {
            let rotation = Rotation3::new(spin);
            self.orientation = rotation.matrix() * self.orientation;
        }
    }
}

/// Per-tick autonomous behaviour for one body (autopilot, thrust schedule).
pub trait BodyController {
    fn update(&mut self, body: &mut Body, step: f64);
}
