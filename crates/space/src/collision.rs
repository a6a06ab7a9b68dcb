//! Contact detection and impulse response
//!
//! Contacts are found between bodies sharing a frame (bounding spheres) and
//! between dynamic bodies and the terrain of the planet whose rotating frame
//! they are in. Responses follow the classic impulse formulation with a single
//! restitution coefficient:
//!
//! - dynamic vs dynamic: both bodies receive equal and opposite impulses,
//!   nothing happens if they are already separating
//! - dynamic vs static: only the mover is affected, and it is additionally
//!   pushed out along the normal by a correction proportional to the tick
//!   length, so deep penetrations resolve over several ticks

use nalgebra::Vector3;

use crate::body::{Body, BodyKind, Dynamics};
use crate::config::SpaceConfig;
use crate::terrain::Terrain;
use crate::BodyId;

/// A detected contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Contact point in the shared frame, meters.
    pub position: Vector3<f64>,
    /// Unit normal pointing from `b` (or the terrain) toward `a`.
    pub normal: Vector3<f64>,
    /// Penetration depth, meters.
    pub depth: f64,
    /// Always a dynamic body.
    pub a: BodyId,
    /// `None` for terrain.
    pub b: Option<BodyId>,
}

/// Outcome of a dynamic-vs-static response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticResponse {
    /// Impulse magnitude along the normal, N·s; zero if already separating.
    pub impulse: f64,
    /// Distance the mover was pushed out along the normal, meters.
    pub correction: f64,
    /// Closing speed before the response, m/s.
    pub closing_speed: f64,
}

fn takes_part(body: &Body) -> bool {
    // planets collide through their terrain instead
    !body.is_dead() && !body.in_transit && body.frame.is_some() && body.kind != BodyKind::Planet
}

/// All overlapping bounding-sphere pairs that share a frame and include at
/// least one dynamic body. The dynamic body is always `a`.
pub fn detect_contacts(bodies: &[Body]) -> Vec<Contact> {
    let mut contacts = Vec::new();
    for (i, first) in bodies.iter().enumerate() {
        if !takes_part(first) {
            continue;
        }
        for second in &bodies[i + 1..] {
            if !takes_part(second) || first.frame != second.frame {
                continue;
            }
            let (a, b) = match (first.is_dynamic(), second.is_dynamic()) {
                (true, _) => (first, second),
                (false, true) => (second, first),
                (false, false) => continue,
            };
            if let Some(contact) = sphere_contact(a, b) {
                contacts.push(contact);
            }
        }
    }
    contacts
}

fn sphere_contact(a: &Body, b: &Body) -> Option<Contact> {
    let offset = a.position - b.position;
    let distance = offset.norm();
    let depth = a.geom.radius + b.geom.radius - distance;
    if depth <= 0.0 {
        return None;
    }
    let normal = if distance > 0.0 {
        offset / distance
    } else {
        Vector3::y()
    };
    Some(Contact {
        position: b.position + normal * b.geom.radius,
        normal,
        depth,
        a: a.id,
        b: Some(b.id),
    })
}

/// Contact between a dynamic body's lowest point and the terrain below it.
///
/// `body.position` is in the terrain's rotating frame.
pub fn terrain_contact(body: &Body, terrain: &dyn Terrain) -> Option<Contact> {
    let distance = body.position.norm();
    if distance <= 0.0 {
        return None;
    }
    let up = body.position / distance;
    let ground = terrain.height(&up);
    let altitude = distance - body.geom.radius;
    if altitude >= ground {
        return None;
    }
    Some(Contact {
        position: up * ground,
        normal: up,
        depth: ground - altitude,
        a: body.id,
        b: None,
    })
}

fn angular_term(hit: &Vector3<f64>, normal: &Vector3<f64>, inv_inertia: f64) -> f64 {
    normal.dot(&(hit.cross(normal) * inv_inertia).cross(hit))
}

fn snap_to_rest(d: &mut Dynamics, rest: f64) {
    if d.velocity.norm() < rest {
        d.velocity = Vector3::zeros();
    }
    if d.angular_velocity.norm() < rest {
        d.angular_velocity = Vector3::zeros();
    }
}

/// Resolves a contact between two dynamic bodies.
///
/// Returns the closing speed if an impulse was applied, `None` if the bodies
/// were separating or either is not dynamic.
pub fn resolve_pair(
    a: &mut Body,
    b: &mut Body,
    contact: &Contact,
    config: &SpaceConfig,
) -> Option<f64> {
    let hit_a = contact.position - a.position;
    let hit_b = contact.position - b.position;
    let (Some(da), Some(db)) = (a.dynamics_mut(), b.dynamics_mut()) else {
        return None;
    };
    let n = contact.normal;

    let hit_vel_a = da.velocity + da.angular_velocity.cross(&hit_a);
    let hit_vel_b = db.velocity + db.angular_velocity.cross(&hit_b);
    let rel_vel = (hit_vel_a - hit_vel_b).dot(&n);
    if rel_vel > 0.0 {
        return None;
    }

    let denominator = da.inv_mass()
        + db.inv_mass()
        + angular_term(&hit_a, &n, da.inv_angular_inertia())
        + angular_term(&hit_b, &n, db.inv_angular_inertia());
    if denominator <= 0.0 {
        return None;
    }
    let j = -(1.0 + config.restitution) * rel_vel / denominator;
    let impulse = n * j;

    da.velocity += impulse * da.inv_mass();
    da.angular_velocity += hit_a.cross(&impulse) * da.inv_angular_inertia();
    db.velocity -= impulse * db.inv_mass();
    db.angular_velocity -= hit_b.cross(&impulse) * db.inv_angular_inertia();

    snap_to_rest(da, config.rest_velocity);
    snap_to_rest(db, config.rest_velocity);
    Some(-rel_vel)
}

/// Resolves a contact between a dynamic body and something immovable.
///
/// The penetration correction is `depth · rate · step`, clamped to
/// `[0, depth + threshold]`, and is applied even when the body is already
/// moving away.
pub fn resolve_static(
    mover: &mut Body,
    contact: &Contact,
    config: &SpaceConfig,
    step: f64,
) -> StaticResponse {
    let n = contact.normal;
    let hit = contact.position - mover.position;
    let mut response = StaticResponse {
        impulse: 0.0,
        correction: 0.0,
        closing_speed: 0.0,
    };
    let Some(d) = mover.dynamics_mut() else {
        return response;
    };

    let rel_vel = (d.velocity + d.angular_velocity.cross(&hit)).dot(&n);
    response.closing_speed = -rel_vel;
    if rel_vel <= 0.0 {
        let denominator = d.inv_mass() + angular_term(&hit, &n, d.inv_angular_inertia());
        if denominator > 0.0 {
            let j = -(1.0 + config.restitution) * rel_vel / denominator;
            let impulse = n * j;
            d.velocity += impulse * d.inv_mass();
            d.angular_velocity += hit.cross(&impulse) * d.inv_angular_inertia();
            response.impulse = j;
        }
    }
    snap_to_rest(d, config.rest_velocity);

    let limit = (contact.depth + config.penetration_threshold).max(0.0);
    response.correction = (contact.depth * config.penetration_rate * step).clamp(0.0, limit);
    mover.position += n * response.correction;
    response
}

/// Two distinct mutable elements of a slice.
pub(crate) fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> Option<(&mut T, &mut T)> {
    if i == j || i >= items.len() || j >= items.len() {
        return None;
    }
    if i < j {
        let (head, tail) = items.split_at_mut(j);
        Some((&mut head[i], &mut tail[0]))
    } else {
        let (head, tail) = items.split_at_mut(i);
        Some((&mut tail[0], &mut head[j]))
    }
}
