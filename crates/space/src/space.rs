//! The runtime: a frame tree, the bodies in it and the per-tick pipeline.

use nalgebra::{Matrix3, Vector3};
use seeded_random::Random;
use star_system::{StarSystem, SystemBodyId, SystemPath};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{trace, warn};

use crate::body::{Body, BodyController, BodyId, BodyKind};
use crate::builder::build_space;
use crate::collision::{self, pair_mut, Contact};
use crate::config::SpaceConfig;
use crate::events::{EventSink, SpaceEvent};
use crate::frame::{Frame, FrameId, FrameTree};
use crate::hyperspace::{self, HyperspaceArrival};
use crate::placement::PlacementRecord;
use crate::spatial::SpatialIndex;
use crate::terrain::{Terrain, TerrainSource};

/// A star system brought to life.
///
/// Bodies are added immediately but removed and killed through queues that
/// are flushed by [`Space::update_bodies`], which [`Space::time_step`] calls
/// once per tick. Anything holding a [`BodyId`] can rely on the body staying
/// in place until then.
pub struct Space {
    config: SpaceConfig,
    system: Arc<StarSystem>,
    pub(crate) frames: FrameTree,
    pub(crate) bodies: Vec<Body>,
    pub(crate) next_body_id: u32,
    pending_removal: Vec<BodyId>,
    pending_kill: Vec<BodyId>,
    removed: Vec<Body>,
    spatial: SpatialIndex,
    terrains: BTreeMap<BodyId, Box<dyn Terrain>>,
    controllers: BTreeMap<BodyId, Box<dyn BodyController>>,
    placements: PlacementRecord,
    events: Vec<SpaceEvent>,
    pub(crate) time: f64,
}

impl Space {
    /// Builds frames and bodies for `system` and moves them to `time`.
    pub fn new(
        system: Arc<StarSystem>,
        config: SpaceConfig,
        terrain_source: &dyn TerrainSource,
        time: f64,
    ) -> Self {
        let built = build_space(&system, &config, terrain_source, time);
        let mut space = Self {
            next_body_id: built.bodies.len() as u32,
            config,
            system,
            frames: built.frames,
            bodies: built.bodies,
            pending_removal: Vec::new(),
            pending_kill: Vec::new(),
            removed: Vec::new(),
            spatial: SpatialIndex::default(),
            terrains: built.terrains,
            controllers: BTreeMap::new(),
            placements: built.placements,
            events: Vec::new(),
            time,
        };
        space.frames.update_orbit_rails(&space.system, time, 0.0);
        space.rebuild_spatial_index();
        space
    }

    /// Reassembles a space from loaded parts. Terrain comes from
    /// `terrain_source` again since it is never saved.
    pub(crate) fn from_parts(
        system: Arc<StarSystem>,
        config: SpaceConfig,
        terrain_source: &dyn TerrainSource,
        frames: FrameTree,
        bodies: Vec<Body>,
        next_body_id: u32,
        time: f64,
    ) -> Self {
        let mut terrains = BTreeMap::new();
        let mut placements = PlacementRecord::default();
        for body in &bodies {
            let Some(sbody) = body.system_body.and_then(|id| system.body(id)) else {
                continue;
            };
            if body.kind == BodyKind::Planet {
                if let Some(terrain) = terrain_source.terrain_for(sbody) {
                    terrains.insert(body.id, terrain);
                }
            }
        }
        for body in bodies.iter().filter(|b| b.kind == BodyKind::Starport) {
            let planet = body
                .system_body
                .and_then(|id| system.body(id))
                .and_then(|s| s.parent)
                .and_then(|p| bodies.iter().find(|b| b.system_body == Some(p)));
            if let (Some(planet), Some(frame)) = (planet, body.frame) {
                if frames.get(frame).is_some_and(Frame::is_rotating) {
                    placements.record(planet.id, body.position.normalize());
                }
            }
        }

        let mut space = Self {
            config,
            system,
            frames,
            bodies,
            next_body_id,
            pending_removal: Vec::new(),
            pending_kill: Vec::new(),
            removed: Vec::new(),
            spatial: SpatialIndex::default(),
            terrains,
            controllers: BTreeMap::new(),
            placements,
            events: Vec::new(),
            time,
        };
        space.rebuild_spatial_index();
        space
    }

    pub fn config(&self) -> &SpaceConfig {
        &self.config
    }

    pub fn system(&self) -> &Arc<StarSystem> {
        &self.system
    }

    pub fn frames(&self) -> &FrameTree {
        &self.frames
    }

    /// Simulated seconds since the epoch.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn placements(&self) -> &PlacementRecord {
        &self.placements
    }

    pub fn spatial_index(&self) -> &SpatialIndex {
        &self.spatial
    }

    /// Adds `body` now and returns its new id. Bodies without a frame are put
    /// in the root frame.
    pub fn add_body(&mut self, mut body: Body) -> BodyId {
        let id = BodyId(self.next_body_id);
        self.next_body_id += 1;
        body.id = id;
        if body.frame.is_none() {
            body.frame = Some(self.frames.root_id());
        }
        self.bodies.push(body);
        id
    }

    /// Queues `id` for removal at the next flush; the body is handed back
    /// through [`Space::take_removed_bodies`].
    pub fn remove_body(&mut self, id: BodyId) {
        if !self.pending_removal.contains(&id) {
            self.pending_removal.push(id);
        }
    }

    /// Marks `id` dead and queues it for deletion.
    ///
    /// Killing a dead body does nothing. The player is never deleted, only
    /// taken out of its frame.
    pub fn kill_body(&mut self, id: BodyId) {
        let Some(body) = self.bodies.iter_mut().find(|b| b.id == id) else {
            warn!(body = id.0, "kill requested for unknown body");
            return;
        };
        if body.is_dead() {
            return;
        }
        body.mark_dead();
        self.events.push(SpaceEvent::Killed { body: id });
        if body.is_player {
            body.frame = None;
        } else {
            self.pending_kill.push(id);
        }
    }

    /// Flushes the removal and kill queues.
    pub fn update_bodies(&mut self) {
        if self.pending_removal.is_empty() && self.pending_kill.is_empty() {
            return;
        }
        trace!(
            removed = self.pending_removal.len(),
            killed = self.pending_kill.len(),
            "flushing body queues"
        );
        for id in std::mem::take(&mut self.pending_removal) {
            if let Some(index) = self.bodies.iter().position(|b| b.id == id) {
                let mut body = self.bodies.remove(index);
                body.frame = None;
                self.controllers.remove(&id);
                self.removed.push(body);
            }
        }
        for id in std::mem::take(&mut self.pending_kill) {
            if let Some(index) = self.bodies.iter().position(|b| b.id == id) {
                self.bodies.remove(index);
                self.controllers.remove(&id);
                self.terrains.remove(&id);
            }
        }
    }

    /// Bodies removed since the last call.
    pub fn take_removed_bodies(&mut self) -> Vec<Body> {
        std::mem::take(&mut self.removed)
    }

    /// Gives `id` an autonomous per-tick update, replacing any previous one.
    pub fn set_controller(&mut self, id: BodyId, controller: Box<dyn BodyController>) {
        self.controllers.insert(id, controller);
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// Body at position `index` of the body list.
    pub fn body_by_index(&self, index: usize) -> Option<&Body> {
        let body = self.bodies.get(index);
        if body.is_none() {
            warn!(index, bodies = self.bodies.len(), "body index out of range");
        }
        body
    }

    pub fn index_for_body(&self, id: BodyId) -> Option<usize> {
        let index = self.bodies.iter().position(|b| b.id == id);
        if index.is_none() {
            warn!(body = id.0, "body not in this space");
        }
        index
    }

    pub fn frame(&self, id: FrameId) -> Option<&Frame> {
        self.frames.get(id)
    }

    /// Bodies that are not dead, in list order.
    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|b| !b.is_dead())
    }

    pub fn body_for_system_body(&self, id: SystemBodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.system_body == Some(id))
    }

    pub fn find_body_for_path(&self, path: &SystemPath) -> Option<&Body> {
        let sbody = self.system.body_by_path(path)?;
        self.body_for_system_body(sbody.id)
    }

    pub fn terrain_for(&self, id: BodyId) -> Option<&dyn Terrain> {
        self.terrains.get(&id).map(|t| t.as_ref())
    }

    pub fn position_rel_to(&self, id: BodyId, frame: FrameId) -> Option<Vector3<f64>> {
        let body = self.body(id)?;
        Some(self.frames.position_between(&body.position, body.frame?, frame))
    }

    pub fn velocity_rel_to(&self, id: BodyId, frame: FrameId) -> Option<Vector3<f64>> {
        let body = self.body(id)?;
        let (_, v) = self
            .frames
            .state_between(&body.position, &body.velocity(), body.frame?, frame);
        Some(v)
    }

    pub fn orientation_rel_to(&self, id: BodyId, frame: FrameId) -> Option<Matrix3<f64>> {
        let body = self.body(id)?;
        Some(self.frames.orientation_between(&body.orientation, body.frame?, frame))
    }

    fn root_position(&self, body: &Body) -> Option<Vector3<f64>> {
        Some(self.frames.point_to_root(body.frame?, &body.position))
    }

    /// Bodies whose root-frame distance from `point` may be within `distance`.
    /// Callers filter the result with an exact check.
    pub fn bodies_maybe_near(&self, point: &Vector3<f64>, distance: f64) -> Vec<BodyId> {
        self.spatial.maybe_near(point, distance)
    }

    /// Bodies within `distance` of `id`, nearest first.
    pub fn bodies_near(&self, id: BodyId, distance: f64) -> Vec<BodyId> {
        let Some(centre) = self.body(id).and_then(|b| self.root_position(b)) else {
            return Vec::new();
        };
        let mut found: Vec<(f64, BodyId)> = self
            .bodies_maybe_near(&centre, distance)
            .into_iter()
            .filter(|other| *other != id)
            .filter_map(|other| {
                let p = self.body(other).and_then(|b| self.root_position(b))?;
                let d = (p - centre).norm();
                (d <= distance).then_some((d, other))
            })
            .collect();
        found.sort_by(|a, b| a.0.total_cmp(&b.0));
        found.into_iter().map(|(_, id)| id).collect()
    }

    /// Bodies visible from `observer` within `half_angle` radians of
    /// `direction`, given in the observer's frame.
    pub fn bodies_in_cone(
        &self,
        observer: BodyId,
        direction: &Vector3<f64>,
        half_angle: f64,
    ) -> Vec<BodyId> {
        let Some(eye) = self.body(observer) else {
            return Vec::new();
        };
        let (Some(frame), Some(origin)) = (eye.frame, self.root_position(eye)) else {
            return Vec::new();
        };
        let axis = self.frames.orient_to_root(frame) * direction;
        if axis.norm_squared() == 0.0 {
            return Vec::new();
        }
        let axis = axis.normalize();
        let min_cos = half_angle.cos();
        self.bodies()
            .filter(|b| b.id != observer)
            .filter_map(|b| {
                let to = self.root_position(b)? - origin;
                let d = to.norm();
                (d > 0.0 && to.dot(&axis) / d >= min_cos).then_some(b.id)
            })
            .collect()
    }

    /// Closest live body of `kind` to `id`, measured in the root frame.
    pub fn find_nearest_to(&self, id: BodyId, kind: BodyKind) -> Option<BodyId> {
        let centre = self.body(id).and_then(|b| self.root_position(b))?;
        self.bodies()
            .filter(|b| b.id != id && b.kind == kind)
            .filter_map(|b| Some(((self.root_position(b)? - centre).norm(), b.id)))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, id)| id)
    }

    /// Arrival state for a jump into this system aimed at `target`.
    ///
    /// `source` and `dest` are galactic positions of the departure and
    /// arrival systems.
    pub fn hyperspace_exit(
        &self,
        target: &SystemPath,
        source: &Vector3<f64>,
        dest: &Vector3<f64>,
        rng: &mut Random,
    ) -> Option<HyperspaceArrival> {
        hyperspace::compute_arrival(
            &self.system,
            &self.frames,
            target,
            source,
            dest,
            rng,
            &self.config.hyperspace,
        )
    }

    /// Advances the simulation by `step` seconds and hands the tick's events
    /// to `sink`.
    pub fn time_step(&mut self, step: f64, sink: &mut dyn EventSink) {
        trace!(time = self.time, step, "contacts");
        self.collide_bodies(step);
        trace!("terrain");
        self.collide_terrain(step);
        trace!("frame membership");
        self.update_frames();
        trace!("controllers");
        self.run_controllers(step);
        trace!("orbit rails");
        self.time += step;
        self.frames.update_orbit_rails(&self.system, self.time, step);
        trace!("integration");
        self.integrate(step);
        trace!(events = self.events.len(), "events");
        for event in self.events.drain(..) {
            sink.deliver(event);
        }
        self.update_bodies();
        trace!("spatial index");
        self.rebuild_spatial_index();
    }

    fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.iter().position(|b| b.id == id)
    }

    fn collide_bodies(&mut self, step: f64) {
        let contacts = collision::detect_contacts(&self.bodies);
        for contact in &contacts {
            self.respond(contact, step);
        }
    }

    fn respond(&mut self, contact: &Contact, step: f64) {
        let Some(ia) = self.index_of(contact.a) else {
            return;
        };
        let ib = contact.b.and_then(|b| self.index_of(b));
        let other_dynamic = ib.is_some_and(|i| self.bodies[i].is_dynamic());

        let relative_speed = match ib {
            Some(ib) if other_dynamic => pair_mut(&mut self.bodies, ia, ib)
                .and_then(|(a, b)| collision::resolve_pair(a, b, contact, &self.config))
                .unwrap_or(0.0),
            _ => {
                collision::resolve_static(&mut self.bodies[ia], contact, &self.config, step)
                    .closing_speed
                    .max(0.0)
            }
        };
        self.events.push(SpaceEvent::Collision {
            a: contact.a,
            b: contact.b,
            relative_speed,
        });
    }

    fn collide_terrain(&mut self, step: f64) {
        let mut hits = Vec::new();
        for (index, body) in self.bodies.iter().enumerate() {
            if !body.is_dynamic() || body.is_dead() || body.in_transit {
                continue;
            }
            let Some(frame) = body.frame.and_then(|f| self.frames.get(f)) else {
                continue;
            };
            let terrain = frame
                .astro_body
                .filter(|_| frame.is_rotating())
                .and_then(|planet| self.terrains.get(&planet));
            if let Some(contact) =
                terrain.and_then(|t| collision::terrain_contact(body, t.as_ref()))
            {
                hits.push((index, contact));
            }
        }
        for (index, contact) in hits {
            let response =
                collision::resolve_static(&mut self.bodies[index], &contact, &self.config, step);
            self.events.push(SpaceEvent::Collision {
                a: contact.a,
                b: None,
                relative_speed: response.closing_speed.max(0.0),
            });
        }
    }

    /// Moves each dynamic body at most one level up or down the frame tree.
    fn update_frames(&mut self) {
        for body in self.bodies.iter_mut() {
            if !body.is_dynamic() || body.is_dead() {
                continue;
            }
            let Some(current) = body.frame.and_then(|f| self.frames.get(f)) else {
                continue;
            };
            let target = if body.position.norm() > current.radius {
                current.parent
            } else {
                self.frames.children(current.id).find_map(|child| {
                    let p = self.frames.position_between(&body.position, current.id, child.id);
                    (p.norm() < child.radius).then_some(child.id)
                })
            };
            let Some(target) = target else {
                continue;
            };

            let from = current.id;
            let (position, velocity) = self
                .frames
                .state_between(&body.position, &body.velocity(), from, target);
            body.orientation = self.frames.orientation_between(&body.orientation, from, target);
            body.position = position;
            body.set_velocity(velocity);
            body.frame = Some(target);
            self.events.push(SpaceEvent::FrameChanged {
                body: body.id,
                from,
                to: target,
            });
        }
    }

    fn run_controllers(&mut self, step: f64) {
        for (id, controller) in self.controllers.iter_mut() {
            if let Some(body) = self.bodies.iter_mut().find(|b| b.id == *id && !b.is_dead()) {
                controller.update(body, step);
            }
        }
    }

    fn integrate(&mut self, step: f64) {
        for body in self.bodies.iter_mut() {
            if !body.is_dynamic() || body.is_dead() {
                continue;
            }
            let Some(frame) = body.frame.and_then(|f| self.frames.get(f)) else {
                continue;
            };
            let gm = self
                .frames
                .system_body_for(frame.id)
                .and_then(|id| self.system.body(id))
                .map_or(0.0, |s| s.gm());
            let accel = frame_acceleration(frame, gm, &body.position, &body.velocity());
            body.integrate(accel, step);
        }
    }

    fn rebuild_spatial_index(&mut self) {
        let positions: Vec<(BodyId, Vector3<f64>)> = self
            .bodies
            .iter()
            .filter(|b| !b.is_dead())
            .filter_map(|b| Some((b.id, self.frames.point_to_root(b.frame?, &b.position))))
            .collect();
        self.spatial = SpatialIndex::build(positions);
    }
}

/// Gravity toward the frame's origin body plus, in rotating frames, the
/// Coriolis and centrifugal terms.
fn frame_acceleration(frame: &Frame, gm: f64, p: &Vector3<f64>, v: &Vector3<f64>) -> Vector3<f64> {
    let r2 = p.norm_squared();
    let mut accel = if r2 > 0.0 && gm > 0.0 {
        -p * (gm / (r2 * r2.sqrt()))
    } else {
        Vector3::zeros()
    };
    if frame.is_rotating() {
        let w = frame.ang_velocity();
        accel -= 2.0 * w.cross(v) + w.cross(&w.cross(p));
    }
    accel
}
