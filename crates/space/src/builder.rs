//! Frame hierarchy construction.
//!
//! Walks a [`StarSystem`] body tree and gives every body a frame (or a place
//! in an existing one) and a runtime [`Body`]:
//!
//! | Descriptor | Frames |
//! |---|---|
//! | root | reuses the root frame |
//! | grav-point | one frame, 1.1 × farthest child apoapsis |
//! | planet | non-rotating frame bounded by the Hill sphere, plus a rotating frame just outside the terrain |
//! | star | one frame, the larger of 10 radii and 1.1 × farthest child, kept clear of a binary partner |
//! | orbital starport | one small frame of fixed radius |
//! | surface starport | none; joins its planet's rotating frame |

use star_system::{rotate_x, rotate_y, BodyType, StarSystem, SuperType, SystemBody, SystemBodyId};
use std::collections::{BTreeMap, HashMap};
use std::f64::consts::PI;
use tracing::{debug, warn};

use crate::body::{Body, BodyId, BodyKind, Motion};
use crate::config::SpaceConfig;
use crate::frame::{FrameFlags, FrameId, FrameTree};
use crate::placement::{place_on_surface, PlacementRecord};
use crate::terrain::{SmoothTerrain, Terrain, TerrainSource};

/// Grav-point frames reach this far past their farthest child.
const GRAVPOINT_FRAME_MARGIN: f64 = 1.1;
/// Planet frames reach at least this far past their farthest moon.
const PLANET_FRAME_MARGIN: f64 = 1.05;
/// Planet frames are never smaller than this many planet radii.
const PLANET_FRAME_MIN_RADII: f64 = 4.0;
/// Rotating frames reach this far past the tallest terrain feature.
const ROTATING_FRAME_MARGIN: f64 = 1.05;
const STAR_FRAME_RADII: f64 = 10.0;
const STAR_FRAME_MARGIN: f64 = 1.1;
/// Fraction of a paired star's closest approach its frame may cover, so the
/// frames of two partners never overlap.
const STAR_PAIR_FRAME_FRACTION: f64 = 0.11;
/// Star frames always extend past the star itself.
const STAR_FRAME_MIN_RADII: f64 = 1.1;

/// Everything the builder produces for one system.
pub struct BuiltSpace {
    pub frames: FrameTree,
    /// Indexed by [`BodyId`].
    pub bodies: Vec<Body>,
    /// Terrain of every planet body that has one.
    pub terrains: BTreeMap<BodyId, Box<dyn Terrain>>,
    pub placements: PlacementRecord,
}

struct FrameBuilder<'a> {
    system: &'a StarSystem,
    config: &'a SpaceConfig,
    terrain_source: &'a dyn TerrainSource,
    time: f64,
    frames: FrameTree,
    bodies: Vec<Body>,
    terrains: BTreeMap<BodyId, Box<dyn Terrain>>,
    placements: PlacementRecord,
    body_for: HashMap<SystemBodyId, BodyId>,
}

/// Builds the frame tree and bodies for `system` at `time`.
///
/// Rotating frames are spun to `time`. Orbiting frames are left at their
/// construction positions; call [`FrameTree::update_orbit_rails`] to move
/// them along their orbits.
pub fn build_space(
    system: &StarSystem,
    config: &SpaceConfig,
    terrain_source: &dyn TerrainSource,
    time: f64,
) -> BuiltSpace {
    let mut builder = FrameBuilder {
        system,
        config,
        terrain_source,
        time,
        frames: FrameTree::new(system.name.clone()),
        bodies: Vec::new(),
        terrains: BTreeMap::new(),
        placements: PlacementRecord::default(),
        body_for: HashMap::new(),
    };
    if let Some(root) = system.root_id() {
        let root_frame = builder.frames.root_id();
        builder.make_frame_for(root, root_frame);
    }

    debug!(
        system = %system.name,
        frames = builder.frames.len(),
        bodies = builder.bodies.len(),
        "built frame tree"
    );
    BuiltSpace {
        frames: builder.frames,
        bodies: builder.bodies,
        terrains: builder.terrains,
        placements: builder.placements,
    }
}

fn body_kind(sbody: &SystemBody) -> Option<BodyKind> {
    match sbody.super_type() {
        SuperType::None => None,
        SuperType::Star => Some(BodyKind::Star),
        SuperType::RockyPlanet | SuperType::GasGiant => Some(BodyKind::Planet),
        SuperType::Starport => Some(BodyKind::Starport),
    }
}

impl FrameBuilder<'_> {
    fn add_body(
        &mut self,
        sbody: &SystemBody,
        kind: BodyKind,
        motion: Motion,
        radius: f64,
        frame: FrameId,
    ) -> BodyId {
        let id = BodyId(self.bodies.len() as u32);
        let mut body = Body::new(sbody.name.clone(), kind, motion, radius);
        body.id = id;
        body.frame = Some(frame);
        body.system_body = Some(sbody.id);
        self.bodies.push(body);
        self.body_for.insert(sbody.id, id);
        id
    }

    /// Farthest apoapsis among `sbody`'s children, in metres.
    fn child_extent(&self, sbody: &SystemBody) -> f64 {
        self.system.max_child_orbital_distance(sbody.id).to_meters()
    }

    /// Creates the frames for `id` under `parent` and recurses into its
    /// children. Returns the frame the children were placed in.
    fn make_frame_for(&mut self, id: SystemBodyId, parent: FrameId) -> FrameId {
        let system = self.system;
        let Some(sbody) = system.body(id) else {
            return parent;
        };

        let frame = if sbody.is_root() {
            self.make_root(sbody, parent)
        } else {
            match sbody.super_type() {
                SuperType::None => self.make_gravpoint(sbody, parent),
                SuperType::RockyPlanet | SuperType::GasGiant => self.make_planet(sbody, parent),
                SuperType::Star => self.make_star(sbody, parent),
                SuperType::Starport if sbody.body_type == BodyType::StarportSurface => {
                    self.make_surface_port(sbody, parent)
                }
                SuperType::Starport => self.make_orbital_port(sbody, parent),
            }
        };

        for child in &sbody.children {
            self.make_frame_for(*child, frame);
        }
        frame
    }

    fn make_root(&mut self, sbody: &SystemBody, root: FrameId) -> FrameId {
        let radius = sbody.radius_m();
        let astro =
            body_kind(sbody).map(|kind| self.add_body(sbody, kind, Motion::Rail, radius, root));
        if let Some(frame) = self.frames.get_mut(root) {
            frame.system_body = Some(sbody.id);
            frame.astro_body = astro;
        }
        root
    }

    fn make_gravpoint(&mut self, sbody: &SystemBody, parent: FrameId) -> FrameId {
        let radius = GRAVPOINT_FRAME_MARGIN * self.child_extent(sbody);
        let frame = self.frames.add(parent, sbody.name.clone(), FrameFlags::DEFAULT);
        if let Some(f) = self.frames.get_mut(frame) {
            f.radius = radius;
            f.system_body = Some(sbody.id);
        }
        frame
    }

    fn make_planet(&mut self, sbody: &SystemBody, parent: FrameId) -> FrameId {
        let body_radius = sbody.radius_m();
        let hill = self.system.hill_radius(sbody.id).to_meters();
        let children = PLANET_FRAME_MARGIN * self.child_extent(sbody);
        let outer_radius = hill.max(children).max(PLANET_FRAME_MIN_RADII * body_radius);

        let terrain = self.terrain_source.terrain_for(sbody);
        let surface = terrain
            .as_ref()
            .map_or(body_radius, |t| t.radius() + t.max_feature_height());

        let outer = self.frames.add(parent, sbody.name.clone(), FrameFlags::DEFAULT);
        let inner_name = format!("{} (rotating)", sbody.name);
        let inner = self.frames.add(outer, inner_name, FrameFlags::ROTATING);
        let body = self.add_body(sbody, BodyKind::Planet, Motion::Rail, body_radius, inner);
        if let Some(terrain) = terrain {
            self.terrains.insert(body, terrain);
        }

        if let Some(f) = self.frames.get_mut(outer) {
            f.radius = outer_radius;
            f.system_body = Some(sbody.id);
            f.astro_body = Some(body);
        }
        let period = sbody.rotation_period_s();
        if let Some(f) = self.frames.get_mut(inner) {
            f.radius = ROTATING_FRAME_MARGIN * surface;
            f.astro_body = Some(body);
            f.ang_speed = if period > 0.0 { 2.0 * PI / period } else { 0.0 };
            let phase = sbody.rotational_phase_at_start.to_f64() + f.ang_speed * self.time;
            f.orient = rotate_x(sbody.axial_tilt.to_f64()) * rotate_y(phase);
        }
        outer
    }

    fn make_star(&mut self, sbody: &SystemBody, parent: FrameId) -> FrameId {
        let body_radius = sbody.radius_m();
        let children = STAR_FRAME_MARGIN * self.child_extent(sbody);
        let mut radius = (STAR_FRAME_RADII * body_radius).max(children);
        if sbody.parent.is_some() {
            radius = radius.min(STAR_PAIR_FRAME_FRACTION * sbody.orb_min_m());
        }
        radius = radius.max(STAR_FRAME_MIN_RADII * body_radius);

        let frame = self.frames.add(parent, sbody.name.clone(), FrameFlags::DEFAULT);
        let body = self.add_body(sbody, BodyKind::Star, Motion::Rail, body_radius, frame);
        if let Some(f) = self.frames.get_mut(frame) {
            f.radius = radius;
            f.system_body = Some(sbody.id);
            f.astro_body = Some(body);
        }
        frame
    }

    fn make_orbital_port(&mut self, sbody: &SystemBody, parent: FrameId) -> FrameId {
        let frame = self.frames.add(parent, sbody.name.clone(), FrameFlags::DEFAULT);
        let radius = self.config.station_radius;
        let body = self.add_body(sbody, BodyKind::Starport, Motion::Rail, radius, frame);
        if let Some(f) = self.frames.get_mut(frame) {
            f.radius = self.config.station_frame_radius;
            f.system_body = Some(sbody.id);
            f.astro_body = Some(body);
        }
        frame
    }

    /// The placed orientation lives on the runtime body and in the placement
    /// record only; `sbody` keeps its generated plane.
    fn make_surface_port(&mut self, sbody: &SystemBody, parent: FrameId) -> FrameId {
        let rotating = self
            .frames
            .children(parent)
            .find(|f| f.is_rotating())
            .map(|f| f.id);
        let Some(rotating) = rotating else {
            warn!(starport = %sbody.name, "surface starport has no rotating frame to join");
            return parent;
        };
        let planet = sbody.parent.and_then(|p| self.body_for.get(&p).copied());

        let fallback_terrain;
        let terrain: &dyn Terrain = match planet.and_then(|p| self.terrains.get(&p)) {
            Some(t) => t.as_ref(),
            None => {
                let radius = sbody
                    .parent
                    .and_then(|p| self.system.body(p))
                    .map_or(0.0, SystemBody::radius_m);
                fallback_terrain = SmoothTerrain { radius };
                &fallback_terrain
            }
        };
        let placed = planet.map_or(&[][..], |p| self.placements.placed_on(p));
        let site = place_on_surface(
            terrain,
            sbody.seed,
            &sbody.orbit.plane,
            sbody.is_custom,
            placed,
            &self.config.placement,
        );

        let radius = self.config.station_radius;
        let id = self.add_body(sbody, BodyKind::Starport, Motion::Fixed, radius, rotating);
        if let Some(body) = self.bodies.get_mut(id.index()) {
            body.position = site.position;
            body.orientation = site.orientation;
        }
        if let Some(planet) = planet {
            self.placements.record(planet, site.direction);
        }
        // children of a surface starport (none are generated) share its frame
        rotating
    }
}
