//! Reference-frame tree.
//!
//! Frames are stored in an arena and addressed by [`FrameId`]. Each frame has
//! an origin, velocity and orientation relative to its parent; rotating frames
//! additionally spin about their local Y axis. Frames built for a body
//! follow that body's orbit (its "orbit rail") every tick.

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use star_system::{rotate_y, StarSystem, SystemBodyId};
use std::ops::BitOr;
use tracing::warn;

use crate::body::BodyId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FrameId(pub u32);

impl FrameId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Frame property bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameFlags(u32);

impl FrameFlags {
    pub const DEFAULT: FrameFlags = FrameFlags(0);
    pub const ROTATING: FrameFlags = FrameFlags(1);
    pub const HAS_ROTATING_CHILD: FrameFlags = FrameFlags(2);

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: FrameFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: FrameFlags) {
        self.0 |= other.0;
    }
}

impl BitOr for FrameFlags {
    type Output = FrameFlags;

    fn bitor(self, rhs: FrameFlags) -> FrameFlags {
        FrameFlags(self.0 | rhs.0)
    }
}

/// One node of the frame tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub id: FrameId,
    pub parent: Option<FrameId>,
    pub children: Vec<FrameId>,
    pub label: String,
    pub flags: FrameFlags,
    /// Extent of the frame around its origin, meters.
    pub radius: f64,
    /// Origin in parent coordinates, meters.
    pub position: Vector3<f64>,
    /// Velocity of the origin in parent coordinates, m/s.
    pub velocity: Vector3<f64>,
    /// Rotation taking this frame's axes into the parent's.
    pub orient: Matrix3<f64>,
    /// Spin about the local Y axis, rad/s.
    pub ang_speed: f64,
    /// Descriptor this frame follows.
    pub system_body: Option<SystemBodyId>,
    /// Physical body the frame was built around.
    pub astro_body: Option<BodyId>,
}

impl Frame {
    fn new(id: FrameId, parent: Option<FrameId>, label: String, flags: FrameFlags) -> Self {
        Self {
            id,
            parent,
            children: Vec::new(),
            label,
            flags,
            radius: 0.0,
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            orient: Matrix3::identity(),
            ang_speed: 0.0,
            system_body: None,
            astro_body: None,
        }
    }

    pub fn is_rotating(&self) -> bool {
        self.flags.contains(FrameFlags::ROTATING)
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn ang_velocity(&self) -> Vector3<f64> {
        Vector3::new(0.0, self.ang_speed, 0.0)
    }

    /// Velocity a body at `pos` needs inside this frame to be at rest
    /// relative to the parent.
    pub fn stasis_velocity(&self, pos: &Vector3<f64>) -> Vector3<f64> {
        -self.ang_velocity().cross(pos)
    }

    fn point_to_parent(&self, p: &Vector3<f64>) -> Vector3<f64> {
        self.position + self.orient * p
    }

    fn point_from_parent(&self, p: &Vector3<f64>) -> Vector3<f64> {
        self.orient.transpose() * (p - self.position)
    }

    fn velocity_to_parent(&self, p: &Vector3<f64>, v: &Vector3<f64>) -> Vector3<f64> {
        self.velocity + self.orient * (v + self.ang_velocity().cross(p))
    }

    fn velocity_from_parent(&self, p_local: &Vector3<f64>, v: &Vector3<f64>) -> Vector3<f64> {
        self.orient.transpose() * (v - self.velocity) - self.ang_velocity().cross(p_local)
    }
}

/// Arena of frames; index 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameTree {
    frames: Vec<Frame>,
}

impl FrameTree {
    /// A tree holding only an unbounded, non-rotating root.
    pub fn new(root_label: impl Into<String>) -> Self {
        let mut root = Frame::new(FrameId(0), None, root_label.into(), FrameFlags::DEFAULT);
        root.radius = f64::MAX;
        Self { frames: vec![root] }
    }

    pub fn root_id(&self) -> FrameId {
        FrameId(0)
    }

    pub fn root(&self) -> &Frame {
        &self.frames[0]
    }

    /// Adds a frame under `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not in the tree.
    pub fn add(&mut self, parent: FrameId, label: impl Into<String>, flags: FrameFlags) -> FrameId {
        assert!(parent.index() < self.frames.len(), "parent frame {} missing", parent.0);
        let id = FrameId(self.frames.len() as u32);
        self.frames.push(Frame::new(id, Some(parent), label.into(), flags));
        let parent_frame = &mut self.frames[parent.index()];
        parent_frame.children.push(id);
        if flags.contains(FrameFlags::ROTATING) {
            parent_frame.flags.insert(FrameFlags::HAS_ROTATING_CHILD);
        }
        id
    }

    pub fn get(&self, id: FrameId) -> Option<&Frame> {
        let frame = self.frames.get(id.index());
        if frame.is_none() {
            warn!(index = id.0, frames = self.frames.len(), "frame index out of range");
        }
        frame
    }

    pub fn get_mut(&mut self, id: FrameId) -> Option<&mut Frame> {
        let len = self.frames.len();
        let frame = self.frames.get_mut(id.index());
        if frame.is_none() {
            warn!(index = id.0, frames = len, "frame index out of range");
        }
        frame
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    pub fn children(&self, id: FrameId) -> impl Iterator<Item = &Frame> {
        self.frames
            .get(id.index())
            .into_iter()
            .flat_map(|f| f.children.iter())
            .filter_map(|c| self.frames.get(c.index()))
    }

    /// The non-rotating frame built for `body`.
    pub fn frame_for_system_body(&self, body: SystemBodyId) -> Option<FrameId> {
        self.frames
            .iter()
            .find(|f| f.system_body == Some(body))
            .map(|f| f.id)
    }

    /// Descriptor owning `id`: its own, or its parent's for a rotating frame.
    pub fn system_body_for(&self, id: FrameId) -> Option<SystemBodyId> {
        let frame = self.frames.get(id.index())?;
        frame.system_body.or_else(|| {
            frame
                .parent
                .and_then(|p| self.frames.get(p.index()))
                .and_then(|p| p.system_body)
        })
    }

    /// Frames from `id` up to and including the root.
    fn ancestry(&self, id: FrameId) -> impl Iterator<Item = &Frame> {
        std::iter::successors(self.frames.get(id.index()), |f| {
            f.parent.and_then(|p| self.frames.get(p.index()))
        })
    }

    pub fn is_ancestor(&self, ancestor: FrameId, id: FrameId) -> bool {
        self.ancestry(id).any(|f| f.id == ancestor)
    }

    pub fn point_to_root(&self, id: FrameId, p: &Vector3<f64>) -> Vector3<f64> {
        self.ancestry(id)
            .filter(|f| !f.is_root())
            .fold(*p, |p, f| f.point_to_parent(&p))
    }

    pub fn point_from_root(&self, id: FrameId, p: &Vector3<f64>) -> Vector3<f64> {
        let chain: Vec<&Frame> = self.ancestry(id).filter(|f| !f.is_root()).collect();
        chain
            .iter()
            .rev()
            .fold(*p, |p, f| f.point_from_parent(&p))
    }

    /// Position and velocity in root coordinates.
    pub fn state_to_root(
        &self,
        id: FrameId,
        p: &Vector3<f64>,
        v: &Vector3<f64>,
    ) -> (Vector3<f64>, Vector3<f64>) {
        self.ancestry(id)
            .filter(|f| !f.is_root())
            .fold((*p, *v), |(p, v), f| {
                (f.point_to_parent(&p), f.velocity_to_parent(&p, &v))
            })
    }

    pub fn state_from_root(
        &self,
        id: FrameId,
        p: &Vector3<f64>,
        v: &Vector3<f64>,
    ) -> (Vector3<f64>, Vector3<f64>) {
        let chain: Vec<&Frame> = self.ancestry(id).filter(|f| !f.is_root()).collect();
        chain.iter().rev().fold((*p, *v), |(p, v), f| {
            let local = f.point_from_parent(&p);
            (local, f.velocity_from_parent(&local, &v))
        })
    }

    /// Re-expresses a point given in `from` coordinates in `to` coordinates.
    pub fn position_between(&self, p: &Vector3<f64>, from: FrameId, to: FrameId) -> Vector3<f64> {
        if from == to {
            return *p;
        }
        self.point_from_root(to, &self.point_to_root(from, p))
    }

    /// Re-expresses a position and velocity, including rotating-frame terms.
    pub fn state_between(
        &self,
        p: &Vector3<f64>,
        v: &Vector3<f64>,
        from: FrameId,
        to: FrameId,
    ) -> (Vector3<f64>, Vector3<f64>) {
        if from == to {
            return (*p, *v);
        }
        let (p, v) = self.state_to_root(from, p, v);
        self.state_from_root(to, &p, &v)
    }

    /// Rotation taking `id`'s axes into root axes.
    pub fn orient_to_root(&self, id: FrameId) -> Matrix3<f64> {
        self.ancestry(id)
            .filter(|f| !f.is_root())
            .fold(Matrix3::identity(), |m, f| f.orient * m)
    }

    pub fn orientation_between(
        &self,
        m: &Matrix3<f64>,
        from: FrameId,
        to: FrameId,
    ) -> Matrix3<f64> {
        self.orient_to_root(to).transpose() * self.orient_to_root(from) * m
    }

    /// Moves every body-following frame to its orbital position at `time` and
    /// spins rotating frames by one `timestep`.
    pub fn update_orbit_rails(&mut self, system: &StarSystem, time: f64, timestep: f64) {
        for frame in &mut self.frames {
            if frame.is_root() {
                frame.orient = Matrix3::identity();
                continue;
            }
            if !frame.is_rotating() {
                if let Some(body) = frame.system_body.and_then(|b| system.bodies().get(b.index())) {
                    frame.position = body.orbit.position_at(time);
                    frame.velocity = body.orbit.velocity_at(time);
                }
            }
            if frame.ang_speed != 0.0 {
                frame.orient *= rotate_y(frame.ang_speed * timestep);
            }
        }
    }

    /// Checks the links a loaded tree relies on.
    pub(crate) fn validate(&self) -> std::result::Result<(), String> {
        let Some(root) = self.frames.first() else {
            return Err("frame tree has no root".into());
        };
        if root.parent.is_some() {
            return Err("root frame has a parent".into());
        }
        for (index, frame) in self.frames.iter().enumerate() {
            if frame.id.index() != index {
                return Err(format!("frame {} stored at index {}", frame.id.0, index));
            }
            if let Some(parent) = frame.parent {
                // parents always precede children, which also rules out cycles
                if parent.index() >= index {
                    return Err(format!("frame {} has parent {} after it", index, parent.0));
                }
                if !self.frames[parent.index()].children.contains(&frame.id) {
                    return Err(format!("frame {} missing from parent {}", index, parent.0));
                }
            } else if index != 0 {
                return Err(format!("frame {} has no parent", index));
            }
            for child in &frame.children {
                let linked = self
                    .frames
                    .get(child.index())
                    .is_some_and(|c| c.parent == Some(frame.id));
                if !linked {
                    return Err(format!("frame {} lists stray child {}", index, child.0));
                }
            }
        }
        Ok(())
    }
}
