//! The generated body tree of one star system.

use serde::{Deserialize, Serialize};
use tracing::warn;
use units::{Length, AU};

use crate::body::{SystemBody, SystemBodyId};
use crate::body_type::{BodyType, SuperType};
use crate::path::SystemPath;

/// Arena holding every body of a star system.
///
/// Bodies refer to each other by [`SystemBodyId`]. The generator creates
/// bodies in whatever order is convenient, then calls [`StarSystem::finalize`]
/// which renumbers the arena into pre-order so ids match path body indices.
/// After that the tree is read-only for every consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarSystem {
    pub path: SystemPath,
    pub name: String,
    pub seed: u32,
    pub num_stars: usize,
    bodies: Vec<SystemBody>,
    root: Option<SystemBodyId>,
    stars: Vec<SystemBodyId>,
}

impl StarSystem {
    pub fn new(path: SystemPath, name: impl Into<String>, seed: u32) -> Self {
        Self {
            path: path.system_only(),
            name: name.into(),
            seed,
            num_stars: 0,
            bodies: Vec::new(),
            root: None,
            stars: Vec::new(),
        }
    }

    /// Allocates a detached body and returns its id.
    pub fn new_body(&mut self, name: impl Into<String>, body_type: BodyType) -> SystemBodyId {
        let id = SystemBodyId(self.bodies.len() as u32);
        self.bodies.push(SystemBody::new(id, name, body_type));
        id
    }

    pub fn set_root(&mut self, id: SystemBodyId) {
        self.root = Some(id);
    }

    /// Appends `child` to `parent`'s children.
    ///
    /// # Panics
    ///
    /// Panics if either id is not in the arena.
    pub fn attach(&mut self, parent: SystemBodyId, child: SystemBodyId) {
        assert!(parent.index() < self.bodies.len() && child.index() < self.bodies.len());
        self.bodies[child.index()].parent = Some(parent);
        self.bodies[parent.index()].children.push(child);
    }

    /// Inserts `child` ahead of `parent`'s existing children.
    ///
    /// # Panics
    ///
    /// Panics if either id is not in the arena.
    pub fn attach_front(&mut self, parent: SystemBodyId, child: SystemBodyId) {
        assert!(parent.index() < self.bodies.len() && child.index() < self.bodies.len());
        self.bodies[child.index()].parent = Some(parent);
        self.bodies[parent.index()].children.insert(0, child);
    }

    pub fn root_id(&self) -> Option<SystemBodyId> {
        self.root
    }

    pub fn root(&self) -> Option<&SystemBody> {
        self.root.and_then(|id| self.bodies.get(id.index()))
    }

    /// Looks up a body, logging and returning `None` for unknown ids.
    pub fn body(&self, id: SystemBodyId) -> Option<&SystemBody> {
        let body = self.bodies.get(id.index());
        if body.is_none() {
            warn!(index = id.0, system = %self.path, "system body index out of range");
        }
        body
    }

    pub fn body_mut(&mut self, id: SystemBodyId) -> Option<&mut SystemBody> {
        let len = self.bodies.len();
        let body = self.bodies.get_mut(id.index());
        if body.is_none() {
            warn!(index = id.0, len, "system body index out of range");
        }
        body
    }

    pub fn bodies(&self) -> &[SystemBody] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Stars in pre-order.
    pub fn stars(&self) -> impl Iterator<Item = &SystemBody> {
        self.stars.iter().filter_map(|id| self.bodies.get(id.index()))
    }

    pub fn children(&self, id: SystemBodyId) -> impl Iterator<Item = &SystemBody> {
        self.bodies
            .get(id.index())
            .map(|b| b.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|c| self.bodies.get(c.index()))
    }

    /// Renumbers the arena into pre-order and assigns body paths.
    ///
    /// Bodies unreachable from the root are discarded.
    pub fn finalize(&mut self) {
        let Some(root) = self.root else {
            self.bodies.clear();
            self.stars.clear();
            self.num_stars = 0;
            return;
        };

        let mut order = Vec::with_capacity(self.bodies.len());
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.bodies[id.index()].children.iter().rev().copied());
        }

        if order.len() != self.bodies.len() {
            warn!(
                system = %self.path,
                dropped = self.bodies.len() - order.len(),
                "discarding bodies not attached to the tree"
            );
        }

        let mut remap = vec![None; self.bodies.len()];
        for (new_index, old) in order.iter().enumerate() {
            remap[old.index()] = Some(SystemBodyId(new_index as u32));
        }
        let map = |id: SystemBodyId| remap[id.index()];

        let mut old_bodies: Vec<Option<SystemBody>> =
            std::mem::take(&mut self.bodies).into_iter().map(Some).collect();
        for old in &order {
            if let Some(mut body) = old_bodies[old.index()].take() {
                body.id = SystemBodyId(self.bodies.len() as u32);
                body.parent = body.parent.and_then(map);
                body.children = body.children.iter().filter_map(|c| map(*c)).collect();
                body.path = self.path.with_body(body.id.0);
                self.bodies.push(body);
            }
        }

        self.root = Some(SystemBodyId(0));
        self.stars = self
            .bodies
            .iter()
            .filter(|b| b.is_star())
            .map(|b| b.id)
            .collect();
        self.num_stars = self.stars.len();
    }

    /// Body addressed by a path in this system.
    pub fn body_by_path(&self, path: &SystemPath) -> Option<&SystemBody> {
        if !path.is_same_system(&self.path) {
            return None;
        }
        path.body_index.and_then(|i| self.body(SystemBodyId(i)))
    }

    pub fn path_of(&self, id: SystemBodyId) -> SystemPath {
        self.path.with_body(id.0)
    }

    /// Distance within which `id` dominates its parent's gravity.
    ///
    /// Zero for stars, grav-points and the root.
    pub fn hill_radius(&self, id: SystemBodyId) -> Length {
        let Some(body) = self.bodies.get(id.index()) else {
            return Length::zero();
        };
        if body.super_type() <= SuperType::Star {
            return Length::zero();
        }
        let Some(parent) = body.parent.and_then(|p| self.bodies.get(p.index())) else {
            return Length::zero();
        };
        let parent_mass = parent.mass_kg();
        if parent_mass <= 0.0 {
            return Length::zero();
        }
        let a = body.semi_major_axis.to_f64();
        let e = body.eccentricity.to_f64();
        Length::from_au(a * (1.0 - e) * (body.mass_kg() / (3.0 * parent_mass)).cbrt())
    }

    /// Largest apoapsis among the direct children of `id`.
    pub fn max_child_orbital_distance(&self, id: SystemBodyId) -> Length {
        let au = self
            .children(id)
            .map(|c| c.orb_max.to_f64())
            .fold(0.0, f64::max);
        Length::from_meters(au * AU)
    }

    /// The first star found walking from `id` toward the root.
    pub fn star_ancestor(&self, id: SystemBodyId) -> Option<&SystemBody> {
        let mut current = self.bodies.get(id.index());
        while let Some(body) = current {
            if body.is_star() {
                return Some(body);
            }
            current = body.parent.and_then(|p| self.bodies.get(p.index()));
        }
        None
    }

    /// The first non-grav-point body on the leftmost path from the root.
    pub fn primary_star(&self) -> Option<&SystemBody> {
        let mut current = self.root()?;
        while current.is_gravpoint() {
            let first = current.children.first()?;
            current = self.bodies.get(first.index())?;
        }
        Some(current)
    }
}
