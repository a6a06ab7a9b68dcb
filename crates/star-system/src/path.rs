//! Coordinate addressing for sectors, systems and bodies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Address of a sector, a system within it, or a body within that system.
///
/// A sector path carries no system index; a body path carries both indices.
/// The body index is the body's pre-order position in its system's tree.
///
/// # Examples
///
/// ```
/// use star_system::SystemPath;
///
/// let body = SystemPath::body(1, -2, 0, 3, 5);
/// assert!(body.is_body_path());
/// assert_eq!(body.system_only(), SystemPath::system(1, -2, 0, 3));
/// assert_eq!(body.to_string(), "(1,-2,0) #3 / 5");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct SystemPath {
    pub sector_x: i32,
    pub sector_y: i32,
    pub sector_z: i32,
    pub system_index: Option<u32>,
    pub body_index: Option<u32>,
}

impl SystemPath {
    pub fn sector(x: i32, y: i32, z: i32) -> Self {
        Self {
            sector_x: x,
            sector_y: y,
            sector_z: z,
            system_index: None,
            body_index: None,
        }
    }

    pub fn system(x: i32, y: i32, z: i32, system_index: u32) -> Self {
        Self {
            system_index: Some(system_index),
            ..Self::sector(x, y, z)
        }
    }

    pub fn body(x: i32, y: i32, z: i32, system_index: u32, body_index: u32) -> Self {
        Self {
            body_index: Some(body_index),
            ..Self::system(x, y, z, system_index)
        }
    }

    pub fn is_sector_path(&self) -> bool {
        self.system_index.is_none()
    }

    pub fn is_system_path(&self) -> bool {
        self.system_index.is_some()
    }

    pub fn is_body_path(&self) -> bool {
        self.system_index.is_some() && self.body_index.is_some()
    }

    pub fn is_same_sector(&self, other: &SystemPath) -> bool {
        self.sector_coords() == other.sector_coords()
    }

    pub fn is_same_system(&self, other: &SystemPath) -> bool {
        self.is_same_sector(other) && self.system_index == other.system_index
    }

    pub fn sector_coords(&self) -> (i32, i32, i32) {
        (self.sector_x, self.sector_y, self.sector_z)
    }

    /// Drops the body index.
    pub fn system_only(&self) -> SystemPath {
        Self {
            body_index: None,
            ..*self
        }
    }

    /// Drops both the system and body indices.
    pub fn sector_only(&self) -> SystemPath {
        Self::sector(self.sector_x, self.sector_y, self.sector_z)
    }

    /// This path's system with a different body index.
    pub fn with_body(&self, body_index: u32) -> SystemPath {
        Self {
            body_index: Some(body_index),
            ..*self
        }
    }

    /// Chebyshev distance between the sectors of two paths.
    pub fn sector_distance(&self, other: &SystemPath) -> i32 {
        (self.sector_x - other.sector_x)
            .abs()
            .max((self.sector_y - other.sector_y).abs())
            .max((self.sector_z - other.sector_z).abs())
    }
}

impl fmt::Display for SystemPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.sector_x, self.sector_y, self.sector_z)?;
        if let Some(system) = self.system_index {
            write!(f, " #{system}")?;
        }
        if let Some(body) = self.body_index {
            write!(f, " / {body}")?;
        }
        Ok(())
    }
}
