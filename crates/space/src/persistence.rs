//! Save and load.
//!
//! A save holds the frame tree and the body list. The body tree itself is not
//! saved: it is regenerated from the system path and must match. Bodies held
//! by another subsystem (hyperspace transit) are written as
//! [`SavedBody::NotInSpace`] placeholders and restored by that subsystem.
//!
//! Two encodings are offered: a JSON document, whose shape is checked before
//! it is decoded, and a compact bincode stream.

use serde::{Deserialize, Serialize};
use star_system::{StarSystem, SystemPath};
use std::collections::HashSet;
use std::io::{self, Read, Write};
use std::sync::Arc;
use tracing::debug;

use crate::body::Body;
use crate::config::SpaceConfig;
use crate::error::{Result, SpaceError};
use crate::frame::FrameTree;
use crate::space::Space;
use crate::terrain::TerrainSource;

/// Version number for the save format (increment when the format changes).
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SavedBody {
    Normal(Body),
    NotInSpace,
}

/// Serializable snapshot of a [`Space`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSpace {
    pub version: u32,
    /// System the space was built from.
    pub path: SystemPath,
    pub time: f64,
    pub next_body_id: u32,
    pub frames: FrameTree,
    pub bodies: Vec<SavedBody>,
}

impl Space {
    pub fn to_saved(&self) -> SavedSpace {
        SavedSpace {
            version: SAVE_VERSION,
            path: self.system().path,
            time: self.time,
            next_body_id: self.next_body_id,
            frames: self.frames.clone(),
            bodies: self
                .bodies
                .iter()
                .map(|b| {
                    if b.in_transit {
                        SavedBody::NotInSpace
                    } else {
                        SavedBody::Normal(b.clone())
                    }
                })
                .collect(),
        }
    }

    /// Rebuilds a space from a snapshot of `system`.
    ///
    /// # Errors
    ///
    /// [`SpaceError::VersionMismatch`] for a snapshot of another format
    /// version, [`SpaceError::CorruptSave`] if the snapshot belongs to another
    /// system or its frames and bodies do not link up.
    pub fn from_saved(
        saved: SavedSpace,
        system: Arc<StarSystem>,
        config: SpaceConfig,
        terrain_source: &dyn TerrainSource,
    ) -> Result<Space> {
        if saved.version != SAVE_VERSION {
            return Err(SpaceError::VersionMismatch {
                expected: SAVE_VERSION,
                found: saved.version,
            });
        }
        validate(&saved, &system)?;

        let bodies: Vec<Body> = saved
            .bodies
            .into_iter()
            .filter_map(|b| match b {
                SavedBody::Normal(body) => Some(body),
                SavedBody::NotInSpace => None,
            })
            .collect();
        debug!(
            system = %system.name,
            frames = saved.frames.len(),
            bodies = bodies.len(),
            "restored space"
        );
        Ok(Space::from_parts(
            system,
            config,
            terrain_source,
            saved.frames,
            bodies,
            saved.next_body_id,
            saved.time,
        ))
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self.to_saved())?)
    }

    /// Loads a JSON document written by [`Space::to_json`].
    ///
    /// A missing or mistyped `frames` or `bodies` field, or anything else
    /// that does not decode, is a [`SpaceError::CorruptSave`].
    pub fn from_json(
        document: &serde_json::Value,
        system: Arc<StarSystem>,
        config: SpaceConfig,
        terrain_source: &dyn TerrainSource,
    ) -> Result<Space> {
        let Some(fields) = document.as_object() else {
            return Err(SpaceError::corrupt("save is not an object"));
        };
        if !fields.get("frames").is_some_and(|f| f.is_object()) {
            return Err(SpaceError::corrupt("missing or malformed frames"));
        }
        if !fields.get("bodies").is_some_and(|b| b.is_array()) {
            return Err(SpaceError::corrupt("missing or malformed bodies"));
        }
        let saved: SavedSpace = serde_json::from_value(document.clone())
            .map_err(|e| SpaceError::corrupt(format!("undecodable save: {e}")))?;
        Space::from_saved(saved, system, config, terrain_source)
    }

    /// Writes a bincode save to `writer`.
    pub fn save<W: Write>(&self, writer: W) -> Result<()> {
        bincode::serialize_into(writer, &self.to_saved())?;
        Ok(())
    }

    /// Reads a bincode save written by [`Space::save`].
    ///
    /// Truncated or undecodable input is a [`SpaceError::CorruptSave`]; only
    /// a failing reader surfaces as [`SpaceError::Io`].
    pub fn load<R: Read>(
        reader: R,
        system: Arc<StarSystem>,
        config: SpaceConfig,
        terrain_source: &dyn TerrainSource,
    ) -> Result<Space> {
        let saved: SavedSpace = bincode::deserialize_from(reader).map_err(decode_error)?;
        Space::from_saved(saved, system, config, terrain_source)
    }
}

fn decode_error(err: bincode::Error) -> SpaceError {
    match *err {
        bincode::ErrorKind::Io(e) if e.kind() != io::ErrorKind::UnexpectedEof => {
            SpaceError::Io(e)
        }
        other => SpaceError::corrupt(format!("undecodable save: {other}")),
    }
}

fn validate(saved: &SavedSpace, system: &StarSystem) -> Result<()> {
    if !saved.path.is_same_system(&system.path) {
        return Err(SpaceError::corrupt(format!(
            "save is for {}, not {}",
            saved.path, system.path
        )));
    }
    saved.frames.validate().map_err(SpaceError::corrupt)?;

    let mut ids = HashSet::new();
    for body in saved.bodies.iter().filter_map(|b| match b {
        SavedBody::Normal(body) => Some(body),
        SavedBody::NotInSpace => None,
    }) {
        if body.id.0 >= saved.next_body_id || !ids.insert(body.id) {
            return Err(SpaceError::corrupt(format!("bad body id {}", body.id.0)));
        }
        if body.frame.is_some_and(|f| f.index() >= saved.frames.len()) {
            return Err(SpaceError::corrupt(format!("body {} is in a missing frame", body.id.0)));
        }
        if body.system_body.is_some_and(|s| s.index() >= system.len()) {
            return Err(SpaceError::corrupt(format!("body {} has no descriptor", body.id.0)));
        }
    }
    for frame in saved.frames.iter() {
        if frame.system_body.is_some_and(|s| s.index() >= system.len()) {
            return Err(SpaceError::corrupt(format!("frame {} has no descriptor", frame.id.0)));
        }
        if frame.astro_body.is_some_and(|b| !ids.contains(&b)) {
            return Err(SpaceError::corrupt(format!("frame {} names a missing body", frame.id.0)));
        }
    }
    Ok(())
}
