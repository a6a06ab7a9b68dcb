//! Runtime space for a generated star system
//!
//! A [`Space`] mirrors a [`star_system::StarSystem`] body tree as a tree of
//! reference frames and a list of physical bodies, then advances them one tick
//! at a time: contacts and terrain collisions, frame membership, orbit rails,
//! integration, event delivery, the deferred removal queue and the spatial
//! index, in that order.

pub mod body;
pub mod builder;
pub mod collision;
pub mod config;
pub mod error;
pub mod events;
pub mod frame;
pub mod hyperspace;
pub mod persistence;
pub mod placement;
pub mod space;
pub mod spatial;
pub mod terrain;

pub use builder::{build_space, BuiltSpace};
pub use body::{Body, BodyController, BodyId, BodyKind, CollisionGeom, Dynamics, Motion};
pub use collision::{Contact, StaticResponse};
pub use config::{HyperspaceConfig, PlacementConfig, SpaceConfig};
pub use error::{Result, SpaceError};
pub use events::{EventSink, SpaceEvent};
pub use frame::{Frame, FrameFlags, FrameId, FrameTree};
pub use hyperspace::HyperspaceArrival;
pub use persistence::{SavedBody, SavedSpace, SAVE_VERSION};
pub use placement::{PlacementRecord, SurfacePlacement};
pub use space::Space;
pub use spatial::SpatialIndex;
pub use terrain::{SmoothTerrain, SmoothTerrainSource, Terrain, TerrainSource};

#[cfg(test)]
mod body_test;
#[cfg(test)]
mod builder_test;
#[cfg(test)]
mod config_test;
#[cfg(test)]
mod hyperspace_test;
#[cfg(test)]
mod persistence_test;
#[cfg(test)]
mod spatial_test;
#[cfg(test)]
mod test_fixtures;
