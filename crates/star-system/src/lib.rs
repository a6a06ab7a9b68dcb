//! Body descriptor tree for generated star systems
//!
//! A [`StarSystem`] owns every [`SystemBody`] in an index arena. Bodies are
//! addressed by [`SystemBodyId`] inside a system and by [`SystemPath`] across
//! the galaxy. The tree is produced once by the generator and read by the frame
//! builder, the runtime and the caches without further mutation.

pub mod body;
pub mod body_type;
pub mod orbit;
pub mod path;
pub mod system;

// Re-export main types at crate root
pub use body::{SystemBody, SystemBodyId};
pub use body_type::{BodyType, StarTypeInfo, SuperType, STAR_TYPES};
pub use orbit::{rotate_x, rotate_y, rotate_z, Orbit};
pub use path::SystemPath;
pub use system::StarSystem;

#[cfg(test)]
mod body_type_test;
