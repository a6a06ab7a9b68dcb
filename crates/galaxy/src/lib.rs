//! Galaxy-scale addressing and caching
//!
//! Sectors are eight light-year cubes addressed by integer coordinates. Each
//! [`Sector`] is generated on demand from `(x, y, z, universe seed)` and lists
//! the systems inside it; a [`Galaxy`] turns those entries into full
//! [`star_system::StarSystem`] trees and keeps both around the player's
//! location in windowed caches.

pub mod cache;
pub mod config;
pub mod error;
pub mod galaxy;
pub mod sector;

pub use cache::{window_nearest_first, CacheStats, WindowedCache};
pub use config::GalaxyConfig;
pub use error::{GalaxyError, Result};
pub use galaxy::{Galaxy, RefreshReport};
pub use sector::{Sector, SectorSystem, SECTOR_SIZE_LY};
