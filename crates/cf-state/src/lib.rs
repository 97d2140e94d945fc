//! cf-state: Persistence gateway for CoinForge
//!
//! The engine never touches a storage backend directly. It reads and writes
//! named save slots through the [`KeyValueStore`] trait:
//!
//! ```text
//! FlipEngine ──► SaveSlot ──► KeyValueStore
//!                                 ├── MemoryStore   (tests, simulations)
//!                                 └── JsonFileStore (one JSON object on disk)
//! ```
//!
//! Absent or malformed slots load as `None` so callers can fall back to
//! defaults instead of surfacing a parse failure to the player.

mod error;
mod profile;
mod slots;
mod store;

pub use error::*;
pub use profile::*;
pub use slots::*;
pub use store::*;
