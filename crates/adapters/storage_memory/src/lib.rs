//! # crowdmap-adapter-storage-memory
//!
//! In-memory document storage.
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `crowdmap-app::ports::storage`
//! - Keep each collection as a list of JSON documents, in insertion order
//! - Validate documents on the way out, so a malformed stored document is
//!   reported instead of silently decoded
//!
//! ## Dependency rule
//! Depends on `crowdmap-app` (for port traits) and `crowdmap-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod room_repo;
pub mod sensor_repo;
pub mod store;
pub mod visitor_repo;

pub use room_repo::MemoryRoomRepository;
pub use sensor_repo::MemorySensorRepository;
pub use store::{Collection, Database};
pub use visitor_repo::MemoryVisitorRepository;
