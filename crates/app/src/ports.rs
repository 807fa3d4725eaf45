//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the document
//! store. Every service receives its store handle explicitly through one of
//! these traits; there is no ambient connection.

pub mod storage;

pub use storage::{RoomRepository, SensorRepository, VisitorRepository};
