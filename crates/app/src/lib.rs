//! # crowdmap-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `RoomRepository` — CRUD and filtered queries for rooms
//!   - `SensorRepository` — CRUD for sensors, lookup by name and by room
//!   - `VisitorRepository` — CRUD for visitors
//! - Define **driving/inbound ports** as use-case structs:
//!   - `RoomService`, `SensorService`, `VisitorService` — validate before every write
//!   - `SeedService` — persist rooms and sensors derived from an adjacency map
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `crowdmap-domain` only (plus `tracing`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;

#[cfg(test)]
mod testing;
