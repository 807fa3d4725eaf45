//! # crowdmap-domain
//!
//! Pure domain model for the indoor crowd-monitoring dataset.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - **Geometry**: floor area of a room polygon given in geographic coordinates
//! - **Validation engine**: atomic field checks and fail-fast rule lists
//! - Define **Rooms** (polygons on a floor plan)
//! - Define **Sensors** (doorway counters between two adjacent rooms)
//! - Define **Visitors** (movement history across rooms)
//! - **Seeding**: derive rooms and sensors from a static adjacency map
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod adjacency;
pub mod geometry;
pub mod reference;
pub mod room;
pub mod sensor;
pub mod validation;
pub mod visitor;
