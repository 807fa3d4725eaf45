//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod room_service;
pub mod seed_service;
pub mod sensor_service;
pub mod visitor_service;
