//! Storage port — repository traits for persistence.
//!
//! Repositories only store and retrieve. Validation happens in the services
//! before any write reaches a repository.

use std::future::Future;

use crowdmap_domain::error::CrowdMapError;
use crowdmap_domain::id::{RoomId, SensorId, VisitorId};
use crowdmap_domain::room::{Room, RoomFilter};
use crowdmap_domain::sensor::Sensor;
use crowdmap_domain::visitor::Visitor;

/// Repository for persisting and querying [`Room`]s.
pub trait RoomRepository {
    /// Persist a new room.
    fn create(&self, room: Room) -> impl Future<Output = Result<Room, CrowdMapError>> + Send;

    /// Get a room by its unique identifier.
    fn get_by_id(
        &self,
        id: RoomId,
    ) -> impl Future<Output = Result<Option<Room>, CrowdMapError>> + Send;

    /// Get the first room stored under `name`.
    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Room>, CrowdMapError>> + Send;

    /// Get every room matching `filter`.
    fn find(
        &self,
        filter: &RoomFilter,
    ) -> impl Future<Output = Result<Vec<Room>, CrowdMapError>> + Send;

    /// Get all rooms.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Room>, CrowdMapError>> + Send;

    /// Replace a stored room.
    fn update(&self, room: Room) -> impl Future<Output = Result<Room, CrowdMapError>> + Send;

    /// Delete a room by id. Sensors referencing it are left untouched.
    fn delete(&self, id: RoomId) -> impl Future<Output = Result<(), CrowdMapError>> + Send;
}

/// Repository for persisting and querying [`Sensor`]s.
pub trait SensorRepository {
    /// Persist a new sensor.
    fn create(&self, sensor: Sensor)
    -> impl Future<Output = Result<Sensor, CrowdMapError>> + Send;

    /// Get a sensor by its unique identifier.
    fn get_by_id(
        &self,
        id: SensorId,
    ) -> impl Future<Output = Result<Option<Sensor>, CrowdMapError>> + Send;

    /// Get the first sensor stored under `name`.
    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Sensor>, CrowdMapError>> + Send;

    /// Get every sensor on a doorway of `room`.
    fn find_by_room(
        &self,
        room: RoomId,
    ) -> impl Future<Output = Result<Vec<Sensor>, CrowdMapError>> + Send;

    /// Get all sensors.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Sensor>, CrowdMapError>> + Send;

    /// Replace a stored sensor.
    fn update(&self, sensor: Sensor)
    -> impl Future<Output = Result<Sensor, CrowdMapError>> + Send;

    /// Delete a sensor by id.
    fn delete(&self, id: SensorId) -> impl Future<Output = Result<(), CrowdMapError>> + Send;
}

/// Repository for persisting and querying [`Visitor`]s.
pub trait VisitorRepository {
    /// Persist a new visitor.
    fn create(
        &self,
        visitor: Visitor,
    ) -> impl Future<Output = Result<Visitor, CrowdMapError>> + Send;

    /// Get a visitor by its unique identifier.
    fn get_by_id(
        &self,
        id: VisitorId,
    ) -> impl Future<Output = Result<Option<Visitor>, CrowdMapError>> + Send;

    /// Get all visitors.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Visitor>, CrowdMapError>> + Send;

    /// Replace a stored visitor.
    fn update(
        &self,
        visitor: Visitor,
    ) -> impl Future<Output = Result<Visitor, CrowdMapError>> + Send;

    /// Delete a visitor by id.
    fn delete(&self, id: VisitorId) -> impl Future<Output = Result<(), CrowdMapError>> + Send;
}
