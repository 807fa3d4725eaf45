//! Sensor service — use-cases for managing doorway sensors.

use crowdmap_domain::error::{CrowdMapError, NotFoundError};
use crowdmap_domain::id::{RoomId, SensorId};
use crowdmap_domain::reference::RoomRef;
use crowdmap_domain::sensor::Sensor;

use crate::ports::{RoomRepository, SensorRepository};

/// Application service for sensor CRUD operations.
///
/// Writes are validated and every newly referenced room must exist in the
/// room store at write time. Rooms deleted later are not reconciled.
pub struct SensorService<S, R> {
    sensors: S,
    rooms: R,
}

impl<S: SensorRepository, R: RoomRepository> SensorService<S, R> {
    /// Create a new service backed by the given repositories.
    pub fn new(sensors: S, rooms: R) -> Self {
        Self { sensors, rooms }
    }

    /// Create a new sensor after validating invariants and room references.
    ///
    /// # Errors
    ///
    /// Returns [`CrowdMapError::Validation`] if invariants fail,
    /// [`CrowdMapError::NotFound`] if a referenced room does not exist, or a
    /// storage error propagated from a repository.
    #[tracing::instrument(skip(self, sensor), fields(sensor_name = %sensor.name))]
    pub async fn create_sensor(&self, sensor: Sensor) -> Result<Sensor, CrowdMapError> {
        sensor.validate()?;
        self.ensure_rooms_exist(sensor.rooms.iter().copied()).await?;
        self.sensors.create(sensor).await
    }

    /// Look up a sensor by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`CrowdMapError::NotFound`] when no sensor with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_sensor(&self, id: SensorId) -> Result<Sensor, CrowdMapError> {
        self.sensors.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Sensor",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all sensors.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_sensors(&self) -> Result<Vec<Sensor>, CrowdMapError> {
        self.sensors.get_all().await
    }

    /// List the sensors on the doorways of `room`.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn sensors_for_room(&self, room: RoomId) -> Result<Vec<Sensor>, CrowdMapError> {
        self.sensors.find_by_room(room).await
    }

    /// Update an existing sensor. The post-update values are validated again.
    ///
    /// Only rooms the stored sensor does not already reference are checked
    /// for existence.
    ///
    /// # Errors
    ///
    /// Returns [`CrowdMapError::Validation`] if invariants fail,
    /// [`CrowdMapError::NotFound`] if the sensor or a newly referenced room
    /// does not exist, or a storage error from a repository.
    #[tracing::instrument(skip(self, sensor), fields(sensor_name = %sensor.name))]
    pub async fn update_sensor(&self, sensor: Sensor) -> Result<Sensor, CrowdMapError> {
        sensor.validate()?;
        let stored = self.get_sensor(sensor.id).await?;
        let added = sensor
            .rooms
            .iter()
            .copied()
            .filter(|link| !stored.rooms.contains(link));
        self.ensure_rooms_exist(added).await?;
        self.sensors.update(sensor).await
    }

    /// Delete a sensor by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_sensor(&self, id: SensorId) -> Result<(), CrowdMapError> {
        self.sensors.delete(id).await
    }

    async fn ensure_rooms_exist(
        &self,
        links: impl IntoIterator<Item = RoomRef>,
    ) -> Result<(), CrowdMapError> {
        for link in links {
            if self.rooms.get_by_id(link.id()).await?.is_none() {
                tracing::debug!(room = %link, "sensor references a missing room");
                return Err(NotFoundError {
                    entity: "Room",
                    id: link.id().to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}
