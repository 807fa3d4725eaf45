//! Seed service — persist the rooms and sensors derived from an adjacency map.

use std::collections::HashMap;

use crowdmap_domain::adjacency::{AdjacencyMap, RoomDefaults, seed_from_adjacency_with};
use crowdmap_domain::error::CrowdMapError;
use crowdmap_domain::id::RoomId;
use crowdmap_domain::reference::RoomRef;

use crate::ports::{RoomRepository, SensorRepository};

/// Outcome of a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub rooms_created: usize,
    /// Rooms that already existed under the same name.
    pub rooms_reused: usize,
    pub sensors_created: usize,
    /// Sensors that already existed under the same name.
    pub sensors_skipped: usize,
}

/// Writes a derived floor plan into the room and sensor stores.
///
/// Seeding is idempotent: rooms are matched by name and sensors by their
/// deterministic pair name, so a second run creates nothing.
pub struct SeedService<R, S> {
    rooms: R,
    sensors: S,
}

impl<R: RoomRepository, S: SensorRepository> SeedService<R, S> {
    /// Create a new service backed by the given repositories.
    pub fn new(rooms: R, sensors: S) -> Self {
        Self { rooms, sensors }
    }

    /// Derive rooms and sensors from `map` and persist the ones not yet stored.
    ///
    /// The whole map is checked before anything is written, so an integrity
    /// error leaves both stores untouched. Rooms are written before sensors.
    ///
    /// # Errors
    ///
    /// Returns [`CrowdMapError::SeedIntegrity`] or [`CrowdMapError::Validation`]
    /// from derivation, or a storage error propagated from a repository.
    #[tracing::instrument(skip(self, map, defaults), fields(rooms = map.len()))]
    pub async fn seed(
        &self,
        map: &AdjacencyMap,
        defaults: &RoomDefaults,
    ) -> Result<SeedReport, CrowdMapError> {
        let seed = seed_from_adjacency_with(map, defaults)?;
        let mut report = SeedReport::default();

        // Derived id → stored id, so sensors point at reused rooms.
        let mut stored_ids: HashMap<RoomId, RoomId> = HashMap::with_capacity(seed.rooms.len());
        for room in seed.rooms {
            let existing = self.rooms.find_by_name(&room.name).await?;
            match existing {
                Some(existing) => {
                    tracing::debug!(room = %room.name, "room already stored");
                    stored_ids.insert(room.id, existing.id);
                    report.rooms_reused += 1;
                }
                None => {
                    let created = self.rooms.create(room).await?;
                    stored_ids.insert(created.id, created.id);
                    report.rooms_created += 1;
                }
            }
        }

        for mut sensor in seed.sensors {
            if self.sensors.find_by_name(&sensor.name).await?.is_some() {
                tracing::debug!(sensor = %sensor.name, "sensor already stored");
                report.sensors_skipped += 1;
                continue;
            }
            for link in &mut sensor.rooms {
                if let Some(&id) = stored_ids.get(&link.id()) {
                    *link = RoomRef::new(id);
                }
            }
            self.sensors.create(sensor).await?;
            report.sensors_created += 1;
        }

        if report.rooms_created == 0 && report.sensors_created == 0 {
            tracing::warn!("floor plan already seeded, nothing written");
        } else {
            tracing::info!(
                rooms_created = report.rooms_created,
                rooms_reused = report.rooms_reused,
                sensors_created = report.sensors_created,
                sensors_skipped = report.sensors_skipped,
                "floor plan seeded"
            );
        }
        Ok(report)
    }
}
