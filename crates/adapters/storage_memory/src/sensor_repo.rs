//! In-memory implementation of [`SensorRepository`].

use std::future::Future;

use crowdmap_app::ports::SensorRepository;
use crowdmap_domain::error::{CrowdMapError, NotFoundError};
use crowdmap_domain::id::{RoomId, SensorId};
use crowdmap_domain::sensor::Sensor;

use crate::store::Collection;

/// Document-backed sensor repository.
pub struct MemorySensorRepository {
    collection: Collection,
}

impl MemorySensorRepository {
    /// Create a new repository over the given collection.
    #[must_use]
    pub fn new(collection: Collection) -> Self {
        Self { collection }
    }

    fn decode_all(&self) -> Result<Vec<Sensor>, CrowdMapError> {
        self.collection
            .all()?
            .into_iter()
            .map(Sensor::from_document)
            .collect()
    }
}

impl SensorRepository for MemorySensorRepository {
    fn create(&self, sensor: Sensor) -> impl Future<Output = Result<Sensor, CrowdMapError>> + Send {
        let collection = self.collection.clone();
        async move {
            collection.insert(sensor.id.to_string(), sensor.to_document())?;
            Ok(sensor)
        }
    }

    fn get_by_id(
        &self,
        id: SensorId,
    ) -> impl Future<Output = Result<Option<Sensor>, CrowdMapError>> + Send {
        let collection = self.collection.clone();
        async move {
            collection
                .get(&id.to_string())?
                .map(Sensor::from_document)
                .transpose()
        }
    }

    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Sensor>, CrowdMapError>> + Send {
        let result = self
            .decode_all()
            .map(|sensors| sensors.into_iter().find(|sensor| sensor.name == name));
        async move { result }
    }

    fn find_by_room(
        &self,
        room: RoomId,
    ) -> impl Future<Output = Result<Vec<Sensor>, CrowdMapError>> + Send {
        let result: Result<Vec<Sensor>, CrowdMapError> = self.decode_all().map(|sensors| {
            sensors
                .into_iter()
                .filter(|sensor| sensor.connects(room))
                .collect()
        });
        async move { result }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Sensor>, CrowdMapError>> + Send {
        let result = self.decode_all();
        async move { result }
    }

    fn update(&self, sensor: Sensor) -> impl Future<Output = Result<Sensor, CrowdMapError>> + Send {
        let collection = self.collection.clone();
        async move {
            let id = sensor.id.to_string();
            if collection.replace(&id, sensor.to_document())? {
                Ok(sensor)
            } else {
                Err(NotFoundError {
                    entity: "Sensor",
                    id,
                }
                .into())
            }
        }
    }

    fn delete(&self, id: SensorId) -> impl Future<Output = Result<(), CrowdMapError>> + Send {
        let collection = self.collection.clone();
        async move {
            collection.remove(&id.to_string())?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Database;
    use crowdmap_domain::error::ValidationError;
    use serde_json::json;

    fn setup() -> (Database, MemorySensorRepository) {
        let db = Database::new();
        let repo = MemorySensorRepository::new(db.sensors().clone());
        (db, repo)
    }

    fn test_sensor(name: &str, a: RoomId, b: RoomId) -> Sensor {
        Sensor::builder()
            .name(name)
            .room(a)
            .room(b)
            .location(55.688_9, 12.578_3)
            .floor(1)
            .movement(4, 2)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_create_and_retrieve_sensor_when_valid() {
        let (_db, repo) = setup();
        let sensor = test_sensor("Sensor_101_HALL", RoomId::new(), RoomId::new());
        let id = sensor.id;

        repo.create(sensor.clone()).await.unwrap();

        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched, sensor);
        assert_eq!(fetched.movements, vec![[4, 2]]);
    }

    #[tokio::test]
    async fn should_find_sensor_by_name() {
        let (_db, repo) = setup();
        repo.create(test_sensor("Sensor_A_B", RoomId::new(), RoomId::new()))
            .await
            .unwrap();

        assert!(repo.find_by_name("Sensor_A_B").await.unwrap().is_some());
        assert!(repo.find_by_name("Sensor_B_C").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_find_sensors_touching_room() {
        let (_db, repo) = setup();
        let hall = RoomId::new();
        let (shop, cafe, vault) = (RoomId::new(), RoomId::new(), RoomId::new());
        repo.create(test_sensor("Sensor_HALL_SHOP", hall, shop))
            .await
            .unwrap();
        repo.create(test_sensor("Sensor_CAFE_HALL", cafe, hall))
            .await
            .unwrap();
        repo.create(test_sensor("Sensor_CAFE_VAULT", cafe, vault))
            .await
            .unwrap();

        let names: Vec<String> = repo
            .find_by_room(hall)
            .await
            .unwrap()
            .into_iter()
            .map(|sensor| sensor.name)
            .collect();
        assert_eq!(names, vec!["Sensor_HALL_SHOP", "Sensor_CAFE_HALL"]);
    }

    #[tokio::test]
    async fn should_update_and_delete_sensor() {
        let (_db, repo) = setup();
        let mut sensor = test_sensor("Sensor_A_B", RoomId::new(), RoomId::new());
        let id = sensor.id;
        repo.create(sensor.clone()).await.unwrap();

        sensor.movements.push([1, 0]);
        repo.update(sensor).await.unwrap();
        assert_eq!(
            repo.get_by_id(id).await.unwrap().unwrap().movements.len(),
            2
        );

        repo.delete(id).await.unwrap();
        assert!(repo.get_by_id(id).await.unwrap().is_none());
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_report_stored_sensor_with_bare_string_reference() {
        let (db, repo) = setup();
        let sensor = test_sensor("Sensor_A_B", RoomId::new(), RoomId::new());
        let id = sensor.id;
        let mut document = sensor.to_document();
        document["rooms"] = json!(["HALL", "SHOP"]);
        db.sensors().insert(id.to_string(), document).unwrap();

        let result = repo.get_all().await;
        assert!(matches!(
            result,
            Err(CrowdMapError::Validation(ValidationError { field: "rooms", .. }))
        ));
    }
}
