//! In-memory repositories shared by the service tests.

use std::future::Future;
use std::sync::Mutex;

use crowdmap_domain::error::CrowdMapError;
use crowdmap_domain::id::{RoomId, SensorId, VisitorId};
use crowdmap_domain::room::{Room, RoomFilter};
use crowdmap_domain::sensor::Sensor;
use crowdmap_domain::visitor::Visitor;

use crate::ports::{RoomRepository, SensorRepository, VisitorRepository};

pub fn room_named(name: &str) -> Room {
    Room::builder()
        .name(name)
        .crowd_factor(0.5)
        .popularity_factor(1.0)
        .area(100.0)
        .location(10.0, 50.0)
        .floor(1)
        .border(10.0, 50.0)
        .border(10.001, 50.0)
        .border(10.0, 50.001)
        .build()
        .unwrap()
}

#[derive(Default)]
pub struct InMemoryRoomRepo {
    store: Mutex<Vec<Room>>,
}

impl RoomRepository for InMemoryRoomRepo {
    fn create(&self, room: Room) -> impl Future<Output = Result<Room, CrowdMapError>> + Send {
        self.store.lock().unwrap().push(room.clone());
        async { Ok(room) }
    }

    fn get_by_id(
        &self,
        id: RoomId,
    ) -> impl Future<Output = Result<Option<Room>, CrowdMapError>> + Send {
        let store = self.store.lock().unwrap();
        let result = store.iter().find(|room| room.id == id).cloned();
        async { Ok(result) }
    }

    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Room>, CrowdMapError>> + Send {
        let store = self.store.lock().unwrap();
        let result = store.iter().find(|room| room.name == name).cloned();
        async { Ok(result) }
    }

    fn find(
        &self,
        filter: &RoomFilter,
    ) -> impl Future<Output = Result<Vec<Room>, CrowdMapError>> + Send {
        let store = self.store.lock().unwrap();
        let result: Vec<Room> = store.iter().filter(|room| filter.matches(room)).cloned().collect();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Room>, CrowdMapError>> + Send {
        let result = self.store.lock().unwrap().clone();
        async { Ok(result) }
    }

    fn update(&self, room: Room) -> impl Future<Output = Result<Room, CrowdMapError>> + Send {
        let mut store = self.store.lock().unwrap();
        if let Some(slot) = store.iter_mut().find(|stored| stored.id == room.id) {
            *slot = room.clone();
        }
        async { Ok(room) }
    }

    fn delete(&self, id: RoomId) -> impl Future<Output = Result<(), CrowdMapError>> + Send {
        self.store.lock().unwrap().retain(|room| room.id != id);
        async { Ok(()) }
    }
}

#[derive(Default)]
pub struct InMemorySensorRepo {
    store: Mutex<Vec<Sensor>>,
}

impl SensorRepository for InMemorySensorRepo {
    fn create(&self, sensor: Sensor) -> impl Future<Output = Result<Sensor, CrowdMapError>> + Send {
        self.store.lock().unwrap().push(sensor.clone());
        async { Ok(sensor) }
    }

    fn get_by_id(
        &self,
        id: SensorId,
    ) -> impl Future<Output = Result<Option<Sensor>, CrowdMapError>> + Send {
        let store = self.store.lock().unwrap();
        let result = store.iter().find(|sensor| sensor.id == id).cloned();
        async { Ok(result) }
    }

    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Sensor>, CrowdMapError>> + Send {
        let store = self.store.lock().unwrap();
        let result = store.iter().find(|sensor| sensor.name == name).cloned();
        async { Ok(result) }
    }

    fn find_by_room(
        &self,
        room: RoomId,
    ) -> impl Future<Output = Result<Vec<Sensor>, CrowdMapError>> + Send {
        let store = self.store.lock().unwrap();
        let result: Vec<Sensor> = store.iter().filter(|s| s.connects(room)).cloned().collect();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Sensor>, CrowdMapError>> + Send {
        let result = self.store.lock().unwrap().clone();
        async { Ok(result) }
    }

    fn update(&self, sensor: Sensor) -> impl Future<Output = Result<Sensor, CrowdMapError>> + Send {
        let mut store = self.store.lock().unwrap();
        if let Some(slot) = store.iter_mut().find(|stored| stored.id == sensor.id) {
            *slot = sensor.clone();
        }
        async { Ok(sensor) }
    }

    fn delete(&self, id: SensorId) -> impl Future<Output = Result<(), CrowdMapError>> + Send {
        self.store.lock().unwrap().retain(|sensor| sensor.id != id);
        async { Ok(()) }
    }
}

#[derive(Default)]
pub struct InMemoryVisitorRepo {
    store: Mutex<Vec<Visitor>>,
}

impl VisitorRepository for InMemoryVisitorRepo {
    fn create(
        &self,
        visitor: Visitor,
    ) -> impl Future<Output = Result<Visitor, CrowdMapError>> + Send {
        self.store.lock().unwrap().push(visitor.clone());
        async { Ok(visitor) }
    }

    fn get_by_id(
        &self,
        id: VisitorId,
    ) -> impl Future<Output = Result<Option<Visitor>, CrowdMapError>> + Send {
        let store = self.store.lock().unwrap();
        let result = store.iter().find(|visitor| visitor.id == id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Visitor>, CrowdMapError>> + Send {
        let result = self.store.lock().unwrap().clone();
        async { Ok(result) }
    }

    fn update(
        &self,
        visitor: Visitor,
    ) -> impl Future<Output = Result<Visitor, CrowdMapError>> + Send {
        let mut store = self.store.lock().unwrap();
        if let Some(slot) = store.iter_mut().find(|stored| stored.id == visitor.id) {
            *slot = visitor.clone();
        }
        async { Ok(visitor) }
    }

    fn delete(&self, id: VisitorId) -> impl Future<Output = Result<(), CrowdMapError>> + Send {
        self.store.lock().unwrap().retain(|visitor| visitor.id != id);
        async { Ok(()) }
    }
}
