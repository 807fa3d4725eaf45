//! In-memory implementation of [`RoomRepository`].

use std::future::Future;

use crowdmap_app::ports::RoomRepository;
use crowdmap_domain::error::{CrowdMapError, NotFoundError};
use crowdmap_domain::id::RoomId;
use crowdmap_domain::room::{Room, RoomFilter};

use crate::store::Collection;

/// Document-backed room repository.
pub struct MemoryRoomRepository {
    collection: Collection,
}

impl MemoryRoomRepository {
    /// Create a new repository over the given collection.
    #[must_use]
    pub fn new(collection: Collection) -> Self {
        Self { collection }
    }

    fn decode_all(&self) -> Result<Vec<Room>, CrowdMapError> {
        self.collection
            .all()?
            .into_iter()
            .map(Room::from_document)
            .collect()
    }
}

impl RoomRepository for MemoryRoomRepository {
    fn create(&self, room: Room) -> impl Future<Output = Result<Room, CrowdMapError>> + Send {
        let collection = self.collection.clone();
        async move {
            collection.insert(room.id.to_string(), room.to_document())?;
            Ok(room)
        }
    }

    fn get_by_id(
        &self,
        id: RoomId,
    ) -> impl Future<Output = Result<Option<Room>, CrowdMapError>> + Send {
        let collection = self.collection.clone();
        async move {
            collection
                .get(&id.to_string())?
                .map(Room::from_document)
                .transpose()
        }
    }

    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Room>, CrowdMapError>> + Send {
        let result = self
            .decode_all()
            .map(|rooms| rooms.into_iter().find(|room| room.name == name));
        async move { result }
    }

    fn find(
        &self,
        filter: &RoomFilter,
    ) -> impl Future<Output = Result<Vec<Room>, CrowdMapError>> + Send {
        let result: Result<Vec<Room>, CrowdMapError> = self.decode_all().map(|rooms| {
            rooms
                .into_iter()
                .filter(|room| filter.matches(room))
                .collect()
        });
        async move { result }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Room>, CrowdMapError>> + Send {
        let result = self.decode_all();
        async move { result }
    }

    fn update(&self, room: Room) -> impl Future<Output = Result<Room, CrowdMapError>> + Send {
        let collection = self.collection.clone();
        async move {
            let id = room.id.to_string();
            if collection.replace(&id, room.to_document())? {
                Ok(room)
            } else {
                Err(NotFoundError { entity: "Room", id }.into())
            }
        }
    }

    fn delete(&self, id: RoomId) -> impl Future<Output = Result<(), CrowdMapError>> + Send {
        let collection = self.collection.clone();
        async move {
            collection.remove(&id.to_string())?;
            Ok(())
        }
    }
}
