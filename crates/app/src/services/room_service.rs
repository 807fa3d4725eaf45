//! Room service — use-cases for managing rooms.

use crowdmap_domain::error::{CrowdMapError, NotFoundError};
use crowdmap_domain::id::RoomId;
use crowdmap_domain::room::{Room, RoomFilter};

use crate::ports::RoomRepository;

/// Application service for room CRUD operations.
pub struct RoomService<R> {
    repo: R,
}

impl<R: RoomRepository> RoomService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new room after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CrowdMapError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, room), fields(room_name = %room.name))]
    pub async fn create_room(&self, room: Room) -> Result<Room, CrowdMapError> {
        room.validate()?;
        self.repo.create(room).await
    }

    /// Look up a room by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`CrowdMapError::NotFound`] when no room with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_room(&self, id: RoomId) -> Result<Room, CrowdMapError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Room",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all rooms.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_rooms(&self) -> Result<Vec<Room>, CrowdMapError> {
        self.repo.get_all().await
    }

    /// List rooms matching every criterion of `filter`.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn find_rooms(&self, filter: &RoomFilter) -> Result<Vec<Room>, CrowdMapError> {
        self.repo.find(filter).await
    }

    /// Update an existing room. The post-update values are validated again.
    ///
    /// # Errors
    ///
    /// Returns [`CrowdMapError::Validation`] if invariants fail,
    /// [`CrowdMapError::NotFound`] if the room does not exist, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self, room), fields(room_name = %room.name))]
    pub async fn update_room(&self, room: Room) -> Result<Room, CrowdMapError> {
        room.validate()?;
        self.get_room(room.id).await?;
        self.repo.update(room).await
    }

    /// Delete a room by id.
    ///
    /// Sensors that reference the room keep a dangling reference.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_room(&self, id: RoomId) -> Result<(), CrowdMapError> {
        self.repo.delete(id).await
    }
}
