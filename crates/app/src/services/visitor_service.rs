//! Visitor service — use-cases for recording visitors and their routes.

use crowdmap_domain::error::{CrowdMapError, NotFoundError};
use crowdmap_domain::id::{RoomId, VisitorId};
use crowdmap_domain::reference::RoomRef;
use crowdmap_domain::visitor::Visitor;

use crate::ports::{RoomRepository, VisitorRepository};

/// Application service for visitor CRUD operations.
pub struct VisitorService<V, R> {
    visitors: V,
    rooms: R,
}

impl<V: VisitorRepository, R: RoomRepository> VisitorService<V, R> {
    /// Create a new service backed by the given repositories.
    pub fn new(visitors: V, rooms: R) -> Self {
        Self { visitors, rooms }
    }

    /// Create a new visitor after validating invariants and room references.
    ///
    /// # Errors
    ///
    /// Returns [`CrowdMapError::Validation`] if invariants fail,
    /// [`CrowdMapError::NotFound`] if a visited room does not exist, or a
    /// storage error propagated from a repository.
    #[tracing::instrument(skip(self, visitor), fields(visitor_name = %visitor.name))]
    pub async fn create_visitor(&self, visitor: Visitor) -> Result<Visitor, CrowdMapError> {
        visitor.validate()?;
        self.ensure_rooms_exist(visitor.visited_rooms.iter().copied()).await?;
        self.visitors.create(visitor).await
    }

    /// Look up a visitor by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`CrowdMapError::NotFound`] when no visitor with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_visitor(&self, id: VisitorId) -> Result<Visitor, CrowdMapError> {
        self.visitors.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Visitor",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all visitors.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_visitors(&self) -> Result<Vec<Visitor>, CrowdMapError> {
        self.visitors.get_all().await
    }

    /// Append `room` to the visitor's route and persist it.
    ///
    /// Only `room` has to exist; earlier stops are kept even if their rooms
    /// were deleted since.
    ///
    /// # Errors
    ///
    /// Returns [`CrowdMapError::NotFound`] if the visitor or the room does not
    /// exist, or a storage error from a repository.
    #[tracing::instrument(skip(self))]
    pub async fn record_visit(
        &self,
        id: VisitorId,
        room: RoomId,
    ) -> Result<Visitor, CrowdMapError> {
        let mut visitor = self.get_visitor(id).await?;
        let link = RoomRef::new(room);
        visitor.visited_rooms.push(link);
        visitor.validate()?;
        self.ensure_rooms_exist([link]).await?;
        self.visitors.update(visitor).await
    }

    /// Update an existing visitor. The post-update values are validated again.
    ///
    /// Only rooms missing from the stored route are checked for existence.
    ///
    /// # Errors
    ///
    /// Returns [`CrowdMapError::Validation`] if invariants fail,
    /// [`CrowdMapError::NotFound`] if the visitor or a newly visited room
    /// does not exist, or a storage error from a repository.
    #[tracing::instrument(skip(self, visitor), fields(visitor_name = %visitor.name))]
    pub async fn update_visitor(&self, visitor: Visitor) -> Result<Visitor, CrowdMapError> {
        visitor.validate()?;
        let stored = self.get_visitor(visitor.id).await?;
        let added = visitor
            .visited_rooms
            .iter()
            .copied()
            .filter(|link| !stored.visited_rooms.contains(link));
        self.ensure_rooms_exist(added).await?;
        self.visitors.update(visitor).await
    }

    /// Delete a visitor by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_visitor(&self, id: VisitorId) -> Result<(), CrowdMapError> {
        self.visitors.delete(id).await
    }

    async fn ensure_rooms_exist(
        &self,
        links: impl IntoIterator<Item = RoomRef>,
    ) -> Result<(), CrowdMapError> {
        for link in links {
            if self.rooms.get_by_id(link.id()).await?.is_none() {
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
