//! In-memory implementation of [`VisitorRepository`].

use std::future::Future;

use crowdmap_app::ports::VisitorRepository;
use crowdmap_domain::error::{CrowdMapError, NotFoundError};
use crowdmap_domain::id::VisitorId;
use crowdmap_domain::visitor::Visitor;

use crate::store::Collection;

/// Document-backed visitor repository.
pub struct MemoryVisitorRepository {
    collection: Collection,
}

impl MemoryVisitorRepository {
    /// Create a new repository over the given collection.
    #[must_use]
    pub fn new(collection: Collection) -> Self {
        Self { collection }
    }
}

impl VisitorRepository for MemoryVisitorRepository {
    fn create(
        &self,
        visitor: Visitor,
    ) -> impl Future<Output = Result<Visitor, CrowdMapError>> + Send {
        let collection = self.collection.clone();
        async move {
            collection.insert(visitor.id.to_string(), visitor.to_document())?;
            Ok(visitor)
        }
    }

    fn get_by_id(
        &self,
        id: VisitorId,
    ) -> impl Future<Output = Result<Option<Visitor>, CrowdMapError>> + Send {
        let collection = self.collection.clone();
        async move {
            collection
                .get(&id.to_string())?
                .map(Visitor::from_document)
                .transpose()
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Visitor>, CrowdMapError>> + Send {
        let collection = self.collection.clone();
        async move {
            collection
                .all()?
                .into_iter()
                .map(Visitor::from_document)
                .collect::<Result<Vec<_>, _>>()
        }
    }

    fn update(
        &self,
        visitor: Visitor,
    ) -> impl Future<Output = Result<Visitor, CrowdMapError>> + Send {
        let collection = self.collection.clone();
        async move {
            let id = visitor.id.to_string();
            if collection.replace(&id, visitor.to_document())? {
                Ok(visitor)
            } else {
                Err(NotFoundError {
                    entity: "Visitor",
                    id,
                }
                .into())
            }
        }
    }

    fn delete(&self, id: VisitorId) -> impl Future<Output = Result<(), CrowdMapError>> + Send {
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
    use crowdmap_domain::id::RoomId;
    use crowdmap_domain::time;

    fn setup() -> MemoryVisitorRepository {
        MemoryVisitorRepository::new(Database::new().visitors().clone())
    }

    #[tokio::test]
    async fn should_store_visit_history_in_order() {
        let repo = setup();
        let (hall, shop) = (RoomId::new(), RoomId::new());
        let visitor = Visitor::builder()
            .name("Ada")
            .visited(hall)
            .visited(shop)
            .visited(hall)
            .visit_date(time::parse_rfc3339("2025-03-01T12:00:00Z").unwrap())
            .build()
            .unwrap();
        let id = visitor.id;

        repo.create(visitor.clone()).await.unwrap();

        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched, visitor);
    }

    #[tokio::test]
    async fn should_update_list_and_delete_visitor() {
        let repo = setup();
        let mut visitor = Visitor::builder().name("Ada").build().unwrap();
        let id = visitor.id;
        repo.create(visitor.clone()).await.unwrap();

        visitor.name = "Grace".to_string();
        repo.update(visitor).await.unwrap();
        let all = repo.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Grace");

        repo.delete(id).await.unwrap();
        assert!(repo.get_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_missing_visitor() {
        let repo = setup();
        let visitor = Visitor::builder().name("Ada").build().unwrap();
        let result = repo.update(visitor).await;
        assert!(matches!(result, Err(CrowdMapError::NotFound(_))));
    }
}
