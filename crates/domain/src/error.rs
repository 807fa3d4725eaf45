//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`CrowdMapError`] via `#[from]`.

/// Top-level error returned by domain operations and application services.
#[derive(Debug, thiserror::Error)]
pub enum CrowdMapError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("entity not found")]
    NotFound(#[from] NotFoundError),

    #[error("adjacency map integrity error")]
    SeedIntegrity(#[from] SeedIntegrityError),

    #[error("malformed document")]
    Document(#[from] serde_json::Error),

    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// The first field rule an entity violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid `{field}`: {message} ({reason})")]
pub struct ValidationError {
    /// Document key of the offending field.
    pub field: &'static str,
    /// Fixed description of the rule attached to the field.
    pub message: &'static str,
    /// What the predicate observed.
    pub reason: String,
}

/// Lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} `{id}` not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// The adjacency map handed to the seeder is not self-consistent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeedIntegrityError {
    #[error("room `{room}` lists neighbor `{neighbor}` which has no entry in the adjacency map")]
    UnknownNeighbor { room: String, neighbor: String },

    #[error("room `{room}` lists itself as a neighbor")]
    SelfAdjacent { room: String },
}
