//! Typed links between documents.
//!
//! A link is stored as `{"$ref": "<collection>", "$id": "<uuid>"}` so that a
//! reader can tell a room reference from any other identifier-shaped value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::RoomId;

/// Collection name rooms are stored under.
pub const ROOMS_COLLECTION: &str = "rooms";

/// Reference to a [`Room`](crate::room::Room) held by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLink", into = "RawLink")]
pub struct RoomRef(RoomId);

impl RoomRef {
    #[must_use]
    pub fn new(id: RoomId) -> Self {
        Self(id)
    }

    /// Identifier of the referenced room.
    #[must_use]
    pub fn id(self) -> RoomId {
        self.0
    }
}

impl From<RoomId> for RoomRef {
    fn from(id: RoomId) -> Self {
        Self(id)
    }
}

impl fmt::Display for RoomRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ROOMS_COLLECTION}/{}", self.0)
    }
}

#[derive(Serialize, Deserialize)]
struct RawLink {
    #[serde(rename = "$ref")]
    collection: String,
    #[serde(rename = "$id")]
    id: RoomId,
}

/// A link that points into some other collection.
#[derive(Debug, thiserror::Error)]
#[error("expected a link into `rooms`, found one into `{0}`")]
pub struct ForeignLinkError(String);

impl TryFrom<RawLink> for RoomRef {
    type Error = ForeignLinkError;

    fn try_from(raw: RawLink) -> Result<Self, Self::Error> {
        if raw.collection == ROOMS_COLLECTION {
            Ok(Self(raw.id))
        } else {
            Err(ForeignLinkError(raw.collection))
        }
    }
}

impl From<RoomRef> for RawLink {
    fn from(link: RoomRef) -> Self {
        Self {
            collection: ROOMS_COLLECTION.to_string(),
            id: link.0,
        }
    }
}
