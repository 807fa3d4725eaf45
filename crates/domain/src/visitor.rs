//! Visitor — a person's movement history across rooms.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::CrowdMapError;
use crate::id::{RoomId, VisitorId};
use crate::reference::{ROOMS_COLLECTION, RoomRef};
use crate::time::Timestamp;
use crate::validation::{Check, FieldRule, validate_document};

/// Rules a visitor document must satisfy, in evaluation order.
pub const VISITOR_RULES: &[FieldRule] = &[
    FieldRule::new("name", Check::NonEmptyString, "name must be a non-empty string"),
    FieldRule::new(
        "visited_rooms",
        Check::ReferenceList {
            collection: ROOMS_COLLECTION,
            exact: None,
        },
        "visited_rooms must be a list of room references",
    ),
    FieldRule::new(
        "visit_date",
        Check::Nullable(&Check::Timestamp),
        "visit_date must be an RFC 3339 timestamp",
    ),
];

/// Check a visitor document against [`VISITOR_RULES`].
///
/// # Errors
///
/// Returns [`CrowdMapError::Validation`] for the first rule that fails.
pub fn validate_visitor_document(document: &Value) -> Result<(), CrowdMapError> {
    Ok(validate_document(document, VISITOR_RULES)?)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visitor {
    pub id: VisitorId,
    pub name: String,
    /// Rooms in the order they were visited. May repeat.
    pub visited_rooms: Vec<RoomRef>,
    #[serde(default)]
    pub visit_date: Option<Timestamp>,
}

impl Visitor {
    /// Create a builder for constructing a [`Visitor`].
    #[must_use]
    pub fn builder() -> VisitorBuilder {
        VisitorBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CrowdMapError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<(), CrowdMapError> {
        validate_visitor_document(&self.to_document())
    }

    #[must_use]
    pub fn to_document(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "visited_rooms": self.visited_rooms,
            "visit_date": self.visit_date,
        })
    }

    /// Validate a document and decode it into a [`Visitor`].
    ///
    /// # Errors
    ///
    /// Returns [`CrowdMapError::Validation`] if a rule fails, or
    /// [`CrowdMapError::Document`] if the document cannot be decoded.
    pub fn from_document(document: Value) -> Result<Self, CrowdMapError> {
        validate_visitor_document(&document)?;
        Ok(serde_json::from_value(document)?)
    }
}

/// Step-by-step builder for [`Visitor`].
#[derive(Debug, Default)]
pub struct VisitorBuilder {
    id: Option<VisitorId>,
    name: Option<String>,
    visited_rooms: Vec<RoomRef>,
    visit_date: Option<Timestamp>,
}

impl VisitorBuilder {
    #[must_use]
    pub fn id(mut self, id: VisitorId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn visited(mut self, room: RoomId) -> Self {
        self.visited_rooms.push(RoomRef::new(room));
        self
    }

    #[must_use]
    pub fn visit_date(mut self, date: Timestamp) -> Self {
        self.visit_date = Some(date);
        self
    }

    /// Consume the builder, validate, and return a [`Visitor`].
    ///
    /// # Errors
    ///
    /// Returns [`CrowdMapError::Validation`] if `name` is missing or blank.
    pub fn build(self) -> Result<Visitor, CrowdMapError> {
        let visitor = Visitor {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            visited_rooms: self.visited_rooms,
            visit_date: self.visit_date,
        };
        visitor.validate()?;
        Ok(visitor)
    }
}
