//! Room — a polygon on a floor plan.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::CrowdMapError;
use crate::geometry::{self, Border};
use crate::id::RoomId;
use crate::validation::{Check, ElementType, FieldRule, validate_document};

/// Category of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomType {
    Meeting,
    Lobby,
    Office,
    Exhibition,
    Restroom,
    Shop,
    Restaurant,
}

impl RoomType {
    /// Every variant, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Meeting,
        Self::Lobby,
        Self::Office,
        Self::Exhibition,
        Self::Restroom,
        Self::Shop,
        Self::Restaurant,
    ];

    /// Literals stored in documents, in the order of [`Self::ALL`].
    pub const NAMES: [&'static str; 7] = [
        "MEETING",
        "LOBBY",
        "OFFICE",
        "EXHIBITION",
        "RESTROOM",
        "SHOP",
        "RESTAURANT",
    ];

    /// Literal stored in documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        Self::NAMES[self as usize]
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text that names no [`RoomType`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown room type `{0}`")]
pub struct UnknownRoomType(pub String);

impl FromStr for RoomType {
    type Err = UnknownRoomType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownRoomType(s.to_string()))
    }
}

const FACTOR: Check = Check::BoundedNumber {
    min: Some(0.1),
    max: Some(2.0),
};

const NON_NEGATIVE: Check = Check::BoundedNumber {
    min: Some(0.0),
    max: None,
};

/// Floors of the building, inclusive.
pub const FLOOR: Check = Check::IntRange {
    min: Some(1),
    max: Some(3),
};

/// Rules a room document must satisfy, in evaluation order.
pub const ROOM_RULES: &[FieldRule] = &[
    FieldRule::new("name", Check::NonEmptyString, "name must be a non-empty string"),
    FieldRule::new(
        "type",
        Check::EnumMember(&RoomType::NAMES),
        "type must be one of the known room types",
    ),
    FieldRule::new(
        "crowd_factor",
        FACTOR,
        "crowd_factor must be a number between 0.1 and 2.0",
    ),
    FieldRule::new(
        "popularity_factor",
        FACTOR,
        "popularity_factor must be a number between 0.1 and 2.0",
    ),
    FieldRule::new("area", NON_NEGATIVE, "area must be a non-negative number"),
    FieldRule::new(
        "occupants",
        Check::Optional(&NON_NEGATIVE),
        "occupants must be a non-negative number",
    ),
    FieldRule::new(
        "longitude",
        NON_NEGATIVE,
        "longitude must be a non-negative number",
    ),
    FieldRule::new(
        "latitude",
        NON_NEGATIVE,
        "latitude must be a non-negative number",
    ),
    FieldRule::new("floor", FLOOR, "floor must be an integer between 1 and 3"),
    FieldRule::new(
        "borders",
        Check::CoordinateList {
            min_points: 3,
            pair_width: 2,
            element: ElementType::Float,
        },
        "borders must list at least 3 [longitude, latitude] float pairs",
    ),
];

/// Check a room document against [`ROOM_RULES`].
///
/// # Errors
///
/// Returns [`CrowdMapError::Validation`] for the first rule that fails.
pub fn validate_room_document(document: &Value) -> Result<(), CrowdMapError> {
    Ok(validate_document(document, ROOM_RULES)?)
}

/// A room on the floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: RoomType,
    pub crowd_factor: f64,
    pub popularity_factor: f64,
    #[serde(default)]
    pub occupants: f64,
    /// Stored floor area in square metres. Never derived from `borders`.
    pub area: f64,
    pub longitude: f64,
    pub latitude: f64,
    pub floor: i64,
    pub borders: Vec<Border>,
}

impl Room {
    /// Create a builder for constructing a [`Room`].
    #[must_use]
    pub fn builder() -> RoomBuilder {
        RoomBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// Rules run in the order of [`ROOM_RULES`] and the first failure is
    /// returned. The room itself is never modified.
    ///
    /// # Errors
    ///
    /// Returns [`CrowdMapError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<(), CrowdMapError> {
        validate_room_document(&self.to_document())
    }

    /// Area of the `borders` polygon in square metres.
    #[must_use]
    pub fn polygon_area(&self) -> f64 {
        geometry::compute_area(&self.borders)
    }

    /// Document form of the room, as handed to the store.
    ///
    /// Non-finite numbers have no JSON representation and come out as `null`.
    #[must_use]
    pub fn to_document(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "type": self.kind,
            "crowd_factor": self.crowd_factor,
            "popularity_factor": self.popularity_factor,
            "occupants": self.occupants,
            "area": self.area,
            "longitude": self.longitude,
            "latitude": self.latitude,
            "floor": self.floor,
            "borders": self.borders,
        })
    }

    /// Validate a document and decode it into a [`Room`].
    ///
    /// # Errors
    ///
    /// Returns [`CrowdMapError::Validation`] if a rule fails, or
    /// [`CrowdMapError::Document`] if the document passes the rules but
    /// cannot be decoded (for example a missing or malformed `id`).
    pub fn from_document(document: Value) -> Result<Self, CrowdMapError> {
        validate_room_document(&document)?;
        Ok(serde_json::from_value(document)?)
    }
}

/// Conjunctive query over rooms. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomFilter {
    pub kind: Option<RoomType>,
    pub floor: Option<i64>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub min_crowd_factor: Option<f64>,
}

impl RoomFilter {
    #[must_use]
    pub fn kind(mut self, kind: RoomType) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn floor(mut self, floor: i64) -> Self {
        self.floor = Some(floor);
        self
    }

    #[must_use]
    pub fn area_between(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_area = min;
        self.max_area = max;
        self
    }

    #[must_use]
    pub fn min_crowd_factor(mut self, min: f64) -> Self {
        self.min_crowd_factor = Some(min);
        self
    }

    /// Whether `room` satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, room: &Room) -> bool {
        self.kind.is_none_or(|kind| room.kind == kind)
            && self.floor.is_none_or(|floor| room.floor == floor)
            && self.min_area.is_none_or(|min| room.area >= min)
            && self.max_area.is_none_or(|max| room.area <= max)
            && self
                .min_crowd_factor
                .is_none_or(|min| room.crowd_factor >= min)
    }
}

/// Step-by-step builder for [`Room`].
#[derive(Debug, Default)]
pub struct RoomBuilder {
    id: Option<RoomId>,
    name: Option<String>,
    kind: Option<RoomType>,
    crowd_factor: Option<f64>,
    popularity_factor: Option<f64>,
    occupants: Option<f64>,
    area: Option<f64>,
    location: Option<(f64, f64)>,
    floor: Option<i64>,
    borders: Vec<Border>,
}

impl RoomBuilder {
    #[must_use]
    pub fn id(mut self, id: RoomId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: RoomType) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn crowd_factor(mut self, crowd_factor: f64) -> Self {
        self.crowd_factor = Some(crowd_factor);
        self
    }

    #[must_use]
    pub fn popularity_factor(mut self, popularity_factor: f64) -> Self {
        self.popularity_factor = Some(popularity_factor);
        self
    }

    #[must_use]
    pub fn occupants(mut self, occupants: f64) -> Self {
        self.occupants = Some(occupants);
        self
    }

    #[must_use]
    pub fn area(mut self, area: f64) -> Self {
        self.area = Some(area);
        self
    }

    /// Reference point of the room.
    #[must_use]
    pub fn location(mut self, longitude: f64, latitude: f64) -> Self {
        self.location = Some((longitude, latitude));
        self
    }

    #[must_use]
    pub fn floor(mut self, floor: i64) -> Self {
        self.floor = Some(floor);
        self
    }

    /// Append one `[longitude, latitude]` vertex.
    #[must_use]
    pub fn border(mut self, longitude: f64, latitude: f64) -> Self {
        self.borders.push([longitude, latitude]);
        self
    }

    #[must_use]
    pub fn borders(mut self, borders: impl IntoIterator<Item = Border>) -> Self {
        self.borders.extend(borders);
        self
    }

    /// Consume the builder, validate, and return a [`Room`].
    ///
    /// Unset numeric fields fall back to values that fail validation where
    /// the field is required (factors, floor), so a forgotten field surfaces
    /// as a validation error rather than a silent default.
    ///
    /// # Errors
    ///
    /// Returns [`CrowdMapError::Validation`] for the first invalid field.
    pub fn build(self) -> Result<Room, CrowdMapError> {
        let (longitude, latitude) = self.location.unwrap_or_default();
        let room = Room {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            kind: self.kind.unwrap_or(RoomType::Office),
            crowd_factor: self.crowd_factor.unwrap_or_default(),
            popularity_factor: self.popularity_factor.unwrap_or_default(),
            occupants: self.occupants.unwrap_or_default(),
            area: self.area.unwrap_or_default(),
            longitude,
            latitude,
            floor: self.floor.unwrap_or_default(),
            borders: self.borders,
        };
        room.validate()?;
        Ok(room)
    }
}
