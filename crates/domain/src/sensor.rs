//! Sensor — a doorway counter between exactly two adjacent rooms.
//!
//! The sensor owns the room relation: it holds two [`RoomRef`]s by value and
//! rooms keep no back-reference. Deleting a room leaves the reference
//! dangling; reconciling that is the store's concern.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::CrowdMapError;
use crate::id::{RoomId, SensorId};
use crate::reference::{ROOMS_COLLECTION, RoomRef};
use crate::room::FLOOR;
use crate::validation::{Check, ElementType, FieldRule, validate_document};

/// Number of rooms a doorway connects.
pub const ROOMS_PER_SENSOR: usize = 2;

/// One legacy movement record: counts in the two directions through the
/// doorway.
pub type Movement = [i64; 2];

/// Rules a sensor document must satisfy, in evaluation order.
pub const SENSOR_RULES: &[FieldRule] = &[
    FieldRule::new("name", Check::NonEmptyString, "name must be a non-empty string"),
    FieldRule::new(
        "rooms",
        Check::ReferenceList {
            collection: ROOMS_COLLECTION,
            exact: Some(ROOMS_PER_SENSOR),
        },
        "rooms must reference exactly two rooms",
    ),
    FieldRule::new("latitude", Check::StrictFloat, "latitude must be a float"),
    FieldRule::new("longitude", Check::StrictFloat, "longitude must be a float"),
    FieldRule::new("floor", FLOOR, "floor must be an integer between 1 and 3"),
    FieldRule::new(
        "movements",
        Check::Optional(&Check::CoordinateList {
            min_points: 0,
            pair_width: 2,
            element: ElementType::Integer,
        }),
        "movements must be a list of integer pairs",
    ),
];

/// Check a sensor document against [`SENSOR_RULES`].
///
/// # Errors
///
/// Returns [`CrowdMapError::Validation`] for the first rule that fails.
pub fn validate_sensor_document(document: &Value) -> Result<(), CrowdMapError> {
    Ok(validate_document(document, SENSOR_RULES)?)
}

/// A doorway sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    pub id: SensorId,
    pub name: String,
    pub rooms: Vec<RoomRef>,
    /// Location of the doorway itself, not of either room.
    pub latitude: f64,
    pub longitude: f64,
    pub floor: i64,
    #[serde(default)]
    pub movements: Vec<Movement>,
}

impl Sensor {
    /// Create a builder for constructing a [`Sensor`].
    #[must_use]
    pub fn builder() -> SensorBuilder {
        SensorBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CrowdMapError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<(), CrowdMapError> {
        validate_sensor_document(&self.to_document())
    }

    /// Whether the sensor sits on a doorway of `room`.
    #[must_use]
    pub fn connects(&self, room: RoomId) -> bool {
        self.rooms.iter().any(|link| link.id() == room)
    }

    /// Document form of the sensor, as handed to the store.
    #[must_use]
    pub fn to_document(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "rooms": self.rooms,
            "latitude": self.latitude,
            "longitude": self.longitude,
            "floor": self.floor,
            "movements": self.movements,
        })
    }

    /// Validate a document and decode it into a [`Sensor`].
    ///
    /// A document without `movements` decodes with an empty history.
    ///
    /// # Errors
    ///
    /// Returns [`CrowdMapError::Validation`] if a rule fails, or
    /// [`CrowdMapError::Document`] if the document cannot be decoded.
    pub fn from_document(document: Value) -> Result<Self, CrowdMapError> {
        validate_sensor_document(&document)?;
        Ok(serde_json::from_value(document)?)
    }
}

/// Step-by-step builder for [`Sensor`].
#[derive(Debug, Default)]
pub struct SensorBuilder {
    id: Option<SensorId>,
    name: Option<String>,
    rooms: Vec<RoomRef>,
    location: Option<(f64, f64)>,
    floor: Option<i64>,
    movements: Vec<Movement>,
}

impl SensorBuilder {
    #[must_use]
    pub fn id(mut self, id: SensorId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append one connected room.
    #[must_use]
    pub fn room(mut self, room: RoomId) -> Self {
        self.rooms.push(RoomRef::new(room));
        self
    }

    /// Doorway location.
    #[must_use]
    pub fn location(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some((latitude, longitude));
        self
    }

    #[must_use]
    pub fn floor(mut self, floor: i64) -> Self {
        self.floor = Some(floor);
        self
    }

    #[must_use]
    pub fn movement(mut self, inbound: i64, outbound: i64) -> Self {
        self.movements.push([inbound, outbound]);
        self
    }

    /// Consume the builder, validate, and return a [`Sensor`].
    ///
    /// # Errors
    ///
    /// Returns [`CrowdMapError::Validation`] if a required field is missing
    /// or invalid.
    pub fn build(self) -> Result<Sensor, CrowdMapError> {
        // A missing location must fail validation, not default to (0, 0).
        let (latitude, longitude) = self.location.unwrap_or((f64::NAN, f64::NAN));
        let sensor = Sensor {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            rooms: self.rooms,
            latitude,
            longitude,
            floor: self.floor.unwrap_or_default(),
            movements: self.movements,
        };
        sensor.validate()?;
        Ok(sensor)
    }
}
