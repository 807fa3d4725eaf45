//! Field-level validation engine.
//!
//! Entities are validated in their document form (a JSON object), which is
//! the shape every client of the store reads and writes. Each entity exposes
//! an ordered list of [`FieldRule`]s; [`validate_document`] walks that list
//! and stops at the first rule that fails. Callers and tests rely on the
//! identity of that first failure, so rule order is part of the contract.
//!
//! The atomic predicates are exposed as free functions so they can be reused
//! outside an entity rule list. Each returns `Err(reason)` with a
//! human-readable reason on failure.

use serde_json::Value;

use crate::error::ValidationError;
use crate::time;

/// Value type expected inside each entry of a coordinate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    /// A JSON number written as a float. Integer literals are rejected.
    Float,
    /// A JSON number written as an integer. Float literals are rejected.
    Integer,
}

impl ElementType {
    fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (Self::Float, Value::Number(n)) => n.is_f64(),
            (Self::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            _ => false,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Integer => "integer",
        }
    }
}

/// One atomic check applied to a single document field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Check {
    /// See [`non_empty_string`].
    NonEmptyString,
    /// See [`bounded_number`].
    BoundedNumber { min: Option<f64>, max: Option<f64> },
    /// See [`enum_member`].
    EnumMember(&'static [&'static str]),
    /// See [`int_range`].
    IntRange { min: Option<i64>, max: Option<i64> },
    /// See [`strict_float`].
    StrictFloat,
    /// See [`coordinate_list`].
    CoordinateList {
        min_points: usize,
        pair_width: usize,
        element: ElementType,
    },
    /// See [`reference_list`].
    ReferenceList {
        collection: &'static str,
        exact: Option<usize>,
    },
    /// See [`timestamp`].
    Timestamp,
    /// Absent passes; a present value, `null` included, must satisfy the
    /// inner check.
    Optional(&'static Check),
    /// Absent or `null` passes; anything else must satisfy the inner check.
    Nullable(&'static Check),
}

impl Check {
    /// Run the check against `value`, which is `None` when the field is absent.
    ///
    /// # Errors
    ///
    /// Returns the reason the value was rejected.
    pub fn evaluate(&self, value: Option<&Value>) -> Result<(), String> {
        match *self {
            Self::NonEmptyString => non_empty_string(value),
            Self::BoundedNumber { min, max } => bounded_number(value, min, max),
            Self::EnumMember(allowed) => enum_member(value, allowed),
            Self::IntRange { min, max } => int_range(value, min, max),
            Self::StrictFloat => strict_float(value),
            Self::CoordinateList {
                min_points,
                pair_width,
                element,
            } => coordinate_list(value, min_points, pair_width, element),
            Self::ReferenceList { collection, exact } => reference_list(value, collection, exact),
            Self::Timestamp => timestamp(value),
            Self::Optional(inner) => match value {
                None => Ok(()),
                Some(_) => inner.evaluate(value),
            },
            Self::Nullable(inner) => match value {
                None | Some(Value::Null) => Ok(()),
                Some(_) => inner.evaluate(value),
            },
        }
    }
}

/// A check bound to a document key, with the message reported on failure.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub check: Check,
    pub message: &'static str,
}

impl FieldRule {
    #[must_use]
    pub const fn new(field: &'static str, check: Check, message: &'static str) -> Self {
        Self {
            field,
            check,
            message,
        }
    }
}

/// Run `rules` in order against `document` and stop at the first failure.
///
/// A `document` that is not a JSON object has no fields, so it fails on the
/// first rule whose check rejects an absent value.
///
/// # Errors
///
/// Returns a [`ValidationError`] naming the first rule that failed.
pub fn validate_document(document: &Value, rules: &[FieldRule]) -> Result<(), ValidationError> {
    for rule in rules {
        rule.check
            .evaluate(document.get(rule.field))
            .map_err(|reason| ValidationError {
                field: rule.field,
                message: rule.message,
                reason,
            })?;
    }
    Ok(())
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_f64() => "a float",
        Value::Number(_) => "an integer",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn present(value: Option<&Value>) -> Result<&Value, String> {
    match value {
        None | Some(Value::Null) => Err("value is missing".to_string()),
        Some(value) => Ok(value),
    }
}

/// Fails when the value is absent, not a string, or blank after trimming.
///
/// # Errors
///
/// Returns the reason the value was rejected.
pub fn non_empty_string(value: Option<&Value>) -> Result<(), String> {
    match present(value)? {
        Value::String(text) if text.trim().is_empty() => Err("value is blank".to_string()),
        Value::String(_) => Ok(()),
        other => Err(format!("expected a string, found {}", describe(other))),
    }
}

/// Fails when the value is absent, not numeric, or outside `[min, max]`.
/// Either bound may be omitted.
///
/// # Errors
///
/// Returns the reason the value was rejected.
pub fn bounded_number(
    value: Option<&Value>,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<(), String> {
    let value = present(value)?;
    let Some(number) = value.as_f64() else {
        return Err(format!("expected a number, found {}", describe(value)));
    };
    if let Some(min) = min
        && number < min
    {
        return Err(format!("{number} is below the minimum {min}"));
    }
    if let Some(max) = max
        && number > max
    {
        return Err(format!("{number} is above the maximum {max}"));
    }
    Ok(())
}

/// Fails unless the value is a string equal to one of `allowed`.
///
/// Matching is exact and case-sensitive; non-string values never match.
///
/// # Errors
///
/// Returns the reason the value was rejected.
pub fn enum_member(value: Option<&Value>, allowed: &[&str]) -> Result<(), String> {
    match present(value)? {
        Value::String(text) if allowed.contains(&text.as_str()) => Ok(()),
        Value::String(text) => Err(format!("`{text}` is not one of {}", allowed.join(", "))),
        other => Err(format!("expected a string, found {}", describe(other))),
    }
}

/// Fails when the value is absent, not an integer, or outside `[min, max]`.
///
/// # Errors
///
/// Returns the reason the value was rejected.
pub fn int_range(value: Option<&Value>, min: Option<i64>, max: Option<i64>) -> Result<(), String> {
    let value = present(value)?;
    let Some(number) = value.as_i64() else {
        return Err(format!("expected an integer, found {}", describe(value)));
    };
    if let Some(min) = min
        && number < min
    {
        return Err(format!("{number} is below the minimum {min}"));
    }
    if let Some(max) = max
        && number > max
    {
        return Err(format!("{number} is above the maximum {max}"));
    }
    Ok(())
}

/// Fails unless the value is present and written as a float.
///
/// # Errors
///
/// Returns the reason the value was rejected.
pub fn strict_float(value: Option<&Value>) -> Result<(), String> {
    let value = present(value)?;
    if ElementType::Float.accepts(value) {
        Ok(())
    } else {
        Err(format!("expected a float, found {}", describe(value)))
    }
}

/// Fails when the value is not a list, holds fewer than `min_points`
/// entries, or any entry is not a list of exactly `pair_width` values of
/// `element` type.
///
/// # Errors
///
/// Returns the reason the value was rejected.
pub fn coordinate_list(
    value: Option<&Value>,
    min_points: usize,
    pair_width: usize,
    element: ElementType,
) -> Result<(), String> {
    let value = present(value)?;
    let Value::Array(points) = value else {
        return Err(format!("expected a list, found {}", describe(value)));
    };
    if points.len() < min_points {
        return Err(format!(
            "expected at least {min_points} entries, found {}",
            points.len()
        ));
    }
    for (index, point) in points.iter().enumerate() {
        let Value::Array(pair) = point else {
            return Err(format!(
                "entry {index} should be a list, found {}",
                describe(point)
            ));
        };
        if pair.len() != pair_width {
            return Err(format!(
                "entry {index} should hold {pair_width} values, found {}",
                pair.len()
            ));
        }
        if let Some(bad) = pair.iter().find(|v| !element.accepts(v)) {
            return Err(format!(
                "entry {index} should only hold {} values, found {}",
                element.name(),
                describe(bad)
            ));
        }
    }
    Ok(())
}

/// Fails when the value is not a list of links into `collection`, or when
/// `exact` is given and the list length differs from it.
///
/// A link is an object `{"$ref": collection, "$id": "<uuid>"}`; bare
/// identifiers, links into other collections and any other value are
/// rejected.
///
/// # Errors
///
/// Returns the reason the value was rejected.
pub fn reference_list(
    value: Option<&Value>,
    collection: &str,
    exact: Option<usize>,
) -> Result<(), String> {
    let value = present(value)?;
    let Value::Array(links) = value else {
        return Err(format!("expected a list, found {}", describe(value)));
    };
    if let Some(exact) = exact
        && links.len() != exact
    {
        return Err(format!(
            "expected exactly {exact} references, found {}",
            links.len()
        ));
    }
    for (index, link) in links.iter().enumerate() {
        let target = link.get("$ref").and_then(Value::as_str);
        if target != Some(collection) {
            return Err(format!("entry {index} is not a reference into `{collection}`"));
        }
        let id = link.get("$id").and_then(Value::as_str).unwrap_or_default();
        if uuid::Uuid::parse_str(id).is_err() {
            return Err(format!("entry {index} does not carry a valid identifier"));
        }
    }
    Ok(())
}

/// Fails unless the value is an RFC 3339 timestamp string.
///
/// # Errors
///
/// Returns the reason the value was rejected.
pub fn timestamp(value: Option<&Value>) -> Result<(), String> {
    match present(value)? {
        Value::String(text) => time::parse_rfc3339(text)
            .map(|_| ())
            .map_err(|err| format!("`{text}` is not an RFC 3339 timestamp: {err}")),
        other => Err(format!("expected a timestamp string, found {}", describe(other))),
    }
}
