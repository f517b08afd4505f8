//! Safe extraction of numeric and display values from entity attributes
//!
//! Every engine reads attributes through these functions so the
//! list-unwrapping rule lives in exactly one place. Nothing here fails:
//! missing or malformed values degrade to `0.0` or [`NOT_AVAILABLE`].

use crate::entity::{AttributeValue, Entity, Scalar};

/// Display sentinel for a missing attribute
pub const NOT_AVAILABLE: &str = "N/A";

/// Numeric value of `key` on `entity`.
///
/// Lists use their first element and numeric-looking strings are parsed.
/// Absent values, empty lists and unparsable text all yield `0.0`.
pub fn numeric(entity: &Entity, key: &str) -> f64 {
    value_as_f64(entity.get(key))
}

/// Numeric interpretation of a raw attribute value, see [`numeric`]
pub fn value_as_f64(value: &AttributeValue) -> f64 {
    match value.first() {
        Some(Scalar::Number(n)) if n.is_finite() => n,
        Some(Scalar::Text(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Text value of `key`, if present. Numbers are rendered as text.
pub fn text(entity: &Entity, key: &str) -> Option<String> {
    entity.get(key).first().map(scalar_to_string)
}

/// Display value of `key` for side-by-side tables, [`NOT_AVAILABLE`] if missing
pub fn display(entity: &Entity, key: &str) -> String {
    text(entity, key).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn scalar_to_string(scalar: Scalar<'_>) -> String {
    match scalar {
        Scalar::Number(n) => n.to_string(),
        Scalar::Text(s) => s.to_string(),
    }
}
