//! Normalization of raw attribute values
//!
//! Converts a raw measurement into a [0.0, 1.0] goodness fraction relative to
//! a reference bound. Meeting the reference always yields exactly 1.0,
//! whichever the direction.

use crate::config::Direction;
use smartcompare_core::{accessor, Entity};

/// Normalize `value` against `reference`.
///
/// # Returns
/// - `0.0` for a non-positive (missing or invalid) value
/// - higher-is-better: `min(1, value / reference)`
/// - lower-is-better: `min(1, reference / value)`, so values above the
///   bound lose credit smoothly instead of dropping to zero
pub fn normalize(value: f64, reference: f64, direction: Direction) -> f64 {
    if !(value > 0.0) || !(reference > 0.0) || !reference.is_finite() {
        return 0.0;
    }

    let fraction = match direction {
        Direction::HigherIsBetter => value / reference,
        Direction::LowerIsBetter => reference / value,
    };
    fraction.min(1.0)
}

/// Pixel count of a "WxH" resolution string such as `"2556x1179"`
pub fn parse_resolution(text: &str) -> Option<f64> {
    let lowered = text.trim().to_lowercase();
    let (width, height) = lowered.split_once(|c: char| c == 'x' || c == '×')?;
    let width: f64 = width.trim().parse().ok()?;
    let height: f64 = height.trim().parse().ok()?;

    if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
        Some(width * height)
    } else {
        None
    }
}

/// Pixel count of the resolution stored under `key`, `0.0` if unusable
pub fn resolution_pixels(entity: &Entity, key: &str) -> f64 {
    accessor::text(entity, key)
        .and_then(|text| parse_resolution(&text))
        .unwrap_or(0.0)
}
