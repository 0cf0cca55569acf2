//! Mapping between pointer positions, angles and values.
//!
//! Knob angles are measured in radians from "up" (twelve o'clock) and grow
//! clockwise in screen space (y pointing down). Drawing surfaces use the usual
//! convention where 0 points right, so the renderer adds the knob's angle
//! offset before issuing arc calls.

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::value::ValueRange;

/// Half-width of the needle indicator arc, in radians.
pub const NEEDLE_HALF_WIDTH: f64 = 0.1;

/// Angular range covered by a knob, relative to "up".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleRange {
    /// Angle corresponding to the minimum value.
    pub start: f64,
    /// Angle corresponding to the maximum value.
    pub end: f64,
}

impl Default for AngleRange {
    fn default() -> Self {
        Self::FULL_TURN
    }
}

impl AngleRange {
    /// A full clockwise turn starting at the top.
    pub const FULL_TURN: Self = Self { start: 0.0, end: TAU };

    /// Create a new angle range.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Angular span (`end - start`).
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Whether the range covers at least one full turn, in which case
    /// pointer angles before `start` wrap around instead of pinning to it.
    pub fn is_full_turn(&self) -> bool {
        self.span() >= TAU
    }
}

/// Angle of a vector relative to "up", clockwise positive, in `(-PI, PI]`.
pub fn pointer_angle(rel: Vec2) -> f64 {
    rel.x.atan2(-rel.y)
}

/// Center of a widget of the given size.
pub fn center_of(size: Size) -> Point {
    Point::new(0.5 * size.width, 0.5 * size.height)
}

/// Convert a widget-relative position into a value.
///
/// `position` is measured from the widget's top-left corner; the knob
/// center is the middle of `size`.
pub fn position_to_value(position: Point, size: Size, angles: AngleRange, range: ValueRange) -> f64 {
    offset_to_value(position - center_of(size), angles, range)
}

/// Convert an offset from the knob center into a clamped value.
pub fn offset_to_value(rel: Vec2, angles: AngleRange, range: ValueRange) -> f64 {
    let span = angles.span();
    if span.abs() < f64::EPSILON || !span.is_finite() {
        return range.clamp(range.min);
    }

    let mut angle = pointer_angle(rel) - angles.start;
    if angle < 0.0 {
        if angles.is_full_turn() {
            angle += TAU;
        } else {
            angle = 0.0;
        }
    }

    let value = range.min + (angle / span) * range.span();
    range.clamp(value)
}

/// Angle (relative to "up") at which `value` sits within `angles`.
pub fn value_to_angle(value: f64, angles: AngleRange, range: ValueRange) -> f64 {
    angles.start + range.relative(value) * angles.span()
}

/// Point on a circle around `center` at an "up"-relative angle.
pub fn point_at_angle(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(center.x + radius * angle.sin(), center.y - radius * angle.cos())
}

/// Convert an "up"-relative angle into the surface's angle convention.
pub fn surface_angle(angle: f64, offset: f64) -> f64 {
    angle + offset
}
