//! Bounded value model with floating (provisional) and committed values.

use serde::{Deserialize, Serialize};

/// Inclusive value range of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl Default for ValueRange {
    fn default() -> Self {
        Self { min: 0.0, max: 100.0 }
    }
}

impl ValueRange {
    /// Create a new range.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the range (`max - min`).
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Clamp a value into the range.
    ///
    /// Unlike `f64::clamp` this never panics: an inverted range pins every
    /// value to `max`, and NaN pins to `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    /// Position of `value` within the range as a fraction (0 at `min`,
    /// 1 at `max`). A degenerate range maps everything to 0.
    pub fn relative(&self, value: f64) -> f64 {
        let span = self.span();
        if span.abs() < f64::EPSILON || !span.is_finite() {
            return 0.0;
        }
        (value - self.min) / span
    }

    /// Round to whole units and clamp into the range.
    ///
    /// Returns `None` for NaN; infinities clamp to the nearest bound.
    pub fn quantize(&self, raw: f64) -> Option<f64> {
        if raw.is_nan() {
            return None;
        }
        // Adding zero folds -0.0 into 0.0.
        Some(self.clamp(round_half_up(raw)) + 0.0)
    }
}

/// Round to the nearest integer, ties toward positive infinity (`-2.5` gives `-2`).
fn round_half_up(raw: f64) -> f64 {
    let floor = raw.floor();
    if raw - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Current and last committed value of a widget.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueModel {
    range: ValueRange,
    value: f64,
    committed: f64,
}

impl Default for ValueModel {
    fn default() -> Self {
        Self::new(ValueRange::default())
    }
}

impl ValueModel {
    /// Create a model whose value starts at the range minimum.
    pub fn new(range: ValueRange) -> Self {
        let start = range.quantize(range.min).unwrap_or(0.0);
        Self {
            range,
            value: start,
            committed: start,
        }
    }

    /// Current (possibly floating) value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Last committed value, restored by [`ValueModel::abort`].
    pub fn committed(&self) -> f64 {
        self.committed
    }

    /// Whether the current value differs from the committed one.
    pub fn is_floating(&self) -> bool {
        self.value != self.committed
    }

    /// The value range.
    pub fn range(&self) -> ValueRange {
        self.range
    }

    /// Replace the range, pulling both the current and committed values
    /// back inside it.
    pub fn set_range(&mut self, range: ValueRange) {
        self.range = range;
        self.value = range.quantize(self.value).unwrap_or(range.min);
        self.committed = range.quantize(self.committed).unwrap_or(range.min);
    }

    /// Store a provisional value. Returns `false` if the input was rejected.
    pub fn set_floating(&mut self, raw: f64) -> bool {
        match self.range.quantize(raw) {
            Some(value) => {
                self.value = value;
                true
            }
            None => false,
        }
    }

    /// Store and commit a value. Returns the committed value, or `None`
    /// if the input was rejected (the model is then unchanged).
    pub fn set_value(&mut self, raw: f64) -> Option<f64> {
        if self.set_floating(raw) {
            Some(self.commit())
        } else {
            None
        }
    }

    /// Make the current value the restore point.
    pub fn commit(&mut self) -> f64 {
        self.committed = self.value;
        self.value
    }

    /// Revert to the last committed value.
    pub fn abort(&mut self) -> f64 {
        self.value = self.committed;
        self.value
    }
}
