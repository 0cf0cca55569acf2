//! Value <-> text conversion used for the value label and the entry overlay.

use std::fmt;
use std::sync::Arc;

/// Converts typed text into a value. `None` means the text is not a number.
#[derive(Clone)]
pub struct ParseFn(Arc<dyn Fn(&str) -> Option<f64> + Send + Sync>);

/// Converts a value into the text shown in the knob center.
#[derive(Clone)]
pub struct FormatFn(Arc<dyn Fn(f64) -> String + Send + Sync>);

impl ParseFn {
    pub fn new(f: impl Fn(&str) -> Option<f64> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Parse `text`, discarding results that are not finite.
    pub fn parse(&self, text: &str) -> Option<f64> {
        (self.0)(text).filter(|value| value.is_finite())
    }
}

impl FormatFn {
    pub fn new(f: impl Fn(f64) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn format(&self, value: f64) -> String {
        (self.0)(value)
    }
}

impl Default for ParseFn {
    fn default() -> Self {
        Self::new(parse_integer_prefix)
    }
}

impl Default for FormatFn {
    fn default() -> Self {
        Self::new(|value| value.to_string())
    }
}

impl fmt::Debug for ParseFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ParseFn(..)")
    }
}

impl fmt::Debug for FormatFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FormatFn(..)")
    }
}

/// The pair of conversions a knob uses.
#[derive(Debug, Clone, Default)]
pub struct ValueFormat {
    pub parse: ParseFn,
    pub format: FormatFn,
}

/// Parse the leading integer of `text`.
///
/// Leading whitespace and an optional sign are accepted; anything after the
/// digits is ignored, so `"12px"` gives 12 and `"42.7"` gives 42. A `0x` or
/// `0X` prefix switches to hexadecimal (`"0x1F"` gives 31). Text with no
/// leading digits is not a number.
pub fn parse_integer_prefix(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (radix, digits) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    // Folding into f64 lets very long digit strings saturate instead of overflowing.
    let mut magnitude = None;
    for digit in digits.chars().map_while(|c| c.to_digit(radix)) {
        let acc = magnitude.unwrap_or(0.0);
        magnitude = Some(acc * f64::from(radix) + f64::from(digit));
    }
    let magnitude = magnitude?;
    Some(if negative { -magnitude } else { magnitude })
}
