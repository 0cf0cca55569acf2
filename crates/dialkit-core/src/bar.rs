//! Bar graph model.
//!
//! A bar graph is display-only: its value is set programmatically, is
//! clamped and rounded like a knob's, but is never floating and never
//! notifies anyone.

use kurbo::Size;
use serde_json::Value;

use crate::properties::{
    BarGraphConfig, BarGraphProperties, BarGraphProperty, BarGraphPropertyKey, PropertyError,
};
use crate::value::{ValueModel, ValueRange};

/// State of one bar graph.
#[derive(Debug, Clone)]
pub struct BarGraphModel {
    size: Size,
    properties: BarGraphProperties,
    value: ValueModel,
    peaks: Vec<f64>,
}

impl BarGraphModel {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            properties: BarGraphProperties::default(),
            value: ValueModel::default(),
            peaks: Vec::new(),
        }
    }

    pub fn with_config(size: Size, config: &BarGraphConfig) -> Self {
        let mut model = Self::new(size);
        model.apply_config(config);
        model
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn properties(&self) -> &BarGraphProperties {
        &self.properties
    }

    pub fn value(&self) -> f64 {
        self.value.value()
    }

    pub fn range(&self) -> ValueRange {
        self.value.range()
    }

    /// Clamp, round and store a value. Non-numeric input is ignored.
    /// Returns whether the value was stored.
    pub fn set_value(&mut self, raw: f64) -> bool {
        // Bar graphs have no restore point, so every write is final.
        self.value.set_value(raw).is_some()
    }

    /// Copy of the peak markers.
    pub fn peaks(&self) -> Vec<f64> {
        self.peaks.clone()
    }

    pub fn set_peaks(&mut self, peaks: &[f64]) {
        self.peaks = peaks.to_vec();
    }

    pub fn property(&self, key: BarGraphPropertyKey) -> BarGraphProperty {
        let p = &self.properties;
        let range = self.range();
        match key {
            BarGraphPropertyKey::ColorBg => BarGraphProperty::ColorBg(p.color_bg),
            BarGraphPropertyKey::ColorFg => BarGraphProperty::ColorFg(p.color_fg),
            BarGraphPropertyKey::ColorMarkers => BarGraphProperty::ColorMarkers(p.color_markers),
            BarGraphPropertyKey::MarkerStart => BarGraphProperty::MarkerStart(p.markers.start),
            BarGraphPropertyKey::MarkerEnd => BarGraphProperty::MarkerEnd(p.markers.end),
            BarGraphPropertyKey::MarkerStep => BarGraphProperty::MarkerStep(p.markers.step),
            BarGraphPropertyKey::TrackWidth => BarGraphProperty::TrackWidth(p.track_width),
            BarGraphPropertyKey::ValMin => BarGraphProperty::ValMin(range.min),
            BarGraphPropertyKey::ValMax => BarGraphProperty::ValMax(range.max),
            BarGraphPropertyKey::ValPeaks => BarGraphProperty::ValPeaks(self.peaks()),
            BarGraphPropertyKey::Val => BarGraphProperty::Val(self.value()),
        }
    }

    /// Write a property. The caller repaints afterwards.
    pub fn set_property(&mut self, property: BarGraphProperty) {
        let p = &mut self.properties;
        match property {
            BarGraphProperty::ColorBg(c) => p.color_bg = c,
            BarGraphProperty::ColorFg(c) => p.color_fg = c,
            BarGraphProperty::ColorMarkers(c) => p.color_markers = c,
            BarGraphProperty::MarkerStart(v) => p.markers.start = v,
            BarGraphProperty::MarkerEnd(v) => p.markers.end = v,
            BarGraphProperty::MarkerStep(v) => p.markers.step = v,
            BarGraphProperty::TrackWidth(v) => p.track_width = v,
            BarGraphProperty::ValMin(min) => {
                let max = self.range().max;
                self.value.set_range(ValueRange::new(min, max));
            }
            BarGraphProperty::ValMax(max) => {
                let min = self.range().min;
                self.value.set_range(ValueRange::new(min, max));
            }
            BarGraphProperty::ValPeaks(peaks) => self.peaks = peaks,
            BarGraphProperty::Val(v) => {
                let _ = self.set_value(v);
            }
        }
    }

    pub fn property_by_name(&self, name: &str) -> Option<Value> {
        match BarGraphPropertyKey::from_name(name) {
            Some(key) => self.property(key).to_json(),
            None => self.properties.extras.get(name).cloned(),
        }
    }

    /// Write a property by wire name. Unrecognized names are stored verbatim.
    pub fn set_property_by_name(&mut self, name: &str, value: Value) -> Result<(), PropertyError> {
        match BarGraphPropertyKey::from_name(name) {
            Some(key) => {
                let property = BarGraphProperty::from_json(key, value)?;
                self.set_property(property);
            }
            None => {
                self.properties.extras.insert(name.to_string(), value);
            }
        }
        Ok(())
    }

    pub fn apply_config(&mut self, config: &BarGraphConfig) {
        self.properties.apply_config(config);
        self.value.set_range(ValueRange::new(config.val_min, config.val_max));
        let _ = self.set_value(config.val);
        self.set_peaks(&config.val_peaks);
    }

    pub fn config(&self) -> BarGraphConfig {
        let p = &self.properties;
        let range = self.range();
        BarGraphConfig {
            color_bg: p.color_bg.into(),
            color_fg: p.color_fg.into(),
            color_markers: p.color_markers.into(),
            marker_start: p.markers.start,
            marker_end: p.markers.end,
            marker_step: p.markers.step,
            track_width: p.track_width,
            val_min: range.min,
            val_max: range.max,
            val_peaks: self.peaks(),
            val: self.value(),
        }
    }
}
