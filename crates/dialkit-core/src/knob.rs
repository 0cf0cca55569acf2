//! Knob model: properties, value, gesture state and entry overlay.
//!
//! The model is free of any drawing or host plumbing. Every mutating
//! operation returns [`Effects`] describing what the owner must do next
//! (repaint, notify listeners, show or hide the entry overlay).

use kurbo::{Point, Size};
use serde_json::Value;

use crate::entry::{EntryChange, EntryOverlay, EntryStyle};
use crate::geometry::position_to_value;
use crate::gesture::GestureState;
use crate::properties::{KnobConfig, KnobProperties, KnobProperty, KnobPropertyKey, PropertyError};
use crate::value::{ValueModel, ValueRange};

/// Fraction of the smaller widget dimension used for the value font size.
pub const VALUE_FONT_RATIO: f64 = 0.2;

/// Outcome of a knob operation.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use]
pub struct Effects {
    /// The widget must be repainted.
    pub redraw: bool,
    /// Committed values, in order. Each one is a listener notification.
    pub commits: Vec<f64>,
    /// Entry overlay change, if any.
    pub entry: Option<EntryChange>,
}

impl Effects {
    /// Nothing happened.
    pub fn none() -> Self {
        Self::default()
    }

    /// Repaint only.
    pub fn redraw() -> Self {
        Self {
            redraw: true,
            ..Self::default()
        }
    }

    /// A value was committed (implies a repaint).
    pub fn committed(value: f64) -> Self {
        Self {
            redraw: true,
            commits: vec![value],
            entry: None,
        }
    }

    /// Overlay change plus repaint.
    pub fn entry(change: EntryChange) -> Self {
        Self {
            redraw: change != EntryChange::Edited,
            commits: Vec::new(),
            entry: Some(change),
        }
    }

    /// Fold `other` into `self`; later overlay changes win.
    pub fn merge(&mut self, other: Effects) {
        self.redraw |= other.redraw;
        self.commits.extend(other.commits);
        if other.entry.is_some() {
            self.entry = other.entry;
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.redraw && self.commits.is_empty() && self.entry.is_none()
    }
}

/// State of one knob.
#[derive(Debug, Clone)]
pub struct KnobModel {
    size: Size,
    properties: KnobProperties,
    value: ValueModel,
    pub(crate) gesture: GestureState,
    pub(crate) entry: EntryOverlay,
}

impl KnobModel {
    /// Create a knob of the given pixel size with default properties.
    pub fn new(size: Size) -> Self {
        let mut model = Self {
            size,
            properties: KnobProperties::default(),
            value: ValueModel::default(),
            gesture: GestureState::new(),
            entry: EntryOverlay::new(),
        };
        model.refresh_entry_style();
        model
    }

    /// Create a knob and apply `config`.
    pub fn with_config(size: Size, config: &KnobConfig) -> Self {
        let mut model = Self::new(size);
        let _ = model.apply_config(config);
        model
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn properties(&self) -> &KnobProperties {
        &self.properties
    }

    /// Current (possibly floating) value.
    pub fn value(&self) -> f64 {
        self.value.value()
    }

    /// Last committed value.
    pub fn committed_value(&self) -> f64 {
        self.value.committed()
    }

    pub fn range(&self) -> ValueRange {
        self.value.range()
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn entry(&self) -> &EntryOverlay {
        &self.entry
    }

    /// Mutable access for hosts that mirror a native text field into the overlay buffer.
    pub fn entry_mut(&mut self) -> &mut EntryOverlay {
        &mut self.entry
    }

    /// Text drawn in the knob center.
    pub fn value_text(&self) -> String {
        self.properties.format.format.format(self.value())
    }

    /// Font size of the value text.
    pub fn value_font_size(&self) -> f64 {
        VALUE_FONT_RATIO * self.size.width.min(self.size.height) * self.properties.text_scale
    }

    /// Bring the overlay style in line with the foreground color and value font.
    pub fn refresh_entry_style(&mut self) {
        let style = EntryStyle {
            text_color: self.properties.color_fg,
            font_size: self.value_font_size(),
        };
        self.entry.set_style(style);
    }

    /// Map a widget-relative position to a value using the current angles and range.
    pub fn value_at(&self, position: Point) -> f64 {
        position_to_value(position, self.size, self.properties.angles, self.range())
    }

    /// Store a provisional value. Repaints, never notifies.
    pub fn set_value_floating(&mut self, raw: f64) -> Effects {
        if self.value.set_floating(raw) {
            log::trace!("Knob value floating at {}", self.value());
            Effects::redraw()
        } else {
            log::debug!("Discarding non-numeric knob value");
            Effects::none()
        }
    }

    /// Store and commit a value.
    pub fn set_value(&mut self, raw: f64) -> Effects {
        match self.value.set_value(raw) {
            Some(value) => {
                log::debug!("Knob value committed: {}", value);
                Effects::committed(value)
            }
            None => {
                log::debug!("Discarding non-numeric knob value");
                Effects::none()
            }
        }
    }

    /// Commit the current value without re-mapping it.
    pub fn commit(&mut self) -> Effects {
        let value = self.value.commit();
        log::debug!("Knob value committed: {}", value);
        Effects::committed(value)
    }

    /// Cancel any gesture in progress and revert to the last committed value.
    ///
    /// Pending double-tap and wheel commits are dropped as well.
    pub fn abort(&mut self) -> Effects {
        self.gesture.reset();
        self.revert()
    }

    /// Revert the value without touching gesture state.
    pub(crate) fn revert(&mut self) -> Effects {
        let value = self.value.abort();
        log::debug!("Knob value reverted to {}", value);
        Effects::redraw()
    }

    /// Show the entry overlay. Read-only knobs never show it.
    pub fn open_entry(&mut self) -> Effects {
        if self.properties.readonly {
            return Effects::none();
        }
        if self.entry.is_visible() {
            return Effects::redraw();
        }
        log::debug!("Opening knob entry overlay");
        self.entry.show();
        Effects::entry(EntryChange::Shown)
    }

    /// Hide the overlay and commit its text if it parses to a finite number.
    pub fn submit_entry(&mut self) -> Effects {
        let text = self.entry.hide();
        let mut effects = Effects::entry(EntryChange::Hidden);
        if self.properties.readonly {
            return effects;
        }

        match self.properties.format.parse.parse(&text) {
            Some(value) => effects.merge(self.set_value(value)),
            None => log::debug!("Discarding entry text {:?}: not a number", text),
        }
        effects
    }

    /// Replace the overlay text and submit it.
    pub fn submit_entry_text(&mut self, text: &str) -> Effects {
        self.entry.set_text(text);
        self.submit_entry()
    }

    /// Hide the overlay and discard its text.
    pub fn cancel_entry(&mut self) -> Effects {
        let text = self.entry.hide();
        log::debug!("Knob entry cancelled, discarding {:?}", text);
        Effects::entry(EntryChange::Hidden)
    }

    /// Read a property.
    pub fn property(&self, key: KnobPropertyKey) -> KnobProperty {
        let p = &self.properties;
        let range = self.range();
        match key {
            KnobPropertyKey::AngleStart => KnobProperty::AngleStart(p.angles.start),
            KnobPropertyKey::AngleEnd => KnobProperty::AngleEnd(p.angles.end),
            KnobPropertyKey::AngleOffset => KnobProperty::AngleOffset(p.angle_offset),
            KnobPropertyKey::ColorBg => KnobProperty::ColorBg(p.color_bg),
            KnobPropertyKey::ColorFg => KnobProperty::ColorFg(p.color_fg),
            KnobPropertyKey::ColorLabel => KnobProperty::ColorLabel(p.color_label),
            KnobPropertyKey::StringToValue => KnobProperty::StringToValue(p.format.parse.clone()),
            KnobPropertyKey::ValueToString => KnobProperty::ValueToString(p.format.format.clone()),
            KnobPropertyKey::Label => KnobProperty::Label(p.label.clone()),
            KnobPropertyKey::Needle => KnobProperty::Needle(p.needle),
            KnobPropertyKey::Readonly => KnobProperty::Readonly(p.readonly),
            KnobPropertyKey::TextScale => KnobProperty::TextScale(p.text_scale),
            KnobPropertyKey::TrackWidth => KnobProperty::TrackWidth(p.track_width),
            KnobPropertyKey::ValMin => KnobProperty::ValMin(range.min),
            KnobPropertyKey::ValMax => KnobProperty::ValMax(range.max),
            KnobPropertyKey::Val => KnobProperty::Val(self.value()),
        }
    }

    /// Write a property. Every write repaints; `val` stores a floating value.
    pub fn set_property(&mut self, property: KnobProperty) -> Effects {
        let p = &mut self.properties;
        match property {
            KnobProperty::AngleStart(v) => p.angles.start = v,
            KnobProperty::AngleEnd(v) => p.angles.end = v,
            KnobProperty::AngleOffset(v) => p.angle_offset = v,
            KnobProperty::ColorBg(c) => p.color_bg = c,
            KnobProperty::ColorFg(c) => p.color_fg = c,
            KnobProperty::ColorLabel(c) => p.color_label = c,
            KnobProperty::StringToValue(f) => p.format.parse = f,
            KnobProperty::ValueToString(f) => p.format.format = f,
            KnobProperty::Label(label) => p.label = label,
            KnobProperty::Needle(b) => p.needle = b,
            KnobProperty::Readonly(b) => p.readonly = b,
            KnobProperty::TextScale(v) => p.text_scale = v,
            KnobProperty::TrackWidth(v) => p.track_width = v,
            KnobProperty::ValMin(min) => {
                let range = ValueRange::new(min, self.range().max);
                self.value.set_range(range);
            }
            KnobProperty::ValMax(max) => {
                let range = ValueRange::new(self.range().min, max);
                self.value.set_range(range);
            }
            KnobProperty::Val(v) => {
                let _ = self.value.set_floating(v);
            }
        }
        Effects::redraw()
    }

    /// Read a property by wire name. Unrecognized names read back whatever
    /// was stored under them; function-valued properties have no data form.
    pub fn property_by_name(&self, name: &str) -> Option<Value> {
        match KnobPropertyKey::from_name(name) {
            Some(key) => self.property(key).to_json(),
            None => self.properties.extras.get(name).cloned(),
        }
    }

    /// Write a property by wire name. Unrecognized names are stored verbatim.
    pub fn set_property_by_name(&mut self, name: &str, value: Value) -> Result<Effects, PropertyError> {
        match KnobPropertyKey::from_name(name) {
            Some(key) => {
                let property = KnobProperty::from_json(key, value)?;
                Ok(self.set_property(property))
            }
            None => {
                self.properties.extras.insert(name.to_string(), value);
                Ok(Effects::redraw())
            }
        }
    }

    /// Apply a whole configuration. The configured value becomes the
    /// committed value without notifying anyone.
    pub fn apply_config(&mut self, config: &KnobConfig) -> Effects {
        self.properties.apply_config(config);
        self.value.set_range(ValueRange::new(config.val_min, config.val_max));
        if self.value.set_floating(config.val) {
            self.value.commit();
        }
        self.refresh_entry_style();
        Effects::redraw()
    }

    /// Snapshot the data-valued properties as a configuration.
    pub fn config(&self) -> KnobConfig {
        let p = &self.properties;
        let range = self.range();
        KnobConfig {
            angle_start: p.angles.start,
            angle_end: p.angles.end,
            angle_offset: p.angle_offset,
            color_bg: p.color_bg.into(),
            color_fg: p.color_fg.into(),
            color_label: p.color_label.into(),
            label: p.label.clone(),
            needle: p.needle,
            readonly: p.readonly,
            text_scale: p.text_scale,
            track_width: p.track_width,
            val_min: range.min,
            val_max: range.max,
            val: self.value.committed(),
            timing: p.timing,
        }
    }
}
