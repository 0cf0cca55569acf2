//! Knob properties.

use peniko::Color;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::f64::consts::{PI, TAU};

use super::{ExtraProperties, PropertyError, decode, encode};
use crate::colors::{HexColor, defaults};
use crate::format::{FormatFn, ParseFn, ValueFormat};
use crate::geometry::AngleRange;
use crate::gesture::GestureTiming;

/// Names of the knob's recognized properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KnobPropertyKey {
    AngleStart,
    AngleEnd,
    AngleOffset,
    ColorBg,
    ColorFg,
    ColorLabel,
    StringToValue,
    ValueToString,
    Label,
    Needle,
    Readonly,
    TextScale,
    TrackWidth,
    ValMin,
    ValMax,
    Val,
}

impl KnobPropertyKey {
    pub const ALL: [Self; 16] = [
        Self::AngleStart,
        Self::AngleEnd,
        Self::AngleOffset,
        Self::ColorBg,
        Self::ColorFg,
        Self::ColorLabel,
        Self::StringToValue,
        Self::ValueToString,
        Self::Label,
        Self::Needle,
        Self::Readonly,
        Self::TextScale,
        Self::TrackWidth,
        Self::ValMin,
        Self::ValMax,
        Self::Val,
    ];

    /// The property's wire name.
    pub fn name(self) -> &'static str {
        match self {
            Self::AngleStart => "angleStart",
            Self::AngleEnd => "angleEnd",
            Self::AngleOffset => "angleOffset",
            Self::ColorBg => "colorBG",
            Self::ColorFg => "colorFG",
            Self::ColorLabel => "colorLabel",
            Self::StringToValue => "fnStringToValue",
            Self::ValueToString => "fnValueToString",
            Self::Label => "label",
            Self::Needle => "needle",
            Self::Readonly => "readonly",
            Self::TextScale => "textScale",
            Self::TrackWidth => "trackWidth",
            Self::ValMin => "valMin",
            Self::ValMax => "valMax",
            Self::Val => "val",
        }
    }

    /// Look up a key by wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }
}

/// A knob property together with its value.
#[derive(Debug, Clone)]
pub enum KnobProperty {
    AngleStart(f64),
    AngleEnd(f64),
    AngleOffset(f64),
    ColorBg(Color),
    ColorFg(Color),
    ColorLabel(Color),
    StringToValue(ParseFn),
    ValueToString(FormatFn),
    Label(Option<String>),
    Needle(bool),
    Readonly(bool),
    TextScale(f64),
    TrackWidth(f64),
    ValMin(f64),
    ValMax(f64),
    Val(f64),
}

impl KnobProperty {
    /// The key this value belongs to.
    pub fn key(&self) -> KnobPropertyKey {
        match self {
            Self::AngleStart(_) => KnobPropertyKey::AngleStart,
            Self::AngleEnd(_) => KnobPropertyKey::AngleEnd,
            Self::AngleOffset(_) => KnobPropertyKey::AngleOffset,
            Self::ColorBg(_) => KnobPropertyKey::ColorBg,
            Self::ColorFg(_) => KnobPropertyKey::ColorFg,
            Self::ColorLabel(_) => KnobPropertyKey::ColorLabel,
            Self::StringToValue(_) => KnobPropertyKey::StringToValue,
            Self::ValueToString(_) => KnobPropertyKey::ValueToString,
            Self::Label(_) => KnobPropertyKey::Label,
            Self::Needle(_) => KnobPropertyKey::Needle,
            Self::Readonly(_) => KnobPropertyKey::Readonly,
            Self::TextScale(_) => KnobPropertyKey::TextScale,
            Self::TrackWidth(_) => KnobPropertyKey::TrackWidth,
            Self::ValMin(_) => KnobPropertyKey::ValMin,
            Self::ValMax(_) => KnobPropertyKey::ValMax,
            Self::Val(_) => KnobPropertyKey::Val,
        }
    }

    /// Decode a JSON value for `key`. Function-valued keys cannot be decoded.
    pub fn from_json(key: KnobPropertyKey, value: Value) -> Result<Self, PropertyError> {
        let name = key.name();
        Ok(match key {
            KnobPropertyKey::AngleStart => Self::AngleStart(decode(name, value)?),
            KnobPropertyKey::AngleEnd => Self::AngleEnd(decode(name, value)?),
            KnobPropertyKey::AngleOffset => Self::AngleOffset(decode(name, value)?),
            KnobPropertyKey::ColorBg => Self::ColorBg(decode::<HexColor>(name, value)?.into()),
            KnobPropertyKey::ColorFg => Self::ColorFg(decode::<HexColor>(name, value)?.into()),
            KnobPropertyKey::ColorLabel => Self::ColorLabel(decode::<HexColor>(name, value)?.into()),
            KnobPropertyKey::StringToValue | KnobPropertyKey::ValueToString => {
                return Err(PropertyError::NotData(name));
            }
            KnobPropertyKey::Label => Self::Label(decode(name, value)?),
            KnobPropertyKey::Needle => Self::Needle(decode(name, value)?),
            KnobPropertyKey::Readonly => Self::Readonly(decode(name, value)?),
            KnobPropertyKey::TextScale => Self::TextScale(decode(name, value)?),
            KnobPropertyKey::TrackWidth => Self::TrackWidth(decode(name, value)?),
            KnobPropertyKey::ValMin => Self::ValMin(decode(name, value)?),
            KnobPropertyKey::ValMax => Self::ValMax(decode(name, value)?),
            KnobPropertyKey::Val => Self::Val(decode(name, value)?),
        })
    }

    /// Encode as JSON. Function-valued properties have no JSON form.
    pub fn to_json(&self) -> Option<Value> {
        match self {
            Self::AngleStart(v)
            | Self::AngleEnd(v)
            | Self::AngleOffset(v)
            | Self::TextScale(v)
            | Self::TrackWidth(v)
            | Self::ValMin(v)
            | Self::ValMax(v)
            | Self::Val(v) => encode(v),
            Self::ColorBg(c) | Self::ColorFg(c) | Self::ColorLabel(c) => encode(&HexColor::from(*c)),
            Self::StringToValue(_) | Self::ValueToString(_) => None,
            Self::Label(label) => encode(label),
            Self::Needle(b) | Self::Readonly(b) => encode(b),
        }
    }
}

/// Style and behavior of a knob. The value range and value itself live in
/// the knob's value model.
#[derive(Debug, Clone)]
pub struct KnobProperties {
    pub angles: AngleRange,
    /// Rotation applied when drawing; -PI/2 puts "up" at twelve o'clock.
    pub angle_offset: f64,
    pub color_bg: Color,
    pub color_fg: Color,
    pub color_label: Color,
    pub format: ValueFormat,
    /// Secondary label drawn below the arc.
    pub label: Option<String>,
    /// Draw a short indicator arc instead of a filled sweep.
    pub needle: bool,
    pub readonly: bool,
    pub text_scale: f64,
    /// Track thickness as a fraction of the radius.
    pub track_width: f64,
    pub timing: GestureTiming,
    pub extras: ExtraProperties,
}

impl Default for KnobProperties {
    fn default() -> Self {
        Self {
            angles: AngleRange::new(0.0, TAU),
            angle_offset: -0.5 * PI,
            color_bg: defaults::BACKGROUND.into(),
            color_fg: defaults::FOREGROUND.into(),
            color_label: defaults::LABEL.into(),
            format: ValueFormat::default(),
            label: None,
            needle: false,
            readonly: false,
            text_scale: 1.0,
            track_width: 0.4,
            timing: GestureTiming::default(),
            extras: ExtraProperties::new(),
        }
    }
}

impl KnobProperties {
    /// Overwrite the data-valued fields from a config. Conversion functions
    /// and extra properties are kept.
    pub fn apply_config(&mut self, config: &KnobConfig) {
        self.angles = AngleRange::new(config.angle_start, config.angle_end);
        self.angle_offset = config.angle_offset;
        self.color_bg = config.color_bg.into();
        self.color_fg = config.color_fg.into();
        self.color_label = config.color_label.into();
        self.label = config.label.clone();
        self.needle = config.needle;
        self.readonly = config.readonly;
        self.text_scale = config.text_scale;
        self.track_width = config.track_width;
        self.timing = config.timing;
    }
}

/// Serializable knob configuration. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KnobConfig {
    pub angle_start: f64,
    pub angle_end: f64,
    pub angle_offset: f64,
    #[serde(rename = "colorBG")]
    pub color_bg: HexColor,
    #[serde(rename = "colorFG")]
    pub color_fg: HexColor,
    pub color_label: HexColor,
    pub label: Option<String>,
    pub needle: bool,
    pub readonly: bool,
    pub text_scale: f64,
    pub track_width: f64,
    pub val_min: f64,
    pub val_max: f64,
    pub val: f64,
    pub timing: GestureTiming,
}

impl Default for KnobConfig {
    fn default() -> Self {
        Self {
            angle_start: 0.0,
            angle_end: TAU,
            angle_offset: -0.5 * PI,
            color_bg: defaults::BACKGROUND,
            color_fg: defaults::FOREGROUND,
            color_label: defaults::LABEL,
            label: None,
            needle: false,
            readonly: false,
            text_scale: 1.0,
            track_width: 0.4,
            val_min: 0.0,
            val_max: 100.0,
            val: 0.0,
            timing: GestureTiming::default(),
        }
    }
}
