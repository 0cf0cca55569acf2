//! Bar graph properties.

use peniko::Color;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ExtraProperties, PropertyError, decode, encode};
use crate::colors::{HexColor, defaults};

/// Names of the bar graph's recognized properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BarGraphPropertyKey {
    ColorBg,
    ColorFg,
    ColorMarkers,
    MarkerStart,
    MarkerEnd,
    MarkerStep,
    TrackWidth,
    ValMin,
    ValMax,
    ValPeaks,
    Val,
}

impl BarGraphPropertyKey {
    pub const ALL: [Self; 11] = [
        Self::ColorBg,
        Self::ColorFg,
        Self::ColorMarkers,
        Self::MarkerStart,
        Self::MarkerEnd,
        Self::MarkerStep,
        Self::TrackWidth,
        Self::ValMin,
        Self::ValMax,
        Self::ValPeaks,
        Self::Val,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::ColorBg => "colorBG",
            Self::ColorFg => "colorFG",
            Self::ColorMarkers => "colorMarkers",
            Self::MarkerStart => "markerStart",
            Self::MarkerEnd => "markerEnd",
            Self::MarkerStep => "markerStep",
            Self::TrackWidth => "trackWidth",
            Self::ValMin => "valMin",
            Self::ValMax => "valMax",
            Self::ValPeaks => "valPeaks",
            Self::Val => "val",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }
}

/// A bar graph property together with its value.
#[derive(Debug, Clone, PartialEq)]
pub enum BarGraphProperty {
    ColorBg(Color),
    ColorFg(Color),
    ColorMarkers(Color),
    MarkerStart(Option<f64>),
    MarkerEnd(Option<f64>),
    MarkerStep(Option<f64>),
    TrackWidth(f64),
    ValMin(f64),
    ValMax(f64),
    ValPeaks(Vec<f64>),
    Val(f64),
}

impl BarGraphProperty {
    pub fn key(&self) -> BarGraphPropertyKey {
        match self {
            Self::ColorBg(_) => BarGraphPropertyKey::ColorBg,
            Self::ColorFg(_) => BarGraphPropertyKey::ColorFg,
            Self::ColorMarkers(_) => BarGraphPropertyKey::ColorMarkers,
            Self::MarkerStart(_) => BarGraphPropertyKey::MarkerStart,
            Self::MarkerEnd(_) => BarGraphPropertyKey::MarkerEnd,
            Self::MarkerStep(_) => BarGraphPropertyKey::MarkerStep,
            Self::TrackWidth(_) => BarGraphPropertyKey::TrackWidth,
            Self::ValMin(_) => BarGraphPropertyKey::ValMin,
            Self::ValMax(_) => BarGraphPropertyKey::ValMax,
            Self::ValPeaks(_) => BarGraphPropertyKey::ValPeaks,
            Self::Val(_) => BarGraphPropertyKey::Val,
        }
    }

    pub fn from_json(key: BarGraphPropertyKey, value: Value) -> Result<Self, PropertyError> {
        let name = key.name();
        Ok(match key {
            BarGraphPropertyKey::ColorBg => Self::ColorBg(decode::<HexColor>(name, value)?.into()),
            BarGraphPropertyKey::ColorFg => Self::ColorFg(decode::<HexColor>(name, value)?.into()),
            BarGraphPropertyKey::ColorMarkers => {
                Self::ColorMarkers(decode::<HexColor>(name, value)?.into())
            }
            BarGraphPropertyKey::MarkerStart => Self::MarkerStart(decode(name, value)?),
            BarGraphPropertyKey::MarkerEnd => Self::MarkerEnd(decode(name, value)?),
            BarGraphPropertyKey::MarkerStep => Self::MarkerStep(decode(name, value)?),
            BarGraphPropertyKey::TrackWidth => Self::TrackWidth(decode(name, value)?),
            BarGraphPropertyKey::ValMin => Self::ValMin(decode(name, value)?),
            BarGraphPropertyKey::ValMax => Self::ValMax(decode(name, value)?),
            BarGraphPropertyKey::ValPeaks => Self::ValPeaks(decode(name, value)?),
            BarGraphPropertyKey::Val => Self::Val(decode(name, value)?),
        })
    }

    pub fn to_json(&self) -> Option<Value> {
        match self {
            Self::ColorBg(c) | Self::ColorFg(c) | Self::ColorMarkers(c) => {
                encode(&HexColor::from(*c))
            }
            Self::MarkerStart(v) | Self::MarkerEnd(v) | Self::MarkerStep(v) => encode(v),
            Self::TrackWidth(v) | Self::ValMin(v) | Self::ValMax(v) | Self::Val(v) => encode(v),
            Self::ValPeaks(peaks) => encode(peaks),
        }
    }
}

/// Scale markers drawn across the bar at `start + k * step` up to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerScale {
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub step: Option<f64>,
}

impl Default for MarkerScale {
    fn default() -> Self {
        Self {
            start: Some(0.0),
            end: Some(100.0),
            step: Some(20.0),
        }
    }
}

/// Upper bound on markers drawn for one scale.
const MAX_MARKERS: usize = 1024;

impl MarkerScale {
    /// Marker values, or nothing when any of start/end/step is unset or the
    /// step is not a positive finite number.
    pub fn values(&self) -> Vec<f64> {
        let (Some(start), Some(end), Some(step)) = (self.start, self.end, self.step) else {
            return Vec::new();
        };
        if !(step > 0.0 && step.is_finite() && start.is_finite() && end.is_finite()) || end < start {
            return Vec::new();
        }

        // A small tolerance keeps the end marker when (end - start) / step
        // lands a hair below an integer.
        let steps = ((end - start) / step + 1e-9).floor() as usize;
        (0..=steps.min(MAX_MARKERS - 1))
            .map(|k| start + k as f64 * step)
            .collect()
    }
}

/// Style of a bar graph. Range, value and peaks live on the bar graph model.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGraphProperties {
    pub color_bg: Color,
    pub color_fg: Color,
    pub color_markers: Color,
    pub markers: MarkerScale,
    /// Bar thickness as a fraction of the widget height.
    pub track_width: f64,
    pub extras: ExtraProperties,
}

impl Default for BarGraphProperties {
    fn default() -> Self {
        Self {
            color_bg: defaults::BACKGROUND.into(),
            color_fg: defaults::FOREGROUND.into(),
            color_markers: defaults::MARKERS.into(),
            markers: MarkerScale::default(),
            track_width: 0.5,
            extras: ExtraProperties::new(),
        }
    }
}

impl BarGraphProperties {
    /// Overwrite the styled fields from a config, keeping extra properties.
    pub fn apply_config(&mut self, config: &BarGraphConfig) {
        self.color_bg = config.color_bg.into();
        self.color_fg = config.color_fg.into();
        self.color_markers = config.color_markers.into();
        self.markers = MarkerScale {
            start: config.marker_start,
            end: config.marker_end,
            step: config.marker_step,
        };
        self.track_width = config.track_width;
    }
}

/// Serializable bar graph configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BarGraphConfig {
    #[serde(rename = "colorBG")]
    pub color_bg: HexColor,
    #[serde(rename = "colorFG")]
    pub color_fg: HexColor,
    pub color_markers: HexColor,
    pub marker_start: Option<f64>,
    pub marker_end: Option<f64>,
    pub marker_step: Option<f64>,
    pub track_width: f64,
    pub val_min: f64,
    pub val_max: f64,
    pub val_peaks: Vec<f64>,
    pub val: f64,
}

impl Default for BarGraphConfig {
    fn default() -> Self {
        let markers = MarkerScale::default();
        Self {
            color_bg: defaults::BACKGROUND,
            color_fg: defaults::FOREGROUND,
            color_markers: defaults::MARKERS,
            marker_start: markers.start,
            marker_end: markers.end,
            marker_step: markers.step,
            track_width: 0.5,
            val_min: 0.0,
            val_max: 100.0,
            val_peaks: Vec::new(),
            val: 0.0,
        }
    }
}
