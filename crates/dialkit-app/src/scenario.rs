//! Scenario documents.
//!
//! ```json
//! {
//!   "widget": { "kind": "knob", "width": 200, "height": 200, "config": { "valMax": 10 } },
//!   "steps": [
//!     { "atMs": 0,   "input": { "pointer": { "down": { "position": { "x": 100, "y": 170 }, "button": "left" } } } },
//!     { "atMs": 40,  "input": { "pointer": { "up": { "position": { "x": 100, "y": 170 }, "button": "left" } } } },
//!     { "atMs": 100, "setProperty": { "name": "label", "value": "Gain" } }
//!   ]
//! }
//! ```

use dialkit_core::{BarGraphConfig, InputEvent, KnobConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::replay::ScriptError;

/// The widget a scenario drives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum WidgetSpec {
    Knob {
        width: f64,
        height: f64,
        #[serde(default)]
        config: KnobConfig,
    },
    BarGraph {
        width: f64,
        height: f64,
        #[serde(default)]
        config: BarGraphConfig,
    },
}

impl WidgetSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            WidgetSpec::Knob { .. } => "knob",
            WidgetSpec::BarGraph { .. } => "barGraph",
        }
    }
}

/// Something done to the widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    /// Deliver an input event.
    Input(InputEvent),
    /// Call `set_value`.
    SetValue(f64),
    /// Call `set_value_floating` (knob only).
    SetValueFloating(f64),
    /// Write a property by name.
    SetProperty { name: String, value: Value },
    /// Replace the peak markers (bar graph only).
    SetPeaks(Vec<f64>),
    /// Submit text as if typed into the entry overlay (knob only).
    SubmitEntry(String),
    /// Revert to the last committed value (knob only).
    Abort {},
    /// Commit the current value (knob only).
    Commit {},
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Input(_) => "input",
            Action::SetValue(_) => "setValue",
            Action::SetValueFloating(_) => "setValueFloating",
            Action::SetProperty { .. } => "setProperty",
            Action::SetPeaks(_) => "setPeaks",
            Action::SubmitEntry(_) => "submitEntry",
            Action::Abort {} => "abort",
            Action::Commit {} => "commit",
        }
    }
}

/// An action and when it happens, in milliseconds from the start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: Action,
}

/// A complete scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub widget: WidgetSpec,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        let mut scenario: Scenario = serde_json::from_str(json)?;
        // Steps may be written in any order; replay is chronological.
        scenario.steps.sort_by_key(|step| step.at_ms);
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
