//! DialKit Replay
//!
//! Drives a knob or bar graph from a JSON scenario of timestamped actions
//! and reports what the widget committed and how it looked at the end.

mod replay;
mod scenario;

pub use replay::{ReplayCommit, ReplayEntryChange, ReplayReport, ScriptError, replay};
pub use scenario::{Action, Scenario, Step, WidgetSpec};
