//! DialKit Core Library
//!
//! Platform-agnostic state and logic for knob and bar graph widgets:
//! geometry, the value model, input events, the knob interaction state
//! machine and typed widget properties.

pub mod bar;
pub mod colors;
pub mod entry;
pub mod format;
pub mod geometry;
pub mod gesture;
pub mod input;
mod interaction;
pub mod knob;
pub mod properties;
pub mod surface;
pub mod timer;
pub mod value;

pub use bar::BarGraphModel;
pub use colors::HexColor;
pub use entry::{EntryChange, EntryOverlay, EntryStyle};
pub use format::{FormatFn, ParseFn, ValueFormat};
pub use geometry::AngleRange;
pub use gesture::{DragPhase, GestureState, GestureTiming};
pub use input::{EntryKey, InputEvent, MouseButton, PointerEvent, TouchEvent};
pub use knob::{Effects, KnobModel};
pub use properties::{
    BarGraphConfig, BarGraphProperties, BarGraphProperty, BarGraphPropertyKey, KnobConfig, KnobProperties,
    KnobProperty, KnobPropertyKey, MarkerScale, PropertyError,
};
pub use surface::{DrawingSurface, TextStyle};
pub use timer::{Duration, Instant, Timer};
pub use value::{ValueModel, ValueRange};

/// Unique identifier for a widget instance.
pub type WidgetId = uuid::Uuid;
