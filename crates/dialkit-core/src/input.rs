//! Input events delivered to widgets by the host's event source.
//!
//! All positions are in widget-relative pixels, measured from the widget's
//! top-left corner.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Mouse pointer events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    /// The pointer left the widget (or the host cancelled the drag).
    Leave,
    DoubleClick {
        position: Point,
    },
}

/// Touch events. `touches` lists the touch points still on the widget
/// after the event, in the order the host reports them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TouchEvent {
    Start { touches: Vec<Point> },
    Move { touches: Vec<Point> },
    End { touches: Vec<Point> },
    Cancel,
}

impl TouchEvent {
    /// Touch points remaining on the widget.
    pub fn touches(&self) -> &[Point] {
        match self {
            TouchEvent::Start { touches }
            | TouchEvent::Move { touches }
            | TouchEvent::End { touches } => touches,
            TouchEvent::Cancel => &[],
        }
    }

    /// The single active touch, if exactly one finger is down.
    pub fn single_touch(&self) -> Option<Point> {
        match self.touches() {
            [only] => Some(*only),
            _ => None,
        }
    }
}

/// Keys delivered to the numeric entry overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryKey {
    Character(String),
    Backspace,
    Enter,
    Escape,
}

/// Any event a widget can receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputEvent {
    Pointer(PointerEvent),
    Touch(TouchEvent),
    /// Scroll wheel movement; only the sign of `delta.y` matters.
    Wheel { delta: Vec2 },
    Key(EntryKey),
    Resize,
}

impl From<PointerEvent> for InputEvent {
    fn from(event: PointerEvent) -> Self {
        InputEvent::Pointer(event)
    }
}

impl From<TouchEvent> for InputEvent {
    fn from(event: TouchEvent) -> Self {
        InputEvent::Touch(event)
    }
}

impl From<EntryKey> for InputEvent {
    fn from(key: EntryKey) -> Self {
        InputEvent::Key(key)
    }
}

/// Direction of a wheel tick: +1, -1 or 0.
pub fn wheel_direction(delta: Vec2) -> f64 {
    if delta.y > 0.0 {
        1.0
    } else if delta.y < 0.0 {
        -1.0
    } else {
        0.0
    }
}
