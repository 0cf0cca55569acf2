//! Recording drawing surface.

use dialkit_core::{DrawingSurface, HexColor, TextStyle};
use kurbo::{Arc, Line, Point, Rect, Size, Stroke};
use peniko::Color;
use serde::Serialize;

use crate::svg::RenderError;

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCommand {
    #[serde(rename_all = "camelCase")]
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        sweep_angle: f64,
        width: f64,
        color: HexColor,
    },
    Line {
        from: Point,
        to: Point,
        width: f64,
        color: HexColor,
    },
    Rect { rect: Rect, color: HexColor },
    #[serde(rename_all = "camelCase")]
    Text {
        text: String,
        anchor: Point,
        font_size: f64,
        color: HexColor,
    },
}

/// A surface that records the calls of the current frame.
///
/// Clearing or resizing drops everything recorded so far, so after a paint
/// the list holds exactly one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Text of every recorded text call, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Serialize the recorded frame as pretty JSON.
    pub fn to_json(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(&self.commands)?)
    }
}

impl DrawingSurface for DisplayList {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
        self.commands.clear();
    }

    fn clear(&mut self) {
        self.commands.clear();
    }

    fn stroke_arc(&mut self, arc: &Arc, stroke: &Stroke, color: Color) {
        self.commands.push(DrawCommand::Arc {
            center: arc.center,
            radius: arc.radii.x,
            start_angle: arc.start_angle,
            sweep_angle: arc.sweep_angle,
            width: stroke.width,
            color: color.into(),
        });
    }

    fn stroke_line(&mut self, line: Line, stroke: &Stroke, color: Color) {
        self.commands.push(DrawCommand::Line {
            from: line.p0,
            to: line.p1,
            width: stroke.width,
            color: color.into(),
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect {
            rect,
            color: color.into(),
        });
    }

    fn fill_text(&mut self, text: &str, anchor: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            anchor,
            font_size: style.font_size,
            color: style.color.into(),
        });
    }
}
