//! Drawing surface abstraction.
//!
//! Widgets paint themselves through this trait. Coordinates are widget-local
//! pixels with the origin at the top-left corner; arc angles follow the
//! surface convention (0 points right, positive turns clockwise on screen).

use kurbo::{Arc, Line, Point, Rect, Size, Stroke};
use peniko::Color;

/// Text placement and style. Text is centered on the anchor point both
/// horizontally and vertically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f64,
    pub color: Color,
}

impl TextStyle {
    pub fn new(font_size: f64, color: Color) -> Self {
        Self { font_size, color }
    }
}

/// A 2D surface a widget owns and repaints from scratch on every redraw.
pub trait DrawingSurface {
    /// Current surface size in pixels.
    fn size(&self) -> Size;

    /// Resize the surface. Implementations drop previous content.
    fn resize(&mut self, size: Size);

    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Stroke an open arc.
    fn stroke_arc(&mut self, arc: &Arc, stroke: &Stroke, color: Color);

    /// Stroke a straight line segment.
    fn stroke_line(&mut self, line: Line, stroke: &Stroke, color: Color);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a single line of text centered on `anchor`.
    fn fill_text(&mut self, text: &str, anchor: Point, style: &TextStyle);
}

impl<S: DrawingSurface + ?Sized> DrawingSurface for Box<S> {
    fn size(&self) -> Size {
        (**self).size()
    }

    fn resize(&mut self, size: Size) {
        (**self).resize(size);
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn stroke_arc(&mut self, arc: &Arc, stroke: &Stroke, color: Color) {
        (**self).stroke_arc(arc, stroke, color);
    }

    fn stroke_line(&mut self, line: Line, stroke: &Stroke, color: Color) {
        (**self).stroke_line(line, stroke, color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        (**self).fill_rect(rect, color);
    }

    fn fill_text(&mut self, text: &str, anchor: Point, style: &TextStyle) {
        (**self).fill_text(text, anchor, style);
    }
}
