//! SVG document surface.

use dialkit_core::{DrawingSurface, HexColor, TextStyle};
use kurbo::{Arc, Line, Point, Rect, Shape, Size, Stroke};
use peniko::Color;
use std::fmt::Write as _;
use std::io;
use thiserror::Error;

/// Tolerance used when flattening arcs into SVG path data.
const ARC_TOLERANCE: f64 = 0.1;

/// Errors exporting a painted frame.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to write frame: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to serialize frame: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A surface that builds an SVG document.
#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    size: Size,
    body: String,
}

impl SvgSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            body: String::new(),
        }
    }

    /// The complete SVG document for the current frame.
    pub fn to_svg_string(&self) -> String {
        let (w, h) = (self.size.width, self.size.height);
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{}</svg>\n",
            self.body
        )
    }

    pub fn write_to(&self, mut writer: impl io::Write) -> Result<(), RenderError> {
        writer.write_all(self.to_svg_string().as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn push(&mut self, element: std::fmt::Arguments<'_>) {
        // Writing into a String cannot fail.
        let _ = self.body.write_fmt(element);
        self.body.push('\n');
    }
}

/// `name="#rrggbb"` plus an opacity attribute for translucent colors.
fn paint(name: &str, color: Color) -> String {
    let hex = HexColor::from(color);
    let opaque = HexColor { a: 255, ..hex };
    if hex.a == 255 {
        format!("{name}=\"{opaque}\"")
    } else {
        let opacity = f64::from(hex.a) / 255.0;
        format!("{name}=\"{opaque}\" {name}-opacity=\"{opacity:.3}\"")
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

impl DrawingSurface for SvgSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
        self.body.clear();
    }

    fn clear(&mut self) {
        self.body.clear();
    }

    fn stroke_arc(&mut self, arc: &Arc, stroke: &Stroke, color: Color) {
        if arc.sweep_angle == 0.0 {
            log::trace!("Skipping empty arc at {:?}", arc.center);
            return;
        }
        let path = arc.to_path(ARC_TOLERANCE).to_svg();
        self.push(format_args!(
            "<path d=\"{path}\" fill=\"none\" {} stroke-width=\"{}\" stroke-linecap=\"butt\"/>",
            paint("stroke", color),
            stroke.width
        ));
    }

    fn stroke_line(&mut self, line: Line, stroke: &Stroke, color: Color) {
        self.push(format_args!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" {} stroke-width=\"{}\" stroke-linecap=\"butt\"/>",
            line.p0.x,
            line.p0.y,
            line.p1.x,
            line.p1.y,
            paint("stroke", color),
            stroke.width
        ));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let rect = rect.abs();
        self.push(format_args!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" {}/>",
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height(),
            paint("fill", color)
        ));
    }

    fn fill_text(&mut self, text: &str, anchor: Point, style: &TextStyle) {
        self.push(format_args!(
            "<text x=\"{}\" y=\"{}\" font-family=\"sans-serif\" font-size=\"{}\" text-anchor=\"middle\" dominant-baseline=\"middle\" {}>{}</text>",
            anchor.x,
            anchor.y,
            style.font_size,
            paint("fill", style.color),
            escape(text)
        ));
    }
}
