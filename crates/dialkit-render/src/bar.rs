//! Bar graph painter.

use dialkit_core::{BarGraphModel, DrawingSurface};
use kurbo::{Cap, Line, Point, Rect, Stroke};
use peniko::Color;

/// Width of marker and peak lines in pixels.
const TICK_WIDTH: f64 = 2.0;

/// Everything needed to paint a bar graph, in surface coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    /// Bar thickness.
    pub line_width: f64,
    pub track: Rect,
    pub fill: Rect,
    /// Full-height scale markers.
    pub markers: Vec<Line>,
    /// Bar-height peak ticks.
    pub peaks: Vec<Line>,
    pub color_track: Color,
    pub color_fill: Color,
    pub color_markers: Color,
}

impl BarLayout {
    pub fn compute(model: &BarGraphModel) -> Self {
        let props = model.properties();
        let range = model.range();
        let size = model.size();
        let (width, height) = (size.width, size.height);

        let line_width = (props.track_width * height).round();
        let top = 0.5 * height - 0.5 * line_width;
        let bottom = top + line_width;
        let x_at = |value: f64| (width * range.relative(value)).round();

        let markers = props
            .markers
            .values()
            .into_iter()
            .map(|v| {
                let x = x_at(v);
                Line::new(Point::new(x, 0.0), Point::new(x, height))
            })
            .collect();

        let peaks = model
            .peaks()
            .into_iter()
            .map(|v| {
                let x = x_at(v);
                Line::new(Point::new(x, top), Point::new(x, bottom))
            })
            .collect();

        let fill_end = width * range.relative(model.value());

        Self {
            line_width,
            track: Rect::new(0.0, top, width, bottom),
            fill: Rect::new(0.0, top, fill_end, bottom),
            markers,
            peaks,
            color_track: props.color_bg,
            color_fill: props.color_fg,
            color_markers: props.color_markers,
        }
    }

    /// Markers first, then the track and filling, then peaks on top.
    pub fn paint(&self, surface: &mut impl DrawingSurface) {
        let tick = Stroke::new(TICK_WIDTH).with_caps(Cap::Butt);
        for marker in &self.markers {
            surface.stroke_line(*marker, &tick, self.color_markers);
        }
        surface.fill_rect(self.track, self.color_track);
        surface.fill_rect(self.fill, self.color_fill);
        for peak in &self.peaks {
            surface.stroke_line(*peak, &tick, self.color_fill);
        }
    }
}

/// Repaint a bar graph from scratch.
pub fn paint_bar_graph(model: &BarGraphModel, surface: &mut impl DrawingSurface) {
    if surface.size() != model.size() {
        log::debug!("Resizing bar graph surface to {}x{}", model.size().width, model.size().height);
        surface.resize(model.size());
    }
    surface.clear();
    BarLayout::compute(model).paint(surface);
}
