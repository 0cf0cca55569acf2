//! Knob painter.

use dialkit_core::geometry::{NEEDLE_HALF_WIDTH, center_of, surface_angle, value_to_angle};
use dialkit_core::{DrawingSurface, KnobModel, TextStyle};
use kurbo::{Arc, Cap, Point, Stroke, Vec2};
use peniko::Color;
use std::f64::consts::TAU;

/// Radius of the track as a fraction of the smaller widget dimension.
const RADIUS_RATIO: f64 = 0.4;
/// Secondary label size as a fraction of the track line width.
const LABEL_RATIO: f64 = 0.8;

/// Sweep of a clockwise arc from `start` to `end`, following canvas rules:
/// anything short of a full turn wraps into `[0, 2π)`, a full turn or more
/// draws the whole circle.
pub fn canvas_sweep(start: f64, end: f64) -> f64 {
    let delta = end - start;
    if delta >= TAU {
        TAU
    } else {
        delta.rem_euclid(TAU)
    }
}

/// A line of text and where it goes.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub text: String,
    pub anchor: Point,
    pub style: TextStyle,
}

/// Everything needed to paint a knob, in surface coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct KnobLayout {
    pub center: Point,
    pub radius: f64,
    /// Stroke width shared by the track and the filling.
    pub line_width: f64,
    pub track: Arc,
    /// Filled sweep, or the short needle arc in needle mode.
    pub fill: Arc,
    pub value: TextLayout,
    pub label: Option<TextLayout>,
    pub color_track: Color,
    pub color_fill: Color,
}

impl KnobLayout {
    pub fn compute(model: &KnobModel) -> Self {
        let props = model.properties();
        let size = model.size();
        let center = center_of(size);
        let radius = RADIUS_RATIO * size.width.min(size.height);
        let line_width = (props.track_width * radius).round();
        let offset = props.angle_offset;

        let start = surface_angle(props.angles.start, offset);
        let end = surface_angle(props.angles.end, offset);
        let at_value = surface_angle(value_to_angle(model.value(), props.angles, model.range()), offset);

        let arc = |from: f64, to: f64| Arc {
            center,
            radii: Vec2::new(radius, radius),
            start_angle: from,
            sweep_angle: canvas_sweep(from, to),
            x_rotation: 0.0,
        };

        let fill = if props.needle {
            arc(at_value - NEEDLE_HALF_WIDTH, at_value + NEEDLE_HALF_WIDTH)
        } else {
            arc(start, at_value)
        };

        let value = TextLayout {
            text: model.value_text(),
            anchor: center,
            style: TextStyle::new(model.value_font_size(), props.color_fg),
        };

        let label = props.label.as_ref().map(|text| TextLayout {
            text: text.clone(),
            anchor: Point::new(center.x, center.y + radius),
            style: TextStyle::new((LABEL_RATIO * line_width).round(), props.color_label),
        });

        Self {
            center,
            radius,
            line_width,
            track: arc(start, end),
            fill,
            value,
            label,
            color_track: props.color_bg,
            color_fill: props.color_fg,
        }
    }

    /// Issue the drawing calls for this layout.
    pub fn paint(&self, surface: &mut impl DrawingSurface) {
        let stroke = Stroke::new(self.line_width).with_caps(Cap::Butt);
        surface.stroke_arc(&self.track, &stroke, self.color_track);
        surface.stroke_arc(&self.fill, &stroke, self.color_fill);
        surface.fill_text(&self.value.text, self.value.anchor, &self.value.style);
        if let Some(label) = &self.label {
            surface.fill_text(&label.text, label.anchor, &label.style);
        }
    }
}

/// Repaint a knob from scratch.
pub fn paint_knob(model: &KnobModel, surface: &mut impl DrawingSurface) {
    if surface.size() != model.size() {
        log::debug!("Resizing knob surface to {}x{}", model.size().width, model.size().height);
        surface.resize(model.size());
    }
    surface.clear();
    KnobLayout::compute(model).paint(surface);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DisplayList, DrawCommand};
    use dialkit_core::{HexColor, KnobProperty};
    use kurbo::Size;
    use std::f64::consts::PI;

    fn knob() -> KnobModel {
        KnobModel::new(Size::new(200.0, 100.0))
    }

    #[test]
    fn test_canvas_sweep() {
        assert!((canvas_sweep(0.0, PI) - PI).abs() < 1e-12);
        assert!((canvas_sweep(0.0, TAU) - TAU).abs() < 1e-12);
        assert!((canvas_sweep(1.0, 0.5) - (TAU - 0.5)).abs() < 1e-12);
        assert!(canvas_sweep(2.0, 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_layout_dimensions() {
        let layout = KnobLayout::compute(&knob());
        assert_eq!(layout.center, Point::new(100.0, 50.0));
        assert!((layout.radius - 40.0).abs() < f64::EPSILON);
        assert!((layout.line_width - 16.0).abs() < f64::EPSILON);
        assert!((layout.value.style.font_size - 20.0).abs() < f64::EPSILON);
        assert!(layout.label.is_none());
    }

    #[test]
    fn test_track_follows_offset() {
        let layout = KnobLayout::compute(&knob());
        assert!((layout.track.start_angle + 0.5 * PI).abs() < 1e-12);
        assert!((layout.track.sweep_angle - TAU).abs() < 1e-12);
    }

    #[test]
    fn test_fill_sweep_tracks_value() {
        let mut model = knob();
        let _ = model.set_value(25.0);
        let layout = KnobLayout::compute(&model);
        assert!((layout.fill.start_angle + 0.5 * PI).abs() < 1e-12);
        assert!((layout.fill.sweep_angle - 0.5 * PI).abs() < 1e-12);
    }

    #[test]
    fn test_needle_mode() {
        let mut model = knob();
        let _ = model.set_property(KnobProperty::Needle(true));
        let _ = model.set_value(50.0);
        let layout = KnobLayout::compute(&model);
        // Value 50 of a full turn sits at "down", which is PI/2 on the surface.
        assert!((layout.fill.start_angle - (0.5 * PI - NEEDLE_HALF_WIDTH)).abs() < 1e-12);
        assert!((layout.fill.sweep_angle - 2.0 * NEEDLE_HALF_WIDTH).abs() < 1e-12);
    }

    #[test]
    fn test_label_layout() {
        let mut model = knob();
        let _ = model.set_property(KnobProperty::Label(Some("Gain".into())));
        let layout = KnobLayout::compute(&model);
        let label = layout.label.unwrap();
        assert_eq!(label.anchor, Point::new(100.0, 90.0));
        // round(0.8 * 16)
        assert!((label.style.font_size - 13.0).abs() < f64::EPSILON);
        assert_eq!(label.style.color, model.properties().color_label);
    }

    #[test]
    fn test_paint_order() {
        let mut model = knob();
        let _ = model.set_property(KnobProperty::Label(Some("Pan".into())));
        let _ = model.set_value(10.0);
        let mut list = DisplayList::new(Size::new(10.0, 10.0));
        paint_knob(&model, &mut list);

        assert_eq!(list.size(), Size::new(200.0, 100.0));
        let commands = list.commands();
        assert_eq!(commands.len(), 4);
        assert!(matches!(&commands[0], DrawCommand::Arc { color, .. } if *color == HexColor::rgb(0x18, 0x18, 0x18)));
        assert!(matches!(&commands[1], DrawCommand::Arc { color, .. } if *color == HexColor::rgb(0xff, 0x88, 0x00)));
        assert!(matches!(&commands[2], DrawCommand::Text { text, .. } if text == "10"));
        assert!(matches!(&commands[3], DrawCommand::Text { text, .. } if text == "Pan"));
    }

    #[test]
    fn test_repaint_starts_from_scratch() {
        let mut model = knob();
        let mut list = DisplayList::new(model.size());
        paint_knob(&model, &mut list);
        let _ = model.set_value(70.0);
        paint_knob(&model, &mut list);
        assert_eq!(list.commands().len(), 3);
    }
}
