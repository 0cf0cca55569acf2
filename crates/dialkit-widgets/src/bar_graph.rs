//! Bar graph widget handle.

use dialkit_core::{
    BarGraphConfig, BarGraphModel, BarGraphProperty, BarGraphPropertyKey, DrawingSurface, InputEvent, PropertyError,
    WidgetId,
};
use dialkit_render::paint_bar_graph;
use serde_json::Value;

/// A display-only bar graph that owns its drawing surface.
#[derive(Debug)]
pub struct BarGraph<S: DrawingSurface> {
    id: WidgetId,
    model: BarGraphModel,
    surface: S,
}

impl<S: DrawingSurface> BarGraph<S> {
    /// Wrap a model and paint it once.
    pub fn new(model: BarGraphModel, surface: S) -> Self {
        let mut graph = Self {
            id: WidgetId::new_v4(),
            model,
            surface,
        };
        log::debug!(
            "Created bar graph {} ({}x{})",
            graph.id,
            graph.model.size().width,
            graph.model.size().height
        );
        graph.redraw();
        graph
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn model(&self) -> &BarGraphModel {
        &self.model
    }

    pub fn node(&self) -> &S {
        &self.surface
    }

    pub fn into_node(self) -> S {
        self.surface
    }

    pub fn value(&self) -> f64 {
        self.model.value()
    }

    /// Clamp, round and show a value.
    pub fn set_value(&mut self, value: f64) {
        if self.model.set_value(value) {
            self.redraw();
        } else {
            log::debug!("Bar graph {}: discarding non-numeric value", self.id);
        }
    }

    pub fn peaks(&self) -> Vec<f64> {
        self.model.peaks()
    }

    pub fn set_peaks(&mut self, peaks: &[f64]) {
        self.model.set_peaks(peaks);
        self.redraw();
    }

    pub fn property(&self, key: BarGraphPropertyKey) -> BarGraphProperty {
        self.model.property(key)
    }

    pub fn set_property(&mut self, property: BarGraphProperty) {
        self.model.set_property(property);
        self.redraw();
    }

    pub fn property_by_name(&self, name: &str) -> Option<Value> {
        self.model.property_by_name(name)
    }

    pub fn set_property_by_name(&mut self, name: &str, value: Value) -> Result<(), PropertyError> {
        self.model.set_property_by_name(name, value).inspect_err(|e| {
            log::warn!("Bar graph {}: ignoring property write: {}", self.id, e);
        })?;
        self.redraw();
        Ok(())
    }

    pub fn apply_config(&mut self, config: &BarGraphConfig) {
        self.model.apply_config(config);
        self.redraw();
    }

    pub fn config(&self) -> BarGraphConfig {
        self.model.config()
    }

    /// Bar graphs only react to resizes; other input is ignored.
    pub fn handle_event(&mut self, event: &InputEvent) {
        if matches!(event, InputEvent::Resize) {
            self.redraw();
        }
    }

    pub fn redraw(&mut self) {
        paint_bar_graph(&self.model, &mut self.surface);
    }

    pub fn resize(&mut self) {
        self.surface.resize(self.model.size());
        self.redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialkit_core::{PointerEvent, TouchEvent};
    use dialkit_render::{DisplayList, DrawCommand};
    use kurbo::{Point, Rect, Size};

    fn graph() -> BarGraph<DisplayList> {
        let size = Size::new(200.0, 40.0);
        BarGraph::new(BarGraphModel::new(size), DisplayList::new(size))
    }

    fn fill_rect(graph: &BarGraph<DisplayList>) -> Option<Rect> {
        graph
            .node()
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rect { rect, .. } => Some(*rect),
                _ => None,
            })
            .nth(1)
    }

    #[test]
    fn test_set_value_clamps_and_repaints() {
        let mut graph = graph();
        graph.set_value(150.0);
        assert!((graph.value() - 100.0).abs() < f64::EPSILON);
        assert_eq!(fill_rect(&graph), Some(Rect::new(0.0, 10.0, 200.0, 30.0)));

        graph.set_value(-10.0);
        assert!((graph.value() - 0.0).abs() < f64::EPSILON);
        assert_eq!(fill_rect(&graph), Some(Rect::new(0.0, 10.0, 0.0, 30.0)));
    }

    #[test]
    fn test_peaks_roundtrip_and_draw() {
        let mut graph = graph();
        graph.set_peaks(&[25.0, 75.0]);
        assert_eq!(graph.peaks(), vec![25.0, 75.0]);
        let lines = graph
            .node()
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { width, .. } if *width == 2.0))
            .count();
        // Six default markers plus two peaks.
        assert_eq!(lines, 8);
    }

    #[test]
    fn test_input_is_ignored() {
        let mut graph = graph();
        let before = graph.node().clone();
        graph.handle_event(&PointerEvent::Move { position: Point::new(50.0, 20.0) }.into());
        graph.handle_event(&TouchEvent::Cancel.into());
        assert_eq!(graph.node(), &before);
        assert!((graph.value() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_property_by_name_repaints() {
        let mut graph = graph();
        graph.set_property_by_name("markerStep", serde_json::Value::Null).unwrap();
        let markers = graph
            .node()
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count();
        assert_eq!(markers, 0);
        assert!(graph.set_property_by_name("valPeaks", serde_json::json!("x")).is_err());
    }

    #[test]
    fn test_config_applies() {
        let mut graph = graph();
        let config = BarGraphConfig {
            val_min: -60.0,
            val_max: 0.0,
            val: -30.0,
            val_peaks: vec![-6.0],
            marker_start: None,
            ..BarGraphConfig::default()
        };
        graph.apply_config(&config);
        assert_eq!(fill_rect(&graph), Some(Rect::new(0.0, 10.0, 100.0, 30.0)));
        assert_eq!(graph.config(), config);
    }

    #[test]
    fn test_into_node_keeps_last_frame() {
        let mut graph = graph();
        graph.set_value(50.0);
        let frame = graph.into_node();
        let fill = frame
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rect { rect, .. } => Some(*rect),
                _ => None,
            })
            .nth(1);
        assert_eq!(fill, Some(Rect::new(0.0, 10.0, 100.0, 30.0)));
    }
}
