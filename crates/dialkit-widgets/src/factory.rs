//! Widget construction.

use dialkit_core::{BarGraphConfig, BarGraphModel, DrawingSurface, KnobConfig, KnobModel};
use kurbo::Size;
use thiserror::Error;

use crate::bar_graph::BarGraph;
use crate::knob::Knob;

/// Widget construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum WidgetError {
    #[error("Invalid widget dimensions {width}x{height}: both must be positive and finite")]
    InvalidDimensions { width: f64, height: f64 },
}

/// Factory for knobs and bar graphs with fixed pixel dimensions.
pub struct DialKit;

impl DialKit {
    pub fn create_knob<S: DrawingSurface>(width: f64, height: f64, surface: S) -> Result<Knob<S>, WidgetError> {
        Self::create_knob_with_config(width, height, surface, &KnobConfig::default())
    }

    pub fn create_knob_with_config<S: DrawingSurface>(
        width: f64,
        height: f64,
        surface: S,
        config: &KnobConfig,
    ) -> Result<Knob<S>, WidgetError> {
        let size = checked_size(width, height)?;
        Ok(Knob::new(KnobModel::with_config(size, config), surface))
    }

    pub fn create_bar_graph<S: DrawingSurface>(
        width: f64,
        height: f64,
        surface: S,
    ) -> Result<BarGraph<S>, WidgetError> {
        Self::create_bar_graph_with_config(width, height, surface, &BarGraphConfig::default())
    }

    pub fn create_bar_graph_with_config<S: DrawingSurface>(
        width: f64,
        height: f64,
        surface: S,
        config: &BarGraphConfig,
    ) -> Result<BarGraph<S>, WidgetError> {
        let size = checked_size(width, height)?;
        Ok(BarGraph::new(BarGraphModel::with_config(size, config), surface))
    }
}

fn checked_size(width: f64, height: f64) -> Result<Size, WidgetError> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if valid(width) && valid(height) {
        Ok(Size::new(width, height))
    } else {
        Err(WidgetError::InvalidDimensions { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialkit_render::DisplayList;

    #[test]
    fn test_create_knob() {
        let knob = DialKit::create_knob(120.0, 80.0, DisplayList::default()).unwrap();
        assert_eq!(knob.model().size(), Size::new(120.0, 80.0));
        assert_eq!(knob.node().size(), Size::new(120.0, 80.0));
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        for (w, h) in [(0.0, 10.0), (10.0, -1.0), (f64::NAN, 10.0), (10.0, f64::INFINITY)] {
            let err = DialKit::create_bar_graph(w, h, DisplayList::default()).unwrap_err();
            assert!(matches!(err, WidgetError::InvalidDimensions { .. }));
        }
        assert!(DialKit::create_knob(0.0, 0.0, DisplayList::default()).is_err());
    }

    #[test]
    fn test_config_at_construction() {
        let config = KnobConfig {
            val: 64.0,
            ..KnobConfig::default()
        };
        let knob = DialKit::create_knob_with_config(100.0, 100.0, DisplayList::default(), &config).unwrap();
        assert!((knob.value() - 64.0).abs() < f64::EPSILON);
        assert_eq!(knob.node().texts(), vec!["64"]);
    }

    #[test]
    fn test_widgets_get_distinct_ids() {
        let a = DialKit::create_bar_graph(10.0, 10.0, DisplayList::default()).unwrap();
        let b = DialKit::create_bar_graph(10.0, 10.0, DisplayList::default()).unwrap();
        assert_ne!(a.id(), b.id());
    }
}
