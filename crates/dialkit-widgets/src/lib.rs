//! Knob and bar graph widgets.
//!
//! This crate ties the core models to a drawing surface:
//!
//! - **Knob**: interactive rotary control with value-change listeners
//! - **BarGraph**: display-only linear gauge with peak markers
//! - **Factory**: `DialKit::create_knob` / `DialKit::create_bar_graph`

pub mod bar_graph;
pub mod factory;
pub mod knob;
pub mod listeners;

pub use bar_graph::BarGraph;
pub use factory::{DialKit, WidgetError};
pub use knob::Knob;
pub use listeners::{ListenerId, ListenerRegistry};
