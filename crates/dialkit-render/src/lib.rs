//! DialKit Render Library
//!
//! Painters that turn knob and bar graph models into drawing-surface calls,
//! plus two surfaces: a recording display list and an SVG document writer.

mod bar;
mod display_list;
mod knob;
mod svg;

pub use bar::{BarLayout, paint_bar_graph};
pub use display_list::{DisplayList, DrawCommand};
pub use knob::{KnobLayout, TextLayout, canvas_sweep, paint_knob};
pub use svg::{RenderError, SvgSurface};
