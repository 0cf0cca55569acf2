//! Scenario replay.

use dialkit_core::{Duration, EntryChange, Instant, PropertyError};
use dialkit_render::SvgSurface;
use dialkit_widgets::{BarGraph, DialKit, Knob, WidgetError};
use kurbo::Size;
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::io;
use std::rc::Rc;
use thiserror::Error;

use crate::scenario::{Action, Scenario, Step, WidgetSpec};

/// Errors loading or replaying a scenario.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid scenario: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Widget(#[from] WidgetError),
    #[error("Step at {at_ms}ms: {source}")]
    Property {
        at_ms: u64,
        #[source]
        source: PropertyError,
    },
    #[error("Step at {at_ms}ms: a {widget} does not support `{action}`")]
    Unsupported {
        at_ms: u64,
        widget: &'static str,
        action: &'static str,
    },
}

/// A listener notification observed during replay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayCommit {
    pub at_ms: u64,
    pub value: f64,
}

/// An entry overlay change observed during replay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayEntryChange {
    pub at_ms: u64,
    pub change: EntryChange,
}

/// Outcome of a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    pub commits: Vec<ReplayCommit>,
    pub entry_changes: Vec<ReplayEntryChange>,
    pub final_value: f64,
    /// The last frame as an SVG document.
    #[serde(skip)]
    pub svg: String,
}

/// Run a scenario to completion. Pending timers are flushed after the last step.
pub fn replay(scenario: &Scenario) -> Result<ReplayReport, ScriptError> {
    let start = Instant::now();
    match &scenario.widget {
        WidgetSpec::Knob { width, height, config } => {
            let surface = SvgSurface::new(Size::new(*width, *height));
            let knob = DialKit::create_knob_with_config(*width, *height, surface, config)?;
            KnobReplay::new(knob, start).run(&scenario.steps)
        }
        WidgetSpec::BarGraph { width, height, config } => {
            let surface = SvgSurface::new(Size::new(*width, *height));
            let mut graph = DialKit::create_bar_graph_with_config(*width, *height, surface, config)?;
            for step in &scenario.steps {
                bar_graph_step(&mut graph, step)?;
            }
            Ok(ReplayReport {
                commits: Vec::new(),
                entry_changes: Vec::new(),
                final_value: graph.value(),
                svg: graph.node().to_svg_string(),
            })
        }
    }
}

fn unsupported(step: &Step, widget: &'static str) -> ScriptError {
    ScriptError::Unsupported {
        at_ms: step.at_ms,
        widget,
        action: step.action.name(),
    }
}

fn property_error(step: &Step) -> impl FnOnce(PropertyError) -> ScriptError {
    let at_ms = step.at_ms;
    move |source| ScriptError::Property { at_ms, source }
}

fn bar_graph_step(graph: &mut BarGraph<SvgSurface>, step: &Step) -> Result<(), ScriptError> {
    log::debug!("{}ms: {}", step.at_ms, step.action.name());
    match &step.action {
        Action::Input(event) => graph.handle_event(event),
        Action::SetValue(value) => graph.set_value(*value),
        Action::SetProperty { name, value } => graph
            .set_property_by_name(name, value.clone())
            .map_err(property_error(step))?,
        Action::SetPeaks(peaks) => graph.set_peaks(peaks),
        Action::SetValueFloating(_) | Action::SubmitEntry(_) | Action::Abort {} | Action::Commit {} => {
            return Err(unsupported(step, "bar graph"));
        }
    }
    Ok(())
}

struct KnobReplay {
    knob: Knob<SvgSurface>,
    start: Instant,
    /// Scenario time of the step being replayed, read by the listener.
    clock: Rc<Cell<u64>>,
    commits: Rc<RefCell<Vec<ReplayCommit>>>,
    entry_changes: Vec<ReplayEntryChange>,
}

impl KnobReplay {
    fn new(mut knob: Knob<SvgSurface>, start: Instant) -> Self {
        let clock = Rc::new(Cell::new(0));
        let commits = Rc::new(RefCell::new(Vec::new()));
        {
            let clock = Rc::clone(&clock);
            let commits = Rc::clone(&commits);
            knob.add_listener(move |_, value| {
                let at_ms = clock.get();
                log::info!("{}ms: committed {}", at_ms, value);
                commits.borrow_mut().push(ReplayCommit { at_ms, value });
            });
        }
        Self {
            knob,
            start,
            clock,
            commits,
            entry_changes: Vec::new(),
        }
    }

    fn at(&self, at_ms: u64) -> Instant {
        self.start + Duration::from_millis(at_ms)
    }

    fn ms_since_start(&self, instant: Instant) -> u64 {
        u64::try_from(instant.saturating_duration_since(self.start).as_millis()).unwrap_or(u64::MAX)
    }

    fn record(&mut self, at_ms: u64, change: Option<EntryChange>) {
        if let Some(change) = change {
            log::info!("{}ms: entry overlay {:?}", at_ms, change);
            self.entry_changes.push(ReplayEntryChange { at_ms, change });
        }
    }

    /// Fire timers that fall due before `until`, each at its own deadline.
    fn advance_to(&mut self, until: Instant) {
        while let Some(deadline) = self.knob.next_deadline().filter(|d| *d <= until) {
            let at_ms = self.ms_since_start(deadline);
            self.clock.set(at_ms);
            let change = self.knob.poll_timers(deadline);
            self.record(at_ms, change);
        }
    }

    fn step(&mut self, step: &Step) -> Result<(), ScriptError> {
        let now = self.at(step.at_ms);
        self.advance_to(now);
        self.clock.set(step.at_ms);
        log::debug!("{}ms: {}", step.at_ms, step.action.name());

        let change = match &step.action {
            Action::Input(event) => self.knob.handle_event_at(event, now),
            Action::SetValue(value) => {
                self.knob.set_value(*value);
                None
            }
            Action::SetValueFloating(value) => {
                self.knob.set_value_floating(*value);
                None
            }
            Action::SetProperty { name, value } => {
                self.knob
                    .set_property_by_name(name, value.clone())
                    .map_err(property_error(step))?;
                None
            }
            Action::SubmitEntry(text) => self.knob.submit_entry_text(text),
            Action::Abort {} => {
                self.knob.abort();
                None
            }
            Action::Commit {} => {
                self.knob.commit();
                None
            }
            Action::SetPeaks(_) => return Err(unsupported(step, "knob")),
        };
        self.record(step.at_ms, change);
        Ok(())
    }

    fn run(mut self, steps: &[Step]) -> Result<ReplayReport, ScriptError> {
        for step in steps {
            self.step(step)?;
        }
        // Let debounced commits and double-tap windows run out.
        while let Some(deadline) = self.knob.next_deadline() {
            self.advance_to(deadline);
        }

        let commits = self.commits.borrow().clone();
        Ok(ReplayReport {
            commits,
            entry_changes: self.entry_changes,
            final_value: self.knob.value(),
            svg: self.knob.node().to_svg_string(),
        })
    }
}

impl ReplayReport {
    /// Write the final frame as SVG.
    pub fn write_svg(&self, mut writer: impl io::Write) -> Result<(), ScriptError> {
        writer.write_all(self.svg.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, ScriptError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
