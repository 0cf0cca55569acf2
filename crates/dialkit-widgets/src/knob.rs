//! Knob widget handle.

use dialkit_core::{
    DrawingSurface, Effects, EntryChange, EntryOverlay, InputEvent, Instant, KnobConfig, KnobModel, KnobProperty,
    KnobPropertyKey, PropertyError, WidgetId,
};
use dialkit_render::paint_knob;
use serde_json::Value;

use crate::listeners::{ListenerId, ListenerRegistry};

/// An interactive knob that owns its drawing surface.
///
/// Every state change repaints the surface; committed values are reported to
/// listeners after the repaint. Entry overlay changes are returned to the
/// caller, which is responsible for showing the host's text field.
pub struct Knob<S: DrawingSurface> {
    id: WidgetId,
    model: KnobModel,
    surface: S,
    listeners: ListenerRegistry<Knob<S>>,
}

impl<S: DrawingSurface> std::fmt::Debug for Knob<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Knob")
            .field("id", &self.id)
            .field("value", &self.model.value())
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

impl<S: DrawingSurface> Knob<S> {
    /// Wrap a model and paint it once.
    pub fn new(model: KnobModel, surface: S) -> Self {
        let mut knob = Self {
            id: WidgetId::new_v4(),
            model,
            surface,
            listeners: ListenerRegistry::new(),
        };
        log::debug!("Created knob {} ({}x{})", knob.id, knob.model.size().width, knob.model.size().height);
        knob.redraw();
        knob
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn model(&self) -> &KnobModel {
        &self.model
    }

    /// The drawable this knob paints into.
    pub fn node(&self) -> &S {
        &self.surface
    }

    /// Give up the widget and keep its drawable.
    pub fn into_node(self) -> S {
        self.surface
    }

    pub fn value(&self) -> f64 {
        self.model.value()
    }

    /// Clamp, round and commit a value, notifying listeners.
    pub fn set_value(&mut self, value: f64) {
        let effects = self.model.set_value(value);
        self.apply(effects);
    }

    /// Show a provisional value without notifying anyone.
    pub fn set_value_floating(&mut self, value: f64) {
        let effects = self.model.set_value_floating(value);
        self.apply(effects);
    }

    pub fn commit(&mut self) {
        let effects = self.model.commit();
        self.apply(effects);
    }

    pub fn abort(&mut self) {
        let effects = self.model.abort();
        self.apply(effects);
    }

    pub fn add_listener(&mut self, listener: impl FnMut(&Knob<S>, f64) + 'static) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn property(&self, key: KnobPropertyKey) -> KnobProperty {
        self.model.property(key)
    }

    pub fn set_property(&mut self, property: KnobProperty) {
        let effects = self.model.set_property(property);
        self.apply(effects);
    }

    pub fn property_by_name(&self, name: &str) -> Option<Value> {
        self.model.property_by_name(name)
    }

    /// Set a property from JSON. Malformed values leave the knob untouched.
    pub fn set_property_by_name(&mut self, name: &str, value: Value) -> Result<(), PropertyError> {
        let effects = self.model.set_property_by_name(name, value).inspect_err(|e| {
            log::warn!("Knob {}: ignoring property write: {}", self.id, e);
        })?;
        self.apply(effects);
        Ok(())
    }

    pub fn apply_config(&mut self, config: &KnobConfig) {
        let effects = self.model.apply_config(config);
        self.apply(effects);
    }

    pub fn config(&self) -> KnobConfig {
        self.model.config()
    }

    /// Deliver an input event now.
    pub fn handle_event(&mut self, event: &InputEvent) -> Option<EntryChange> {
        self.handle_event_at(event, Instant::now())
    }

    /// Deliver an input event that happened at `now`.
    pub fn handle_event_at(&mut self, event: &InputEvent, now: Instant) -> Option<EntryChange> {
        let effects = self.model.handle_event(event, now);
        self.apply(effects)
    }

    /// Fire due timers. Hosts call this once [`Knob::next_deadline`] has passed.
    pub fn poll_timers(&mut self, now: Instant) -> Option<EntryChange> {
        let effects = self.model.poll_timers(now);
        self.apply(effects)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.model.next_deadline()
    }

    pub fn entry(&self) -> &EntryOverlay {
        self.model.entry()
    }

    pub fn entry_mut(&mut self) -> &mut EntryOverlay {
        self.model.entry_mut()
    }

    pub fn open_entry(&mut self) -> Option<EntryChange> {
        let effects = self.model.open_entry();
        self.apply(effects)
    }

    /// Submit text from a host text field.
    pub fn submit_entry_text(&mut self, text: &str) -> Option<EntryChange> {
        let effects = self.model.submit_entry_text(text);
        self.apply(effects)
    }

    pub fn cancel_entry(&mut self) -> Option<EntryChange> {
        let effects = self.model.cancel_entry();
        self.apply(effects)
    }

    /// Repaint from scratch and restyle the entry overlay.
    pub fn redraw(&mut self) {
        self.model.refresh_entry_style();
        paint_knob(&self.model, &mut self.surface);
    }

    /// Reset the surface to the knob's size and repaint.
    pub fn resize(&mut self) {
        self.surface.resize(self.model.size());
        self.redraw();
    }

    fn apply(&mut self, effects: Effects) -> Option<EntryChange> {
        if effects.redraw {
            self.redraw();
        }
        if let Some(change) = effects.entry {
            log::debug!("Knob {} entry overlay {:?}", self.id, change);
        }
        if !effects.commits.is_empty() {
            // Listeners borrow the knob, so the registry is moved out while they run.
            let mut listeners = std::mem::take(&mut self.listeners);
            for value in effects.commits {
                log::debug!("Knob {} notifying listeners of {}", self.id, value);
                listeners.notify(self, value);
            }
            self.listeners = listeners;
        }
        effects.entry
    }
}
