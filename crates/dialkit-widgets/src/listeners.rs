//! Ordered value-change listeners.

use std::fmt;

/// Handle returned by [`ListenerRegistry::add`], used to remove a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

type Listener<W> = Box<dyn FnMut(&W, f64)>;

/// Callbacks invoked in registration order with the widget and its new value.
///
/// Removing a listener empties its slot rather than shifting the others, so
/// ids stay valid and empty slots are skipped on notification.
pub struct ListenerRegistry<W: ?Sized> {
    slots: Vec<Option<Listener<W>>>,
}

impl<W: ?Sized> Default for ListenerRegistry<W> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<W: ?Sized> fmt::Debug for ListenerRegistry<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("active", &self.len())
            .field("slots", &self.slots.len())
            .finish()
    }
}

impl<W: ?Sized> ListenerRegistry<W> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener.
    pub fn add(&mut self, listener: impl FnMut(&W, f64) + 'static) -> ListenerId {
        self.slots.push(Some(Box::new(listener)));
        ListenerId(self.slots.len() - 1)
    }

    /// Empty the listener's slot. Returns `false` if it was already gone.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        self.slots.get_mut(id.0).and_then(Option::take).is_some()
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invoke every listener in registration order.
    pub fn notify(&mut self, widget: &W, value: f64) {
        for listener in self.slots.iter_mut().flatten() {
            listener(widget, value);
        }
    }
}
