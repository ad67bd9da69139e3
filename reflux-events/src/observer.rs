use crate::{Event, EventKind};
use core::fmt;
use std::sync::Arc;

type Sink<V, E> = Arc<dyn Fn(Event<V, E>) + Send + Sync>;

/// Receives the events of a stream through a single callback.
///
/// Cloning an observer shares the callback.
pub struct Observer<V, E> {
    sink: Sink<V, E>,
}

impl<V, E> Observer<V, E> {
    /// Creates an observer that passes every event to `sink`.
    pub fn new<F>(sink: F) -> Self
    where
        F: Fn(Event<V, E>) + Send + Sync + 'static,
    {
        Self {
            sink: Arc::new(sink),
        }
    }

    /// Starts building an observer from per-kind handlers.
    pub fn builder() -> ObserverBuilder<V, E> {
        ObserverBuilder::default()
    }

    /// Delivers `event`.
    #[inline]
    pub fn send(&self, event: Event<V, E>) {
        (self.sink)(event);
    }

    /// Delivers a `Next` event carrying `value`.
    pub fn send_next(&self, value: V) {
        self.send(Event::Next(value));
    }

    /// Delivers a `Failed` event carrying `error`.
    pub fn send_failed(&self, error: E) {
        self.send(Event::Failed(error));
    }

    /// Delivers a `Completed` event.
    pub fn send_completed(&self) {
        self.send(Event::Completed);
    }

    /// Delivers an `Interrupted` event.
    pub fn send_interrupted(&self) {
        self.send(Event::Interrupted);
    }
}

impl<V, E> Clone for Observer<V, E> {
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<V, E> fmt::Debug for Observer<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("shared", &Arc::strong_count(&self.sink))
            .finish_non_exhaustive()
    }
}

type ValueHandler<T> = Box<dyn Fn(T) + Send + Sync>;
type SignalHandler = Box<dyn Fn() + Send + Sync>;

/// Builds an [`Observer`] out of one optional handler per event kind.
///
/// Events of a kind without a handler are dropped.
pub struct ObserverBuilder<V, E> {
    on_next: Option<ValueHandler<V>>,
    on_failed: Option<ValueHandler<E>>,
    on_completed: Option<SignalHandler>,
    on_interrupted: Option<SignalHandler>,
}

impl<V, E> Default for ObserverBuilder<V, E> {
    fn default() -> Self {
        Self {
            on_next: None,
            on_failed: None,
            on_completed: None,
            on_interrupted: None,
        }
    }
}

impl<V, E> ObserverBuilder<V, E> {
    /// Sets the handler for `Next` values, replacing any earlier one.
    pub fn on_next<F>(mut self, handler: F) -> Self
    where
        F: Fn(V) + Send + Sync + 'static,
    {
        self.on_next = Some(Box::new(handler));
        self
    }

    /// Sets the handler for `Failed` errors, replacing any earlier one.
    pub fn on_failed<F>(mut self, handler: F) -> Self
    where
        F: Fn(E) + Send + Sync + 'static,
    {
        self.on_failed = Some(Box::new(handler));
        self
    }

    /// Sets the handler for `Completed`, replacing any earlier one.
    pub fn on_completed<F>(mut self, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_completed = Some(Box::new(handler));
        self
    }

    /// Sets the handler for `Interrupted`, replacing any earlier one.
    pub fn on_interrupted<F>(mut self, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_interrupted = Some(Box::new(handler));
        self
    }

    /// Finishes the observer.
    pub fn build(self) -> Observer<V, E>
    where
        V: 'static,
        E: 'static,
    {
        let Self {
            on_next,
            on_failed,
            on_completed,
            on_interrupted,
        } = self;

        Observer::new(move |event: Event<V, E>| {
            let kind = event.kind();
            let handled = match event {
                Event::Next(value) => on_next.as_ref().map(|handler| handler(value)),
                Event::Failed(error) => on_failed.as_ref().map(|handler| handler(error)),
                Event::Completed => on_completed.as_ref().map(|handler| handler()),
                Event::Interrupted => on_interrupted.as_ref().map(|handler| handler()),
            };
            if handled.is_none() {
                tracing::trace!(%kind, "observer has no handler for event");
            }
        })
    }
}

impl<V, E> fmt::Debug for ObserverBuilder<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handled: Vec<EventKind> = [
            (EventKind::Next, self.on_next.is_some()),
            (EventKind::Failed, self.on_failed.is_some()),
            (EventKind::Completed, self.on_completed.is_some()),
            (EventKind::Interrupted, self.on_interrupted.is_some()),
        ]
        .into_iter()
        .filter_map(|(kind, set)| set.then_some(kind))
        .collect();
        f.debug_struct("ObserverBuilder")
            .field("handled", &handled)
            .finish()
    }
}
