use core::fmt;

/// The tag of an [`Event`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A value.
    Next,
    /// The stream failed with an error.
    Failed,
    /// The stream finished normally.
    Completed,
    /// The stream was cancelled before finishing.
    Interrupted,
}

impl EventKind {
    /// Returns `true` for every kind except [`EventKind::Next`].
    pub const fn is_terminating(self) -> bool {
        !matches!(self, EventKind::Next)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Next => "next",
            EventKind::Failed => "failed",
            EventKind::Completed => "completed",
            EventKind::Interrupted => "interrupted",
        };
        f.write_str(name)
    }
}

/// Something that happened on a stream of `V` values failing with `E`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<V, E> {
    /// A value.
    Next(V),
    /// The stream failed. Terminating.
    Failed(E),
    /// The stream finished normally. Terminating.
    Completed,
    /// The stream was cancelled. Terminating.
    Interrupted,
}

impl<V, E> Event<V, E> {
    /// Returns the tag of this event.
    pub const fn kind(&self) -> EventKind {
        match self {
            Event::Next(_) => EventKind::Next,
            Event::Failed(_) => EventKind::Failed,
            Event::Completed => EventKind::Completed,
            Event::Interrupted => EventKind::Interrupted,
        }
    }

    /// Returns `true` if no further events may follow this one.
    pub const fn is_terminating(&self) -> bool {
        self.kind().is_terminating()
    }

    /// Returns the value of a `Next` event.
    pub fn value(&self) -> Option<&V> {
        match self {
            Event::Next(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the error of a `Failed` event.
    pub fn error(&self) -> Option<&E> {
        match self {
            Event::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Consumes the event, returning the value of a `Next` event.
    pub fn into_value(self) -> Option<V> {
        match self {
            Event::Next(value) => Some(value),
            _ => None,
        }
    }

    /// Transforms the value of a `Next` event, leaving other kinds as they are.
    pub fn map<U, F>(self, f: F) -> Event<U, E>
    where
        F: FnOnce(V) -> U,
    {
        match self {
            Event::Next(value) => Event::Next(f(value)),
            Event::Failed(error) => Event::Failed(error),
            Event::Completed => Event::Completed,
            Event::Interrupted => Event::Interrupted,
        }
    }

    /// Transforms the error of a `Failed` event, leaving other kinds as they are.
    pub fn map_error<G, F>(self, f: F) -> Event<V, G>
    where
        F: FnOnce(E) -> G,
    {
        match self {
            Event::Next(value) => Event::Next(value),
            Event::Failed(error) => Event::Failed(f(error)),
            Event::Completed => Event::Completed,
            Event::Interrupted => Event::Interrupted,
        }
    }
}
