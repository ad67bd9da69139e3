use crate::{Disposable, DisposableRef};
use core::fmt;
use reflux_sync::AtomicCell;

/// The inner disposable and the disposed flag, swapped together as a unit.
#[derive(Clone, Default)]
struct SerialState {
    inner: Option<DisposableRef>,
    disposed: bool,
}

/// A [`Disposable`] that owns at most one inner disposable.
///
/// Replacing the inner disposable disposes the previous one. Once the serial
/// disposable itself has been disposed, any disposable assigned afterwards is
/// disposed immediately.
///
/// This is the usual holder for the "current" cancellation handle of an
/// operation that is restarted over time.
#[derive(Default)]
pub struct SerialDisposable {
    state: AtomicCell<SerialState>,
}

impl SerialDisposable {
    /// Creates a serial disposable with no inner disposable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a serial disposable that starts out owning `inner`.
    pub fn with_inner(inner: DisposableRef) -> Self {
        Self {
            state: AtomicCell::new(SerialState {
                inner: Some(inner),
                disposed: false,
            }),
        }
    }

    /// Returns the current inner disposable.
    pub fn inner(&self) -> Option<DisposableRef> {
        self.state.read(|state| state.inner.clone())
    }

    /// Replaces the inner disposable.
    ///
    /// The previous inner disposable is always disposed, even when it is the
    /// same object as `inner`. If this serial disposable was already disposed,
    /// `inner` is disposed on the spot. Both happen after the lock is released.
    pub fn set_inner(&self, inner: Option<DisposableRef>) {
        let previous = self.state.modify_transform(|mut state| {
            state.inner = inner.clone();
            state
        });

        if let Some(previous) = previous.inner {
            tracing::trace!("serial disposable replacing inner disposable");
            previous.dispose();
        }

        if previous.disposed {
            if let Some(inner) = inner {
                inner.dispose();
            }
        }
    }
}

impl Disposable for SerialDisposable {
    fn is_disposed(&self) -> bool {
        self.state.read(|state| state.disposed)
    }

    fn dispose(&self) {
        let previous = self.state.swap(SerialState {
            inner: None,
            disposed: true,
        });

        if let Some(inner) = previous.inner {
            inner.dispose();
        }
    }
}

impl fmt::Debug for SerialDisposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (has_inner, disposed) = self
            .state
            .read(|state| (state.inner.is_some(), state.disposed));
        f.debug_struct("SerialDisposable")
            .field("has_inner", &has_inner)
            .field("disposed", &disposed)
            .finish()
    }
}
