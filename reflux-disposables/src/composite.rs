use crate::{ActionDisposable, Disposable, DisposableRef};
use core::fmt;
use reflux_sync::{AtomicCell, RemovalToken, TokenBag};
use std::sync::{Arc, Weak};

/// `None` once the composite has been disposed.
type Entries = AtomicCell<Option<TokenBag<DisposableRef>>>;

/// A [`Disposable`] that disposes any number of other disposables.
///
/// Disposal happens newest-first: the most recently added entry is disposed
/// first. Adding to a composite that has already been disposed disposes the
/// new entry immediately instead of tracking it.
pub struct CompositeDisposable {
    entries: Arc<Entries>,
}

impl CompositeDisposable {
    /// Creates an empty composite.
    pub fn new() -> Self {
        Self::with_disposables(core::iter::empty())
    }

    /// Creates a composite that already owns `disposables`.
    pub fn with_disposables<I>(disposables: I) -> Self
    where
        I: IntoIterator<Item = DisposableRef>,
    {
        Self {
            entries: Arc::new(AtomicCell::new(Some(disposables.into_iter().collect()))),
        }
    }

    /// Adds `disposable` and returns a handle that can later detach it.
    ///
    /// If the composite was already disposed, `disposable` is disposed right
    /// away and an empty handle is returned.
    pub fn add(&self, disposable: DisposableRef) -> DisposableHandle {
        let token = self.entries.modify(|entries| {
            entries
                .as_mut()
                .map(|bag| bag.insert(Arc::clone(&disposable)))
        });

        match token {
            Some(token) => DisposableHandle::new(token, Arc::downgrade(&self.entries)),
            None => {
                disposable.dispose();
                DisposableHandle::empty()
            }
        }
    }

    /// Like [`add`](Self::add), but accepts an absent disposable, for which an
    /// empty handle is returned.
    pub fn add_optional(&self, disposable: Option<DisposableRef>) -> DisposableHandle {
        match disposable {
            Some(disposable) => self.add(disposable),
            None => DisposableHandle::empty(),
        }
    }

    /// Adds an [`ActionDisposable`] running `action`.
    pub fn add_action<F>(&self, action: F) -> DisposableHandle
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        self.add(Arc::new(ActionDisposable::new(action)))
    }

    /// Returns the number of tracked disposables, or `0` once disposed.
    pub fn len(&self) -> usize {
        self.entries
            .read(|entries| entries.as_ref().map_or(0, TokenBag::len))
    }

    /// Returns `true` if no disposables are tracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CompositeDisposable {
    fn default() -> Self {
        Self::new()
    }
}

impl Disposable for CompositeDisposable {
    fn is_disposed(&self) -> bool {
        self.entries.read(Option::is_none)
    }

    fn dispose(&self) {
        let Some(entries) = self.entries.swap(None) else {
            return;
        };

        tracing::trace!(count = entries.len(), "disposing composite");
        for disposable in entries.iter().rev() {
            disposable.dispose();
        }
    }
}

impl fmt::Debug for CompositeDisposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeDisposable")
            .field("len", &self.len())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// A handle to an entry previously added to a [`CompositeDisposable`].
///
/// The handle only observes its composite: it never keeps it alive, and it
/// turns into a no-op once the composite is dropped or disposed.
pub struct DisposableHandle {
    token: AtomicCell<Option<RemovalToken>>,
    entries: Weak<Entries>,
}

impl DisposableHandle {
    fn new(token: RemovalToken, entries: Weak<Entries>) -> Self {
        Self {
            token: AtomicCell::new(Some(token)),
            entries,
        }
    }

    /// Returns a handle that is not attached to any composite.
    pub fn empty() -> Self {
        Self {
            token: AtomicCell::new(None),
            entries: Weak::new(),
        }
    }

    /// Detaches the entry from its composite without disposing it.
    ///
    /// This only reclaims memory for entries that are no longer needed. It is
    /// a no-op on the second call, on an empty handle, and once the composite
    /// is gone.
    pub fn remove(&self) {
        let Some(token) = self.token.swap(None) else {
            return;
        };

        if let Some(entries) = self.entries.upgrade() {
            // Dropped after the lock is released.
            let _detached = entries.modify(|entries| {
                entries.as_mut().and_then(|bag| bag.remove(&token))
            });
        }
    }
}

impl fmt::Debug for DisposableHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisposableHandle")
            .field("token", &self.token.get())
            .field("attached", &(self.entries.strong_count() > 0))
            .finish()
    }
}
