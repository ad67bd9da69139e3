use crate::Disposable;
use core::fmt;
use reflux_sync::AtomicCell;

type Action = Box<dyn FnOnce() + Send + Sync>;

/// A [`Disposable`] that runs a closure the first time it is disposed.
///
/// The closure slot is emptied atomically, so exactly one caller of
/// [`dispose`](Disposable::dispose) gets to run it.
pub struct ActionDisposable {
    action: AtomicCell<Option<Action>>,
}

impl ActionDisposable {
    /// Creates a disposable that runs `action` on disposal.
    pub fn new<F>(action: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        Self {
            action: AtomicCell::new(Some(Box::new(action))),
        }
    }
}

impl Disposable for ActionDisposable {
    fn is_disposed(&self) -> bool {
        self.action.read(Option::is_none)
    }

    fn dispose(&self) {
        // Run outside the lock; the action may touch this disposable again.
        if let Some(action) = self.action.swap(None) {
            action();
        }
    }
}

impl fmt::Debug for ActionDisposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDisposable")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
