use crate::Disposable;
use reflux_sync::AtomicCell;

/// A [`Disposable`] that only records that it was disposed.
#[derive(Debug, Default)]
pub struct SimpleDisposable {
    disposed: AtomicCell<bool>,
}

impl SimpleDisposable {
    /// Creates an active disposable.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Disposable for SimpleDisposable {
    #[inline]
    fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    #[inline]
    fn dispose(&self) {
        self.disposed.set(true);
    }
}
