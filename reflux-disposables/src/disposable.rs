use std::sync::Arc;

/// Something that can be disposed, usually to release a resource or cancel
/// pending work.
///
/// Disposal is monotonic: once [`is_disposed`](Disposable::is_disposed)
/// returns `true` it keeps returning `true`. Implementations must run their
/// release logic at most once, even when `dispose` races on several threads.
pub trait Disposable: Send + Sync {
    /// Returns whether this disposable has been disposed already.
    fn is_disposed(&self) -> bool;

    /// Disposes this disposable. Repeated calls are no-ops.
    fn dispose(&self);
}

/// A shared, type-erased disposable.
pub type DisposableRef = Arc<dyn Disposable>;

impl<D: Disposable + ?Sized> Disposable for Arc<D> {
    #[inline]
    fn is_disposed(&self) -> bool {
        (**self).is_disposed()
    }

    #[inline]
    fn dispose(&self) {
        (**self).dispose()
    }
}

impl<D: Disposable + ?Sized> Disposable for Box<D> {
    #[inline]
    fn is_disposed(&self) -> bool {
        (**self).is_disposed()
    }

    #[inline]
    fn dispose(&self) {
        (**self).dispose()
    }
}
