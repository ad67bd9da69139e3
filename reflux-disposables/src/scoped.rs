use crate::Disposable;
use core::ops::Deref;

/// Disposes the wrapped disposable when dropped.
///
/// Ties the lifetime of a subscription or scheduled job to a lexical scope.
/// Call [`into_inner`](Self::into_inner) to take the disposable back without
/// disposing it.
#[derive(Debug)]
pub struct ScopedDisposable<D: Disposable> {
    /// Only `None` after `into_inner` or `drop` has taken it.
    inner: Option<D>,
}

impl<D: Disposable> ScopedDisposable<D> {
    /// Wraps `inner`.
    pub fn new(inner: D) -> Self {
        Self { inner: Some(inner) }
    }

    /// Releases the wrapped disposable without disposing it.
    pub fn into_inner(mut self) -> D {
        match self.inner.take() {
            Some(inner) => inner,
            None => unreachable!("scoped disposable emptied before into_inner"),
        }
    }
}

impl<D: Disposable> Deref for ScopedDisposable<D> {
    type Target = D;

    #[inline]
    fn deref(&self) -> &D {
        match &self.inner {
            Some(inner) => inner,
            None => unreachable!("scoped disposable emptied while borrowed"),
        }
    }
}

impl<D: Disposable> Disposable for ScopedDisposable<D> {
    #[inline]
    fn is_disposed(&self) -> bool {
        self.inner.as_ref().is_none_or(D::is_disposed)
    }

    #[inline]
    fn dispose(&self) {
        if let Some(inner) = &self.inner {
            inner.dispose();
        }
    }
}

impl<D: Disposable> Drop for ScopedDisposable<D> {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.take() {
            inner.dispose();
        }
    }
}
