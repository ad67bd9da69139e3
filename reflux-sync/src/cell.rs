//! `AtomicCell<V>`: a single value slot guarded by a read/write lock.
//!
//! Readers never block each other. Writers are exclusive with every reader
//! and every other writer, so no observer can see a partially updated value.
//!
//! # Copy-on-write modification
//!
//! [`AtomicCell::modify_transform`] hands the current value to a closure and
//! installs whatever the closure returns, while returning a snapshot of the
//! value as it was just before the closure ran. Callers use the snapshot to
//! decide what to release after the lock has been dropped, for example the
//! inner disposable that was just replaced.
//!
//! The snapshot capability is `Clone`, so the requirement is checked at
//! compile time. For `AtomicCell<Option<T>>` the "absent" case needs no
//! special handling: the snapshot of `None` is `None`.
//!
//! # Example
//!
//! ```rust
//! use reflux_sync::AtomicCell;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Point { x: i32 }
//!
//! let cell = AtomicCell::new(Point { x: 1 });
//! let before = cell.modify_transform(|mut p| {
//!     p.x = 2;
//!     p
//! });
//!
//! assert_eq!(before, Point { x: 1 });
//! assert_eq!(cell.get(), Point { x: 2 });
//! ```

use core::fmt;
use core::mem;
use parking_lot::RwLock;

/// A thread-safe mutable cell with copy-on-write update.
pub struct AtomicCell<V> {
    value: RwLock<V>,
}

impl<V> AtomicCell<V> {
    /// Creates a cell holding `value`.
    pub fn new(value: V) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Returns a clone of the current value.
    ///
    /// Takes the read lock, so it waits for an in-flight write to finish but
    /// never for other readers.
    #[inline]
    pub fn get(&self) -> V
    where
        V: Clone,
    {
        self.value.read().clone()
    }

    /// Runs `f` against the current value under the read lock.
    ///
    /// Prefer this over [`get`](Self::get) when only a projection of the value
    /// is needed.
    #[inline]
    pub fn read<R>(&self, f: impl FnOnce(&V) -> R) -> R {
        f(&self.value.read())
    }

    /// Replaces the current value.
    pub fn set(&self, value: V) {
        *self.value.write() = value;
    }

    /// Replaces the current value and returns the previous one.
    pub fn swap(&self, value: V) -> V {
        mem::replace(&mut *self.value.write(), value)
    }

    /// Mutates the value in place while holding the write lock.
    ///
    /// Whatever `f` returns is handed back to the caller. This lets the
    /// caller observe the state inside the same critical section that
    /// changed it.
    pub fn modify<R>(&self, f: impl FnOnce(&mut V) -> R) -> R {
        f(&mut self.value.write())
    }

    /// Copy-on-write modification.
    ///
    /// Under the write lock: snapshots the current value, passes the current
    /// value to `f`, stores the value `f` returns, and returns the snapshot.
    ///
    /// While `f` runs the slot holds the snapshot. If `f` panics the cell
    /// therefore keeps its pre-call value.
    pub fn modify_transform(&self, f: impl FnOnce(V) -> V) -> V
    where
        V: Clone,
    {
        let mut value = self.value.write();
        let snapshot = value.clone();
        let current = mem::replace(&mut *value, snapshot);
        let next = f(current);
        mem::replace(&mut *value, next)
    }

    /// Consumes the cell and returns the value.
    pub fn into_inner(self) -> V {
        self.value.into_inner()
    }
}

impl<V: Default> Default for AtomicCell<V> {
    fn default() -> Self {
        Self::new(V::default())
    }
}

impl<V> From<V> for AtomicCell<V> {
    fn from(value: V) -> Self {
        Self::new(value)
    }
}

impl<V: fmt::Debug> fmt::Debug for AtomicCell<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.try_read() {
            Some(value) => f.debug_tuple("AtomicCell").field(&*value).finish(),
            None => f.write_str("AtomicCell(<locked>)"),
        }
    }
}
