//! Exactly-once disposal primitives for reflux.
//!
//! A [`Disposable`] represents cancelable work or a releasable resource. It
//! starts active and moves to disposed exactly once; calling
//! [`dispose`](Disposable::dispose) again, or from several threads at the same
//! time, has no further effect.
//!
//! # Variants
//!
//! - [`ActionDisposable`]: runs a closure on first disposal.
//! - [`SimpleDisposable`]: only flips a flag.
//! - [`SerialDisposable`]: owns at most one inner disposable at a time and
//!   disposes the outgoing one whenever it is replaced.
//! - [`CompositeDisposable`]: owns any number of disposables and disposes them
//!   newest-first. [`DisposableHandle`]s let callers detach entries without
//!   disposing them.
//! - [`ScopedDisposable`]: disposes its inner disposable when dropped.
//!
//! All shared state lives in [`reflux_sync::AtomicCell`]s, so every variant is
//! `Send + Sync`.
//!
//! # Example
//!
//! ```rust
//! use reflux_disposables::{ActionDisposable, CompositeDisposable, Disposable};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let released = Arc::new(AtomicUsize::new(0));
//! let composite = CompositeDisposable::new();
//!
//! for _ in 0..3 {
//!     let released = released.clone();
//!     composite.add_action(move || {
//!         released.fetch_add(1, Ordering::SeqCst);
//!     });
//! }
//!
//! composite.dispose();
//! composite.dispose();
//! assert_eq!(released.load(Ordering::SeqCst), 3);
//! ```

#![warn(missing_docs)]

mod action;
mod composite;
mod disposable;
mod scoped;
mod serial;
mod simple;

pub use action::ActionDisposable;
pub use composite::{CompositeDisposable, DisposableHandle};
pub use disposable::{Disposable, DisposableRef};
pub use scoped::ScopedDisposable;
pub use serial::SerialDisposable;
pub use simple::SimpleDisposable;
