//! Reflux: the concurrency core of a push-based reactive stream library.
//!
//! This crate re-exports the reflux workspace:
//!
//! - [`sync`]: [`AtomicCell`] and [`TokenBag`], the only shared mutable
//!   state the other crates build on.
//! - [`disposables`]: exactly-once cancellation and resource release,
//!   including composite and serial disposables.
//! - [`schedulers`]: the [`Scheduler`] and [`DateScheduler`] traits, an
//!   immediate scheduler, and [`TestScheduler`] with a virtual clock.
//! - [`events`]: the [`Event`] and [`Observer`] types streams deliver through.
//!
//! # Example
//!
//! ```rust
//! use reflux::{CompositeDisposable, DateScheduler, Disposable, TestScheduler};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let scheduler = TestScheduler::new(0);
//! let ticks = Arc::new(AtomicUsize::new(0));
//! let subscriptions = CompositeDisposable::new();
//!
//! let counter = ticks.clone();
//! let series = scheduler
//!     .schedule_recurring(0, 10, Box::new(move || {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!     }))
//!     .unwrap();
//! subscriptions.add(series);
//!
//! scheduler.advance_to_date(25).unwrap();
//! subscriptions.dispose();
//! scheduler.run().unwrap();
//!
//! assert_eq!(ticks.load(Ordering::SeqCst), 3);
//! ```

#![warn(missing_docs)]

pub use reflux_disposables as disposables;
pub use reflux_events as events;
pub use reflux_schedulers as schedulers;
pub use reflux_sync as sync;

pub use reflux_disposables::{
    ActionDisposable, CompositeDisposable, Disposable, DisposableHandle, DisposableRef,
    ScopedDisposable, SerialDisposable, SimpleDisposable,
};
pub use reflux_events::{Event, EventKind, Observer, ObserverBuilder};
pub use reflux_schedulers::{
    Action, Date, DateScheduler, ImmediateScheduler, RecurringAction, Scheduler, SchedulerError,
    TestScheduler,
};
pub use reflux_sync::{AtomicCell, RemovalToken, TokenBag};
