//! Schedulers for reflux.
//!
//! A [`Scheduler`] decides when and where a unit of work runs. A
//! [`DateScheduler`] also has a notion of "now" and can run work at, or after,
//! a given date, once or repeatedly.
//!
//! Two implementations ship with this crate:
//!
//! - [`ImmediateScheduler`] runs work synchronously on the calling thread.
//! - [`TestScheduler`] keeps a virtual clock that only moves when told to.
//!   Time-dependent logic becomes deterministic under test.
//!
//! # Example
//!
//! ```rust
//! use reflux_schedulers::{DateScheduler, TestScheduler};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let scheduler = TestScheduler::new(0);
//! let fired = Arc::new(AtomicUsize::new(0));
//!
//! let counter = fired.clone();
//! scheduler.schedule_after_date(10, Box::new(move || {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! }));
//!
//! scheduler.advance_to_date(9).unwrap();
//! assert_eq!(fired.load(Ordering::SeqCst), 0);
//!
//! scheduler.advance().unwrap();
//! assert_eq!(fired.load(Ordering::SeqCst), 1);
//! assert_eq!(scheduler.current_date(), 10);
//! ```

#![warn(missing_docs)]

mod error;
mod immediate;
mod scheduler;
mod test_scheduler;

pub use error::SchedulerError;
pub use immediate::ImmediateScheduler;
pub use scheduler::{Action, Date, DateScheduler, RecurringAction, Scheduler};
pub use test_scheduler::TestScheduler;
