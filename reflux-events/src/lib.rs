//! Event and observer types at the edge of the reflux core.
//!
//! A stream delivers zero or more [`Event::Next`] values followed by at most
//! one terminating event: [`Event::Failed`], [`Event::Completed`] or
//! [`Event::Interrupted`]. The types here only carry events. Keeping to that
//! grammar, and disposing the stream's resources once a terminating event has
//! been delivered, is left to whoever sends them.
//!
//! ```rust
//! use reflux_events::{Event, Observer};
//! use std::sync::{Arc, Mutex};
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = seen.clone();
//! let observer: Observer<u32, String> = Observer::builder()
//!     .on_next(move |value| sink.lock().unwrap().push(value))
//!     .build();
//!
//! observer.send_next(1);
//! observer.send_next(2);
//! observer.send_completed();
//! assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
//! assert!(Event::<u32, String>::Completed.is_terminating());
//! ```

#![warn(missing_docs)]

mod event;
mod observer;

pub use event::{Event, EventKind};
pub use observer::{Observer, ObserverBuilder};
