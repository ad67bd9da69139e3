//! A [`DateScheduler`] driven by a virtual clock.
//!
//! Nothing runs on its own: work is queued with a date, and runs only when
//! the owner advances the clock to or past that date with one of the
//! `advance*` methods or [`run`](TestScheduler::run). Draining happens
//! synchronously on the thread that advances the clock.
//!
//! # Ordering
//!
//! Pending work is kept in a `BTreeMap` keyed by `(date, sequence)`. Actions
//! run in date order, and actions sharing a date run in the order they were
//! scheduled. Work scheduled while a drain is in progress takes part in the
//! same drain if its date is not past the drain's target date.
//!
//! # Recurring work
//!
//! A recurring schedule is a single queue entry carrying its action, its
//! repeat interval and a shared [`SerialDisposable`]. When the entry fires it
//! is re-inserted at `date + repeat_interval`, and the cancel handle of the
//! new occurrence replaces the previous one inside the serial disposable.
//! Disposing the serial disposable therefore cancels whichever occurrence is
//! pending.
//!
//! The clock lock is never held while user code runs, so actions are free to
//! schedule more work, cancel work, or read the clock.

use crate::{Action, Date, DateScheduler, RecurringAction, Scheduler, SchedulerError};
use core::fmt;
use parking_lot::Mutex;
use reflux_disposables::{ActionDisposable, Disposable, DisposableRef, SerialDisposable};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Date first, then insertion sequence so equal dates run FIFO.
type EntryKey = (Date, u64);

enum ScheduledWork {
    Once(Action),
    Recurring {
        action: RecurringAction,
        repeat_interval: i64,
        slot: Arc<SerialDisposable>,
    },
}

struct VirtualClock {
    current_date: Date,
    next_sequence: u64,
    queue: BTreeMap<EntryKey, ScheduledWork>,
}

impl VirtualClock {
    fn reserve(&mut self, date: Date) -> EntryKey {
        let key = (date, self.next_sequence);
        self.next_sequence += 1;
        key
    }

    fn enqueue(&mut self, date: Date, work: ScheduledWork) -> EntryKey {
        let key = self.reserve(date);
        self.queue.insert(key, work);
        key
    }

    /// Removes the earliest entry if it is due at or before `until`.
    fn pop_due(&mut self, until: Date) -> Option<(EntryKey, ScheduledWork)> {
        let entry = self.queue.first_entry()?;
        if entry.key().0 > until {
            return None;
        }
        Some(entry.remove_entry())
    }
}

/// A scheduler with a virtualized clock, for deterministic tests of
/// time-dependent code.
pub struct TestScheduler {
    clock: Arc<Mutex<VirtualClock>>,
}

impl TestScheduler {
    /// Creates a scheduler whose clock starts at `start_date`.
    pub fn new(start_date: Date) -> Self {
        Self {
            clock: Arc::new(Mutex::new(VirtualClock {
                current_date: start_date,
                next_sequence: 0,
                queue: BTreeMap::new(),
            })),
        }
    }

    /// Returns the number of actions waiting to run.
    pub fn pending_count(&self) -> usize {
        self.clock.lock().queue.len()
    }

    /// Schedules `action` to run `interval` ticks after the current date.
    pub fn schedule_after_interval(&self, interval: i64, action: Action) -> DisposableRef {
        let date = self.current_date().saturating_add(interval);
        self.schedule_after_date(date, action)
    }

    /// Schedules a recurring action whose first occurrence is `interval`
    /// ticks after the current date.
    pub fn schedule_recurring_after_interval(
        &self,
        interval: i64,
        repeat_interval: i64,
        action: RecurringAction,
    ) -> Result<DisposableRef, SchedulerError> {
        let date = self.current_date().saturating_add(interval);
        self.schedule_recurring(date, repeat_interval, action)
    }

    /// Advances the clock by a single tick, running everything that becomes
    /// due. This flushes work scheduled "as soon as possible".
    pub fn advance(&self) -> Result<(), SchedulerError> {
        self.advance_by_interval(1)
    }

    /// Advances the clock by `interval` ticks, running everything that
    /// becomes due.
    pub fn advance_by_interval(&self, interval: i64) -> Result<(), SchedulerError> {
        let target = self.current_date().saturating_add(interval);
        self.advance_to_date(target)
    }

    /// Moves the clock to `new_date` and runs, in order, every action dated
    /// at or before it.
    ///
    /// Fails without running anything if `new_date` is not strictly later
    /// than the current date.
    pub fn advance_to_date(&self, new_date: Date) -> Result<(), SchedulerError> {
        {
            let mut clock = self.clock.lock();
            if new_date <= clock.current_date {
                return Err(SchedulerError::NonIncreasingDate {
                    requested: new_date,
                    current: clock.current_date,
                });
            }
            clock.current_date = new_date;
        }

        let mut executed = 0usize;
        loop {
            let due = self.clock.lock().pop_due(new_date);
            let Some((key, work)) = due else {
                break;
            };
            self.execute(key, work);
            executed += 1;
        }

        tracing::debug!(date = new_date, executed, "advanced virtual clock");
        Ok(())
    }

    /// Runs every pending action, leaving the clock at `Date::MAX`.
    pub fn run(&self) -> Result<(), SchedulerError> {
        self.advance_to_date(Date::MAX)
    }

    fn execute(&self, key: EntryKey, work: ScheduledWork) {
        tracing::trace!(date = key.0, sequence = key.1, "running scheduled action");
        match work {
            ScheduledWork::Once(action) => action(),
            ScheduledWork::Recurring {
                mut action,
                repeat_interval,
                slot,
            } => {
                action();
                match key.0.checked_add(repeat_interval) {
                    Some(next) => self.enqueue_recurring(next, action, repeat_interval, slot),
                    None => tracing::trace!(
                        date = key.0,
                        "recurring action has no representable next date"
                    ),
                }
            }
        }
    }

    fn enqueue_once(&self, date: Date, action: Action) -> DisposableRef {
        let key = self.clock.lock().enqueue(date, ScheduledWork::Once(action));
        self.cancel_handle(key)
    }

    /// Publishes the occurrence's cancel handle before the entry becomes
    /// visible to a drain, so a newer handle is never overwritten by an
    /// older one.
    fn enqueue_recurring(
        &self,
        date: Date,
        action: RecurringAction,
        repeat_interval: i64,
        slot: Arc<SerialDisposable>,
    ) {
        let key = self.clock.lock().reserve(date);
        slot.set_inner(Some(self.cancel_handle(key)));

        let rejected = {
            let mut clock = self.clock.lock();
            let work = ScheduledWork::Recurring {
                action,
                repeat_interval,
                slot: Arc::clone(&slot),
            };
            if slot.is_disposed() {
                Some(work)
            } else {
                clock.queue.insert(key, work);
                None
            }
        };

        if rejected.is_some() {
            tracing::trace!(date, "recurring action cancelled before rescheduling");
        }
    }

    /// A disposable that removes the entry at `key` if it is still queued.
    fn cancel_handle(&self, key: EntryKey) -> DisposableRef {
        let clock = Arc::downgrade(&self.clock);
        Arc::new(ActionDisposable::new(move || {
            let Some(clock) = clock.upgrade() else {
                return;
            };
            let removed = clock.lock().queue.remove(&key);
            if removed.is_some() {
                tracing::trace!(date = key.0, sequence = key.1, "cancelled scheduled action");
            }
        }))
    }
}

impl Default for TestScheduler {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Scheduler for TestScheduler {
    /// Queues `action` at the current date. It runs on the next advance.
    fn schedule(&self, action: Action) -> Option<DisposableRef> {
        let key = {
            let mut clock = self.clock.lock();
            let date = clock.current_date;
            clock.enqueue(date, ScheduledWork::Once(action))
        };
        Some(self.cancel_handle(key))
    }
}

impl DateScheduler for TestScheduler {
    fn current_date(&self) -> Date {
        self.clock.lock().current_date
    }

    fn schedule_after_date(&self, date: Date, action: Action) -> DisposableRef {
        self.enqueue_once(date, action)
    }

    fn schedule_recurring(
        &self,
        date: Date,
        repeat_interval: i64,
        action: RecurringAction,
    ) -> Result<DisposableRef, SchedulerError> {
        if repeat_interval < 0 {
            return Err(SchedulerError::NegativeRepeatInterval { repeat_interval });
        }

        let slot = Arc::new(SerialDisposable::new());
        self.enqueue_recurring(date, action, repeat_interval, Arc::clone(&slot));
        Ok(slot)
    }
}

impl fmt::Debug for TestScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (current_date, pending) = {
            let clock = self.clock.lock();
            let pending: Vec<Date> = clock.queue.keys().map(|(date, _)| *date).collect();
            (clock.current_date, pending)
        };
        f.debug_struct("TestScheduler")
            .field("current_date", &current_date)
            .field("pending", &pending)
            .finish()
    }
}
