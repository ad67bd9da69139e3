use crate::SchedulerError;
use reflux_disposables::DisposableRef;

/// A point on a scheduler's time line, in abstract ticks.
pub type Date = i64;

/// A unit of work run once.
pub type Action = Box<dyn FnOnce() + Send + 'static>;

/// A unit of work run on every occurrence of a recurring schedule.
pub type RecurringAction = Box<dyn FnMut() + Send + 'static>;

/// A serial queue of work items.
pub trait Scheduler: Send + Sync {
    /// Enqueues `action`.
    ///
    /// When it runs depends on the scheduler. The returned disposable, if
    /// any, cancels the action as long as it has not started yet.
    fn schedule(&self, action: Action) -> Option<DisposableRef>;
}

/// A [`Scheduler`] that can run work at or after given dates.
pub trait DateScheduler: Scheduler {
    /// The current date, as seen by this scheduler.
    fn current_date(&self) -> Date;

    /// Schedules `action` to run at or after `date`.
    ///
    /// Disposing the returned disposable cancels the action if it has not
    /// run yet.
    fn schedule_after_date(&self, date: Date, action: Action) -> DisposableRef;

    /// Schedules `action` to run at `date` and then every `repeat_interval`
    /// ticks after that.
    ///
    /// Disposing the returned disposable cancels whichever occurrence is
    /// pending. Fails if `repeat_interval` is negative.
    ///
    /// A `repeat_interval` of `0` is accepted. Such a schedule keeps firing
    /// at the same date until it is disposed, so on a virtual clock the
    /// action itself must dispose it for the drain to finish.
    fn schedule_recurring(
        &self,
        date: Date,
        repeat_interval: i64,
        action: RecurringAction,
    ) -> Result<DisposableRef, SchedulerError>;
}
