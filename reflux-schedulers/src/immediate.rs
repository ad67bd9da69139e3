use crate::{Action, Scheduler};
use reflux_disposables::DisposableRef;

/// A scheduler that runs every action synchronously, before `schedule`
/// returns.
///
/// Use it where an API requires a scheduler but no concurrency is wanted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImmediateScheduler;

impl ImmediateScheduler {
    /// Creates an immediate scheduler.
    pub const fn new() -> Self {
        Self
    }
}

impl Scheduler for ImmediateScheduler {
    /// Runs `action` on the calling thread. Nothing is left to cancel, so no
    /// disposable is returned.
    fn schedule(&self, action: Action) -> Option<DisposableRef> {
        action();
        None
    }
}
