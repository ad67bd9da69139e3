use crate::Date;
use thiserror::Error;

/// Misuse of a scheduler API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// A recurring action was given a negative repeat interval.
    #[error("repeat interval must not be negative, got {repeat_interval}")]
    NegativeRepeatInterval {
        /// The rejected interval.
        repeat_interval: i64,
    },

    /// The virtual clock was asked to move to a date that is not strictly
    /// later than the current one.
    #[error("cannot advance to date {requested}: current date is {current}")]
    NonIncreasingDate {
        /// The requested target date.
        requested: Date,
        /// The clock's date at the time of the request.
        current: Date,
    },
}
