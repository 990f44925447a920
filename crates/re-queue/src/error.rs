use re_core::SimTime;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum QueueError {
    /// Scheduling into the past (or at a non-finite time).  Always a driver
    /// bug; the run must stop.
    #[error("cannot schedule an event at {at:?} when the clock reads {now:?}")]
    InvalidSchedule { at: SimTime, now: SimTime },

    #[error("event queue is empty")]
    QueueEmpty,
}

pub type QueueResult<T> = Result<T, QueueError>;
