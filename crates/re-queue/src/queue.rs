//! `EventQueue` — the pending-event set and the clock it drives.
//!
//! # Ordering
//!
//! Stage completions land at arbitrary fractional minutes, so there is no
//! fixed set of "ticks" to bucket by.  A `BinaryHeap` keyed on `(at, seq)`
//! gives O(log E) insert and pop where E is the number of pending events.
//! With the default 80 agents the queue rarely holds more than a few
//! hundred entries.
//!
//! `seq` is a per-queue counter stamped on every `schedule` call.  It is the
//! sole tie-breaker for events sharing a timestamp, which makes equal-time
//! ordering FIFO and independent of heap internals.
//!
//! The queue owns the [`SimClock`].  `pop_next` is the only operation that
//! moves it during a run; [`EventQueue::close_at`] moves it once more when
//! the run stops at its horizon.

use std::collections::BinaryHeap;

use log::trace;
use re_core::{SimClock, SimTime};

use crate::{EventKind, QueueError, QueueResult, ScheduledEvent};

#[derive(Default)]
pub struct EventQueue {
    heap:     BinaryHeap<ScheduledEvent>,
    clock:    SimClock,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `kind` to fire at `at`.  Returns the sequence number assigned.
    ///
    /// `at` equal to the current time is allowed; the event fires after every
    /// already-queued event with the same timestamp.
    pub fn schedule(&mut self, at: SimTime, kind: EventKind) -> QueueResult<u64> {
        let now = self.clock.now();
        if !at.is_valid() || at < now {
            return Err(QueueError::InvalidSchedule { at, now });
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        trace!("{now}: schedule {} for {at} (seq {seq})", kind.name());
        self.heap.push(ScheduledEvent { at, seq, kind });
        Ok(seq)
    }

    /// Schedule `kind` to fire `delay` minutes from now.
    pub fn schedule_after(&mut self, delay: f64, kind: EventKind) -> QueueResult<u64> {
        let at = self.clock.now().offset(delay);
        self.schedule(at, kind)
    }

    /// Remove the earliest event and advance the clock to its time.
    pub fn pop_next(&mut self) -> QueueResult<ScheduledEvent> {
        let event = self.heap.pop().ok_or(QueueError::QueueEmpty)?;
        self.clock.advance_to(event.at);
        Ok(event)
    }

    /// Timestamp of the next event without removing it.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.heap.peek().map(|e| e.at)
    }

    /// Move the clock to `t` without firing anything.  Used when the run
    /// stops at its horizon with events still pending.  A `t` in the past
    /// leaves the clock where it is.
    pub fn close_at(&mut self, t: SimTime) {
        if t > self.clock.now() {
            self.clock.advance_to(t);
        }
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Total number of events ever scheduled on this queue.
    pub fn scheduled_total(&self) -> u64 {
        self.next_seq
    }

    /// Pending events in arbitrary order.
    pub fn pending(&self) -> impl Iterator<Item = &ScheduledEvent> {
        self.heap.iter()
    }
}
