//! Unit tests for the event queue.

#[cfg(test)]
mod ordering {
    use re_core::{AgentId, PropertyId, SimTime};

    use crate::{EventKind, EventQueue, QueueError};

    fn visit(p: u64) -> EventKind {
        EventKind::VisitDone { property: PropertyId(p), agent: AgentId(0) }
    }

    #[test]
    fn pops_in_time_order() {
        let mut q = EventQueue::new();
        q.schedule(SimTime(30.0), visit(3)).unwrap();
        q.schedule(SimTime(10.0), visit(1)).unwrap();
        q.schedule(SimTime(20.0), visit(2)).unwrap();

        let order: Vec<_> = std::iter::from_fn(|| q.pop_next().ok())
            .map(|e| e.at)
            .collect();
        assert_eq!(order, vec![SimTime(10.0), SimTime(20.0), SimTime(30.0)]);
    }

    #[test]
    fn equal_times_are_fifo() {
        let mut q = EventQueue::new();
        for p in 0..5 {
            q.schedule(SimTime(7.0), visit(p)).unwrap();
        }
        for p in 0..5 {
            assert_eq!(q.pop_next().unwrap().kind, visit(p));
        }
    }

    #[test]
    fn pop_advances_clock() {
        let mut q = EventQueue::new();
        q.schedule(SimTime(12.5), EventKind::Arrival).unwrap();
        assert_eq!(q.now(), SimTime::ZERO);
        q.pop_next().unwrap();
        assert_eq!(q.now(), SimTime(12.5));
    }

    #[test]
    fn empty_queue_errors() {
        let mut q = EventQueue::new();
        assert_eq!(q.pop_next().unwrap_err(), QueueError::QueueEmpty);
        assert!(q.is_empty());
        assert_eq!(q.peek_time(), None);
    }

    #[test]
    fn rejects_past_and_invalid_times() {
        let mut q = EventQueue::new();
        q.schedule(SimTime(10.0), EventKind::Arrival).unwrap();
        q.pop_next().unwrap();

        assert_eq!(
            q.schedule(SimTime(5.0), EventKind::Arrival),
            Err(QueueError::InvalidSchedule { at: SimTime(5.0), now: SimTime(10.0) })
        );
        assert!(q.schedule(SimTime(f64::NAN), EventKind::Arrival).is_err());
        assert!(q.schedule(SimTime(f64::INFINITY), EventKind::Arrival).is_err());
        assert!(q.is_empty(), "rejected events must not be queued");
    }

    #[test]
    fn now_is_a_valid_schedule_time() {
        let mut q = EventQueue::new();
        q.schedule(SimTime(4.0), EventKind::Arrival).unwrap();
        q.pop_next().unwrap();
        q.schedule(SimTime(4.0), visit(1)).unwrap();
        assert_eq!(q.pop_next().unwrap().at, SimTime(4.0));
    }

    #[test]
    fn schedule_after_is_relative() {
        let mut q = EventQueue::new();
        q.schedule(SimTime(100.0), EventKind::Arrival).unwrap();
        q.pop_next().unwrap();
        q.schedule_after(15.0, visit(9)).unwrap();
        assert_eq!(q.peek_time(), Some(SimTime(115.0)));
    }

    #[test]
    fn close_at_never_rewinds() {
        let mut q = EventQueue::new();
        q.schedule(SimTime(50.0), EventKind::Arrival).unwrap();
        q.pop_next().unwrap();
        q.close_at(SimTime(40.0));
        assert_eq!(q.now(), SimTime(50.0));
        q.close_at(SimTime(60.0));
        assert_eq!(q.now(), SimTime(60.0));
    }

    #[test]
    fn subjects_and_names() {
        assert_eq!(EventKind::Arrival.subjects(), None);
        assert_eq!(visit(4).subjects(), Some((PropertyId(4), AgentId(0))));
        assert_eq!(visit(4).name(), "visit_done");
    }

    #[test]
    fn sequence_numbers_count_schedules() {
        let mut q = EventQueue::new();
        assert_eq!(q.schedule(SimTime(1.0), EventKind::Arrival).unwrap(), 0);
        assert_eq!(q.schedule(SimTime(1.0), EventKind::Arrival).unwrap(), 1);
        assert_eq!(q.scheduled_total(), 2);
        assert_eq!(q.len(), 2);
    }
}

#[cfg(test)]
mod properties {
    use proptest::prelude::*;
    use re_core::{AgentId, PropertyId, SimTime};

    use crate::{EventKind, EventQueue};

    proptest! {
        /// Popped events are non-decreasing in time, and within one timestamp
        /// come out in insertion order.
        #[test]
        fn pop_order_is_stable(times in prop::collection::vec(0u32..50, 1..200)) {
            let mut q = EventQueue::new();
            for (i, t) in times.iter().enumerate() {
                let kind = EventKind::VisitDone {
                    property: PropertyId(i as u64),
                    agent:    AgentId(0),
                };
                q.schedule(SimTime(f64::from(*t)), kind).unwrap();
            }

            let mut last: Option<(SimTime, u64)> = None;
            let mut popped = 0usize;
            while let Ok(ev) = q.pop_next() {
                if let Some((t, seq)) = last {
                    prop_assert!(ev.at >= t);
                    if ev.at == t {
                        prop_assert!(ev.seq > seq);
                    }
                }
                prop_assert_eq!(q.now(), ev.at);
                last = Some((ev.at, ev.seq));
                popped += 1;
            }
            prop_assert_eq!(popped, times.len());
        }
    }
}
