//! Unit tests for re-entity.

#[cfg(test)]
mod stage {
    use crate::PropertyStage::{self, *};

    const ALL: [PropertyStage; 8] =
        [Idle, Visiting, Paperwork, Renegotiation, Verification, Notarization, Sold, Lost];

    #[test]
    fn funnel_path_is_legal() {
        let path = [Idle, Visiting, Paperwork, Renegotiation, Verification, Notarization, Sold];
        for w in path.windows(2) {
            assert!(w[0].can_transition_to(w[1]), "{:?} -> {:?}", w[0], w[1]);
        }
    }

    #[test]
    fn terminal_stages_have_no_exits() {
        for to in ALL {
            assert!(!Sold.can_transition_to(to));
            assert!(!Lost.can_transition_to(to));
        }
    }

    #[test]
    fn no_shortcuts() {
        assert!(!Idle.can_transition_to(Paperwork));
        assert!(!Visiting.can_transition_to(Verification));
        assert!(!Verification.can_transition_to(Sold));
        assert!(!Verification.can_transition_to(Idle));
        assert!(!Paperwork.can_transition_to(Idle));
        for s in ALL {
            assert!(!s.can_transition_to(s), "self transition on {s:?}");
        }
    }

    #[test]
    fn ownership() {
        assert!(Visiting.is_agent_owned());
        assert!(Notarization.is_agent_owned());
        assert!(!Verification.is_agent_owned());
        assert!(!Idle.is_agent_owned());
    }
}

#[cfg(test)]
mod agents {
    use re_core::{AgentId, PropertyId, SimTime};

    use crate::{AgentPool, EntityError};

    #[test]
    fn finds_lowest_id_first() {
        let pool = AgentPool::new(3, 3);
        assert_eq!(pool.find_available(), Some(AgentId(0)));
        assert_eq!(pool.available_count(), 3);
    }

    #[test]
    fn prefers_fewest_completed_tasks() {
        let mut pool = AgentPool::new(3, 3);
        pool.block(AgentId(0), PropertyId(0), SimTime(0.0));
        pool.unblock(AgentId(0), SimTime(10.0));
        // Agent 0 has one completed task, agents 1 and 2 have none.
        assert_eq!(pool.find_available(), Some(AgentId(1)));

        pool.block(AgentId(1), PropertyId(1), SimTime(10.0));
        pool.unblock(AgentId(1), SimTime(20.0));
        pool.block(AgentId(2), PropertyId(2), SimTime(20.0));
        pool.unblock(AgentId(2), SimTime(30.0));
        // Everyone at one task: lowest id wins.
        assert_eq!(pool.find_available(), Some(AgentId(0)));
    }

    #[test]
    fn none_when_all_blocked() {
        let mut pool = AgentPool::new(2, 3);
        assert!(pool.block(AgentId(0), PropertyId(0), SimTime(0.0)));
        assert!(pool.block(AgentId(1), PropertyId(1), SimTime(0.0)));
        assert_eq!(pool.find_available(), None);
    }

    #[test]
    fn double_block_is_a_noop() {
        let mut pool = AgentPool::new(1, 3);
        assert!(pool.block(AgentId(0), PropertyId(5), SimTime(1.0)));
        assert!(!pool.block(AgentId(0), PropertyId(6), SimTime(2.0)));
        assert_eq!(pool.state(AgentId(0)).property(), Some(PropertyId(5)));
    }

    #[test]
    fn unblock_accumulates_time_and_tasks() {
        let mut pool = AgentPool::new(1, 3);
        pool.block(AgentId(0), PropertyId(0), SimTime(5.0));
        assert_eq!(pool.unblock(AgentId(0), SimTime(15.0)), Some(10.0));
        pool.block(AgentId(0), PropertyId(0), SimTime(20.0));
        pool.unblock(AgentId(0), SimTime(50.0));

        assert_eq!(pool.blocked_minutes(AgentId(0)), 40.0);
        assert_eq!(pool.completed_tasks(AgentId(0)), 2);
        assert_eq!(pool.unblock(AgentId(0), SimTime(60.0)), None);
        assert_eq!(pool.utilization(AgentId(0), 80.0), 0.5);
        assert_eq!(pool.utilization(AgentId(0), 0.0), 0.0);
    }

    #[test]
    fn force_release_finalizes_blocked_time() {
        let mut pool = AgentPool::new(3, 3);
        pool.block(AgentId(0), PropertyId(0), SimTime(10.0));
        pool.block(AgentId(2), PropertyId(1), SimTime(40.0));
        assert_eq!(pool.force_release_all(SimTime(100.0)), 2);
        assert_eq!(pool.blocked_minutes(AgentId(0)), 90.0);
        assert_eq!(pool.blocked_minutes(AgentId(2)), 60.0);
        assert_eq!(pool.available_count(), 3);
    }

    #[test]
    fn verification_cap_is_enforced() {
        let mut pool = AgentPool::new(1, 2);
        let a = AgentId(0);
        pool.add_pending(a, PropertyId(1)).unwrap();
        pool.add_pending(a, PropertyId(2)).unwrap();
        assert!(!pool.has_verification_capacity(a));
        assert_eq!(
            pool.add_pending(a, PropertyId(3)),
            Err(EntityError::VerificationFull { agent: a, cap: 2 })
        );
        assert!(pool.remove_pending(a, PropertyId(1)));
        assert!(!pool.remove_pending(a, PropertyId(1)));
        assert!(pool.has_verification_capacity(a));
    }

    #[test]
    fn pending_verification_does_not_block() {
        let mut pool = AgentPool::new(1, 3);
        pool.add_pending(AgentId(0), PropertyId(9)).unwrap();
        assert!(pool.is_available(AgentId(0)));
        assert_eq!(pool.find_available(), Some(AgentId(0)));
    }
}

#[cfg(test)]
mod store {
    use re_core::{AgentId, PropertyId, SimRng, SimTime};

    use crate::{EntityError, EntityStoreBuilder, PropertyStage};

    #[test]
    fn builder_seeds_idle_properties() {
        let store = EntityStoreBuilder::new(2).initial_properties(5).build();
        assert_eq!(store.active_count(), 5);
        assert_eq!(store.idle_count(), 5);
        assert_eq!(store.next_id(), PropertyId(5));
        assert_eq!(store.initial_active(), 5);
        assert_eq!(store.agents.verification_cap(), 3);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut store = EntityStoreBuilder::new(1).initial_properties(1).build();
        let p = PropertyId(0);
        for stage in [
            PropertyStage::Visiting,
            PropertyStage::Paperwork,
            PropertyStage::Verification,
            PropertyStage::Notarization,
        ] {
            store.transition(p, stage).unwrap();
        }
        store.mark_sold(p, SimTime(100.0)).unwrap();
        let fresh = store.create_replacement(SimTime(100.0));
        assert_eq!(fresh, PropertyId(1));
        assert_eq!(store.replacements_made(), 1);
        assert!(store.property(p).is_none());
        assert!(store.sold_property(p).is_some());
    }

    #[test]
    fn idle_index_tracks_transitions() {
        let mut store = EntityStoreBuilder::new(1).initial_properties(3).build();
        store.transition(PropertyId(0), PropertyStage::Visiting).unwrap();
        assert_eq!(store.idle_count(), 2);

        let mut rng = SimRng::new(1);
        for _ in 0..50 {
            let picked = store.pick_idle(&mut rng).unwrap();
            assert_ne!(picked, PropertyId(0));
        }

        store.return_to_idle(PropertyId(0)).unwrap();
        assert_eq!(store.idle_count(), 3);
    }

    #[test]
    fn pick_idle_none_when_all_busy() {
        let mut store = EntityStoreBuilder::new(1).initial_properties(1).build();
        store.transition(PropertyId(0), PropertyStage::Visiting).unwrap();
        assert_eq!(store.pick_idle(&mut SimRng::new(0)), None);
    }

    #[test]
    fn return_to_idle_resets_sale_state_but_keeps_visits() {
        let mut store = EntityStoreBuilder::new(1).initial_properties(1).build();
        let p = PropertyId(0);
        store.transition(p, PropertyStage::Visiting).unwrap();
        {
            let prop = store.property_mut(p).unwrap();
            prop.visits = 4;
            prop.renegotiations = 2;
            prop.in_sale = true;
            prop.agent = Some(AgentId(0));
        }
        store.transition(p, PropertyStage::Paperwork).unwrap();
        store.transition(p, PropertyStage::Renegotiation).unwrap();
        store.return_to_idle(p).unwrap();

        let prop = store.property(p).unwrap();
        assert_eq!(prop.stage, PropertyStage::Idle);
        assert_eq!(prop.visits, 4);
        assert_eq!(prop.renegotiations, 0);
        assert!(!prop.in_sale);
        assert_eq!(prop.agent, None);
    }

    #[test]
    fn illegal_transitions_are_rejected() {
        let mut store = EntityStoreBuilder::new(1).initial_properties(1).build();
        let p = PropertyId(0);
        assert_eq!(
            store.transition(p, PropertyStage::Notarization),
            Err(EntityError::IllegalTransition {
                property: p,
                from:     PropertyStage::Idle,
                to:       PropertyStage::Notarization,
            })
        );
        assert!(store.transition(p, PropertyStage::Sold).is_err());
        assert!(store.mark_sold(p, SimTime(1.0)).is_err());
        assert_eq!(store.property(p).unwrap().stage, PropertyStage::Idle);
    }

    #[test]
    fn unknown_property() {
        let mut store = EntityStoreBuilder::new(1).build();
        assert_eq!(
            store.transition(PropertyId(7), PropertyStage::Visiting),
            Err(EntityError::UnknownProperty(PropertyId(7)))
        );
    }

    #[test]
    fn mark_lost_moves_pools() {
        let mut store = EntityStoreBuilder::new(1).initial_properties(2).build();
        let p = PropertyId(1);
        store.transition(p, PropertyStage::Visiting).unwrap();
        store.transition(p, PropertyStage::Paperwork).unwrap();
        store.transition(p, PropertyStage::Renegotiation).unwrap();
        let lost = store.mark_lost(p, SimTime(50.0)).unwrap();
        assert_eq!(lost.closed_at, Some(SimTime(50.0)));
        assert_eq!(store.lost_count(), 1);
        assert_eq!(store.active_count(), 1);
        assert!(store.lost_property(p).is_some());
    }

    #[test]
    fn time_to_sale() {
        let mut store = EntityStoreBuilder::new(1).initial_properties(1).build();
        let p = PropertyId(0);
        store.transition(p, PropertyStage::Visiting).unwrap();
        store.property_mut(p).unwrap().last_visit_at = Some(SimTime(5.0));
        store.transition(p, PropertyStage::Paperwork).unwrap();
        store.transition(p, PropertyStage::Verification).unwrap();
        store.transition(p, PropertyStage::Notarization).unwrap();
        let sold = store.mark_sold(p, SimTime(165.0)).unwrap();
        assert_eq!(sold.time_to_sale(), Some(160.0));
    }

    #[test]
    fn release_if_owner_checks_property() {
        let mut store = EntityStoreBuilder::new(1).initial_properties(2).build();
        let a = AgentId(0);
        store.agents.block(a, PropertyId(0), SimTime(0.0));
        assert_eq!(store.release_if_owner(a, PropertyId(1), SimTime(5.0)), None);
        assert!(!store.agents.is_available(a));
        assert_eq!(store.release_if_owner(a, PropertyId(0), SimTime(5.0)), Some(5.0));
        assert!(store.agents.is_available(a));
    }
}
