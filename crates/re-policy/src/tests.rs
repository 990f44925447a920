//! Unit tests for re-policy.

#[cfg(test)]
mod outcome {
    use re_core::{OutcomeProbabilities, PropertyId, SimRng, SimTime};
    use re_entity::Property;

    use crate::{reengage_probability, BernoulliPolicy, OutcomePolicy, ScriptedPolicy};

    fn property(renegotiations: u32) -> Property {
        let mut p = Property::new(PropertyId(0), SimTime::ZERO);
        p.renegotiations = renegotiations;
        p
    }

    #[test]
    fn reengage_probability_decays_to_floor() {
        assert!((reengage_probability(0.3, 0, 0.1) - 0.3).abs() < 1e-12);
        assert!((reengage_probability(0.3, 1, 0.1) - 0.2).abs() < 1e-12);
        assert_eq!(reengage_probability(0.3, 2, 0.1), 0.1);
        assert_eq!(reengage_probability(0.3, 5, 0.1), 0.1);
    }

    #[test]
    fn certain_probabilities() {
        let always = BernoulliPolicy::new(OutcomeProbabilities {
            sale:             1.0,
            remorse:          1.0,
            reengage_base:    1.0,
            reengage_penalty: 0.0,
        });
        let never = BernoulliPolicy::new(OutcomeProbabilities {
            sale:             0.0,
            remorse:          0.0,
            reengage_base:    0.0,
            reengage_penalty: 0.0,
        });
        let mut rng = SimRng::new(11);
        let p = property(0);
        for _ in 0..200 {
            assert!(always.sale_closes(&p, &mut rng));
            assert!(always.client_regrets(&p, &mut rng));
            assert!(!never.sale_closes(&p, &mut rng));
            assert!(!never.client_regrets(&p, &mut rng));
        }
    }

    #[test]
    fn reengagement_respects_cap() {
        let policy = BernoulliPolicy::new(OutcomeProbabilities {
            reengage_base: 1.0,
            ..Default::default()
        });
        let mut rng = SimRng::new(5);
        assert!(policy.reengages(&property(2), 3, &mut rng));
        assert!(!policy.reengages(&property(3), 3, &mut rng));
        assert!(!policy.reengages(&property(0), 0, &mut rng));
    }

    #[test]
    fn reengagement_floor_still_fires() {
        // base 0 would never fire without the 0.1 floor.
        let policy = BernoulliPolicy::new(OutcomeProbabilities {
            reengage_base:    0.0,
            reengage_penalty: 0.5,
            ..Default::default()
        });
        let mut rng = SimRng::new(99);
        let wins = (0..10_000)
            .filter(|_| policy.reengages(&property(1), 10, &mut rng))
            .count();
        assert!((800..1_200).contains(&wins), "wins = {wins}");
    }

    #[test]
    fn scripted_replays_in_order() {
        let policy = ScriptedPolicy::new().with_sales(vec![true, false, false]);
        let mut rng = SimRng::new(0);
        let p = property(0);
        let seen: Vec<bool> = (0..6).map(|_| policy.sale_closes(&p, &mut rng)).collect();
        assert_eq!(seen, vec![true, false, false, true, false, false]);
        assert!(!policy.client_regrets(&p, &mut rng), "empty script answers false");
    }

    #[test]
    fn scripted_constant_respects_cap() {
        let policy = ScriptedPolicy::constant(true, true, true);
        let mut rng = SimRng::new(0);
        assert!(policy.reengages(&property(0), 1, &mut rng));
        assert!(!policy.reengages(&property(1), 1, &mut rng));
    }
}

#[cfg(test)]
mod arrival {
    use re_core::{ArrivalConfig, SimRng, TriangularParams};

    use crate::{ArrivalGenerator, Triangular};

    #[test]
    fn inverse_cdf_endpoints_and_mode() {
        let t = Triangular::new(TriangularParams::new(2.0, 4.0, 10.0));
        assert_eq!(t.inverse_cdf(0.0), 2.0);
        // c = 0.25 lands exactly on the mode.
        assert!((t.inverse_cdf(0.25) - 4.0).abs() < 1e-12);
        assert!((t.inverse_cdf(1.0) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn samples_stay_in_bounds() {
        let t = Triangular::new(TriangularParams::new(5.0, 6.0, 40.0));
        let mut rng = SimRng::new(17);
        for _ in 0..10_000 {
            let x = t.sample(&mut rng);
            assert!((5.0..=40.0).contains(&x), "x = {x}");
        }
    }

    #[test]
    fn sample_mean_matches_analytic_mean() {
        let params = TriangularParams::new(1.0, 3.0, 11.0);
        let t = Triangular::new(params);
        let mut rng = SimRng::new(2024);
        let n = 100_000;
        let mean = (0..n).map(|_| t.sample(&mut rng)).sum::<f64>() / f64::from(n);
        assert!((mean - params.mean()).abs() < 0.05, "mean = {mean}, expected {}", params.mean());
    }

    #[test]
    fn degenerate_left_mode() {
        // mode == lower: the first branch only covers u == 0.
        let t = Triangular::new(TriangularParams::new(0.0, 0.0, 6.0));
        assert!((t.inverse_cdf(0.75) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn fixed_generator_is_constant() {
        let g = ArrivalGenerator::from_config(&ArrivalConfig::Fixed { interval_minutes: 5.0 });
        let mut rng = SimRng::new(0);
        assert_eq!(g.next_gap(&mut rng), 5.0);
        assert_eq!(g.next_gap(&mut rng), 5.0);
        assert_eq!(g.mean_interval(), 5.0);
    }

    #[test]
    fn triangular_generator_uses_mean() {
        let g = ArrivalGenerator::from_config(&ArrivalConfig::Triangular(
            TriangularParams::from_shape(0.5, 10.0, 20.0),
        ));
        assert_eq!(g.mean_interval(), 20.0);
    }
}

#[cfg(test)]
mod hours {
    use re_core::{BusinessHoursConfig, SimTime};

    use crate::BusinessHours;

    #[test]
    fn always_open_by_default() {
        let h = BusinessHours::always_open();
        assert!(h.is_open(SimTime(0.0)));
        assert!(h.is_open(SimTime(23.0 * 60.0)));
        assert_eq!(h.open_minutes_in(1_440.0), None);
    }

    #[test]
    fn window_is_half_open() {
        let h = BusinessHours::new(Some(BusinessHoursConfig::from_hours(9, 18)));
        assert!(!h.is_open(SimTime(8.0 * 60.0 + 59.0)));
        assert!(h.is_open(SimTime(9.0 * 60.0)));
        assert!(h.is_open(SimTime(17.0 * 60.0 + 59.0)));
        assert!(!h.is_open(SimTime(18.0 * 60.0)));
        // Same window on later days.
        assert!(h.is_open(SimTime(3.0 * 1_440.0 + 600.0)));
        assert!(!h.is_open(SimTime(3.0 * 1_440.0 + 60.0)));
    }

    #[test]
    fn open_minutes_scale_with_days() {
        let h = BusinessHours::new(Some(BusinessHoursConfig::from_hours(9, 18)));
        assert_eq!(h.open_minutes_in(2.0 * 1_440.0), Some(2.0 * 540.0));
    }
}

#[cfg(test)]
mod commission {
    use crate::CommissionSchedule;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn default_schedule() {
        let s = CommissionSchedule::default();
        assert!(close(s.minimum_rate(0), 0.036));
        assert!(close(s.minimum_rate(1), 0.036 - 0.01 / 21.0));
        assert!(close(s.minimum_rate(3), 0.036 - 6.0 * 0.01 / 21.0));
        assert!(close(s.minimum_rate(6), 0.026));
        assert!(close(s.minimum_rate(60), 0.026));
    }

    #[test]
    fn zero_steps_never_concedes() {
        let s = CommissionSchedule { steps: 0, ..Default::default() };
        assert_eq!(s.minimum_rate(4), s.start);
    }
}
