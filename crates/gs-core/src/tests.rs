//! Unit tests for gs-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, SessionId};

    #[test]
    fn ordering_and_next() {
        assert!(AgentId(0) < AgentId(1));
        assert_eq!(SessionId(4).next(), SessionId(5));
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
        assert_eq!(SessionId(2).to_string(), "SessionId(2)");
    }
}

#[cfg(test)]
mod geom {
    use crate::{CoreError, Dimensions, DirectionVector, Pos, SimRng};

    #[test]
    fn pos_orders_row_major() {
        let mut cells = vec![Pos::new(1, 1), Pos::new(2, 0), Pos::new(0, 1), Pos::new(0, 0)];
        cells.sort();
        assert_eq!(
            cells,
            vec![Pos::new(0, 0), Pos::new(2, 0), Pos::new(0, 1), Pos::new(1, 1)]
        );
    }

    #[test]
    fn neighbours_excludes_self() {
        let n: Vec<Pos> = Pos::new(3, 3).neighbours().collect();
        assert_eq!(n.len(), 8);
        assert!(!n.contains(&Pos::new(3, 3)));
        assert!(n.contains(&Pos::new(2, 4)));
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert!(Dimensions::new(0, 4).is_err());
        assert!(Dimensions::new(4, 0).is_err());
        assert_eq!(Dimensions::square(5).unwrap().capacity(), 25);
    }

    #[test]
    fn contains_is_half_open() {
        let d = Dimensions::new(3, 2).unwrap();
        assert!(d.contains(Pos::new(0, 0)));
        assert!(d.contains(Pos::new(2, 1)));
        assert!(!d.contains(Pos::new(3, 1)));
        assert!(!d.contains(Pos::new(2, 2)));
        assert!(!d.contains(Pos::new(-1, 0)));
    }

    #[test]
    fn clamp_limits_each_axis() {
        let d = Dimensions::new(5, 4).unwrap();
        assert_eq!(d.clamp(Pos::new(-3, 9)), Pos::new(0, 3));
        assert_eq!(d.clamp(Pos::new(2, 2)), Pos::new(2, 2));
    }

    #[test]
    fn cells_cover_grid_once() {
        let d = Dimensions::new(4, 3).unwrap();
        let cells: Vec<Pos> = d.cells().collect();
        assert_eq!(cells.len(), 12);
        let mut sorted = cells.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted, cells, "cells() should already be row-major and unique");
    }

    #[test]
    fn pos_at_matches_row_major_order() {
        let d = Dimensions::new(4, 3).unwrap();
        let by_index: Vec<Pos> = (0..12).map(|i| d.pos_at(i).unwrap()).collect();
        assert_eq!(by_index, d.cells().collect::<Vec<_>>());
        assert_eq!(d.pos_at(12), None);
    }

    #[test]
    fn zero_direction_rejected() {
        assert_eq!(DirectionVector::new(0, 0), Err(CoreError::ZeroDirection));
    }

    #[test]
    fn normalized_and_reversed() {
        let d = DirectionVector::new(-4, 2).unwrap();
        assert_eq!(d.normalized(), (-1, 1));
        assert_eq!(d.reversed().normalized(), (1, -1));
        assert_eq!(Pos::new(5, 5).step(d, 3), Pos::new(2, 8));
    }

    #[test]
    fn random_direction_in_range_and_non_zero() {
        let mut rng = SimRng::new(11);
        for _ in 0..2_000 {
            let d = DirectionVector::random(&mut rng);
            assert!(d.x() != 0 || d.y() != 0);
            assert!((-5..=5).contains(&d.x()));
            assert!((-5..=5).contains(&d.y()));
        }
    }
}

#[cfg(test)]
mod time {
    use crate::{SessionConfig, Throttle, Tick};

    #[test]
    fn tick_arithmetic() {
        assert_eq!(Tick::ZERO.next(), Tick(1));
        assert_eq!(Tick(3).to_string(), "T3");
    }

    #[test]
    fn throttle_releases_once_per_interval() {
        let mut t = Throttle::new(300, 100);
        let fired: Vec<bool> = (0..6).map(|_| t.poll()).collect();
        assert_eq!(fired, vec![false, false, true, false, false, true]);
    }

    #[test]
    fn throttle_interval_below_granularity_fires_every_poll() {
        let mut t = Throttle::new(50, 100);
        assert!(t.poll());
        assert!(t.poll());
        assert_eq!(t.accumulated_ms(), 0);
    }

    #[test]
    fn shortening_interval_keeps_accumulated_time() {
        let mut t = Throttle::new(1_000, 100);
        t.poll();
        t.poll();
        t.set_interval_ms(300);
        assert!(t.poll());
    }

    #[test]
    fn config_defaults_and_validation() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.tick_interval_ms, 1_000);
        assert!(cfg.validate().is_ok());
        let bad = SessionConfig { clock_granularity_ms: 0, ..SessionConfig::default() };
        assert!(bad.validate().is_err());
        assert_eq!(cfg.make_throttle().interval_ms(), 1_000);
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: u32 = r1.gen_range(0..u32::MAX);
            let b: u32 = r2.gen_range(0..u32::MAX);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn children_diverge() {
        let mut root = SimRng::new(1);
        let mut a = root.child(0);
        let mut b = root.child(1);
        let x: u64 = a.gen_range(0..u64::MAX);
        let y: u64 = b.gen_range(0..u64::MAX);
        assert_ne!(x, y);
    }

    #[test]
    fn sampled_indices_are_distinct_and_in_range() {
        let mut rng = SimRng::new(4);
        let picked = rng.sample_indices(1_000_000_000, 50).unwrap();
        assert_eq!(picked.len(), 50);
        let unique: std::collections::BTreeSet<_> = picked.iter().collect();
        assert_eq!(unique.len(), 50);
        assert!(picked.iter().all(|&i| i < 1_000_000_000));

        assert_eq!(rng.sample_indices(3, 3).map(|v| v.len()), Some(3));
        assert!(rng.sample_indices(3, 4).is_none());
    }

    #[test]
    fn roll_percent_extremes() {
        let mut rng = SimRng::new(0);
        for _ in 0..500 {
            assert!(!rng.roll_percent(0));
            assert!(rng.roll_percent(100));
        }
    }
}

#[cfg(test)]
mod stats {
    use crate::Statistics;

    #[test]
    fn insert_get_iterate_in_name_order() {
        let s = Statistics::new().with("b", 2.0).with("a", 1.0);
        assert_eq!(s.get("a"), Some(1.0));
        assert_eq!(s.get("missing"), None);
        let names: Vec<&str> = s.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
