//! Unit tests for gs-agent.

use gs_core::{Dimensions, Pos, SimRng};

use crate::{Agent, AgentBuilder, AgentResult, SpatialState};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn idle(_state: &mut SpatialState, _pos: Pos, _rng: &mut SimRng) -> AgentResult<()> {
    Ok(())
}

fn agent(tag: &str) -> Agent {
    AgentBuilder::new(tag).strategy(idle).build().unwrap()
}

fn grid(w: u32, h: u32) -> SpatialState {
    SpatialState::new(Dimensions::new(w, h).unwrap())
}

// ── Parameters ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod param_tests {
    use gs_core::DirectionVector;

    use crate::{AgentError, Domain, ParamKind, ParamValue, Parameter, Parameters};

    fn rate_params() -> Parameters {
        Parameters::new()
            .with(Parameter::required("rate", ParamKind::Int)
                .with_domain(Domain::int_range("rate (0-100)", 0..=100)))
            .with(Parameter::optional("label", "x"))
    }

    #[test]
    fn required_starts_unresolved() {
        let p = rate_params();
        assert!(!p.is_resolved());
        assert!(p.get("rate").unwrap().is_required());
        assert!(!p.get("label").unwrap().is_required());
        assert_eq!(p.unresolved(), vec!["rate".to_owned()]);
        assert_eq!(p.ensure_resolved(), Err(AgentError::Unresolved(vec!["rate".into()])));
    }

    #[test]
    fn set_resolves() {
        let mut p = rate_params();
        p.set("rate", 40).unwrap();
        assert!(p.is_resolved());
        assert_eq!(p.int("rate").unwrap(), 40);
    }

    #[test]
    fn out_of_domain_keeps_previous_value() {
        let mut p = rate_params();
        p.set("rate", 10).unwrap();
        let err = p.set("rate", 101).unwrap_err();
        assert!(matches!(err, AgentError::OutOfDomain { ref name, .. } if name == "rate"));
        assert_eq!(p.int("rate").unwrap(), 10);
    }

    #[test]
    fn kind_mismatch_rejected() {
        let mut p = rate_params();
        let err = p.set("rate", true).unwrap_err();
        assert_eq!(
            err,
            AgentError::KindMismatch { name: "rate".into(), expected: ParamKind::Int, got: ParamKind::Bool }
        );
        assert!(!p.is_resolved());
    }

    #[test]
    fn unknown_parameter_rejected() {
        let mut p = rate_params();
        assert_eq!(p.set("nope", 1), Err(AgentError::UnknownParameter("nope".into())));
        assert!(matches!(p.int("nope"), Err(AgentError::UnknownParameter(_))));
    }

    #[test]
    fn typed_getters() {
        let dir = DirectionVector::new(1, -2).unwrap();
        let mut p = Parameters::new()
            .with(Parameter::optional("dir", dir))
            .with(Parameter::required("n", ParamKind::Int));
        assert_eq!(p.direction("dir").unwrap(), dir);
        assert!(matches!(p.int("n"), Err(AgentError::Unresolved(_))));
        assert!(matches!(p.int("dir"), Err(AgentError::KindMismatch { .. })));
        p.set("n", 3i64).unwrap();
        assert_eq!(p.value("n"), Some(&ParamValue::Int(3)));
    }

    #[test]
    fn custom_domain_predicate() {
        let even = Domain::new("even numbers", |v| v.as_int().is_some_and(|i| i % 2 == 0));
        let mut param = Parameter::required("n", ParamKind::Int).with_domain(even);
        assert!(param.set(3).is_err());
        assert!(param.set(4).is_ok());
        assert_eq!(param.domain().unwrap().description(), "even numbers");
    }
}

// ── AgentBuilder ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::{AgentError, Domain, ParamKind};

    #[test]
    fn build_without_strategy_fails() {
        let result = AgentBuilder::new("A").optional("k", 10).build();
        assert!(matches!(result, Err(AgentError::MissingStrategy)));
    }

    #[test]
    fn build_with_strategy_and_params() {
        let a = AgentBuilder::new("A")
            .strategy(idle)
            .optional("testKey", 10)
            .optional("testKey2", "testValue")
            .optional("testKey3", true)
            .build()
            .unwrap();
        assert_eq!(a.agent_type(), "A");
        assert_eq!(a.params().len(), 3);
        assert!(a.ready_strategy().is_ok());
    }

    #[test]
    fn default_outside_domain_fails_build() {
        let result = AgentBuilder::new("A")
            .strategy(idle)
            .optional_in("step", 0, Domain::int_range("1-10", 1..=10))
            .build();
        assert!(matches!(result, Err(AgentError::OutOfDomain { .. })));
    }

    #[test]
    fn unresolved_blocks_strategy() {
        let mut a = AgentBuilder::new("A")
            .strategy(idle)
            .required("step", ParamKind::Int)
            .required("rate", ParamKind::Int)
            .build()
            .unwrap();
        match a.ready_strategy() {
            Err(AgentError::Unresolved(names)) => assert_eq!(names, vec!["rate", "step"]),
            Err(other) => panic!("expected unresolved error, got {other:?}"),
            Ok(_) => panic!("strategy should not be ready"),
        }
        a.set_param("step", 1).unwrap();
        a.set_param("rate", 5).unwrap();
        assert!(a.ready_strategy().is_ok());
    }

    #[test]
    fn same_type_compares_tags() {
        assert!(agent("P").is_same_type(&agent("P")));
        assert!(!agent("P").is_same_type(&agent("I")));
    }
}

// ── SpatialState ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod state_tests {
    use super::*;
    use crate::AgentError;

    #[test]
    fn add_and_query() {
        let mut s = grid(3, 3);
        let id = s.add_occupant(Pos::new(1, 2), agent("A")).unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s.position_of(id), Some(Pos::new(1, 2)));
        assert_eq!(s.id_at(Pos::new(1, 2)), Some(id));
        assert_eq!(s.occupant(Pos::new(1, 2)).unwrap().agent_type(), "A");
        assert!(!s.is_free(Pos::new(1, 2)).unwrap());
        assert!(s.is_free(Pos::new(0, 0)).unwrap());
    }

    #[test]
    fn is_free_outside_fails() {
        let s = grid(2, 2);
        assert_eq!(s.is_free(Pos::new(2, 0)), Err(AgentError::OutOfBounds(Pos::new(2, 0))));
        assert!(!s.is_inside(Pos::new(-1, 0)));
    }

    #[test]
    fn add_rejects_outside_and_occupied() {
        let mut s = grid(2, 2);
        assert!(matches!(s.add_occupant(Pos::new(5, 5), agent("A")), Err(AgentError::OutOfBounds(_))));
        s.add_occupant(Pos::new(0, 0), agent("A")).unwrap();
        let err = s.add_occupant(Pos::new(0, 0), agent("B")).unwrap_err();
        assert_eq!(err, AgentError::Occupied(Pos::new(0, 0)));
        assert!(err.is_invariant_violation());
        assert_eq!(s.occupant(Pos::new(0, 0)).unwrap().agent_type(), "A");
    }

    #[test]
    fn remove_requires_matching_id() {
        let mut s = grid(2, 2);
        let a = s.add_occupant(Pos::new(0, 0), agent("A")).unwrap();
        let b = s.add_occupant(Pos::new(1, 0), agent("B")).unwrap();
        assert_eq!(
            s.remove_occupant(Pos::new(0, 0), b).unwrap_err(),
            AgentError::NotOccupant { pos: Pos::new(0, 0), agent: b }
        );
        assert_eq!(s.remove_occupant(Pos::new(0, 1), a).unwrap_err(), AgentError::Vacant(Pos::new(0, 1)));
        let removed = s.remove_occupant(Pos::new(0, 0), a).unwrap();
        assert_eq!(removed.agent_type(), "A");
        assert_eq!(s.position_of(a), None);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn move_relocates_and_updates_index() {
        let mut s = grid(3, 3);
        let id = s.add_occupant(Pos::new(0, 0), agent("A")).unwrap();
        assert_eq!(s.move_occupant(Pos::new(0, 0), Pos::new(2, 2)).unwrap(), id);
        assert!(s.occupant(Pos::new(0, 0)).is_none());
        assert_eq!(s.position_of(id), Some(Pos::new(2, 2)));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn move_failures_leave_state_untouched() {
        let mut s = grid(3, 3);
        let a = s.add_occupant(Pos::new(0, 0), agent("A")).unwrap();
        s.add_occupant(Pos::new(1, 0), agent("B")).unwrap();

        assert_eq!(s.move_occupant(Pos::new(0, 0), Pos::new(1, 0)), Err(AgentError::Occupied(Pos::new(1, 0))));
        assert_eq!(s.move_occupant(Pos::new(0, 0), Pos::new(0, 0)), Err(AgentError::Occupied(Pos::new(0, 0))));
        assert_eq!(s.move_occupant(Pos::new(0, 0), Pos::new(3, 0)), Err(AgentError::OutOfBounds(Pos::new(3, 0))));
        assert_eq!(s.move_occupant(Pos::new(2, 2), Pos::new(2, 1)), Err(AgentError::Vacant(Pos::new(2, 2))));

        assert_eq!(s.position_of(a), Some(Pos::new(0, 0)));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn replace_assigns_new_id() {
        let mut s = grid(2, 2);
        let old = s.add_occupant(Pos::new(1, 1), agent("P")).unwrap();
        let (new, previous) = s.replace_occupant(Pos::new(1, 1), agent("I")).unwrap();
        assert_ne!(old, new);
        assert_eq!(previous.agent_type(), "P");
        assert_eq!(s.occupant(Pos::new(1, 1)).unwrap().agent_type(), "I");
        assert_eq!(s.position_of(old), None);
        assert_eq!(s.position_of(new), Some(Pos::new(1, 1)));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn replace_empty_cell_fails() {
        let mut s = grid(2, 2);
        assert!(matches!(s.replace_occupant(Pos::new(0, 1), agent("I")), Err(AgentError::Vacant(_))));
        assert!(s.is_empty());
    }

    #[test]
    fn snapshot_is_row_major() {
        let mut s = grid(3, 3);
        let c = s.add_occupant(Pos::new(0, 2), agent("A")).unwrap();
        let a = s.add_occupant(Pos::new(2, 0), agent("A")).unwrap();
        let b = s.add_occupant(Pos::new(1, 1), agent("B")).unwrap();
        assert_eq!(s.occupant_ids(), vec![a, b, c]);
        let positions: Vec<Pos> = s.occupants().map(|(p, _)| p).collect();
        assert_eq!(positions, vec![Pos::new(2, 0), Pos::new(1, 1), Pos::new(0, 2)]);
    }

    #[test]
    fn counts_by_type() {
        let mut s = grid(3, 1);
        s.add_occupant(Pos::new(0, 0), agent("P")).unwrap();
        s.add_occupant(Pos::new(1, 0), agent("I")).unwrap();
        s.add_occupant(Pos::new(2, 0), agent("P")).unwrap();
        let counts = s.count_by_type();
        assert_eq!(counts.get("P"), Some(&2));
        assert_eq!(counts.get("I"), Some(&1));
        assert_eq!(s.count_of("I"), 1);
        assert_eq!(s.count_of("X"), 0);
    }

    #[test]
    fn strategy_can_mutate_own_params() {
        use gs_core::DirectionVector;

        fn turn(state: &mut SpatialState, pos: Pos, _rng: &mut SimRng) -> AgentResult<()> {
            let dir = DirectionVector::new(0, 1)?;
            state
                .occupant_mut(pos)
                .ok_or(AgentError::Vacant(pos))?
                .set_param("dir", dir)
        }

        let mut s = grid(2, 2);
        let a = AgentBuilder::new("A")
            .optional("dir", DirectionVector::new(1, 0).unwrap())
            .strategy(turn)
            .build()
            .unwrap();
        s.add_occupant(Pos::new(0, 0), a).unwrap();
        let strategy = s.occupant(Pos::new(0, 0)).unwrap().ready_strategy().unwrap();
        strategy.act(&mut s, Pos::new(0, 0), &mut SimRng::new(0)).unwrap();
        let dir = s.occupant(Pos::new(0, 0)).unwrap().direction_param("dir").unwrap();
        assert_eq!(dir.normalized(), (0, 1));
    }
}
