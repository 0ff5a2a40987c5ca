//! Schelling segregation model.
//!
//! Two agent types, `"A"` and `"B"`, share a square grid.  An agent is
//! satisfied when the share of same-type agents among its occupied Moore
//! neighbours is at least its `threshold` (percent); an agent with no
//! neighbours is satisfied.  Each tick, every unsatisfied agent moves to a
//! uniformly random free cell.
//!
//! The run is over once a tick leaves the occupancy unchanged, i.e. nobody
//! wanted (or was able) to move.

use std::sync::Arc;

use gs_agent::{Agent, AgentBuilder, AgentError, AgentResult, Domain, ParamKind, Parameter, Parameters, SpatialState, Strategy};
use gs_core::{Dimensions, Pos, SimRng, Statistics};
use tracing::debug;

use crate::{
    Model, ModelError, ModelResult, Occupancy, UniquePositions, require_count, require_int,
    require_resolved,
};

pub const MODEL_ID: &str = "Schelling";

pub const TYPE_A: &str = "A";
pub const TYPE_B: &str = "B";

/// Top-level parameter names.
pub mod params {
    pub const SIZE:      &str = "size";
    pub const AGENTS_A:  &str = "agents_a";
    pub const AGENTS_B:  &str = "agents_b";
    pub const THRESHOLD: &str = "threshold";
}

const DEFAULT_THRESHOLD: i64 = 50;

fn threshold_domain() -> Domain {
    Domain::int_range("share of same-type neighbours required (0-100)", 0..=100)
}

/// The Schelling model.  Stateless; share one instance between sessions.
#[derive(Debug, Default, Clone, Copy)]
pub struct SchellingModel;

impl SchellingModel {
    /// Build one agent of `agent_type` with the given satisfaction threshold.
    pub fn agent(agent_type: &str, threshold: i64, strategy: Arc<dyn Strategy>) -> AgentResult<Agent> {
        AgentBuilder::new(agent_type)
            .optional_in(params::THRESHOLD, threshold, threshold_domain())
            .shared_strategy(strategy)
            .build()
    }

    /// The strategy shared by every Schelling agent.
    pub fn strategy() -> Arc<dyn Strategy> {
        Arc::new(relocate_if_unsatisfied)
    }
}

impl Model for SchellingModel {
    fn id(&self) -> &str {
        MODEL_ID
    }

    fn parameter_schema(&self) -> Parameters {
        let count = || Domain::int_range("number of agents (>= 0)", 0..=i64::MAX);
        Parameters::new()
            .with(Parameter::required(params::SIZE, ParamKind::Int)
                .with_domain(Domain::int_range("grid side (>= 1)", 1..=i64::from(i32::MAX))))
            .with(Parameter::required(params::AGENTS_A, ParamKind::Int).with_domain(count()))
            .with(Parameter::required(params::AGENTS_B, ParamKind::Int).with_domain(count()))
            .with(Parameter::optional(params::THRESHOLD, DEFAULT_THRESHOLD).with_domain(threshold_domain()))
    }

    fn initialize(&self, params: &Parameters, rng: &mut SimRng) -> ModelResult<SpatialState> {
        require_resolved(params)?;
        let size = require_count(params, params::SIZE)?;
        let na = require_count(params, params::AGENTS_A)?;
        let nb = require_count(params, params::AGENTS_B)?;
        let threshold = require_int(params, params::THRESHOLD)?;

        let side = u32::try_from(size)
            .map_err(|_| ModelError::Config(format!("grid side {size} is too large")))?;
        let dims = Dimensions::square(side)?;
        let mut cells = UniquePositions::sample(dims, na.saturating_add(nb), rng)?;

        let mut state = SpatialState::new(dims);
        let strategy = Self::strategy();
        for i in 0..na + nb {
            let agent_type = if i < na { TYPE_A } else { TYPE_B };
            let agent = Self::agent(agent_type, threshold, Arc::clone(&strategy))?;
            state.add_occupant(cells.next_cell()?, agent)?;
        }

        debug!(model = MODEL_ID, %dims, agents_a = na, agents_b = nb, threshold, "initialized state");
        Ok(state)
    }

    /// Stability: the tick changed nobody's position or type.
    fn is_over(&self, before: &Occupancy, after: &Occupancy) -> bool {
        before == after
    }

    fn statistics(&self, state: &SpatialState) -> Statistics {
        let mut satisfied = 0usize;
        let mut share_sum = 0.0;
        let mut with_neighbours = 0usize;
        for (pos, agent) in state.occupants() {
            let share = same_type_share(state, pos, agent.agent_type());
            if let Some(s) = share {
                share_sum += s;
                with_neighbours += 1;
            }
            let threshold = agent.int_param(params::THRESHOLD).unwrap_or(DEFAULT_THRESHOLD);
            if is_satisfied(share, threshold) {
                satisfied += 1;
            }
        }
        let segregation = if with_neighbours == 0 { 0.0 } else { 100.0 * share_sum / with_neighbours as f64 };

        Statistics::new()
            .with("type_a", state.count_of(TYPE_A) as f64)
            .with("type_b", state.count_of(TYPE_B) as f64)
            .with("satisfied", satisfied as f64)
            .with("segregation", segregation)
    }
}

// ── Strategy ──────────────────────────────────────────────────────────────────

fn relocate_if_unsatisfied(state: &mut SpatialState, pos: Pos, rng: &mut SimRng) -> AgentResult<()> {
    let agent = state.occupant(pos).ok_or(AgentError::Vacant(pos))?;
    let threshold = agent.int_param(params::THRESHOLD)?;
    let share = same_type_share(state, pos, agent.agent_type());
    if is_satisfied(share, threshold) {
        return Ok(());
    }

    let free: Vec<Pos> = state.free_cells().collect();
    if let Some(&target) = rng.choose(&free) {
        state.move_occupant(pos, target)?;
    }
    Ok(())
}

/// Fraction (0..=1) of occupied neighbours of `pos` whose type is
/// `agent_type`, or `None` if no neighbour cell is occupied.
fn same_type_share(state: &SpatialState, pos: Pos, agent_type: &str) -> Option<f64> {
    let (mut same, mut total) = (0u32, 0u32);
    for n in pos.neighbours() {
        if let Some(other) = state.occupant(n) {
            total += 1;
            if other.agent_type() == agent_type {
                same += 1;
            }
        }
    }
    (total > 0).then(|| f64::from(same) / f64::from(total))
}

fn is_satisfied(share: Option<f64>, threshold: i64) -> bool {
    share.is_none_or(|s| s * 100.0 >= threshold as f64)
}
