//! The `Agent` type and the `Strategy` trait: the per-tick extension point.

use std::fmt;
use std::sync::Arc;

use gs_core::{DirectionVector, Pos, SimRng};

use crate::{AgentResult, ParamValue, Parameters, SpatialState};

/// Per-tick agent behavior.
///
/// A strategy receives the live state and the position of the agent it is
/// acting for, and mutates the state in place (moving the agent, replacing
/// it or a neighbour, updating parameters).  Randomness must come from `rng`
/// so that a seeded session is reproducible.
///
/// Closures with the matching signature implement `Strategy` directly:
///
/// ```rust
/// use gs_agent::{AgentBuilder, AgentResult, SpatialState};
/// use gs_core::{Pos, SimRng};
///
/// let agent = AgentBuilder::new("X")
///     .strategy(|_state: &mut SpatialState, _pos: Pos, _rng: &mut SimRng| -> AgentResult<()> {
///         Ok(())
///     })
///     .build()
///     .unwrap();
/// assert_eq!(agent.agent_type(), "X");
/// ```
///
/// # Thread safety
///
/// Strategies are shared between agents of the same kind and may be moved to
/// a background worker together with the session that owns them, so they
/// must be `Send + Sync`.  Per-agent data belongs in the agent's parameters.
pub trait Strategy: Send + Sync + 'static {
    fn act(&self, state: &mut SpatialState, pos: Pos, rng: &mut SimRng) -> AgentResult<()>;
}

impl<F> Strategy for F
where
    F: Fn(&mut SpatialState, Pos, &mut SimRng) -> AgentResult<()> + Send + Sync + 'static,
{
    fn act(&self, state: &mut SpatialState, pos: Pos, rng: &mut SimRng) -> AgentResult<()> {
        self(state, pos, rng)
    }
}

/// A typed bag of parameters plus one strategy.
///
/// Agents are built with [`AgentBuilder`][crate::AgentBuilder] and never
/// change type: a transition (e.g. susceptible → infected) replaces the agent
/// with a freshly built one via
/// [`SpatialState::replace_occupant`][crate::SpatialState::replace_occupant].
pub struct Agent {
    agent_type: String,
    params:     Parameters,
    strategy:   Arc<dyn Strategy>,
}

impl Agent {
    pub(crate) fn new(agent_type: String, params: Parameters, strategy: Arc<dyn Strategy>) -> Self {
        Self { agent_type, params, strategy }
    }

    /// Short type discriminator, e.g. `"P"` or `"I"`.
    pub fn agent_type(&self) -> &str {
        &self.agent_type
    }

    pub fn is_same_type(&self, other: &Agent) -> bool {
        self.agent_type == other.agent_type
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Set a declared parameter; see [`Parameters::set`].
    pub fn set_param(&mut self, name: &str, value: impl Into<ParamValue>) -> AgentResult<()> {
        self.params.set(name, value)
    }

    pub fn int_param(&self, name: &str) -> AgentResult<i64> {
        self.params.int(name)
    }

    pub fn direction_param(&self, name: &str) -> AgentResult<DirectionVector> {
        self.params.direction(name)
    }

    /// The strategy handle, provided every required parameter is resolved.
    ///
    /// Running a strategy with unresolved parameters is a configuration
    /// error, reported as [`AgentError::Unresolved`][crate::AgentError::Unresolved].
    pub fn ready_strategy(&self) -> AgentResult<Arc<dyn Strategy>> {
        self.params.ensure_resolved()?;
        Ok(Arc::clone(&self.strategy))
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("agent_type", &self.agent_type)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
