//! The `Model` trait: the main extension point for simulation types.

use gs_agent::{AgentError, Parameters, SpatialState};
use gs_core::{SimRng, Statistics};

use crate::{ModelError, ModelResult, Occupancy, run_tick};

/// A simulation type: configuration plus pure functions over a state.
///
/// A model holds no mutable simulation data.  The session that drives it
/// owns the [`SpatialState`] and the RNG and passes them in on every call.
///
/// # Required methods
///
/// Everything except [`tick`][Self::tick], whose default runs every agent's
/// strategy once via [`run_tick`].
///
/// # Thread safety
///
/// Models are shared between sessions behind `Arc<dyn Model>` and called from
/// background workers, so implementations must be `Send + Sync`.
pub trait Model: Send + Sync + 'static {
    /// Stable identifier, e.g. `"Schelling"`.
    fn id(&self) -> &str;

    /// Top-level parameter declarations.  Callers fill in a copy of this and
    /// pass it to [`initialize`][Self::initialize].
    fn parameter_schema(&self) -> Parameters;

    /// Build a fresh, populated state from resolved parameters.
    ///
    /// Fails with [`ModelError::MissingParameter`] if a required parameter is
    /// unset and with [`ModelError::Capacity`] if the requested population
    /// does not fit the grid.
    fn initialize(&self, params: &Parameters, rng: &mut SimRng) -> ModelResult<SpatialState>;

    /// Advance `state` by one tick in place.  Returns how many agents acted.
    fn tick(&self, state: &mut SpatialState, rng: &mut SimRng) -> ModelResult<usize> {
        Ok(run_tick(state, rng)?)
    }

    /// Termination predicate over the occupancy before and after a tick.
    fn is_over(&self, before: &Occupancy, after: &Occupancy) -> bool;

    /// Aggregate metrics of `state`.  No side effects.
    fn statistics(&self, state: &SpatialState) -> Statistics;
}

// ── Parameter readers ─────────────────────────────────────────────────────────

/// Read a resolved integer parameter, reporting an unset or undeclared one as
/// [`ModelError::MissingParameter`].
pub fn require_int(params: &Parameters, name: &str) -> ModelResult<i64> {
    params.int(name).map_err(|err| match err {
        AgentError::Unresolved(names) => ModelError::MissingParameter(names),
        AgentError::UnknownParameter(name) => ModelError::MissingParameter(vec![name]),
        other => other.into(),
    })
}

/// Read a non-negative integer parameter as a count.
pub fn require_count(params: &Parameters, name: &str) -> ModelResult<u64> {
    let value = require_int(params, name)?;
    u64::try_from(value)
        .map_err(|_| ModelError::Config(format!("`{name}` must be non-negative, got {value}")))
}

/// Fail with [`ModelError::MissingParameter`] listing every unset required
/// parameter of `params`.
pub fn require_resolved(params: &Parameters) -> ModelResult<()> {
    let missing = params.unresolved();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ModelError::MissingParameter(missing))
    }
}
