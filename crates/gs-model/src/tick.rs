//! Default tick orchestration.

use gs_agent::{AgentResult, SpatialState};
use gs_core::SimRng;

/// Run every agent's strategy once.
///
/// The occupant ids are captured *before* any strategy executes.  Each id is
/// then resolved to its current position (an agent moved by someone else's
/// strategy is visited where it now stands), and ids that are no longer
/// placed are skipped.  Agents therefore act at most once per tick no matter
/// how the state changes during the tick.
///
/// Returns the number of strategies invoked.  The first strategy error aborts
/// the tick; strategies that already ran keep their effects.
pub fn run_tick(state: &mut SpatialState, rng: &mut SimRng) -> AgentResult<usize> {
    let snapshot = state.occupant_ids();
    let mut acted = 0;

    for id in snapshot {
        let Some(pos) = state.position_of(id) else {
            continue;
        };
        // Clone the strategy handle out so the strategy may borrow the state
        // mutably, including the agent it belongs to.
        let strategy = match state.occupant(pos) {
            Some(agent) => agent.ready_strategy()?,
            None => continue,
        };
        strategy.act(state, pos, rng)?;
        acted += 1;
    }

    Ok(acted)
}
