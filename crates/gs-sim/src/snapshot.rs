//! `SimulationSnapshot`: the output record of one session step.

use gs_agent::SpatialState;
use gs_core::{SessionId, Statistics, Tick};
use gs_model::Occupancy;

/// What a caller sees after a step: the occupancy of the grid plus derived
/// data.  Detached from the session; holding one never blocks a tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationSnapshot {
    pub session:    SessionId,
    /// Number of completed ticks.
    pub tick:       Tick,
    pub width:      u32,
    pub height:     u32,
    pub occupants:  Occupancy,
    /// The model's exit predicate held after the last tick.
    pub terminated: bool,
    pub statistics: Statistics,
}

impl SimulationSnapshot {
    pub(crate) fn capture(
        session:    SessionId,
        tick:       Tick,
        state:      &SpatialState,
        occupants:  Occupancy,
        terminated: bool,
        statistics: Statistics,
    ) -> Self {
        let dims = state.dimensions();
        Self {
            session,
            tick,
            width: dims.width(),
            height: dims.height(),
            occupants,
            terminated,
            statistics,
        }
    }
}
