//! The epidemic model.

use std::sync::Arc;

use gs_agent::{Domain, ParamKind, Parameter, Parameters, SpatialState};
use gs_core::{Dimensions, SimRng, Statistics};
use gs_model::{
    Model, ModelError, ModelResult, Occupancy, UniquePositions, require_count,
    require_resolved,
};
use tracing::debug;

use crate::{EpidemicDefaults, EpidemicStrategy, Health};

pub const MODEL_ID: &str = "Epidemic";

/// Top-level parameter names.
pub mod params {
    pub const SIZE:                  &str = "size";
    pub const SUSCEPTIBLE:           &str = "susceptible";
    pub const INFECTED:              &str = "infected";
    pub const STEP_SIZE_SUSCEPTIBLE: &str = "step_size_susceptible";
    pub const STEP_SIZE_INFECTED:    &str = "step_size_infected";
    pub const INFECTION_RATE:        &str = "infection_rate";
    pub const RECOVERY_RATE:         &str = "recovery_rate";
}

/// Susceptible and infected agents wandering a square grid.
///
/// The run is over as soon as a tick ends with no infected agent left.
#[derive(Debug, Default, Clone, Copy)]
pub struct EpidemicModel;

impl Model for EpidemicModel {
    fn id(&self) -> &str {
        MODEL_ID
    }

    fn parameter_schema(&self) -> Parameters {
        let count = || Domain::int_range("number of agents (>= 0)", 0..=i64::MAX);
        let step = || Domain::int_range("step size (1-10)", 1..=10);
        let percent = || Domain::int_range("probability in percent (0-100)", 0..=100);
        Parameters::new()
            .with(Parameter::required(params::SIZE, ParamKind::Int)
                .with_domain(Domain::int_range("grid side (>= 1)", 1..=i64::from(i32::MAX))))
            .with(Parameter::required(params::SUSCEPTIBLE, ParamKind::Int).with_domain(count()))
            .with(Parameter::required(params::INFECTED, ParamKind::Int).with_domain(count()))
            .with(Parameter::optional(params::STEP_SIZE_SUSCEPTIBLE, 1).with_domain(step()))
            .with(Parameter::optional(params::STEP_SIZE_INFECTED, 1).with_domain(step()))
            .with(Parameter::required(params::INFECTION_RATE, ParamKind::Int).with_domain(percent()))
            .with(Parameter::required(params::RECOVERY_RATE, ParamKind::Int).with_domain(percent()))
    }

    fn initialize(&self, params: &Parameters, rng: &mut SimRng) -> ModelResult<SpatialState> {
        require_resolved(params)?;
        let size = require_count(params, params::SIZE)?;
        let susceptible = require_count(params, params::SUSCEPTIBLE)?;
        let infected = require_count(params, params::INFECTED)?;
        let defaults = EpidemicDefaults::from_params(params)?;

        let side = u32::try_from(size)
            .map_err(|_| ModelError::Config(format!("grid side {size} is too large")))?;
        let dims = Dimensions::square(side)?;
        let mut cells = UniquePositions::sample(dims, susceptible.saturating_add(infected), rng)?;

        let strategy = EpidemicStrategy::new(Arc::new(defaults));
        let mut state = SpatialState::new(dims);
        for i in 0..susceptible + infected {
            let health = if i < susceptible { Health::Susceptible } else { Health::Infected };
            let agent = strategy.spawn(health, rng)?;
            state.add_occupant(cells.next_cell()?, agent)?;
        }

        debug!(model = MODEL_ID, %dims, susceptible, infected, ?defaults, "initialized state");
        Ok(state)
    }

    fn is_over(&self, _before: &Occupancy, after: &Occupancy) -> bool {
        after.count_of(Health::Infected.tag()) == 0
    }

    fn statistics(&self, state: &SpatialState) -> Statistics {
        let susceptible = state.count_of(Health::Susceptible.tag());
        let infected = state.count_of(Health::Infected.tag());
        let total = state.len();
        let share = if total == 0 { 0.0 } else { 100.0 * infected as f64 / total as f64 };

        Statistics::new()
            .with("susceptible", susceptible as f64)
            .with("infected", infected as f64)
            .with("total", total as f64)
            .with("infected_share", share)
    }
}
