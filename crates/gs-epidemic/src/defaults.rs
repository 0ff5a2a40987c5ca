use gs_agent::Parameters;
use gs_model::{ModelResult, require_int};

use crate::Health;
use crate::model::params;

/// Values given to agents created at runtime by infection or recovery.
///
/// Built once from the model's top-level parameters at initialization and
/// shared with the strategy, so a spawned agent never depends on which
/// agents happen to be alive.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct EpidemicDefaults {
    pub step_size_susceptible: i64,
    pub step_size_infected:    i64,
    pub infection_rate:        i64,
    pub recovery_rate:         i64,
}

impl EpidemicDefaults {
    pub fn from_params(p: &Parameters) -> ModelResult<Self> {
        Ok(Self {
            step_size_susceptible: require_int(p, params::STEP_SIZE_SUSCEPTIBLE)?,
            step_size_infected:    require_int(p, params::STEP_SIZE_INFECTED)?,
            infection_rate:        require_int(p, params::INFECTION_RATE)?,
            recovery_rate:         require_int(p, params::RECOVERY_RATE)?,
        })
    }

    pub fn step_size(&self, health: Health) -> i64 {
        match health {
            Health::Susceptible => self.step_size_susceptible,
            Health::Infected    => self.step_size_infected,
        }
    }

    /// Infection rate for susceptible agents, recovery rate for infected ones.
    pub fn rate(&self, health: Health) -> i64 {
        match health {
            Health::Susceptible => self.infection_rate,
            Health::Infected    => self.recovery_rate,
        }
    }
}
