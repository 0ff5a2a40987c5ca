//! Health states and the parameter names agents carry.

use std::fmt;

use gs_agent::Agent;

/// Per-agent parameter names.
pub mod params {
    pub const STEP_SIZE:      &str = "step_size";
    pub const DIRECTION:      &str = "direction";
    pub const INFECTION_RATE: &str = "infection_rate";
    pub const RECOVERY_RATE:  &str = "recovery_rate";
}

/// Epidemic state of an agent, carried as its type tag.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Health {
    /// Tag `"P"`.
    Susceptible,
    /// Tag `"I"`.
    Infected,
}

impl Health {
    pub const fn tag(self) -> &'static str {
        match self {
            Health::Susceptible => "P",
            Health::Infected    => "I",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Health> {
        match tag {
            "P" => Some(Health::Susceptible),
            "I" => Some(Health::Infected),
            _   => None,
        }
    }

    /// Health of `agent`, or `None` for an agent that is not part of an
    /// epidemic population.
    pub fn of(agent: &Agent) -> Option<Health> {
        Health::from_tag(agent.agent_type())
    }

    /// The probability parameter that belongs to this state.
    pub const fn rate_param(self) -> &'static str {
        match self {
            Health::Susceptible => params::INFECTION_RATE,
            Health::Infected    => params::RECOVERY_RATE,
        }
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
