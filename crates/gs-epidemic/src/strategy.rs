//! Per-tick epidemic behavior.

use std::sync::Arc;

use gs_agent::{Agent, AgentBuilder, AgentError, AgentResult, Domain, ParamKind, SpatialState, Strategy};
use gs_core::{DirectionVector, Pos, SimRng};
use tracing::trace;

use crate::health::params;
use crate::{EpidemicDefaults, Health};

fn step_size_domain() -> Domain {
    Domain::int_range("step size (1-10)", 1..=10)
}

fn rate_domain(health: Health) -> Domain {
    match health {
        Health::Susceptible => Domain::int_range("infection chance per contact (0-100)", 0..=100),
        Health::Infected    => Domain::int_range("recovery chance per tick (0-100)", 0..=100),
    }
}

/// The strategy shared by every agent of one epidemic population.
///
/// Cloning is cheap; clones share the same [`EpidemicDefaults`].
#[derive(Clone, Debug)]
pub struct EpidemicStrategy {
    defaults: Arc<EpidemicDefaults>,
}

impl EpidemicStrategy {
    pub fn new(defaults: Arc<EpidemicDefaults>) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &EpidemicDefaults {
        &self.defaults
    }

    /// An agent of `health` whose step size and rate are still unset.
    ///
    /// Its direction defaults to a random one.
    pub fn blank(&self, health: Health, rng: &mut SimRng) -> AgentResult<Agent> {
        AgentBuilder::new(health.tag())
            .required_in(params::STEP_SIZE, ParamKind::Int, step_size_domain())
            .optional(params::DIRECTION, DirectionVector::random(rng))
            .required_in(health.rate_param(), ParamKind::Int, rate_domain(health))
            .shared_strategy(Arc::new(self.clone()))
            .build()
    }

    /// A fully configured agent of `health`.
    pub fn agent(&self, health: Health, step_size: i64, rate: i64, rng: &mut SimRng) -> AgentResult<Agent> {
        let mut agent = self.blank(health, rng)?;
        agent.set_param(params::STEP_SIZE, step_size)?;
        agent.set_param(health.rate_param(), rate)?;
        Ok(agent)
    }

    /// An agent of `health` configured from the population defaults.
    pub fn spawn(&self, health: Health, rng: &mut SimRng) -> AgentResult<Agent> {
        self.agent(health, self.defaults.step_size(health), self.defaults.rate(health), rng)
    }

    /// Contact between the agents at `a` and `b`: the susceptible one of the
    /// pair is infected with its own `infection_rate` as probability.
    fn contact(&self, state: &mut SpatialState, a: Pos, b: Pos, rng: &mut SimRng) -> AgentResult<()> {
        let target = [a, b]
            .into_iter()
            .find(|&p| state.occupant(p).and_then(Health::of) == Some(Health::Susceptible));
        let Some(target) = target else {
            return Ok(());
        };
        let rate = occupant(state, target)?.int_param(params::INFECTION_RATE)?;
        if rng.roll_percent(rate) {
            let infected = self.spawn(Health::Infected, rng)?;
            state.replace_occupant(target, infected)?;
            trace!(pos = %target, "infected");
        }
        Ok(())
    }
}

impl Strategy for EpidemicStrategy {
    fn act(&self, state: &mut SpatialState, pos: Pos, rng: &mut SimRng) -> AgentResult<()> {
        let agent = occupant(state, pos)?;
        // Agents of other populations are left alone.
        let Some(health) = Health::of(agent) else {
            return Ok(());
        };
        let step_size = agent.int_param(params::STEP_SIZE)?;
        let own_rate = agent.int_param(health.rate_param())?;
        let steps = i32::try_from(step_size).map_err(|_| AgentError::OutOfDomain {
            name:        params::STEP_SIZE.to_owned(),
            description: step_size_domain().description().to_owned(),
        })?;

        let mut dir = DirectionVector::random(rng);
        set_direction(state, pos, dir)?;

        if health == Health::Infected && rng.roll_percent(own_rate) {
            let recovered = self.spawn(Health::Susceptible, rng)?;
            state.replace_occupant(pos, recovered)?;
            trace!(pos = %pos, "recovered");
            return Ok(());
        }

        let dims = state.dimensions();
        let mut target = pos.step(dir, steps);
        if !dims.contains(target) {
            dir = dir.reversed();
            set_direction(state, pos, dir)?;
            target = dims.clamp(pos.step(dir, steps));
        }

        // The clamped target may be `pos` itself, which counts as same-type.
        // Occupants of other populations block like same-type ones.
        match state.occupant(target).map(Health::of) {
            Some(Some(other)) if other != health => {
                return self.contact(state, pos, target, rng);
            }
            Some(_) => {
                dir = DirectionVector::random(rng);
                set_direction(state, pos, dir)?;
                target = dims.clamp(pos.step(dir, steps));
            }
            None => {}
        }

        if state.is_free(target)? {
            state.move_occupant(pos, target)?;
        }
        Ok(())
    }
}

fn occupant(state: &SpatialState, pos: Pos) -> AgentResult<&Agent> {
    state.occupant(pos).ok_or(AgentError::Vacant(pos))
}

fn set_direction(state: &mut SpatialState, pos: Pos, dir: DirectionVector) -> AgentResult<()> {
    state
        .occupant_mut(pos)
        .ok_or(AgentError::Vacant(pos))?
        .set_param(params::DIRECTION, dir)
}
