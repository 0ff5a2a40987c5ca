//! Fluent builder for constructing an [`Agent`].
//!
//! # Usage
//!
//! ```rust
//! use gs_agent::{AgentBuilder, AgentResult, Domain, ParamKind, SpatialState};
//! use gs_core::{Pos, SimRng};
//!
//! let mut agent = AgentBuilder::new("P")
//!     .required_in("step_size", ParamKind::Int, Domain::int_range("step (1-10)", 1..=10))
//!     .optional("label", "walker")
//!     .strategy(|_s: &mut SpatialState, _p: Pos, _r: &mut SimRng| -> AgentResult<()> { Ok(()) })
//!     .build()
//!     .unwrap();
//!
//! // Required parameters must be set before the strategy may run.
//! assert!(agent.ready_strategy().is_err());
//! agent.set_param("step_size", 3).unwrap();
//! assert!(agent.ready_strategy().is_ok());
//! ```

use std::sync::Arc;

use crate::{Agent, AgentError, AgentResult, Domain, ParamKind, ParamValue, Parameter, Parameters, Strategy};

/// Fluent builder for [`Agent`].
///
/// Parameters are declared up front; required ones stay unresolved until
/// set on the built agent.  Exactly one strategy must be supplied.
pub struct AgentBuilder {
    agent_type: String,
    params:     Parameters,
    strategy:   Option<Arc<dyn Strategy>>,
}

impl AgentBuilder {
    pub fn new(agent_type: impl Into<String>) -> Self {
        Self {
            agent_type: agent_type.into(),
            params:     Parameters::new(),
            strategy:   None,
        }
    }

    /// Declare an arbitrary [`Parameter`].
    pub fn param(mut self, param: Parameter) -> Self {
        self.params.declare(param);
        self
    }

    pub fn required(self, name: &str, kind: ParamKind) -> Self {
        self.param(Parameter::required(name, kind))
    }

    pub fn required_in(self, name: &str, kind: ParamKind, domain: Domain) -> Self {
        self.param(Parameter::required(name, kind).with_domain(domain))
    }

    pub fn optional(self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.param(Parameter::optional(name, value))
    }

    pub fn optional_in(self, name: &str, value: impl Into<ParamValue>, domain: Domain) -> Self {
        self.param(Parameter::optional(name, value).with_domain(domain))
    }

    /// Set the strategy.  Calling this twice keeps the last one.
    pub fn strategy<S: Strategy>(mut self, strategy: S) -> Self {
        self.strategy = Some(Arc::new(strategy));
        self
    }

    /// Set a strategy that is already shared with other agents.
    pub fn shared_strategy(mut self, strategy: Arc<dyn Strategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Construct the agent.
    ///
    /// Fails with [`AgentError::MissingStrategy`] if no strategy was given,
    /// or with [`AgentError::OutOfDomain`] if an optional default violates its
    /// own domain.
    pub fn build(self) -> AgentResult<Agent> {
        let strategy = self.strategy.ok_or(AgentError::MissingStrategy)?;
        for param in self.params.iter() {
            if let Some(value) = param.value() {
                param.validate(value)?;
            }
        }
        Ok(Agent::new(self.agent_type, self.params, strategy))
    }
}
