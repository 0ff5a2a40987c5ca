//! Typed, optionally domain-constrained parameters.
//!
//! # Design
//!
//! A [`Parameter`] is declared with a name and a [`ParamKind`].  A *required*
//! parameter starts without a value and stays unresolved until a caller sets
//! it; an *optional* parameter is declared with a default value.  Every set is
//! checked against the declared kind and, if present, the parameter's
//! [`Domain`] predicate.  A rejected set leaves the previous value in place.
//!
//! The same [`Parameters`] container serves agent parameter sets and model
//! top-level schemas.
//!
//! # Usage
//!
//! ```rust
//! use gs_agent::{Domain, ParamKind, Parameter, Parameters};
//!
//! let mut p = Parameters::new();
//! p.declare(Parameter::required("size", ParamKind::Int)
//!     .with_domain(Domain::int_range("grid side (1-100)", 1..=100)));
//! assert!(!p.is_resolved());
//!
//! assert!(p.set("size", 0).is_err());
//! p.set("size", 20).unwrap();
//! assert_eq!(p.int("size").unwrap(), 20);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::Arc;

use gs_core::DirectionVector;

use crate::{AgentError, AgentResult};

// ── Kinds and values ──────────────────────────────────────────────────────────

/// The type of a parameter.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ParamKind {
    Int,
    Bool,
    Text,
    Direction,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParamKind::Int       => "int",
            ParamKind::Bool      => "bool",
            ParamKind::Text      => "text",
            ParamKind::Direction => "direction",
        };
        f.write_str(s)
    }
}

/// A parameter value.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ParamValue {
    Int(i64),
    Bool(bool),
    Text(String),
    Direction(DirectionVector),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Int(_)       => ParamKind::Int,
            ParamValue::Bool(_)      => ParamKind::Bool,
            ParamValue::Text(_)      => ParamKind::Text,
            ParamValue::Direction(_) => ParamKind::Direction,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_direction(&self) -> Option<DirectionVector> {
        match self {
            ParamValue::Direction(d) => Some(*d),
            _ => None,
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(v.into())
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

impl From<DirectionVector> for ParamValue {
    fn from(v: DirectionVector) -> Self {
        ParamValue::Direction(v)
    }
}

// ── Domain ────────────────────────────────────────────────────────────────────

type Predicate = Arc<dyn Fn(&ParamValue) -> bool + Send + Sync>;

/// A validation predicate with a human-readable description.
#[derive(Clone)]
pub struct Domain {
    description: String,
    predicate:   Predicate,
}

impl Domain {
    pub fn new(
        description: impl Into<String>,
        predicate: impl Fn(&ParamValue) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self { description: description.into(), predicate: Arc::new(predicate) }
    }

    /// Accepts integers inside `range` (inclusive).  Rejects other kinds.
    pub fn int_range(description: impl Into<String>, range: RangeInclusive<i64>) -> Self {
        Self::new(description, move |v| v.as_int().is_some_and(|i| range.contains(&i)))
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn accepts(&self, value: &ParamValue) -> bool {
        (self.predicate)(value)
    }
}

impl fmt::Debug for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Domain").field("description", &self.description).finish_non_exhaustive()
    }
}

// ── Parameter ─────────────────────────────────────────────────────────────────

/// A named, typed parameter.
#[derive(Clone, Debug)]
pub struct Parameter {
    name:     String,
    kind:     ParamKind,
    value:    Option<ParamValue>,
    domain:   Option<Domain>,
    required: bool,
}

impl Parameter {
    /// A parameter that stays unresolved until a value is set.
    pub fn required(name: impl Into<String>, kind: ParamKind) -> Self {
        Self { name: name.into(), kind, value: None, domain: None, required: true }
    }

    /// A parameter with a default value; its kind is taken from the value.
    pub fn optional(name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        let value = value.into();
        Self { name: name.into(), kind: value.kind(), value: Some(value), domain: None, required: false }
    }

    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = Some(domain);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    pub fn value(&self) -> Option<&ParamValue> {
        self.value.as_ref()
    }

    pub fn domain(&self) -> Option<&Domain> {
        self.domain.as_ref()
    }

    /// Declared as required (regardless of whether it has been set since).
    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_resolved(&self) -> bool {
        self.value.is_some()
    }

    /// Check `value` against this parameter's kind and domain without
    /// storing it.
    pub fn validate(&self, value: &ParamValue) -> AgentResult<()> {
        if value.kind() != self.kind {
            return Err(AgentError::KindMismatch {
                name:     self.name.clone(),
                expected: self.kind,
                got:      value.kind(),
            });
        }
        if let Some(domain) = &self.domain
            && !domain.accepts(value)
        {
            return Err(AgentError::OutOfDomain {
                name:        self.name.clone(),
                description: domain.description.clone(),
            });
        }
        Ok(())
    }

    pub fn set(&mut self, value: impl Into<ParamValue>) -> AgentResult<()> {
        let value = value.into();
        self.validate(&value)?;
        self.value = Some(value);
        Ok(())
    }
}

// ── Parameters ────────────────────────────────────────────────────────────────

/// A set of parameters keyed (and iterated) by name.
#[derive(Clone, Debug, Default)]
pub struct Parameters {
    params: BTreeMap<String, Parameter>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration, replacing any earlier one with the same name.
    pub fn declare(&mut self, param: Parameter) {
        self.params.insert(param.name.clone(), param);
    }

    /// Builder-style [`declare`](Self::declare).
    pub fn with(mut self, param: Parameter) -> Self {
        self.declare(param);
        self
    }

    /// Set a declared parameter.  Unknown names, wrong kinds, and values
    /// outside the domain are rejected.
    pub fn set(&mut self, name: &str, value: impl Into<ParamValue>) -> AgentResult<()> {
        self.params
            .get_mut(name)
            .ok_or_else(|| AgentError::UnknownParameter(name.to_owned()))?
            .set(value)
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.params.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name).and_then(Parameter::value)
    }

    /// Resolved value of `name`, failing if the parameter is undeclared or
    /// still unset.
    pub fn resolved(&self, name: &str) -> AgentResult<&ParamValue> {
        let param = self
            .params
            .get(name)
            .ok_or_else(|| AgentError::UnknownParameter(name.to_owned()))?;
        param.value().ok_or_else(|| AgentError::Unresolved(vec![name.to_owned()]))
    }

    pub fn int(&self, name: &str) -> AgentResult<i64> {
        let value = self.resolved(name)?;
        value.as_int().ok_or_else(|| kind_mismatch(name, ParamKind::Int, value))
    }

    pub fn direction(&self, name: &str) -> AgentResult<DirectionVector> {
        let value = self.resolved(name)?;
        value.as_direction().ok_or_else(|| kind_mismatch(name, ParamKind::Direction, value))
    }

    /// Names of parameters that still have no value, in name order.
    pub fn unresolved(&self) -> Vec<String> {
        self.params
            .values()
            .filter(|p| !p.is_resolved())
            .map(|p| p.name.clone())
            .collect()
    }

    pub fn is_resolved(&self) -> bool {
        self.params.values().all(Parameter::is_resolved)
    }

    /// Fails with [`AgentError::Unresolved`] listing every unset parameter.
    pub fn ensure_resolved(&self) -> AgentResult<()> {
        let missing = self.unresolved();
        if missing.is_empty() { Ok(()) } else { Err(AgentError::Unresolved(missing)) }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> + '_ {
        self.params.values()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

fn kind_mismatch(name: &str, expected: ParamKind, got: &ParamValue) -> AgentError {
    AgentError::KindMismatch { name: name.to_owned(), expected, got: got.kind() }
}
