//! `gs-agent`: agents and the spatial state they occupy.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`param`]   | `ParamKind`, `ParamValue`, `Domain`, `Parameter`, `Parameters` |
//! | [`agent`]   | `Agent`, `Strategy` trait                                    |
//! | [`builder`] | `AgentBuilder` (fluent construction)                         |
//! | [`state`]   | `SpatialState`: grid occupancy with bounds/overlap checks   |
//! | [`error`]   | `AgentError`, `AgentResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | FxHash for the id → position index in `SpatialState`.      |
//! | `serde`   | Derives `Serialize`/`Deserialize` on gs-core types.        |
//!
//! # Ownership model
//!
//! A `SpatialState` owns its agents.  Strategies are shared behind
//! `Arc<dyn Strategy>` so the tick loop can clone a strategy handle out of an
//! agent and then hand the strategy `&mut SpatialState` without aliasing the
//! agent it came from.

pub mod agent;
pub mod builder;
pub mod error;
pub mod param;
pub mod state;

#[cfg(test)]
mod tests;

pub use agent::{Agent, Strategy};
pub use builder::AgentBuilder;
pub use error::{AgentError, AgentResult};
pub use param::{Domain, ParamKind, ParamValue, Parameter, Parameters};
pub use state::SpatialState;
