//! `gs-core`: foundational types for the `gridsim` framework.
//!
//! This crate is a dependency of every other `gs-*` crate.  It intentionally
//! has no `gs-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`ids`]       | `AgentId`, `SessionId`                                  |
//! | [`geom`]      | `Pos`, `Dimensions`, `DirectionVector`                  |
//! | [`rng`]       | `SimRng` (seedable per-session RNG)                     |
//! | [`time`]      | `Tick`, `Throttle`, `SessionConfig`                     |
//! | [`stats`]     | `Statistics`                                            |
//! | [`error`]     | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geom;
pub mod ids;
pub mod rng;
pub mod stats;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geom::{Dimensions, DirectionVector, Pos};
pub use ids::{AgentId, SessionId};
pub use rng::SimRng;
pub use stats::Statistics;
pub use time::{SessionConfig, Throttle, Tick};
