//! `gs-sim`: throttled, single-flight simulation sessions.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`session`]    | `Simulation`: one model + state with the stepping protocol |
//! | [`controller`] | `SessionController`: registry of sessions                 |
//! | [`snapshot`]   | `SimulationSnapshot`: output record of a step             |
//! | [`handle`]     | `TickHandle`: future for a tick computed on rayon         |
//! | [`error`]      | `SimError`, `SimResult<T>`                                 |
//!
//! # Step flow
//!
//! ```text
//! step(id)
//!   ① lookup    : clone the session's Arc out of the registry.
//!   ② admission : fail with NotRunning / AlreadyCalculating.
//!   ③ throttle  : add one clock granularity; no tick until the interval
//!                  has elapsed (or ever again once the run is over).
//!   ④ tick      : Model::tick on the session's state and RNG.
//!   ⑤ output    : exit predicate over (before, after) occupancy,
//!                  statistics, snapshot.
//! ```
//!
//! `step_async` performs ① and ② on the caller's thread and ③–⑤ on the
//! rayon pool, then completes the returned [`TickHandle`].
//!
//! # Cargo features
//!
//! | Feature   | Effect                                               |
//! |-----------|------------------------------------------------------|
//! | `serde`   | `Serialize`/`Deserialize` for `SimulationSnapshot`.  |
//! | `fx-hash` | FxHash for agent indices in spatial states.          |

pub mod controller;
pub mod error;
pub mod handle;
pub mod session;
pub mod snapshot;


pub use controller::SessionController;
pub use error::{SimError, SimResult};
pub use handle::TickHandle;
pub use session::Simulation;
pub use snapshot::SimulationSnapshot;
