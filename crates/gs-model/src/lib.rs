//! `gs-model`: the model abstraction shared by every simulation type.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`model`]     | `Model` trait, typed parameter readers                      |
//! | [`occupancy`] | `Occupancy`: position → type snapshot of a state           |
//! | [`tick`]      | `run_tick`: snapshot-then-invoke tick orchestration        |
//! | [`placement`] | `UniquePositions` allocator, capacity check                 |
//! | [`schelling`] | `SchellingModel`: segregation dynamics                     |
//! | [`error`]     | `ModelError`, `ModelResult<T>`                              |
//!
//! # Tick semantics
//!
//! A tick takes one snapshot of occupant ids (row-major order of their
//! positions) before any strategy runs, then invokes each still-placed
//! agent's strategy once at its *current* position.  Agents replaced or
//! removed earlier in the same tick are skipped; agents created during the
//! tick first act on the next one.

pub mod error;
pub mod model;
pub mod occupancy;
pub mod placement;
pub mod schelling;
pub mod tick;


pub use error::{ModelError, ModelResult};
pub use model::{Model, require_count, require_int, require_resolved};
pub use occupancy::Occupancy;
pub use placement::{UniquePositions, check_capacity};
pub use schelling::SchellingModel;
pub use tick::run_tick;
