//! `gs-epidemic`: susceptible/infected agents moving on a grid.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`health`]   | `Health` (tag mapping), per-agent parameter names             |
//! | [`defaults`] | `EpidemicDefaults`: population defaults for spawned agents   |
//! | [`strategy`] | `EpidemicStrategy`: move / infect / recover per tick         |
//! | [`model`]    | `EpidemicModel`: schema, initializer, exit predicate, stats  |
//!
//! # Agent behavior
//!
//! Every tick an agent draws a fresh direction.  An infected agent may then
//! recover; otherwise the agent tries to step `step_size` cells along the
//! direction's per-axis sign.  A step off the grid is reflected once and
//! clamped, a step onto a different-type agent is a contact (the susceptible
//! party may become infected) and a step onto a same-type agent re-rolls the
//! direction once.  At most one of recover, infect and move happens per agent
//! per tick.
//!
//! Health changes never mutate an agent in place: the occupant is replaced by
//! a freshly built agent of the new type, configured from
//! [`EpidemicDefaults`].

pub mod defaults;
pub mod health;
pub mod model;
pub mod strategy;


pub use defaults::EpidemicDefaults;
pub use health::Health;
pub use model::EpidemicModel;
pub use strategy::EpidemicStrategy;
