//! `SpatialState`: the grid and its occupants.
//!
//! # Invariants
//!
//! - every occupied position lies inside the grid,
//! - no two occupants share a position,
//! - the id → position index mirrors the cell map exactly.
//!
//! Every mutating operation checks bounds and occupancy first and either
//! applies completely or returns an error without touching the state.
//! Violations are reported as invariant errors
//! ([`AgentError::is_invariant_violation`][crate::AgentError::is_invariant_violation]);
//! they indicate a bug in the calling strategy or model.
//!
//! # Iteration order
//!
//! Cells are kept in a `BTreeMap<Pos, _>`, so occupants iterate row-major
//! (see [`Pos`]'s `Ord`).  [`SpatialState::occupant_ids`] captures that order
//! as the per-tick snapshot.

use std::collections::BTreeMap;

#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashMap as IndexMap;
#[cfg(not(feature = "fx-hash"))]
use std::collections::HashMap as IndexMap;

use gs_core::{AgentId, Dimensions, Pos};

use crate::{Agent, AgentError, AgentResult};

struct Occupant {
    id:    AgentId,
    agent: Agent,
}

/// Grid dimensions plus the set of `(position, agent)` occupants.
pub struct SpatialState {
    dims:    Dimensions,
    cells:   BTreeMap<Pos, Occupant>,
    index:   IndexMap<AgentId, Pos>,
    next_id: AgentId,
}

impl SpatialState {
    /// An empty grid.
    pub fn new(dims: Dimensions) -> Self {
        Self {
            dims,
            cells:   BTreeMap::new(),
            index:   IndexMap::default(),
            next_id: AgentId(0),
        }
    }

    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Number of occupants.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Pure bounds check.
    #[inline]
    pub fn is_inside(&self, pos: Pos) -> bool {
        self.dims.contains(pos)
    }

    /// `true` iff `pos` has no occupant.  Fails for positions outside the grid.
    pub fn is_free(&self, pos: Pos) -> AgentResult<bool> {
        self.check_inside(pos)?;
        Ok(!self.cells.contains_key(&pos))
    }

    pub fn occupant(&self, pos: Pos) -> Option<&Agent> {
        self.cells.get(&pos).map(|o| &o.agent)
    }

    pub fn occupant_mut(&mut self, pos: Pos) -> Option<&mut Agent> {
        self.cells.get_mut(&pos).map(|o| &mut o.agent)
    }

    /// Id of the agent at `pos`, if any.
    pub fn id_at(&self, pos: Pos) -> Option<AgentId> {
        self.cells.get(&pos).map(|o| o.id)
    }

    /// Current position of agent `id`, or `None` if it is no longer placed.
    pub fn position_of(&self, id: AgentId) -> Option<Pos> {
        self.index.get(&id).copied()
    }

    /// All occupants in row-major order.
    pub fn occupants(&self) -> impl Iterator<Item = (Pos, &Agent)> + '_ {
        self.cells.iter().map(|(pos, o)| (*pos, &o.agent))
    }

    /// Ids of all current occupants in row-major order of their positions.
    ///
    /// The tick loop takes this snapshot once before any strategy runs.
    pub fn occupant_ids(&self) -> Vec<AgentId> {
        self.cells.values().map(|o| o.id).collect()
    }

    /// Every unoccupied cell in row-major order.
    pub fn free_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.dims.cells().filter(|p| !self.cells.contains_key(p))
    }

    /// Occupant count per type tag.
    pub fn count_by_type(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for o in self.cells.values() {
            *counts.entry(o.agent.agent_type().to_owned()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of occupants whose type tag is `agent_type`.
    pub fn count_of(&self, agent_type: &str) -> usize {
        self.cells.values().filter(|o| o.agent.agent_type() == agent_type).count()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Place `agent` at `pos` and return the id assigned to it.
    pub fn add_occupant(&mut self, pos: Pos, agent: Agent) -> AgentResult<AgentId> {
        self.check_vacant(pos)?;
        let id = self.allocate_id();
        self.cells.insert(pos, Occupant { id, agent });
        self.index.insert(id, pos);
        Ok(id)
    }

    /// Remove agent `id` from `pos`, failing if it is not the occupant there.
    pub fn remove_occupant(&mut self, pos: Pos, id: AgentId) -> AgentResult<Agent> {
        self.check_inside(pos)?;
        match self.cells.get(&pos) {
            None => return Err(AgentError::Vacant(pos)),
            Some(o) if o.id != id => return Err(AgentError::NotOccupant { pos, agent: id }),
            Some(_) => {}
        }
        self.index.remove(&id);
        self.cells
            .remove(&pos)
            .map(|o| o.agent)
            .ok_or(AgentError::Vacant(pos))
    }

    /// Swap the occupant at `pos` for `agent`.
    ///
    /// The newcomer gets a fresh id; the previous agent is returned.  The cell
    /// is never observable as empty.
    pub fn replace_occupant(&mut self, pos: Pos, agent: Agent) -> AgentResult<(AgentId, Agent)> {
        self.check_inside(pos)?;
        if !self.cells.contains_key(&pos) {
            return Err(AgentError::Vacant(pos));
        }
        let id = self.allocate_id();
        let old = self
            .cells
            .insert(pos, Occupant { id, agent })
            .ok_or(AgentError::Vacant(pos))?;
        self.index.remove(&old.id);
        self.index.insert(id, pos);
        Ok((id, old.agent))
    }

    /// Relocate the occupant of `from` to `to`.
    ///
    /// Fails if `from` is empty, `to` is outside the grid, or `to` is
    /// occupied (including `to == from`).
    pub fn move_occupant(&mut self, from: Pos, to: Pos) -> AgentResult<AgentId> {
        self.check_inside(from)?;
        if !self.cells.contains_key(&from) {
            return Err(AgentError::Vacant(from));
        }
        self.check_vacant(to)?;
        let occupant = self.cells.remove(&from).ok_or(AgentError::Vacant(from))?;
        let id = occupant.id;
        self.cells.insert(to, occupant);
        self.index.insert(id, to);
        Ok(id)
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn allocate_id(&mut self) -> AgentId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }

    fn check_inside(&self, pos: Pos) -> AgentResult<()> {
        if self.is_inside(pos) { Ok(()) } else { Err(AgentError::OutOfBounds(pos)) }
    }

    fn check_vacant(&self, pos: Pos) -> AgentResult<()> {
        self.check_inside(pos)?;
        if self.cells.contains_key(&pos) {
            return Err(AgentError::Occupied(pos));
        }
        Ok(())
    }
}

impl std::fmt::Debug for SpatialState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialState")
            .field("dims", &self.dims)
            .field("occupants", &self.cells.len())
            .finish()
    }
}
