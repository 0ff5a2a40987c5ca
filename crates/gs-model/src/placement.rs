//! Initial placement of agents on unique cells.

use gs_core::{Dimensions, Pos, SimRng};

use crate::{ModelError, ModelResult};

/// Hands out distinct grid cells in random order.
///
/// Only the cells that will be handed out are drawn, so a sparse population
/// on a huge grid stays cheap.  No cell is ever returned twice.
#[derive(Debug, Clone)]
pub struct UniquePositions {
    remaining: Vec<Pos>,
}

impl UniquePositions {
    /// `count` distinct cells of a `dims` grid.  Fails with
    /// [`ModelError::Capacity`] if they do not fit.
    pub fn sample(dims: Dimensions, count: u64, rng: &mut SimRng) -> ModelResult<Self> {
        check_capacity(dims, count)?;
        let capacity = dims.capacity();
        let too_large = || ModelError::Capacity { requested: count, capacity };
        let length = usize::try_from(capacity).map_err(|_| too_large())?;
        let amount = usize::try_from(count).map_err(|_| too_large())?;

        let remaining = rng
            .sample_indices(length, amount)
            .ok_or_else(too_large)?
            .into_iter()
            .filter_map(|i| dims.pos_at(i as u64))
            .collect();
        Ok(Self { remaining })
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Next cell, or [`ModelError::Capacity`] once every drawn cell is taken.
    pub fn next_cell(&mut self) -> ModelResult<Pos> {
        self.remaining.pop().ok_or(ModelError::Capacity { requested: 1, capacity: 0 })
    }
}

impl Iterator for UniquePositions {
    type Item = Pos;

    fn next(&mut self) -> Option<Pos> {
        self.remaining.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining.len(), Some(self.remaining.len()))
    }
}

/// Fail with [`ModelError::Capacity`] if `requested` agents do not fit `dims`.
pub fn check_capacity(dims: Dimensions, requested: u64) -> ModelResult<()> {
    let capacity = dims.capacity();
    if requested > capacity {
        return Err(ModelError::Capacity { requested, capacity });
    }
    Ok(())
}
