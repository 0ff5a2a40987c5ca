//! Grid geometry: positions, grid dimensions, and movement directions.
//!
//! Positions are signed so that a candidate move may land outside the grid
//! before being checked or clamped; dimensions are unsigned and never zero.

use std::cmp::Ordering;
use std::fmt;

use crate::{CoreError, CoreResult, SimRng};

// ── Pos ───────────────────────────────────────────────────────────────────────

/// A grid cell coordinate.  Equality is by value.
///
/// Ordering is row-major (`y` first, then `x`).  That order is the canonical
/// iteration order of occupants in a spatial state.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move `steps` cells along the per-axis sign of `dir`.
    #[inline]
    pub fn step(self, dir: DirectionVector, steps: i32) -> Pos {
        let (dx, dy) = dir.normalized();
        Pos::new(self.x + dx * steps, self.y + dy * steps)
    }

    /// The eight surrounding cells (Moore neighbourhood), unfiltered.
    pub fn neighbours(self) -> impl Iterator<Item = Pos> {
        (-1..=1)
            .flat_map(move |dy| (-1..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .map(move |(dx, dy)| Pos::new(self.x + dx, self.y + dy))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── Dimensions ────────────────────────────────────────────────────────────────

/// Width and height of a grid.  Both are at least 1.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    width:  u32,
    height: u32,
}

impl Dimensions {
    /// Fails with [`CoreError::Config`] if either side is zero or does not fit
    /// in an `i32` coordinate.
    pub fn new(width: u32, height: u32) -> CoreResult<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::Config(format!(
                "grid dimensions must be non-zero, got {width}x{height}"
            )));
        }
        if width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(CoreError::Config(format!(
                "grid dimensions {width}x{height} exceed the coordinate range"
            )));
        }
        Ok(Self { width, height })
    }

    /// A `side` × `side` grid.
    pub fn square(side: u32) -> CoreResult<Self> {
        Self::new(side, side)
    }

    #[inline]
    pub fn width(self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(self) -> u32 {
        self.height
    }

    /// Number of cells.
    #[inline]
    pub fn capacity(self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// `true` if `pos` lies in `[0, width) × [0, height)`.
    #[inline]
    pub fn contains(self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Limit each axis of `pos` to `[0, side - 1]`.
    #[inline]
    pub fn clamp(self, pos: Pos) -> Pos {
        Pos::new(
            pos.x.clamp(0, self.width as i32 - 1),
            pos.y.clamp(0, self.height as i32 - 1),
        )
    }

    /// The cell at row-major `index`, or `None` past the last cell.
    pub fn pos_at(self, index: u64) -> Option<Pos> {
        if index >= self.capacity() {
            return None;
        }
        let w = self.width as u64;
        Some(Pos::new((index % w) as i32, (index / w) as i32))
    }

    /// Every cell of the grid in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Pos> {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..h).flat_map(move |y| (0..w).map(move |x| Pos::new(x, y)))
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

// ── DirectionVector ───────────────────────────────────────────────────────────

/// A movement direction.  Never `(0, 0)`.
///
/// Only the per-axis sign (see [`normalized`](Self::normalized)) is used for
/// stepping; the magnitude of each component is kept so that a direction can
/// be inspected and displayed as drawn.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectionVector {
    x: i32,
    y: i32,
}

impl DirectionVector {
    /// Largest absolute component drawn by [`random`](Self::random).
    pub const MAX_COMPONENT: i32 = 5;

    pub fn new(x: i32, y: i32) -> CoreResult<Self> {
        if x == 0 && y == 0 {
            return Err(CoreError::ZeroDirection);
        }
        Ok(Self { x, y })
    }

    /// Draw each component uniformly from `[-5, 5]`, re-drawing on `(0, 0)`.
    pub fn random(rng: &mut SimRng) -> Self {
        loop {
            let x = rng.gen_range(-Self::MAX_COMPONENT..=Self::MAX_COMPONENT);
            let y = rng.gen_range(-Self::MAX_COMPONENT..=Self::MAX_COMPONENT);
            if x != 0 || y != 0 {
                return Self { x, y };
            }
        }
    }

    #[inline]
    pub fn x(self) -> i32 {
        self.x
    }

    #[inline]
    pub fn y(self) -> i32 {
        self.y
    }

    /// Per-axis sign, each component in `{-1, 0, 1}` and not both zero.
    #[inline]
    pub fn normalized(self) -> (i32, i32) {
        (self.x.signum(), self.y.signum())
    }

    /// The same vector pointing the opposite way.
    #[inline]
    pub fn reversed(self) -> Self {
        Self { x: -self.x, y: -self.y }
    }
}

impl fmt::Display for DirectionVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.x, self.y)
    }
}
