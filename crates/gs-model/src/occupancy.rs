//! `Occupancy`: a detached position → type-tag view of a spatial state.
//!
//! Cheap to compare and clone; used for exit predicates (before/after a
//! tick) and as the occupant map of an output snapshot.

use std::collections::BTreeMap;

use gs_agent::SpatialState;
use gs_core::Pos;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Occupancy(BTreeMap<Pos, String>);

impl Occupancy {
    /// Record the type of every occupant of `state`.
    pub fn capture(state: &SpatialState) -> Self {
        Occupancy(
            state
                .occupants()
                .map(|(pos, agent)| (pos, agent.agent_type().to_owned()))
                .collect(),
        )
    }

    pub fn get(&self, pos: Pos) -> Option<&str> {
        self.0.get(&pos).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(position, type)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, &str)> + '_ {
        self.0.iter().map(|(p, t)| (*p, t.as_str()))
    }

    pub fn count_of(&self, agent_type: &str) -> usize {
        self.0.values().filter(|t| *t == agent_type).count()
    }

    pub fn as_map(&self) -> &BTreeMap<Pos, String> {
        &self.0
    }
}

impl FromIterator<(Pos, String)> for Occupancy {
    fn from_iter<I: IntoIterator<Item = (Pos, String)>>(iter: I) -> Self {
        Occupancy(iter.into_iter().collect())
    }
}

// Positions are not valid map keys in most self-describing formats, so the
// map travels as a sequence of `[pos, type]` pairs.
#[cfg(feature = "serde")]
impl serde::Serialize for Occupancy {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Occupancy {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pairs = <Vec<(Pos, String)> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}
