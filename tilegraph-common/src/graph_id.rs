//! Endpoint identifier for nodes and edges in a tiled graph.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const LEVEL_BITS: u32 = 3;
const TILE_ID_BITS: u32 = 22;
const INDEX_BITS: u32 = 21;

/// Total width of a packed graph id.
pub const GRAPH_ID_BITS: u32 = LEVEL_BITS + TILE_ID_BITS + INDEX_BITS;

pub const MAX_LEVEL: u32 = (1 << LEVEL_BITS) - 1;
pub const MAX_TILE_ID: u32 = (1 << TILE_ID_BITS) - 1;
pub const MAX_INDEX: u32 = (1 << INDEX_BITS) - 1;

/// Identifies an object by hierarchy level, tile and index within the tile.
///
/// Packed as `level | tile_id << 3 | index << 25` in the low 46 bits of a
/// `u64`, which is the width an edge record reserves for its end node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(into = "GraphIdParts", try_from = "GraphIdParts")]
pub struct GraphId(u64);

impl GraphId {
    /// Builds an id from its components.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGraphId`] if any component exceeds its width.
    pub fn new(tile_id: u32, level: u32, index: u32) -> Result<Self> {
        check("level", level, MAX_LEVEL)?;
        check("tile_id", tile_id, MAX_TILE_ID)?;
        check("index", index, MAX_INDEX)?;
        Ok(Self(
            u64::from(level)
                | u64::from(tile_id) << LEVEL_BITS
                | u64::from(index) << (LEVEL_BITS + TILE_ID_BITS),
        ))
    }

    /// Wraps an already packed value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGraphId`] if bits above the 46-bit id are set.
    pub fn try_from_raw(value: u64) -> Result<Self> {
        let max = (1u64 << GRAPH_ID_BITS) - 1;
        if value > max {
            return Err(Error::InvalidGraphId {
                component: "value",
                value,
                max,
            });
        }
        Ok(Self(value))
    }

    /// Wraps a packed value read from a 46-bit field, ignoring higher bits.
    #[inline]
    pub const fn from_packed(value: u64) -> Self {
        Self(value & ((1 << GRAPH_ID_BITS) - 1))
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn level(&self) -> u32 {
        (self.0 & MAX_LEVEL as u64) as u32
    }

    #[inline]
    pub const fn tile_id(&self) -> u32 {
        ((self.0 >> LEVEL_BITS) & MAX_TILE_ID as u64) as u32
    }

    #[inline]
    pub const fn index(&self) -> u32 {
        ((self.0 >> (LEVEL_BITS + TILE_ID_BITS)) & MAX_INDEX as u64) as u32
    }

    /// The id of the tile this object lives in (index zeroed).
    pub const fn tile_base(&self) -> Self {
        Self(self.0 & ((1 << (LEVEL_BITS + TILE_ID_BITS)) - 1))
    }
}

fn check(component: &'static str, value: u32, max: u32) -> Result<()> {
    if value > max {
        return Err(Error::InvalidGraphId {
            component,
            value: u64::from(value),
            max: u64::from(max),
        });
    }
    Ok(())
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.level(), self.tile_id(), self.index())
    }
}

/// Serialized projection of a [`GraphId`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct GraphIdParts {
    level: u32,
    tile_id: u32,
    id: u32,
    #[serde(default)]
    value: Option<u64>,
}

impl From<GraphId> for GraphIdParts {
    fn from(id: GraphId) -> Self {
        Self {
            level: id.level(),
            tile_id: id.tile_id(),
            id: id.index(),
            value: Some(id.value()),
        }
    }
}

impl TryFrom<GraphIdParts> for GraphId {
    type Error = Error;

    fn try_from(parts: GraphIdParts) -> Result<Self> {
        let id = GraphId::new(parts.tile_id, parts.level, parts.id)?;
        match parts.value {
            Some(value) if value != id.value() => Err(Error::InvalidGraphId {
                component: "value",
                value,
                max: id.value(),
            }),
            _ => Ok(id),
        }
    }
}
