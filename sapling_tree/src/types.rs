// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the search tree: node identifiers, visual status, and branch sides.

/// Identifier for a node in the tree (generational).
///
/// Ids stay valid until the node they name is deleted. After that the slot may
/// be reused, but the generation is bumped so the old id is reported as stale.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

/// Transient visual marker placed on the node an operation is currently visiting.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeStatus {
    /// Not involved in the running operation.
    #[default]
    None,
    /// Visited by an insert.
    Insert,
    /// Visited by a search.
    Search,
    /// Visited by a delete (and, on a match, about to be removed).
    Delete,
}

/// Which child link of a parent a node hangs from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// The left (smaller keys) child.
    Left,
    /// The right (greater or equal keys) child.
    Right,
}

impl Side {
    /// Horizontal sign of this side in the layout: `-1.0` for left, `1.0` for right.
    pub const fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}
