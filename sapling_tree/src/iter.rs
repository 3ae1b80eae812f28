// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-order walking without an explicit stack, using parent back-references.

use crate::tree::SearchTree;
use crate::types::NodeId;

impl<K> SearchTree<K> {
    /// The leftmost (smallest) node, or `None` when empty.
    pub fn first(&self) -> Option<NodeId> {
        self.root().map(|root| self.leftmost(root))
    }

    /// The in-order successor of `id`.
    ///
    /// If `id` has a right subtree this is its leftmost node. Otherwise it is the
    /// first ancestor reached from a left child. Returns `None` for the maximum
    /// and for stale ids.
    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        if !self.is_alive(id) {
            return None;
        }
        if let Some(right) = self.node(id).right {
            return Some(self.leftmost(right));
        }
        let mut current = id;
        let mut parent = self.node(id).parent;
        while let Some(p) = parent {
            if self.node(p).right != Some(current) {
                break;
            }
            current = p;
            parent = self.node(p).parent;
        }
        parent
    }

    /// Iterate keys in ascending order.
    pub fn iter(&self) -> InOrder<'_, K> {
        InOrder {
            tree: self,
            next: self.first(),
        }
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left {
            id = left;
        }
        id
    }
}

/// Ascending walk over a [`SearchTree`], yielding `(NodeId, &K)`.
///
/// Created by [`SearchTree::iter`].
#[derive(Clone, Debug)]
pub struct InOrder<'a, K> {
    tree: &'a SearchTree<K>,
    next: Option<NodeId>,
}

impl<'a, K> Iterator for InOrder<'a, K> {
    type Item = (NodeId, &'a K);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.tree.successor(id);
        Some((id, &self.tree.node(id).key))
    }
}

impl<'a, K> IntoIterator for &'a SearchTree<K> {
    type Item = (NodeId, &'a K);
    type IntoIter = InOrder<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
