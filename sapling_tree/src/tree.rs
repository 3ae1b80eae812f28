// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: slot arena, structural insert/delete, queries.

use alloc::{vec, vec::Vec};
use core::cmp::Ordering;
use kurbo::Point;

use crate::types::{NodeId, NodeStatus, Side};

/// Unbalanced binary search tree whose nodes carry an on-screen position.
///
/// Nodes live in a slot arena and are addressed by generational [`NodeId`]s.
/// Child links are owned by the parent's slot; the parent link is a plain
/// back-reference used for upward walks and relinking.
///
/// Keys that compare equal are never merged: insertion routes them to the
/// right, so duplicates become right descendants.
///
/// Structural changes do not move nodes. They mark the layout dirty, and the
/// next [`SearchTree::update_layout`] assigns new target positions which
/// [`SearchTree::ease`] then approaches frame by frame.
///
/// ## Example
///
/// ```rust
/// use kurbo::Point;
/// use sapling_tree::{SearchTree, Side};
///
/// let mut tree = SearchTree::new();
/// let root = tree.insert_root(50, Point::ORIGIN).unwrap();
/// let left = tree.insert_child(root, Side::Left, 25).unwrap();
///
/// assert_eq!(tree.parent_of(left), Some(root));
/// assert_eq!(tree.structural_delete(root), Some(50));
/// assert_eq!(tree.root(), Some(left));
/// assert_eq!(tree.len(), 1);
/// ```
#[derive(Clone)]
pub struct SearchTree<K> {
    /// slots
    nodes: Vec<Option<Node<K>>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    root: Option<NodeId>,
    len: usize,
    pub(crate) layout_dirty: bool,
}

impl<K> core::fmt::Debug for SearchTree<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let free = self.free_list.len();
        f.debug_struct("SearchTree")
            .field("nodes_total", &total)
            .field("nodes_alive", &self.len)
            .field("free_list", &free)
            .field("root", &self.root)
            .field("layout_dirty", &self.layout_dirty)
            .finish_non_exhaustive()
    }
}

impl<K> Default for SearchTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    generation: u32,
    pub(crate) key: K,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) position: Point,
    pub(crate) target: Point,
    pub(crate) moving: bool,
    pub(crate) status: NodeStatus,
}

impl<K> Node<K> {
    fn new(generation: u32, key: K, position: Point) -> Self {
        Self {
            generation,
            key,
            parent: None,
            left: None,
            right: None,
            position,
            target: position,
            moving: false,
            status: NodeStatus::None,
        }
    }

    pub(crate) fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Read-only snapshot of one node, as consumed by a renderer.
#[derive(Debug)]
pub struct NodeView<'a, K> {
    /// The node.
    pub id: NodeId,
    /// Its key.
    pub key: &'a K,
    /// Current (eased) position.
    pub position: Point,
    /// Position the node is easing toward.
    pub target: Point,
    /// Whether the node has not reached its target yet.
    pub moving: bool,
    /// Visual marker of the running operation.
    pub status: NodeStatus,
    /// Current position of the parent, for drawing the connecting edge.
    pub parent_position: Option<Point>,
}

// Only `&K` is held, so no bound on `K`.
impl<K> Clone for NodeView<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NodeView<'_, K> {}

impl<K> SearchTree<K> {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: None,
            len: 0,
            layout_dirty: false,
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The root node, if any.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Release every node.
    ///
    /// All previously handed out ids become stale.
    pub fn clear(&mut self) {
        for (idx, slot) in self.nodes.iter_mut().enumerate() {
            if slot.take().is_some() {
                self.free_list.push(idx);
            }
        }
        self.root = None;
        self.len = 0;
        self.layout_dirty = false;
    }

    /// Create the root node at `position`.
    ///
    /// Returns `None` (dropping `key`) if the tree already has a root.
    pub fn insert_root(&mut self, key: K, position: Point) -> Option<NodeId> {
        if self.root.is_some() {
            return None;
        }
        let id = self.alloc(key, position);
        self.root = Some(id);
        self.len += 1;
        self.layout_dirty = true;
        Some(id)
    }

    /// Create a new leaf as the `side` child of `parent`.
    ///
    /// The leaf spawns at the parent's current position and eases into its
    /// layout slot afterwards. No ordering check is made here; callers pick the
    /// side by comparing keys. Returns `None` (dropping `key`) if `parent` is
    /// stale or already has a child on that side.
    pub fn insert_child(&mut self, parent: NodeId, side: Side, key: K) -> Option<NodeId> {
        let spawn = {
            let p = self.node_opt(parent)?;
            if p.child(side).is_some() {
                return None;
            }
            p.position
        };
        let id = self.alloc(key, spawn);
        *self.node_mut(parent).child_mut(side) = Some(id);
        self.node_mut(id).parent = Some(parent);
        self.len += 1;
        self.layout_dirty = true;
        Some(id)
    }

    /// Remove the node `id` from the tree and return the key it held.
    ///
    /// - A leaf is detached from its parent.
    /// - A node with one child is replaced by that child.
    /// - A node with two children keeps its identity: it takes over the key and
    ///   current position of its in-order successor, and the successor (which
    ///   has no left child) is removed from its own place instead.
    ///
    /// In the last case `id` stays alive; otherwise it becomes stale.
    /// Returns `None` if `id` is stale.
    pub fn structural_delete(&mut self, id: NodeId) -> Option<K> {
        let (left, right) = {
            let n = self.node_opt(id)?;
            (n.left, n.right)
        };
        let removed = if left.is_some() && right.is_some() {
            let Some(successor) = self.successor(id) else {
                unreachable!("a node with a right child has a successor");
            };
            let (key, position) = self.splice_out(successor);
            let node = self.node_mut(id);
            node.position = position;
            node.moving = node.position != node.target;
            core::mem::replace(&mut node.key, key)
        } else {
            self.splice_out(id).0
        };
        self.len -= 1;
        self.layout_dirty = true;
        Some(removed)
    }

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some()
    }

    /// The key of a live node.
    pub fn key(&self, id: NodeId) -> Option<&K> {
        self.node_opt(id).map(|n| &n.key)
    }

    /// The parent of a live node, or `None` for the root or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// The child of a live node on the given side.
    pub fn child_of(&self, id: NodeId, side: Side) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.child(side))
    }

    /// Current position of a live node.
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.node_opt(id).map(|n| n.position)
    }

    /// Target position of a live node.
    pub fn target_position(&self, id: NodeId) -> Option<Point> {
        self.node_opt(id).map(|n| n.target)
    }

    /// Visual marker of a live node.
    pub fn status(&self, id: NodeId) -> Option<NodeStatus> {
        self.node_opt(id).map(|n| n.status)
    }

    /// Snapshot of a live node for rendering.
    pub fn view(&self, id: NodeId) -> Option<NodeView<'_, K>> {
        let n = self.node_opt(id)?;
        Some(NodeView {
            id,
            key: &n.key,
            position: n.position,
            target: n.target,
            moving: n.moving,
            status: n.status,
            parent_position: n.parent.map(|p| self.node(p).position),
        })
    }

    /// Number of levels in the tree; `0` when empty.
    pub fn depth(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };
        let mut deepest = 0;
        let mut stack = vec![(root, 1_usize)];
        while let Some((id, level)) = stack.pop() {
            deepest = deepest.max(level);
            let n = self.node(id);
            stack.extend(n.left.map(|c| (c, level + 1)));
            stack.extend(n.right.map(|c| (c, level + 1)));
        }
        deepest
    }

    /// Smallest key, or `None` when empty.
    pub fn minimum(&self) -> Option<&K> {
        self.first().map(|id| &self.node(id).key)
    }

    /// Largest key, or `None` when empty.
    pub fn maximum(&self) -> Option<&K> {
        let mut id = self.root?;
        while let Some(right) = self.node(id).right {
            id = right;
        }
        Some(&self.node(id).key)
    }

    /// Node ids in root-left-right order.
    pub fn preorder_ids(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            let n = self.node(id);
            // Right first so the left subtree is visited first.
            stack.extend(n.right);
            stack.extend(n.left);
        }
        out
    }

    /// Node ids in left-right-root order.
    pub fn postorder_ids(&self) -> Vec<NodeId> {
        // Root-right-left, reversed.
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            let n = self.node(id);
            stack.extend(n.left);
            stack.extend(n.right);
        }
        out.reverse();
        out
    }

    pub(crate) fn set_status(&mut self, id: NodeId, status: NodeStatus) {
        if let Some(n) = self.node_opt_mut(id) {
            n.status = status;
        }
    }

    /// Access a node; panics if `id` is stale.
    pub(crate) fn node(&self, id: NodeId) -> &Node<K> {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<K> {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node<K>> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.generation()).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node<K>> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.generation() {
            return None;
        }
        Some(n)
    }

    fn alloc(&mut self, key: K, position: Point) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, key, position));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, key, position)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    /// Unlink a node with at most one child, hoisting that child into its
    /// place, and free its slot. Returns the key and position it held.
    fn splice_out(&mut self, id: NodeId) -> (K, Point) {
        let Some(node) = self.nodes[id.idx()].take() else {
            unreachable!("splice_out is only called on live nodes");
        };
        self.free_list.push(id.idx());
        debug_assert!(
            node.left.is_none() || node.right.is_none(),
            "splice_out needs a node with at most one child"
        );
        let child = node.left.or(node.right);
        if let Some(c) = child {
            self.node_mut(c).parent = node.parent;
        }
        match node.parent {
            Some(p) => {
                let parent = self.node_mut(p);
                if parent.left == Some(id) {
                    parent.left = child;
                } else {
                    parent.right = child;
                }
            }
            None => {
                self.root = child;
                // The promoted root keeps the tree anchored where the old root was.
                if let Some(c) = child {
                    let promoted = self.node_mut(c);
                    promoted.target = node.target;
                    promoted.moving = promoted.position != promoted.target;
                }
            }
        }
        (node.key, node.position)
    }
}

impl<K: Ord> SearchTree<K> {
    /// Insert `key` immediately, without animation.
    ///
    /// Descends from the root (equal keys go right) and attaches a new leaf.
    /// An empty tree gets its root at `spawn`.
    pub fn insert(&mut self, key: K, spawn: Point) -> NodeId {
        let Some(mut id) = self.root else {
            let Some(root) = self.insert_root(key, spawn) else {
                unreachable!("the tree is empty");
            };
            return root;
        };
        loop {
            let side = if key < self.node(id).key {
                Side::Left
            } else {
                Side::Right
            };
            match self.node(id).child(side) {
                Some(next) => id = next,
                None => {
                    let Some(leaf) = self.insert_child(id, side, key) else {
                        unreachable!("the child slot is free");
                    };
                    return leaf;
                }
            }
        }
    }

    /// Find the node holding `key`. With duplicates, the shallowest one wins.
    pub fn find(&self, key: &K) -> Option<NodeId> {
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let n = self.node(id);
            cursor = match key.cmp(&n.key) {
                Ordering::Equal => return Some(id),
                Ordering::Less => n.left,
                Ordering::Greater => n.right,
            };
        }
        None
    }

    /// Returns true if some node holds `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Remove `key` immediately, without animation. Returns the removed key.
    pub fn remove(&mut self, key: &K) -> Option<K> {
        let id = self.find(key)?;
        self.structural_delete(id)
    }
}
