// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The frame-driven front end: requests, ticking, and read-only snapshots.

use alloc::string::String;
use core::fmt;

use kurbo::Point;

use crate::config::{AnimationConfig, ConfigError};
use crate::layout::{bounding_height, bounding_width};
use crate::step::{Alert, OperationKind, Stepper};
use crate::tree::{NodeView, SearchTree};
use crate::util::join_keys;

/// An animated binary search tree driven by a frame loop.
///
/// Requests ([`insert`](Self::insert), [`search`](Self::search),
/// [`remove`](Self::remove)) only start an operation. The host then calls
/// [`tick`](Self::tick) once per frame; every `step_interval` seconds the
/// operation compares one more node, and the step that decides the outcome
/// returns an [`Alert`]. Only one operation runs at a time: a new request
/// replaces the one in flight.
///
/// ## Example
///
/// ```rust
/// use kurbo::Point;
/// use sapling_tree::VisualTree;
///
/// let mut tree = VisualTree::new();
/// tree.insert(50, Point::ORIGIN);
///
/// let mut alerts = Vec::new();
/// while !tree.is_idle() {
///     alerts.extend(tree.tick(1.0 / 60.0));
/// }
/// assert_eq!(alerts[0].to_string(), "Added: 50");
/// assert_eq!(tree.size(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct VisualTree<K> {
    tree: SearchTree<K>,
    stepper: Stepper<K>,
    config: AnimationConfig,
}

impl<K: Ord + Clone + fmt::Debug> Default for VisualTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone + fmt::Debug> VisualTree<K> {
    /// Create an empty tree with the default [`AnimationConfig`].
    pub fn new() -> Self {
        Self {
            tree: SearchTree::new(),
            stepper: Stepper::default(),
            config: AnimationConfig::default(),
        }
    }

    /// Create an empty tree with a custom configuration.
    pub fn with_config(config: AnimationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            tree: SearchTree::new(),
            stepper: Stepper::default(),
            config,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// The underlying tree, for read-only queries.
    pub fn tree(&self) -> &SearchTree<K> {
        &self.tree
    }

    /// Start inserting `key`. If the tree is empty the new root appears at `spawn`.
    pub fn insert(&mut self, key: K, spawn: Point) {
        self.stepper
            .begin(&mut self.tree, OperationKind::Insert, key, spawn);
    }

    /// Start searching for `key`.
    pub fn search(&mut self, key: K) {
        self.stepper
            .begin(&mut self.tree, OperationKind::Search, key, Point::ORIGIN);
    }

    /// Start deleting `key`.
    pub fn remove(&mut self, key: K) {
        self.stepper
            .begin(&mut self.tree, OperationKind::Delete, key, Point::ORIGIN);
    }

    /// Advance one frame of `dt` seconds.
    ///
    /// Runs at most one operation step, refreshes the layout if the structure
    /// changed, and eases every node toward its target.
    pub fn tick(&mut self, dt: f64) -> Option<Alert<K>> {
        let alert = self
            .stepper
            .tick(&mut self.tree, dt, self.config.step_interval);
        self.tree.update_layout(&self.config);
        self.tree.ease(dt, &self.config);
        alert
    }

    /// Drop every node and abandon the operation in flight.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.stepper.reset();
        tracing::debug!("tree cleared");
    }

    /// Returns true when no operation is in flight.
    ///
    /// An operation stays in flight for one more step interval after its
    /// outcome, while the last visited node keeps its marker; a matched
    /// delete is committed at the end of that interval.
    pub fn is_idle(&self) -> bool {
        self.stepper.is_idle()
    }

    /// Kind of the operation in flight, if any.
    ///
    /// `None` exactly when [`is_idle`](Self::is_idle) returns true.
    pub fn operation(&self) -> Option<OperationKind> {
        self.stepper.operation()
    }

    /// Returns true if some node holds `key`, without animating.
    pub fn contains(&self, key: &K) -> bool {
        self.tree.contains(key)
    }
}

impl<K> VisualTree<K> {
    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.tree.len()
    }

    /// Returns true if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Number of levels; `0` when empty.
    pub fn depth(&self) -> usize {
        self.tree.depth()
    }

    /// Smallest key, or `None` when empty.
    pub fn minimum(&self) -> Option<&K> {
        self.tree.minimum()
    }

    /// Largest key, or `None` when empty.
    pub fn maximum(&self) -> Option<&K> {
        self.tree.maximum()
    }

    /// Current position of the root.
    pub fn root_position(&self) -> Option<Point> {
        self.tree.root().and_then(|root| self.tree.position(root))
    }

    /// Keys in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &K> + '_ {
        self.tree.iter().map(|(_, key)| key)
    }

    /// Render snapshot of every node, in key order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeView<'_, K>> + '_ {
        self.tree.iter().filter_map(|(id, _)| self.tree.view(id))
    }

    /// Width a camera needs to frame the fully spread tree.
    pub fn bounding_width(&self) -> f64 {
        bounding_width(self.depth(), &self.config)
    }

    /// Height a camera needs to frame the tree.
    pub fn bounding_height(&self) -> f64 {
        bounding_height(self.depth(), &self.config)
    }
}

impl<K: fmt::Display> VisualTree<K> {
    /// Keys in left-node-right order, each followed by a space.
    pub fn inorder(&self) -> String {
        join_keys(self.iter())
    }

    /// Keys in node-left-right order, each followed by a space.
    pub fn preorder(&self) -> String {
        let ids = self.tree.preorder_ids();
        join_keys(ids.into_iter().filter_map(|id| self.tree.key(id)))
    }

    /// Keys in left-right-node order, each followed by a space.
    pub fn postorder(&self) -> String {
        let ids = self.tree.postorder_ids();
        join_keys(ids.into_iter().filter_map(|id| self.tree.key(id)))
    }
}
