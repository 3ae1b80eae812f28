// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timed, one-comparison-per-step operation state machine.
//!
//! An operation walks from the root toward the key, one level per step. Steps
//! are throttled by a timer so the walk is visible. Structural changes only
//! happen in a terminal step, so a walk abandoned halfway leaves the tree as it
//! was (apart from visual markers, which are cleared on the next request).
//!
//! Phases:
//! - [`Phase::Idle`]: nothing to do.
//! - [`Phase::Stepping`]: walking; each elapsed step compares one node.
//! - [`Phase::Settling`]: the walk ended. The last marker stays visible for one
//!   more interval; a matched delete is committed at the end of it.

use core::cmp::Ordering;
use core::fmt;

use kurbo::Point;

use crate::tree::SearchTree;
use crate::types::{NodeId, NodeStatus, Side};

/// Kind of an animated operation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperationKind {
    /// Walk down and attach a new leaf.
    Insert,
    /// Walk down looking for a key.
    Search,
    /// Walk down looking for a key, then remove its node.
    Delete,
}

impl OperationKind {
    fn marker(self) -> NodeStatus {
        match self {
            Self::Insert => NodeStatus::Insert,
            Self::Search => NodeStatus::Search,
            Self::Delete => NodeStatus::Delete,
        }
    }
}

/// Outcome of an operation, reported by the step that decides it.
///
/// The [`Display`](fmt::Display) form is the human-readable alert line, for
/// example `"Found: 50"` or `"Not found: 999"`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Alert<K> {
    /// A search reached a node holding the key.
    Found(K),
    /// A search or delete fell off the tree.
    NotFound(K),
    /// An insert attached its new node.
    Added(K),
    /// A delete removed the key's node.
    Deleted(K),
}

impl<K> Alert<K> {
    /// The key the operation was about.
    pub fn key(&self) -> &K {
        match self {
            Self::Found(k) | Self::NotFound(k) | Self::Added(k) | Self::Deleted(k) => k,
        }
    }
}

impl<K: fmt::Display> fmt::Display for Alert<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(k) => write!(f, "Found: {k}"),
            Self::NotFound(k) => write!(f, "Not found: {k}"),
            Self::Added(k) => write!(f, "Added: {k}"),
            Self::Deleted(k) => write!(f, "Deleted: {k}"),
        }
    }
}

/// An in-flight walk.
#[derive(Clone, Debug)]
pub(crate) struct Walk<K> {
    kind: OperationKind,
    key: K,
    /// Node to compare on the next step; `None` once the walk fell off the tree.
    cursor: Option<NodeId>,
    /// Node compared on the previous step.
    previous: Option<NodeId>,
    /// Which child of `previous` the cursor came from.
    side: Option<Side>,
    /// Where a brand-new root appears.
    spawn: Point,
}

/// A matched node waiting for its removal.
#[derive(Clone, Debug)]
pub(crate) struct PendingDelete<K> {
    target: NodeId,
    key: K,
}

#[derive(Clone, Debug)]
pub(crate) enum Phase<K> {
    Idle,
    Stepping(Walk<K>),
    Settling {
        marked: Option<NodeId>,
        pending_delete: Option<PendingDelete<K>>,
    },
}

/// Drives one operation at a time against a [`SearchTree`].
#[derive(Clone, Debug)]
pub(crate) struct Stepper<K> {
    phase: Phase<K>,
    /// Seconds left before the next step may run.
    timer: f64,
}

impl<K> Default for Stepper<K> {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            timer: 0.0,
        }
    }
}

impl<K: Ord + Clone + fmt::Debug> Stepper<K> {
    /// Start a new operation, discarding whatever was in flight.
    ///
    /// Markers left by the abandoned operation are cleared. A delete that was
    /// matched but not yet committed is dropped.
    pub(crate) fn begin(
        &mut self,
        tree: &mut SearchTree<K>,
        kind: OperationKind,
        key: K,
        spawn: Point,
    ) {
        self.clear_markers(tree);
        tracing::debug!(?kind, ?key, "operation started");
        self.phase = Phase::Stepping(Walk {
            kind,
            key,
            cursor: tree.root(),
            previous: None,
            side: None,
            spawn,
        });
        self.timer = 0.0;
    }

    /// Forget the current operation without touching the tree.
    pub(crate) fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.timer = 0.0;
    }

    /// Advance by `dt` seconds, running at most one step.
    pub(crate) fn tick(
        &mut self,
        tree: &mut SearchTree<K>,
        dt: f64,
        interval: f64,
    ) -> Option<Alert<K>> {
        if self.timer > 0.0 {
            self.timer -= dt;
            return None;
        }
        match core::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => None,
            Phase::Stepping(walk) => {
                let (next, alert) = step(walk, tree);
                self.phase = next;
                self.timer = interval;
                alert
            }
            Phase::Settling {
                marked,
                pending_delete,
            } => {
                let alert = pending_delete.and_then(|PendingDelete { target, key }| {
                    tree.structural_delete(target)?;
                    tracing::debug!(?key, len = tree.len(), "node deleted");
                    Some(Alert::Deleted(key))
                });
                if let Some(id) = marked {
                    tree.set_status(id, NodeStatus::None);
                }
                alert
            }
        }
    }

    pub(crate) fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    /// Kind of the operation in flight, if any.
    ///
    /// This is `Some` exactly when [`is_idle`](Self::is_idle) is false. Only a
    /// matched delete and a successful search settle, so a settling phase
    /// reports one of those two.
    pub(crate) fn operation(&self) -> Option<OperationKind> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Stepping(walk) => Some(walk.kind),
            Phase::Settling {
                pending_delete: Some(_),
                ..
            } => Some(OperationKind::Delete),
            Phase::Settling {
                pending_delete: None,
                ..
            } => Some(OperationKind::Search),
        }
    }

    fn clear_markers(&mut self, tree: &mut SearchTree<K>) {
        let marked = match &self.phase {
            Phase::Idle => [None, None],
            Phase::Stepping(walk) => [walk.cursor, walk.previous],
            Phase::Settling { marked, .. } => [*marked, None],
        };
        for id in marked.into_iter().flatten() {
            tree.set_status(id, NodeStatus::None);
        }
    }
}

/// Run one step of `walk`, returning the next phase and the alert it produced.
fn step<K: Ord + Clone + fmt::Debug>(
    mut walk: Walk<K>,
    tree: &mut SearchTree<K>,
) -> (Phase<K>, Option<Alert<K>>) {
    if let Some(previous) = walk.previous {
        tree.set_status(previous, NodeStatus::None);
    }

    let Some(cursor) = walk.cursor else {
        return fell_off(walk, tree);
    };

    tree.set_status(cursor, walk.kind.marker());
    let Some(node_key) = tree.key(cursor) else {
        return fell_off(walk, tree);
    };
    tracing::trace!(kind = ?walk.kind, key = ?walk.key, at = ?node_key, "compare");

    let side = match walk.key.cmp(node_key) {
        Ordering::Equal if walk.kind == OperationKind::Search => {
            let alert = Alert::Found(walk.key);
            return (
                Phase::Settling {
                    marked: Some(cursor),
                    pending_delete: None,
                },
                Some(alert),
            );
        }
        Ordering::Equal if walk.kind == OperationKind::Delete => {
            return (
                Phase::Settling {
                    marked: Some(cursor),
                    pending_delete: Some(PendingDelete {
                        target: cursor,
                        key: walk.key,
                    }),
                },
                None,
            );
        }
        Ordering::Less => Side::Left,
        // Equal keys are never merged on insert; they go right.
        Ordering::Equal | Ordering::Greater => Side::Right,
    };

    walk.previous = Some(cursor);
    walk.side = Some(side);
    walk.cursor = tree.child_of(cursor, side);
    (Phase::Stepping(walk), None)
}

/// The walk ran past a leaf: a search or delete missed, an insert attaches here.
fn fell_off<K: Ord + Clone + fmt::Debug>(
    walk: Walk<K>,
    tree: &mut SearchTree<K>,
) -> (Phase<K>, Option<Alert<K>>) {
    if walk.kind != OperationKind::Insert {
        return (Phase::Idle, Some(Alert::NotFound(walk.key)));
    }
    let inserted = match (walk.previous, walk.side) {
        (Some(parent), Some(side)) => tree.insert_child(parent, side, walk.key.clone()),
        _ => tree.insert_root(walk.key.clone(), walk.spawn),
    };
    if inserted.is_none() {
        // The tree changed under the walk; nothing sensible to attach to.
        tracing::warn!(key = ?walk.key, "insert target vanished, operation dropped");
        return (Phase::Idle, None);
    }
    tracing::debug!(key = ?walk.key, len = tree.len(), "node added");
    (Phase::Idle, Some(Alert::Added(walk.key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    const INTERVAL: f64 = 0.5;

    fn build(keys: &[i32]) -> SearchTree<i32> {
        let mut tree = SearchTree::new();
        for &k in keys {
            tree.insert(k, Point::ORIGIN);
        }
        tree
    }

    /// Tick with a zero interval until idle, collecting alerts.
    fn run(stepper: &mut Stepper<i32>, tree: &mut SearchTree<i32>) -> Vec<Alert<i32>> {
        let mut alerts = Vec::new();
        for _ in 0..100 {
            alerts.extend(stepper.tick(tree, 0.1, 0.0));
            if stepper.is_idle() {
                break;
            }
        }
        assert!(stepper.is_idle(), "operation did not finish");
        alerts
    }

    #[test]
    fn first_tick_steps_immediately() {
        let mut tree = build(&[50, 25]);
        let mut stepper = Stepper::default();
        stepper.begin(&mut tree, OperationKind::Search, 25, Point::ORIGIN);

        assert_eq!(stepper.tick(&mut tree, 0.016, INTERVAL), None);
        let root = tree.root().unwrap();
        assert_eq!(tree.status(root), Some(NodeStatus::Search));
    }

    #[test]
    fn steps_are_throttled_by_interval() {
        let mut tree = build(&[50, 25, 10]);
        let mut stepper = Stepper::default();
        stepper.begin(&mut tree, OperationKind::Search, 10, Point::ORIGIN);
        let root = tree.root().unwrap();
        let twenty_five = tree.find(&25).unwrap();

        stepper.tick(&mut tree, 0.1, INTERVAL);
        assert_eq!(tree.status(root), Some(NodeStatus::Search));
        // Timer is 0.5; four 0.1 ticks leave it positive, nothing moves.
        for _ in 0..4 {
            stepper.tick(&mut tree, 0.1, INTERVAL);
            assert_eq!(tree.status(twenty_five), Some(NodeStatus::None));
        }
        // Drain the timer, then the next tick takes the second step.
        while stepper.timer > 0.0 {
            stepper.tick(&mut tree, 0.1, INTERVAL);
        }
        stepper.tick(&mut tree, 0.1, INTERVAL);
        assert_eq!(tree.status(root), Some(NodeStatus::None), "previous cleared");
        assert_eq!(tree.status(twenty_five), Some(NodeStatus::Search));
    }

    #[test]
    fn search_found_marks_then_clears() {
        let mut tree = build(&[50, 25, 75]);
        let mut stepper = Stepper::default();
        stepper.begin(&mut tree, OperationKind::Search, 75, Point::ORIGIN);
        let seventy_five = tree.find(&75).unwrap();

        assert_eq!(stepper.tick(&mut tree, 0.1, 0.0), None);
        assert_eq!(
            stepper.tick(&mut tree, 0.1, 0.0),
            Some(Alert::Found(75))
        );
        assert_eq!(tree.status(seventy_five), Some(NodeStatus::Search));
        assert!(!stepper.is_idle());

        assert_eq!(stepper.tick(&mut tree, 0.1, 0.0), None);
        assert!(stepper.is_idle());
        assert_eq!(tree.status(seventy_five), Some(NodeStatus::None));
    }

    #[test]
    fn search_miss_reports_not_found() {
        let mut tree = build(&[50, 25, 75]);
        let mut stepper = Stepper::default();
        stepper.begin(&mut tree, OperationKind::Search, 60, Point::ORIGIN);
        assert_eq!(run(&mut stepper, &mut tree), [Alert::NotFound(60)]);
        assert!(tree.iter().all(|(id, _)| tree.status(id) == Some(NodeStatus::None)));
    }

    #[test]
    fn empty_tree_search_and_delete_miss() {
        let mut tree = SearchTree::new();
        let mut stepper = Stepper::default();
        stepper.begin(&mut tree, OperationKind::Search, 1, Point::ORIGIN);
        assert_eq!(run(&mut stepper, &mut tree), [Alert::NotFound(1)]);
        stepper.begin(&mut tree, OperationKind::Delete, 1, Point::ORIGIN);
        assert_eq!(run(&mut stepper, &mut tree), [Alert::NotFound(1)]);
        assert!(tree.is_empty());
    }

    #[test]
    fn insert_into_empty_creates_root_at_spawn() {
        let mut tree = SearchTree::new();
        let mut stepper = Stepper::default();
        stepper.begin(&mut tree, OperationKind::Insert, 50, Point::new(5.0, 6.0));
        assert_eq!(run(&mut stepper, &mut tree), [Alert::Added(50)]);
        let root = tree.root().unwrap();
        assert_eq!(tree.position(root), Some(Point::new(5.0, 6.0)));
        assert_eq!(tree.status(root), Some(NodeStatus::None));
    }

    #[test]
    fn insert_walks_one_level_per_step() {
        let mut tree = build(&[50, 25]);
        let mut stepper = Stepper::default();
        stepper.begin(&mut tree, OperationKind::Insert, 30, Point::ORIGIN);

        // Compare 50, compare 25, attach.
        assert_eq!(stepper.tick(&mut tree, 0.1, 0.0), None);
        assert_eq!(stepper.tick(&mut tree, 0.1, 0.0), None);
        assert_eq!(tree.len(), 2);
        assert_eq!(stepper.tick(&mut tree, 0.1, 0.0), Some(Alert::Added(30)));
        assert_eq!(tree.len(), 3);
        let twenty_five = tree.find(&25).unwrap();
        let thirty = tree.child_of(twenty_five, Side::Right).unwrap();
        assert_eq!(tree.key(thirty), Some(&30));
        assert_eq!(tree.status(twenty_five), Some(NodeStatus::None));
    }

    #[test]
    fn insert_equal_key_goes_right() {
        let mut tree = build(&[50]);
        let mut stepper = Stepper::default();
        stepper.begin(&mut tree, OperationKind::Insert, 50, Point::ORIGIN);
        assert_eq!(run(&mut stepper, &mut tree), [Alert::Added(50)]);
        let root = tree.root().unwrap();
        let right = tree.child_of(root, Side::Right).unwrap();
        assert_eq!(tree.key(right), Some(&50));
    }

    #[test]
    fn delete_is_deferred_one_step() {
        let mut tree = build(&[50, 25]);
        let mut stepper = Stepper::default();
        stepper.begin(&mut tree, OperationKind::Delete, 25, Point::ORIGIN);
        let twenty_five = tree.find(&25).unwrap();

        assert_eq!(stepper.tick(&mut tree, 0.1, INTERVAL), None);
        while stepper.timer > 0.0 {
            stepper.tick(&mut tree, 0.1, INTERVAL);
        }
        // Match: marked red, not removed yet.
        assert_eq!(stepper.tick(&mut tree, 0.1, INTERVAL), None);
        assert_eq!(tree.status(twenty_five), Some(NodeStatus::Delete));
        assert_eq!(stepper.operation(), Some(OperationKind::Delete));
        assert_eq!(tree.len(), 2);

        while stepper.timer > 0.0 {
            stepper.tick(&mut tree, 0.1, INTERVAL);
        }
        assert_eq!(
            stepper.tick(&mut tree, 0.1, INTERVAL),
            Some(Alert::Deleted(25))
        );
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_alive(twenty_five));
        assert!(stepper.is_idle());
    }

    #[test]
    fn delete_two_children_clears_marker_on_kept_node() {
        let mut tree = build(&[50, 25, 75]);
        let mut stepper = Stepper::default();
        stepper.begin(&mut tree, OperationKind::Delete, 50, Point::ORIGIN);
        assert_eq!(run(&mut stepper, &mut tree), [Alert::Deleted(50)]);
        let root = tree.root().unwrap();
        assert_eq!(tree.key(root), Some(&75));
        assert_eq!(tree.status(root), Some(NodeStatus::None));
    }

    #[test]
    fn new_request_clears_markers_and_drops_pending_delete() {
        let mut tree = build(&[50, 25]);
        let mut stepper = Stepper::default();
        stepper.begin(&mut tree, OperationKind::Delete, 50, Point::ORIGIN);
        stepper.tick(&mut tree, 0.1, 0.0);
        let root = tree.root().unwrap();
        assert_eq!(tree.status(root), Some(NodeStatus::Delete));

        stepper.begin(&mut tree, OperationKind::Search, 25, Point::ORIGIN);
        assert_eq!(tree.status(root), Some(NodeStatus::None));
        assert_eq!(run(&mut stepper, &mut tree), [Alert::Found(25)]);
        assert_eq!(tree.len(), 2, "abandoned delete must not commit");
    }

    #[test]
    fn found_marker_lingers_as_search() {
        let mut tree = build(&[50]);
        let mut stepper = Stepper::default();
        stepper.begin(&mut tree, OperationKind::Search, 50, Point::ORIGIN);
        assert_eq!(
            stepper.tick(&mut tree, 0.1, INTERVAL),
            Some(Alert::Found(50))
        );
        assert!(!stepper.is_idle());
        assert_eq!(stepper.operation(), Some(OperationKind::Search));

        while !stepper.is_idle() {
            stepper.tick(&mut tree, 0.1, INTERVAL);
            assert_eq!(stepper.is_idle(), stepper.operation().is_none());
        }
        let root = tree.root().unwrap();
        assert_eq!(tree.status(root), Some(NodeStatus::None));
    }

    #[test]
    fn abandoned_walk_leaves_structure_alone() {
        let mut tree = build(&[50, 25, 75]);
        let mut stepper = Stepper::default();
        stepper.begin(&mut tree, OperationKind::Insert, 10, Point::ORIGIN);
        stepper.tick(&mut tree, 0.1, 0.0);
        stepper.tick(&mut tree, 0.1, 0.0);
        stepper.begin(&mut tree, OperationKind::Search, 75, Point::ORIGIN);
        assert_eq!(tree.len(), 3);
        assert!(tree.iter().all(|(id, _)| tree.status(id) == Some(NodeStatus::None)));
    }

    #[test]
    fn alert_text() {
        use alloc::string::ToString;
        assert_eq!(Alert::Found(50).to_string(), "Found: 50");
        assert_eq!(Alert::NotFound(999).to_string(), "Not found: 999");
        assert_eq!(Alert::Added(7).to_string(), "Added: 7");
        assert_eq!(Alert::Deleted(3).to_string(), "Deleted: 3");
        assert_eq!(Alert::Deleted(3).key(), &3);
    }
}
