// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout retargeting and per-frame easing.
//!
//! The root stays where it was spawned. Every other node is placed relative to
//! its parent's target: one row lower, and `depth_remaining² × spread` to the
//! left or right, where `depth_remaining` starts at the tree depth for the
//! root's children and shrinks by one per level. Spacing is therefore widest
//! near the root, which keeps deep subtrees from crossing.

use alloc::vec;

use kurbo::Vec2;

use crate::config::AnimationConfig;
use crate::tree::SearchTree;
use crate::types::{NodeId, Side};
use crate::util::ease_toward;

impl<K> SearchTree<K> {
    /// Recompute every target position if the structure changed since the last call.
    ///
    /// Targets only depend on the structure and the root's anchor, so skipping
    /// clean frames gives the same targets as recomputing every frame.
    pub fn update_layout(&mut self, config: &AnimationConfig) {
        if !self.layout_dirty {
            return;
        }
        self.layout_dirty = false;
        if let Some(root) = self.root() {
            let depth = self.depth();
            self.retarget_subtree(root, depth, config);
        }
    }

    /// Assign target positions to all descendants of `id`.
    ///
    /// The children of `id` are offset by `depth_remaining² × spread`
    /// horizontally and one `row_height` vertically from the target of `id`.
    pub fn retarget_subtree(&mut self, id: NodeId, depth_remaining: usize, config: &AnimationConfig) {
        if !self.is_alive(id) {
            return;
        }
        let mut stack = vec![(id, depth_remaining)];
        while let Some((parent, depth)) = stack.pop() {
            let dx = (depth * depth) as f64 * config.spread;
            let (origin, left, right) = {
                let p = self.node(parent);
                (p.target, p.left, p.right)
            };
            for (side, child) in [(Side::Left, left), (Side::Right, right)] {
                let Some(child) = child else { continue };
                let c = self.node_mut(child);
                c.target = origin + Vec2::new(side.sign() * dx, config.row_height);
                c.moving = c.position != c.target;
                stack.push((child, depth.saturating_sub(1)));
            }
        }
    }

    /// Move every node toward its target for a frame lasting `dt` seconds.
    ///
    /// Nodes within `snap_distance` of their target land on it and stop moving.
    pub fn ease(&mut self, dt: f64, config: &AnimationConfig) {
        let max_step = config.move_speed * dt.max(0.0);
        let mut cursor = self.first();
        while let Some(id) = cursor {
            let n = self.node_mut(id);
            let (position, moving) = ease_toward(n.position, n.target, max_step, config.snap_distance);
            n.position = position;
            n.moving = moving;
            cursor = self.successor(id);
        }
    }

    /// Returns true once every node has reached its target.
    pub fn is_settled(&self) -> bool {
        self.iter().all(|(id, _)| !self.node(id).moving)
    }
}

/// Width spanned by a fully spread tree of the given depth.
///
/// This is twice the sum of the horizontal offsets along one flank:
/// `2 × Σ n² × spread` for `n` in `1..=depth`.
pub fn bounding_width(depth: usize, config: &AnimationConfig) -> f64 {
    let sum: f64 = (1..=depth).map(|n| (n * n) as f64 * config.spread).sum();
    sum * 2.0
}

/// Height spanned by a tree of the given depth.
pub fn bounding_height(depth: usize, config: &AnimationConfig) -> f64 {
    depth as f64 * config.row_height
}
