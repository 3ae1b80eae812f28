// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sapling Tree: a step-by-step animated binary search tree.
//!
//! Sapling Tree is the model behind a teaching or demo view of a binary search
//! tree. It does not draw anything; a host renders the node positions and
//! markers it exposes and feeds it elapsed time once per frame.
//!
//! - Insert, search and delete run as timed walks, one comparison per step,
//!   so a viewer can follow the path taken from the root.
//! - Structural changes (attaching a leaf, the three delete cases with
//!   in-order successor splicing) happen atomically at the walk's last step.
//! - After a structural change the layout is recomputed and nodes glide toward
//!   their new slots instead of jumping.
//!
//! The tree is unbalanced on purpose. Equal keys are kept, as right descendants.
//!
//! ## API overview
//!
//! - [`VisualTree`]: the frame-driven front end. Start operations with
//!   [`VisualTree::insert`], [`VisualTree::search`] and [`VisualTree::remove`],
//!   then call [`VisualTree::tick`] every frame; it returns an [`Alert`] when an
//!   operation reaches its outcome.
//! - [`SearchTree`]: the node arena and mutation engine underneath, usable on
//!   its own for immediate (non-animated) edits and queries.
//! - [`NodeId`]: generational handle of a node.
//! - [`NodeView`]: per-node render snapshot (position, target, [`NodeStatus`]).
//! - [`AnimationConfig`]: step interval, easing speed and layout spacing.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use sapling_tree::{Alert, VisualTree};
//!
//! let mut tree = VisualTree::new();
//! let run = |tree: &mut VisualTree<i32>| {
//!     let mut alerts = Vec::new();
//!     while !tree.is_idle() {
//!         alerts.extend(tree.tick(1.0 / 60.0));
//!     }
//!     alerts
//! };
//!
//! for key in [50, 25, 75] {
//!     tree.insert(key, Point::ORIGIN);
//!     run(&mut tree);
//! }
//! assert_eq!(tree.inorder(), "25 50 75 ");
//!
//! tree.search(999);
//! assert_eq!(run(&mut tree), [Alert::NotFound(999)]);
//!
//! tree.remove(50);
//! assert_eq!(run(&mut tree), [Alert::Deleted(50)]);
//! assert_eq!(tree.inorder(), "25 75 ");
//! ```
//!
//! ## Logging
//!
//! Operations emit [`tracing`] events: `debug` when an operation starts and
//! when a node is added or deleted, `trace` for every comparison step. No
//! subscriber is installed by this crate.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//! - `serde`: derives `Serialize`/`Deserialize` for [`AnimationConfig`] and the
//!   small status enums.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod config;
mod iter;
mod layout;
mod step;
mod tree;
mod types;
mod util;
mod visual;

pub use config::{AnimationConfig, ConfigError};
pub use iter::InOrder;
pub use layout::{bounding_height, bounding_width};
pub use step::{Alert, OperationKind};
pub use tree::{NodeView, SearchTree};
pub use types::{NodeId, NodeStatus, Side};
pub use visual::VisualTree;
