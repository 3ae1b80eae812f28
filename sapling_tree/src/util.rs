// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::fmt::{Display, Write};

use kurbo::Point;

/// Move `position` toward `target` by at most `max_step`.
///
/// Lands exactly on `target` once it is within `snap` or within reach of this
/// step, and reports whether the point is still moving.
pub(crate) fn ease_toward(position: Point, target: Point, max_step: f64, snap: f64) -> (Point, bool) {
    let delta = target - position;
    let dist = delta.hypot();
    if dist <= snap || dist <= max_step {
        return (target, false);
    }
    (position + delta * (max_step / dist), true)
}

/// Space-separated key dump with a trailing space, e.g. `"10 25 40 "`.
pub(crate) fn join_keys<'a, K: Display + 'a>(keys: impl IntoIterator<Item = &'a K>) -> String {
    let mut out = String::new();
    for key in keys {
        // Writing into a `String` cannot fail.
        let _ = write!(out, "{key} ");
    }
    out
}
