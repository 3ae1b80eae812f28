// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for the Sapling benchmarks.

use kurbo::Point;
use sapling_tree::SearchTree;

/// Keys `0..n` in a scrambled but deterministic order, so the tree is bushy.
pub fn scrambled_keys(n: u32) -> Vec<u32> {
    // Multiplying by a constant coprime with `n` permutes `0..n`.
    let step = (n / 2 + 1..).find(|s| gcd(*s, n) == 1).unwrap_or(1);
    (0..n).map(|i| i.wrapping_mul(step) % n.max(1)).collect()
}

/// A tree holding `keys`, built without animation.
pub fn populated(keys: &[u32]) -> SearchTree<u32> {
    let mut tree = SearchTree::new();
    for &k in keys {
        tree.insert(k, Point::ORIGIN);
    }
    tree
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 { a } else { gcd(b, a % b) }
}
