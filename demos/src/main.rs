// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless walk-through of an animated search tree.
//!
//! Drives a [`VisualTree`] with a fixed frame step, the way a render loop
//! would, and prints every alert plus the stats panel once all operations ran.
//!
//! Run:
//! - `cargo run -p sapling_demos -- --insert 50,25,75,10,40 --search 40,99 --remove 50`
//! - `RUST_LOG=sapling_tree=trace cargo run -p sapling_demos` to see each comparison step.

use anyhow::Context as _;
use clap::Parser;
use kurbo::Point;
use sapling_tree::{AnimationConfig, NodeStatus, OperationKind, VisualTree};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about = "Animate binary search tree operations without a window")]
struct Args {
    /// Keys to insert, in order.
    #[arg(long, value_delimiter = ',', default_values_t = [50, 25, 75, 10, 40, 60, 90])]
    insert: Vec<i64>,
    /// Keys to search for after inserting.
    #[arg(long, value_delimiter = ',', default_values_t = [40, 99])]
    search: Vec<i64>,
    /// Keys to delete after searching.
    #[arg(long, value_delimiter = ',', default_values_t = [50])]
    remove: Vec<i64>,
    /// Simulated frames per second.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,
    /// Seconds between two comparison steps.
    #[arg(long)]
    step_interval: Option<f64>,
    /// Node easing speed in layout units per second.
    #[arg(long)]
    move_speed: Option<f64>,
    /// Where the first root appears.
    #[arg(long, num_args = 2, value_names = ["X", "Y"], default_values_t = [0.0, 0.0])]
    spawn: Vec<f64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    anyhow::ensure!(
        args.fps.is_finite() && args.fps > 0.0,
        "--fps must be positive, got {}",
        args.fps
    );

    let mut config = AnimationConfig::default();
    if let Some(interval) = args.step_interval {
        config = config.with_step_interval(interval);
    }
    if let Some(speed) = args.move_speed {
        config = config.with_move_speed(speed);
    }
    let mut tree = VisualTree::with_config(config).context("invalid animation settings")?;

    let frame = 1.0 / args.fps;
    let spawn = Point::new(args.spawn[0], args.spawn[1]);
    let requests = args
        .insert
        .iter()
        .map(|&k| (OperationKind::Insert, k))
        .chain(args.search.iter().map(|&k| (OperationKind::Search, k)))
        .chain(args.remove.iter().map(|&k| (OperationKind::Delete, k)));

    let mut clock = 0.0;
    for (kind, key) in requests {
        match kind {
            OperationKind::Insert => tree.insert(key, spawn),
            OperationKind::Search => tree.search(key),
            OperationKind::Delete => tree.remove(key),
        }
        while !tree.is_idle() {
            clock += frame;
            if let Some(alert) = tree.tick(frame) {
                println!("[{clock:7.2}s] {alert}");
            }
            let visiting = tree.nodes().find(|v| v.status != NodeStatus::None);
            if let Some(view) = visiting {
                tracing::trace!(key = view.key, status = ?view.status, "visiting");
            }
        }
    }

    // Let the layout settle before dumping positions.
    while !tree.tree().is_settled() {
        clock += frame;
        tree.tick(frame);
    }

    println!();
    println!("Size: {}", tree.size());
    println!("Depth: {}", tree.depth());
    println!("Minimum: {}", display_opt(tree.minimum()));
    println!("Maximum: {}", display_opt(tree.maximum()));
    println!("Inorder: {}", tree.inorder());
    println!("Preorder: {}", tree.preorder());
    println!("Postorder: {}", tree.postorder());
    println!(
        "Bounds: {:.0} x {:.0} (settled after {clock:.2}s)",
        tree.bounding_width(),
        tree.bounding_height()
    );
    for view in tree.nodes() {
        println!(
            "  {:>4} at ({:7.1}, {:6.1})",
            view.key, view.position.x, view.position.y
        );
    }
    Ok(())
}

fn display_opt(value: Option<&i64>) -> String {
    value.map_or_else(|| "-".to_string(), ToString::to_string)
}
