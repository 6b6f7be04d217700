use octopart::{BoundingBox, Octree};
use std::env;
use tracing::{error, info};

/// Builds a tree over a block of unit cells and prints its dump.
///
/// Usage: `cargo run --example cells [side]` with `RUST_LOG=debug` to see the build events.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let side: usize = match env::args().nth(1) {
        Some(arg) => arg.parse().map_err(|e| {
            error!("Invalid side length {:?}: {}", arg, e);
            Box::<dyn std::error::Error>::from(e)
        })?,
        None => 5,
    };

    // Cells are laid out with a small gap, like a board of cubes drawn 1.2 apart.
    let mut cells = Vec::with_capacity(side * side * side);
    for z in 0..side {
        for y in 0..side {
            for x in 0..side {
                cells.push([x as f64 * 1.2, y as f64 * 1.2, z as f64 * 1.2]);
            }
        }
    }

    let extent = (side as f64 * 1.2).ceil().max(1.0);
    let bounds = BoundingBox::new([0.0, 0.0, 0.0], [extent, extent, extent]);

    info!("Building octree over {} cells in {:?}", cells.len(), bounds);
    let tree = Octree::par_build(bounds, &cells)?;
    info!(
        "Built {} nodes, depth {}, {} points at the root",
        tree.node_count(),
        tree.depth(),
        tree.objects().len()
    );

    print!("{}", tree);

    let nearest = tree.nearest([0.0, 0.0, 0.0], 4);
    info!("Closest cells to the origin: {:?}", nearest);
    Ok(())
}
