//! # octopart
//!
//! `octopart` is a Rust library for static 3D octrees over unit-cube cells, designed to be used
//! in Rust as well as compiled to WebAssembly (WASM). It partitions a fixed set of points into a
//! hierarchy of axis-aligned regions so that level-of-detail, visibility and neighbour queries do
//! not have to scan every point.
//!
//! ## Features
//!
//! - **Cell semantics**: points are the centres of unit cubes; a point belongs to a region only
//!   when its whole cube fits inside (see [`BoundingBox::contains`]).
//! - **Lossless partitioning**: points that fit no single octant stay in their node's overflow
//!   bucket, so every input point is owned by exactly one node.
//! - **Bounded construction**: coincident points that can never be separated are reported as a
//!   [`BuildError`] instead of recursing forever.
//! - **Parallel build**: [`Octree::par_build`] builds large subtrees on the rayon pool with the
//!   same result as the sequential build.
//! - **WASM-ready**: bindings built with `wasm-bindgen`.
//!
//! ## Example
//!
//! ```rust
//! use octopart::{BoundingBox, Octree};
//!
//! let bounds = BoundingBox::new([0.0, 0.0, 0.0], [8.0, 8.0, 8.0]);
//! let points: Vec<[f64; 3]> = (0..9).map(|i| [i as f64 * 0.5, 1.0, 1.0]).collect();
//!
//! let tree = Octree::build(bounds, &points).unwrap();
//! assert_eq!(tree.len(), 9);
//! assert_eq!(tree.region_sizes()[0], [8.0, 8.0, 8.0]);
//! ```
//!
//! ## Main Interface
//!
//! The primary entry point is the [`Octree`] struct.

mod bounds;
mod config;
mod error;
mod nearest;
mod octant;
mod octree;
pub mod wasm;

pub use bounds::BoundingBox;
pub use bounds::CELL_OFFSET;
pub use config::OctreeConfig;
pub use config::DEFAULT_CAPACITY;
pub use error::BuildError;
pub use nearest::NearestIterator;
pub use octant::split;
pub use octant::Octant;
pub use octree::Iter;
pub use octree::Octree;
pub use octree::Point;
