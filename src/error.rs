use thiserror::Error;

use crate::bounds::BoundingBox;

/// Reasons an [`Octree`](crate::Octree) cannot be built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// More points than the leaf capacity share one coordinate inside the node's
    /// region. Such points follow the same path at every level and never separate.
    #[error("{count} points coincide at {point:?} at depth {depth} in region {region:?}, exceeding capacity")]
    CoincidentPoints {
        depth: usize,
        count: usize,
        point: [f64; 3],
        region: BoundingBox,
    },

    /// A bucket above capacity would be handed to a child covering the same
    /// region as its parent, because the region is too small to bisect in `f64`.
    #[error("bucket of {count} points cannot be split further at depth {depth} in region {region:?}")]
    Unsplittable {
        depth: usize,
        count: usize,
        region: BoundingBox,
    },

    /// A bucket above capacity reached the configured maximum depth.
    #[error("bucket of {count} points still exceeds capacity at maximum depth {depth} in region {region:?}")]
    DepthExceeded {
        depth: usize,
        count: usize,
        region: BoundingBox,
    },

    /// Flat coordinate input whose length is not a multiple of three.
    #[error("flat coordinate list of length {len} does not hold whole x, y, z triples")]
    PartialTriple { len: usize },

    #[error("leaf capacity must be at least 1")]
    ZeroCapacity,
}
