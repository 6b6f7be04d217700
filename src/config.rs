use crate::error::BuildError;

/// Default number of points a leaf may hold.
pub const DEFAULT_CAPACITY: usize = 8;

/// Parameters controlling how an [`Octree`](crate::Octree) is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OctreeConfig {
    /// Maximum number of points a node keeps without subdividing.
    pub capacity: usize,
    /// Optional depth (root = 0) at which a bucket above capacity fails the build.
    ///
    /// Unset by default: the build already stops on buckets that cannot be
    /// separated, so this only caps tree depth for callers that want a bound.
    pub max_depth: Option<usize>,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            max_depth: None,
        }
    }
}

impl OctreeConfig {
    pub fn new(capacity: usize, max_depth: Option<usize>) -> Self {
        Self { capacity, max_depth }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Rejects settings under which a build could never terminate.
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.capacity == 0 {
            return Err(BuildError::ZeroCapacity);
        }
        Ok(())
    }
}
