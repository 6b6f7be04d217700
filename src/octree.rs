use crate::bounds::BoundingBox;
use crate::config::OctreeConfig;
use crate::error::BuildError;
use crate::octant;
use rayon::prelude::*;
use std::fmt;
use tracing::{debug, trace};

/// A point in 3D space, the centre of a unit cell.
pub type Point = [f64; 3];

/// Buckets smaller than this are built on the calling thread by `par_build`.
const PARALLEL_THRESHOLD: usize = 1024;

/// A static octree over a set of 3D points.
///
/// Each node covers a region. A node is either a leaf, holding at most
/// `capacity` points and no children, or an internal node with exactly eight
/// children, one per [`Octant`](crate::Octant) of its region in split order. An
/// internal node keeps the points that fit no single octant in its own
/// `objects` (the overflow bucket), so every input point is owned by exactly one
/// node.
///
/// The tree is built eagerly and never changes afterwards; rebuild it to reflect
/// new points.
#[derive(Clone, Debug, PartialEq)]
pub struct Octree {
    pub(crate) region: BoundingBox,
    pub(crate) objects: Vec<Point>,
    pub(crate) children: Option<Box<[Octree; 8]>>,
}

impl Default for Octree {
    fn default() -> Self {
        Self::empty(BoundingBox::default())
    }
}

impl Octree {
    /// Creates an empty leaf covering `region`.
    pub fn empty(region: BoundingBox) -> Octree {
        Octree {
            region,
            objects: Vec::new(),
            children: None,
        }
    }

    /// Builds an octree over `points` with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::CoincidentPoints`] when more than eight points share a
    /// coordinate inside a region, and [`BuildError::Unsplittable`] when a region
    /// becomes too small to bisect before its points separate.
    pub fn build(region: BoundingBox, points: &[Point]) -> Result<Octree, BuildError> {
        Self::build_with(region, points, &OctreeConfig::default())
    }

    /// Builds an octree over `points` with an explicit configuration.
    ///
    /// # Arguments
    ///
    /// * `region` - The region covered by the root node.
    /// * `points` - The cell centres to index. Points outside `region` are kept by the root.
    /// * `config` - Leaf capacity and optional depth limit.
    pub fn build_with(region: BoundingBox, points: &[Point], config: &OctreeConfig) -> Result<Octree, BuildError> {
        Self::build_root(region, points, config, false)
    }

    /// Same as [`Octree::build`], but large buckets are built on the rayon pool.
    ///
    /// The resulting tree is identical to the sequential one.
    pub fn par_build(region: BoundingBox, points: &[Point]) -> Result<Octree, BuildError> {
        Self::par_build_with(region, points, &OctreeConfig::default())
    }

    /// Parallel counterpart of [`Octree::build_with`].
    ///
    /// # Arguments
    ///
    /// * `region` - The region covered by the root node.
    /// * `points` - The cell centres to index.
    /// * `config` - Leaf capacity and optional depth limit.
    ///
    /// When several subtrees fail, any one of their errors may be returned.
    pub fn par_build_with(region: BoundingBox, points: &[Point], config: &OctreeConfig) -> Result<Octree, BuildError> {
        Self::build_root(region, points, config, true)
    }

    /// Builds from flat `x, y, z` coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::PartialTriple`] if `coords.len()` is not a multiple of three.
    pub fn from_flat(region: BoundingBox, coords: &[f64]) -> Result<Octree, BuildError> {
        let points = points_from_flat(coords)?;
        Self::build(region, &points)
    }

    fn build_root(region: BoundingBox, points: &[Point], config: &OctreeConfig, parallel: bool) -> Result<Octree, BuildError> {
        config.validate()?;
        debug!(
            points = points.len(),
            capacity = config.capacity,
            max_depth = ?config.max_depth,
            parallel,
            "building octree"
        );

        let tree = build_node(region, points.to_vec(), 0, config, parallel)?;

        debug!(nodes = tree.node_count(), depth = tree.depth(), "octree built");
        Ok(tree)
    }

    pub fn region(&self) -> &BoundingBox {
        &self.region
    }

    /// Points owned by this node: all of them for a leaf, the overflow for an internal node.
    pub fn objects(&self) -> &[Point] {
        &self.objects
    }

    /// The eight children in split order, or `None` for a leaf.
    pub fn children(&self) -> Option<&[Octree; 8]> {
        self.children.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Total number of nodes, this one included.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Total number of points stored in the tree.
    pub fn len(&self) -> usize {
        self.iter().map(|(_, node)| node.objects.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Depth of the deepest node, 0 for a single leaf.
    pub fn depth(&self) -> usize {
        self.iter().map(|(depth, _)| depth).max().unwrap_or(0)
    }

    /// Depth-first pre-order iterator over `(depth, node)`, children in split order.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![(0, self)] }
    }

    /// Every stored point, in node pre-order.
    pub fn points(&self) -> impl Iterator<Item = &Point> + '_ {
        self.iter().flat_map(|(_, node)| node.objects.iter())
    }

    /// Appends `max - min` of every node's region to `sizes`, in pre-order.
    pub fn collect_region_sizes(&self, sizes: &mut Vec<[f64; 3]>) {
        sizes.push(self.region.size());
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.collect_region_sizes(sizes);
            }
        }
    }

    /// Region sizes of all nodes in pre-order, one entry per node.
    pub fn region_sizes(&self) -> Vec<[f64; 3]> {
        let mut sizes = Vec::new();
        self.collect_region_sizes(&mut sizes);
        sizes
    }

    /// Finds the node that owns `point`, or would own it had it been in the input.
    ///
    /// Descends by the same first-match rule used during construction.
    pub fn locate(&self, point: &Point) -> &Octree {
        let mut node = self;
        while let Some(children) = &node.children {
            match children.iter().find(|child| child.region.contains(point)) {
                Some(child) => node = child,
                None => break,
            }
        }
        node
    }

    /// Checks whether `point` is stored in the tree.
    pub fn contains_point(&self, point: &Point) -> bool {
        self.locate(point).objects.contains(point)
    }

    /// Emits the debug dump as `tracing` events, one per node.
    pub fn log_dump(&self) {
        for (depth, node) in self.iter() {
            debug!(depth, "{}{}", "  ".repeat(depth), NodeLine(node));
        }
    }
}

/// Debug dump: one line per node in pre-order, indented two spaces per level.
impl fmt::Display for Octree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, node) in self.iter() {
            writeln!(f, "{}{}", "  ".repeat(depth), NodeLine(node))?;
        }
        Ok(())
    }
}

struct NodeLine<'a>(&'a Octree);

impl fmt::Display for NodeLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let BoundingBox { min, max } = self.0.region;
        write!(
            f,
            "({:.6}, {:.6}, {:.6}) -> ({:.6}, {:.6}, {:.6}) | {}",
            min[0],
            min[1],
            min[2],
            max[0],
            max[1],
            max[2],
            self.0.objects.len()
        )
    }
}

/// Pre-order iterator returned by [`Octree::iter`].
pub struct Iter<'a> {
    stack: Vec<(usize, &'a Octree)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (usize, &'a Octree);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        if let Some(children) = &node.children {
            // Reversed so the first octant is popped first.
            for child in children.iter().rev() {
                self.stack.push((depth + 1, child));
            }
        }
        Some((depth, node))
    }
}

impl<'a> IntoIterator for &'a Octree {
    type Item = (usize, &'a Octree);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn build_node(
    region: BoundingBox,
    points: Vec<Point>,
    depth: usize,
    config: &OctreeConfig,
    parallel: bool,
) -> Result<Octree, BuildError> {
    if points.len() <= config.capacity {
        return Ok(Octree {
            region,
            objects: points,
            children: None,
        });
    }

    let count = points.len();

    // Coincident points inside the region land in the same octant at every level.
    // Outside it they would all stay here as overflow, which is fine.
    let first = points[0];
    if region.contains(&first) && points.iter().all(|p| *p == first) {
        return Err(BuildError::CoincidentPoints {
            depth,
            count,
            point: first,
            region,
        });
    }

    if config.max_depth.is_some_and(|max_depth| depth >= max_depth) {
        return Err(BuildError::DepthExceeded { depth, count, region });
    }

    let regions = octant::split(&region, &region.center());
    let (buckets, overflow) = partition(&regions, points);
    trace!(depth, count, overflow = overflow.len(), "subdividing node");

    // A child equal to its parent means the region no longer bisects in f64.
    let stalled = regions
        .iter()
        .zip(buckets.iter())
        .any(|(r, bucket)| bucket.len() > config.capacity && *r == region);
    if stalled {
        return Err(BuildError::Unsplittable { depth, count, region });
    }

    let mut children = Box::new(regions.map(Octree::empty));
    if parallel && count >= PARALLEL_THRESHOLD {
        children
            .par_iter_mut()
            .zip(buckets.into_par_iter())
            .try_for_each(|(child, bucket)| {
                *child = build_node(child.region, bucket, depth + 1, config, parallel)?;
                Ok(())
            })?;
    } else {
        for (child, bucket) in children.iter_mut().zip(buckets) {
            *child = build_node(child.region, bucket, depth + 1, config, parallel)?;
        }
    }

    Ok(Octree {
        region,
        objects: overflow,
        children: Some(children),
    })
}

/// Converts flat `x, y, z` coordinates into points, rejecting partial triples.
pub(crate) fn points_from_flat(coords: &[f64]) -> Result<Vec<Point>, BuildError> {
    if coords.len() % 3 != 0 {
        return Err(BuildError::PartialTriple { len: coords.len() });
    }
    Ok(coords.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect())
}

/// Assigns each point to the first region containing it, keeping input order.
/// Points no region contains are returned as overflow.
fn partition(regions: &[BoundingBox; 8], points: Vec<Point>) -> ([Vec<Point>; 8], Vec<Point>) {
    let mut buckets: [Vec<Point>; 8] = Default::default();
    let mut overflow = Vec::new();
    for point in points {
        match regions.iter().position(|r| r.contains(&point)) {
            Some(i) => buckets[i].push(point),
            None => overflow.push(point),
        }
    }
    (buckets, overflow)
}
