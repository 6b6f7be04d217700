use crate::bounds::CELL_OFFSET;
use crate::octree::{Octree, Point};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

impl Octree {
    /// Returns an iterator that yields the stored points ordered by distance from `query`.
    ///
    /// Nodes are expanded best-first. Every point below the root passed the
    /// containment test of its node, so it lies in the node's region shifted back
    /// by the cell offset, and the distance to that shifted region bounds the
    /// distance to any point in the subtree.
    pub fn nearest_iter(&self, query: [f64; 3]) -> NearestIterator<'_> {
        let mut queue = BinaryHeap::new();

        // The root may hold points outside its region, so it gets no bound.
        queue.push(SearchItem {
            dist_sq: 0.0,
            node: Some(self),
            point: None,
        });

        NearestIterator { queue, query }
    }

    /// The `k` stored points closest to `query`, nearest first.
    pub fn nearest(&self, query: [f64; 3], k: usize) -> Vec<Point> {
        self.nearest_iter(query).take(k).copied().collect()
    }
}

struct SearchItem<'a> {
    dist_sq: f64,
    node: Option<&'a Octree>,
    point: Option<&'a Point>,
}

impl<'a> PartialEq for SearchItem<'a> {
    fn eq(&self, other: &Self) -> bool {
        self.dist_sq == other.dist_sq
    }
}

impl<'a> Eq for SearchItem<'a> {}

impl<'a> PartialOrd for SearchItem<'a> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'a> Ord for SearchItem<'a> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for Min-Heap behavior
        other.dist_sq.partial_cmp(&self.dist_sq).unwrap_or(Ordering::Equal)
    }
}

/// An iterator that yields points from the octree in order of increasing distance.
pub struct NearestIterator<'a> {
    queue: BinaryHeap<SearchItem<'a>>,
    query: [f64; 3],
}

impl<'a> Iterator for NearestIterator<'a> {
    type Item = &'a Point;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(item) = self.queue.pop() {
            if let Some(point) = item.point {
                return Some(point);
            }

            if let Some(node) = item.node {
                for p in &node.objects {
                    self.queue.push(SearchItem {
                        dist_sq: dist_sq(p, &self.query),
                        node: None,
                        point: Some(p),
                    });
                }

                if let Some(children) = &node.children {
                    for child in children.iter() {
                        let d2 = child.region.shifted(-CELL_OFFSET).dist_sq(&self.query);
                        self.queue.push(SearchItem {
                            dist_sq: d2,
                            node: Some(child),
                            point: None,
                        });
                    }
                }
            }
        }
        None
    }
}

fn dist_sq(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    dx * dx + dy * dy + dz * dz
}
