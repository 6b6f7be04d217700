use crate::bounds::BoundingBox;
use crate::config::OctreeConfig;
use crate::error::BuildError;
use crate::octree::{points_from_flat, Octree, Point};
use js_sys::Float64Array;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = initThreads)]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

// --- Bounding Box ---

/// Represents an axis-aligned bounding box in 3D space.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct BoundingBox3D {
    pub min_x: f64,
    pub min_y: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub max_z: f64,
}

#[wasm_bindgen]
impl BoundingBox3D {
    #[wasm_bindgen(constructor)]
    pub fn new(
        min_x: f64,
        min_y: f64,
        min_z: f64,
        max_x: f64,
        max_y: f64,
        max_z: f64,
    ) -> BoundingBox3D {
        BoundingBox3D {
            min_x,
            min_y,
            min_z,
            max_x,
            max_y,
            max_z,
        }
    }

    pub fn contains(&self, x: f64, y: f64, z: f64) -> bool {
        BoundingBox::from(*self).contains(&[x, y, z])
    }
}

impl From<BoundingBox3D> for BoundingBox {
    fn from(b: BoundingBox3D) -> Self {
        Self {
            min: [b.min_x, b.min_y, b.min_z],
            max: [b.max_x, b.max_y, b.max_z],
        }
    }
}

// --- Octree ---

#[wasm_bindgen(js_name = Octree)]
pub struct OctreeWASM {
    inner: Octree,
}

#[wasm_bindgen(js_class = Octree)]
impl OctreeWASM {
    /// Builds a tree from flat `x, y, z` coordinates. Throws on a partial triple or if the points cannot be separated.
    #[wasm_bindgen(constructor)]
    pub fn new(bounds: BoundingBox3D, points: &[f64], capacity: Option<usize>, max_depth: Option<usize>) -> Result<OctreeWASM, JsValue> {
        build_tree(bounds, points, capacity, max_depth)
            .map(|inner| OctreeWASM { inner })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    #[wasm_bindgen(getter)]
    pub fn count_points(&self) -> usize {
        self.inner.len()
    }

    #[wasm_bindgen(getter)]
    pub fn depth(&self) -> usize {
        self.inner.depth()
    }

    /// Region sizes of all nodes in pre-order, flattened to `x, y, z` triples.
    #[wasm_bindgen(js_name = regionSizes)]
    pub fn region_sizes(&self) -> Float64Array {
        Float64Array::from(flatten(self.inner.region_sizes()).as_slice())
    }

    pub fn dump(&self) -> String {
        self.inner.to_string()
    }

    pub fn contains_point(&self, x: f64, y: f64, z: f64) -> bool {
        self.inner.contains_point(&[x, y, z])
    }

    /// The `k` closest points to `(x, y, z)`, flattened to `x, y, z` triples.
    pub fn nearest(&self, x: f64, y: f64, z: f64, k: usize) -> Float64Array {
        Float64Array::from(flatten(self.inner.nearest([x, y, z], k)).as_slice())
    }
}

fn build_tree(bounds: BoundingBox3D, coords: &[f64], capacity: Option<usize>, max_depth: Option<usize>) -> Result<Octree, BuildError> {
    let mut config = OctreeConfig::default();
    if let Some(capacity) = capacity {
        config = config.with_capacity(capacity);
    }
    config.max_depth = max_depth;

    let points = points_from_flat(coords)?;
    Octree::par_build_with(bounds.into(), &points, &config)
}

fn flatten(points: Vec<Point>) -> Vec<f64> {
    points.into_iter().flatten().collect()
}
