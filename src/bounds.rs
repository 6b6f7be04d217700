/// Offset applied on every axis before a containment test.
///
/// Indexed points are the centres of unit cubes, so a point counts as inside a
/// region only when its whole cube fits in it.
pub const CELL_OFFSET: f64 = 0.5;

/// Axis-aligned bounding box in 3D space.
///
/// `min` is expected to be componentwise less than or equal to `max`. Boxes with
/// zero extent along one or more axes are legal.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl BoundingBox {
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    /// Checks whether the unit cube centred at `point` lies inside the box.
    ///
    /// `CELL_OFFSET` is added to every coordinate before comparing, and both
    /// bounds are inclusive. Box `[(0,0,0), (1,1,1)]` contains `(0,0,0)` but not
    /// `(1,0,0)`.
    pub fn contains(&self, point: &[f64; 3]) -> bool {
        (0..3).all(|axis| {
            let p = point[axis] + CELL_OFFSET;
            self.min[axis] <= p && p <= self.max[axis]
        })
    }

    /// Extent of the box along each axis (`max - min`).
    pub fn size(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    /// Geometric midpoint, computed as `min + size / 2`.
    pub fn center(&self) -> [f64; 3] {
        let size = self.size();
        [
            self.min[0] + size[0] / 2.0,
            self.min[1] + size[1] / 2.0,
            self.min[2] + size[2] / 2.0,
        ]
    }

    pub fn volume(&self) -> f64 {
        let size = self.size();
        size[0] * size[1] * size[2]
    }

    /// True if the box has no extent along at least one axis.
    pub fn is_degenerate(&self) -> bool {
        self.size().iter().any(|&s| s <= 0.0)
    }

    /// Returns the box translated by `delta` on every axis.
    pub(crate) fn shifted(&self, delta: f64) -> Self {
        Self {
            min: self.min.map(|v| v + delta),
            max: self.max.map(|v| v + delta),
        }
    }

    /// Squared distance from `point` to the closest point of the box, zero inside.
    pub(crate) fn dist_sq(&self, point: &[f64; 3]) -> f64 {
        (0..3)
            .map(|axis| {
                let d = (self.min[axis] - point[axis]).max(0.0).max(point[axis] - self.max[axis]);
                d * d
            })
            .sum()
    }
}
