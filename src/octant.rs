use crate::bounds::BoundingBox;

/// One of the eight sub-regions of a box bisected at its centre.
///
/// The discriminant is the position of the octant in [`split`], which is also the
/// index of the matching child in an [`Octree`](crate::Octree). `Low` means the
/// `min..center` half of an axis and `High` the `center..max` half.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Octant {
    LowLowLow = 0,
    HighLowLow = 1,
    HighLowHigh = 2,
    LowLowHigh = 3,
    LowHighLow = 4,
    HighHighLow = 5,
    HighHighHigh = 6,
    LowHighHigh = 7,
}

impl Octant {
    /// All octants in split order.
    pub const ALL: [Octant; 8] = [
        Octant::LowLowLow,
        Octant::HighLowLow,
        Octant::HighLowHigh,
        Octant::LowLowHigh,
        Octant::LowHighLow,
        Octant::HighHighLow,
        Octant::HighHighHigh,
        Octant::LowHighHigh,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Octant> {
        Self::ALL.get(index).copied()
    }

    /// Which half of each axis the octant covers, `true` for the upper half.
    pub fn is_high(self) -> [bool; 3] {
        match self {
            Octant::LowLowLow => [false, false, false],
            Octant::HighLowLow => [true, false, false],
            Octant::HighLowHigh => [true, false, true],
            Octant::LowLowHigh => [false, false, true],
            Octant::LowHighLow => [false, true, false],
            Octant::HighHighLow => [true, true, false],
            Octant::HighHighHigh => [true, true, true],
            Octant::LowHighHigh => [false, true, true],
        }
    }

    /// The sub-region of `bounds` covered by this octant.
    ///
    /// # Arguments
    ///
    /// * `bounds` - The parent region being bisected.
    /// * `center` - The midpoint of `bounds`. It is taken as given, not recomputed.
    pub fn region(self, bounds: &BoundingBox, center: &[f64; 3]) -> BoundingBox {
        let high = self.is_high();
        let mut min = [0.0; 3];
        let mut max = [0.0; 3];
        for axis in 0..3 {
            if high[axis] {
                min[axis] = center[axis];
                max[axis] = bounds.max[axis];
            } else {
                min[axis] = bounds.min[axis];
                max[axis] = center[axis];
            }
        }
        BoundingBox::new(min, max)
    }
}

/// Splits `bounds` at `center` into eight boxes, ordered as [`Octant::ALL`].
///
/// The boxes tile `bounds` without gaps and share only faces.
pub fn split(bounds: &BoundingBox, center: &[f64; 3]) -> [BoundingBox; 8] {
    Octant::ALL.map(|octant| octant.region(bounds, center))
}
