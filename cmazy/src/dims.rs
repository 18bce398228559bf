use std::ops::{Add, Mul, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Grid coordinate, `Dims(x, y)`. Also used for sizes and offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dims(pub i32, pub i32);

impl Dims {
    pub const ZERO: Dims = Dims(0, 0);

    pub fn iter_fill(from: Dims, to: Dims) -> impl Iterator<Item = Dims> {
        (from.1..to.1).flat_map(move |y| (from.0..to.0).map(move |x| Dims(x, y)))
    }

    pub fn all_non_negative(self) -> bool {
        self.0 >= 0 && self.1 >= 0
    }

    /// Squared straight-line distance.
    pub fn sq_dist(self, other: Dims) -> i64 {
        let Dims(dx, dy) = self - other;
        (dx as i64).pow(2) + (dy as i64).pow(2)
    }

    /// Cell exactly halfway between two cells two steps apart.
    pub fn halfway(self, other: Dims) -> Dims {
        Dims(self.0 + (other.0 - self.0) / 2, self.1 + (other.1 - self.1) / 2)
    }

    /// Both coordinates odd: the cells carving moves between.
    pub fn is_room(self) -> bool {
        self.0 % 2 != 0 && self.1 % 2 != 0
    }

    pub fn rem_euclid(self, size: Dims) -> Dims {
        Dims(self.0.rem_euclid(size.0), self.1.rem_euclid(size.1))
    }
}

impl Add for Dims {
    type Output = Dims;

    fn add(self, other: Dims) -> Dims {
        Dims(self.0 + other.0, self.1 + other.1)
    }
}

impl Sub for Dims {
    type Output = Dims;

    fn sub(self, other: Dims) -> Dims {
        Dims(self.0 - other.0, self.1 - other.1)
    }
}

impl Mul<i32> for Dims {
    type Output = Dims;

    fn mul(self, other: i32) -> Dims {
        Dims(self.0 * other, self.1 * other)
    }
}

impl std::fmt::Display for Dims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
