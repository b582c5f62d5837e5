use derive_more::{Add, AddAssign, Constructor, Display, Neg, Sub, SubAssign};
use std::ops::Mul;

/// An integer vector on the board grid.
///
/// Doubles as a coordinate, where `row` 0 is the back rank of the [`Side::Back`][`crate::chess::Side::Back`]
/// player and `col` 0 is the leftmost file.
#[derive(
    Debug,
    Display,
    Default,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Neg,
    Constructor,
)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "({}, {})", row, col)]
pub struct Vector {
    #[cfg_attr(test, strategy(-64i32..64))]
    pub row: i32,
    #[cfg_attr(test, strategy(-64i32..64))]
    pub col: i32,
}

impl Vector {
    /// Rotates this vector by 90°.
    #[inline(always)]
    pub fn rotate(self) -> Self {
        Vector::new(self.col, -self.row)
    }

    /// Flips this vector vertically.
    #[inline(always)]
    pub fn flip(self) -> Self {
        Vector::new(-self.row, self.col)
    }

    /// The sign of each component.
    #[inline(always)]
    pub fn signum(self) -> Self {
        Vector::new(self.row.signum(), self.col.signum())
    }

    /// Whether this coordinate lies within a grid of the given dimensions.
    #[inline(always)]
    pub fn inbounds(self, width: usize, height: usize) -> bool {
        usize::try_from(self.row).is_ok_and(|r| r < height)
            && usize::try_from(self.col).is_ok_and(|c| c < width)
    }

    /// The index of this coordinate in a row-major grid of the given width.
    ///
    /// Only meaningful for coordinates that are [in bounds](`Self::inbounds`).
    #[inline(always)]
    pub(crate) fn index(self, width: usize) -> usize {
        self.row as usize * width + self.col as usize
    }
}

impl Mul<i32> for Vector {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: i32) -> Self::Output {
        Vector::new(self.row * rhs, self.col * rhs)
    }
}
