use crate::chess::Vector;
use derive_more::{Display, Error};
use std::{ops::Not, str::FromStr};

/// One of the two players.
///
/// Movement rules are written from the perspective of [`Side::Front`], whose pieces advance
/// towards row 0.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum Side {
    #[display(fmt = "white")]
    Front,
    #[display(fmt = "black")]
    Back,
}

impl Side {
    /// Both sides, [`Side::Front`] first.
    pub const ALL: [Side; 2] = [Side::Front, Side::Back];

    /// Whether movement vectors must be flipped vertically for this side.
    #[inline(always)]
    pub fn flips(self) -> bool {
        self == Side::Back
    }

    /// The direction this side's pawns advance in.
    #[inline(always)]
    pub fn forward(self) -> Vector {
        match self {
            Side::Front => Vector::new(-1, 0),
            Side::Back => Vector::new(1, 0),
        }
    }

    /// The row this side starts from on a board of the given height.
    #[inline(always)]
    pub fn home_row(self, height: usize) -> i32 {
        match self {
            Side::Front => height as i32 - 1,
            Side::Back => 0,
        }
    }

    /// The row this side advances towards on a board of the given height.
    #[inline(always)]
    pub fn away_row(self, height: usize) -> i32 {
        (!self).home_row(height)
    }

    /// The character that denotes this side in board definitions.
    #[inline(always)]
    pub fn symbol(self) -> char {
        match self {
            Side::Front => 'w',
            Side::Back => 'b',
        }
    }
}

impl Not for Side {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        match self {
            Side::Front => Side::Back,
            Side::Back => Side::Front,
        }
    }
}

/// The reason why parsing [`Side`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse side, expected `w` or `b`")]
pub struct ParseSideError;

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "w" => Ok(Side::Front),
            "b" => Ok(Side::Back),
            _ => Err(ParseSideError),
        }
    }
}
