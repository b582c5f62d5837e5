use crate::chess::Vector;
use derive_more::{Display, Error};

/// The file letters of a 0-based column: `a` to `z`, then `aa`, `ab` and so on.
pub fn file_to_string(col: usize) -> String {
    let mut letters = Vec::new();
    let mut n = col as u128 + 1;

    while n > 0 {
        n -= 1;
        letters.push(char::from(b'a' + (n % 26) as u8));
        n /= 26;
    }

    letters.into_iter().rev().collect()
}

/// The 0-based column denoted by file letters, the inverse of [`file_to_string`].
///
/// Letters are case-insensitive.
pub fn file_from_str(s: &str) -> Option<usize> {
    if s.is_empty() {
        return None;
    }

    let n = s.chars().try_fold(0usize, |n, c| {
        let digit = c
            .is_ascii_alphabetic()
            .then(|| (c.to_ascii_lowercase() as u8 - b'a') as usize + 1)?;
        n.checked_mul(26)?.checked_add(digit)
    })?;

    Some(n - 1)
}

/// The reason why parsing a coordinate failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "`{}` is not a valid coordinate", _0)]
pub struct ParseVectorError(#[error(not(source))] String);

/// Converts coordinates to and from algebraic text on a board of a given height.
///
/// Rank `r` denotes row `height - r`, so rank 1 is the last row.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Notation {
    height: usize,
}

impl Notation {
    #[inline(always)]
    pub fn new(height: usize) -> Self {
        Notation { height }
    }

    /// The algebraic text of a coordinate, if it has one.
    pub fn format(&self, coord: Vector) -> Option<String> {
        let col = usize::try_from(coord.col).ok()?;
        let rank = self.height as i64 - coord.row as i64;
        (rank > 0).then(|| format!("{}{}", file_to_string(col), rank))
    }

    /// Parses algebraic text such as `a1` or `ab12` into a coordinate.
    ///
    /// The result may lie beyond the board, but never has a negative column.
    pub fn parse(&self, s: &str) -> Result<Vector, ParseVectorError> {
        let error = || ParseVectorError(s.into());
        let split = s.find(|c: char| !c.is_ascii_alphabetic()).unwrap_or(s.len());
        let (file, rank) = s.split_at(split);

        if rank.is_empty() || !rank.chars().all(|c| c.is_ascii_digit()) {
            return Err(error());
        }

        let col = file_from_str(file).and_then(|c| i32::try_from(c).ok()).ok_or_else(error)?;
        let rank: i64 = rank.parse().map_err(|_| error())?;
        let row = i32::try_from(self.height as i64 - rank).map_err(|_| error())?;

        Ok(Vector::new(row, col))
    }
}
