use crate::chess::{Piece, Vector};

/// A square on the board, optionally holding a [`Piece`].
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Cell {
    coord: Vector,
    piece: Option<Piece>,
}

impl Cell {
    /// An empty cell at the given coordinate.
    #[inline(always)]
    pub fn new(coord: Vector) -> Self {
        Cell { coord, piece: None }
    }

    /// This cell's coordinate, fixed for its lifetime.
    #[inline(always)]
    pub fn coord(&self) -> Vector {
        self.coord
    }

    /// The [`Piece`] on this cell, if any.
    #[inline(always)]
    pub fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    /// A mutable reference to the [`Piece`] on this cell, if any.
    #[inline(always)]
    pub fn piece_mut(&mut self) -> Option<&mut Piece> {
        self.piece.as_mut()
    }

    /// Whether this cell holds no piece.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.piece.is_none()
    }

    /// Places a [`Piece`] on this cell, returning the one it displaced.
    #[inline(always)]
    pub fn place(&mut self, piece: Piece) -> Option<Piece> {
        self.piece.replace(piece)
    }

    /// Removes the [`Piece`] from this cell.
    #[inline(always)]
    pub fn take(&mut self) -> Option<Piece> {
        self.piece.take()
    }
}
