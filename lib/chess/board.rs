use crate::chess::*;
use std::fmt::{self, Write};

/// A rectangular grid of [`Cell`]s, along with the cached [`Moves`] of every piece on it.
///
/// The cache is only trustworthy right after it has been supplied by an
/// [`Evaluator`][`crate::chess::Evaluator`]; any mutation of the grid marks it dirty.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    moves: Vec<Option<Moves>>,
    dirty: bool,
}

impl Default for Board {
    #[inline(always)]
    fn default() -> Self {
        Board::new(0, 0)
    }
}

impl Board {
    /// An empty board of the given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        let mut board = Board {
            width: 0,
            height: 0,
            cells: Vec::new(),
            moves: Vec::new(),
            dirty: true,
        };

        board.reset(width, height);
        board
    }

    /// Reinitializes this board to empty cells of the given dimensions.
    pub fn reset(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = (0..height as i32)
            .flat_map(|r| (0..width as i32).map(move |c| Cell::new(Vector::new(r, c))))
            .collect();
        self.moves = vec![None; width * height];
        self.dirty = true;
    }

    /// The number of columns.
    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    /// The number of rows.
    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the coordinate lies on this board.
    #[inline(always)]
    pub fn contains(&self, coord: Vector) -> bool {
        coord.inbounds(self.width, self.height)
    }

    /// Every [`Cell`], in row-major order.
    #[inline(always)]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The [`Cell`] at the given coordinate, if in bounds.
    #[inline(always)]
    pub fn at(&self, coord: Vector) -> Option<&Cell> {
        self.contains(coord).then(|| &self.cells[coord.index(self.width)])
    }

    #[inline(always)]
    fn at_mut(&mut self, coord: Vector) -> Option<&mut Cell> {
        let width = self.width;
        self.contains(coord).then(|| &mut self.cells[coord.index(width)])
    }

    /// The [`Cell`]s of the given row, if in bounds.
    #[inline(always)]
    pub fn row_at(&self, row: i32) -> Option<&[Cell]> {
        let r = usize::try_from(row).ok().filter(|&r| r < self.height)?;
        Some(&self.cells[r * self.width..(r + 1) * self.width])
    }

    /// The [`Piece`] at the given coordinate, if any.
    #[inline(always)]
    pub fn piece_at(&self, coord: Vector) -> Option<&Piece> {
        self.at(coord)?.piece()
    }

    /// An iterator over every piece on the board, in row-major order.
    #[inline(always)]
    pub fn pieces(&self) -> impl DoubleEndedIterator<Item = (Vector, &Piece)> + '_ {
        self.cells
            .iter()
            .filter_map(|c| Some((c.coord(), c.piece()?)))
    }

    /// Places a [`Piece`] on the board, returning the one it displaced.
    ///
    /// Does nothing if the coordinate is out of bounds.
    pub fn place(&mut self, coord: Vector, piece: Piece) -> Option<Piece> {
        let displaced = self.at_mut(coord)?.place(piece);
        self.dirty = true;
        displaced
    }

    /// Removes the [`Piece`] at the given coordinate.
    pub fn remove(&mut self, coord: Vector) -> Option<Piece> {
        let removed = self.at_mut(coord)?.take();
        self.dirty = true;
        removed
    }

    /// Rewrites the [`Role`] of the piece at the given coordinate.
    ///
    /// Returns whether there was a piece to promote.
    pub fn promote(&mut self, coord: Vector, role: Role) -> bool {
        match self.at_mut(coord).and_then(Cell::piece_mut) {
            None => false,
            Some(p) => {
                p.promote(role);
                self.dirty = true;
                true
            }
        }
    }

    /// Whether the cached moves no longer reflect the pieces on the board.
    #[inline(always)]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The cached [`Moves`] of the piece at the given coordinate.
    ///
    /// # Panics
    ///
    /// Panics if the board is dirty.
    #[inline(always)]
    pub fn moves_at(&self, coord: Vector) -> Option<&Moves> {
        assert!(!self.dirty, "attempted to read moves from a dirty board");
        self.stale_moves_at(coord)
    }

    /// The cached [`Moves`] at the given coordinate, whether or not the board is dirty.
    #[inline(always)]
    pub fn stale_moves_at(&self, coord: Vector) -> Option<&Moves> {
        if self.contains(coord) {
            self.moves[coord.index(self.width)].as_ref()
        } else {
            None
        }
    }

    #[inline(always)]
    pub(crate) fn moves_at_mut(&mut self, coord: Vector) -> Option<&mut Moves> {
        if self.contains(coord) {
            self.moves[coord.index(self.width)].as_mut()
        } else {
            None
        }
    }

    /// Replaces the cached moves and marks the board clean.
    pub(crate) fn supply(&mut self, moves: Vec<Option<Moves>>) {
        assert_eq!(moves.len(), self.cells.len(), "moves grid does not fit the board");
        self.moves = moves;
        self.dirty = false;
    }

    /// Moves the piece at `whence` onto `whither`, if that is one of its valid moves.
    ///
    /// # Panics
    ///
    /// Panics if the board is dirty.
    pub fn play(&mut self, whence: Vector, whither: Vector) -> Result<(), IllegalMove> {
        match self.moves_at(whence).and_then(|ms| ms.find(whither)) {
            None => Err(IllegalMove { whence, whither }),
            Some(_) => {
                self.play_unchecked(whence, whither);
                Ok(())
            }
        }
    }

    /// Moves the piece at `whence` onto `whither` without validation.
    ///
    /// The effects of the matching cached moves are triggered even if the board is dirty.
    pub fn play_unchecked(&mut self, whence: Vector, whither: Vector) {
        let effects = self
            .stale_moves_at(whence)
            .map(|ms| ms.effects(whither))
            .unwrap_or_default();

        self.execute(whence, whither, effects);
    }

    /// Moves the piece at `whence` onto `whither` and triggers the given effects, without
    /// consulting the cached moves at all.
    pub fn execute(
        &mut self,
        whence: Vector,
        whither: Vector,
        effects: impl IntoIterator<Item = Effect>,
    ) {
        if whence == whither || self.piece_at(whence).is_none() || !self.contains(whither) {
            return;
        }

        self.transfer(whence, whither);

        for effect in effects {
            self.apply(whither, effect);
        }

        for cell in &mut self.cells {
            if let Some(p) = cell.piece_mut() {
                p.update_tags();
            }
        }

        self.dirty = true;
    }

    /// Relocates a piece, destroying whatever it lands on and tagging it as moved.
    fn transfer(&mut self, whence: Vector, whither: Vector) {
        let Some(mut piece) = self.at_mut(whence).and_then(Cell::take) else {
            return;
        };

        if !piece.has_tag(TagKind::HasMoved) {
            piece.add_tag(Tag::new(TagKind::HasMoved));
        }

        if let Some(cell) = self.at_mut(whither) {
            cell.place(piece);
        }

        self.dirty = true;
    }

    /// Executes a manoeuvre [`Effect`] for a piece that has just landed on `whither`.
    fn apply(&mut self, whither: Vector, effect: Effect) {
        match effect {
            Effect::Tag(tag) => {
                if let Some(p) = self.at_mut(whither).and_then(Cell::piece_mut) {
                    p.add_tag(tag);
                }
            }

            Effect::Capture(coord) => {
                self.remove(coord);
            }

            Effect::Castle { direction } => {
                let mut coord = whither + direction;
                while self.contains(coord) {
                    if self.piece_at(coord).is_some_and(|p| p.role() == Role::Rook) {
                        self.transfer(coord, whither - direction);
                        return;
                    }

                    coord += direction;
                }
            }
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let margin = self.height.to_string().len();

        for (r, row) in self.cells.chunks(self.width.max(1)).enumerate() {
            write!(f, "{:>margin$} ", self.height - r)?;
            for cell in row {
                f.write_char(cell.piece().map_or('.', Piece::symbol))?;
            }

            f.write_char('\n')?;
        }

        write!(f, "{:>margin$} ", "")?;
        for c in 0..self.width {
            f.write_str(&file_to_string(c))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    fn board(width: usize, height: usize, pieces: &[(i32, i32, Role, Side)]) -> Board {
        let mut board = Board::new(width, height);
        for &(r, c, role, side) in pieces {
            board.place(Vector::new(r, c), Piece::new(role, side));
        }

        board
    }

    #[proptest]
    fn new_board_is_empty_and_dirty(#[strategy(0usize..12)] w: usize, #[strategy(0usize..12)] h: usize) {
        let b = Board::new(w, h);
        assert_eq!((b.width(), b.height()), (w, h));
        assert_eq!(b.pieces().count(), 0);
        assert!(b.is_dirty());
    }

    #[proptest]
    fn cells_know_their_coordinates(
        #[strategy(1usize..12)] w: usize,
        #[strategy(1usize..12)] h: usize,
        #[strategy(0..#h as i32)] r: i32,
        #[strategy(0..#w as i32)] c: i32,
    ) {
        let b = Board::new(w, h);
        let v = Vector::new(r, c);
        assert_eq!(b.at(v).map(Cell::coord), Some(v));
        assert_eq!(b.row_at(r).map(|row| row[c as usize].coord()), Some(v));
    }

    #[proptest]
    fn accessors_return_none_out_of_bounds(
        #[strategy(0usize..12)] w: usize,
        #[strategy(0usize..12)] h: usize,
        #[filter(!#v.inbounds(#w, #h))] v: Vector,
    ) {
        let b = Board::new(w, h);
        assert_eq!(b.at(v), None);
        assert_eq!(b.piece_at(v), None);
        assert_eq!(b.stale_moves_at(v), None);
    }

    #[proptest]
    fn row_at_returns_none_out_of_bounds(
        #[strategy(1usize..12)] w: usize,
        #[strategy(0usize..12)] h: usize,
        #[filter(#r < 0 || #r >= #h as i32)] r: i32,
    ) {
        assert_eq!(Board::new(w, h).row_at(r), None);
    }

    #[proptest]
    fn placed_piece_can_be_removed(
        #[strategy(1usize..12)] w: usize,
        #[strategy(1usize..12)] h: usize,
        #[strategy(0..#h as i32)] r: i32,
        #[strategy(0..#w as i32)] c: i32,
        p: Piece,
    ) {
        let mut b = Board::new(w, h);
        let v = Vector::new(r, c);
        assert_eq!(b.place(v, p.clone()), None);
        assert_eq!(b.piece_at(v), Some(&p));
        assert_eq!(b.remove(v), Some(p));
        assert_eq!(b.piece_at(v), None);
    }

    #[test]
    fn reset_clears_the_board() {
        let mut b = board(3, 3, &[(0, 0, Role::King, Side::Back)]);
        b.reset(4, 2);
        assert_eq!((b.width(), b.height()), (4, 2));
        assert_eq!(b.pieces().count(), 0);
    }

    #[test]
    #[should_panic]
    fn reading_moves_from_dirty_board_panics() {
        let b = board(3, 3, &[(0, 0, Role::King, Side::Back)]);
        b.moves_at(Vector::new(0, 0));
    }

    #[test]
    fn stale_moves_can_be_read_from_dirty_board() {
        let b = board(3, 3, &[(0, 0, Role::King, Side::Back)]);
        assert_eq!(b.stale_moves_at(Vector::new(0, 0)), None);
    }

    #[test]
    fn supplying_moves_cleans_the_board() {
        let mut b = board(2, 1, &[(0, 0, Role::Rook, Side::Front)]);
        let ms = Moves::from(vec![Move::new(Vector::new(0, 1), MoveKind::Move, true)]);
        b.supply(vec![Some(ms.clone()), None]);
        assert!(!b.is_dirty());
        assert_eq!(b.moves_at(Vector::new(0, 0)), Some(&ms));
    }

    #[test]
    fn playing_marks_piece_as_moved_and_board_dirty() {
        let (a, b) = (Vector::new(0, 0), Vector::new(0, 1));
        let mut board = board(2, 1, &[(0, 0, Role::Rook, Side::Front)]);
        board.supply(vec![Some(Moves::from(vec![Move::new(b, MoveKind::Move, true)])), None]);

        assert_eq!(board.play(a, b), Ok(()));
        assert!(board.is_dirty());
        assert_eq!(board.piece_at(a), None);
        assert!(board.piece_at(b).is_some_and(|p| p.has_tag(TagKind::HasMoved)));
    }

    #[test]
    fn playing_rejects_destinations_that_are_not_valid_moves() {
        let (a, b) = (Vector::new(0, 0), Vector::new(0, 1));
        let mut board = board(2, 1, &[(0, 0, Role::Rook, Side::Front)]);
        board.supply(vec![Some(Moves::from(vec![Move::new(b, MoveKind::Move, false)])), None]);

        assert_eq!(board.play(a, b), Err(IllegalMove { whence: a, whither: b }));
        assert!(!board.is_dirty());
    }

    #[test]
    fn playing_captures_the_occupant() {
        let (a, b) = (Vector::new(0, 0), Vector::new(0, 2));
        let mut board = board(3, 1, &[(0, 0, Role::Rook, Side::Front), (0, 2, Role::Pawn, Side::Back)]);
        board.play_unchecked(a, b);
        assert_eq!(board.pieces().count(), 1);
        assert_eq!(board.piece_at(b).map(Piece::side), Some(Side::Front));
    }

    #[test]
    fn capture_effect_removes_piece_beside_the_origin() {
        let (a, b, c) = (Vector::new(1, 0), Vector::new(0, 1), Vector::new(1, 1));
        let mut board = board(2, 2, &[(1, 0, Role::Pawn, Side::Front), (1, 1, Role::Pawn, Side::Back)]);
        let ms = Moves::from(vec![Move::manoeuvre(b, Effect::Capture(c))]);
        board.supply(vec![None, None, Some(ms), None]);

        assert_eq!(board.play(a, b), Ok(()));
        assert_eq!(board.piece_at(c), None);
        assert_eq!(board.pieces().count(), 1);
    }

    #[test]
    fn castle_effect_jumps_rook_over_king() {
        let (king, whither) = (Vector::new(0, 4), Vector::new(0, 6));
        let direction = Vector::new(0, 1);
        let mut board = board(8, 1, &[(0, 4, Role::King, Side::Front), (0, 7, Role::Rook, Side::Front)]);
        let mut grid = vec![None; 8];
        grid[4] = Some(Moves::from(vec![Move::manoeuvre(whither, Effect::Castle { direction })]));
        board.supply(grid);

        assert_eq!(board.play(king, whither), Ok(()));
        assert_eq!(board.piece_at(whither).map(Piece::role), Some(Role::King));
        assert_eq!(board.piece_at(Vector::new(0, 5)).map(Piece::role), Some(Role::Rook));
        assert_eq!(board.piece_at(Vector::new(0, 7)), None);
        assert!(board.pieces().all(|(_, p)| p.has_tag(TagKind::HasMoved)));
    }

    #[test]
    fn tag_effect_survives_the_move_that_applied_it() {
        let (a, b) = (Vector::new(2, 0), Vector::new(0, 0));
        let mut board = board(1, 3, &[(2, 0, Role::Pawn, Side::Front)]);
        let tag = Tag::new(TagKind::EnPassant);
        board.supply(vec![None, None, Some(Moves::from(vec![Move::manoeuvre(b, Effect::Tag(tag))]))]);

        assert_eq!(board.play(a, b), Ok(()));
        assert!(board.piece_at(b).is_some_and(|p| p.has_tag(TagKind::EnPassant)));
    }

    #[test]
    fn every_move_ages_every_tag() {
        let mut board = board(3, 1, &[(0, 0, Role::Rook, Side::Front), (0, 2, Role::Pawn, Side::Back)]);
        let pawn = Vector::new(0, 2);
        board.remove(pawn);
        let mut p = Piece::new(Role::Pawn, Side::Back);
        p.add_tag(Tag::new(TagKind::EnPassant));
        board.place(pawn, p);

        board.play_unchecked(Vector::new(0, 0), Vector::new(0, 1));
        assert!(board.piece_at(pawn).is_some_and(|p| p.has_tag(TagKind::EnPassant)));
        board.play_unchecked(Vector::new(0, 1), Vector::new(0, 0));
        assert!(board.piece_at(pawn).is_some_and(|p| !p.has_tag(TagKind::EnPassant)));
    }

    #[test]
    fn promotion_rewrites_role_and_dirties_board() {
        let v = Vector::new(0, 0);
        let mut b = board(1, 1, &[(0, 0, Role::Pawn, Side::Front)]);
        b.supply(vec![None]);
        assert!(b.promote(v, Role::Queen));
        assert!(b.is_dirty());
        assert_eq!(b.piece_at(v).map(Piece::role), Some(Role::Queen));
        assert!(!b.promote(Vector::new(1, 1), Role::Queen));
    }

    #[test]
    fn copy_is_isolated_from_original() {
        let v = Vector::new(0, 0);
        let mut original = board(2, 1, &[(0, 0, Role::Rook, Side::Front)]);
        original.supply(vec![Some(Moves::default()), None]);

        let mut copy = original.clone();
        copy.play_unchecked(v, Vector::new(0, 1));
        copy.supply(vec![None, None]);

        assert!(!original.is_dirty());
        assert_eq!(original.piece_at(v).map(Piece::tags), Some(&[][..]));
        assert_eq!(original.moves_at(v), Some(&Moves::default()));
    }

    #[test]
    fn display_draws_ranks_and_files() {
        let b = board(3, 2, &[(0, 0, Role::King, Side::Back), (1, 2, Role::Pawn, Side::Front)]);
        assert_eq!(b.to_string(), "2 k..\n1 ..P\n  abc");
    }
}
