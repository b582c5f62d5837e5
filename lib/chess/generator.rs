use crate::chess::{Board, Descriptor, Descriptors, Move, MoveKind, MoveKinds, Moves, Side, Vector};

impl Descriptor {
    /// Walks every rule outwards from `whence` on behalf of a piece of the given [`Side`].
    ///
    /// Empty cells covered by an attacking rule are recorded as invalid attacks.
    pub fn generate(&self, board: &Board, side: Side, whence: Vector) -> Moves {
        let mut moves = Moves::default();

        for rule in self.rules() {
            for direction in rule.directions(side) {
                if direction == Vector::default() {
                    continue;
                }

                let mut whither = whence + direction;
                while let Some(cell) = board.at(whither) {
                    match cell.piece() {
                        None => {
                            if rule.kinds().contains(MoveKinds::MOVE) {
                                moves.push(Move::new(whither, MoveKind::Move, true));
                            }

                            if rule.kinds().contains(MoveKinds::ATTACK) {
                                moves.push(Move::new(whither, MoveKind::Attack, false));
                            }

                            if !rule.expands() {
                                break;
                            }
                        }

                        Some(p) if p.side() == side => break,

                        Some(_) => {
                            if rule.kinds().contains(MoveKinds::ATTACK) {
                                moves.push(Move::new(whither, MoveKind::Attack, true));
                            }

                            break;
                        }
                    }

                    whither += direction;
                }
            }
        }

        moves
    }
}

impl Descriptors {
    /// The raw candidate [`Moves`] of the piece at `whence`, if any.
    pub fn generate(&self, board: &Board, whence: Vector) -> Option<Moves> {
        let piece = board.piece_at(whence)?;
        Some(self[piece.role()].generate(board, piece.side(), whence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::{Piece, Role};
    use proptest::{collection::vec, prelude::*, sample::select};
    use std::collections::HashSet;
    use test_strategy::proptest;

    fn square() -> impl Strategy<Value = Vector> {
        (0..8i32, 0..8i32).prop_map(|(r, c)| Vector::new(r, c))
    }

    fn populated(others: &[(Vector, Side)], role: Role, side: Side, whence: Vector) -> Board {
        let mut board = Board::new(8, 8);
        for &(v, s) in others {
            board.place(v, Piece::new(Role::Pawn, s));
        }

        board.place(whence, Piece::new(role, side));
        board
    }

    #[proptest]
    fn sliding_pieces_stop_at_first_occupied_cell(
        #[strategy(select(vec![Role::Queen, Role::Rook, Role::Bishop]))] r: Role,
        s: Side,
        #[strategy(square())] whence: Vector,
        #[strategy(vec((square(), any::<Side>()), 0..12))] others: Vec<(Vector, Side)>,
    ) {
        let board = populated(&others, r, s, whence);
        let table = Descriptors::default();
        let moves = table.generate(&board, whence).unwrap_or_default();

        let mut reachable = HashSet::new();
        for rule in table[r].rules() {
            for d in rule.directions(s) {
                let mut whither = whence + d;
                while let Some(cell) = board.at(whither) {
                    reachable.insert(whither);
                    let here: Vec<_> = moves.iter().filter(|m| m.whither() == whither).collect();
                    match cell.piece() {
                        None => {
                            assert!(here.iter().any(|m| m.kind() == MoveKind::Move && m.is_valid()));
                            assert!(here.iter().any(|m| m.kind() == MoveKind::Attack && !m.is_valid()));
                        }

                        Some(p) => {
                            assert_eq!(here.iter().any(|m| m.is_capture()), p.side() != s);
                            assert!(here.iter().all(|m| m.kind() == MoveKind::Attack));
                            break;
                        }
                    }

                    whither += d;
                }
            }
        }

        assert_eq!(moves.iter().map(Move::whither).collect::<HashSet<_>>(), reachable);
    }

    #[proptest]
    fn stepping_pieces_yield_one_cell_per_direction(
        #[strategy(select(vec![Role::King, Role::Knight]))] r: Role,
        s: Side,
        #[strategy(square())] whence: Vector,
    ) {
        let mut board = Board::new(8, 8);
        board.place(whence, Piece::new(r, s));

        let table = Descriptors::default();
        let moves = table.generate(&board, whence).unwrap_or_default();
        let directions: HashSet<_> = table[r].rules().iter().flat_map(|rule| rule.directions(s)).collect();

        let targets: HashSet<_> = moves.iter().map(Move::whither).collect();
        assert!(targets.iter().all(|&v| directions.contains(&(v - whence))));
        assert_eq!(moves.valid().count(), targets.len());
    }

    #[proptest]
    fn pawns_neither_advance_diagonally_nor_capture_straight_ahead(
        s: Side,
        #[strategy(square())] whence: Vector,
        #[strategy(vec((square(), any::<Side>()), 0..12))] others: Vec<(Vector, Side)>,
    ) {
        let board = populated(&others, Role::Pawn, s, whence);

        let moves = Descriptors::default().generate(&board, whence).unwrap_or_default();
        for m in moves.iter() {
            let d = m.whither() - whence;
            assert_eq!(d.row, s.forward().row);
            match m.kind() {
                MoveKind::Move => assert_eq!(d.col, 0),
                MoveKind::Attack => assert_ne!(d.col, 0),
            }
        }
    }

    #[test]
    fn empty_cell_generates_nothing() {
        let board = Board::new(3, 3);
        assert_eq!(Descriptors::default().generate(&board, Vector::new(1, 1)), None);
    }

    #[test]
    fn rook_in_corner_of_empty_board_covers_its_row_and_column() {
        let mut board = Board::new(4, 5);
        let whence = Vector::new(4, 0);
        board.place(whence, Piece::new(Role::Rook, Side::Front));

        let moves = Descriptors::default().generate(&board, whence).unwrap_or_default();
        assert_eq!(moves.valid().count(), 3 + 4);
        assert_eq!(moves.attacks().count(), 3 + 4);
        assert_eq!(moves.captures().count(), 0);
    }

    #[test]
    fn zero_length_rule_is_ignored() {
        let mut board = Board::new(3, 3);
        let whence = Vector::new(1, 1);
        board.place(whence, Piece::new(Role::King, Side::Front));

        let descriptor = Descriptor::new([crate::chess::Rule::new(Vector::default(), true, true)]);
        assert_eq!(descriptor.generate(&board, Side::Front, whence), Moves::default());
    }
}
