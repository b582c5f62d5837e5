use crate::chess::{Board, Cell, Effect, Move, Role, Tag, TagKind, Vector};
use std::{collections::HashSet, iter::successors};

/// A pawn's first move two cells forward, which exposes it to [`en_passant`] for one turn.
pub fn double_step(board: &Board, whence: Vector) -> Option<Move> {
    let pawn = board
        .piece_at(whence)
        .filter(|p| p.role() == Role::Pawn && !p.has_tag(TagKind::HasMoved))?;

    let forward = pawn.side().forward();
    let is_free = |v| board.at(v).is_some_and(Cell::is_empty);
    let whither = whence + forward * 2;

    if is_free(whence + forward) && is_free(whither) {
        let tag = Tag::new(TagKind::EnPassant);
        Some(Move::manoeuvre(whither, Effect::Tag(tag)))
    } else {
        None
    }
}

/// A pawn's diagonal capture of an enemy pawn beside it that has just made a [`double_step`].
pub fn en_passant(board: &Board, whence: Vector) -> Vec<Move> {
    let Some(pawn) = board.piece_at(whence).filter(|p| p.role() == Role::Pawn) else {
        return Vec::new();
    };

    let forward = pawn.side().forward();
    [Vector::new(0, -1), Vector::new(0, 1)]
        .into_iter()
        .map(|lateral| whence + lateral)
        .filter(|&beside| {
            board.piece_at(beside).is_some_and(|p| {
                p.role() == Role::Pawn
                    && p.side() != pawn.side()
                    && p.has_tag(TagKind::EnPassant)
            })
        })
        .map(|beside| (beside + forward, beside))
        .filter(|&(whither, _)| board.contains(whither))
        .map(|(whither, beside)| Move::manoeuvre(whither, Effect::Capture(beside)))
        .collect()
}

/// A king's move towards an unmoved rook on the same row, which jumps over the king.
///
/// The king lands next to the rook's starting cell and the rook lands on the other side of the
/// king. Neither the king nor any cell it passes over may be in `endangered`.
pub fn castle(board: &Board, whence: Vector, endangered: &HashSet<Vector>) -> Vec<Move> {
    let Some(king) = board
        .piece_at(whence)
        .filter(|p| p.role() == Role::King && !p.has_tag(TagKind::HasMoved))
    else {
        return Vec::new();
    };

    if endangered.contains(&whence) {
        return Vec::new();
    }

    let Some(row) = board.row_at(whence.row) else {
        return Vec::new();
    };

    row.iter()
        .filter(|cell| {
            cell.piece().is_some_and(|p| {
                p.role() == Role::Rook && p.side() == king.side() && !p.has_tag(TagKind::HasMoved)
            })
        })
        .map(Cell::coord)
        .filter(|rook| (rook.col - whence.col).abs() >= 2)
        .filter_map(|rook| {
            let direction = (rook - whence).signum();
            let mut between = successors(Some(whence + direction), |&v| Some(v + direction))
                .take_while(|&v| v != rook);

            if between.all(|v| !endangered.contains(&v) && board.at(v).is_some_and(Cell::is_empty)) {
                Some(Move::manoeuvre(rook - direction, Effect::Castle { direction }))
            } else {
                None
            }
        })
        .collect()
}
