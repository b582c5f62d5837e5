use crate::chess::{Effect, Move, MoveKind, Vector};
use derive_more::{Deref, From};
use std::ptr;

/// The ordered candidate [`Move`]s of the piece on one cell.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash, Deref, From)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Moves(
    #[cfg_attr(test, strategy(proptest::collection::vec(proptest::prelude::any::<Move>(), 0..8)))]
    Vec<Move>,
);

impl Moves {
    /// An iterator over the candidates that may currently be executed.
    #[inline(always)]
    pub fn valid(&self) -> impl DoubleEndedIterator<Item = &Move> + '_ {
        self.0.iter().filter(|m| m.is_valid())
    }

    /// An iterator over the valid candidates, one per destination.
    ///
    /// Playing onto a destination triggers the effects of every valid candidate onto it.
    #[inline(always)]
    pub fn playable(&self) -> impl DoubleEndedIterator<Item = &Move> + '_ {
        self.valid()
            .filter(|m| self.find(m.whither()).is_some_and(|first| ptr::eq(first, *m)))
    }

    /// An iterator over every [`MoveKind::Attack`] candidate, capturable or merely covered.
    #[inline(always)]
    pub fn attacks(&self) -> impl DoubleEndedIterator<Item = &Move> + '_ {
        self.0.iter().filter(|m| m.kind() == MoveKind::Attack)
    }

    /// An iterator over the attacks onto capturable pieces.
    #[inline(always)]
    pub fn captures(&self) -> impl DoubleEndedIterator<Item = &Move> + '_ {
        self.0.iter().filter(|m| m.is_capture())
    }

    /// The first valid candidate onto the given destination, if any.
    #[inline(always)]
    pub fn find(&self, whither: Vector) -> Option<&Move> {
        self.valid().find(|m| m.whither() == whither)
    }

    /// Appends an externally constructed candidate.
    #[inline(always)]
    pub fn push(&mut self, m: Move) {
        self.0.push(m);
    }

    /// Marks the candidate at the given position as not executable.
    #[inline(always)]
    pub fn invalidate(&mut self, index: usize) {
        if let Some(m) = self.0.get_mut(index) {
            m.invalidate();
        }
    }

    /// Flags every candidate onto the given row as requiring a promotion.
    #[inline(always)]
    pub fn require_promotion(&mut self, row: i32) {
        for m in &mut self.0 {
            if m.whither().row == row {
                m.require_promotion();
            }
        }
    }

    /// The [`Effect`]s of the valid candidates onto the given destination.
    #[inline(always)]
    pub fn effects(&self, whither: Vector) -> Vec<Effect> {
        self.valid()
            .filter(|m| m.whither() == whither)
            .filter_map(Move::effect)
            .collect()
    }
}

impl FromIterator<Move> for Moves {
    #[inline(always)]
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        Moves(iter.into_iter().collect())
    }
}

impl Extend<Move> for Moves {
    #[inline(always)]
    fn extend<I: IntoIterator<Item = Move>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}
