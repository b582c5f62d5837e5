use crate::chess::{Tag, Vector};
use bitflags::bitflags;
use derive_more::{Display, Error};

/// Whether a [`Move`] relocates a piece onto an empty cell or captures onto an occupied one.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum MoveKind {
    #[display(fmt = "move")]
    Move,
    #[display(fmt = "attack")]
    Attack,
}

bitflags! {
    /// The set of [`MoveKind`]s a movement rule produces.
    pub struct MoveKinds: u8 {
        const MOVE =    0b01;
        const ATTACK =  0b10;
    }
}

impl From<MoveKind> for MoveKinds {
    #[inline(always)]
    fn from(k: MoveKind) -> Self {
        match k {
            MoveKind::Move => MoveKinds::MOVE,
            MoveKind::Attack => MoveKinds::ATTACK,
        }
    }
}

/// A side effect that executing a manoeuvre has beyond relocating the moving piece.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Effect {
    /// Attaches a [`Tag`] to the piece on the destination.
    Tag(Tag),
    /// Removes the piece on the given cell.
    Capture(Vector),
    /// Relocates the first rook beyond the destination, scanning in `direction`,
    /// onto the cell just behind the destination.
    Castle { direction: Vector },
}

/// A candidate move of a piece onto a destination cell.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Move {
    whither: Vector,
    kind: MoveKind,
    valid: bool,
    effect: Option<Effect>,
    promotion: bool,
}

impl Move {
    /// A plain candidate without side effects.
    #[inline(always)]
    pub fn new(whither: Vector, kind: MoveKind, valid: bool) -> Self {
        Move {
            whither,
            kind,
            valid,
            effect: None,
            promotion: false,
        }
    }

    /// A valid [`MoveKind::Move`] that triggers an [`Effect`] when executed.
    #[inline(always)]
    pub fn manoeuvre(whither: Vector, effect: Effect) -> Self {
        Move {
            effect: Some(effect),
            ..Move::new(whither, MoveKind::Move, true)
        }
    }

    /// The destination.
    #[inline(always)]
    pub fn whither(&self) -> Vector {
        self.whither
    }

    /// This move's [`MoveKind`].
    #[inline(always)]
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Whether this move may currently be executed.
    ///
    /// An invalid [`MoveKind::Attack`] marks a cell that is covered, but holds nothing to capture.
    #[inline(always)]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether this is an attack onto a capturable piece.
    #[inline(always)]
    pub fn is_capture(&self) -> bool {
        self.valid && self.kind == MoveKind::Attack
    }

    /// Whether executing this move requires choosing a promotion.
    #[inline(always)]
    pub fn is_promotion(&self) -> bool {
        self.promotion
    }

    /// The [`Effect`] triggered by executing this move, if any.
    #[inline(always)]
    pub fn effect(&self) -> Option<Effect> {
        self.effect
    }

    /// Marks this move as not executable.
    #[inline(always)]
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Marks this move as requiring a promotion.
    #[inline(always)]
    pub fn require_promotion(&mut self) {
        self.promotion = true;
    }
}

/// Represents an illegal move in a given [`Board`][`crate::chess::Board`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "moving from {} to {} is illegal on this board", whence, whither)]
pub struct IllegalMove {
    pub whence: Vector,
    pub whither: Vector,
}
