use crate::chess::{Board, Evaluator, IllegalMove, LogicState, Move, Role, Setup, Side, Vector};
use derive_more::{Display, Error};
use tracing::{debug, info, instrument};

/// The reason why a move was rejected by a [`Game`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum GameError {
    #[display(fmt = "the game is over")]
    Over,

    #[display(fmt = "there is no piece of the side to move at {}", whence)]
    NotYourPiece { whence: Vector },

    #[display(fmt = "{}", _0)]
    Illegal(IllegalMove),

    #[display(fmt = "moving onto {} requires a promotion", whither)]
    MissingPromotion { whither: Vector },

    #[display(fmt = "a pawn may not be promoted to {}", role)]
    InvalidPromotion { role: Role },
}

impl From<IllegalMove> for GameError {
    #[inline(always)]
    fn from(e: IllegalMove) -> Self {
        GameError::Illegal(e)
    }
}

/// A game session, alternating turns between both sides.
#[derive(Debug)]
pub struct Game {
    board: Board,
    turn: Side,
    state: LogicState,
    name: String,
    description: String,
    evaluator: Evaluator,
}

impl Game {
    /// Starts a game from the given [`Setup`] with the default [`Evaluator`].
    pub fn new(setup: &Setup) -> Self {
        Self::with_evaluator(setup, Evaluator::new())
    }

    /// Starts a game from the given [`Setup`] with the given [`Evaluator`].
    pub fn with_evaluator(setup: &Setup, evaluator: Evaluator) -> Self {
        let mut board = setup.board();
        evaluator.supply(&mut board);
        let state = evaluator.evaluate(&board, setup.turn());

        Game {
            board,
            turn: setup.turn(),
            state,
            name: setup.name().into(),
            description: setup.description().into(),
            evaluator,
        }
    }

    /// The side to move.
    #[inline(always)]
    pub fn turn(&self) -> Side {
        self.turn
    }

    /// The state of the side to move.
    #[inline(always)]
    pub fn state(&self) -> LogicState {
        self.state
    }

    /// The current position, always supplied with legal moves.
    #[inline(always)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline(always)]
    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// The legal moves of the piece at `whence`, if it belongs to the side to move.
    pub fn moves_at(&self, whence: Vector) -> impl DoubleEndedIterator<Item = &Move> + '_ {
        self.board
            .piece_at(whence)
            .filter(|p| p.side() == self.turn && !self.state.is_final())
            .and_then(|_| self.board.moves_at(whence))
            .into_iter()
            .flat_map(|ms| ms.playable())
    }

    /// Every legal move of the side to move, as pairs of origin and destination.
    pub fn legal_moves(&self) -> impl Iterator<Item = (Vector, &Move)> + '_ {
        self.board
            .pieces()
            .flat_map(move |(whence, _)| self.moves_at(whence).map(move |m| (whence, m)))
    }

    /// Plays a move for the side to move, then hands the turn over.
    ///
    /// Moving a pawn onto its far row requires a promotion [`Role`], which is ignored otherwise.
    #[instrument(level = "debug", skip(self), fields(turn = %self.turn), err)]
    pub fn play(
        &mut self,
        whence: Vector,
        whither: Vector,
        promotion: Option<Role>,
    ) -> Result<LogicState, GameError> {
        if self.state.is_final() {
            return Err(GameError::Over);
        }

        if !self.board.piece_at(whence).is_some_and(|p| p.side() == self.turn) {
            return Err(GameError::NotYourPiece { whence });
        }

        let requires_promotion = self
            .board
            .moves_at(whence)
            .and_then(|ms| ms.find(whither))
            .ok_or(IllegalMove { whence, whither })?
            .is_promotion();

        let promotion = match promotion {
            _ if !requires_promotion => None,
            None => return Err(GameError::MissingPromotion { whither }),
            Some(role) if !role.is_promotion() => return Err(GameError::InvalidPromotion { role }),
            role => role,
        };

        self.board.play(whence, whither)?;

        if let Some(role) = promotion {
            self.board.promote(whither, role);
            debug!(%whither, %role, "promoted");
        }

        self.turn = !self.turn;
        self.evaluator.supply(&mut self.board);
        self.state = self.evaluator.evaluate(&self.board, self.turn);

        info!(%whence, %whither, state = %self.state, "played");
        Ok(self.state)
    }
}
