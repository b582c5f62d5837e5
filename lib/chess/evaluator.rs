use crate::chess::{castle, double_step, en_passant};
use crate::chess::{Board, Descriptors, Effect, LogicState, Moves, Options, Piece, Role, Side, Vector};
use rayon::{prelude::*, ThreadPool, ThreadPoolBuilder};
use std::{collections::HashSet, num::NonZeroUsize};
use tracing::{debug, instrument, warn};

/// Runs speculative simulations, possibly across multiple threads in parallel.
#[derive(Debug)]
enum Driver {
    Parallel(ThreadPool),
    Sequential,
}

impl Driver {
    fn new(threads: NonZeroUsize) -> Self {
        match threads.get() {
            1 => Self::Sequential,
            n => match ThreadPoolBuilder::new().num_threads(n).build() {
                Ok(pool) => Self::Parallel(pool),
                Err(e) => {
                    warn!(threads = n, "falling back to sequential evaluation, {e}");
                    Self::Sequential
                }
            },
        }
    }

    /// The items that satisfy `f`, in their original order.
    fn filter<T, F>(&self, items: &[T], f: F) -> Vec<T>
    where
        T: Copy + Send + Sync,
        F: Fn(&T) -> bool + Sync,
    {
        match self {
            Self::Sequential => items.iter().copied().filter(|t| f(t)).collect(),
            Self::Parallel(e) => e.install(|| items.par_iter().copied().filter(|t| f(t)).collect()),
        }
    }

    /// Whether any of the items satisfies `f`.
    fn any<T, F>(&self, items: &[T], f: F) -> bool
    where
        T: Sync,
        F: Fn(&T) -> bool + Send + Sync,
    {
        match self {
            Self::Sequential => items.iter().any(f),
            Self::Parallel(e) => e.install(|| items.par_iter().any(f)),
        }
    }
}

/// Supplies boards with legal moves and classifies positions.
#[derive(Debug)]
pub struct Evaluator {
    descriptors: Descriptors,
    driver: Driver,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Initializes the evaluator with the orthodox [`Descriptors`] and the default [`Options`].
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Initializes the evaluator with the orthodox [`Descriptors`] and the given [`Options`].
    pub fn with_options(options: Options) -> Self {
        Self::with_descriptors(Descriptors::default(), options)
    }

    /// Initializes the evaluator with the given [`Descriptors`] and [`Options`].
    pub fn with_descriptors(descriptors: Descriptors, options: Options) -> Self {
        Evaluator {
            descriptors,
            driver: Driver::new(options.threads),
        }
    }

    /// The movement rules this evaluator generates moves from.
    #[inline(always)]
    pub fn descriptors(&self) -> &Descriptors {
        &self.descriptors
    }

    /// The pseudo-legal moves of the piece at `whence`, including pawn manoeuvres.
    fn pseudo_legal(&self, board: &Board, whence: Vector) -> Option<Moves> {
        let piece = board.piece_at(whence)?;
        let mut moves = self.descriptors.generate(board, whence)?;

        if piece.role() == Role::Pawn {
            moves.extend(double_step(board, whence));
            moves.extend(en_passant(board, whence));
            moves.require_promotion(piece.side().away_row(board.height()));
        }

        Some(moves)
    }

    /// Supplies the board with pseudo-legal moves, which may leave the king in check.
    ///
    /// Castling is never supplied, since it depends on the opponent's filtered moves.
    pub fn supply_partial(&self, board: &mut Board) {
        let grid: Vec<_> = board
            .cells()
            .iter()
            .map(|c| self.pseudo_legal(board, c.coord()))
            .collect();

        board.supply(grid);
    }

    /// Supplies the board with the legal moves of both sides.
    #[instrument(level = "trace", skip_all, fields(width = board.width(), height = board.height()))]
    pub fn supply(&self, board: &mut Board) {
        self.supply_partial(board);

        let candidates: Vec<_> = board
            .pieces()
            .flat_map(|(whence, _)| {
                board
                    .moves_at(whence)
                    .into_iter()
                    .flat_map(|ms| ms.iter().enumerate())
                    .filter(|(_, m)| m.is_valid())
                    .map(move |(i, m)| (whence, i, m.whither()))
            })
            .collect();

        let snapshot: &Board = board;
        let illegal = self.driver.filter(&candidates, |&(whence, _, whither)| {
            self.results_in_check(snapshot, whence, whither)
        });

        if !illegal.is_empty() {
            debug!(illegal = illegal.len(), "invalidated moves that leave the king in check");
        }

        for (whence, i, _) in illegal {
            if let Some(ms) = board.moves_at_mut(whence) {
                ms.invalidate(i);
            }
        }

        let mut castles = Vec::new();
        for side in Side::ALL {
            let endangered = self.endangered(board, side);
            for (whence, _) in board.pieces().filter(|(_, p)| p.side() == side) {
                for m in castle(board, whence, &endangered) {
                    if !self.simulate(board, whence, m.whither(), m.effect()) {
                        castles.push((whence, m));
                    }
                }
            }
        }

        for (whence, m) in castles {
            if let Some(ms) = board.moves_at_mut(whence) {
                ms.push(m);
            }
        }
    }

    /// Every cell attacked by the opponent of the given [`Side`], whether or not it holds a piece.
    ///
    /// # Panics
    ///
    /// Panics if the board is dirty.
    pub fn endangered(&self, board: &Board, side: Side) -> HashSet<Vector> {
        board
            .pieces()
            .filter(|(_, p)| p.side() != side)
            .filter_map(|(whence, _)| board.moves_at(whence))
            .flat_map(|ms| ms.attacks().map(|m| m.whither()))
            .collect()
    }

    /// Whether any king of the given [`Side`] stands on an endangered cell.
    ///
    /// # Panics
    ///
    /// Panics if the board is dirty.
    pub fn in_check(&self, board: &Board, side: Side) -> bool {
        let endangered = self.endangered(board, side);
        board
            .pieces()
            .filter(|(_, p)| p.side() == side && p.role() == Role::King)
            .any(|(v, _)| endangered.contains(&v))
    }

    /// Whether moving the piece at `whence` onto `whither` leaves its own side in check.
    ///
    /// The move is simulated on a copy of the board.
    pub fn results_in_check(&self, board: &Board, whence: Vector, whither: Vector) -> bool {
        let effects = board
            .stale_moves_at(whence)
            .map(|ms| ms.effects(whither))
            .unwrap_or_default();

        self.simulate(board, whence, whither, effects)
    }

    /// Whether executing a move with the given effects leaves the mover's side in check.
    fn simulate(
        &self,
        board: &Board,
        whence: Vector,
        whither: Vector,
        effects: impl IntoIterator<Item = Effect>,
    ) -> bool {
        let Some(side) = board.piece_at(whence).map(Piece::side) else {
            return false;
        };

        let mut copy = board.clone();
        copy.execute(whence, whither, effects);
        self.supply_partial(&mut copy);
        self.in_check(&copy, side)
    }

    /// Classifies the position from the perspective of the given [`Side`].
    ///
    /// # Panics
    ///
    /// Panics if the board is dirty.
    #[instrument(level = "trace", skip(self, board), ret)]
    pub fn evaluate(&self, board: &Board, side: Side) -> LogicState {
        let legal: Vec<_> = board
            .pieces()
            .filter(|(_, p)| p.side() == side)
            .flat_map(|(whence, _)| {
                board
                    .moves_at(whence)
                    .into_iter()
                    .flat_map(|ms| ms.valid())
                    .map(move |m| (whence, m.whither()))
            })
            .collect();

        if self.in_check(board, side) {
            let escapable = self.driver.any(&legal, |&(whence, whither)| {
                !self.results_in_check(board, whence, whither)
            });

            if escapable {
                LogicState::Check
            } else {
                LogicState::Checkmate
            }
        } else if legal.is_empty() {
            LogicState::Stalemate
        } else {
            LogicState::None
        }
    }

    /// Counts the leaves of the legal move tree of the given depth.
    ///
    /// Promotions are counted once and continue as a queen.
    ///
    /// # Panics
    ///
    /// Panics if the board is dirty.
    pub fn perft(&self, board: &Board, side: Side, depth: usize) -> usize {
        let moves: Vec<_> = board
            .pieces()
            .filter(|(_, p)| p.side() == side)
            .flat_map(|(whence, _)| {
                board
                    .moves_at(whence)
                    .into_iter()
                    .flat_map(|ms| ms.playable())
                    .map(move |m| (whence, m.whither(), m.is_promotion()))
            })
            .collect();

        match depth {
            0 => 1,
            1 => moves.len(),
            d => moves
                .into_iter()
                .map(|(whence, whither, promotion)| {
                    let mut next = board.clone();
                    next.play_unchecked(whence, whither);
                    if promotion {
                        next.promote(whither, Role::Queen);
                    }

                    self.supply(&mut next);
                    self.perft(&next, !side, d - 1)
                })
                .sum(),
        }
    }
}
