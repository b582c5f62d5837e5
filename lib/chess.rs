mod board;
mod cell;
mod descriptor;
mod evaluator;
mod game;
mod generator;
mod manoeuvre;
mod r#move;
mod moves;
mod notation;
mod options;
mod piece;
mod role;
mod setup;
mod side;
mod state;
mod tag;
mod vector;

pub use board::*;
pub use cell::*;
pub use descriptor::*;
pub use evaluator::*;
pub use game::*;
pub use generator::*;
pub use manoeuvre::*;
pub use moves::*;
pub use notation::*;
pub use options::*;
pub use piece::*;
pub use r#move::*;
pub use role::*;
pub use setup::*;
pub use side::*;
pub use state::*;
pub use tag::*;
pub use vector::*;
