use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::{Evaluator, Game, Notation, Options, Setup};
use std::path::PathBuf;
use tokio::task::spawn_blocking;
use tracing::{info, instrument};

/// Lists the legal moves of a board definition.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Analyze {
    /// The evaluator configuration.
    #[clap(short, long, default_value_t)]
    options: Options,

    /// The board definition file.
    board: PathBuf,
}

impl Analyze {
    #[instrument(level = "trace", skip(self), err)]
    pub async fn execute(self) -> Result<(), Anyhow> {
        let setup = Setup::load(&self.board)?;
        let evaluator = Evaluator::with_options(self.options);
        let game = spawn_blocking(move || Game::with_evaluator(&setup, evaluator)).await?;

        info!(name = game.name(), description = game.description(), turn = %game.turn(), state = %game.state());
        println!("{}\n", game.board());

        let notation = Notation::new(game.board().height());
        for (whence, m) in game.legal_moves() {
            let (Some(from), Some(to)) = (notation.format(whence), notation.format(m.whither())) else {
                continue;
            };

            if m.is_promotion() {
                println!("{from} {to} promotes");
            } else {
                println!("{from} {to}");
            }
        }

        Ok(())
    }
}
