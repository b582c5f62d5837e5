use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::{Evaluator, Options, Setup};
use std::{num::NonZeroUsize, path::PathBuf, time::Instant};
use tokio::task::spawn_blocking;
use tracing::{info, instrument};

/// Counts the positions reachable from a board definition.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Perft {
    /// The evaluator configuration.
    #[clap(short, long, default_value_t)]
    options: Options,

    /// The board definition file.
    board: PathBuf,

    /// How many plies deep to count.
    #[clap(default_value = "3")]
    depth: NonZeroUsize,
}

impl Perft {
    #[instrument(level = "trace", skip(self), err)]
    pub async fn execute(self) -> Result<(), Anyhow> {
        let setup = Setup::load(&self.board)?;
        let evaluator = Evaluator::with_options(self.options);
        let depth = self.depth.get();

        spawn_blocking(move || {
            let mut board = setup.board();
            evaluator.supply(&mut board);

            for d in 1..=depth {
                let timer = Instant::now();
                let nodes = evaluator.perft(&board, setup.turn(), d);
                info!(depth = d, nodes, elapsed = ?timer.elapsed());
            }
        })
        .await?;

        Ok(())
    }
}
