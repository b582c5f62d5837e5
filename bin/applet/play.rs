use crate::io::{Io, Pipe};
use anyhow::{anyhow, Error as Anyhow};
use clap::Parser;
use lib::chess::{Evaluator, Game, Notation, Options, Role, Setup, Vector};
use std::{io::ErrorKind, path::PathBuf};
use tokio::io::{stdin, stdout};
use tokio::task::spawn_blocking;
use tracing::{info, instrument, warn};

/// Plays a game on the terminal, both sides taking turns at the keyboard.
///
/// Moves are entered as the origin and the destination, such as `e2 e4`,
/// followed by the promotion letter when a pawn reaches its far row, such as `a7 a8 q`.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {
    /// The evaluator configuration.
    #[clap(short, long, default_value_t)]
    options: Options,

    /// The board definition file.
    board: PathBuf,
}

fn parse(line: &str, notation: Notation) -> Result<(Vector, Vector, Option<Role>), Anyhow> {
    let tokens: Vec<_> = line.split_whitespace().collect();
    match tokens[..] {
        [from, to] => Ok((notation.parse(from)?, notation.parse(to)?, None)),
        [from, to, role] => Ok((notation.parse(from)?, notation.parse(to)?, Some(role.parse()?))),
        _ => Err(anyhow!("expected a move such as `e2 e4`, got `{line}`")),
    }
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub async fn execute(self) -> Result<(), Anyhow> {
        let setup = Setup::load(&self.board)?;
        let evaluator = Evaluator::with_options(self.options);
        let mut game = spawn_blocking(move || Game::with_evaluator(&setup, evaluator)).await?;
        let notation = Notation::new(game.board().height());
        let mut io = Pipe::new(stdout(), stdin());

        info!(name = game.name(), description = game.description());

        loop {
            io.send(&game.board().to_string()).await?;
            io.send(&format!("{} to move, {}", game.turn(), game.state())).await?;
            io.flush().await?;

            if game.state().is_final() {
                break;
            }

            let line = match io.recv().await {
                Ok(line) => line,
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e.into()),
            };

            if line == "quit" {
                break;
            }

            let (whence, whither, promotion) = match parse(&line, notation) {
                Ok(command) => command,
                Err(e) => {
                    warn!("{e}");
                    continue;
                }
            };

            let (played, result) = spawn_blocking(move || {
                let result = game.play(whence, whither, promotion);
                (game, result)
            })
            .await?;

            game = played;
            if let Err(e) = result {
                warn!("{e}");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_are_parsed_in_algebraic_notation() {
        let n = Notation::new(8);
        assert_eq!(parse("e2 e4", n).unwrap(), (Vector::new(6, 4), Vector::new(4, 4), None));
        assert_eq!(
            parse("a7  a8 q", n).unwrap(),
            (Vector::new(1, 0), Vector::new(0, 0), Some(Role::Queen))
        );
    }

    #[test]
    fn malformed_moves_are_rejected() {
        let n = Notation::new(8);
        assert!(parse("e2", n).is_err());
        assert!(parse("e2 e4 e6 e8", n).is_err());
        assert!(parse("e2 4e", n).is_err());
        assert!(parse("a7 a8 x", n).is_err());
    }
}
