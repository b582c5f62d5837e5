use anyhow::Error as Anyhow;
use clap::Subcommand;
use derive_more::From;

mod analyze;
mod perft;
mod play;

#[derive(From, Subcommand)]
pub enum Applet {
    Analyze(analyze::Analyze),
    Perft(perft::Perft),
    Play(play::Play),
}

impl Applet {
    pub async fn execute(self) -> Result<(), Anyhow> {
        match self {
            Applet::Analyze(a) => Ok(a.execute().await?),
            Applet::Perft(a) => Ok(a.execute().await?),
            Applet::Play(a) => Ok(a.execute().await?),
        }
    }
}
