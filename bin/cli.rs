use crate::applet::Applet;
use anyhow::Error as Anyhow;
use clap::Parser;
use std::{cmp::min, io::stderr};
use tracing::{instrument, Level};
use tracing_subscriber::fmt::{format::FmtSpan, layer};
use tracing_subscriber::{filter::Targets, prelude::*, registry, util::SubscriberInitExt};

/// Chess rules for boards of any size.
#[derive(Parser)]
#[clap(author, version, about)]
pub struct Cli {
    /// Verbosity of the rules engine and of this interface.
    ///
    /// Other crates only ever log warnings and errors.
    #[clap(short, long, global = true)]
    #[cfg_attr(not(debug_assertions), clap(default_value_t = Level::INFO))]
    #[cfg_attr(debug_assertions, clap(default_value_t = Level::DEBUG))]
    verbosity: Level,

    #[clap(subcommand)]
    applet: Applet,
}

impl Cli {
    /// Logs to stderr, so that stdout only carries boards and moves.
    fn subscribe(&self) {
        let targets = Targets::new()
            .with_targets([("cli", self.verbosity), ("lib", self.verbosity)])
            .with_default(min(Level::WARN, self.verbosity));

        let stderr = layer()
            .pretty()
            .with_thread_names(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(stderr);

        registry().with(targets).with(stderr).init();
    }

    #[instrument(level = "trace", skip(self), err)]
    pub async fn execute(self) -> Result<(), Anyhow> {
        self.subscribe();
        self.applet.execute().await
    }
}
