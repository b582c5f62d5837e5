use async_trait::async_trait;
use std::io;

mod pipe;

pub use pipe::*;

/// Line oriented text exchange with the player.
#[async_trait]
pub trait Io {
    /// Receive the next non-blank line, trimmed.
    async fn recv(&mut self) -> io::Result<String>;

    /// Send a line.
    async fn send(&mut self, msg: &str) -> io::Result<()>;

    /// Flush the internal buffers.
    async fn flush(&mut self) -> io::Result<()>;
}
