use super::Io;
use async_trait::async_trait;
use std::io;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, Lines};
use tracing::instrument;

/// An [`Io`] over a pair of asynchronous streams, such as the terminal.
#[derive(Debug)]
pub struct Pipe<W: AsyncWrite, R: AsyncRead> {
    writer: W,
    reader: Lines<BufReader<R>>,
}

impl<W: AsyncWrite, R: AsyncRead> Pipe<W, R> {
    pub fn new(writer: W, reader: R) -> Self {
        Pipe {
            writer,
            reader: BufReader::new(reader).lines(),
        }
    }
}

#[async_trait]
impl<W: AsyncWrite + Send + Unpin, R: AsyncRead + Send + Unpin> Io for Pipe<W, R> {
    #[instrument(level = "trace", skip(self), ret, err)]
    async fn recv(&mut self) -> io::Result<String> {
        use io::ErrorKind::UnexpectedEof;

        loop {
            let line = self.reader.next_line().await?.ok_or(UnexpectedEof)?;
            let line = line.trim();
            if !line.is_empty() {
                return Ok(line.into());
            }
        }
    }

    #[instrument(level = "trace", skip(self), err)]
    async fn send(&mut self, msg: &str) -> io::Result<()> {
        self.writer.write_all(msg.as_bytes()).await?;
        self.writer.write_u8(b'\n').await?;
        Ok(())
    }

    #[instrument(level = "trace", skip(self), err)]
    async fn flush(&mut self) -> io::Result<()> {
        self.writer.flush().await?;
        Ok(())
    }
}
