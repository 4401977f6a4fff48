//! Host process transport.
//!
//! The host speaks newline-delimited JSON: intents on its stdin, messages on
//! its stdout. Its stderr is discarded. A writer task and a reader task move
//! lines between the pipes and unbounded channels, so the runtime never
//! blocks on host I/O.

use std::process::Stdio;

use tokio::{
    io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader},
    process::{Child, Command},
    sync::mpsc,
};
use tracing::{debug, warn};

use crate::TerminalError;

/// Sending half of the host's input. Cheap to clone.
pub type HostWriter = mpsc::UnboundedSender<String>;

/// Line channels to and from a host.
#[derive(Debug)]
pub struct HostLink {
    to_host: HostWriter,
    from_host: mpsc::UnboundedReceiver<String>,
}

impl HostLink {
    /// Start the reader and writer tasks over an arbitrary byte stream pair.
    ///
    /// Must be called inside a tokio runtime.
    pub fn new<R, W>(reader: R, writer: W) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (to_host, outbound) = mpsc::unbounded_channel();
        let (inbound, from_host) = mpsc::unbounded_channel();
        tokio::spawn(write_lines(writer, outbound));
        tokio::spawn(read_lines(reader, inbound));
        Self { to_host, from_host }
    }

    /// Queue one line for the host. The newline is added here.
    pub fn send(&self, line: String) -> Result<(), TerminalError> {
        self.to_host.send(line).map_err(|_| TerminalError::HostClosed)
    }

    /// Next line from the host. `None` once its output is closed.
    pub async fn recv(&mut self) -> Option<String> {
        self.from_host.recv().await
    }

    /// A clone of the sending half, e.g. for log forwarding.
    pub fn writer(&self) -> HostWriter {
        self.to_host.clone()
    }
}

/// A spawned host child process.
#[derive(Debug)]
pub struct HostProcess {
    child: Child,
    link: HostLink,
}

impl HostProcess {
    /// Spawn `program` with `args` and connect its stdin and stdout.
    ///
    /// The child is killed when this value is dropped.
    pub fn spawn(program: &str, args: &[String]) -> Result<Self, TerminalError> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| TerminalError::HostSpawn { program: program.to_owned(), source })?;

        let stdin = child.stdin.take().ok_or(TerminalError::HostClosed)?;
        let stdout = child.stdout.take().ok_or(TerminalError::HostClosed)?;
        debug!(program, pid = child.id(), "host spawned");

        Ok(Self { child, link: HostLink::new(stdout, stdin) })
    }

    /// Line channels of this host.
    pub fn link(&self) -> &HostLink {
        &self.link
    }

    /// Mutable access to the line channels.
    pub fn link_mut(&mut self) -> &mut HostLink {
        &mut self.link
    }

    /// Ask the child to terminate. Does not wait for it.
    pub fn stop(&mut self) {
        if let Err(error) = self.child.start_kill() {
            debug!(%error, "host already exited");
        }
    }
}

async fn write_lines<W>(mut writer: W, mut lines: mpsc::UnboundedReceiver<String>)
where
    W: AsyncWrite + Unpin,
{
    while let Some(mut line) = lines.recv().await {
        line.push('\n');
        if writer.write_all(line.as_bytes()).await.is_err() || writer.flush().await.is_err() {
            break;
        }
    }
}

/// Forward host lines until EOF or a read error. Lines that are not UTF-8
/// are skipped.
async fn read_lines<R>(reader: R, lines: mpsc::UnboundedSender<String>)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {},
            Err(error) => {
                warn!(%error, "reading host output failed");
                break;
            },
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim_end_matches(['\n', '\r']),
            Err(error) => {
                warn!(%error, len = buf.len(), "skipping host line that is not UTF-8");
                continue;
            },
        };
        if line.trim().is_empty() {
            continue;
        }
        if lines.send(line.to_owned()).is_err() {
            break;
        }
    }
}
