//! Controller module - command/response exchange with one engine process
//!
//! [`HtpController`] owns the write side of the engine connection and the
//! two outbound queues. Construction spawns two background tasks that live
//! until the engine closes its output pipe:
//!
//! - the **reader** pulls lines off the read side and forwards each
//!   non-empty line, unmodified, to the classifier;
//! - the **classifier** routes each line to the move queue, the fail
//!   queue, or the floor (see [`classify_line`]).
//!
//! There is no stop operation. Termination is `command_quit` followed by
//! dropping the controller; the engine closing its pipe ends the reader,
//! which cascades: the response channel closes, the classifier exits, and
//! both queues report closure to any waiting caller. The [`closed`]
//! future resolves at that point, so callers can tell an idle engine from
//! a dead one.
//!
//! [`closed`]: HtpController::closed

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, watch};
use tokio::time::Duration;
use tracing::{debug, info, warn};

use hecks_bridge_types::{Color, Vertex};

use crate::error::HtpError;
use crate::protocol::{
    classify_line, format_genmove, format_play, Response, CLEARBOARD_COMMAND, QUIT_COMMAND,
};

/// Asynchronous controller for one HTP engine subprocess.
///
/// Responses are not correlated to commands on the wire; the engine
/// answers in FIFO order and the required usage discipline is one
/// in-flight command at a time, consuming the expected queue before
/// issuing the next. [`HtpController::genmove`] packages that discipline
/// for the common case; together with the `&mut self` receivers it makes
/// interleaved commanding hard to express by accident.
pub struct HtpController<W> {
    writer: W,
    moves: mpsc::UnboundedReceiver<Vertex>,
    failures: mpsc::UnboundedReceiver<String>,
    closed: watch::Receiver<bool>,
}

impl<W: AsyncWrite + Unpin> HtpController<W> {
    /// Start a controller over the engine's output (`reader`) and input
    /// (`writer`) pipes, spawning the reader and classifier tasks.
    ///
    /// Must be called within a Tokio runtime.
    pub fn new<R>(reader: R, writer: W) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        let (response_tx, response_rx) = mpsc::unbounded_channel();
        let (move_tx, moves) = mpsc::unbounded_channel();
        let (fail_tx, failures) = mpsc::unbounded_channel();
        let (closed_tx, closed) = watch::channel(false);

        tokio::spawn(read_lines(reader, response_tx, closed_tx));
        tokio::spawn(classify_responses(response_rx, move_tx, fail_tx));

        Self {
            writer,
            moves,
            failures,
            closed,
        }
    }

    /// Write a raw command to the engine and flush.
    ///
    /// No validation and no response correlation; the caller reads the
    /// queues in program order.
    pub async fn send_command(&mut self, raw: &str) -> Result<(), HtpError> {
        debug!(command = raw.trim_end(), "sending command");
        self.writer.write_all(raw.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Ask the engine to decide a move for `color`.
    ///
    /// The accepted vertex arrives on the move queue. Fails with
    /// [`HtpError::InvalidColor`] before anything is written.
    pub async fn command_genmove(&mut self, color: &str) -> Result<(), HtpError> {
        let color = parse_color(color)?;
        self.send_command(&format_genmove(color.as_str())).await
    }

    /// Tell the engine a move was played on the board.
    ///
    /// Fails with [`HtpError::InvalidColor`] / [`HtpError::InvalidVertex`]
    /// before anything is written.
    pub async fn command_play(&mut self, color: &str, vertex: &str) -> Result<(), HtpError> {
        let color = parse_color(color)?;
        let vertex =
            Vertex::from_str(vertex).ok_or_else(|| HtpError::InvalidVertex(vertex.to_string()))?;
        self.send_command(&format_play(color.as_str(), &vertex))
            .await
    }

    /// Tell the engine to quit.
    pub async fn command_quit(&mut self) -> Result<(), HtpError> {
        self.send_command(QUIT_COMMAND).await
    }

    /// Tell the engine to reset its board.
    pub async fn command_clearboard(&mut self) -> Result<(), HtpError> {
        self.send_command(CLEARBOARD_COMMAND).await
    }

    /// Send `genmove` and await the correlated reply: the engine's next
    /// response on either queue.
    ///
    /// A move answers `Ok`; a failure line answers [`HtpError::Engine`];
    /// engine death answers [`HtpError::Closed`].
    pub async fn genmove(&mut self, color: &str) -> Result<Vertex, HtpError> {
        enum Reply {
            Move(Vertex),
            MovesClosed,
            Failure(Option<String>),
        }

        self.command_genmove(color).await?;

        let reply = tokio::select! {
            biased;
            mv = self.moves.recv() => match mv {
                Some(v) => Reply::Move(v),
                None => Reply::MovesClosed,
            },
            fail = self.failures.recv() => Reply::Failure(fail),
        };

        match reply {
            Reply::Move(v) => Ok(v),
            Reply::Failure(Some(line)) => Err(HtpError::Engine(line)),
            Reply::Failure(None) => Err(HtpError::Closed),
            // Reader is gone; surface a failure already in flight before
            // reporting closure.
            Reply::MovesClosed => match self.failures.try_recv() {
                Ok(line) => Err(HtpError::Engine(line)),
                Err(_) => Err(HtpError::Closed),
            },
        }
    }

    /// Next accepted move, in engine-emission order. `None` when the
    /// engine is gone and the queue is drained.
    pub async fn next_move(&mut self) -> Option<Vertex> {
        self.moves.recv().await
    }

    /// Non-blocking variant of [`next_move`](Self::next_move).
    pub fn try_next_move(&mut self) -> Option<Vertex> {
        self.moves.try_recv().ok()
    }

    /// [`next_move`](Self::next_move) raced against a deadline.
    pub async fn next_move_timeout(&mut self, dur: Duration) -> Result<Vertex, HtpError> {
        match tokio::time::timeout(dur, self.moves.recv()).await {
            Ok(Some(v)) => Ok(v),
            Ok(None) => Err(HtpError::Closed),
            Err(_) => Err(HtpError::Timeout),
        }
    }

    /// Next failure line, in engine-emission order. `None` when the
    /// engine is gone and the queue is drained.
    pub async fn next_failure(&mut self) -> Option<String> {
        self.failures.recv().await
    }

    /// Non-blocking variant of [`next_failure`](Self::next_failure).
    pub fn try_next_failure(&mut self) -> Option<String> {
        self.failures.try_recv().ok()
    }

    /// [`next_failure`](Self::next_failure) raced against a deadline.
    pub async fn next_failure_timeout(&mut self, dur: Duration) -> Result<String, HtpError> {
        match tokio::time::timeout(dur, self.failures.recv()).await {
            Ok(Some(line)) => Ok(line),
            Ok(None) => Err(HtpError::Closed),
            Err(_) => Err(HtpError::Timeout),
        }
    }

    /// True once the reader task has exited (engine EOF or read error).
    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    /// Resolves when the reader task exits. Lets callers distinguish
    /// "queue empty because idle" from "queue empty because the engine
    /// died".
    pub async fn closed(&mut self) {
        // An error here means the watch sender is already gone, which is
        // closure too.
        let _ = self.closed.wait_for(|closed| *closed).await;
    }
}

fn parse_color(color: &str) -> Result<Color, HtpError> {
    Color::from_str(color).ok_or_else(|| HtpError::InvalidColor(color.to_string()))
}

/// Reader task: forward each non-empty engine line to the classifier.
///
/// Exits on EOF or a permanent read error, flipping the closed signal on
/// the way out. Partial reads are absorbed by the buffered line reader.
async fn read_lines<R>(
    reader: R,
    responses: mpsc::UnboundedSender<String>,
    closed: watch::Sender<bool>,
) where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.is_empty() {
                    continue;
                }
                debug!(line = line.as_str(), "engine line");
                if responses.send(line).is_err() {
                    break;
                }
            }
            Ok(None) => {
                info!("engine closed its output pipe");
                break;
            }
            Err(err) => {
                warn!(error = %err, "engine read failed");
                break;
            }
        }
    }

    let _ = closed.send(true);
}

/// Classifier task: route raw lines onto the move and fail queues.
///
/// Anomalies are logged and dropped, never escalated; the inbound stream
/// is best-effort text.
async fn classify_responses(
    mut responses: mpsc::UnboundedReceiver<String>,
    moves: mpsc::UnboundedSender<Vertex>,
    failures: mpsc::UnboundedSender<String>,
) {
    while let Some(raw) = responses.recv().await {
        match classify_line(&raw) {
            Response::Move(vertex) => {
                debug!(%vertex, "move response");
                if moves.send(vertex).is_err() {
                    break;
                }
            }
            Response::Failure(line) => {
                debug!(line = line.as_str(), "failure response");
                if failures.send(line).is_err() {
                    break;
                }
            }
            Response::Ignored => {
                debug!(line = raw.as_str(), "ignored engine response");
            }
        }
    }
}
