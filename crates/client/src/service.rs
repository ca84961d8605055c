//! Service seam - what the bridge needs from the external game service.
//!
//! The real service is a browser session against the game website; that
//! session management is not this crate's business. The game loop only
//! needs the three operations below, and tests drive it with scripted
//! implementations.

use async_trait::async_trait;
use thiserror::Error;
use tokio::time::Duration;

use hecks_bridge_types::{Color, ServiceMove};

/// Errors reported by a [`GameService`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// An operation needing an active game was called without one.
    #[error("no game is active")]
    NoActiveGame,

    /// A wait expired before the service produced the event.
    #[error("timed out waiting for the service")]
    Timeout,

    /// The game ended; no further moves will be accepted or produced.
    #[error("the game is over")]
    GameOver,

    /// The service refused a move outright (not a retryable race).
    #[error("move rejected by the service: {0}")]
    Rejected(String),

    /// The session or its transport broke.
    #[error("service transport error: {0}")]
    Transport(String),
}

/// The external game service, reduced to the operations the game loop
/// uses.
///
/// Implementations own their session, polling, and notation plumbing;
/// everything crossing this boundary is already in service notation
/// ([`ServiceMove`]).
#[async_trait]
pub trait GameService: Send {
    /// The color this client plays in the active game, if known.
    fn our_color(&self) -> Option<Color>;

    /// Block until `color` has completed a move, then return it.
    ///
    /// Returns immediately with `Ok(None)` when it is already the other
    /// side's turn and there is no move to report (the opening position).
    /// `ServiceError::Timeout` after `timeout` with no play.
    async fn wait_for_move(
        &mut self,
        color: Color,
        timeout: Duration,
    ) -> Result<Option<ServiceMove>, ServiceError>;

    /// Try to play `mv` as `color`.
    ///
    /// `Ok(false)` means the service did not take the move for a
    /// retryable reason (not our turn yet, cell raced to occupied) and
    /// the caller should ask the engine for another move.
    async fn play_move(&mut self, mv: &ServiceMove, color: Color) -> Result<bool, ServiceError>;
}
