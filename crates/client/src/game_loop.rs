//! Game loop module - alternate the engine and the service.
//!
//! One bridged game: relay the opponent's service move into the engine,
//! ask the engine for ours, push it to the service, repeat. The loop owns
//! the controller and the service for the game's duration and is the
//! single consumer of the controller's queues.

use thiserror::Error;
use tokio::io::AsyncWrite;
use tokio::time::Duration;
use tracing::{info, warn};

use hecks_bridge_coords::{service_to_vertex, vertex_to_index};
use hecks_bridge_htp::{HtpController, HtpError};
use hecks_bridge_types::Color;

use crate::service::{GameService, ServiceError};

/// How long to wait for the opponent before giving up on the game.
///
/// Opponents think; this is deliberately generous.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(1200);

/// Terminal failures of a bridged game.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A move one side accepted has no representation on the other side.
    /// The two boards no longer agree and the game cannot continue.
    #[error("untranslatable move {0}; the bridged game is out of sync")]
    Desync(String),

    #[error(transparent)]
    Htp(#[from] HtpError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Drives one game between an HTP engine and a [`GameService`].
pub struct GameLoop<S, W> {
    controller: HtpController<W>,
    service: S,
    color: Color,
    wait_timeout: Duration,
}

impl<S, W> GameLoop<S, W>
where
    S: GameService,
    W: AsyncWrite + Unpin,
{
    /// Bridge `controller` and `service`, playing `color` on the engine's
    /// behalf.
    pub fn new(
        controller: HtpController<W>,
        service: S,
        color: Color,
        wait_timeout: Duration,
    ) -> Self {
        Self {
            controller,
            service,
            color,
            wait_timeout,
        }
    }

    /// Run the game to completion.
    ///
    /// Returns `Ok` when the service reports the game over (after telling
    /// the engine to quit); any other exit is a real failure.
    pub async fn run(mut self) -> Result<(), BridgeError> {
        let us = self.color;
        let them = us.opponent();
        info!(color = us.as_str(), "bridging game");

        if let Some(service_color) = self.service.our_color() {
            if service_color != us {
                warn!(
                    ours = us.as_str(),
                    service = service_color.as_str(),
                    "service reports a different color for us"
                );
            }
        }

        loop {
            // Relay the opponent's move (if any) into the engine. The
            // opening position reports no move when we play first.
            match self.service.wait_for_move(them, self.wait_timeout).await {
                Ok(Some(mv)) => {
                    let vertex = service_to_vertex(&mv)
                        .ok_or_else(|| BridgeError::Desync(mv.to_string()))?;
                    self.controller
                        .command_play(them.as_str(), &vertex.to_string())
                        .await?;
                }
                Ok(None) => {}
                Err(ServiceError::GameOver) => return self.finish().await,
                Err(err) => return Err(err.into()),
            }

            // Ask the engine for our move and push it to the service,
            // asking again whenever the service does not take it.
            loop {
                let vertex = self.controller.genmove(us.as_str()).await?;
                let mv = vertex_to_index(&vertex)
                    .ok_or_else(|| BridgeError::Desync(vertex.to_string()))?;

                match self.service.play_move(&mv, us).await {
                    Ok(true) => {
                        info!(%vertex, "played engine move");
                        break;
                    }
                    Ok(false) => {
                        warn!(%vertex, "service did not take the move, asking the engine again");
                    }
                    Err(ServiceError::GameOver) => return self.finish().await,
                    Err(err) => return Err(err.into()),
                }
            }
        }
    }

    async fn finish(&mut self) -> Result<(), BridgeError> {
        info!("game over, telling the engine to quit");
        self.controller.command_quit().await?;
        Ok(())
    }
}
