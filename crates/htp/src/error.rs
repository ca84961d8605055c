//! Error type for the protocol controller.

use std::io;

use thiserror::Error;

/// Errors surfaced by [`HtpController`](crate::HtpController) operations.
///
/// Validation errors are synchronous and mean nothing was written to the
/// engine. Stream and closure errors are fatal for the controller: the
/// engine process is gone and the controller must be discarded.
#[derive(Debug, Error)]
pub enum HtpError {
    /// A `command*` helper was given a color outside `{R, B}`.
    #[error("invalid color for command: {0:?}")]
    InvalidColor(String),

    /// A `command*` helper was given a string that is not a vertex.
    #[error("invalid vertex for command: {0:?}")]
    InvalidVertex(String),

    /// The engine answered a correlated command with a `?` failure line.
    #[error("engine reported a failure: {0}")]
    Engine(String),

    /// A queue wait expired before the engine responded.
    #[error("timed out waiting for an engine response")]
    Timeout,

    /// The engine closed its side of the connection.
    #[error("engine connection closed")]
    Closed,

    /// Writing to the engine's input pipe failed.
    #[error("engine stream error: {0}")]
    Stream(#[from] io::Error),
}
