//! HTP module - engine protocol controller
//!
//! This module talks to a game engine subprocess over its stdin/stdout
//! pipes using HTP, a line-oriented half-duplex text protocol.
//!
//! # Protocol Overview
//!
//! 1. **Commands**: the caller writes one command line at a time
//!    (`genmove R`, `play B e12`, `clearboard`, `quit`), flushed on write.
//! 2. **Responses**: the engine answers each command with one line,
//!    `=[id] payload` on success or `?[id] text` on failure, in the order
//!    the commands were sent.
//! 3. **Routing**: a background reader and classifier turn the response
//!    stream into two FIFO queues - accepted moves and failures. Success
//!    lines whose payload is not a move, and lines that do not parse at
//!    all, are logged and dropped.
//!
//! # Example Protocol Flow
//!
//! ```text
//! Bridge -> Engine: genmove R
//! Engine -> Bridge: =1 e12        (move queue: e12)
//! Bridge -> Engine: play B c4
//! Engine -> Bridge: =2            (acknowledgement, dropped)
//! Bridge -> Engine: genmove R
//! Engine -> Bridge: ?3 bad state  (fail queue: "?3 bad state")
//! ```
//!
//! # Usage Discipline
//!
//! Responses carry no command correlation, so callers keep **one command
//! in flight** and consume its queue entry before the next command.
//! [`HtpController::genmove`] bundles send-and-await-reply into a single
//! future for the command that actually has a payload; the fire-and-forget
//! commands need nothing consumed.
//!
//! # Failure Model
//!
//! Validation problems (`InvalidColor`, `InvalidVertex`) are synchronous
//! and nothing reaches the wire. The engine dying is observed through
//! [`HtpController::closed`], queue closure, or a write error - the
//! controller is not usable afterwards and must be discarded.
//!
//! - See [`protocol`] for the line grammar and classification
//! - See [`controller`] for the controller and its background tasks

pub mod controller;
pub mod error;
pub mod protocol;

pub use controller::HtpController;
pub use error::HtpError;
pub use protocol::{classify_line, Response};
