//! Protocol module - HTP line grammar
//!
//! Outbound commands and inbound response classification for the
//! line-oriented engine protocol.
//!
//! An inbound line is `STATUS [ID] " " PAYLOAD`: the first character of the
//! first token is `=` for success or `?` for failure, the rest of the token
//! is an optional response id that this layer does not interpret, and the
//! payload is free text. A success line whose payload is a syntactically
//! valid vertex is a move; a failure line is always a failure regardless of
//! payload shape; everything else is dropped.

use hecks_bridge_types::Vertex;

/// Status prefix of a successful engine response
pub const SUCCESS_PREFIX: char = '=';

/// Status prefix of a failed engine response
pub const FAIL_PREFIX: char = '?';

/// A classified inbound line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Success line whose payload parsed as a vertex
    Move(Vertex),
    /// Failure line, normalized but otherwise verbatim
    Failure(String),
    /// Empty, unparseable, or non-move success line
    Ignored,
}

/// Classify one raw engine line.
///
/// Normalizes (trailing whitespace stripped, tabs to spaces), splits on the
/// first space, and routes on the status prefix. Lines without a separator
/// and success payloads that are not vertices are [`Response::Ignored`];
/// the inbound stream is best-effort text and anomalies never escalate.
pub fn classify_line(raw: &str) -> Response {
    let line = raw.trim_end().replace('\t', " ");

    let Some((result, payload)) = line.split_once(' ') else {
        return Response::Ignored;
    };

    let status = result.chars().next();
    let vertex = Vertex::from_str(payload);

    match status {
        Some(FAIL_PREFIX) => Response::Failure(line),
        Some(SUCCESS_PREFIX) => match vertex {
            Some(v) => Response::Move(v),
            None => Response::Ignored,
        },
        _ => Response::Ignored,
    }
}

/// Format a `genmove` command line.
pub fn format_genmove(color: &str) -> String {
    format!("genmove {color}\n")
}

/// Format a `play` command line.
pub fn format_play(color: &str, vertex: &Vertex) -> String {
    format!("play {color} {vertex}\n")
}

/// The fixed `quit` command line.
pub const QUIT_COMMAND: &str = "quit\n";

/// The fixed `clearboard` command line.
pub const CLEARBOARD_COMMAND: &str = "clearboard\n";
