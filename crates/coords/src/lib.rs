//! Coordinate translator - pure, deterministic, and testable
//!
//! Bidirectional mapping between engine notation ([`Vertex`]) and service
//! notation ([`ServiceMove`]) for the 10-row diamond board. This is the
//! correctness-critical seam of the bridge: both sides keep their own board
//! state, so any drift between the two directions desynchronizes the
//! bridged game without any visible protocol error. The two functions here
//! are exact inverses over the full valid domain, and the integration tests
//! enumerate that domain.
//!
//! # The embedding
//!
//! The service addresses cells on a dense 20x20 grid; the diamond occupies
//! only half of it. With `r` the 1-indexed engine row and `c` the 1-based
//! engine column:
//!
//! - bottom half (`r <= 5`): `col = c + 4 - r`,
//!   `row = 2 * (10 - r) + 1 - c % 2`
//! - top half (`r > 5`): `col = c + r - 7`,
//!   `row = 2 * (10 - r) + c % 2`
//!
//! Each engine row therefore straddles two consecutive service rows,
//! alternating by column parity (the halves assign opposite parities). A
//! grid pair names a real cell only when `col + row + r` is odd; pairs
//! violating that parity sit in the gaps of the embedding and are rejected,
//! as are pairs whose recovered column falls outside the row's width.
//!
//! Sentinel moves (`pass` / `resign`) translate to themselves in both
//! directions.
//!
//! # Examples
//!
//! ```
//! use hecks_bridge_coords::{index_to_vertex, vertex_to_index};
//! use hecks_bridge_types::{BoardIndex, ServiceMove, Vertex};
//!
//! let v = Vertex::from_str("a1").unwrap();
//! let m = vertex_to_index(&v).unwrap();
//! assert_eq!(m, ServiceMove::Cell(BoardIndex { row: 18, col: 4 }));
//!
//! assert_eq!(index_to_vertex(18, 4), Some(v));
//!
//! // In range, but on a parity gap: not a real cell.
//! assert_eq!(index_to_vertex(18, 5), None);
//! ```

use hecks_bridge_types::{BoardIndex, ServiceMove, Vertex, GRID_SIZE};

pub use hecks_bridge_types as types;

/// Translate an engine-notation move into service notation.
///
/// Sentinels map to sentinels. A cell is mapped through the half-board
/// formulas above; the result is `None` if either grid coordinate would
/// leave `[0, 19]`.
pub fn vertex_to_index(v: &Vertex) -> Option<ServiceMove> {
    let (row, col) = match *v {
        Vertex::Pass => return Some(ServiceMove::Pass),
        Vertex::Resign => return Some(ServiceMove::Resign),
        Vertex::Cell { row, col } => (row, col),
    };

    let r = i16::from(row) + 1;
    let c = i16::from(col);

    let (service_row, service_col) = if r <= 5 {
        (2 * (10 - r) + 1 - c % 2, c + 4 - r)
    } else {
        (2 * (10 - r) + c % 2, c + r - 7)
    };

    let limit = i16::from(GRID_SIZE);
    if !(0..limit).contains(&service_row) || !(0..limit).contains(&service_col) {
        return None;
    }

    Some(ServiceMove::Cell(BoardIndex {
        row: service_row as u8,
        col: service_col as u8,
    }))
}

/// Translate a service grid pair back into engine notation.
///
/// Rejects coordinates outside `[0, 19]`, pairs violating the embedding
/// parity (in-range but topologically impossible cells), and pairs whose
/// recovered column falls outside the engine row's width.
pub fn index_to_vertex(row: i8, col: i8) -> Option<Vertex> {
    let limit = GRID_SIZE as i8;
    if !(0..limit).contains(&row) || !(0..limit).contains(&col) {
        return None;
    }

    let s_row = i16::from(row);
    let s_col = i16::from(col);

    // Each service-row pair (2k, 2k+1) belongs to one engine row.
    let r = 10 - s_row / 2;

    if (s_col + s_row + r) % 2 != 1 {
        return None;
    }

    let c = if r <= 5 { s_col - 4 + r } else { s_col + 7 - r };
    if c < 1 {
        return None;
    }

    Vertex::cell((r - 1) as u8, c as u8)
}

/// Sentinel-preserving inverse of [`vertex_to_index`].
pub fn service_to_vertex(m: &ServiceMove) -> Option<Vertex> {
    match *m {
        ServiceMove::Pass => Some(Vertex::Pass),
        ServiceMove::Resign => Some(Vertex::Resign),
        ServiceMove::Cell(idx) => index_to_vertex(idx.row as i8, idx.col as i8),
    }
}
