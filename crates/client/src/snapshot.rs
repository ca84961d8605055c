//! Snapshot module - the service's game object.
//!
//! The service exposes one JSON game object per active game; service
//! implementations poll it and every session flavor needs the same
//! readings from it: which color we play, whose turn it is, what was just
//! played, and whether a cell is still free. Those helpers live here so
//! they stay pure and testable.

use serde::Deserialize;

use hecks_bridge_types::{BoardIndex, Color, ServiceMove, GRID_SIZE, PASS, RESIGN};

/// One poll of the service's game object.
///
/// Field names follow the service's wire JSON. `name1` is the blue
/// player, `name2` the red player; `turn` counts plies from zero.
#[derive(Debug, Clone, Deserialize)]
pub struct GameSnapshot {
    #[serde(rename = "_id")]
    pub id: String,
    pub name1: String,
    pub name2: String,
    pub turn: u64,
    #[serde(rename = "lastMove", default)]
    pub last_move: Option<LastMove>,
    #[serde(rename = "dotsData", default)]
    pub dots_data: Vec<Vec<u8>>,
}

/// The game object's `lastMove` field: a grid pair, or a sentinel string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LastMove {
    Cell([i8; 2]),
    Sentinel(String),
}

impl LastMove {
    /// Parse into a [`ServiceMove`], `None` for anything malformed.
    pub fn to_service_move(&self) -> Option<ServiceMove> {
        match self {
            LastMove::Sentinel(s) if s == PASS => Some(ServiceMove::Pass),
            LastMove::Sentinel(s) if s == RESIGN => Some(ServiceMove::Resign),
            LastMove::Sentinel(_) => None,
            LastMove::Cell([row, col]) => {
                let limit = GRID_SIZE as i8;
                if !(0..limit).contains(row) || !(0..limit).contains(col) {
                    return None;
                }
                Some(ServiceMove::Cell(BoardIndex {
                    row: *row as u8,
                    col: *col as u8,
                }))
            }
        }
    }
}

impl GameSnapshot {
    /// Our color in this game, or `None` if we are only watching.
    pub fn color_of(&self, username: &str) -> Option<Color> {
        if self.name1 == username {
            Some(Color::Blue)
        } else if self.name2 == username {
            Some(Color::Red)
        } else {
            None
        }
    }

    /// Whose turn it is: blue on even plies, red on odd.
    pub fn current_player(&self) -> Color {
        if self.turn % 2 == 0 {
            Color::Blue
        } else {
            Color::Red
        }
    }

    /// Whether the grid cell is present and unoccupied.
    ///
    /// Guards a play before it is submitted; the service silently drops
    /// moves onto occupied or nonexistent cells.
    pub fn cell_is_empty(&self, idx: &BoardIndex) -> bool {
        self.dots_data
            .get(idx.row as usize)
            .and_then(|row| row.get(idx.col as usize))
            .is_some_and(|cell| *cell == 0)
    }

    /// The last move as a [`ServiceMove`], `None` if absent or malformed.
    pub fn last_service_move(&self) -> Option<ServiceMove> {
        self.last_move.as_ref()?.to_service_move()
    }
}
