//! Client module - the service side of the bridge
//!
//! Everything between the protocol controller and the external game
//! service: the [`GameService`] trait the bridge drives, the service's
//! game-object snapshot with its pure readings, and the [`GameLoop`] that
//! alternates the two sides of a game.
//!
//! The actual service session (browser, HTTP, console) lives with the
//! embedding application; implementations of [`GameService`] translate
//! their transport into the three operations the loop needs.

pub mod game_loop;
pub mod service;
pub mod snapshot;

pub use game_loop::{BridgeError, GameLoop, DEFAULT_WAIT_TIMEOUT};
pub use service::{GameService, ServiceError};
pub use snapshot::{GameSnapshot, LastMove};
