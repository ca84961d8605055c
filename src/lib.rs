//! Hecks bridge (workspace facade crate).
//!
//! This package keeps the `hecks_bridge::{types,coords,htp,client}` public
//! API in one place while the implementation lives in dedicated crates
//! under `crates/`.

pub use hecks_bridge_client as client;
pub use hecks_bridge_coords as coords;
pub use hecks_bridge_htp as htp;
pub use hecks_bridge_types as types;
