//! Game layer root module.
//!
//! - `grid`: board representation and primitive transforms
//! - `systems`: the pure grid engine (movement, spawning, end-of-game rules)
//! - `state`: the session controller built on top of the engine

pub mod error;
pub mod types;
pub mod state;

pub mod grid;
pub mod systems;

