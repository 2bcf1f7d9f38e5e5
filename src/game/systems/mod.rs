//! Grid engine systems: movement, spawning and end-of-game rules.
//!
//! All functions here are pure; they take grids by reference and return new ones.

pub mod movement;
pub mod rules;
pub mod spawn;

pub use movement::*;
pub use rules::*;
pub use spawn::*;
