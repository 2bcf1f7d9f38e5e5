//! Grid representation and its primitive transforms.

pub mod grid;

pub use grid::*;
