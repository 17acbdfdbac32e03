#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use bombs::*;
pub use cell::*;
pub use error::*;
pub use grid::*;
pub use path::*;
pub use segments::*;
pub use types::*;

mod board;
mod bombs;
mod cell;
mod error;
mod grid;
mod path;
mod segments;
mod types;

/// Parameters fixed for the lifetime of a board. The same config always
/// yields the same bomb layout, no matter the order cells are touched in.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub seed: u64,
    pub bomb_probability: f64,
    /// Keep the 3x3 column around the origin bomb-free so a fresh board
    /// always has somewhere to stand.
    pub safe_zone: bool,
}

impl BoardConfig {
    pub const fn new(seed: u64, bomb_probability: f64) -> Self {
        Self {
            seed,
            bomb_probability,
            safe_zone: true,
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new(0, 0.15)
    }
}
