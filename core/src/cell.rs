use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Opaque reference to an occupant (player, pickup, ...) owned by the
/// embedding game. The core stores these per cell but never interprets them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Per-cell payload.
///
/// `hidden` tracks whether the cell has ever been glimpsed as a neighbor of
/// a reveal; a cell can be visible without being `revealed` to the player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellData {
    pub hidden: bool,
    pub revealed: bool,
    pub has_bomb: bool,
    /// Set at creation for bomb cells and consumed exactly once when the
    /// bomb's adjacency counts are propagated to its neighbors.
    pub bomb_pending: bool,
    /// `None` until the count has been determined by a reveal pass. Bomb
    /// cells never get a count of their own.
    pub adjacent_bombs: Option<u8>,
    /// Player-placed marker; blocks reveal and blocks walking onto the cell.
    pub flag: bool,
    pub entities: Vec<EntityId>,
}

impl CellData {
    pub fn new(has_bomb: bool) -> Self {
        Self {
            hidden: true,
            has_bomb,
            bomb_pending: has_bomb,
            ..Self::default()
        }
    }

    pub const fn is_unrevealed(&self) -> bool {
        !self.revealed
    }
}
