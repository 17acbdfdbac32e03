use thiserror::Error;

use crate::Pos3;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A cell that must exist by invariant (e.g. the cell an entity stands
    /// on) was never materialized. Continuing would corrupt adjacency
    /// bookkeeping, so callers are expected to treat this as fatal.
    #[error("no cell materialized at {0:?}")]
    MissingCell(Pos3),
}

pub type Result<T> = core::result::Result<T, GridError>;
