//! Error types for the search engine.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// No child of an expanded node could be scored.
    #[error("no selectable child at depth {depth}")]
    DegenerateSelection { depth: u32 },
    /// The root has no legal move: the board is full or already won.
    #[error("no move available: board is full or the game is over")]
    NoMoveAvailable,
}
