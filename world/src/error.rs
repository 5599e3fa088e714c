use std::fmt;

use thiserror::Error;

/// Errors raised while carving a maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The requested grid has no cells.
    #[error("maze dimensions must be positive (received {columns}x{rows})")]
    InvalidDimensions {
        /// Requested column count.
        columns: u32,
        /// Requested row count.
        rows: u32,
    },
}

/// Kind of entity being placed when placement failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlacementItem {
    /// An artifact awaiting pickup.
    Artifact,
    /// An enemy spawn point.
    Enemy,
}

impl fmt::Display for PlacementItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Artifact => f.write_str("artifact"),
            Self::Enemy => f.write_str("enemy"),
        }
    }
}

/// Errors raised while scattering artifacts, enemies, and the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// Rejection sampling ran out of draws before finding a legal cell.
    #[error("no legal cell found for an {item} after {attempts} draws")]
    Exhausted {
        /// Entity that could not be placed.
        item: PlacementItem,
        /// Number of draws spent before giving up.
        attempts: u32,
    },
    /// Every open cell is occupied by an enemy spawn.
    #[error("no open cell free of enemies is available for the player")]
    NoPlayerStart,
}

/// Errors raised while constructing a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum WorldError {
    /// Maze generation failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// Entity placement failed.
    #[error(transparent)]
    Placement(#[from] PlacementError),
}
