use thiserror::Error;

use crate::dims::Dims;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("invalid maze size {width}x{height}, both sides must be odd and at least 5")]
    InvalidDimension { width: i32, height: i32 },
    #[error("invalid {role} cell {pos}, it must be an odd cell inside the maze")]
    InvalidEndpoint { role: &'static str, pos: Dims },
    #[error("maze integrity broken: {0}")]
    BuildIntegrity(#[from] IntegrityError),
    #[error("strategy {strategy} chose {chosen} at {at}, which is not one of its candidates")]
    StrategyContractViolation {
        strategy: String,
        at: Dims,
        chosen: Dims,
    },
    #[error("no snapshot named {0:?}")]
    UnknownSnapshot(String),
}

/// Structural invariant violations. These only happen if the maze isn't a connected tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("distance fill labeled {labeled} of {total} cells")]
    Unlabeled { labeled: usize, total: usize },
    #[error("{role} cell {pos} is not walkable")]
    NotWalkable { role: &'static str, pos: Dims },
    #[error("intersection stack empty at {at} before reaching the exit")]
    StackExhausted { at: Dims },
}
