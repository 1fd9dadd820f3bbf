//! Error types for grid access and search setup.

use std::fmt;
use thiserror::Error;

/// A reason a search was refused before it started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    MissingStart,
    MissingEnd,
    StartEqualsEnd,
    /// Walls changed since the last `refresh_adjacency`.
    StaleAdjacency,
    /// The grid handed to a running search is not the size it started on.
    GridSizeChanged,
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Precondition::MissingStart => "no start cell has been placed",
            Precondition::MissingEnd => "no end cell has been placed",
            Precondition::StartEqualsEnd => "start and end are the same cell",
            Precondition::StaleAdjacency => "neighbour lists are stale, refresh adjacency first",
            Precondition::GridSizeChanged => "grid size differs from the one the search started on",
        };
        f.write_str(msg)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathfindingError {
    #[error("coordinate ({row}, {col}) is outside the {size}x{size} grid")]
    InvalidCoordinate { row: usize, col: usize, size: usize },

    #[error("search precondition violated: {0}")]
    SearchPreconditionViolated(Precondition),
}

pub type Result<T> = std::result::Result<T, PathfindingError>;
