pub mod algorithms;
pub mod config;
pub mod error;
pub mod grid;
pub mod heuristic;
pub mod render;
pub mod scenario;
pub mod session;
pub mod statistics;

pub use algorithms::a_star::{run_search, SearchOutcome, SearchReport};
pub use error::{PathfindingError, Precondition};
pub use grid::{CellState, Grid, Position};
