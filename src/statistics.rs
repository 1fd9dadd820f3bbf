use crate::algorithms::a_star::{SearchOutcome, SearchReport};
use crate::grid::{Grid, Position};
use crate::heuristic::estimate;
use pathfinding::prelude::astar;
use std::fmt;
use std::time::Duration;

/// Shortest path length in cells between two positions, computed by the
/// `pathfinding` crate over the grid's current walls. Used to check the
/// visualised search against an independent implementation.
pub fn reference_path_cells(grid: &Grid, start: Position, end: Position) -> Option<usize> {
    astar(
        &start,
        |p| grid.open_neighbors(*p).into_iter().map(|n| (n, 1u32)),
        |p| estimate(*p, end),
        |p| *p == end,
    )
    .map(|(path, _)| path.len())
}

#[derive(Debug, Clone)]
pub struct RunStatistics {
    pub grid_size: usize,
    pub num_walls: usize,
    pub outcome: SearchOutcome,
    pub expanded: usize,
    pub pushes: u64,
    pub path_cells: usize,
    pub reference_path_cells: Option<usize>,
    pub frames: usize,
    pub elapsed: Duration,
}

impl RunStatistics {
    pub fn new(
        report: &SearchReport,
        reference_path_cells: Option<usize>,
        grid_size: usize,
        num_walls: usize,
        frames: usize,
        elapsed: Duration,
    ) -> Self {
        RunStatistics {
            grid_size,
            num_walls,
            outcome: report.outcome,
            expanded: report.expanded,
            pushes: report.pushes,
            path_cells: report.path.len(),
            reference_path_cells,
            frames,
            elapsed,
        }
    }

    /// Whether the outcome agrees with the reference search. A cancelled
    /// run has nothing to compare and counts as consistent.
    pub fn matches_reference(&self) -> bool {
        match self.outcome {
            SearchOutcome::Found => self.reference_path_cells == Some(self.path_cells),
            SearchOutcome::Exhausted => self.reference_path_cells.is_none(),
            SearchOutcome::Cancelled => true,
        }
    }

    /// Share of the open cells that the search expanded.
    pub fn expansion_ratio(&self) -> f64 {
        let free = (self.grid_size * self.grid_size).saturating_sub(self.num_walls);
        if free == 0 {
            0.0
        } else {
            self.expanded as f64 / free as f64
        }
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Outcome: {:?}", self.outcome)?;
        writeln!(f, "Grid: {}x{} with {} walls", self.grid_size, self.grid_size, self.num_walls)?;
        writeln!(f, "Cells expanded: {} ({:.1}% of free cells)", self.expanded, self.expansion_ratio() * 100.0)?;
        writeln!(f, "Open set pushes: {}", self.pushes)?;
        writeln!(f, "Frames rendered: {}", self.frames)?;
        writeln!(f, "Elapsed: {:.2?}", self.elapsed)?;

        match self.outcome {
            SearchOutcome::Found => {
                writeln!(f, "Path length: {} cells", self.path_cells)?;
                match self.reference_path_cells {
                    Some(len) if len == self.path_cells => writeln!(f, "✓ Matches reference optimum")?,
                    Some(len) => writeln!(f, "⚠ Reference optimum is {} cells", len)?,
                    None => writeln!(f, "⚠ Reference search found no path")?,
                }
            }
            SearchOutcome::Exhausted => {
                writeln!(f, "No path exists between start and end")?;
            }
            SearchOutcome::Cancelled => {
                writeln!(f, "Search was stopped before completion")?;
            }
        }
        Ok(())
    }
}
