//! Editing rules for an interactive grid: where the start, end and walls go
//! when the user paints or erases a cell, and how a run is triggered.

use crate::algorithms::a_star::{run_search, SearchReport};
use crate::error::{PathfindingError, Precondition, Result};
use crate::grid::{Grid, Position};

/// Default side length of the grid.
pub const DEFAULT_GRID_SIZE: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Primary button on a cell.
    Paint(Position),
    /// Secondary button on a cell.
    Erase(Position),
    /// Throw the grid away and start over.
    Clear,
}

pub struct Session {
    grid: Grid,
    start: Option<Position>,
    end: Option<Position>,
}

impl Session {
    pub fn new(size: usize) -> Self {
        Session {
            grid: Grid::build(size),
            start: None,
            end: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Option<Position> {
        self.start
    }

    pub fn end(&self) -> Option<Position> {
        self.end
    }

    pub fn apply(&mut self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::Paint(pos) => self.paint(pos),
            InputEvent::Erase(pos) => self.erase(pos),
            InputEvent::Clear => {
                self.clear();
                Ok(())
            }
        }
    }

    /// The first painted cell becomes the start, the next one the end, and
    /// everything after that a wall. Start and end are never overwritten.
    pub fn paint(&mut self, pos: Position) -> Result<()> {
        if self.start.is_none() && self.end != Some(pos) {
            self.grid.mark_start(pos)?;
            self.start = Some(pos);
        } else if self.end.is_none() && self.start != Some(pos) {
            self.grid.mark_end(pos)?;
            self.end = Some(pos);
        } else if self.start != Some(pos) && self.end != Some(pos) {
            self.grid.mark_wall(pos)?;
        }
        Ok(())
    }

    pub fn erase(&mut self, pos: Position) -> Result<()> {
        self.grid.reset(pos)?;
        if self.start == Some(pos) {
            self.start = None;
        } else if self.end == Some(pos) {
            self.end = None;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.grid = Grid::build(self.grid.size());
        self.start = None;
        self.end = None;
    }

    /// Refreshes adjacency and searches from the start to the end.
    pub fn run<R, S>(&mut self, render: R, stop: S) -> Result<SearchReport>
    where
        R: FnMut(&Grid),
        S: FnMut() -> bool,
    {
        let start = self.start.ok_or(PathfindingError::SearchPreconditionViolated(
            Precondition::MissingStart,
        ))?;
        let end = self.end.ok_or(PathfindingError::SearchPreconditionViolated(
            Precondition::MissingEnd,
        ))?;

        self.grid.refresh_adjacency();
        run_search(&mut self.grid, start, end, render, stop)
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(DEFAULT_GRID_SIZE)
    }
}
