use crate::error::{PathfindingError, Precondition, Result};
use crate::grid::Position;
use crate::session::Session;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;

/// A reproducible layout: start, end and wall cells for one grid.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub grid_size: usize,
    pub seed: u64,
    pub start: Position,
    pub end: Position,
    pub walls: Vec<Position>,
}

impl Scenario {
    /// Picks a start in the top-left quadrant, an end in the bottom-right
    /// quadrant and up to `num_walls` distinct walls on the remaining cells.
    ///
    /// Without a seed one is drawn from entropy; it is kept on the scenario
    /// so the layout can be regenerated.
    pub fn generate(grid_size: usize, num_walls: usize, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

        let half = (grid_size / 2).max(1);
        let start = Position::new(rng.gen_range(0..half), rng.gen_range(0..half));
        let end = Position::new(
            rng.gen_range(half.min(grid_size - 1)..grid_size),
            rng.gen_range(half.min(grid_size - 1)..grid_size),
        );

        let mut taken = FxHashSet::default();
        let mut walls = Vec::with_capacity(num_walls);
        let mut attempts = 0;
        while walls.len() < num_walls && attempts < num_walls * 3 {
            let pos = Position::new(rng.gen_range(0..grid_size), rng.gen_range(0..grid_size));
            if pos != start && pos != end && taken.insert(pos) {
                walls.push(pos);
            }
            attempts += 1;
        }

        log::info!(
            "generated scenario seed={} start={:?} end={:?} walls={}",
            seed,
            start,
            end,
            walls.len()
        );

        Scenario {
            grid_size,
            seed,
            start,
            end,
            walls,
        }
    }

    /// Overrides the generated endpoints, dropping any wall placed on them.
    ///
    /// Fails when an override lands on the other endpoint, generated or not.
    pub fn with_endpoints(mut self, start: Option<Position>, end: Option<Position>) -> Result<Self> {
        self.start = start.unwrap_or(self.start);
        self.end = end.unwrap_or(self.end);
        if self.start == self.end {
            return Err(PathfindingError::SearchPreconditionViolated(
                Precondition::StartEqualsEnd,
            ));
        }
        let (s, e) = (self.start, self.end);
        self.walls.retain(|&w| w != s && w != e);
        Ok(self)
    }

    /// Paints the scenario onto a fresh session: start, end, then walls.
    pub fn build_session(&self) -> Result<Session> {
        if self.start == self.end {
            return Err(PathfindingError::SearchPreconditionViolated(
                Precondition::StartEqualsEnd,
            ));
        }
        let mut session = Session::new(self.grid_size);
        session.paint(self.start)?;
        session.paint(self.end)?;
        for &wall in &self.walls {
            session.paint(wall)?;
        }
        Ok(session)
    }
}
