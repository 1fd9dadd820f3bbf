use crate::error::Result;
use crate::grid::{Grid, Position};
use rustc_hash::FxHashMap;

/// Walks a predecessor map backwards from a cell, yielding each predecessor
/// until a cell with no predecessor is reached.
///
/// The chain is consumed once; the iterator cannot be restarted.
pub struct PathTrace<'a> {
    came_from: &'a FxHashMap<Position, Position>,
    current: Position,
}

impl<'a> PathTrace<'a> {
    pub fn new(came_from: &'a FxHashMap<Position, Position>, from: Position) -> Self {
        PathTrace { came_from, current: from }
    }
}

impl Iterator for PathTrace<'_> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let prev = *self.came_from.get(&self.current)?;
        self.current = prev;
        Some(prev)
    }
}

/// Marks the path from `end` back towards `start`, rendering after every
/// cell so the path animates from goal to start. `start` keeps its own
/// classification.
///
/// Returns the full path ordered start to end, or `None` if `stop` fired
/// before the walk completed.
pub fn reconstruct<R, S>(
    grid: &mut Grid,
    came_from: &FxHashMap<Position, Position>,
    start: Position,
    end: Position,
    render: &mut R,
    stop: &mut S,
) -> Result<Option<Vec<Position>>>
where
    R: FnMut(&Grid),
    S: FnMut() -> bool,
{
    let mut path = vec![end];

    for pos in PathTrace::new(came_from, end) {
        path.push(pos);
        if pos == start {
            continue;
        }
        if stop() {
            log::debug!("path reconstruction stopped at {:?}", pos);
            return Ok(None);
        }
        grid.mark_path(pos)?;
        render(grid);
    }

    path.reverse();
    Ok(Some(path))
}
