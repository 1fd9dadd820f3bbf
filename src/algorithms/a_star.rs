use crate::algorithms::open_set::OpenSet;
use crate::algorithms::reconstruct::reconstruct;
use crate::error::{PathfindingError, Precondition, Result};
use crate::grid::{Grid, Position};
use crate::heuristic::estimate;
use rustc_hash::FxHashMap;

/// Score of a cell the search has not reached.
pub const UNREACHED: u32 = u32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The end cell was reached and the path has been marked.
    Found,
    /// Every reachable cell was expanded without reaching the end.
    Exhausted,
    /// The stop signal fired; the grid keeps its partial markings.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    /// Cells popped from the open set.
    pub expanded: usize,
    pub pushes: u64,
    /// Start to end inclusive; empty unless the outcome is `Found`.
    pub path: Vec<Position>,
}

/// Result of a single expansion step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Expanded(Position),
    Found(Vec<Position>),
    Exhausted,
    Cancelled,
}

/// Best-first (A*) search over a grid's cached adjacency.
///
/// All bookkeeping lives here for one run and is dropped with the value.
/// Scores are indexed by cell slot; the grid size cannot change while a
/// search holds them.
pub struct AStarSearch {
    start: Position,
    end: Position,
    size: usize,
    g_score: Vec<u32>,
    f_score: Vec<u32>,
    came_from: FxHashMap<Position, Position>,
    open: OpenSet,
    expanded: usize,
}

impl AStarSearch {
    /// Sets up a run from `start` to `end`, rejecting coordinates outside
    /// the grid, identical endpoints and stale adjacency.
    pub fn new(grid: &Grid, start: Position, end: Position) -> Result<Self> {
        let start_slot = grid.index(start)?;
        grid.index(end)?;
        if start == end {
            return Err(PathfindingError::SearchPreconditionViolated(
                Precondition::StartEqualsEnd,
            ));
        }
        if grid.is_adjacency_stale() {
            return Err(PathfindingError::SearchPreconditionViolated(
                Precondition::StaleAdjacency,
            ));
        }

        let cells = grid.size() * grid.size();
        let mut g_score = vec![UNREACHED; cells];
        let mut f_score = vec![UNREACHED; cells];
        g_score[start_slot] = 0;
        f_score[start_slot] = estimate(start, end);

        let mut open = OpenSet::new();
        open.push(f_score[start_slot], start);

        Ok(AStarSearch {
            start,
            end,
            size: grid.size(),
            g_score,
            f_score,
            came_from: FxHashMap::default(),
            open,
            expanded: 0,
        })
    }

    fn slot(&self, pos: Position) -> usize {
        pos.row * self.size + pos.col
    }

    pub fn g_score(&self, pos: Position) -> u32 {
        self.g_score[self.slot(pos)]
    }

    pub fn expanded(&self) -> usize {
        self.expanded
    }

    pub fn pushes(&self) -> u64 {
        self.open.pushes()
    }

    /// Pops the best queued cell and relaxes its neighbours, calling
    /// `render` once afterwards. Reaching the end hands over to path
    /// reconstruction, which polls `stop` between marked cells.
    ///
    /// `grid` must have the size of the grid passed to [`AStarSearch::new`].
    pub fn step<R, S>(&mut self, grid: &mut Grid, render: &mut R, stop: &mut S) -> Result<Step>
    where
        R: FnMut(&Grid),
        S: FnMut() -> bool,
    {
        if grid.size() != self.size {
            return Err(PathfindingError::SearchPreconditionViolated(
                Precondition::GridSizeChanged,
            ));
        }
        let Some(entry) = self.open.pop() else {
            return Ok(Step::Exhausted);
        };
        let current = entry.pos;
        self.expanded += 1;
        log::trace!("expanding {:?} (f={}, order={})", current, entry.f_score, entry.order);

        if current == self.end {
            return match reconstruct(grid, &self.came_from, self.start, self.end, render, stop)? {
                Some(path) => {
                    grid.mark_start(self.start)?;
                    grid.mark_end(self.end)?;
                    Ok(Step::Found(path))
                }
                None => Ok(Step::Cancelled),
            };
        }

        let tentative_g = self.g_score(current).saturating_add(1);
        let neighbors = grid.neighbors(current)?.to_vec();
        for neighbor in neighbors {
            let slot = self.slot(neighbor);
            if tentative_g < self.g_score[slot] {
                self.came_from.insert(neighbor, current);
                self.g_score[slot] = tentative_g;
                self.f_score[slot] = tentative_g.saturating_add(estimate(neighbor, self.end));
                if !self.open.contains(&neighbor) {
                    self.open.push(self.f_score[slot], neighbor);
                    grid.mark_open(neighbor)?;
                }
            }
        }

        render(grid);

        if current != self.start {
            grid.mark_closed(current)?;
        }
        Ok(Step::Expanded(current))
    }

    fn report(&self, outcome: SearchOutcome, path: Vec<Position>) -> SearchReport {
        SearchReport {
            outcome,
            expanded: self.expanded,
            pushes: self.open.pushes(),
            path,
        }
    }
}

/// Runs a search to completion, exhaustion or cancellation.
///
/// `render` is called after every expansion and after every reconstructed
/// path cell. `stop` is polled once per expansion, before the next cell is
/// popped, and may be raised by `render` itself.
pub fn run_search<R, S>(
    grid: &mut Grid,
    start: Position,
    end: Position,
    mut render: R,
    mut stop: S,
) -> Result<SearchReport>
where
    R: FnMut(&Grid),
    S: FnMut() -> bool,
{
    let mut search = AStarSearch::new(grid, start, end)?;
    log::debug!("search from {:?} to {:?} on {}x{} grid", start, end, grid.size(), grid.size());

    loop {
        if stop() {
            log::debug!("search cancelled after {} expansions", search.expanded());
            return Ok(search.report(SearchOutcome::Cancelled, Vec::new()));
        }

        match search.step(grid, &mut render, &mut stop)? {
            Step::Expanded(_) => {}
            Step::Found(path) => {
                log::debug!(
                    "path of {} cells found after {} expansions",
                    path.len(),
                    search.expanded()
                );
                return Ok(search.report(SearchOutcome::Found, path));
            }
            Step::Exhausted => {
                log::debug!("no path, open set exhausted after {} expansions", search.expanded());
                return Ok(search.report(SearchOutcome::Exhausted, Vec::new()));
            }
            Step::Cancelled => {
                log::debug!("cancelled during path reconstruction");
                return Ok(search.report(SearchOutcome::Cancelled, Vec::new()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellState;

    fn ready_grid(size: usize, walls: &[Position]) -> Grid {
        let mut grid = Grid::build(size);
        for &w in walls {
            grid.mark_wall(w).unwrap();
        }
        grid.refresh_adjacency();
        grid
    }

    #[test]
    fn start_is_seeded_with_heuristic() {
        let grid = ready_grid(5, &[]);
        let search = AStarSearch::new(&grid, Position::new(0, 0), Position::new(3, 4)).unwrap();
        assert_eq!(search.g_score(Position::new(0, 0)), 0);
        assert_eq!(search.f_score[search.slot(Position::new(0, 0))], 7);
        assert_eq!(search.g_score(Position::new(1, 1)), UNREACHED);
        assert_eq!(search.f_score[search.slot(Position::new(1, 1))], UNREACHED);
        assert_eq!(search.pushes(), 1);
    }

    #[test]
    fn rejects_bad_preconditions() {
        let grid = ready_grid(4, &[]);
        let same = AStarSearch::new(&grid, Position::new(1, 1), Position::new(1, 1));
        assert_eq!(
            same.err(),
            Some(PathfindingError::SearchPreconditionViolated(Precondition::StartEqualsEnd))
        );

        let outside = AStarSearch::new(&grid, Position::new(0, 0), Position::new(4, 0));
        assert!(matches!(outside, Err(PathfindingError::InvalidCoordinate { row: 4, .. })));

        let mut stale = ready_grid(4, &[]);
        stale.mark_wall(Position::new(2, 2)).unwrap();
        let result = AStarSearch::new(&stale, Position::new(0, 0), Position::new(3, 3));
        assert_eq!(
            result.err(),
            Some(PathfindingError::SearchPreconditionViolated(Precondition::StaleAdjacency))
        );
    }

    #[test]
    fn step_refuses_a_grid_of_another_size() {
        let grid = ready_grid(4, &[]);
        let mut search = AStarSearch::new(&grid, Position::new(0, 0), Position::new(3, 3)).unwrap();

        let mut larger = ready_grid(8, &[]);
        let result = search.step(&mut larger, &mut |_: &Grid| {}, &mut || false);
        assert_eq!(
            result,
            Err(PathfindingError::SearchPreconditionViolated(Precondition::GridSizeChanged))
        );
        assert_eq!(search.expanded(), 0);
        assert_eq!(larger.count(CellState::Open), 0);

        let mut same_size = ready_grid(4, &[]);
        let step = search.step(&mut same_size, &mut |_: &Grid| {}, &mut || false).unwrap();
        assert_eq!(step, Step::Expanded(Position::new(0, 0)));
    }

    #[test]
    fn first_step_opens_neighbors_and_keeps_start() {
        let mut grid = ready_grid(3, &[]);
        let start = Position::new(1, 1);
        grid.mark_start(start).unwrap();
        let mut search = AStarSearch::new(&grid, start, Position::new(2, 2)).unwrap();

        let mut opened_at_render = 0;
        let step = search
            .step(
                &mut grid,
                &mut |g: &Grid| opened_at_render = g.count(CellState::Open),
                &mut || false,
            )
            .unwrap();

        assert_eq!(step, Step::Expanded(start));
        assert_eq!(opened_at_render, 4);
        assert_eq!(grid.state(start).unwrap(), CellState::Start);
        assert_eq!(search.pushes(), 5);
        assert_eq!(search.g_score(Position::new(2, 1)), 1);
        assert_eq!(search.f_score[search.slot(Position::new(2, 1))], 2);
    }

    #[test]
    fn popped_cell_is_closed_after_render() {
        let mut grid = ready_grid(4, &[]);
        let start = Position::new(0, 0);
        let end = Position::new(3, 3);
        let mut search = AStarSearch::new(&grid, start, end).unwrap();
        search.step(&mut grid, &mut |_: &Grid| {}, &mut || false).unwrap();

        let mut state_during_render = None;
        let step = search
            .step(
                &mut grid,
                &mut |g: &Grid| state_during_render = Some(g.state(Position::new(1, 0)).unwrap()),
                &mut || false,
            )
            .unwrap();

        assert_eq!(step, Step::Expanded(Position::new(1, 0)));
        assert_eq!(state_during_render, Some(CellState::Open));
        assert_eq!(grid.state(Position::new(1, 0)).unwrap(), CellState::Closed);
    }

    #[test]
    fn g_scores_never_increase_during_a_run() {
        let walls = [
            Position::new(1, 1),
            Position::new(1, 2),
            Position::new(1, 3),
            Position::new(3, 0),
            Position::new(3, 1),
            Position::new(3, 3),
            Position::new(3, 4),
            Position::new(4, 3),
        ];
        let mut grid = ready_grid(6, &walls);
        let mut search = AStarSearch::new(&grid, Position::new(0, 0), Position::new(5, 5)).unwrap();

        let mut previous = search.g_score.clone();
        loop {
            let step = search.step(&mut grid, &mut |_: &Grid| {}, &mut || false).unwrap();
            for (slot, (&before, &after)) in previous.iter().zip(&search.g_score).enumerate() {
                assert!(after <= before, "g_score of slot {} rose from {} to {}", slot, before, after);
            }
            previous = search.g_score.clone();
            if !matches!(step, Step::Expanded(_)) {
                assert!(matches!(step, Step::Found(_)));
                break;
            }
        }
    }

    #[test]
    fn equal_f_scores_expand_in_push_order() {
        let mut grid = ready_grid(5, &[]);
        let mut search = AStarSearch::new(&grid, Position::new(2, 2), Position::new(0, 0)).unwrap();
        let next = |search: &mut AStarSearch, grid: &mut Grid| {
            search.step(grid, &mut |_: &Grid| {}, &mut || false).unwrap()
        };

        next(&mut search, &mut grid);
        // (1, 2) was pushed with order 2 and (2, 1) with order 4, both at f=4.
        assert_eq!(next(&mut search, &mut grid), Step::Expanded(Position::new(1, 2)));
        // (0, 2) and (1, 1) also score f=4 but were pushed after (2, 1).
        assert_eq!(next(&mut search, &mut grid), Step::Expanded(Position::new(2, 1)));
        assert_eq!(next(&mut search, &mut grid), Step::Expanded(Position::new(0, 2)));
    }

    #[test]
    fn render_called_once_per_expansion_and_path_cell() {
        let mut grid = ready_grid(5, &[]);
        let mut frames = 0;
        let report = run_search(
            &mut grid,
            Position::new(0, 0),
            Position::new(0, 4),
            |_: &Grid| frames += 1,
            || false,
        )
        .unwrap();

        assert_eq!(report.outcome, SearchOutcome::Found);
        // Every expansion except the final pop of the end renders once; the
        // path adds one frame per intermediate cell.
        let intermediate = report.path.len() - 2;
        assert_eq!(frames, report.expanded - 1 + intermediate);
    }

    #[test]
    fn stop_before_first_pop_leaves_grid_untouched() {
        let mut grid = ready_grid(4, &[]);
        let report = run_search(&mut grid, Position::new(0, 0), Position::new(3, 3), |_: &Grid| {}, || true)
            .unwrap();
        assert_eq!(report.outcome, SearchOutcome::Cancelled);
        assert_eq!(report.expanded, 0);
        assert_eq!(grid.count(CellState::Open), 0);
    }

    #[test]
    fn render_can_raise_the_stop_signal() {
        use std::cell::Cell as Flag;

        let mut grid = ready_grid(8, &[]);
        let quit = Flag::new(false);
        let mut frames = 0;
        let report = run_search(
            &mut grid,
            Position::new(0, 0),
            Position::new(7, 7),
            |_: &Grid| {
                frames += 1;
                if frames == 3 {
                    quit.set(true);
                }
            },
            || quit.get(),
        )
        .unwrap();

        assert_eq!(report.outcome, SearchOutcome::Cancelled);
        assert_eq!(report.expanded, 3);
        assert!(report.path.is_empty());
        assert!(grid.count(CellState::Open) > 0);
        assert_eq!(grid.count(CellState::Path), 0);
    }

    #[test]
    fn end_cell_recovers_its_classification() {
        let mut grid = ready_grid(4, &[]);
        let start = Position::new(0, 0);
        let end = Position::new(2, 3);
        grid.mark_start(start).unwrap();
        grid.mark_end(end).unwrap();

        let report = run_search(&mut grid, start, end, |_: &Grid| {}, || false).unwrap();

        assert_eq!(report.outcome, SearchOutcome::Found);
        assert_eq!(grid.state(start).unwrap(), CellState::Start);
        assert_eq!(grid.state(end).unwrap(), CellState::End);
        assert_eq!(grid.count(CellState::Path), report.path.len() - 2);
    }
}
