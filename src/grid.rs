use crate::error::{PathfindingError, Result};

/// A cell coordinate. Rows grow downwards, columns to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Empty,
    Wall,
    Start,
    End,
    Open,
    Closed,
    Path,
}

#[derive(Debug, Clone, Default)]
pub struct Cell {
    state: CellState,
    neighbors: Vec<Position>,
}

impl Cell {
    pub fn state(&self) -> CellState {
        self.state
    }

    /// Traversable neighbours as of the last `Grid::refresh_adjacency`.
    pub fn neighbors(&self) -> &[Position] {
        &self.neighbors
    }

    pub fn is_wall(&self) -> bool {
        self.state == CellState::Wall
    }
}

/// A square matrix of cells stored row-major in a single vector.
///
/// Neighbour lists are derived data: they are only recomputed by
/// [`Grid::refresh_adjacency`], and the grid remembers whether a wall has
/// been added or removed since then.
#[derive(Debug, Clone)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
    adjacency_stale: bool,
}

impl Grid {
    /// Allocates a `size` x `size` grid of empty cells.
    pub fn build(size: usize) -> Self {
        Grid {
            size,
            cells: vec![Cell::default(); size * size],
            adjacency_stale: true,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    pub(crate) fn index(&self, pos: Position) -> Result<usize> {
        if self.contains(pos) {
            Ok(pos.row * self.size + pos.col)
        } else {
            Err(PathfindingError::InvalidCoordinate {
                row: pos.row,
                col: pos.col,
                size: self.size,
            })
        }
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Result<&Cell> {
        let idx = self.index(Position::new(row, col))?;
        Ok(&self.cells[idx])
    }

    pub fn state(&self, pos: Position) -> Result<CellState> {
        self.cell_at(pos.row, pos.col).map(Cell::state)
    }

    pub fn neighbors(&self, pos: Position) -> Result<&[Position]> {
        self.cell_at(pos.row, pos.col).map(Cell::neighbors)
    }

    pub fn is_adjacency_stale(&self) -> bool {
        self.adjacency_stale
    }

    /// Every coordinate in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| Position::new(row, col)))
    }

    /// Cells row by row, each row ordered by column.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.size.max(1))
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state == state).count()
    }

    /// In-bounds, non-wall orthogonal neighbours computed from the current
    /// classifications rather than the cached lists.
    pub fn open_neighbors(&self, pos: Position) -> Vec<Position> {
        let mut neighbors = Vec::with_capacity(4);
        let Position { row, col } = pos;

        let mut candidates = Vec::with_capacity(4);
        if row + 1 < self.size {
            candidates.push(Position::new(row + 1, col));
        }
        if row > 0 {
            candidates.push(Position::new(row - 1, col));
        }
        if col + 1 < self.size {
            candidates.push(Position::new(row, col + 1));
        }
        if col > 0 {
            candidates.push(Position::new(row, col - 1));
        }

        for next in candidates {
            if !self.cells[next.row * self.size + next.col].is_wall() {
                neighbors.push(next);
            }
        }
        neighbors
    }

    /// Recomputes every cell's neighbour list from the current walls.
    pub fn refresh_adjacency(&mut self) {
        for idx in 0..self.cells.len() {
            let pos = Position::new(idx / self.size, idx % self.size);
            self.cells[idx].neighbors = self.open_neighbors(pos);
        }
        self.adjacency_stale = false;
    }

    fn set_state(&mut self, pos: Position, state: CellState) -> Result<()> {
        let idx = self.index(pos)?;
        let cell = &mut self.cells[idx];
        if cell.is_wall() != (state == CellState::Wall) {
            self.adjacency_stale = true;
        }
        cell.state = state;
        Ok(())
    }

    pub fn mark_wall(&mut self, pos: Position) -> Result<()> {
        self.set_state(pos, CellState::Wall)
    }

    pub fn mark_start(&mut self, pos: Position) -> Result<()> {
        self.set_state(pos, CellState::Start)
    }

    pub fn mark_end(&mut self, pos: Position) -> Result<()> {
        self.set_state(pos, CellState::End)
    }

    pub fn mark_open(&mut self, pos: Position) -> Result<()> {
        self.set_state(pos, CellState::Open)
    }

    pub fn mark_closed(&mut self, pos: Position) -> Result<()> {
        self.set_state(pos, CellState::Closed)
    }

    pub fn mark_path(&mut self, pos: Position) -> Result<()> {
        self.set_state(pos, CellState::Path)
    }

    pub fn reset(&mut self, pos: Position) -> Result<()> {
        self.set_state(pos, CellState::Empty)
    }
}
