use crate::grid::{CellState, Grid};
use std::fmt::Write as _;
use std::thread;
use std::time::Duration;

pub const LEGEND: &str = "Legend: S=Start, E=End, #=Wall, o=Open, x=Closed, *=Path, .=Empty";

pub fn glyph(state: CellState) -> char {
    match state {
        CellState::Empty => '.',
        CellState::Wall => '#',
        CellState::Start => 'S',
        CellState::End => 'E',
        CellState::Open => 'o',
        CellState::Closed => 'x',
        CellState::Path => '*',
    }
}

/// Text picture of the grid with column and row numbers.
pub fn frame(grid: &Grid) -> String {
    let mut out = String::with_capacity((grid.size() + 2) * (grid.size() * 2 + 4));

    out.push_str("   ");
    for col in 0..grid.size() {
        let _ = write!(out, "{:2}", col % 10);
    }
    out.push('\n');

    for (row, cells) in grid.rows().enumerate() {
        let _ = write!(out, "{:2} ", row);
        for cell in cells {
            out.push(glyph(cell.state()));
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

/// Draws one frame per render callback to stdout.
pub struct TerminalRenderer {
    delay: Duration,
    enabled: bool,
    frames: usize,
}

impl TerminalRenderer {
    pub fn new(delay_ms: u64, enabled: bool) -> Self {
        TerminalRenderer {
            delay: Duration::from_millis(delay_ms),
            enabled,
            frames: 0,
        }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn draw(&mut self, grid: &Grid) {
        self.frames += 1;
        if !self.enabled {
            return;
        }

        self.clear_screen();
        println!("=== A* PATHFINDING ===");
        println!(
            "Frame: {} | Open: {} | Closed: {} | Path: {}",
            self.frames,
            grid.count(CellState::Open),
            grid.count(CellState::Closed),
            grid.count(CellState::Path)
        );
        println!("{}", LEGEND);
        print!("{}", frame(grid));

        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }

    /// Draws the grid once regardless of the frame counter.
    pub fn show(&self, grid: &Grid) {
        if self.enabled {
            self.clear_screen();
        }
        println!("{}", LEGEND);
        print!("{}", frame(grid));
    }

    fn clear_screen(&self) {
        print!("\x1B[2J\x1B[1;1H");
    }
}
