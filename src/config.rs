use crate::grid::Position;
use crate::session::DEFAULT_GRID_SIZE;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Animated A* search over a grid in the terminal", long_about = None)]
pub struct Config {
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    pub grid_size: usize,

    #[arg(long, default_value_t = 600)]
    pub num_walls: usize,

    /// Seed for the wall layout; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start cell as `row,col`; random when omitted
    #[arg(long, value_parser = parse_position)]
    pub start: Option<Position>,

    /// End cell as `row,col`; random when omitted
    #[arg(long, value_parser = parse_position)]
    pub end: Option<Position>,

    #[arg(long, default_value_t = 5)]
    pub delay_ms: u64,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

pub fn parse_position(s: &str) -> Result<Position, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `row,col`, got `{}`", s))?;
    let row = row
        .trim()
        .parse()
        .map_err(|e| format!("invalid row `{}`: {}", row.trim(), e))?;
    let col = col
        .trim()
        .parse()
        .map_err(|e| format!("invalid column `{}`: {}", col.trim(), e))?;
    Ok(Position::new(row, col))
}

impl Config {
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_size < 2 {
            return Err(format!("grid size must be at least 2, got {}", self.grid_size));
        }
        let cells = self.grid_size * self.grid_size;
        if self.num_walls > cells - 2 {
            return Err(format!(
                "{} walls leave no room for start and end on a {}x{} grid",
                self.num_walls, self.grid_size, self.grid_size
            ));
        }
        for (name, pos) in [("start", self.start), ("end", self.end)] {
            if let Some(pos) = pos {
                if pos.row >= self.grid_size || pos.col >= self.grid_size {
                    return Err(format!(
                        "{} ({}, {}) is outside the {}x{} grid",
                        name, pos.row, pos.col, self.grid_size, self.grid_size
                    ));
                }
            }
        }
        if self.start.is_some() && self.start == self.end {
            return Err("start and end must be different cells".to_string());
        }
        Ok(())
    }
}
