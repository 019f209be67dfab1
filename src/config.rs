use crate::algorithms::{AlgorithmKind, Heuristic};
use crate::controller::{RunOptions, Speed};
use crate::grid::{Position, DEFAULT_OBSTACLE_DENSITY};
use clap::{ArgAction, Parser, ValueEnum};
use std::time::Duration;

/// Grid sizes offered to users. The engine itself accepts any size >= 3.
pub const GRID_SIZES: [(usize, &str); 3] = [
    (15, "Small (15x15)"),
    (25, "Medium (25x25)"),
    (35, "Large (35x35)"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Layout {
    #[default]
    Empty,
    Maze,
    Obstacles,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Step-by-step grid pathfinding visualizer", long_about = None)]
pub struct Config {
    #[arg(long, default_value_t = 25, value_parser = parse_grid_size)]
    pub grid_size: usize,

    #[arg(long, value_enum, default_value_t = AlgorithmKind::Bfs)]
    pub algorithm: AlgorithmKind,

    #[arg(long, value_enum, default_value_t = Heuristic::Manhattan)]
    pub heuristic: Heuristic,

    #[arg(long, value_enum, default_value_t = Speed::Medium)]
    pub speed: Speed,

    /// Overrides the speed preset.
    #[arg(long)]
    pub delay_ms: Option<u64>,

    #[arg(long, value_enum, default_value_t = Layout::Empty)]
    pub layout: Layout,

    /// Wall probability for the obstacles layout.
    #[arg(long, default_value_t = DEFAULT_OBSTACLE_DENSITY)]
    pub density: f64,

    /// Seed for the maze and obstacle generators.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start cell as ROW,COL.
    #[arg(long)]
    pub start: Option<Position>,

    /// End cell as ROW,COL.
    #[arg(long)]
    pub end: Option<Position>,

    /// Run every algorithm on the same grid and print a comparison.
    #[arg(long, default_value_t = false)]
    pub compare: bool,

    /// Skip per-step rendering; only the final grid is printed.
    #[arg(long, default_value_t = false)]
    pub quiet: bool,

    /// Log verbosity on stderr (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    /// Per-step delay; quiet runs never wait.
    pub fn delay(&self) -> Duration {
        if self.quiet {
            return Duration::ZERO;
        }
        self.delay_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| self.speed.delay())
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            heuristic: self.heuristic,
            delay: self.delay(),
        }
    }
}

fn parse_grid_size(s: &str) -> Result<usize, String> {
    let size: usize = s.parse().map_err(|e| format!("invalid grid size '{}': {}", s, e))?;
    if GRID_SIZES.iter().any(|&(allowed, _)| allowed == size) {
        Ok(size)
    } else {
        let allowed: Vec<String> = GRID_SIZES.iter().map(|(n, _)| n.to_string()).collect();
        Err(format!("grid size must be one of {}", allowed.join(", ")))
    }
}
