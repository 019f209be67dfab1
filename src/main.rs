use clap::Parser;

use grid_pathfinding_viz::algorithms::AlgorithmKind;
use grid_pathfinding_viz::comparison::compare_algorithms;
use grid_pathfinding_viz::config::{Config, Layout};
use grid_pathfinding_viz::controller::{Phase, RunController, RunObserver, SleepScheduler};
use grid_pathfinding_viz::error::EngineError;
use grid_pathfinding_viz::grid::Grid;
use grid_pathfinding_viz::statistics::Metrics;
use tracing::Level;

/// Draws the grid to the terminal after every change while `live` is set.
struct TerminalRenderer {
    live: bool,
    title: String,
    phase: Phase,
    metrics: Metrics,
}

impl TerminalRenderer {
    fn new(title: String) -> Self {
        TerminalRenderer {
            live: false,
            title,
            phase: Phase::Ready,
            metrics: Metrics::default(),
        }
    }

    fn draw(&self, grid: &Grid) {
        println!("=== PATHFINDING VISUALIZER ===");
        println!(
            "Algorithm: {} | Status: {} | Path: {} | Explored: {}",
            self.title, self.phase, self.metrics.path_length, self.metrics.nodes_explored
        );
        print_grid(grid);
    }
}

impl RunObserver for TerminalRenderer {
    fn render(&mut self, grid: &Grid) {
        if self.live {
            clear_screen();
            self.draw(grid);
        }
    }

    fn on_status_change(&mut self, phase: Phase) {
        self.phase = phase;
    }

    fn on_metrics_change(&mut self, metrics: &Metrics) {
        self.metrics = *metrics;
    }

    fn on_error(&mut self, error: &EngineError) {
        eprintln!("Search error: {}", error);
    }
}

/// Print the grid with row/column numbers and a legend.
fn print_grid(grid: &Grid) {
    println!("Legend: S=Start, E=End, #=Wall, o=Visited, *=Path, .=Empty");

    print!("   ");
    for col in 0..grid.size() {
        print!("{:2}", col % 10);
    }
    println!();

    for (row, cells) in grid.cells().iter().enumerate() {
        print!("{:2} ", row);
        for cell in cells {
            print!("{} ", cell.symbol());
        }
        println!();
    }
    println!();
}

fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let config = Config::parse();
    init_tracing(config.verbose);

    let title = match config.algorithm {
        AlgorithmKind::Astar => {
            format!("{} ({})", config.algorithm, config.heuristic)
        }
        _ => config.algorithm.to_string(),
    };
    let mut controller = RunController::with_observer(config.grid_size, TerminalRenderer::new(title));
    if let Some(seed) = config.seed {
        controller = controller.with_seed(seed);
    }

    // The maze keeps the current endpoints; the obstacle fill resets them.
    let relocate = |controller: &mut RunController<TerminalRenderer>| {
        if let Some(start) = config.start {
            controller.relocate_start(start);
        }
        if let Some(end) = config.end {
            controller.relocate_end(end);
        }
    };
    match config.layout {
        Layout::Empty => relocate(&mut controller),
        Layout::Maze => {
            relocate(&mut controller);
            controller.generate_maze();
        }
        Layout::Obstacles => {
            controller.generate_obstacles(config.density);
            relocate(&mut controller);
        }
    }

    if config.compare {
        print_grid(controller.grid());
        println!("{}", compare_algorithms(controller.grid()));
        return;
    }

    println!("Grid size: {}x{}", config.grid_size, config.grid_size);
    let info = config.algorithm.info();
    println!("Algorithm: {}", controller.observer().title);
    println!("  {}", info.description);
    println!(
        "  Time: {} | Space: {}",
        info.time_complexity, info.space_complexity
    );
    if config.delay().is_zero() {
        println!("Visualization disabled - running in fast mode");
    } else {
        println!("Visualization enabled with {}ms delay", config.delay().as_millis());
        println!("Press Ctrl+C to stop the run");
    }

    controller.observer_mut().live = !config.quiet;
    controller.start(config.algorithm, config.run_options());
    let phase = controller.drive(&mut SleepScheduler);

    if config.quiet {
        controller.observer().draw(controller.grid());
    }
    println!("=== FINAL RESULTS ===");
    println!("Status: {}", phase);
    print!("{}", controller.metrics());
}
