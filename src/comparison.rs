use crate::algorithms::{AlgorithmKind, Heuristic};
use crate::controller::{Immediate, Phase, RunController, RunOptions};
use crate::grid::{Grid, Position};
use crate::statistics::Metrics;
use pathfinding::prelude::bfs;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmResult {
    pub algorithm: AlgorithmKind,
    /// Set for A* rows only.
    pub heuristic: Option<Heuristic>,
    pub phase: Phase,
    pub metrics: Metrics,
}

impl AlgorithmResult {
    pub fn label(&self) -> String {
        match self.heuristic {
            Some(heuristic) => format!("{} ({})", self.algorithm.id(), heuristic.name()),
            None => self.algorithm.id().to_string(),
        }
    }

    pub fn success(&self) -> bool {
        self.phase == Phase::Complete
    }
}

/// Every algorithm run on its own copy of one grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Cells on a shortest path, from an independent search; `None` when
    /// the end is unreachable.
    pub optimal_path_length: Option<usize>,
    pub results: Vec<AlgorithmResult>,
}

/// Shortest path length in cells, endpoints included, computed with the
/// `pathfinding` crate rather than this crate's searches.
pub fn reference_path_length(grid: &Grid) -> Option<usize> {
    let goal = grid.end();
    bfs(&grid.start(), |p| grid.neighbors(*p), |p: &Position| *p == goal).map(|path| path.len())
}

/// Runs BFS, Dijkstra and A* with each heuristic at instant speed.
pub fn compare_algorithms(grid: &Grid) -> Comparison {
    let runs = [
        (AlgorithmKind::Bfs, None),
        (AlgorithmKind::Dijkstra, None),
        (AlgorithmKind::Astar, Some(Heuristic::Manhattan)),
        (AlgorithmKind::Astar, Some(Heuristic::Euclidean)),
    ];

    let results = runs
        .into_iter()
        .map(|(algorithm, heuristic)| {
            let mut controller = RunController::new(grid.size()).with_grid(grid.clone());
            let options = RunOptions {
                heuristic: heuristic.unwrap_or_default(),
                delay: Duration::ZERO,
            };
            controller.start(algorithm, options);
            let phase = controller.drive(&mut Immediate);
            AlgorithmResult {
                algorithm,
                heuristic,
                phase,
                metrics: controller.metrics(),
            }
        })
        .collect();

    Comparison {
        optimal_path_length: reference_path_length(grid),
        results,
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== ALGORITHM COMPARISON RESULTS ===")?;
        match self.optimal_path_length {
            Some(length) => writeln!(f, "Reference shortest path: {} cells", length)?,
            None => writeln!(f, "Reference shortest path: none")?,
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:<28} {:<8} {:<12} {:<15} {:<10}",
            "Algorithm", "Success", "Path Length", "Nodes Explored", "Time"
        )?;
        writeln!(f, "{}", "-".repeat(77))?;
        for result in &self.results {
            writeln!(
                f,
                "{:<28} {:<8} {:<12} {:<15} {:<10}",
                result.label(),
                if result.success() { "✓" } else { "✗" },
                result.metrics.path_length,
                result.metrics.nodes_explored,
                format!("{:.2}ms", result.metrics.execution_time_ms),
            )?;
        }

        let fewest = self
            .results
            .iter()
            .filter(|r| r.success())
            .min_by_key(|r| r.metrics.nodes_explored);
        if let Some(best) = fewest {
            writeln!(f)?;
            writeln!(
                f,
                "Fewest nodes explored: {} ({})",
                best.label(),
                best.metrics.nodes_explored
            )?;
        }
        Ok(())
    }
}
