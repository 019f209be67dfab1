use crate::algorithms::common::{PathfindingAlgorithm, SearchStep};
use crate::algorithms::dijkstra::BestFirst;
use crate::algorithms::{AlgorithmKind, Heuristic};
use crate::error::EngineError;
use crate::grid::Grid;

/// A* search: Dijkstra's frontier ranked by `g + h` instead of `g`.
pub struct AStar {
    search: BestFirst,
    heuristic: Heuristic,
}

impl AStar {
    /// Creates an A* search from the grid's current start to its end.
    pub fn new(grid: &Grid, heuristic: Heuristic) -> Result<Self, EngineError> {
        Ok(AStar {
            search: BestFirst::new(grid, Some(heuristic))?,
            heuristic,
        })
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }
}

impl PathfindingAlgorithm for AStar {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Astar
    }

    fn step(&mut self, grid: &Grid) -> Result<SearchStep, EngineError> {
        self.search.step(grid)
    }

    fn is_finished(&self) -> bool {
        self.search.is_finished()
    }
}
