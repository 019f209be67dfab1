pub mod a_star;
pub mod bfs;
pub mod common;
pub mod dijkstra;
pub mod heuristic;
pub mod priority_queue;

pub use a_star::AStar;
pub use bfs::Bfs;
pub use common::{reconstruct_path, PathfindingAlgorithm, SearchOutcome, SearchStep};
pub use dijkstra::Dijkstra;
pub use heuristic::Heuristic;
pub use priority_queue::PriorityQueue;

use crate::error::EngineError;
use crate::grid::Grid;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum AlgorithmKind {
    #[default]
    Bfs,
    Dijkstra,
    Astar,
}

/// Descriptive text a front end can show next to the algorithm picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 3] = [
        AlgorithmKind::Bfs,
        AlgorithmKind::Dijkstra,
        AlgorithmKind::Astar,
    ];

    /// Short identifier, as accepted on the command line.
    pub fn id(self) -> &'static str {
        match self {
            AlgorithmKind::Bfs => "bfs",
            AlgorithmKind::Dijkstra => "dijkstra",
            AlgorithmKind::Astar => "astar",
        }
    }

    pub fn info(self) -> AlgorithmInfo {
        match self {
            AlgorithmKind::Bfs => AlgorithmInfo {
                name: "Breadth-First Search",
                description: "Explores every cell at the current depth before going deeper. \
                              Guarantees the shortest path on unweighted grids.",
                time_complexity: "O(V + E)",
                space_complexity: "O(V)",
            },
            AlgorithmKind::Dijkstra => AlgorithmInfo {
                name: "Dijkstra's Algorithm",
                description: "Expands cells in order of distance from the start using a \
                              priority queue.",
                time_complexity: "O((V + E) log V)",
                space_complexity: "O(V)",
            },
            AlgorithmKind::Astar => AlgorithmInfo {
                name: "A* Search",
                description: "Ranks cells by distance travelled plus a heuristic estimate \
                              of the distance remaining.",
                time_complexity: "O(b^d)",
                space_complexity: "O(b^d)",
            },
        }
    }

    /// Starts a fresh search from the grid's current start to its end.
    /// The heuristic only matters for A*.
    pub fn create(
        self,
        grid: &Grid,
        heuristic: Heuristic,
    ) -> Result<Box<dyn PathfindingAlgorithm>, EngineError> {
        let search: Box<dyn PathfindingAlgorithm> = match self {
            AlgorithmKind::Bfs => Box::new(Bfs::new(grid)?),
            AlgorithmKind::Dijkstra => Box::new(Dijkstra::new(grid)?),
            AlgorithmKind::Astar => Box::new(AStar::new(grid, heuristic)?),
        };
        Ok(search)
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_builds_matching_kind() {
        let grid = Grid::new(15);
        for kind in AlgorithmKind::ALL {
            let search = kind.create(&grid, Heuristic::Euclidean).unwrap();
            assert_eq!(search.kind(), kind);
            assert!(!search.is_finished());
        }
    }

    #[test]
    fn ids_and_names() {
        assert_eq!(AlgorithmKind::Astar.id(), "astar");
        assert_eq!(AlgorithmKind::Bfs.to_string(), "Breadth-First Search");
        assert_eq!(AlgorithmKind::default(), AlgorithmKind::Bfs);
    }
}
