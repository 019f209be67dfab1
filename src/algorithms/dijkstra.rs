use crate::algorithms::common::{check_endpoints, reconstruct_path, PathfindingAlgorithm, SearchStep};
use crate::algorithms::priority_queue::PriorityQueue;
use crate::algorithms::{AlgorithmKind, Heuristic};
use crate::error::EngineError;
use crate::grid::{Grid, Position};
use rustc_hash::{FxHashMap, FxHashSet};

/// Uniform-cost best-first search shared by Dijkstra and A*.
///
/// Improved scores are re-enqueued rather than decreased in place; a cell
/// dequeued after it was finalized is a stale entry and is skipped. Without
/// a heuristic the priority is the accumulated distance, with one it is
/// `g + h`.
pub(crate) struct BestFirst {
    start: Position,
    end: Position,
    heuristic: Option<Heuristic>,
    queue: PriorityQueue<Position>,
    /// Best known distance from the start; absent means infinite.
    distances: FxHashMap<Position, u32>,
    predecessors: FxHashMap<Position, Position>,
    finalized: FxHashSet<Position>,
    finished: bool,
}

impl BestFirst {
    pub(crate) fn new(grid: &Grid, heuristic: Option<Heuristic>) -> Result<Self, EngineError> {
        let (start, end) = check_endpoints(grid)?;
        let mut search = BestFirst {
            start,
            end,
            heuristic,
            queue: PriorityQueue::new(),
            distances: FxHashMap::default(),
            predecessors: FxHashMap::default(),
            finalized: FxHashSet::default(),
            finished: false,
        };
        search.distances.insert(start, 0);
        let priority = search.priority(start, 0);
        search.queue.enqueue(start, priority);
        Ok(search)
    }

    fn priority(&self, position: Position, distance: u32) -> f64 {
        let h = self
            .heuristic
            .map_or(0.0, |heuristic| heuristic.estimate(position, self.end));
        f64::from(distance) + h
    }

    pub(crate) fn step(&mut self, grid: &Grid) -> Result<SearchStep, EngineError> {
        if self.finished {
            return Err(EngineError::SearchFinished);
        }

        while let Some(current) = self.queue.dequeue() {
            // Walls drawn after enqueueing are dropped here.
            if !grid.is_walkable(current) || !self.finalized.insert(current) {
                continue;
            }

            if current == self.end {
                self.finished = true;
                let path = reconstruct_path(&self.predecessors, self.start, self.end)?;
                return Ok(SearchStep::Found(path));
            }

            let distance = self
                .distances
                .get(&current)
                .copied()
                .ok_or(EngineError::BrokenPredecessorChain { at: current })?;
            for neighbor in grid.neighbors(current) {
                let candidate = distance + 1;
                let known = self.distances.get(&neighbor).copied().unwrap_or(u32::MAX);
                if candidate < known {
                    self.distances.insert(neighbor, candidate);
                    self.predecessors.insert(neighbor, current);
                    let priority = self.priority(neighbor, candidate);
                    self.queue.enqueue(neighbor, priority);
                }
            }

            if current != self.start {
                return Ok(SearchStep::Visited(current));
            }
        }

        self.finished = true;
        Ok(SearchStep::Exhausted)
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Dijkstra's algorithm over unit-cost orthogonal moves.
pub struct Dijkstra {
    search: BestFirst,
}

impl Dijkstra {
    pub fn new(grid: &Grid) -> Result<Self, EngineError> {
        Ok(Dijkstra {
            search: BestFirst::new(grid, None)?,
        })
    }
}

impl PathfindingAlgorithm for Dijkstra {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Dijkstra
    }

    fn step(&mut self, grid: &Grid) -> Result<SearchStep, EngineError> {
        self.search.step(grid)
    }

    fn is_finished(&self) -> bool {
        self.search.is_finished()
    }
}
