use crate::algorithms::common::{check_endpoints, PathfindingAlgorithm, SearchStep};
use crate::algorithms::AlgorithmKind;
use crate::error::EngineError;
use crate::grid::{Grid, Position};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Breadth-first search that carries each frontier entry's path with it.
///
/// Cells are marked visited when enqueued, so every cell enters the queue
/// at most once. Neighbours of the node being expanded are reported one at
/// a time, which lets a caller pause between any two of them.
pub struct Bfs {
    end: Position,
    queue: VecDeque<(Position, Vec<Position>)>,
    visited: FxHashSet<Position>,
    /// Neighbours of the last dequeued node not yet examined.
    pending: VecDeque<Position>,
    /// Path to the last dequeued node.
    current_path: Vec<Position>,
    finished: bool,
}

impl Bfs {
    pub fn new(grid: &Grid) -> Result<Self, EngineError> {
        let (start, end) = check_endpoints(grid)?;
        let mut visited = FxHashSet::default();
        visited.insert(start);
        let mut queue = VecDeque::new();
        queue.push_back((start, vec![start]));
        Ok(Bfs {
            end,
            queue,
            visited,
            pending: VecDeque::new(),
            current_path: Vec::new(),
            finished: false,
        })
    }
}

impl PathfindingAlgorithm for Bfs {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Bfs
    }

    fn step(&mut self, grid: &Grid) -> Result<SearchStep, EngineError> {
        if self.finished {
            return Err(EngineError::SearchFinished);
        }

        loop {
            while let Some(next) = self.pending.pop_front() {
                // Walls may have been drawn since the neighbours were listed.
                if !grid.is_walkable(next) || !self.visited.insert(next) {
                    continue;
                }
                let mut path = self.current_path.clone();
                path.push(next);
                self.queue.push_back((next, path));
                if next != self.end {
                    return Ok(SearchStep::Visited(next));
                }
            }

            let Some((position, path)) = self.queue.pop_front() else {
                self.finished = true;
                return Ok(SearchStep::Exhausted);
            };

            // A queued cell may have been walled since it was enqueued.
            if !grid.is_walkable(position) {
                continue;
            }

            if position == self.end {
                self.finished = true;
                return Ok(SearchStep::Found(path));
            }

            self.pending = grid.neighbors(position).into();
            self.current_path = path;
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
