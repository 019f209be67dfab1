use crate::algorithms::AlgorithmKind;
use crate::error::EngineError;
use crate::grid::{Grid, Position};
use rustc_hash::FxHashMap;

/// What one call to [`PathfindingAlgorithm::step`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStep {
    /// A cell other than the start or end was explored for the first time.
    Visited(Position),
    /// The end was reached; the path runs from start to end inclusive.
    Found(Vec<Position>),
    /// The frontier ran dry without reaching the end.
    Exhausted,
}

/// Result of running a search to completion in one go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub path: Option<Vec<Position>>,
    pub nodes_explored: usize,
}

/// An incremental grid search.
///
/// The search borrows the grid only for the duration of a step, so the
/// grid may be edited between steps; later neighbour queries see the edits.
pub trait PathfindingAlgorithm {
    fn kind(&self) -> AlgorithmKind;

    /// Advances until the next newly visited cell or a terminal outcome.
    /// Stepping again after a terminal outcome is an error.
    fn step(&mut self, grid: &Grid) -> Result<SearchStep, EngineError>;

    fn is_finished(&self) -> bool;

    /// Steps until the search terminates.
    fn find_path(&mut self, grid: &Grid) -> Result<SearchOutcome, EngineError> {
        let mut nodes_explored = 0;
        loop {
            match self.step(grid)? {
                SearchStep::Visited(_) => nodes_explored += 1,
                SearchStep::Found(path) => {
                    return Ok(SearchOutcome {
                        path: Some(path),
                        nodes_explored,
                    })
                }
                SearchStep::Exhausted => {
                    return Ok(SearchOutcome {
                        path: None,
                        nodes_explored,
                    })
                }
            }
        }
    }
}

/// Walks the predecessor map back from `end` to `start`.
pub fn reconstruct_path(
    predecessors: &FxHashMap<Position, Position>,
    start: Position,
    end: Position,
) -> Result<Vec<Position>, EngineError> {
    let mut path = vec![end];
    let mut current = end;
    while current != start {
        // A chain longer than the map itself must contain a cycle.
        if path.len() > predecessors.len() + 1 {
            return Err(EngineError::BrokenPredecessorChain { at: current });
        }
        current = *predecessors
            .get(&current)
            .ok_or(EngineError::BrokenPredecessorChain { at: current })?;
        path.push(current);
    }
    path.reverse();
    Ok(path)
}

pub(crate) fn check_endpoints(grid: &Grid) -> Result<(Position, Position), EngineError> {
    for position in [grid.start(), grid.end()] {
        if !grid.is_valid(position) {
            return Err(EngineError::EndpointOutOfBounds {
                position,
                size: grid.size(),
            });
        }
    }
    Ok((grid.start(), grid.end()))
}
