use crate::grid::{Position, MIN_GRID_SIZE};

/// Faults raised while stepping a search. None of these are "no path":
/// an exhausted frontier is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("search endpoint {position} lies outside the {size}x{size} grid")]
    EndpointOutOfBounds { position: Position, size: usize },

    #[error("predecessor chain broken at {at} while rebuilding the path")]
    BrokenPredecessorChain { at: Position },

    #[error("search stepped after it had already finished")]
    SearchFinished,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridParseError {
    #[error("grid needs at least {} rows, found {0}", MIN_GRID_SIZE)]
    TooSmall(usize),

    #[error("row {row} has {width} cells but the grid has {height} rows")]
    NotSquare {
        row: usize,
        width: usize,
        height: usize,
    },

    #[error("unknown cell symbol '{symbol}' at ({row}, {col})")]
    UnknownSymbol { symbol: char, row: usize, col: usize },

    #[error("marker '{0}' appears more than once")]
    DuplicateMarker(char),

    #[error("marker '{0}' is missing")]
    MissingMarker(char),
}
