use crate::grid::Position;
use std::fmt;

/// Distance estimate A* uses to rank the frontier. Both choices are
/// admissible for 4-directional unit-cost movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum Heuristic {
    /// `|dr| + |dc|`, exact on an open grid.
    #[default]
    Manhattan,
    /// Straight-line distance; never tighter than Manhattan here.
    Euclidean,
}

impl Heuristic {
    pub fn estimate(self, from: Position, to: Position) -> f64 {
        let d_row = from.row.abs_diff(to.row) as f64;
        let d_col = from.col.abs_diff(to.col) as f64;
        match self {
            Heuristic::Manhattan => d_row + d_col,
            Heuristic::Euclidean => d_row.hypot(d_col),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Manhattan => "Manhattan Distance",
            Heuristic::Euclidean => "Euclidean Distance",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimates() {
        let a = Position::new(1, 1);
        let b = Position::new(4, 5);
        assert_eq!(Heuristic::Manhattan.estimate(a, b), 7.0);
        assert_eq!(Heuristic::Euclidean.estimate(a, b), 5.0);
        assert_eq!(Heuristic::Euclidean.estimate(b, a), 5.0);
        assert_eq!(Heuristic::Manhattan.estimate(a, a), 0.0);
    }

    #[test]
    fn euclidean_never_exceeds_manhattan() {
        for row in 0..10 {
            for col in 0..10 {
                let p = Position::new(row, col);
                let goal = Position::new(4, 6);
                assert!(
                    Heuristic::Euclidean.estimate(p, goal)
                        <= Heuristic::Manhattan.estimate(p, goal)
                );
            }
        }
    }
}
