use std::fmt;

/// Live numbers for the current run. Zeroed at the start of every run and
/// whenever the grid is reset or cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Metrics {
    /// Cells in the found path, endpoints included; 0 when no path.
    pub path_length: usize,
    /// Cells explored, excluding the start and end.
    pub nodes_explored: usize,
    pub execution_time_ms: f64,
}

impl Metrics {
    /// Moves along the path, one fewer than its cell count.
    pub fn path_edges(&self) -> usize {
        self.path_length.saturating_sub(1)
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Path Length: {}", self.path_length)?;
        writeln!(f, "Nodes Explored: {}", self.nodes_explored)?;
        writeln!(f, "Execution Time: {}ms", self.execution_time_ms.round())?;
        Ok(())
    }
}
