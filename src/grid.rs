use crate::error::GridParseError;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Smallest grid the engine will build; smaller requests are clamped up.
pub const MIN_GRID_SIZE: usize = 3;

/// Wall probability used by the obstacle generator when none is given.
pub const DEFAULT_OBSTACLE_DENSITY: f64 = 0.3;

/// Neighbour offsets in the order searches must see them: up, down, left, right.
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    fn offset(self, d_row: isize, d_col: isize) -> Option<Position> {
        Some(Position {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl FromStr for Position {
    type Err = String;

    /// Parses `ROW,COL`, e.g. `3,7`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .split_once(',')
            .ok_or_else(|| format!("expected ROW,COL but got '{}'", s))?;
        let row = row
            .trim()
            .parse()
            .map_err(|e| format!("invalid row '{}': {}", row.trim(), e))?;
        let col = col
            .trim()
            .parse()
            .map_err(|e| format!("invalid column '{}': {}", col.trim(), e))?;
        Ok(Position { row, col })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Wall,
    Start,
    End,
    Visited,
    Path,
}

impl Cell {
    /// Character used for this cell in the text form of a grid.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Wall => '#',
            Cell::Start => 'S',
            Cell::End => 'E',
            Cell::Visited => 'o',
            Cell::Path => '*',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Cell> {
        match symbol {
            '.' => Some(Cell::Empty),
            '#' => Some(Cell::Wall),
            'S' => Some(Cell::Start),
            'E' => Some(Cell::End),
            'o' => Some(Cell::Visited),
            '*' => Some(Cell::Path),
            _ => None,
        }
    }

    /// Cells painted by a search rather than by the user.
    pub fn is_overlay(self) -> bool {
        matches!(self, Cell::Visited | Cell::Path)
    }
}

/// Square grid of cells with exactly one start and one end marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    size: usize,
    cells: Vec<Vec<Cell>>,
    start: Position,
    end: Position,
}

impl Grid {
    /// Builds an empty grid with the default start and end. Sizes below
    /// [`MIN_GRID_SIZE`] are clamped.
    pub fn new(size: usize) -> Self {
        let size = size.max(MIN_GRID_SIZE);
        let (start, end) = Self::default_endpoints(size);
        let mut grid = Grid {
            size,
            cells: vec![vec![Cell::Empty; size]; size],
            start,
            end,
        };
        grid.place_markers();
        grid
    }

    /// Default start `(1, 1)` and end `(N-2, N-2)`. On a 3x3 grid those meet,
    /// so the end moves to the far corner instead.
    pub fn default_endpoints(size: usize) -> (Position, Position) {
        let size = size.max(MIN_GRID_SIZE);
        let start = Position::new(1, 1);
        let end = Position::new(size - 2, size - 2);
        if end == start {
            (start, Position::new(size - 1, size - 1))
        } else {
            (start, end)
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Row-major view of every cell, for renderers.
    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn cell(&self, pos: Position) -> Option<Cell> {
        if self.is_valid(pos) {
            Some(self.cells[pos.row][pos.col])
        } else {
            None
        }
    }

    pub fn is_valid(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    pub fn is_walkable(&self, pos: Position) -> bool {
        matches!(self.cell(pos), Some(cell) if cell != Cell::Wall)
    }

    /// Walkable orthogonal neighbours of `pos`, always in up, down, left,
    /// right order.
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        DIRECTIONS
            .iter()
            .filter_map(|&(d_row, d_col)| pos.offset(d_row, d_col))
            .filter(|&next| self.is_walkable(next))
            .collect()
    }

    /// Number of cells currently in the given state.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&c| c == cell)
            .count()
    }

    /// Writes `cell` at `pos`. Out-of-bounds positions are ignored, the
    /// start and end cells are never overwritten, and `Start`/`End` are
    /// routed through relocation.
    pub fn set_cell(&mut self, pos: Position, cell: Cell) {
        if !self.is_valid(pos) {
            return;
        }
        match cell {
            Cell::Start => self.relocate_start(pos),
            Cell::End => self.relocate_end(pos),
            _ => {
                if pos != self.start && pos != self.end {
                    self.cells[pos.row][pos.col] = cell;
                }
            }
        }
    }

    /// Flips a wall to empty, or anything else that is not a marker to a wall.
    pub fn toggle_wall(&mut self, pos: Position) {
        match self.cell(pos) {
            Some(Cell::Wall) => self.set_cell(pos, Cell::Empty),
            Some(Cell::Start | Cell::End) | None => {}
            Some(_) => self.set_cell(pos, Cell::Wall),
        }
    }

    /// Drag-draw: walls the cell unless it is already a wall or a marker.
    pub fn paint_wall(&mut self, pos: Position) {
        if matches!(self.cell(pos), Some(cell) if cell == Cell::Empty || cell.is_overlay()) {
            self.set_cell(pos, Cell::Wall);
        }
    }

    /// Drag-erase: clears the cell only if it is a wall.
    pub fn erase_wall(&mut self, pos: Position) {
        if self.cell(pos) == Some(Cell::Wall) {
            self.set_cell(pos, Cell::Empty);
        }
    }

    /// Moves the start marker. Invalid positions and the end cell are refused.
    pub fn relocate_start(&mut self, pos: Position) {
        if !self.is_valid(pos) || pos == self.end {
            return;
        }
        self.cells[self.start.row][self.start.col] = Cell::Empty;
        self.start = pos;
        self.cells[pos.row][pos.col] = Cell::Start;
    }

    /// Moves the end marker. Invalid positions and the start cell are refused.
    pub fn relocate_end(&mut self, pos: Position) {
        if !self.is_valid(pos) || pos == self.start {
            return;
        }
        self.cells[self.end.row][self.end.col] = Cell::Empty;
        self.end = pos;
        self.cells[pos.row][pos.col] = Cell::End;
    }

    /// Resets every Visited/Path cell to Empty, leaving walls and markers.
    pub fn clear_search_overlay(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            if cell.is_overlay() {
                *cell = Cell::Empty;
            }
        }
    }

    /// Back to an empty grid of the same size with default endpoints.
    pub fn reset(&mut self) {
        *self = Grid::new(self.size);
    }

    /// Lattice maze: border walls, wall lines on every even row and column,
    /// then random passages. Start and end keep their positions and get one
    /// open neighbour each. Carving is random, so a maze may have no route.
    pub fn generate_maze<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let n = self.size;
        for (row, line) in self.cells.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                let border = row == 0 || row == n - 1 || col == 0 || col == n - 1;
                *cell = if border { Cell::Wall } else { Cell::Empty };
            }
        }

        for row in (2..n.saturating_sub(2)).step_by(2) {
            for col in 1..n - 1 {
                self.cells[row][col] = Cell::Wall;
            }
        }
        for col in (2..n.saturating_sub(2)).step_by(2) {
            for row in 1..n - 1 {
                self.cells[row][col] = Cell::Wall;
            }
        }

        for row in (2..n.saturating_sub(2)).step_by(2) {
            for col in (2..n.saturating_sub(2)).step_by(2) {
                if rng.gen_bool(0.5) {
                    if col > 2 && rng.gen_bool(0.5) {
                        self.cells[row][col - 1] = Cell::Empty;
                    }
                    if row > 2 {
                        self.cells[row - 1][col] = Cell::Empty;
                    }
                }
            }
        }

        self.place_markers();

        let openings = [
            self.start.offset(1, 0),
            self.start.offset(0, 1),
            self.end.offset(-1, 0),
            self.end.offset(0, -1),
        ];
        for pos in openings.into_iter().flatten() {
            if self.is_valid(pos) && pos != self.start && pos != self.end {
                self.cells[pos.row][pos.col] = Cell::Empty;
            }
        }
    }

    /// Reinitializes the grid, then walls every non-marker cell with
    /// probability `density` (clamped to `[0, 1]`).
    pub fn generate_obstacles<R: Rng + ?Sized>(&mut self, density: f64, rng: &mut R) {
        let density = if density.is_nan() {
            DEFAULT_OBSTACLE_DENSITY
        } else {
            density.clamp(0.0, 1.0)
        };
        self.reset();
        for row in 0..self.size {
            for col in 0..self.size {
                let pos = Position::new(row, col);
                if pos == self.start || pos == self.end {
                    continue;
                }
                if rng.gen_bool(density) {
                    self.cells[row][col] = Cell::Wall;
                }
            }
        }
    }

    fn place_markers(&mut self) {
        self.cells[self.start.row][self.start.col] = Cell::Start;
        self.cells[self.end.row][self.end.col] = Cell::End;
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.cells {
            for cell in line {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = GridParseError;

    /// Parses the text form written by `Display`. Blank lines and
    /// surrounding whitespace are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let size = lines.len();
        if size < MIN_GRID_SIZE {
            return Err(GridParseError::TooSmall(size));
        }

        let mut cells = Vec::with_capacity(size);
        let mut start = None;
        let mut end = None;
        for (row, line) in lines.iter().enumerate() {
            let mut parsed = Vec::with_capacity(size);
            for (col, symbol) in line.chars().enumerate() {
                let cell = Cell::from_symbol(symbol)
                    .ok_or(GridParseError::UnknownSymbol { symbol, row, col })?;
                let marker = match cell {
                    Cell::Start => Some(&mut start),
                    Cell::End => Some(&mut end),
                    _ => None,
                };
                if let Some(slot) = marker {
                    if slot.replace(Position::new(row, col)).is_some() {
                        return Err(GridParseError::DuplicateMarker(symbol));
                    }
                }
                parsed.push(cell);
            }
            if parsed.len() != size {
                return Err(GridParseError::NotSquare {
                    row,
                    width: parsed.len(),
                    height: size,
                });
            }
            cells.push(parsed);
        }

        Ok(Grid {
            size,
            cells,
            start: start.ok_or(GridParseError::MissingMarker('S'))?,
            end: end.ok_or(GridParseError::MissingMarker('E'))?,
        })
    }
}
