use serde::{Deserialize, Serialize};

/// A position on the grid (0-based row and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Manhattan distance, the A* heuristic for unit-cost 4-way movement
    pub fn manhattan(&self, other: &Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True if the two positions share an edge
    pub fn is_adjacent(&self, other: &Position) -> bool {
        self.manhattan(other) == 1
    }
}

/// State tag of a single cell.
///
/// Frontier, Visited and Path are written by the search and only matter for
/// display; the search itself reads nothing but Barrier (through the neighbor
/// lists).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Unvisited,
    Start,
    End,
    Barrier,
    /// Discovered, waiting in the open set
    Frontier,
    /// Expanded (closed set)
    Visited,
    Path,
}

impl CellState {
    /// Character used by the text layout format
    pub fn symbol(self) -> char {
        match self {
            CellState::Unvisited => '.',
            CellState::Start => 'S',
            CellState::End => 'E',
            CellState::Barrier => '#',
            CellState::Frontier => '+',
            CellState::Visited => 'x',
            CellState::Path => '*',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        let state = match c {
            '.' => CellState::Unvisited,
            'S' => CellState::Start,
            'E' => CellState::End,
            '#' => CellState::Barrier,
            '+' => CellState::Frontier,
            'x' => CellState::Visited,
            '*' => CellState::Path,
            _ => return None,
        };
        Some(state)
    }

    /// Search marks are cleared between runs, editor marks are not
    pub fn is_search_mark(self) -> bool {
        matches!(self, CellState::Frontier | CellState::Visited | CellState::Path)
    }
}

/// One addressable grid position with its state and cached neighbor list
#[derive(Debug, Clone)]
pub struct Cell {
    pub position: Position,
    pub state: CellState,
    /// Walkable neighbors as of the last `Grid::update_neighbors`
    pub neighbors: Vec<Position>,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Cell {
            position: Position::new(row, col),
            state: CellState::Unvisited,
            neighbors: Vec::new(),
        }
    }

    pub fn is_barrier(&self) -> bool {
        self.state == CellState::Barrier
    }
}
