use crate::cell::{Cell, CellState, Position};

/// Square grid of cells, addressed by (row, col)
#[derive(Clone, Debug)]
pub struct Grid {
    pub dimension: usize,
    cells: Vec<Cell>,
    /// Revision number - incremented whenever a cell's barrier status changes
    revision: u64,
    /// Revision the cached neighbor lists were computed at
    neighbors_revision: Option<u64>,
}

impl Grid {
    /// Build a dimension x dimension grid with every cell Unvisited
    pub fn new(dimension: usize) -> Self {
        assert!(dimension > 0, "grid dimension must be positive");

        let mut cells = Vec::with_capacity(dimension * dimension);
        for row in 0..dimension {
            for col in 0..dimension {
                cells.push(Cell::new(row, col));
            }
        }

        Grid {
            dimension,
            cells,
            revision: 0,
            neighbors_revision: None,
        }
    }

    /// Discard every cell and rebuild at the same dimension
    pub fn reset(&mut self) {
        *self = Grid::new(self.dimension);
    }

    /// Return Frontier/Visited/Path cells to Unvisited, keeping start, end and barriers
    pub fn clear_search(&mut self) {
        for cell in &mut self.cells {
            if cell.state.is_search_mark() {
                cell.state = CellState::Unvisited;
            }
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.dimension && pos.col < self.dimension
    }

    fn index(&self, pos: Position) -> usize {
        assert!(self.contains(pos), "position {:?} outside {}x{} grid", pos, self.dimension, self.dimension);
        pos.row * self.dimension + pos.col
    }

    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[self.index(pos)]
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn state(&self, pos: Position) -> CellState {
        self.cell(pos).state
    }

    /// Set a cell's state tag. Changing barrier status bumps the revision,
    /// which marks the cached neighbor lists stale.
    pub fn set_state(&mut self, pos: Position, state: CellState) {
        let idx = self.index(pos);
        let old = self.cells[idx].state;
        if (old == CellState::Barrier) != (state == CellState::Barrier) {
            self.revision += 1;
        }
        self.cells[idx].state = state;
    }

    pub fn is_barrier(&self, pos: Position) -> bool {
        self.cell(pos).is_barrier()
    }

    /// Walkable orthogonal neighbors in fixed order: below, above, right, left
    pub fn compute_neighbors(&self, pos: Position) -> Vec<Position> {
        let Position { row, col } = pos;
        let mut candidates = Vec::with_capacity(4);

        if row + 1 < self.dimension {
            candidates.push(Position::new(row + 1, col));
        }
        if row > 0 {
            candidates.push(Position::new(row - 1, col));
        }
        if col + 1 < self.dimension {
            candidates.push(Position::new(row, col + 1));
        }
        if col > 0 {
            candidates.push(Position::new(row, col - 1));
        }

        candidates.retain(|p| !self.is_barrier(*p));
        candidates
    }

    /// Recompute every cell's cached neighbor list. Required before a search
    /// whenever barriers have changed; nothing calls this automatically.
    pub fn update_neighbors(&mut self) {
        let lists: Vec<Vec<Position>> = self
            .cells
            .iter()
            .map(|cell| self.compute_neighbors(cell.position))
            .collect();

        for (cell, neighbors) in self.cells.iter_mut().zip(lists) {
            cell.neighbors = neighbors;
        }
        self.neighbors_revision = Some(self.revision);

        tracing::debug!(revision = self.revision, "recomputed neighbor lists");
    }

    /// Cached neighbor list (may be stale, see `neighbors_stale`)
    pub fn neighbors(&self, pos: Position) -> &[Position] {
        &self.cell(pos).neighbors
    }

    pub fn neighbors_stale(&self) -> bool {
        self.neighbors_revision != Some(self.revision)
    }

    /// Get current grid revision number
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Map a pointer position in pixels to the cell under it
    pub fn cell_at_pixel(&self, x: f32, y: f32, cell_size: f32) -> Option<Position> {
        if x < 0.0 || y < 0.0 || cell_size <= 0.0 {
            return None;
        }
        let pos = Position::new((y / cell_size) as usize, (x / cell_size) as usize);
        self.contains(pos).then_some(pos)
    }
}
