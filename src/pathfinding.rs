use crate::cell::{CellState, Position};
use crate::Grid;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Manhattan distance; admissible and consistent for unit-cost 4-way moves
pub fn heuristic(a: Position, b: Position) -> usize {
    a.manhattan(&b)
}

/// A shortest path, start and end included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub cells: Vec<Position>,
    /// Number of moves (best known cost of the end cell)
    pub cost: usize,
}

impl Path {
    pub fn start(&self) -> Position {
        self.cells[0]
    }

    pub fn end(&self) -> Position {
        self.cells[self.cells.len() - 1]
    }
}

/// Result of a search run. Both variants are normal outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    PathFound(Path),
    NoPathExists,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::PathFound(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            SearchOutcome::PathFound(path) => Some(path),
            SearchOutcome::NoPathExists => None,
        }
    }
}

/// Progress counters for a search, live or finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Frontier pops so far, stale entries included
    pub expanded: usize,
    /// Entries still queued
    pub frontier: usize,
    /// Set once a path has been found
    pub cost: Option<usize>,
}

/// What a single call to [`Search::step`] produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    /// Something visible changed; render before stepping again
    Running,
    Done(SearchOutcome),
}

/// An entry in the open set
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    estimate: usize,
    sequence: u64,
    position: Position,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.estimate == other.estimate && self.sequence == other.sequence
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default).
        // Sequence numbers are unique, so this is a strict total order.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

enum Phase {
    Expanding,
    /// Walking `origin` back from the end, one cell per step
    Reconstructing { trail: Vec<Position>, next: usize },
    Finished(SearchOutcome),
}

/// A* search over a [`Grid`], advanced one render step at a time.
///
/// Each call to [`Search::step`] either expands one cell or reveals one cell
/// of the final path, mutating cell state tags as it goes. The grid must not
/// gain or lose barriers while a search is in progress.
pub struct Search {
    start: Position,
    end: Position,
    frontier: BinaryHeap<FrontierEntry>,
    in_frontier: HashSet<Position>,
    best_cost: HashMap<Position, usize>,
    estimated_total: HashMap<Position, usize>,
    origin: HashMap<Position, Position>,
    sequence: u64,
    /// Expanded cell still to be tagged Visited; deferred so the render after
    /// an expansion shows it as it was when popped
    pending_close: Option<Position>,
    expansion_order: Vec<Position>,
    phase: Phase,
}

impl Search {
    /// Set up a search from `start` to `end`.
    ///
    /// Panics if `start == end`, either position lies outside the grid, or the
    /// grid's neighbor lists are stale (call `Grid::update_neighbors` first).
    pub fn new(grid: &Grid, start: Position, end: Position) -> Self {
        assert!(grid.contains(start), "start {:?} is outside the grid", start);
        assert!(grid.contains(end), "end {:?} is outside the grid", end);
        assert_ne!(start, end, "start and end must be different cells");
        assert!(
            !grid.neighbors_stale(),
            "neighbor lists are stale; call Grid::update_neighbors before searching"
        );

        let estimate = heuristic(start, end);
        let mut search = Search {
            start,
            end,
            frontier: BinaryHeap::new(),
            in_frontier: HashSet::new(),
            best_cost: HashMap::new(),
            estimated_total: HashMap::new(),
            origin: HashMap::new(),
            sequence: 0,
            pending_close: None,
            expansion_order: Vec::new(),
            phase: Phase::Expanding,
        };

        search.best_cost.insert(start, 0);
        search.estimated_total.insert(start, estimate);
        search.frontier.push(FrontierEntry {
            estimate,
            sequence: 0,
            position: start,
        });
        search.in_frontier.insert(start);

        tracing::debug!(?start, ?end, estimate, "search started");
        search
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Lowest confirmed cost from start, if the cell has been reached
    pub fn best_cost(&self, pos: Position) -> Option<usize> {
        self.best_cost.get(&pos).copied()
    }

    /// best cost + heuristic, if the cell has been reached
    pub fn estimated_total(&self, pos: Position) -> Option<usize> {
        self.estimated_total.get(&pos).copied()
    }

    /// Cells in the order they were popped from the frontier
    pub fn expansion_order(&self) -> &[Position] {
        &self.expansion_order
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn stats(&self) -> SearchStats {
        let cost = match &self.phase {
            Phase::Finished(SearchOutcome::PathFound(path)) => Some(path.cost),
            _ => None,
        };
        SearchStats {
            expanded: self.expansion_order.len(),
            frontier: self.frontier.len(),
            cost,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    /// Advance by one render step
    pub fn step(&mut self, grid: &mut Grid) -> SearchStatus {
        match &self.phase {
            Phase::Finished(outcome) => SearchStatus::Done(outcome.clone()),
            Phase::Reconstructing { .. } => self.reconstruct_step(grid),
            Phase::Expanding => self.expand_step(grid),
        }
    }

    fn expand_step(&mut self, grid: &mut Grid) -> SearchStatus {
        self.close_pending(grid);

        let Some(entry) = self.frontier.pop() else {
            tracing::info!(expanded = self.expansion_order.len(), "no path exists");
            return self.finish(SearchOutcome::NoPathExists);
        };

        let current = entry.position;
        self.in_frontier.remove(&current);
        self.expansion_order.push(current);

        if current == self.end {
            let mut trail = Vec::new();
            let mut cell = current;
            while let Some(&prev) = self.origin.get(&cell) {
                trail.push(cell);
                cell = prev;
            }
            self.phase = Phase::Reconstructing { trail, next: 0 };
            return self.reconstruct_step(grid);
        }

        let current_cost = self.best_cost[&current];
        tracing::trace!(?current, cost = current_cost, estimate = entry.estimate, "expanding");

        let neighbors = grid.neighbors(current).to_vec();
        for neighbor in neighbors {
            let tentative = current_cost + 1;
            let known = self.best_cost.get(&neighbor).copied().unwrap_or(usize::MAX);
            if tentative >= known {
                continue;
            }

            let estimate = tentative + heuristic(neighbor, self.end);
            self.origin.insert(neighbor, current);
            self.best_cost.insert(neighbor, tentative);
            self.estimated_total.insert(neighbor, estimate);

            // An entry already queued for this cell keeps its old estimate
            // and is reprocessed harmlessly if popped.
            if self.in_frontier.insert(neighbor) {
                self.sequence += 1;
                self.frontier.push(FrontierEntry {
                    estimate,
                    sequence: self.sequence,
                    position: neighbor,
                });
                if !matches!(grid.state(neighbor), CellState::Start | CellState::End) {
                    grid.set_state(neighbor, CellState::Frontier);
                }
            }
        }

        if current != self.start {
            self.pending_close = Some(current);
        }
        SearchStatus::Running
    }

    fn close_pending(&mut self, grid: &mut Grid) {
        if let Some(pos) = self.pending_close.take() {
            if !matches!(grid.state(pos), CellState::Path | CellState::End | CellState::Start) {
                grid.set_state(pos, CellState::Visited);
            }
        }
    }

    fn reconstruct_step(&mut self, grid: &mut Grid) -> SearchStatus {
        let Phase::Reconstructing { ref trail, ref mut next } = self.phase else {
            unreachable!("reconstruct_step outside reconstruction phase");
        };

        if let Some(&pos) = trail.get(*next) {
            *next += 1;
            grid.set_state(pos, CellState::Path);
            return SearchStatus::Running;
        }

        let mut cells: Vec<Position> = trail.iter().rev().copied().collect();
        cells.insert(0, self.start);
        grid.set_state(self.end, CellState::End);

        let path = Path {
            cost: self.best_cost[&self.end],
            cells,
        };
        tracing::info!(
            cost = path.cost,
            expanded = self.expansion_order.len(),
            "path found"
        );
        self.finish(SearchOutcome::PathFound(path))
    }

    fn finish(&mut self, outcome: SearchOutcome) -> SearchStatus {
        self.phase = Phase::Finished(outcome.clone());
        SearchStatus::Done(outcome)
    }
}

/// Run A* from `start` to `end` to completion.
///
/// `on_step` is called once after every expansion and once after every cell
/// of the path is revealed, with the grid in its current state. There is no
/// cancellation; drive a [`Search`] directly to stop early.
pub fn search<F>(grid: &mut Grid, start: Position, end: Position, mut on_step: F) -> SearchOutcome
where
    F: FnMut(&Grid),
{
    let mut search = Search::new(grid, start, end);
    loop {
        match search.step(grid) {
            SearchStatus::Running => on_step(grid),
            SearchStatus::Done(outcome) => return outcome,
        }
    }
}

/// Format path for display
pub fn format_path(path: &Path) -> String {
    path.cells
        .iter()
        .map(|p| format!("({},{})", p.row, p.col))
        .collect::<Vec<_>>()
        .join(" -> ")
}
