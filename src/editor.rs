use crate::action_log::{Action, ActionLog};
use crate::cell::{CellState, Position};
use crate::pathfinding::{Search, SearchOutcome, SearchStats, SearchStatus};
use crate::Grid;

/// Interaction state behind the window: the grid, the start/end assignments,
/// the search in progress and the action log.
///
/// Pointer semantics: the primary button sets start, then end, then barriers;
/// the secondary button clears a cell (un-assigning start/end). Edits are
/// ignored while a search is running.
pub struct Editor {
    grid: Grid,
    start: Option<Position>,
    end: Option<Position>,
    running: Option<Search>,
    last_outcome: Option<SearchOutcome>,
    last_stats: Option<SearchStats>,
    log: Option<ActionLog>,
}

impl Editor {
    pub fn new(dimension: usize) -> Self {
        Editor {
            grid: Grid::new(dimension),
            start: None,
            end: None,
            running: None,
            last_outcome: None,
            last_stats: None,
            log: None,
        }
    }

    /// Same as `new`, recording every action
    pub fn with_action_log(dimension: usize) -> Self {
        Editor {
            log: Some(ActionLog::new()),
            ..Self::new(dimension)
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Option<Position> {
        self.start
    }

    pub fn end(&self) -> Option<Position> {
        self.end
    }

    pub fn action_log(&self) -> Option<&ActionLog> {
        self.log.as_ref()
    }

    pub fn is_searching(&self) -> bool {
        self.running.is_some()
    }

    pub fn can_search(&self) -> bool {
        self.start.is_some() && self.end.is_some() && !self.is_searching()
    }

    /// Outcome of the most recent completed search
    pub fn last_outcome(&self) -> Option<&SearchOutcome> {
        self.last_outcome.as_ref()
    }

    /// Counters of the running search, or of the last one to finish
    pub fn search_stats(&self) -> Option<SearchStats> {
        match &self.running {
            Some(search) => Some(search.stats()),
            None => self.last_stats,
        }
    }

    fn record(&mut self, action: Action) {
        if let Some(log) = self.log.as_mut() {
            log.log_finish(action);
        }
    }

    /// Primary button on `pos`. Returns true if the grid changed.
    pub fn primary(&mut self, pos: Position) -> bool {
        if self.is_searching() || !self.grid.contains(pos) {
            return false;
        }

        let Position { row, col } = pos;
        if self.start.is_none() && self.end != Some(pos) {
            self.start = Some(pos);
            self.grid.set_state(pos, CellState::Start);
            self.record(Action::SetStart { row, col });
        } else if self.end.is_none() && self.start != Some(pos) {
            self.end = Some(pos);
            self.grid.set_state(pos, CellState::End);
            self.record(Action::SetEnd { row, col });
        } else if self.start != Some(pos) && self.end != Some(pos) {
            if self.grid.is_barrier(pos) {
                return false;
            }
            self.grid.set_state(pos, CellState::Barrier);
            self.record(Action::SetBarrier { row, col });
        } else {
            return false;
        }
        true
    }

    /// Secondary button on `pos`: back to Unvisited
    pub fn secondary(&mut self, pos: Position) -> bool {
        if self.is_searching() || !self.grid.contains(pos) {
            return false;
        }

        if self.start == Some(pos) {
            self.start = None;
        } else if self.end == Some(pos) {
            self.end = None;
        } else if self.grid.state(pos) == CellState::Unvisited {
            return false;
        }

        self.grid.set_state(pos, CellState::Unvisited);
        self.record(Action::ClearCell { row: pos.row, col: pos.col });
        true
    }

    /// Start a search if both endpoints are set. Clears the marks of any
    /// previous run and refreshes neighbor lists first.
    pub fn begin_search(&mut self) -> bool {
        if !self.can_search() {
            return false;
        }
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return false;
        };

        self.grid.clear_search();
        self.grid.update_neighbors();
        self.last_outcome = None;
        self.last_stats = None;
        self.running = Some(Search::new(&self.grid, start, end));

        if let Some(log) = self.log.as_mut() {
            log.log_start(run_action(start, end));
        }
        tracing::info!(?start, ?end, "search triggered");
        true
    }

    /// Advance the running search by up to `steps` render steps (0 = until
    /// done). Returns the outcome once the search completes.
    pub fn advance(&mut self, steps: usize) -> Option<SearchOutcome> {
        let search = self.running.as_mut()?;

        let mut taken = 0;
        let outcome = loop {
            if steps != 0 && taken == steps {
                return None;
            }
            match search.step(&mut self.grid) {
                SearchStatus::Running => taken += 1,
                SearchStatus::Done(outcome) => break outcome,
            }
        };

        let stats = search.stats();
        let (start, end) = (search.start(), search.end());
        self.running = None;
        self.last_stats = Some(stats);

        if let Some(log) = self.log.as_mut() {
            log.log_finish(Action::SearchResult {
                found: outcome.is_found(),
                cost: stats.cost,
                expanded: stats.expanded,
            });
            log.log_finish(run_action(start, end));
        }
        self.last_outcome = Some(outcome.clone());
        Some(outcome)
    }

    /// Drop the running search, leaving its marks on the grid
    pub fn cancel_search(&mut self) -> bool {
        let Some(search) = self.running.take() else {
            return false;
        };
        self.last_stats = Some(search.stats());
        tracing::info!("search cancelled");
        self.record(Action::SearchCancelled);
        true
    }

    /// Discard the grid and all assignments
    pub fn reset(&mut self) {
        self.grid.reset();
        self.start = None;
        self.end = None;
        self.running = None;
        self.last_outcome = None;
        self.last_stats = None;
        self.record(Action::Reset);
    }
}

fn run_action(start: Position, end: Position) -> Action {
    Action::RunSearch {
        start: (start.row, start.col),
        end: (end.row, end.col),
    }
}
