use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

/// Action phase - whether the action is starting or finishing
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionPhase {
    Start,
    Finish,
}

/// User actions that edit the grid or drive the search
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    SetStart { row: usize, col: usize },
    SetEnd { row: usize, col: usize },
    SetBarrier { row: usize, col: usize },
    /// Secondary click; clears whatever the cell held
    ClearCell { row: usize, col: usize },
    RunSearch { start: (usize, usize), end: (usize, usize) },
    /// Outcome of the preceding RunSearch
    SearchResult { found: bool, cost: Option<usize>, expanded: usize },
    /// Search dropped before it finished
    SearchCancelled,
    Reset,
}

/// Logged action with timestamp and phase
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedAction {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    pub action: Action,
    pub phase: ActionPhase,
}

/// Action logger
pub struct ActionLog {
    start_time: Instant,
    actions: Vec<LoggedAction>,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionLog {
    pub fn new() -> Self {
        ActionLog {
            start_time: Instant::now(),
            actions: Vec::new(),
        }
    }

    /// Log an action with current timestamp and phase
    pub fn log(&mut self, action: Action, phase: ActionPhase) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        tracing::debug!(timestamp_ms, ?action, ?phase, "action");

        self.actions.push(LoggedAction {
            timestamp_ms,
            action,
            phase,
        });
    }

    pub fn log_start(&mut self, action: Action) {
        self.log(action, ActionPhase::Start);
    }

    /// Log the finish of an action (instantaneous edits only log this phase)
    pub fn log_finish(&mut self, action: Action) {
        self.log(action, ActionPhase::Finish);
    }

    pub fn actions(&self) -> &[LoggedAction] {
        &self.actions
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.actions)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Durations of each RunSearch, paired start to finish
    pub fn search_durations(&self) -> Vec<u64> {
        let mut started: HashMap<String, u64> = HashMap::new();
        let mut durations = Vec::new();

        for logged in &self.actions {
            if !matches!(logged.action, Action::RunSearch { .. }) {
                continue;
            }
            let key = format!("{:?}", logged.action);
            match logged.phase {
                ActionPhase::Start => {
                    started.insert(key, logged.timestamp_ms);
                }
                ActionPhase::Finish => {
                    if let Some(start_ms) = started.remove(&key) {
                        durations.push(logged.timestamp_ms - start_ms);
                    }
                }
            }
        }
        durations
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut barriers = 0;
        let mut cleared = 0;
        let mut searches = 0;
        let mut paths_found = 0;
        let mut cancelled = 0;
        let mut resets = 0;

        // Only count finish events to get completed action counts
        for logged in self.actions.iter().filter(|a| a.phase == ActionPhase::Finish) {
            match &logged.action {
                Action::SetBarrier { .. } => barriers += 1,
                Action::ClearCell { .. } => cleared += 1,
                Action::RunSearch { .. } => searches += 1,
                Action::SearchResult { found: true, .. } => paths_found += 1,
                Action::SearchCancelled => cancelled += 1,
                Action::Reset => resets += 1,
                _ => {}
            }
        }

        let duration = self.actions.last().map(|a| a.timestamp_ms).unwrap_or(0);

        format!(
            "Session Duration: {}ms\n\
             Total Events: {}\n\
             Grid Edits: {} barriers placed, {} cells cleared, {} resets\n\
             Searches: {} completed ({} found a path), {} cancelled",
            duration,
            self.actions.len(),
            barriers,
            cleared,
            resets,
            searches,
            paths_found,
            cancelled
        )
    }
}
