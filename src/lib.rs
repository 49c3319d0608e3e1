pub mod action_log;
pub mod cell;
pub mod config;
pub mod editor;
pub mod error;
pub mod grid;
pub mod layout;
pub mod pathfinding;

pub use cell::{Cell, CellState, Position};
pub use editor::Editor;
pub use error::{Error, Result};
pub use grid::Grid;
pub use pathfinding::{search, Path, Search, SearchOutcome, SearchStats, SearchStatus};
