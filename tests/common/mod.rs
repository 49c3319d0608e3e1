#![allow(dead_code)]

use astar_viz::layout::{parse_layout, ParsedLayout};
use astar_viz::{CellState, Grid, Path, Position};
use std::collections::{HashSet, VecDeque};

/// Parse a layout and refresh its neighbor lists so it is ready to search
pub fn ready_layout(text: &str) -> ParsedLayout {
    let mut parsed = parse_layout(text).expect("test layout should parse");
    parsed.grid.update_neighbors();
    parsed
}

pub fn endpoints(parsed: &ParsedLayout) -> (Position, Position) {
    (
        parsed.start.expect("layout has no S"),
        parsed.end.expect("layout has no E"),
    )
}

/// Grid with the given barrier cells, neighbors refreshed
pub fn grid_with_barriers(dimension: usize, barriers: &[(usize, usize)]) -> Grid {
    let mut grid = Grid::new(dimension);
    for &(row, col) in barriers {
        grid.set_state(Position::new(row, col), CellState::Barrier);
    }
    grid.update_neighbors();
    grid
}

/// Shortest distance by plain breadth-first search, ignoring cached neighbors
pub fn bfs_distance(grid: &Grid, start: Position, end: Position) -> Option<usize> {
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([(start, 0)]);
    while let Some((pos, dist)) = queue.pop_front() {
        if pos == end {
            return Some(dist);
        }
        for next in grid.compute_neighbors(pos) {
            if seen.insert(next) {
                queue.push_back((next, dist + 1));
            }
        }
    }
    None
}

/// Path connects start to end through adjacent, open, distinct cells
pub fn assert_valid_path(grid: &Grid, path: &Path, start: Position, end: Position) {
    assert_eq!(path.start(), start, "path does not begin at start");
    assert_eq!(path.end(), end, "path does not finish at end");
    assert_eq!(path.cells.len(), path.cost + 1, "cost does not match move count");

    let mut seen = HashSet::new();
    for pair in path.cells.windows(2) {
        assert!(pair[0].is_adjacent(&pair[1]), "{:?} -> {:?} is not a single move", pair[0], pair[1]);
    }
    for cell in &path.cells {
        assert!(!grid.is_barrier(*cell), "path crosses barrier at {:?}", cell);
        assert!(seen.insert(*cell), "path repeats {:?}", cell);
    }
}
