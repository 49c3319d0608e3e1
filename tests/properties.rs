mod common;

use astar_viz::{search, CellState, Grid, Position, Search, SearchStatus};
use common::{assert_valid_path, bfs_distance};
use proptest::prelude::*;

/// Random square grid with two distinct open cells for start and end
fn grid_and_endpoints() -> impl Strategy<Value = (Grid, Position, Position)> {
    (2usize..9).prop_flat_map(|dim| {
        let cells = dim * dim;
        (
            proptest::collection::vec(proptest::bool::weighted(0.3), cells),
            0..cells,
            0..cells,
        )
            .prop_filter("start and end differ", |(_, s, e)| s != e)
            .prop_map(move |(barriers, s, e)| {
                let mut grid = Grid::new(dim);
                let start = Position::new(s / dim, s % dim);
                let end = Position::new(e / dim, e % dim);
                for (i, blocked) in barriers.into_iter().enumerate() {
                    let pos = Position::new(i / dim, i % dim);
                    if blocked && pos != start && pos != end {
                        grid.set_state(pos, CellState::Barrier);
                    }
                }
                grid.set_state(start, CellState::Start);
                grid.set_state(end, CellState::End);
                grid.update_neighbors();
                (grid, start, end)
            })
    })
}

proptest! {
    #[test]
    fn open_grid_cost_is_manhattan(dim in 2usize..12, row in 0usize..12, col in 0usize..12) {
        let end = Position::new(row % dim, col % dim);
        prop_assume!(end != Position::new(0, 0));

        let mut grid = Grid::new(dim);
        grid.update_neighbors();
        let outcome = search(&mut grid, Position::new(0, 0), end, |_| {});

        let path = outcome.path().expect("open grid always has a path");
        prop_assert_eq!(path.cost, end.row + end.col);
    }

    #[test]
    fn result_matches_breadth_first_search((grid, start, end) in grid_and_endpoints()) {
        let expected = bfs_distance(&grid, start, end);

        let mut searched = grid.clone();
        let mut engine = Search::new(&searched, start, end);
        let outcome = loop {
            if let SearchStatus::Done(outcome) = engine.step(&mut searched) {
                break outcome;
            }
        };

        match outcome.path() {
            Some(path) => {
                assert_valid_path(&grid, path, start, end);
                prop_assert_eq!(Some(path.cost), expected);
                prop_assert_eq!(engine.best_cost(end), Some(path.cost));
            }
            None => {
                prop_assert_eq!(expected, None);
            }
        }
    }

    #[test]
    fn barrier_tags_survive_search((grid, start, end) in grid_and_endpoints()) {
        let mut searched = grid.clone();
        search(&mut searched, start, end, |_| {});

        for cell in grid.cells() {
            let after = searched.state(cell.position);
            match cell.state {
                CellState::Barrier | CellState::Start | CellState::End => {
                    prop_assert_eq!(after, cell.state);
                }
                _ => {
                    prop_assert!(!matches!(after, CellState::Start | CellState::End | CellState::Barrier));
                }
            }
        }
    }

    #[test]
    fn repeated_runs_expand_identically((grid, start, end) in grid_and_endpoints()) {
        let run = |mut g: Grid| {
            let mut engine = Search::new(&g, start, end);
            let outcome = loop {
                if let SearchStatus::Done(outcome) = engine.step(&mut g) {
                    break outcome;
                }
            };
            (outcome, engine.expansion_order().to_vec())
        };
        prop_assert_eq!(run(grid.clone()), run(grid));
    }

    #[test]
    fn neighbor_lists_are_stable((grid, _start, _end) in grid_and_endpoints()) {
        let mut again = grid.clone();
        again.update_neighbors();
        for (a, b) in grid.cells().zip(again.cells()) {
            prop_assert_eq!(&a.neighbors, &b.neighbors);
            prop_assert_eq!(&a.neighbors, &grid.compute_neighbors(a.position));
        }
    }
}
