use crate::cell::{CellState, Position};
use crate::error::{Error, Result};
use crate::Grid;

/// A grid read back from text, with the start/end cells it marks
#[derive(Debug, Clone)]
pub struct ParsedLayout {
    pub grid: Grid,
    pub start: Option<Position>,
    pub end: Option<Position>,
}

/// Render the grid as text, one row per line.
///
/// `S` start, `E` end, `#` barrier, `.` unvisited, `+` frontier,
/// `x` visited, `*` path.
pub fn render_layout(grid: &Grid) -> String {
    let mut result = String::with_capacity(grid.dimension * (grid.dimension + 1));
    for row in 0..grid.dimension {
        for col in 0..grid.dimension {
            result.push(grid.state(Position::new(row, col)).symbol());
        }
        result.push('\n');
    }
    result
}

/// Parse a square text layout. Blank lines are skipped and surrounding
/// whitespace on each line is ignored.
pub fn parse_layout(text: &str) -> Result<ParsedLayout> {
    let rows: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect();

    let Some(&(_, first)) = rows.first() else {
        return Err(Error::Layout {
            line: 1,
            reason: "layout is empty".to_string(),
        });
    };

    let dimension = first.chars().count();
    if rows.len() != dimension {
        return Err(Error::Layout {
            line: rows[rows.len() - 1].0,
            reason: format!("expected {} rows for a square grid, found {}", dimension, rows.len()),
        });
    }

    let mut grid = Grid::new(dimension);
    let mut start = None;
    let mut end = None;

    for (row, &(line_no, line)) in rows.iter().enumerate() {
        let width = line.chars().count();
        if width != dimension {
            return Err(Error::Layout {
                line: line_no,
                reason: format!("expected {} columns, found {}", dimension, width),
            });
        }

        for (col, ch) in line.chars().enumerate() {
            let state = CellState::from_symbol(ch).ok_or_else(|| Error::Layout {
                line: line_no,
                reason: format!("unknown cell symbol '{}'", ch),
            })?;
            let pos = Position::new(row, col);

            let slot = match state {
                CellState::Start => Some(&mut start),
                CellState::End => Some(&mut end),
                _ => None,
            };
            if let Some(slot) = slot {
                if slot.replace(pos).is_some() {
                    return Err(Error::Layout {
                        line: line_no,
                        reason: format!("more than one '{}' cell", ch),
                    });
                }
            }

            grid.set_state(pos, state);
        }
    }

    Ok(ParsedLayout { grid, start, end })
}
