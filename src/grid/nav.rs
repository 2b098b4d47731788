//! Keyboard traversal over the agent × metric grid.
//!
//! Pure position math; the page commits the focused cell's input before
//! asking where to move, so navigating away always finalizes a value
//! first.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub fn new(row: usize, col: usize) -> Self {
        GridPos { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Left,
    Right,
    /// Enter / Tab: next cell, wrapping to the next row's first column.
    Advance,
    /// Shift variant: previous cell, wrapping to the prior row's last column.
    Retreat,
}

/// Next in-bounds position for a key press. Up/Down/Left/Right clamp at
/// the grid edges with no wraparound; Advance and Retreat wrap across
/// rows but clamp at the first and last cell of the entire grid.
pub fn step(pos: GridPos, key: NavKey, rows: usize, cols: usize) -> GridPos {
    if rows == 0 || cols == 0 {
        return pos;
    }
    let row = pos.row.min(rows - 1);
    let col = pos.col.min(cols - 1);
    match key {
        NavKey::Up => GridPos::new(row.saturating_sub(1), col),
        NavKey::Down => GridPos::new((row + 1).min(rows - 1), col),
        NavKey::Left => GridPos::new(row, col.saturating_sub(1)),
        NavKey::Right => GridPos::new(row, (col + 1).min(cols - 1)),
        NavKey::Advance => {
            if col + 1 < cols {
                GridPos::new(row, col + 1)
            } else if row + 1 < rows {
                GridPos::new(row + 1, 0)
            } else {
                GridPos::new(row, col)
            }
        }
        NavKey::Retreat => {
            if col > 0 {
                GridPos::new(row, col - 1)
            } else if row > 0 {
                GridPos::new(row - 1, cols - 1)
            } else {
                GridPos::new(row, col)
            }
        }
    }
}
