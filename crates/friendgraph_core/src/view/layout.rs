//! Grid layout for fetched nodes.
//!
//! Node `i` goes to column `i % GRID_COLUMNS`, row `i / GRID_COLUMNS`, with the
//! first node at the origin. Runs once per successful fetch, before the
//! snapshot reaches the store.

use crate::model::user::{Position, UserNode};

/// Nodes per grid row.
pub const GRID_COLUMNS: usize = 5;
/// Horizontal distance between neighbouring columns.
pub const CELL_WIDTH: f64 = 250.0;
/// Vertical distance between neighbouring rows.
pub const CELL_HEIGHT: f64 = 150.0;

/// Returns the grid slot for the node at `index` in response order.
pub fn grid_position(index: usize) -> Position {
    let column = index % GRID_COLUMNS;
    let row = index / GRID_COLUMNS;
    Position::new(CELL_WIDTH * column as f64, CELL_HEIGHT * row as f64)
}

/// Places every node on the grid according to its sequence index.
///
/// Any previous position is overwritten, so reapplying to the same order
/// yields the same positions.
pub fn assign_grid_positions(users: Vec<UserNode>) -> Vec<UserNode> {
    users
        .into_iter()
        .enumerate()
        .map(|(index, user)| user.with_position(grid_position(index)))
        .collect()
}
