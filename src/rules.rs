//! Gomoku rules: placing stones and detecting five in a row.
//!
//! Freestyle rules: any line of five or more stones of one color wins,
//! overlines included.

use crate::board::{Board, Color, Point};
use crate::constants::WIN_LENGTH;

/// The four line directions through a cell: vertical, horizontal, and the
/// two diagonals.
pub const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Count consecutive `color` stones starting next to `(x, y)` and walking
/// in direction `(dx, dy)`.
pub fn run_length(board: &Board, x: usize, y: usize, dx: isize, dy: isize, color: Color) -> usize {
    let mut count = 0;
    let (mut cx, mut cy) = (x as isize + dx, y as isize + dy);
    while cx >= 0 && cy >= 0 && board.get(cx as usize, cy as usize) == Some(color) {
        count += 1;
        cx += dx;
        cy += dy;
    }
    count
}

/// Check whether the stone at `(x, y)` is part of a line of at least five.
///
/// Only lines through `(x, y)` are examined, so this is meant to be called
/// right after a stone is placed there. An empty cell never wins.
pub fn is_five_in_line(board: &Board, x: usize, y: usize) -> bool {
    let Some(color) = board.get(x, y) else {
        return false;
    };
    DIRECTIONS.iter().any(|&(dx, dy)| {
        1 + run_length(board, x, y, dx, dy, color) + run_length(board, x, y, -dx, -dy, color)
            >= WIN_LENGTH
    })
}

/// Color owning a line of five anywhere on the board, scanning row-major.
pub fn has_five(board: &Board) -> Option<Color> {
    (0..board.rows())
        .flat_map(|x| (0..board.cols()).map(move |y| (x, y)))
        .find(|&(x, y)| is_five_in_line(board, x, y))
        .and_then(|(x, y)| board.get(x, y))
}

/// Winner of a game that is already over, given that `mover` played
/// `last_move` to reach `board`.
///
/// Without a last move (a position handed to the engine) the whole board is
/// scanned.
pub fn finished_winner(board: &Board, mover: Color, last_move: Option<Point>) -> Option<Color> {
    match last_move {
        Some((x, y)) => is_five_in_line(board, x, y).then_some(mover),
        None => has_five(board),
    }
}

/// Return a copy of `board` with a `color` stone placed at `(x, y)`.
///
/// # Panics
/// Panics if the cell is off the board or already occupied.
pub fn next_board(board: &Board, x: usize, y: usize, color: Color) -> Board {
    assert!(
        board.is_empty_at(x, y),
        "cannot place {color} at ({x}, {y}): cell is not empty"
    );
    let mut next = board.clone();
    next.set(x, y, color);
    next
}
