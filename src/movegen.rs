//! Heuristically ranked move generation.
//!
//! Candidate moves are the empty cells near existing stones. Each candidate
//! is scored by the lines it would make for either color if a stone were
//! placed there (attack and defense count the same), and the list is
//! truncated to the requested branching cap.

use std::cmp::Reverse;

use crate::board::{Board, Color, Point};
use crate::constants::{NEIGHBOR_RADIUS, WIN_LENGTH};
use crate::rules::{DIRECTIONS, run_length};

/// Score of a line of `len` stones with `open` empty ends (0, 1 or 2).
fn line_value(len: usize, open: usize) -> u64 {
    if len >= WIN_LENGTH {
        return 1_000_000;
    }
    match (len, open) {
        (_, 0) => 0,
        (4, 2) => 50_000,
        (4, _) => 5_000,
        (3, 2) => 5_000,
        (3, _) => 500,
        (2, 2) => 200,
        (2, _) => 20,
        (_, open) => open as u64,
    }
}

/// Whether the cell `steps` away from `(x, y)` in direction `(dx, dy)` is
/// on the board and empty.
fn is_open(board: &Board, x: usize, y: usize, dx: isize, dy: isize, steps: usize) -> bool {
    let cx = x as isize + dx * steps as isize;
    let cy = y as isize + dy * steps as isize;
    cx >= 0 && cy >= 0 && board.is_empty_at(cx as usize, cy as usize)
}

/// Heuristic value of playing `color` at the empty cell `(x, y)`.
fn placement_value(board: &Board, x: usize, y: usize, color: Color) -> u64 {
    DIRECTIONS
        .iter()
        .map(|&(dx, dy)| {
            let forward = run_length(board, x, y, dx, dy, color);
            let backward = run_length(board, x, y, -dx, -dy, color);
            let open = usize::from(is_open(board, x, y, dx, dy, forward + 1))
                + usize::from(is_open(board, x, y, -dx, -dy, backward + 1));
            line_value(1 + forward + backward, open)
        })
        .sum()
}

/// Score a candidate for both colors.
pub fn score_move(board: &Board, x: usize, y: usize) -> u64 {
    placement_value(board, x, y, Color::Black) + placement_value(board, x, y, Color::White)
}

/// Check for any stone within `radius` (Chebyshev distance) of `(x, y)`.
fn has_neighbor(board: &Board, x: usize, y: usize, radius: usize) -> bool {
    let mut x_range = x.saturating_sub(radius)..=(x + radius).min(board.rows() - 1);
    x_range.any(|nx| {
        let mut y_range = y.saturating_sub(radius)..=(y + radius).min(board.cols() - 1);
        y_range.any(|ny| board.get(nx, ny).is_some())
    })
}

/// Chebyshev distance to the board center, doubled so it stays integral.
fn center_distance(board: &Board, x: usize, y: usize) -> usize {
    let dx = (2 * x).abs_diff(board.rows() - 1);
    let dy = (2 * y).abs_diff(board.cols() - 1);
    dx.max(dy)
}

/// Generate up to `cap` legal moves, best first.
///
/// On a board without stones every empty cell is a candidate and the ranking
/// falls back to closeness to the center. Ties are broken by closeness to the
/// center, then by row-major order. A full board yields no moves.
pub fn generate_ranked_moves(board: &Board, cap: usize) -> Vec<Point> {
    let empty = board.empty_cells();
    let has_stones = empty.len() < board.cell_count();

    let mut scored: Vec<(u64, usize, Point)> = empty
        .into_iter()
        .filter(|&(x, y)| !has_stones || has_neighbor(board, x, y, NEIGHBOR_RADIUS))
        .map(|(x, y)| (score_move(board, x, y), center_distance(board, x, y), (x, y)))
        .collect();

    scored.sort_by_key(|&(score, dist, _)| (Reverse(score), dist));
    scored.truncate(cap);
    scored.into_iter().map(|(_, _, pt)| pt).collect()
}
