//! Monte Carlo playouts (random game simulation).
//!
//! A playout places stones on uniformly random empty cells, alternating
//! colors, until one side makes five in a row or the board fills up.

use log::debug;

use crate::board::{Board, Color, Point};
use crate::rules::{finished_winner, is_five_in_line};

/// Result of one simulated game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    /// Winning color, or `None` for a draw (board filled without five)
    pub winner: Option<Color>,
    /// Stones placed during the playout
    pub plies: usize,
    /// Whether the game took at most half the board's cell count
    pub fast: bool,
}

impl Outcome {
    fn new(winner: Option<Color>, plies: usize, board: &Board) -> Self {
        Self {
            winner,
            plies,
            fast: plies <= board.cell_count() / 2,
        }
    }
}

/// Play a random game from `board`, where `mover` has just played
/// `last_move`.
///
/// The board is copied first; the caller's board is never modified. If the
/// game is already won (by `last_move`, or anywhere on a board without a
/// last move), the winner is returned without any stone being placed.
pub fn mcplayout(board: &Board, mover: Color, last_move: Option<Point>, rng: &mut fastrand::Rng) -> Outcome {
    if let Some(winner) = finished_winner(board, mover, last_move) {
        return Outcome::new(Some(winner), 0, board);
    }

    let mut board = board.clone();
    let mut empty = board.empty_cells();
    let mut player = mover;
    let mut plies = 0;

    loop {
        player = player.opponent();
        if empty.is_empty() {
            debug!("playout: board full after {plies} plies, scoring as a draw");
            return Outcome::new(None, plies, &board);
        }

        let (x, y) = empty.swap_remove(rng.usize(..empty.len()));
        board.set(x, y, player);
        plies += 1;

        if is_five_in_line(&board, x, y) {
            return Outcome::new(Some(player), plies, &board);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playout_terminates_within_empty_cells() {
        let mut rng = fastrand::Rng::with_seed(7);
        let mut board = Board::new(9);
        board.set(4, 4, Color::Black);
        board.set(4, 5, Color::White);
        let empty = board.count_empty();
        for _ in 0..50 {
            let outcome = mcplayout(&board, Color::White, Some((4, 5)), &mut rng);
            assert!(outcome.plies <= empty);
            assert!(outcome.plies >= 1);
        }
    }

    #[test]
    fn test_playout_does_not_touch_board() {
        let mut rng = fastrand::Rng::with_seed(1);
        let board = Board::new(7);
        let _ = mcplayout(&board, Color::White, None, &mut rng);
        assert_eq!(board.count_empty(), 49);
    }

    #[test]
    fn test_full_board_is_a_draw() {
        let mut rng = fastrand::Rng::with_seed(3);
        let board = Board::from_rows(&["XO", "OX"]);
        let outcome = mcplayout(&board, Color::Black, None, &mut rng);
        assert_eq!(outcome.winner, None);
        assert_eq!(outcome.plies, 0);
    }

    #[test]
    fn test_already_won_position() {
        let mut rng = fastrand::Rng::with_seed(3);
        let board = Board::from_rows(&["OOOOO", "XXXX.", "....."]);
        let outcome = mcplayout(&board, Color::White, Some((0, 4)), &mut rng);
        assert_eq!(outcome.winner, Some(Color::White));
        assert_eq!(outcome.plies, 0);
        assert!(outcome.fast);
    }

    #[test]
    fn test_won_position_without_last_move() {
        let mut rng = fastrand::Rng::with_seed(3);
        let board = Board::from_rows(&["XXXXX....", "OOOO.....", "........."]);
        let outcome = mcplayout(&board, Color::Black, None, &mut rng);
        assert_eq!(outcome.winner, Some(Color::Black));
        assert_eq!(outcome.plies, 0);
    }

    #[test]
    fn test_single_empty_cell_finishes_game() {
        // Black to play the last cell and complete the row.
        let mut rng = fastrand::Rng::with_seed(11);
        let board = Board::from_rows(&["XXXX.", "OOXOO", "XOOXO", "OXOXO", "OXXOX"]);
        let outcome = mcplayout(&board, Color::White, Some((4, 3)), &mut rng);
        assert_eq!(outcome.winner, Some(Color::Black));
        assert_eq!(outcome.plies, 1);
        assert!(outcome.fast);
    }

    #[test]
    fn test_seeded_playouts_are_reproducible() {
        let board = Board::new(9);
        let a = mcplayout(&board, Color::White, None, &mut fastrand::Rng::with_seed(42));
        let b = mcplayout(&board, Color::White, None, &mut fastrand::Rng::with_seed(42));
        assert_eq!(a, b);
    }
}
