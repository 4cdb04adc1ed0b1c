//! Engine-versus-engine games.
//!
//! Two [`Player`]s alternate on one board, Black first, each running a fresh
//! search per move, until someone makes five or the board fills up.

use log::info;

use crate::board::{Board, Color, Point};
use crate::error::SearchError;
use crate::mcts::Mcts;
use crate::policy::SelectionPolicy;
use crate::rules::is_five_in_line;

/// One side of a self-play game.
pub struct Player {
    pub engine: Mcts,
    pub policy: SelectionPolicy,
}

impl Player {
    pub fn new(engine: Mcts, policy: SelectionPolicy) -> Self {
        Self { engine, policy }
    }
}

/// Moves and result of a finished game.
#[derive(Clone, Debug)]
pub struct GameRecord {
    pub moves: Vec<(Point, Color)>,
    /// `None` for a draw
    pub winner: Option<Color>,
    pub board: Board,
}

impl GameRecord {
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }
}

/// Play `black` against `white` starting from `board`.
///
/// The side to move is inferred from the stones already on `board`.
pub fn play_game(board: Board, black: &mut Player, white: &mut Player) -> Result<GameRecord, SearchError> {
    let mut board = board;
    let mut moves = Vec::new();

    while !board.is_full() {
        let color = board.side_to_move();
        let player = match color {
            Color::Black => &mut *black,
            Color::White => &mut *white,
        };

        let result = player.engine.search(&board, color, player.policy)?;
        let (x, y) = result.point;
        board.set(x, y, color);
        moves.push(((x, y), color));
        info!(
            "move {}: {color} ({}) plays ({x}, {y})",
            moves.len(),
            player.policy
        );

        if is_five_in_line(&board, x, y) {
            info!("{color} wins after {} moves", moves.len());
            return Ok(GameRecord {
                moves,
                winner: Some(color),
                board,
            });
        }
    }

    info!("draw after {} moves", moves.len());
    Ok(GameRecord {
        moves,
        winner: None,
        board,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;

    fn player(policy: SelectionPolicy, seed: u64) -> Player {
        let config = SearchConfig::default().with_iterations(60);
        Player::new(Mcts::with_seed(config, seed), policy)
    }

    #[test]
    fn test_game_on_small_board_finishes() {
        let mut black = player(SelectionPolicy::Standard, 1);
        let mut white = player(SelectionPolicy::FastWins, 2);
        let record = play_game(Board::new(6), &mut black, &mut white).expect("game should finish");

        assert!(record.move_count() <= 36);
        assert_eq!(record.board.count_empty(), 36 - record.move_count());
        for (i, &(_, color)) in record.moves.iter().enumerate() {
            let expected = if i % 2 == 0 { Color::Black } else { Color::White };
            assert_eq!(color, expected);
        }
        if let Some(winner) = record.winner {
            let &((x, y), last) = record.moves.last().expect("a winner implies a move");
            assert_eq!(last, winner);
            assert!(is_five_in_line(&record.board, x, y));
        } else {
            assert!(record.board.is_full());
        }
    }

    #[test]
    fn test_full_board_is_an_immediate_draw() {
        let board = Board::from_rows(&["XO", "OX"]);
        let mut black = player(SelectionPolicy::Standard, 1);
        let mut white = player(SelectionPolicy::Standard, 2);
        let record = play_game(board, &mut black, &mut white).expect("nothing to search");
        assert_eq!(record.winner, None);
        assert_eq!(record.move_count(), 0);
    }
}
