//! Gomocup (piskvork) text protocol.
//!
//! The protocol used by Gomoku tournament managers: one command per line
//! on stdin, one reply per line on stdout. Coordinates are written `x,y`
//! and map directly onto board cells `(x, y)`.
//!
//! ## Supported Commands
//!
//! - `START <size>` - Start a new game on a size x size board
//! - `RESTART` - Clear the board, keeping its size
//! - `BEGIN` - The engine opens the game
//! - `TURN <x>,<y>` - The opponent played at `x,y`; the engine replies
//! - `BOARD` - Followed by `x,y,field` lines and `DONE`; the engine moves
//!   (`field` 1 is the engine's stone, 2 the opponent's, 3 is treated as 1)
//! - `INFO <key> <value>` - Accepted and ignored
//! - `ABOUT` - Engine name and version
//! - `END` - Exit
//!
//! Failures are answered with an `ERROR <message>` line and never stop
//! the loop.
//!
//! ## Example
//!
//! ```ignore
//! use gomoku_mcts::protocol::ProtocolEngine;
//! let mut engine = ProtocolEngine::new();
//! engine.run()?;
//! ```

use std::io::{self, BufRead, Write};

use log::{debug, info};
use thiserror::Error;

use crate::board::{Board, Color, Point};
use crate::config::SearchConfig;
use crate::constants::{MAX_BOARD_SIZE, MIN_BOARD_SIZE, N};
use crate::error::SearchError;
use crate::mcts::Mcts;
use crate::policy::SelectionPolicy;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("missing argument")]
    MissingArgument,
    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(String),
    #[error("cell {0},{1} is occupied")]
    Occupied(usize, usize),
    #[error("unsupported board size: {0}")]
    UnsupportedSize(String),
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// What to send back for one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Line(String),
    Silent,
    Quit,
}

/// Protocol state.
pub struct ProtocolEngine {
    /// Current game
    board: Board,
    /// Position being received between `BOARD` and `DONE`:
    /// (engine's stones, opponent's stones)
    pending: Option<(Vec<Point>, Vec<Point>)>,
    engine: Mcts,
    policy: SelectionPolicy,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolEngine {
    /// Create an engine with default settings.
    pub fn new() -> Self {
        Self::with_engine(Mcts::new(SearchConfig::default()), SelectionPolicy::Standard)
    }

    pub fn with_engine(engine: Mcts, policy: SelectionPolicy) -> Self {
        Self {
            board: Board::new(N),
            pending: None,
            engine,
            policy,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Run the command loop on stdin and stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the command loop on arbitrary streams, until `END` or end of input.
    pub fn run_with<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match self.handle_line(line) {
                Reply::Line(reply) => {
                    writeln!(output, "{reply}")?;
                    output.flush()?;
                }
                Reply::Silent => {}
                Reply::Quit => break,
            }
        }
        Ok(())
    }

    /// Process one input line.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        debug!("protocol <- {line}");
        let result = if self.pending.is_some() {
            self.board_line(line)
        } else {
            let mut parts = line.split_whitespace();
            let command = parts.next().unwrap_or_default().to_ascii_uppercase();
            let args: Vec<&str> = parts.collect();
            self.execute(&command, &args)
        };

        match result {
            Ok(reply) => reply,
            Err(err) => Reply::Line(format!("ERROR {err}")),
        }
    }

    fn execute(&mut self, command: &str, args: &[&str]) -> Result<Reply, ProtocolError> {
        match command {
            "START" => {
                let arg = args.first().ok_or(ProtocolError::MissingArgument)?;
                let size = arg
                    .parse::<usize>()
                    .ok()
                    .filter(|s| (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(s))
                    .ok_or_else(|| ProtocolError::UnsupportedSize(arg.to_string()))?;
                self.board = Board::new(size);
                info!("protocol: new game on {size}x{size}");
                Ok(Reply::Line("OK".to_string()))
            }

            "RESTART" => {
                self.board = Board::new(self.board.rows());
                Ok(Reply::Line("OK".to_string()))
            }

            "BEGIN" => self.engine_move(),

            "TURN" => {
                let arg = args.first().ok_or(ProtocolError::MissingArgument)?;
                let (x, y) = arg
                    .split_once(',')
                    .ok_or_else(|| ProtocolError::InvalidCoordinates(arg.to_string()))?;
                let (x, y) = self.parse_point(x, y)?;
                if !self.board.is_empty_at(x, y) {
                    return Err(ProtocolError::Occupied(x, y));
                }
                let color = self.board.side_to_move();
                self.board.set(x, y, color);
                self.engine_move()
            }

            "BOARD" => {
                self.pending = Some((Vec::new(), Vec::new()));
                Ok(Reply::Silent)
            }

            "INFO" => Ok(Reply::Silent),

            "ABOUT" => Ok(Reply::Line(format!(
                "name=\"gomoku-mcts\", version=\"{}\"",
                env!("CARGO_PKG_VERSION")
            ))),

            "END" => Ok(Reply::Quit),

            _ => Err(ProtocolError::UnknownCommand(command.to_string())),
        }
    }

    /// Handle a line inside a `BOARD` block.
    fn board_line(&mut self, line: &str) -> Result<Reply, ProtocolError> {
        if line.eq_ignore_ascii_case("DONE") {
            let (own, opponent) = self.pending.take().unwrap_or_default();
            let own_color = if opponent.len() > own.len() {
                Color::White
            } else {
                Color::Black
            };
            let mut board = Board::new(self.board.rows());
            for (x, y) in own {
                board.set(x, y, own_color);
            }
            for (x, y) in opponent {
                board.set(x, y, own_color.opponent());
            }
            self.board = board;
            return self.engine_move();
        }

        let mut fields = line.split(',').map(str::trim);
        let (Some(x), Some(y), Some(field), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(ProtocolError::InvalidCoordinates(line.to_string()));
        };
        let point = self.parse_point(x, y)?;
        let pending = self.pending.get_or_insert_with(Default::default);
        if pending.0.contains(&point) || pending.1.contains(&point) {
            return Err(ProtocolError::Occupied(point.0, point.1));
        }
        match field {
            "1" | "3" => pending.0.push(point),
            "2" => pending.1.push(point),
            _ => return Err(ProtocolError::InvalidCoordinates(line.to_string())),
        }
        Ok(Reply::Silent)
    }

    /// Parse a coordinate pair and check that it is on the board.
    fn parse_point(&self, x: &str, y: &str) -> Result<Point, ProtocolError> {
        let invalid = || ProtocolError::InvalidCoordinates(format!("{x},{y}"));
        let x = x.trim().parse::<usize>().map_err(|_| invalid())?;
        let y = y.trim().parse::<usize>().map_err(|_| invalid())?;
        if !self.board.contains(x, y) {
            return Err(invalid());
        }
        Ok((x, y))
    }

    /// Search, play the engine's move and format it.
    fn engine_move(&mut self) -> Result<Reply, ProtocolError> {
        let color = self.board.side_to_move();
        let result = self.engine.search(&self.board, color, self.policy)?;
        let (x, y) = result.point;
        self.board.set(x, y, color);
        Ok(Reply::Line(format!("{x},{y}")))
    }
}
