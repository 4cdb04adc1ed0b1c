//! Gomoku-MCTS: a Monte Carlo Tree Search Gomoku engine.
//!
//! ## Usage
//!
//! - `gomoku-mcts` - Show a demo
//! - `gomoku-mcts demo` - Run one search on an empty board
//! - `gomoku-mcts selfplay --black standard --white fast-wins` - Engine vs engine
//! - `gomoku-mcts protocol` - Speak the Gomocup protocol on stdin/stdout
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `info`).

use anyhow::{Context, Result, ensure};
use clap::{Args, Parser, Subcommand};

use gomoku_mcts::board::Board;
use gomoku_mcts::config::SearchConfig;
use gomoku_mcts::constants::{EXPLORATION, FAST_WIN_WEIGHT, MAX_BOARD_SIZE, MIN_BOARD_SIZE, N, N_ITERATIONS};
use gomoku_mcts::mcts::Mcts;
use gomoku_mcts::policy::SelectionPolicy;
use gomoku_mcts::protocol::ProtocolEngine;
use gomoku_mcts::selfplay::{Player, play_game};

/// Gomoku-MCTS: a Monte Carlo Tree Search Gomoku engine
#[derive(Parser)]
#[command(name = "gomoku-mcts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    search: SearchArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct SearchArgs {
    /// Iterations per move
    #[arg(long, global = true, default_value_t = N_ITERATIONS)]
    iterations: usize,

    /// UCB1 exploration constant
    #[arg(long, global = true, default_value_t = EXPLORATION)]
    exploration: f64,

    /// Weight of fast wins for the fast-wins policy (clamped to [0, 1])
    #[arg(long, global = true, default_value_t = FAST_WIN_WEIGHT)]
    fast_win_weight: f64,

    /// Seed for the playout random number generator
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Board size (5 to 32)
    #[arg(long, global = true, default_value_t = N)]
    size: usize,
}

impl SearchArgs {
    fn config(&self) -> SearchConfig {
        SearchConfig::default()
            .with_iterations(self.iterations)
            .with_exploration(self.exploration)
            .with_fast_win_weight(self.fast_win_weight)
    }

    /// Empty board of the requested size.
    fn board(&self) -> Result<Board> {
        ensure!(
            (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.size),
            "board size must be between {MIN_BOARD_SIZE} and {MAX_BOARD_SIZE}, got {}",
            self.size
        );
        Ok(Board::new(self.size))
    }

    /// Build an engine; `offset` keeps two seeded engines apart.
    fn engine(&self, offset: u64) -> Mcts {
        match self.seed {
            Some(seed) => Mcts::with_seed(self.config(), seed.wrapping_add(offset)),
            None => Mcts::new(self.config()),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run one search on an empty board and print the result
    Demo {
        /// Selection policy: standard, waning, fast-wins or heuristics
        #[arg(long, default_value = "standard")]
        policy: SelectionPolicy,
    },
    /// Play one engine-versus-engine game
    Selfplay {
        /// Policy used by Black
        #[arg(long, default_value = "standard")]
        black: SelectionPolicy,
        /// Policy used by White
        #[arg(long, default_value = "standard")]
        white: SelectionPolicy,
    },
    /// Speak the Gomocup protocol on stdin/stdout
    Protocol {
        #[arg(long, default_value = "standard")]
        policy: SelectionPolicy,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let args = &cli.search;

    match cli.command {
        Some(Commands::Protocol { policy }) => {
            let mut engine = ProtocolEngine::with_engine(args.engine(0), policy);
            engine.run().context("protocol I/O failed")?;
        }
        Some(Commands::Selfplay { black, white }) => {
            run_selfplay(args, black, white)?;
        }
        Some(Commands::Demo { policy }) => {
            run_demo(args, policy)?;
        }
        None => {
            run_demo(args, SelectionPolicy::Standard)?;
        }
    }

    Ok(())
}

fn run_demo(args: &SearchArgs, policy: SelectionPolicy) -> Result<()> {
    println!("Gomoku-MCTS: Monte Carlo Tree Search Gomoku Engine\n");

    let mut board = args.board()?;
    let mut mcts = args.engine(0);

    println!("Running {} iterations ({policy} policy)...", args.iterations);
    let result = mcts
        .search_move(&board, policy)
        .context("search found no move")?;
    let (x, y) = result.point;
    board.set(x, y, result.stone);

    println!("{board}");
    println!("{} plays ({x}, {y})", result.stone);
    println!(
        "Visits: {} of {}, winrate {:.1}%",
        result.visits,
        result.root_visits,
        result.winrate * 100.0
    );
    Ok(())
}

fn run_selfplay(args: &SearchArgs, black: SelectionPolicy, white: SelectionPolicy) -> Result<()> {
    println!("Self-play: black={black} white={white}, {} iterations per move\n", args.iterations);

    let mut black_player = Player::new(args.engine(0), black);
    let mut white_player = Player::new(args.engine(1), white);
    let record = play_game(args.board()?, &mut black_player, &mut white_player)
        .context("self-play game aborted")?;

    println!("{}", record.board);
    match record.winner {
        Some(color) => println!("{color} wins after {} moves", record.move_count()),
        None => println!("Draw after {} moves", record.move_count()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_is_validated() {
        for size in ["0", "3", "33"] {
            let cli = Cli::try_parse_from(["gomoku-mcts", "--size", size, "demo"]).expect("parses");
            assert!(cli.search.board().is_err(), "size {size} should be rejected");
        }
        let cli = Cli::try_parse_from(["gomoku-mcts", "demo", "--size", "9"]).expect("parses");
        assert_eq!(cli.search.board().expect("valid size").rows(), 9);
    }
}
