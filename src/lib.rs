//! Gomoku-MCTS: a Monte Carlo Tree Search engine for Gomoku.
//!
//! The engine grows a fresh search tree for every move, scores children with
//! UCB1 (or one of its variants), plays random games from the frontier and
//! recommends the most visited move.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and engine parameters
//! - [`config`] - Run-time search configuration
//! - [`board`] - Board representation
//! - [`rules`] - Stone placement and five-in-a-row detection
//! - [`movegen`] - Heuristically ranked move generation
//! - [`numeric`] - Division and clamping helpers used by scoring
//! - [`node`] - Search tree storage
//! - [`policy`] - Selection policies (UCB1 and variants)
//! - [`playout`] - Random game simulation
//! - [`mcts`] - Selection, expansion, backpropagation and the search driver
//! - [`selfplay`] - Engine-versus-engine games
//! - [`protocol`] - Gomocup text protocol
//!
//! ## Example
//!
//! ```
//! use gomoku_mcts::board::Board;
//! use gomoku_mcts::config::SearchConfig;
//! use gomoku_mcts::mcts::Mcts;
//! use gomoku_mcts::policy::SelectionPolicy;
//!
//! let board = Board::new(15);
//! let mut mcts = Mcts::new(SearchConfig::default().with_iterations(100));
//! let result = mcts.search_move(&board, SelectionPolicy::Standard).unwrap();
//! println!("{} plays {:?}", result.stone, result.point);
//! ```

pub mod board;
pub mod config;
pub mod constants;
pub mod error;
pub mod mcts;
pub mod movegen;
pub mod node;
pub mod numeric;
pub mod playout;
pub mod policy;
pub mod protocol;
pub mod rules;
pub mod selfplay;
