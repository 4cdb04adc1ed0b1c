//! Constants for board dimensions and MCTS parameters.
//!
//! These are the compile-time defaults. Anything tunable at run time is
//! carried by [`crate::config::SearchConfig`], which starts from these values.
//!
//! # Board Size Configuration
//!
//! The default board size is controlled by Cargo features:
//! - `board15x15` (default): 15x15 board
//! - `board19x19`: 19x19 board
//!
//! ```sh
//! cargo build                                               # 15x15 (default)
//! cargo build --no-default-features --features board19x19   # 19x19
//! ```
//!
//! The engine itself works on any board it is handed; the feature only picks
//! the size used by the CLI and the protocol before `START` says otherwise.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN). Gomoku is usually played on 15x15 or 19x19.
#[cfg(feature = "board15x15")]
pub const N: usize = 15;

#[cfg(feature = "board19x19")]
pub const N: usize = 19;

// Compile-time check: exactly one board size feature must be enabled
#[cfg(all(feature = "board15x15", feature = "board19x19"))]
compile_error!("Cannot enable both 'board15x15' and 'board19x19' features at the same time");

#[cfg(not(any(feature = "board15x15", feature = "board19x19")))]
compile_error!("Must enable exactly one board size feature: 'board15x15' or 'board19x19'");

/// Number of stones in a row needed to win.
pub const WIN_LENGTH: usize = 5;

/// Smallest board accepted by the protocol.
pub const MIN_BOARD_SIZE: usize = WIN_LENGTH;

/// Largest board accepted by the protocol.
pub const MAX_BOARD_SIZE: usize = 32;

// =============================================================================
// MCTS Parameters
// =============================================================================

/// Default number of top-level iterations per move.
pub const N_ITERATIONS: usize = 10_000;

/// Maximum number of children materialized per expansion.
pub const BRANCHING_CAP: usize = 10;

/// Default UCB1 exploration constant.
pub const EXPLORATION: f64 = 1.1;

/// Default weight of fast wins in the fast-wins policy, in [0, 1].
pub const FAST_WIN_WEIGHT: f64 = 0.6;

/// Reward credited to the winning side of a simulated game.
pub const WIN_REWARD: u32 = 1;

/// Progress report period (number of iterations between reports).
pub const REPORT_PERIOD: usize = 1000;

// =============================================================================
// Move Generation
// =============================================================================

/// Empty cells farther than this (Chebyshev distance) from every stone are
/// not considered by the move generator.
pub const NEIGHBOR_RADIUS: usize = 2;
