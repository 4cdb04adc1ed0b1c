//! Monte Carlo Tree Search (MCTS).
//!
//! This module implements the search proper:
//! - Selection: descend from the root with a [`SelectionPolicy`]
//! - Expansion: materialize up to `branching_cap` ranked children of a leaf
//! - Simulation: random playout from a node (see [`crate::playout`])
//! - Backpropagation: update statistics from a node up to the root
//!
//! The tree is built from scratch for every move and thrown away afterwards.
//! The recommended move is the root child with the most visits, not the one
//! with the best winrate.

use log::{debug, info, trace, warn};

use crate::board::{Board, Color, Point};
use crate::config::SearchConfig;
use crate::constants::{REPORT_PERIOD, WIN_REWARD};
use crate::error::SearchError;
use crate::movegen::generate_ranked_moves;
use crate::node::{NodeId, Tree};
use crate::playout::{Outcome, mcplayout};
use crate::policy::{SelectionPolicy, select_child};
use crate::rules::{finished_winner, is_five_in_line, next_board};

/// Counters for one run of [`tree_search`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Top-level traversals performed
    pub iterations: usize,
    /// Traversals abandoned because no child could be selected
    pub degenerate: usize,
}

/// Recommended move and the statistics behind it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchResult {
    /// Cell to play
    pub point: Point,
    /// Stone to place there
    pub stone: Color,
    /// Visits of the chosen child
    pub visits: u32,
    /// Reward of the chosen child
    pub reward: u32,
    /// Winrate of the chosen child, as reported by [`Node::winrate`]
    ///
    /// [`Node::winrate`]: crate::node::Node::winrate
    pub winrate: f64,
    pub root_visits: u32,
    pub root_reward: u32,
    pub stats: SearchStats,
}

/// Update statistics from `from` up to the root.
///
/// Every node on the path gets one visit. Nodes whose mover is `winner` also
/// get `reward`, plus a fast win when `fast` is set. A draw (`winner` is
/// `None`) credits nobody.
pub fn backpropagate(tree: &mut Tree, from: NodeId, reward: u32, winner: Option<Color>, fast: bool) {
    let mut current = Some(from);
    while let Some(id) = current {
        let node = &mut tree[id];
        node.increase_visit_count();
        if Some(node.mover()) == winner {
            node.increase_reward(reward);
            if fast {
                node.increase_fast_win_count();
            }
        }
        current = node.parent();
    }
}

/// Run one playout from `id` and backpropagate its result.
pub fn simulate(tree: &mut Tree, id: NodeId, rng: &mut fastrand::Rng) -> Outcome {
    let node = &tree[id];
    let outcome = mcplayout(node.board(), node.mover(), node.last_move(), rng);
    trace!(
        "playout from depth {}: winner {:?} after {} plies",
        node.depth(),
        outcome.winner,
        outcome.plies
    );
    backpropagate(tree, id, WIN_REWARD, outcome.winner, outcome.fast);
    outcome
}

/// Expand a leaf by adding its ranked children.
///
/// A child whose move wins on the spot is credited right away: the win is
/// backpropagated from `id` itself, as a fast win when `id` is no deeper
/// than half the board's cell count. A node whose game is already won gets
/// no children. A node left without children stays a leaf and is marked
/// final.
pub fn expand(tree: &mut Tree, id: NodeId, config: &SearchConfig) {
    let node = &tree[id];
    let mover = node.mover().opponent();
    let fast = node.depth() <= node.max_height() / 2;
    let moves = if finished_winner(node.board(), node.mover(), node.last_move()).is_some() {
        Vec::new()
    } else {
        generate_ranked_moves(node.board(), config.branching_cap)
    };

    for (x, y) in moves {
        let next = next_board(tree[id].board(), x, y, mover);
        let wins = is_five_in_line(&next, x, y);
        tree.add_child(id, next, mover, (x, y));
        if wins {
            debug!("expansion: {mover} wins immediately at ({x}, {y})");
            backpropagate(tree, id, WIN_REWARD, Some(mover), fast);
        }
    }

    tree.mark_expanded(id);
}

/// One selection pass from the root.
///
/// Leaves that were never visited, or that expansion marked final, are
/// simulated. Other leaves are expanded and the descent continues from the
/// same node. Internal nodes step into the child picked by `policy`.
pub fn tree_descend(
    tree: &mut Tree,
    policy: SelectionPolicy,
    config: &SearchConfig,
    rng: &mut fastrand::Rng,
) -> Result<(), SearchError> {
    let mut id = tree.root();

    loop {
        let node = &tree[id];
        if node.is_leaf() {
            if node.visits() == 0 || node.is_final() {
                simulate(tree, id, rng);
                return Ok(());
            }
            expand(tree, id, config);
            continue;
        }

        id = select_child(tree, id, policy, config).ok_or(SearchError::DegenerateSelection {
            depth: node.depth(),
        })?;
    }
}

/// Run `config.iterations` selection passes on `tree`.
///
/// A degenerate pass is logged and counted but does not stop the search.
pub fn tree_search(
    tree: &mut Tree,
    policy: SelectionPolicy,
    config: &SearchConfig,
    rng: &mut fastrand::Rng,
) -> SearchStats {
    let mut stats = SearchStats::default();

    for i in 0..config.iterations {
        stats.iterations += 1;
        if let Err(err) = tree_descend(tree, policy, config, rng) {
            warn!("iteration {i}: {err}");
            stats.degenerate += 1;
        }

        if (i + 1) % REPORT_PERIOD == 0 {
            let root = &tree[tree.root()];
            debug!(
                "{} iterations, {} nodes, root {}/{}",
                i + 1,
                tree.len(),
                root.reward(),
                root.visits()
            );
        }
    }

    stats
}

/// Root child with the strictly greatest visit count, first seen on ties.
pub fn best_move(tree: &Tree) -> Option<NodeId> {
    let mut best: Option<NodeId> = None;
    for &child in tree[tree.root()].children() {
        if best.is_none_or(|b| tree[child].visits() > tree[b].visits()) {
            best = Some(child);
        }
    }
    best
}

/// Print debug information about the root's children.
pub fn dump_children(tree: &Tree) {
    for &child in tree[tree.root()].children() {
        let node = &tree[child];
        debug!(
            "move {:?} v={} w={} fw={} wr={:.3}",
            node.last_move(),
            node.visits(),
            node.reward(),
            node.fast_wins(),
            node.winrate()
        );
    }
}

/// MCTS engine: a configuration plus the random source for playouts.
pub struct Mcts {
    config: SearchConfig,
    rng: fastrand::Rng,
}

impl Default for Mcts {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Mcts {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            rng: fastrand::Rng::new(),
        }
    }

    /// Create an engine whose playouts are reproducible.
    pub fn with_seed(config: SearchConfig, seed: u64) -> Self {
        Self {
            config,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Tuning access, e.g. `mcts.config_mut().set_exploration(1.4)`.
    pub fn config_mut(&mut self) -> &mut SearchConfig {
        &mut self.config
    }

    /// Search for the side to move on `board` (Black moves first).
    pub fn search_move(&mut self, board: &Board, policy: SelectionPolicy) -> Result<SearchResult, SearchError> {
        self.search(board, board.side_to_move(), policy)
    }

    /// Build the search tree for `to_move` without picking a move.
    pub fn grow_tree(&mut self, board: &Board, to_move: Color, policy: SelectionPolicy) -> (Tree, SearchStats) {
        let mut tree = Tree::new(board, to_move.opponent());
        let stats = tree_search(&mut tree, policy, &self.config, &mut self.rng);
        (tree, stats)
    }

    /// Search for a move for `to_move` on `board`.
    pub fn search(
        &mut self,
        board: &Board,
        to_move: Color,
        policy: SelectionPolicy,
    ) -> Result<SearchResult, SearchError> {
        info!(
            "MCTS: {} iterations, {policy} policy, {to_move} to move",
            self.config.iterations
        );
        let (tree, stats) = self.grow_tree(board, to_move, policy);
        dump_children(&tree);

        let best = best_move(&tree).ok_or(SearchError::NoMoveAvailable)?;
        let child = &tree[best];
        let point = child.last_move().ok_or(SearchError::NoMoveAvailable)?;
        let root = &tree[tree.root()];

        if stats.degenerate > 0 {
            warn!("{} of {} iterations were degenerate", stats.degenerate, stats.iterations);
        }
        info!(
            "MCTS: {to_move} plays ({}, {}) v={} wr={:.3}, root {}/{}, {} nodes",
            point.0,
            point.1,
            child.visits(),
            child.winrate(),
            root.reward(),
            root.visits(),
            tree.len()
        );

        Ok(SearchResult {
            point,
            stone: to_move,
            visits: child.visits(),
            reward: child.reward(),
            winrate: child.winrate(),
            root_visits: root.visits(),
            root_reward: root.reward(),
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backpropagate_credits_matching_mover() {
        let board = Board::new(9);
        let mut tree = Tree::new(&board, Color::White);
        let root = tree.root();
        let child = tree.add_child(root, next_board(&board, 4, 4, Color::Black), Color::Black, (4, 4));

        backpropagate(&mut tree, child, 1, Some(Color::Black), true);
        assert_eq!(tree[child].visits(), 1);
        assert_eq!(tree[child].reward(), 1);
        assert_eq!(tree[child].fast_wins(), 1);
        assert_eq!(tree[root].visits(), 1);
        assert_eq!(tree[root].reward(), 0);

        backpropagate(&mut tree, child, 1, Some(Color::White), false);
        assert_eq!(tree[child].visits(), 2);
        assert_eq!(tree[child].reward(), 1);
        assert_eq!(tree[root].reward(), 1);
        assert_eq!(tree[root].fast_wins(), 0);
    }

    #[test]
    fn test_backpropagate_draw_credits_nobody() {
        let board = Board::new(9);
        let mut tree = Tree::new(&board, Color::White);
        let root = tree.root();
        backpropagate(&mut tree, root, 1, None, true);
        assert_eq!(tree[root].visits(), 1);
        assert_eq!(tree[root].reward(), 0);
        assert_eq!(tree[root].fast_wins(), 0);
    }

    #[test]
    fn test_expand_full_board_is_final() {
        let board = Board::from_rows(&["XOXOX", "XOXOX", "OXOXO", "XOXOX", "OXOXO"]);
        let mut tree = Tree::new(&board, Color::White);
        let root = tree.root();
        expand(&mut tree, root, &SearchConfig::default());
        assert!(tree[root].children().is_empty());
        assert!(tree[root].is_leaf());
        assert!(tree[root].is_final());
    }

    #[test]
    fn test_expand_respects_branching_cap() {
        let board = Board::new(15);
        let mut tree = Tree::new(&board, Color::White);
        let root = tree.root();
        let config = SearchConfig::default().with_branching_cap(4);
        expand(&mut tree, root, &config);
        assert_eq!(tree[root].children().len(), 4);
        assert!(!tree[root].is_leaf());
        assert!(!tree[root].is_final());
        for &child in tree[root].children() {
            assert_eq!(tree[child].mover(), Color::Black);
            assert_eq!(tree[child].depth(), 1);
            assert_eq!(tree[child].visits(), 0);
        }
    }

    #[test]
    fn test_expand_after_win_has_no_children() {
        let before = Board::from_rows(&[".......", ".XXXX..", ".OOOO..", "......."]);
        let mut tree = Tree::new(&before, Color::White);
        let root = tree.root();
        let child = tree.add_child(root, next_board(&before, 1, 5, Color::Black), Color::Black, (1, 5));
        expand(&mut tree, child, &SearchConfig::default());
        assert!(tree[child].is_final());
        assert!(tree[child].children().is_empty());
    }

    #[test]
    fn test_expand_won_root_has_no_children() {
        let board = Board::from_rows(&["XXXXX....", "OOOO.....", ".........", "........."]);
        let mut tree = Tree::new(&board, Color::Black);
        let root = tree.root();
        expand(&mut tree, root, &SearchConfig::default());
        assert!(tree[root].children().is_empty());
        assert!(tree[root].is_final());
    }

    #[test]
    fn test_result_winrate_matches_chosen_child() {
        let mut mcts = Mcts::with_seed(SearchConfig::default().with_iterations(60), 9);
        let result = mcts
            .search_move(&Board::new(9), SelectionPolicy::Standard)
            .expect("empty board has moves");
        assert!(result.visits > 0);
        assert_eq!(result.winrate, result.reward as f64 / result.visits as f64);
    }

    #[test]
    fn test_best_move_first_seen_on_ties() {
        let board = Board::new(9);
        let mut tree = Tree::new(&board, Color::White);
        let root = tree.root();
        let a = tree.add_child(root, next_board(&board, 0, 0, Color::Black), Color::Black, (0, 0));
        let b = tree.add_child(root, next_board(&board, 0, 1, Color::Black), Color::Black, (0, 1));
        let c = tree.add_child(root, next_board(&board, 0, 2, Color::Black), Color::Black, (0, 2));
        for _ in 0..3 {
            backpropagate(&mut tree, b, 1, None, false);
            backpropagate(&mut tree, c, 1, None, false);
        }
        backpropagate(&mut tree, a, 1, None, false);
        assert_eq!(best_move(&tree), Some(b));
    }

    #[test]
    fn test_zero_iterations_has_no_move() {
        let mut mcts = Mcts::with_seed(SearchConfig::default().with_iterations(0), 5);
        let result = mcts.search_move(&Board::new(9), SelectionPolicy::Standard);
        assert_eq!(result, Err(SearchError::NoMoveAvailable));
    }
}
