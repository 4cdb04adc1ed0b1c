//! Selection policies: UCB1 and its variants.
//!
//! Every policy is a pure function of a node's statistics, its parent's
//! visit count and the [`SearchConfig`]. The only randomness in a search is
//! in the rollouts.

use std::fmt;
use std::str::FromStr;

use crate::config::SearchConfig;
use crate::node::{Node, NodeId, Tree};
use crate::numeric::safe_divide;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionPolicy {
    /// Plain UCB1
    #[default]
    Standard,
    /// UCB1 with the exploration constant shrinking with depth
    WaningExploration,
    /// UCB1 with wins from short games weighted separately
    FastWins,
    /// Placeholder for a heuristic policy; scores every node 0
    Heuristics,
}

impl SelectionPolicy {
    pub const ALL: [SelectionPolicy; 4] = [
        SelectionPolicy::Standard,
        SelectionPolicy::WaningExploration,
        SelectionPolicy::FastWins,
        SelectionPolicy::Heuristics,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SelectionPolicy::Standard => "standard",
            SelectionPolicy::WaningExploration => "waning",
            SelectionPolicy::FastWins => "fast-wins",
            SelectionPolicy::Heuristics => "heuristics",
        }
    }

    /// Selection value of `node`, whose parent has `parent_visits` visits.
    pub fn score(self, node: &Node, parent_visits: u32, config: &SearchConfig) -> f64 {
        match self {
            SelectionPolicy::Standard => ucb1(node, parent_visits, config, false, false),
            SelectionPolicy::WaningExploration => ucb1(node, parent_visits, config, true, false),
            SelectionPolicy::FastWins => ucb1(node, parent_visits, config, false, true),
            SelectionPolicy::Heuristics => 0.0,
        }
    }
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SelectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        SelectionPolicy::ALL
            .into_iter()
            .find(|p| p.name() == lower)
            .ok_or_else(|| format!("unknown selection policy: {s}"))
    }
}

/// Exploitation term. With `fast_wins` set, wins from fast games are weighted
/// by `Cfw` and the rest by `1 - Cfw`.
fn exploitation(node: &Node, config: &SearchConfig, fast_wins: bool) -> f64 {
    let visits = node.visits() as f64;
    if fast_wins {
        let cfw = config.fast_win_weight();
        let fast = node.fast_wins() as f64;
        let slow = (node.reward() - node.fast_wins()) as f64;
        safe_divide(cfw * fast + (1.0 - cfw) * slow, visits)
    } else {
        safe_divide(node.reward() as f64, visits)
    }
}

/// UCB1 score of `node`.
///
/// An unvisited node scores `+inf`. When waning exploration drives the
/// constant to zero the exploration term is exactly zero.
fn ucb1(node: &Node, parent_visits: u32, config: &SearchConfig, waning: bool, fast_wins: bool) -> f64 {
    let mut c = config.exploration();
    if waning {
        let max_height = node.max_height() as f64;
        let depth = node.depth() as f64;
        c *= safe_divide(max_height - depth, max_height).max(0.0);
    }

    let exploration = if c == 0.0 {
        0.0
    } else {
        let ln_parent = (parent_visits as f64).ln();
        c * safe_divide(ln_parent, node.visits() as f64).sqrt()
    };

    exploitation(node, config, fast_wins) + exploration
}

/// Pick the child of `parent` with the highest score.
///
/// Ties go to the first child seen. A `+inf` score returns immediately.
/// Returns `None` when there are no children or none scores above `-inf`
/// (NaN included).
pub fn select_child(tree: &Tree, parent: NodeId, policy: SelectionPolicy, config: &SearchConfig) -> Option<NodeId> {
    let parent_visits = tree[parent].visits();
    let mut max = f64::NEG_INFINITY;
    let mut best = None;

    for &child in tree[parent].children() {
        let value = policy.score(&tree[child], parent_visits, config);
        if value > max {
            max = value;
            best = Some(child);
        }
        if max == f64::INFINITY {
            break;
        }
    }

    best
}
