//! Search tree storage.
//!
//! Nodes live in a [`Tree`] arena and refer to each other by [`NodeId`].
//! A node owns the ids of its children; the parent id is only used to walk
//! back up during backpropagation. The whole arena is dropped once a move
//! has been chosen.

use std::ops::{Index, IndexMut};

use crate::board::{Board, Color, Point};

/// Index of a node inside its [`Tree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node in the MCTS search tree.
#[derive(Clone, Debug)]
pub struct Node {
    /// Board after `last_move` was played
    board: Board,
    /// Player who made `last_move`
    mover: Color,
    /// Move that produced this node (`None` for the root)
    last_move: Option<Point>,
    /// Simulations that passed through this node
    visits: u32,
    /// Reward credited to `mover`
    reward: u32,
    /// Part of `reward` earned in fast games
    fast_wins: u32,
    /// Visits this node had when its children were created
    visits_at_expansion: u32,
    depth: u32,
    is_leaf: bool,
    is_final: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(board: Board, mover: Color, last_move: Option<Point>, parent: Option<NodeId>, depth: u32) -> Self {
        Self {
            board,
            mover,
            last_move,
            visits: 0,
            reward: 0,
            fast_wins: 0,
            visits_at_expansion: 0,
            depth,
            is_leaf: true,
            is_final: false,
            parent,
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn mover(&self) -> Color {
        self.mover
    }

    #[inline]
    pub fn last_move(&self) -> Option<Point> {
        self.last_move
    }

    #[inline]
    pub fn visits(&self) -> u32 {
        self.visits
    }

    #[inline]
    pub fn reward(&self) -> u32 {
        self.reward
    }

    #[inline]
    pub fn fast_wins(&self) -> u32 {
        self.fast_wins
    }

    #[inline]
    pub fn visits_at_expansion(&self) -> u32 {
        self.visits_at_expansion
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.is_leaf
    }

    #[inline]
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Longest possible game on this board, used as the fast-game threshold
    /// and by the waning exploration policy.
    #[inline]
    pub fn max_height(&self) -> u32 {
        self.board.cell_count() as u32
    }

    pub fn increase_reward(&mut self, amount: u32) {
        self.reward += amount;
    }

    pub fn increase_visit_count(&mut self) {
        self.visits += 1;
    }

    pub fn increase_fast_win_count(&mut self) {
        self.fast_wins += 1;
    }

    pub fn set_leaf(&mut self, leaf: bool) {
        self.is_leaf = leaf;
    }

    pub fn set_final(&mut self, is_final: bool) {
        self.is_final = is_final;
    }

    /// Observed reward rate, or -0.1 for an unvisited node.
    pub fn winrate(&self) -> f64 {
        if self.visits > 0 {
            self.reward as f64 / self.visits as f64
        } else {
            -0.1
        }
    }
}

/// Arena holding every node of one search.
#[derive(Clone, Debug)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Create a tree whose root holds a copy of `board`. `mover` is the
    /// player who moved last, i.e. the opponent of the side to act.
    pub fn new(board: &Board, mover: Color) -> Self {
        Self {
            nodes: vec![Node::new(board.clone(), mover, None, None, 0)],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a child of `parent` holding `board`, reached by `mover`
    /// playing `last_move`.
    pub fn add_child(&mut self, parent: NodeId, board: Board, mover: Color, last_move: Point) -> NodeId {
        let id = NodeId(self.nodes.len());
        let depth = self[parent].depth + 1;
        self.nodes
            .push(Node::new(board, mover, Some(last_move), Some(parent), depth));
        self[parent].children.push(id);
        id
    }

    /// Record that `id` has just been expanded.
    pub fn mark_expanded(&mut self, id: NodeId) {
        let node = &mut self[id];
        node.visits_at_expansion = node.visits;
        let has_children = !node.children.is_empty();
        node.set_leaf(!has_children);
        node.set_final(!has_children);
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for Tree {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root() {
        let board = Board::new(15);
        let tree = Tree::new(&board, Color::White);
        let root = &tree[tree.root()];
        assert_eq!(root.mover(), Color::White);
        assert_eq!(root.last_move(), None);
        assert_eq!(root.parent(), None);
        assert_eq!(root.depth(), 0);
        assert!(root.is_leaf());
        assert!(!root.is_final());
        assert_eq!(root.max_height(), 225);
        assert_eq!(root.winrate(), -0.1);
    }

    #[test]
    fn test_add_child_links_both_ways() {
        let board = Board::new(9);
        let mut tree = Tree::new(&board, Color::White);
        let root = tree.root();
        let mut next = board.clone();
        next.set(4, 4, Color::Black);
        let child = tree.add_child(root, next, Color::Black, (4, 4));

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[root].children(), &[child]);
        assert_eq!(tree[child].parent(), Some(root));
        assert_eq!(tree[child].depth(), 1);
        assert_eq!(tree[child].last_move(), Some((4, 4)));
        assert_eq!(tree[child].board().get(4, 4), Some(Color::Black));
        assert_eq!(tree[root].board().get(4, 4), None);
    }

    #[test]
    fn test_counters() {
        let board = Board::new(5);
        let mut tree = Tree::new(&board, Color::Black);
        let root = tree.root();
        let node = &mut tree[root];
        node.increase_visit_count();
        node.increase_visit_count();
        node.increase_reward(1);
        node.increase_fast_win_count();
        assert_eq!(node.visits(), 2);
        assert_eq!(node.reward(), 1);
        assert_eq!(node.fast_wins(), 1);
        assert_eq!(node.winrate(), 0.5);
    }

    #[test]
    fn test_mark_expanded_without_children_is_final() {
        let board = Board::from_rows(&["XO", "OX"]);
        let mut tree = Tree::new(&board, Color::Black);
        let root = tree.root();
        tree[root].increase_visit_count();
        tree.mark_expanded(root);
        assert!(tree[root].is_leaf());
        assert!(tree[root].is_final());
        assert_eq!(tree[root].visits_at_expansion(), 1);
    }
}
