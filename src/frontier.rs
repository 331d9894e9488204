//! Open sets for the search loop.
//!
//! The three search algorithms share one traversal and differ only in which
//! [`Frontier`] they hand it: a FIFO queue gives breadth-first order, a LIFO stack
//! gives depth-first order, and a min-heap on `f = g + h` gives A*.
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use crate::engine::{Move, State};

/// A discovered state plus the bookkeeping the search needs to order it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchNode {
    pub state: State,
    /// Moves from the start (g).
    pub cost: u32,
    /// Heuristic estimate of moves left (h). Zero for uninformed searches.
    pub estimate: u32,
    /// The state this node was generated from and the move that led here.
    /// `None` only for the root.
    pub parent: Option<(State, Move)>,
}

impl SearchNode {
    pub fn new(state: State, cost: u32, estimate: u32) -> Self {
        SearchNode {
            state,
            cost,
            estimate,
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: State, mv: Move) -> Self {
        self.parent = Some((parent, mv));
        self
    }

    /// `f = g + h`.
    pub fn total(&self) -> u32 {
        self.cost + self.estimate
    }
}

/// The capability set the search loop needs from an open set.
pub trait Frontier {
    fn push(&mut self, node: SearchNode);

    /// Removes the next node according to this frontier's ordering policy.
    fn pop(&mut self) -> Option<SearchNode>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First-in-first-out: nodes come out in non-decreasing depth order.
#[derive(Debug, Default)]
pub struct FifoFrontier {
    queue: VecDeque<SearchNode>,
}

impl FifoFrontier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for FifoFrontier {
    fn push(&mut self, node: SearchNode) {
        self.queue.push_back(node);
    }

    fn pop(&mut self) -> Option<SearchNode> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Last-in-first-out.
#[derive(Debug, Default)]
pub struct LifoFrontier {
    stack: Vec<SearchNode>,
}

impl LifoFrontier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for LifoFrontier {
    fn push(&mut self, node: SearchNode) {
        self.stack.push(node);
    }

    fn pop(&mut self) -> Option<SearchNode> {
        self.stack.pop()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Prioritized {
    node: SearchNode,
    /// Insertion counter, used to break ties on `f`.
    seq: u64,
}

impl Ord for Prioritized {
    /// Reverse compare so that `BinaryHeap`'s max-heap behaves as a min-heap:
    /// lowest `f` first, then earliest insertion.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .node
            .total()
            .cmp(&self.node.total())
            .then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Prioritized {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue ordered by ascending `f = g + h`, stable on ties.
#[derive(Debug, Default)]
pub struct PriorityFrontier {
    heap: BinaryHeap<Prioritized>,
    next_seq: u64,
}

impl PriorityFrontier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for PriorityFrontier {
    fn push(&mut self, node: SearchNode) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Prioritized { node, seq });
    }

    fn pop(&mut self) -> Option<SearchNode> {
        self.heap.pop().map(|p| p.node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
