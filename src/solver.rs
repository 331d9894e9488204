use ahash::AHashMap;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, trace};

use crate::engine::{Move, State, BOARD_SIZE};
use crate::error::{PuzzleError, Result};
use crate::frontier::{FifoFrontier, Frontier, LifoFrontier, PriorityFrontier, SearchNode};
use crate::heuristics::Heuristic;

/// The search strategies that can drive the shared traversal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Breadth-first: shortest path, no heuristic needed.
    #[default]
    Bfs,
    /// Depth-first: some path, not necessarily the shortest.
    Dfs,
    /// Best-first on `g + h`: shortest path, requires an informed heuristic.
    #[value(name = "a-star", alias = "astar")]
    #[serde(alias = "astar")]
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Bfs, Algorithm::Dfs, Algorithm::AStar];

    /// Checks that `heuristic` can be used with this algorithm.
    ///
    /// BFS and DFS ignore the heuristic entirely. A* with [`Heuristic::None`] is rejected
    /// so that callers make an explicit choice.
    pub fn validate_heuristic(self, heuristic: Heuristic) -> Result<()> {
        if self == Algorithm::AStar && !heuristic.is_informed() {
            return Err(PuzzleError::MissingHeuristic { algorithm: self });
        }
        Ok(())
    }

    /// Whether the first goal this algorithm reaches is guaranteed to be a shortest path.
    pub fn is_optimal(self) -> bool {
        self != Algorithm::Dfs
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::AStar => "A*",
        };
        f.write_str(name)
    }
}

/// Counters collected while a search runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes removed from the frontier and expanded (equals the closed-set size).
    pub expanded: usize,
    /// Nodes pushed onto the frontier, root included.
    pub generated: usize,
    /// Largest frontier size observed.
    pub max_frontier: usize,
}

/// A path from the start state to the goal, both inclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// `path[0]` is the start and the last element is the goal.
    pub path: Vec<State>,
    /// `moves[i]` turns `path[i]` into `path[i + 1]`.
    pub moves: Vec<Move>,
    pub stats: SearchStats,
}

impl Solution {
    /// Number of slides in the solution. Zero when the start already is the goal.
    pub fn steps(&self) -> usize {
        self.moves.len()
    }
}

/// Result of running a search to completion (or until cancelled).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveOutcome {
    Solved(Solution),
    /// The frontier ran dry: the goal is not reachable from the start.
    NoSolution(SearchStats),
    /// The caller raised the cancellation flag before the search finished.
    Cancelled(SearchStats),
}

impl SolveOutcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SolveOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn stats(&self) -> &SearchStats {
        match self {
            SolveOutcome::Solved(solution) => &solution.stats,
            SolveOutcome::NoSolution(stats) | SolveOutcome::Cancelled(stats) => stats,
        }
    }
}

/// Runs the shared best-first traversal from `start` to `goal`.
///
/// The ordering policy is entirely the `frontier`'s: FIFO gives BFS, LIFO gives DFS and a
/// priority queue on `g + h` gives A*. The `heuristic` only fills in each node's estimate.
///
/// Duplicate frontier entries are allowed; a node whose state is already closed is
/// skipped when popped, so every state is expanded at most once and the search ends
/// within the 9!/2 states reachable from `start`.
///
/// If `cancel` is given it is polled once per loop iteration.
pub fn search<F: Frontier>(
    start: State,
    goal: &State,
    heuristic: Heuristic,
    mut frontier: F,
    cancel: Option<&AtomicBool>,
) -> SolveOutcome {
    let mut stats = SearchStats::default();
    // Closed set, keyed by state, holding each expanded state's predecessor link.
    let mut closed: AHashMap<State, Option<(State, Move)>> = AHashMap::new();

    frontier.push(SearchNode::new(start, 0, heuristic.evaluate(&start, goal)));
    stats.generated += 1;
    stats.max_frontier = 1;

    while let Some(node) = frontier.pop() {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            debug!(expanded = stats.expanded, "search cancelled");
            return SolveOutcome::Cancelled(stats);
        }

        if closed.contains_key(&node.state) {
            continue;
        }
        closed.insert(node.state, node.parent);
        stats.expanded += 1;

        if node.state.is_goal(goal) {
            let (path, moves) = reconstruct_path(node.state, &closed);
            debug_assert_eq!(moves.len(), node.cost as usize);
            return SolveOutcome::Solved(Solution { path, moves, stats });
        }

        trace!(
            cost = node.cost,
            estimate = node.estimate,
            frontier = frontier.len(),
            "expanding"
        );
        for (mv, next) in node.state.successors() {
            if closed.contains_key(&next) {
                continue;
            }
            let child = SearchNode::new(next, node.cost + 1, heuristic.evaluate(&next, goal))
                .with_parent(node.state, mv);
            frontier.push(child);
            stats.generated += 1;
        }
        stats.max_frontier = stats.max_frontier.max(frontier.len());
    }

    debug!(expanded = stats.expanded, "frontier exhausted");
    SolveOutcome::NoSolution(stats)
}

/// Follows predecessor links from `end` back to the root and returns the path in
/// start-to-end order together with the moves between consecutive states.
fn reconstruct_path(
    end: State,
    closed: &AHashMap<State, Option<(State, Move)>>,
) -> (Vec<State>, Vec<Move>) {
    let mut path = vec![end];
    let mut moves = Vec::new();
    let mut current = end;
    while let Some(&Some((previous, mv))) = closed.get(&current) {
        path.push(previous);
        moves.push(mv);
        current = previous;
    }
    path.reverse();
    moves.reverse();
    (path, moves)
}

/// A validated solve request: start, goal, algorithm and heuristic.
///
/// Construction checks the algorithm/heuristic combination, so a `Puzzle` that exists
/// can always be solved.
///
/// # Examples
/// ```
/// use eight_puzzle::engine::State;
/// use eight_puzzle::heuristics::Heuristic;
/// use eight_puzzle::solver::{Algorithm, Puzzle};
///
/// let start = State::try_from_grid([[1, 2, 3], [4, 5, 0], [7, 8, 6]]).unwrap();
/// let puzzle = Puzzle::new(start, State::goal(), Algorithm::AStar, Heuristic::Manhattan).unwrap();
/// let outcome = puzzle.solve();
/// assert_eq!(outcome.solution().unwrap().steps(), 1);
///
/// assert!(Puzzle::new(start, State::goal(), Algorithm::AStar, Heuristic::None).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct Puzzle {
    start: State,
    goal: State,
    algorithm: Algorithm,
    heuristic: Heuristic,
}

impl Puzzle {
    pub fn new(
        start: State,
        goal: State,
        algorithm: Algorithm,
        heuristic: Heuristic,
    ) -> Result<Self> {
        algorithm.validate_heuristic(heuristic)?;
        Ok(Puzzle {
            start,
            goal,
            algorithm,
            heuristic,
        })
    }

    pub fn start(&self) -> &State {
        &self.start
    }

    pub fn goal(&self) -> &State {
        &self.goal
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    /// Runs the search to completion. Blocks until the goal is found or the
    /// reachable state space is exhausted.
    pub fn solve(&self) -> SolveOutcome {
        self.run(None)
    }

    /// Like [`Puzzle::solve`], but gives up with [`SolveOutcome::Cancelled`] once
    /// `cancel` is set. The flag is checked once per expansion.
    pub fn solve_with_cancel(&self, cancel: &AtomicBool) -> SolveOutcome {
        self.run(Some(cancel))
    }

    fn run(&self, cancel: Option<&AtomicBool>) -> SolveOutcome {
        debug!(
            algorithm = %self.algorithm,
            heuristic = %self.heuristic,
            "starting search"
        );
        let outcome = match self.algorithm {
            Algorithm::Bfs => search(
                self.start,
                &self.goal,
                Heuristic::None,
                FifoFrontier::new(),
                cancel,
            ),
            Algorithm::Dfs => search(
                self.start,
                &self.goal,
                Heuristic::None,
                LifoFrontier::new(),
                cancel,
            ),
            Algorithm::AStar => search(
                self.start,
                &self.goal,
                self.heuristic,
                PriorityFrontier::new(),
                cancel,
            ),
        };

        let stats = outcome.stats();
        match &outcome {
            SolveOutcome::Solved(solution) => info!(
                algorithm = %self.algorithm,
                steps = solution.steps(),
                expanded = stats.expanded,
                "solution found"
            ),
            SolveOutcome::NoSolution(_) => info!(
                algorithm = %self.algorithm,
                expanded = stats.expanded,
                "no solution exists"
            ),
            SolveOutcome::Cancelled(_) => info!(
                algorithm = %self.algorithm,
                expanded = stats.expanded,
                "search cancelled"
            ),
        }
        outcome
    }
}

/// Single entry point from raw grids: validates both boards and the algorithm/heuristic
/// pair, then runs the search.
///
/// # Errors
/// Malformed grids and invalid combinations are reported before any node is expanded.
/// An unreachable goal is not an error; it comes back as [`SolveOutcome::NoSolution`].
pub fn solve(
    start: [[u8; BOARD_SIZE]; BOARD_SIZE],
    goal: [[u8; BOARD_SIZE]; BOARD_SIZE],
    algorithm: Algorithm,
    heuristic: Heuristic,
) -> Result<SolveOutcome> {
    let start = State::try_from_grid(start)?;
    let goal = State::try_from_grid(goal)?;
    Ok(Puzzle::new(start, goal, algorithm, heuristic)?.solve())
}
