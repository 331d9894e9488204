//! Board representation for the 8-puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `State`: a 3x3 arrangement of the tiles `1..=8` plus the blank (`0`), with
//!   value equality and hashing so it can key the visited set of a search.
//! - `Move`: the direction the blank slides in when a neighbouring tile is pushed into it.
//!
//! States are plain `Copy` values. Search bookkeeping such as predecessor links lives
//! in the solver, never inside a `State`.
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;

use crate::error::{PuzzleError, Result};

/// Width and height of the board. The board is always square.
pub const BOARD_SIZE: usize = 3;

/// Number of cells on the board, blank included.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Value used for the blank cell.
pub const BLANK: u8 = 0;

/// The canonical goal arrangement, row-major with the blank in the bottom-right corner.
pub const GOAL_GRID: [[u8; BOARD_SIZE]; BOARD_SIZE] = [[1, 2, 3], [4, 5, 6], [7, 8, 0]];

/// Direction in which the blank travels.
///
/// Sliding the blank `Up` is the same as pushing the tile above it down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All moves in the fixed order used for successor generation.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Row and column delta applied to the blank's position.
    fn delta(self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    /// The move that undoes this one.
    pub fn opposite(self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        f.write_str(name)
    }
}

/// A board configuration.
///
/// Every `State` holds a permutation of `0..=8`; the constructors reject anything else,
/// so code that receives a `State` never has to re-check the invariant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct State {
    grid: [[u8; BOARD_SIZE]; BOARD_SIZE],
}

impl State {
    /// Returns the canonical goal state `{{1,2,3},{4,5,6},{7,8,0}}`.
    pub fn goal() -> Self {
        State { grid: GOAL_GRID }
    }

    /// Creates a state from a 3x3 grid, validating that it is a permutation of `0..=8`.
    ///
    /// # Errors
    /// * `PuzzleError::TileOutOfRange` if any value is greater than 8.
    /// * `PuzzleError::DuplicateTile` if a value appears twice (which also means
    ///   another value is missing).
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle::engine::State;
    /// let state = State::try_from_grid([[1, 2, 3], [4, 5, 6], [7, 8, 0]]).unwrap();
    /// assert_eq!(state, State::goal());
    /// assert!(State::try_from_grid([[1, 1, 3], [4, 5, 6], [7, 8, 0]]).is_err());
    /// ```
    pub fn try_from_grid(grid: [[u8; BOARD_SIZE]; BOARD_SIZE]) -> Result<Self> {
        let mut seen = [false; CELL_COUNT];
        for (r, row) in grid.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if value as usize >= CELL_COUNT {
                    return Err(PuzzleError::TileOutOfRange {
                        value,
                        row: r,
                        col: c,
                    });
                }
                if seen[value as usize] {
                    return Err(PuzzleError::DuplicateTile { value });
                }
                seen[value as usize] = true;
            }
        }
        Ok(State { grid })
    }

    /// Creates a state from nine values in row-major order.
    ///
    /// # Errors
    /// `PuzzleError::InvalidDimensions` if `values` does not hold exactly nine entries,
    /// otherwise the same errors as [`State::try_from_grid`].
    pub fn try_from_slice(values: &[u8]) -> Result<Self> {
        if values.len() != CELL_COUNT {
            return Err(PuzzleError::InvalidDimensions {
                expected: CELL_COUNT,
                got: values.len(),
            });
        }
        let mut grid = [[BLANK; BOARD_SIZE]; BOARD_SIZE];
        for (i, &value) in values.iter().enumerate() {
            grid[i / BOARD_SIZE][i % BOARD_SIZE] = value;
        }
        Self::try_from_grid(grid)
    }

    /// Creates a uniformly shuffled state from a seed.
    ///
    /// Half of all permutations cannot reach the goal; use
    /// [`State::random_solvable_with_seed`] when that matters.
    pub fn random_with_seed(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut values: Vec<u8> = (0..CELL_COUNT as u8).collect();
        values.shuffle(&mut rng);

        let mut grid = [[BLANK; BOARD_SIZE]; BOARD_SIZE];
        for (i, value) in values.into_iter().enumerate() {
            grid[i / BOARD_SIZE][i % BOARD_SIZE] = value;
        }
        State { grid }
    }

    /// Creates a shuffled state that is guaranteed to reach the canonical goal.
    ///
    /// If the shuffle lands in the wrong parity class, the first two non-blank tiles
    /// are exchanged, which flips the parity.
    pub fn random_solvable_with_seed(seed: u64) -> Self {
        let mut state = Self::random_with_seed(seed);
        if !state.is_solvable_from(&State::goal()) {
            let tiles: Vec<(usize, usize)> = state
                .cells()
                .filter(|&(_, _, v)| v != BLANK)
                .map(|(r, c, _)| (r, c))
                .take(2)
                .collect();
            let ((r1, c1), (r2, c2)) = (tiles[0], tiles[1]);
            let tmp = state.grid[r1][c1];
            state.grid[r1][c1] = state.grid[r2][c2];
            state.grid[r2][c2] = tmp;
        }
        state
    }

    /// Returns the value at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is not below `BOARD_SIZE`.
    pub fn tile(&self, r: usize, c: usize) -> u8 {
        self.grid[r][c]
    }

    pub fn grid(&self) -> &[[u8; BOARD_SIZE]; BOARD_SIZE] {
        &self.grid
    }

    /// Iterates the cells in row-major order as `(row, col, value)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.grid
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, &v)| (r, c, v)))
    }

    /// Returns the `(row, col)` of the blank.
    pub fn blank_position(&self) -> (usize, usize) {
        self.cells()
            .find(|&(_, _, v)| v == BLANK)
            .map(|(r, c, _)| (r, c))
            .unwrap_or_else(|| unreachable!("a validated state always holds a blank"))
    }

    /// Returns the `(row, col)` at which `value` sits, if it is a tile of this board.
    pub fn position_of(&self, value: u8) -> Option<(usize, usize)> {
        self.cells()
            .find(|&(_, _, v)| v == value)
            .map(|(r, c, _)| (r, c))
    }

    /// Slides the blank one cell in direction `mv`.
    ///
    /// # Returns
    /// The resulting state, or `None` if the blank would leave the board.
    pub fn apply_move(&self, mv: Move) -> Option<State> {
        let (br, bc) = self.blank_position();
        let (dr, dc) = mv.delta();
        let nr = br as isize + dr;
        let nc = bc as isize + dc;
        if nr < 0 || nr >= BOARD_SIZE as isize || nc < 0 || nc >= BOARD_SIZE as isize {
            return None;
        }
        let (nr, nc) = (nr as usize, nc as usize);

        let mut next = *self;
        next.grid[br][bc] = next.grid[nr][nc];
        next.grid[nr][nc] = BLANK;
        Some(next)
    }

    /// Generates every state reachable with one slide, paired with the move that produces it.
    ///
    /// The order is always Up, Down, Left, Right (skipping moves that leave the board), so a
    /// corner blank yields 2 successors, an edge blank 3 and the centre 4.
    pub fn successors(&self) -> Vec<(Move, State)> {
        Move::ALL
            .iter()
            .filter_map(|&mv| self.apply_move(mv).map(|next| (mv, next)))
            .collect()
    }

    pub fn is_goal(&self, goal: &State) -> bool {
        self == goal
    }

    /// Number of inversions among the non-blank tiles read row-major.
    fn inversions(&self) -> usize {
        let tiles: Vec<u8> = self
            .cells()
            .map(|(_, _, v)| v)
            .filter(|&v| v != BLANK)
            .collect();
        let mut count = 0;
        for i in 0..tiles.len() {
            for j in i + 1..tiles.len() {
                if tiles[i] > tiles[j] {
                    count += 1;
                }
            }
        }
        count
    }

    /// Checks whether `other` can be reached from this state by sliding tiles.
    ///
    /// On an odd-width board a slide never changes the inversion parity of the
    /// non-blank tiles, and every arrangement with matching parity is reachable.
    pub fn is_solvable_from(&self, other: &State) -> bool {
        self.inversions() % 2 == other.inversions() % 2
    }
}

impl Default for State {
    fn default() -> Self {
        State::goal()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "+---".repeat(BOARD_SIZE) + "+";
        writeln!(f, "{}", border)?;
        for (r, row) in self.grid.iter().enumerate() {
            for &value in row {
                if value == BLANK {
                    write!(f, "|   ")?;
                } else {
                    write!(f, "| {} ", value)?;
                }
            }
            writeln!(f, "|")?;
            write!(f, "{}", border)?;
            if r < BOARD_SIZE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn state(grid: [[u8; 3]; 3]) -> State {
        State::try_from_grid(grid).unwrap()
    }

    /// True if `b` differs from `a` by exactly one blank/neighbour exchange.
    fn is_single_slide(a: &State, b: &State) -> bool {
        a.successors().iter().any(|(_, s)| s == b)
    }

    #[test]
    fn test_goal_state() {
        let goal = State::goal();
        assert_eq!(goal.grid(), &GOAL_GRID);
        assert_eq!(goal.blank_position(), (2, 2));
        assert_eq!(State::default(), goal);
    }

    #[test]
    fn test_try_from_grid_rejects_duplicates() {
        let result = State::try_from_grid([[1, 2, 3], [4, 5, 6], [7, 7, 0]]);
        assert!(matches!(result, Err(PuzzleError::DuplicateTile { value: 7 })));
    }

    #[test]
    fn test_try_from_grid_rejects_out_of_range() {
        let result = State::try_from_grid([[1, 2, 3], [4, 5, 6], [7, 9, 0]]);
        assert!(matches!(
            result,
            Err(PuzzleError::TileOutOfRange {
                value: 9,
                row: 2,
                col: 1
            })
        ));
    }

    #[test]
    fn test_try_from_slice_wrong_length() {
        let result = State::try_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        assert!(matches!(
            result,
            Err(PuzzleError::InvalidDimensions {
                expected: 9,
                got: 8
            })
        ));
        let ok = State::try_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8, 0]).unwrap();
        assert_eq!(ok, State::goal());
    }

    #[test]
    fn test_successor_counts_by_blank_position() {
        let corner = State::goal();
        assert_eq!(corner.successors().len(), 2);

        let edge = state([[1, 2, 3], [4, 5, 0], [7, 8, 6]]);
        assert_eq!(edge.successors().len(), 3);

        let center = state([[1, 2, 3], [4, 0, 5], [7, 8, 6]]);
        assert_eq!(center.successors().len(), 4);
    }

    #[test]
    fn test_successor_order_and_content() {
        let center = state([[1, 2, 3], [4, 0, 5], [7, 8, 6]]);
        let succ = center.successors();
        let moves: Vec<Move> = succ.iter().map(|(m, _)| *m).collect();
        assert_eq!(moves, Move::ALL.to_vec());

        assert_eq!(succ[0].1, state([[1, 0, 3], [4, 2, 5], [7, 8, 6]]));
        assert_eq!(succ[1].1, state([[1, 2, 3], [4, 8, 5], [7, 0, 6]]));
        assert_eq!(succ[2].1, state([[1, 2, 3], [0, 4, 5], [7, 8, 6]]));
        assert_eq!(succ[3].1, state([[1, 2, 3], [4, 5, 0], [7, 8, 6]]));
        // The source state is untouched.
        assert_eq!(center.blank_position(), (1, 1));
    }

    #[test]
    fn test_apply_move_out_of_bounds() {
        let goal = State::goal();
        assert!(goal.apply_move(Move::Down).is_none());
        assert!(goal.apply_move(Move::Right).is_none());
        let up = goal.apply_move(Move::Up).unwrap();
        assert_eq!(up.apply_move(Move::Up.opposite()), Some(goal));
    }

    #[test]
    fn test_successors_are_single_slides() {
        let s = state([[8, 6, 7], [2, 5, 4], [3, 0, 1]]);
        for (_, next) in s.successors() {
            assert!(is_single_slide(&s, &next));
            assert!(is_single_slide(&next, &s));
        }
    }

    #[test]
    fn test_hash_consistent_with_equality() {
        let a = state([[1, 2, 3], [4, 5, 0], [7, 8, 6]]);
        let b = State::goal().apply_move(Move::Up).unwrap();
        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(a.is_goal(&a));
        assert!(!a.is_goal(&State::goal()));
    }

    #[test]
    fn test_solvability_parity() {
        let goal = State::goal();
        let one_move = state([[1, 2, 3], [4, 5, 0], [7, 8, 6]]);
        assert!(one_move.is_solvable_from(&goal));

        let swapped = state([[2, 1, 3], [4, 5, 6], [7, 8, 0]]);
        assert!(!swapped.is_solvable_from(&goal));
    }

    #[test]
    fn test_random_with_seed_determinism() {
        let a = State::random_with_seed(42);
        let b = State::random_with_seed(42);
        assert_eq!(a, b);
        // Valid permutation by construction.
        assert!(State::try_from_grid(*a.grid()).is_ok());
    }

    #[test]
    fn test_random_solvable_with_seed() {
        for seed in 0..50 {
            let s = State::random_solvable_with_seed(seed);
            assert!(s.is_solvable_from(&State::goal()), "seed {} unsolvable", seed);
            assert!(State::try_from_grid(*s.grid()).is_ok());
        }
    }

    #[test]
    fn test_position_of() {
        let goal = State::goal();
        assert_eq!(goal.position_of(1), Some((0, 0)));
        assert_eq!(goal.position_of(8), Some((2, 1)));
        assert_eq!(goal.position_of(9), None);
    }

    #[test]
    fn test_display_board_formatting() {
        let display = format!("{}", State::goal());
        let expected = "+---+---+---+\n\
                        | 1 | 2 | 3 |\n\
                        +---+---+---+\n\
                        | 4 | 5 | 6 |\n\
                        +---+---+---+\n\
                        | 7 | 8 |   |\n\
                        +---+---+---+";
        assert_eq!(display, expected);
    }
}
