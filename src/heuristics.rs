use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::engine::{State, BLANK};

/// Estimates of the number of moves left between a state and the goal.
///
/// Both informed variants are admissible and consistent, return 0 on the goal itself
/// and never go negative, which is what A* needs to return optimal paths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    /// Always 0. Only meaningful for the uninformed algorithms.
    #[default]
    None,
    /// Number of non-blank tiles not on their goal cell.
    Misplaced,
    /// Sum of each non-blank tile's grid distance to its goal cell.
    Manhattan,
}

impl Heuristic {
    /// Every variant, in the order they are listed on the command line.
    pub const ALL: [Heuristic; 3] = [Heuristic::None, Heuristic::Misplaced, Heuristic::Manhattan];

    /// Evaluates this heuristic for `state` against `goal`.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle::engine::State;
    /// use eight_puzzle::heuristics::Heuristic;
    /// let goal = State::goal();
    /// assert_eq!(Heuristic::Manhattan.evaluate(&goal, &goal), 0);
    /// ```
    pub fn evaluate(self, state: &State, goal: &State) -> u32 {
        match self {
            Heuristic::None => 0,
            Heuristic::Misplaced => misplaced_tiles(state, goal),
            Heuristic::Manhattan => manhattan_distance(state, goal),
        }
    }

    /// Whether this heuristic carries any information about the goal.
    pub fn is_informed(self) -> bool {
        self != Heuristic::None
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Heuristic::None => "none",
            Heuristic::Misplaced => "misplaced",
            Heuristic::Manhattan => "manhattan",
        };
        f.write_str(name)
    }
}

/// Counts the non-blank cells whose value differs from the goal's value at that cell.
///
/// The blank is excluded; counting it would overestimate by one on states a single
/// slide away from the goal.
pub fn misplaced_tiles(state: &State, goal: &State) -> u32 {
    state
        .cells()
        .filter(|&(r, c, v)| v != BLANK && v != goal.tile(r, c))
        .count() as u32
}

/// Sums, over the non-blank tiles, `|row - goal_row| + |col - goal_col|`.
///
/// Dominates [`misplaced_tiles`]: every misplaced tile contributes at least 1.
pub fn manhattan_distance(state: &State, goal: &State) -> u32 {
    state
        .cells()
        .filter(|&(_, _, v)| v != BLANK)
        .map(|(r, c, v)| {
            // Both states hold the same permutation of tiles, so the lookup always succeeds.
            let (gr, gc) = goal.position_of(v).unwrap_or((r, c));
            (r.abs_diff(gr) + c.abs_diff(gc)) as u32
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(grid: [[u8; 3]; 3]) -> State {
        State::try_from_grid(grid).unwrap()
    }

    #[test]
    fn test_zero_on_goal() {
        let goal = State::goal();
        for heuristic in Heuristic::ALL {
            assert_eq!(heuristic.evaluate(&goal, &goal), 0, "{} not zero on goal", heuristic);
        }
    }

    #[test]
    fn test_none_is_always_zero() {
        let s = state([[8, 6, 7], [2, 5, 4], [3, 0, 1]]);
        assert_eq!(Heuristic::None.evaluate(&s, &State::goal()), 0);
        assert!(!Heuristic::None.is_informed());
        assert!(Heuristic::Manhattan.is_informed());
    }

    #[test]
    fn test_one_move_away() {
        let s = state([[1, 2, 3], [4, 5, 0], [7, 8, 6]]);
        let goal = State::goal();
        assert_eq!(misplaced_tiles(&s, &goal), 1);
        assert_eq!(manhattan_distance(&s, &goal), 1);
    }

    #[test]
    fn test_manhattan_known_value() {
        let s = state([[8, 2, 3], [4, 5, 6], [7, 1, 0]]);
        let goal = State::goal();
        assert_eq!(misplaced_tiles(&s, &goal), 2);
        // 8: (0,0) -> (2,1) = 3, 1: (2,1) -> (0,0) = 3.
        assert_eq!(manhattan_distance(&s, &goal), 6);
    }

    #[test]
    fn test_manhattan_dominates_misplaced() {
        let goal = State::goal();
        for seed in 0..100 {
            let s = State::random_with_seed(seed);
            assert!(manhattan_distance(&s, &goal) >= misplaced_tiles(&s, &goal));
        }
    }

    #[test]
    fn test_custom_goal() {
        let goal = state([[0, 1, 2], [3, 4, 5], [6, 7, 8]]);
        assert_eq!(Heuristic::Manhattan.evaluate(&goal, &goal), 0);
        let s = goal.apply_move(crate::engine::Move::Right).unwrap();
        assert_eq!(Heuristic::Manhattan.evaluate(&s, &goal), 1);
        assert_eq!(Heuristic::Misplaced.evaluate(&s, &goal), 1);
    }

    #[test]
    fn test_consistency_across_single_slides() {
        // |h(a) - h(b)| <= 1 for neighbouring states keeps A* first-pop optimal.
        let goal = State::goal();
        for seed in 0..50 {
            let s = State::random_with_seed(seed);
            for (_, next) in s.successors() {
                for heuristic in [Heuristic::Misplaced, Heuristic::Manhattan] {
                    let a = heuristic.evaluate(&s, &goal) as i64;
                    let b = heuristic.evaluate(&next, &goal) as i64;
                    assert!((a - b).abs() <= 1);
                }
            }
        }
    }
}
