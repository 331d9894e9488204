use crate::engine::{State, BLANK, BOARD_SIZE, CELL_COUNT};
use crate::error::{PuzzleError, Result};

/// Converts one board character to a tile value. `0`, `.` and `_` all denote the blank.
fn parse_cell(ch: char, row: usize, col: usize) -> Result<u8> {
    match ch {
        '0' | '.' | '_' => Ok(BLANK),
        '1'..='8' => Ok(ch as u8 - b'0'),
        _ => Err(PuzzleError::InvalidCharacter {
            character: ch,
            row,
            col,
        }),
    }
}

/// Parses an array of row strings into a `State`.
///
/// Each string holds one row, top to bottom. Whitespace inside a row is ignored, so
/// `"1 2 3"` and `"123"` are equivalent.
///
/// # Errors
/// * `PuzzleError::InvalidDimensions` if there are not exactly `BOARD_SIZE` rows of
///   `BOARD_SIZE` cells.
/// * `PuzzleError::InvalidCharacter` for anything other than `0`-`8`, `.` or `_`.
/// * The validation errors of [`State::try_from_grid`] for duplicate tiles.
///
/// # Examples
/// ```
/// use eight_puzzle::utils::state_from_str_array;
/// use eight_puzzle::engine::State;
///
/// let state = state_from_str_array(&["123", "456", "78."]).unwrap();
/// assert_eq!(state, State::goal());
/// assert!(state_from_str_array(&["123", "456"]).is_err());
/// assert!(state_from_str_array(&["12X", "456", "780"]).is_err());
/// ```
pub fn state_from_str_array(rows: &[&str]) -> Result<State> {
    if rows.len() != BOARD_SIZE {
        return Err(PuzzleError::InvalidDimensions {
            expected: BOARD_SIZE,
            got: rows.len(),
        });
    }

    let mut grid = [[BLANK; BOARD_SIZE]; BOARD_SIZE];
    for (r, row) in rows.iter().enumerate() {
        let cells: Vec<char> = row.chars().filter(|ch| !ch.is_whitespace()).collect();
        if cells.len() != BOARD_SIZE {
            return Err(PuzzleError::InvalidDimensions {
                expected: BOARD_SIZE,
                got: cells.len(),
            });
        }
        for (c, &ch) in cells.iter().enumerate() {
            grid[r][c] = parse_cell(ch, r, c)?;
        }
    }
    State::try_from_grid(grid)
}

/// Parses a whole board from one string of nine cells in row-major order.
///
/// Whitespace, `,` and `/` are treated as separators and skipped, so `"123456780"`,
/// `"1,2,3,4,5,6,7,8,0"` and `"123/456/78_"` all describe the goal.
pub fn parse_state(s: &str) -> Result<State> {
    let cells: Vec<char> = s
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != ',' && *ch != '/')
        .collect();
    if cells.len() != CELL_COUNT {
        return Err(PuzzleError::InvalidDimensions {
            expected: CELL_COUNT,
            got: cells.len(),
        });
    }

    let mut values = Vec::with_capacity(CELL_COUNT);
    for (i, &ch) in cells.iter().enumerate() {
        values.push(parse_cell(ch, i / BOARD_SIZE, i % BOARD_SIZE)?);
    }
    State::try_from_slice(&values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_str_array_valid() {
        let state = state_from_str_array(&["8 6 7", "2 5 4", "3 . 1"]).unwrap();
        assert_eq!(state.tile(0, 0), 8);
        assert_eq!(state.tile(2, 1), BLANK);
        assert_eq!(state.blank_position(), (2, 1));
    }

    #[test]
    fn test_state_from_str_array_invalid_char() {
        let result = state_from_str_array(&["123", "456", "78X"]);
        assert!(matches!(
            result,
            Err(PuzzleError::InvalidCharacter {
                character: 'X',
                row: 2,
                col: 2
            })
        ));
    }

    #[test]
    fn test_state_from_str_array_nine_is_invalid() {
        let result = state_from_str_array(&["123", "456", "789"]);
        assert!(matches!(result, Err(PuzzleError::InvalidCharacter { character: '9', .. })));
    }

    #[test]
    fn test_state_from_str_array_row_too_long() {
        let result = state_from_str_array(&["1234", "567", "80."]);
        assert!(matches!(
            result,
            Err(PuzzleError::InvalidDimensions {
                expected: 3,
                got: 4
            })
        ));
    }

    #[test]
    fn test_state_from_str_array_duplicate() {
        let result = state_from_str_array(&["123", "456", "77."]);
        assert!(matches!(result, Err(PuzzleError::DuplicateTile { value: 7 })));
    }

    #[test]
    fn test_parse_state_separators() {
        let goal = State::goal();
        assert_eq!(parse_state("123456780").unwrap(), goal);
        assert_eq!(parse_state("1,2,3,4,5,6,7,8,0").unwrap(), goal);
        assert_eq!(parse_state("123/456/78_").unwrap(), goal);
        assert_eq!(parse_state(" 1 2 3\n4 5 6\n7 8 0 ").unwrap(), goal);
    }

    #[test]
    fn test_parse_state_wrong_length() {
        assert!(matches!(
            parse_state("12345678"),
            Err(PuzzleError::InvalidDimensions {
                expected: 9,
                got: 8
            })
        ));
    }
}
