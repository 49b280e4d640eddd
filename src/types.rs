//! Newtype wrappers for board coordinates and value-table keys.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tictactoe::Cell;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// A (row, column) coordinate identifying a cell to mark, 0-indexed.
///
/// Fields are private so every `Action` in circulation is in range; use
/// [`Action::new`] to build one from untrusted coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Action {
    row: usize,
    col: usize,
}

impl Action {
    /// The full, fixed action space in row-major order.
    ///
    /// Greedy selection breaks ties by the first action encountered in this
    /// order, so it must never be reordered.
    pub const ALL: [Action; CELL_COUNT] = [
        Action::at(0, 0),
        Action::at(0, 1),
        Action::at(0, 2),
        Action::at(1, 0),
        Action::at(1, 1),
        Action::at(1, 2),
        Action::at(2, 0),
        Action::at(2, 1),
        Action::at(2, 2),
    ];

    /// Board center.
    pub const CENTER: Action = Action::at(1, 1);

    pub(crate) const fn at(row: usize, col: usize) -> Self {
        Action { row, col }
    }

    /// Create an action, validating both coordinates are within the board.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if `row` or `col` is >= 3.
    pub fn new(row: usize, col: usize) -> Result<Self, crate::Error> {
        if row < 3 && col < 3 {
            Ok(Action { row, col })
        } else {
            Err(crate::Error::OutOfBounds { row, col })
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Row-major flat index (0-8).
    pub fn index(&self) -> usize {
        self.row * 3 + self.col
    }

    /// Inverse of [`Action::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        Action::ALL.get(index).copied()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Flattened row-major board contents, one symbol per cell (`-`, `X`, `O`).
///
/// Used as the lookup key into value tables. Boards with identical cells
/// always produce identical keys; rotations and reflections are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StateKey(String);

impl StateKey {
    /// Parse a state key, rejecting wrong lengths and unknown symbols.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidKeyLength`] unless the key has exactly
    /// nine characters, and [`crate::Error::InvalidKeyCharacter`] for any
    /// character other than `-`, `X` or `O`.
    pub fn parse(key: &str) -> Result<Self, crate::Error> {
        let got = key.chars().count();
        if got != CELL_COUNT {
            return Err(crate::Error::InvalidKeyLength {
                expected: CELL_COUNT,
                got,
                key: key.to_string(),
            });
        }

        if let Some((position, character)) = key
            .chars()
            .enumerate()
            .find(|&(_, c)| !matches!(c, '-' | 'X' | 'O'))
        {
            return Err(crate::Error::InvalidKeyCharacter {
                character,
                position,
                key: key.to_string(),
            });
        }

        Ok(StateKey(key.to_string()))
    }

    /// Key of the empty board.
    pub fn empty() -> Self {
        StateKey("-".repeat(CELL_COUNT))
    }

    pub(crate) fn from_cells(cells: &[Cell; CELL_COUNT]) -> Self {
        StateKey(cells.iter().map(|&c| c.to_char()).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Contents of the cell addressed by `action`.
    pub fn cell(&self, action: Action) -> Cell {
        // Keys are validated ASCII, so byte indexing is exact.
        Cell::from_char(self.0.as_bytes()[action.index()] as char).unwrap_or(Cell::Empty)
    }

    /// Actions whose cell is empty, in row-major order.
    pub fn legal_actions(&self) -> Vec<Action> {
        Action::ALL
            .into_iter()
            .filter(|&action| self.cell(action) == Cell::Empty)
            .collect()
    }
}

impl TryFrom<String> for StateKey {
    type Error = crate::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        StateKey::parse(&value)
    }
}

impl From<StateKey> for String {
    fn from(key: StateKey) -> Self {
        key.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
