//! The 3x3 board.

use crate::types::Player;

use super::error::GameError;

/// The eight winning lines: rows, columns, diagonals.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A 3x3 board, cells in row-major order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Player>; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the mark in the given cell, if any.
    pub fn get(&self, cell: usize) -> Option<Player> {
        self.cells.get(cell).copied().flatten()
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> [Option<Player>; 9] {
        self.cells
    }

    /// Places the player's mark in the given cell (0-8).
    pub fn place(&mut self, cell: usize, player: Player) -> Result<(), GameError> {
        if cell >= 9 {
            return Err(GameError::OutOfBounds(cell));
        }
        if self.cells[cell].is_some() {
            return Err(GameError::CellTaken(cell));
        }
        self.cells[cell] = Some(player);
        Ok(())
    }

    /// Removes all marks.
    pub fn clear(&mut self) {
        self.cells = [None; 9];
    }

    /// Returns true when every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Returns the completed line and its owner, if any.
    pub fn winning_line(&self) -> Option<(Player, [usize; 3])> {
        WIN_LINES.iter().find_map(|&line| {
            let [a, b, c] = line;
            match (self.cells[a], self.cells[b], self.cells[c]) {
                (Some(first), Some(second), Some(third)) if first == second && second == third => {
                    Some((first, line))
                }
                _ => None,
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
