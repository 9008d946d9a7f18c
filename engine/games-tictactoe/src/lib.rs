//! TicTacToe domain for the MCTS engine
//!
//! This crate provides a reference implementation of the [`Domain`] trait:
//! the board is the search state, and the actor is the player whose wins
//! are counted.
//!
//! # Usage
//!
//! ```rust
//! use games_tictactoe::{Board, Player, TicTacToe};
//! use mcts::{MctsConfig, MctsSearch};
//!
//! let config = MctsConfig::default().with_iterations(200);
//! let mut search = MctsSearch::with_seed(TicTacToe, Board::new(), Player::O, config, 42);
//! search.run().unwrap();
//!
//! // X opens in the center
//! let opening = Board::new().place(4).unwrap();
//! search.commit_move(&opening).unwrap();
//! ```

use std::fmt;
use std::str::FromStr;

use mcts::{Domain, DomainError};
use serde::{Deserialize, Serialize};

/// Winning positions (rows, columns, diagonals)
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// A TicTacToe player. X always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Player {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "X" | "x" => Ok(Player::X),
            "O" | "o" => Ok(Player::O),
            other => Err(DomainError::InvalidState(format!(
                "unknown player '{}', expected X or O",
                other
            ))),
        }
    }
}

/// TicTacToe board
///
/// Positions are numbered 0-8, row by row from the top left. The player to
/// move is not stored; it is inferred from the piece counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [Option<Player>; 9],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self { cells: [None; 9] }
    }

    /// Piece at `position`, or None when empty or off the board
    pub fn cell(&self, position: u8) -> Option<Player> {
        self.cells.get(position as usize).copied().flatten()
    }

    /// Number of pieces `player` has on the board
    pub fn count(&self, player: Player) -> usize {
        self.cells.iter().filter(|&&cell| cell == Some(player)).count()
    }

    /// Number of moves played so far
    pub fn moves_played(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Player to move next: X unless X already has more pieces than O
    pub fn to_move(&self) -> Player {
        if self.count(Player::X) <= self.count(Player::O) {
            Player::X
        } else {
            Player::O
        }
    }

    /// Owner of a completed line, if any
    pub fn winner(&self) -> Option<Player> {
        LINES.iter().find_map(|&[a, b, c]| {
            let owner = self.cells[a]?;
            (self.cells[b] == Some(owner) && self.cells[c] == Some(owner)).then_some(owner)
        })
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Check if the game is over (a line is complete or the board is full)
    pub fn is_done(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Get legal moves (empty positions), none once the game is over
    pub fn legal_moves(&self) -> Vec<u8> {
        if self.is_done() {
            return Vec::new();
        }

        (0..9u8)
            .filter(|&pos| self.cells[pos as usize].is_none())
            .collect()
    }

    /// Bit-mask representation of legal moves.
    ///
    /// Bits 0-8 correspond to board positions 0-8. When the game is finished
    /// the mask is zeroed.
    pub fn legal_moves_mask(&self) -> u16 {
        self.legal_moves()
            .into_iter()
            .fold(0u16, |mask, pos| mask | (1u16 << pos))
    }

    /// Place the next player's piece at `position` and return the new board
    pub fn place(&self, position: u8) -> Result<Board, DomainError> {
        if self.is_done() {
            return Err(DomainError::InvalidState(
                "game is already over".to_string(),
            ));
        }
        if position >= 9 {
            return Err(DomainError::InvalidState(format!(
                "position {} is off the board",
                position
            )));
        }
        if self.cells[position as usize].is_some() {
            return Err(DomainError::InvalidState(format!(
                "position {} is already taken",
                position
            )));
        }

        let mut next = *self;
        next.cells[position as usize] = Some(self.to_move());
        Ok(next)
    }

    /// Board with `player` written at `position`, ignoring turn order.
    /// Useful for setting up positions.
    pub fn with_cell(mut self, position: u8, player: Option<Player>) -> Board {
        if let Some(cell) = self.cells.get_mut(position as usize) {
            *cell = player;
        }
        self
    }

    /// Position that differs between `self` and `next`, when `next` is
    /// `self` with exactly one piece added.
    pub fn move_to(&self, next: &Board) -> Option<u8> {
        let mut changed =
            (0..9u8).filter(|&pos| self.cells[pos as usize] != next.cells[pos as usize]);
        let position = changed.next()?;
        let single = changed.next().is_none();
        (single && self.cells[position as usize].is_none()).then_some(position)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for cell in cells {
                write!(f, "{}", cell.map_or('.', Player::symbol))?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = DomainError;

    /// Parse nine cells written as `X`, `O` and `.`; whitespace and `|` are
    /// ignored, so both "X.O......" and the `Display` output parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [None; 9];
        let mut count = 0;

        for ch in s.chars().filter(|c| !c.is_whitespace() && *c != '|') {
            if count == 9 {
                return Err(DomainError::InvalidState(format!(
                    "board '{}' has more than nine cells",
                    s
                )));
            }
            cells[count] = match ch {
                'X' | 'x' => Some(Player::X),
                'O' | 'o' => Some(Player::O),
                '.' | '_' | '-' => None,
                other => {
                    return Err(DomainError::InvalidState(format!(
                        "unexpected cell '{}'",
                        other
                    )))
                }
            };
            count += 1;
        }

        if count != 9 {
            return Err(DomainError::InvalidState(format!(
                "board '{}' has {} cells, expected nine",
                s, count
            )));
        }

        Ok(Board { cells })
    }
}

/// TicTacToe rules as an MCTS domain
#[derive(Debug, Clone, Copy, Default)]
pub struct TicTacToe;

impl Domain for TicTacToe {
    type State = Board;
    type Actor = Player;

    fn successors(&self, board: &Board) -> Result<Vec<Board>, DomainError> {
        board
            .legal_moves()
            .into_iter()
            .map(|pos| board.place(pos))
            .collect()
    }

    fn is_win(&self, board: &Board, actor: &Player) -> Result<bool, DomainError> {
        Ok(board.winner() == Some(*actor))
    }
}

#[cfg(test)]
mod tests;
