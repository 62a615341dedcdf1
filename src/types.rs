use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::GameError;

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

const COLUMN_LABELS: &[u8; BOARD_SIZE] = b"ABCDEFGH";

/// Contents of one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    Empty,
    Black,
    White,
}

/// One of the two sides. Black moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    #[default]
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    pub fn to_cell(self) -> Cell {
        match self {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => f.write_str("Black"),
            Player::White => f.write_str("White"),
        }
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Creates a position, rejecting coordinates outside the 8x8 grid.
    pub fn new(row: u8, col: u8) -> Result<Self, GameError> {
        if row as usize >= BOARD_SIZE || col as usize >= BOARD_SIZE {
            return Err(GameError::OutOfBounds { row, col });
        }
        Ok(Self { row, col })
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// Row-major square index (0..=63).
    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    /// Caller contract: `index < 64`.
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < NUM_SQUARES);
        Self {
            row: (index / BOARD_SIZE) as u8,
            col: (index % BOARD_SIZE) as u8,
        }
    }

    pub(crate) fn bit(self) -> u64 {
        1u64 << self.index()
    }
}

/// Column letter then 1-based row, e.g. `D3` for row 2, col 3.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let col = COLUMN_LABELS[self.col as usize] as char;
        write!(f, "{col}{}", self.row + 1)
    }
}

impl FromStr for Position {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GameError::InvalidNotation {
            notation: s.to_string(),
        };

        let mut chars = s.trim().chars();
        let col_char = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
        let row_char = chars.next().ok_or_else(invalid)?;
        if chars.next().is_some() {
            return Err(invalid());
        }

        let col = COLUMN_LABELS
            .iter()
            .position(|&label| label as char == col_char)
            .ok_or_else(invalid)?;
        let row = row_char.to_digit(10).ok_or_else(invalid)?;
        if !(1..=BOARD_SIZE as u32).contains(&row) {
            return Err(invalid());
        }

        Position::new((row - 1) as u8, col as u8)
    }
}

/// Final (or prospective) result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Black,
    White,
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Black => f.write_str("Black wins"),
            Outcome::White => f.write_str("White wins"),
            Outcome::Draw => f.write_str("Draw"),
        }
    }
}

/// Disc counts per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Score {
    pub black: u8,
    pub white: u8,
}

impl Score {
    pub fn empty(self) -> u8 {
        NUM_SQUARES as u8 - self.black - self.white
    }

    /// Higher count wins; equal counts draw.
    pub fn leader(self) -> Outcome {
        match self.black.cmp(&self.white) {
            std::cmp::Ordering::Greater => Outcome::Black,
            std::cmp::Ordering::Less => Outcome::White,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.black, self.white)
    }
}

/// Result of a committed placement, returned to the presentation layer
/// for animation and logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveReport {
    pub player: Player,
    pub position: Position,
    pub move_number: u32,
    pub flipped: Vec<Position>,
    pub game_over: bool,
}

/// Result of a committed pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassReport {
    pub player: Player,
    pub game_over: bool,
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    pub current_player: Player,
    pub move_number: u32,
    pub black_count: u8,
    pub white_count: u8,
    pub legal_moves: Vec<Position>,
    pub is_game_over: bool,
    pub result: Option<Outcome>,
    /// Contract:
    /// - `true` when the previous action was a pass.
    /// - `false` after a placement or on a fresh game.
    pub is_pass: bool,
    /// Contract:
    /// - Placement: positions flipped by that placement.
    /// - Pass or fresh game: empty.
    pub flipped: Vec<Position>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub winner: Outcome,
    pub black_count: u8,
    pub white_count: u8,
}
