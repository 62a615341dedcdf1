use std::fmt;

use serde::Serialize;

use crate::types::{Player, Position};

/// Why a placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MoveRejection {
    /// The target square already holds a disc.
    Occupied,
    /// No opposing run is bracketed from the target square.
    NoFlips,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveRejection::Occupied => f.write_str("square is occupied"),
            MoveRejection::NoFlips => f.write_str("no discs would flip"),
        }
    }
}

/// Rejections reported by the engine.
///
/// Every variant is a local, recoverable refusal: the state that produced
/// it is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GameError {
    #[error("illegal move at {position}: {reason}")]
    IllegalMove {
        position: Position,
        reason: MoveRejection,
    },

    #[error("{player} cannot pass while a legal move exists")]
    IllegalPass { player: Player },

    #[error("game is already over")]
    GameOver,

    #[error("it is {expected}'s turn, not {player}'s")]
    OutOfTurn { player: Player, expected: Player },

    #[error("row/col out of range: ({row}, {col})")]
    OutOfBounds { row: u8, col: u8 },

    #[error("invalid board: {reason}")]
    InvalidBoard { reason: &'static str },

    #[error("invalid position notation: {notation:?}")]
    InvalidNotation { notation: String },
}
