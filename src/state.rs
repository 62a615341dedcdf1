use crate::board::Board;
use crate::rules;
use crate::types::{Outcome, Player, Position, Score};

/// Whether play continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InProgress,
    /// Neither side can move. Absorbing until the game is reset.
    Terminal(Outcome),
}

/// Complete rules-level state of one game.
///
/// A `GameState` is a plain value: transitions in [`rules`] return a new
/// state and never touch the one they were given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) current_player: Player,
    pub(crate) move_number: u32,
    pub(crate) status: Status,
}

impl GameState {
    /// Standard starting position, Black to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::Black,
            move_number: 1,
            status: Status::InProgress,
        }
    }

    /// Builds a state around an arbitrary board with `current_player` to
    /// move. The move counter starts at 1 and terminal status is evaluated
    /// right away.
    pub fn from_position(board: Board, current_player: Player) -> Self {
        Self {
            board,
            current_player,
            move_number: 1,
            status: evaluate_status(&board),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.status, Status::Terminal(_))
    }

    /// Final outcome, or `None` while the game is still in progress.
    pub fn winner(&self) -> Option<Outcome> {
        match self.status {
            Status::Terminal(outcome) => Some(outcome),
            Status::InProgress => None,
        }
    }

    /// Legal moves for the side to move.
    pub fn legal_moves(&self) -> Vec<Position> {
        rules::legal_moves(&self.board, self.current_player)
    }

    pub fn score(&self) -> Score {
        rules::score(&self.board)
    }

    /// Successor state for an already validated board change; status is
    /// re-evaluated against both players.
    pub(crate) fn committed(board: Board, next_player: Player, move_number: u32) -> Self {
        Self {
            board,
            current_player: next_player,
            move_number,
            status: evaluate_status(&board),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

fn evaluate_status(board: &Board) -> Status {
    if rules::is_terminal(board) {
        Status::Terminal(rules::outcome(board))
    } else {
        Status::InProgress
    }
}
