use tracing::debug;

use crate::board::{self, Board};
use crate::error::{GameError, MoveRejection};
use crate::state::GameState;
use crate::types::{Cell, Outcome, Player, Position, Score};

/// A committed placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub state: GameState,
    pub player: Player,
    pub position: Position,
    /// Discs turned over by the placement, row-major.
    pub flipped: Vec<Position>,
}

/// Every empty square where `player` would flip at least one disc, row-major.
pub fn legal_moves(board: &Board, player: Player) -> Vec<Position> {
    board::positions(board.legal_moves(player))
}

pub fn is_legal_move(board: &Board, position: Position, player: Player) -> bool {
    board.flips(position, player) != 0
}

/// Discs that would flip if `player` placed at `position`. Empty when the
/// square is occupied or brackets nothing.
pub fn flippable_lines(board: &Board, position: Position, player: Player) -> Vec<Position> {
    board::positions(board.flips(position, player))
}

pub fn score(board: &Board) -> Score {
    board.count()
}

/// True when neither side has a legal move.
pub fn is_terminal(board: &Board) -> bool {
    board.legal_moves(Player::Black) == 0 && board.legal_moves(Player::White) == 0
}

/// Result by disc count, whether or not the game has ended.
pub fn outcome(board: &Board) -> Outcome {
    score(board).leader()
}

/// Places a disc for `player`, flipping every bracketed run.
///
/// The input state is never modified; on success the returned
/// [`Placement`] carries the successor state.
pub fn apply_move(
    state: &GameState,
    position: Position,
    player: Player,
) -> Result<Placement, GameError> {
    if state.is_terminal() {
        return Err(GameError::GameOver);
    }
    if state.board.cell(position) != Cell::Empty {
        return Err(GameError::IllegalMove {
            position,
            reason: MoveRejection::Occupied,
        });
    }

    let mut board = state.board;
    let flips = board.place(position, player);
    if flips == 0 {
        return Err(GameError::IllegalMove {
            position,
            reason: MoveRejection::NoFlips,
        });
    }
    if player != state.current_player {
        return Err(GameError::OutOfTurn {
            player,
            expected: state.current_player,
        });
    }

    let flipped = board::positions(flips);
    debug!(%player, %position, flipped = flipped.len(), "placement resolved");

    Ok(Placement {
        state: GameState::committed(board, player.opponent(), state.move_number + 1),
        player,
        position,
        flipped,
    })
}

/// Hands the turn to the opponent. Only allowed when `player` has no
/// legal move; the move counter is unchanged.
pub fn apply_pass(state: &GameState, player: Player) -> Result<GameState, GameError> {
    if state.is_terminal() {
        return Err(GameError::GameOver);
    }
    if state.board.legal_moves(player) != 0 {
        return Err(GameError::IllegalPass { player });
    }
    if player != state.current_player {
        return Err(GameError::OutOfTurn {
            player,
            expected: state.current_player,
        });
    }

    Ok(GameState::committed(
        state.board,
        player.opponent(),
        state.move_number,
    ))
}
