use tracing::{debug, info, instrument};

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::log::{LogEvent, MoveLog};
use crate::rules;
use crate::state::GameState;
use crate::types::{
    GameResult, GameSnapshot, MoveReport, Outcome, PassReport, Player, Position, Score,
};

/// One game session: the rules state plus the log and the last action,
/// which is what a presentation layer renders from.
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    config: GameConfig,
    log: MoveLog,
    is_pass: bool,
    flipped: Vec<Position>,
}

impl Game {
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        Self::from_state(GameState::new(), config)
    }

    /// Starts a session from an arbitrary position.
    pub fn from_state(state: GameState, config: GameConfig) -> Self {
        let mut game = Self {
            state,
            config,
            log: MoveLog::new(config.max_log_entries),
            is_pass: false,
            flipped: Vec::new(),
        };
        game.record(LogEvent::GameStarted);
        info!(current_player = %state.current_player(), "game started");
        game.finish_if_over();
        game
    }

    /// Discards everything and returns to the starting position.
    pub fn reset(&mut self) {
        self.state = GameState::new();
        self.is_pass = false;
        self.flipped.clear();
        self.log.clear();
        self.record(LogEvent::GameStarted);
        info!("game reset");
    }

    /// Places a disc for the side to move.
    #[instrument(level = "debug", skip(self), fields(player = %self.state.current_player()))]
    pub fn attempt_move(&mut self, row: u8, col: u8) -> Result<MoveReport, GameError> {
        let player = self.state.current_player();
        let placement = Position::new(row, col)
            .and_then(|position| rules::apply_move(&self.state, position, player))
            .map_err(|err| self.reject(player, err))?;

        self.state = placement.state;
        self.is_pass = false;
        self.flipped = placement.flipped;

        let move_number = self.state.move_number() - 1;
        self.record(LogEvent::Placed {
            move_number,
            player,
            position: placement.position,
            flipped: self.flipped.len(),
        });
        debug!(move_number, position = %placement.position, "move committed");
        self.finish_if_over();

        Ok(MoveReport {
            player,
            position: placement.position,
            move_number,
            flipped: self.flipped.clone(),
            game_over: self.state.is_terminal(),
        })
    }

    /// Passes for the side to move. Refused while a legal move exists.
    #[instrument(level = "debug", skip(self), fields(player = %self.state.current_player()))]
    pub fn attempt_pass(&mut self) -> Result<PassReport, GameError> {
        let player = self.state.current_player();
        let next = rules::apply_pass(&self.state, player).map_err(|err| self.reject(player, err))?;

        self.state = next;
        self.is_pass = true;
        self.flipped.clear();

        self.record(LogEvent::Passed { player });
        debug!("pass committed");
        self.finish_if_over();

        Ok(PassReport {
            player,
            game_over: self.state.is_terminal(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        self.state.board()
    }

    pub fn current_player(&self) -> Player {
        self.state.current_player()
    }

    pub fn move_number(&self) -> u32 {
        self.state.move_number()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn log(&self) -> &MoveLog {
        &self.log
    }

    pub fn has_legal_moves_for_current(&self) -> bool {
        self.board().legal_moves(self.current_player()) != 0
    }

    pub fn legal_moves(&self) -> Vec<Position> {
        self.state.legal_moves()
    }

    pub fn score(&self) -> Score {
        self.state.score()
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn winner(&self) -> Option<Outcome> {
        self.state.winner()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let score = self.score();
        GameSnapshot {
            board: self.board().rows(),
            current_player: self.current_player(),
            move_number: self.move_number(),
            black_count: score.black,
            white_count: score.white,
            legal_moves: self.legal_moves(),
            is_game_over: self.is_terminal(),
            result: self.winner(),
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
        }
    }

    /// Final result, available once the game is over.
    pub fn result(&self) -> Option<GameResult> {
        let winner = self.winner()?;
        let score = self.score();
        Some(GameResult {
            winner,
            black_count: score.black,
            white_count: score.white,
        })
    }

    fn reject(&mut self, player: Player, err: GameError) -> GameError {
        debug!(error = %err, "command rejected");
        if self.config.log_rejections.records(&err) {
            self.record(LogEvent::Rejected {
                player,
                error: err.clone(),
            });
        }
        err
    }

    fn finish_if_over(&mut self) {
        if let Some(outcome) = self.winner() {
            let score = self.score();
            self.record(LogEvent::GameEnded { outcome, score });
            info!(%outcome, %score, "game over");
        }
    }

    fn record(&mut self, event: LogEvent) {
        if self.config.record_log {
            self.log.push(event);
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
