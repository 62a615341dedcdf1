use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Which refused commands make it into the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RejectionLog {
    None,
    /// Only a pass refused because a legal move exists.
    #[default]
    Passes,
    All,
}

impl RejectionLog {
    pub fn records(self, err: &GameError) -> bool {
        match self {
            RejectionLog::None => false,
            RejectionLog::Passes => matches!(err, GameError::IllegalPass { .. }),
            RejectionLog::All => true,
        }
    }
}

/// Session options. None of them change the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Keep a linear log of the game.
    pub record_log: bool,
    /// Upper bound on retained log entries; oldest entries go first.
    pub max_log_entries: Option<usize>,
    pub log_rejections: RejectionLog,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            record_log: true,
            max_log_entries: None,
            log_rejections: RejectionLog::Passes,
        }
    }
}
