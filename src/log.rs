use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;
use web_time::Instant;

use crate::error::GameError;
use crate::types::{Outcome, Player, Position, Score};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LogEvent {
    GameStarted,
    #[serde(rename_all = "camelCase")]
    Placed {
        move_number: u32,
        player: Player,
        position: Position,
        flipped: usize,
    },
    Passed {
        player: Player,
    },
    Rejected {
        player: Player,
        error: GameError,
    },
    GameEnded {
        outcome: Outcome,
        score: Score,
    },
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEvent::GameStarted => f.write_str("Game started"),
            LogEvent::Placed {
                move_number,
                player,
                position,
                flipped,
            } => write!(f, "{move_number}. {player}: {position} ({flipped} flipped)"),
            LogEvent::Passed { player } => write!(f, "{player} passed"),
            LogEvent::Rejected { error, .. } => write!(f, "Rejected: {error}"),
            LogEvent::GameEnded { outcome, score } => write!(f, "Game over: {outcome} ({score})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Milliseconds since the game started.
    pub elapsed_ms: u64,
    pub event: LogEvent,
}

#[derive(Debug, Clone)]
pub struct MoveLog {
    started: Instant,
    entries: VecDeque<LogEntry>,
    capacity: Option<usize>,
}

impl MoveLog {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            started: Instant::now(),
            entries: VecDeque::new(),
            capacity,
        }
    }

    pub fn push(&mut self, event: LogEvent) {
        if self.capacity == Some(0) {
            return;
        }
        if let Some(capacity) = self.capacity
            && self.entries.len() >= capacity
        {
            self.entries.pop_front();
        }

        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        self.entries.push_back(LogEntry { elapsed_ms, event });
    }

    /// Drops every entry and restarts the clock.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.started = Instant::now();
    }

    pub fn entries(&self) -> impl ExactSizeIterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn to_vec(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }
}

impl Default for MoveLog {
    fn default() -> Self {
        Self::new(None)
    }
}
