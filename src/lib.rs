use wasm_bindgen::prelude::*;

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod log;
pub mod rules;
pub mod state;
pub mod types;
mod wasm;

pub use board::Board;
pub use config::{GameConfig, RejectionLog};
pub use error::{GameError, MoveRejection};
pub use game::Game;
pub use state::{GameState, Status};
pub use types::{Cell, Outcome, Player, Position, Score};
pub use wasm::WasmGame;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
