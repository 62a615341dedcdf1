use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::Game;

/// A game session handed to JavaScript.
///
/// Values are returned as plain JS objects; refusals are thrown as
/// `{ kind, ... }` objects mirroring [`GameError`].
#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame { game: Game::new() }
    }

    /// Accepts a partial `GameConfig` object; missing fields use defaults.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<WasmGame, JsValue> {
        let config: GameConfig = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(WasmGame {
            game: Game::with_config(config),
        })
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.game.snapshot())
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        to_js(&self.game.legal_moves())
    }

    pub fn score(&self) -> Result<JsValue, JsValue> {
        to_js(&self.game.score())
    }

    #[wasm_bindgen(js_name = isTerminal)]
    pub fn is_terminal(&self) -> bool {
        self.game.is_terminal()
    }

    /// `null` while the game is in progress.
    pub fn result(&self) -> Result<JsValue, JsValue> {
        match self.game.result() {
            Some(result) => to_js(&result),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = attemptMove)]
    pub fn attempt_move(&mut self, row: u8, col: u8) -> Result<JsValue, JsValue> {
        let report = self.game.attempt_move(row, col).map_err(error_to_js)?;
        to_js(&report)
    }

    #[wasm_bindgen(js_name = attemptPass)]
    pub fn attempt_pass(&mut self) -> Result<JsValue, JsValue> {
        let report = self.game.attempt_pass().map_err(error_to_js)?;
        to_js(&report)
    }

    pub fn reset(&mut self) {
        self.game.reset();
    }

    pub fn log(&self) -> Result<JsValue, JsValue> {
        to_js(&self.game.log().to_vec())
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn error_to_js(err: GameError) -> JsValue {
    serde_wasm_bindgen::to_value(&err).unwrap_or_else(|_| JsValue::from_str(&err.to_string()))
}
