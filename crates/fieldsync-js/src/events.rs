//! Event handlers exposed to JavaScript.
//!
//! The hook forwards `keydown` and `beforeinput` from the editable element;
//! the return value says whether to call preventDefault.

use fieldsync_browser::{WindowPrompt, parse_browser_input_type, parse_browser_key};
use fieldsync_core::{KeyCombo, KeydownResult, Modifiers};
use wasm_bindgen::prelude::*;

use crate::session::JsFieldSession;

/// Result of handling an event.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was handled, call preventDefault.
    Handled,
    /// Event should pass through to the engine and browser.
    PassThrough,
}

impl From<KeydownResult> for EventResult {
    fn from(r: KeydownResult) -> Self {
        match r {
            KeydownResult::Handled => EventResult::Handled,
            KeydownResult::NotHandled => EventResult::PassThrough,
        }
    }
}

#[wasm_bindgen]
impl JsFieldSession {
    // === Event handlers ===

    /// Handle keydown event.
    ///
    /// Returns whether to preventDefault.
    #[wasm_bindgen(js_name = handleKeydown)]
    pub fn handle_keydown(
        &self,
        key: &str,
        ctrl: bool,
        alt: bool,
        shift: bool,
        meta: bool,
    ) -> EventResult {
        let combo = KeyCombo::with_modifiers(
            parse_browser_key(key),
            Modifiers {
                ctrl,
                alt,
                shift,
                meta,
            },
        );
        self.session.handle_keydown(&combo, &WindowPrompt).into()
    }

    /// Handle beforeinput event.
    ///
    /// Returns whether to preventDefault.
    #[wasm_bindgen(js_name = handleBeforeInput)]
    pub fn handle_before_input(&self, input_type: &str) -> EventResult {
        self.session
            .handle_input(&parse_browser_input_type(input_type))
            .into()
    }
}
