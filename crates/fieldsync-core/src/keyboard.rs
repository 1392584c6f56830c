//! Keyboard policy per field kind.
//!
//! Single-line fields swallow everything that would split the document into
//! a second block. The multi-line body leaves the engine's defaults alone and
//! binds Mod+Shift+K to a link editor.

use crate::actions::{InputType, Key, KeyCombo, KeydownResult, Modifiers};
use crate::error::EngineError;
use crate::field::PolicyKind;
use crate::platform::{EditingEngine, Prompt};

/// Custom actions a policy can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomAction {
    /// Prompt for a URL and set or clear the link on the selection.
    EditLink,
}

/// What a policy decides for a key combination or input trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Prevent the default and do nothing.
    Suppress,
    /// Let the engine's own handling run.
    Delegate,
    /// Prevent the default and run a custom action.
    Custom(CustomAction),
}

/// Static keyboard policy for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardPolicy {
    kind: PolicyKind,
    is_mac: bool,
}

impl KeyboardPolicy {
    pub fn new(kind: PolicyKind, is_mac: bool) -> Self {
        Self { kind, is_mac }
    }

    pub fn kind(&self) -> PolicyKind {
        self.kind
    }

    /// Decide a keydown chord.
    pub fn key_outcome(&self, combo: &KeyCombo) -> KeyOutcome {
        match self.kind {
            PolicyKind::SingleLine => {
                if combo.key == Key::Enter && !combo.modifiers.alt {
                    KeyOutcome::Suppress
                } else {
                    KeyOutcome::Delegate
                }
            }
            PolicyKind::MultiLine => {
                if *combo == self.link_chord() {
                    KeyOutcome::Custom(CustomAction::EditLink)
                } else {
                    KeyOutcome::Delegate
                }
            }
        }
    }

    /// Decide an input trigger.
    pub fn input_outcome(&self, input: &InputType) -> KeyOutcome {
        match self.kind {
            PolicyKind::SingleLine if input.splits_block() => KeyOutcome::Suppress,
            _ => KeyOutcome::Delegate,
        }
    }

    /// The chords this policy binds, for hosts that register shortcuts up front.
    pub fn bound_chords(&self) -> Vec<KeyCombo> {
        match self.kind {
            PolicyKind::SingleLine => vec![
                KeyCombo::new(Key::Enter),
                KeyCombo::shift(Key::Enter),
                KeyCombo::primary(Key::Enter, self.is_mac),
            ],
            PolicyKind::MultiLine => vec![self.link_chord()],
        }
    }

    fn link_chord(&self) -> KeyCombo {
        KeyCombo::with_modifiers(
            Key::character("k"),
            Modifiers {
                shift: true,
                ..Modifiers::primary(self.is_mac)
            },
        )
    }
}

/// Run a custom action against the engine.
///
/// Always reports `Handled`, including when the prompt is cancelled.
pub fn run_custom_action<E: EditingEngine>(
    action: CustomAction,
    engine: &E,
    prompt: &dyn Prompt,
) -> KeydownResult {
    match action {
        CustomAction::EditLink => {
            if let Err(e) = edit_link(engine, prompt) {
                tracing::warn!("link edit failed: {e}");
            }
        }
    }
    KeydownResult::Handled
}

fn edit_link<E: EditingEngine>(engine: &E, prompt: &dyn Prompt) -> Result<(), EngineError> {
    let current = engine.link_href().unwrap_or_default();
    let Some(url) = prompt.prompt("URL", &current) else {
        return Ok(());
    };
    let url = url.trim();
    if url.is_empty() {
        engine.unset_link()
    } else {
        engine.set_link(url)
    }
}
