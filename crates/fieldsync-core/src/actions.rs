//! Key and input types.
//!
//! Platform-agnostic definitions for the keyboard and input events a field
//! reacts to. `KeyCombo` describes a keydown chord, `InputType` describes the
//! semantic intent of an input event (browser `beforeinput`, native input
//! methods, etc.).

use smol_str::SmolStr;

/// Semantic input types from input events.
///
/// Based on the W3C Input Events `inputType` values. Only the triggers a field
/// policy distinguishes get their own variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputType {
    /// Insert typed text.
    InsertText,
    /// Insert text from IME composition.
    InsertCompositionText,
    /// Insert a line break (`<br>`, Shift+Enter).
    InsertLineBreak,
    /// Insert a paragraph break (Enter).
    InsertParagraph,
    /// Insert from paste operation.
    InsertFromPaste,
    /// Insert from drop operation.
    InsertFromDrop,
    /// Insert an ordered list.
    InsertOrderedList,
    /// Insert an unordered list.
    InsertUnorderedList,
    /// Insert a horizontal rule.
    InsertHorizontalRule,
    /// Delete content backward (Backspace).
    DeleteContentBackward,
    /// Delete content forward (Delete key).
    DeleteContentForward,
    /// Undo.
    HistoryUndo,
    /// Redo.
    HistoryRedo,
    /// Unrecognized input type.
    Unknown(String),
}

impl InputType {
    /// Whether this trigger starts a new line or structural block.
    pub fn splits_block(&self) -> bool {
        matches!(
            self,
            Self::InsertLineBreak
                | Self::InsertParagraph
                | Self::InsertOrderedList
                | Self::InsertUnorderedList
                | Self::InsertHorizontalRule
        )
    }
}

/// Key values for keyboard input.
///
/// Platform-specific code converts from native key events to this enum.
/// Keys no policy cares about collapse into `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A character key, lowercased for letters.
    Character(SmolStr),
    Backspace,
    Delete,
    Enter,
    Tab,
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Alt,
    Control,
    Meta,
    Shift,
    /// Anything else, with its raw name.
    Other(SmolStr),
}

impl Key {
    /// Create a character key. Letters are normalized to lowercase so that
    /// Shift+K and K compare equal on the key part.
    pub fn character(s: impl Into<SmolStr>) -> Self {
        let s: SmolStr = s.into();
        if s.chars().any(|c| c.is_uppercase()) {
            Self::Character(SmolStr::new(s.to_lowercase()))
        } else {
            Self::Character(s)
        }
    }

    /// Check if this is a modifier key.
    pub fn is_modifier(&self) -> bool {
        matches!(self, Self::Alt | Self::Control | Self::Meta | Self::Shift)
    }
}

/// Modifier key state for a key combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        alt: false,
        shift: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        ctrl: false,
        alt: false,
        shift: true,
        meta: false,
    };

    pub const META: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: true,
    };

    /// Get the primary modifier for the platform (Cmd on Mac, Ctrl elsewhere).
    pub fn primary(is_mac: bool) -> Self {
        if is_mac { Self::META } else { Self::CTRL }
    }

    /// True if any of ctrl/alt/meta is held. Shift alone does not count.
    pub fn any_command(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// A key combination for triggering an action.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn ctrl(key: Key) -> Self {
        Self::with_modifiers(key, Modifiers::CTRL)
    }

    pub fn shift(key: Key) -> Self {
        Self::with_modifiers(key, Modifiers::SHIFT)
    }

    pub fn primary(key: Key, is_mac: bool) -> Self {
        Self::with_modifiers(key, Modifiers::primary(is_mac))
    }

    /// Whether this combo is `key` pressed with the platform primary modifier
    /// and nothing else.
    pub fn is_primary(&self, key: &Key, is_mac: bool) -> bool {
        self.key == *key && self.modifiers == Modifiers::primary(is_mac)
    }
}

/// Result of handling a keydown or input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeydownResult {
    /// Event was handled, prevent default.
    Handled,
    /// Event was not ours, let the engine or platform handle it.
    NotHandled,
}

impl KeydownResult {
    pub fn prevent_default(self) -> bool {
        matches!(self, Self::Handled)
    }
}
