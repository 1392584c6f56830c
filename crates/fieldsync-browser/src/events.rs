//! Browser event parsing.
//!
//! Converts `KeyboardEvent` and `beforeinput` values into the core's key
//! and input types.

use fieldsync_core::{InputType, Key, KeyCombo, Modifiers};
use smol_str::SmolStr;

/// Parse a browser inputType string to an InputType enum.
///
/// This handles the W3C Input Events inputType values as returned by
/// `InputEvent.inputType` in browsers.
pub fn parse_browser_input_type(s: &str) -> InputType {
    match s {
        // Insertion
        "insertText" => InputType::InsertText,
        "insertCompositionText" => InputType::InsertCompositionText,
        "insertLineBreak" => InputType::InsertLineBreak,
        "insertParagraph" => InputType::InsertParagraph,
        "insertFromPaste" => InputType::InsertFromPaste,
        "insertFromDrop" => InputType::InsertFromDrop,
        "insertOrderedList" => InputType::InsertOrderedList,
        "insertUnorderedList" => InputType::InsertUnorderedList,
        "insertHorizontalRule" => InputType::InsertHorizontalRule,

        // Deletion
        "deleteContentBackward" => InputType::DeleteContentBackward,
        "deleteContentForward" => InputType::DeleteContentForward,

        // History
        "historyUndo" => InputType::HistoryUndo,
        "historyRedo" => InputType::HistoryRedo,

        other => InputType::Unknown(other.to_string()),
    }
}

/// Parse a `KeyboardEvent.key` value.
pub fn parse_browser_key(key: &str) -> Key {
    match key {
        "Backspace" => Key::Backspace,
        "Delete" => Key::Delete,
        "Enter" => Key::Enter,
        "Tab" => Key::Tab,
        "Escape" => Key::Escape,
        "ArrowLeft" => Key::ArrowLeft,
        "ArrowRight" => Key::ArrowRight,
        "ArrowUp" => Key::ArrowUp,
        "ArrowDown" => Key::ArrowDown,
        "Home" => Key::Home,
        "End" => Key::End,
        "Alt" => Key::Alt,
        "Control" => Key::Control,
        "Meta" => Key::Meta,
        "Shift" => Key::Shift,
        s if s.chars().count() == 1 => Key::character(s),
        other => Key::Other(SmolStr::new(other)),
    }
}

/// Key combination of a keydown event.
pub fn key_combo_from_event(evt: &web_sys::KeyboardEvent) -> KeyCombo {
    KeyCombo::with_modifiers(
        parse_browser_key(&evt.key()),
        Modifiers {
            ctrl: evt.ctrl_key(),
            alt: evt.alt_key(),
            shift: evt.shift_key(),
            meta: evt.meta_key(),
        },
    )
}
