//! Browser DOM layer for fieldsync.
//!
//! Implements the `fieldsync-core` platform traits on top of `web-sys`. It
//! assumes a `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `events`: keydown and beforeinput parsing into core key/input types
//! - `timer`: `TimerHost` over `setTimeout`
//! - `slots`: hidden form slots for dual-write fields
//! - `prompt`: the window's modal prompt
//! - `focus`: focus traversal over a DOM container
//! - `search`: global and in-container search shortcuts
//! - `platform`: Browser/OS detection for platform-specific behavior
//!
//! # Re-exports
//!
//! This crate re-exports `fieldsync-core` for convenience, so consumers
//! only need to depend on `fieldsync-browser`.

pub use fieldsync_core;
pub use fieldsync_core::*;

pub mod events;
pub mod focus;
pub mod platform;
pub mod prompt;
pub mod search;
pub mod slots;
pub mod timer;

pub use events::{key_combo_from_event, parse_browser_input_type, parse_browser_key};
pub use focus::{DomFocusScope, FOCUSABLE_SELECTOR, FocusCycleListener};
pub use platform::{Platform, platform};
pub use prompt::WindowPrompt;
pub use search::{DomSearchSurface, SearchShortcuts};
pub use slots::DomSlots;
pub use timer::BrowserTimers;
