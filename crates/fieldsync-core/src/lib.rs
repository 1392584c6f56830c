//! fieldsync-core: editor field synchronization without DOM dependencies.
//!
//! This crate provides:
//! - `EditorSession` - one rich-text field bound to a server-side form model
//! - `DebounceScheduler` - trailing-edge coalescing over an injected timer host
//! - `Content` and `plain_text` - the formatted/plain content pair
//! - `KeyboardPolicy` - per-field key and input-trigger handling
//! - `SyncChannel` - server push or hidden form slot delivery
//! - `FocusCycleNavigator` and `SearchController` - keyboard traversal
//!
//! Everything the page supplies (engine, timers, slots, prompt, focus) comes
//! in through the traits in [`platform`] and [`focus`].

pub mod actions;
pub mod content;
pub mod debounce;
pub mod error;
pub mod field;
pub mod focus;
pub mod keyboard;
pub mod platform;
pub mod search;
pub mod session;
pub mod sync;

#[cfg(test)]
mod testing;

pub use actions::{InputType, Key, KeyCombo, KeydownResult, Modifiers};
pub use content::{Content, extract, plain_text};
pub use debounce::DebounceScheduler;
pub use error::{EngineError, MountError, SessionError, SlotError};
pub use field::{
    BODY_DEBOUNCE_MS, EditorAttributes, Extension, FieldKind, FieldOptions, FieldOverrides,
    LinkOptions, PayloadValue, PolicyKind, SUBTITLE_DEBOUNCE_MS, SyncMode, TITLE_DEBOUNCE_MS,
};
pub use focus::{Direction, FocusCycleNavigator, FocusScope, NavigationBindings};
pub use keyboard::{CustomAction, KeyOutcome, KeyboardPolicy, run_custom_action};
pub use platform::{
    EditingEngine, EngineFactory, EngineSpec, HiddenSlots, Prompt, PushSink, TimerHost,
};
pub use search::{SearchCommand, SearchController, SearchKeymap, SearchSurface};
pub use session::{EditorSession, SessionConfig};
pub use smol_str::SmolStr;
pub use sync::{SlotRole, SyncChannel, SyncTarget, UpdatePayload};
