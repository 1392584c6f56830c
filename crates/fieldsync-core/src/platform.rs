//! Platform abstraction traits for field sessions.
//!
//! These traits define the interface between the session logic and the
//! environment it runs in (browser DOM and a JavaScript editing engine, or
//! fakes in tests). Every handle a session touches is passed in through one
//! of these traits; nothing here reaches for a global document.

use crate::error::{EngineError, SlotError};
use crate::field::{EditorAttributes, Extension};
use crate::sync::{SlotRole, UpdatePayload};

/// A live editing-engine instance.
///
/// The session owns exactly one of these and releases it with `destroy`.
/// Methods take `&self` because engines notify synchronously while being
/// driven (setting a link emits a change notification from inside the call).
pub trait EditingEngine {
    /// Serialized formatted markup of the current document.
    fn formatted(&self) -> Result<String, EngineError>;

    /// Link target of the current selection, if the selection is a link.
    fn link_href(&self) -> Option<String>;

    /// Set a link on the current selection, extending to the whole mark.
    fn set_link(&self, href: &str) -> Result<(), EngineError>;

    /// Remove the link from the current selection.
    fn unset_link(&self) -> Result<(), EngineError>;

    /// Release the engine. Called once, during session disposal.
    fn destroy(self);
}

/// What the session asks the factory to build.
#[derive(Debug, Clone, Copy)]
pub struct EngineSpec<'a> {
    pub extensions: &'a [Extension],
    pub initial_content: &'a str,
    pub attributes: &'a EditorAttributes,
}

/// Constructs editing engines bound to a mount target.
pub trait EngineFactory {
    type Target;
    type Engine: EditingEngine;

    fn construct(
        &self,
        target: &Self::Target,
        spec: EngineSpec<'_>,
    ) -> Result<Self::Engine, EngineError>;
}

/// Deferred callbacks on the event loop.
///
/// Dropping a returned handle cancels the callback if it has not run yet.
pub trait TimerHost {
    type Handle;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Server-facing push channel. Fire-and-forget.
pub trait PushSink {
    fn push(&self, event: &str, payload: &UpdatePayload);
}

/// The pair of hidden form slots backing a dual-write field.
pub trait HiddenSlots {
    /// Write a value into a slot.
    fn write(&self, role: SlotRole, value: &str) -> Result<(), SlotError>;

    /// Dispatch a synthetic bubbling input notification on a slot.
    fn notify_changed(&self, role: SlotRole) -> Result<(), SlotError>;
}

/// Modal text prompt used by custom keyboard actions.
pub trait Prompt {
    /// Ask for a value, pre-filled with `default`. `None` means cancelled.
    fn prompt(&self, message: &str, default: &str) -> Option<String>;
}
