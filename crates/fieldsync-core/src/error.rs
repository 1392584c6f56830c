//! Error types for field sessions.

use thiserror::Error;

use crate::field::FieldKind;
use crate::sync::SlotRole;

/// The mount target for a field was not present when the session started.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("mount target for {field} field is missing from the document")]
pub struct MountError {
    pub field: FieldKind,
}

/// Errors reported by the editing engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    /// The engine has already been destroyed.
    #[error("editing engine already released")]
    Released,

    /// The engine could not be constructed.
    #[error("failed to construct editing engine: {0}")]
    Construct(String),

    /// A call into the engine failed.
    #[error("editing engine call failed: {0}")]
    Call(String),
}

/// Errors writing to hidden form slots.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SlotError {
    /// No element matches the slot's selector.
    #[error("hidden slot {0} is missing")]
    Missing(String),

    /// The slot exists but could not be written or notified.
    #[error("hidden slot {role:?} rejected the write: {reason}")]
    Rejected { role: SlotRole, reason: String },
}

/// Errors starting or driving an editor session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Mount(#[from] MountError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The configured sync target does not match the field's sync mode.
    #[error("sync target does not match sync mode {0:?}")]
    TargetMismatch(crate::field::SyncMode),
}
