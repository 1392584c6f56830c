//! One editable field, start to finish.
//!
//! `EditorSession` mounts an editing engine, routes its change and blur
//! notifications through extraction, debouncing and delivery, applies the
//! field's keyboard policy, and tears everything down on `dispose`.
//!
//! Teardown ordering: the liveness flag drops first, then the scheduler is
//! closed, then the engine is destroyed. Every delivery path checks the flag
//! synchronously before producing a side effect, so a timer callback already
//! queued on the event loop delivers nothing once `dispose` has begun.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::actions::{InputType, KeyCombo, KeydownResult};
use crate::content::{self, Content};
use crate::debounce::DebounceScheduler;
use crate::error::{EngineError, MountError, SessionError};
use crate::field::{FieldKind, FieldOptions, SyncMode};
use crate::keyboard::{KeyOutcome, KeyboardPolicy, run_custom_action};
use crate::platform::{EditingEngine, EngineFactory, EngineSpec, Prompt, TimerHost};
use crate::sync::{SyncChannel, SyncTarget};

/// Everything a session needs besides the engine and its mount target.
pub struct SessionConfig<H> {
    pub options: FieldOptions,
    pub sync: SyncTarget,
    pub timers: H,
    /// Whether the primary modifier is Cmd (Mac) rather than Ctrl.
    pub is_mac: bool,
}

struct Shared<E> {
    field: FieldKind,
    engine: RefCell<Option<E>>,
    live: Cell<bool>,
    channel: SyncChannel,
}

impl<E: EditingEngine> Shared<E> {
    fn extract(&self) -> Result<Content, EngineError> {
        let engine = self.engine.try_borrow().map_err(|_| EngineError::Released)?;
        match engine.as_ref() {
            Some(engine) => content::extract(engine),
            None => Err(EngineError::Released),
        }
    }

    fn deliver(&self, content: &Content) {
        if !self.live.get() {
            tracing::debug!(field = %self.field, "session disposed, dropping update");
            return;
        }
        self.channel.deliver(content);
    }
}

/// The synchronization bridge for one field.
pub struct EditorSession<E: EditingEngine, H: TimerHost> {
    options: FieldOptions,
    policy: KeyboardPolicy,
    shared: Rc<Shared<E>>,
    scheduler: Option<DebounceScheduler<Content, H>>,
}

impl<E, H> EditorSession<E, H>
where
    E: EditingEngine + 'static,
    H: TimerHost,
    H::Handle: 'static,
{
    /// Mount an engine on `target` and start syncing.
    ///
    /// `target` is `None` when the host could not find the surface element;
    /// that fails with `MountError` and leaves nothing behind.
    pub fn start<F>(
        factory: &F,
        target: Option<&F::Target>,
        initial_content: &str,
        config: SessionConfig<H>,
    ) -> Result<Self, SessionError>
    where
        F: EngineFactory<Engine = E>,
    {
        let SessionConfig {
            options,
            sync,
            timers,
            is_mac,
        } = config;
        let field = options.kind;

        let wants_push = !matches!(options.sync_mode, SyncMode::DualFieldWrite);
        if wants_push != sync.is_push() {
            tracing::error!(%field, "sync target does not match {:?}", options.sync_mode);
            return Err(SessionError::TargetMismatch(options.sync_mode));
        }

        let Some(target) = target else {
            let err = MountError { field };
            tracing::error!("{err}");
            return Err(err.into());
        };

        let engine = factory
            .construct(
                target,
                EngineSpec {
                    extensions: &options.extensions,
                    initial_content,
                    attributes: &options.attributes,
                },
            )
            .inspect_err(|e| tracing::error!(%field, "engine construction failed: {e}"))?;

        let shared = Rc::new(Shared {
            field,
            engine: RefCell::new(Some(engine)),
            live: Cell::new(true),
            channel: SyncChannel::new(&options, sync),
        });

        let scheduler = options.sync_mode.is_debounced().then(|| {
            let weak = Rc::downgrade(&shared);
            DebounceScheduler::new(timers, options.debounce_ms, move |content: Content| {
                if let Some(shared) = weak.upgrade() {
                    shared.deliver(&content);
                }
            })
        });

        tracing::debug!(
            %field,
            mode = ?options.sync_mode,
            debounce_ms = options.debounce_ms,
            "field session started"
        );

        Ok(Self {
            policy: KeyboardPolicy::new(options.policy, is_mac),
            options,
            shared,
            scheduler,
        })
    }

    pub fn field(&self) -> FieldKind {
        self.options.kind
    }

    pub fn options(&self) -> &FieldOptions {
        &self.options
    }

    pub fn policy(&self) -> &KeyboardPolicy {
        &self.policy
    }

    pub fn is_live(&self) -> bool {
        self.shared.live.get()
    }

    /// Whether a debounced delivery is waiting.
    pub fn has_pending(&self) -> bool {
        self.scheduler.as_ref().is_some_and(|s| s.is_pending())
    }

    /// Current content snapshot, or `None` once the engine is gone.
    pub fn content(&self) -> Option<Content> {
        if !self.is_live() {
            return None;
        }
        self.shared.extract().ok()
    }

    /// Engine change notification.
    pub fn handle_change(&self) {
        if !self.is_live() {
            return;
        }
        let Some(scheduler) = &self.scheduler else {
            return;
        };
        match self.shared.extract() {
            Ok(content) => scheduler.schedule(content),
            Err(e) => tracing::debug!(field = %self.field(), "skipping update: {e}"),
        }
    }

    /// Engine blur notification.
    pub fn handle_blur(&self) {
        if !self.is_live() {
            return;
        }
        match self.options.sync_mode {
            SyncMode::PushOnBlur => match self.shared.extract() {
                Ok(content) => self.shared.channel.deliver_blur(&content),
                Err(e) => tracing::debug!(field = %self.field(), "skipping blur update: {e}"),
            },
            SyncMode::DualFieldWrite => {
                self.flush();
            }
            SyncMode::PushOnChange => {}
        }
    }

    /// Apply the keyboard policy to a keydown chord.
    pub fn handle_keydown(&self, combo: &KeyCombo, prompt: &dyn Prompt) -> KeydownResult {
        if !self.is_live() {
            return KeydownResult::NotHandled;
        }
        match self.policy.key_outcome(combo) {
            KeyOutcome::Suppress => KeydownResult::Handled,
            KeyOutcome::Delegate => KeydownResult::NotHandled,
            // The chord is claimed even when the engine cannot take the action.
            KeyOutcome::Custom(action) => match self.shared.engine.try_borrow() {
                Ok(engine) => match engine.as_ref() {
                    Some(engine) => run_custom_action(action, engine, prompt),
                    None => KeydownResult::Handled,
                },
                Err(_) => {
                    tracing::debug!(field = %self.field(), "engine busy, skipping {action:?}");
                    KeydownResult::Handled
                }
            },
        }
    }

    /// Apply the keyboard policy to an input trigger.
    pub fn handle_input(&self, input: &InputType) -> KeydownResult {
        if !self.is_live() {
            return KeydownResult::NotHandled;
        }
        match self.policy.input_outcome(input) {
            KeyOutcome::Suppress => KeydownResult::Handled,
            _ => KeydownResult::NotHandled,
        }
    }

    /// Deliver a pending debounced update now. Returns false if none was pending.
    pub fn flush(&self) -> bool {
        if !self.is_live() {
            return false;
        }
        self.scheduler.as_ref().is_some_and(|s| s.flush())
    }

    /// Stop syncing and release the engine. Safe to call more than once.
    pub fn dispose(&self) {
        if !self.shared.live.replace(false) {
            return;
        }
        if let Some(scheduler) = &self.scheduler {
            scheduler.close();
        }
        self.release_engine();
        tracing::debug!(field = %self.field(), "field session disposed");
    }

    fn release_engine(&self) {
        let engine = match self.shared.engine.try_borrow_mut() {
            Ok(mut slot) => slot.take(),
            Err(_) => {
                tracing::warn!(field = %self.field(), "engine busy during dispose, releasing on drop");
                None
            }
        };
        if let Some(engine) = engine {
            engine.destroy();
        }
    }
}

impl<E: EditingEngine, H: TimerHost> Drop for EditorSession<E, H> {
    fn drop(&mut self) {
        self.shared.live.set(false);
        if let Ok(mut slot) = self.shared.engine.try_borrow_mut() {
            if let Some(engine) = slot.take() {
                engine.destroy();
            }
        }
    }
}
