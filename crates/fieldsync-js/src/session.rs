//! JsFieldSession - one editor field, driven from a page hook.

use std::rc::{Rc, Weak};

use fieldsync_browser::{BrowserTimers, DomSlots, platform};
use fieldsync_core::{
    EditorSession, FieldKind, FieldOptions, SessionConfig, SessionError, SyncMode, SyncTarget,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::engine::{JsEngine, JsEngineFactory, JsPushSink};
use crate::types::{JsContent, MountOptions};

pub(crate) type InnerSession = EditorSession<JsEngine, BrowserTimers>;

/// Marks the element the engine mounts on, under the hook element.
const EDITOR_SELECTOR: &str = "[data-editor]";

/// A mounted field editor.
///
/// Created when the hosting element enters the page; call `dispose` (or
/// `free`) when it leaves.
#[wasm_bindgen]
pub struct JsFieldSession {
    pub(crate) session: Rc<InnerSession>,
    engine: Option<JsEngine>,
    listeners: Vec<(&'static str, Closure<dyn FnMut()>)>,
}

#[wasm_bindgen]
impl JsFieldSession {
    /// Mount an editor inside the hook element `host`.
    ///
    /// The engine goes on the `[data-editor]` element under `host`; when there
    /// is none, mounting fails and leaves nothing behind. Dual-write fields
    /// find their hidden slots under `host` too. `pushEvent` is required for
    /// push fields.
    pub fn mount(
        host: web_sys::Element,
        create_engine: js_sys::Function,
        push_event: Option<js_sys::Function>,
        options: MountOptions,
    ) -> Result<JsFieldSession, JsError> {
        let kind = FieldKind::parse(&options.field)
            .ok_or_else(|| JsError::new(&format!("Unknown field: {}", options.field)))?;
        let mut field_options = FieldOptions::for_kind(kind);
        if let Some(config) = options.config {
            field_options = field_options.with_overrides(config.into());
        }

        let sync = match field_options.sync_mode {
            SyncMode::DualFieldWrite => SyncTarget::hidden_fields(DomSlots::new(host.clone())),
            SyncMode::PushOnChange | SyncMode::PushOnBlur => {
                let push_event =
                    push_event.ok_or_else(|| JsError::new("pushEvent is required for push fields"))?;
                SyncTarget::push(JsPushSink::new(push_event))
            }
        };

        let target = host
            .query_selector(EDITOR_SELECTOR)
            .map_err(|e| JsError::new(&format!("Bad editor selector: {e:?}")))?;
        let factory = JsEngineFactory::new(create_engine);
        let session = EditorSession::start(
            &factory,
            target.as_ref(),
            &options.initial_content,
            SessionConfig {
                options: field_options,
                sync,
                timers: BrowserTimers,
                is_mac: platform().primary_is_meta(),
            },
        )
        .map_err(to_js_error)?;

        let mut this = Self {
            session: Rc::new(session),
            engine: factory.take_created(),
            listeners: Vec::new(),
        };
        this.attach();
        Ok(this)
    }

    /// Field identifier (`title`, `body`, ...).
    #[wasm_bindgen(getter)]
    pub fn field(&self) -> String {
        self.session.field().to_string()
    }

    #[wasm_bindgen(js_name = isLive)]
    pub fn is_live(&self) -> bool {
        self.session.is_live()
    }

    /// Current formatted and plain content, or undefined once disposed.
    pub fn content(&self) -> Option<JsContent> {
        self.session.content().map(JsContent::from)
    }

    /// Deliver any pending debounced update now.
    ///
    /// Call before the hosting element is removed. Returns whether anything
    /// was pending.
    pub fn flush(&self) -> bool {
        self.session.flush()
    }

    /// Stop syncing and destroy the engine. Safe to call more than once.
    pub fn dispose(&mut self) {
        self.detach();
        self.session.dispose();
    }
}

impl JsFieldSession {
    fn attach(&mut self) {
        let Some(engine) = &self.engine else {
            tracing::warn!("no engine handle, change notifications not wired");
            return;
        };
        let on_update = listener(Rc::downgrade(&self.session), |s| s.handle_change());
        let on_blur = listener(Rc::downgrade(&self.session), |s| s.handle_blur());
        for (event, closure) in [("update", on_update), ("blur", on_blur)] {
            engine.on(event, closure.as_ref().unchecked_ref());
            self.listeners.push((event, closure));
        }
    }

    fn detach(&mut self) {
        if let Some(engine) = self.engine.take() {
            for (event, closure) in &self.listeners {
                engine.off(event, closure.as_ref().unchecked_ref());
            }
        }
        self.listeners.clear();
    }
}

impl Drop for JsFieldSession {
    fn drop(&mut self) {
        self.detach();
    }
}

fn listener(
    session: Weak<InnerSession>,
    f: impl Fn(&InnerSession) + 'static,
) -> Closure<dyn FnMut()> {
    Closure::new(move || {
        if let Some(session) = session.upgrade() {
            f(&session);
        }
    })
}

fn to_js_error(e: SessionError) -> JsError {
    JsError::new(&e.to_string())
}
