//! Binding to the page's JavaScript editing engine.
//!
//! The page supplies a `createEngine(element, options)` function. It returns
//! an object with the methods declared on [`JsEngine`]; the hook layer
//! adapts whatever editor library it uses to that shape.

use std::cell::RefCell;

use fieldsync_core::{
    EditingEngine, EditorAttributes, EngineError, EngineFactory, EngineSpec, Extension, PushSink,
    UpdatePayload,
};
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// A live editing engine created by the page.
    #[derive(Clone)]
    pub type JsEngine;

    #[wasm_bindgen(method, catch, js_name = getHTML)]
    fn get_html(this: &JsEngine) -> Result<String, JsValue>;

    #[wasm_bindgen(method, js_name = linkHref)]
    fn js_link_href(this: &JsEngine) -> Option<String>;

    #[wasm_bindgen(method, catch, js_name = setLink)]
    fn js_set_link(this: &JsEngine, href: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = unsetLink)]
    fn js_unset_link(this: &JsEngine) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = destroy)]
    fn js_destroy(this: &JsEngine);

    /// Register a notification listener (`update` or `blur`).
    #[wasm_bindgen(method)]
    pub fn on(this: &JsEngine, event: &str, callback: &js_sys::Function);

    #[wasm_bindgen(method)]
    pub fn off(this: &JsEngine, event: &str, callback: &js_sys::Function);
}

impl EditingEngine for JsEngine {
    fn formatted(&self) -> Result<String, EngineError> {
        self.get_html()
            .map_err(|e| EngineError::Call(format!("getHTML: {e:?}")))
    }

    fn link_href(&self) -> Option<String> {
        self.js_link_href().filter(|href| !href.is_empty())
    }

    fn set_link(&self, href: &str) -> Result<(), EngineError> {
        self.js_set_link(href)
            .map_err(|e| EngineError::Call(format!("setLink: {e:?}")))
    }

    fn unset_link(&self) -> Result<(), EngineError> {
        self.js_unset_link()
            .map_err(|e| EngineError::Call(format!("unsetLink: {e:?}")))
    }

    fn destroy(self) {
        self.js_destroy();
    }
}

/// Options object handed to `createEngine`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EngineOptions<'a> {
    extensions: &'a [Extension],
    content: &'a str,
    attributes: &'a EditorAttributes,
}

/// Builds engines through the page's `createEngine` function.
pub struct JsEngineFactory {
    create: js_sys::Function,
    created: RefCell<Option<JsEngine>>,
}

impl JsEngineFactory {
    pub fn new(create: js_sys::Function) -> Self {
        Self {
            create,
            created: RefCell::new(None),
        }
    }

    /// Second handle on the most recently built engine, for listener wiring.
    pub fn take_created(&self) -> Option<JsEngine> {
        self.created.borrow_mut().take()
    }
}

impl EngineFactory for JsEngineFactory {
    type Target = web_sys::Element;
    type Engine = JsEngine;

    fn construct(
        &self,
        target: &web_sys::Element,
        spec: EngineSpec<'_>,
    ) -> Result<JsEngine, EngineError> {
        let options = EngineOptions {
            extensions: spec.extensions,
            content: spec.initial_content,
            attributes: spec.attributes,
        };
        let options = options
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| EngineError::Construct(e.to_string()))?;
        let engine = self
            .create
            .call2(&JsValue::NULL, target, &options)
            .map_err(|e| EngineError::Construct(format!("{e:?}")))?;
        if engine.is_null() || engine.is_undefined() {
            return Err(EngineError::Construct("createEngine returned nothing".into()));
        }
        let engine: JsEngine = engine.unchecked_into();
        *self.created.borrow_mut() = Some(engine.clone());
        Ok(engine)
    }
}

/// Push sink over the hook's `pushEvent(event, payload)`.
pub struct JsPushSink {
    push_event: js_sys::Function,
}

impl JsPushSink {
    pub fn new(push_event: js_sys::Function) -> Self {
        Self { push_event }
    }
}

impl PushSink for JsPushSink {
    fn push(&self, event: &str, payload: &UpdatePayload) {
        let payload = match payload.serialize(&serde_wasm_bindgen::Serializer::json_compatible()) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(event, "payload serialization failed: {e}");
                return;
            }
        };
        if let Err(e) = self
            .push_event
            .call2(&JsValue::NULL, &JsValue::from_str(event), &payload)
        {
            tracing::warn!(event, "pushEvent threw: {:?}", e);
        }
    }
}
