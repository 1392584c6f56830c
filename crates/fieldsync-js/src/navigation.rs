//! Keyboard navigation exports: result cycling and search shortcuts.

use fieldsync_browser::{
    DomSearchSurface, FocusCycleListener, NavigationBindings, SearchShortcuts, platform,
};
use fieldsync_core::Direction;
use wasm_bindgen::prelude::*;

/// Cycles focus through a container's interactive elements on
/// ArrowDown/Ctrl+N and ArrowUp/Ctrl+P. Listening stops on `free`.
#[wasm_bindgen]
pub struct JsFocusNavigator {
    listener: FocusCycleListener,
}

#[wasm_bindgen]
impl JsFocusNavigator {
    /// Start listening on `container`. With `trapTab`, Tab and Shift+Tab
    /// cycle instead of the arrow chords.
    #[wasm_bindgen(constructor)]
    pub fn new(container: web_sys::Element, trap_tab: Option<bool>) -> JsFocusNavigator {
        let bindings = if trap_tab.unwrap_or(false) {
            NavigationBindings::tab()
        } else {
            NavigationBindings::default()
        };
        Self {
            listener: FocusCycleListener::attach(container, bindings),
        }
    }

    /// Move focus one step. Returns whether focus changed.
    #[wasm_bindgen(js_name = moveFocus)]
    pub fn move_focus(&self, forward: bool) -> bool {
        let direction = if forward {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.listener.navigator().move_focus(direction)
    }
}

/// Global Mod+K focus-search plus in-container prefix clearing and result
/// navigation. Listening stops on `free`.
#[wasm_bindgen]
pub struct JsSearchShortcuts {
    _shortcuts: SearchShortcuts,
}

#[wasm_bindgen]
impl JsSearchShortcuts {
    /// The search input is the first match of `inputSelector` under `root`;
    /// `trigger` is clicked when there is none. `onClearPrefix` runs on
    /// Backspace in an empty input.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: web_sys::Element,
        root: web_sys::Element,
        input_selector: String,
        trigger: Option<web_sys::HtmlElement>,
        on_clear_prefix: Option<js_sys::Function>,
    ) -> Result<JsSearchShortcuts, JsError> {
        let window = web_sys::window().ok_or_else(|| JsError::new("No window"))?;

        let surface = DomSearchSurface::new(root, input_selector, trigger, move || {
            let Some(callback) = &on_clear_prefix else {
                return;
            };
            if let Err(e) = callback.call0(&JsValue::NULL) {
                tracing::warn!("onClearPrefix threw: {:?}", e);
            }
        });

        Ok(Self {
            _shortcuts: SearchShortcuts::attach(
                &window,
                container,
                surface,
                platform().primary_is_meta(),
            ),
        })
    }
}
