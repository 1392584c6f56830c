//! Search shortcuts on the page.
//!
//! One window-level listener handles the focus-search chord. One listener on
//! the results container handles prefix clearing and result navigation.
//! Both are removed when `SearchShortcuts` is dropped.

use std::rc::Rc;

use fieldsync_core::{SearchController, SearchKeymap, SearchSurface};
use gloo_events::EventListener;
use smol_str::SmolStr;
use wasm_bindgen::JsCast;

use crate::events::key_combo_from_event;
use crate::focus::DomFocusScope;

/// Search input, trigger and clear-prefix callback of a page.
///
/// The input is looked up under `root` with `input_selector` each time it is
/// needed, since it may come and go as the page re-renders.
pub struct DomSearchSurface {
    root: web_sys::Element,
    input_selector: SmolStr,
    trigger: Option<web_sys::HtmlElement>,
    on_clear_prefix: Box<dyn Fn()>,
}

impl DomSearchSurface {
    pub fn new(
        root: web_sys::Element,
        input_selector: impl Into<SmolStr>,
        trigger: Option<web_sys::HtmlElement>,
        on_clear_prefix: impl Fn() + 'static,
    ) -> Self {
        Self {
            root,
            input_selector: input_selector.into(),
            trigger,
            on_clear_prefix: Box::new(on_clear_prefix),
        }
    }

    fn input(&self) -> Option<web_sys::HtmlInputElement> {
        self.root
            .query_selector(&self.input_selector)
            .ok()??
            .dyn_into::<web_sys::HtmlInputElement>()
            .ok()
    }
}

impl SearchSurface for DomSearchSurface {
    fn focus_input(&self) -> bool {
        let Some(input) = self.input() else {
            return false;
        };
        if let Err(e) = input.focus() {
            tracing::warn!("search input focus failed: {:?}", e);
        }
        input.select();
        true
    }

    fn click_trigger(&self) {
        match &self.trigger {
            Some(trigger) => trigger.click(),
            None => tracing::debug!("no search trigger to click"),
        }
    }

    fn clear_prefix(&self) {
        (self.on_clear_prefix)();
    }
}

/// Search shortcuts bound to the page.
pub struct SearchShortcuts {
    controller: Rc<SearchController<DomSearchSurface, DomFocusScope>>,
    _listeners: [EventListener; 2],
}

impl SearchShortcuts {
    /// Listen on `window` for the focus chord and on `container` for the
    /// result chords.
    pub fn attach(
        window: &web_sys::Window,
        container: web_sys::Element,
        surface: DomSearchSurface,
        is_mac: bool,
    ) -> Self {
        let controller = Rc::new(SearchController::new(
            SearchKeymap::new(is_mac),
            surface,
            DomFocusScope::new(container.clone()),
        ));

        let global = {
            let controller = Rc::clone(&controller);
            EventListener::new(window, "keydown", move |event| {
                let Some(evt) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                    return;
                };
                let combo = key_combo_from_event(evt);
                if controller
                    .handle_global(&combo, evt.default_prevented())
                    .prevent_default()
                {
                    evt.prevent_default();
                }
            })
        };

        let local = {
            let controller = Rc::clone(&controller);
            EventListener::new(&container, "keydown", move |event| {
                let Some(evt) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                    return;
                };
                if evt.default_prevented() {
                    return;
                }
                let input_empty = event
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                    .is_some_and(|input| input.value().is_empty());
                let combo = key_combo_from_event(evt);
                if controller
                    .handle_container(&combo, input_empty)
                    .prevent_default()
                {
                    evt.prevent_default();
                }
            })
        };

        Self {
            controller,
            _listeners: [global, local],
        }
    }

    pub fn controller(&self) -> &SearchController<DomSearchSurface, DomFocusScope> {
        &self.controller
    }
}
