//! Focus traversal over a DOM container.

use std::rc::Rc;

use fieldsync_core::{FocusCycleNavigator, FocusScope, NavigationBindings};
use gloo_events::EventListener;
use wasm_bindgen::JsCast;

use crate::events::key_combo_from_event;

/// Elements that can take keyboard focus.
pub const FOCUSABLE_SELECTOR: &str = "a[href], button, input, select, textarea, \
                                      [tabindex]:not([tabindex='-1'])";

/// A container element and the focusable elements below it.
#[derive(Clone)]
pub struct DomFocusScope {
    container: web_sys::Element,
}

impl DomFocusScope {
    pub fn new(container: web_sys::Element) -> Self {
        Self { container }
    }

    pub fn container(&self) -> &web_sys::Element {
        &self.container
    }

    /// Whether the focused element is inside the container.
    pub fn contains_focus(&self) -> bool {
        self.focused()
            .is_some_and(|el| self.container.contains(Some(el.as_ref())))
    }
}

impl FocusScope for DomFocusScope {
    type Element = web_sys::HtmlElement;

    fn candidates(&self) -> Vec<web_sys::HtmlElement> {
        let Ok(nodes) = self.container.query_selector_all(FOCUSABLE_SELECTOR) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
            .collect()
    }

    fn is_visible(&self, element: &web_sys::HtmlElement) -> bool {
        if element.get_attribute("aria-hidden").as_deref() == Some("true") {
            return false;
        }
        // offsetParent is null for display:none subtrees but also for
        // position:fixed elements, which still have client rects.
        element.offset_parent().is_some() || element.get_client_rects().length() > 0
    }

    fn is_disabled(&self, element: &web_sys::HtmlElement) -> bool {
        element.has_attribute("disabled")
            || element.get_attribute("aria-disabled").as_deref() == Some("true")
    }

    fn focused(&self) -> Option<web_sys::HtmlElement> {
        self.container
            .owner_document()?
            .active_element()?
            .dyn_into::<web_sys::HtmlElement>()
            .ok()
    }

    fn focus(&self, element: &web_sys::HtmlElement) {
        if let Err(e) = element.focus() {
            tracing::warn!("focus failed: {:?}", e);
        }
    }
}

/// A navigator wired to its container's keydown events.
///
/// The listener is removed when this is dropped.
pub struct FocusCycleListener {
    navigator: Rc<FocusCycleNavigator<DomFocusScope>>,
    _listener: EventListener,
}

impl FocusCycleListener {
    pub fn attach(container: web_sys::Element, bindings: NavigationBindings) -> Self {
        let navigator = Rc::new(FocusCycleNavigator::with_bindings(
            DomFocusScope::new(container.clone()),
            bindings,
        ));
        let nav = Rc::clone(&navigator);
        let listener = EventListener::new(&container, "keydown", move |event| {
            let Some(evt) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                return;
            };
            if nav.handle_key(&key_combo_from_event(evt)).prevent_default() {
                evt.prevent_default();
            }
        });
        Self {
            navigator,
            _listener: listener,
        }
    }

    pub fn navigator(&self) -> &FocusCycleNavigator<DomFocusScope> {
        &self.navigator
    }
}
