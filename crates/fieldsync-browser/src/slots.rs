//! Hidden form slots backing dual-write fields.
//!
//! The body field keeps its content in two hidden inputs under its host
//! element, marked `data-editor-hidden="body"` and
//! `data-editor-hidden="body_text"`. After a write, a synthetic bubbling
//! `input` event lets the enclosing form pick up the change as if the user
//! had typed.

use fieldsync_core::{HiddenSlots, SlotError, SlotRole};
use wasm_bindgen::JsCast;

/// Hidden slots found under a field's host element.
///
/// Slots are looked up on every write, so a server re-render that replaces
/// the inputs is picked up.
pub struct DomSlots {
    root: web_sys::Element,
}

impl DomSlots {
    pub fn new(root: web_sys::Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &web_sys::Element {
        &self.root
    }

    fn element(&self, role: SlotRole) -> Result<web_sys::Element, SlotError> {
        let selector = role.selector();
        match self.root.query_selector(&selector) {
            Ok(Some(element)) => Ok(element),
            Ok(None) => Err(SlotError::Missing(selector)),
            Err(e) => Err(SlotError::Rejected {
                role,
                reason: format!("{e:?}"),
            }),
        }
    }
}

impl HiddenSlots for DomSlots {
    fn write(&self, role: SlotRole, value: &str) -> Result<(), SlotError> {
        let element = self.element(role)?;
        if let Some(input) = element.dyn_ref::<web_sys::HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = element.dyn_ref::<web_sys::HtmlTextAreaElement>() {
            area.set_value(value);
        } else {
            return Err(SlotError::Rejected {
                role,
                reason: format!("<{}> is not a form control", element.tag_name().to_lowercase()),
            });
        }
        Ok(())
    }

    fn notify_changed(&self, role: SlotRole) -> Result<(), SlotError> {
        let element = self.element(role)?;
        let init = web_sys::EventInit::new();
        init.set_bubbles(true);
        let event = web_sys::Event::new_with_event_init_dict("input", &init).map_err(|e| {
            SlotError::Rejected {
                role,
                reason: format!("{e:?}"),
            }
        })?;
        element
            .dispatch_event(&event)
            .map_err(|e| SlotError::Rejected {
                role,
                reason: format!("{e:?}"),
            })?;
        Ok(())
    }
}
