//! Update delivery.
//!
//! A `SyncChannel` takes an extracted `Content` and hands it to exactly one
//! destination, fixed when the session is built: a named server message, or
//! the pair of hidden form slots for dual-write fields.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::content::Content;
use crate::field::{FieldOptions, PayloadValue};
use crate::platform::{HiddenSlots, PushSink};

/// The two hidden slots of a dual-write field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotRole {
    /// Formatted markup.
    Formatted,
    /// Plain text projection.
    Plain,
}

impl SlotRole {
    /// Value of the slot's `data-editor-hidden` marker.
    pub fn marker(&self) -> &'static str {
        match self {
            SlotRole::Formatted => "body",
            SlotRole::Plain => "body_text",
        }
    }

    /// CSS selector locating the slot under the field's host element.
    pub fn selector(&self) -> String {
        format!("[data-editor-hidden='{}']", self.marker())
    }
}

/// Payload of a server push message: `{ <field>: value, [<field>_text]: plain }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UpdatePayload(BTreeMap<String, String>);

impl UpdatePayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Where a session's updates go.
pub enum SyncTarget {
    /// Named server message.
    Push(Box<dyn PushSink>),
    /// Hidden form slots plus a change notification.
    HiddenFields(Box<dyn HiddenSlots>),
}

impl SyncTarget {
    pub fn push(sink: impl PushSink + 'static) -> Self {
        SyncTarget::Push(Box::new(sink))
    }

    pub fn hidden_fields(slots: impl HiddenSlots + 'static) -> Self {
        SyncTarget::HiddenFields(Box::new(slots))
    }

    pub fn is_push(&self) -> bool {
        matches!(self, SyncTarget::Push(_))
    }
}

impl std::fmt::Debug for SyncTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncTarget::Push(_) => f.write_str("SyncTarget::Push"),
            SyncTarget::HiddenFields(_) => f.write_str("SyncTarget::HiddenFields"),
        }
    }
}

/// Delivers content to a session's target.
#[derive(Debug)]
pub struct SyncChannel {
    target: SyncTarget,
    event: String,
    key: String,
    value: PayloadValue,
    plain_key: Option<String>,
    plain_slot: bool,
}

impl SyncChannel {
    pub fn new(options: &FieldOptions, target: SyncTarget) -> Self {
        Self {
            target,
            event: options.event.to_string(),
            key: options.payload_key().to_string(),
            value: options.value,
            plain_key: options.include_plain.then(|| options.plain_payload_key()),
            plain_slot: options.plain_slot,
        }
    }

    pub fn target(&self) -> &SyncTarget {
        &self.target
    }

    /// Deliver one debounced update.
    pub fn deliver(&self, content: &Content) {
        match &self.target {
            SyncTarget::Push(sink) => {
                let value = match self.value {
                    PayloadValue::Formatted => content.formatted(),
                    PayloadValue::Plain => content.plain(),
                };
                let mut payload = UpdatePayload::new().with(&self.key, value);
                if let Some(plain_key) = &self.plain_key {
                    payload = payload.with(plain_key, content.plain());
                }
                tracing::debug!(event = %self.event, "pushing field update");
                sink.push(&self.event, &payload);
            }
            SyncTarget::HiddenFields(slots) => self.write_slots(slots.as_ref(), content),
        }
    }

    /// Deliver the on-blur update: the trimmed plain text only.
    pub fn deliver_blur(&self, content: &Content) {
        match &self.target {
            SyncTarget::Push(sink) => {
                let payload = UpdatePayload::new().with(&self.key, content.plain().trim());
                tracing::debug!(event = %self.event, "pushing field update on blur");
                sink.push(&self.event, &payload);
            }
            SyncTarget::HiddenFields(slots) => self.write_slots(slots.as_ref(), content),
        }
    }

    // Plain first, then formatted, then one notification, so whoever reacts
    // to the notification reads a consistent pair.
    fn write_slots(&self, slots: &dyn HiddenSlots, content: &Content) {
        if self.plain_slot {
            if let Err(e) = slots.write(SlotRole::Plain, content.plain()) {
                tracing::error!("plain-text slot write skipped: {e}");
            }
        }
        if let Err(e) = slots.write(SlotRole::Formatted, content.formatted()) {
            tracing::error!("formatted slot write skipped, no change notification sent: {e}");
            return;
        }
        if let Err(e) = slots.notify_changed(SlotRole::Formatted) {
            tracing::error!("change notification failed: {e}");
        }
    }
}
