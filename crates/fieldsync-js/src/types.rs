//! Types exposed to JavaScript via wasm-bindgen.

use fieldsync_core::{Content, FieldOverrides, PayloadValue, SyncMode};
use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

/// Per-page adjustments over a field's defaults. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[tsify(optional)]
    pub debounce_ms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[tsify(optional, type = "\"push_on_change\" | \"push_on_blur\" | \"dual_field_write\"")]
    pub sync_mode: Option<SyncMode>,
    /// Server event name for push modes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[tsify(optional)]
    pub event: Option<String>,
    /// Whether pushes carry the markup or the plain text under the field key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[tsify(optional, type = "\"formatted\" | \"plain\"")]
    pub value: Option<PayloadValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[tsify(optional)]
    pub include_plain: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[tsify(optional)]
    pub plain_slot: Option<bool>,
    /// CSS class of the editable element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[tsify(optional)]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[tsify(optional)]
    pub placeholder: Option<String>,
}

impl From<FieldConfig> for FieldOverrides {
    fn from(config: FieldConfig) -> Self {
        FieldOverrides {
            debounce_ms: config.debounce_ms,
            sync_mode: config.sync_mode,
            event: config.event.map(Into::into),
            value: config.value,
            include_plain: config.include_plain,
            plain_slot: config.plain_slot,
            class: config.class.map(Into::into),
            placeholder: config.placeholder,
        }
    }
}

/// What the hook passes when mounting a field.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct MountOptions {
    /// `title`, `subtitle`, `body` or `description`.
    pub field: String,
    #[serde(default)]
    #[tsify(optional)]
    pub initial_content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[tsify(optional)]
    pub config: Option<FieldConfig>,
}

/// Current content of a field.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct JsContent {
    pub formatted: String,
    pub plain: String,
}

impl From<Content> for JsContent {
    fn from(content: Content) -> Self {
        Self {
            formatted: content.formatted().to_string(),
            plain: content.plain().to_string(),
        }
    }
}
