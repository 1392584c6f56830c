//! Per-field configuration.
//!
//! Every editable field runs the same `EditorSession`; what differs between
//! title, subtitle, body and description is captured here as a
//! `FieldOptions` record. `FieldOptions::for_kind` holds the defaults and
//! `FieldOverrides` lets the page adjust them without restating everything.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// The editable fields a page can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Title,
    Subtitle,
    Body,
    Description,
}

impl FieldKind {
    pub const ALL: [FieldKind; 4] = [
        FieldKind::Title,
        FieldKind::Subtitle,
        FieldKind::Body,
        FieldKind::Description,
    ];

    /// Field identifier used in payload keys and event names.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Title => "title",
            FieldKind::Subtitle => "subtitle",
            FieldKind::Body => "body",
            FieldKind::Description => "description",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How updates leave the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Debounced server message after each burst of edits.
    PushOnChange,
    /// One synchronous server message with the trimmed plain text on blur.
    PushOnBlur,
    /// Debounced write into two hidden form slots plus a change notification.
    DualFieldWrite,
}

impl SyncMode {
    pub fn is_debounced(&self) -> bool {
        !matches!(self, SyncMode::PushOnBlur)
    }
}

/// Which representation a push message carries under the field's own key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadValue {
    /// The engine's markup.
    Formatted,
    /// The plain-text projection, untrimmed.
    Plain,
}

/// Which keyboard policy a field applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Enter and block-splitting input are suppressed.
    SingleLine,
    /// Engine defaults pass through; Mod+Shift+K edits links.
    MultiLine,
}

/// Engine extensions requested at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Extension {
    /// The engine's standard block and mark set.
    StarterKit {
        /// Markdown-style shortcuts that turn `# ` or `- ` into new blocks.
        input_rules: bool,
    },
    /// Typographic replacements such as dashes, ellipses and arrows.
    Typography { smart_quotes: bool, fractions: bool },
    /// Hyperlink mark.
    Link(LinkOptions),
    /// Placeholder text shown while the document is empty.
    Placeholder { text: String },
}

impl Extension {
    pub fn name(&self) -> &'static str {
        match self {
            Extension::StarterKit { .. } => "starter_kit",
            Extension::Typography { .. } => "typography",
            Extension::Link(_) => "link",
            Extension::Placeholder { .. } => "placeholder",
        }
    }
}

/// Configuration of the hyperlink mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkOptions {
    pub open_on_click: bool,
    /// Turn typed URLs into links.
    pub autolink: bool,
    /// Pasting a URL over a selection links it.
    pub link_on_paste: bool,
    /// Scheme assumed for hrefs typed without one.
    pub default_protocol: SmolStr,
    /// Attributes rendered on every `<a>`.
    pub html_attributes: BTreeMap<SmolStr, SmolStr>,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            open_on_click: false,
            autolink: true,
            link_on_paste: true,
            default_protocol: SmolStr::new_static("https"),
            html_attributes: BTreeMap::from([
                (SmolStr::new_static("target"), SmolStr::new_static("_blank")),
                (
                    SmolStr::new_static("rel"),
                    SmolStr::new_static("noopener noreferrer"),
                ),
            ]),
        }
    }
}

/// Attributes applied to the editable element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorAttributes {
    pub class: SmolStr,
    #[serde(default)]
    pub aria_label: Option<SmolStr>,
}

/// Full configuration for one field session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOptions {
    pub kind: FieldKind,
    pub policy: PolicyKind,
    pub sync_mode: SyncMode,
    /// Quiet period before a debounced delivery. Ignored for push-on-blur.
    pub debounce_ms: u32,
    /// Server event name for push modes.
    pub event: SmolStr,
    /// What push payloads carry under `<field>`.
    pub value: PayloadValue,
    /// Whether push payloads carry `<field>_text` alongside `<field>`.
    pub include_plain: bool,
    /// Whether dual-field writes also target the `_text` slot.
    pub plain_slot: bool,
    pub attributes: EditorAttributes,
    pub extensions: Vec<Extension>,
}

pub const TITLE_DEBOUNCE_MS: u32 = 500;
pub const SUBTITLE_DEBOUNCE_MS: u32 = 1000;
pub const BODY_DEBOUNCE_MS: u32 = 300;

impl FieldOptions {
    /// Default options for a field kind.
    pub fn for_kind(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Title => Self {
                kind,
                policy: PolicyKind::SingleLine,
                sync_mode: SyncMode::PushOnChange,
                debounce_ms: TITLE_DEBOUNCE_MS,
                event: SmolStr::new_static("title_update"),
                value: PayloadValue::Formatted,
                include_plain: true,
                plain_slot: false,
                attributes: EditorAttributes {
                    class: SmolStr::new_static("field-editor field-editor--title"),
                    aria_label: Some(SmolStr::new_static("Title")),
                },
                extensions: single_line_extensions("Entry Title", true),
            },
            FieldKind::Subtitle => Self {
                kind,
                policy: PolicyKind::SingleLine,
                sync_mode: SyncMode::PushOnChange,
                debounce_ms: SUBTITLE_DEBOUNCE_MS,
                event: SmolStr::new_static("subtitle_update"),
                value: PayloadValue::Plain,
                include_plain: false,
                plain_slot: false,
                attributes: EditorAttributes {
                    class: SmolStr::new_static("field-editor field-editor--subtitle"),
                    aria_label: Some(SmolStr::new_static("Subtitle")),
                },
                extensions: single_line_extensions("Subtitle", true),
            },
            FieldKind::Description => Self {
                kind,
                policy: PolicyKind::SingleLine,
                sync_mode: SyncMode::PushOnBlur,
                debounce_ms: 0,
                event: SmolStr::new_static("description_blur"),
                value: PayloadValue::Plain,
                include_plain: false,
                plain_slot: false,
                attributes: EditorAttributes {
                    class: SmolStr::new_static("field-editor field-editor--description"),
                    aria_label: Some(SmolStr::new_static("Description")),
                },
                extensions: single_line_extensions("Description", false),
            },
            FieldKind::Body => Self {
                kind,
                policy: PolicyKind::MultiLine,
                sync_mode: SyncMode::DualFieldWrite,
                debounce_ms: BODY_DEBOUNCE_MS,
                event: SmolStr::new_static("body_update"),
                value: PayloadValue::Formatted,
                include_plain: true,
                plain_slot: true,
                attributes: EditorAttributes {
                    class: SmolStr::new_static("field-editor field-editor--body prose"),
                    aria_label: Some(SmolStr::new_static("Body")),
                },
                extensions: vec![
                    Extension::StarterKit { input_rules: true },
                    Extension::Placeholder {
                        text: "Write something ...".to_string(),
                    },
                    Extension::Link(LinkOptions::default()),
                ],
            },
        }
    }

    /// Apply page-supplied overrides on top of these options.
    pub fn with_overrides(mut self, overrides: FieldOverrides) -> Self {
        if let Some(ms) = overrides.debounce_ms {
            self.debounce_ms = ms;
        }
        if let Some(mode) = overrides.sync_mode {
            self.sync_mode = mode;
        }
        if let Some(event) = overrides.event {
            self.event = event;
        }
        if let Some(value) = overrides.value {
            self.value = value;
        }
        if let Some(include_plain) = overrides.include_plain {
            self.include_plain = include_plain;
        }
        if let Some(plain_slot) = overrides.plain_slot {
            self.plain_slot = plain_slot;
        }
        if let Some(class) = overrides.class {
            self.attributes.class = class;
        }
        if let Some(text) = overrides.placeholder {
            match self
                .extensions
                .iter_mut()
                .find(|e| matches!(e, Extension::Placeholder { .. }))
            {
                Some(placeholder) => *placeholder = Extension::Placeholder { text },
                None => self.extensions.push(Extension::Placeholder { text }),
            }
        }
        self
    }

    /// Key for the primary value in push payloads (`title`, `body`, ...).
    pub fn payload_key(&self) -> &'static str {
        self.kind.as_str()
    }

    /// Key for the plain-text value in push payloads (`title_text`, ...).
    pub fn plain_payload_key(&self) -> String {
        format!("{}_text", self.kind.as_str())
    }
}

// Input rules stay off so typed markdown cannot open a second block.
fn single_line_extensions(placeholder: &str, typography: bool) -> Vec<Extension> {
    let mut extensions = vec![
        Extension::StarterKit { input_rules: false },
        Extension::Placeholder {
            text: placeholder.to_string(),
        },
    ];
    if typography {
        extensions.push(Extension::Typography {
            smart_quotes: false,
            fractions: false,
        });
    }
    extensions
}

/// Optional adjustments to `FieldOptions`, deserialized from page config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldOverrides {
    pub debounce_ms: Option<u32>,
    pub sync_mode: Option<SyncMode>,
    pub event: Option<SmolStr>,
    pub value: Option<PayloadValue>,
    pub include_plain: Option<bool>,
    pub plain_slot: Option<bool>,
    pub class: Option<SmolStr>,
    pub placeholder: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_kind_has_one_sync_mode() {
        assert_eq!(
            FieldOptions::for_kind(FieldKind::Title).sync_mode,
            SyncMode::PushOnChange
        );
        assert_eq!(
            FieldOptions::for_kind(FieldKind::Subtitle).sync_mode,
            SyncMode::PushOnChange
        );
        assert_eq!(
            FieldOptions::for_kind(FieldKind::Description).sync_mode,
            SyncMode::PushOnBlur
        );
        assert_eq!(
            FieldOptions::for_kind(FieldKind::Body).sync_mode,
            SyncMode::DualFieldWrite
        );
    }

    #[test]
    fn only_body_is_multi_line() {
        for kind in FieldKind::ALL {
            let expected = if kind == FieldKind::Body {
                PolicyKind::MultiLine
            } else {
                PolicyKind::SingleLine
            };
            assert_eq!(FieldOptions::for_kind(kind).policy, expected, "{kind}");
        }
    }

    #[test]
    fn kind_round_trips_through_str() {
        for kind in FieldKind::ALL {
            assert_eq!(FieldKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(FieldKind::parse("summary"), None);
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let overrides: FieldOverrides = serde_json::from_str(
            r#"{"debounce_ms": 1200, "placeholder": "Headline"}"#,
        )
        .unwrap();
        let opts = FieldOptions::for_kind(FieldKind::Title).with_overrides(overrides);
        assert_eq!(opts.debounce_ms, 1200);
        assert_eq!(opts.event, "title_update");
        assert_eq!(
            opts.extensions,
            vec![
                Extension::StarterKit { input_rules: false },
                Extension::Placeholder {
                    text: "Headline".to_string()
                },
                Extension::Typography {
                    smart_quotes: false,
                    fractions: false
                },
            ]
        );
    }

    #[test]
    fn server_event_names() {
        let events: Vec<_> = FieldKind::ALL
            .into_iter()
            .map(|kind| FieldOptions::for_kind(kind).event)
            .collect();
        assert_eq!(
            events,
            ["title_update", "subtitle_update", "body_update", "description_blur"]
        );
    }

    #[test]
    fn subtitle_pushes_plain_text_after_a_second() {
        let opts = FieldOptions::for_kind(FieldKind::Subtitle);
        assert_eq!(opts.debounce_ms, 1000);
        assert_eq!(opts.value, PayloadValue::Plain);
        assert!(!opts.include_plain);
    }

    #[test]
    fn body_link_options() {
        let opts = FieldOptions::for_kind(FieldKind::Body);
        let Some(Extension::Link(link)) = opts.extensions.iter().find(|e| e.name() == "link")
        else {
            panic!("body has no link extension");
        };
        assert!(!link.open_on_click);
        assert!(link.autolink);
        assert!(link.link_on_paste);
        assert_eq!(link.default_protocol, "https");
        assert_eq!(link.html_attributes["target"], "_blank");
        assert_eq!(link.html_attributes["rel"], "noopener noreferrer");
    }

    #[test]
    fn extensions_serialize_for_the_engine() {
        let json = serde_json::to_value(FieldOptions::for_kind(FieldKind::Body).extensions).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"name": "starter_kit", "inputRules": true},
                {"name": "placeholder", "text": "Write something ..."},
                {
                    "name": "link",
                    "openOnClick": false,
                    "autolink": true,
                    "linkOnPaste": true,
                    "defaultProtocol": "https",
                    "htmlAttributes": {"rel": "noopener noreferrer", "target": "_blank"}
                }
            ])
        );
    }

    #[test]
    fn overrides_reject_unknown_keys() {
        let err = serde_json::from_str::<FieldOverrides>(r#"{"debounce": 10}"#);
        assert!(err.is_err());
    }

    #[test]
    fn plain_payload_key() {
        let opts = FieldOptions::for_kind(FieldKind::Title);
        assert_eq!(opts.payload_key(), "title");
        assert_eq!(opts.plain_payload_key(), "title_text");
    }
}
