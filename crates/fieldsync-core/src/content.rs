//! Content extraction.
//!
//! A field's content always travels as a pair: the engine's formatted markup
//! and a plain-text projection of it. The plain side is computed from the
//! formatted side every time, never stored on its own, so the two cannot
//! drift apart.

use crate::error::EngineError;
use crate::platform::EditingEngine;

/// Immutable snapshot of a field's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    formatted: String,
    plain: String,
}

impl Content {
    /// Build the pair from formatted markup.
    pub fn from_formatted(formatted: impl Into<String>) -> Self {
        let formatted = formatted.into();
        let plain = plain_text(&formatted);
        Self { formatted, plain }
    }

    pub fn formatted(&self) -> &str {
        &self.formatted
    }

    pub fn plain(&self) -> &str {
        &self.plain
    }

    /// True when the document holds no text at all.
    pub fn is_blank(&self) -> bool {
        self.plain.trim().is_empty()
    }
}

/// Read the engine's current document as a `Content` pair.
pub fn extract<E: EditingEngine>(engine: &E) -> Result<Content, EngineError> {
    engine.formatted().map(Content::from_formatted)
}

const BLOCK_SEPARATOR: &str = "\n\n";

fn is_block_tag(name: &str) -> bool {
    matches!(
        name,
        "p" | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "li"
            | "ul"
            | "ol"
            | "blockquote"
            | "pre"
            | "div"
    )
}

/// Project formatted markup to plain text.
///
/// Tags are dropped, block boundaries become a blank line, `<br>` becomes a
/// newline and character references are decoded.
pub fn plain_text(formatted: &str) -> String {
    let mut out = String::with_capacity(formatted.len());
    let mut pending_block = false;
    let mut rest = formatted;

    while let Some(c) = rest.chars().next() {
        match c {
            '<' => {
                let Some(end) = tag_end(rest) else {
                    push_text(&mut out, &mut pending_block, rest);
                    break;
                };
                let name = tag_name(&rest[1..end]);
                if name == "br" {
                    push_text(&mut out, &mut pending_block, "\n");
                } else if is_block_tag(&name) {
                    pending_block = true;
                }
                rest = &rest[end + 1..];
            }
            '&' => {
                let (decoded, consumed) = decode_reference(rest);
                push_text(&mut out, &mut pending_block, &decoded);
                rest = &rest[consumed..];
            }
            _ => {
                let len = rest.find(['<', '&']).unwrap_or(rest.len());
                push_text(&mut out, &mut pending_block, &rest[..len]);
                rest = &rest[len..];
            }
        }
    }

    out
}

fn push_text(out: &mut String, pending_block: &mut bool, text: &str) {
    if text.is_empty() {
        return;
    }
    if *pending_block && !out.is_empty() {
        out.push_str(BLOCK_SEPARATOR);
    }
    *pending_block = false;
    out.push_str(text);
}

/// Byte offset of the `>` closing the tag at the start of `s`.
///
/// Quoted attribute values may hold a raw `>`, so quotes are skipped over.
fn tag_end(s: &str) -> Option<usize> {
    let mut quote = None;
    for (i, c) in s.char_indices().skip(1) {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(i),
            (None, _) => {}
        }
    }
    None
}

fn tag_name(inner: &str) -> String {
    inner
        .trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Decode a character reference at the start of `s` (which begins with `&`).
///
/// Returns the decoded text and how many bytes were consumed. Unknown or
/// malformed references decode to a literal `&`.
fn decode_reference(s: &str) -> (String, usize) {
    let Some(semi) = s[1..].find(';').map(|i| i + 1).filter(|&i| i <= 10) else {
        return ("&".to_string(), 1);
    };
    let name = &s[1..semi];
    let decoded = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" | "#39" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => numeric_reference(name),
    };
    match decoded {
        Some(c) => (c.to_string(), semi + 1),
        None => ("&".to_string(), 1),
    }
}

fn numeric_reference(name: &str) -> Option<char> {
    let digits = name.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeEngine;

    #[test]
    fn single_paragraph() {
        assert_eq!(plain_text("<p>Hello <strong>world</strong></p>"), "Hello world");
    }

    #[test]
    fn blocks_are_separated_by_blank_line() {
        assert_eq!(
            plain_text("<h2>Intro</h2><p>one</p><ul><li><p>a</p></li><li><p>b</p></li></ul>"),
            "Intro\n\none\n\na\n\nb"
        );
    }

    #[test]
    fn line_breaks() {
        assert_eq!(plain_text("<p>a<br>b<br/>c</p>"), "a\nb\nc");
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(
            plain_text("<p>&lt;tag&gt; &amp; &quot;q&quot; &#39;s&#39; &#x41;&#66;</p>"),
            "<tag> & \"q\" 's' AB"
        );
    }

    #[test]
    fn unknown_entities_stay_literal() {
        assert_eq!(plain_text("<p>fish &chips; & more</p>"), "fish &chips; & more");
    }

    #[test]
    fn attributes_do_not_leak() {
        assert_eq!(
            plain_text(r#"<p>see <a href="https://example.com" target="_blank">here</a></p>"#),
            "see here"
        );
    }

    #[test]
    fn quoted_angle_bracket_stays_in_attribute() {
        assert_eq!(
            plain_text(r#"<p>see <a href="https://x.io/?q=a>b">here</a></p>"#),
            "see here"
        );
        assert_eq!(
            plain_text("<p><a title='1 > 0' href=\"x\">ok</a> done</p>"),
            "ok done"
        );
    }

    #[test]
    fn unterminated_tag_is_text() {
        assert_eq!(plain_text("<p>a < b"), "a < b");
    }

    #[test]
    fn empty_document() {
        let content = Content::from_formatted("<p></p>");
        assert_eq!(content.plain(), "");
        assert!(content.is_blank());
    }

    #[test]
    fn extract_is_idempotent() {
        let engine = FakeEngine::with_paragraphs(&["first", "second & third"]);
        let a = extract(&engine).unwrap();
        let b = extract(&engine).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.plain(), "first\n\nsecond & third");
    }

    #[test]
    fn extract_after_release_fails() {
        let engine = FakeEngine::with_paragraphs(&["x"]);
        engine.doc().borrow_mut().destroyed = true;
        assert_eq!(extract(&engine), Err(EngineError::Released));
    }
}
