//! Plain-text recovery from feed HTML.

use std::sync::LazyLock;

use quick_xml::escape::{resolve_html5_entity, unescape_with};
use regex::{Captures, Regex};

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

/// Candidate character references. Each is resolved on its own so a stray `&`
/// or an unknown name elsewhere in the text never blocks decoding.
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z][a-zA-Z0-9]{1,31});")
        .expect("valid regex")
});

/// Remove tags (each replaced by a space), decode entities and trim.
///
/// Never fails: malformed markup degrades to whatever text survives.
pub(crate) fn strip_html(html: &str) -> String {
    let without_tags = TAG_RE.replace_all(html, " ");
    decode_entities(&without_tags).trim().to_string()
}

/// Decode HTML5 named and numeric character references.
///
/// Unknown names are left verbatim; numeric references to invalid code
/// points become U+FFFD.
pub(crate) fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let reference = &caps[0];
            let normalized = reference.replacen("&#X", "&#x", 1);
            match unescape_with(&normalized, resolve_html5_entity) {
                Ok(decoded) => decoded.into_owned(),
                Err(_) if reference.starts_with("&#") => '\u{fffd}'.to_string(),
                Err(_) => reference.to_string(),
            }
        })
        .into_owned()
}
