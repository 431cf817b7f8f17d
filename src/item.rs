//! Item text preparation: markup stripping and base64 encoding.
//!
//! Item text copied from the game client carries inline markup such as
//! `<<set:MS>>` or `<default>{...}`. The pricing service expects plain text,
//! base64-encoded.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use regex::Regex;
use std::sync::OnceLock;

static MARKUP_REGEX: OnceLock<Regex> = OnceLock::new();

fn markup_regex() -> &'static Regex {
    // The doubled form must come first in the alternation, otherwise `<<a>>`
    // would match as `<<a>` and leave a stray `>` behind.
    MARKUP_REGEX.get_or_init(|| Regex::new(r"<<.*?>>|<.*?>").expect("markup pattern is valid"))
}

/// Removes `<<...>>` and `<...>` tags, leaving everything else untouched.
pub fn sanitize_item_text(item_text: &str) -> String {
    markup_regex().replace_all(item_text, "").into_owned()
}

/// Standard (padded) base64 of the UTF-8 bytes of `item_text`.
pub fn encode_item_text(item_text: &str) -> String {
    STANDARD.encode(item_text.as_bytes())
}
