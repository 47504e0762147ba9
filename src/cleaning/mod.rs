//! Cleaning and normalization for informal Indonesian review text.
//!
//! Everything here is a pure function of its inputs: the same text and the same
//! [`CleanOptions`] always produce the same output, and degenerate input (an
//! empty string, or an emoji-only review under punctuation removal) yields an
//! empty string rather than an error.


use std::sync::LazyLock;

use regex::Regex;

// `$-_` is a character range: it spans the ASCII punctuation, digits, and
// uppercase letters that show up in URL paths and query strings.
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://[a-zA-Z0-9$-_@.&+!*(),%]+").expect("valid URL pattern")
});

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+").expect("valid email pattern"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Normalization knobs for [`normalize_text`] and [`preprocess_review`].
#[derive(Debug, Clone, Copy)]
pub struct CleanOptions {
    /// Lowercase the text. Default: `true`.
    pub lowercase: bool,
    /// Strip punctuation (anything that is not alphanumeric or whitespace).
    /// Default: `false`.
    pub remove_punctuation: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            lowercase: true,
            remove_punctuation: false,
        }
    }
}

/// Cleans raw review text: decodes common HTML entities, strips URLs and
/// e-mail addresses, and collapses whitespace.
///
/// Marketplace exports frequently contain `&amp;`-style escapes and pasted
/// links; both are noise for summarization.
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = unescape_html(text);
    let text = URL_RE.replace_all(&text, "");
    let text = EMAIL_RE.replace_all(&text, "");
    let text = WHITESPACE_RE.replace_all(&text, " ");

    text.trim().to_string()
}

/// Normalizes text according to `options` (lowercasing, punctuation removal).
pub fn normalize_text(text: &str, options: &CleanOptions) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut text = if options.lowercase {
        text.to_lowercase()
    } else {
        text.to_string()
    };

    if options.remove_punctuation {
        text = text
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .collect();
        text = WHITESPACE_RE.replace_all(&text, " ").into_owned();
    }

    text.trim().to_string()
}

/// Full per-review pipeline: [`clean_text`] followed by [`normalize_text`].
pub fn preprocess_review(text: &str, options: &CleanOptions) -> String {
    normalize_text(&clean_text(text), options)
}

/// Decodes the named character references that actually occur in marketplace
/// review exports. Not a general HTML parser.
fn unescape_html(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
