//! Email text tokenizer
//!
//! Turns a decoded email body into normalized tokens. The pipeline runs in a
//! fixed order:
//!
//! 1. Quoted-printable decode, then lossy UTF-8 decode
//! 2. Lowercase
//! 3. HTML/XML entity decode
//! 4. Strip tags
//! 5. Replace URLs, email addresses, numbers and currencies with placeholders
//! 6. Replace everything outside `[a-z0-9]` with spaces
//! 7. Collapse whitespace
//! 8. Split into words
//! 9. Drop short words and stop words, stem words longer than four characters

pub mod entities;
pub mod stem;

use regex::Regex;
use std::sync::LazyLock;

use crate::mime::decode_quoted_printable;

pub use entities::unescape_html;
pub use stem::{is_stop_word, stem};

/// A normalized unit of text used as a classification feature
pub type Token = String;

pub const URL_PLACEHOLDER: &str = "httpaddr";
pub const EMAIL_PLACEHOLDER: &str = "emailaddr";
pub const NUMBER_PLACEHOLDER: &str = "number";
pub const CURRENCY_PLACEHOLDER: &str = "currency";

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(http|https)://[^\s]+").expect("valid URL regex"));
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}").expect("valid email regex")
});
static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+(\.\d+)?\b").expect("valid number regex"));
static CURRENCY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\$|€|eur|usd)").expect("valid currency regex"));
static HTML_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^<>]+>").expect("valid tag regex"));
static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid non-word regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Words of this length or shorter are never stemmed
const MAX_UNSTEMMED_LEN: usize = 4;

/// Email body tokenizer
pub struct Tokenizer;

impl Tokenizer {
    /// Tokenize a decoded body. Absent or empty input yields no tokens.
    pub fn tokenize(body: Option<&[u8]>) -> Vec<Token> {
        match body {
            Some(bytes) if !bytes.is_empty() => Self::tokenize_bytes(bytes),
            _ => Vec::new(),
        }
    }

    fn tokenize_bytes(bytes: &[u8]) -> Vec<Token> {
        let decoded = decode_quoted_printable(bytes);
        let text = Self::normalize(&String::from_utf8_lossy(&decoded));

        text.split(' ')
            .filter(|word| word.chars().count() > 1 && !is_stop_word(word))
            .map(|word| {
                if word.chars().count() > MAX_UNSTEMMED_LEN {
                    stem(word)
                } else {
                    word.to_string()
                }
            })
            .collect()
    }

    /// Steps 2 to 7: a single space separated line of `[a-z0-9]` words
    fn normalize(text: &str) -> String {
        let text = text.to_lowercase();
        let text = unescape_html(&text);
        let text = HTML_RE.replace_all(&text, " ");

        // Placeholder order matters: URLs may contain '@' and digits
        let text = URL_RE.replace_all(&text, " httpaddr ");
        let text = EMAIL_RE.replace_all(&text, " emailaddr ");
        let text = NUMBER_RE.replace_all(&text, " number ");
        let text = CURRENCY_RE.replace_all(&text, " currency ");

        let text = NON_WORD_RE.replace_all(&text, " ");
        let text = WHITESPACE_RE.replace_all(&text, " ");

        text.trim().to_string()
    }
}
