//! HTML character reference decoding
//!
//! Follows the HTML5 rules browsers apply to text: named references may lack
//! their semicolon when they are one of the legacy names, a legacy name may be
//! glued to following text, and numeric references need no semicolon either.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

static CHARREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+;?|#[xX][0-9a-fA-F]+;?|[^\t\n\x0C <&#;]{1,32};?)")
        .expect("valid character reference regex")
});

const REPLACEMENT: char = '\u{FFFD}';

/// Named references recognized without a trailing semicolon
const LEGACY_ENTITIES: &[&str] = &[
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil",
    "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT",
    "Ntilde", "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN",
    "Uacute", "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig", "agrave",
    "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent", "copy", "curren",
    "deg", "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12", "frac14", "frac34",
    "gt", "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo", "lt", "macr", "micro",
    "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf", "ordm", "oslash",
    "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo", "reg", "sect", "shy", "sup1",
    "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc", "ugrave", "uml", "uuml",
    "yacute", "yen", "yuml",
];

/// Windows-1252 meaning of the C1 range, as browsers decode `&#128;` and friends
const WINDOWS_1252_C1: [char; 32] = [
    '\u{20AC}', '\u{81}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{8D}', '\u{017D}', '\u{8F}',
    '\u{90}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{9D}', '\u{017E}', '\u{0178}',
];

/// Decode every named and numeric character reference in `text`
pub fn unescape_html(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    CHARREF_RE.replace_all(text, |caps: &Captures| decode_reference(&caps[1]))
}

fn decode_reference(reference: &str) -> String {
    match reference.strip_prefix('#') {
        Some(number) => decode_numeric(number.trim_end_matches(';')),
        None => decode_named(reference),
    }
}

fn decode_numeric(number: &str) -> String {
    let code = match number.strip_prefix('x').or_else(|| number.strip_prefix('X')) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => number.parse::<u32>(),
    };
    // Only overflow can fail here, and that is past the last code point anyway
    let Ok(code) = code else {
        return REPLACEMENT.to_string();
    };

    match code {
        0x00 => REPLACEMENT.to_string(),
        0x0D => "\r".to_string(),
        0x80..=0x9F => WINDOWS_1252_C1[(code - 0x80) as usize].to_string(),
        0xD800..=0xDFFF => REPLACEMENT.to_string(),
        _ if is_dropped_code_point(code) => String::new(),
        _ => char::from_u32(code).unwrap_or(REPLACEMENT).to_string(),
    }
}

/// Control characters and noncharacters, which decode to nothing
fn is_dropped_code_point(code: u32) -> bool {
    matches!(code, 0x01..=0x08 | 0x0B | 0x0E..=0x1F | 0x7F | 0xFDD0..=0xFDEF)
        || (code <= 0x10FFFF && code & 0xFFFE == 0xFFFE)
}

fn decode_named(reference: &str) -> String {
    if reference.ends_with(';') {
        if let Some(decoded) = lookup(&format!("&{}", reference)) {
            return decoded;
        }
    } else if LEGACY_ENTITIES.contains(&reference) {
        return decode_legacy(reference);
    }

    // Longest legacy name at the start; the rest is plain text
    for end in (2..reference.len()).rev() {
        if !reference.is_char_boundary(end) {
            continue;
        }
        let name = &reference[..end];
        if LEGACY_ENTITIES.contains(&name) {
            return format!("{}{}", decode_legacy(name), &reference[end..]);
        }
    }

    format!("&{}", reference)
}

fn decode_legacy(name: &str) -> String {
    lookup(&format!("&{};", name)).unwrap_or_else(|| format!("&{}", name))
}

/// Decode one complete `&name;` reference, `None` when the name is unknown
fn lookup(entity: &str) -> Option<String> {
    let decoded = html_escape::decode_html_entities(entity);
    (decoded != entity).then(|| decoded.into_owned())
}
