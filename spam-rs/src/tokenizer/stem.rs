//! Rule-based stemming and stop words

use std::collections::HashSet;
use std::sync::LazyLock;

/// Suffixes tried in order; at most one is removed
const SUFFIXES: &[&str] = &["ing", "ed", "es", "s"];

/// Prefixes tried in order; at most one is removed
const PREFIXES: &[&str] = &["dis", "pre", "un", "re"];

const STOP_WORDS: &[&str] = &[
    "the", "to", "and", "of", "in", "is", "for", "it", "on", "with", "this", "that", "from",
    "are", "be", "you", "your", "we", "will", "not", "can", "as", "by", "or", "if", "all",
];

static STOP_WORDS_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS_SET.contains(word)
}

/// Strip one suffix, then independently one prefix.
///
/// An edit only happens when the word is longer than the stripped part plus
/// two characters.
pub fn stem(word: &str) -> String {
    let mut word = word;

    for suffix in SUFFIXES {
        if word.chars().count() <= suffix.len() + 2 {
            continue;
        }
        if let Some(stripped) = word.strip_suffix(suffix) {
            word = stripped;
            break;
        }
    }

    for prefix in PREFIXES {
        if word.chars().count() <= prefix.len() + 2 {
            continue;
        }
        if let Some(stripped) = word.strip_prefix(prefix) {
            word = stripped;
            break;
        }
    }

    word.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stem_suffix() {
        assert_eq!(stem("offering"), "offer");
        assert_eq!(stem("clicked"), "click");
        assert_eq!(stem("boxes"), "box");
        assert_eq!(stem("prices"), "pric");
        assert_eq!(stem("winners"), "winner");
    }

    #[test]
    fn test_stem_prefix() {
        assert_eq!(stem("unsubscribe"), "subscribe");
        assert_eq!(stem("resend"), "send");
        assert_eq!(stem("preview"), "view");
    }

    #[test]
    fn test_stem_suffix_then_prefix() {
        assert_eq!(stem("discounts"), "count");
        assert_eq!(stem("unlocked"), "lock");
    }

    #[test]
    fn test_stem_single_pass() {
        // "ings" loses only the trailing "s"
        assert_eq!(stem("pings"), "ping");
        // "rere..." loses only the first "re"
        assert_eq!(stem("rereads"), "read");
    }

    #[test]
    fn test_stem_length_guard() {
        // Stripping "ing" from "reading" leaves "read", too short for "re"
        assert_eq!(stem("reading"), "read");
        // Too short for "ing": length must exceed 5
        assert_eq!(stem("thing"), "thing");
        assert_eq!(stem("bring"), "bring");
    }

    #[test]
    fn test_stop_words() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("your"));
        assert!(!is_stop_word("free"));
        assert!(!is_stop_word("now"));
    }
}
