//! Text normalization for triggers and questions.
//!
//! Produces the comparable form used on both sides of matching: the
//! lower-cased, punctuation-stripped text plus its stopword-filtered tokens.
//! Phrase triggers are matched as substrings of the full text, word triggers
//! against the token list, so both forms are returned together.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Portuguese function words excluded from word-level matching.
///
/// Closed list, not user-editable. Phrase matching runs on the full text, so
/// a phrase trigger containing one of these still matches verbatim.
pub const STOPWORDS: [&str; 27] = [
    "o", "a", "os", "as", "de", "do", "da", "dos", "das", "em", "no", "na",
    "nos", "nas", "para", "por", "que", "e", "ou", "um", "uma", "como", "é",
    "ser", "ter", "ao", "aos",
];

static STOPWORD_SET: LazyLock<BTreeSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

/// Anything that is not a word character (letter, digit, underscore) or
/// whitespace becomes a single space. Unicode classes keep accented letters
/// intact, so word boundaries survive punctuation stripping.
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());

/// Normalized form of a question or trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// Lower-cased text with punctuation replaced by spaces. Stopwords kept.
    pub text: String,
    /// Whitespace-split tokens with stopwords removed. Order preserved.
    pub tokens: Vec<String>,
}

/// Normalize free text for matching.
///
/// Lower-cases (Unicode-aware), strips punctuation to spaces, splits on
/// whitespace and drops stopwords. Runs of whitespace are left as-is in
/// `text`: only individual punctuation characters are replaced.
pub fn normalize(input: &str) -> Normalized {
    let lowered = input.to_lowercase();
    let text = NON_WORD.replace_all(&lowered, " ").into_owned();
    let tokens = text
        .split_whitespace()
        .filter(|t| !STOPWORD_SET.contains(t))
        .map(String::from)
        .collect();
    Normalized { text, tokens }
}

/// Check whether a token is in the stopword list.
pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_punctuation_and_stopwords() {
        let n = normalize("Qual o horário da missa?");
        assert_eq!(n.tokens, vec!["qual", "horário", "missa"]);
        assert!(!n.tokens.contains(&"o".to_string()));
        assert!(!n.tokens.contains(&"da".to_string()));
        assert!(!n.text.contains('?'));
    }

    #[test]
    fn test_full_text_keeps_stopwords() {
        let n = normalize("Qual o horário da missa?");
        assert!(n.text.contains("o horário da missa"));
    }

    #[test]
    fn test_lowercases_accented_letters() {
        let n = normalize("MISSA ÀS 19H NA CAPELA");
        assert!(n.tokens.contains(&"às".to_string()));
        assert!(n.tokens.contains(&"19h".to_string()));
        assert!(n.tokens.contains(&"capela".to_string()));
        // "na" is a stopword, "às" is not
        assert!(!n.tokens.contains(&"na".to_string()));
    }

    #[test]
    fn test_word_chars_survive() {
        let n = normalize("missa_19h30 dia 25/12");
        assert!(n.tokens.contains(&"missa_19h30".to_string()));
        assert!(n.tokens.contains(&"25".to_string()));
        assert!(n.tokens.contains(&"12".to_string()));
    }

    #[test]
    fn test_punctuation_becomes_single_space_each() {
        // Each stripped char maps to one space; existing spaces are kept.
        let n = normalize("missa!? hoje");
        assert_eq!(n.text, "missa   hoje");
        assert_eq!(n.tokens, vec!["missa", "hoje"]);
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(normalize("").tokens.is_empty());
        assert!(normalize("   \t ").tokens.is_empty());
    }

    #[test]
    fn test_stopword_list_closed() {
        assert!(is_stopword("da"));
        assert!(is_stopword("é"));
        assert!(!is_stopword("missa"));
        assert_eq!(STOPWORDS.len(), 27);
    }
}
