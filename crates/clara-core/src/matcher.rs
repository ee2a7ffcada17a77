//! Scoring engine: picks the best knowledge-base entry for a question.
//!
//! Deterministic and pure. A multi-word trigger that occurs as a contiguous
//! substring of the normalized question text scores 5; a trigger present in
//! the filtered token list scores 1. Scores add up across an entry's
//! triggers, and the first entry to reach the maximum score wins: the best
//! score is only displaced by a strictly greater one, so definition order
//! breaks ties.

use crate::base::{Entry, KnowledgeBase};
use crate::normalize::{normalize, Normalized};
use serde::Serialize;
use tracing::debug;

/// Points for a multi-word trigger found in the full normalized text.
const PHRASE_MATCH: u32 = 5;
/// Points for a trigger found in the token sequence.
const TOKEN_MATCH: u32 = 1;

/// The winning entry for a question.
#[derive(Debug, Clone, Serialize)]
pub struct BestMatch {
    /// Position of the winning entry in the base.
    pub index: usize,
    /// Accumulated score across the entry's triggers.
    pub score: u32,
    /// Triggers that contributed to the score, in entry order.
    pub matched_triggers: Vec<String>,
    /// The winning response, verbatim.
    pub response: String,
}

/// Score one entry against a normalized question.
fn score_entry(entry: &Entry, question: &Normalized) -> (u32, Vec<String>) {
    let mut score = 0;
    let mut matched = Vec::new();
    for trigger in &entry.triggers {
        let is_phrase = trigger.split_whitespace().count() > 1;
        if is_phrase && question.text.contains(trigger.as_str()) {
            score += PHRASE_MATCH;
            matched.push(trigger.clone());
        } else if question.tokens.iter().any(|t| t == trigger) {
            // A phrase that missed the substring test also lands here, but
            // can never equal a single token.
            score += TOKEN_MATCH;
            matched.push(trigger.clone());
        }
    }
    (score, matched)
}

/// Find the best-scoring entry for a question.
///
/// Returns `None` when no trigger in any entry matched (best score 0) or the
/// base is empty. Safe to call concurrently against one snapshot.
pub fn best_match(question: &str, base: &KnowledgeBase) -> Option<BestMatch> {
    let normalized = normalize(question);

    let mut best: Option<BestMatch> = None;
    for (index, entry) in base.entries().iter().enumerate() {
        let (score, matched_triggers) = score_entry(entry, &normalized);
        if score > best.as_ref().map_or(0, |b| b.score) {
            best = Some(BestMatch {
                index,
                score,
                matched_triggers,
                response: entry.response.clone(),
            });
        }
    }

    if let Some(b) = &best {
        debug!("Question matched entry {} with score {}", b.index, b.score);
    }
    best
}

/// Answer a question from the given snapshot.
///
/// Returns the winning response verbatim, or `fallback` when nothing scored
/// above zero. "No match" is a normal outcome, not an error.
pub fn answer(question: &str, base: &KnowledgeBase, fallback: &str) -> String {
    match best_match(question, base) {
        Some(m) => m.response,
        None => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "Não sei responder.";

    fn entry(triggers: &[&str], response: &str) -> Entry {
        Entry {
            triggers: triggers.iter().map(|t| t.to_lowercase()).collect(),
            response: response.to_string(),
        }
    }

    fn base_of(entries: Vec<Entry>) -> KnowledgeBase {
        KnowledgeBase::from_entries(entries)
    }

    #[test]
    fn test_token_scores_accumulate() {
        let base = base_of(vec![
            entry(&["missa"], "R1"),
            entry(&["missa", "horário"], "R2"),
        ]);
        let m = best_match("qual o horário da missa", &base).unwrap();
        // A scores 1, B scores 2.
        assert_eq!(m.index, 1);
        assert_eq!(m.score, 2);
        assert_eq!(m.response, "R2");
        assert_eq!(m.matched_triggers, vec!["missa", "horário"]);
    }

    #[test]
    fn test_phrase_beats_single_words() {
        let base = base_of(vec![
            entry(&["horário da missa"], "R1"),
            entry(&["missa"], "R2"),
        ]);
        let m = best_match("qual o horário da missa", &base).unwrap();
        assert_eq!(m.index, 0);
        assert_eq!(m.score, 5);
        assert_eq!(m.response, "R1");
    }

    #[test]
    fn test_phrase_matches_through_stopwords() {
        // "da" never survives tokenization, but phrases run on the full text.
        let base = base_of(vec![entry(&["contato da secretaria"], "R1")]);
        let m = best_match("Qual é o contato da secretaria?", &base).unwrap();
        assert_eq!(m.score, 5);
    }

    #[test]
    fn test_missed_phrase_scores_nothing() {
        // The phrase is absent from the text, and a two-word trigger can
        // never equal a single token.
        let base = base_of(vec![entry(&["missa de domingo"], "R1")]);
        assert!(best_match("quando é a missa", &base).is_none());
    }

    #[test]
    fn test_tie_keeps_earlier_entry() {
        let base = base_of(vec![
            entry(&["missa"], "R1"),
            entry(&["missa"], "R2"),
        ]);
        let m = best_match("horário da missa", &base).unwrap();
        assert_eq!(m.index, 0);
        assert_eq!(m.response, "R1");
    }

    #[test]
    fn test_no_match_returns_fallback_exactly() {
        let base = base_of(vec![entry(&["missa"], "R1")]);
        assert_eq!(answer("onde fica o estacionamento", &base, FALLBACK), FALLBACK);
    }

    #[test]
    fn test_empty_base_returns_fallback() {
        let base = KnowledgeBase::empty();
        assert_eq!(answer("qual o horário da missa", &base, FALLBACK), FALLBACK);
    }

    #[test]
    fn test_empty_question_scores_zero_everywhere() {
        let base = base_of(vec![entry(&["missa"], "R1")]);
        assert!(best_match("", &base).is_none());
        assert!(best_match("   ", &base).is_none());
    }

    #[test]
    fn test_punctuated_question_still_matches() {
        let base = base_of(vec![entry(&["batismo"], "R1")]);
        let m = best_match("Batismo?!", &base).unwrap();
        assert_eq!(m.score, 1);
    }

    // Golden test: mixed phrase and word triggers across several entries.
    #[test]
    fn golden_best_match_selection() {
        let base = base_of(vec![
            entry(&["missa", "culto"], "Horários das missas."),
            entry(&["horário da missa", "missa"], "Horário detalhado."),
            entry(&["batismo", "batizado"], "Inscrições na secretaria."),
        ]);
        // Entry 1 scores 5 + 1 = 6, entry 0 scores 1.
        let m = best_match("qual o horário da missa?", &base).unwrap();
        assert_eq!(m.index, 1);
        assert_eq!(m.score, 6);
        assert_eq!(m.matched_triggers, vec!["horário da missa", "missa"]);

        let m = best_match("como faço o batizado do meu filho", &base).unwrap();
        assert_eq!(m.index, 2);
        assert_eq!(m.score, 1);
    }
}
