//! Alignment engine pairing expected words with the learner's transcript.
//!
//! Positional comparison keeps the engine cheap for the short, fixed target
//! sentences drills use. A word dropped mid-utterance shifts every later
//! pair, which then reads as omitted + inserted; the `Sequence` strategy
//! re-pairs across such shifts and is available when that matters.

pub mod sequence;

use clap::ValueEnum;

use super::similarity::similarity;
use crate::types::{WordOutcome, WordStatus};

/// Similarity at or above this counts as a match.
pub const MATCH_THRESHOLD: f64 = 0.9;

/// How the expected and actual word sequences are paired up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum AlignmentStrategy {
    /// Strict index-by-index pairing
    #[default]
    Positional,
    /// Edit-distance backtrace over the word sequences
    Sequence,
}

/// Aligns the two token sequences with the requested strategy.
pub fn align(
    expected_words: &[String],
    actual_words: &[String],
    strategy: AlignmentStrategy,
) -> Vec<WordOutcome> {
    match strategy {
        AlignmentStrategy::Positional => align_positional(expected_words, actual_words),
        AlignmentStrategy::Sequence => sequence::align_sequence(expected_words, actual_words),
    }
}

/// Index-aligned comparison: expected word i against actual word i, then any
/// surplus actual words flagged as insertions.
pub fn align_positional(expected_words: &[String], actual_words: &[String]) -> Vec<WordOutcome> {
    let mut outcomes = Vec::with_capacity(expected_words.len().max(actual_words.len()));

    for (index, expected) in expected_words.iter().enumerate() {
        match actual_words.get(index) {
            Some(spoken) => outcomes.push(pair_outcome(expected, spoken)),
            None => outcomes.push(omitted_outcome(expected)),
        }
    }

    for spoken in actual_words.iter().skip(expected_words.len()) {
        outcomes.push(inserted_outcome(spoken));
    }

    outcomes
}

/// Classifies one expected/spoken pair by similarity.
pub(crate) fn pair_outcome(expected: &str, spoken: &str) -> WordOutcome {
    let sim = similarity(expected, spoken);
    if sim >= MATCH_THRESHOLD {
        WordOutcome {
            spoken: spoken.to_string(),
            expected: expected.to_string(),
            accuracy: 100.0,
            status: WordStatus::Matched,
            suggestion: None,
        }
    } else {
        WordOutcome {
            spoken: spoken.to_string(),
            expected: expected.to_string(),
            accuracy: sim * 100.0,
            status: WordStatus::Mispronounced,
            suggestion: Some(format!("Try: {expected}")),
        }
    }
}

pub(crate) fn omitted_outcome(expected: &str) -> WordOutcome {
    WordOutcome {
        spoken: String::new(),
        expected: expected.to_string(),
        accuracy: 0.0,
        status: WordStatus::Omitted,
        suggestion: Some(format!("Remember to say: {expected}")),
    }
}

pub(crate) fn inserted_outcome(spoken: &str) -> WordOutcome {
    WordOutcome {
        spoken: spoken.to_string(),
        expected: String::new(),
        accuracy: 0.0,
        status: WordStatus::Inserted,
        suggestion: Some("Extra word detected".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn identical_sequences_all_match() {
        let expected = words(&["the", "cat", "sat"]);
        let outcomes = align_positional(&expected, &expected);

        assert_eq!(outcomes.len(), 3);
        for outcome in &outcomes {
            assert_eq!(outcome.status, WordStatus::Matched);
            assert_eq!(outcome.accuracy, 100.0);
            assert!(outcome.suggestion.is_none());
        }
    }

    #[test]
    fn dissimilar_word_is_mispronounced_with_suggestion() {
        let expected = words(&["the", "cat", "sat"]);
        let actual = words(&["the", "dog", "sat"]);
        let outcomes = align_positional(&expected, &actual);

        assert_eq!(outcomes[1].status, WordStatus::Mispronounced);
        assert!(outcomes[1].accuracy < 90.0);
        assert_eq!(outcomes[1].suggestion.as_deref(), Some("Try: cat"));
        assert_eq!(outcomes[0].status, WordStatus::Matched);
        assert_eq!(outcomes[2].status, WordStatus::Matched);
    }

    #[test]
    fn short_attempt_marks_tail_omitted() {
        let expected = words(&["the", "cat", "sat", "on", "the", "mat"]);
        let actual = words(&["the", "cat", "sat"]);
        let outcomes = align_positional(&expected, &actual);

        assert_eq!(outcomes.len(), 6);
        for outcome in &outcomes[3..] {
            assert_eq!(outcome.status, WordStatus::Omitted);
            assert!(outcome.spoken.is_empty());
            assert_eq!(outcome.accuracy, 0.0);
        }
        assert_eq!(outcomes[3].suggestion.as_deref(), Some("Remember to say: on"));
    }

    #[test]
    fn surplus_words_are_inserted() {
        let expected = words(&["hello"]);
        let actual = words(&["hello", "there", "now"]);
        let outcomes = align_positional(&expected, &actual);

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].status, WordStatus::Matched);
        for outcome in &outcomes[1..] {
            assert_eq!(outcome.status, WordStatus::Inserted);
            assert!(outcome.expected.is_empty());
            assert_eq!(outcome.accuracy, 0.0);
            assert_eq!(outcome.suggestion.as_deref(), Some("Extra word detected"));
        }
    }

    #[test]
    fn mid_sentence_drop_cascades_positionally() {
        // The positional strategy intentionally misreads everything after a
        // dropped middle word.
        let expected = words(&["the", "cat", "sat", "down"]);
        let actual = words(&["the", "sat", "down"]);
        let outcomes = align_positional(&expected, &actual);

        assert_eq!(outcomes[0].status, WordStatus::Matched);
        assert_ne!(outcomes[1].status, WordStatus::Matched);
        assert_ne!(outcomes[2].status, WordStatus::Matched);
    }

    #[test]
    fn near_match_at_threshold_counts_as_matched() {
        // "recognize" vs "recognise": 1 edit over 9 chars, sim ~0.889 < 0.9
        let expected = words(&["recognize"]);
        let actual = words(&["recognise"]);
        let outcomes = align_positional(&expected, &actual);
        assert_eq!(outcomes[0].status, WordStatus::Mispronounced);

        // "recognized" vs "recognised": 1 edit over 10 chars, sim 0.9
        let expected = words(&["recognized"]);
        let actual = words(&["recognised"]);
        let outcomes = align_positional(&expected, &actual);
        assert_eq!(outcomes[0].status, WordStatus::Matched);
    }
}
