//! Pronunciation scoring core.
//!
//! Pure, synchronous computation over two strings: the target sentence and
//! the transcript the speech recognizer produced for the learner's attempt.
//! Tokenize both, align them word by word, then fold the per-word outcomes
//! into accuracy, completeness, and fluency sub-scores plus feedback.

pub mod alignment;
pub mod similarity;
pub mod tokenizer;

pub use alignment::AlignmentStrategy;

use crate::types::{ScoreReport, WordOutcome, WordStatus};

const ACCURACY_WEIGHT: f64 = 0.4;
const FLUENCY_WEIGHT: f64 = 0.3;
const COMPLETENESS_WEIGHT: f64 = 0.3;
const GAP_PENALTY: f64 = 10.0;

/// Scores one spoken attempt against a target sentence with the default
/// positional alignment.
pub fn score(expected_text: &str, actual_text: &str) -> ScoreReport {
    score_with(expected_text, actual_text, AlignmentStrategy::default())
}

/// Scores one spoken attempt with an explicit alignment strategy.
pub fn score_with(
    expected_text: &str,
    actual_text: &str,
    strategy: AlignmentStrategy,
) -> ScoreReport {
    let expected_words = tokenizer::tokenize(expected_text);
    let actual_words = tokenizer::tokenize(actual_text);
    let words = alignment::align(&expected_words, &actual_words, strategy);

    let accuracy = accuracy_score(&words, expected_words.len());
    let completeness = completeness_score(expected_words.len(), actual_words.len());
    let fluency = fluency_score(&words);
    let overall = overall_score(accuracy, fluency, completeness);
    let feedback = build_feedback(accuracy, fluency, completeness);

    ScoreReport {
        overall,
        accuracy,
        fluency,
        completeness,
        words,
        feedback,
    }
}

fn count_status(words: &[WordOutcome], status: WordStatus) -> usize {
    words.iter().filter(|w| w.status == status).count()
}

fn accuracy_score(words: &[WordOutcome], expected_len: usize) -> f64 {
    let matched = count_status(words, WordStatus::Matched);
    100.0 * matched as f64 / expected_len.max(1) as f64
}

fn completeness_score(expected_len: usize, actual_len: usize) -> f64 {
    100.0 * actual_len.min(expected_len) as f64 / expected_len.max(1) as f64
}

/// Match ratio over all outcomes, minus ten points per omitted or inserted
/// word, floored at zero.
fn fluency_score(words: &[WordOutcome]) -> f64 {
    let matched = count_status(words, WordStatus::Matched);
    let gaps = count_status(words, WordStatus::Omitted) + count_status(words, WordStatus::Inserted);

    let base = 100.0 * matched as f64 / words.len().max(1) as f64;
    let penalty = GAP_PENALTY * gaps as f64;
    (base - penalty).max(0.0)
}

fn overall_score(accuracy: f64, fluency: f64, completeness: f64) -> f64 {
    let composite =
        ACCURACY_WEIGHT * accuracy + FLUENCY_WEIGHT * fluency + COMPLETENESS_WEIGHT * completeness;
    composite.clamp(0.0, 100.0)
}

fn build_feedback(accuracy: f64, fluency: f64, completeness: f64) -> Vec<String> {
    let mut feedback = Vec::new();
    if accuracy < 70.0 {
        feedback.push("Practice pronunciation of individual words".to_string());
    }
    if completeness < 80.0 {
        feedback.push("Try to speak all the words clearly".to_string());
    }
    if fluency < 70.0 {
        feedback.push("Work on speaking more smoothly and naturally".to_string());
    }
    if feedback.is_empty() {
        feedback.push("Great job! Keep practicing to improve even more".to_string());
    }
    feedback
}
