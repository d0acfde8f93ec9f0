//! speakscore - pronunciation scoring for spoken practice
//!
//! Scores a speech-recognition transcript against the target sentence a
//! learner was asked to say. The core is pure computation: tokenize both
//! strings, align them word by word, and aggregate per-word outcomes into
//! accuracy, fluency, and completeness sub-scores with feedback. A drill
//! layer scores batches of target sentences with multiple attempts each.

pub mod drill;
pub mod scoring;
pub mod types;
