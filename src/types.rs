//! Core types for the speakscore scoring pipeline

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// Classification of a single aligned word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WordStatus {
    Matched,
    Mispronounced,
    Omitted,
    Inserted,
}

impl WordStatus {
    /// Short label used in the text report.
    pub fn label(self) -> &'static str {
        match self {
            WordStatus::Matched => "ok",
            WordStatus::Mispronounced => "mispronounced",
            WordStatus::Omitted => "omitted",
            WordStatus::Inserted => "inserted",
        }
    }
}

/// Outcome for one aligned word pair.
///
/// Omitted outcomes carry an empty `spoken`, inserted outcomes an empty
/// `expected`; both score zero accuracy. Matched and mispronounced outcomes
/// always have both words present.
#[derive(Debug, Clone, Serialize)]
pub struct WordOutcome {
    /// What the learner said ("" when the word was omitted)
    pub spoken: String,
    /// What the target sentence expected ("" for an extra word)
    pub expected: String,
    /// Per-word accuracy on a 0-100 scale
    pub accuracy: f64,
    pub status: WordStatus,
    /// Improvement hint, absent for clean matches
    pub suggestion: Option<String>,
}

/// Aggregate result of scoring one spoken attempt against a target sentence.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    /// Weighted composite score (0-100)
    pub overall: f64,
    /// Fraction of target words spoken correctly (0-100)
    pub accuracy: f64,
    /// Smoothness heuristic penalizing omissions and insertions (0-100)
    pub fluency: f64,
    /// Fraction of target words attempted at all (0-100)
    pub completeness: f64,
    /// Per-word outcomes in alignment order
    pub words: Vec<WordOutcome>,
    /// Improvement tips, never empty
    pub feedback: Vec<String>,
}

impl ScoreReport {
    pub fn grade(&self) -> ScoreGrade {
        ScoreGrade::from_overall(self.overall)
    }
}

/// Qualitative band for an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreGrade {
    Excellent,
    Good,
    Fair,
    NeedsWork,
}

impl ScoreGrade {
    pub fn from_overall(overall: f64) -> Self {
        if overall >= 90.0 {
            ScoreGrade::Excellent
        } else if overall >= 75.0 {
            ScoreGrade::Good
        } else if overall >= 60.0 {
            ScoreGrade::Fair
        } else {
            ScoreGrade::NeedsWork
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreGrade::Excellent => "Excellent!",
            ScoreGrade::Good => "Good Job!",
            ScoreGrade::Fair => "Keep Practicing",
            ScoreGrade::NeedsWork => "Needs Work",
        }
    }
}

/// A practice drill: a named sequence of target sentences, each with the
/// transcripts of the learner's attempts.
#[derive(Debug, Clone)]
pub struct Drill {
    pub name: String,
    pub items: Vec<DrillItem>,
}

/// One drill entry: a target sentence and the recognized attempts at it.
#[derive(Debug, Clone)]
pub struct DrillItem {
    pub target: String,
    pub tips: Vec<String>,
    pub max_attempts: u32,
    pub attempts: Vec<String>,
}

/// Runtime-configurable drill parsed from JSON input
#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeDrill {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub items: Vec<RuntimeDrillItem>,
}

impl RuntimeDrill {
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.items.is_empty(), "Drill must contain at least one item");
        for (idx, item) in self.items.iter().enumerate() {
            item.validate(idx)?;
        }
        Ok(())
    }

    pub fn to_drill(&self) -> Drill {
        let mut items = Vec::with_capacity(self.items.len());
        for item in &self.items {
            items.push(item.to_drill_item());
        }
        Drill {
            name: self.name.clone().unwrap_or_else(|| "runtime".to_string()),
            items,
        }
    }
}

/// Runtime-configurable drill item parsed from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeDrillItem {
    #[serde(alias = "text", alias = "targetText")]
    pub target: String,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default = "default_max_attempts", alias = "maxAttempts")]
    pub max_attempts: u32,
    #[serde(default)]
    pub attempts: Vec<String>,
}

fn default_max_attempts() -> u32 {
    3
}

impl RuntimeDrillItem {
    fn validate(&self, index: usize) -> Result<()> {
        ensure!(
            !self.target.trim().is_empty(),
            "Drill item {} target must not be empty",
            index
        );
        ensure!(
            self.max_attempts > 0,
            "Drill item {} max_attempts must be greater than zero",
            index
        );
        ensure!(
            !self.attempts.is_empty(),
            "Drill item {} must record at least one attempt",
            index
        );
        ensure!(
            self.attempts.len() <= self.max_attempts as usize,
            "Drill item {} records {} attempts, more than max_attempts {}",
            index,
            self.attempts.len(),
            self.max_attempts
        );
        Ok(())
    }

    fn to_drill_item(&self) -> DrillItem {
        DrillItem {
            target: self.target.clone(),
            tips: self.tips.clone(),
            max_attempts: self.max_attempts,
            attempts: self.attempts.clone(),
        }
    }
}
