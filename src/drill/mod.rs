//! Drill runner - scores every attempt of a practice drill
//!
//! Pure function module: takes a validated `Drill` and an alignment strategy,
//! returns per-item reports with the best attempt highlighted plus a drill
//! average. No side effects beyond tracing events.

use serde::Serialize;
use tracing::{debug, info};

use crate::scoring::{score_with, AlignmentStrategy};
use crate::types::{Drill, DrillItem, ScoreReport};

/// Scored results for a whole drill run.
#[derive(Debug, Clone, Serialize)]
pub struct DrillReport {
    pub name: String,
    pub items: Vec<ItemReport>,
    /// Mean of the per-item best overall scores
    pub average: f64,
}

/// Scored results for one drill item.
#[derive(Debug, Clone, Serialize)]
pub struct ItemReport {
    pub target: String,
    /// One report per attempt, in the order the learner made them
    pub attempts: Vec<ScoreReport>,
    /// Index into `attempts` of the best attempt (earliest wins ties)
    pub best_attempt: usize,
    pub best_overall: f64,
}

/// Scores each attempt of each drill item with the given strategy.
pub fn run_drill(drill: &Drill, strategy: AlignmentStrategy) -> DrillReport {
    info!(
        drill = %drill.name,
        items = drill.items.len(),
        "scoring drill"
    );

    let items: Vec<ItemReport> = drill
        .items
        .iter()
        .map(|item| score_item(item, strategy))
        .collect();

    let average = if items.is_empty() {
        0.0
    } else {
        items.iter().map(|item| item.best_overall).sum::<f64>() / items.len() as f64
    };

    DrillReport {
        name: drill.name.clone(),
        items,
        average,
    }
}

fn score_item(item: &DrillItem, strategy: AlignmentStrategy) -> ItemReport {
    let attempts: Vec<ScoreReport> = item
        .attempts
        .iter()
        .map(|attempt| score_with(&item.target, attempt, strategy))
        .collect();

    let mut best_attempt = 0;
    let mut best_overall = 0.0;
    for (index, report) in attempts.iter().enumerate() {
        debug!(
            sentence = %item.target,
            attempt = index + 1,
            overall = report.overall,
            "scored attempt"
        );
        if report.overall > best_overall {
            best_attempt = index;
            best_overall = report.overall;
        }
    }

    info!(
        sentence = %item.target,
        best_attempt = best_attempt + 1,
        best_overall,
        "scored drill item"
    );

    ItemReport {
        target: item.target.clone(),
        attempts,
        best_attempt,
        best_overall,
    }
}
