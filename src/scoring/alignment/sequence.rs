use super::{inserted_outcome, omitted_outcome, pair_outcome};
use crate::scoring::similarity::similarity;
use crate::types::WordOutcome;

const GAP_COST: f64 = 1.0;

/// Edit step chosen for a cell of the alignment table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Pair,
    Omit,
    Insert,
}

/// Aligns the word sequences by edit distance with backtrace.
///
/// Pairing a near-miss costs `1 - similarity`, so a mispronounced word stays
/// paired with its target instead of splitting into an omission plus an
/// insertion; dropping or adding a word costs one gap. Outcomes come back in
/// sentence order.
pub fn align_sequence(expected_words: &[String], actual_words: &[String]) -> Vec<WordOutcome> {
    let m = expected_words.len();
    let n = actual_words.len();

    let mut dp = vec![vec![0.0f64; n + 1]; m + 1];
    let mut steps = vec![vec![Step::Pair; n + 1]; m + 1];
    for i in 1..=m {
        dp[i][0] = i as f64 * GAP_COST;
        steps[i][0] = Step::Omit;
    }
    for j in 1..=n {
        dp[0][j] = j as f64 * GAP_COST;
        steps[0][j] = Step::Insert;
    }

    fill_tables(&mut dp, &mut steps, expected_words, actual_words);
    backtrack_outcomes(&steps, expected_words, actual_words)
}

fn fill_tables(
    dp: &mut [Vec<f64>],
    steps: &mut [Vec<Step>],
    expected_words: &[String],
    actual_words: &[String],
) {
    for i in 1..=expected_words.len() {
        for j in 1..=actual_words.len() {
            let pair = dp[i - 1][j - 1] + pair_cost(&expected_words[i - 1], &actual_words[j - 1]);
            let omit = dp[i - 1][j] + GAP_COST;
            let insert = dp[i][j - 1] + GAP_COST;

            // ties go to pairing, keeping near-misses together
            let (mut best, mut step) = (pair, Step::Pair);
            if omit < best {
                best = omit;
                step = Step::Omit;
            }
            if insert < best {
                best = insert;
                step = Step::Insert;
            }
            dp[i][j] = best;
            steps[i][j] = step;
        }
    }
}

fn pair_cost(expected: &str, spoken: &str) -> f64 {
    1.0 - similarity(expected, spoken)
}

fn backtrack_outcomes(
    steps: &[Vec<Step>],
    expected_words: &[String],
    actual_words: &[String],
) -> Vec<WordOutcome> {
    let mut outcomes = Vec::with_capacity(expected_words.len().max(actual_words.len()));
    let mut i = expected_words.len();
    let mut j = actual_words.len();

    while i > 0 || j > 0 {
        match steps[i][j] {
            Step::Pair => {
                i -= 1;
                j -= 1;
                outcomes.push(pair_outcome(&expected_words[i], &actual_words[j]));
            }
            Step::Omit => {
                i -= 1;
                outcomes.push(omitted_outcome(&expected_words[i]));
            }
            Step::Insert => {
                j -= 1;
                outcomes.push(inserted_outcome(&actual_words[j]));
            }
        }
    }

    outcomes.reverse();
    outcomes
}
