use approx::assert_relative_eq;
use speakscore::scoring::similarity::similarity;
use speakscore::scoring::{score, score_with, AlignmentStrategy};
use speakscore::types::{ScoreGrade, WordStatus};

#[test]
fn perfect_three_word_attempt() {
    let report = score("the cat sat", "the cat sat");

    println!(
        "perfect accuracy={:.1} fluency={:.1} completeness={:.1} overall={:.1}",
        report.accuracy, report.fluency, report.completeness, report.overall
    );
    assert_eq!(report.words.len(), 3);
    assert!(report.words.iter().all(|w| w.status == WordStatus::Matched));
    assert_relative_eq!(report.accuracy, 100.0);
    assert_relative_eq!(report.completeness, 100.0);
    assert_relative_eq!(report.overall, 100.0);
    assert_eq!(report.grade(), ScoreGrade::Excellent);
}

#[test]
fn single_substituted_word() {
    let report = score("the cat sat", "the dog sat");

    assert_eq!(report.words[0].status, WordStatus::Matched);
    assert_eq!(report.words[1].status, WordStatus::Mispronounced);
    assert_eq!(report.words[2].status, WordStatus::Matched);
    assert!(similarity("cat", "dog") < 0.9);
    assert_relative_eq!(report.accuracy, 200.0 / 3.0, epsilon = 1e-9);
}

#[test]
fn trailing_words_omitted() {
    let report = score("the cat sat on the mat", "the cat sat");

    let omitted: Vec<_> = report
        .words
        .iter()
        .filter(|w| w.status == WordStatus::Omitted)
        .collect();
    assert_eq!(omitted.len(), 3);
    assert!(omitted.iter().all(|w| w.spoken.is_empty() && w.accuracy == 0.0));
    assert_relative_eq!(report.completeness, 50.0);
}

#[test]
fn extra_words_inserted_and_fluency_penalized() {
    let report = score("hello", "hello there now");

    let inserted = report
        .words
        .iter()
        .filter(|w| w.status == WordStatus::Inserted)
        .count();
    assert_eq!(inserted, 2);
    // base 100/3 minus the two 10-point penalties
    assert_relative_eq!(report.fluency, 100.0 / 3.0 - 20.0, epsilon = 1e-9);
}

#[test]
fn punctuation_and_case_do_not_matter() {
    let clean = score("the cat sat", "the cat sat");
    let noisy = score("The cat sat.", "the CAT, sat!");
    assert_relative_eq!(clean.overall, noisy.overall);
}

#[test]
fn grade_band_boundaries() {
    assert_eq!(ScoreGrade::from_overall(100.0), ScoreGrade::Excellent);
    assert_eq!(ScoreGrade::from_overall(90.0), ScoreGrade::Excellent);
    assert_eq!(ScoreGrade::from_overall(89.9), ScoreGrade::Good);
    assert_eq!(ScoreGrade::from_overall(75.0), ScoreGrade::Good);
    assert_eq!(ScoreGrade::from_overall(74.9), ScoreGrade::Fair);
    assert_eq!(ScoreGrade::from_overall(60.0), ScoreGrade::Fair);
    assert_eq!(ScoreGrade::from_overall(59.9), ScoreGrade::NeedsWork);
    assert_eq!(ScoreGrade::from_overall(0.0), ScoreGrade::NeedsWork);
}

#[test]
fn outcome_invariants_hold_for_both_strategies() {
    let cases = [
        ("the cat sat on the mat", "the cat sat"),
        ("hello", "hello there now"),
        ("she sells sea shells", "she sell sea shell today"),
        ("", "something"),
        ("something", ""),
    ];
    for strategy in [AlignmentStrategy::Positional, AlignmentStrategy::Sequence] {
        for (expected, actual) in cases {
            let report = score_with(expected, actual, strategy);
            for word in &report.words {
                match word.status {
                    WordStatus::Omitted => {
                        assert!(word.spoken.is_empty());
                        assert_eq!(word.accuracy, 0.0);
                    }
                    WordStatus::Inserted => {
                        assert!(word.expected.is_empty());
                        assert_eq!(word.accuracy, 0.0);
                    }
                    WordStatus::Matched | WordStatus::Mispronounced => {
                        assert!(!word.spoken.is_empty());
                        assert!(!word.expected.is_empty());
                    }
                }
            }
        }
    }
}

#[test]
fn overall_stays_in_range_over_generated_pairs() {
    // Deterministic sweep standing in for fuzzing: every pairing of these
    // fragments, in both directions and under both strategies.
    let fragments = [
        "",
        "a",
        "the",
        "the cat",
        "the cat sat",
        "the cat sat on the mat today",
        "completely different words here",
        "aaaa bbbb cccc dddd eeee ffff gggg",
        "don't stop",
        "one",
    ];
    for strategy in [AlignmentStrategy::Positional, AlignmentStrategy::Sequence] {
        for expected in fragments {
            for actual in fragments {
                let report = score_with(expected, actual, strategy);
                assert!(
                    (0.0..=100.0).contains(&report.overall),
                    "overall {} out of range for ({:?}, {:?})",
                    report.overall,
                    expected,
                    actual
                );
                assert!((0.0..=100.0).contains(&report.accuracy));
                assert!((0.0..=100.0).contains(&report.fluency));
                assert!((0.0..=100.0).contains(&report.completeness));
                assert!(!report.feedback.is_empty());
            }
        }
    }
}

#[test]
fn sequence_strategy_survives_word_drop() {
    let report = score_with("the cat sat down", "the sat down", AlignmentStrategy::Sequence);

    let statuses: Vec<WordStatus> = report.words.iter().map(|w| w.status).collect();
    assert_eq!(
        statuses,
        vec![
            WordStatus::Matched,
            WordStatus::Omitted,
            WordStatus::Matched,
            WordStatus::Matched,
        ]
    );
    assert_relative_eq!(report.accuracy, 75.0);
}

#[test]
fn report_serializes_losslessly() {
    let report = score("the cat sat", "the dog sat");
    let json = serde_json::to_value(&report).unwrap();

    assert!(json.get("overall").is_some());
    assert!(json.get("accuracy").is_some());
    assert!(json.get("fluency").is_some());
    assert!(json.get("completeness").is_some());
    assert_eq!(json["words"].as_array().unwrap().len(), report.words.len());
    assert_eq!(json["words"][1]["status"], "mispronounced");
    assert_eq!(
        json["feedback"].as_array().unwrap().len(),
        report.feedback.len()
    );
}
