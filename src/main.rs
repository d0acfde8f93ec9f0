use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::{fs, io};
use tracing_subscriber::EnvFilter;

use speakscore::drill::{run_drill, DrillReport};
use speakscore::scoring::{score_with, AlignmentStrategy};
use speakscore::types::{RuntimeDrill, ScoreGrade, ScoreReport, WordOutcome};

/// Speakscore - spoken practice scoring tool
///
/// Compares a speech-recognition transcript against the target sentence a
/// learner was asked to say and reports per-word outcomes plus accuracy,
/// fluency, and completeness scores.
#[derive(Parser, Debug)]
#[command(name = "speakscore")]
#[command(version = "0.1.0")]
#[command(about = "Spoken practice scoring tool", long_about = None)]
struct Args {
    /// Target sentence the learner was asked to say
    #[arg(value_name = "EXPECTED")]
    expected: Option<String>,

    /// Recognized transcript of what the learner actually said
    #[arg(value_name = "ACTUAL")]
    actual: Option<String>,

    /// Read the target sentence from a file instead
    #[arg(long, value_name = "PATH", conflicts_with = "expected")]
    expected_file: Option<PathBuf>,

    /// Read the transcript from a file instead
    #[arg(long, value_name = "PATH", conflicts_with = "actual")]
    actual_file: Option<PathBuf>,

    /// JSON drill specification (inline JSON string)
    #[arg(long, value_name = "JSON", conflicts_with = "drill_file")]
    drill_json: Option<String>,

    /// Path to a JSON drill specification
    #[arg(long, value_name = "PATH", conflicts_with = "drill_json")]
    drill_file: Option<PathBuf>,

    /// Word alignment strategy
    #[arg(long, value_enum, default_value = "positional")]
    alignment: AlignmentStrategy,

    /// Emit the report as pretty-printed JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn drill_mode(&self) -> bool {
        self.drill_json.is_some() || self.drill_file.is_some()
    }

    /// Validate CLI arguments
    fn validate(&self) -> Result<()> {
        if self.drill_mode() {
            if self.expected.is_some()
                || self.actual.is_some()
                || self.expected_file.is_some()
                || self.actual_file.is_some()
            {
                bail!("Drill mode does not take EXPECTED/ACTUAL inputs");
            }
            if let Some(path) = &self.drill_file {
                check_input_file(path)?;
            }
            return Ok(());
        }

        if self.expected.is_none() && self.expected_file.is_none() {
            bail!("Provide a target sentence as EXPECTED or via --expected-file");
        }
        if self.actual.is_none() && self.actual_file.is_none() {
            bail!("Provide a transcript as ACTUAL or via --actual-file");
        }
        for path in [&self.expected_file, &self.actual_file].into_iter().flatten() {
            check_input_file(path)?;
        }
        Ok(())
    }

    fn runtime_drill(&self) -> Result<RuntimeDrill> {
        load_drill_from_sources(self.drill_file.as_deref(), self.drill_json.as_deref())
    }

    fn expected_text(&self) -> Result<String> {
        read_text_input(self.expected.as_deref(), self.expected_file.as_deref(), "target")
    }

    fn actual_text(&self) -> Result<String> {
        read_text_input(self.actual.as_deref(), self.actual_file.as_deref(), "transcript")
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    args.validate()
        .context("Failed to validate command-line arguments")?;

    if args.drill_mode() {
        let runtime_drill = args
            .runtime_drill()
            .context("Failed to load drill specification")?;
        runtime_drill.validate().context("Drill validation failed")?;
        let drill = runtime_drill.to_drill();

        let report = run_drill(&drill, args.alignment);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{}", render_drill_report(&report));
        }
        return Ok(());
    }

    let expected = args.expected_text()?;
    let actual = args.actual_text()?;
    let report = score_with(&expected, &actual, args.alignment);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&expected, &actual, &report));
    }
    Ok(())
}

fn check_input_file(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("Input file does not exist: {:?}", path);
    }
    if !path.is_file() {
        bail!("Input path is not a file: {:?}", path);
    }
    Ok(())
}

fn read_text_input(inline: Option<&str>, path: Option<&Path>, label: &str) -> Result<String> {
    if let Some(text) = inline {
        return Ok(text.to_string());
    }
    if let Some(p) = path {
        let data = fs::read_to_string(p)
            .with_context(|| format!("Failed to read {} file {:?}", label, p))?;
        return Ok(data.trim_end().to_string());
    }
    bail!("No {} source provided", label); // Should not happen due to validation
}

fn load_drill_from_sources(path: Option<&Path>, json: Option<&str>) -> Result<RuntimeDrill> {
    if let Some(p) = path {
        let data =
            fs::read_to_string(p).with_context(|| format!("Failed to read drill file {:?}", p))?;
        return parse_runtime_drill(&data);
    }

    if let Some(raw) = json {
        return parse_runtime_drill(raw);
    }

    bail!("No drill source provided"); // Should not happen due to validation
}

fn parse_runtime_drill(raw: &str) -> Result<RuntimeDrill> {
    let drill: RuntimeDrill =
        serde_json::from_str(raw).context("Failed to parse drill JSON")?;
    Ok(drill)
}

fn render_report(expected: &str, actual: &str, report: &ScoreReport) -> String {
    let mut out = String::new();
    out.push_str("Speakscore v0.1.0 - Spoken Practice Report\n");
    out.push_str(&format!("Expected: \"{expected}\"\n"));
    out.push_str(&format!("Heard:    \"{actual}\"\n\n"));

    for word in &report.words {
        out.push_str(&render_word_row(word));
    }

    out.push('\n');
    out.push_str(&format!("Accuracy:     {:>5.1}\n", report.accuracy));
    out.push_str(&format!("Fluency:      {:>5.1}\n", report.fluency));
    out.push_str(&format!("Completeness: {:>5.1}\n", report.completeness));
    out.push_str(&format!(
        "Overall:      {:>5.1}  ({})\n",
        report.overall,
        report.grade().label()
    ));

    out.push_str("\nFeedback:\n");
    for line in &report.feedback {
        out.push_str(&format!("  - {line}\n"));
    }
    out
}

fn render_word_row(word: &WordOutcome) -> String {
    let mut row = format!(
        "  {:<14} {:<12} -> {:<12} {:>5.1}%",
        word.status.label(),
        word.expected,
        word.spoken,
        word.accuracy
    );
    if let Some(suggestion) = &word.suggestion {
        row.push_str(&format!("  ({suggestion})"));
    }
    row.push('\n');
    row
}

fn render_drill_report(report: &DrillReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Speakscore v0.1.0 - Drill Report: {} ({} items)\n",
        report.name,
        report.items.len()
    ));

    for (index, item) in report.items.iter().enumerate() {
        out.push('\n');
        out.push_str(&format!(
            "[{}/{}] \"{}\"\n",
            index + 1,
            report.items.len(),
            item.target
        ));
        for (attempt_index, attempt) in item.attempts.iter().enumerate() {
            let marker = if attempt_index == item.best_attempt {
                "  (best)"
            } else {
                ""
            };
            out.push_str(&format!(
                "  Attempt {}: {:>5.1}{}\n",
                attempt_index + 1,
                attempt.overall,
                marker
            ));
        }
        out.push_str(&format!(
            "  Best: {:.1} ({})\n",
            item.best_overall,
            ScoreGrade::from_overall(item.best_overall).label()
        ));
    }

    out.push_str(&format!("\nDrill average: {:.1}\n", report.average));
    out
}
