//! Output formatting for prosecheck results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output grouped by category
//! - JSON: versioned, structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};

use crate::annotate::char_slice;
use crate::detect::{AnalysisResult, Category, Payload, SentenceReport, SpanAnnotation, TextSpan};
use crate::summary::Summary;

/// Longest snippet shown for an issue, in characters.
const SNIPPET_CHARS: usize = 60;

/// Maps character offsets onto 1-based line and column numbers.
pub struct LineIndex {
    /// Character offset at which each line starts.
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut starts = vec![0];
        for (i, c) in text.chars().enumerate() {
            if c == '\n' {
                starts.push(i + 1);
            }
        }
        Self { starts }
    }

    /// Line and column (both 1-based) of a character offset.
    pub fn locate(&self, offset: usize) -> (usize, usize) {
        let line = self.starts.partition_point(|s| *s <= offset).max(1);
        (line, offset - self.starts[line - 1] + 1)
    }
}

/// Text of a span on one line, shortened to a readable length.
pub fn snippet(text: &str, start: usize, end: usize) -> String {
    let raw: String = char_slice(text, start, end)
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    let raw = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if raw.chars().count() > SNIPPET_CHARS {
        let cut: String = raw.chars().take(SNIPPET_CHARS - 3).collect();
        format!("{}...", cut.trim_end())
    } else {
        raw
    }
}

// =============================================================================
// JSON Format
// =============================================================================

/// Top-level JSON report covering every checked file.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub files: Vec<JsonFileReport>,
    pub total_issues: usize,
    pub passed: bool,
}

/// Results for one file.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonFileReport {
    pub path: String,
    pub language: String,
    pub target_grade: f64,
    pub summary: Summary,
    pub sentences: Vec<SentenceReport>,
    pub spans: Vec<JsonSpan>,
    pub dialogue_heavy: Vec<TextSpan>,
}

/// A flagged span with its location resolved.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonSpan {
    pub category: Category,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
    pub text: String,
    pub payload: Payload,
}

/// Build the JSON view of one file's results.
pub fn file_report(
    path: &str,
    text: &str,
    result: &AnalysisResult,
    summary: &Summary,
) -> JsonFileReport {
    let index = LineIndex::new(text);
    let spans = result
        .all_spans()
        .into_iter()
        .map(|s| {
            let (line, column) = index.locate(s.start);
            JsonSpan {
                category: s.category,
                start: s.start,
                end: s.end,
                line,
                column,
                text: char_slice(text, s.start, s.end).to_string(),
                payload: s.payload.clone(),
            }
        })
        .collect();

    JsonFileReport {
        path: path.to_string(),
        language: result.language.clone(),
        target_grade: result.target_grade,
        summary: summary.clone(),
        sentences: result.sentences.clone(),
        spans,
        dialogue_heavy: result.dialogue_heavy.clone(),
    }
}

/// Assemble the report for a set of files.
pub fn json_report(files: Vec<JsonFileReport>, max_issues: Option<usize>) -> JsonReport {
    let total_issues = files.iter().map(|f| f.summary.total_issues).sum();
    let passed = max_issues.map(|max| total_issues <= max).unwrap_or(true);
    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        files,
        total_issues,
        passed,
    }
}

/// Write results in JSON format.
pub fn write_json(report: &JsonReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

fn category_color(category: Category) -> Color {
    match category {
        Category::Complex => Color::Red,
        Category::PassiveWeak => Color::Yellow,
        Category::NonstandardSpeech => Color::Magenta,
        Category::FilterWord => Color::Cyan,
        Category::Telling => Color::Blue,
        Category::WeakVerb => Color::BrightYellow,
        Category::Overused => Color::BrightRed,
        Category::Pronoun => Color::Green,
        Category::RepetitiveStart => Color::BrightMagenta,
    }
}

/// Print the tool header once per run.
pub fn write_header() {
    println!();
    print!("  ");
    print!("{}", "prosecheck".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();
}

/// Write one file's results in pretty (human-readable) format.
pub fn write_pretty(path: &str, text: &str, result: &AnalysisResult, summary: &Summary) {
    print!("  {}", "Checking: ".dimmed());
    println!("{}", path);
    print!("  {}", "Language: ".dimmed());
    print!("{}", result.language);
    print!("  {}", "Target grade: ".dimmed());
    println!("{:.1}", result.target_grade);
    println!();

    let index = LineIndex::new(text);
    for (category, spans) in &result.spans {
        if spans.is_empty() {
            continue;
        }
        write_category(&index, text, *category, spans);
        println!();
    }

    if !result.dialogue_heavy.is_empty() {
        println!("  {} ({}):", "Dialogue-heavy paragraphs".bold(), result.dialogue_heavy.len());
        for span in &result.dialogue_heavy {
            let (line, column) = index.locate(span.start);
            println!(
                "    {}  {}",
                format!("{}:{}", line, column).dimmed(),
                snippet(text, span.start, span.end)
            );
        }
        println!();
    }

    write_summary(summary);
    println!();
}

fn write_category(index: &LineIndex, text: &str, category: Category, spans: &[SpanAnnotation]) {
    let color = category_color(category);
    println!(
        "  {} {}",
        category.title().color(color).bold(),
        format!("({})", spans.len()).dimmed()
    );

    for span in spans {
        let (line, column) = index.locate(span.start);
        print!("    {:<9}", format!("{}:{}", line, column).dimmed());
        print!("{}", snippet(text, span.start, span.end).color(color));
        if span.payload != Payload::Passive {
            print!("  {}", span.payload.to_string().dimmed());
        }
        println!();
    }
}

fn write_summary(summary: &Summary) {
    println!("  {}", "Summary:".bold());
    println!("    {:<22} {}", "Sentences", summary.sentences);
    match summary.average_grade {
        Some(grade) => println!("    {:<22} {:.1}", "Average grade", grade),
        None => println!("    {:<22} {}", "Average grade", "n/a".dimmed()),
    }
    println!("    {:<22} {}", "Complex sentences", summary.complex_sentences);
    println!(
        "    {:<22} {:.1}% ({})",
        "Dialogue", summary.dialogue_percent, summary.balance
    );

    for (category, count) in &summary.by_category {
        if *count > 0 {
            println!("    {:<22} {}", category.title(), count);
        }
    }

    print!("    {:<22} ", "Total issues");
    if summary.passed {
        print!("{}", summary.total_issues.to_string().green());
    } else {
        print!("{}", summary.total_issues.to_string().red());
    }
    if let Some(max) = summary.max_issues {
        print!("{}", format!(" (max {})", max).dimmed());
    }
    println!();
}

/// Explain each category that produced issues.
pub fn write_legend(categories: &[Category]) {
    if categories.is_empty() {
        return;
    }
    println!("  {}", "Legend:".bold());
    for category in categories {
        println!(
            "    {}  {}",
            category.title().color(category_color(*category)),
            category.description().dimmed()
        );
    }
    println!();
}

/// Final pass/fail line.
pub fn write_final_status(total_issues: usize, max_issues: Option<usize>, passed: bool) {
    print!("  ");
    if let Some(max) = max_issues {
        print!("{}", format!("Max issues: {}  ", max).dimmed());
    }
    print!("Issues: {}  ", total_issues);
    if passed {
        print!("{}", "PASSED".green());
    } else {
        print!("{}", "FAILED".red());
    }
    println!();
}
