//! Prosecheck - manuscript prose-quality analysis.
//!
//! Prosecheck reads fiction and flags the habits editors mark up: sentences
//! above a target reading grade, passive voice with a named agent, unusual
//! dialogue tags, filter words, telling instead of showing, weak verbs,
//! overused words, unclear pronouns and repeated sentence openings. It also
//! measures how much of the text is dialogue.
//!
//! # Architecture
//!
//! - `annotate`: tokenization, sentence splitting, tagging (the [`Annotator`] seam)
//! - `bundle`: per-language word lists and patterns
//! - `readability`: grade-level formulas (the [`ReadabilityScorer`] seam)
//! - `detect`: one detector per category plus the [`Runner`]
//! - `config`: YAML configuration and genre presets
//! - `summary`, `report`: statistics and output formatting
//!
//! # Example
//!
//! ```no_run
//! use prosecheck::{comprehensive_analysis, AnalysisConfig, Category};
//!
//! let text = "He was given the award by the committee.";
//! let result = comprehensive_analysis(text, 8.0, AnalysisConfig::default()).unwrap();
//! assert_eq!(result.spans(Category::PassiveWeak).len(), 1);
//! ```
//!
//! # Adding a New Language
//!
//! Write a bundle YAML (see `HeuristicBundle`) and pass it with `--bundle`,
//! or add a built-in one in `src/bundle/`.

pub mod annotate;
pub mod bundle;
pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod readability;
pub mod report;
pub mod summary;

pub use annotate::{Annotator, Document, HeuristicAnnotator};
pub use bundle::HeuristicBundle;
pub use config::AnalysisConfig;
pub use detect::{AnalysisResult, Category, Payload, Runner, SpanAnnotation};
pub use error::{EngineError, Result};
pub use readability::ReadabilityScorer;

/// Analyze a text against a target reading grade.
///
/// The given grade replaces both `config.target_grade` and any genre preset.
pub fn comprehensive_analysis(
    text: &str,
    target_grade: f64,
    mut config: AnalysisConfig,
) -> Result<AnalysisResult> {
    config.target_grade = target_grade;
    config.genre = None;
    Runner::new(config)?.analyze(text)
}
