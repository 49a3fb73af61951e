//! Summary statistics for an analysis.
//!
//! Condenses an [`AnalysisResult`] into counts, a dialogue balance label and
//! a pass/fail verdict against an optional issue ceiling.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::detect::{AnalysisResult, Category};

/// Dialogue percentage bounds for the balance label.
pub mod balance {
    /// Above this share of quoted text, the manuscript is dialogue-heavy.
    pub const DIALOGUE_HEAVY_PERCENT: f64 = 70.0;
    /// Below this share, it is narrative-heavy.
    pub const NARRATIVE_HEAVY_PERCENT: f64 = 20.0;
}

/// How dialogue and narration are balanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Balance {
    DialogueHeavy,
    NarrativeHeavy,
    Balanced,
}

impl Balance {
    pub fn from_percent(percent: f64) -> Self {
        if percent > balance::DIALOGUE_HEAVY_PERCENT {
            Balance::DialogueHeavy
        } else if percent < balance::NARRATIVE_HEAVY_PERCENT {
            Balance::NarrativeHeavy
        } else {
            Balance::Balanced
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Balance::DialogueHeavy => "dialogue-heavy",
            Balance::NarrativeHeavy => "narrative-heavy",
            Balance::Balanced => "balanced",
        }
    }
}

impl std::fmt::Display for Balance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_issues: usize,
    /// Issue count per enabled category
    pub by_category: BTreeMap<Category, usize>,
    /// Quoted share of the text as a percentage, one decimal place
    pub dialogue_percent: f64,
    pub balance: Balance,
    pub dialogue_heavy_paragraphs: usize,
    pub sentences: usize,
    /// Mean grade of the sentences that were scored
    pub average_grade: Option<f64>,
    pub complex_sentences: usize,
    /// Issue ceiling the verdict was computed against
    pub max_issues: Option<usize>,
    /// Whether total_issues <= max_issues (always true without a ceiling)
    pub passed: bool,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Summarize an analysis result.
pub fn calculate(result: &AnalysisResult, max_issues: Option<usize>) -> Summary {
    let by_category: BTreeMap<Category, usize> = result
        .spans
        .iter()
        .map(|(category, spans)| (*category, spans.len()))
        .collect();
    let total_issues = by_category.values().sum();

    let dialogue_percent = round1(result.dialogue_ratio * 100.0);

    let grades: Vec<f64> = result.sentences.iter().filter_map(|s| s.grade).collect();
    let average_grade = if grades.is_empty() {
        None
    } else {
        Some(round1(grades.iter().sum::<f64>() / grades.len() as f64))
    };

    Summary {
        total_issues,
        by_category,
        dialogue_percent,
        balance: Balance::from_percent(dialogue_percent),
        dialogue_heavy_paragraphs: result.dialogue_heavy.len(),
        sentences: result.sentences.len(),
        average_grade,
        complex_sentences: result.sentences.iter().filter(|s| s.is_complex).count(),
        max_issues,
        passed: max_issues.map(|max| total_issues <= max).unwrap_or(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{Payload, SentenceReport, SpanAnnotation, TextSpan};

    fn sentence(grade: Option<f64>, is_complex: bool) -> SentenceReport {
        SentenceReport {
            start: 0,
            end: 1,
            text: "x".to_string(),
            word_count: 1,
            grade,
            is_complex,
        }
    }

    fn result(ratio: f64) -> AnalysisResult {
        let mut spans = BTreeMap::new();
        spans.insert(
            Category::FilterWord,
            vec![
                SpanAnnotation {
                    start: 0,
                    end: 3,
                    category: Category::FilterWord,
                    payload: Payload::FilterWord {
                        word: "saw".to_string(),
                    },
                };
                3
            ],
        );
        spans.insert(Category::Telling, vec![]);
        AnalysisResult {
            language: "en".to_string(),
            target_grade: 8.0,
            text_chars: 100,
            sentences: vec![
                sentence(Some(6.0), false),
                sentence(Some(11.0), true),
                sentence(None, false),
            ],
            spans,
            dialogue_ratio: ratio,
            dialogue_heavy: vec![TextSpan { start: 0, end: 10 }],
        }
    }

    #[test]
    fn test_counts_and_grades() {
        let summary = calculate(&result(0.456), None);
        assert_eq!(summary.total_issues, 3);
        assert_eq!(summary.by_category[&Category::FilterWord], 3);
        assert_eq!(summary.by_category[&Category::Telling], 0);
        assert_eq!(summary.dialogue_percent, 45.6);
        assert_eq!(summary.balance, Balance::Balanced);
        assert_eq!(summary.average_grade, Some(8.5));
        assert_eq!(summary.complex_sentences, 1);
        assert_eq!(summary.dialogue_heavy_paragraphs, 1);
        assert!(summary.passed);
    }

    #[test]
    fn test_balance_labels() {
        assert_eq!(Balance::from_percent(70.1), Balance::DialogueHeavy);
        assert_eq!(Balance::from_percent(70.0), Balance::Balanced);
        assert_eq!(Balance::from_percent(20.0), Balance::Balanced);
        assert_eq!(Balance::from_percent(19.9), Balance::NarrativeHeavy);
        assert_eq!(calculate(&result(0.9), None).balance, Balance::DialogueHeavy);
    }

    #[test]
    fn test_issue_ceiling() {
        assert!(calculate(&result(0.5), Some(3)).passed);
        assert!(!calculate(&result(0.5), Some(2)).passed);
    }
}
