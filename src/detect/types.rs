//! Core types for analysis results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::annotate::Token;

/// Diagnostic categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Complex,
    PassiveWeak,
    NonstandardSpeech,
    FilterWord,
    Telling,
    WeakVerb,
    Overused,
    Pronoun,
    RepetitiveStart,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Complex,
        Category::PassiveWeak,
        Category::NonstandardSpeech,
        Category::FilterWord,
        Category::Telling,
        Category::WeakVerb,
        Category::Overused,
        Category::Pronoun,
        Category::RepetitiveStart,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Complex => "complex",
            Category::PassiveWeak => "passive_weak",
            Category::NonstandardSpeech => "nonstandard_speech",
            Category::FilterWord => "filter_word",
            Category::Telling => "telling",
            Category::WeakVerb => "weak_verb",
            Category::Overused => "overused",
            Category::Pronoun => "pronoun",
            Category::RepetitiveStart => "repetitive_start",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "complex" => Some(Category::Complex),
            "passive_weak" => Some(Category::PassiveWeak),
            "nonstandard_speech" => Some(Category::NonstandardSpeech),
            "filter_word" => Some(Category::FilterWord),
            "telling" => Some(Category::Telling),
            "weak_verb" => Some(Category::WeakVerb),
            "overused" => Some(Category::Overused),
            "pronoun" => Some(Category::Pronoun),
            "repetitive_start" => Some(Category::RepetitiveStart),
            _ => None,
        }
    }

    /// Human-readable title.
    pub fn title(&self) -> &'static str {
        match self {
            Category::Complex => "Complex sentences",
            Category::PassiveWeak => "Weak formulations / passive",
            Category::NonstandardSpeech => "Non-standard speech verbs",
            Category::FilterWord => "Filter words",
            Category::Telling => "Telling, not showing",
            Category::WeakVerb => "Weak verbs",
            Category::Overused => "Overused words",
            Category::Pronoun => "Unclear pronouns",
            Category::RepetitiveStart => "Repeated sentence starts",
        }
    }

    /// What the category flags and what to do about it.
    pub fn description(&self) -> &'static str {
        match self {
            Category::Complex => {
                "Sentences above the target reading grade. Consider splitting them into shorter, clearer sentences."
            }
            Category::PassiveWeak => {
                "Passive constructions with an explicit agent, adverbs and hedging phrases. Prefer an active subject and committed wording."
            }
            Category::NonstandardSpeech => {
                "Dialogue tags other than the neutral ones. Unusual speech verbs draw attention away from the dialogue."
            }
            Category::FilterWord => {
                "Perception and thought verbs that put the narrator between reader and scene."
            }
            Category::Telling => {
                "A linking verb followed closely by a named emotion. Show the emotion through action or detail instead."
            }
            Category::WeakVerb => {
                "Bare forms of 'to be' as the main verb, and continuous tense. A precise verb is usually stronger."
            }
            Category::Overused => {
                "Words repeated too often within a short stretch of text. Use synonyms or rephrase."
            }
            Category::Pronoun => {
                "Pronouns in sentences naming several candidates for the same pronoun."
            }
            Category::RepetitiveStart => {
                "Sentences that keep opening with the same word. Vary the openings to hold the reader's interest."
            }
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::parse(&s.to_lowercase().replace('-', "_"))
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}

/// Kind of weak verb construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Construction {
    /// A form of "be" followed by a present participle.
    ContinuousTense,
    /// A form of "be" as the main verb of its sentence.
    BeVerb,
}

impl Construction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Construction::ContinuousTense => "continuous_tense",
            Construction::BeVerb => "be_verb",
        }
    }
}

impl std::fmt::Display for Construction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Category-specific data attached to a span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    Sentence { grade: f64 },
    Passive,
    Weak { matched: String },
    SpeechVerb { lemma: String },
    FilterWord { word: String },
    Telling { phrase: String },
    WeakVerb { construction: Construction },
    Overused { word: String, count: usize },
    Pronoun { pronoun: String },
    RepeatedStart { starter: String },
}

impl std::fmt::Display for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Payload::Sentence { grade } => write!(f, "grade {:.1}", grade),
            Payload::Passive => write!(f, "passive voice"),
            Payload::Weak { matched } => write!(f, "{:?}", matched),
            Payload::SpeechVerb { lemma } => write!(f, "{:?}", lemma),
            Payload::FilterWord { word } => write!(f, "{:?}", word),
            Payload::Telling { phrase } => write!(f, "{:?}", phrase),
            Payload::WeakVerb { construction } => write!(f, "{}", construction),
            Payload::Overused { word, count } => write!(f, "{:?} x{}", word, count),
            Payload::Pronoun { pronoun } => write!(f, "{:?}", pronoun),
            Payload::RepeatedStart { starter } => write!(f, "{:?}", starter),
        }
    }
}

/// A flagged stretch of text, in character offsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanAnnotation {
    pub start: usize,
    pub end: usize,
    pub category: Category,
    pub payload: Payload,
}

/// A plain character range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    pub start: usize,
    pub end: usize,
}

/// Analyzer output before offset translation: byte offsets into the text.
#[derive(Debug, Clone, PartialEq)]
pub struct ByteSpan {
    pub start: usize,
    pub end: usize,
    pub payload: Payload,
}

impl ByteSpan {
    pub fn new(start: usize, end: usize, payload: Payload) -> Self {
        Self { start, end, payload }
    }

    /// Span over a single token.
    pub fn token(token: &Token, payload: Payload) -> Self {
        Self::new(token.start, token.end, payload)
    }
}

/// One sentence of the analyzed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceReport {
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub word_count: usize,
    /// Only computed for sentences long enough to be scored.
    pub grade: Option<f64>,
    pub is_complex: bool,
}

/// Results of analyzing one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub language: String,
    pub target_grade: f64,
    /// Length of the text in characters.
    pub text_chars: usize,
    pub sentences: Vec<SentenceReport>,
    /// One entry per enabled category, sorted by position.
    pub spans: BTreeMap<Category, Vec<SpanAnnotation>>,
    pub dialogue_ratio: f64,
    pub dialogue_heavy: Vec<TextSpan>,
}

impl AnalysisResult {
    /// Spans of one category; empty when the category was disabled.
    pub fn spans(&self, category: Category) -> &[SpanAnnotation] {
        self.spans.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of flagged spans across categories.
    pub fn total_issues(&self) -> usize {
        self.spans.values().map(Vec::len).sum()
    }

    /// All spans in document order.
    pub fn all_spans(&self) -> Vec<&SpanAnnotation> {
        let mut all: Vec<&SpanAnnotation> = self.spans.values().flatten().collect();
        all.sort_by_key(|s| (s.start, s.end, s.category));
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip_names() {
        for cat in Category::ALL {
            assert_eq!(Category::parse(cat.as_str()), Some(cat));
        }
        assert_eq!("passive-weak".parse::<Category>(), Ok(Category::PassiveWeak));
        assert!("nope".parse::<Category>().is_err());
    }

    #[test]
    fn test_payload_serializes_with_kind() {
        let payload = Payload::Overused {
            word: "forest".to_string(),
            count: 4,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["kind"], "overused");
        assert_eq!(json["count"], 4);

        let weak = Payload::WeakVerb {
            construction: Construction::ContinuousTense,
        };
        let json = serde_json::to_value(&weak).unwrap();
        assert_eq!(json["construction"], "continuous_tense");
    }

    #[test]
    fn test_spans_for_missing_category_is_empty() {
        let result = AnalysisResult {
            language: "en".to_string(),
            target_grade: 8.0,
            text_chars: 0,
            sentences: vec![],
            spans: BTreeMap::new(),
            dialogue_ratio: 0.0,
            dialogue_heavy: vec![],
        };
        assert!(result.spans(Category::Telling).is_empty());
        assert_eq!(result.total_issues(), 0);
    }
}
