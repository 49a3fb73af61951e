//! Readability scoring.
//!
//! A [`ReadabilityScorer`] turns a passage into a grade-level number: higher
//! means harder to read. Which formula a language uses is part of its bundle.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

lazy_static! {
    static ref SENTENCE_END: Regex = Regex::new(r"[.!?]+").unwrap();
}

/// Scores a passage of text.
pub trait ReadabilityScorer: Send + Sync {
    fn score(&self, text: &str) -> f64;
}

/// Readability formula selection, as stored in a bundle.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(tag = "formula", rename_all = "snake_case")]
pub enum ReadabilityFormula {
    /// Flesch-Kincaid grade level (English).
    #[default]
    FleschKincaid,
    /// Sentence length plus share of words with many vowels.
    DifficultWords {
        vowels: String,
        #[serde(default = "default_min_vowels")]
        min_vowels: usize,
    },
}

fn default_min_vowels() -> usize {
    3
}

impl ReadabilityFormula {
    pub fn validate(&self) -> Result<()> {
        match self {
            ReadabilityFormula::FleschKincaid => Ok(()),
            ReadabilityFormula::DifficultWords { vowels, min_vowels } => {
                if vowels.is_empty() {
                    return Err(EngineError::invalid("readability vowel set must not be empty"));
                }
                if *min_vowels == 0 {
                    return Err(EngineError::invalid("readability min_vowels must be positive"));
                }
                Ok(())
            }
        }
    }

    /// Build the scorer for this formula.
    pub fn scorer(&self) -> Box<dyn ReadabilityScorer> {
        match self {
            ReadabilityFormula::FleschKincaid => Box::new(FleschKincaid),
            ReadabilityFormula::DifficultWords { vowels, min_vowels } => {
                Box::new(DifficultWordIndex::new(vowels, *min_vowels))
            }
        }
    }
}

/// Flesch-Kincaid grade level:
/// `0.39 * words/sentences + 11.8 * syllables/words - 15.59`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FleschKincaid;

impl ReadabilityScorer for FleschKincaid {
    fn score(&self, text: &str) -> f64 {
        let words: Vec<String> = text
            .split_whitespace()
            .map(|w| w.chars().filter(|c| c.is_alphanumeric()).collect::<String>())
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            return 0.0;
        }
        let sentences = count_sentences(text).max(1) as f64;
        let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();
        let n = words.len() as f64;

        let grade = 0.39 * (n / sentences) + 11.8 * (syllables as f64 / n) - 15.59;
        (grade * 100.0).round() / 100.0
    }
}

/// Estimate English syllables from vowel groups.
pub fn count_syllables(word: &str) -> usize {
    let lower = word.to_lowercase();
    if lower.chars().all(|c| c.is_ascii_digit()) {
        return 1;
    }

    let chars: Vec<char> = lower.chars().collect();
    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');

    let mut count = 0;
    let mut prev_vowel = false;
    for &c in &chars {
        let v = is_vowel(c);
        if v && !prev_vowel {
            count += 1;
        }
        prev_vowel = v;
    }

    // Silent final "e" ("make"), but not "-le" ("table").
    let n = chars.len();
    if n > 2 && chars[n - 1] == 'e' && !is_vowel(chars[n - 2]) && chars[n - 2] != 'l' && count > 1 {
        count -= 1;
    }

    count.max(1)
}

fn count_sentences(text: &str) -> usize {
    SENTENCE_END
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .count()
}

/// `0.4 * (words/sentences + 100 * difficult/words)`, where a difficult word
/// has at least `min_vowels` letters from the vowel set.
#[derive(Debug, Clone)]
pub struct DifficultWordIndex {
    vowels: Vec<char>,
    min_vowels: usize,
}

impl DifficultWordIndex {
    pub fn new(vowels: &str, min_vowels: usize) -> Self {
        Self {
            vowels: vowels.chars().collect(),
            min_vowels,
        }
    }

    fn is_difficult(&self, word: &str) -> bool {
        word.to_lowercase()
            .chars()
            .filter(|c| self.vowels.contains(c))
            .count()
            >= self.min_vowels
    }
}

impl ReadabilityScorer for DifficultWordIndex {
    fn score(&self, text: &str) -> f64 {
        let words: Vec<&str> = text.split_whitespace().collect();
        let sentences = count_sentences(text);
        if words.is_empty() || sentences == 0 {
            return 0.0;
        }
        let difficult = words.iter().filter(|w| self.is_difficult(w)).count();
        let n = words.len() as f64;
        0.4 * ((n / sentences as f64) + 100.0 * (difficult as f64 / n))
    }
}
