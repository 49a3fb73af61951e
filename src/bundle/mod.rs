//! Per-language heuristic data bundles.
//!
//! Every word list and pattern the detectors consult lives here, so a new
//! language is a new bundle rather than new detector code. Bundles for
//! English, German and Polish are built in; custom bundles load from YAML.

mod english;
mod german;
mod polish;

pub use english::english;
pub use german::german;
pub use polish::polish;

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use once_cell::sync::OnceCell;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::readability::ReadabilityFormula;

/// Language-specific word lists and patterns.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HeuristicBundle {
    /// Language code, e.g. "en".
    pub language: String,
    #[serde(default)]
    pub name: String,
    /// Dependency labels that mark a passive subject or auxiliary.
    #[serde(default)]
    pub passive_deps: BTreeSet<String>,
    /// Words introducing the agent of a passive ("by", "von", "przez").
    #[serde(default)]
    pub agent_markers: BTreeSet<String>,
    /// Regexes for adverb-like weak words, matched case-insensitively.
    #[serde(default)]
    pub weak_patterns: Vec<String>,
    /// Hedging phrases, matched on word boundaries case-insensitively.
    #[serde(default)]
    pub weak_terms: BTreeSet<String>,
    #[serde(default)]
    pub standard_speech_verbs: BTreeSet<String>,
    #[serde(default)]
    pub speech_verbs: BTreeSet<String>,
    #[serde(default)]
    pub filter_words: BTreeSet<String>,
    #[serde(default)]
    pub telling_verbs: BTreeSet<String>,
    #[serde(default)]
    pub emotion_words: BTreeSet<String>,
    #[serde(default)]
    pub weak_verbs: BTreeSet<String>,
    /// Lemmas of the copula ("be").
    #[serde(default)]
    pub copula_lemmas: BTreeSet<String>,
    /// Stop words skipped by the overused-word detector.
    #[serde(default)]
    pub common_words: BTreeSet<String>,
    /// Words skipped when picking a sentence starter.
    #[serde(default)]
    pub starter_skip_words: BTreeSet<String>,
    #[serde(default)]
    pub masculine_pronouns: BTreeSet<String>,
    #[serde(default)]
    pub feminine_pronouns: BTreeSet<String>,
    /// Pronouns that assign a sentence's names to the masculine bucket
    /// (empty: all masculine pronouns).
    #[serde(default)]
    pub masculine_triggers: BTreeSet<String>,
    /// Same for the feminine bucket.
    #[serde(default)]
    pub feminine_triggers: BTreeSet<String>,
    #[serde(default)]
    pub plural_pronouns: BTreeSet<String>,
    /// Regex matching a quoted passage, quotes included.
    #[serde(default = "default_quote_pattern")]
    pub quote_pattern: String,
    /// Surface form to lemma table for taggers without a lemmatizer.
    #[serde(default)]
    pub lemmas: BTreeMap<String, String>,
    /// Whether the language capitalizes every noun.
    #[serde(default)]
    pub capitalized_nouns: bool,
    #[serde(default)]
    pub readability: ReadabilityFormula,
}

fn default_quote_pattern() -> String {
    r#""[^"]*""#.to_string()
}

pub(crate) fn set(words: &[&str]) -> BTreeSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl HeuristicBundle {
    /// Load a bundle from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let bundle: HeuristicBundle = serde_yaml::from_str(&content)?;
        bundle.validate()?;
        Ok(bundle)
    }

    /// Reject bundles that cannot drive an analysis.
    pub fn validate(&self) -> Result<()> {
        if self.language.trim().is_empty() {
            return Err(EngineError::invalid("bundle language must not be empty"));
        }
        self.readability.validate()?;
        self.matchers().map(|_| ())
    }

    /// Compile the bundle's patterns.
    pub fn matchers(&self) -> Result<Matchers> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| {
                EngineError::invalid(format!("bundle {:?}: bad pattern {:?}: {}", self.language, pattern, e))
            })
        };

        let weak = self
            .weak_patterns
            .iter()
            .map(|p| compile(&format!("(?i){}", p)))
            .collect::<Result<Vec<_>>>()?;
        let hedges = self
            .weak_terms
            .iter()
            .map(|t| compile(&format!(r"(?i)\b{}\b", regex::escape(t))))
            .collect::<Result<Vec<_>>>()?;
        let quote = compile(&self.quote_pattern)?;

        Ok(Matchers { weak, hedges, quote })
    }

    /// Lemma for a lowercased surface form from the bundle's table.
    pub fn lemma_for<'a>(&'a self, lower: &'a str) -> &'a str {
        self.lemmas.get(lower).map(String::as_str).unwrap_or(lower)
    }

    pub fn is_pronoun(&self, lower: &str) -> bool {
        self.masculine_pronouns.contains(lower)
            || self.feminine_pronouns.contains(lower)
            || self.plural_pronouns.contains(lower)
    }
}

/// Compiled regexes of a bundle.
#[derive(Debug, Clone)]
pub struct Matchers {
    pub weak: Vec<Regex>,
    pub hedges: Vec<Regex>,
    pub quote: Regex,
}

static ENGLISH: OnceCell<HeuristicBundle> = OnceCell::new();
static GERMAN: OnceCell<HeuristicBundle> = OnceCell::new();
static POLISH: OnceCell<HeuristicBundle> = OnceCell::new();

/// Get a built-in bundle by language code.
pub fn builtin(language: &str) -> Option<&'static HeuristicBundle> {
    match language {
        "en" => Some(ENGLISH.get_or_init(english)),
        "de" => Some(GERMAN.get_or_init(german)),
        "pl" => Some(POLISH.get_or_init(polish)),
        _ => None,
    }
}

/// Language codes with a built-in bundle.
pub fn builtin_languages() -> &'static [&'static str] {
    &["en", "de", "pl"]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtins_validate() {
        for lang in builtin_languages() {
            let bundle = builtin(lang).unwrap();
            assert_eq!(bundle.language, *lang);
            bundle.validate().unwrap();
        }
        assert!(builtin("xx").is_none());
    }

    #[test]
    fn test_hedge_matches_on_word_boundaries() {
        let m = english().matchers().unwrap();
        let hits: Vec<&str> = m
            .hedges
            .iter()
            .flat_map(|re| re.find_iter("Perhaps it was, kind of, a maybelline."))
            .map(|mat| mat.as_str())
            .collect();
        assert!(hits.contains(&"Perhaps"));
        assert!(hits.contains(&"kind of"));
        assert!(!hits.iter().any(|h| h.eq_ignore_ascii_case("maybe")));
    }

    #[test]
    fn test_german_quote_pattern() {
        let m = german().matchers().unwrap();
        let text = "\u{201E}Komm her\u{201C}, sagte sie.";
        let found = m.quote.find(text).unwrap();
        assert_eq!(found.start(), 0);
        assert_eq!(&text[found.start()..found.end()], "\u{201E}Komm her\u{201C}");
    }

    #[test]
    fn test_load_custom_bundle() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "language: xx\nspeech_verbs: [hiss]\nweak_patterns: ['\\b\\w+ish\\b']\n"
        )
        .unwrap();
        let bundle = HeuristicBundle::from_yaml_file(file.path()).unwrap();
        assert_eq!(bundle.language, "xx");
        assert!(bundle.speech_verbs.contains("hiss"));
        assert_eq!(bundle.quote_pattern, default_quote_pattern());
    }

    #[test]
    fn test_bad_pattern_is_invalid_configuration() {
        let mut bundle = english();
        bundle.weak_patterns.push("(unclosed".to_string());
        assert!(matches!(
            bundle.validate(),
            Err(EngineError::InvalidConfiguration(_))
        ));
    }
}
