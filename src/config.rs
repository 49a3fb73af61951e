//! Analysis configuration.
//!
//! Loaded from YAML with per-field defaults; every field can be omitted.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::bundle::{self, HeuristicBundle};
use crate::detect::Category;
use crate::error::{EngineError, Result};

/// Config file names searched in the working directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["prosecheck.yaml", ".prosecheck.yaml"];

/// Genre presets: target reading grade per genre.
pub const GENRES: &[(&str, f64)] = &[
    ("Romance", 9.0),
    ("Thriller", 11.0),
    ("Hard Sci-Fi", 13.0),
    ("Space Opera", 12.0),
    ("Young Adult", 9.0),
    ("Mystery", 10.0),
    ("Fantasy", 11.0),
    ("Historical Fiction", 12.0),
    ("Literary Fiction", 13.0),
    ("Horror", 11.0),
    ("Non-Fiction", 12.0),
    ("Biography", 11.0),
    ("Self-help", 10.0),
    ("Satire", 12.0),
    ("Adventure", 10.0),
    ("Crime", 11.0),
    ("Paranormal", 10.0),
    ("Dystopian", 12.0),
    ("Memoir", 10.0),
    ("Comedy", 9.0),
];

fn normalize_genre(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Target grade for a genre name. Case, spaces and hyphens are ignored.
pub fn genre_grade(name: &str) -> Option<f64> {
    let wanted = normalize_genre(name);
    GENRES
        .iter()
        .find(|(genre, _)| normalize_genre(genre) == wanted)
        .map(|(_, grade)| *grade)
}

/// Top-level analysis configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Reading grade above which a sentence is complex (default: 8)
    #[serde(default = "default_target_grade")]
    pub target_grade: f64,
    /// Genre preset; overrides target_grade when set
    #[serde(default)]
    pub genre: Option<String>,
    /// Built-in bundle language code (default: "en")
    #[serde(default = "default_language")]
    pub language: String,
    /// Custom bundle YAML; takes precedence over `language`
    #[serde(default)]
    pub bundle_path: Option<PathBuf>,
    #[serde(default)]
    pub categories: CategoryToggles,
    #[serde(default)]
    pub complexity: ComplexitySettings,
    #[serde(default)]
    pub overused: OverusedSettings,
    #[serde(default)]
    pub repetition: RepetitionSettings,
    #[serde(default)]
    pub telling: TellingSettings,
    #[serde(default)]
    pub dialogue: DialogueSettings,
    /// Glob patterns for paths to skip when checking a directory
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// File extensions checked in a directory (default: txt, md)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_target_grade() -> f64 {
    8.0
}

fn default_language() -> String {
    "en".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["txt".to_string(), "md".to_string()]
}

fn default_true() -> bool {
    true
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            target_grade: default_target_grade(),
            genre: None,
            language: default_language(),
            bundle_path: None,
            categories: CategoryToggles::default(),
            complexity: ComplexitySettings::default(),
            overused: OverusedSettings::default(),
            repetition: RepetitionSettings::default(),
            telling: TellingSettings::default(),
            dialogue: DialogueSettings::default(),
            excluded_paths: Vec::new(),
            extensions: default_extensions(),
        }
    }
}

/// Per-category enable flags (all on by default).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CategoryToggles {
    #[serde(default = "default_true")]
    pub complex: bool,
    #[serde(default = "default_true")]
    pub passive_weak: bool,
    #[serde(default = "default_true")]
    pub nonstandard_speech: bool,
    #[serde(default = "default_true")]
    pub filter_word: bool,
    #[serde(default = "default_true")]
    pub telling: bool,
    #[serde(default = "default_true")]
    pub weak_verb: bool,
    #[serde(default = "default_true")]
    pub overused: bool,
    #[serde(default = "default_true")]
    pub pronoun: bool,
    #[serde(default = "default_true")]
    pub repetitive_start: bool,
}

impl Default for CategoryToggles {
    fn default() -> Self {
        Self {
            complex: true,
            passive_weak: true,
            nonstandard_speech: true,
            filter_word: true,
            telling: true,
            weak_verb: true,
            overused: true,
            pronoun: true,
            repetitive_start: true,
        }
    }
}

impl CategoryToggles {
    fn flag(&mut self, category: Category) -> &mut bool {
        match category {
            Category::Complex => &mut self.complex,
            Category::PassiveWeak => &mut self.passive_weak,
            Category::NonstandardSpeech => &mut self.nonstandard_speech,
            Category::FilterWord => &mut self.filter_word,
            Category::Telling => &mut self.telling,
            Category::WeakVerb => &mut self.weak_verb,
            Category::Overused => &mut self.overused,
            Category::Pronoun => &mut self.pronoun,
            Category::RepetitiveStart => &mut self.repetitive_start,
        }
    }

    pub fn is_enabled(&self, category: Category) -> bool {
        match category {
            Category::Complex => self.complex,
            Category::PassiveWeak => self.passive_weak,
            Category::NonstandardSpeech => self.nonstandard_speech,
            Category::FilterWord => self.filter_word,
            Category::Telling => self.telling,
            Category::WeakVerb => self.weak_verb,
            Category::Overused => self.overused,
            Category::Pronoun => self.pronoun,
            Category::RepetitiveStart => self.repetitive_start,
        }
    }

    pub fn set(&mut self, category: Category, enabled: bool) {
        *self.flag(category) = enabled;
    }

    /// Enabled categories in canonical order.
    pub fn enabled(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.is_enabled(*c))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ComplexitySettings {
    /// Sentences with fewer words are never scored (default: 5)
    #[serde(default = "ComplexitySettings::default_min_words")]
    pub min_words: usize,
}

impl ComplexitySettings {
    fn default_min_words() -> usize {
        5
    }
}

impl Default for ComplexitySettings {
    fn default() -> Self {
        Self {
            min_words: Self::default_min_words(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OverusedSettings {
    /// Occurrences within the window needed to flag (default: 3)
    #[serde(default = "OverusedSettings::default_threshold")]
    pub threshold: usize,
    /// Window radius in characters (default: 1000)
    #[serde(default = "OverusedSettings::default_window")]
    pub window: usize,
    /// Shortest word considered, in characters (default: 3)
    #[serde(default = "OverusedSettings::default_min_length")]
    pub min_length: usize,
    /// Skip the bundle's common words (default: true)
    #[serde(default = "default_true")]
    pub ignore_common: bool,
}

impl OverusedSettings {
    fn default_threshold() -> usize {
        3
    }

    fn default_window() -> usize {
        1000
    }

    fn default_min_length() -> usize {
        3
    }
}

impl Default for OverusedSettings {
    fn default() -> Self {
        Self {
            threshold: Self::default_threshold(),
            window: Self::default_window(),
            min_length: Self::default_min_length(),
            ignore_common: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RepetitionSettings {
    /// Sentences sharing a starter needed to flag them (default: 3)
    #[serde(default = "RepetitionSettings::default_threshold")]
    pub threshold: usize,
}

impl RepetitionSettings {
    fn default_threshold() -> usize {
        3
    }
}

impl Default for RepetitionSettings {
    fn default() -> Self {
        Self {
            threshold: Self::default_threshold(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TellingSettings {
    /// Tokens after a telling verb searched for an emotion word (default: 3)
    #[serde(default = "TellingSettings::default_lookahead")]
    pub lookahead: usize,
}

impl TellingSettings {
    fn default_lookahead() -> usize {
        3
    }
}

impl Default for TellingSettings {
    fn default() -> Self {
        Self {
            lookahead: Self::default_lookahead(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DialogueSettings {
    /// Quoted share above which a paragraph is dialogue-heavy (default: 0.7)
    #[serde(default = "DialogueSettings::default_heavy_ratio")]
    pub heavy_ratio: f64,
    /// Paragraphs must be longer than this many characters (default: 100)
    #[serde(default = "DialogueSettings::default_min_paragraph_chars")]
    pub min_paragraph_chars: usize,
}

impl DialogueSettings {
    fn default_heavy_ratio() -> f64 {
        0.7
    }

    fn default_min_paragraph_chars() -> usize {
        100
    }
}

impl Default for DialogueSettings {
    fn default() -> Self {
        Self {
            heavy_ratio: Self::default_heavy_ratio(),
            min_paragraph_chars: Self::default_min_paragraph_chars(),
        }
    }
}

impl AnalysisConfig {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: AnalysisConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Target grade after applying the genre preset, if any.
    pub fn effective_target_grade(&self) -> Result<f64> {
        match &self.genre {
            Some(genre) => genre_grade(genre)
                .ok_or_else(|| EngineError::invalid(format!("unknown genre {:?}", genre))),
            None => Ok(self.target_grade),
        }
    }

    /// Resolve the heuristic bundle this configuration selects.
    pub fn load_bundle(&self) -> Result<HeuristicBundle> {
        if let Some(path) = &self.bundle_path {
            return HeuristicBundle::from_yaml_file(path);
        }
        bundle::builtin(&self.language).cloned().ok_or_else(|| {
            EngineError::invalid(format!(
                "unknown language {:?} (built in: {})",
                self.language,
                bundle::builtin_languages().join(", ")
            ))
        })
    }

    /// Check if a path should be excluded based on excluded_paths patterns.
    pub fn is_path_excluded(&self, path: &Path) -> bool {
        if self.excluded_paths.is_empty() {
            return false;
        }

        let path_str = path.to_string_lossy();

        for pattern in &self.excluded_paths {
            if let Ok(glob) = globset::Glob::new(pattern) {
                if glob.compile_matcher().is_match(&*path_str) {
                    return true;
                }
            }
        }
        false
    }

    /// Whether a file has one of the configured extensions.
    pub fn has_checked_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

/// Validate a configuration before any analysis runs.
pub fn validate(config: &AnalysisConfig) -> Result<()> {
    if config.bundle_path.is_none() && bundle::builtin(&config.language).is_none() {
        return Err(EngineError::invalid(format!(
            "unknown language {:?}",
            config.language
        )));
    }
    validate_settings(config)
}

/// Validate everything except the language selection, for callers that
/// supply their own bundle.
pub fn validate_settings(config: &AnalysisConfig) -> Result<()> {
    if !config.target_grade.is_finite() {
        return Err(EngineError::invalid("target_grade must be a finite number"));
    }
    config.effective_target_grade()?;

    let positive = [
        ("overused.threshold", config.overused.threshold),
        ("overused.window", config.overused.window),
        ("overused.min_length", config.overused.min_length),
        ("repetition.threshold", config.repetition.threshold),
        ("telling.lookahead", config.telling.lookahead),
    ];
    for (name, value) in positive {
        if value == 0 {
            return Err(EngineError::invalid(format!("{} must be positive", name)));
        }
    }

    let ratio = config.dialogue.heavy_ratio;
    if !(ratio > 0.0 && ratio <= 1.0) {
        return Err(EngineError::invalid(format!(
            "dialogue.heavy_ratio must be in (0, 1], got {}",
            ratio
        )));
    }

    for pattern in &config.excluded_paths {
        globset::Glob::new(pattern).map_err(|e| {
            EngineError::invalid(format!("invalid excluded_paths pattern {:?}: {}", pattern, e))
        })?;
    }

    Ok(())
}

/// Find a configuration file: the working directory first, then the
/// user's config directory.
pub fn discover() -> Option<PathBuf> {
    for name in DEFAULT_CONFIG_NAMES {
        let path = PathBuf::from(name);
        if path.exists() {
            return Some(path);
        }
    }
    directories::ProjectDirs::from("", "", "prosecheck")
        .map(|dirs| dirs.config_dir().join("config.yaml"))
        .filter(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config: AnalysisConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.overused.threshold, 3);
        assert_eq!(config.overused.window, 1000);
        assert_eq!(config.telling.lookahead, 3);
        assert_eq!(config.dialogue.min_paragraph_chars, 100);
        assert_eq!(config.categories.enabled().len(), 9);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_parse_file_with_partial_sections() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "target_grade: 10\ncategories:\n  pronoun: false\noverused:\n  window: 500\n"
        )
        .unwrap();
        let config = AnalysisConfig::parse_file(file.path()).unwrap();
        assert_eq!(config.target_grade, 10.0);
        assert!(!config.categories.pronoun);
        assert!(config.categories.telling);
        assert_eq!(config.overused.window, 500);
        assert_eq!(config.overused.threshold, 3);
    }

    #[test]
    fn test_genre_overrides_target_grade() {
        let config = AnalysisConfig {
            genre: Some("hard sci-fi".to_string()),
            ..Default::default()
        };
        assert_eq!(config.effective_target_grade().unwrap(), 13.0);
        assert_eq!(genre_grade("YoungAdult"), Some(9.0));
        assert_eq!(genre_grade("self help"), Some(10.0));
        assert!(genre_grade("cookbook").is_none());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AnalysisConfig::default();
        config.overused.window = 0;
        assert!(matches!(validate(&config), Err(EngineError::InvalidConfiguration(_))));

        let mut config = AnalysisConfig::default();
        config.dialogue.heavy_ratio = 1.5;
        assert!(validate(&config).is_err());

        let config = AnalysisConfig {
            language: "tlh".to_string(),
            ..Default::default()
        };
        assert!(validate(&config).is_err());

        let config = AnalysisConfig {
            genre: Some("cookbook".to_string()),
            ..Default::default()
        };
        assert!(validate(&config).is_err());

        let config = AnalysisConfig {
            target_grade: f64::NAN,
            ..Default::default()
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_toggle_set() {
        let mut toggles = CategoryToggles::default();
        toggles.set(Category::Overused, false);
        assert!(!toggles.is_enabled(Category::Overused));
        assert!(!toggles.enabled().contains(&Category::Overused));
    }

    #[test]
    fn test_path_filters() {
        let config = AnalysisConfig {
            excluded_paths: vec!["**/drafts/**".to_string()],
            ..Default::default()
        };
        assert!(config.is_path_excluded(Path::new("book/drafts/ch1.txt")));
        assert!(!config.is_path_excluded(Path::new("book/ch1.txt")));
        assert!(config.has_checked_extension(Path::new("ch1.TXT")));
        assert!(!config.has_checked_extension(Path::new("cover.png")));
    }
}
