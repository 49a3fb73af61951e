//! Detection runner that orchestrates all checks.

use std::sync::Arc;
use std::time::Duration;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::annotate::{Annotator, Document, HeuristicAnnotator};
use crate::bundle::{HeuristicBundle, Matchers};
use crate::config::{self, AnalysisConfig};
use crate::error::{EngineError, Result};
use crate::readability::ReadabilityScorer;

use super::{
    analyze_dialogue, detect_complex_sentences, detect_filter_words, detect_nonstandard_speech,
    detect_overused_words, detect_passive_weak, detect_repeated_starts, detect_telling,
    detect_unclear_pronouns, detect_weak_verbs, score_sentences, AnalysisResult, ByteSpan,
    Category, SentenceReport, SpanAnnotation, TextSpan,
};

/// Annotates a text once and runs every enabled detector over it.
///
/// A runner holds no per-call state and can be shared between threads.
pub struct Runner {
    config: AnalysisConfig,
    bundle: Arc<HeuristicBundle>,
    matchers: Matchers,
    annotator: Arc<dyn Annotator>,
    scorer: Arc<dyn ReadabilityScorer>,
    target_grade: f64,
}

/// Builder for [`Runner`]; collaborators not supplied are derived from the
/// bundle.
#[derive(Default)]
pub struct RunnerBuilder {
    config: AnalysisConfig,
    bundle: Option<HeuristicBundle>,
    annotator: Option<Arc<dyn Annotator>>,
    scorer: Option<Arc<dyn ReadabilityScorer>>,
}

impl RunnerBuilder {
    pub fn config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    /// Use this bundle instead of the one the configuration selects.
    pub fn bundle(mut self, bundle: HeuristicBundle) -> Self {
        self.bundle = Some(bundle);
        self
    }

    pub fn annotator(mut self, annotator: Arc<dyn Annotator>) -> Self {
        self.annotator = Some(annotator);
        self
    }

    pub fn scorer(mut self, scorer: Arc<dyn ReadabilityScorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    /// Validate the configuration and assemble the runner.
    pub fn build(self) -> Result<Runner> {
        let bundle = match self.bundle {
            Some(bundle) => {
                config::validate_settings(&self.config)?;
                bundle.validate()?;
                bundle
            }
            None => {
                config::validate(&self.config)?;
                self.config.load_bundle()?
            }
        };
        let matchers = bundle.matchers()?;
        let target_grade = self.config.effective_target_grade()?;

        let annotator = self.annotator.unwrap_or_else(|| {
            Arc::new(HeuristicAnnotator::for_bundle(&bundle)) as Arc<dyn Annotator>
        });
        if annotator.language() != bundle.language {
            warn!(
                annotator = annotator.language(),
                bundle = %bundle.language,
                "annotator and bundle languages differ"
            );
        }
        let scorer = self
            .scorer
            .unwrap_or_else(|| Arc::from(bundle.readability.scorer()));

        Ok(Runner {
            config: self.config,
            bundle: Arc::new(bundle),
            matchers,
            annotator,
            scorer,
            target_grade,
        })
    }
}

impl Runner {
    pub fn builder() -> RunnerBuilder {
        RunnerBuilder::default()
    }

    /// Runner with the built-in collaborators for a configuration.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn bundle(&self) -> &HeuristicBundle {
        &self.bundle
    }

    /// Target grade after genre presets.
    pub fn target_grade(&self) -> f64 {
        self.target_grade
    }

    /// Run one span detector.
    fn detect(&self, category: Category, doc: &Document) -> Vec<ByteSpan> {
        let bundle = self.bundle.as_ref();
        match category {
            Category::PassiveWeak => detect_passive_weak(doc, bundle, &self.matchers),
            Category::NonstandardSpeech => detect_nonstandard_speech(doc, bundle),
            Category::FilterWord => detect_filter_words(doc, bundle),
            Category::Telling => detect_telling(doc, bundle, self.config.telling.lookahead),
            Category::WeakVerb => detect_weak_verbs(doc, bundle),
            Category::Overused => detect_overused_words(doc, bundle, &self.config.overused),
            Category::Pronoun => detect_unclear_pronouns(doc, bundle),
            Category::RepetitiveStart => {
                detect_repeated_starts(doc, bundle, self.config.repetition.threshold)
            }
            // Scored alongside the sentence reports.
            Category::Complex => Vec::new(),
        }
    }

    /// Analyze a text with every enabled detector.
    pub fn analyze(&self, text: &str) -> Result<AnalysisResult> {
        let doc = self.annotator.annotate(text)?;
        doc.validate()?;

        let enabled = self.config.categories.enabled();
        let complex_enabled = enabled.contains(&Category::Complex);
        let detectors: Vec<Category> = enabled
            .iter()
            .copied()
            .filter(|c| *c != Category::Complex)
            .collect();
        let scorer: Option<&dyn ReadabilityScorer> = if complex_enabled {
            Some(self.scorer.as_ref())
        } else {
            None
        };

        let (mut detected, (scored, balance)) = rayon::join(
            || {
                detectors
                    .par_iter()
                    .map(|c| (*c, self.detect(*c, &doc)))
                    .collect::<Vec<_>>()
            },
            || {
                rayon::join(
                    || {
                        score_sentences(
                            &doc,
                            scorer,
                            self.target_grade,
                            self.config.complexity.min_words,
                        )
                    },
                    || analyze_dialogue(text, &self.matchers.quote, &self.config.dialogue),
                )
            },
        );
        if complex_enabled {
            detected.push((Category::Complex, detect_complex_sentences(&scored)));
        }

        let offsets = doc.offsets();
        let mut spans = std::collections::BTreeMap::new();
        for (category, raw) in detected {
            let converted = to_annotations(&doc, category, raw)?;
            debug!(category = %category, spans = converted.len(), "detector finished");
            spans.insert(category, converted);
        }

        let sentences = scored
            .iter()
            .map(|s| {
                let (start, end) = offsets.to_char_range(s.start, s.end).ok_or_else(|| {
                    EngineError::AnnotationFailure(format!(
                        "sentence {}..{} is not on a character boundary",
                        s.start, s.end
                    ))
                })?;
                Ok(SentenceReport {
                    start,
                    end,
                    text: text[s.start..s.end].to_string(),
                    word_count: s.word_count,
                    grade: s.grade,
                    is_complex: s.is_complex,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let dialogue_heavy = balance
            .heavy
            .iter()
            .filter_map(|(s, e)| offsets.to_char_range(*s, *e))
            .map(|(start, end)| TextSpan { start, end })
            .collect();

        let result = AnalysisResult {
            language: self.bundle.language.clone(),
            target_grade: self.target_grade,
            text_chars: offsets.char_len(),
            sentences,
            spans,
            dialogue_ratio: balance.ratio,
            dialogue_heavy,
        };

        info!(
            sentences = result.sentences.len(),
            tokens = doc.tokens().len(),
            issues = result.total_issues(),
            "analysis complete"
        );
        Ok(result)
    }

    /// Analyze on tokio's blocking pool, giving up after `limit`.
    ///
    /// On timeout the work still running is abandoned and its result
    /// discarded.
    pub async fn analyze_with_timeout(
        self: Arc<Self>,
        text: String,
        limit: Duration,
    ) -> Result<AnalysisResult> {
        let task = tokio::task::spawn_blocking(move || self.analyze(&text));
        match tokio::time::timeout(limit, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(EngineError::AnnotationFailure(format!(
                "analysis task aborted: {}",
                e
            ))),
            Err(_) => Err(EngineError::Timeout(limit)),
        }
    }
}

/// Convert detector output to character offsets, rejecting bad spans.
fn to_annotations(
    doc: &Document,
    category: Category,
    raw: Vec<ByteSpan>,
) -> Result<Vec<SpanAnnotation>> {
    let offsets = doc.offsets();
    let mut out = raw
        .into_iter()
        .map(|span| {
            if span.start >= span.end {
                return Err(EngineError::analyzer(
                    category,
                    format!("empty or inverted span {}..{}", span.start, span.end),
                ));
            }
            let (start, end) = offsets.to_char_range(span.start, span.end).ok_or_else(|| {
                EngineError::analyzer(
                    category,
                    format!(
                        "span {}..{} is out of bounds or not on a character boundary",
                        span.start, span.end
                    ),
                )
            })?;
            Ok(SpanAnnotation {
                start,
                end,
                category,
                payload: span.payload,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    out.sort_by_key(|s| (s.start, s.end));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::{Pos, Sentence, Token};
    use crate::detect::Payload;

    struct FailingAnnotator;

    impl Annotator for FailingAnnotator {
        fn language(&self) -> &str {
            "en"
        }

        fn annotate(&self, _text: &str) -> Result<Document> {
            Err(EngineError::AnnotationFailure("model unavailable".to_string()))
        }
    }

    /// Returns a token that runs past the end of the text.
    struct BrokenAnnotator;

    impl Annotator for BrokenAnnotator {
        fn language(&self) -> &str {
            "en"
        }

        fn annotate(&self, text: &str) -> Result<Document> {
            let token = Token {
                start: 0,
                end: text.len() + 5,
                text: text.to_string(),
                lemma: text.to_lowercase(),
                pos: Pos::Noun,
                tag: "NN".to_string(),
                dep: "ROOT".to_string(),
                sentence: 0,
            };
            let sentence = Sentence {
                start: 0,
                end: text.len(),
                tokens: 0..1,
            };
            Ok(Document::new(text, vec![sentence], vec![token]))
        }
    }

    struct SlowAnnotator;

    impl Annotator for SlowAnnotator {
        fn language(&self) -> &str {
            "en"
        }

        fn annotate(&self, text: &str) -> Result<Document> {
            std::thread::sleep(Duration::from_millis(300));
            HeuristicAnnotator::for_bundle(&crate::bundle::english()).annotate(text)
        }
    }

    #[test]
    fn test_runner_passive_sentence() {
        let runner = Runner::new(AnalysisConfig::default()).unwrap();
        let text = "He was given the award by the committee.";
        let result = runner.analyze(text).unwrap();

        let passive = result.spans(Category::PassiveWeak);
        assert_eq!(passive.len(), 1);
        assert_eq!((passive[0].start, passive[0].end), (0, text.chars().count()));
        assert_eq!(passive[0].payload, Payload::Passive);
        assert_eq!(result.sentences.len(), 1);
        assert_eq!(result.spans.len(), Category::ALL.len());
    }

    #[test]
    fn test_disabled_categories_are_absent() {
        let mut config = AnalysisConfig::default();
        config.categories.set(Category::Overused, false);
        config.categories.set(Category::Complex, false);
        let runner = Runner::new(config).unwrap();
        let result = runner.analyze("The forest. The forest. The forest.").unwrap();

        assert!(!result.spans.contains_key(&Category::Overused));
        assert!(!result.spans.contains_key(&Category::Complex));
        assert!(result.spans.contains_key(&Category::Telling));
        assert!(result.sentences.iter().all(|s| s.grade.is_none()));
    }

    #[test]
    fn test_genre_sets_target_grade() {
        let config = AnalysisConfig {
            genre: Some("Thriller".to_string()),
            ..Default::default()
        };
        let runner = Runner::new(config).unwrap();
        assert_eq!(runner.target_grade(), 11.0);
        let result = runner.analyze("Short text.").unwrap();
        assert_eq!(result.target_grade, 11.0);
    }

    #[test]
    fn test_invalid_configuration_fails_build() {
        let mut config = AnalysisConfig::default();
        config.telling.lookahead = 0;
        assert!(matches!(
            Runner::new(config),
            Err(EngineError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_annotation_failure_propagates() {
        let runner = Runner::builder()
            .annotator(Arc::new(FailingAnnotator))
            .build()
            .unwrap();
        assert!(matches!(
            runner.analyze("Anything."),
            Err(EngineError::AnnotationFailure(_))
        ));
    }

    #[test]
    fn test_malformed_document_is_rejected() {
        let runner = Runner::builder()
            .annotator(Arc::new(BrokenAnnotator))
            .build()
            .unwrap();
        assert!(matches!(
            runner.analyze("Hello"),
            Err(EngineError::AnnotationFailure(_))
        ));
    }

    #[test]
    fn test_injected_scorer_drives_complexity() {
        struct Always(f64);
        impl ReadabilityScorer for Always {
            fn score(&self, _text: &str) -> f64 {
                self.0
            }
        }

        let text = "One two three four five six. Short one.";
        let hard = Runner::builder()
            .scorer(Arc::new(Always(20.0)))
            .build()
            .unwrap()
            .analyze(text)
            .unwrap();
        assert_eq!(hard.spans(Category::Complex).len(), 1);
        assert_eq!(hard.sentences[1].grade, None);

        let easy = Runner::builder()
            .scorer(Arc::new(Always(2.0)))
            .build()
            .unwrap()
            .analyze(text)
            .unwrap();
        assert!(easy.spans(Category::Complex).is_empty());
    }

    #[test]
    fn test_offsets_are_characters() {
        let runner = Runner::new(AnalysisConfig::default()).unwrap();
        let text = "Café owners whispered. \u{201C}Go,\u{201D} she whispered.";
        let result = runner.analyze(text).unwrap();
        for span in result.all_spans() {
            assert!(span.start < span.end);
            assert!(span.end <= result.text_chars);
        }
        let speech = result.spans(Category::NonstandardSpeech);
        assert!(!speech.is_empty());
        let last = speech.last().unwrap();
        assert_eq!(
            crate::annotate::char_slice(text, last.start, last.end),
            "whispered"
        );
    }

    #[test]
    fn test_to_annotations_rejects_bad_span() {
        let doc = HeuristicAnnotator::for_bundle(&crate::bundle::english())
            .annotate("Café.")
            .unwrap();
        // Byte 4 falls inside the two-byte "é".
        let bad = vec![ByteSpan::new(0, 4, Payload::Passive)];
        assert!(matches!(
            to_annotations(&doc, Category::PassiveWeak, bad),
            Err(EngineError::AnalyzerFailure { category: Category::PassiveWeak, .. })
        ));
        let inverted = vec![ByteSpan::new(3, 3, Payload::Passive)];
        assert!(to_annotations(&doc, Category::PassiveWeak, inverted).is_err());
    }

    #[tokio::test]
    async fn test_timeout() {
        let runner = Arc::new(
            Runner::builder()
                .annotator(Arc::new(SlowAnnotator))
                .build()
                .unwrap(),
        );
        let err = runner
            .clone()
            .analyze_with_timeout("Slow text.".to_string(), Duration::from_millis(20))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Timeout(_)));

        let ok = runner
            .analyze_with_timeout("Slow text.".to_string(), Duration::from_secs(30))
            .await;
        assert!(ok.is_ok());
    }
}
