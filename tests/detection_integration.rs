//! Integration tests for the detectors.
//!
//! These run full analyses through the public API and check the documented
//! scenarios plus the properties every result must satisfy.

use std::path::PathBuf;

use prosecheck::annotate::char_slice;
use prosecheck::config::OverusedSettings;
use prosecheck::detect::{Construction, TextSpan};
use prosecheck::{comprehensive_analysis, AnalysisConfig, AnalysisResult, Category, Payload, Runner};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn analyze(text: &str) -> AnalysisResult {
    comprehensive_analysis(text, 8.0, AnalysisConfig::default()).expect("analysis should succeed")
}

fn manuscript() -> String {
    std::fs::read_to_string(testdata_path().join("manuscript.txt")).expect("should read fixture")
}

fn assert_well_formed(text: &str, result: &AnalysisResult) {
    let chars = text.chars().count();
    assert_eq!(result.text_chars, chars);
    for (category, spans) in &result.spans {
        for span in spans {
            assert_eq!(span.category, *category);
            assert!(span.start < span.end, "{:?}", span);
            assert!(span.end <= chars, "{:?}", span);
        }
        for pair in spans.windows(2) {
            assert!(
                (pair[0].start, pair[0].end) <= (pair[1].start, pair[1].end),
                "{} spans out of order",
                category
            );
        }
    }
    for pair in result.sentences.windows(2) {
        assert!(pair[0].end <= pair[1].start);
        assert!(pair[0].start < pair[1].start);
    }
    assert!((0.0..=1.0).contains(&result.dialogue_ratio));
}

#[test]
fn test_passive_with_agent_spans_whole_sentence() {
    let text = "He was given the award by the committee.";
    let result = analyze(text);
    let passive = result.spans(Category::PassiveWeak);
    assert_eq!(passive.len(), 1);
    assert_eq!(passive[0].start, 0);
    assert_eq!(passive[0].end, text.chars().count());
    assert_eq!(passive[0].payload, Payload::Passive);
}

#[test]
fn test_nonstandard_dialogue_tag() {
    let text = "\"Hello there!\" she chastised.";
    let result = analyze(text);
    assert_eq!(result.sentences.len(), 1);
    let speech = result.spans(Category::NonstandardSpeech);
    assert_eq!(speech.len(), 1);
    assert_eq!(char_slice(text, speech[0].start, speech[0].end), "chastised");
    assert_eq!(
        speech[0].payload,
        Payload::SpeechVerb {
            lemma: "chastise".to_string()
        }
    );
}

#[test]
fn test_overused_word_reported_once_per_cluster() {
    let text = "The forest loomed. Wind moved through the forest. \
                Birds left the forest at dusk. Nobody entered the forest.";
    let first = text.find("forest").unwrap();
    let last = text.rfind("forest").unwrap();
    assert!(last - first < 200);

    let mut config = AnalysisConfig::default();
    config.overused = OverusedSettings {
        threshold: 3,
        window: 1000,
        ..Default::default()
    };
    let result = comprehensive_analysis(text, 8.0, config).unwrap();
    let overused = result.spans(Category::Overused);
    assert_eq!(overused.len(), 1);
    assert_eq!(overused[0].start, first);
    assert_eq!(overused[0].end, first + "forest".len());
    assert_eq!(
        overused[0].payload,
        Payload::Overused {
            word: "forest".to_string(),
            count: 4
        }
    );
}

#[test]
fn test_three_sentences_opening_alike() {
    let text = "The door creaked. The hall was cold. The lamp flickered.";
    let result = analyze(text);
    let starts = result.spans(Category::RepetitiveStart);
    assert_eq!(starts.len(), 3);
    for span in starts {
        assert_eq!(char_slice(text, span.start, span.end), "The");
    }
}

#[test]
fn test_dialogue_heavy_paragraph_needs_length() {
    // 150 characters, 120 of them inside quotes.
    let long = format!("\"{}\"{}", "a".repeat(118), "b".repeat(30));
    assert_eq!(long.chars().count(), 150);
    let result = analyze(&long);
    assert_eq!(result.dialogue_heavy, vec![TextSpan { start: 0, end: 150 }]);

    // Same proportion at 90 characters.
    let short = format!("\"{}\"{}", "a".repeat(70), "b".repeat(18));
    assert_eq!(short.chars().count(), 90);
    let result = analyze(&short);
    assert!(result.dialogue_heavy.is_empty());
}

#[test]
fn test_dialogue_ratio_bounds() {
    let all = analyze("\"Every single word here is quoted.\"");
    assert_eq!(all.dialogue_ratio, 1.0);
    let none = analyze("Not a single quotation mark appears here.");
    assert_eq!(none.dialogue_ratio, 0.0);
    let empty = analyze("");
    assert_eq!(empty.dialogue_ratio, 0.0);
    assert!(empty.sentences.is_empty());
    assert_eq!(empty.total_issues(), 0);
}

#[test]
fn test_manuscript_is_well_formed() {
    let text = manuscript();
    let result = analyze(&text);
    assert_well_formed(&text, &result);
    assert!(result.sentences.len() > 10);
    assert_eq!(result.spans.len(), Category::ALL.len());
    assert!(!result.spans(Category::FilterWord).is_empty());
    assert!(!result.spans(Category::Telling).is_empty());
    assert!(!result.spans(Category::NonstandardSpeech).is_empty());
    assert!(result.dialogue_ratio > 0.0);
}

#[test]
fn test_analysis_is_idempotent() {
    let text = manuscript();
    let runner = Runner::new(AnalysisConfig::default()).unwrap();
    let first = runner.analyze(&text).unwrap();
    let second = runner.analyze(&text).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_complexity_monotonic_in_target_grade() {
    let text = manuscript();
    let mut previous = usize::MAX;
    for grade in [2.0, 5.0, 8.0, 12.0, 20.0] {
        let result = comprehensive_analysis(&text, grade, AnalysisConfig::default()).unwrap();
        let complex = result.spans(Category::Complex).len();
        assert!(complex <= previous, "grade {} flagged more sentences", grade);
        assert_eq!(
            complex,
            result.sentences.iter().filter(|s| s.is_complex).count()
        );
        previous = complex;
    }
}

#[test]
fn test_short_sentences_are_not_graded() {
    let result = analyze("It rained. Then the storm broke over the harbour town.");
    assert_eq!(result.sentences.len(), 2);
    assert_eq!(result.sentences[0].word_count, 2);
    assert!(result.sentences[0].grade.is_none());
    assert!(result.sentences[1].grade.is_some());
}

#[test]
fn test_offsets_survive_multibyte_text() {
    let text = "Zoë whispered. \u{201C}Déjà vu,\u{201D} she murmured. The café was empty.";
    let result = analyze(text);
    assert_well_formed(text, &result);
    let speech: Vec<&str> = result
        .spans(Category::NonstandardSpeech)
        .iter()
        .map(|s| char_slice(text, s.start, s.end))
        .collect();
    assert!(speech.contains(&"murmured"));
    let weak: Vec<&str> = result
        .spans(Category::WeakVerb)
        .iter()
        .map(|s| char_slice(text, s.start, s.end))
        .collect();
    assert!(weak.contains(&"was"));
}

#[test]
fn test_weak_verb_constructions() {
    let text = "She was waiting at the gate.";
    let result = analyze(text);
    let weak = result.spans(Category::WeakVerb);
    assert_eq!(weak.len(), 1);
    assert_eq!(char_slice(text, weak[0].start, weak[0].end), "was waiting");
    assert_eq!(
        weak[0].payload,
        Payload::WeakVerb {
            construction: Construction::ContinuousTense
        }
    );
}

#[test]
fn test_disabled_categories_are_omitted() {
    let mut config = AnalysisConfig::default();
    for category in Category::ALL {
        config.categories.set(category, false);
    }
    config.categories.set(Category::Telling, true);
    let result = comprehensive_analysis("She felt so angry.", 8.0, config).unwrap();
    assert_eq!(result.spans.keys().copied().collect::<Vec<_>>(), vec![Category::Telling]);
    assert_eq!(result.spans(Category::Telling).len(), 1);
}

#[test]
fn test_german_bundle() {
    let config = AnalysisConfig {
        language: "de".to_string(),
        ..Default::default()
    };
    let text = "\u{201E}Komm sofort her\u{201C}, rief Anna. Er war sehr traurig. \
                Er sah das Boot.";
    let result = comprehensive_analysis(text, 8.0, config).unwrap();
    assert_eq!(result.language, "de");
    assert_well_formed(text, &result);
    assert!(result.dialogue_ratio > 0.0);

    let speech = result.spans(Category::NonstandardSpeech);
    assert_eq!(speech.len(), 1);
    assert_eq!(char_slice(text, speech[0].start, speech[0].end), "rief");

    let telling = result.spans(Category::Telling);
    assert_eq!(telling.len(), 1);
    assert_eq!(
        char_slice(text, telling[0].start, telling[0].end),
        "war sehr traurig"
    );

    let filter = result.spans(Category::FilterWord);
    assert!(filter
        .iter()
        .any(|s| char_slice(text, s.start, s.end) == "sah"));
}

#[test]
fn test_config_fixture_drives_runner() {
    let config = AnalysisConfig::parse_file(testdata_path().join("strict.yaml")).unwrap();
    let runner = Runner::new(config).unwrap();
    assert_eq!(runner.target_grade(), 9.0);
    let result = runner.analyze(&manuscript()).unwrap();
    assert!(!result.spans.contains_key(&Category::Pronoun));
}
