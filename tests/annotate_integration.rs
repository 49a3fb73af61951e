//! Integration tests for the built-in annotator.

use std::path::PathBuf;

use prosecheck::annotate::{Pos, Token};
use prosecheck::bundle::builtin;
use prosecheck::{Annotator, Document, HeuristicAnnotator};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn annotate(language: &str, text: &str) -> Document {
    let bundle = builtin(language).expect("builtin bundle");
    let annotator = HeuristicAnnotator::for_bundle(bundle);
    let doc = annotator.annotate(text).expect("annotation should succeed");
    doc.validate().expect("document should be consistent");
    doc
}

fn sentence_texts(doc: &Document) -> Vec<&str> {
    doc.sentences().iter().map(|s| doc.sentence_text(s)).collect()
}

fn find<'a>(doc: &'a Document, word: &str) -> &'a Token {
    doc.tokens()
        .iter()
        .find(|t| t.text == word)
        .unwrap_or_else(|| panic!("no token {:?}", word))
}

#[test]
fn test_sentences_and_dialogue_tags() {
    let doc = annotate(
        "en",
        "\"Wait for me!\" she shouted. Dr. Marsh did not turn around. He walked on.",
    );
    assert_eq!(
        sentence_texts(&doc),
        vec![
            "\"Wait for me!\" she shouted.",
            "Dr. Marsh did not turn around.",
            "He walked on.",
        ]
    );
}

#[test]
fn test_token_offsets_match_text() {
    let text = "Zoë smiled at the café owner. \u{201C}Merci,\u{201D} she said.";
    let doc = annotate("en", text);
    for token in doc.tokens() {
        assert_eq!(&text[token.start..token.end], token.text);
    }
    let owner = find(&doc, "owner");
    assert_eq!(doc.offsets().to_char(owner.start), Some(23));
}

#[test]
fn test_english_tags_feed_the_detectors() {
    let doc = annotate("en", "The letter was written by Anna. She whispered his name.");
    let written = find(&doc, "written");
    assert_eq!(written.tag, "VBN");
    assert_eq!(written.lemma, "write");
    assert_eq!(find(&doc, "by").dep, "agent");

    let whispered = find(&doc, "whispered");
    assert_eq!(whispered.pos, Pos::Verb);
    assert_eq!(whispered.lemma, "whisper");
    assert_eq!(find(&doc, "Anna").pos, Pos::Propn);
}

#[test]
fn test_every_token_belongs_to_its_sentence() {
    let text = std::fs::read_to_string(testdata_path().join("manuscript.txt"))
        .expect("should read fixture");
    let doc = annotate("en", &text);
    assert!(doc.sentences().len() > 10);
    for (i, sentence) in doc.sentences().iter().enumerate() {
        let tokens = doc.sentence_tokens(sentence);
        assert!(!tokens.is_empty());
        assert!(tokens.iter().all(|t| t.sentence == i));
        assert_eq!(tokens[0].start, sentence.start);
        assert_eq!(tokens[tokens.len() - 1].end, sentence.end);
    }
}

#[test]
fn test_paragraph_break_ends_sentence() {
    let doc = annotate("en", "A heading without a stop\n\nThe story begins here.");
    assert_eq!(doc.sentences().len(), 2);
}

#[test]
fn test_basic_tagger_for_german() {
    let doc = annotate("de", "Sie war sehr traurig. Er rief laut.");
    assert_eq!(doc.sentences().len(), 2);
    let war = find(&doc, "war");
    assert_eq!(war.lemma, "sein");
    let rief = find(&doc, "rief");
    assert_eq!(rief.lemma, "rufen");
    assert_eq!(rief.pos, Pos::Verb);
    assert_eq!(find(&doc, "Sie").pos, Pos::Pron);
}

#[test]
fn test_empty_text() {
    let doc = annotate("en", "");
    assert!(doc.sentences().is_empty());
    assert!(doc.tokens().is_empty());
}

#[test]
fn test_length_limit_is_enforced() {
    let bundle = builtin("en").unwrap();
    let annotator = HeuristicAnnotator::for_bundle(bundle).with_max_length(10);
    assert!(annotator.annotate("This is far too long.").is_err());
    assert!(annotator.annotate("Short.").is_ok());
}
