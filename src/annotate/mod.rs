//! Linguistic annotation layer.
//!
//! The engine consumes a [`Document`]: sentence boundaries plus, for every
//! token, its surface text, byte span, lemma, part of speech, fine-grained tag
//! and dependency label. Anything that implements [`Annotator`] can provide
//! one; the built-in [`HeuristicAnnotator`] does it with rules and lexicons.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────┐     ┌─────────────┐     ┌────────┐     ┌──────────┐
//! │ raw text  │────▶│ segment     │────▶│ Tagger │────▶│ Document │
//! └───────────┘     │ (tokens,    │     │ (en,   │     └──────────┘
//!                   │  sentences) │     │  basic)│
//!                   └─────────────┘     └────────┘
//! ```
//!
//! # Adding a New Language
//!
//! Implement [`Tagger`] (or a whole [`Annotator`]) and select it from
//! [`HeuristicAnnotator::for_bundle`].

mod english;
mod heuristic;
mod offsets;
mod segment;

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

pub use english::EnglishTagger;
pub use heuristic::{BasicTagger, HeuristicAnnotator, TagContext, TaggedWord, Tagger};
pub use offsets::{char_slice, OffsetMap};

/// Coarse, universal part-of-speech categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Pos {
    Noun,
    Propn,
    Verb,
    Aux,
    Adj,
    Adv,
    Pron,
    Det,
    Adp,
    Cconj,
    Sconj,
    Part,
    Num,
    Intj,
    Punct,
    X,
}

impl Pos {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pos::Noun => "NOUN",
            Pos::Propn => "PROPN",
            Pos::Verb => "VERB",
            Pos::Aux => "AUX",
            Pos::Adj => "ADJ",
            Pos::Adv => "ADV",
            Pos::Pron => "PRON",
            Pos::Det => "DET",
            Pos::Adp => "ADP",
            Pos::Cconj => "CCONJ",
            Pos::Sconj => "SCONJ",
            Pos::Part => "PART",
            Pos::Num => "NUM",
            Pos::Intj => "INTJ",
            Pos::Punct => "PUNCT",
            Pos::X => "X",
        }
    }

    /// Nouns, proper nouns and pronouns: things that can head a subject.
    pub fn is_nominal(&self) -> bool {
        matches!(self, Pos::Noun | Pos::Propn | Pos::Pron)
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single annotated token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Start byte offset into the source text.
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    pub text: String,
    /// Dictionary form, lowercased.
    pub lemma: String,
    pub pos: Pos,
    /// Fine-grained tag (Penn style for English: VBN, VBG, NNP...).
    pub tag: String,
    /// Dependency label relative to the sentence (ROOT, nsubjpass, agent...).
    pub dep: String,
    /// Index of the owning sentence.
    pub sentence: usize,
}

impl Token {
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    pub fn is_alpha(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(char::is_alphabetic)
    }

    pub fn is_punct(&self) -> bool {
        self.pos == Pos::Punct
    }
}

/// Sentence boundaries within a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Start byte offset of the first token.
    pub start: usize,
    /// End byte offset of the last token (exclusive).
    pub end: usize,
    /// Indices into [`Document::tokens`].
    pub tokens: Range<usize>,
}

/// The annotated form of a text, shared read-only by every analyzer.
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    sentences: Vec<Sentence>,
    tokens: Vec<Token>,
    offsets: OffsetMap,
}

impl Document {
    pub fn new(text: &str, sentences: Vec<Sentence>, tokens: Vec<Token>) -> Self {
        Self {
            text: text.to_string(),
            sentences,
            tokens,
            offsets: OffsetMap::new(text),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Tokens belonging to one sentence.
    pub fn sentence_tokens(&self, sentence: &Sentence) -> &[Token] {
        &self.tokens[sentence.tokens.clone()]
    }

    /// Raw text of one sentence.
    pub fn sentence_text(&self, sentence: &Sentence) -> &str {
        &self.text[sentence.start..sentence.end]
    }

    /// Byte to character offset mapping for the source text.
    pub fn offsets(&self) -> &OffsetMap {
        &self.offsets
    }

    /// Check that the document is consistent with its text.
    ///
    /// Annotators are pluggable, so the runner never trusts their output.
    pub fn validate(&self) -> Result<()> {
        let len = self.text.len();
        let fail = |msg: String| Err(EngineError::AnnotationFailure(msg));

        for (i, tok) in self.tokens.iter().enumerate() {
            if tok.start >= tok.end || tok.end > len {
                return fail(format!(
                    "token {} has invalid span {}..{} (text length {})",
                    i, tok.start, tok.end, len
                ));
            }
            if !self.text.is_char_boundary(tok.start) || !self.text.is_char_boundary(tok.end) {
                return fail(format!("token {} is not on a character boundary", i));
            }
            if i > 0 && self.tokens[i - 1].end > tok.start {
                return fail(format!("token {} overlaps its predecessor", i));
            }
        }

        let mut prev_end = 0;
        for (i, sent) in self.sentences.iter().enumerate() {
            if sent.start >= sent.end || sent.end > len {
                return fail(format!("sentence {} has invalid span {}..{}", i, sent.start, sent.end));
            }
            if i > 0 && sent.start < prev_end {
                return fail(format!("sentence {} overlaps its predecessor", i));
            }
            if sent.tokens.end > self.tokens.len() {
                return fail(format!("sentence {} references missing tokens", i));
            }
            for tok in &self.tokens[sent.tokens.clone()] {
                if tok.sentence != i || tok.start < sent.start || tok.end > sent.end {
                    return fail(format!("token {:?} lies outside sentence {}", tok.text, i));
                }
            }
            prev_end = sent.end;
        }

        Ok(())
    }
}

/// An annotation provider.
///
/// Implementations must be safe to call concurrently for independent texts.
pub trait Annotator: Send + Sync {
    /// Language code this annotator handles (e.g. "en").
    fn language(&self) -> &str;

    /// Annotate a text. Failure is final for the call.
    fn annotate(&self, text: &str) -> Result<Document>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(start: usize, end: usize, text: &str, sentence: usize) -> Token {
        Token {
            start,
            end,
            text: text.to_string(),
            lemma: text.to_lowercase(),
            pos: Pos::X,
            tag: "XX".to_string(),
            dep: "dep".to_string(),
            sentence,
        }
    }

    #[test]
    fn test_validate_accepts_consistent_document() {
        let text = "Hi there.";
        let tokens = vec![
            token(0, 2, "Hi", 0),
            token(3, 8, "there", 0),
            token(8, 9, ".", 0),
        ];
        let sentences = vec![Sentence { start: 0, end: 9, tokens: 0..3 }];
        let doc = Document::new(text, sentences, tokens);
        assert!(doc.validate().is_ok());
        assert_eq!(doc.sentence_text(&doc.sentences()[0]), "Hi there.");
    }

    #[test]
    fn test_validate_rejects_out_of_bounds_token() {
        let text = "Hi";
        let tokens = vec![token(0, 5, "Hi", 0)];
        let sentences = vec![Sentence { start: 0, end: 2, tokens: 0..1 }];
        let doc = Document::new(text, sentences, tokens);
        assert!(matches!(doc.validate(), Err(EngineError::AnnotationFailure(_))));
    }

    #[test]
    fn test_validate_rejects_overlapping_sentences() {
        let text = "Hi there";
        let tokens = vec![token(0, 2, "Hi", 0), token(3, 8, "there", 1)];
        let sentences = vec![
            Sentence { start: 0, end: 5, tokens: 0..1 },
            Sentence { start: 3, end: 8, tokens: 1..2 },
        ];
        let doc = Document::new(text, sentences, tokens);
        assert!(doc.validate().is_err());
    }
}
