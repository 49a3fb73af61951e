//! Rule-based annotation provider.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use super::segment::{self, RawToken};
use super::{Annotator, Document, EnglishTagger, Pos, Sentence, Token};
use crate::bundle::HeuristicBundle;
use crate::error::{EngineError, Result};

/// Longest text (in characters) the built-in annotator accepts.
pub const DEFAULT_MAX_LENGTH: usize = 1_000_000;

/// Per-token output of a [`Tagger`].
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedWord {
    pub lemma: String,
    pub pos: Pos,
    pub tag: String,
    pub dep: String,
}

impl TaggedWord {
    pub fn new(lemma: impl Into<String>, pos: Pos, tag: &str) -> Self {
        Self {
            lemma: lemma.into(),
            pos,
            tag: tag.to_string(),
            dep: "dep".to_string(),
        }
    }
}

/// Document-wide facts available while tagging a single sentence.
#[derive(Debug, Default)]
pub struct TagContext {
    /// Capitalized word forms seen somewhere other than the start of a
    /// sentence or quotation. Those are treated as names even when they
    /// open a sentence.
    names: HashSet<String>,
}

impl TagContext {
    fn build(text: &str, tokens: &[RawToken], sentences: &[std::ops::Range<usize>]) -> Self {
        let mut names = HashSet::new();
        for range in sentences {
            let words: Vec<&str> = tokens[range.clone()].iter().map(|t| t.text(text)).collect();
            let initial = initial_positions(&words);
            for (i, word) in words.iter().enumerate() {
                if !initial[i] && is_capitalized(word) && *word != "I" {
                    names.insert(word.to_string());
                }
            }
        }
        Self { names }
    }

    /// Whether a capitalized form is known to be a name.
    pub fn is_name(&self, word: &str) -> bool {
        self.names.contains(word)
    }
}

/// Tags the words of one sentence.
///
/// Implementations return exactly one [`TaggedWord`] per input word, with
/// dependency labels filled in.
pub trait Tagger: Send + Sync {
    fn language(&self) -> &str;

    fn tag_sentence(&self, words: &[&str], ctx: &TagContext) -> Vec<TaggedWord>;
}

pub(crate) fn is_capitalized(word: &str) -> bool {
    word.chars().next().map(char::is_uppercase).unwrap_or(false)
}

pub(crate) fn is_punct_word(word: &str) -> bool {
    word.chars().next().map(|c| !c.is_alphanumeric()).unwrap_or(true)
}

/// Marks the words that open the sentence or a quotation inside it.
pub(crate) fn initial_positions(words: &[&str]) -> Vec<bool> {
    let mut out = vec![false; words.len()];
    let mut expecting = true;
    // Straight quotes alternate open/close; a low quote is closed by a
    // high one („…“).
    let mut straight_open = false;
    let mut low_open = false;
    for (i, word) in words.iter().enumerate() {
        if is_punct_word(word) {
            match *word {
                "\"" => {
                    straight_open = !straight_open;
                    if straight_open {
                        expecting = true;
                    }
                }
                "\u{201E}" => {
                    low_open = true;
                    expecting = true;
                }
                "\u{201C}" if low_open => low_open = false,
                "\u{201C}" | "\u{00AB}" | "\u{2018}" | ":" | "(" => expecting = true,
                _ => {}
            }
            continue;
        }
        out[i] = expecting;
        expecting = false;
    }
    out
}

/// Annotation provider built from a segmenter and a pluggable [`Tagger`].
pub struct HeuristicAnnotator {
    tagger: Box<dyn Tagger>,
    max_length: usize,
}

impl HeuristicAnnotator {
    pub fn new(tagger: Box<dyn Tagger>) -> Self {
        Self {
            tagger,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }

    /// Choose a tagger for the bundle's language.
    pub fn for_bundle(bundle: &HeuristicBundle) -> Self {
        let tagger: Box<dyn Tagger> = match bundle.language.as_str() {
            "en" => Box::new(EnglishTagger::new(bundle)),
            _ => Box::new(BasicTagger::new(bundle)),
        };
        Self::new(tagger)
    }

    /// Set the maximum accepted text length in characters.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }
}

impl Annotator for HeuristicAnnotator {
    fn language(&self) -> &str {
        self.tagger.language()
    }

    fn annotate(&self, text: &str) -> Result<Document> {
        let char_len = text.chars().count();
        if char_len > self.max_length {
            return Err(EngineError::AnnotationFailure(format!(
                "text of {} characters exceeds maximum length {}",
                char_len, self.max_length
            )));
        }
        if text.contains('\0') {
            return Err(EngineError::AnnotationFailure(
                "text contains NUL characters".to_string(),
            ));
        }

        let raw = segment::tokenize(text);
        let ranges = segment::split_sentences(text, &raw);
        let ctx = TagContext::build(text, &raw, &ranges);

        let mut tokens = Vec::with_capacity(raw.len());
        let mut sentences = Vec::with_capacity(ranges.len());

        for (idx, range) in ranges.iter().enumerate() {
            let words: Vec<&str> = raw[range.clone()].iter().map(|t| t.text(text)).collect();
            let tagged = self.tagger.tag_sentence(&words, &ctx);
            if tagged.len() != words.len() {
                return Err(EngineError::AnnotationFailure(format!(
                    "tagger returned {} tags for {} words",
                    tagged.len(),
                    words.len()
                )));
            }

            let first = tokens.len();
            for (raw_tok, tw) in raw[range.clone()].iter().zip(tagged) {
                tokens.push(Token {
                    start: raw_tok.start,
                    end: raw_tok.end,
                    text: raw_tok.text(text).to_string(),
                    lemma: tw.lemma,
                    pos: tw.pos,
                    tag: tw.tag,
                    dep: tw.dep,
                    sentence: idx,
                });
            }
            sentences.push(Sentence {
                start: raw[range.start].start,
                end: raw[range.end - 1].end,
                tokens: first..tokens.len(),
            });
        }

        debug!(
            language = self.tagger.language(),
            sentences = sentences.len(),
            tokens = tokens.len(),
            "annotated text"
        );

        Ok(Document::new(text, sentences, tokens))
    }
}

/// Lexicon-free tagger for languages without a dedicated one.
///
/// Recognizes punctuation, numbers, the bundle's pronouns and verb lemmas,
/// and capitalized names. Lemmas come from the bundle's lemma table, else
/// the lowercased surface form.
pub struct BasicTagger {
    language: String,
    lemmas: BTreeMap<String, String>,
    pronouns: HashSet<String>,
    verbs: HashSet<String>,
    copulas: HashSet<String>,
    agent_markers: HashSet<String>,
    /// Languages that capitalize every noun cannot spot names by case.
    capitalized_nouns: bool,
}

impl BasicTagger {
    pub fn new(bundle: &HeuristicBundle) -> Self {
        let pronouns = bundle
            .masculine_pronouns
            .iter()
            .chain(&bundle.feminine_pronouns)
            .chain(&bundle.plural_pronouns)
            .cloned()
            .collect();
        let verbs = bundle
            .speech_verbs
            .iter()
            .chain(&bundle.telling_verbs)
            .chain(&bundle.weak_verbs)
            .cloned()
            .collect();
        Self {
            language: bundle.language.clone(),
            lemmas: bundle.lemmas.clone(),
            pronouns,
            verbs,
            copulas: bundle.copula_lemmas.iter().cloned().collect(),
            agent_markers: bundle.agent_markers.iter().cloned().collect(),
            capitalized_nouns: bundle.capitalized_nouns,
        }
    }
}

impl Tagger for BasicTagger {
    fn language(&self) -> &str {
        &self.language
    }

    fn tag_sentence(&self, words: &[&str], ctx: &TagContext) -> Vec<TaggedWord> {
        let initial = initial_positions(words);
        let mut root_seen = false;

        words
            .iter()
            .enumerate()
            .map(|(i, word)| {
                let lower = word.to_lowercase();
                let lemma = self.lemmas.get(&lower).cloned().unwrap_or_else(|| lower.clone());
                let mut tw = if is_punct_word(word) {
                    TaggedWord::new(lower, Pos::Punct, "PUNCT")
                } else if word.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
                    TaggedWord::new(lower, Pos::Num, "NUM")
                } else if self.pronouns.contains(&lower) {
                    TaggedWord::new(lower, Pos::Pron, "PRON")
                } else if self.copulas.contains(&lemma) {
                    TaggedWord::new(lemma, Pos::Aux, "AUX")
                } else if self.verbs.contains(&lemma) {
                    TaggedWord::new(lemma, Pos::Verb, "VERB")
                } else if self.agent_markers.contains(&lower) {
                    TaggedWord::new(lower, Pos::Adp, "ADP")
                } else if is_capitalized(word)
                    && !self.capitalized_nouns
                    && (!initial[i] || ctx.is_name(word))
                {
                    TaggedWord::new(lower, Pos::Propn, "PROPN")
                } else {
                    TaggedWord::new(lower, Pos::Noun, "NOUN")
                };

                tw.dep = match tw.pos {
                    Pos::Punct => "punct".to_string(),
                    Pos::Verb | Pos::Aux if !root_seen => {
                        root_seen = true;
                        "ROOT".to_string()
                    }
                    _ => "dep".to_string(),
                };
                tw
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle;

    #[test]
    fn test_initial_positions() {
        let words = ["\"", "Come", "here", ",", "\"", "Anna", "said", ":", "\"", "Now", "!"];
        let initial = initial_positions(&words);
        assert!(initial[1]);
        assert!(!initial[2]);
        assert!(!initial[5]);
        assert!(initial[9]);
    }

    #[test]
    fn test_closing_quote_does_not_open_a_sentence() {
        let words = ["\"", "Wait", ",", "\"", "Tom", "said", ",", "\"", "please", ".", "\""];
        let initial = initial_positions(&words);
        assert!(initial[1]);
        assert!(!initial[4]);
        assert!(initial[8]);

        let words = ["\u{201E}", "Komm", "\u{201C}", ",", "rief", "Anna", "."];
        let initial = initial_positions(&words);
        assert!(initial[1]);
        assert!(!initial[4]);
        assert!(!initial[5]);
    }

    #[test]
    fn test_name_after_closing_quote_is_proper_noun() {
        let doc = HeuristicAnnotator::for_bundle(&bundle::english())
            .annotate("\"Come here,\" Anna said.")
            .unwrap();
        let anna = doc.tokens().iter().find(|t| t.text == "Anna").unwrap();
        assert_eq!(anna.pos, Pos::Propn);
    }

    #[test]
    fn test_annotate_rejects_long_text() {
        let annotator = HeuristicAnnotator::for_bundle(&bundle::english()).with_max_length(10);
        let err = annotator.annotate("This text is far too long.").unwrap_err();
        assert!(matches!(err, EngineError::AnnotationFailure(_)));
    }

    #[test]
    fn test_annotate_rejects_nul() {
        let annotator = HeuristicAnnotator::for_bundle(&bundle::english());
        assert!(annotator.annotate("bad\0text").is_err());
    }

    #[test]
    fn test_basic_tagger_marks_root_and_pronouns() {
        let b = bundle::german();
        let annotator = HeuristicAnnotator::for_bundle(&b);
        let doc = annotator.annotate("Er war sehr traurig.").unwrap();
        assert!(doc.validate().is_ok());
        let tokens = doc.tokens();
        assert_eq!(tokens[0].pos, Pos::Pron);
        assert_eq!(tokens[1].lemma, "sein");
        assert_eq!(tokens[1].dep, "ROOT");
        assert_eq!(tokens.iter().filter(|t| t.dep == "ROOT").count(), 1);
        assert_eq!(tokens.last().unwrap().pos, Pos::Punct);
    }
}
