//! Narrative distance: filter words, telling instead of showing, weak verbs.
//!
//! All three detectors work token by token within a sentence and only read
//! lemmas, tags and dependency labels.

use crate::annotate::Document;
use crate::bundle::HeuristicBundle;

use super::{ByteSpan, Construction, Payload};

/// Perception and thought verbs ("saw", "felt", "wondered").
///
/// Matches on the lemma or the lowercased surface form, since bundles list
/// either.
pub fn detect_filter_words(doc: &Document, bundle: &HeuristicBundle) -> Vec<ByteSpan> {
    doc.tokens()
        .iter()
        .filter(|t| !t.is_punct())
        .filter(|t| bundle.filter_words.contains(&t.lemma) || bundle.filter_words.contains(&t.lower()))
        .map(|t| {
            ByteSpan::token(
                t,
                Payload::FilterWord {
                    word: t.text.clone(),
                },
            )
        })
        .collect()
}

/// A telling verb followed within `lookahead` tokens by an emotion word
/// ("she was very angry").
pub fn detect_telling(doc: &Document, bundle: &HeuristicBundle, lookahead: usize) -> Vec<ByteSpan> {
    let text = doc.text();
    let mut spans = Vec::new();

    for sentence in doc.sentences() {
        let tokens = doc.sentence_tokens(sentence);
        for (i, anchor) in tokens.iter().enumerate() {
            if !bundle.telling_verbs.contains(&anchor.lemma) {
                continue;
            }
            let window = tokens.iter().skip(i + 1).take(lookahead);
            if let Some(emotion) = window
                .into_iter()
                .find(|t| bundle.emotion_words.contains(&t.lemma))
            {
                spans.push(ByteSpan::new(
                    anchor.start,
                    emotion.end,
                    Payload::Telling {
                        phrase: text[anchor.start..emotion.end].to_string(),
                    },
                ));
            }
        }
    }

    spans
}

/// Continuous tense ("was running") and a bare copula as the main verb
/// ("the room was dark").
pub fn detect_weak_verbs(doc: &Document, bundle: &HeuristicBundle) -> Vec<ByteSpan> {
    let mut spans = Vec::new();

    for sentence in doc.sentences() {
        let tokens = doc.sentence_tokens(sentence);
        for (i, token) in tokens.iter().enumerate() {
            if bundle.copula_lemmas.contains(&token.lemma) {
                if let Some(next) = tokens.get(i + 1).filter(|n| n.tag == "VBG") {
                    spans.push(ByteSpan::new(
                        token.start,
                        next.end,
                        Payload::WeakVerb {
                            construction: Construction::ContinuousTense,
                        },
                    ));
                }
            }
            if token.dep == "ROOT" && bundle.weak_verbs.contains(&token.lemma) {
                spans.push(ByteSpan::token(
                    token,
                    Payload::WeakVerb {
                        construction: Construction::BeVerb,
                    },
                ));
            }
        }
    }

    spans
}
