//! Repeated sentence openings.

use std::collections::HashMap;

use crate::annotate::{Document, Token};
use crate::bundle::HeuristicBundle;

use super::{ByteSpan, Payload};

/// First alphabetic token of a sentence that is not a skip word.
fn starter<'a>(tokens: &'a [Token], bundle: &HeuristicBundle) -> Option<&'a Token> {
    tokens
        .iter()
        .find(|t| t.is_alpha() && !bundle.starter_skip_words.contains(&t.lower()))
}

/// Flag every sentence whose opening word (by lemma) starts at least
/// `threshold` sentences of the document.
pub fn detect_repeated_starts(
    doc: &Document,
    bundle: &HeuristicBundle,
    threshold: usize,
) -> Vec<ByteSpan> {
    let starters: Vec<(usize, &Token)> = doc
        .sentences()
        .iter()
        .filter_map(|s| starter(doc.sentence_tokens(s), bundle).map(|t| (s.start, t)))
        .collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for (_, token) in &starters {
        *counts.entry(token.lemma.as_str()).or_insert(0) += 1;
    }

    starters
        .iter()
        .filter(|(_, token)| counts.get(token.lemma.as_str()).copied().unwrap_or(0) >= threshold)
        .map(|(sentence_start, token)| {
            ByteSpan::new(
                *sentence_start,
                token.end,
                Payload::RepeatedStart {
                    starter: token.lemma.clone(),
                },
            )
        })
        .collect()
}
