//! Ambiguous pronoun detection.
//!
//! A rough stand-in for coreference: the proper nouns of a sentence are the
//! candidate antecedents of every gendered pronoun in it. A pronoun is
//! unclear when two or more candidates compete for it.

use std::collections::BTreeSet;

use crate::annotate::{Document, Pos};
use crate::bundle::HeuristicBundle;

use super::{ByteSpan, Payload};

/// Bucket trigger words, falling back to the full pronoun set.
fn triggers<'a>(
    narrow: &'a BTreeSet<String>,
    full: &'a BTreeSet<String>,
) -> &'a BTreeSet<String> {
    if narrow.is_empty() {
        full
    } else {
        narrow
    }
}

pub fn detect_unclear_pronouns(doc: &Document, bundle: &HeuristicBundle) -> Vec<ByteSpan> {
    let mut spans = Vec::new();

    for sentence in doc.sentences() {
        let tokens = doc.sentence_tokens(sentence);
        let entities: BTreeSet<&str> = tokens
            .iter()
            .filter(|t| t.pos == Pos::Propn)
            .map(|t| t.text.as_str())
            .collect();
        if entities.len() < 2 {
            continue;
        }

        let lowered: Vec<String> = tokens.iter().map(|t| t.lower()).collect();
        let masculine = triggers(&bundle.masculine_triggers, &bundle.masculine_pronouns);
        let feminine = triggers(&bundle.feminine_triggers, &bundle.feminine_pronouns);

        // The names land in one bucket only; masculine wins when both
        // genders appear.
        let (male, female) = if lowered.iter().any(|w| masculine.contains(w)) {
            (entities.len(), 0)
        } else if lowered.iter().any(|w| feminine.contains(w)) {
            (0, entities.len())
        } else {
            (0, 0)
        };
        let either = male + female;

        for (token, lower) in tokens.iter().zip(&lowered) {
            let ambiguous = (bundle.masculine_pronouns.contains(lower) && male >= 2)
                || (bundle.feminine_pronouns.contains(lower) && female >= 2)
                || (bundle.plural_pronouns.contains(lower) && either >= 2);
            if ambiguous {
                spans.push(ByteSpan::token(
                    token,
                    Payload::Pronoun {
                        pronoun: token.text.clone(),
                    },
                ));
            }
        }
    }

    spans
}
