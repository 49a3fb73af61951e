//! Non-standard speech verb detection.

use crate::annotate::{Document, Pos};
use crate::bundle::HeuristicBundle;

use super::{ByteSpan, Payload};

/// Flag speech verbs other than the neutral dialogue tags ("said", "asked").
pub fn detect_nonstandard_speech(doc: &Document, bundle: &HeuristicBundle) -> Vec<ByteSpan> {
    doc.tokens()
        .iter()
        .filter(|t| t.pos == Pos::Verb)
        .filter(|t| {
            bundle.speech_verbs.contains(&t.lemma)
                && !bundle.standard_speech_verbs.contains(&t.lemma)
        })
        .map(|t| {
            ByteSpan::token(
                t,
                Payload::SpeechVerb {
                    lemma: t.lemma.clone(),
                },
            )
        })
        .collect()
}
