//! Overused word detection.
//!
//! Distances are measured in characters. A word is overused at position `p`
//! when at least `threshold` of its occurrences (including `p`) lie within
//! `window` characters of `p`. Only the first occurrence of each cluster is
//! reported.

use std::collections::HashMap;

use crate::annotate::{Document, Token};
use crate::bundle::HeuristicBundle;
use crate::config::OverusedSettings;

use super::{ByteSpan, Payload};

pub fn detect_overused_words(
    doc: &Document,
    bundle: &HeuristicBundle,
    settings: &OverusedSettings,
) -> Vec<ByteSpan> {
    let offsets = doc.offsets();
    let mut occurrences: HashMap<String, Vec<(usize, &Token)>> = HashMap::new();

    for token in doc.tokens() {
        if !token.is_alpha() || token.text.chars().count() < settings.min_length {
            continue;
        }
        let word = token.lower();
        if settings.ignore_common && bundle.common_words.contains(&word) {
            continue;
        }
        if let Some(pos) = offsets.to_char(token.start) {
            occurrences.entry(word).or_default().push((pos, token));
        }
    }

    let mut spans = Vec::new();
    for (word, hits) in &occurrences {
        if hits.len() < settings.threshold {
            continue;
        }
        let positions: Vec<usize> = hits.iter().map(|(p, _)| *p).collect();

        for (k, (p, token)) in hits.iter().enumerate() {
            if k > 0 && p - positions[k - 1] <= settings.window {
                continue;
            }
            let lo = positions.partition_point(|q| *q + settings.window < *p);
            let hi = positions.partition_point(|q| *q <= p + settings.window);
            let count = hi - lo;
            if count >= settings.threshold {
                spans.push(ByteSpan::token(
                    token,
                    Payload::Overused {
                        word: word.clone(),
                        count,
                    },
                ));
            }
        }
    }

    spans.sort_by_key(|s| (s.start, s.end));
    spans
}
