//! Passive voice and weak formulation detection.

use crate::annotate::{Document, Token};
use crate::bundle::{HeuristicBundle, Matchers};

use super::{ByteSpan, Payload};

/// Flag passive sentences with an explicit agent, adverb-like weak words and
/// hedging phrases.
pub fn detect_passive_weak(
    doc: &Document,
    bundle: &HeuristicBundle,
    matchers: &Matchers,
) -> Vec<ByteSpan> {
    let mut spans = Vec::new();

    for sentence in doc.sentences() {
        let tokens = doc.sentence_tokens(sentence);
        if is_agentive_passive(tokens, bundle) {
            spans.push(ByteSpan::new(sentence.start, sentence.end, Payload::Passive));
        }

        let text = doc.sentence_text(sentence);
        for re in matchers.weak.iter().chain(&matchers.hedges) {
            for m in re.find_iter(text) {
                if m.start() == m.end() {
                    continue;
                }
                spans.push(ByteSpan::new(
                    sentence.start + m.start(),
                    sentence.start + m.end(),
                    Payload::Weak {
                        matched: m.as_str().to_string(),
                    },
                ));
            }
        }
    }

    spans.sort_by_key(|s| (s.start, s.end));
    spans
}

fn is_agent_marker(token: &Token, bundle: &HeuristicBundle) -> bool {
    bundle.agent_markers.contains(&token.lower())
}

/// A passive construction whose agent is named.
///
/// Either the parser labelled a passive subject or auxiliary and the sentence
/// has an agent, or the tokens read copula, past participle, agent marker in
/// sequence.
fn is_agentive_passive(tokens: &[Token], bundle: &HeuristicBundle) -> bool {
    let labelled = tokens.iter().any(|t| bundle.passive_deps.contains(&t.dep));
    let has_agent = tokens
        .iter()
        .any(|t| t.dep == "agent" || is_agent_marker(t, bundle));
    if labelled && has_agent {
        return true;
    }

    tokens.windows(3).any(|w| {
        bundle.copula_lemmas.contains(&w[0].lemma)
            && w[1].tag == "VBN"
            && is_agent_marker(&w[2], bundle)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::{Annotator, HeuristicAnnotator};
    use crate::bundle;

    fn run(text: &str) -> Vec<ByteSpan> {
        let b = bundle::english();
        let doc = HeuristicAnnotator::for_bundle(&b).annotate(text).unwrap();
        detect_passive_weak(&doc, &b, &b.matchers().unwrap())
    }

    #[test]
    fn test_passive_with_agent_spans_sentence() {
        let text = "He was given the award by the committee.";
        let spans = run(text);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0], ByteSpan::new(0, text.len(), Payload::Passive));
    }

    #[test]
    fn test_agentless_passive_is_not_flagged() {
        assert!(run("The door was opened.").is_empty());
    }

    #[test]
    fn test_active_sentence_is_clean() {
        assert!(run("The committee gave him the award.").is_empty());
    }

    #[test]
    fn test_weak_words_and_hedges() {
        let text = "She walked slowly. Perhaps it was kind of late.";
        let spans = run(text);
        let matched: Vec<&str> = spans
            .iter()
            .filter_map(|s| match &s.payload {
                Payload::Weak { matched } => Some(matched.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(matched, vec!["slowly", "Perhaps", "kind of"]);
        let slowly = &spans[0];
        assert_eq!(&text[slowly.start..slowly.end], "slowly");
        let kind = &spans[2];
        assert_eq!(&text[kind.start..kind.end], "kind of");
    }

    #[test]
    fn test_weak_match_is_case_insensitive() {
        let spans = run("Quickly, he left.");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].start, 0);
    }
}
