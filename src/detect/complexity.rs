//! Sentence complexity scoring.
//!
//! Every sentence with at least `min_words` whitespace-delimited words is
//! scored with the bundle's readability formula. Sentences scoring above
//! the target grade are complex.

use crate::annotate::Document;
use crate::readability::ReadabilityScorer;

use super::{ByteSpan, Payload};

/// One sentence with its (optional) readability grade, in byte offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSentence {
    pub start: usize,
    pub end: usize,
    pub word_count: usize,
    pub grade: Option<f64>,
    pub is_complex: bool,
}

/// Score the sentences of a document.
///
/// Grades are only computed when a scorer is given and the sentence is long
/// enough; short sentences are never complex.
pub fn score_sentences(
    doc: &Document,
    scorer: Option<&dyn ReadabilityScorer>,
    target_grade: f64,
    min_words: usize,
) -> Vec<ScoredSentence> {
    doc.sentences()
        .iter()
        .map(|sentence| {
            let text = doc.sentence_text(sentence);
            let word_count = text.split_whitespace().count();
            let grade = match scorer {
                Some(scorer) if word_count >= min_words => Some(scorer.score(text)),
                _ => None,
            };
            ScoredSentence {
                start: sentence.start,
                end: sentence.end,
                word_count,
                grade,
                is_complex: grade.map(|g| g > target_grade).unwrap_or(false),
            }
        })
        .collect()
}

/// One span per complex sentence, carrying its grade.
pub fn detect_complex_sentences(scored: &[ScoredSentence]) -> Vec<ByteSpan> {
    scored
        .iter()
        .filter(|s| s.is_complex)
        .filter_map(|s| {
            s.grade
                .map(|grade| ByteSpan::new(s.start, s.end, Payload::Sentence { grade }))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::{Annotator, HeuristicAnnotator};
    use crate::bundle;
    use crate::readability::FleschKincaid;

    const TEXT: &str = "The cat sat. Notwithstanding considerable institutional opposition, \
                        the administration implemented comprehensive organizational \
                        restructuring initiatives.";

    fn doc() -> Document {
        HeuristicAnnotator::for_bundle(&bundle::english())
            .annotate(TEXT)
            .unwrap()
    }

    #[test]
    fn test_short_sentences_are_not_scored() {
        let scored = score_sentences(&doc(), Some(&FleschKincaid), 8.0, 5);
        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0].word_count, 3);
        assert!(scored[0].grade.is_none());
        assert!(!scored[0].is_complex);
        assert!(scored[1].grade.is_some());
        assert!(scored[1].is_complex);
    }

    #[test]
    fn test_complex_span_covers_sentence() {
        let doc = doc();
        let scored = score_sentences(&doc, Some(&FleschKincaid), 8.0, 5);
        let spans = detect_complex_sentences(&scored);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].start, doc.sentences()[1].start);
        assert_eq!(spans[0].end, TEXT.len());
        assert!(matches!(spans[0].payload, Payload::Sentence { grade } if grade > 8.0));
    }

    #[test]
    fn test_without_scorer_nothing_is_graded() {
        let scored = score_sentences(&doc(), None, 8.0, 5);
        assert!(scored.iter().all(|s| s.grade.is_none() && !s.is_complex));
    }

    #[test]
    fn test_higher_target_flags_fewer_sentences() {
        let doc = doc();
        let strict = detect_complex_sentences(&score_sentences(&doc, Some(&FleschKincaid), 4.0, 5));
        let lenient =
            detect_complex_sentences(&score_sentences(&doc, Some(&FleschKincaid), 40.0, 5));
        assert!(lenient.len() <= strict.len());
        assert!(lenient.is_empty());
    }
}
