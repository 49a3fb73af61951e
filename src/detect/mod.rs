//! Prose detectors and the runner that orchestrates them.
//!
//! Each detector is a pure function over an annotated [`Document`] that
//! returns byte spans. The [`Runner`] annotates once, fans the detectors out
//! on the rayon pool and converts their output to character offsets.
//!
//! [`Document`]: crate::annotate::Document

mod complexity;
mod dialogue;
mod narrative;
mod overused;
mod passive;
mod pronoun;
mod repetition;
mod runner;
mod speech;
mod types;

pub use complexity::{detect_complex_sentences, score_sentences, ScoredSentence};
pub use dialogue::{analyze_dialogue, DialogueBalance};
pub use narrative::{detect_filter_words, detect_telling, detect_weak_verbs};
pub use overused::detect_overused_words;
pub use passive::detect_passive_weak;
pub use pronoun::detect_unclear_pronouns;
pub use repetition::detect_repeated_starts;
pub use runner::{Runner, RunnerBuilder};
pub use speech::detect_nonstandard_speech;
pub use types::{
    AnalysisResult, ByteSpan, Category, Construction, Payload, SentenceReport, SpanAnnotation,
    TextSpan,
};
