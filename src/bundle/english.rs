use std::collections::BTreeMap;

use super::{set, HeuristicBundle};
use crate::readability::ReadabilityFormula;

/// Built-in English bundle.
pub fn english() -> HeuristicBundle {
    HeuristicBundle {
        language: "en".to_string(),
        name: "English".to_string(),
        passive_deps: set(&["nsubjpass", "auxpass"]),
        agent_markers: set(&["by"]),
        weak_patterns: vec![r"\b\w+ly\b".to_string()],
        weak_terms: set(&[
            "maybe", "perhaps", "possibly", "apparently", "presumably", "i think", "i believe",
            "it seems", "seemingly", "somewhat", "kind of", "sort of",
        ]),
        standard_speech_verbs: set(&["say", "ask"]),
        speech_verbs: set(&[
            "say", "ask", "whisper", "murmur", "breathe", "exclaim", "shout", "chastise",
        ]),
        filter_words: set(&[
            "saw", "heard", "felt", "noticed", "realized", "thought", "wondered", "watched",
            "looked", "listened", "smelled", "decided", "considered", "seemed", "appeared",
            "observed", "sensed", "perceived", "imagined",
        ]),
        telling_verbs: set(&["be", "feel", "seem", "look", "appear", "become", "get"]),
        emotion_words: set(&[
            "angry", "sad", "happy", "excited", "nervous", "afraid", "worried", "embarrassed",
            "disappointed", "frustrated", "annoyed", "anxious", "scared", "terrified", "joyful",
            "depressed", "miserable", "ecstatic", "upset", "furious", "delighted", "shocked",
            "surprised", "confused", "proud", "ashamed", "content", "satisfied", "eager",
            "envious", "jealous",
        ]),
        weak_verbs: set(&["be"]),
        copula_lemmas: set(&["be"]),
        common_words: set(&[
            "the", "a", "an", "and", "but", "or", "in", "on", "at", "to", "of", "for", "with",
            "by", "as", "is", "are", "was", "were", "be", "been", "have", "has", "had", "i",
            "you", "he", "she", "it", "we", "they", "this", "that", "these", "those", "there",
            "here", "my", "your", "his", "her", "its", "our", "their",
        ]),
        starter_skip_words: set(&[
            // pronouns
            "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my",
            "your", "his", "its", "our", "their", "this", "that", "these", "those", "there",
            // conjunctions
            "and", "but", "or", "nor", "so", "yet", "if", "when", "while", "because", "although",
            "though", "as", "then",
            // prepositions
            "in", "on", "at", "to", "of", "for", "with", "by", "from", "into", "onto", "upon",
            "about", "after", "before", "behind", "through", "under", "over", "across", "during",
            // auxiliaries
            "be", "am", "is", "are", "was", "were", "been", "being", "have", "has", "had", "do",
            "does", "did", "will", "would", "shall", "should", "can", "could", "may", "might",
            "must",
        ]),
        masculine_pronouns: set(&["he", "him", "his", "himself"]),
        feminine_pronouns: set(&["she", "her", "hers", "herself"]),
        masculine_triggers: set(&["he", "him", "his"]),
        feminine_triggers: set(&["she", "her", "hers"]),
        plural_pronouns: set(&["they", "them", "their", "theirs", "themselves"]),
        quote_pattern: "\"[^\"]*\"|\u{201C}[^\u{201D}]*\u{201D}".to_string(),
        lemmas: BTreeMap::new(),
        capitalized_nouns: false,
        readability: ReadabilityFormula::FleschKincaid,
    }
}
