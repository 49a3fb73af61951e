use super::{set, HeuristicBundle};
use crate::readability::ReadabilityFormula;

/// Built-in German bundle.
pub fn german() -> HeuristicBundle {
    let lemmas = [
        ("bin", "sein"),
        ("bist", "sein"),
        ("ist", "sein"),
        ("sind", "sein"),
        ("seid", "sein"),
        ("war", "sein"),
        ("warst", "sein"),
        ("waren", "sein"),
        ("gewesen", "sein"),
        ("wird", "werden"),
        ("wurde", "werden"),
        ("wurden", "werden"),
        ("geworden", "werden"),
        ("fühlt", "fühlen"),
        ("fühlte", "fühlen"),
        ("fühlten", "fühlen"),
        ("scheint", "scheinen"),
        ("schien", "scheinen"),
        ("wirkt", "wirken"),
        ("wirkte", "wirken"),
        ("erscheint", "erscheinen"),
        ("erschien", "erscheinen"),
        ("sagt", "sagen"),
        ("sagte", "sagen"),
        ("fragt", "fragen"),
        ("fragte", "fragen"),
        ("flüstert", "flüstern"),
        ("flüsterte", "flüstern"),
        ("ruft", "rufen"),
        ("rief", "rufen"),
        ("murmelt", "murmeln"),
        ("murmelte", "murmeln"),
        ("verkündet", "verkünden"),
        ("verkündete", "verkünden"),
    ]
    .iter()
    .map(|(form, lemma)| (form.to_string(), lemma.to_string()))
    .collect();

    HeuristicBundle {
        language: "de".to_string(),
        name: "Deutsch".to_string(),
        passive_deps: set(&["nsubjpass", "auxpass"]),
        agent_markers: set(&["von"]),
        weak_patterns: vec![r"\b\w+lich\b".to_string()],
        weak_terms: set(&["vielleicht", "möglicherweise", "anscheinend", "scheinbar"]),
        standard_speech_verbs: set(&["sagen", "fragen"]),
        speech_verbs: set(&["sagen", "fragen", "flüstern", "rufen", "murmeln", "verkünden"]),
        filter_words: set(&[
            "sah", "hörte", "fühlte", "bemerkt", "dachte", "überlegte", "beobachtete", "schaute",
            "lauschte",
        ]),
        telling_verbs: set(&["sein", "fühlen", "scheinen", "wirken", "erscheinen", "werden"]),
        emotion_words: set(&[
            "wütend", "traurig", "glücklich", "aufgeregt", "nervös", "ängstlich", "besorgt",
            "beschämt", "enttäuscht", "frustriert", "verärgert", "unsicher", "erschrocken",
            "freudig", "deprimiert",
        ]),
        weak_verbs: set(&["sein"]),
        copula_lemmas: set(&["sein"]),
        common_words: set(&[
            "der", "die", "das", "ein", "eine", "und", "oder", "in", "auf", "zu", "von", "mit",
            "ist", "sind", "war", "waren", "haben", "hat",
        ]),
        starter_skip_words: set(&[
            "ich", "du", "er", "sie", "es", "wir", "ihr", "man", "und", "aber", "oder", "denn",
            "doch", "als", "wenn", "dann", "in", "im", "an", "am", "auf", "mit", "von", "vom",
            "zu", "zum", "bei", "nach", "aus", "ist", "war", "sind", "waren", "hat", "hatte",
            "haben", "hatten", "wird", "wurde", "wurden",
        ]),
        masculine_pronouns: set(&["er", "ihn", "ihm", "sein", "seine", "seinen", "seinem"]),
        feminine_pronouns: set(&["sie", "ihr", "ihre", "ihren", "ihrem"]),
        masculine_triggers: set(&[]),
        feminine_triggers: set(&[]),
        plural_pronouns: set(&["ihnen"]),
        quote_pattern: "\u{201E}[^\u{201C}\u{201D}]*[\u{201C}\u{201D}]|\"[^\"]*\"".to_string(),
        lemmas,
        capitalized_nouns: true,
        readability: ReadabilityFormula::DifficultWords {
            vowels: "aeiouäöü".to_string(),
            min_vowels: 3,
        },
    }
}
