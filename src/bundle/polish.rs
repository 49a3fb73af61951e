use super::{set, HeuristicBundle};
use crate::readability::ReadabilityFormula;

/// Built-in Polish bundle.
pub fn polish() -> HeuristicBundle {
    let lemmas = [
        ("jestem", "być"),
        ("jest", "być"),
        ("są", "być"),
        ("był", "być"),
        ("była", "być"),
        ("było", "być"),
        ("byli", "być"),
        ("były", "być"),
        ("powiedział", "powiedzieć"),
        ("powiedziała", "powiedzieć"),
        ("zapytał", "zapytać"),
        ("zapytała", "zapytać"),
        ("wyszeptał", "wyszeptać"),
        ("wyszeptała", "wyszeptać"),
        ("krzyknął", "krzyknąć"),
        ("krzyknęła", "krzyknąć"),
        ("mruknął", "mruknąć"),
        ("mruknęła", "mruknąć"),
        ("wykrzyknął", "wykrzyknąć"),
        ("wykrzyknęła", "wykrzyknąć"),
        ("wyglądał", "wyglądać"),
        ("wyglądała", "wyglądać"),
    ]
    .iter()
    .map(|(form, lemma)| (form.to_string(), lemma.to_string()))
    .collect();

    HeuristicBundle {
        language: "pl".to_string(),
        name: "Polski".to_string(),
        passive_deps: set(&["aux:pass", "nsubj:pass"]),
        agent_markers: set(&["przez"]),
        weak_patterns: vec![r"\b\w+(?:o|e)\b".to_string()],
        weak_terms: set(&[
            "może", "być może", "prawdopodobnie", "chyba", "wydaje się", "jakby", "trochę", "nieco",
        ]),
        standard_speech_verbs: set(&["powiedzieć", "zapytać"]),
        speech_verbs: set(&[
            "powiedzieć", "zapytać", "wyszeptać", "krzyknąć", "mruknąć", "wykrzyknąć",
        ]),
        filter_words: set(&[
            "widział", "słyszał", "czuł", "zauważył", "pomyślał", "zastanawiał się", "obserwował",
            "patrzył", "słuchał", "wyczuł", "zdecydował", "rozważał", "wydawało się",
            "pojawił się", "zaobserwował", "odczuł", "postrzegał", "wyobrażał sobie",
        ]),
        telling_verbs: set(&[
            "być", "czuć się", "wydawać się", "wyglądać", "pojawiać się", "stawać się",
        ]),
        emotion_words: set(&[
            "zły", "smutny", "szczęśliwy", "podekscytowany", "nerwowy", "przerażony", "zmartwiony",
            "zawstydzony", "rozczarowany", "sfrustrowany", "zirytowany", "niespokojny",
            "przestraszony", "radosny", "przygnębiony", "nieszczęśliwy", "ekstatyczny",
            "zdenerwowany", "wściekły", "zachwycony", "zszokowany", "zaskoczony",
            "zdezorientowany", "dumny", "zadowolony", "usatysfakcjonowany", "entuzjastyczny",
            "zazdrosny",
        ]),
        weak_verbs: set(&["być"]),
        copula_lemmas: set(&["być"]),
        common_words: set(&[
            "i", "w", "na", "z", "do", "o", "a", "ale", "lub", "jak", "jest", "są", "był", "była",
            "było", "ma", "mają", "to", "tego", "temu", "ten", "ta", "te", "tam", "tu", "mój",
            "twój", "jego", "jej", "nasz", "wasz", "ich", "się", "nie", "tak", "czy", "bo", "gdy",
            "jeśli", "ponieważ", "który", "która", "które",
        ]),
        starter_skip_words: set(&[
            "ja", "ty", "on", "ona", "ono", "my", "wy", "oni", "one", "się", "i", "a", "ale",
            "lub", "oraz", "więc", "gdy", "kiedy", "w", "we", "na", "z", "ze", "do", "od", "po",
            "przy", "jest", "był", "była", "było", "są", "byli", "będzie",
        ]),
        masculine_pronouns: set(&["on", "jego", "go", "jemu", "mu", "nim"]),
        feminine_pronouns: set(&["ona", "jej", "ją", "nią"]),
        masculine_triggers: set(&[]),
        feminine_triggers: set(&[]),
        plural_pronouns: set(&["oni", "one", "ich", "im", "nimi"]),
        quote_pattern: "\u{201E}[^\u{201D}]*\u{201D}|\"[^\"]*\"".to_string(),
        lemmas,
        capitalized_nouns: false,
        readability: ReadabilityFormula::DifficultWords {
            vowels: "aeiouyąęó".to_string(),
            min_vowels: 3,
        },
    }
}
