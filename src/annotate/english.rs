//! Lexicon-driven English tagger.
//!
//! Tags each word from closed-class and irregular-verb tables, falls back to
//! inflection and suffix rules, then labels dependencies with a verb-group
//! scan. Accurate enough for the detectors built on it: passive groups with
//! their subject and agent, copula roots, progressive forms and speech verbs.

use std::collections::HashSet;

use phf::{phf_map, phf_set};

use super::heuristic::{initial_positions, is_capitalized, is_punct_word, TagContext, TaggedWord, Tagger};
use super::Pos;
use crate::bundle::HeuristicBundle;

/// Inflectional form of a verb token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Form {
    Base,
    Present,
    Present3,
    Past,
    Participle,
    /// Regular `-ed` forms and irregulars like "found": resolved by context.
    PastOrParticiple,
    /// "put", "set", "cut": base, past and participle share a spelling.
    Unmarked,
    Gerund,
}

impl Form {
    fn tag(self) -> &'static str {
        match self {
            Form::Base => "VB",
            Form::Present => "VBP",
            Form::Present3 => "VBZ",
            Form::Past | Form::PastOrParticiple | Form::Unmarked => "VBD",
            Form::Participle => "VBN",
            Form::Gerund => "VBG",
        }
    }
}

static IRREGULAR: phf::Map<&'static str, (&'static str, Form)> = phf_map! {
    "be" => ("be", Form::Base),
    "am" => ("be", Form::Present),
    "is" => ("be", Form::Present3),
    "are" => ("be", Form::Present),
    "was" => ("be", Form::Past),
    "were" => ("be", Form::Past),
    "been" => ("be", Form::Participle),
    "being" => ("be", Form::Gerund),
    "have" => ("have", Form::Base),
    "has" => ("have", Form::Present3),
    "had" => ("have", Form::PastOrParticiple),
    "having" => ("have", Form::Gerund),
    "do" => ("do", Form::Base),
    "does" => ("do", Form::Present3),
    "did" => ("do", Form::Past),
    "done" => ("do", Form::Participle),
    "doing" => ("do", Form::Gerund),
    "say" => ("say", Form::Base),
    "says" => ("say", Form::Present3),
    "said" => ("say", Form::PastOrParticiple),
    "go" => ("go", Form::Base),
    "goes" => ("go", Form::Present3),
    "went" => ("go", Form::Past),
    "gone" => ("go", Form::Participle),
    "get" => ("get", Form::Base),
    "got" => ("get", Form::PastOrParticiple),
    "gotten" => ("get", Form::Participle),
    "make" => ("make", Form::Base),
    "made" => ("make", Form::PastOrParticiple),
    "know" => ("know", Form::Base),
    "knew" => ("know", Form::Past),
    "known" => ("know", Form::Participle),
    "think" => ("think", Form::Base),
    "thought" => ("think", Form::PastOrParticiple),
    "take" => ("take", Form::Base),
    "took" => ("take", Form::Past),
    "taken" => ("take", Form::Participle),
    "see" => ("see", Form::Base),
    "saw" => ("see", Form::Past),
    "seen" => ("see", Form::Participle),
    "come" => ("come", Form::Base),
    "came" => ("come", Form::Past),
    "give" => ("give", Form::Base),
    "gave" => ("give", Form::Past),
    "given" => ("give", Form::Participle),
    "find" => ("find", Form::Base),
    "found" => ("find", Form::PastOrParticiple),
    "tell" => ("tell", Form::Base),
    "told" => ("tell", Form::PastOrParticiple),
    "feel" => ("feel", Form::Base),
    "felt" => ("feel", Form::PastOrParticiple),
    "become" => ("become", Form::Base),
    "became" => ("become", Form::Past),
    "leave" => ("leave", Form::Base),
    "left" => ("leave", Form::PastOrParticiple),
    "bring" => ("bring", Form::Base),
    "brought" => ("bring", Form::PastOrParticiple),
    "begin" => ("begin", Form::Base),
    "began" => ("begin", Form::Past),
    "begun" => ("begin", Form::Participle),
    "keep" => ("keep", Form::Base),
    "kept" => ("keep", Form::PastOrParticiple),
    "hold" => ("hold", Form::Base),
    "held" => ("hold", Form::PastOrParticiple),
    "write" => ("write", Form::Base),
    "wrote" => ("write", Form::Past),
    "written" => ("write", Form::Participle),
    "stand" => ("stand", Form::Base),
    "stood" => ("stand", Form::PastOrParticiple),
    "hear" => ("hear", Form::Base),
    "heard" => ("hear", Form::PastOrParticiple),
    "mean" => ("mean", Form::Base),
    "meant" => ("mean", Form::PastOrParticiple),
    "meet" => ("meet", Form::Base),
    "met" => ("meet", Form::PastOrParticiple),
    "run" => ("run", Form::Base),
    "ran" => ("run", Form::Past),
    "pay" => ("pay", Form::Base),
    "paid" => ("pay", Form::PastOrParticiple),
    "sit" => ("sit", Form::Base),
    "sat" => ("sit", Form::PastOrParticiple),
    "speak" => ("speak", Form::Base),
    "spoke" => ("speak", Form::Past),
    "spoken" => ("speak", Form::Participle),
    "lie" => ("lie", Form::Base),
    "lay" => ("lie", Form::Past),
    "lain" => ("lie", Form::Participle),
    "lying" => ("lie", Form::Gerund),
    "lead" => ("lead", Form::Base),
    "led" => ("lead", Form::PastOrParticiple),
    "grow" => ("grow", Form::Base),
    "grew" => ("grow", Form::Past),
    "grown" => ("grow", Form::Participle),
    "lose" => ("lose", Form::Base),
    "lost" => ("lose", Form::PastOrParticiple),
    "fall" => ("fall", Form::Base),
    "fell" => ("fall", Form::Past),
    "fallen" => ("fall", Form::Participle),
    "send" => ("send", Form::Base),
    "sent" => ("send", Form::PastOrParticiple),
    "build" => ("build", Form::Base),
    "built" => ("build", Form::PastOrParticiple),
    "understand" => ("understand", Form::Base),
    "understood" => ("understand", Form::PastOrParticiple),
    "draw" => ("draw", Form::Base),
    "drew" => ("draw", Form::Past),
    "drawn" => ("draw", Form::Participle),
    "break" => ("break", Form::Base),
    "broke" => ("break", Form::Past),
    "broken" => ("break", Form::Participle),
    "spend" => ("spend", Form::Base),
    "spent" => ("spend", Form::PastOrParticiple),
    "rise" => ("rise", Form::Base),
    "rose" => ("rise", Form::Past),
    "risen" => ("rise", Form::Participle),
    "drive" => ("drive", Form::Base),
    "drove" => ("drive", Form::Past),
    "driven" => ("drive", Form::Participle),
    "buy" => ("buy", Form::Base),
    "bought" => ("buy", Form::PastOrParticiple),
    "wear" => ("wear", Form::Base),
    "wore" => ("wear", Form::Past),
    "worn" => ("wear", Form::Participle),
    "choose" => ("choose", Form::Base),
    "chose" => ("choose", Form::Past),
    "chosen" => ("choose", Form::Participle),
    "seek" => ("seek", Form::Base),
    "sought" => ("seek", Form::PastOrParticiple),
    "throw" => ("throw", Form::Base),
    "threw" => ("throw", Form::Past),
    "thrown" => ("throw", Form::Participle),
    "catch" => ("catch", Form::Base),
    "caught" => ("catch", Form::PastOrParticiple),
    "win" => ("win", Form::Base),
    "won" => ("win", Form::PastOrParticiple),
    "forget" => ("forget", Form::Base),
    "forgot" => ("forget", Form::Past),
    "forgotten" => ("forget", Form::Participle),
    "sell" => ("sell", Form::Base),
    "sold" => ("sell", Form::PastOrParticiple),
    "fight" => ("fight", Form::Base),
    "fought" => ("fight", Form::PastOrParticiple),
    "teach" => ("teach", Form::Base),
    "taught" => ("teach", Form::PastOrParticiple),
    "eat" => ("eat", Form::Base),
    "ate" => ("eat", Form::Past),
    "eaten" => ("eat", Form::Participle),
    "sing" => ("sing", Form::Base),
    "sang" => ("sing", Form::Past),
    "sung" => ("sing", Form::Participle),
    "fly" => ("fly", Form::Base),
    "flew" => ("fly", Form::Past),
    "flown" => ("fly", Form::Participle),
    "hide" => ("hide", Form::Base),
    "hid" => ("hide", Form::Past),
    "hidden" => ("hide", Form::Participle),
    "shake" => ("shake", Form::Base),
    "shook" => ("shake", Form::Past),
    "shaken" => ("shake", Form::Participle),
    "steal" => ("steal", Form::Base),
    "stole" => ("steal", Form::Past),
    "stolen" => ("steal", Form::Participle),
    "wake" => ("wake", Form::Base),
    "woke" => ("wake", Form::Past),
    "woken" => ("wake", Form::Participle),
    "bite" => ("bite", Form::Base),
    "bit" => ("bite", Form::Past),
    "bitten" => ("bite", Form::Participle),
    "blow" => ("blow", Form::Base),
    "blew" => ("blow", Form::Past),
    "blown" => ("blow", Form::Participle),
    "freeze" => ("freeze", Form::Base),
    "froze" => ("freeze", Form::Past),
    "frozen" => ("freeze", Form::Participle),
    "ride" => ("ride", Form::Base),
    "rode" => ("ride", Form::Past),
    "ridden" => ("ride", Form::Participle),
    "sleep" => ("sleep", Form::Base),
    "slept" => ("sleep", Form::PastOrParticiple),
    "weep" => ("weep", Form::Base),
    "wept" => ("weep", Form::PastOrParticiple),
    "feed" => ("feed", Form::Base),
    "fed" => ("feed", Form::PastOrParticiple),
    "flee" => ("flee", Form::Base),
    "fled" => ("flee", Form::PastOrParticiple),
    "hang" => ("hang", Form::Base),
    "hung" => ("hang", Form::PastOrParticiple),
    "shoot" => ("shoot", Form::Base),
    "shot" => ("shoot", Form::PastOrParticiple),
    "stick" => ("stick", Form::Base),
    "stuck" => ("stick", Form::PastOrParticiple),
    "strike" => ("strike", Form::Base),
    "struck" => ("strike", Form::PastOrParticiple),
    "swing" => ("swing", Form::Base),
    "swung" => ("swing", Form::PastOrParticiple),
    "tear" => ("tear", Form::Base),
    "tore" => ("tear", Form::Past),
    "torn" => ("tear", Form::Participle),
    "forgive" => ("forgive", Form::Base),
    "forgave" => ("forgive", Form::Past),
    "forgiven" => ("forgive", Form::Participle),
    "sink" => ("sink", Form::Base),
    "sank" => ("sink", Form::Past),
    "sunk" => ("sink", Form::Participle),
    "drink" => ("drink", Form::Base),
    "drank" => ("drink", Form::Past),
    "drunk" => ("drink", Form::Participle),
    "swim" => ("swim", Form::Base),
    "swam" => ("swim", Form::Past),
    "dig" => ("dig", Form::Base),
    "dug" => ("dig", Form::PastOrParticiple),
    "creep" => ("creep", Form::Base),
    "crept" => ("creep", Form::PastOrParticiple),
    "show" => ("show", Form::Base),
    "shown" => ("show", Form::Participle),
    "put" => ("put", Form::Unmarked),
    "set" => ("set", Form::Unmarked),
    "cut" => ("cut", Form::Unmarked),
    "let" => ("let", Form::Unmarked),
    "hit" => ("hit", Form::Unmarked),
    "shut" => ("shut", Form::Unmarked),
    "hurt" => ("hurt", Form::Unmarked),
    "read" => ("read", Form::Unmarked),
    "cast" => ("cast", Form::Unmarked),
    "burst" => ("burst", Form::Unmarked),
};

static CLOSED: phf::Map<&'static str, (Pos, &'static str)> = phf_map! {
    "the" => (Pos::Det, "DT"),
    "a" => (Pos::Det, "DT"),
    "an" => (Pos::Det, "DT"),
    "this" => (Pos::Det, "DT"),
    "these" => (Pos::Det, "DT"),
    "those" => (Pos::Det, "DT"),
    "every" => (Pos::Det, "DT"),
    "each" => (Pos::Det, "DT"),
    "some" => (Pos::Det, "DT"),
    "any" => (Pos::Det, "DT"),
    "no" => (Pos::Det, "DT"),
    "all" => (Pos::Det, "DT"),
    "both" => (Pos::Det, "DT"),
    "either" => (Pos::Det, "DT"),
    "neither" => (Pos::Det, "DT"),
    "another" => (Pos::Det, "DT"),
    "i" => (Pos::Pron, "PRP"),
    "me" => (Pos::Pron, "PRP"),
    "you" => (Pos::Pron, "PRP"),
    "he" => (Pos::Pron, "PRP"),
    "him" => (Pos::Pron, "PRP"),
    "she" => (Pos::Pron, "PRP"),
    "her" => (Pos::Pron, "PRP"),
    "it" => (Pos::Pron, "PRP"),
    "we" => (Pos::Pron, "PRP"),
    "us" => (Pos::Pron, "PRP"),
    "they" => (Pos::Pron, "PRP"),
    "them" => (Pos::Pron, "PRP"),
    "my" => (Pos::Pron, "PRP$"),
    "your" => (Pos::Pron, "PRP$"),
    "his" => (Pos::Pron, "PRP$"),
    "its" => (Pos::Pron, "PRP$"),
    "our" => (Pos::Pron, "PRP$"),
    "their" => (Pos::Pron, "PRP$"),
    "mine" => (Pos::Pron, "PRP"),
    "yours" => (Pos::Pron, "PRP"),
    "hers" => (Pos::Pron, "PRP"),
    "ours" => (Pos::Pron, "PRP"),
    "theirs" => (Pos::Pron, "PRP"),
    "myself" => (Pos::Pron, "PRP"),
    "yourself" => (Pos::Pron, "PRP"),
    "himself" => (Pos::Pron, "PRP"),
    "herself" => (Pos::Pron, "PRP"),
    "itself" => (Pos::Pron, "PRP"),
    "ourselves" => (Pos::Pron, "PRP"),
    "themselves" => (Pos::Pron, "PRP"),
    "who" => (Pos::Pron, "WP"),
    "whom" => (Pos::Pron, "WP"),
    "whose" => (Pos::Pron, "WP$"),
    "what" => (Pos::Pron, "WP"),
    "which" => (Pos::Det, "WDT"),
    "someone" => (Pos::Pron, "NN"),
    "something" => (Pos::Pron, "NN"),
    "anyone" => (Pos::Pron, "NN"),
    "anything" => (Pos::Pron, "NN"),
    "everyone" => (Pos::Pron, "NN"),
    "everything" => (Pos::Pron, "NN"),
    "nobody" => (Pos::Pron, "NN"),
    "nothing" => (Pos::Pron, "NN"),
    "in" => (Pos::Adp, "IN"),
    "on" => (Pos::Adp, "IN"),
    "at" => (Pos::Adp, "IN"),
    "by" => (Pos::Adp, "IN"),
    "for" => (Pos::Adp, "IN"),
    "with" => (Pos::Adp, "IN"),
    "from" => (Pos::Adp, "IN"),
    "to" => (Pos::Adp, "IN"),
    "of" => (Pos::Adp, "IN"),
    "about" => (Pos::Adp, "IN"),
    "into" => (Pos::Adp, "IN"),
    "onto" => (Pos::Adp, "IN"),
    "over" => (Pos::Adp, "IN"),
    "under" => (Pos::Adp, "IN"),
    "through" => (Pos::Adp, "IN"),
    "between" => (Pos::Adp, "IN"),
    "among" => (Pos::Adp, "IN"),
    "against" => (Pos::Adp, "IN"),
    "across" => (Pos::Adp, "IN"),
    "after" => (Pos::Adp, "IN"),
    "before" => (Pos::Adp, "IN"),
    "behind" => (Pos::Adp, "IN"),
    "beside" => (Pos::Adp, "IN"),
    "beyond" => (Pos::Adp, "IN"),
    "during" => (Pos::Adp, "IN"),
    "inside" => (Pos::Adp, "IN"),
    "outside" => (Pos::Adp, "IN"),
    "near" => (Pos::Adp, "IN"),
    "toward" => (Pos::Adp, "IN"),
    "towards" => (Pos::Adp, "IN"),
    "upon" => (Pos::Adp, "IN"),
    "within" => (Pos::Adp, "IN"),
    "without" => (Pos::Adp, "IN"),
    "around" => (Pos::Adp, "IN"),
    "along" => (Pos::Adp, "IN"),
    "above" => (Pos::Adp, "IN"),
    "below" => (Pos::Adp, "IN"),
    "since" => (Pos::Adp, "IN"),
    "until" => (Pos::Adp, "IN"),
    "despite" => (Pos::Adp, "IN"),
    "off" => (Pos::Adp, "RP"),
    "up" => (Pos::Adp, "RP"),
    "down" => (Pos::Adp, "RP"),
    "out" => (Pos::Adp, "RP"),
    "and" => (Pos::Cconj, "CC"),
    "or" => (Pos::Cconj, "CC"),
    "but" => (Pos::Cconj, "CC"),
    "nor" => (Pos::Cconj, "CC"),
    "yet" => (Pos::Cconj, "CC"),
    "because" => (Pos::Sconj, "IN"),
    "although" => (Pos::Sconj, "IN"),
    "though" => (Pos::Sconj, "IN"),
    "while" => (Pos::Sconj, "IN"),
    "if" => (Pos::Sconj, "IN"),
    "unless" => (Pos::Sconj, "IN"),
    "whether" => (Pos::Sconj, "IN"),
    "as" => (Pos::Sconj, "IN"),
    "than" => (Pos::Sconj, "IN"),
    "that" => (Pos::Sconj, "IN"),
    "when" => (Pos::Adv, "WRB"),
    "where" => (Pos::Adv, "WRB"),
    "why" => (Pos::Adv, "WRB"),
    "how" => (Pos::Adv, "WRB"),
    "can" => (Pos::Aux, "MD"),
    "could" => (Pos::Aux, "MD"),
    "will" => (Pos::Aux, "MD"),
    "would" => (Pos::Aux, "MD"),
    "shall" => (Pos::Aux, "MD"),
    "should" => (Pos::Aux, "MD"),
    "may" => (Pos::Aux, "MD"),
    "might" => (Pos::Aux, "MD"),
    "must" => (Pos::Aux, "MD"),
    "not" => (Pos::Part, "RB"),
    "very" => (Pos::Adv, "RB"),
    "too" => (Pos::Adv, "RB"),
    "quite" => (Pos::Adv, "RB"),
    "rather" => (Pos::Adv, "RB"),
    "so" => (Pos::Adv, "RB"),
    "also" => (Pos::Adv, "RB"),
    "just" => (Pos::Adv, "RB"),
    "still" => (Pos::Adv, "RB"),
    "even" => (Pos::Adv, "RB"),
    "never" => (Pos::Adv, "RB"),
    "always" => (Pos::Adv, "RB"),
    "often" => (Pos::Adv, "RB"),
    "sometimes" => (Pos::Adv, "RB"),
    "already" => (Pos::Adv, "RB"),
    "soon" => (Pos::Adv, "RB"),
    "now" => (Pos::Adv, "RB"),
    "then" => (Pos::Adv, "RB"),
    "here" => (Pos::Adv, "RB"),
    "there" => (Pos::Adv, "RB"),
    "again" => (Pos::Adv, "RB"),
    "almost" => (Pos::Adv, "RB"),
    "perhaps" => (Pos::Adv, "RB"),
    "maybe" => (Pos::Adv, "RB"),
    "only" => (Pos::Adv, "RB"),
    "well" => (Pos::Adv, "RB"),
    "back" => (Pos::Adv, "RB"),
    "away" => (Pos::Adv, "RB"),
    "together" => (Pos::Adv, "RB"),
    "instead" => (Pos::Adv, "RB"),
    "ever" => (Pos::Adv, "RB"),
    "once" => (Pos::Adv, "RB"),
    "later" => (Pos::Adv, "RB"),
    "yesterday" => (Pos::Adv, "RB"),
    "today" => (Pos::Adv, "RB"),
    "tomorrow" => (Pos::Adv, "RB"),
    "oh" => (Pos::Intj, "UH"),
    "ah" => (Pos::Intj, "UH"),
    "hello" => (Pos::Intj, "UH"),
    "hi" => (Pos::Intj, "UH"),
    "hey" => (Pos::Intj, "UH"),
    "yes" => (Pos::Intj, "UH"),
    "okay" => (Pos::Intj, "UH"),
    "ok" => (Pos::Intj, "UH"),
    "wow" => (Pos::Intj, "UH"),
    "one" => (Pos::Num, "CD"),
    "two" => (Pos::Num, "CD"),
    "three" => (Pos::Num, "CD"),
    "four" => (Pos::Num, "CD"),
    "five" => (Pos::Num, "CD"),
    "six" => (Pos::Num, "CD"),
    "seven" => (Pos::Num, "CD"),
    "eight" => (Pos::Num, "CD"),
    "nine" => (Pos::Num, "CD"),
    "ten" => (Pos::Num, "CD"),
    "hundred" => (Pos::Num, "CD"),
    "thousand" => (Pos::Num, "CD"),
};

static BASE_VERBS: phf::Set<&'static str> = phf_set! {
    "accept", "add", "agree", "allow", "answer", "appear", "apply", "argue", "arrive",
    "attack", "avoid", "bake", "believe", "belong", "blame", "borrow", "bother", "call",
    "care", "carry", "cause", "change", "chase", "check", "clean", "climb", "close",
    "collect", "complain", "consider", "continue", "cook", "cough", "count", "cover",
    "crawl", "cross", "cry", "dance", "decide", "deliver", "describe", "destroy", "die",
    "disappear", "discover", "drag", "dream", "drop", "enjoy", "enter", "escape",
    "examine", "expect", "explain", "face", "fail", "fill", "finish", "follow", "force",
    "gasp", "gaze", "glance", "grab", "greet", "grin", "groan", "guess", "hand", "happen",
    "hate", "head", "help", "hope", "hurry", "ignore", "imagine", "include", "insist",
    "invite", "join", "jump", "kick", "kill", "kiss", "knock", "laugh", "learn", "like",
    "listen", "live", "look", "love", "manage", "mark", "marry", "matter", "mention",
    "miss", "move", "need", "nod", "notice", "obey", "observe", "offer", "open", "order",
    "pass", "pause", "perceive", "pick", "place", "plan", "play", "point", "pour", "pray",
    "prefer", "prepare", "press", "pretend", "promise", "protect", "pull", "punch", "push",
    "question", "race", "rain", "raise", "reach", "realize", "realise", "receive",
    "remain", "remember", "repeat", "reply", "rest", "return", "roll", "rush", "save",
    "scream", "search", "seem", "sense", "serve", "settle", "share", "shiver", "shrug",
    "sigh", "sign", "smell", "smile", "snap", "sob", "sound", "start", "stare", "stay",
    "step", "stop", "suggest", "suppose", "surprise", "talk", "taste", "thank", "touch",
    "travel", "try", "turn", "use", "visit", "wait", "walk", "want", "warn", "wash",
    "watch", "wish", "wonder", "work", "worry", "yell",
};

static ADJECTIVES: phf::Set<&'static str> = phf_set! {
    "good", "bad", "big", "small", "old", "young", "new", "long", "short", "high", "low",
    "dark", "cold", "hot", "warm", "cool", "quiet", "loud", "tall", "little", "great",
    "large", "strong", "weak", "pretty", "ugly", "rich", "poor", "dead", "alive",
    "empty", "full", "heavy", "soft", "hard", "bright", "clear", "sure", "ready",
    "certain", "able", "real", "true", "wrong", "right", "free", "fine", "late", "early",
    "deep", "wide", "thin", "thick", "sweet", "bitter", "silent", "calm", "gentle",
    "strange", "tired", "bored", "sick", "ill", "busy", "lonely", "red", "blue", "green",
    "black", "white", "grey", "gray", "brown", "golden", "easy", "difficult",
    "important", "possible", "different", "same", "whole", "friendly", "lovely",
    "silly", "holy", "afraid", "alone", "aware", "familiar", "other", "many",
    "much", "few", "more", "most", "less", "own", "last", "next", "first",
};

/// Words ending in "-ly" that are not adverbs.
static NON_ADVERB_LY: phf::Set<&'static str> = phf_set! {
    "family", "reply", "supply", "apply", "ally", "rally", "belly", "jelly", "bully",
    "lily", "july", "italy", "butterfly", "assembly", "anomaly", "monopoly", "fly",
};

/// Words ending in "-ing" that are nouns or prepositions.
static NON_VERB_ING: phf::Set<&'static str> = phf_set! {
    "thing", "morning", "evening", "king", "ring", "wing", "spring", "string", "ceiling",
    "nothing", "something", "anything", "everything", "during", "darling", "pudding",
    "sibling", "offspring",
};

/// Words ending in "-ed" that are not verb forms.
static NON_VERB_ED: phf::Set<&'static str> = phf_set! {
    "hundred", "sacred", "naked", "wicked", "kindred", "rugged", "ragged", "jagged",
    "crooked", "wretched", "beloved", "bed", "red", "shed", "sled",
};

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "less", "ic"];

#[derive(Debug, Clone)]
struct Draft {
    tw: TaggedWord,
    form: Option<Form>,
}

impl Draft {
    fn new(lemma: impl Into<String>, pos: Pos, tag: &str) -> Self {
        Self {
            tw: TaggedWord::new(lemma, pos, tag),
            form: None,
        }
    }

    fn verb(lemma: impl Into<String>, form: Form) -> Self {
        Self {
            tw: TaggedWord::new(lemma, Pos::Verb, form.tag()),
            form: Some(form),
        }
    }

    fn pos(&self) -> Pos {
        self.tw.pos
    }

    fn is_verbal(&self) -> bool {
        matches!(self.tw.pos, Pos::Verb | Pos::Aux)
    }

    fn is_modal(&self) -> bool {
        self.tw.tag == "MD"
    }

    /// Can head-shift to the next verb in its group.
    fn is_aux_capable(&self) -> bool {
        self.is_modal() || matches!(self.tw.lemma.as_str(), "be" | "have" | "do")
    }

    fn is_possessive(&self) -> bool {
        self.tw.tag == "PRP$"
    }

    fn is_nominal(&self) -> bool {
        self.tw.pos.is_nominal() && !self.is_possessive()
    }

    /// Tokens that may appear inside a noun phrase before its head.
    fn is_np_modifier(&self) -> bool {
        matches!(self.tw.pos, Pos::Det | Pos::Adj | Pos::Num) || self.is_possessive()
    }
}

/// English part-of-speech tagger, lemmatizer and dependency labeller.
pub struct EnglishTagger {
    /// Base verbs contributed by the bundle (speech, telling, weak verbs).
    extra_verbs: HashSet<String>,
    /// Emotion words are always adjectives, even with an "-ed" ending.
    extra_adjectives: HashSet<String>,
}

impl EnglishTagger {
    pub fn new(bundle: &HeuristicBundle) -> Self {
        let extra_verbs = bundle
            .speech_verbs
            .iter()
            .chain(&bundle.telling_verbs)
            .chain(&bundle.weak_verbs)
            .chain(&bundle.copula_lemmas)
            .filter(|w| !w.contains(' '))
            .cloned()
            .collect();
        Self {
            extra_verbs,
            extra_adjectives: bundle.emotion_words.iter().cloned().collect(),
        }
    }

    fn is_verb_lemma(&self, word: &str) -> bool {
        BASE_VERBS.contains(word)
            || self.extra_verbs.contains(word)
            || matches!(IRREGULAR.get(word), Some((lemma, _)) if *lemma == word)
    }

    fn is_adjective(&self, word: &str) -> bool {
        ADJECTIVES.contains(word) || self.extra_adjectives.contains(word)
    }

    /// Lemma and form for a regular inflection of a known verb.
    fn inflected_verb(&self, lower: &str) -> Option<(String, Form)> {
        if lower.len() <= 4 {
            return None;
        }
        if let Some(stem) = lower.strip_suffix("ing") {
            return self.verb_candidates(stem).map(|l| (l, Form::Gerund));
        }
        if let Some(stem) = lower.strip_suffix("ied") {
            let lemma = format!("{}y", stem);
            return self.is_verb_lemma(&lemma).then_some((lemma, Form::PastOrParticiple));
        }
        if let Some(stem) = lower.strip_suffix("ed") {
            return self.verb_candidates(stem).map(|l| (l, Form::PastOrParticiple));
        }
        None
    }

    /// Try the stem, the stem with a restored "e" and the undoubled stem.
    fn verb_candidates(&self, stem: &str) -> Option<String> {
        if stem.len() < 2 {
            return None;
        }
        let with_e = format!("{}e", stem);
        let undoubled = undouble(stem);
        [stem.to_string(), with_e, undoubled]
            .into_iter()
            .find(|c| self.is_verb_lemma(c))
    }

    /// First pass: lexical category of one word, looking only at its
    /// left neighbour and the next word.
    fn lexical(
        &self,
        word: &str,
        next: Option<&str>,
        prev: Option<&Draft>,
        initial: bool,
        ctx: &TagContext,
    ) -> Draft {
        if is_punct_word(word) {
            return Draft::new(word, Pos::Punct, punct_tag(word));
        }
        if word.chars().next().map(|c| c.is_ascii_digit()).unwrap_or(false) {
            return Draft::new(word, Pos::Num, "CD");
        }

        let lower = word.to_lowercase().replace('\u{2019}', "'");

        if let Some(stem) = lower.strip_suffix("n't") {
            let base = match stem {
                "wo" => "will",
                "ca" => "can",
                "sha" => "shall",
                "ai" => "be",
                other => other,
            };
            return self.contracted_aux(base);
        }

        let key = strip_clitic(&lower);
        let capitalized = is_capitalized(word) && key != "i";

        if capitalized && !initial {
            return Draft::new(key, Pos::Propn, "NNP");
        }

        if let Some((pos, tag)) = CLOSED.get(key) {
            return self.closed(key, *pos, tag, next);
        }

        if capitalized && ctx.is_name(word) {
            return Draft::new(key, Pos::Propn, "NNP");
        }

        let prev_pos = prev.map(Draft::pos);
        let noun_context = matches!(prev_pos, Some(Pos::Det) | Some(Pos::Adj) | Some(Pos::Num))
            || prev.map(Draft::is_possessive).unwrap_or(false);

        if let Some((lemma, form)) = IRREGULAR.get(key) {
            if noun_context && !matches!(*lemma, "be" | "have" | "do") {
                return Draft::new(key, Pos::Noun, "NN");
            }
            let form = match form {
                Form::Base => self.base_form(prev, initial),
                other => *other,
            };
            return Draft::verb(*lemma, form);
        }

        if self.is_adjective(key) {
            return Draft::new(key, Pos::Adj, "JJ");
        }

        if self.is_verb_lemma(key) {
            if noun_context {
                return Draft::new(key, Pos::Noun, "NN");
            }
            return Draft::verb(key, self.base_form(prev, initial));
        }

        if key.len() > 3 && key.ends_with("ly") {
            if NON_ADVERB_LY.contains(key) {
                return Draft::new(key, Pos::Noun, "NN");
            }
            return Draft::new(key, Pos::Adv, "RB");
        }

        if key.len() > 4 && key.ends_with("ing") && !NON_VERB_ING.contains(key) {
            if let Some((lemma, form)) = self.inflected_verb(key) {
                return Draft::verb(lemma, form);
            }
            if noun_context {
                return Draft::new(key, Pos::Noun, "NN");
            }
            let stem = &key[..key.len() - 3];
            return Draft::verb(undouble(stem), Form::Gerund);
        }

        if key.len() > 3
            && key.ends_with("ed")
            && !key.ends_with("eed")
            && !NON_VERB_ED.contains(key)
        {
            if prev_pos == Some(Pos::Det) {
                return Draft::new(key, Pos::Adj, "JJ");
            }
            if let Some((lemma, form)) = self.inflected_verb(key) {
                return Draft::verb(lemma, form);
            }
            let stem = &key[..key.len() - 2];
            if stem.len() >= 3 {
                return Draft::verb(undouble(stem), Form::PastOrParticiple);
            }
        }

        if key.len() > 3 && key.ends_with('s') && !["ss", "us", "is"].iter().any(|s| key.ends_with(s)) {
            let singular = singularize(key);
            let subject_before = prev
                .map(|p| p.is_nominal() || p.pos() == Pos::Adv)
                .unwrap_or(false);
            if subject_before && self.is_verb_lemma(&singular) {
                return Draft::verb(singular, Form::Present3);
            }
            return Draft::new(singular, Pos::Noun, "NNS");
        }

        if key.len() > 4 && ADJECTIVE_SUFFIXES.iter().any(|s| key.ends_with(s)) {
            return Draft::new(key, Pos::Adj, "JJ");
        }

        // A capitalized opener no lexicon or rule recognizes is most likely a name.
        if initial && capitalized {
            return Draft::new(key, Pos::Propn, "NNP");
        }

        Draft::new(key, Pos::Noun, "NN")
    }

    fn closed(&self, key: &str, pos: Pos, tag: &str, next: Option<&str>) -> Draft {
        let next_lower = next.map(|n| n.to_lowercase());
        let next_lower = next_lower.as_deref();
        match key {
            "to" if next_lower.map(|n| self.is_verb_lemma(n)).unwrap_or(false) => {
                Draft::new(key, Pos::Part, "TO")
            }
            "her" if next_lower
                .map(|n| {
                    !is_punct_word(n) && !CLOSED.contains_key(n) && !n.ends_with("ly")
                })
                .unwrap_or(false) =>
            {
                Draft::new(key, Pos::Pron, "PRP$")
            }
            _ => Draft::new(key, pos, tag),
        }
    }

    fn contracted_aux(&self, base: &str) -> Draft {
        let mut draft = match IRREGULAR.get(base) {
            Some((lemma, form)) => Draft::verb(*lemma, *form),
            None => Draft::new(base, Pos::Aux, "MD"),
        };
        draft.tw.pos = Pos::Aux;
        draft
    }

    /// Base verb forms are infinitives after modals, "to" and "do", and
    /// imperatives at the start of a sentence.
    fn base_form(&self, prev: Option<&Draft>, initial: bool) -> Form {
        match prev {
            Some(p) if p.is_modal() || p.tw.tag == "TO" || p.tw.lemma == "do" => Form::Base,
            _ if initial => Form::Base,
            _ => Form::Present,
        }
    }
}

impl Tagger for EnglishTagger {
    fn language(&self) -> &str {
        "en"
    }

    fn tag_sentence(&self, words: &[&str], ctx: &TagContext) -> Vec<TaggedWord> {
        let initial = initial_positions(words);
        let mut drafts: Vec<Draft> = Vec::with_capacity(words.len());

        for (i, word) in words.iter().enumerate() {
            let next = words.get(i + 1).copied();
            let draft = self.lexical(word, next, drafts.last(), initial[i], ctx);
            drafts.push(draft);
        }

        label_dependencies(&mut drafts);
        drafts.into_iter().map(|d| d.tw).collect()
    }
}

fn punct_tag(word: &str) -> &'static str {
    match word {
        "." | "!" | "?" | "\u{2026}" => ".",
        "," => ",",
        "\"" | "'" | "\u{201C}" | "\u{201D}" | "\u{2018}" | "\u{2019}" => "''",
        "(" | "[" => "-LRB-",
        ")" | "]" => "-RRB-",
        _ => ":",
    }
}

/// Drop a trailing clitic: "he's" -> "he", "they're" -> "they".
fn strip_clitic(lower: &str) -> &str {
    for clitic in ["'s", "'re", "'ve", "'ll", "'d", "'m"] {
        if let Some(stem) = lower.strip_suffix(clitic) {
            if !stem.is_empty() {
                return stem;
            }
        }
    }
    lower
}

/// "runn" -> "run", but "fall" stays "fall".
fn undouble(stem: &str) -> String {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if n >= 3 && bytes[n - 1] == bytes[n - 2] && !matches!(bytes[n - 1], b'l' | b's' | b'z' | b'f') {
        return stem[..n - 1].to_string();
    }
    stem.to_string()
}

fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{}y", stem);
    }
    for suffix in ["ches", "shes", "sses", "xes", "zes", "oes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    word[..word.len() - 1].to_string()
}

/// A run of verbs with interleaved adverbs: "had not been quietly taken".
struct VerbGroup {
    members: Vec<usize>,
    passive: bool,
    copula: bool,
}

impl VerbGroup {
    fn first(&self) -> usize {
        self.members[0]
    }

    fn head(&self) -> usize {
        self.members[self.members.len() - 1]
    }
}

fn find_verb_groups(d: &[Draft]) -> Vec<VerbGroup> {
    let mut groups = Vec::new();
    let mut i = 0;
    while i < d.len() {
        if !d[i].is_verbal() {
            i += 1;
            continue;
        }
        let mut members = vec![i];
        let mut k = i + 1;
        while d[members[members.len() - 1]].is_aux_capable() && k < d.len() {
            if d[k].is_verbal() {
                members.push(k);
            } else if !(d[k].pos() == Pos::Adv || (d[k].pos() == Pos::Part && d[k].tw.tag != "TO")) {
                break;
            }
            k += 1;
        }
        let next = members[members.len() - 1] + 1;
        groups.push(VerbGroup {
            members,
            passive: false,
            copula: false,
        });
        i = next;
    }
    groups
}

fn resolve_group(d: &mut [Draft], group: &mut VerbGroup) {
    let head = group.head();
    let auxes = &group.members[..group.members.len() - 1];
    let has_be = auxes.iter().any(|&a| d[a].tw.lemma == "be");
    let has_have = auxes.iter().any(|&a| d[a].tw.lemma == "have");
    let has_modal_or_do = auxes
        .iter()
        .any(|&a| d[a].is_modal() || d[a].tw.lemma == "do");

    let form = match d[head].form {
        Some(Form::PastOrParticiple) if has_be || has_have => Form::Participle,
        Some(Form::PastOrParticiple) => Form::Past,
        Some(Form::Unmarked) if has_be || has_have => Form::Participle,
        Some(Form::Unmarked) if has_modal_or_do => Form::Base,
        Some(Form::Unmarked) => Form::Past,
        Some(Form::Base) | Some(Form::Present) if has_modal_or_do => Form::Base,
        Some(other) => other,
        None => Form::Present,
    };
    if d[head].form.is_some() {
        d[head].form = Some(form);
        d[head].tw.tag = form.tag().to_string();
    }

    for &a in auxes {
        d[a].tw.pos = Pos::Aux;
        d[a].tw.dep = "aux".to_string();
    }

    if form == Form::Participle && !auxes.is_empty() {
        let last_aux = auxes[auxes.len() - 1];
        if d[last_aux].tw.lemma == "be" {
            d[last_aux].tw.dep = "auxpass".to_string();
            group.passive = true;
        }
    }

    if d[head].tw.lemma == "be" {
        d[head].tw.pos = Pos::Aux;
        group.copula = true;
    }
}

/// Extent of the noun phrase starting at `from`: (first, head).
fn noun_phrase(d: &[Draft], from: usize) -> Option<(usize, usize)> {
    let mut k = from;
    while k < d.len() && (d[k].is_np_modifier() || d[k].pos() == Pos::Adv) {
        k += 1;
    }
    if k >= d.len() || !d[k].is_nominal() {
        return None;
    }
    let mut head = k;
    while head + 1 < d.len() && matches!(d[head + 1].pos(), Pos::Noun | Pos::Propn) {
        head += 1;
    }
    Some((from, head))
}

fn label_noun_phrase(d: &mut [Draft], first: usize, head: usize, head_dep: &str) {
    for k in first..head {
        if d[k].pos().is_nominal() && !d[k].is_possessive() {
            d[k].tw.dep = "compound".to_string();
        }
    }
    d[head].tw.dep = head_dep.to_string();
}

/// Nearest nominal left of `from` that is not the object of a preposition.
fn subject_before(d: &[Draft], from: usize) -> Option<usize> {
    let mut k = from;
    while k > 0 {
        k -= 1;
        let t = &d[k];
        if t.pos() == Pos::Punct || t.is_verbal() || t.pos() == Pos::Sconj {
            return None;
        }
        if t.is_nominal() {
            let mut s = k;
            while s > 0 && (d[s - 1].is_np_modifier() || matches!(d[s - 1].pos(), Pos::Noun | Pos::Propn)) {
                s -= 1;
            }
            if s > 0 && d[s - 1].pos() == Pos::Adp {
                k = s - 1;
                continue;
            }
            return Some(k);
        }
    }
    None
}

fn default_dep(draft: &Draft) -> &'static str {
    match draft.pos() {
        Pos::Punct => "punct",
        Pos::Det => "det",
        Pos::Adj => "amod",
        Pos::Adv => "advmod",
        Pos::Cconj => "cc",
        Pos::Sconj => "mark",
        Pos::Adp => "prep",
        Pos::Num => "nummod",
        Pos::Intj => "intj",
        Pos::Part if draft.tw.tag == "TO" => "aux",
        Pos::Part => "neg",
        Pos::Pron if draft.is_possessive() => "poss",
        _ => "dep",
    }
}

fn label_dependencies(d: &mut [Draft]) {
    for draft in d.iter_mut() {
        draft.tw.dep = default_dep(draft).to_string();
    }

    let mut groups = find_verb_groups(d);
    for group in groups.iter_mut() {
        resolve_group(d, group);
    }

    // Root: first group with a main verb, else the first copula.
    let root = groups
        .iter()
        .position(|g| !g.copula)
        .or_else(|| (!groups.is_empty()).then_some(0));

    for (gi, group) in groups.iter().enumerate() {
        let head = group.head();
        let first = group.first();
        if Some(gi) == root {
            d[head].tw.dep = "ROOT".to_string();
        } else {
            let before = first.checked_sub(1).map(|p| &d[p]);
            d[head].tw.dep = match before {
                Some(p) if p.pos() == Pos::Cconj => "conj",
                Some(p) if p.tw.tag == "TO" => "xcomp",
                _ => "ccomp",
            }
            .to_string();
        }

        match subject_before(d, first) {
            Some(s) => {
                d[s].tw.dep = if group.passive { "nsubjpass" } else { "nsubj" }.to_string();
            }
            None => {
                if d[head].pos() == Pos::Verb && head + 1 < d.len() && d[head + 1].is_nominal() {
                    d[head + 1].tw.dep = "nsubj".to_string();
                }
            }
        }

        if group.copula {
            let mut k = head + 1;
            while k < d.len() && d[k].pos() == Pos::Adv {
                k += 1;
            }
            if k < d.len() && d[k].pos() == Pos::Adj {
                d[k].tw.dep = "acomp".to_string();
            } else if let Some((np_first, np_head)) = noun_phrase(d, head + 1) {
                label_noun_phrase(d, np_first, np_head, "attr");
            }
        } else if d[head].pos() == Pos::Verb {
            if let Some((np_first, np_head)) = noun_phrase(d, head + 1) {
                if d[np_head].tw.dep == "dep" {
                    label_noun_phrase(d, np_first, np_head, "dobj");
                }
            }
        }
    }

    // Prepositions: "by" after a passive head introduces the agent.
    for i in 0..d.len() {
        if d[i].pos() != Pos::Adp {
            continue;
        }
        let governing = groups.iter().rev().find(|g| g.head() < i);
        let is_agent = d[i].tw.lemma == "by" && governing.map(|g| g.passive).unwrap_or(false);
        d[i].tw.dep = if is_agent { "agent" } else { "prep" }.to_string();
        if let Some((np_first, np_head)) = noun_phrase(d, i + 1) {
            label_noun_phrase(d, np_first, np_head, "pobj");
        }
    }

    if root.is_none() {
        if let Some(first) = d.iter().position(|t| t.pos() != Pos::Punct) {
            d[first].tw.dep = "ROOT".to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle;

    fn tag(sentence: &[&str]) -> Vec<TaggedWord> {
        let tagger = EnglishTagger::new(&bundle::english());
        tagger.tag_sentence(sentence, &TagContext::default())
    }

    fn find<'a>(words: &[&str], tags: &'a [TaggedWord], word: &str) -> &'a TaggedWord {
        let idx = words.iter().position(|w| *w == word).unwrap();
        &tags[idx]
    }

    #[test]
    fn test_passive_with_agent() {
        let words = ["He", "was", "given", "the", "award", "by", "the", "committee", "."];
        let tags = tag(&words);
        assert_eq!(find(&words, &tags, "He").dep, "nsubjpass");
        assert_eq!(find(&words, &tags, "was").dep, "auxpass");
        assert_eq!(find(&words, &tags, "was").lemma, "be");
        let given = find(&words, &tags, "given");
        assert_eq!(given.tag, "VBN");
        assert_eq!(given.dep, "ROOT");
        assert_eq!(given.lemma, "give");
        assert_eq!(find(&words, &tags, "by").dep, "agent");
        assert_eq!(find(&words, &tags, "committee").dep, "pobj");
    }

    #[test]
    fn test_speech_verb_lemma() {
        let words = ["\"", "Hello", "there", "!", "\"", "she", "chastised", "."];
        let tags = tag(&words);
        let verb = find(&words, &tags, "chastised");
        assert_eq!(verb.pos, Pos::Verb);
        assert_eq!(verb.lemma, "chastise");
        assert_eq!(verb.dep, "ROOT");
        assert_eq!(find(&words, &tags, "she").dep, "nsubj");
    }

    #[test]
    fn test_copula_root() {
        let words = ["He", "was", "tired", "."];
        let tags = tag(&words);
        let was = find(&words, &tags, "was");
        assert_eq!(was.dep, "ROOT");
        assert_eq!(was.pos, Pos::Aux);
        assert_eq!(find(&words, &tags, "tired").dep, "acomp");
    }

    #[test]
    fn test_progressive() {
        let words = ["She", "was", "running", "home", "."];
        let tags = tag(&words);
        assert_eq!(find(&words, &tags, "was").dep, "aux");
        let running = find(&words, &tags, "running");
        assert_eq!(running.tag, "VBG");
        assert_eq!(running.lemma, "run");
        assert_eq!(running.dep, "ROOT");
    }

    #[test]
    fn test_emotion_word_is_adjective() {
        let words = ["She", "felt", "excited", "."];
        let tags = tag(&words);
        assert_eq!(find(&words, &tags, "felt").lemma, "feel");
        let excited = find(&words, &tags, "excited");
        assert_eq!(excited.pos, Pos::Adj);
        assert_eq!(excited.lemma, "excited");
    }

    #[test]
    fn test_noun_after_determiner() {
        let words = ["She", "gave", "him", "a", "look", "."];
        let tags = tag(&words);
        assert_eq!(find(&words, &tags, "look").pos, Pos::Noun);
        assert_eq!(find(&words, &tags, "gave").tag, "VBD");
    }

    #[test]
    fn test_names_mid_sentence() {
        let words = ["Then", "John", "and", "Mark", "left", "."];
        let tags = tag(&words);
        assert_eq!(find(&words, &tags, "John").pos, Pos::Propn);
        assert_eq!(find(&words, &tags, "Mark").pos, Pos::Propn);
        assert_eq!(find(&words, &tags, "Then").pos, Pos::Adv);
    }

    #[test]
    fn test_contraction_aux() {
        let words = ["He", "wasn't", "happy", "."];
        let tags = tag(&words);
        let was = find(&words, &tags, "wasn't");
        assert_eq!(was.lemma, "be");
        assert_eq!(was.dep, "ROOT");
    }

    #[test]
    fn test_undouble() {
        assert_eq!(undouble("runn"), "run");
        assert_eq!(undouble("fall"), "fall");
        assert_eq!(undouble("walk"), "walk");
    }
}
