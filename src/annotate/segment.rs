//! Tokenization and sentence boundary detection.
//!
//! Language-neutral: words, numbers and single punctuation characters, then
//! boundaries after terminal punctuation. Dialogue is kept together with its
//! tag: `"Hello there!" she said.` is one sentence because the word after the
//! closing quote starts lowercase.

use std::ops::Range;

/// What kind of surface unit a raw token is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Word,
    Number,
    Punct,
}

/// A token before tagging: a byte span and its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawToken {
    pub start: usize,
    pub end: usize,
    pub kind: TokenKind,
}

impl RawToken {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// Title abbreviations that never end a sentence ("Dr. Smith").
const TITLE_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "gen", "col", "capt", "lt", "sgt",
    "rev", "hon", "vs", "etc",
];

const TERMINALS: &[char] = &['.', '!', '?', '\u{2026}'];

const CLOSERS: &[char] = &['"', '\'', '\u{201D}', '\u{2019}', '\u{00BB}', '\u{201C}', ')', ']'];

const OPENERS: &[char] = &['"', '\'', '\u{201C}', '\u{2018}', '\u{201E}', '\u{00AB}', '(', '['];

fn is_word_joiner(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}' | '-')
}

/// Split text into word, number and punctuation tokens.
pub(crate) fn tokenize(text: &str) -> Vec<RawToken> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (start, c) = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c.is_alphabetic() {
            let mut j = i + 1;
            while j < chars.len() {
                let ch = chars[j].1;
                if ch.is_alphanumeric() {
                    j += 1;
                } else if is_word_joiner(ch)
                    && j + 1 < chars.len()
                    && chars[j + 1].1.is_alphabetic()
                {
                    j += 2;
                } else {
                    break;
                }
            }
            tokens.push(RawToken {
                start,
                end: byte_end(text, &chars, j),
                kind: TokenKind::Word,
            });
            i = j;
            continue;
        }

        if c.is_ascii_digit() {
            let mut j = i + 1;
            while j < chars.len() {
                let ch = chars[j].1;
                if ch.is_ascii_digit() {
                    j += 1;
                } else if (ch == '.' || ch == ',')
                    && j + 1 < chars.len()
                    && chars[j + 1].1.is_ascii_digit()
                {
                    j += 2;
                } else {
                    break;
                }
            }
            tokens.push(RawToken {
                start,
                end: byte_end(text, &chars, j),
                kind: TokenKind::Number,
            });
            i = j;
            continue;
        }

        tokens.push(RawToken {
            start,
            end: start + c.len_utf8(),
            kind: TokenKind::Punct,
        });
        i += 1;
    }

    tokens
}

fn byte_end(text: &str, chars: &[(usize, char)], idx: usize) -> usize {
    chars.get(idx).map(|&(b, _)| b).unwrap_or(text.len())
}

fn first_char(text: &str, tok: &RawToken) -> char {
    tok.text(text).chars().next().unwrap_or(' ')
}

fn is_paragraph_break(gap: &str) -> bool {
    gap.matches('\n').count() >= 2
}

/// Group tokens into sentences. Returns token index ranges.
pub(crate) fn split_sentences(text: &str, tokens: &[RawToken]) -> Vec<Range<usize>> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < tokens.len() {
        let tok = &tokens[i];

        // Blank lines always separate sentences.
        if let Some(next) = tokens.get(i + 1) {
            if is_paragraph_break(&text[tok.end..next.start]) {
                sentences.push(start..i + 1);
                start = i + 1;
                i += 1;
                continue;
            }
        }

        let c = first_char(text, tok);
        if tok.kind != TokenKind::Punct || !TERMINALS.contains(&c) {
            i += 1;
            continue;
        }

        // Absorb adjacent terminals and closing quotes/brackets: `?!"`, `.)`.
        let mut last = i;
        while let Some(next) = tokens.get(last + 1) {
            let nc = first_char(text, next);
            let adjacent = next.start == tokens[last].end;
            if adjacent
                && next.kind == TokenKind::Punct
                && (TERMINALS.contains(&nc) || CLOSERS.contains(&nc))
            {
                last += 1;
            } else {
                break;
            }
        }

        if is_boundary(text, tokens, i, last) {
            sentences.push(start..last + 1);
            start = last + 1;
        }
        i = last + 1;
    }

    if start < tokens.len() {
        sentences.push(start..tokens.len());
    }

    sentences
}

/// Decide whether the terminal cluster `tokens[first..=last]` ends a sentence.
fn is_boundary(text: &str, tokens: &[RawToken], first: usize, last: usize) -> bool {
    let next = match tokens.get(last + 1) {
        Some(t) => t,
        None => return true,
    };

    // "e.g", "3.x", "...word": no whitespace means no boundary.
    let gap = &text[tokens[last].end..next.start];
    if gap.is_empty() {
        return false;
    }

    if first_char(text, &tokens[first]) == '.' && first > 0 {
        let prev = &tokens[first - 1];
        if prev.kind == TokenKind::Word && prev.end == tokens[first].start {
            let word = prev.text(text);
            if TITLE_ABBREVIATIONS.contains(&word.to_lowercase().as_str()) {
                return false;
            }
            // Initials: "J. R. R. Tolkien"
            let mut chars = word.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                if c.is_uppercase() {
                    return false;
                }
            }
        }
    }

    // Uppercase, digits, opening quotes and other symbols start a new
    // sentence; a lowercase word continues the current one.
    let nc = first_char(text, next);
    OPENERS.contains(&nc) || !nc.is_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<&str> {
        tokenize(text).iter().map(|t| t.text(text)).collect()
    }

    fn sentences(text: &str) -> Vec<String> {
        let tokens = tokenize(text);
        split_sentences(text, &tokens)
            .into_iter()
            .map(|r| text[tokens[r.start].start..tokens[r.end - 1].end].to_string())
            .collect()
    }

    #[test]
    fn test_tokenize_words_and_punct() {
        assert_eq!(
            words("He didn't go, well-known or not."),
            vec!["He", "didn't", "go", ",", "well-known", "or", "not", "."]
        );
    }

    #[test]
    fn test_tokenize_numbers() {
        assert_eq!(words("It cost 3.50 or 1,000 coins."), vec!["It", "cost", "3.50", "or", "1,000", "coins", "."]);
    }

    #[test]
    fn test_tokenize_quotes() {
        assert_eq!(
            words("\"Hello there!\" she said."),
            vec!["\"", "Hello", "there", "!", "\"", "she", "said", "."]
        );
    }

    #[test]
    fn test_split_basic_sentences() {
        assert_eq!(
            sentences("The cat sat. The dog ran! Did it?"),
            vec!["The cat sat.", "The dog ran!", "Did it?"]
        );
    }

    #[test]
    fn test_dialogue_with_tag_is_one_sentence() {
        assert_eq!(
            sentences("\"Hello there!\" she chastised. He left."),
            vec!["\"Hello there!\" she chastised.", "He left."]
        );
    }

    #[test]
    fn test_dialogue_followed_by_new_sentence() {
        assert_eq!(
            sentences("\"Run!\" He turned and fled."),
            vec!["\"Run!\"", "He turned and fled."]
        );
    }

    #[test]
    fn test_title_abbreviation_does_not_split() {
        assert_eq!(
            sentences("Dr. Smith arrived. Mrs. Jones left."),
            vec!["Dr. Smith arrived.", "Mrs. Jones left."]
        );
    }

    #[test]
    fn test_paragraph_break_splits() {
        assert_eq!(
            sentences("A heading without stop\n\nThen the body."),
            vec!["A heading without stop", "Then the body."]
        );
    }

    #[test]
    fn test_lowercase_after_period_does_not_split() {
        assert_eq!(sentences("It was 5 p.m. and late."), vec!["It was 5 p.m. and late."]);
    }
}
