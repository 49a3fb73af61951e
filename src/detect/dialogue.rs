//! Dialogue versus narration balance.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::DialogueSettings;

static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Share of quoted text, plus the paragraphs that are mostly dialogue.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueBalance {
    /// Quoted characters over all characters, in [0, 1].
    pub ratio: f64,
    /// Byte ranges of dialogue-heavy paragraphs, trimmed.
    pub heavy: Vec<(usize, usize)>,
}

fn char_len(text: &str, start: usize, end: usize) -> usize {
    text[start..end].chars().count()
}

/// Trimmed, non-empty paragraphs as byte ranges.
fn paragraphs(text: &str) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut begin = 0;
    let breaks = PARAGRAPH_BREAK
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .chain(std::iter::once((text.len(), text.len())));

    for (brk_start, brk_end) in breaks {
        let raw = &text[begin..brk_start];
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            let lead = raw.len() - raw.trim_start().len();
            out.push((begin + lead, begin + lead + trimmed.len()));
        }
        begin = brk_end;
    }
    out
}

pub fn analyze_dialogue(text: &str, quote: &Regex, settings: &DialogueSettings) -> DialogueBalance {
    let total = text.chars().count();
    if total == 0 {
        return DialogueBalance {
            ratio: 0.0,
            heavy: Vec::new(),
        };
    }

    let quoted: Vec<(usize, usize)> = quote
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .filter(|(s, e)| s < e)
        .collect();
    let quoted_chars: usize = quoted.iter().map(|(s, e)| char_len(text, *s, *e)).sum();
    let ratio = (quoted_chars as f64 / total as f64).clamp(0.0, 1.0);

    let heavy = paragraphs(text)
        .into_iter()
        .filter(|(p_start, p_end)| {
            let length = char_len(text, *p_start, *p_end);
            if length <= settings.min_paragraph_chars {
                return false;
            }
            let inside: usize = quoted
                .iter()
                .map(|(s, e)| ((*s).max(*p_start), (*e).min(*p_end)))
                .filter(|(s, e)| s < e)
                .map(|(s, e)| char_len(text, s, e))
                .sum();
            inside as f64 / length as f64 > settings.heavy_ratio
        })
        .collect();

    DialogueBalance { ratio, heavy }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote() -> Regex {
        Regex::new(r#""[^"]*""#).unwrap()
    }

    /// A paragraph of `len` characters whose first `quoted` characters are a
    /// quotation.
    fn paragraph(len: usize, quoted: usize) -> String {
        let inner = "a".repeat(quoted - 2);
        let rest = "b".repeat(len - quoted);
        format!("\"{}\"{}", inner, rest)
    }

    #[test]
    fn test_ratio_bounds() {
        let settings = DialogueSettings::default();
        let all = analyze_dialogue("\"Every word quoted.\"", &quote(), &settings);
        assert_eq!(all.ratio, 1.0);
        let none = analyze_dialogue("No dialogue here.", &quote(), &settings);
        assert_eq!(none.ratio, 0.0);
        let empty = analyze_dialogue("", &quote(), &settings);
        assert_eq!(empty.ratio, 0.0);
        assert!(empty.heavy.is_empty());
    }

    #[test]
    fn test_heavy_paragraph_needs_length() {
        let settings = DialogueSettings::default();
        let long = paragraph(150, 120);
        let result = analyze_dialogue(&long, &quote(), &settings);
        assert_eq!(result.heavy, vec![(0, 150)]);

        let short = paragraph(90, 72);
        let result = analyze_dialogue(&short, &quote(), &settings);
        assert!(result.heavy.is_empty());
    }

    #[test]
    fn test_paragraphs_are_trimmed_and_located() {
        let settings = DialogueSettings::default();
        let heavy = paragraph(150, 120);
        let narrative = "c".repeat(150);
        let text = format!("{}\n\n  {}  \n \n{}", narrative, heavy, narrative);
        let result = analyze_dialogue(&text, &quote(), &settings);
        let start = 150 + 2 + 2;
        assert_eq!(result.heavy, vec![(start, start + 150)]);
        assert!(result.ratio > 0.0 && result.ratio < 1.0);
    }

    #[test]
    fn test_paragraph_split() {
        let text = "one\n\ntwo\n   \nthree";
        let paras: Vec<&str> = paragraphs(text).iter().map(|(s, e)| &text[*s..*e]).collect();
        assert_eq!(paras, vec!["one", "two", "three"]);
    }
}
