//! Byte to character offset translation.
//!
//! Annotators and analyzers work on byte offsets (what `&str` slicing and
//! `regex` produce). Results are reported in character offsets, so every span
//! passes through an [`OffsetMap`] on its way out.

/// Maps byte offsets of a text onto character (Unicode scalar) offsets.
#[derive(Debug, Clone)]
pub struct OffsetMap {
    /// Byte offset at which each character starts. Empty for ASCII text,
    /// where bytes and characters coincide.
    starts: Vec<usize>,
    byte_len: usize,
    char_len: usize,
}

impl OffsetMap {
    pub fn new(text: &str) -> Self {
        if text.is_ascii() {
            return Self {
                starts: Vec::new(),
                byte_len: text.len(),
                char_len: text.len(),
            };
        }
        let starts: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        Self {
            char_len: starts.len(),
            starts,
            byte_len: text.len(),
        }
    }

    /// Number of characters in the text.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// Character offset for a byte offset.
    ///
    /// Returns `None` when the byte offset is past the end of the text or does
    /// not fall on a character boundary.
    pub fn to_char(&self, byte: usize) -> Option<usize> {
        if byte > self.byte_len {
            return None;
        }
        if byte == self.byte_len {
            return Some(self.char_len);
        }
        if self.starts.is_empty() {
            return Some(byte);
        }
        self.starts.binary_search(&byte).ok()
    }

    /// Convert a byte range into a character range.
    pub fn to_char_range(&self, start: usize, end: usize) -> Option<(usize, usize)> {
        Some((self.to_char(start)?, self.to_char(end)?))
    }
}

/// Slice `text` by character offsets.
///
/// Helper for consumers that hold a result and the original text.
pub fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let mut indices = text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len()));
    let begin = indices.nth(start).unwrap_or(text.len());
    let finish = if end > start {
        indices.nth(end - start - 1).unwrap_or(text.len())
    } else {
        begin
    };
    &text[begin..finish]
}
