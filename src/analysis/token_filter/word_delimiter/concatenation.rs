//! Accumulator for runs of subwords that are joined back together.

use super::char_type::CharType;

/// A run of subwords being concatenated, e.g. `"wi"` + `"fi"` -> `"wifi"`.
///
/// `subword_count == 0` exactly when `text` is empty.
#[derive(Clone, Debug, Default)]
pub struct Concatenation {
    text: String,
    pub start_offset: usize,
    pub end_offset: usize,
    pub char_type: CharType,
    pub subword_count: usize,
}

impl Concatenation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one subword, given as characters.
    pub fn append(&mut self, subword: &[char]) {
        self.text.extend(subword.iter());
        self.subword_count += 1;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Reset to the empty state, keeping the allocation.
    pub fn clear(&mut self) {
        self.text.clear();
        self.start_offset = 0;
        self.end_offset = 0;
        self.char_type = CharType::NONE;
        self.subword_count = 0;
    }
}
