//! Iteration over the subwords of a single token.

use std::sync::Arc;

use super::char_type::{CharType, CharTypeTable};

/// A `[start, end)` character span yielded by [`WordDelimiterIterator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Subword {
    pub start: usize,
    pub end: usize,
    /// Type of the first character; `LOWER` and `UPPER` are both reported as `ALPHA`.
    pub char_type: CharType,
}

/// Splits a token's characters into subwords.
///
/// The iterator owns a copy of the token text (as `char`s), so the token it
/// was fed from can be dropped while subwords are still being produced.
/// Indices are character indices into that copy.
#[derive(Clone, Debug)]
pub struct WordDelimiterIterator {
    text: Vec<char>,
    table: Arc<CharTypeTable>,

    start_bounds: usize,
    end_bounds: usize,

    current: usize,
    end: usize,
    done: bool,

    has_final_possessive: bool,
    skip_possessive: bool,

    split_on_case_change: bool,
    split_on_numerics: bool,
    stem_english_possessive: bool,
}

impl WordDelimiterIterator {
    pub fn new(
        table: Arc<CharTypeTable>,
        split_on_case_change: bool,
        split_on_numerics: bool,
        stem_english_possessive: bool,
    ) -> Self {
        WordDelimiterIterator {
            text: Vec::new(),
            table,
            start_bounds: 0,
            end_bounds: 0,
            current: 0,
            end: 0,
            done: false,
            has_final_possessive: false,
            skip_possessive: false,
            split_on_case_change,
            split_on_numerics,
            stem_english_possessive,
        }
    }

    /// Load a new token, reusing the internal buffer.
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.extend(text.chars());

        self.end_bounds = self.text.len();
        self.start_bounds = 0;
        self.current = 0;
        self.end = 0;
        self.done = false;
        self.skip_possessive = false;
        self.has_final_possessive = false;

        self.set_bounds();
    }

    /// Move to the next subword, or return `None` once the token is exhausted.
    pub fn advance(&mut self) -> Option<Subword> {
        if self.done {
            return None;
        }

        self.current = self.end;
        if self.skip_possessive {
            self.current += 2;
            self.skip_possessive = false;
        }

        let mut last_type = CharType::NONE;
        while self.current < self.end_bounds {
            last_type = self.char_type(self.current);
            if !last_type.is_subword_delim() {
                break;
            }
            self.current += 1;
        }

        if self.current >= self.end_bounds {
            self.done = true;
            return None;
        }

        self.end = self.current + 1;
        while self.end < self.end_bounds {
            let char_type = self.char_type(self.end);
            if self.is_break(last_type, char_type) {
                break;
            }
            last_type = char_type;
            self.end += 1;
        }

        // "'s" directly after this subword and followed by a delimiter
        if self.end + 1 < self.end_bounds && self.ends_with_possessive(self.end + 2) {
            self.skip_possessive = true;
        }

        Some(self.subword())
    }

    /// The current subword. Meaningless once [`is_done`](Self::is_done).
    pub fn subword(&self) -> Subword {
        Subword {
            start: self.current,
            end: self.end,
            char_type: self.subword_type(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// The owned copy of the current token text.
    pub fn text(&self) -> &[char] {
        &self.text
    }

    /// Type of the current subword, `NONE` when exhausted.
    pub fn subword_type(&self) -> CharType {
        if self.done {
            return CharType::NONE;
        }
        match self.char_type(self.current) {
            CharType::LOWER | CharType::UPPER => CharType::ALPHA,
            other => other,
        }
    }

    /// True if the current subword covers the whole token, outer delimiters included.
    pub fn spans_whole_text(&self) -> bool {
        !self.done && self.current == 0 && self.end == self.text.len()
    }

    /// True if the current subword is the only one between the outer delimiters
    /// (ignoring a trailing possessive).
    pub fn is_single_word(&self) -> bool {
        if self.has_final_possessive {
            self.current == self.start_bounds && self.end + 2 == self.end_bounds
        } else {
            self.current == self.start_bounds && self.end == self.end_bounds
        }
    }

    fn is_break(&self, last_type: CharType, char_type: CharType) -> bool {
        if char_type.intersects(last_type) {
            return false;
        }

        if !self.split_on_case_change && last_type.is_alpha() && char_type.is_alpha() {
            return false;
        }
        // "Po" | "wer": a capital keeps the letters that follow it
        if last_type.is_upper() && char_type.is_alpha() {
            return false;
        }
        if !self.split_on_numerics
            && ((last_type.is_alpha() && char_type.is_digit())
                || (last_type.is_digit() && char_type.is_alpha()))
        {
            return false;
        }

        true
    }

    fn set_bounds(&mut self) {
        while self.start_bounds < self.text.len()
            && self.char_type(self.start_bounds).is_subword_delim()
        {
            self.start_bounds += 1;
        }

        while self.end_bounds > self.start_bounds
            && self.char_type(self.end_bounds - 1).is_subword_delim()
        {
            self.end_bounds -= 1;
        }

        if self.ends_with_possessive(self.end_bounds) {
            self.has_final_possessive = true;
        }

        self.current = self.start_bounds;
    }

    /// Checks for `'s`/`'S` ending just before `pos`, preceded by a letter and
    /// followed by the end of the bounds or a delimiter.
    fn ends_with_possessive(&self, pos: usize) -> bool {
        self.stem_english_possessive
            && pos > 2
            && self.text[pos - 2] == '\''
            && matches!(self.text[pos - 1], 's' | 'S')
            && self.char_type(pos - 3).is_alpha()
            && (pos == self.end_bounds || self.char_type(pos).is_subword_delim())
    }

    #[inline]
    fn char_type(&self, index: usize) -> CharType {
        self.table.classify(self.text[index])
    }
}
