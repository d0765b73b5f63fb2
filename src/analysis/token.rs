//! Token types and the pull contract used by the analysis pipeline.
//!
//! # Core Types
//!
//! - [`Token`] - A single analyzed token with text, offsets and position data
//! - [`TokenType`] - Lexical type tag carried through filters
//! - [`TokenStream`] - Type alias for boxed iterator of tokens
//! - [`TokenSource`] - Fallible pull-based producer of tokens
//!
//! # Positions
//!
//! Every token carries a `position_increment` relative to the token emitted
//! before it. Filters that emit several tokens for the same input use an
//! increment of 0 to stack them on one position:
//!
//! ```text
//! Input: "wi-fi" (preserve original, catenate words)
//!
//!   Position 0: "wi-fi" (pos_inc=1)
//!   Position 0: "wi"    (pos_inc=0)
//!   Position 0: "wifi"  (pos_inc=0)
//!   Position 1: "fi"    (pos_inc=1)
//! ```
//!
//! # Examples
//!
//! ```
//! use wordsplit::analysis::token::{Token, TokenType};
//!
//! let token = Token::with_offsets("PowerShot", 0, 4, 13).with_token_type(TokenType::Alphanum);
//! assert_eq!(token.text, "PowerShot");
//! assert_eq!(token.start_offset, 4);
//! assert_eq!(token.position_increment, 1);
//! assert!(!token.has_synonym_offsets());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single unit of text flowing through the analysis pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The absolute position of the token in the stream (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the original text
    pub start_offset: usize,

    /// The byte offset where this token ends in the original text
    pub end_offset: usize,

    /// Position increment from the previous token (default: 1).
    ///
    /// - 1: next position
    /// - 0: same position as the previous token
    /// - >1: positions were skipped (e.g. removed stop words)
    pub position_increment: usize,

    /// How many positions this token spans (default: 1).
    pub position_length: usize,

    /// Whether an earlier stage marked this token as a keyword.
    pub keyword: bool,

    /// Lexical type tag assigned by the tokenizer.
    pub token_type: Option<TokenType>,
}

/// Lexical classification of a token's content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    /// Alphanumeric text (English, Latin scripts)
    Alphanum,
    /// Numeric values
    Num,
    /// CJK (Chinese, Japanese, Korean) ideographs
    Cjk,
    /// Hiragana characters (Japanese)
    Hiragana,
    /// Katakana characters (Japanese)
    Katakana,
    /// Hangul characters (Korean)
    Hangul,
    /// Punctuation marks
    Punctuation,
    /// Token injected by a synonym stage
    Synonym,
    /// Other/unknown token types
    Other,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset: 0,
            end_offset: 0,
            position_increment: 1,
            position_length: 1,
            keyword: false,
            token_type: None,
        }
    }

    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            start_offset,
            end_offset,
            ..Token::new(text, position)
        }
    }

    /// Get the byte length of the token text.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Set the position increment.
    pub fn with_position_increment(mut self, increment: usize) -> Self {
        self.position_increment = increment;
        self
    }

    /// Set the position length.
    pub fn with_position_length(mut self, length: usize) -> Self {
        self.position_length = length;
        self
    }

    /// Set the lexical type tag.
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = Some(token_type);
        self
    }

    /// Mark this token as a keyword.
    pub fn with_keyword(mut self, keyword: bool) -> Self {
        self.keyword = keyword;
        self
    }

    /// Check if this token is marked as a keyword.
    pub fn is_keyword(&self) -> bool {
        self.keyword
    }

    /// Returns true when the offsets do not span exactly the token text.
    ///
    /// Tokens injected by synonym expansion keep the offsets of the text
    /// they replace, so their offsets cannot be used to locate substrings.
    pub fn has_synonym_offsets(&self) -> bool {
        self.end_offset.checked_sub(self.start_offset) != Some(self.text.len())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Trait for types that can produce a token stream.
pub trait IntoTokenStream {
    /// Convert this type into a token stream.
    fn into_token_stream(self) -> TokenStream;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream(self) -> TokenStream {
        Box::new(self.into_iter())
    }
}

/// A pull-based, fallible producer of tokens.
///
/// Each call to [`next_token`](TokenSource::next_token) yields the next token
/// or `None` once the source is exhausted. Errors are passed through filter
/// chains untouched.
pub trait TokenSource {
    /// Pull the next token.
    fn next_token(&mut self) -> Result<Option<Token>>;

    /// Prepare the source for another round of consumption.
    fn reset(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<T: TokenSource + ?Sized> TokenSource for Box<T> {
    fn next_token(&mut self) -> Result<Option<Token>> {
        (**self).next_token()
    }

    fn reset(&mut self) -> Result<()> {
        (**self).reset()
    }
}

/// Adapts any infallible token iterator into a [`TokenSource`].
pub struct IterTokenSource<I> {
    inner: I,
}

impl<I: Iterator<Item = Token>> IterTokenSource<I> {
    /// Wrap an iterator of tokens.
    pub fn new(inner: I) -> Self {
        IterTokenSource { inner }
    }
}

impl<I: Iterator<Item = Token>> TokenSource for IterTokenSource<I> {
    fn next_token(&mut self) -> Result<Option<Token>> {
        Ok(self.inner.next())
    }
}

/// A source backed by an owned vector; `reset` rewinds to the first token.
#[derive(Clone, Debug, Default)]
pub struct VecTokenSource {
    tokens: Vec<Token>,
    cursor: usize,
}

impl VecTokenSource {
    /// Create a source replaying the given tokens.
    pub fn new(tokens: Vec<Token>) -> Self {
        VecTokenSource { tokens, cursor: 0 }
    }
}

impl TokenSource for VecTokenSource {
    fn next_token(&mut self) -> Result<Option<Token>> {
        let token = self.tokens.get(self.cursor).cloned();
        if token.is_some() {
            self.cursor += 1;
        }
        Ok(token)
    }

    fn reset(&mut self) -> Result<()> {
        self.cursor = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("hello", 0);
        assert_eq!(token.text, "hello");
        assert_eq!(token.position, 0);
        assert_eq!(token.start_offset, 0);
        assert_eq!(token.end_offset, 0);
        assert_eq!(token.position_increment, 1);
        assert_eq!(token.position_length, 1);
        assert!(!token.is_keyword());
        assert!(token.token_type.is_none());
    }

    #[test]
    fn test_token_with_offsets() {
        let token = Token::with_offsets("world", 1, 6, 11);
        assert_eq!(token.text, "world");
        assert_eq!(token.position, 1);
        assert_eq!(token.start_offset, 6);
        assert_eq!(token.end_offset, 11);
        assert!(!token.has_synonym_offsets());
    }

    #[test]
    fn test_synonym_offsets() {
        // "ml" standing in for "machine learning"
        let token = Token::with_offsets("ml", 0, 0, 16);
        assert!(token.has_synonym_offsets());

        let inverted = Token::with_offsets("ml", 0, 5, 3);
        assert!(inverted.has_synonym_offsets());
    }

    #[test]
    fn test_token_builders() {
        let token = Token::new("test", 0)
            .with_position_increment(0)
            .with_position_length(2)
            .with_keyword(true)
            .with_token_type(TokenType::Alphanum);

        assert_eq!(token.position_increment, 0);
        assert_eq!(token.position_length, 2);
        assert!(token.is_keyword());
        assert_eq!(token.token_type, Some(TokenType::Alphanum));
    }

    #[test]
    fn test_token_display() {
        let token = Token::new("hello", 0);
        assert_eq!(format!("{token}"), "hello");
    }

    #[test]
    fn test_token_stream() {
        let tokens = vec![Token::new("hello", 0), Token::new("world", 1)];

        let collected: Vec<_> = tokens.into_token_stream().collect();

        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].text, "hello");
        assert_eq!(collected[1].text, "world");
    }

    #[test]
    fn test_vec_source_rewinds() {
        let mut source = VecTokenSource::new(vec![Token::new("a", 0), Token::new("b", 1)]);
        assert_eq!(source.next_token().unwrap().unwrap().text, "a");
        assert_eq!(source.next_token().unwrap().unwrap().text, "b");
        assert!(source.next_token().unwrap().is_none());

        source.reset().unwrap();
        assert_eq!(source.next_token().unwrap().unwrap().text, "a");
    }

    #[test]
    fn test_iter_source() {
        let mut source = IterTokenSource::new(vec![Token::new("x", 0)].into_iter());
        assert_eq!(source.next_token().unwrap().unwrap().text, "x");
        assert!(source.next_token().unwrap().is_none());
    }
}
