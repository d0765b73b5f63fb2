//! Whitespace tokenizer implementation.

use super::Tokenizer;

use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::error::Result;

/// A tokenizer that splits text on whitespace.
///
/// Punctuation stays attached to the words, which is exactly what the word
/// delimiter filter expects to take apart.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }

    /// Detect token type based on the content of the word.
    fn detect_token_type(word: &str) -> TokenType {
        if word.is_empty() {
            return TokenType::Other;
        }

        if word.chars().all(|c| c.is_ascii_digit()) {
            return TokenType::Num;
        }

        if word.chars().any(|c| {
            matches!(c,
                '\u{4E00}'..='\u{9FFF}' |  // CJK Unified Ideographs
                '\u{3400}'..='\u{4DBF}' |  // CJK Extension A
                '\u{20000}'..='\u{2A6DF}'  // CJK Extension B
            )
        }) {
            return TokenType::Cjk;
        }

        if word.chars().all(|c| matches!(c, '\u{30A0}'..='\u{30FF}')) {
            return TokenType::Katakana;
        }

        if word.chars().all(|c| matches!(c, '\u{3040}'..='\u{309F}')) {
            return TokenType::Hiragana;
        }

        if word
            .chars()
            .any(|c| matches!(c, '\u{AC00}'..='\u{D7AF}' | '\u{1100}'..='\u{11FF}'))
        {
            return TokenType::Hangul;
        }

        if word.chars().all(|c| c.is_ascii_punctuation()) {
            return TokenType::Punctuation;
        }

        if word.chars().any(|c| c.is_alphanumeric()) {
            return TokenType::Alphanum;
        }

        TokenType::Other
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        let mut start = None;

        for (offset, c) in text.char_indices().chain(std::iter::once((text.len(), ' '))) {
            match (start, c.is_whitespace()) {
                (None, false) => start = Some(offset),
                (Some(word_start), true) => {
                    let word = &text[word_start..offset];
                    tokens.push(
                        Token::with_offsets(word, tokens.len(), word_start, offset)
                            .with_token_type(Self::detect_token_type(word)),
                    );
                    start = None;
                }
                _ => {}
            }
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_tokenizer() {
        let tokenizer = WhitespaceTokenizer::new();
        let tokens: Vec<Token> = tokenizer.tokenize("hello  world\ttest").unwrap().collect();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "hello");
        assert_eq!(tokens[1].text, "world");
        assert_eq!(tokens[2].text, "test");
        assert_eq!(tokens[1].position, 1);
        assert_eq!((tokens[1].start_offset, tokens[1].end_offset), (7, 12));
    }

    #[test]
    fn test_repeated_words_get_their_own_offsets() {
        let tokenizer = WhitespaceTokenizer::new();
        let tokens: Vec<Token> = tokenizer.tokenize("a-b a-b").unwrap().collect();
        assert_eq!(tokens[0].start_offset, 0);
        assert_eq!(tokens[1].start_offset, 4);
    }

    #[test]
    fn test_multibyte_offsets() {
        let tokenizer = WhitespaceTokenizer::new();
        let tokens: Vec<Token> = tokenizer.tokenize(" übel-keit 日本 ").unwrap().collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!((tokens[0].start_offset, tokens[0].end_offset), (1, 11));
        assert!(!tokens[0].has_synonym_offsets());
        assert_eq!(tokens[1].token_type, Some(TokenType::Cjk));
    }

    #[test]
    fn test_token_types() {
        assert_eq!(WhitespaceTokenizer::detect_token_type("500"), TokenType::Num);
        assert_eq!(WhitespaceTokenizer::detect_token_type("SD500"), TokenType::Alphanum);
        assert_eq!(WhitespaceTokenizer::detect_token_type("/"), TokenType::Punctuation);
        assert_eq!(WhitespaceTokenizer::detect_token_type("カタカナ"), TokenType::Katakana);
    }

    #[test]
    fn test_empty_input() {
        let tokenizer = WhitespaceTokenizer::new();
        assert_eq!(tokenizer.tokenize("   ").unwrap().count(), 0);
        assert_eq!(tokenizer.name(), "whitespace");
    }
}
