//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step of the pipeline: they split raw text into
//! the tokens that filters such as the word delimiter then refine.
//!
//! # Examples
//!
//! ```
//! use wordsplit::analysis::tokenizer::Tokenizer;
//! use wordsplit::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Wi-Fi PowerShot").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[1].start_offset, 6);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod whitespace;

pub use whitespace::WhitespaceTokenizer;
