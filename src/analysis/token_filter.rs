//! Token filter implementations for token transformation.
//!
//! Filters receive the stream produced by a tokenizer (or by the previous
//! filter) and produce a new stream.
//!
//! # Available Filters
//!
//! - [`word_delimiter::WordDelimiterFilter`] - Splits compound tokens into
//!   subwords and re-joins runs of them
//!
//! # Filter Chaining
//!
//! ```text
//! Tokenizer → WordDelimiter → Index
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// The trait requires `Send + Sync` so configured filters can be shared
/// between analyzers on different threads.
///
/// # Examples
///
/// ```
/// use wordsplit::analysis::token::{Token, TokenStream};
/// use wordsplit::analysis::token_filter::Filter;
/// use wordsplit::error::Result;
///
/// struct UppercaseFilter;
///
/// impl Filter for UppercaseFilter {
///     fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
///         let upper: Vec<Token> = tokens
///             .map(|mut t| {
///                 t.text = t.text.to_uppercase();
///                 t
///             })
///             .collect();
///         Ok(Box::new(upper.into_iter()))
///     }
///
///     fn name(&self) -> &'static str {
///         "uppercase"
///     }
/// }
/// ```
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod word_delimiter;

pub use word_delimiter::{WordDelimiterConfig, WordDelimiterFilter, WordDelimiterStream};
