//! Text analysis: tokenizers, token filters and the analyzers combining them.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::{Analyzer, PipelineAnalyzer};
pub use token::{Token, TokenSource, TokenStream, TokenType};
pub use token_filter::{Filter, WordDelimiterConfig, WordDelimiterFilter};
pub use tokenizer::{Tokenizer, WhitespaceTokenizer};
