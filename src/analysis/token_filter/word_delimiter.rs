//! Word delimiter filter.
//!
//! Splits tokens into subwords at intra-word delimiters and character class
//! transitions, and optionally re-joins runs of subwords:
//!
//! - split on intra-word delimiters (by default, all non alpha-numeric
//!   characters): `"Wi-Fi"` -> `"Wi", "Fi"`
//! - split on case transitions: `"PowerShot"` -> `"Power", "Shot"`
//! - split on letter-number transitions: `"SD500"` -> `"SD", "500"`
//! - leading and trailing delimiters are ignored: `"//hello---there, 'dude'"`
//!   -> `"hello", "there", "dude"`
//! - trailing `'s` are removed for each subword: `"O'Neil's"` -> `"O", "Neil"`
//!
//! Generated tokens are ordered by start offset and stacked with a position
//! increment of 0 when they overlap a token already emitted for the same
//! input, so phrase queries across the original and the parts keep matching.
//!
//! # Examples
//!
//! ```
//! use wordsplit::analysis::token::Token;
//! use wordsplit::analysis::token_filter::Filter;
//! use wordsplit::analysis::token_filter::word_delimiter::{WordDelimiterConfig, WordDelimiterFilter};
//!
//! let config = WordDelimiterConfig::default().with_catenate_words(true);
//! let filter = WordDelimiterFilter::from_config(&config).unwrap();
//!
//! let tokens = vec![Token::with_offsets("wi-fi", 0, 0, 5)];
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
//!
//! let texts: Vec<&str> = result.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, vec!["wi", "wifi", "fi"]);
//! let increments: Vec<usize> = result.iter().map(|t| t.position_increment).collect();
//! assert_eq!(increments, vec![1, 0, 1]);
//! ```

pub mod char_type;
pub mod concatenation;
pub mod config;
pub mod iterator;
pub mod scheduler;
pub mod type_table;

use std::collections::HashSet;
use std::mem;
use std::sync::Arc;

use log::{debug, trace};

use crate::analysis::token::{IterTokenSource, Token, TokenSource, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

pub use char_type::{CharType, CharTypeTable};
pub use config::WordDelimiterConfig;
pub use iterator::{Subword, WordDelimiterIterator};
pub use scheduler::OutputScheduler;

use concatenation::Concatenation;
use config::Flags;

/// A filter that splits words into subwords and performs optional
/// transformations on subword groups.
///
/// The filter itself is immutable configuration; [`stream`](Self::stream)
/// creates the stateful [`WordDelimiterStream`] that does the work.
#[derive(Clone, Debug)]
pub struct WordDelimiterFilter {
    flags: Flags,
    protected_words: Option<Arc<HashSet<String>>>,
    table: Arc<CharTypeTable>,
}

impl WordDelimiterFilter {
    /// Create a filter with the default options and character table.
    pub fn new() -> Self {
        WordDelimiterFilter {
            flags: Flags::from(&WordDelimiterConfig::default()),
            protected_words: None,
            table: CharTypeTable::default_table(),
        }
    }

    /// Build a filter from configuration.
    ///
    /// Type table rules are parsed here, so a bad rule is reported before any
    /// token is processed.
    pub fn from_config(config: &WordDelimiterConfig) -> Result<Self> {
        let table = match &config.types {
            Some(rules) => Arc::new(type_table::parse_type_table(rules)?),
            None => CharTypeTable::default_table(),
        };
        let protected_words = config
            .protected_words
            .as_ref()
            .map(|words| Arc::new(words.iter().cloned().collect::<HashSet<String>>()));

        debug!(
            "word delimiter filter: {:?}, type table size {}, {} protected words",
            Flags::from(config),
            table.len(),
            protected_words.as_ref().map_or(0, |w| w.len())
        );

        Ok(WordDelimiterFilter {
            flags: Flags::from(config),
            protected_words,
            table,
        })
    }

    /// Replace the character type table.
    pub fn with_table(mut self, table: CharTypeTable) -> Self {
        self.table = Arc::new(table);
        self
    }

    /// Replace the protected word set.
    pub fn with_protected_words(mut self, words: HashSet<String>) -> Self {
        self.protected_words = Some(Arc::new(words));
        self
    }

    /// The character type table in use.
    pub fn table(&self) -> &CharTypeTable {
        &self.table
    }

    /// Check whether a token text bypasses splitting.
    pub fn is_protected(&self, text: &str) -> bool {
        self.protected_words
            .as_ref()
            .is_some_and(|words| words.contains(text))
    }

    /// Wrap an upstream source.
    pub fn stream<S: TokenSource>(&self, input: S) -> WordDelimiterStream<S> {
        WordDelimiterStream::new(
            input,
            self.flags,
            self.protected_words.clone(),
            Arc::clone(&self.table),
        )
    }
}

impl Default for WordDelimiterFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for WordDelimiterFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let output = self
            .stream(IterTokenSource::new(tokens))
            .collect::<Result<Vec<Token>>>()?;
        Ok(Box::new(output.into_iter()))
    }

    fn name(&self) -> &'static str {
        "word_delimiter"
    }
}

/// Pull-based word delimiter over an upstream [`TokenSource`].
///
/// One upstream token may yield several output tokens. They are produced
/// one per [`next_token`](TokenSource::next_token) call; upstream is only
/// pulled again once everything generated for the previous token has been
/// handed out.
pub struct WordDelimiterStream<S> {
    input: S,
    flags: Flags,
    protected_words: Option<Arc<HashSet<String>>>,

    iterator: WordDelimiterIterator,

    // runs of same-typed subwords (words or numbers)
    concat: Concatenation,
    // subword count of the last flushed `concat`
    last_concat_count: usize,
    // everything, for catenate_all
    concat_all: Concatenation,

    // position increments not yet handed to an output token
    accum_pos_inc: usize,

    // attributes of the token being split; `text` is kept empty
    saved: Token,
    saved_start_offset: usize,
    saved_end_offset: usize,
    has_saved_state: bool,
    // char index -> byte offset within the saved text
    byte_offsets: Vec<usize>,
    // offsets don't match the text length: a synonym, don't adjust offsets
    has_illegal_offsets: bool,

    // for a run of the same subword type within a word, have we output anything?
    has_output_token: bool,
    // when preserve_original is on, has anything followed the original?
    // That token must have position increment 0.
    has_output_following_original: bool,

    scheduler: OutputScheduler,
    first: bool,
    last_position: Option<usize>,
}

impl<S: TokenSource> WordDelimiterStream<S> {
    fn new(
        input: S,
        flags: Flags,
        protected_words: Option<Arc<HashSet<String>>>,
        table: Arc<CharTypeTable>,
    ) -> Self {
        WordDelimiterStream {
            input,
            iterator: WordDelimiterIterator::new(
                table,
                flags.split_on_case_change,
                flags.split_on_numerics,
                flags.stem_english_possessive,
            ),
            flags,
            protected_words,
            concat: Concatenation::new(),
            last_concat_count: 0,
            concat_all: Concatenation::new(),
            accum_pos_inc: 0,
            saved: Token::new(String::new(), 0),
            saved_start_offset: 0,
            saved_end_offset: 0,
            has_saved_state: false,
            byte_offsets: Vec::new(),
            has_illegal_offsets: false,
            has_output_token: false,
            has_output_following_original: false,
            scheduler: OutputScheduler::new(),
            first: true,
            last_position: None,
        }
    }

    /// Swap in a new upstream source for the next document, keeping the
    /// internal buffers. Returns the previous source.
    pub fn reset_with(&mut self, input: S) -> S {
        let previous = mem::replace(&mut self.input, input);
        self.clear_state();
        previous
    }

    /// The upstream source.
    pub fn input(&self) -> &S {
        &self.input
    }

    /// Consume the stream and return the upstream source.
    pub fn into_inner(self) -> S {
        self.input
    }

    fn clear_state(&mut self) {
        self.has_saved_state = false;
        self.concat.clear();
        self.concat_all.clear();
        self.last_concat_count = 0;
        self.accum_pos_inc = 0;
        self.has_output_token = false;
        self.has_output_following_original = false;
        self.scheduler.clear();
        self.first = true;
        self.last_position = None;
    }

    fn is_protected(&self, text: &str) -> bool {
        self.protected_words
            .as_ref()
            .is_some_and(|words| words.contains(text))
    }

    /// Assign the absolute position implied by the position increment.
    fn place(&mut self, mut token: Token) -> Token {
        let position = match self.last_position {
            Some(last) => last + token.position_increment,
            None => token.position_increment.saturating_sub(1),
        };
        token.position = position;
        self.last_position = Some(position);
        token
    }

    fn save_state(&mut self, token: &Token) {
        self.saved_start_offset = token.start_offset;
        self.saved_end_offset = token.end_offset;
        self.has_illegal_offsets = token.has_synonym_offsets();
        self.saved = Token {
            text: String::new(),
            ..token.clone()
        };

        self.byte_offsets.clear();
        let mut offset = 0;
        for c in self.iterator.text() {
            self.byte_offsets.push(offset);
            offset += c.len_utf8();
        }
        self.byte_offsets.push(offset);

        self.has_saved_state = true;
    }

    /// Build an output token from the saved attributes.
    fn restore(
        &self,
        text: String,
        start_offset: usize,
        end_offset: usize,
        position_increment: usize,
    ) -> Token {
        Token {
            text,
            start_offset,
            end_offset,
            position_increment,
            ..self.saved.clone()
        }
    }

    /// Flush `concat`, returning true if a token was queued.
    ///
    /// A run of a single subword is dropped when that subword was already
    /// generated as a part.
    fn flush_concatenation(&mut self) -> bool {
        self.last_concat_count = self.concat.subword_count;
        if self.concat.subword_count != 1 || !self.should_generate_parts(self.concat.char_type) {
            self.write_concatenation(false);
            return true;
        }
        self.concat.clear();
        false
    }

    fn write_concatenation(&mut self, all: bool) {
        let position_increment = self.position(true);
        let concat = if all {
            &mut self.concat_all
        } else {
            &mut self.concat
        };

        let (start_offset, end_offset) = if self.has_illegal_offsets {
            (self.saved_start_offset, self.saved_end_offset)
        } else {
            (concat.start_offset, concat.end_offset)
        };
        let text = concat.text().to_string();
        concat.clear();

        let token = self.restore(text, start_offset, end_offset, position_increment);
        self.accum_pos_inc = 0;
        self.scheduler.push(token);
    }

    fn should_concatenate(&self, word_type: CharType) -> bool {
        (self.flags.catenate_words && word_type.is_alpha())
            || (self.flags.catenate_numbers && word_type.is_digit())
    }

    fn should_generate_parts(&self, word_type: CharType) -> bool {
        (self.flags.generate_word_parts && word_type.is_alpha())
            || (self.flags.generate_number_parts && word_type.is_digit())
    }

    /// Append the current subword to one of the runs.
    fn concatenate(&mut self, all: bool) {
        let (current, end) = (self.iterator.current(), self.iterator.end());
        let start_offset = self.saved_start_offset + self.byte_offsets[current];
        let end_offset = self.saved_start_offset + self.byte_offsets[end];

        let concat = if all {
            &mut self.concat_all
        } else {
            &mut self.concat
        };
        if concat.is_empty() {
            concat.start_offset = start_offset;
        }
        concat.append(&self.iterator.text()[current..end]);
        concat.end_offset = end_offset;
    }

    /// Create a token for the current subword.
    fn generate_part(&mut self, is_single_word: bool) -> Token {
        let (current, end) = (self.iterator.current(), self.iterator.end());
        let text: String = self.iterator.text()[current..end].iter().collect();

        let start_offset = self.saved_start_offset + self.byte_offsets[current];
        let end_offset = self.saved_start_offset + self.byte_offsets[end];

        let (start_offset, end_offset) = if self.has_illegal_offsets {
            if is_single_word && start_offset <= self.saved_end_offset {
                (start_offset, self.saved_end_offset)
            } else {
                (self.saved_start_offset, self.saved_end_offset)
            }
        } else {
            (start_offset, end_offset)
        };

        let position_increment = self.position(false);
        self.restore(text, start_offset, end_offset, position_increment)
    }

    /// Position increment for the next generated token.
    ///
    /// `inject` requests 0 once something has been output for this word, so
    /// concatenations stack on the parts they were built from.
    fn position(&mut self, inject: bool) -> usize {
        let pos_inc = self.accum_pos_inc;

        if self.has_output_token {
            self.accum_pos_inc = 0;
            return if inject { 0 } else { pos_inc.max(1) };
        }

        self.has_output_token = true;

        if !self.has_output_following_original {
            // the first token following the original is 0 regardless
            self.has_output_following_original = true;
            return 0;
        }

        self.accum_pos_inc = 0;
        pos_inc.max(1)
    }
}

impl<S: TokenSource> TokenSource for WordDelimiterStream<S> {
    fn next_token(&mut self) -> Result<Option<Token>> {
        loop {
            if !self.has_saved_state {
                let Some(mut token) = self.input.next_token()? else {
                    return Ok(None);
                };

                self.accum_pos_inc += token.position_increment;

                self.iterator.set_text(&token.text);
                self.iterator.advance();

                // word of no delimiters, or protected word: just return it
                if self.iterator.spans_whole_text() || self.is_protected(&token.text) {
                    if !self.iterator.spans_whole_text() {
                        trace!("protected word {:?} passed through", token.text);
                    }
                    token.position_increment = self.accum_pos_inc;
                    self.accum_pos_inc = 0;
                    self.first = false;
                    return Ok(Some(self.place(token)));
                }

                // word of only delimiters
                if self.iterator.is_done() && !self.flags.preserve_original {
                    // an increment of 1 is swallowed rather than leaving a hole
                    if token.position_increment == 1 && !self.first {
                        self.accum_pos_inc -= 1;
                    }
                    trace!(
                        "dropped delimiter-only token {:?}, accumulated gap {}",
                        token.text,
                        self.accum_pos_inc
                    );
                    continue;
                }

                self.save_state(&token);

                self.has_output_token = false;
                self.has_output_following_original = !self.flags.preserve_original;
                self.last_concat_count = 0;

                if self.flags.preserve_original {
                    token.position_increment = self.accum_pos_inc;
                    self.accum_pos_inc = 0;
                    self.first = false;
                    return Ok(Some(self.place(token)));
                }
            }

            // at the end of the word, output any concatenations
            if self.iterator.is_done() {
                if !self.concat.is_empty() && self.flush_concatenation() {
                    continue;
                }

                if !self.concat_all.is_empty() {
                    // only if we haven't output this same combo above
                    if self.concat_all.subword_count > self.last_concat_count {
                        self.write_concatenation(true);
                        continue;
                    }
                    self.concat_all.clear();
                }

                if let Some(mut token) = self.scheduler.pop() {
                    // e.g. not outputting numbers, but catenate_all
                    if self.first && token.position_increment == 0 {
                        token.position_increment = 1;
                    }
                    self.first = false;
                    return Ok(Some(self.place(token)));
                }

                // nothing left for this word, on to the next input token
                self.scheduler.clear();
                self.has_saved_state = false;
                continue;
            }

            // word surrounded by delimiters: always output
            if self.iterator.is_single_word() {
                let token = self.generate_part(true);
                self.iterator.advance();
                self.first = false;
                return Ok(Some(self.place(token)));
            }

            let word_type = self.iterator.subword_type();

            // do we already have queued up incompatible concatenations?
            if !self.concat.is_empty() && !self.concat.char_type.intersects(word_type) {
                let flushed = self.flush_concatenation();
                self.has_output_token = false;
                if flushed {
                    continue;
                }
            }

            if self.should_concatenate(word_type) {
                if self.concat.is_empty() {
                    self.concat.char_type = word_type;
                }
                self.concatenate(false);
            }

            if self.flags.catenate_all {
                self.concatenate(true);
            }

            if self.should_generate_parts(word_type) {
                let token = self.generate_part(false);
                self.scheduler.push(token);
            }

            self.iterator.advance();
        }
    }

    fn reset(&mut self) -> Result<()> {
        self.input.reset()?;
        self.clear_state();
        Ok(())
    }
}

impl<S: TokenSource> Iterator for WordDelimiterStream<S> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::VecTokenSource;
    use crate::error::WordsplitError;

    fn filter(config: WordDelimiterConfig) -> WordDelimiterFilter {
        WordDelimiterFilter::from_config(&config).unwrap()
    }

    /// Tokens with offsets matching their text, separated by single spaces.
    fn tokens(words: &[&str]) -> Vec<Token> {
        let mut offset = 0;
        words
            .iter()
            .enumerate()
            .map(|(position, word)| {
                let token = Token::with_offsets(*word, position, offset, offset + word.len());
                offset += word.len() + 1;
                token
            })
            .collect()
    }

    fn run(filter: &WordDelimiterFilter, input: Vec<Token>) -> Vec<Token> {
        filter
            .stream(VecTokenSource::new(input))
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    fn increments(tokens: &[Token]) -> Vec<usize> {
        tokens.iter().map(|t| t.position_increment).collect()
    }

    #[test]
    fn test_split_on_case_change() {
        let output = run(&WordDelimiterFilter::new(), tokens(&["PowerShot"]));
        assert_eq!(texts(&output), vec!["Power", "Shot"]);
        assert_eq!(increments(&output), vec![1, 1]);
        assert_eq!(output[0].start_offset, 0);
        assert_eq!(output[0].end_offset, 5);
        assert_eq!(output[1].start_offset, 5);
        assert_eq!(output[1].end_offset, 9);
    }

    #[test]
    fn test_pass_through() {
        let input = tokens(&["hello", "world"]);
        let output = run(&WordDelimiterFilter::new(), input.clone());
        assert_eq!(output, input);
    }

    #[test]
    fn test_catenate_words_only() {
        let f = filter(WordDelimiterConfig::none().with_catenate_words(true));
        let output = run(&f, tokens(&["wi-fi"]));
        assert_eq!(texts(&output), vec!["wifi"]);
        assert_eq!(increments(&output), vec![1]);
        assert_eq!((output[0].start_offset, output[0].end_offset), (0, 5));
    }

    #[test]
    fn test_catenate_all_offsets() {
        let f = filter(WordDelimiterConfig::default().with_catenate_all(true));
        let input = vec![Token::with_offsets("foo-bar", 0, 5, 12)];
        let output = run(&f, input);
        assert_eq!(texts(&output), vec!["foo", "foobar", "bar"]);
        assert_eq!(
            output.iter().map(|t| (t.start_offset, t.end_offset)).collect::<Vec<_>>(),
            vec![(5, 8), (5, 12), (9, 12)]
        );
        assert_eq!(increments(&output), vec![1, 0, 1]);
    }

    #[test]
    fn test_synonym_offsets_are_not_adjusted() {
        let f = filter(WordDelimiterConfig::default().with_catenate_all(true));
        let input = vec![Token::with_offsets("foo-bar", 0, 5, 6)];
        let output = run(&f, input);
        assert_eq!(texts(&output), vec!["foo", "bar", "foobar"]);
        assert!(output.iter().all(|t| (t.start_offset, t.end_offset) == (5, 6)));
    }

    #[test]
    fn test_single_word_with_synonym_offsets() {
        let input = vec![Token::with_offsets("(hello)", 0, 3, 20)];
        let output = run(&WordDelimiterFilter::new(), input);
        assert_eq!(texts(&output), vec!["hello"]);
        assert_eq!((output[0].start_offset, output[0].end_offset), (4, 20));
    }

    #[test]
    fn test_preserve_original() {
        let f = filter(WordDelimiterConfig::default().with_preserve_original(true));
        let output = run(&f, tokens(&["500-42"]));
        assert_eq!(texts(&output), vec!["500-42", "500", "42"]);
        assert_eq!(increments(&output), vec![1, 0, 1]);
    }

    #[test]
    fn test_concat_all_forced_to_one_at_stream_start() {
        let f = filter(
            WordDelimiterConfig::default()
                .with_generate_number_parts(false)
                .with_catenate_all(true),
        );
        let output = run(&f, tokens(&["123-abc"]));
        assert_eq!(texts(&output), vec!["123abc", "abc"]);
        assert_eq!(increments(&output), vec![1, 1]);
    }

    #[test]
    fn test_delimiter_only_token_is_dropped() {
        let output = run(&WordDelimiterFilter::new(), tokens(&["LUCENE", "/", "SOLR"]));
        assert_eq!(texts(&output), vec!["LUCENE", "SOLR"]);
        assert_eq!(increments(&output), vec![1, 1]);
        assert_eq!(output[1].position, 1);
    }

    #[test]
    fn test_delimiter_only_gap_is_kept() {
        let mut input = tokens(&["LUCENE", "/", "SOLR"]);
        input[1].position_increment = 3;
        let output = run(&WordDelimiterFilter::new(), input);
        assert_eq!(texts(&output), vec!["LUCENE", "SOLR"]);
        assert_eq!(increments(&output), vec![1, 4]);
        assert_eq!(output[1].position, 4);
    }

    #[test]
    fn test_protected_words() {
        let f = filter(WordDelimiterConfig::default().with_protected_words(["AT&T"]));
        let output = run(&f, tokens(&["AT&T", "R&D"]));
        assert_eq!(texts(&output), vec!["AT&T", "R", "D"]);
        assert!(f.is_protected("AT&T"));
        assert!(!f.is_protected("at&t"));
    }

    #[test]
    fn test_generated_tokens_keep_attributes() {
        let input = vec![
            Token::with_offsets("wi-fi", 0, 0, 5)
                .with_keyword(true)
                .with_token_type(crate::analysis::token::TokenType::Alphanum),
        ];
        let output = run(&WordDelimiterFilter::new(), input);
        assert_eq!(output.len(), 2);
        for token in &output {
            assert!(token.is_keyword());
            assert_eq!(token.token_type, Some(crate::analysis::token::TokenType::Alphanum));
        }
    }

    #[test]
    fn test_reset_with_new_input() {
        let f = WordDelimiterFilter::new();
        let mut stream = f.stream(VecTokenSource::new(tokens(&["wi-fi"])));
        assert_eq!(stream.next_token().unwrap().unwrap().text, "wi");

        // abandon the rest of the first document
        stream.reset_with(VecTokenSource::new(tokens(&["SD500"])));
        let output: Vec<Token> = stream.by_ref().collect::<Result<_>>().unwrap();
        assert_eq!(texts(&output), vec!["SD", "500"]);
        assert_eq!(output[0].position, 0);

        stream.reset().unwrap();
        let again: Vec<Token> = stream.collect::<Result<_>>().unwrap();
        assert_eq!(output, again);
    }

    struct FailingSource {
        remaining: usize,
    }

    impl TokenSource for FailingSource {
        fn next_token(&mut self) -> Result<Option<Token>> {
            if self.remaining == 0 {
                return Err(WordsplitError::analysis("upstream failure"));
            }
            self.remaining -= 1;
            Ok(Some(Token::with_offsets("wi-fi", 0, 0, 5)))
        }
    }

    #[test]
    fn test_upstream_errors_propagate() {
        let mut stream = WordDelimiterFilter::new().stream(FailingSource { remaining: 1 });
        assert_eq!(stream.next_token().unwrap().unwrap().text, "wi");
        assert_eq!(stream.next_token().unwrap().unwrap().text, "fi");
        let err = stream.next_token().unwrap_err();
        assert!(matches!(err, WordsplitError::Analysis(_)));
    }

    #[test]
    fn test_invalid_type_rule_fails_at_construction() {
        let config = WordDelimiterConfig::default().with_types(["- => HYPHEN"]);
        assert!(matches!(
            WordDelimiterFilter::from_config(&config),
            Err(WordsplitError::Config(_))
        ));
    }

    #[test]
    fn test_filter_trait() {
        let f = WordDelimiterFilter::new();
        assert_eq!(f.name(), "word_delimiter");
        let output: Vec<Token> = f
            .filter(Box::new(tokens(&["SD500"]).into_iter()))
            .unwrap()
            .collect();
        assert_eq!(texts(&output), vec!["SD", "500"]);
    }
}
