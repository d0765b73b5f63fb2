//! Configuration for the word delimiter filter.
//!
//! # Examples
//!
//! ```
//! use wordsplit::analysis::token_filter::word_delimiter::WordDelimiterConfig;
//!
//! let config = WordDelimiterConfig::default()
//!     .with_catenate_words(true)
//!     .with_protected_words(["C++", "AT&T"]);
//! assert!(config.generate_word_parts);
//! assert!(config.catenate_words);
//!
//! // JSON configuration; missing fields take their defaults
//! let config: WordDelimiterConfig =
//!     serde_json::from_str(r#"{ "preserve_original": true, "types": ["- => ALPHA"] }"#).unwrap();
//! assert!(config.preserve_original);
//! assert!(config.split_on_case_change);
//! ```

use serde::{Deserialize, Serialize};

/// Options controlling how tokens are split and re-joined.
///
/// | option | effect | default |
/// |---|---|---|
/// | `generate_word_parts` | `"PowerShot"` -> `"Power" "Shot"` | on |
/// | `generate_number_parts` | `"500-42"` -> `"500" "42"` | on |
/// | `catenate_words` | `"wi-fi"` -> `"wifi"` | off |
/// | `catenate_numbers` | `"500-42"` -> `"50042"` | off |
/// | `catenate_all` | `"wi-fi-4000"` -> `"wifi4000"` | off |
/// | `preserve_original` | also emit `"500-42"` itself | off |
/// | `split_on_case_change` | break on lower -> upper | on |
/// | `split_on_numerics` | break on letter <-> digit | on |
/// | `stem_english_possessive` | drop trailing `'s` | on |
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordDelimiterConfig {
    pub generate_word_parts: bool,
    pub generate_number_parts: bool,
    pub catenate_words: bool,
    pub catenate_numbers: bool,
    pub catenate_all: bool,
    pub preserve_original: bool,
    pub split_on_case_change: bool,
    pub split_on_numerics: bool,
    pub stem_english_possessive: bool,

    /// Tokens that are passed through without being split.
    pub protected_words: Option<Vec<String>>,

    /// Character type overrides as `char => TYPE` rules.
    pub types: Option<Vec<String>>,
}

impl Default for WordDelimiterConfig {
    fn default() -> Self {
        WordDelimiterConfig {
            generate_word_parts: true,
            generate_number_parts: true,
            catenate_words: false,
            catenate_numbers: false,
            catenate_all: false,
            preserve_original: false,
            split_on_case_change: true,
            split_on_numerics: true,
            stem_english_possessive: true,
            protected_words: None,
            types: None,
        }
    }
}

impl WordDelimiterConfig {
    /// A configuration with every flag turned off.
    pub fn none() -> Self {
        WordDelimiterConfig {
            generate_word_parts: false,
            generate_number_parts: false,
            split_on_case_change: false,
            split_on_numerics: false,
            stem_english_possessive: false,
            ..Self::default()
        }
    }

    pub fn with_generate_word_parts(mut self, value: bool) -> Self {
        self.generate_word_parts = value;
        self
    }

    pub fn with_generate_number_parts(mut self, value: bool) -> Self {
        self.generate_number_parts = value;
        self
    }

    pub fn with_catenate_words(mut self, value: bool) -> Self {
        self.catenate_words = value;
        self
    }

    pub fn with_catenate_numbers(mut self, value: bool) -> Self {
        self.catenate_numbers = value;
        self
    }

    pub fn with_catenate_all(mut self, value: bool) -> Self {
        self.catenate_all = value;
        self
    }

    pub fn with_preserve_original(mut self, value: bool) -> Self {
        self.preserve_original = value;
        self
    }

    pub fn with_split_on_case_change(mut self, value: bool) -> Self {
        self.split_on_case_change = value;
        self
    }

    pub fn with_split_on_numerics(mut self, value: bool) -> Self {
        self.split_on_numerics = value;
        self
    }

    pub fn with_stem_english_possessive(mut self, value: bool) -> Self {
        self.stem_english_possessive = value;
        self
    }

    /// Set the protected words.
    pub fn with_protected_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.protected_words = Some(words.into_iter().map(Into::into).collect());
        self
    }

    /// Set the character type rules (`char => TYPE`).
    pub fn with_types<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = Some(rules.into_iter().map(Into::into).collect());
        self
    }
}

/// The boolean part of [`WordDelimiterConfig`], copied into every stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Flags {
    pub generate_word_parts: bool,
    pub generate_number_parts: bool,
    pub catenate_words: bool,
    pub catenate_numbers: bool,
    pub catenate_all: bool,
    pub preserve_original: bool,
    pub split_on_case_change: bool,
    pub split_on_numerics: bool,
    pub stem_english_possessive: bool,
}

impl From<&WordDelimiterConfig> for Flags {
    fn from(config: &WordDelimiterConfig) -> Self {
        Flags {
            generate_word_parts: config.generate_word_parts,
            generate_number_parts: config.generate_number_parts,
            catenate_words: config.catenate_words,
            catenate_numbers: config.catenate_numbers,
            catenate_all: config.catenate_all,
            preserve_original: config.preserve_original,
            split_on_case_change: config.split_on_case_change,
            split_on_numerics: config.split_on_numerics,
            stem_english_possessive: config.stem_english_possessive,
        }
    }
}
