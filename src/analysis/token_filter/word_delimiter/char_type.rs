//! Character classification for subword boundary detection.
//!
//! Every character is mapped to a small bit set. Boundaries are found by
//! comparing the sets of neighbouring characters, so composite values such as
//! [`CharType::ALPHA`] mean "any of these".

use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use unicode_general_category::{GeneralCategory, get_general_category};

use crate::error::{Result, WordsplitError};

/// Number of code points covered by the precomputed default table.
pub const DEFAULT_TABLE_SIZE: usize = 256;

/// Bit set describing the class of a single character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CharType(u8);

impl CharType {
    /// No bits set. Only used as the "previous type" before a scan starts.
    pub const NONE: CharType = CharType(0x00);
    pub const LOWER: CharType = CharType(0x01);
    pub const UPPER: CharType = CharType(0x02);
    pub const DIGIT: CharType = CharType(0x04);
    pub const SUBWORD_DELIM: CharType = CharType(0x08);

    /// `LOWER | UPPER`: a letter of either (or no) case.
    pub const ALPHA: CharType = CharType(0x03);
    /// `ALPHA | DIGIT`
    pub const ALPHANUM: CharType = CharType(0x07);

    /// Raw bit value.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// True if the two sets share at least one bit.
    pub const fn intersects(self, other: CharType) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_alpha(self) -> bool {
        self.intersects(CharType::ALPHA)
    }

    pub const fn is_digit(self) -> bool {
        self.intersects(CharType::DIGIT)
    }

    pub const fn is_upper(self) -> bool {
        self.intersects(CharType::UPPER)
    }

    pub const fn is_subword_delim(self) -> bool {
        self.intersects(CharType::SUBWORD_DELIM)
    }
}

impl BitOr for CharType {
    type Output = CharType;

    fn bitor(self, rhs: CharType) -> CharType {
        CharType(self.0 | rhs.0)
    }
}

impl FromStr for CharType {
    type Err = WordsplitError;

    /// Parse a symbolic type name as used in type table rules.
    fn from_str(name: &str) -> Result<Self> {
        match name.trim() {
            "LOWER" => Ok(CharType::LOWER),
            "UPPER" => Ok(CharType::UPPER),
            "ALPHA" => Ok(CharType::ALPHA),
            "DIGIT" => Ok(CharType::DIGIT),
            "ALPHANUM" | "ALPHANUMERIC" => Ok(CharType::ALPHANUM),
            "SUBWORD_DELIM" | "DELIMITER" => Ok(CharType::SUBWORD_DELIM),
            other => Err(WordsplitError::config(format!(
                "unknown character type '{other}'"
            ))),
        }
    }
}

impl fmt::Display for CharType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            CharType::NONE => "NONE",
            CharType::LOWER => "LOWER",
            CharType::UPPER => "UPPER",
            CharType::ALPHA => "ALPHA",
            CharType::DIGIT => "DIGIT",
            CharType::ALPHANUM => "ALPHANUM",
            CharType::SUBWORD_DELIM => "SUBWORD_DELIM",
            CharType(bits) => return write!(f, "0x{bits:02x}"),
        };
        f.write_str(name)
    }
}

/// Classify a character by its Unicode general category.
///
/// Lowercase and uppercase letters keep their case bit, numbers of any kind
/// are digits, other letters and combining marks are [`CharType::ALPHA`],
/// everything else is a delimiter.
pub fn classify_char(c: char) -> CharType {
    match get_general_category(c) {
        GeneralCategory::LowercaseLetter => CharType::LOWER,
        GeneralCategory::UppercaseLetter => CharType::UPPER,

        GeneralCategory::DecimalNumber
        | GeneralCategory::LetterNumber
        | GeneralCategory::OtherNumber => CharType::DIGIT,

        GeneralCategory::TitlecaseLetter
        | GeneralCategory::ModifierLetter
        | GeneralCategory::OtherLetter
        | GeneralCategory::NonspacingMark
        | GeneralCategory::SpacingMark
        | GeneralCategory::EnclosingMark => CharType::ALPHA,

        _ => CharType::SUBWORD_DELIM,
    }
}

/// Classify a raw code point.
///
/// Surrogate code points cannot form a `char`; they are reported as
/// `ALPHA | DIGIT` so they never act as a hard delimiter.
pub fn classify_code_point(code_point: u32) -> CharType {
    match char::from_u32(code_point) {
        Some(c) => classify_char(c),
        None if (0xD800..=0xDFFF).contains(&code_point) => CharType::ALPHA | CharType::DIGIT,
        None => CharType::SUBWORD_DELIM,
    }
}

static DEFAULT_TABLE: LazyLock<Arc<CharTypeTable>> = LazyLock::new(|| {
    let types = (0..DEFAULT_TABLE_SIZE as u32)
        .map(classify_code_point)
        .collect();
    Arc::new(CharTypeTable { types })
});

/// Lookup table from code point to [`CharType`].
///
/// Code points at or beyond the table length fall back to
/// [`classify_char`]. Tables are immutable once built and are shared between
/// filter instances through an `Arc`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharTypeTable {
    types: Box<[CharType]>,
}

impl CharTypeTable {
    /// The shared default table covering the first 256 code points.
    pub fn default_table() -> Arc<CharTypeTable> {
        Arc::clone(&DEFAULT_TABLE)
    }

    /// Build a table from explicit entries indexed by code point.
    ///
    /// The table must cover at least the default range.
    pub fn from_types(types: Vec<CharType>) -> Result<Self> {
        if types.len() < DEFAULT_TABLE_SIZE {
            return Err(WordsplitError::config(format!(
                "character type table must have at least {DEFAULT_TABLE_SIZE} entries, got {}",
                types.len()
            )));
        }
        Ok(CharTypeTable {
            types: types.into_boxed_slice(),
        })
    }

    /// Start a table from the defaults, overriding the given characters.
    pub fn with_overrides<I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (char, CharType)>,
    {
        let overrides: Vec<(char, CharType)> = overrides.into_iter().collect();
        let size = overrides
            .iter()
            .map(|(c, _)| *c as usize + 1)
            .max()
            .unwrap_or(0)
            .max(DEFAULT_TABLE_SIZE);

        let mut types = DEFAULT_TABLE.types.to_vec();
        types.extend((DEFAULT_TABLE_SIZE as u32..size as u32).map(classify_code_point));
        for (c, char_type) in overrides {
            types[c as usize] = char_type;
        }

        CharTypeTable {
            types: types.into_boxed_slice(),
        }
    }

    /// Number of code points covered by the table.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Tables are never empty; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Classify a character.
    #[inline]
    pub fn classify(&self, c: char) -> CharType {
        self.types
            .get(c as usize)
            .copied()
            .unwrap_or_else(|| classify_char(c))
    }
}

impl Default for CharTypeTable {
    fn default() -> Self {
        DEFAULT_TABLE.as_ref().clone()
    }
}
