//! Parsing of character type table rules.
//!
//! A rule assigns a [`CharType`] to one character:
//!
//! ```text
//! # treat hyphens and the ASCII apostrophe as letters
//! - => ALPHA
//! ' => ALPHA
//! ‐ => ALPHA
//! $ => DIGIT
//! ```
//!
//! Rules are validated eagerly; the first malformed rule aborts parsing with a
//! [`WordsplitError::Config`] describing it.

use std::sync::LazyLock;

use regex::Regex;

use super::char_type::{CharType, CharTypeTable};
use crate::error::{Result, WordsplitError};

static RULE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s*=>\s*(.+)$").expect("rule pattern is a valid regex")
});

/// Parse a single `char => TYPE` rule.
pub fn parse_rule(rule: &str) -> Result<(char, CharType)> {
    let rule = rule.trim();
    let captures = RULE_PATTERN
        .captures(rule)
        .ok_or_else(|| WordsplitError::config(format!("invalid mapping rule: '{rule}'")))?;

    let key = parse_key(&captures[1])
        .map_err(|e| WordsplitError::config(format!("invalid mapping rule: '{rule}': {e}")))?;
    let char_type = captures[2].parse::<CharType>().map_err(|_| {
        WordsplitError::config(format!(
            "invalid mapping rule: '{rule}'. Illegal type '{}'",
            captures[2].trim()
        ))
    })?;

    Ok((key, char_type))
}

/// Parse rules, skipping blank lines and `#` comments.
pub fn parse_rules<I, S>(rules: I) -> Result<Vec<(char, CharType)>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    rules
        .into_iter()
        .filter(|line| {
            let line = line.as_ref().trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|line| parse_rule(line.as_ref()))
        .collect()
}

/// Parse rules and build a table from the defaults plus the overrides.
pub fn parse_type_table<I, S>(rules: I) -> Result<CharTypeTable>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let overrides = parse_rules(rules)?;
    Ok(CharTypeTable::with_overrides(overrides))
}

/// Decode a rule key, which must denote exactly one character.
fn parse_key(key: &str) -> std::result::Result<char, String> {
    let mut decoded = String::new();
    let mut chars = key.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        let escaped = chars.next().ok_or("dangling escape")?;
        let value = match escaped {
            '\\' => '\\',
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{0008}',
            'f' => '\u{000C}',
            'u' => {
                let hex: String = chars.by_ref().take(4).collect();
                if hex.len() != 4 {
                    return Err(format!("invalid escape '\\u{hex}'"));
                }
                let code = u32::from_str_radix(&hex, 16)
                    .map_err(|_| format!("invalid escape '\\u{hex}'"))?;
                char::from_u32(code).ok_or_else(|| format!("invalid code point U+{hex}"))?
            }
            other => other,
        };
        decoded.push(value);
    }

    let mut decoded_chars = decoded.chars();
    match (decoded_chars.next(), decoded_chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("key '{key}' must be a single character")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rule() {
        assert_eq!(parse_rule("- => ALPHA").unwrap(), ('-', CharType::ALPHA));
        assert_eq!(parse_rule("$=>DIGIT").unwrap(), ('$', CharType::DIGIT));
        assert_eq!(parse_rule("  % => ALPHANUM ").unwrap(), ('%', CharType::ALPHANUM));
        assert_eq!(parse_rule("a => SUBWORD_DELIM").unwrap(), ('a', CharType::SUBWORD_DELIM));
        assert_eq!(parse_rule("é => UPPER").unwrap(), ('é', CharType::UPPER));
    }

    #[test]
    fn test_parse_escapes() {
        assert_eq!(parse_rule(r"\u0020 => ALPHA").unwrap(), (' ', CharType::ALPHA));
        assert_eq!(parse_rule(r"\t => ALPHA").unwrap(), ('\t', CharType::ALPHA));
        assert_eq!(parse_rule(r"\\ => ALPHA").unwrap(), ('\\', CharType::ALPHA));
        assert_eq!(parse_rule(r"\u2010 => ALPHA").unwrap(), ('\u{2010}', CharType::ALPHA));
    }

    #[test]
    fn test_invalid_rules() {
        assert!(parse_rule("no arrow here").is_err());
        assert!(parse_rule("ab => ALPHA").is_err());
        assert!(parse_rule(r"\uZZZZ => ALPHA").is_err());
        assert!(parse_rule(r"\u12 => ALPHA").is_err());

        let err = parse_rule("x => VOWEL").unwrap_err();
        assert!(matches!(err, WordsplitError::Config(_)));
        assert!(err.to_string().contains("VOWEL"));
    }

    #[test]
    fn test_parse_rules_skips_comments() {
        let rules = parse_rules(["# comment", "", "- => ALPHA", "   ", "$ => DIGIT"]).unwrap();
        assert_eq!(rules, vec![('-', CharType::ALPHA), ('$', CharType::DIGIT)]);

        assert!(parse_rules(["- => ALPHA", "bogus"]).is_err());
    }

    #[test]
    fn test_parse_type_table() {
        let table = parse_type_table(["- => ALPHA"]).unwrap();
        assert_eq!(table.classify('-'), CharType::ALPHA);
        assert_eq!(table.classify('_'), CharType::SUBWORD_DELIM);
    }
}
