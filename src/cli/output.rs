//! Output formatting for CLI commands.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::cli::args::{OutputFormat, WordsplitArgs};
use crate::error::Result;

/// One token as reported by the split command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenOutput {
    pub text: String,
    pub position: usize,
    pub start_offset: usize,
    pub end_offset: usize,
    pub position_increment: usize,
}

impl From<&Token> for TokenOutput {
    fn from(token: &Token) -> Self {
        TokenOutput {
            text: token.text.clone(),
            position: token.position,
            start_offset: token.start_offset,
            end_offset: token.end_offset,
            position_increment: token.position_increment,
        }
    }
}

/// Result structure for the split command.
#[derive(Debug, Serialize, Deserialize)]
pub struct SplitResult {
    pub input: String,
    pub tokens: Vec<TokenOutput>,
}

/// Result structure for the check-types command.
#[derive(Debug, Serialize, Deserialize)]
pub struct TypeCheckResult {
    pub path: String,
    pub rules: Vec<TypeRuleOutput>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TypeRuleOutput {
    pub character: char,
    pub code_point: String,
    pub char_type: String,
}

/// Output a result in the configured format.
pub fn output_result<T, W, F>(out: &mut W, result: &T, args: &WordsplitArgs, human: F) -> Result<()>
where
    T: Serialize,
    W: Write,
    F: FnOnce(&mut W, &T) -> Result<()>,
{
    match args.output_format {
        OutputFormat::Human => human(out, result),
        OutputFormat::Json => output_json(out, result, args),
    }
}

/// Output as JSON, pretty-printed when requested.
pub fn output_json<T: Serialize, W: Write>(out: &mut W, result: &T, args: &WordsplitArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    writeln!(out, "{json}")?;
    Ok(())
}

/// Human readable token table.
pub fn write_split_human<W: Write>(out: &mut W, result: &SplitResult) -> Result<()> {
    if result.tokens.is_empty() {
        writeln!(out, "No tokens.")?;
        return Ok(());
    }

    writeln!(out, "{:>4}  {:>4}  {:>11}  text", "pos", "inc", "offsets")?;
    for token in &result.tokens {
        let offsets = format!("{}..{}", token.start_offset, token.end_offset);
        writeln!(
            out,
            "{:>4}  {:>4}  {:>11}  {}",
            token.position, token.position_increment, offsets, token.text
        )?;
    }
    Ok(())
}

pub fn write_type_check_human<W: Write>(out: &mut W, result: &TypeCheckResult) -> Result<()> {
    writeln!(out, "{}: {} rule(s) OK", result.path, result.rules.len())?;
    for rule in &result.rules {
        writeln!(out, "  {} ({}) => {}", rule.code_point, rule.character.escape_debug(), rule.char_type)?;
    }
    Ok(())
}
