//! Command implementations for the wordsplit CLI.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;

use anyhow::Context;
use log::{debug, info};

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::token::Token;
use crate::analysis::token_filter::word_delimiter::type_table::parse_rules;
use crate::analysis::token_filter::{WordDelimiterConfig, WordDelimiterFilter};
use crate::analysis::tokenizer::WhitespaceTokenizer;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{Result, WordsplitError};

/// Execute a CLI command.
pub fn execute_command(args: WordsplitArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &args.command {
        Command::Split(split_args) => split_text(split_args, &args, &mut out),
        Command::CheckTypes(check_args) => check_types(check_args, &args, &mut out),
    }
}

/// Split text read from the argument or stdin.
fn split_text<W: io::Write>(args: &SplitArgs, cli_args: &WordsplitArgs, out: &mut W) -> Result<()> {
    let config = load_config(args)?;
    let text = match &args.text {
        Some(text) => text.clone(),
        None if io::stdin().is_terminal() => {
            return Err(WordsplitError::invalid_argument(
                "no TEXT given and stdin is a terminal",
            ));
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read text from stdin")?;
            buffer
        }
    };

    let tokens = analyze(&config, &text)?;
    info!("{} token(s) produced", tokens.len());

    let result = SplitResult {
        input: text,
        tokens: tokens.iter().map(TokenOutput::from).collect(),
    };
    output_result(out, &result, cli_args, write_split_human)
}

/// Validate a type rule file and list the rules it contains.
fn check_types<W: io::Write>(
    args: &CheckTypesArgs,
    cli_args: &WordsplitArgs,
    out: &mut W,
) -> Result<()> {
    let lines = read_lines(&args.types_file)?;
    let rules = parse_rules(&lines)?;

    let result = TypeCheckResult {
        path: args.types_file.display().to_string(),
        rules: rules
            .into_iter()
            .map(|(character, char_type)| TypeRuleOutput {
                character,
                code_point: format!("U+{:04X}", character as u32),
                char_type: char_type.to_string(),
            })
            .collect(),
    };
    output_result(out, &result, cli_args, write_type_check_human)
}

/// Run whitespace tokenization followed by the word delimiter filter.
pub fn analyze(config: &WordDelimiterConfig, text: &str) -> Result<Vec<Token>> {
    let filter = WordDelimiterFilter::from_config(config)?;
    let analyzer = PipelineAnalyzer::new(std::sync::Arc::new(WhitespaceTokenizer::new()))
        .add_filter(std::sync::Arc::new(filter));
    Ok(analyzer.analyze(text)?.collect())
}

/// Build the filter configuration: the config file first, then explicit
/// flags, then the protected word and type rule files.
pub fn load_config(args: &SplitArgs) -> Result<WordDelimiterConfig> {
    let base = match &args.config {
        Some(path) => {
            debug!("Loading configuration from: {}", path.display());
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            serde_json::from_str(&content)?
        }
        None => WordDelimiterConfig::default(),
    };

    let mut config = args.apply_to(base);

    if let Some(path) = &args.protected {
        debug!("Loading protected words from: {}", path.display());
        config.protected_words = Some(read_lines(path)?);
    }
    if let Some(path) = &args.types {
        debug!("Loading type rules from: {}", path.display());
        config.types = Some(read_lines(path)?);
    }

    Ok(config)
}

/// Read a word list: one entry per line, blank lines and `#` comments skipped.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
