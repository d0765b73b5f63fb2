//! # wordsplit
//!
//! Splits compound tokens such as `"PowerShot"`, `"Wi-Fi"` or `"SD500"` into
//! subwords, optionally re-joins runs of them, and keeps positions and offsets
//! consistent for downstream indexing.
//!
//! ## Features
//!
//! - Case change, letter/digit and delimiter splitting
//! - English possessive stripping
//! - Word, number and mixed concatenation
//! - Protected words and custom character type tables
//! - Pull-based streaming over any token source

pub mod analysis;
pub mod cli;
pub mod error;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
