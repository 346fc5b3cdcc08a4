//! Siteswap notation parser and validity analyser
//!
//! This crate parses siteswap, the compact notation for juggling
//! patterns, decides whether a pattern actually juggles, and reports
//! its invariants: period, cardinality, hand count, ground/excited
//! state, and a canonical minimal-period form.
//!
//! # Examples
//!
//! ```
//! use siteswap_notation::{analyse, AnalyseOptions};
//!
//! let result = analyse("744", &AnalyseOptions::default()).unwrap();
//! assert!(result.valid);
//! assert_eq!(result.period, Some(3));
//! assert_eq!(result.cardinality, Some(5));
//! ```
//!
//! # Notation
//!
//! - Throw values: `0`-`9`, `a`-`o` (10-24), braced decimals `{30}`
//! - Multiplexes: `[43]` (one hand, simultaneous throws)
//! - Synchronous tuples: `(4,4)` (all hands, one beat each)
//! - Crossing: `4x` sends the prop one hand over
//! - Suppression: `(4,4)!` collapses the tuple's trailing beat
//! - Quantities: `4^6` repeats, `5^-1` is the inverse operation
//! - Theoretical mode admits negative values and quantities
//!
//! # Main Functions
//!
//! - [`analyse`]: full pipeline from text to an [`Analysis`]
//! - [`parse`]: parse preprocessed text into the semantic model
//! - [`format()`]: render a normalised pattern back to notation

pub mod analyzer;
pub mod error;
pub mod formatter;
pub mod lexer;
pub mod parser;
pub mod span;


pub use analyzer::{analyse, preprocess};
pub use error::ParseError;
pub use formatter::format;
pub use lexer::{Lexer, Token};
pub use parser::{parse, Parser};
pub use span::Span;

/// Re-export the semantic model and result types from siteswap-core
pub use siteswap_core::{
    Action, Analysis, AnalyseOptions, Event, Group, HandState, Pattern, Result, SiteswapError,
};
