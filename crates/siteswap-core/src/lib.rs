//! Core types and state solver for siteswap juggling patterns
//!
//! This crate provides the semantic model behind the siteswap notation:
//! events, actions, groups and patterns with signed repetition
//! quantities, the normaliser that reduces a pattern to minimal-period
//! form, and the linear state solver that decides whether a pattern
//! actually juggles.
//!
//! The notation itself (lexing, parsing, canonical re-serialisation and
//! the `analyse` entry point) lives in the `siteswap-notation` crate.
//!
//! # Main Components
//!
//! - **Pattern**: groups of per-hand actions with repetition quantities
//! - **HandState**: per-hand beat window with delta and state arrays
//! - **solve**: periodicity proof over the inferred beat ranges
//! - **Analysis**: the observable result of one analysis call

pub mod analysis;
pub mod error;
pub mod ground;
pub mod pattern;
pub mod solver;
pub mod state;
pub mod value;

pub use analysis::{Analysis, AnalyseOptions, EMPTY_PATTERN};
pub use error::{Result, SiteswapError};
pub use ground::is_ground;
pub use pattern::{Action, Event, Group, Pattern};
pub use solver::{solve, Solution};
pub use state::HandState;
pub use value::{alphabet_value, render_integer, BASE, LETTER_CEILING};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_round_trips_through_serde() {
        let pattern = Pattern::new(vec![Group::bare(
            Action::new(vec![Event::new(3, 0, 1)]),
            1,
        )]);
        let json = serde_json::to_string(&pattern).unwrap();
        let back: Pattern = serde_json::from_str(&json).unwrap();
        assert_eq!(pattern, back);
    }
}
