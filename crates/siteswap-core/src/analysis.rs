use serde::{Deserialize, Serialize};

/// Placeholder reported for input that is empty after preprocessing.
pub const EMPTY_PATTERN: &str = "\u{03b5}";

/// Knobs for a single analysis call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyseOptions {
    /// Permit negative values, negative quantities, and crossing zero
    /// throws.
    pub allow_theoretical_patterns: bool,
    /// Upper bound on any hand's inferred state range, checked before
    /// state is allocated.
    pub maximum_length: usize,
}

impl Default for AnalyseOptions {
    fn default() -> Self {
        AnalyseOptions {
            allow_theoretical_patterns: false,
            maximum_length: 100,
        }
    }
}

impl AnalyseOptions {
    pub fn theoretical() -> Self {
        AnalyseOptions {
            allow_theoretical_patterns: true,
            ..AnalyseOptions::default()
        }
    }
}

/// The observable result of one analysis.
///
/// `pattern` is the input after whitespace stripping and lowercasing
/// (or `ε` when that leaves nothing). The remaining fields are present
/// exactly when they are defined: `period` for valid patterns and the
/// zero-period invalid cases, everything else for valid patterns only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub pattern: String,
    pub valid: bool,
    pub period: Option<i64>,
    pub cardinality: Option<i64>,
    pub hands: Option<usize>,
    pub normalised: Option<String>,
    pub ground: Option<bool>,
    pub excited: Option<bool>,
}

impl Analysis {
    /// The distinguished result for empty input.
    pub fn empty() -> Self {
        Analysis {
            pattern: EMPTY_PATTERN.to_string(),
            valid: false,
            period: Some(0),
            cardinality: None,
            hands: None,
            normalised: None,
            ground: None,
            excited: None,
        }
    }

    /// Well-formed but with a period of zero beats.
    pub fn zero_period(pattern: String, hands: Option<usize>) -> Self {
        Analysis {
            pattern,
            valid: false,
            period: Some(0),
            cardinality: None,
            hands,
            normalised: None,
            ground: None,
            excited: None,
        }
    }

    /// Well-formed but not a juggling pattern (fractional cardinality
    /// or an inconsistent state system).
    pub fn invalid(pattern: String, hands: Option<usize>) -> Self {
        Analysis {
            pattern,
            valid: false,
            period: None,
            cardinality: None,
            hands,
            normalised: None,
            ground: None,
            excited: None,
        }
    }

    pub fn valid(
        pattern: String,
        period: i64,
        cardinality: i64,
        hands: Option<usize>,
        normalised: String,
        ground: bool,
    ) -> Self {
        Analysis {
            pattern,
            valid: true,
            period: Some(period),
            cardinality: Some(cardinality),
            hands,
            normalised: Some(normalised),
            ground: Some(ground),
            excited: Some(!ground),
        }
    }
}
