/// Analysis errors
///
/// These cover inputs that are not siteswap expressions at all, or that
/// break a structural rule of the notation. A well-formed pattern that
/// simply fails to juggle is not an error; it comes back as an
/// [`Analysis`](crate::Analysis) with `valid: false`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SiteswapError {
    #[error("'{pattern}' is not siteswap notation: {detail}")]
    SyntacticallyInvalid { pattern: String, detail: String },

    #[error("'{pattern}' is a theoretical pattern; enable allow_theoretical_patterns to analyse it")]
    TheoreticalDisallowed { pattern: String },

    #[error("'{pattern}' mixes synchronous tuples of {expected} and {found} throws")]
    InconsistentHandCount {
        pattern: String,
        expected: usize,
        found: usize,
    },

    #[error("'{pattern}' crosses {offset} hands over but only {hands} hand(s) are in play")]
    OffsetExceedsHands {
        pattern: String,
        offset: usize,
        hands: usize,
    },

    #[error("'{pattern}' suppresses {suppression} beats of a {actions}-throw tuple")]
    InvalidSuppression {
        pattern: String,
        suppression: usize,
        actions: usize,
    },

    #[error("'{pattern}' needs {span} beats of state, more than the configured maximum of {maximum}")]
    StateRangeTooLarge {
        pattern: String,
        span: usize,
        maximum: usize,
    },
}

impl SiteswapError {
    /// The pattern string the error was raised for.
    pub fn pattern(&self) -> &str {
        match self {
            SiteswapError::SyntacticallyInvalid { pattern, .. }
            | SiteswapError::TheoreticalDisallowed { pattern }
            | SiteswapError::InconsistentHandCount { pattern, .. }
            | SiteswapError::OffsetExceedsHands { pattern, .. }
            | SiteswapError::InvalidSuppression { pattern, .. }
            | SiteswapError::StateRangeTooLarge { pattern, .. } => pattern,
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteswapError>;
