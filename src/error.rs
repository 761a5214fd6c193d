//! Construction-time errors.
//!
//! A pattern that does not match returns `None` from
//! [`Pattern::match_at`](crate::Pattern::match_at); these errors are only
//! produced while a pattern tree is being built.

use thiserror::Error;

/// A pattern could not be built from the arguments it was given.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Bounded repetition with a lower bound above the upper bound.
    #[error("invalid repetition bounds: min {min} exceeds max {max}")]
    MinExceedsMax { min: usize, max: usize },
    /// The host regular-expression engine rejected the expression.
    #[error("invalid regular expression: {0}")]
    HostRegex(String),
    /// The expression given to [`compile`](crate::patterns::compile) is malformed.
    #[error("syntax error at character {position}: {error}")]
    Syntax { position: usize, error: SyntaxError },
}

/// Errors that can occur while parsing a regular-expression string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("invalid number")]
    InvalidNumber,
    #[error("unclosed group '('")]
    UnclosedGroup,
    #[error("unclosed character class '['")]
    UnclosedClass,
    #[error("invalid quantifier range {{n,m}}")]
    InvalidQuantifierRange,
    #[error("quantifier has nothing to repeat")]
    NothingToRepeat,
    #[error("groups nested deeper than {0}")]
    NestingTooDeep(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_their_arguments() {
        let err = ConfigError::MinExceedsMax { min: 4, max: 2 };
        assert_eq!(
            err.to_string(),
            "invalid repetition bounds: min 4 exceeds max 2"
        );

        let err = ConfigError::Syntax {
            position: 3,
            error: SyntaxError::UnclosedGroup,
        };
        assert_eq!(err.to_string(), "syntax error at character 3: unclosed group '('");
    }

    #[test]
    fn quantifier_range_message_renders_braces() {
        assert_eq!(
            SyntaxError::InvalidQuantifierRange.to_string(),
            "invalid quantifier range {n,m}"
        );
    }
}
