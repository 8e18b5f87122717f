use std::fmt;

use thiserror::Error;

/// The ceiling that was active when a value overflowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ceiling {
    /// Significant decimal digits (exact fractions).
    Digits(u32),
    /// Absolute base-10 exponent (scientific values).
    Magnitude(i32),
}

impl fmt::Display for Ceiling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ceiling::Digits(n) => write!(f, "max number of digits (currently set to {n}) exceeded"),
            Ceiling::Magnitude(n) => write!(f, "value limit exceeded (currently set to 10 ^ {n})"),
        }
    }
}

/// Everything that can stop a calculation.
///
/// Positions are zero-based character columns into the expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("expression is empty")]
    EmptyExpression,

    #[error("invalid character '{character}' found at column {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("unmatched open parenthesis found")]
    UnmatchedOpenParen { position: usize },

    #[error("closed parenthesis with no open match found at column {position}")]
    UnmatchedCloseParen { position: usize },

    #[error("empty parentheses found at column {position}")]
    EmptyParentheses { position: usize },

    #[error("leading operator found at column {position}")]
    LeadingOperator { position: usize },

    #[error("trailing operator without a right operand")]
    TrailingOperator { position: usize },

    #[error("invalid unary * or / found at column {position}")]
    InvalidUnaryMulDiv { position: usize },

    #[error("invalid adjacent operators found at column {position}")]
    AdjacentOperators { position: usize },

    #[error("unexpected token at column {position}")]
    UnexpectedToken { position: usize },

    #[error("division by zero detected during parsing")]
    DivisionByZeroLiteral { position: usize },

    #[error("division by zero detected during evaluation")]
    DivisionByZero,

    #[error("{0}")]
    Overflow(Ceiling),
}

impl EvalError {
    /// Column of the offending character, when the error comes from the input text.
    pub fn position(&self) -> Option<usize> {
        match self {
            EvalError::InvalidCharacter { position, .. }
            | EvalError::UnmatchedOpenParen { position }
            | EvalError::UnmatchedCloseParen { position }
            | EvalError::EmptyParentheses { position }
            | EvalError::LeadingOperator { position }
            | EvalError::TrailingOperator { position }
            | EvalError::InvalidUnaryMulDiv { position }
            | EvalError::AdjacentOperators { position }
            | EvalError::UnexpectedToken { position }
            | EvalError::DivisionByZeroLiteral { position } => Some(*position),
            EvalError::EmptyExpression | EvalError::DivisionByZero | EvalError::Overflow(_) => None,
        }
    }

    pub fn is_division_by_zero(&self) -> bool {
        matches!(self, EvalError::DivisionByZero | EvalError::DivisionByZeroLiteral { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_message_names_the_bound() {
        let err = EvalError::Overflow(Ceiling::Digits(15));
        assert_eq!(err.to_string(), "max number of digits (currently set to 15) exceeded");

        let err = EvalError::Overflow(Ceiling::Magnitude(300));
        assert_eq!(err.to_string(), "value limit exceeded (currently set to 10 ^ 300)");
    }

    #[test]
    fn positions_only_for_text_errors() {
        assert_eq!(EvalError::LeadingOperator { position: 3 }.position(), Some(3));
        assert_eq!(EvalError::DivisionByZero.position(), None);
        assert!(EvalError::DivisionByZeroLiteral { position: 1 }.is_division_by_zero());
        assert!(!EvalError::EmptyExpression.is_division_by_zero());
    }
}
