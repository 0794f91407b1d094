use thiserror::Error;

/// Errors raised while evaluating values, conditions and effects.
///
/// These indicate a malformed declarative model (wrong operand types, unknown operator tags)
/// rather than a runtime condition worth retrying. The planner never swallows them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GoapError {
    #[error("unsupported comparison: {0}")]
    UnsupportedComparison(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("type mismatch: cannot apply {op} to {lhs} and {rhs}")]
    TypeMismatch {
        op: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },

    #[error("values have no ordering: {lhs} and {rhs}")]
    Unordered {
        lhs: &'static str,
        rhs: &'static str,
    },

    #[error("distance requires numeric values, got {0}")]
    NotNumeric(&'static str),

    #[error("division by zero")]
    DivisionByZero,

    #[error("arithmetic overflow in {op}")]
    Overflow { op: &'static str },
}

pub type Result<T> = std::result::Result<T, GoapError>;
