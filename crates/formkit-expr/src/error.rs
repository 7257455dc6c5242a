//! Error types for formula parsing and evaluation.

/// Formula parse errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The input does not match the grammar
    #[error("syntax error near {0:?}")]
    Syntax(String),

    /// The grammar matched a prefix but input remained
    #[error("unexpected trailing input {0:?}")]
    TrailingInput(String),

    /// The formula is empty or whitespace-only
    #[error("formula is empty")]
    Empty,

    /// Nesting exceeds the supported depth
    #[error("formula is nested too deeply")]
    TooDeep,
}

/// Formula evaluation errors.
///
/// These are caught per derived field per pass; a failing formula leaves the
/// field's previous value in place.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    /// Identifier not bound in the parent scope
    #[error("unknown identifier {0:?}")]
    UnknownIdentifier(String),

    /// Function name not in the builtin set
    #[error("unknown function {0:?}")]
    UnknownFunction(String),

    /// Wrong number of arguments
    #[error("{function} expects {expected} argument(s), got {got}")]
    Arity {
        /// Function name
        function: String,
        /// Expected argument count
        expected: usize,
        /// Actual argument count
        got: usize,
    },

    /// Operand kinds do not fit the operator
    #[error("operator {op} cannot be applied to these operands")]
    TypeMismatch {
        /// Operator spelling
        op: String,
    },

    /// Text that does not parse as a number where one was required
    #[error("{0:?} is not a number")]
    NotANumber(String),

    /// Division or remainder by zero
    #[error("division by zero")]
    DivisionByZero,
}
