//! Formula error types

use thiserror::Error;

/// Result type for operations that may fail either while parsing or while evaluating
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Syntax errors raised while constructing a [`Formula`](crate::Formula)
///
/// `position` fields are zero-based token indices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// No tokens (empty, blank or absent input)
    #[error("Nothing to calculate")]
    Empty,

    /// The formula starts with something other than a number, variable or '('
    #[error("Only numbers, variables, or a left parenthesis are allowed as the first token, found '{token}'")]
    InvalidFirstToken { token: String },

    /// The formula ends with something other than a number, variable or ')'
    #[error("Only numbers, variables, or a right parenthesis are allowed as the last token, found '{token}'")]
    InvalidLastToken { token: String },

    /// A run of characters that is not a token
    #[error("Invalid character in the expression: '{token}' at token {position}")]
    InvalidCharacter { token: String, position: usize },

    /// Two tokens that may not follow each other
    #[error("Invalid sequence: '{current}' cannot follow '{previous}' (token {position})")]
    InvalidSequence {
        previous: String,
        current: String,
        position: usize,
    },

    /// A ')' with no open '(' to close
    #[error("Missing left parenthesis for ')' at token {position}")]
    MissingLeftParenthesis { position: usize },

    /// Different numbers of '(' and ')'
    #[error("Missing parenthesis: {open} '(' but {close} ')'")]
    UnbalancedParentheses { open: usize, close: usize },

    /// A numeric literal that could not be converted to a number
    #[error("Invalid number: '{literal}'")]
    InvalidNumber { literal: String },
}

/// Errors raised while evaluating a valid [`Formula`](crate::Formula)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// The lookup could not resolve a variable
    #[error("Undefined variable: {0}")]
    UndefinedVariable(String),

    /// Division by an operand that is exactly zero
    #[error("Division by zero")]
    DivisionByZero,

    /// The token sequence broke the evaluator's stack discipline.
    ///
    /// Never produced for a formula built through validation.
    #[error("Malformed formula: {0}")]
    Malformed(&'static str),
}

/// Failure of a [`Lookup`](crate::Lookup) to resolve a variable name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Undefined variable: {0}")]
pub struct UndefinedVariable(pub String);

impl UndefinedVariable {
    /// Create a new error for the given variable name
    pub fn new<S: Into<String>>(name: S) -> Self {
        UndefinedVariable(name.into())
    }

    /// The variable that could not be resolved
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<UndefinedVariable> for EvaluationError {
    fn from(err: UndefinedVariable) -> Self {
        EvaluationError::UndefinedVariable(err.0)
    }
}

/// Any error produced by parsing or evaluating a formula
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// Formula format (syntax) error
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Formula evaluation error
    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),
}

impl From<UndefinedVariable> for FormulaError {
    fn from(err: UndefinedVariable) -> Self {
        FormulaError::Evaluation(err.into())
    }
}
