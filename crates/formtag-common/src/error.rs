//! Evaluation failures.
//!
//! Every way a formula can fail to produce a number maps to one
//! [`FormulaError`] variant. The evaluator folds these into
//! [`FormulaValue::Error`](crate::FormulaValue::Error) at its boundary, so
//! callers only ever see the literal error marker unless they ask for the
//! underlying cause.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// The tag sequence was empty; there is nothing to evaluate.
    #[error("formula is empty")]
    EmptyFormula,

    /// The assembled expression contains a character the arithmetic
    /// tokenizer does not accept (free text, stray punctuation, ...).
    #[error("cannot tokenize expression at byte {pos}: {message}")]
    Tokenize { message: String, pos: usize },

    /// The token stream does not form a well-formed expression.
    #[error("malformed expression: {message}")]
    Parse {
        message: String,
        position: Option<usize>,
    },

    /// An identifier that the environment does not define.
    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    /// Division by zero, overflow, or any other NaN/infinite intermediate.
    #[error("result is not a finite number")]
    NonFinite,
}

impl FormulaError {
    pub fn parse<S: Into<String>>(message: S, position: Option<usize>) -> Self {
        FormulaError::Parse {
            message: message.into(),
            position,
        }
    }
}
