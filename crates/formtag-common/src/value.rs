use std::fmt::{self, Display};

use crate::FormulaError;

/// The literal shown in place of a result when evaluation fails.
pub const ERROR_MARKER: &str = "Error";

/// Outcome of evaluating a tag sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaValue {
    Number(f64),
    Error(FormulaError),
}

impl FormulaValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FormulaValue::Number(n) => Some(*n),
            FormulaValue::Error(_) => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FormulaValue::Error(_))
    }

    pub fn error(&self) -> Option<&FormulaError> {
        match self {
            FormulaValue::Error(e) => Some(e),
            FormulaValue::Number(_) => None,
        }
    }
}

impl Display for FormulaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Negative zero prints as plain 0.
            FormulaValue::Number(n) if *n == 0.0 => f.write_str("0"),
            FormulaValue::Number(n) => write!(f, "{n}"),
            // The cause is for logs; users only ever see the marker.
            FormulaValue::Error(_) => f.write_str(ERROR_MARKER),
        }
    }
}

impl From<Result<f64, FormulaError>> for FormulaValue {
    fn from(result: Result<f64, FormulaError>) -> Self {
        match result {
            Ok(n) => FormulaValue::Number(n),
            Err(e) => FormulaValue::Error(e),
        }
    }
}

impl From<FormulaError> for FormulaValue {
    fn from(error: FormulaError) -> Self {
        FormulaValue::Error(error)
    }
}
