//! Tag-sequence evaluation.
//!
//! A tag sequence is rendered into a space-joined arithmetic expression
//! ([`expression`]), tokenized and parsed by `formtag-parse`, and walked by
//! the [`Interpreter`] against an [`Environment`] of named constants.
//! [`FormulaEvaluator`] ties the steps together and never lets a failure
//! escape as anything but [`FormulaValue::Error`].

pub mod environment;
pub mod evaluator;
pub mod expression;
pub mod interpreter;

pub use environment::{Environment, FixedEnvironment, STANDARD_VARIABLES};
pub use evaluator::FormulaEvaluator;
pub use expression::{build_expression, eval_text};
pub use interpreter::Interpreter;

pub use formtag_common::{ERROR_MARKER, FormulaError, FormulaValue};
