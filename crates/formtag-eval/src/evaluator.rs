use std::fmt;

use formtag_common::{FormulaError, FormulaValue, Tag};
use formtag_parse::{Parser, Tokenizer};

use crate::environment::{Environment, FixedEnvironment};
use crate::expression::build_expression;
use crate::interpreter::Interpreter;

/// Evaluates tag sequences against an environment.
///
/// [`evaluate`](Self::evaluate) is the boundary: whatever goes wrong inside,
/// the caller gets a [`FormulaValue`], never a panic or a propagated error.
pub struct FormulaEvaluator {
    environment: Box<dyn Environment>,
}

impl Default for FormulaEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FormulaEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormulaEvaluator").finish_non_exhaustive()
    }
}

impl FormulaEvaluator {
    /// An evaluator over [`FixedEnvironment::standard`].
    pub fn new() -> Self {
        Self::with_environment(FixedEnvironment::standard())
    }

    pub fn with_environment<E>(environment: E) -> Self
    where
        E: Environment + 'static,
    {
        Self {
            environment: Box::new(environment),
        }
    }

    pub fn environment(&self) -> &dyn Environment {
        self.environment.as_ref()
    }

    pub fn evaluate(&self, tags: &[Tag]) -> FormulaValue {
        match self.try_evaluate(tags) {
            Ok(n) => FormulaValue::Number(n),
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    error = %e,
                    tags = tags.len(),
                    "formula evaluation failed"
                );
                FormulaValue::Error(e)
            }
        }
    }

    /// Like [`evaluate`](Self::evaluate) but keeps the cause.
    pub fn try_evaluate(&self, tags: &[Tag]) -> Result<f64, FormulaError> {
        if tags.is_empty() {
            return Err(FormulaError::EmptyFormula);
        }
        let expression = build_expression(tags);
        #[cfg(feature = "tracing")]
        tracing::debug!(%expression, "evaluating formula");
        self.evaluate_expression(&expression)
    }

    pub fn evaluate_expression(&self, expression: &str) -> Result<f64, FormulaError> {
        let tokens = Tokenizer::new(expression)?.items;
        let ast = Parser::new(tokens).parse()?;
        Interpreter::new(self.environment.as_ref()).evaluate_ast(&ast)
    }
}
