use crate::environment::Environment;
use formtag_common::FormulaError;
use formtag_parse::{ASTNode, ASTNodeType};

pub struct Interpreter<'a> {
    pub environment: &'a dyn Environment,
}

impl<'a> Interpreter<'a> {
    pub fn new(environment: &'a dyn Environment) -> Self {
        Self { environment }
    }

    pub fn evaluate_ast(&self, node: &ASTNode) -> Result<f64, FormulaError> {
        match &node.node_type {
            ASTNodeType::Number(n) => sanitize_numeric(*n),
            ASTNodeType::Variable(name) => self.eval_variable(name),
            ASTNodeType::UnaryOp { op, expr } => self.eval_unary(op, expr),
            ASTNodeType::BinaryOp { op, left, right } => self.eval_binary(op, left, right),
        }
    }

    /* ===================  variables  =================== */
    fn eval_variable(&self, name: &str) -> Result<f64, FormulaError> {
        match self.environment.resolve(name) {
            Some(v) => sanitize_numeric(v),
            None => Err(FormulaError::UnknownVariable(name.to_string())),
        }
    }

    /* ===================  unary ops  =================== */
    fn eval_unary(&self, op: &str, expr: &ASTNode) -> Result<f64, FormulaError> {
        let v = self.evaluate_ast(expr)?;
        match op {
            "+" => Ok(v),
            "-" => Ok(-v),
            _ => Err(FormulaError::parse(format!("Unary op '{op}'"), None)),
        }
    }

    /* ===================  binary ops  =================== */
    fn eval_binary(&self, op: &str, left: &ASTNode, right: &ASTNode) -> Result<f64, FormulaError> {
        let a = self.evaluate_ast(left)?;
        let b = self.evaluate_ast(right)?;

        match op {
            "+" => sanitize_numeric(a + b),
            "-" => sanitize_numeric(a - b),
            "*" => sanitize_numeric(a * b),
            // x/0 and x%0 come out as inf/NaN and are rejected by the sanitizer.
            "/" => sanitize_numeric(a / b),
            "%" => sanitize_numeric(a % b),
            "^" => sanitize_numeric(a.powf(b)),
            _ => Err(FormulaError::parse(format!("Binary op '{op}'"), None)),
        }
    }
}

#[inline]
fn sanitize_numeric(n: f64) -> Result<f64, FormulaError> {
    if n.is_finite() {
        Ok(n)
    } else {
        Err(FormulaError::NonFinite)
    }
}
