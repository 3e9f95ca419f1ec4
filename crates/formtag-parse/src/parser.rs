use crate::tokenizer::{Associativity, Token, TokenSubType, TokenType, TokenizerError};
use crate::Tokenizer;

use formtag_common::FormulaError;
use std::error::Error;
use std::fmt::{self, Display};

/// Cap on parser recursion and on the height of the finished tree. The
/// interpreter and `Drop` both walk the tree recursively.
const MAX_DEPTH: usize = 512;

/// A custom error type for the parser.
#[derive(Debug)]
pub struct ParserError {
    pub message: String,
    pub position: Option<usize>,
}

impl Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(pos) = self.position {
            write!(f, "ParserError at position {}: {}", pos, self.message)
        } else {
            write!(f, "ParserError: {}", self.message)
        }
    }
}

impl Error for ParserError {}

impl From<TokenizerError> for ParserError {
    fn from(err: TokenizerError) -> Self {
        ParserError {
            message: err.message,
            position: Some(err.pos),
        }
    }
}

impl From<ParserError> for FormulaError {
    fn from(err: ParserError) -> Self {
        FormulaError::Parse {
            message: err.message,
            position: err.position,
        }
    }
}

/// The different types of AST nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum ASTNodeType {
    Number(f64),
    Variable(String),
    UnaryOp {
        op: String,
        expr: Box<ASTNode>,
    },
    BinaryOp {
        op: String,
        left: Box<ASTNode>,
        right: Box<ASTNode>,
    },
}

impl Display for ASTNodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ASTNodeType::Number(n) => write!(f, "Number({n})"),
            ASTNodeType::Variable(name) => write!(f, "Variable({name})"),
            ASTNodeType::UnaryOp { op, expr } => write!(f, "UnaryOp({op}, {expr})"),
            ASTNodeType::BinaryOp { op, left, right } => {
                write!(f, "BinaryOp({op}, {left}, {right})")
            }
        }
    }
}

/// An AST node represents a parsed expression element
#[derive(Debug, Clone, PartialEq)]
pub struct ASTNode {
    pub node_type: ASTNodeType,
    pub source_token: Option<Token>,
}

impl ASTNode {
    pub fn new(node_type: ASTNodeType, source_token: Option<Token>) -> Self {
        ASTNode {
            node_type,
            source_token,
        }
    }
}

impl Display for ASTNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.node_type)
    }
}

/// A precedence-climbing parser from tokens to an AST.
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens: tokens
                .into_iter()
                .filter(|t| t.token_type != TokenType::Whitespace)
                .collect(),
            position: 0,
            depth: 0,
        }
    }

    /// Parse the tokens into an AST.
    pub fn parse(&mut self) -> Result<ASTNode, ParserError> {
        if self.tokens.is_empty() {
            return Err(ParserError {
                message: "No tokens to parse".to_string(),
                position: None,
            });
        }

        let (ast, _) = self.parse_expression()?;
        if self.position < self.tokens.len() {
            return Err(ParserError {
                message: format!(
                    "Unexpected token at position {}: {}",
                    self.position, self.tokens[self.position]
                ),
                position: Some(self.position),
            });
        }
        Ok(ast)
    }

    fn parse_expression(&mut self) -> Result<(ASTNode, usize), ParserError> {
        self.parse_binary_op(0)
    }

    fn too_deep(&self) -> ParserError {
        ParserError {
            message: "Expression nested too deeply".to_string(),
            position: Some(self.position),
        }
    }

    /// Returns the subtree together with its height.
    fn parse_binary_op(&mut self, min_precedence: u8) -> Result<(ASTNode, usize), ParserError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.too_deep());
        }

        let (mut left, mut height) = self.parse_unary_op()?;

        while self.position < self.tokens.len() {
            let token = &self.tokens[self.position];
            if token.token_type != TokenType::OpInfix {
                break;
            }

            let (precedence, associativity) =
                token.get_precedence().unwrap_or((0, Associativity::Left));
            if precedence < min_precedence {
                break;
            }

            let op_token = self.tokens[self.position].clone();
            self.position += 1;

            let next_min_precedence = if associativity == Associativity::Left {
                precedence + 1
            } else {
                precedence
            };

            let (right, right_height) = self.parse_binary_op(next_min_precedence)?;
            // Left-associative chains grow here without recursing.
            height = height.max(right_height) + 1;
            if height > MAX_DEPTH {
                return Err(self.too_deep());
            }
            left = ASTNode::new(
                ASTNodeType::BinaryOp {
                    op: op_token.value.clone(),
                    left: Box::new(left),
                    right: Box::new(right),
                },
                Some(op_token),
            );
        }

        self.depth -= 1;
        Ok((left, height))
    }

    fn parse_unary_op(&mut self) -> Result<(ASTNode, usize), ParserError> {
        if self.position < self.tokens.len()
            && self.tokens[self.position].token_type == TokenType::OpPrefix
        {
            let op_token = self.tokens[self.position].clone();
            self.position += 1;
            let (precedence, _) = op_token
                .get_precedence()
                .unwrap_or((0, Associativity::Right));
            // The operand may itself contain anything that binds tighter than the sign.
            let (expr, height) = self.parse_binary_op(precedence)?;
            if height + 1 > MAX_DEPTH {
                return Err(self.too_deep());
            }
            let node = ASTNode::new(
                ASTNodeType::UnaryOp {
                    op: op_token.value.clone(),
                    expr: Box::new(expr),
                },
                Some(op_token),
            );
            return Ok((node, height + 1));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<(ASTNode, usize), ParserError> {
        if self.position >= self.tokens.len() {
            return Err(ParserError {
                message: "Unexpected end of tokens".to_string(),
                position: Some(self.position),
            });
        }

        let token = &self.tokens[self.position];
        match token.token_type {
            TokenType::Operand => {
                let operand_token = self.tokens[self.position].clone();
                self.position += 1;
                Ok((self.parse_operand(operand_token)?, 1))
            }
            TokenType::Paren if token.subtype == TokenSubType::Open => {
                self.position += 1;
                let expr = self.parse_expression()?;
                if self.position >= self.tokens.len()
                    || self.tokens[self.position].token_type != TokenType::Paren
                    || self.tokens[self.position].subtype != TokenSubType::Close
                {
                    return Err(ParserError {
                        message: "Expected closing parenthesis".to_string(),
                        position: Some(self.position),
                    });
                }
                self.position += 1;
                Ok(expr)
            }
            _ => Err(ParserError {
                message: format!("Unexpected token: {token}"),
                position: Some(self.position),
            }),
        }
    }

    fn parse_operand(&mut self, token: Token) -> Result<ASTNode, ParserError> {
        match token.subtype {
            TokenSubType::Number => {
                let value = token.value.parse::<f64>().map_err(|_| ParserError {
                    message: format!("Invalid number: {}", token.value),
                    position: Some(self.position),
                })?;
                Ok(ASTNode::new(ASTNodeType::Number(value), Some(token)))
            }
            TokenSubType::Identifier => Ok(ASTNode::new(
                ASTNodeType::Variable(token.value.clone()),
                Some(token),
            )),
            _ => Err(ParserError {
                message: format!("Unexpected operand subtype: {:?}", token.subtype),
                position: Some(self.position),
            }),
        }
    }
}

impl TryFrom<&str> for Parser {
    type Error = TokenizerError;

    fn try_from(expression: &str) -> Result<Self, Self::Error> {
        Ok(Parser::new(Tokenizer::new(expression)?.items))
    }
}

pub fn parse<T: AsRef<str>>(expression: T) -> Result<ASTNode, ParserError> {
    Parser::try_from(expression.as_ref())?.parse()
}
