use std::convert::TryFrom;
use std::error::Error;
use std::fmt::{self, Display};

use formtag_common::FormulaError;
use smallvec::SmallVec;

/// Deepest parenthesis nesting the tokenizer accepts. Keeps the recursive
/// parser well away from the stack limit.
pub const MAX_NESTING: usize = 256;

/// Represents operator associativity.
#[derive(Debug, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// A custom error type for the tokenizer.
#[derive(Debug)]
pub struct TokenizerError {
    pub message: String,
    pub pos: usize,
}

impl fmt::Display for TokenizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenizerError: {}", self.message)
    }
}

impl Error for TokenizerError {}

impl From<TokenizerError> for FormulaError {
    fn from(err: TokenizerError) -> Self {
        FormulaError::Tokenize {
            message: err.message,
            pos: err.pos,
        }
    }
}

/// The type of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Operand,
    Paren,
    OpPrefix,
    OpInfix,
    Whitespace,
}

impl Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// The subtype of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenSubType {
    None,
    Number,
    Identifier,
    Open,
    Close,
}

impl Display for TokenSubType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// A token in an arithmetic expression.
#[derive(Debug, Clone, PartialEq, Hash)]
pub struct Token {
    pub value: String,
    pub token_type: TokenType,
    pub subtype: TokenSubType,
    pub start: usize,
    pub end: usize,
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{} subtype: {:?} value: {}>",
            self.token_type, self.subtype, self.value
        )
    }
}

impl Token {
    fn from_slice(
        source: &str,
        token_type: TokenType,
        subtype: TokenSubType,
        start: usize,
        end: usize,
    ) -> Self {
        Token {
            value: source[start..end].to_string(),
            token_type,
            subtype,
            start,
            end,
        }
    }

    /// Binding power and associativity.
    ///
    /// Prefix signs bind tighter than `* / %` but looser than `^`, so
    /// `-2 ^ 2` is `-(2 ^ 2)` and `2 ^ -1` still parses.
    pub fn get_precedence(&self) -> Option<(u8, Associativity)> {
        let op = if self.token_type == TokenType::OpPrefix {
            "u"
        } else {
            self.value.as_str()
        };

        match op {
            "^" => Some((4, Associativity::Right)),
            "u" => Some((3, Associativity::Right)),
            "*" | "/" | "%" => Some((2, Associativity::Left)),
            "+" | "-" => Some((1, Associativity::Left)),
            _ => None,
        }
    }
}

/// A tokenizer for the space-joined expressions built from a tag sequence.
#[derive(Debug)]
pub struct Tokenizer {
    expression: String,
    pub items: Vec<Token>,
    paren_stack: SmallVec<[usize; 16]>,
    offset: usize,
}

impl Tokenizer {
    /// Create a new tokenizer and immediately tokenize the expression.
    pub fn new(expression: &str) -> Result<Self, TokenizerError> {
        let mut tokenizer = Tokenizer {
            expression: expression.to_string(),
            items: Vec::with_capacity(expression.len() / 2),
            paren_stack: SmallVec::new(),
            offset: 0,
        };
        tokenizer.parse()?;
        Ok(tokenizer)
    }

    fn parse(&mut self) -> Result<(), TokenizerError> {
        while self.offset < self.expression.len() {
            let curr_byte = self.expression.as_bytes()[self.offset];

            match curr_byte {
                b' ' | b'\t' | b'\n' | b'\r' => self.parse_whitespace(),
                b'+' | b'-' | b'*' | b'/' | b'^' | b'%' => self.parse_operator(),
                b'(' => self.parse_opener()?,
                b')' => self.parse_closer()?,
                b'0'..=b'9' | b'.' => self.parse_number(),
                b'A'..=b'Z' | b'a'..=b'z' | b'_' => self.parse_identifier(),
                _ => {
                    let ch = self.expression[self.offset..]
                        .chars()
                        .next()
                        .unwrap_or(char::REPLACEMENT_CHARACTER);
                    return Err(TokenizerError {
                        message: format!("Unexpected character '{ch}'"),
                        pos: self.offset,
                    });
                }
            }
        }

        if let Some(&open) = self.paren_stack.last() {
            return Err(TokenizerError {
                message: "Unmatched opening parenthesis".to_string(),
                pos: open,
            });
        }

        Ok(())
    }

    fn parse_whitespace(&mut self) {
        let ws_start = self.offset;
        while self.offset < self.expression.len() {
            match self.expression.as_bytes()[self.offset] {
                b' ' | b'\t' | b'\n' | b'\r' => self.offset += 1,
                _ => break,
            }
        }
        self.push(TokenType::Whitespace, TokenSubType::None, ws_start);
    }

    /// Digits with at most one decimal point. A second point starts a new
    /// token, which the parser then rejects.
    fn parse_number(&mut self) {
        let start = self.offset;
        let mut dot_seen = false;
        while self.offset < self.expression.len() {
            match self.expression.as_bytes()[self.offset] {
                b'0'..=b'9' => {}
                b'.' if !dot_seen => dot_seen = true,
                _ => break,
            }
            self.offset += 1;
        }
        self.push(TokenType::Operand, TokenSubType::Number, start);
    }

    fn parse_identifier(&mut self) {
        let start = self.offset;
        while self.offset < self.expression.len() {
            match self.expression.as_bytes()[self.offset] {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' => self.offset += 1,
                _ => break,
            }
        }
        self.push(TokenType::Operand, TokenSubType::Identifier, start);
    }

    fn parse_operator(&mut self) {
        let curr_byte = self.expression.as_bytes()[self.offset];
        let token_type = match curr_byte {
            b'+' | b'-' => {
                // Determine if prefix or infix
                let prev = self
                    .items
                    .iter()
                    .rev()
                    .find(|t| t.token_type != TokenType::Whitespace);
                match prev {
                    Some(p) if p.token_type == TokenType::Operand || p.subtype == TokenSubType::Close => {
                        TokenType::OpInfix
                    }
                    _ => TokenType::OpPrefix,
                }
            }
            _ => TokenType::OpInfix,
        };

        let start = self.offset;
        self.offset += 1;
        self.push(token_type, TokenSubType::None, start);
    }

    fn parse_opener(&mut self) -> Result<(), TokenizerError> {
        if self.paren_stack.len() >= MAX_NESTING {
            return Err(TokenizerError {
                message: format!("Parentheses nested deeper than {MAX_NESTING}"),
                pos: self.offset,
            });
        }
        self.paren_stack.push(self.offset);
        let start = self.offset;
        self.offset += 1;
        self.push(TokenType::Paren, TokenSubType::Open, start);
        Ok(())
    }

    fn parse_closer(&mut self) -> Result<(), TokenizerError> {
        if self.paren_stack.pop().is_none() {
            return Err(TokenizerError {
                message: format!("No matching opener for closer at position {}", self.offset),
                pos: self.offset,
            });
        }
        let start = self.offset;
        self.offset += 1;
        self.push(TokenType::Paren, TokenSubType::Close, start);
        Ok(())
    }

    #[inline]
    fn push(&mut self, token_type: TokenType, subtype: TokenSubType, start: usize) {
        self.items.push(Token::from_slice(
            &self.expression,
            token_type,
            subtype,
            start,
            self.offset,
        ));
    }
}

impl TryFrom<&str> for Tokenizer {
    type Error = TokenizerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Tokenizer::new(value)
    }
}

impl TryFrom<String> for Tokenizer {
    type Error = TokenizerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Tokenizer::new(&value)
    }
}
