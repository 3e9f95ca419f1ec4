pub mod classify;
pub mod parser;
pub mod tokenizer;

pub use classify::{
    OPERATOR_CHARS, TokenClass, classify, is_identifier, is_number, is_operator,
    is_operator_char, is_percentage,
};
pub use parser::{ASTNode, ASTNodeType, Parser, ParserError, parse};
pub use tokenizer::{Associativity, Token, TokenSubType, TokenType, Tokenizer, TokenizerError};

// Re-export common types
pub use formtag_common::{FormulaError, TagKind};
