//! Classification of committed input fragments.
//!
//! A fragment is whatever the user typed between two commits, already
//! trimmed. Classification is total: every fragment lands in exactly one
//! [`TokenClass`], checked in the order the variants are declared.

use std::fmt::{self, Display};

use formtag_common::TagKind;
use once_cell::sync::Lazy;
use regex::Regex;

/// Characters that become an operator tag on their own.
pub const OPERATOR_CHARS: [char; 8] = ['+', '-', '*', '/', '^', '(', ')', '%'];

// ASCII classes on purpose: `\d` would also accept non-ASCII digits.
static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("number regex must compile"));
static PERCENTAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+%$").expect("percentage regex must compile"));
static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex must compile"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    /// One of `+ - * / ^ ( ) %`.
    Operator,
    /// Digits followed by `%`, e.g. `15%`.
    Percentage,
    /// Unsigned integer digits only.
    Number,
    /// `[A-Za-z_][A-Za-z0-9_]*`
    Variable,
    /// Anything else, kept verbatim.
    Reference,
}

impl TokenClass {
    /// Percentages are stored as `Number` tags that keep their `%`.
    pub fn tag_kind(self) -> TagKind {
        match self {
            TokenClass::Operator => TagKind::Operator,
            TokenClass::Percentage | TokenClass::Number => TagKind::Number,
            TokenClass::Variable => TagKind::Variable,
            TokenClass::Reference => TagKind::Reference,
        }
    }
}

impl Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

pub fn classify(fragment: &str) -> TokenClass {
    if is_operator(fragment) {
        TokenClass::Operator
    } else if is_percentage(fragment) {
        TokenClass::Percentage
    } else if is_number(fragment) {
        TokenClass::Number
    } else if is_identifier(fragment) {
        TokenClass::Variable
    } else {
        TokenClass::Reference
    }
}

#[inline]
pub fn is_operator_char(c: char) -> bool {
    OPERATOR_CHARS.contains(&c)
}

/// True when `s` is exactly one operator character.
pub fn is_operator(s: &str) -> bool {
    let mut chars = s.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if is_operator_char(c))
}

pub fn is_number(s: &str) -> bool {
    NUMBER_RE.is_match(s)
}

pub fn is_percentage(s: &str) -> bool {
    PERCENTAGE_RE.is_match(s)
}

pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER_RE.is_match(s)
}
