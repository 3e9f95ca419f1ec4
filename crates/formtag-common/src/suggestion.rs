use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The payload a suggestion contributes when it is used in a formula.
///
/// The suggestion endpoint serves either a JSON number or a JSON string, so
/// the serde representation is untagged.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Debug, Clone, PartialEq)]
pub enum SuggestionValue {
    Number(f64),
    Text(String),
}

impl SuggestionValue {
    /// Only an empty string counts as empty; `0` is a real value.
    pub fn is_empty(&self) -> bool {
        matches!(self, SuggestionValue::Text(s) if s.is_empty())
    }
}

impl Default for SuggestionValue {
    fn default() -> Self {
        SuggestionValue::Text(String::new())
    }
}

impl Display for SuggestionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuggestionValue::Number(n) => write!(f, "{n}"),
            SuggestionValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for SuggestionValue {
    fn from(value: f64) -> Self {
        SuggestionValue::Number(value)
    }
}

impl From<&str> for SuggestionValue {
    fn from(value: &str) -> Self {
        SuggestionValue::Text(value.to_string())
    }
}

impl From<String> for SuggestionValue {
    fn from(value: String) -> Self {
        SuggestionValue::Text(value)
    }
}

/// One record from the remote suggestion list. Immutable once fetched.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionItem {
    pub id: String,
    pub name: String,
    pub category: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: SuggestionValue,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub inputs: Option<String>,
}

impl SuggestionItem {
    pub fn new<I, N, C, V>(id: I, name: N, category: C, value: V) -> Self
    where
        I: Into<String>,
        N: Into<String>,
        C: Into<String>,
        V: Into<SuggestionValue>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            value: value.into(),
            inputs: None,
        }
    }

    pub fn with_inputs<S: Into<String>>(mut self, inputs: S) -> Self {
        self.inputs = Some(inputs.into());
        self
    }
}

impl AsRef<SuggestionItem> for SuggestionItem {
    fn as_ref(&self) -> &SuggestionItem {
        self
    }
}
