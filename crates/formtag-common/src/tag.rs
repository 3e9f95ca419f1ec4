use std::fmt::{self, Display};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::SuggestionItem;

static NEXT_TAG_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque tag identity.
///
/// Ids come from a process-wide counter, so an id is never handed out twice
/// while the process lives, even after its tag has been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagId(u64);

impl TagId {
    pub fn next() -> Self {
        TagId(NEXT_TAG_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tag#{}", self.0)
    }
}

/// The closed set of tag kinds.
///
/// Percentages are `Number` tags whose text ends in `%`; see
/// [`Tag::is_percentage`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Operator,
    Number,
    Variable,
    /// Free text, or a picked suggestion when the tag carries a reference.
    Reference,
}

impl Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TagKind::Operator => "operator",
            TagKind::Number => "number",
            TagKind::Variable => "variable",
            TagKind::Reference => "reference",
        })
    }
}

/// An atomic, immutable unit of a formula.
///
/// Fields are private: once built a tag never changes, and the only way to
/// get a bound reference is [`Tag::from_suggestion`].
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    id: TagId,
    kind: TagKind,
    text: String,
    reference: Option<Arc<SuggestionItem>>,
}

impl Tag {
    /// Build an unbound tag. `Reference` tags built this way are free text.
    pub fn new<S: Into<String>>(kind: TagKind, text: S) -> Self {
        Tag {
            id: TagId::next(),
            kind,
            text: text.into(),
            reference: None,
        }
    }

    /// Build a `Reference` tag bound to a picked suggestion. The tag text is
    /// the suggestion's name.
    pub fn from_suggestion(item: Arc<SuggestionItem>) -> Self {
        Tag {
            id: TagId::next(),
            kind: TagKind::Reference,
            text: item.name.clone(),
            reference: Some(item),
        }
    }

    pub fn id(&self) -> TagId {
        self.id
    }

    pub fn kind(&self) -> TagKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn reference(&self) -> Option<&SuggestionItem> {
        self.reference.as_deref()
    }

    pub fn is_bound(&self) -> bool {
        self.reference.is_some()
    }

    pub fn is_percentage(&self) -> bool {
        self.kind == TagKind::Number && self.text.ends_with('%')
    }

    /// Display label: the bound suggestion's name, else the raw text.
    pub fn label(&self) -> &str {
        match &self.reference {
            Some(item) if !item.name.is_empty() => &item.name,
            _ => &self.text,
        }
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} {}>", self.kind, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = Tag::new(TagKind::Number, "1");
        let b = Tag::new(TagKind::Number, "1");
        assert_ne!(a.id(), b.id());
        assert!(b.id() > a.id());
    }

    #[test]
    fn typed_text_never_binds() {
        let tag = Tag::new(TagKind::Reference, "Revenue");
        assert!(!tag.is_bound());
        assert_eq!(tag.label(), "Revenue");
    }

    #[test]
    fn suggestion_tags_bind_and_use_name() {
        let item = Arc::new(SuggestionItem::new("7", "Revenue", "finance", 1200.0));
        let tag = Tag::from_suggestion(item.clone());
        assert_eq!(tag.kind(), TagKind::Reference);
        assert_eq!(tag.text(), "Revenue");
        assert_eq!(tag.reference(), Some(item.as_ref()));
    }

    #[test]
    fn percentage_is_a_number_with_percent_suffix() {
        assert!(Tag::new(TagKind::Number, "15%").is_percentage());
        assert!(!Tag::new(TagKind::Number, "15").is_percentage());
        assert!(!Tag::new(TagKind::Operator, "%").is_percentage());
    }
}
