use formtag_common::{Tag, TagId, TagKind};
use formtag_parse::{TokenClass, classify};

/// The ordered tag sequence plus the text not yet committed to a tag.
///
/// Tag order is evaluation order. Tags are never edited in place; every
/// change is an append or a removal.
#[derive(Debug, Clone, Default)]
pub struct FormulaState {
    tags: Vec<Tag>,
    pending_input: String,
    /// Advisory only; evaluation ignores it.
    cursor_position: usize,
}

impl FormulaState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    pub fn set_cursor_position(&mut self, position: usize) {
        self.cursor_position = position;
    }

    pub fn position_of(&self, id: TagId) -> Option<usize> {
        self.tags.iter().position(|t| t.id() == id)
    }

    /// Append a tag and clear the pending input.
    pub fn append_tag(&mut self, tag: Tag) -> TagId {
        let id = tag.id();
        self.tags.push(tag);
        self.pending_input.clear();
        id
    }

    /// Remove the tag at `index`. Out-of-range indices leave the sequence
    /// untouched and return `None`.
    pub fn remove_tag_at(&mut self, index: usize) -> Option<Tag> {
        if index >= self.tags.len() {
            #[cfg(feature = "tracing")]
            tracing::debug!(index, len = self.tags.len(), "ignoring out-of-range tag removal");
            return None;
        }
        Some(self.tags.remove(index))
    }

    pub fn pop_tag(&mut self) -> Option<Tag> {
        self.tags.pop()
    }

    /// Overwrite the pending input. Never touches the tags.
    pub fn replace_pending_input<S: Into<String>>(&mut self, text: S) {
        self.pending_input = text.into();
    }

    /// Replace the pending input with `text`, then commit it straight away
    /// if it is a single operator or digit character.
    pub fn commit_pending_input_if_single_char_trigger(&mut self, text: &str) -> Option<TagId> {
        self.replace_pending_input(text);

        let mut chars = text.chars();
        let (Some(_), None) = (chars.next(), chars.next()) else {
            return None;
        };
        let kind = match classify(text) {
            TokenClass::Operator => TagKind::Operator,
            TokenClass::Number => TagKind::Number,
            _ => return None,
        };
        Some(self.append_tag(Tag::new(kind, text)))
    }

    /// Classify the trimmed `text` and append it as a tag. Blank text
    /// commits nothing.
    pub fn commit_pending(&mut self, text: &str) -> Option<TagId> {
        let fragment = text.trim();
        if fragment.is_empty() {
            return None;
        }
        let kind = classify(fragment).tag_kind();
        Some(self.append_tag(Tag::new(kind, fragment)))
    }
}
