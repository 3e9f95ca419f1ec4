//! What the host renders. Plain data, rebuilt on every read.

use formtag_common::{SuggestionItem, Tag, TagId, TagKind};

pub const PLACEHOLDER: &str = "Enter value or formula...";
pub const LOADING_TEXT: &str = "Loading...";
pub const NO_RESULTS_TEXT: &str = "No results found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChipStyle {
    Neutral,
    Green,
    Blue,
    Orange,
    Purple,
}

impl ChipStyle {
    pub fn for_tag(tag: &Tag) -> Self {
        match tag.kind() {
            TagKind::Operator => ChipStyle::Neutral,
            TagKind::Number if tag.is_percentage() => ChipStyle::Blue,
            TagKind::Number => ChipStyle::Green,
            TagKind::Variable => ChipStyle::Orange,
            TagKind::Reference => ChipStyle::Purple,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    pub id: TagId,
    pub label: String,
    pub style: ChipStyle,
    /// Operator and number chips disappear when clicked.
    pub removable_on_click: bool,
    /// Variable and reference chips carry a suggestion menu instead.
    pub has_menu: bool,
}

impl From<&Tag> for Chip {
    fn from(tag: &Tag) -> Self {
        let removable = matches!(tag.kind(), TagKind::Operator | TagKind::Number);
        Chip {
            id: tag.id(),
            label: tag.label().to_string(),
            style: ChipStyle::for_tag(tag),
            removable_on_click: removable,
            has_menu: !removable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRow {
    pub id: String,
    pub name: String,
    pub category: String,
    /// `"(value)"`, or `None` when the suggestion has no value.
    pub value_label: Option<String>,
}

impl From<&SuggestionItem> for SuggestionRow {
    fn from(item: &SuggestionItem) -> Self {
        SuggestionRow {
            id: item.id.clone(),
            name: item.name.clone(),
            category: item.category.clone(),
            value_label: (!item.value.is_empty()).then(|| format!("({})", item.value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownView {
    Hidden,
    Loading,
    Empty,
    Items(Vec<SuggestionRow>),
}

impl DropdownView {
    /// Build a visible dropdown from matching items, keeping at most `limit` rows.
    pub fn from_items<'a, I>(is_loading: bool, items: I, limit: usize) -> Self
    where
        I: IntoIterator<Item = &'a SuggestionItem>,
    {
        if is_loading {
            return DropdownView::Loading;
        }
        let rows: Vec<SuggestionRow> = items.into_iter().take(limit).map(SuggestionRow::from).collect();
        if rows.is_empty() {
            DropdownView::Empty
        } else {
            DropdownView::Items(rows)
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, DropdownView::Hidden)
    }

    /// The status line shown instead of rows, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            DropdownView::Loading => Some(LOADING_TEXT),
            DropdownView::Empty => Some(NO_RESULTS_TEXT),
            _ => None,
        }
    }

    pub fn rows(&self) -> &[SuggestionRow] {
        match self {
            DropdownView::Items(rows) => rows,
            _ => &[],
        }
    }
}
