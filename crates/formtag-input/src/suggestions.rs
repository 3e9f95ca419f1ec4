use std::sync::Arc;

use formtag_common::SuggestionItem;

use crate::source::{FetchError, SuggestionSource};

/// Case-insensitive substring match of `query` against name or category.
///
/// An empty query keeps everything. Input order is preserved.
pub fn filter_suggestions<'a, T>(items: &'a [T], query: &str) -> Vec<&'a T>
where
    T: AsRef<SuggestionItem>,
{
    if query.is_empty() {
        return items.iter().collect();
    }
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| {
            let item = item.as_ref();
            item.name.to_lowercase().contains(&needle)
                || item.category.to_lowercase().contains(&needle)
        })
        .collect()
}

/// The fetched list plus the current search query.
#[derive(Debug, Clone, Default)]
pub struct SuggestionState {
    all: Option<Vec<Arc<SuggestionItem>>>,
    is_loading: bool,
    search_query: String,
}

impl SuggestionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_loaded(&self) -> bool {
        self.all.is_some()
    }

    pub fn all(&self) -> &[Arc<SuggestionItem>] {
        self.all.as_deref().unwrap_or(&[])
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query<S: Into<String>>(&mut self, query: S) {
        self.search_query = query.into();
    }

    pub fn begin_loading(&mut self) {
        self.is_loading = true;
    }

    /// Store the outcome of a fetch. A failure leaves an empty, loaded list.
    pub fn finish_loading(&mut self, outcome: Result<Vec<SuggestionItem>, FetchError>) {
        let items = match outcome {
            Ok(items) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(count = items.len(), "suggestions loaded");
                items
            }
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_e, "failed to fetch suggestions");
                Vec::new()
            }
        };
        self.all = Some(items.into_iter().map(Arc::new).collect());
        self.is_loading = false;
    }

    pub fn load(&mut self, source: &dyn SuggestionSource) {
        self.begin_loading();
        self.finish_loading(source.fetch());
    }

    /// Items matching the search query; empty until a list is loaded.
    pub fn filtered(&self) -> Vec<&Arc<SuggestionItem>> {
        match &self.all {
            Some(all) => filter_suggestions(all, &self.search_query),
            None => Vec::new(),
        }
    }
}
