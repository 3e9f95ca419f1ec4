use formtag_common::SuggestionItem;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("suggestion request failed: {0}")]
    Transport(String),
    #[error("suggestion endpoint answered with status {0}")]
    Status(u16),
    #[error("malformed suggestion payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Where the suggestion list comes from. The list is fetched once per
/// controller; there is no paging and no query pushdown.
pub trait SuggestionSource: Send + Sync {
    fn fetch(&self) -> Result<Vec<SuggestionItem>, FetchError>;
}

/// Decode the JSON array served by the suggestion endpoint.
pub fn parse_suggestions(body: &str) -> Result<Vec<SuggestionItem>, FetchError> {
    Ok(serde_json::from_str(body)?)
}

/// Serves a fixed list. Used by hosts that ship their suggestions and by tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSuggestionSource {
    items: Vec<SuggestionItem>,
}

impl StaticSuggestionSource {
    pub fn new(items: Vec<SuggestionItem>) -> Self {
        Self { items }
    }

    pub fn from_json(body: &str) -> Result<Self, FetchError> {
        parse_suggestions(body).map(Self::new)
    }
}

impl SuggestionSource for StaticSuggestionSource {
    fn fetch(&self) -> Result<Vec<SuggestionItem>, FetchError> {
        Ok(self.items.clone())
    }
}

impl<F> SuggestionSource for F
where
    F: Fn() -> Result<Vec<SuggestionItem>, FetchError> + Send + Sync,
{
    fn fetch(&self) -> Result<Vec<SuggestionItem>, FetchError> {
        self()
    }
}

#[cfg(feature = "http")]
pub use http::HttpSuggestionSource;

#[cfg(feature = "http")]
mod http {
    use super::{FetchError, SuggestionSource, parse_suggestions};
    use crate::config::{DEFAULT_SUGGESTIONS_URL, InputConfig};
    use formtag_common::SuggestionItem;

    /// GETs the whole list from a JSON endpoint with reqwest's blocking client.
    pub struct HttpSuggestionSource {
        client: reqwest::blocking::Client,
        url: String,
    }

    impl HttpSuggestionSource {
        pub fn new<S: Into<String>>(url: S) -> Self {
            Self {
                client: reqwest::blocking::Client::new(),
                url: url.into(),
            }
        }

        pub fn with_client<S: Into<String>>(client: reqwest::blocking::Client, url: S) -> Self {
            Self {
                client,
                url: url.into(),
            }
        }

        pub fn from_config(config: &InputConfig) -> Self {
            Self::new(config.suggestions_url.clone())
        }

        pub fn url(&self) -> &str {
            &self.url
        }
    }

    impl Default for HttpSuggestionSource {
        fn default() -> Self {
            Self::new(DEFAULT_SUGGESTIONS_URL)
        }
    }

    impl SuggestionSource for HttpSuggestionSource {
        fn fetch(&self) -> Result<Vec<SuggestionItem>, FetchError> {
            let response = self
                .client
                .get(&self.url)
                .send()
                .map_err(|e| FetchError::Transport(e.to_string()))?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status(status.as_u16()));
            }
            let body = response
                .text()
                .map_err(|e| FetchError::Transport(e.to_string()))?;
            parse_suggestions(&body)
        }
    }
}
