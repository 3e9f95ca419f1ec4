use std::time::Duration;

/// Default suggestion endpoint, a mock API serving a JSON array.
pub const DEFAULT_SUGGESTIONS_URL: &str = "https://652f91320b8d8ddac0b2b62b.mockapi.io/autocomplete";

#[derive(Debug, Clone)]
pub struct InputConfig {
    /// Commit a lone operator or digit as soon as it is the whole pending
    /// input, without waiting for a delimiter.
    pub eager_single_char_commit: bool,
    /// How long the dropdown stays open after blur so a click on a
    /// suggestion can still land.
    pub blur_delay: Duration,
    /// Rows shown in a dropdown.
    pub suggestion_display_limit: usize,
    pub suggestions_url: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            eager_single_char_commit: true,
            blur_delay: Duration::from_millis(150),
            suggestion_display_limit: 10,
            suggestions_url: DEFAULT_SUGGESTIONS_URL.to_string(),
        }
    }
}
