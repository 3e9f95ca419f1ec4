//! Formula entry: the tag sequence store, suggestion matching, and the
//! controller that turns discrete UI events into store mutations.
//!
//! The host UI owns rendering. It forwards text changes, key presses, focus,
//! blur and clicks to an [`InputController`] and renders what
//! [`InputController::chips`] and [`InputController::dropdown`] describe.

pub mod config;
pub mod controller;
pub mod source;
pub mod store;
pub mod suggestions;
pub mod view;

pub use config::{DEFAULT_SUGGESTIONS_URL, InputConfig};
pub use controller::{InputController, Key, KeyOutcome};
#[cfg(feature = "http")]
pub use source::HttpSuggestionSource;
pub use source::{FetchError, StaticSuggestionSource, SuggestionSource, parse_suggestions};
pub use store::FormulaState;
pub use suggestions::{SuggestionState, filter_suggestions};
pub use view::{Chip, ChipStyle, DropdownView, SuggestionRow};
