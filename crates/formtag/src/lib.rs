//! Meta crate that re-exports the formtag building blocks. Hosts normally
//! drive an [`InputController`] and render its chips and dropdown; the
//! underlying crates stay reachable for deeper integration.

pub use formtag_common as common;
pub use formtag_eval as eval;
pub use formtag_input as input;
pub use formtag_parse as parse;

pub use formtag_common::{
    ERROR_MARKER, FormulaError, FormulaValue, SuggestionItem, SuggestionValue, Tag, TagId, TagKind,
};
pub use formtag_eval::{Environment, FixedEnvironment, FormulaEvaluator};
#[cfg(feature = "http")]
pub use formtag_input::HttpSuggestionSource;
pub use formtag_input::{
    Chip, ChipStyle, DropdownView, FetchError, InputConfig, InputController, Key, KeyOutcome,
    StaticSuggestionSource, SuggestionSource,
};
pub use formtag_parse::{TokenClass, classify};
