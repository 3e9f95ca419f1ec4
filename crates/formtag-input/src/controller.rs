use std::sync::Arc;
use std::time::Instant;

use formtag_common::{FormulaValue, SuggestionItem, Tag, TagId, TagKind};
use formtag_eval::FormulaEvaluator;
use formtag_parse::is_operator_char;

use crate::config::InputConfig;
use crate::source::SuggestionSource;
use crate::store::FormulaState;
use crate::suggestions::SuggestionState;
use crate::view::{Chip, DropdownView, PLACEHOLDER};

/// Keys the controller reacts to. Anything else stays with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Backspace,
    Enter,
    Space,
    Escape,
    Equals,
    Char(char),
}

/// `Handled` asks the host to suppress the key's default action. `Ignored`
/// lets it through; the controller may still have reacted to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChipClick {
    Removed(Tag),
    MenuOpened,
    MenuClosed,
    /// No chip at that index.
    Missed,
}

/// Owns one formula entry session: the tag sequence, the suggestion list,
/// the evaluator and the transient UI flags.
#[derive(Debug)]
pub struct InputController {
    config: InputConfig,
    state: FormulaState,
    suggestions: SuggestionState,
    evaluator: FormulaEvaluator,
    result: Option<FormulaValue>,
    focused: bool,
    dropdown_open: bool,
    chip_menu: Option<TagId>,
    blur_deadline: Option<Instant>,
}

impl Default for InputController {
    fn default() -> Self {
        Self::new()
    }
}

impl InputController {
    pub fn new() -> Self {
        Self::with_config(InputConfig::default())
    }

    pub fn with_config(config: InputConfig) -> Self {
        Self {
            config,
            state: FormulaState::new(),
            suggestions: SuggestionState::new(),
            evaluator: FormulaEvaluator::new(),
            result: None,
            focused: false,
            dropdown_open: false,
            chip_menu: None,
            blur_deadline: None,
        }
    }

    pub fn with_evaluator(mut self, evaluator: FormulaEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    pub fn state(&self) -> &FormulaState {
        &self.state
    }

    pub fn suggestions(&self) -> &SuggestionState {
        &self.suggestions
    }

    /// For hosts that fetch on their own executor and report back through
    /// [`SuggestionState::begin_loading`] and [`SuggestionState::finish_loading`].
    pub fn suggestions_mut(&mut self) -> &mut SuggestionState {
        &mut self.suggestions
    }

    pub fn evaluator(&self) -> &FormulaEvaluator {
        &self.evaluator
    }

    pub fn tags(&self) -> &[Tag] {
        self.state.tags()
    }

    pub fn pending_input(&self) -> &str {
        self.state.pending_input()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// The text field's change event.
    pub fn input_changed(&mut self, value: &str) {
        if value.ends_with(char::is_whitespace) && !value.trim().is_empty() {
            self.commit_pending_text(value);
            return;
        }

        if self.config.eager_single_char_commit {
            self.state.commit_pending_input_if_single_char_trigger(value);
        } else {
            self.state.replace_pending_input(value);
        }
        self.suggestions.set_search_query(value);
        if !value.is_empty() {
            self.dropdown_open = true;
        }
    }

    pub fn key_down(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Backspace => {
                if !self.state.pending_input().is_empty() || self.state.is_empty() {
                    return KeyOutcome::Ignored;
                }
                if let Some(tag) = self.state.pop_tag() {
                    self.forget_chip_menu(tag.id());
                }
                KeyOutcome::Handled
            }
            Key::Enter | Key::Space => {
                if self.state.pending_input().trim().is_empty() {
                    return KeyOutcome::Ignored;
                }
                let pending = self.state.pending_input().to_string();
                self.commit_pending_text(&pending);
                KeyOutcome::Handled
            }
            Key::Escape => {
                self.dropdown_open = false;
                KeyOutcome::Ignored
            }
            Key::Equals | Key::Char('=') => {
                if self.state.is_empty() {
                    return KeyOutcome::Ignored;
                }
                self.calculate();
                KeyOutcome::Handled
            }
            Key::Char(c) if is_operator_char(c) => {
                let pending = self.state.pending_input().to_string();
                self.commit_pending_text(&pending);
                self.state.append_tag(Tag::new(TagKind::Operator, c.to_string()));
                KeyOutcome::Handled
            }
            Key::Char(_) => KeyOutcome::Ignored,
        }
    }

    /// Evaluate the current sequence and keep the result for display.
    pub fn calculate(&mut self) -> &FormulaValue {
        self.result.insert(self.evaluator.evaluate(self.state.tags()))
    }

    /// Bind the `index`-th row of the visible dropdown.
    pub fn select_suggestion(&mut self, index: usize) -> Option<TagId> {
        let item = self
            .suggestions
            .filtered()
            .into_iter()
            .take(self.config.suggestion_display_limit)
            .nth(index)
            .cloned()?;
        Some(self.bind_suggestion(item))
    }

    /// Append a reference tag bound to `item`, then reset the input and close
    /// the dropdown.
    pub fn bind_suggestion(&mut self, item: Arc<SuggestionItem>) -> TagId {
        let id = self.state.append_tag(Tag::from_suggestion(item));
        self.suggestions.set_search_query("");
        self.dropdown_open = false;
        id
    }

    pub fn click_chip(&mut self, index: usize) -> ChipClick {
        let Some((kind, id)) = self.state.tags().get(index).map(|t| (t.kind(), t.id())) else {
            return ChipClick::Missed;
        };
        match kind {
            TagKind::Operator | TagKind::Number => match self.state.remove_tag_at(index) {
                Some(removed) => {
                    self.forget_chip_menu(removed.id());
                    ChipClick::Removed(removed)
                }
                None => ChipClick::Missed,
            },
            TagKind::Variable | TagKind::Reference => {
                if self.chip_menu == Some(id) {
                    self.chip_menu = None;
                    ChipClick::MenuClosed
                } else {
                    self.chip_menu = Some(id);
                    ChipClick::MenuOpened
                }
            }
        }
    }

    /// The open chip menu, if any. It lists the whole suggestion list,
    /// independent of the search query.
    pub fn chip_menu(&self) -> Option<(TagId, DropdownView)> {
        let id = self.chip_menu?;
        let view = DropdownView::from_items(
            self.suggestions.is_loading(),
            self.suggestions.all().iter().map(Arc::as_ref),
            self.config.suggestion_display_limit,
        );
        Some((id, view))
    }

    /// Pick a row from the open chip menu. The menu closes; the chip itself
    /// is left as it is.
    pub fn choose_from_chip_menu(&mut self, index: usize) -> Option<Arc<SuggestionItem>> {
        self.chip_menu.take()?;
        let item = self
            .suggestions
            .all()
            .iter()
            .take(self.config.suggestion_display_limit)
            .nth(index)
            .cloned()?;
        #[cfg(feature = "tracing")]
        tracing::debug!(suggestion = %item.name, "chip menu selection");
        Some(item)
    }

    pub fn close_chip_menu(&mut self) {
        self.chip_menu = None;
    }

    pub fn focus(&mut self) {
        self.focused = true;
        self.blur_deadline = None;
        if !self.state.pending_input().is_empty() {
            self.dropdown_open = true;
        }
    }

    /// Start the blur countdown. Nothing closes until [`tick`](Self::tick)
    /// observes the deadline.
    pub fn blur(&mut self, now: Instant) {
        self.blur_deadline = Some(now + self.config.blur_delay);
    }

    /// Apply a pending blur whose delay has elapsed. Returns whether it did.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.blur_deadline {
            Some(deadline) if now >= deadline => {
                self.blur_deadline = None;
                self.focused = false;
                self.dropdown_open = false;
                true
            }
            _ => false,
        }
    }

    pub fn load_suggestions(&mut self, source: &dyn SuggestionSource) {
        self.suggestions.load(source);
    }

    pub fn chips(&self) -> Vec<Chip> {
        self.state.tags().iter().map(Chip::from).collect()
    }

    pub fn dropdown(&self) -> DropdownView {
        if !self.dropdown_open {
            return DropdownView::Hidden;
        }
        DropdownView::from_items(
            self.suggestions.is_loading(),
            self.suggestions.filtered().into_iter().map(Arc::as_ref),
            self.config.suggestion_display_limit,
        )
    }

    pub fn result(&self) -> Option<&FormulaValue> {
        self.result.as_ref()
    }

    /// The result line; `None` until something has been calculated.
    pub fn result_text(&self) -> Option<String> {
        self.result.as_ref().map(ToString::to_string)
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        self.state.is_empty().then_some(PLACEHOLDER)
    }

    fn commit_pending_text(&mut self, text: &str) {
        if self.state.commit_pending(text).is_some() {
            self.suggestions.set_search_query("");
        }
    }

    fn forget_chip_menu(&mut self, removed: TagId) {
        if self.chip_menu == Some(removed) {
            self.chip_menu = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticSuggestionSource;
    use std::time::Duration;

    fn typed(controller: &mut InputController, text: &str) {
        let mut field = controller.pending_input().to_string();
        for c in text.chars() {
            let key = match c {
                ' ' => Key::Space,
                '=' => Key::Equals,
                c => Key::Char(c),
            };
            if controller.key_down(key) == KeyOutcome::Handled {
                field = controller.pending_input().to_string();
                continue;
            }
            field.push(c);
            controller.input_changed(&field);
            field = controller.pending_input().to_string();
        }
    }

    fn labels(controller: &InputController) -> Vec<String> {
        controller.chips().into_iter().map(|c| c.label).collect()
    }

    fn catalog() -> StaticSuggestionSource {
        StaticSuggestionSource::new(vec![
            SuggestionItem::new("1", "Revenue", "Finance", 1200.0),
            SuggestionItem::new("2", "Cost", "Finance", 200.0),
            SuggestionItem::new("3", "Headcount", "People", ""),
        ])
    }

    #[test]
    fn space_commits_a_variable() {
        let mut c = InputController::new();
        typed(&mut c, "price ");
        assert_eq!(labels(&c), ["price"]);
        assert_eq!(c.tags()[0].kind(), TagKind::Variable);
        assert_eq!(c.pending_input(), "");
    }

    #[test]
    fn operator_key_commits_pending_then_itself() {
        let mut c = InputController::new();
        typed(&mut c, "tax*");
        assert_eq!(labels(&c), ["tax", "*"]);
        assert_eq!(c.tags()[1].kind(), TagKind::Operator);
    }

    #[test]
    fn lone_digit_commits_eagerly() {
        let mut c = InputController::new();
        c.input_changed("7");
        assert_eq!(labels(&c), ["7"]);
        assert_eq!(c.pending_input(), "");
    }

    #[test]
    fn eager_commit_can_be_disabled() {
        let mut c = InputController::with_config(InputConfig {
            eager_single_char_commit: false,
            ..InputConfig::default()
        });
        typed(&mut c, "12 +3 =");
        assert_eq!(labels(&c), ["12", "+", "3"]);
        assert_eq!(c.result_text().as_deref(), Some("15"));
    }

    #[test]
    fn backspace_on_empty_input_pops_one_tag_per_press() {
        let mut c = InputController::new();
        typed(&mut c, "x+y ");
        assert_eq!(labels(&c), ["x", "+", "y"]);
        assert_eq!(c.key_down(Key::Backspace), KeyOutcome::Handled);
        assert_eq!(labels(&c), ["x", "+"]);

        c.input_changed("a");
        assert_eq!(c.key_down(Key::Backspace), KeyOutcome::Ignored);
        assert_eq!(labels(&c), ["x", "+"]);
    }

    #[test]
    fn equals_needs_tags() {
        let mut c = InputController::new();
        assert_eq!(c.key_down(Key::Equals), KeyOutcome::Ignored);
        assert!(c.result_text().is_none());

        assert_eq!(c.calculate().to_string(), "Error");
        assert_eq!(c.result_text().as_deref(), Some("Error"));
    }

    #[test]
    fn selecting_a_suggestion_binds_a_reference() {
        let mut c = InputController::new();
        c.load_suggestions(&catalog());
        c.focus();
        c.input_changed("rev");
        assert_eq!(c.dropdown().rows().len(), 1);

        let id = c.select_suggestion(0).unwrap();
        assert!(c.tags()[0].is_bound());
        assert_eq!(c.tags()[0].id(), id);
        assert_eq!(labels(&c), ["Revenue"]);
        assert_eq!(c.pending_input(), "");
        assert_eq!(c.suggestions().search_query(), "");
        assert_eq!(c.dropdown(), DropdownView::Hidden);

        typed(&mut c, "*2=");
        assert_eq!(c.result(), Some(&FormulaValue::Number(2400.0)));
    }

    #[test]
    fn select_out_of_range_does_nothing() {
        let mut c = InputController::new();
        c.load_suggestions(&catalog());
        c.input_changed("people");
        assert!(c.select_suggestion(3).is_none());
        assert!(c.tags().is_empty());
    }

    #[test]
    fn clicking_chips() {
        let mut c = InputController::new();
        c.load_suggestions(&catalog());
        typed(&mut c, "discount+");
        assert!(matches!(c.click_chip(1), ChipClick::Removed(t) if t.text() == "+"));
        assert_eq!(labels(&c), ["discount"]);

        assert_eq!(c.click_chip(0), ChipClick::MenuOpened);
        let (id, menu) = c.chip_menu().unwrap();
        assert_eq!(id, c.tags()[0].id());
        assert_eq!(menu.rows().len(), 3);
        assert_eq!(c.click_chip(0), ChipClick::MenuClosed);
        assert!(c.chip_menu().is_none());
        assert_eq!(c.click_chip(9), ChipClick::Missed);
    }

    #[test]
    fn chip_menu_choice_closes_menu_and_keeps_tag() {
        let mut c = InputController::new();
        c.load_suggestions(&catalog());
        typed(&mut c, "discount ");
        c.click_chip(0);
        let chosen = c.choose_from_chip_menu(1).unwrap();
        assert_eq!(chosen.name, "Cost");
        assert!(c.chip_menu().is_none());
        assert!(!c.tags()[0].is_bound());
        assert!(c.choose_from_chip_menu(0).is_none());
    }

    #[test]
    fn removing_a_tag_closes_its_menu() {
        let mut c = InputController::new();
        typed(&mut c, "discount ");
        c.click_chip(0);
        c.key_down(Key::Backspace);
        assert!(c.chip_menu().is_none());
    }

    #[test]
    fn blur_waits_for_the_delay() {
        let mut c = InputController::new();
        c.load_suggestions(&catalog());
        c.focus();
        c.input_changed("co");
        assert!(c.dropdown().is_visible());

        let t0 = Instant::now();
        c.blur(t0);
        assert!(!c.tick(t0 + Duration::from_millis(100)));
        assert!(c.dropdown().is_visible());
        assert!(c.select_suggestion(0).is_some());

        c.input_changed("c");
        c.blur(t0);
        assert!(c.tick(t0 + Duration::from_millis(150)));
        assert!(!c.is_focused());
        assert_eq!(c.dropdown(), DropdownView::Hidden);
    }

    #[test]
    fn focus_cancels_pending_blur() {
        let mut c = InputController::new();
        let t0 = Instant::now();
        c.focus();
        c.blur(t0);
        c.focus();
        assert!(!c.tick(t0 + Duration::from_secs(1)));
        assert!(c.is_focused());
    }

    #[test]
    fn placeholder_only_while_empty() {
        let mut c = InputController::new();
        assert_eq!(c.placeholder(), Some("Enter value or formula..."));
        c.input_changed("+");
        assert_eq!(c.placeholder(), None);
    }
}
