use formtag_common::{FormulaValue, SuggestionItem, TagKind};
use formtag_input::{
    DropdownView, FetchError, InputController, Key, KeyOutcome, StaticSuggestionSource,
};

/// Play keystrokes the way a browser host would: key_down first, and only
/// unhandled characters reach the text field.
fn type_keys(controller: &mut InputController, keys: &str) {
    for c in keys.chars() {
        let key = match c {
            ' ' => Key::Space,
            '=' => Key::Equals,
            '\n' => Key::Enter,
            c => Key::Char(c),
        };
        if controller.key_down(key) == KeyOutcome::Handled {
            continue;
        }
        let mut field = controller.pending_input().to_string();
        field.push(c);
        controller.input_changed(&field);
    }
}

fn kinds_and_text(controller: &InputController) -> Vec<(TagKind, String)> {
    controller
        .tags()
        .iter()
        .map(|t| (t.kind(), t.text().to_string()))
        .collect()
}

#[test]
fn price_times_discount_percent_shows_error() {
    let mut controller = InputController::new();
    type_keys(&mut controller, "price *discount %=");

    assert_eq!(
        kinds_and_text(&controller),
        [
            (TagKind::Variable, "price".to_string()),
            (TagKind::Operator, "*".to_string()),
            (TagKind::Variable, "discount".to_string()),
            (TagKind::Operator, "%".to_string()),
        ]
    );
    assert!(controller.result().is_some_and(FormulaValue::is_error));
    assert_eq!(controller.result_text().as_deref(), Some("Error"));
}

#[test]
fn calculate_on_empty_sequence_shows_error() {
    let mut controller = InputController::new();
    assert!(controller.calculate().is_error());
    assert_eq!(controller.result_text().as_deref(), Some("Error"));
}

#[test]
fn two_plus_three() {
    let mut controller = InputController::new();
    type_keys(&mut controller, "2+3=");
    assert_eq!(controller.chips().len(), 3);
    assert_eq!(controller.result_text().as_deref(), Some("5"));
}

#[test]
fn percentage_literal_is_scaled() {
    let mut controller = InputController::new();
    // A lone digit commits on its own, so the percentage goes through the field whole.
    controller.input_changed("tax");
    controller.key_down(Key::Char('*'));
    controller.input_changed("50% ");
    controller.key_down(Key::Equals);

    assert!(controller.tags()[2].is_percentage());
    assert_eq!(controller.result(), Some(&FormulaValue::Number(10.0)));
}

#[test]
fn fetch_failure_leaves_empty_suggestions() {
    let mut controller = InputController::new();
    let failing = || -> Result<Vec<SuggestionItem>, FetchError> {
        Err(FetchError::Transport("dns failure".into()))
    };
    controller.load_suggestions(&failing);

    assert!(!controller.suggestions().is_loading());
    assert!(controller.suggestions().all().is_empty());

    controller.focus();
    controller.input_changed("re");
    assert_eq!(controller.dropdown(), DropdownView::Empty);
    assert_eq!(controller.dropdown().message(), Some("No results found"));
}

#[test]
fn dropdown_shows_loading_while_fetching() {
    let mut controller = InputController::new();
    controller.suggestions_mut().begin_loading();
    controller.input_changed("re");
    assert_eq!(controller.dropdown(), DropdownView::Loading);

    controller
        .suggestions_mut()
        .finish_loading(Ok(vec![SuggestionItem::new("1", "Revenue", "Finance", 1.0)]));
    assert_eq!(controller.dropdown().rows()[0].name, "Revenue");
}

#[test]
fn typed_name_does_not_bind_but_selection_does() {
    let source = StaticSuggestionSource::new(vec![SuggestionItem::new(
        "9",
        "Revenue",
        "Finance",
        300.0,
    )]);
    let mut controller = InputController::new();
    controller.load_suggestions(&source);

    type_keys(&mut controller, "Revenue ");
    assert!(!controller.tags()[0].is_bound());
    assert_eq!(controller.tags()[0].kind(), TagKind::Variable);

    controller.key_down(Key::Char('+'));
    controller.input_changed("rev");
    controller.select_suggestion(0);
    assert!(controller.tags()[2].is_bound());
    assert_eq!(controller.tags()[2].kind(), TagKind::Reference);
}

#[test]
fn dropdown_is_capped_at_ten_rows() {
    let items: Vec<SuggestionItem> = (0..30)
        .map(|i| SuggestionItem::new(i.to_string(), format!("metric {i}"), "Bulk", ""))
        .collect();
    let mut controller = InputController::new();
    controller.load_suggestions(&StaticSuggestionSource::new(items));
    controller.input_changed("metric");
    assert_eq!(controller.dropdown().rows().len(), 10);
    assert!(controller.select_suggestion(10).is_none());
}
