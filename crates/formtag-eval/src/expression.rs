//! Rendering a tag sequence into the expression the interpreter reads.

use std::borrow::Cow;

use formtag_common::{Tag, TagKind};

/// The evaluation text of one tag.
///
/// Bound references contribute their suggestion's value (`0` when the value
/// is an empty string), percentages become `(N/100)`, and everything else is
/// passed through verbatim.
pub fn eval_text(tag: &Tag) -> Cow<'_, str> {
    match tag.kind() {
        TagKind::Reference => match tag.reference() {
            Some(item) if !item.value.is_empty() => Cow::Owned(item.value.to_string()),
            Some(_) => Cow::Borrowed("0"),
            None => Cow::Borrowed(tag.text()),
        },
        TagKind::Number if tag.is_percentage() => {
            let digits = tag.text().strip_suffix('%').unwrap_or(tag.text());
            Cow::Owned(format!("({digits}/100)"))
        }
        TagKind::Variable | TagKind::Number | TagKind::Operator => Cow::Borrowed(tag.text()),
    }
}

/// Join the evaluation texts with single spaces, in sequence order.
pub fn build_expression(tags: &[Tag]) -> String {
    tags.iter()
        .map(eval_text)
        .collect::<Vec<_>>()
        .join(" ")
}
