//! Component renderers built on the attribute encoders.

mod button;
mod character_count;
mod error_message;
mod hint;
mod label;

use itertools::Itertools;
use strum_macros::{Display, EnumIter, EnumString};

use crate::html::SanitizedHTML;

pub use button::{render_button, ButtonElement, ButtonParams};
pub use character_count::{render_character_count, CharacterCountParams, CountMessageParams};
pub use error_message::{render_error_message, ErrorMessageParams, VisuallyHiddenText};
pub use hint::{render_hint, HintParams};
pub use label::{render_label, LabelParams};

/// A component's params that can be turned into markup.
pub trait Render {
    /// Renders the component. Never fails: missing options fall back to
    /// defaults or are left out.
    fn render(&self) -> SanitizedHTML;
}

/// The components that can be rendered from JSON params.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum Component {
    Button,
    CharacterCount,
    ErrorMessage,
    Hint,
    Label,
}

impl Component {
    /// Deserializes `params` as this component's options and renders it.
    pub fn render_json(self, params: &str) -> Result<SanitizedHTML, serde_json::Error> {
        let html = match self {
            Component::Button => serde_json::from_str::<ButtonParams>(params)?.render(),
            Component::CharacterCount => {
                serde_json::from_str::<CharacterCountParams>(params)?.render()
            }
            Component::ErrorMessage => {
                serde_json::from_str::<ErrorMessageParams>(params)?.render()
            }
            Component::Hint => serde_json::from_str::<HintParams>(params)?.render(),
            Component::Label => serde_json::from_str::<LabelParams>(params)?.render(),
        };
        Ok(html)
    }
}

/// Joins a base class with any non-empty extra classes.
fn class_names<'a>(base: &'a str, extra: impl IntoIterator<Item = Option<&'a str>>) -> String {
    std::iter::once(base)
        .chain(extra.into_iter().flatten())
        .map(str::trim)
        .filter(|class| !class.is_empty())
        .join(" ")
}

/// Trims block content and indents every line after the first, so it sits
/// under an opening tag indented by `width`.
fn indent(content: &str, width: usize) -> String {
    let padding = " ".repeat(width);
    content
        .trim()
        .lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 || line.is_empty() {
                line.to_owned()
            } else {
                format!("{}{}", padding, line)
            }
        })
        .join("\n")
}

/// Treats an empty option the same as a missing one.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_component_names() {
        assert_eq!(
            Component::from_str("character-count").unwrap(),
            Component::CharacterCount
        );
        assert_eq!(Component::ErrorMessage.to_string(), "error-message");
        assert!(Component::from_str("accordion").is_err());
        for component in Component::iter() {
            assert_eq!(
                Component::from_str(&component.to_string()).unwrap(),
                component
            );
        }
    }

    #[test]
    fn test_render_json() {
        let html = Component::Hint
            .render_json(r#"{"text": "Use <b>", "attributes": {"data-x": 1}}"#)
            .unwrap();
        assert_eq!(
            html.as_str(),
            "<div class=\"govuk-hint\" data-x=\"1\">\n  Use &#60;b&#62;\n</div>"
        );
        assert!(Component::Hint.render_json("not json").is_err());
    }

    #[test]
    fn test_class_names() {
        assert_eq!(class_names("govuk-hint", [None]), "govuk-hint");
        assert_eq!(
            class_names("govuk-hint", [Some(" extra "), Some(""), Some("more")]),
            "govuk-hint extra more"
        );
    }

    #[test]
    fn test_indent() {
        assert_eq!(indent("  one  ", 2), "one");
        assert_eq!(indent("<p>\nline\n\n</p>\n", 4), "<p>\n    line\n\n    </p>");
    }
}
