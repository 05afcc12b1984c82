use serde::Deserialize;
use tracing::debug;

use super::{class_names, indent, non_empty, Render};
use crate::attributes::{encode_attributes, AttributeValue, Attributes, AttributesInput};
use crate::html::{escape_html, Content, SanitizedHTML};

static DEFAULT_VISUALLY_HIDDEN_TEXT: &str = "Error";

/// The screen-reader prefix. `false` turns it off.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum VisuallyHiddenText {
    Text(String),
    Enabled(bool),
}

impl VisuallyHiddenText {
    fn prefix(option: Option<&VisuallyHiddenText>) -> Option<&str> {
        match option {
            None | Some(VisuallyHiddenText::Enabled(true)) => Some(DEFAULT_VISUALLY_HIDDEN_TEXT),
            Some(VisuallyHiddenText::Enabled(false)) => None,
            Some(VisuallyHiddenText::Text(text)) if text.is_empty() => None,
            Some(VisuallyHiddenText::Text(text)) => Some(text.as_str()),
        }
    }
}

/// Options for a validation error message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ErrorMessageParams {
    pub text: Option<String>,
    /// Trusted markup, emitted without escaping. Takes precedence over `text`.
    pub html: Option<String>,
    pub id: Option<String>,
    pub classes: Option<String>,
    pub visually_hidden_text: Option<VisuallyHiddenText>,
    pub attributes: Option<AttributesInput>,
}

impl Render for ErrorMessageParams {
    fn render(&self) -> SanitizedHTML {
        debug!(id = ?self.id, "rendering error message");
        let own = Attributes::new()
            .with("id", AttributeValue::optional(non_empty(&self.id)))
            .with(
                "class",
                class_names("govuk-error-message", [self.classes.as_deref()]),
            );
        let prefix = match VisuallyHiddenText::prefix(self.visually_hidden_text.as_ref()) {
            Some(text) => format!(
                "<span class=\"govuk-visually-hidden\">{}:</span> ",
                escape_html(text)
            ),
            None => String::new(),
        };
        let content = Content::from_fields(self.html.as_deref(), self.text.as_deref())
            .map(|content| content.to_html())
            .unwrap_or_default();
        return SanitizedHTML::from_string_unsafe(format!(
            "<p{}{}>\n  {}{}\n</p>",
            own.encode(),
            encode_attributes(self.attributes.as_ref()),
            prefix,
            indent(content.as_str(), 2)
        ));
    }
}

pub fn render_error_message(params: &ErrorMessageParams) -> SanitizedHTML {
    params.render()
}
