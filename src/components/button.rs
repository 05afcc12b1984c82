use std::str::FromStr;

use serde::Deserialize;
use strum_macros::{Display, EnumString};
use tracing::{debug, warn};

use super::{class_names, indent, non_empty, Render};
use crate::attributes::{encode_attributes, AttributeValue, Attributes, AttributesInput};
use crate::html::{Content, SanitizedHTML};

static START_ICON: &str = "<svg class=\"govuk-button__start-icon\" xmlns=\"http://www.w3.org/2000/svg\" width=\"17.5\" height=\"19\" viewBox=\"0 0 33 40\" aria-hidden=\"true\" focusable=\"false\">\n    <path fill=\"currentColor\" d=\"M0 0h13l20 20-20 20H0l20-20z\" />\n  </svg>";

/// The element a button renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ButtonElement {
    Button,
    A,
    Input,
}

/// Options for a button, or a link styled as one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonParams {
    /// `button`, `a` or `input`. Defaults to `a` when `href` is set.
    pub element: Option<String>,
    /// Button text. Inputs can only show text.
    pub text: Option<String>,
    /// Trusted markup, emitted without escaping. Takes precedence over `text`.
    pub html: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub button_type: Option<String>,
    pub value: Option<String>,
    pub disabled: bool,
    pub href: Option<String>,
    pub classes: Option<String>,
    pub attributes: Option<AttributesInput>,
    pub prevent_double_click: Option<bool>,
    pub is_start_button: bool,
    pub id: Option<String>,
}

impl ButtonParams {
    fn element(&self) -> ButtonElement {
        if let Some(element) = non_empty(&self.element) {
            match ButtonElement::from_str(element) {
                Ok(element) => return element,
                Err(_) => warn!(element, "unknown button element, using the default"),
            }
        }
        if non_empty(&self.href).is_some() {
            return ButtonElement::A;
        }
        return ButtonElement::Button;
    }

    /// Attributes shared by every element: class, module hook, id, and the
    /// caller's attributes.
    fn common_attributes(&self) -> String {
        let start_class = if self.is_start_button {
            Some("govuk-button--start")
        } else {
            None
        };
        let common = Attributes::new()
            .with(
                "class",
                class_names("govuk-button", [self.classes.as_deref(), start_class]),
            )
            .with("data-module", "govuk-button")
            .with("id", AttributeValue::optional(non_empty(&self.id)));
        return common.encode() + &encode_attributes(self.attributes.as_ref());
    }

    /// Attributes for `<button>` and `<input>`. Inputs pass their own `value`.
    fn button_attributes(&self, value: Option<&str>) -> String {
        let mut attributes = Attributes::new()
            .with("value", AttributeValue::optional(value))
            .with("name", AttributeValue::optional(non_empty(&self.name)))
            .with("type", non_empty(&self.button_type).unwrap_or("submit"))
            .with("disabled", AttributeValue::optional(self.disabled));
        if self.disabled {
            attributes.insert("aria-disabled", "true");
        }
        if let Some(prevent) = self.prevent_double_click {
            // Always rendered as "true" or "false" once set.
            attributes.insert("data-prevent-double-click", prevent);
        }
        return attributes.encode();
    }
}

impl Render for ButtonParams {
    fn render(&self) -> SanitizedHTML {
        let element = self.element();
        debug!(%element, id = ?self.id, "rendering button");

        let content = Content::from_fields(self.html.as_deref(), self.text.as_deref())
            .map(|content| content.to_html())
            .unwrap_or_default();
        let icon = if self.is_start_button {
            format!("\n  {}", START_ICON)
        } else {
            String::new()
        };

        let html = match element {
            ButtonElement::A => {
                let link = Attributes::new()
                    .with("href", non_empty(&self.href).unwrap_or("#"))
                    .with("role", "button")
                    .with("draggable", "false");
                format!(
                    "<a{}{}>\n  {}{}\n</a>",
                    link.encode(),
                    self.common_attributes(),
                    indent(content.as_str(), 2),
                    icon
                )
            }
            ButtonElement::Button => format!(
                "<button{}{}>\n  {}{}\n</button>",
                self.button_attributes(non_empty(&self.value)),
                self.common_attributes(),
                indent(content.as_str(), 2),
                icon
            ),
            ButtonElement::Input => {
                // Inputs carry their label in `value`, so only plain text applies.
                format!(
                    "<input{}{}>",
                    self.button_attributes(Some(self.text.as_deref().unwrap_or(""))),
                    self.common_attributes()
                )
            }
        };
        return SanitizedHTML::from_string_unsafe(html);
    }
}

pub fn render_button(params: &ButtonParams) -> SanitizedHTML {
    params.render()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(json: &str) -> ButtonParams {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_default_button() {
        assert_eq!(
            render_button(&params(r#"{"text": "Save and continue"}"#)).as_str(),
            "<button type=\"submit\" class=\"govuk-button\" data-module=\"govuk-button\">\n  \
             Save and continue\n</button>"
        );
    }

    #[test]
    fn test_disabled_button_with_name_and_value() {
        assert_eq!(
            render_button(&params(
                r#"{"text": "Go", "name": "action", "value": "go", "disabled": true, "id": "go"}"#
            ))
            .as_str(),
            "<button value=\"go\" name=\"action\" type=\"submit\" disabled aria-disabled=\"true\" \
             class=\"govuk-button\" data-module=\"govuk-button\" id=\"go\">\n  Go\n</button>"
        );
    }

    #[test]
    fn test_prevent_double_click_renders_both_values() {
        let on = render_button(&params(r#"{"text": "Pay", "preventDoubleClick": true}"#));
        assert!(on.as_str().contains(" data-prevent-double-click=\"true\""));
        let off = render_button(&params(r#"{"text": "Pay", "preventDoubleClick": false}"#));
        assert!(off.as_str().contains(" data-prevent-double-click=\"false\""));
        let unset = render_button(&params(r#"{"text": "Pay"}"#));
        assert!(!unset.as_str().contains("data-prevent-double-click"));
    }

    #[test]
    fn test_href_implies_link() {
        assert_eq!(
            render_button(&params(r#"{"text": "Start", "href": "/start?a=1&b=2"}"#)).as_str(),
            "<a href=\"/start?a=1&#38;b=2\" role=\"button\" draggable=\"false\" \
             class=\"govuk-button\" data-module=\"govuk-button\">\n  Start\n</a>"
        );
    }

    #[test]
    fn test_link_without_href() {
        let html = render_button(&params(r#"{"text": "Start", "element": "A"}"#));
        assert!(html.as_str().starts_with("<a href=\"#\" role=\"button\""));
    }

    #[test]
    fn test_start_button() {
        let html = render_button(&params(
            r#"{"text": "Start now", "href": "/start", "isStartButton": true}"#,
        ));
        assert!(html
            .as_str()
            .contains(" class=\"govuk-button govuk-button--start\""));
        assert!(html.as_str().contains("Start now\n  <svg class=\"govuk-button__start-icon\""));
        assert!(html.as_str().ends_with("</svg>\n</a>"));
    }

    #[test]
    fn test_input_button() {
        assert_eq!(
            render_button(&params(
                r#"{"element": "input", "text": "Submit <form>", "type": "button", "attributes": {"formnovalidate": {"value": true, "optional": true}}}"#
            ))
            .as_str(),
            "<input value=\"Submit &#60;form&#62;\" type=\"button\" \
             class=\"govuk-button\" data-module=\"govuk-button\" formnovalidate>"
        );
    }

    #[test]
    fn test_unknown_element_falls_back() {
        let html = render_button(&params(r#"{"text": "Go", "element": "marquee"}"#));
        assert!(html.as_str().starts_with("<button type=\"submit\""));
    }

    #[test]
    fn test_html_content_is_trusted() {
        let html = render_button(&params(
            r#"{"html": "Save <span class=\"govuk-visually-hidden\">draft</span>", "text": "x"}"#,
        ));
        assert!(html
            .as_str()
            .contains("\n  Save <span class=\"govuk-visually-hidden\">draft</span>\n"));
    }
}
