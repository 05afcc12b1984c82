use serde::Deserialize;
use tracing::debug;

use super::{class_names, indent, non_empty, Render};
use crate::attributes::{encode_attributes, AttributeValue, Attributes, AttributesInput};
use crate::html::{Content, SanitizedHTML};

/// Options for a form field label.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelParams {
    pub text: Option<String>,
    /// Trusted markup, emitted without escaping. Takes precedence over `text`.
    pub html: Option<String>,
    /// The id of the field the label is for.
    #[serde(rename = "for")]
    pub for_id: Option<String>,
    pub is_page_heading: bool,
    pub classes: Option<String>,
    pub attributes: Option<AttributesInput>,
}

impl Render for LabelParams {
    /// Renders nothing when there is no label content.
    fn render(&self) -> SanitizedHTML {
        let content = match Content::from_fields(self.html.as_deref(), self.text.as_deref()) {
            Some(content) => content.to_html(),
            None => return SanitizedHTML::default(),
        };
        debug!(for_id = ?self.for_id, "rendering label");

        let class = Attributes::new().with(
            "class",
            class_names("govuk-label", [self.classes.as_deref()]),
        );
        let for_id = Attributes::new().with("for", AttributeValue::optional(non_empty(&self.for_id)));
        let label = format!(
            "<label{}{}{}>\n  {}\n</label>",
            class.encode(),
            encode_attributes(self.attributes.as_ref()),
            for_id.encode(),
            indent(content.as_str(), 2)
        );

        if self.is_page_heading {
            return SanitizedHTML::from_string_unsafe(format!(
                "<h1 class=\"govuk-label-wrapper\">\n  {}\n</h1>",
                indent(&label, 2)
            ));
        }
        return SanitizedHTML::from_string_unsafe(label);
    }
}

pub fn render_label(params: &LabelParams) -> SanitizedHTML {
    params.render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label() {
        let params: LabelParams = serde_json::from_str(
            r#"{"text": "Full name", "for": "full-name", "attributes": {"data-a": "b"}}"#,
        )
        .unwrap();
        assert_eq!(
            render_label(&params).as_str(),
            "<label class=\"govuk-label\" data-a=\"b\" for=\"full-name\">\n  Full name\n</label>"
        );
    }

    #[test]
    fn test_label_without_content_is_empty() {
        let params = LabelParams {
            for_id: Some("full-name".to_owned()),
            ..Default::default()
        };
        assert!(render_label(&params).is_empty());
    }

    #[test]
    fn test_label_as_page_heading() {
        let params = LabelParams {
            text: Some("What is your name?".to_owned()),
            classes: Some("govuk-label--l".to_owned()),
            is_page_heading: true,
            ..Default::default()
        };
        assert_eq!(
            render_label(&params).as_str(),
            "<h1 class=\"govuk-label-wrapper\">\n  \
             <label class=\"govuk-label govuk-label--l\">\n    \
             What is your name?\n  \
             </label>\n</h1>"
        );
    }
}
