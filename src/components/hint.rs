use serde::Deserialize;
use tracing::debug;

use super::{class_names, indent, non_empty, Render};
use crate::attributes::{encode_attributes, AttributeValue, Attributes, AttributesInput};
use crate::html::{Content, SanitizedHTML};

/// Options for hint text under a form label.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HintParams {
    pub text: Option<String>,
    /// Trusted markup, emitted without escaping. Takes precedence over `text`.
    pub html: Option<String>,
    pub id: Option<String>,
    pub classes: Option<String>,
    pub attributes: Option<AttributesInput>,
}

impl Render for HintParams {
    fn render(&self) -> SanitizedHTML {
        debug!(id = ?self.id, "rendering hint");
        let own = Attributes::new()
            .with("id", AttributeValue::optional(non_empty(&self.id)))
            .with(
                "class",
                class_names("govuk-hint", [self.classes.as_deref()]),
            );
        let content = Content::from_fields(self.html.as_deref(), self.text.as_deref())
            .map(|content| content.to_html())
            .unwrap_or_default();
        return SanitizedHTML::from_string_unsafe(format!(
            "<div{}{}>\n  {}\n</div>",
            own.encode(),
            encode_attributes(self.attributes.as_ref()),
            indent(content.as_str(), 2)
        ));
    }
}

pub fn render_hint(params: &HintParams) -> SanitizedHTML {
    params.render()
}
