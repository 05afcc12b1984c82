use serde::Deserialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};
use tracing::debug;

use super::{class_names, non_empty, ErrorMessageParams, HintParams, LabelParams, Render};
use crate::attributes::{
    encode_attributes, AttributeValue, Attributes, AttributesInput, I18nRequest, Translation,
};
use crate::html::{escape_html, SanitizedHTML};

static DEFAULT_ROWS: u32 = 5;

/// Messages the character count script shows as the user types. The display
/// form is the translation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
enum CountMessage {
    CharactersUnderLimit,
    CharactersAtLimit,
    CharactersOverLimit,
    WordsUnderLimit,
    WordsAtLimit,
    WordsOverLimit,
}

/// Options for the message under the textarea.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CountMessageParams {
    pub classes: Option<String>,
}

/// Options for a textarea that counts characters or words.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterCountParams {
    pub id: String,
    pub name: String,
    pub rows: Option<u32>,
    pub value: Option<String>,
    pub maxlength: Option<u32>,
    pub maxwords: Option<u32>,
    /// Percentage of the limit at which the count message appears.
    pub threshold: Option<u32>,
    pub label: Option<LabelParams>,
    pub hint: Option<HintParams>,
    pub error_message: Option<ErrorMessageParams>,
    pub classes: Option<String>,
    pub spellcheck: Option<bool>,
    pub attributes: Option<AttributesInput>,
    pub count_message: Option<CountMessageParams>,
    /// Fallback description, with `%{count}` standing for the limit.
    pub textarea_description_text: Option<String>,
    pub characters_under_limit_text: Option<Translation>,
    pub characters_at_limit_text: Option<String>,
    pub characters_over_limit_text: Option<Translation>,
    pub words_under_limit_text: Option<Translation>,
    pub words_at_limit_text: Option<String>,
    pub words_over_limit_text: Option<Translation>,
}

impl CharacterCountParams {
    fn limit(&self) -> Option<u32> {
        self.maxwords.or(self.maxlength)
    }

    fn description_template(&self) -> String {
        match non_empty(&self.textarea_description_text) {
            Some(text) => text.to_owned(),
            None => format!(
                "You can enter up to %{{count}} {}",
                if self.maxwords.is_some() {
                    "words"
                } else {
                    "characters"
                }
            ),
        }
    }

    fn translation(&self, message: CountMessage) -> Option<Translation> {
        let single = |text: &Option<String>| text.clone().map(Translation::Message);
        match message {
            CountMessage::CharactersUnderLimit => self.characters_under_limit_text.clone(),
            CountMessage::CharactersAtLimit => single(&self.characters_at_limit_text),
            CountMessage::CharactersOverLimit => self.characters_over_limit_text.clone(),
            CountMessage::WordsUnderLimit => self.words_under_limit_text.clone(),
            CountMessage::WordsAtLimit => single(&self.words_at_limit_text),
            CountMessage::WordsOverLimit => self.words_over_limit_text.clone(),
        }
    }

    /// Data attributes configuring the count script, as one pre-built string.
    fn module_attributes(&self) -> AttributesInput {
        let limits = Attributes::new()
            .with("data-maxlength", AttributeValue::optional(self.maxlength))
            .with("data-threshold", AttributeValue::optional(self.threshold))
            .with("data-maxwords", AttributeValue::optional(self.maxwords));
        let mut html = limits.encode();
        if self.limit().is_none() {
            let description = I18nRequest::new("textarea-description")
                .with_plural("other", self.description_template());
            html.push_str(&description.encode());
        }
        for message in CountMessage::iter() {
            let request = I18nRequest::new(message.to_string())
                .with_translation(self.translation(message).as_ref());
            html.push_str(&request.encode());
        }
        return AttributesInput::from(html);
    }

    fn info_id(&self) -> String {
        format!("{}-info", self.id)
    }

    fn render_hint(&self) -> Option<(String, SanitizedHTML)> {
        let hint = self.hint.as_ref()?;
        let id = non_empty(&hint.id)
            .map(str::to_owned)
            .unwrap_or_else(|| format!("{}-hint", self.id));
        let hint = HintParams {
            id: Some(id.clone()),
            ..hint.clone()
        };
        Some((id, hint.render()))
    }

    fn render_error_message(&self) -> Option<(String, SanitizedHTML)> {
        let error = self.error_message.as_ref()?;
        let id = non_empty(&error.id)
            .map(str::to_owned)
            .unwrap_or_else(|| format!("{}-error", self.id));
        let error = ErrorMessageParams {
            id: Some(id.clone()),
            ..error.clone()
        };
        Some((id, error.render()))
    }

    fn render_count_message(&self) -> SanitizedHTML {
        let text = match self.limit() {
            Some(limit) => self
                .description_template()
                .replace("%{count}", &limit.to_string()),
            None => String::new(),
        };
        let classes = class_names(
            "govuk-character-count__message",
            [self
                .count_message
                .as_ref()
                .and_then(|message| message.classes.as_deref())],
        );
        HintParams {
            text: Some(text),
            id: Some(self.info_id()),
            classes: Some(classes),
            ..Default::default()
        }
        .render()
    }
}

impl Render for CharacterCountParams {
    fn render(&self) -> SanitizedHTML {
        debug!(id = %self.id, limit = ?self.limit(), "rendering character count");

        let label = LabelParams {
            for_id: Some(self.id.clone()),
            ..self.label.clone().unwrap_or_default()
        }
        .render();
        let hint = self.render_hint();
        let error = self.render_error_message();

        let described_by = std::iter::once(self.info_id())
            .chain(hint.as_ref().map(|(id, _)| id.clone()))
            .chain(error.as_ref().map(|(id, _)| id.clone()))
            .collect::<Vec<_>>()
            .join(" ");
        let error_class = error.as_ref().map(|_| "govuk-textarea--error");
        let mut textarea = Attributes::new()
            .with(
                "class",
                class_names(
                    "govuk-textarea govuk-js-character-count",
                    [error_class, self.classes.as_deref()],
                ),
            )
            .with("id", self.id.as_str())
            .with("name", self.name.as_str())
            .with("rows", self.rows.unwrap_or(DEFAULT_ROWS));
        if let Some(spellcheck) = self.spellcheck {
            textarea.insert("spellcheck", spellcheck);
        }
        textarea.insert("aria-describedby", described_by);

        let group = Attributes::new()
            .with(
                "class",
                class_names(
                    "govuk-form-group",
                    [
                        error.as_ref().map(|_| "govuk-form-group--error"),
                        Some("govuk-character-count"),
                    ],
                ),
            )
            .with("data-module", "govuk-character-count");

        let mut lines = vec![format!(
            "<div{}{}>",
            group.encode(),
            encode_attributes(Some(&self.module_attributes()))
        )];
        if !label.is_empty() {
            lines.push(format!("  {}", label.as_str().replace('\n', "\n  ")));
        }
        for (_, html) in hint.iter().chain(error.iter()) {
            lines.push(format!("  {}", html.as_str().replace('\n', "\n  ")));
        }
        lines.push(format!(
            "  <textarea{}{}>{}</textarea>",
            textarea.encode(),
            encode_attributes(self.attributes.as_ref()),
            escape_html(self.value.as_deref().unwrap_or(""))
        ));
        lines.push(format!(
            "  {}",
            self.render_count_message().as_str().replace('\n', "\n  ")
        ));
        lines.push("</div>".to_owned());
        return SanitizedHTML::from_string_unsafe(lines.join("\n"));
    }
}

pub fn render_character_count(params: &CharacterCountParams) -> SanitizedHTML {
    params.render()
}
