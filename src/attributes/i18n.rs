use std::fmt;
use std::rc::Rc;

use itertools::Itertools;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

use super::encode_attribute;

/// Translation data attributes for one message key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct I18nRequest {
    pub key: Rc<str>,
    pub message: Option<Rc<str>>,
    /// Plural rule name to message, in output order.
    pub messages: Vec<(Rc<str>, Rc<str>)>,
}

impl I18nRequest {
    pub fn new(key: impl Into<Rc<str>>) -> I18nRequest {
        return I18nRequest {
            key: key.into(),
            message: None,
            messages: vec![],
        };
    }

    pub fn with_message(mut self, message: impl Into<Rc<str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_plural(mut self, rule: impl Into<Rc<str>>, message: impl Into<Rc<str>>) -> Self {
        self.messages.push((rule.into(), message.into()));
        self
    }

    /// Fills the request from a component option that may be a single message
    /// or a set of plural forms.
    pub fn with_translation(self, translation: Option<&Translation>) -> Self {
        match translation {
            Some(Translation::Message(message)) => self.with_message(message.as_str()),
            Some(Translation::Plural(forms)) => forms
                .iter()
                .fold(self, |request, (rule, message)| {
                    request.with_plural(rule, message)
                }),
            None => self,
        }
    }

    pub fn encode(&self) -> String {
        encode_i18n_attributes(self)
    }
}

/// Serializes translation data attributes.
///
/// Plural forms, when there are any, replace the single message entirely:
/// each form becomes ` data-i18n.{key}.{rule}="message"`. Otherwise the
/// single message becomes ` data-i18n.{key}="message"`. With neither, nothing
/// is emitted.
pub fn encode_i18n_attributes(request: &I18nRequest) -> String {
    if !request.messages.is_empty() {
        return request
            .messages
            .iter()
            .map(|(rule, message)| {
                encode_attribute(
                    &format!("data-i18n.{}.{}", request.key, rule),
                    Rc::clone(message),
                )
            })
            .join("");
    }
    return match &request.message {
        Some(message) => encode_attribute(
            &format!("data-i18n.{}", request.key),
            Rc::clone(message),
        ),
        None => String::new(),
    };
}

/// A component option holding either one message or plural forms.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(untagged)]
pub enum Translation {
    Message(String),
    Plural(PluralForms),
}

/// Plural rule name to message, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluralForms(Vec<(String, String)>);

impl PluralForms {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(rule, message)| (rule.as_str(), message.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<R: Into<String>, M: Into<String>> FromIterator<(R, M)> for PluralForms {
    fn from_iter<I: IntoIterator<Item = (R, M)>>(iter: I) -> Self {
        PluralForms(
            iter.into_iter()
                .map(|(rule, message)| (rule.into(), message.into()))
                .collect(),
        )
    }
}

struct PluralFormsVisitor;

impl<'de> Visitor<'de> for PluralFormsVisitor {
    type Value = PluralForms;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of plural rule names to messages")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut forms = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((rule, message)) = map.next_entry::<String, String>()? {
            forms.push((rule, message));
        }
        Ok(PluralForms(forms))
    }
}

impl<'de> Deserialize<'de> for PluralForms {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PluralFormsVisitor)
    }
}
