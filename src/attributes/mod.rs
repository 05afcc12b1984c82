//! Serialization of HTML attribute lists.
//!
//! Every fragment produced here is space-prefixed so fragments can be
//! concatenated straight into an opening tag.

mod i18n;
mod json;

use std::fmt;
use std::rc::Rc;

use itertools::Itertools;
use tracing::trace;

use crate::html::escape_html;

pub use i18n::{encode_i18n_attributes, I18nRequest, PluralForms, Translation};

/// A bare attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(Rc<str>),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// An explicitly empty value. Renders as `""`.
    Null,
    /// No value at all. [encode_attribute] omits the attribute.
    Undefined,
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return match self {
            Scalar::String(s) => f.write_str(s),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(flt) => write_float(f, *flt),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Null | Scalar::Undefined => Ok(()),
        };
    }
}

/// Writes a float the way a browser would print the number.
fn write_float(f: &mut fmt::Formatter, flt: f64) -> fmt::Result {
    if flt.is_nan() {
        return f.write_str("NaN");
    }
    if flt.is_infinite() {
        return f.write_str(if flt > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if flt == 0.0 {
        // Covers -0.0 too.
        return f.write_str("0");
    }
    return write!(f, "{}", flt);
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Scalar::Undefined,
        }
    }
}

macro_rules! scalar_from {
    ($($source:ty => |$v:ident| $convert:expr),+ $(,)?) => {
        $(
            impl From<$source> for Scalar {
                fn from($v: $source) -> Self {
                    $convert
                }
            }

            impl From<$source> for AttributeValue {
                fn from(value: $source) -> Self {
                    AttributeValue::Plain(Scalar::from(value))
                }
            }
        )+
    };
}

scalar_from!(
    &str => |v| Scalar::String(Rc::from(v)),
    String => |v| Scalar::String(Rc::from(v)),
    Rc<str> => |v| Scalar::String(v),
    &String => |v| Scalar::String(Rc::from(v.as_str())),
    bool => |v| Scalar::Bool(v),
    i32 => |v| Scalar::Int(i64::from(v)),
    i64 => |v| Scalar::Int(v),
    u32 => |v| Scalar::Int(i64::from(v)),
    usize => |v| match i64::try_from(v) {
        Ok(i) => Scalar::Int(i),
        Err(_) => Scalar::Float(v as f64),
    },
    f64 => |v| Scalar::Float(v),
);

/// A value in an attribute map: either a bare scalar or a descriptor that
/// controls whether the attribute may be dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Equivalent to a descriptor with `optional: false`.
    Plain(Scalar),
    Descriptor { value: Scalar, optional: bool },
}

impl AttributeValue {
    /// An attribute that is dropped for `null`, `undefined` and `false`, and
    /// rendered bare for `true`.
    pub fn optional(value: impl Into<Scalar>) -> AttributeValue {
        return AttributeValue::Descriptor {
            value: value.into(),
            optional: true,
        };
    }

    /// An attribute that always renders as `name="value"`.
    pub fn required(value: impl Into<Scalar>) -> AttributeValue {
        return AttributeValue::Descriptor {
            value: value.into(),
            optional: false,
        };
    }

    pub fn value(&self) -> &Scalar {
        match self {
            AttributeValue::Plain(value) | AttributeValue::Descriptor { value, .. } => value,
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, AttributeValue::Descriptor { optional: true, .. })
    }
}

impl From<Scalar> for AttributeValue {
    fn from(value: Scalar) -> Self {
        AttributeValue::Plain(value)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        AttributeValue::Plain(Scalar::from(value))
    }
}

/// An ordered attribute map. Output order is insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes(Vec<(Rc<str>, AttributeValue)>);

impl Attributes {
    pub fn new() -> Attributes {
        return Attributes(vec![]);
    }

    /// Builder form of [Attributes::insert].
    pub fn with(mut self, name: impl Into<Rc<str>>, value: impl Into<AttributeValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets an attribute. Re-setting an existing name replaces its value but
    /// keeps its original position.
    pub fn insert(&mut self, name: impl Into<Rc<str>>, value: impl Into<AttributeValue>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.0
            .iter()
            .find(|(existing, _)| existing.as_ref() == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.0.iter().map(|(name, value)| (name.as_ref(), value))
    }

    /// Serializes every entry, in order, into one attribute string.
    pub fn encode(&self) -> String {
        self.0
            .iter()
            .map(|(name, value)| encode_entry(name, value))
            .join("")
    }
}

impl<K: Into<Rc<str>>, V: Into<AttributeValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (name, value) in iter {
            attributes.insert(name, value);
        }
        attributes
    }
}

impl<K: Into<Rc<str>>, V: Into<AttributeValue>> Extend<(K, V)> for Attributes {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

/// Attributes as supplied by a caller: already-serialized markup, or a map.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributesInput {
    /// Pre-formatted attribute markup, emitted unchanged.
    Raw(Rc<str>),
    Structured(Attributes),
}

impl AttributesInput {
    pub fn encode(&self) -> String {
        match self {
            AttributesInput::Raw(raw) => raw.to_string(),
            AttributesInput::Structured(attributes) => attributes.encode(),
        }
    }
}

impl Default for AttributesInput {
    fn default() -> Self {
        AttributesInput::Structured(Attributes::new())
    }
}

impl From<Attributes> for AttributesInput {
    fn from(value: Attributes) -> Self {
        AttributesInput::Structured(value)
    }
}

impl From<&str> for AttributesInput {
    fn from(value: &str) -> Self {
        AttributesInput::Raw(Rc::from(value))
    }
}

impl From<String> for AttributesInput {
    fn from(value: String) -> Self {
        AttributesInput::Raw(Rc::from(value))
    }
}

/// Serializes a single attribute as ` name="value"`.
///
/// An undefined value omits the attribute; `null` renders an empty value.
pub fn encode_attribute(name: &str, value: impl Into<Scalar>) -> String {
    let value = value.into();
    if let Scalar::Undefined = value {
        return String::new();
    }
    return format!(
        " {}=\"{}\"",
        escape_html(name),
        escape_html(&value.to_string())
    );
}

/// Serializes an attribute map, or passes pre-formatted markup through.
pub fn encode_attributes(input: Option<&AttributesInput>) -> String {
    input.map(AttributesInput::encode).unwrap_or_default()
}

fn encode_entry(name: &str, value: &AttributeValue) -> String {
    let scalar = value.value();
    if value.is_optional() {
        match scalar {
            Scalar::Bool(true) => return format!(" {}", escape_html(name)),
            Scalar::Null | Scalar::Undefined | Scalar::Bool(false) => {
                trace!(attribute = name, "dropping empty optional attribute");
                return String::new();
            }
            _ => {}
        }
    }
    return format!(
        " {}=\"{}\"",
        escape_html(name),
        escape_html(&scalar.to_string())
    );
}
