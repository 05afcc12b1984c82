//! HTML attribute encoding and design-system components.
//!
//! The encoders in [attributes] turn caller-supplied values into escaped,
//! space-prefixed attribute fragments; the renderers in [components] build on
//! them. Text goes through [html::escape_html] exactly once; markup the caller
//! vouches for travels as [html::SanitizedHTML].
//!
//! ```
//! use govuk_render::attributes::{encode_attributes, AttributeValue, Attributes};
//!
//! let attributes = Attributes::new()
//!     .with("type", "radio")
//!     .with("checked", AttributeValue::optional(true));
//! assert_eq!(encode_attributes(Some(&attributes.into())), " type=\"radio\" checked");
//! ```

pub mod attributes;
pub mod components;
pub mod html;
pub mod parser;
pub mod semantics;

pub use attributes::{
    encode_attribute, encode_attributes, encode_i18n_attributes, AttributeValue, Attributes,
    AttributesInput, I18nRequest, Scalar,
};
pub use components::{Component, Render};
pub use html::{escape_html, Content, SanitizedHTML};
