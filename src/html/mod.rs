use std::fmt;
use std::rc::Rc;

/// Escapes `&`, `<`, `>`, `"` and `'` as numeric character references.
///
/// The output is safe to embed both as element text and inside a double- or
/// single-quoted attribute value. Escaping is applied exactly once: an
/// already-escaped string is escaped again (`&amp;` becomes `&#38;amp;`).
pub fn escape_html(s: &str) -> String {
    let len = s
        .chars()
        .map(|c| match c {
            '&' | '<' | '>' | '"' | '\'' => 5,
            _ => c.len_utf8(),
        })
        .sum();
    let mut result = String::with_capacity(len);
    for c in s.chars() {
        match c {
            '&' => result.push_str("&#38;"),
            '<' => result.push_str("&#60;"),
            '>' => result.push_str("&#62;"),
            '"' => result.push_str("&#34;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

/// Markup that is trusted to be embedded without escaping.
///
/// Values only enter this type through [SanitizedHTML::escaped], which escapes
/// its input, or [SanitizedHTML::from_string_unsafe], where the caller takes
/// responsibility for the markup being safe. Nothing here sanitizes HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizedHTML(String);

impl SanitizedHTML {
    /// Wraps markup the caller asserts is already safe. This is the trust
    /// boundary for user-supplied `html` fields: it is emitted verbatim.
    pub fn from_string_unsafe(html: impl Into<String>) -> SanitizedHTML {
        return SanitizedHTML(html.into());
    }

    /// Escapes plain text into markup.
    pub fn escaped(text: &str) -> SanitizedHTML {
        return SanitizedHTML(escape_html(text));
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for SanitizedHTML {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SanitizedHTML {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return f.write_str(&self.0);
    }
}

/// User content for a component, either plain text or trusted markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Text that is escaped on output.
    Text(Rc<str>),
    /// Markup emitted verbatim.
    Html(SanitizedHTML),
}

impl Content {
    /// Picks the content from a component's `html` and `text` options.
    ///
    /// A non-empty `html` wins over `text`; an empty value counts as absent.
    pub fn from_fields(html: Option<&str>, text: Option<&str>) -> Option<Content> {
        if let Some(html) = html.filter(|h| !h.is_empty()) {
            return Some(Content::Html(SanitizedHTML::from_string_unsafe(html)));
        }
        return text
            .filter(|t| !t.is_empty())
            .map(|t| Content::Text(Rc::from(t)));
    }

    pub fn to_html(&self) -> SanitizedHTML {
        match self {
            Content::Text(text) => SanitizedHTML::escaped(text),
            Content::Html(html) => html.clone(),
        }
    }
}
