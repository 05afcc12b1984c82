//! Interprets parsed attribute literals into [Attributes].
//!
//! ```text
//! type=radio          plain value
//! checked?=true       optional value (bare `checked`)
//! checked?="true"     optional string value (`checked="true"`)
//! hidden?             optional with no value (dropped)
//! ```

#[macro_use]
mod base;

use pest::iterators::{Pair, Pairs};
use pest::Parser;

use crate::attributes::{AttributeValue, Attributes, Scalar};
use crate::parser::{AttributeParser, Rule};
use base::FromPair;
use std::rc::Rc;
use std::result::Result;

pub use base::{Error, LineCol, LinePosition};

fn next_pair<'a>(
    parent: &Pair<'a, Rule>,
    pairs: &mut Pairs<'a, Rule>,
) -> Result<Pair<'a, Rule>, Error> {
    return match pairs.next() {
        Some(pair) => Ok(pair),
        _ => Err(Error::missing_pair(parent)),
    };
}

fn interpret_attribute<'a>(attribute: Pair<'a, Rule>) -> Result<(Rc<str>, AttributeValue), Error> {
    let mut pairs = attribute.clone().into_inner();
    let name_pair = next_pair(&attribute, &mut pairs)?;
    let name: Rc<str>;
    process_pair!(name_pair, Rule::name, Rule::name, {
        name = Rc::from(name_pair.as_str());
    });

    let mut optional = false;
    let mut value = Scalar::Undefined;
    for pair in pairs {
        match pair.as_rule() {
            Rule::optional_marker => optional = true,
            // `name=` with nothing after it is an empty string.
            Rule::assign => value = Scalar::String(Rc::from("")),
            _ => value = Scalar::from_pair(pair)?,
        }
    }

    let value = if optional {
        AttributeValue::optional(value)
    } else {
        AttributeValue::Plain(value)
    };
    return Ok((name, value));
}

fn interpret_list<'a>(pairs: Pairs<'a, Rule>, into: &mut Attributes) -> Result<(), Error> {
    for pair in pairs {
        process_pair!(
            pair,
            Rule::attribute,
            Rule::attribute,
            {
                let (name, value) = interpret_attribute(pair)?;
                into.insert(name, value);
            },
            Rule::EOI,
            Rule::EOI,
            { break },
        );
    }
    return Ok(());
}

/// Parses a literal holding exactly one attribute.
pub fn parse_attribute(literal: &str) -> Result<(Rc<str>, AttributeValue), Error> {
    let mut attributes = Attributes::new();
    interpret_list(AttributeParser::parse(Rule::attribute_list, literal)?, &mut attributes)?;
    if attributes.len() != 1 {
        return Err(Error::NotSingleAttribute(attributes.len()));
    }
    return match attributes.iter().next() {
        Some((name, value)) => Ok((Rc::from(name), value.clone())),
        None => Err(Error::NotSingleAttribute(0)),
    };
}

/// Parses any number of literals, each holding zero or more whitespace
/// separated attributes, into one ordered map.
pub fn parse_attributes<S: AsRef<str>>(literals: &[S]) -> Result<Attributes, Error> {
    let mut attributes = Attributes::new();
    for literal in literals {
        let pairs = AttributeParser::parse(Rule::attribute_list, literal.as_ref())?;
        interpret_list(pairs, &mut attributes)?;
    }
    return Ok(attributes);
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! assert_parses {
        ($($literal:expr => ($name:expr, $value:expr)),+ $(,)?) => {
            $(
                let (name, value) = parse_attribute($literal).unwrap();
                assert_eq!(name.as_ref(), $name, "literal: {}", $literal);
                assert_eq!(value, $value, "literal: {}", $literal);
            )+
        };
    }

    #[test]
    fn test_parse_plain_values() {
        assert_parses!(
            "type=radio" => ("type", AttributeValue::from("radio")),
            "data-count=0" => ("data-count", AttributeValue::from(0)),
            "data-ratio=0.5" => ("data-ratio", AttributeValue::from(0.5)),
            "data-flag=true" => ("data-flag", AttributeValue::from(true)),
            "data-null=null" => ("data-null", AttributeValue::from(Scalar::Null)),
            "data-u=undefined" => ("data-u", AttributeValue::from(Scalar::Undefined)),
            "data-empty=" => ("data-empty", AttributeValue::from("")),
            "novalue" => ("novalue", AttributeValue::from(Scalar::Undefined)),
        );
    }

    #[test]
    fn test_parse_optional_values() {
        assert_parses!(
            "checked?=true" => ("checked", AttributeValue::optional(true)),
            "checked?=\"true\"" => ("checked", AttributeValue::optional("true")),
            "hidden?" => ("hidden", AttributeValue::optional(Scalar::Undefined)),
            "data-zero?=0" => ("data-zero", AttributeValue::optional(0)),
        );
    }

    #[test]
    fn test_parse_quoted_escapes() {
        assert_parses!(
            r#"title="say \"hi\"""# => ("title", AttributeValue::from("say \"hi\"")),
            r#"path="C:\\dir""# => ("path", AttributeValue::from("C:\\dir")),
            r#"title="two words""# => ("title", AttributeValue::from("two words")),
        );
    }

    #[test]
    fn test_huge_integers_become_floats() {
        let (_, value) = parse_attribute("n=99999999999999999999").unwrap();
        assert_eq!(value, AttributeValue::from(1e20));
    }

    #[test]
    fn test_parse_attributes_in_order() {
        let attributes =
            parse_attributes(&["type=radio checked?=true", "hidden?=false", "value=\"\""])
                .unwrap();
        assert_eq!(attributes.len(), 4);
        assert_eq!(attributes.encode(), " type=\"radio\" checked value=\"\"");
    }

    #[test]
    fn test_parse_attributes_falsy_and_string_values() {
        let attributes = parse_attributes(&[
            "example-falsy-1?=\"\"",
            "example-falsy-2?=0",
            "checked?=\"true\"",
        ])
        .unwrap();
        assert_eq!(
            attributes.encode(),
            " example-falsy-1=\"\" example-falsy-2=\"0\" checked=\"true\""
        );
    }

    #[test]
    fn test_parse_attribute_requires_one() {
        assert!(matches!(
            parse_attribute("a=1 b=2"),
            Err(Error::NotSingleAttribute(2))
        ));
        assert!(matches!(
            parse_attribute(""),
            Err(Error::NotSingleAttribute(0))
        ));
    }

    #[test]
    fn test_syntax_error_reports_position() {
        let err = parse_attributes(&["ok=1 =bad"]).unwrap_err();
        assert!(matches!(err, Error::Syntax(_)));
        assert!(err.to_string().starts_with("invalid attribute literal"));
    }
}
