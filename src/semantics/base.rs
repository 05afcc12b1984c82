use pest::iterators::Pair;
use std::result::Result;
use std::{fmt, rc::Rc};

use crate::attributes::Scalar;
use crate::parser::Rule;

/// A data type that can be created from a parsed token pair.
pub trait FromPair
where
    Self: Sized,
{
    /// Converts the given pair into this data type.
    fn from_pair<'a>(pair: Pair<'a, Rule>) -> Result<Self, Error>;
}

macro_rules! process_pair {
    ($pair:ident, $($expected_rule:pat, $rule_type:expr, $process:expr),+) => {
        match $pair.as_rule() {
            $($expected_rule => $process),+
            _ => return Err(Error::unexpected_token(&$pair, vec![$($rule_type),+])),
        }
    };
    ($pair:ident, $($expected_rule:pat, $rule_type:expr, $process:expr,)+) => {
        match $pair.as_rule() {
            $($expected_rule => $process),+
            _ => return Err(Error::unexpected_token(&$pair, vec![$($rule_type),+])),
        }
    };
}

impl FromPair for Scalar {
    /// Creates a [Scalar] from any of the value rules.
    fn from_pair<'a>(pair: Pair<'a, Rule>) -> Result<Self, Error> {
        process_pair!(
            pair,
            Rule::boolean,
            Rule::boolean,
            {
                return match pair.as_str() {
                    "true" => Ok(Scalar::Bool(true)),
                    "false" => Ok(Scalar::Bool(false)),
                    other => Err(Error::unexpected_token_value(&pair, other)),
                };
            },
            Rule::null,
            Rule::null,
            { return Ok(Scalar::Null) },
            Rule::undefined,
            Rule::undefined,
            { return Ok(Scalar::Undefined) },
            Rule::int,
            Rule::int,
            {
                // Out-of-range integers degrade to floats, like any JS number.
                return match pair.as_str().parse::<i64>() {
                    Ok(i) => Ok(Scalar::Int(i)),
                    Err(_) => parse_float(&pair),
                };
            },
            Rule::float,
            Rule::float,
            { return parse_float(&pair) },
            Rule::string,
            Rule::string,
            {
                let inner = match pair.clone().into_inner().next() {
                    Some(inner) => inner,
                    None => return Err(Error::missing_pair(&pair)),
                };
                return Ok(Scalar::String(Rc::from(unescape(inner.as_str()))));
            },
            Rule::bare,
            Rule::bare,
            { return Ok(Scalar::String(Rc::from(pair.as_str()))) },
        );
    }
}

fn parse_float(pair: &Pair<'_, Rule>) -> Result<Scalar, Error> {
    return match pair.as_str().parse::<f64>() {
        Ok(flt) => Ok(Scalar::Float(flt)),
        Err(_) => Err(Error::unexpected_token_value(pair, pair.as_str())),
    };
}

/// Resolves `\"` and `\\` inside a quoted value.
fn unescape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                result.push(escaped);
                continue;
            }
        }
        result.push(c);
    }
    result
}

/// The 1-based line and column number of a position in the input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineCol(usize, usize);

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return write!(f, "(line {}, col {})", self.0, self.1);
    }
}

impl From<(usize, usize)> for LineCol {
    fn from(value: (usize, usize)) -> Self {
        let (line, col) = value;
        return LineCol(line, col);
    }
}

/// A position in a line, with the text of the whole line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinePosition(LineCol, Rc<str>);

impl fmt::Display for LinePosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return write!(f, "{}: {}", self.0, self.1);
    }
}

impl From<pest::Position<'_>> for LinePosition {
    fn from(value: pest::Position) -> Self {
        return LinePosition(value.line_col().into(), Rc::from(value.line_of()));
    }
}

impl From<&'_ pest::iterators::Pair<'_, Rule>> for LinePosition {
    fn from(value: &pest::iterators::Pair<'_, Rule>) -> Self {
        let loc = value.as_span().start_pos();
        return loc.into();
    }
}

#[derive(Debug, Clone)]
pub enum Error {
    /// The literal did not match the attribute grammar.
    Syntax(Box<pest::error::Error<Rule>>),
    /// An unexpected token `Rule` was received at line `LinePosition`, when rules in `Vec<Rule>` were expected.
    UnexpectedToken(Rule, Vec<Rule>, LinePosition),
    /// An unexpected token value was received from `Rule` at line `LinePosition`.
    UnexpectedTokenValue(Rule, Rc<str>, LinePosition),
    /// A pair was missing where it was expected. Includes the parent rule, and its line position.
    MissingPair(Rule, LinePosition),
    /// Exactly one attribute was expected, but the literal held this many.
    NotSingleAttribute(usize),
}

impl Error {
    pub fn missing_pair<'a>(parent_pair: &Pair<'a, Rule>) -> Error {
        return Self::MissingPair(parent_pair.as_rule(), parent_pair.into());
    }

    pub fn unexpected_token<'a>(pair: &Pair<'a, Rule>, expected_rules: Vec<Rule>) -> Error {
        return Self::UnexpectedToken(pair.as_rule(), expected_rules, pair.into());
    }

    pub fn unexpected_token_value<'a>(pair: &Pair<'a, Rule>, value: &'a str) -> Error {
        return Self::UnexpectedTokenValue(pair.as_rule(), Rc::from(value), pair.into());
    }
}

impl From<pest::error::Error<Rule>> for Error {
    fn from(value: pest::error::Error<Rule>) -> Self {
        return Self::Syntax(Box::new(value));
    }
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return match self {
            Self::Syntax(err) => write!(f, "invalid attribute literal\n{}", err),
            Self::MissingPair(parent, line) => write!(
                f,
                "expected token was missing; parent rule: {:?}, line: {}",
                parent, line
            ),
            Self::UnexpectedToken(found, expected, line) => write!(
                f,
                "received an unexpected token type {:?}; expected {:?} at line {}",
                found, expected, line
            ),
            Self::UnexpectedTokenValue(rule, found, line) => write!(
                f,
                "received an unexpected token value {} for rule {:?} at line {}",
                found, rule, line
            ),
            Self::NotSingleAttribute(count) => {
                write!(f, "expected exactly one attribute, found {}", count)
            }
        };
    }
}
