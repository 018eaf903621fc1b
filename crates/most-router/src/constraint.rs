/// Built-in parameter types for route templates
///
/// A typed placeholder such as `{id:int}` validates the captured text against
/// the type's pattern, then coerces the URL-decoded text with the type's parser.
use std::borrow::Cow;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::inflect::singularize;
use crate::value::ParamValue;

// Case folding is ASCII-only (`-u`) so no non-ASCII text passes a pattern.
static INT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?-u)^[1-9][0-9]*$").unwrap());
static BOOLEAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i-u)^(?:true|false)$").unwrap());
static DECIMAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?-u)^[0-9]*\.?[0-9]*$").unwrap());
static GUID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i-u)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$",
    )
    .unwrap()
});
static PLURAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i-u)^[a-z]+$").unwrap());
static STRING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^'(.*)'$").unwrap());
static DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?-u)^(?i:datetime)?'[0-9]{4}-(?:0[1-9]|1[0-2])-(?:0[1-9]|[12][0-9]|3[01])",
        r"(?:[T ](?:[01][0-9]|2[0-3]):[0-5][0-9](?::[0-5][0-9](?:\.[0-9]{1,9})?)?",
        r"(?:Z|[+-](?:[01][0-9]|2[0-3]):[0-5][0-9])?)?'$",
    ))
    .unwrap()
});

/// Type tag of a route parameter
///
/// # Examples
///
/// ```
/// use most_router::{ParameterConstraint, ParamValue};
///
/// let int = ParameterConstraint::from_str("int");
/// assert_eq!(int, ParameterConstraint::Int);
/// assert_eq!(int.extract("45"), Some(ParamValue::Int(45)));
/// assert_eq!(int.extract("abc"), None);
///
/// // Unknown tags constrain nothing
/// assert_eq!(ParameterConstraint::from_str("slug"), ParameterConstraint::Any);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterConstraint {
    /// Positive integer without leading zero, parsed to `i64`
    Int,
    /// `true` or `false` in any case
    Boolean,
    /// Unsigned decimal number, parsed to `f64`
    Decimal,
    /// Same as `Decimal`
    Float,
    /// GUID text, kept as a string
    Guid,
    /// Plural English noun, singularized
    Plural,
    /// Quoted literal (`'text'`), quotes removed
    String,
    /// OData date literal (`datetime'2020-01-01T10:00:00Z'`)
    Date,
    /// No constraint
    Any,
}

impl ParameterConstraint {
    /// Maps a template type tag to a constraint; unknown tags map to `Any`
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(tag: &str) -> Self {
        match tag.trim() {
            "int" => ParameterConstraint::Int,
            "boolean" => ParameterConstraint::Boolean,
            "decimal" => ParameterConstraint::Decimal,
            "float" => ParameterConstraint::Float,
            "guid" => ParameterConstraint::Guid,
            "plural" => ParameterConstraint::Plural,
            "string" => ParameterConstraint::String,
            "date" => ParameterConstraint::Date,
            _ => ParameterConstraint::Any,
        }
    }

    /// Pattern the raw captured text must match, if any
    pub fn pattern(&self) -> Option<&'static Regex> {
        match self {
            ParameterConstraint::Int => Some(&INT),
            ParameterConstraint::Boolean => Some(&BOOLEAN),
            ParameterConstraint::Decimal | ParameterConstraint::Float => Some(&DECIMAL),
            ParameterConstraint::Guid => Some(&GUID),
            ParameterConstraint::Plural => Some(&PLURAL),
            ParameterConstraint::String => Some(&STRING),
            ParameterConstraint::Date => Some(&DATE),
            ParameterConstraint::Any => None,
        }
    }

    /// Checks raw captured text against the type pattern
    pub fn validate(&self, raw: &str) -> bool {
        self.pattern().map_or(true, |re| re.is_match(raw))
    }

    /// Coerces a decoded value; `None` when the text cannot be represented
    pub fn parse(&self, value: &str) -> Option<ParamValue> {
        match self {
            ParameterConstraint::Int => value.parse::<i64>().ok().map(ParamValue::Int),
            ParameterConstraint::Boolean => Some(ParamValue::Bool(value.eq_ignore_ascii_case("true"))),
            ParameterConstraint::Decimal | ParameterConstraint::Float => {
                value.parse::<f64>().ok().map(ParamValue::Decimal)
            }
            ParameterConstraint::Plural => Some(ParamValue::String(singularize(value))),
            ParameterConstraint::String => Some(ParamValue::String(strip_quotes(value).to_string())),
            ParameterConstraint::Date => parse_date(value).map(ParamValue::Date),
            ParameterConstraint::Guid | ParameterConstraint::Any => {
                Some(ParamValue::String(value.to_string()))
            }
        }
    }

    /// Validates, URL-decodes and coerces one captured segment
    ///
    /// The pattern is checked against the raw text; the parser sees the
    /// decoded text (or the raw text if it was not percent-encoded).
    pub fn extract(&self, raw: &str) -> Option<ParamValue> {
        if !self.validate(raw) {
            return None;
        }
        let decoded = urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw));
        self.parse(&decoded)
    }
}

impl Default for ParameterConstraint {
    fn default() -> Self {
        ParameterConstraint::Any
    }
}

fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix('\'').unwrap_or(value);
    value.strip_suffix('\'').unwrap_or(value)
}

/// Parses an OData date literal; values without a zone are taken as UTC
fn parse_date(value: &str) -> Option<DateTime<FixedOffset>> {
    let literal = match value.get(..8) {
        Some(prefix) if prefix.eq_ignore_ascii_case("datetime") => &value[8..],
        _ => value,
    };
    let (local, offset) = split_zone(strip_quotes(literal))?;

    let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(local, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(local, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    offset.from_local_datetime(&naive).single()
}

/// Splits a trailing `Z` or `+hh:mm`/`-hh:mm` zone off a date literal
fn split_zone(literal: &str) -> Option<(&str, FixedOffset)> {
    if let Some(local) = literal.strip_suffix('Z') {
        return Some((local, FixedOffset::east_opt(0)?));
    }

    // the date part itself holds `-` up to index 7
    let Some(at) = literal.rfind(|c: char| c == '+' || c == '-').filter(|&at| at > 10) else {
        return Some((literal, FixedOffset::east_opt(0)?));
    };
    let (local, zone) = literal.split_at(at);
    let (hours, minutes) = zone[1..].split_once(':')?;
    let seconds = hours.parse::<i32>().ok()? * 3600 + minutes.parse::<i32>().ok()? * 60;
    let offset = if zone.starts_with('-') {
        FixedOffset::west_opt(seconds)?
    } else {
        FixedOffset::east_opt(seconds)?
    };
    Some((local, offset))
}
