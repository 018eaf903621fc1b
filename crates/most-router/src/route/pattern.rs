/// Route template parsing
///
/// Pure functions turning a url template into its parameter table and the
/// regular expression source that matches it.
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ParameterConstraint;

/// Placeholder syntaxes: `{name}`, `{name:type}` and `:name`
///
/// Groups: 2 = brace name, 3 = brace type, 6 = colon name.
static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(\{([A-Za-z0-9_\[\]]+)(?::\s*((?:[^{}\\]+|\\.|\{(?:[^{}\\]+|\\.)*\})+))?\})",
        r"|((:)([A-Za-z0-9_\[\]]+))",
    ))
    .unwrap()
});

/// Characters a captured segment may contain
pub const SEGMENT_PATTERN: &str = r"([\$_\-.:',+=%0-9A-Za-z]+)";

/// One placeholder of a route template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteParam {
    pub name: String,
    pub constraint: ParameterConstraint,
}

impl RouteParam {
    pub fn new(name: impl Into<String>, constraint: ParameterConstraint) -> Self {
        Self {
            name: name.into(),
            constraint,
        }
    }
}

/// A segment of a route template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSegment {
    /// Literal text, matched verbatim
    Static(String),
    /// A placeholder
    Param(RouteParam),
}

/// Splits a template into literal and placeholder segments (pure function)
///
/// # Examples
///
/// ```
/// use most_router::route::pattern::{parse_template, TemplateSegment, RouteParam};
/// use most_router::ParameterConstraint;
///
/// let segments = parse_template("/users/{id:int}/:tab");
/// assert_eq!(segments, vec![
///     TemplateSegment::Static("/users/".to_string()),
///     TemplateSegment::Param(RouteParam::new("id", ParameterConstraint::Int)),
///     TemplateSegment::Static("/".to_string()),
///     TemplateSegment::Param(RouteParam::new("tab", ParameterConstraint::Any)),
/// ]);
/// ```
pub fn parse_template(template: &str) -> Vec<TemplateSegment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in TOKEN.captures_iter(template) {
        let Some(whole) = caps.get(0) else { continue };

        if whole.start() > last {
            segments.push(TemplateSegment::Static(template[last..whole.start()].to_string()));
        }
        last = whole.end();

        let param = match (caps.get(2), caps.get(6)) {
            (Some(name), _) => RouteParam::new(
                name.as_str(),
                caps.get(3)
                    .map(|tag| ParameterConstraint::from_str(tag.as_str()))
                    .unwrap_or_default(),
            ),
            (None, Some(name)) => RouteParam::new(name.as_str(), ParameterConstraint::Any),
            (None, None) => continue,
        };
        segments.push(TemplateSegment::Param(param));
    }

    if last < template.len() {
        segments.push(TemplateSegment::Static(template[last..].to_string()));
    }

    segments
}

/// Builds the anchored regex source for a parsed template
///
/// Literal text is escaped; each placeholder becomes one capture group of
/// [`SEGMENT_PATTERN`], so capture `i + 1` belongs to parameter `i`.
/// Case-insensitivity applies to literal text only, the segment class
/// already lists both cases.
pub fn to_regex_source(segments: &[TemplateSegment], case_insensitive: bool) -> String {
    let body: String = segments
        .iter()
        .map(|segment| match segment {
            TemplateSegment::Static(text) => literal_source(text, case_insensitive),
            TemplateSegment::Param(_) => SEGMENT_PATTERN.to_string(),
        })
        .collect();

    format!("^{}$", body)
}

fn literal_source(text: &str, case_insensitive: bool) -> String {
    let escaped = regex::escape(text);
    match (case_insensitive, text.is_ascii()) {
        (false, _) => escaped,
        // ASCII folding, so `s` does not match U+017F
        (true, true) => format!("(?i-u:{})", escaped),
        (true, false) => format!("(?i:{})", escaped),
    }
}

/// Parameters of a parsed template, in template order
pub fn params_of(segments: &[TemplateSegment]) -> Vec<RouteParam> {
    segments
        .iter()
        .filter_map(|segment| match segment {
            TemplateSegment::Param(param) => Some(param.clone()),
            TemplateSegment::Static(_) => None,
        })
        .collect()
}
