/// Route module: templates, their static configuration and the compiled matcher
///
/// - `config`: the serializable route definition
/// - `pattern`: pure template parsing into parameters and regex source
/// - `HttpRoute`: a compiled template that matches request paths
pub mod config;
pub mod pattern;

use std::str::FromStr;

use regex::Regex;
use tracing::trace;

use crate::error::RouteError;
use crate::value::{ParamValue, RouteData};

pub use config::RouteConfig;
pub use pattern::{parse_template, RouteParam, TemplateSegment};

/// A route template compiled into a matcher
///
/// Matching strips the query string, runs the anchored template regex and
/// coerces each captured parameter through its type. The last result of
/// [`is_match`](HttpRoute::is_match) is kept in [`route_data`](HttpRoute::route_data);
/// use [`match_path`](HttpRoute::match_path) to match without touching it.
///
/// # Examples
///
/// ```
/// use most_router::{HttpRoute, ParamValue};
///
/// let mut route = HttpRoute::new("/user/{id:int}").unwrap();
///
/// assert!(route.is_match("/user/45"));
/// assert_eq!(route.route_data().get("id"), Some(&ParamValue::Int(45)));
///
/// assert!(!route.is_match("/user/abc"));
/// ```
#[derive(Debug, Clone)]
pub struct HttpRoute {
    config: RouteConfig,
    params: Vec<RouteParam>,
    matcher: Regex,
    route_data: RouteData,
}

impl HttpRoute {
    /// Compiles a case-insensitive route
    pub fn new(config: impl Into<RouteConfig>) -> Result<Self, RouteError> {
        Self::with_options(config, true)
    }

    /// Compiles a route with explicit case sensitivity
    ///
    /// Fails only when the template is absent or cannot compile.
    pub fn with_options(
        config: impl Into<RouteConfig>,
        case_insensitive: bool,
    ) -> Result<Self, RouteError> {
        let config = config.into();
        let template = config.url.as_deref().ok_or(RouteError::MissingTemplate)?;

        let segments = parse_template(template);
        let source = pattern::to_regex_source(&segments, case_insensitive);
        let matcher = Regex::new(&source).map_err(|source| RouteError::InvalidPattern {
            template: template.to_string(),
            source,
        })?;

        trace!(template, regex = %matcher, "compiled route");

        Ok(Self {
            params: pattern::params_of(&segments),
            config,
            matcher,
            route_data: RouteData::new(),
        })
    }

    /// The url template
    pub fn url(&self) -> &str {
        self.config.url.as_deref().unwrap_or_default()
    }

    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    /// Placeholders in template order
    pub fn params(&self) -> &[RouteParam] {
        &self.params
    }

    /// Matches `path` and returns its route data, leaving cached state alone
    ///
    /// Returns `None` for an empty path, a path the template does not match,
    /// or any typed parameter whose text fails its type.
    pub fn match_path(&self, path: &str) -> Option<RouteData> {
        if path.is_empty() {
            return None;
        }

        let path = path.split_once('?').map_or(path, |(path, _)| path);
        let captures = self.matcher.captures(path)?;

        let mut data = RouteData::new();
        for (name, value) in &self.config.params {
            data.insert(name.clone(), value.as_str());
        }

        for (index, param) in self.params.iter().enumerate() {
            let raw = captures.get(index + 1)?.as_str();
            match param.constraint.extract(raw) {
                Some(value) => data.insert(param.name.clone(), value),
                None => {
                    trace!(url = self.url(), param = %param.name, raw, "parameter rejected");
                    return None;
                }
            }
        }

        if let Some(controller) = &self.config.controller {
            data.insert("controller", ParamValue::String(controller.clone()));
        }
        if let Some(action) = &self.config.action {
            data.insert("action", ParamValue::String(action.clone()));
        }

        Some(data)
    }

    /// Matches `path`, replacing the cached route data with the result
    ///
    /// After a failed match the route data is empty.
    pub fn is_match(&mut self, path: &str) -> bool {
        match self.match_path(path) {
            Some(data) => {
                self.route_data = data;
                true
            }
            None => {
                self.route_data.clear();
                false
            }
        }
    }

    /// Route data of the last [`is_match`](HttpRoute::is_match) call
    pub fn route_data(&self) -> &RouteData {
        &self.route_data
    }
}

impl FromStr for HttpRoute {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpRoute::new(s)
    }
}

impl TryFrom<RouteConfig> for HttpRoute {
    type Error = RouteError;

    fn try_from(config: RouteConfig) -> Result<Self, Self::Error> {
        HttpRoute::new(config)
    }
}
