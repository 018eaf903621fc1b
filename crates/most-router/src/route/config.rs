use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Static definition of a route, as written in a route table
///
/// Keys other than `url`, `controller` and `action` are kept in `params` and
/// copied into the route data of every match.
///
/// # Examples
///
/// ```
/// use most_router::RouteConfig;
///
/// let route = RouteConfig::new("/users/{id:int}")
///     .with_controller("users")
///     .with_action("show")
///     .with_param("format", "html");
///
/// assert_eq!(route.url.as_deref(), Some("/users/{id:int}"));
/// assert_eq!(route.params.get("format"), Some(&"html".to_string()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Url template, e.g. `/:controller/:action` or `/users/{id:int}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    /// Additional static route values
    #[serde(flatten)]
    pub params: BTreeMap<String, String>,
}

impl RouteConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn with_controller(mut self, controller: impl Into<String>) -> Self {
        self.controller = Some(controller.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}

impl From<&str> for RouteConfig {
    fn from(url: &str) -> Self {
        RouteConfig::new(url)
    }
}

impl From<String> for RouteConfig {
    fn from(url: String) -> Self {
        RouteConfig::new(url)
    }
}
