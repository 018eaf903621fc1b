// File: src/request_context.rs
// Purpose: Request context with query params and resolved route data

use most_query::Filter;
use most_router::{ParamValue, RouteMatch, Router};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Request context passed to controllers
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Request path without the query string
    pub path: String,

    /// Query parameters from URL (?key=value)
    pub query: QueryParams,

    /// Matched route, once resolved
    pub route: Option<RouteMatch>,
}

impl RequestContext {
    /// Create a context from a request url (path plus optional query string)
    pub fn new(url: &str) -> Self {
        let (path, query) = match url.split_once('?') {
            Some((path, query)) => (path, QueryParams::parse(query)),
            None => (url, QueryParams::default()),
        };

        Self {
            path: path.to_string(),
            query,
            route: None,
        }
    }

    /// Resolve the route for this request; returns whether one matched
    pub fn resolve(&mut self, router: &Router) -> bool {
        self.route = router.match_route(&self.path);
        self.route.is_some()
    }

    /// Get a route parameter
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.route.as_ref()?.data.get(name)
    }

    pub fn controller(&self) -> Option<&str> {
        self.route.as_ref()?.data.controller()
    }

    pub fn action(&self) -> Option<&str> {
        self.route.as_ref()?.data.action()
    }

    /// Filter selecting `field` equal to the route parameter `param`
    ///
    /// e.g. `/products/{id:int}` → `{ "id": 42 }`
    pub fn filter_by(&self, field: &str, param: &str) -> Option<Filter> {
        let value = serde_json::to_value(self.param(param)?).ok()?;
        Some(Filter::where_(field).equal(value))
    }
}

/// Query parameters from URL
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    params: HashMap<String, String>,
}

impl QueryParams {
    /// Create from HashMap
    pub fn new(params: HashMap<String, String>) -> Self {
        Self { params }
    }

    /// Parse a query string (`a=1&b=two%20words`)
    ///
    /// `+` is read as a space; pairs without `=` get an empty value.
    pub fn parse(query: &str) -> Self {
        let params = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode(key), decode(value))
            })
            .collect();

        Self { params }
    }

    /// Get a query parameter value
    pub fn get(&self, key: &str) -> Option<&String> {
        self.params.get(key)
    }

    /// Get a query parameter as a specific type
    pub fn get_as<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.params.get(key)?.parse().ok()
    }

    /// Check if a parameter exists
    pub fn has(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Get as HashMap
    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Get all parameters as a JSON object
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(
            self.params
                .iter()
                .map(|(k, v)| (k.clone(), JsonValue::String(v.clone())))
                .collect(),
        )
    }
}

fn decode(text: &str) -> String {
    let text = text.replace('+', " ");
    match urlencoding::decode(&text) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => text,
    }
}
