//! # MOST Router
//!
//! Route templates with typed parameters for MVC-style request dispatch:
//! - Colon parameters (`/users/:id`)
//! - Brace parameters (`/users/{id}`)
//! - Typed brace parameters (`/users/{id:int}`, `{active:boolean}`,
//!   `{price:decimal}`, `{key:guid}`, `{entities:plural}`, `{name:string}`,
//!   `{since:date}`)
//! - Static route values (`controller`, `action`, ...) carried into route data
//!
//! ## Matching
//!
//! A template compiles once into an anchored, case-insensitive regular
//! expression. Each placeholder captures one run of
//! `[$_-.:',+=%0-9A-Za-z]`. Typed placeholders then check the raw capture
//! against their type pattern and coerce the URL-decoded text; any failure
//! makes the whole match fail. A failed match is `None`/`false`, never an error.
//!
//! ## Example
//!
//! ```
//! use most_router::{Router, RouteConfig, ParamValue};
//!
//! let router = Router::from_configs(&[
//!     RouteConfig::new("/products/{id:int}").with_controller("products").with_action("show"),
//!     RouteConfig::new("/:controller/:action"),
//! ])
//! .unwrap();
//!
//! let m = router.match_route("/products/42?tab=reviews").unwrap();
//! assert_eq!(m.data.get("id"), Some(&ParamValue::Int(42)));
//! assert_eq!(m.data.controller(), Some("products"));
//!
//! let m = router.match_route("/orders/list").unwrap();
//! assert_eq!(m.data.action(), Some("list"));
//! ```

use tracing::debug;

// ============================================================================
// Module Declarations
// ============================================================================

mod constraint;
mod error;
mod inflect;
pub mod route;
mod value;

pub use constraint::ParameterConstraint;
pub use error::RouteError;
pub use inflect::singularize;
pub use route::{HttpRoute, RouteConfig, RouteParam};
pub use value::{ParamValue, RouteData};

// ============================================================================
// Router
// ============================================================================

/// Result of matching a path against a [`Router`]
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch {
    /// Definition of the matched route
    pub route: RouteConfig,
    /// Extracted parameters and static route values
    pub data: RouteData,
}

/// Ordered route table; the first matching route wins
///
/// Matching goes through [`HttpRoute::match_path`], so a router can be shared
/// across threads without cloning routes.
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<HttpRoute>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles a case-insensitive route table
    pub fn from_configs(configs: &[RouteConfig]) -> Result<Self, RouteError> {
        Self::from_configs_with_options(configs, true)
    }

    /// Compiles a route table, failing on the first invalid route
    pub fn from_configs_with_options(
        configs: &[RouteConfig],
        case_insensitive: bool,
    ) -> Result<Self, RouteError> {
        let routes = configs
            .iter()
            .cloned()
            .map(|config| HttpRoute::with_options(config, case_insensitive))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = routes.len(), "compiled route table");
        Ok(Self { routes })
    }

    /// Appends a compiled route after the existing ones
    pub fn add_route(&mut self, route: HttpRoute) {
        self.routes.push(route);
    }

    /// Compiles and appends a route
    pub fn add(&mut self, config: impl Into<RouteConfig>) -> Result<(), RouteError> {
        self.add_route(HttpRoute::new(config)?);
        Ok(())
    }

    /// Finds the first route matching `path`
    pub fn match_route(&self, path: &str) -> Option<RouteMatch> {
        let found = self.routes.iter().find_map(|route| {
            route.match_path(path).map(|data| RouteMatch {
                route: route.config().clone(),
                data,
            })
        });

        match &found {
            Some(m) => debug!(path, url = ?m.route.url, "route matched"),
            None => debug!(path, "no route matched"),
        }
        found
    }

    pub fn routes(&self) -> &[HttpRoute] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
