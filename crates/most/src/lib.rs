// MOST Web Framework
// Route resolution and query filters for MVC applications

pub mod application;
pub mod config;
pub mod logging;
pub mod request_context;

// Re-export framework types
pub use application::Application;
pub use config::{Config, LoggingConfig, RoutingConfig, ServerConfig};
pub use request_context::{QueryParams, RequestContext};

// Re-export the core crates
pub use most_query as query;
pub use most_router as router;

pub use most_query::{Expression, Filter, Operator, QueryError};
pub use most_router::{HttpRoute, ParamValue, RouteConfig, RouteData, RouteMatch, Router};
