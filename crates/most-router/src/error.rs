use thiserror::Error;

/// Route configuration errors
///
/// These are raised while compiling a route table. A request path that does
/// not match is never an error.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The route has no url template
    #[error("route template may not be null")]
    MissingTemplate,

    /// The template could not be compiled into a matcher
    #[error("invalid route template `{template}`: {source}")]
    InvalidPattern {
        template: String,
        #[source]
        source: regex::Error,
    },
}
