// File: src/application.rs
// Purpose: Application entry point tying configuration to the route table

use anyhow::{Context, Result};
use most_router::Router;
use tracing::{debug, info};

use crate::config::Config;
use crate::request_context::RequestContext;

/// A configured application: settings plus the compiled route table
#[derive(Debug, Clone)]
pub struct Application {
    config: Config,
    router: Router,
}

impl Application {
    /// Compile the route table from configuration
    pub fn from_config(config: Config) -> Result<Self> {
        let router = Router::from_configs_with_options(
            &config.routing.routes,
            config.routing.case_insensitive,
        )
        .context("Failed to compile route table")?;

        info!(routes = router.len(), "application configured");
        Ok(Self { config, router })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Build a request context for `url` and resolve its route
    ///
    /// Returns `None` when no route matches.
    pub fn handle(&self, url: &str) -> Option<RequestContext> {
        let mut context = RequestContext::new(url);
        if !context.resolve(&self.router) {
            debug!(url, "no route for request");
            return None;
        }
        Some(context)
    }
}
