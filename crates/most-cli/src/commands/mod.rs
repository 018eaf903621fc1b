pub mod match_url;
pub mod routes;

use std::path::Path;

use anyhow::Result;
use most::{logging, Application, Config};

/// Load configuration, install logging and compile the route table
pub(crate) fn load_application(config_path: &Path) -> Result<Application> {
    let config = Config::load(config_path)?;
    logging::init(&config.logging);
    Application::from_config(config)
}
