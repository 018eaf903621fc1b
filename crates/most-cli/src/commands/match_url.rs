use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use most::RequestContext;
use tracing::debug;

use super::load_application;

pub fn execute(config_path: &Path, url: &str) -> Result<()> {
    let app = load_application(config_path)?;

    let Some(RequestContext {
        path,
        query,
        route: Some(route),
    }) = app.handle(url)
    else {
        println!("{} {}", "No route matches".yellow(), url);
        return Ok(());
    };
    debug!(url, %path, "matched");

    println!(
        "{} {}",
        "Matched".green().bold(),
        route.route.url.as_deref().unwrap_or_default().cyan()
    );
    println!("{}", serde_json::to_string_pretty(&route.data)?);

    if !query.as_map().is_empty() {
        println!();
        println!("{}", "Query:".bold());
        println!("{}", serde_json::to_string_pretty(&query.to_json())?);
    }

    Ok(())
}
