use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use super::load_application;

pub fn execute(config_path: &Path) -> Result<()> {
    let app = load_application(config_path)?;
    let routes = app.router().routes();

    if routes.is_empty() {
        println!(
            "{} {}",
            "No routes configured in".yellow(),
            config_path.display()
        );
        return Ok(());
    }

    println!("{}", "Routes (first match wins):".green().bold());
    println!();

    for (index, route) in routes.iter().enumerate() {
        let config = route.config();
        let target = format!(
            "{}#{}",
            config.controller.as_deref().unwrap_or("*"),
            config.action.as_deref().unwrap_or("*")
        );
        println!("  {:>3}  {:<40} {}", index + 1, route.url().cyan(), target);

        for (name, value) in &config.params {
            println!("       {} = {}", name.dimmed(), value);
        }
    }

    Ok(())
}
