//! Status command implementation

use colored::Colorize;

use crate::cli::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "ghostop Configuration Status".bold());

    match Config::load_at(opts.config_ref()) {
        Ok(config) => {
            let config_path = Config::resolve_path(opts.config_ref())?;
            println!(
                "Config file: {}",
                config_path.display().to_string().cyan()
            );
            println!();

            if opts.api_key.is_some() {
                println!(
                    "{} API key provided via --api-key or GHOST_INSPECTOR_API_KEY",
                    "✓".green()
                );
            } else if config.api_key.is_some() {
                println!("{} API key configured", "✓".green());
            } else {
                println!("{} API key not configured", "✗".red());
                println!("  → Run 'ghostop init' to configure");
            }

            // API host (only shown when custom)
            if let Some(host) = opts.api_host_ref().or(config.api_host.as_deref()) {
                println!("{} Custom API host: {}", "○".dimmed(), host.cyan());
            }

            if config.preferences.json {
                println!("{} JSON output enabled by default", "○".dimmed());
            }

            println!();
        }
        Err(_) => {
            println!("{} Configuration not found", "✗".red());
            println!();
            if opts.api_key.is_some() {
                println!(
                    "{} API key provided via --api-key or GHOST_INSPECTOR_API_KEY",
                    "✓".green()
                );
                println!();
            }
            println!(
                "Run {} to create a configuration file.",
                "ghostop init".cyan()
            );
            println!();
        }
    }

    Ok(())
}
