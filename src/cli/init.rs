//! Init command implementation

use colored::Colorize;
use dialoguer::{Password, theme::ColorfulTheme};

use crate::cli::GlobalOptions;
use crate::client::GhostInspectorClient;
use crate::config::Config;
use crate::error::Result;

/// Run the init command
///
/// Prompts for an API key, verifies it with a live API call, and saves
/// the configuration file.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to ghostop!".bold().green());
    println!("Let's set up your Ghost Inspector configuration.\n");

    let api_key: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter your Ghost Inspector API key")
        .interact()?;

    println!("\n{}", "Verifying API key...".cyan());
    let client = GhostInspectorClient::with_host(api_key.clone(), opts.api_host.clone())?;
    let suites = client.get_suites().await?;

    println!("{}", "✓ API key verified!".green());
    if let Some(count) = suites.as_array().map(Vec::len) {
        println!("Found {} suite(s) in your account.", count);
    }

    // Keep existing preferences when re-initializing
    let mut config = Config::load_at(opts.config_ref()).unwrap_or_default();
    config.api_key = Some(api_key);
    if opts.api_host.is_some() {
        config.api_host = opts.api_host.clone();
    }
    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "ghostop status".cyan());
    println!("  {} - List your suites", "ghostop suite list".cyan());

    Ok(())
}
