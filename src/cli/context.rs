//! Command execution context
//!
//! Provides a unified context for command execution, eliminating
//! boilerplate for config loading, API-key resolution, and client
//! initialization.

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::GhostInspectorClient;
use crate::config::Config;
use crate::error::{ConfigError, Error, Result};

/// Context for command execution containing the client and runtime
/// options.
#[derive(Debug)]
pub struct CommandContext {
    /// API client bound to the resolved key and host
    pub client: GhostInspectorClient,
    /// Output format preference
    pub format: OutputFormat,
}

/// Resolve the API key: flag/env first, config file second.
fn resolve_api_key(opts: &GlobalOptions, config: &Config) -> Result<String> {
    opts.api_key
        .clone()
        .or_else(|| config.api_key.clone())
        .ok_or_else(|| ConfigError::MissingApiKey.into())
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// A missing config file is only an error when no API key arrived
    /// from the flag or the environment.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = match Config::load_at(opts.config_ref()) {
            Ok(config) => config,
            Err(Error::Config(ConfigError::NotFound)) => Config::default(),
            Err(err) => return Err(err),
        };

        let api_key = resolve_api_key(opts, &config)?;
        let api_host = opts.api_host.clone().or_else(|| config.api_host.clone());

        let format = if opts.json || config.preferences.json {
            OutputFormat::Json
        } else {
            OutputFormat::Pretty
        };

        let client = GhostInspectorClient::with_host(api_key, api_host)?;

        Ok(Self { client, format })
    }
}
