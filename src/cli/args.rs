//! Global CLI options and attribute-pair parsing

use crate::cli::Cli;
use crate::client::Params;
use crate::error::{Error, Result};

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (tables, status lines)
    Pretty,
    /// JSON with response metadata
    Json,
}

/// Global CLI options passed to all command handlers.
///
/// Captures the flag/env layer; config-file defaults are resolved later
/// in `CommandContext`.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// API key from --api-key or GHOST_INSPECTOR_API_KEY
    pub api_key: Option<String>,

    /// Output in JSON format
    pub json: bool,

    /// Custom config file path
    pub config: Option<String>,

    /// Custom API host for development/testing
    pub api_host: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            api_key: cli.api_key.clone(),
            json: cli.json,
            config: cli.config.clone(),
            api_host: cli.api_host.clone(),
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Get API host override as `Option<&str>`.
    pub fn api_host_ref(&self) -> Option<&str> {
        self.api_host.as_deref()
    }
}

/// Keys that belong to the CLI itself and are never forwarded to the API
const INTERNAL_KEYS: &[&str] = &["apiKey", "suiteId"];

/// Parse trailing `--attribute value` pairs into request parameters.
///
/// Attribute names pass through verbatim (the remote API expects
/// camelCase); a repeated attribute becomes an array parameter in the
/// order given. CLI-internal keys are stripped.
pub fn parse_attributes(tokens: &[String]) -> Result<Params> {
    let mut params = Params::new();
    let mut iter = tokens.iter();

    while let Some(token) = iter.next() {
        let key = token.strip_prefix("--").ok_or_else(|| {
            Error::Usage(format!(
                "expected an \"--attribute\" before '{token}' (attributes are passed as \"--name value\" pairs)"
            ))
        })?;
        let value = iter
            .next()
            .ok_or_else(|| Error::Usage(format!("missing value for --{key}")))?;

        if INTERNAL_KEYS.contains(&key) {
            continue;
        }
        params.append(key, value.as_str());
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ParamValue;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_attributes_pairs() {
        let params = parse_attributes(&tokens(&["--name", "My test", "--browser", "firefox"]))
            .unwrap();
        assert_eq!(params.get("name"), Some(&ParamValue::Scalar("My test".into())));
        assert_eq!(
            params.get("browser"),
            Some(&ParamValue::Scalar("firefox".into()))
        );
    }

    #[test]
    fn test_parse_attributes_repeated_key_becomes_array() {
        let params =
            parse_attributes(&tokens(&["--browsers", "chrome", "--browsers", "firefox"])).unwrap();
        assert_eq!(
            params.get("browsers"),
            Some(&ParamValue::List(vec![
                ParamValue::Scalar("chrome".into()),
                ParamValue::Scalar("firefox".into()),
            ]))
        );
    }

    #[test]
    fn test_parse_attributes_strips_internal_keys() {
        let params = parse_attributes(&tokens(&[
            "--apiKey", "spoofed", "--suiteId", "other", "--name", "kept",
        ]))
        .unwrap();
        assert!(params.get("apiKey").is_none());
        assert!(params.get("suiteId").is_none());
        assert_eq!(params.get("name"), Some(&ParamValue::Scalar("kept".into())));
    }

    #[test]
    fn test_parse_attributes_empty() {
        let params = parse_attributes(&[]).unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_parse_attributes_value_without_key() {
        let err = parse_attributes(&tokens(&["oops"])).unwrap_err();
        assert!(err.to_string().contains("oops"));
    }

    #[test]
    fn test_parse_attributes_key_without_value() {
        let err = parse_attributes(&tokens(&["--name"])).unwrap_err();
        assert!(err.to_string().contains("--name"));
    }
}
