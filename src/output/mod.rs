//! Output formatting for CLI results

use colored::Colorize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod json;
pub mod table;

/// Print an opaque API payload in the selected format.
///
/// JSON mode wraps the payload with response metadata; pretty mode prints
/// the payload alone, pretty-printed.
pub fn print_payload(payload: &Value, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", json::format_json(payload)?),
        OutputFormat::Pretty => println!("{}", serde_json::to_string_pretty(payload)?),
    }
    Ok(())
}

/// Print an execute response together with its overall verdict.
pub fn print_execution(data: &Value, passing: Option<bool>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let payload = serde_json::json!({ "result": data, "passing": passing });
            println!("{}", json::format_json(&payload)?);
        }
        OutputFormat::Pretty => {
            println!("{}", serde_json::to_string_pretty(data)?);
            match passing {
                Some(true) => println!("{} Overall result: passing", "✓".green()),
                Some(false) => println!("{} Overall result: failing", "✗".red()),
                None => println!("{} Overall result: unknown", "○".dimmed()),
            }
        }
    }
    Ok(())
}
