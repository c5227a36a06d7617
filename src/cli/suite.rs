//! Suite command implementations

use std::time::Duration;

use indicatif::ProgressBar;
use serde_json::Value;
use tabled::Tabled;

use crate::cli::args::parse_attributes;
use crate::cli::{CommandContext, ExportKind, GlobalOptions, OutputFormat, SuiteCommands};
use crate::client::Params;
use crate::error::Result;
use crate::output::{self, json, table};

/// Suite for table display
#[derive(Tabled)]
struct SuiteRow {
    #[tabled(rename = "SUITE ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
}

impl From<&Value> for SuiteRow {
    fn from(entry: &Value) -> Self {
        Self {
            id: table::field_str(entry, "_id"),
            name: table::field_str(entry, "name"),
        }
    }
}

fn print_suites(payload: &Value, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", json::format_json(payload)?),
        OutputFormat::Pretty => {
            let rows: Vec<SuiteRow> = payload
                .as_array()
                .map(|entries| entries.iter().map(SuiteRow::from).collect())
                .unwrap_or_default();
            println!("{}", table::format_table(&rows));
        }
    }
    Ok(())
}

/// Run a suite subcommand
pub async fn run(cmd: SuiteCommands, opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    match cmd {
        SuiteCommands::List => {
            let suites = ctx.client.get_suites().await?;
            print_suites(&suites, ctx.format)?;
        }
        SuiteCommands::Get { suite_id } => {
            let suite = ctx.client.get_suite(&suite_id).await?;
            output::print_payload(&suite, ctx.format)?;
        }
        SuiteCommands::Tests { suite_id } => {
            let tests = ctx.client.get_suite_tests(&suite_id).await?;
            crate::cli::test::print_tests(&tests, ctx.format)?;
        }
        SuiteCommands::Results {
            suite_id,
            count,
            offset,
        } => {
            let mut options = Params::new();
            if let Some(count) = count {
                options.insert("count", count);
            }
            if let Some(offset) = offset {
                options.insert("offset", offset);
            }
            let results = ctx.client.get_suite_results(&suite_id, options).await?;
            crate::cli::result::print_results(&results, ctx.format)?;
        }
        SuiteCommands::Execute {
            suite_id,
            attributes,
        } => {
            let options = parse_attributes(&attributes)?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_message(format!("Executing suite {suite_id}..."));
            spinner.enable_steady_tick(Duration::from_millis(120));
            let outcome = ctx.client.execute_suite(&suite_id, options).await;
            spinner.finish_and_clear();

            let (data, passing) = outcome?;
            output::print_execution(&data, passing, ctx.format)?;
        }
        SuiteCommands::Update {
            suite_id,
            attributes,
        } => {
            let attributes = parse_attributes(&attributes)?;
            let suite = ctx.client.update_suite(&suite_id, attributes).await?;
            output::print_payload(&suite, ctx.format)?;
        }
        SuiteCommands::Export {
            suite_id,
            format,
            out,
        } => {
            let bytes = match format {
                ExportKind::Html => {
                    ctx.client
                        .download_suite_selenium_html(&suite_id, &out)
                        .await?
                }
                ExportKind::Json => {
                    ctx.client
                        .download_suite_selenium_json(&suite_id, &out)
                        .await?
                }
                ExportKind::Side => {
                    ctx.client
                        .download_suite_selenium_side(&suite_id, &out)
                        .await?
                }
            };
            println!("Export written to {} ({} bytes)", out.display(), bytes.len());
        }
    }

    Ok(())
}
