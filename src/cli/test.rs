//! Test command implementations

use std::time::Duration;

use indicatif::ProgressBar;
use serde_json::Value;
use tabled::Tabled;

use crate::cli::args::parse_attributes;
use crate::cli::{CommandContext, ExportKind, GlobalOptions, OutputFormat, TestCommands};
use crate::client::Params;
use crate::error::Result;
use crate::output::{self, json, table};

/// Test for table display
#[derive(Tabled)]
struct TestRow {
    #[tabled(rename = "TEST ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "PASSING")]
    passing: String,
}

impl From<&Value> for TestRow {
    fn from(entry: &Value) -> Self {
        Self {
            id: table::field_str(entry, "_id"),
            name: table::field_str(entry, "name"),
            passing: table::field_str(entry, "passing"),
        }
    }
}

/// Print a list of tests, shared with `suite tests`.
pub(crate) fn print_tests(payload: &Value, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", json::format_json(payload)?),
        OutputFormat::Pretty => {
            let rows: Vec<TestRow> = payload
                .as_array()
                .map(|entries| entries.iter().map(TestRow::from).collect())
                .unwrap_or_default();
            println!("{}", table::format_table(&rows));
        }
    }
    Ok(())
}

/// Run a test subcommand
pub async fn run(cmd: TestCommands, opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    match cmd {
        TestCommands::List => {
            let tests = ctx.client.get_tests().await?;
            print_tests(&tests, ctx.format)?;
        }
        TestCommands::Get { test_id } => {
            let test = ctx.client.get_test(&test_id).await?;
            output::print_payload(&test, ctx.format)?;
        }
        TestCommands::Results {
            test_id,
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
            let results = ctx.client.get_test_results(&test_id, options).await?;
            crate::cli::result::print_results(&results, ctx.format)?;
        }
        TestCommands::Execute {
            test_id,
            attributes,
        } => {
            let options = parse_attributes(&attributes)?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_message(format!("Executing test {test_id}..."));
            spinner.enable_steady_tick(Duration::from_millis(120));
            let outcome = ctx.client.execute_test(&test_id, options).await;
            spinner.finish_and_clear();

            let (data, passing) = outcome?;
            output::print_execution(&data, passing, ctx.format)?;
        }
        TestCommands::ExecuteOnDemand {
            organization_id,
            file,
            immediate,
        } => {
            let contents = std::fs::read_to_string(&file)?;
            let test: Value = serde_json::from_str(&contents)?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_message("Executing on-demand test...");
            spinner.enable_steady_tick(Duration::from_millis(120));
            let outcome = ctx
                .client
                .execute_test_on_demand(&organization_id, &test, !immediate)
                .await;
            spinner.finish_and_clear();

            let result = outcome?;
            output::print_payload(&result, ctx.format)?;
        }
        TestCommands::Export {
            test_id,
            format,
            out,
        } => {
            let bytes = match format {
                ExportKind::Html => {
                    ctx.client.download_test_selenium_html(&test_id, &out).await?
                }
                ExportKind::Json => {
                    ctx.client.download_test_selenium_json(&test_id, &out).await?
                }
                ExportKind::Side => {
                    ctx.client.download_test_selenium_side(&test_id, &out).await?
                }
            };
            println!("Export written to {} ({} bytes)", out.display(), bytes.len());
        }
    }

    Ok(())
}
