//! Suite-result and test-result command implementations

use colored::Colorize;
use serde_json::Value;
use tabled::Tabled;

use crate::cli::{
    CommandContext, GlobalOptions, OutputFormat, ResultCommands, SuiteResultCommands,
};
use crate::error::Result;
use crate::output::{self, json, table};

/// Result for table display
#[derive(Tabled)]
struct ResultRow {
    #[tabled(rename = "RESULT ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "PASSING")]
    passing: String,
    #[tabled(rename = "EXECUTED")]
    executed: String,
}

impl From<&Value> for ResultRow {
    fn from(entry: &Value) -> Self {
        Self {
            id: table::field_str(entry, "_id"),
            name: table::field_str(entry, "name"),
            passing: table::field_str(entry, "passing"),
            executed: table::field_str(entry, "dateExecuted"),
        }
    }
}

/// Print a list of results, shared with the suite/test `results`
/// subcommands.
pub(crate) fn print_results(payload: &Value, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", json::format_json(payload)?),
        OutputFormat::Pretty => {
            let rows: Vec<ResultRow> = payload
                .as_array()
                .map(|entries| entries.iter().map(ResultRow::from).collect())
                .unwrap_or_default();
            println!("{}", table::format_table(&rows));
        }
    }
    Ok(())
}

fn print_cancellation(payload: &Value, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", json::format_json(payload)?),
        OutputFormat::Pretty => {
            println!("{} Cancellation requested", "✓".green());
            println!("{}", serde_json::to_string_pretty(payload)?);
        }
    }
    Ok(())
}

/// Run a suite-result subcommand
pub async fn run_suite_result(cmd: SuiteResultCommands, opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    match cmd {
        SuiteResultCommands::Get { result_id } => {
            let result = ctx.client.get_suite_result(&result_id).await?;
            output::print_payload(&result, ctx.format)?;
        }
        SuiteResultCommands::Tests { result_id } => {
            let results = ctx.client.get_suite_result_test_results(&result_id).await?;
            print_results(&results, ctx.format)?;
        }
        SuiteResultCommands::Cancel { result_id } => {
            let result = ctx.client.cancel_suite_result(&result_id).await?;
            print_cancellation(&result, ctx.format)?;
        }
    }

    Ok(())
}

/// Run a test-result subcommand
pub async fn run_test_result(cmd: ResultCommands, opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    match cmd {
        ResultCommands::Get { result_id } => {
            let result = ctx.client.get_test_result(&result_id).await?;
            output::print_payload(&result, ctx.format)?;
        }
        ResultCommands::Cancel { result_id } => {
            let result = ctx.client.cancel_test_result(&result_id).await?;
            print_cancellation(&result, ctx.format)?;
        }
    }

    Ok(())
}
