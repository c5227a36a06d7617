//! Folder command implementations

use crate::cli::{CommandContext, FolderCommands, GlobalOptions, OutputFormat};
use crate::error::Result;
use crate::output::{json, table};

/// Run a folder subcommand
pub async fn run(cmd: FolderCommands, opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    match cmd {
        FolderCommands::Update {
            folder_id,
            folder_name,
        } => {
            let folder = ctx.client.update_folder(&folder_id, &folder_name).await?;
            match ctx.format {
                OutputFormat::Json => println!("{}", json::format_json(&folder)?),
                OutputFormat::Pretty => {
                    println!("Folder updated: {}", table::field_str(&folder, "name"));
                    println!("  ID: {}", table::field_str(&folder, "_id"));
                }
            }
        }
    }

    Ok(())
}
