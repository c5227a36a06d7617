//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
pub use clap_complete::Shell;

pub mod args;
pub mod completion;
pub mod context;
pub mod folder;
pub mod init;
pub mod result;
pub mod status;
pub mod suite;
pub mod test;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// ghostop - CLI companion for the Ghost Inspector testing platform
#[derive(Parser, Debug)]
#[command(name = "ghostop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Your Ghost Inspector API key
    #[arg(
        long = "api-key",
        alias = "apiKey",
        global = true,
        env = "GHOST_INSPECTOR_API_KEY",
        hide_env = true
    )]
    pub api_key: Option<String>,

    /// Provide output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Override config file location
    #[arg(long, global = true, env = "GHOSTOP_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the API host (self-hosted gateways, testing)
    #[arg(long, global = true, env = "GHOSTOP_API_HOST", hide = true)]
    pub api_host: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize ghostop configuration
    Init,

    /// Show configuration status
    Status,

    /// Display version information
    Version,

    /// Manage and execute suites
    #[command(subcommand)]
    Suite(SuiteCommands),

    /// Manage and execute tests
    #[command(subcommand)]
    Test(TestCommands),

    /// Manage folders
    #[command(subcommand)]
    Folder(FolderCommands),

    /// View and cancel suite results
    #[command(subcommand)]
    SuiteResult(SuiteResultCommands),

    /// View and cancel test results
    #[command(subcommand)]
    Result(ResultCommands),

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   ghostop completion bash > /etc/bash_completion.d/ghostop
  zsh:    ghostop completion zsh > \"${fpath[1]}/_ghostop\"
  fish:   ghostop completion fish > ~/.config/fish/completions/ghostop.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Selenium export formats offered by the remote service
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    /// Selenium-compatible HTML
    Html,
    /// Selenium JSON
    Json,
    /// Selenium IDE "side" project
    Side,
}

/// Suite management subcommands
#[derive(Subcommand, Debug)]
pub enum SuiteCommands {
    /// List all suites
    #[command(visible_alias = "ls")]
    List,

    /// Show a single suite
    #[command(visible_alias = "g")]
    Get {
        /// Suite ID
        suite_id: String,
    },

    /// List the tests in a suite
    Tests {
        /// Suite ID
        suite_id: String,
    },

    /// List results for a suite
    Results {
        /// Suite ID
        suite_id: String,

        /// Number of results to return
        #[arg(long)]
        count: Option<u64>,

        /// Offset into the result history
        #[arg(long)]
        offset: Option<u64>,
    },

    /// Execute a suite and report the overall result
    #[command(
        after_help = "Pass \"--[attribute] value\" pairs to customize the run (eg: --browser firefox).\n\
            A repeated attribute becomes an array parameter."
    )]
    Execute {
        /// Suite ID
        suite_id: String,

        /// Execution parameters as "--[attribute] value" pairs
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
        attributes: Vec<String>,
    },

    /// Update a suite
    #[command(
        after_help = "Pass \"--[attribute] value\" to update your suite (eg: --name \"My test\")."
    )]
    Update {
        /// Suite ID
        suite_id: String,

        /// Attributes to update as "--[attribute] value" pairs
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
        attributes: Vec<String>,
    },

    /// Export a suite in a Selenium-compatible format
    Export {
        /// Suite ID
        suite_id: String,

        /// Export format
        #[arg(long, value_enum, default_value = "side")]
        format: ExportKind,

        /// Destination file
        #[arg(long)]
        out: PathBuf,
    },
}

/// Test management subcommands
#[derive(Subcommand, Debug)]
pub enum TestCommands {
    /// List all tests
    #[command(visible_alias = "ls")]
    List,

    /// Show a single test
    #[command(visible_alias = "g")]
    Get {
        /// Test ID
        test_id: String,
    },

    /// List results for a test
    Results {
        /// Test ID
        test_id: String,

        /// Number of results to return
        #[arg(long)]
        count: Option<u64>,

        /// Offset into the result history
        #[arg(long)]
        offset: Option<u64>,
    },

    /// Execute a test and report the overall result
    #[command(
        after_help = "Pass \"--[attribute] value\" pairs to customize the run (eg: --browser firefox)."
    )]
    Execute {
        /// Test ID
        test_id: String,

        /// Execution parameters as "--[attribute] value" pairs
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
        attributes: Vec<String>,
    },

    /// Execute an on-demand test from a local JSON definition
    ExecuteOnDemand {
        /// Organization ID
        organization_id: String,

        /// Path to the JSON test definition
        file: PathBuf,

        /// Initiate the execution and return immediately
        #[arg(long)]
        immediate: bool,
    },

    /// Export a test in a Selenium-compatible format
    Export {
        /// Test ID
        test_id: String,

        /// Export format
        #[arg(long, value_enum, default_value = "side")]
        format: ExportKind,

        /// Destination file
        #[arg(long)]
        out: PathBuf,
    },
}

/// Folder management subcommands
#[derive(Subcommand, Debug)]
pub enum FolderCommands {
    /// Update a folder with a new name
    Update {
        /// Folder ID
        folder_id: String,

        /// New folder name
        folder_name: String,
    },
}

/// Suite result subcommands
#[derive(Subcommand, Debug)]
pub enum SuiteResultCommands {
    /// Show a suite result
    #[command(visible_alias = "g")]
    Get {
        /// Suite result ID
        result_id: String,
    },

    /// List the test results belonging to a suite result
    Tests {
        /// Suite result ID
        result_id: String,
    },

    /// Cancel a running suite result
    Cancel {
        /// Suite result ID
        result_id: String,
    },
}

/// Test result subcommands
#[derive(Subcommand, Debug)]
pub enum ResultCommands {
    /// Show a test result
    #[command(visible_alias = "g")]
    Get {
        /// Test result ID
        result_id: String,
    },

    /// Cancel a running test result
    Cancel {
        /// Test result ID
        result_id: String,
    },
}
