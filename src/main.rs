//! ghostop CLI - companion for the Ghost Inspector testing platform

use clap::Parser;

use ghostop::cli::{self, Cli, Commands, GlobalOptions};
use ghostop::error::Result;

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("ghostop version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Completion { shell } => {
            cli::completion::run(shell);
            Ok(())
        }
        Commands::Suite(cmd) => cli::suite::run(cmd, &opts).await,
        Commands::Test(cmd) => cli::test::run(cmd, &opts).await,
        Commands::Folder(cmd) => cli::folder::run(cmd, &opts).await,
        Commands::SuiteResult(cmd) => cli::result::run_suite_result(cmd, &opts).await,
        Commands::Result(cmd) => cli::result::run_test_result(cmd, &opts).await,
    }
}
