use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;
mod error_mapping;

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = ventwise_core::init(cli.verbose) {
        eprintln!("{:#}", e);
        return ExitCode::FAILURE;
    }

    match commands::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {}", e);
            eprintln!("{}", e.user_message());
            if let Some(hint) = e.hint() {
                eprintln!("{}", hint);
            }
            ExitCode::from(error_mapping::exit_code(&e))
        }
    }
}
