use std::process::ExitCode;

use clap::Parser;

use medplan_lib::cli::{self, Cli, CliError};
use medplan_lib::client::ApiClient;
use medplan_lib::config;

fn main() -> ExitCode {
    medplan_lib::init_tracing();
    tracing::debug!("{} v{}", config::APP_NAME, config::APP_VERSION);

    let args = Cli::parse();
    match execute(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn execute(args: &Cli) -> Result<String, CliError> {
    let value = match cli::run_local(&args.command)? {
        Some(value) => value,
        None => {
            let client = ApiClient::new(&args.client_config())?;
            cli::run(&args.command, &client)?
        }
    };
    Ok(serde_json::to_string_pretty(&value)?)
}
