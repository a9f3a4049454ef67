//! cep: resolve Brazilian postal codes from the command line.

use std::process::ExitCode;

use clap::Parser;

use cep_cli::Args;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match cep_cli::run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
