//! crashscanctl - triage kernel console captures from the command line

use clap::Parser;
use crashscanctl::cli::Cli;
use crashscanctl::{commands, errors, logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let code = match commands::run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[ERROR] {:#}", e);
            errors::exit_code_for(&e)
        }
    };

    std::process::exit(code);
}
