use std::process::ExitCode;

use clap::Parser;

use storefront_cli::{Cli, run};

fn main() -> ExitCode {
    storefront_observability::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
