use std::io;
use std::process::ExitCode;

use clap::Parser;
use engine_logging::engine_error;
use harvester_cli::{run, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    engine_logging::initialize_stderr(cli.log_level());

    let mut stdout = io::stdout().lock();
    match run(&cli, &mut stdout).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            engine_error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
