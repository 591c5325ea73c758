use std::process::ExitCode;

use clap::Parser;
use ssm_get_parameter::{pipeline::TaskResult, task};

#[derive(Parser, Debug)]
#[command(version, about = "Read AWS Systems Manager parameters into pipeline variables", long_about = None)]
struct Args {
    /// Environment file holding task inputs (INPUT_READMODE, INPUT_PARAMETERNAME, ...).
    ///
    /// Defaults to `.env` in the working directory when present.
    #[arg(long, short = 'e')]
    env_file: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let result = match &args.env_file {
        Some(path) => match dotenvy::from_filename(path) {
            Ok(_) => task::start().await,
            Err(e) => task::abort(&format!(
                "Failed to load environment file '{}': {}",
                path, e
            )),
        },
        None => {
            dotenvy::dotenv().ok();
            task::start().await
        }
    };

    match result {
        TaskResult::Succeeded => ExitCode::SUCCESS,
        TaskResult::Failed => ExitCode::FAILURE,
    }
}
