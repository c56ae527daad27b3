use clap::Parser;
use dotenvy::dotenv;
use tracing::error;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    dotenv().ok();
    common::utils::logging::init_logging_default();

    let cli = client::cli::Cli::parse();
    match client::cli::execute(cli).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!(service = "client", error = %e, "command failed");
            std::process::ExitCode::FAILURE
        }
    }
}
