//! Command-line interface for `city-client`.

use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use crate::api::RecordClient;
use crate::{demo, poller, render};

/// city-client - fetch, add and delete city records
#[derive(Debug, Parser)]
#[command(name = "city-client")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the record store server
    #[arg(long, env = "CITY_SERVER_URL", default_value = "http://127.0.0.1:42000", global = true)]
    pub server: String,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the raw document
    Get,
    /// Print the raw document and the formatted city descriptions
    Beauty,
    /// Submit the Kyoto demo record
    Add,
    /// Delete a record by key
    Delete {
        #[arg(default_value = demo::DEMO_KEY)]
        key: String,
    },
    /// Print the raw document every interval until Ctrl+C
    Poll {
        #[arg(long, default_value_t = poller::DEFAULT_INTERVAL.as_secs())]
        interval_secs: u64,
    },
}

/// Run one command, printing rendered output to stdout.
pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    let client = RecordClient::new(cli.server);
    match cli.command {
        Command::Get => {
            let doc = client.fetch().await.inspect_err(|e| error!(error = %e, "GET request failed"))?;
            println!("{}", render::raw(&doc));
        }
        Command::Beauty => {
            let collection = client
                .fetch_collection()
                .await
                .inspect_err(|e| error!(error = %e, "GET request failed"))?;
            println!("{}", serde_json::to_string(&collection)?);
            println!("{}", render::formatted(&collection));
        }
        Command::Add => {
            info!(key = demo::DEMO_KEY, "sending demo record");
            client.put(&demo::kyoto()).await.inspect_err(|e| error!(error = %e, "PUT request failed"))?;
        }
        Command::Delete { key } => {
            info!(%key, "requesting deletion");
            client.purge(&key).await.inspect_err(|e| error!(error = %e, "POST request failed"))?;
        }
        Command::Poll { interval_secs } => {
            let period = Duration::from_secs(interval_secs.max(1));
            info!(server = %client.base_url(), secs = period.as_secs(), "polling");
            let shutdown = async {
                let _ = tokio::signal::ctrl_c().await;
            };
            let updates = poller::poll_until(&client, period, shutdown, |text| println!("{text}")).await;
            info!(updates, "polling stopped");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn delete_defaults_to_demo_key() {
        let cli = Cli::try_parse_from(["city-client", "delete"]).expect("parse");
        match cli.command {
            Command::Delete { key } => assert_eq!(key, "city0"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn poll_interval_and_server_flags() {
        let cli = Cli::try_parse_from([
            "city-client", "poll", "--interval-secs", "5", "--server", "http://h:1",
        ])
        .expect("parse");
        assert_eq!(cli.server, "http://h:1");
        assert!(matches!(cli.command, Command::Poll { interval_secs: 5 }));
    }
}
