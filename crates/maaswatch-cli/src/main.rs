mod cmd;

use clap::{Parser, Subcommand};
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "maaswatch",
    about = "Watch a MAAS deployment for machine status changes",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the machines endpoint and report status changes
    Watch {
        /// MAAS API key, `consumer_key:token:secret` (overrides MAAS_API_KEY)
        #[arg(long, env = "MAAS_API_KEY", hide_env_values = true)]
        apikey: Option<String>,

        /// Machines endpoint URL (overrides --test and the production default)
        #[arg(long)]
        endpoint: Option<String>,

        /// Target a local `maaswatch mock` instead of the production MAAS
        #[arg(long)]
        test: bool,

        /// Seconds between polls
        #[arg(long, default_value = "15")]
        interval_secs: u64,
    },

    /// Run the mock MAAS backend
    Mock {
        /// Port to listen on (0 = OS-assigned)
        #[arg(long, default_value = "5240")]
        port: u16,

        /// Seconds between status mutator ticks
        #[arg(long, default_value = "10")]
        mutate_interval_secs: u64,

        /// Seed the status mutator for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Watch {
            apikey,
            endpoint,
            test,
            interval_secs,
        } => cmd::watch::run(
            apikey.as_deref(),
            endpoint.as_deref(),
            test,
            Duration::from_secs(interval_secs),
        ),
        Commands::Mock {
            port,
            mutate_interval_secs,
            seed,
        } => cmd::mock::run(port, Duration::from_secs(mutate_interval_secs), seed),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
