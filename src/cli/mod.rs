pub mod commands;

use clap::{Parser, Subcommand};

use crate::config;

#[derive(Parser)]
#[command(name = "filmhub")]
#[command(about = "Movie and actor catalog API server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP API server (default)")]
    Serve {
        #[arg(long, help = "Bind address, overrides SERVER_HOST")]
        host: Option<String>,

        #[arg(long, help = "Listen port, overrides SERVER_PORT")]
        port: Option<u16>,

        #[arg(long, help = "Skip applying migrations at startup")]
        no_migrate: bool,
    },

    #[command(about = "Apply pending database migrations and exit")]
    Migrate,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = config::init()?.clone();
    tracing::info!("Starting filmhub in {:?} mode", config.environment);

    match cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
        no_migrate: false,
    }) {
        Commands::Serve {
            host,
            port,
            no_migrate,
        } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if no_migrate {
                config.database.run_migrations = false;
            }
            commands::serve::handle(config).await
        }
        Commands::Migrate => commands::migrate::handle(&config).await,
    }
}
