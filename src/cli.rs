use clap::{Parser, Subcommand};

use crate::commands;
use crate::config;

#[derive(Parser)]
#[command(name = "tradearena-api")]
#[command(about = "TradeArena HTTP API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = config::DEFAULT_PORT)]
        port: u16,

        /// Expose the NON-FUNCTIONAL password-change stub endpoint.
        /// It reports success without changing anything.
        #[arg(long)]
        enable_password_stub: bool,
    },
}

pub async fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            enable_password_stub,
        } => {
            commands::serve::run(port, enable_password_stub).await;
        }
    }
}
