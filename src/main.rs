mod cli;
mod commands;
mod config;
mod error;
mod models;
mod server;
mod services;

#[tokio::main]
async fn main() {
    cli::run().await;
}
