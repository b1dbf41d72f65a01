use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lostbox",
    about = "lostbox — lost-and-found coordination server",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the lostbox HTTP server
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on (overrides the config file)
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// Path to a TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Wrap the record store in the transient-retry decorator
    /// (development convenience for flaky local drivers)
    #[arg(long)]
    pub dev_retry: bool,
}
