use std::sync::Arc;

use colored::Colorize;
use lostbox_core::LifecycleService;
use lostbox_server::{LostboxServer, ServerConfig};
use lostbox_store::{
    InMemoryObjectStore, InMemoryRecordStore, RecordStore, RetryRecordStore,
};

use crate::cli::{Cli, Command, ServeArgs};

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args).await,
    }
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_toml_file(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    // Stores are constructed once here and handed to the service by
    // reference; nothing reaches into ambient globals.
    let records: Arc<dyn RecordStore> = if args.dev_retry {
        Arc::new(RetryRecordStore::new(InMemoryRecordStore::new()))
    } else {
        Arc::new(InMemoryRecordStore::new())
    };
    let objects = Arc::new(InMemoryObjectStore::new());
    let service = Arc::new(LifecycleService::new(records, objects));

    println!(
        "{} lostbox serving on {}",
        "✓".green().bold(),
        config.bind_addr.to_string().bold()
    );
    LostboxServer::new(config, service).serve().await?;
    Ok(())
}
