mod command;
mod database;

use anyhow::Result;
use clap::Parser;
use command::{Command, StatementKind};
use database::ConnectionArgs;
use docquery::StatementExecutor;
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "docquery-cli")]
#[command(about = "Build (and optionally run) MySQL statements from JSON query descriptions")]
#[command(version)]
struct Cli {
    /// Run the statement against MySQL instead of printing it
    #[arg(long, global = true)]
    execute: bool,

    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Command,
}

fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing();

    let (statement, kind) = cli.command.build()?;

    if !cli.execute {
        println!("{}", serde_json::to_string_pretty(&statement)?);
        return Ok(());
    }

    let connector = database::connect(&cli.connection).await?;
    let output = match kind {
        StatementKind::Read => connector
            .fetch_all(&statement)
            .await
            .map(|rows| json!(rows)),
        StatementKind::Write => connector
            .execute(&statement)
            .await
            .map(|result| json!(result)),
    };
    connector.disconnect().await?;

    println!("{}", serde_json::to_string_pretty(&output?)?);
    Ok(())
}
