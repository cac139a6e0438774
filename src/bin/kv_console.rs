//! Interactive console for a distributed key-value store.
//!
//! Every input line is handled like a form submission: it is dispatched as an
//! independent task, so a slow request never blocks the next command.

use clap::{Parser, Subcommand};
use kvstore_console::{
    ClientConfig, DeleteOutcome, GetOutcome, KvConsole, KvResult, RefreshOutcome, SetOutcome,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "kv-console")]
#[command(about = "Control-plane console for a distributed key-value store")]
struct Cli {
    /// Base URL of the store's HTTP interface
    #[arg(long)]
    base_url: Option<String>,
    /// Poll cluster status every N seconds (0 disables polling)
    #[arg(long)]
    poll_interval_secs: Option<u64>,
    /// Read configuration from this dotenv file instead of the environment
    #[arg(long)]
    env_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
enum Commands {
    /// Print the cluster node list
    Status,
    /// Store a value
    Set { key: String, value: String },
    /// Read a value
    Get { key: String },
    /// Delete a key
    Delete { key: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> KvResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    info!(base_url = %config.base_url, "starting kv-console");

    let console = Arc::new(KvConsole::from_config(config)?);
    console.start().await;

    match cli.command {
        Some(command) => execute(&console, command).await,
        None => {
            print_nodes(&console).await;
            run_interactive(console).await;
        }
    }
    Ok(())
}

fn load_config(cli: &Cli) -> KvResult<ClientConfig> {
    let config = match &cli.env_file {
        Some(path) => ClientConfig::from_env_file(path)?,
        None => {
            dotenvy::dotenv().ok();
            ClientConfig::from_env()?
        }
    };
    Ok(apply_overrides(cli, config))
}

/// Command-line flags take precedence over the environment.
fn apply_overrides(cli: &Cli, mut config: ClientConfig) -> ClientConfig {
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(secs) = cli.poll_interval_secs {
        config.poll_interval = (secs > 0).then(|| Duration::from_secs(secs));
    }
    config
}

async fn run_interactive(console: Arc<KvConsole>) {
    let poller = console.spawn_polling();
    println!("commands: set <key> <value> | get <key> | delete <key> | status | refresh | quit");

    let mut tasks = JoinSet::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!(error = %e, "failed to read input");
                break;
            }
        };

        match parse_line(&line) {
            Ok(Some(ConsoleInput::Quit)) => break,
            Ok(Some(ConsoleInput::Refresh)) => {
                let console = Arc::clone(&console);
                tasks.spawn(async move {
                    if console.refresh().await.is_applied() {
                        print_nodes(&console).await;
                    }
                });
            }
            Ok(Some(ConsoleInput::Command(command))) => {
                let console = Arc::clone(&console);
                tasks.spawn(async move { execute(&console, command).await });
            }
            Ok(None) => {}
            Err(message) => eprintln!("{}", message),
        }
    }

    if let Some(poller) = poller {
        poller.abort();
    }
    // Requests already issued run to completion.
    while tasks.join_next().await.is_some() {}
}

async fn execute(console: &KvConsole, command: Commands) {
    match command {
        Commands::Status => print_nodes(console).await,
        Commands::Set { key, value } => {
            if let SetOutcome::Stored { refresh } = console.set(&key, &value).await {
                print_after_refresh(console, &refresh).await;
            }
        }
        Commands::Get { key } => match console.get(&key).await {
            GetOutcome::Found { key, value } => println!("{} = {}", key, value),
            GetOutcome::NotFound { key } => println!("{} not found", key),
            GetOutcome::Failed(_) => {}
        },
        Commands::Delete { key } => {
            if let DeleteOutcome::Deleted { refresh } = console.delete(&key).await {
                print_after_refresh(console, &refresh).await;
            }
        }
    }
}

async fn print_after_refresh(console: &KvConsole, refresh: &RefreshOutcome) {
    if refresh.is_applied() {
        print_nodes(console).await;
    }
}

async fn print_nodes(console: &KvConsole) {
    println!("nodes:");
    for line in console.rendered().await {
        println!("  {}", line);
    }
}

#[derive(Debug, PartialEq, Eq)]
enum ConsoleInput {
    Command(Commands),
    Refresh,
    Quit,
}

/// Parses one input line. Blank lines yield `None`.
fn parse_line(line: &str) -> Result<Option<ConsoleInput>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim_start();
    let input = match verb {
        "set" => {
            let (key, value) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: set <key> <value>".to_string())?;
            ConsoleInput::Command(Commands::Set {
                key: key.to_string(),
                value: value.trim_start().to_string(),
            })
        }
        "get" => ConsoleInput::Command(Commands::Get {
            key: single_argument(rest, "usage: get <key>")?,
        }),
        "delete" => ConsoleInput::Command(Commands::Delete {
            key: single_argument(rest, "usage: delete <key>")?,
        }),
        "status" | "nodes" => ConsoleInput::Command(Commands::Status),
        "refresh" => ConsoleInput::Refresh,
        "quit" | "exit" => ConsoleInput::Quit,
        other => return Err(format!("unknown command: {}", other)),
    };
    Ok(Some(input))
}

fn single_argument(rest: &str, usage: &str) -> Result<String, String> {
    match rest.split_whitespace().collect::<Vec<_>>().as_slice() {
        [key] => Ok(key.to_string()),
        _ => Err(usage.to_string()),
    }
}
