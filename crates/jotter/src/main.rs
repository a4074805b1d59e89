use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use jotter_config::EditorConfig;

mod script;

/// Headless editing driver: replays an edit script against a document
/// and prints the resulting text, selection, and history depth.
#[derive(Parser, Debug)]
#[command(name = "jotter", version, about)]
struct Cli {
    /// File providing the initial document content.
    input: Option<PathBuf>,

    /// Edit script to replay (reads stdin when omitted).
    #[arg(long)]
    script: Option<PathBuf>,

    /// Config file path (defaults to `jotter.json` next to the exe).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting jotter");

    let config_path = cli.config.unwrap_or_else(EditorConfig::config_path);
    let config = EditorConfig::load_or_create(&config_path);

    let initial = match &cli.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display()))?,
        None => String::new(),
    };

    let script_text = match &cli.script {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read script from stdin")?;
            buf
        }
    };

    let mut session = script::Session::new(&config, initial);
    session.run(&script_text)?;
    println!("{}", session.summary());

    Ok(())
}
