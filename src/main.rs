mod config;
mod script;
mod session;
mod store;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::{Value, json};

use crate::config::{ConfigError, HostConfig};
use crate::script::Script;
use crate::store::AnnotationStore;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot read script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid script {path}: {source}")]
    Script {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Parser, Debug)]
#[command(name = "annotate", about = "Replay scripted annotation sessions against the canvas engine")]
struct Cli {
    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pretty: bool,

    /// Log engine decisions at debug level (to stderr).
    #[arg(long, global = true, env = "ANNOTATE_VERBOSE")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a script and print the resulting shapes.
    Replay {
        script: PathBuf,
        /// Include every emitted action in the output.
        #[arg(long)]
        actions: bool,
    },
    /// Replay a script and print the final display list.
    Scene { script: PathBuf },
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();

    let host = HostConfig::from_env()?;

    match cli.command {
        Command::Replay { script, actions } => {
            let session = load_script(&script)?.replay(&host);
            let mut out = json!({
                "image_id": session.image_id(),
                "shapes": session.store().list(session.image_id()),
                "selection": session.selection(),
                "camera": session.engine().camera(),
            });
            if actions {
                out["actions"] = serde_json::to_value(session.log())?;
            }
            print_json(&out, cli.pretty)
        }
        Command::Scene { script } => {
            let session = load_script(&script)?.replay(&host);
            print_json(&serde_json::to_value(session.scene())?, cli.pretty)
        }
    }
}

fn load_script(path: &Path) -> Result<Script, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_path_buf(), source })?;
    Script::from_json(&raw).map_err(|source| CliError::Script { path: path.to_path_buf(), source })
}

fn print_json(value: &Value, pretty: bool) -> Result<(), CliError> {
    let rendered = if pretty { serde_json::to_string_pretty(value)? } else { serde_json::to_string(value)? };
    println!("{rendered}");
    Ok(())
}
