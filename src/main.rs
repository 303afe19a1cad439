//! tgraft - graft and prune directory trees.
//!
//! Usage:
//!   tgraft graft SOURCE DESTINATION   Copy SOURCE into DESTINATION/<name of SOURCE>
//!   tgraft prune DIRECTORY            Recursively delete DIRECTORY
//!   tgraft rm FILE...                 Delete files, tolerating missing ones
//!   tgraft --help                     Show help

use std::path::PathBuf;
use std::sync::Arc;

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

use treegraft_core::{Notification, OpsConfig};
use treegraft_ops::TreeOps;

#[derive(Parser)]
#[command(
    name = "tgraft",
    version,
    about = "Graft and prune directory trees",
    long_about = "tgraft copies a directory tree into a fresh directory under a \
                  destination, removing the partial copy if anything fails, and \
                  deletes directory trees or lists of files."
)]
struct Cli {
    /// Resolve relative paths against this directory
    #[arg(short = 'C', long, global = true)]
    working_dir: Option<PathBuf>,

    /// Do not print notifications about skipped or missing entries
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Copy SOURCE into a new directory DESTINATION/<name of SOURCE>
    Graft {
        /// Directory to copy
        source: PathBuf,

        /// Existing directory to copy into
        destination: PathBuf,
    },

    /// Recursively delete a directory
    Prune {
        /// Directory to delete
        directory: PathBuf,
    },

    /// Delete files, reporting any that are already gone
    Rm {
        /// Files to delete, in order
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut builder = OpsConfig::builder();
    // Notifications already reach the user through the sink below.
    builder.log_notifications(false);
    if let Some(dir) = cli.working_dir {
        builder.working_dir(dir);
    }
    let config = builder.build().context("Invalid configuration")?;

    let mut ops = TreeOps::new().with_config(config);
    if !cli.quiet {
        ops.set_sink(Arc::new(|n: &Notification| eprintln!("note: {n}")));
    }

    match cli.command {
        Command::Graft {
            source,
            destination,
        } => {
            let new_path = ops.graft(&source, &destination).await.with_context(|| {
                format!(
                    "Failed to graft {} into {}",
                    source.display(),
                    destination.display()
                )
            })?;
            eprintln!("Grafted {} to {}", source.display(), new_path.display());
        }
        Command::Prune { directory } => {
            ops.prune(&directory)
                .await
                .with_context(|| format!("Failed to prune {}", directory.display()))?;
        }
        Command::Rm { files } => {
            ops.remove_files(&files)
                .await
                .context("Failed to remove files")?;
        }
    }

    Ok(())
}

/// Install the stderr log subscriber, honoring `RUST_LOG` when set.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
