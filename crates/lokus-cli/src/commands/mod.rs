use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::config::CliConfig;

mod check;
mod init;
mod schema;

pub use check::{CheckOutcome, check_manifest};
pub use init::{InitRequest, write_template};
pub use schema::schema_document;

/// Check and scaffold Lokus plugin manifests
#[derive(Parser)]
#[command(name = "lokus-manifest", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to lokus-manifest.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (e.g. debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a plugin manifest file
    Check {
        /// Path to the manifest (plugin.json)
        path: PathBuf,
        /// Print the validation result as JSON
        #[arg(long)]
        json: bool,
        /// Treat warnings as failures
        #[arg(long)]
        deny_warnings: bool,
    },
    /// Write a starter manifest that passes validation
    Init {
        /// Plugin id (derived from --name when omitted)
        #[arg(long)]
        id: Option<String>,
        /// Display name
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        author: Option<String>,
        /// Requested permission (repeatable)
        #[arg(short, long = "permission")]
        permissions: Vec<String>,
        /// Output path
        #[arg(short, long, default_value = "plugin.json")]
        out: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the recognized fields, permissions, events and categories
    Schema {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Run the selected command and return the process exit code.
    pub fn run(self) -> lokus_manifest::Result<i32> {
        // Config decides the log format, so it loads before the subscriber
        let config = CliConfig::load(self.config.as_deref())?;

        // Resolve log level: --verbose > --quiet > --log-level > config default
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            self.log_level.as_deref().unwrap_or(&config.logging.level)
        };
        init_logging(log_level, &config.logging.format);

        match &config.source {
            Some(path) => info!(?path, "loaded configuration"),
            None => debug!(
                path = ?CliConfig::resolve_path(None),
                "config file not found, using defaults"
            ),
        }
        for w in config.validate() {
            warn!("{}", w);
        }

        match self.command {
            Commands::Check {
                path,
                json,
                deny_warnings,
            } => {
                let deny_warnings = deny_warnings || config.check.deny_warnings;
                check::cmd_check(&path, json, deny_warnings)
            }
            Commands::Init {
                id,
                name,
                description,
                author,
                permissions,
                out,
                force,
            } => {
                let request = InitRequest {
                    id,
                    name,
                    description,
                    author,
                    permissions,
                    out,
                    force,
                };
                init::cmd_init(&request)
            }
            Commands::Schema { json } => schema::cmd_schema(json),
        }
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `level`. Logs go to
/// stderr so `--json` output on stdout stays clean.
fn init_logging(level: &str, format: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = match format {
        "json" => builder.json().with_target(true).try_init(),
        "compact" => builder.compact().with_target(false).try_init(),
        _ => builder.with_target(false).try_init(),
    };
    if let Err(e) = installed {
        eprintln!("failed to install log subscriber: {e}");
    }
}
