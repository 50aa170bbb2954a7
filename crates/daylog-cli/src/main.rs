//! Daylog CLI
//!
//! Thin wrapper around daylog-core for emitting lines from scripts and
//! inspecting the settings that seed new loggers.
//!
//! ## Usage
//!
//! ```bash
//! # Log one line through the "deploy" logger
//! daylog emit --logger deploy --level success "release 1.4.2 is live"
//!
//! # Write somewhere else, without colors, using the minimal header
//! daylog emit --dir /tmp/logs --no-color --format minimal "hello"
//!
//! # List severities
//! daylog levels
//!
//! # Show the settings file (missing entries are filled with defaults)
//! daylog settings
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use daylog_core::settings::keys;
use daylog_core::{LogError, LoggerDefaults, Registry, SchemeRegistry, SettingsStore, Severity};

const DEFAULT_LOGGER: &str = "daylog";

/// Daylog - named loggers with per-day log files
#[derive(Parser)]
#[command(name = "daylog")]
#[command(version = "0.1.0")]
#[command(about = "Daylog - named loggers with per-day log files")]
struct Cli {
    /// Increase verbosity of daylog's own diagnostics (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Settings file (default: <config dir>/daylog/settings.json)
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log one message
    Emit {
        /// Logger name (also the log file stem)
        #[arg(short, long, default_value = DEFAULT_LOGGER)]
        logger: String,

        /// Severity of the message
        #[arg(short = 'L', long, default_value = "info")]
        level: String,

        /// Override the logger threshold for this run
        #[arg(short, long)]
        threshold: Option<String>,

        /// Output directory for the day file
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Disable ANSI colors on the console
        #[arg(long)]
        no_color: bool,

        /// Format scheme: minimal, default or complete
        #[arg(short, long)]
        format: Option<String>,

        /// Message text (joined with spaces)
        #[arg(required = true)]
        message: Vec<String>,
    },

    /// List severities with their rank and color code
    Levels,

    /// Print the settings, filling in missing entries
    Settings,
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

/// Get the default settings file (<config dir>/daylog/settings.json)
fn default_settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("daylog")
        .join("settings.json")
}

fn parse_severity(s: &str) -> Result<Severity> {
    Severity::from_name(s).ok_or_else(|| {
        let known: Vec<_> = Severity::ALL.iter().map(|s| s.name()).collect();
        anyhow::anyhow!(LogError::UnknownSeverity(s.to_string())).context(format!(
            "Expected one of: {}",
            known.join(", ")
        ))
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let settings_path = cli.settings.unwrap_or_else(default_settings_path);
    let mut store = SettingsStore::load(&settings_path)
        .with_context(|| format!("Failed to load settings from {}", settings_path.display()))?;
    tracing::debug!(path = %settings_path.display(), "settings loaded");
    let schemes = SchemeRegistry::new();

    match cli.command {
        Commands::Emit {
            logger,
            level,
            threshold,
            dir,
            no_color,
            format,
            message,
        } => {
            let severity = parse_severity(&level)?;
            let registry = Registry::from_store(&mut store, &schemes)?;
            let logger = registry.get_or_create(&logger);

            if let Some(threshold) = threshold {
                logger.set_threshold(parse_severity(&threshold)?);
            }
            if let Some(dir) = dir {
                logger.set_directory(&dir)?;
            }
            if no_color {
                logger.set_ansi_enabled(false);
            }
            if let Some(name) = format {
                let template = schemes.build(&name).ok_or_else(|| {
                    anyhow::anyhow!(LogError::UnknownScheme(name.clone()))
                        .context(format!("Known schemes: {}", schemes.names().join(", ")))
                })?;
                logger.set_template(template);
            }

            logger.log(&message.join(" "), severity, severity.color());
            tracing::info!(logger = logger.name(), %severity, "message emitted");
            logger.close();
        }

        Commands::Levels => {
            println!("{:<6} {:<9} {}", "RANK", "NAME", "COLOR");
            for severity in Severity::ALL {
                println!(
                    "{:<6} {:<9} {}",
                    severity.rank(),
                    severity.name(),
                    severity.color().code()
                );
            }
        }

        Commands::Settings => {
            let defaults = LoggerDefaults::from_store(&mut store, &schemes)?;
            println!("Settings file: {}", settings_path.display());
            println!("{}", store.to_pretty_json()?);
            println!();
            println!("Effective defaults:");
            println!("  {}: {}", keys::LEVEL, defaults.threshold);
            println!("  {}: {}", keys::SUPPORTS_COLOR, defaults.ansi);
            println!("  {}: {}", keys::USE_FILE, defaults.use_file);
            println!("  {}: {}", keys::FILE_DIRECTORY, defaults.directory.display());
        }
    }

    Ok(())
}
