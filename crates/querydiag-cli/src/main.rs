mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "querydiag")]
#[command(about = "Locate and format query compiler errors", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to diagnostics config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Locale section of the config to use for phrases and labels
    #[arg(short, long, global = true)]
    locale: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve an error offset and print the formatted message
    Locate {
        /// Query file, or `-` for stdin
        input: PathBuf,

        /// 0-based char offset where the error was detected
        #[arg(short, long)]
        offset: Option<usize>,

        /// Error description
        #[arg(short, long, default_value = "Syntax error")]
        description: String,

        /// Literal context label, e.g. "WHERE clause"
        #[arg(long, conflicts_with = "label_key")]
        label: Option<String>,

        /// Context label looked up in the config's string table
        #[arg(long)]
        label_key: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Print the query text as it is shown in diagnostics
    Normalize {
        /// Query file, or `-` for stdin
        input: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON snapshot for tooling
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries command output; logs go to stderr
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    let formatter = commands::load_formatter(cli.config.as_deref(), cli.locale.as_deref())?;

    match cli.command {
        Commands::Locate {
            input,
            offset,
            description,
            label,
            label_key,
            format,
        } => {
            let args = commands::locate::LocateArgs {
                input,
                offset,
                description,
                label: commands::locate::label_from_flags(label, label_key),
                format,
            };
            commands::locate::run(&formatter, &args)?;
        }
        Commands::Normalize { input } => {
            commands::normalize::run(&formatter, &input)?;
        }
    }

    Ok(())
}
