mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use cfgedit_config::EditorConfig;
use clap::{Parser, Subcommand};

/// Command-line front end for the cfgedit editing engine.
#[derive(Parser, Debug)]
#[command(name = "cfgedit", version, about)]
struct Cli {
    /// Config file to read defaults from (created with defaults if missing).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate JSON files and report every error.
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print each line's tokens.
    Highlight {
        file: PathBuf,
        /// Color tokens with the active palette.
        #[arg(long)]
        color: bool,
    },
    /// Find every occurrence of a query.
    Search {
        query: String,
        file: PathBuf,
        #[arg(long)]
        regex: bool,
        #[arg(long)]
        case_sensitive: bool,
    },
    /// Line diff between two files.
    Diff { old: PathBuf, new: PathBuf },
    /// Character, word and line counts.
    Stats { file: PathBuf },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.unwrap_or_else(EditorConfig::config_path);
    let config = EditorConfig::load_or_create(&config_path);
    tracing::debug!("Using config at {}", config_path.display());

    let mut out = std::io::stdout().lock();
    let clean = match cli.command {
        Command::Check { files } => commands::check(&files, &mut out)?,
        Command::Highlight { file, color } => {
            let palette = color.then(|| config.active_palette());
            let background = config.background_color().filter(|_| color);
            commands::highlight(&file, palette.as_ref(), background, &mut out)?
        }
        Command::Search {
            query,
            file,
            regex,
            case_sensitive,
        } => {
            let options = cfgedit_core::SearchOptions {
                use_regex: regex || config.search_use_regex,
                case_sensitive: case_sensitive || config.search_case_sensitive,
            };
            commands::search(&query, &file, options, &mut out)?
        }
        Command::Diff { old, new } => commands::diff(&old, &new, &mut out)?,
        Command::Stats { file } => commands::stats(&file, &mut out)?,
    };

    Ok(if clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
