//! Command-line front end for the pattern catalogue.
//!
//! Run with: cargo run --bin catalog -- list --category behavioral

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use pattern_catalog::showcase::{self, Transcript};
use pattern_catalog::{logging, CatalogConfig, Category, PatternId};

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Design pattern catalogue with runnable scenarios")]
struct Args {
    /// Path to a TOML configuration file (falls back to PATTERN_CATALOG_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List patterns with their category and summary
    List {
        #[arg(long)]
        category: Option<String>,
    },
    /// Run one pattern's scenario
    Run {
        pattern: String,

        /// Print the transcript as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run every scenario in catalogue order
    All {
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = CatalogConfig::load(args.config.as_deref())
        .context("failed to load catalogue configuration")?;
    if args.verbose {
        config.logging.level = "debug".to_string();
    }
    if args.json_logs {
        config.logging.json = true;
    }
    logging::init(&config.logging);
    tracing::debug!(?config, "configuration loaded");

    match args.command {
        Command::List { category } => list(category.as_deref()),
        Command::Run { pattern, json } => {
            let id: PatternId = pattern
                .parse()
                .with_context(|| format!("cannot run '{pattern}'"))?;
            let transcript = showcase::run(id, &config)
                .with_context(|| format!("scenario '{id}' failed"))?;
            emit(&[transcript], json)
        }
        Command::All { json } => {
            let transcripts = showcase::run_all(&config).context("scenario run failed")?;
            emit(&transcripts, json)
        }
    }
}

fn list(category: Option<&str>) -> Result<()> {
    let categories = match category {
        Some(name) => vec![name.parse::<Category>()?],
        None => Category::ALL.to_vec(),
    };

    for category in categories {
        println!("{}", category.name().to_uppercase().bold().cyan());
        for pattern in PatternId::in_category(category) {
            println!("  {:<18} {}", pattern.name().green(), pattern.summary());
        }
    }
    Ok(())
}

fn emit(transcripts: &[Transcript], json: bool) -> Result<()> {
    if json {
        let rendered = match transcripts {
            [single] => serde_json::to_string_pretty(single)?,
            many => serde_json::to_string_pretty(many)?,
        };
        println!("{rendered}");
        return Ok(());
    }

    for transcript in transcripts {
        println!(
            "{} {}",
            format!("== {} ==", transcript.pattern).bold().cyan(),
            format!("({})", transcript.category).dimmed()
        );
        for line in &transcript.lines {
            if line.contains("rejected") {
                println!("  {}", line.yellow());
            } else {
                println!("  {line}");
            }
        }
        println!();
    }
    Ok(())
}
