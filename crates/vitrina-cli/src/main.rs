//! Vitrina command-line front end.
//!
//! Usage:
//!   vitrina validate post.json
//!   vitrina import generated.json -o post.json
//!   vitrina export post.json --format markdown
//!   vitrina analyze post.json
//!   vitrina render post.json --records records.json > post.html
//!   vitrina templates --category list
//!   vitrina template list-30 -o blocks.json
//!   vitrina copy post.json --ids intro,faq
//!   vitrina paste --into other.json --at 2
//!   vitrina clipboard-clear
//!
//! Logs go to stderr; `RUST_LOG` overrides the configured filter.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt};
use vitrina_kernel::VitrinaConfig;

/// Block document engine: validate, import, export, analyze, render.
#[derive(Parser, Debug)]
#[command(name = "vitrina")]
#[command(about = "Validate, convert, analyze and render Vitrina block documents")]
struct Args {
    /// Config file (default: $XDG_CONFIG_HOME/vitrina/vitrina.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the import validation pipeline and print the report
    Validate { file: PathBuf },

    /// Validate and commit external JSON, writing the normalized document
    Import {
        file: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export a document as canonical JSON or Markdown
    Export {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Word counts, reading time, readability, SEO and keywords
    Analyze { file: PathBuf },

    /// Render a document to HTML on stdout
    Render {
        file: PathBuf,
        /// JSON file with `programs` and `blogs` record lists for card/grid blocks
        #[arg(long)]
        records: Option<PathBuf>,
    },

    /// List templates
    Templates {
        #[arg(long)]
        category: Option<String>,
    },

    /// Instantiate a template as a block array with fresh ids
    Template {
        id: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Copy (or cut) blocks of a document into the clipboard slot
    Copy {
        file: PathBuf,
        /// Remove the blocks from the file
        #[arg(long)]
        cut: bool,
        /// Block ids (default: every block)
        #[arg(long, value_delimiter = ',')]
        ids: Vec<String>,
    },

    /// Paste the clipboard slot with fresh ids
    Paste {
        /// Insert into this document instead of printing the blocks
        #[arg(long)]
        into: Option<PathBuf>,
        /// Insert position (default: end)
        #[arg(long, requires = "into")]
        at: Option<usize>,
        #[arg(short, long, conflicts_with = "into")]
        output: Option<PathBuf>,
    },

    /// Empty the clipboard slot
    ClipboardClear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Markdown,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let config = VitrinaConfig::load(args.config.as_deref())?;

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    commands::run(args.command, &config).await
}
