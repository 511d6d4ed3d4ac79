//! mdindex: tables of contents and navigation for a tree of Markdown files.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use mdindex::{config, edit_plan, index, input};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mdindex")]
#[command(about = "Table of contents and navigation links for trees of Markdown files", long_about = None)]
struct Args {
    /// Directory or Markdown file to index
    #[arg(value_name = "PATH", default_value = ".")]
    path: PathBuf,

    /// Deepest heading level listed in a table of contents
    #[arg(long, value_name = "LEVEL")]
    toc_depth: Option<usize>,

    /// Load preferences from this file instead of mdindex.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the edit plan as JSON instead of writing files
    #[arg(long)]
    dry_run: bool,
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut cfg = args
        .config
        .as_deref()
        .map_or_else(config::Config::load, config::Config::load_from);

    // Override config with command line args
    if let Some(depth) = args.toc_depth {
        cfg.toc_max_level = depth;
    }

    let tree = input::load(&args.path, &cfg)?;
    let indexer = index::Indexer::new(&cfg);
    let plan = edit_plan::EditPlan {
        files: indexer.index_object(&tree, index::IndexOptions::default()),
    };

    if args.dry_run {
        let json = serde_json::to_string_pretty(&plan).map_err(io::Error::other)?;
        println!("{json}");
        return Ok(());
    }

    plan.apply()
}
