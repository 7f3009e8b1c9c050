use crate::config::Config;
use crate::prompt;
use anyhow::{bail, Result};
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use vectormd_indexer::DocumentIndexer;

pub const DEFAULT_MARKDOWN_FILE: &str = "vecDB.md";

#[derive(Debug, Parser)]
#[command(name = "vmd-init", version, about = "Initialize VectorMD")]
pub struct InitArgs {
    /// Path to the markdown file
    #[arg(long, default_value = DEFAULT_MARKDOWN_FILE)]
    pub file: PathBuf,

    /// Config file (defaults to $VECTORMD_CONFIG or the per-user config)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn execute(args: InitArgs) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let markdown = resolve_markdown_path(&args.file, prompt::ask_markdown_path)?;
    let store = config.store_config();

    let indexer = DocumentIndexer::new(config.templates(), config.index_options())?;
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("{spinner} embedding headings {bar:30} {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let (_, stats) = indexer.setup(
        &markdown,
        &config.embedding.model,
        Some(&store),
        |done, total| {
            bar.set_length(total as u64);
            bar.set_position(done as u64);
        },
    )?;
    bar.finish_and_clear();

    println!(
        "{} Indexed {} sections from {} ({} dims, {}) in {} ms",
        style("✓").green(),
        stats.sections,
        markdown.display(),
        stats.dimension,
        stats.model_id,
        stats.time_ms
    );
    println!("  artifacts: {}", store.dir.display());
    Ok(())
}

/// Use `file` if it exists, otherwise ask once for another path.
pub fn resolve_markdown_path(
    file: &Path,
    ask: impl FnOnce() -> Result<PathBuf>,
) -> Result<PathBuf> {
    if file.is_file() {
        return Ok(file.to_path_buf());
    }
    eprintln!("File {} not found.", file.display());
    let answer = ask()?;
    if !answer.is_file() {
        bail!("File {} not found.", answer.display());
    }
    Ok(answer)
}
