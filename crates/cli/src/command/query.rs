use crate::config::Config;
use crate::prompt;
use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use console::style;
use std::path::PathBuf;
use vectormd_search::{QueryEngine, SearchResults, SessionLog};

#[derive(Debug, Parser)]
#[command(name = "vmd", version, about = "Search VectorMD")]
pub struct QueryArgs {
    /// Query text; prompts in a loop when omitted
    pub query: Vec<String>,

    /// Config file (defaults to $VECTORMD_CONFIG or the per-user config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print results as JSON instead of prompting
    #[arg(long, conflicts_with = "no_select")]
    pub json: bool,

    /// Print the result table without prompting for a selection
    #[arg(long)]
    pub no_select: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Select,
    Table,
    Json,
}

impl QueryArgs {
    #[must_use]
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.no_select {
            OutputMode::Table
        } else {
            OutputMode::Select
        }
    }

    /// Words joined into one query, or `None` for the prompt loop.
    #[must_use]
    pub fn joined_query(&self) -> Option<String> {
        let joined = self.query.join(" ");
        (!joined.trim().is_empty()).then_some(joined)
    }
}

pub fn execute(args: QueryArgs) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let mut engine = QueryEngine::open(
        &config.store_config(),
        config.templates(),
        config.search.top_k,
    );
    let journal = SessionLog::new(&config.journal.path)
        .with_utc_offset_hours(config.journal.utc_offset_hours)?;
    let mode = args.output_mode();

    if let Some(query) = args.joined_query() {
        return run_once(&mut engine, &journal, &query, mode);
    }

    loop {
        let input = prompt::ask_query()?;
        if prompt::is_quit(&input) {
            return Ok(());
        }
        if input.trim().is_empty() {
            continue;
        }
        run_once(&mut engine, &journal, input.trim(), mode)?;
    }
}

fn run_once(
    engine: &mut QueryEngine,
    journal: &SessionLog,
    query: &str,
    mode: OutputMode,
) -> Result<()> {
    let results = engine.query(query)?;
    match mode {
        OutputMode::Json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        OutputMode::Table => print!("{}", results.to_table()),
        OutputMode::Select => select_and_log(journal, &results)?,
    }
    Ok(())
}

fn select_and_log(journal: &SessionLog, results: &SearchResults) -> Result<()> {
    let selected = prompt::select_results(results)?;
    let written = journal
        .append(results, &selected, Utc::now())
        .with_context(|| format!("Failed to write {}", journal.path().display()))?;
    if written.is_some() {
        println!(
            "{} Logged {} result(s) to {}",
            style("✓").green(),
            selected.len(),
            journal.path().display()
        );
    }
    Ok(())
}
