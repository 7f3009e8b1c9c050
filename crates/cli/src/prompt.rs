use anyhow::{bail, Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, MultiSelect};
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use vectormd_search::SearchResults;

pub const QUIT_COMMAND: &str = "quit";

const PATH_PROMPT: &str = "Please provide the path to your markdown file";

/// Dialoguer widgets need a terminal on both ends; piped sessions fall back
/// to reading plain lines from stdin.
fn interactive() -> bool {
    console::user_attended_stderr() && std::io::stdin().is_terminal()
}

pub fn ask_markdown_path() -> Result<PathBuf> {
    let answer = if interactive() {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(PATH_PROMPT)
            .interact_text()?
    } else {
        read_line(&mut std::io::stdin().lock(), PATH_PROMPT)?
            .context("No markdown path given on stdin")?
    };
    Ok(PathBuf::from(answer.trim()))
}

/// Next query line. End of input counts as `quit`.
pub fn ask_query() -> Result<String> {
    let prompt = format!("Query (or type '{QUIT_COMMAND}' to exit)");
    if interactive() {
        let answer: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        return Ok(answer);
    }
    Ok(read_line(&mut std::io::stdin().lock(), &prompt)?
        .unwrap_or_else(|| QUIT_COMMAND.to_string()))
}

/// Checkbox list over the result headings; returns the ticked positions.
/// Without a terminal the headings are listed and one line of positions is read.
pub fn select_results(results: &SearchResults) -> Result<Vec<usize>> {
    if results.is_empty() {
        return Ok(Vec::new());
    }
    if interactive() {
        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt("Select results")
            .items(&results.headings())
            .interact()?;
        return Ok(selected);
    }

    for (position, heading) in results.headings().iter().enumerate() {
        eprintln!("  [{position}] {heading}");
    }
    match read_line(
        &mut std::io::stdin().lock(),
        "Select results (positions separated by spaces or commas)",
    )? {
        Some(line) => parse_selection(&line),
        None => Ok(Vec::new()),
    }
}

/// Print `prompt` to stderr and read one line. `None` at end of input.
fn read_line(reader: &mut impl BufRead, prompt: &str) -> Result<Option<String>> {
    eprint!("{prompt}: ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
}

fn parse_selection(line: &str) -> Result<Vec<usize>> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| match token.parse::<usize>() {
            Ok(position) => Ok(position),
            Err(_) => bail!("Invalid selection {token:?}: expected a result position"),
        })
        .collect()
}

#[must_use]
pub fn is_quit(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(QUIT_COMMAND)
}
