use anyhow::Result;
use clap::Parser;
use vectormd_cli::command::{self, QueryArgs};

fn main() -> Result<()> {
    vectormd_cli::logging::init();
    command::query(QueryArgs::parse())
}
