use anyhow::Result;
use clap::Parser;
use vectormd_cli::command::{self, InitArgs};

fn main() -> Result<()> {
    vectormd_cli::logging::init();
    command::init(InitArgs::parse())
}
