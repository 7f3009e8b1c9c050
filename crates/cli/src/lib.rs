//! Command-line front end for VectorMD: `vmd-init` builds the index from a
//! markdown file, `vmd` queries it.

pub mod command;
pub mod config;
pub mod logging;
pub mod prompt;

pub use config::Config;
