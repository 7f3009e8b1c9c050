mod init;
mod query;

pub use init::{execute as init, resolve_markdown_path, InitArgs};
pub use query::{execute as query, OutputMode, QueryArgs};
