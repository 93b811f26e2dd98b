//! Credence CLI library.
//!
//! Command-line interface over the trust layer: consolidate a JSON batch of
//! raw assertions, run the full promotion pipeline, or compare two fact
//! values through the value algebra.

pub mod batch;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use batch::JsonBatchSource;
pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
