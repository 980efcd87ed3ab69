//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive lookup and configuration prompts
//! - Animated, human-friendly output

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod logger;
mod present;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
