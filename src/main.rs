//! list-content - list content included in AsciiDoc files
//!
//! list-content provides:
//! - Transitive discovery of included documents and images
//! - Content type classification by file prefix and by attribute
//! - Delimited, line-oriented output for build tooling

use clap::Parser;
use std::process;

mod catalog;
mod cli;
mod core;
mod inventory;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("LIST_CONTENT_LOG", "warn"))
        .format_timestamp(None)
        .init();

    let cli = cli::Cli::parse();
    if let Err(e) = cli::run(cli) {
        eprintln!("list-content: {:#}", e);
        process::exit(1);
    }
}
