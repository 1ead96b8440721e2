// aipatch/src/main.rs
//! aipatch entry point.
//!
//! Parses the CLI, initializes logging, and runs the apply command.

use anyhow::Result;
use clap::Parser;

use aipatch::cli::Cli;
use aipatch::commands::apply;
use aipatch::logger;

fn main() -> Result<()> {
    let args = Cli::parse();

    if args.quiet {
        logger::init_logger(Some(log::LevelFilter::Error));
    } else if args.debug {
        logger::init_logger(Some(log::LevelFilter::Debug));
    } else {
        logger::init_logger(None);
    }

    apply::run(&args)
}
