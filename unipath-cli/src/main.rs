//! Main entry point for the unipath CLI.
//!
//! This is the command-line interface for the unipath library. It provides
//! commands for inspecting interned paths and resolving layered data
//! directories:
//! - `norm`: Normalize a path string
//! - `info`: Show the decomposed parts of a path
//! - `crc`: Checksum a file
//! - `size`: Report the size of a file or directory tree
//! - `resolve`: Resolve a name through a union of directories
//! - `list`: List the entries of a directory
//! - `version`: Read a binary's embedded version

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Convert CLI args to GlobalOptions; this initializes the logger from
    // the verbosity flags
    let global = cli.global_options();

    // Execute the command
    let result = match cli.command {
        cli::Command::Norm(cmd) => cmd.execute(&global),
        cli::Command::Info(cmd) => cmd.execute(&global),
        cli::Command::Crc(cmd) => cmd.execute(&global),
        cli::Command::Size(cmd) => cmd.execute(&global),
        cli::Command::Resolve(cmd) => cmd.execute(&global),
        cli::Command::List(cmd) => cmd.execute(&global),
        cli::Command::Version(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            global.logger.error(&e.to_string());
            std::process::exit(e.exit_code());
        }
    }
}
