//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CrcCommand, InfoCommand, ListCommand, NormCommand, ResolveCommand, SizeCommand, VersionCommand,
};
use crate::utils::GlobalOptions;
use clap::{Parser, Subcommand, ValueEnum};
use unipath::{CaseFolding, NormConfig, Style};

/// Command-line tool for inspecting interned paths and resolving layered
/// data directories.
#[derive(Parser)]
#[command(name = "unipath")]
#[command(version, about = "Inspect and resolve game data paths", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Path syntax to use (defaults to the host platform's)
    #[arg(long, value_enum, global = true, value_name = "STYLE")]
    pub style: Option<StyleArg>,

    /// Case policy for comparisons (defaults to the style's convention)
    #[arg(long, value_enum, global = true, value_name = "CASING")]
    pub casing: Option<CasingArg>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Normalize a path string
    Norm(NormCommand),

    /// Show the decomposed parts of a path
    Info(InfoCommand),

    /// CRC-32 checksum of a file
    Crc(CrcCommand),

    /// Size of a file or directory tree in bytes
    Size(SizeCommand),

    /// Resolve a name through a union of directories
    Resolve(ResolveCommand),

    /// List the entries of a directory
    List(ListCommand),

    /// Read a binary's embedded version
    Version(VersionCommand),
}

/// Path syntax selector.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StyleArg {
    /// Forward-slash separators, no drive prefixes
    Unix,
    /// Backslash separators and drive-letter prefixes
    Windows,
}

/// Case policy selector.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CasingArg {
    /// Compare paths case-sensitively
    Preserve,
    /// Compare paths case-insensitively
    Fold,
}

impl Cli {
    /// Collapse the global flags into the options passed to every command.
    pub fn global_options(&self) -> GlobalOptions {
        let style = match self.style {
            Some(StyleArg::Unix) => Style::Unix,
            Some(StyleArg::Windows) => Style::Windows,
            None => Style::native(),
        };
        let casing = match self.casing {
            Some(CasingArg::Preserve) => CaseFolding::Preserve,
            Some(CasingArg::Fold) => CaseFolding::Fold,
            None => style.default_casing(),
        };
        GlobalOptions {
            logger: unipath::init_logger(self.verbose, self.quiet),
            config: NormConfig::new(style, casing),
        }
    }
}
