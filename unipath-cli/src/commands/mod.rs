//! CLI command implementations.
//!
//! Each command is a clap `Args` struct with an `execute` method taking the
//! global options.

mod crc;
mod info;
mod list;
mod norm;
mod resolve;
mod size;
mod version;

pub use crc::CrcCommand;
pub use info::InfoCommand;
pub use list::ListCommand;
pub use norm::NormCommand;
pub use resolve::ResolveCommand;
pub use size::SizeCommand;
pub use version::VersionCommand;
