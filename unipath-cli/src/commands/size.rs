//! Command to report the size of a file or directory tree.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;

/// Print the size in bytes of a file, or the recursive total for a
/// directory.
#[derive(Args)]
pub struct SizeCommand {
    /// File or directory to measure
    pub path: String,
}

impl SizeCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let path = global.interner().intern(&self.path);
        let size = path.size().map_err(CliError::from)?;
        println!("{size}");
        Ok(())
    }
}
