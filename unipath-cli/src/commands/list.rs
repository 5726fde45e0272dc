//! Command to list the entries of a directory.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;

/// Print the sorted entry names of a directory, one per line.
///
/// With several directories the listing is their union, deduplicated by
/// the configured comparison form.
#[derive(Args)]
pub struct ListCommand {
    /// Directories to list
    #[arg(required = true)]
    pub dirs: Vec<String>,
}

impl ListCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let interner = global.interner();
        let mut names = std::collections::BTreeSet::new();
        for dir in &self.dirs {
            let dir = interner.intern(dir);
            names.extend(dir.list().map_err(CliError::from)?);
        }
        for name in names {
            println!("{name}");
        }
        Ok(())
    }
}
