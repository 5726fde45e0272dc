//! Command to normalize a path string.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;

/// Print the normalized form of a path string.
#[derive(Args)]
pub struct NormCommand {
    /// Path string to normalize
    pub path: String,

    /// Print the case-folded comparison form instead
    #[arg(long)]
    pub folded: bool,
}

impl NormCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let path = global.interner().intern(&self.path);
        if self.folded {
            println!("{}", path.folded());
        } else {
            println!("{path}");
        }
        Ok(())
    }
}
