//! Command to read a binary's embedded version.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;

/// Print the four-part embedded version of an executable.
///
/// Prints `0.0.0.0` when the file carries no readable version resource.
#[derive(Args)]
pub struct VersionCommand {
    /// Executable to inspect
    pub file: String,

    /// Trim leading and trailing zero components
    #[arg(long)]
    pub stripped: bool,
}

impl VersionCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let path = global.interner().intern(&self.file);
        if self.stripped {
            let parts: Vec<String> = path
                .version_stripped()
                .into_iter()
                .map(|p| p.to_string())
                .collect();
            println!("{}", parts.join("."));
        } else {
            let (a, b, c, d) = path.version();
            println!("{a}.{b}.{c}.{d}");
        }
        Ok(())
    }
}
