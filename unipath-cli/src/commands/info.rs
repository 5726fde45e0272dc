//! Command to show the decomposed parts of a path.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use chrono::{DateTime, Local};
use clap::Args;

/// Show the decomposed parts of a path.
#[derive(Args)]
pub struct InfoCommand {
    /// Path to decompose
    pub path: String,

    /// Also stat the path and report size and modify time
    #[arg(long)]
    pub stat: bool,
}

impl InfoCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let path = global.interner().intern(&self.path);

        println!("full:      {path}");
        println!("folded:    {}", path.folded());
        println!("root:      {}", path.root_str());
        println!("extension: {}", path.extension());
        println!("parent:    {}", path.parent_str());
        println!("name:      {}", path.file_name_str());
        println!("stem:      {}", path.file_stem_str());
        println!("drive:     {}", path.drive());
        println!("absolute:  {}", path.is_absolute());

        if self.stat {
            let size = path.size().map_err(CliError::from)?;
            let modified: DateTime<Local> = path.modified().map_err(CliError::from)?.into();
            println!("size:      {size}");
            println!("modified:  {}", modified.format("%Y-%m-%d %H:%M:%S"));
        }
        Ok(())
    }
}
