//! Command to resolve a name through a union of directories.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, ValueEnum};
use unipath::{MatchPolicy, PathUnion, UnionMode};

/// Resolve a file name through layered member directories and print the
/// winning path.
#[derive(Args)]
pub struct ResolveCommand {
    /// Name to resolve
    pub name: String,

    /// Member directory, repeat in priority order
    #[arg(long = "dir", value_name = "PATH", required = true)]
    pub dirs: Vec<String>,

    /// Winning-copy policy
    #[arg(long, value_enum, default_value = "order")]
    pub policy: PolicyArg,

    /// Reverse member order before applying the policy
    #[arg(long)]
    pub reverse: bool,
}

/// Winning-copy policy selector.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    /// Earliest member holding the name wins
    Order,
    /// Most recently modified copy wins
    Timestamp,
}

impl ResolveCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let interner = global.interner();
        let dirs = self.dirs.iter().map(|d| interner.intern(d));
        let policy = match self.policy {
            PolicyArg::Order => MatchPolicy::Order,
            PolicyArg::Timestamp => MatchPolicy::Timestamp,
        };
        let mut mode = UnionMode::new(policy);
        if self.reverse {
            mode = mode.reversed();
        }
        let union = PathUnion::new(dirs, mode).map_err(CliError::from)?;
        println!("{}", union.resolve([self.name.as_str()]));
        Ok(())
    }
}
