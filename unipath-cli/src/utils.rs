//! Utility functions for CLI operations.
//!
//! This module provides the shared state commands execute against: the
//! normalization configuration built from the global flags, and the
//! interner derived from it.

use unipath::{Logger, NormConfig, PathInterner};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Logger at the level selected by the verbosity flags.
    pub logger: Logger,

    /// Normalization configuration from the global style/casing flags.
    pub config: NormConfig,
}

impl GlobalOptions {
    /// A fresh interner for this invocation's configuration.
    pub fn interner(&self) -> PathInterner {
        PathInterner::with_config(self.config)
    }
}
