//! Command to checksum a file.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use unipath::DEFAULT_CHUNK_SIZE;

/// Print the CRC-32 checksum of a file as eight hex digits.
#[derive(Args)]
pub struct CrcCommand {
    /// File to checksum
    pub file: String,

    /// Read granularity in bytes
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,
}

impl CrcCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let path = global.interner().intern(&self.file);
        let logger = &global.logger;
        let crc = path
            .crc32_with(self.chunk_size, |done| {
                logger.info(&format!("hashed {done} bytes"));
            })
            .map_err(CliError::from)?;
        println!("{crc:08X}");
        Ok(())
    }
}
