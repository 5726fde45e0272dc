//! Chunked CRC-32 checksumming.

use std::fs::File;
use std::io::Read;

use crc32fast::Hasher;

use crate::error::{Error, Result};
use crate::path::FsPath;

/// Default read granularity for checksumming, 2 MiB.
pub const DEFAULT_CHUNK_SIZE: usize = 2 * 1024 * 1024;

impl FsPath {
    /// CRC-32 of the file contents.
    ///
    /// Reads in [`DEFAULT_CHUNK_SIZE`] chunks; see
    /// [`crc32_with`](Self::crc32_with) to control the chunk size or
    /// observe progress.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened or read.
    pub fn crc32(&self) -> Result<u32> {
        self.crc32_with(DEFAULT_CHUNK_SIZE, |_| {})
    }

    /// CRC-32 with an explicit chunk size and a progress callback.
    ///
    /// `progress` is invoked after every chunk with the cumulative number
    /// of bytes hashed so far; for a regular file the final call reports
    /// the file's length. The digest does not depend on `chunk_size`, only
    /// the callback cadence does. A chunk size of zero is bumped to one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened or read.
    pub fn crc32_with<F>(&self, chunk_size: usize, mut progress: F) -> Result<u32>
    where
        F: FnMut(u64),
    {
        let chunk_size = chunk_size.max(1);
        let mut file =
            File::open(self.as_std_path()).map_err(|e| Error::io("open", self.as_str(), e))?;
        let mut hasher = Hasher::new();
        let mut buf = vec![0_u8; chunk_size];
        let mut hashed = 0_u64;
        loop {
            let n = file
                .read(&mut buf)
                .map_err(|e| Error::io("read", self.as_str(), e))?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
            hashed += n as u64;
            progress(hashed);
        }
        Ok(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intern::PathInterner;
    use crate::norm::NormConfig;
    use tempfile::TempDir;

    fn intern_tmp(temp: &TempDir, rel: &str) -> FsPath {
        let interner = PathInterner::with_config(NormConfig::default());
        interner.intern(temp.path().join(rel).to_str().unwrap())
    }

    #[test]
    fn test_crc32_known_vector() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("v"), b"123456789").unwrap();
        // The standard CRC-32 check value
        assert_eq!(intern_tmp(&temp, "v").crc32().unwrap(), 0xCBF4_3926);
    }

    #[test]
    fn test_crc32_empty_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("empty"), b"").unwrap();
        let mut calls = 0;
        let crc = intern_tmp(&temp, "empty")
            .crc32_with(16, |_| calls += 1)
            .unwrap();
        assert_eq!(crc, 0);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_crc32_independent_of_chunk_size() {
        let temp = TempDir::new().unwrap();
        let data: Vec<u8> = (0..10_000_u32).map(|i| (i % 251) as u8).collect();
        std::fs::write(temp.path().join("data"), &data).unwrap();
        let path = intern_tmp(&temp, "data");

        let whole = path.crc32_with(data.len(), |_| {}).unwrap();
        let tiny = path.crc32_with(7, |_| {}).unwrap();
        let default = path.crc32().unwrap();
        assert_eq!(whole, tiny);
        assert_eq!(whole, default);
    }

    #[test]
    fn test_progress_is_cumulative_and_complete() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("data"), vec![0_u8; 1000]).unwrap();
        let path = intern_tmp(&temp, "data");

        let mut reports = Vec::new();
        path.crc32_with(300, |done| reports.push(done)).unwrap();
        assert_eq!(reports, vec![300, 600, 900, 1000]);
    }

    #[test]
    fn test_zero_chunk_size_is_bumped() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("v"), b"123456789").unwrap();
        let crc = intern_tmp(&temp, "v").crc32_with(0, |_| {}).unwrap();
        assert_eq!(crc, 0xCBF4_3926);
    }

    #[test]
    fn test_missing_file_errors() {
        let temp = TempDir::new().unwrap();
        let err = intern_tmp(&temp, "missing").crc32().unwrap_err();
        assert!(err.is_not_found());
    }
}
