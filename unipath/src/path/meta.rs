//! Stat-derived path properties.

use std::fs;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use filetime::FileTime;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::path::FsPath;
use crate::version;

/// 2037-01-01T00:00:00Z as seconds since the Unix epoch.
const Y2037_EPOCH_SECS: u64 = 2_114_380_800;

/// Ten days in seconds, the width of the remediation window.
const TEN_DAYS_SECS: u64 = 10 * 24 * 60 * 60;

/// Translate a walk error into a contextual I/O error.
pub(super) fn walk_io(action: &'static str, path: &str, err: walkdir::Error) -> Error {
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "filesystem loop"));
    Error::io(action, path, source)
}

impl FsPath {
    /// Whether anything exists at this path.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.as_std_path().exists()
    }

    /// Whether this path is an existing directory.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.as_std_path().is_dir()
    }

    /// Whether this path is an existing regular file.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.as_std_path().is_file()
    }

    /// Size in bytes: the file's length, or the sum over a recursive walk
    /// for a directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the path does not exist or the walk fails.
    pub fn size(&self) -> Result<u64> {
        let meta =
            fs::metadata(self.as_std_path()).map_err(|e| Error::io("stat", self.as_str(), e))?;
        if !meta.is_dir() {
            return Ok(meta.len());
        }
        let mut total = 0;
        for entry in WalkDir::new(self.as_std_path()) {
            let entry = entry.map_err(|e| walk_io("size", self.as_str(), e))?;
            if entry.file_type().is_file() {
                total += entry
                    .metadata()
                    .map_err(|e| walk_io("size", self.as_str(), e))?
                    .len();
            }
        }
        Ok(total)
    }

    /// Time of last access.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the path cannot be stat'ed.
    pub fn accessed(&self) -> Result<SystemTime> {
        fs::metadata(self.as_std_path())
            .and_then(|m| m.accessed())
            .map_err(|e| Error::io("stat", self.as_str(), e))
    }

    /// Time of last modification, with overflow remediation.
    ///
    /// If the raw timestamp resolves to on-or-before the Unix epoch (the
    /// signature of a platform timestamp overflow), the file's modify time
    /// is rewritten to a pseudo-random instant strictly within the ten
    /// days after 2037-01-01T00:00:00Z and that instant is returned. This
    /// is a corruption-avoidance workaround carried over deliberately, not
    /// a reporting bug: the rewritten timestamp keeps mtime-ordered
    /// comparisons stable instead of wrapping to the distant past.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the path cannot be stat'ed, or if the
    /// remediation rewrite fails.
    pub fn modified(&self) -> Result<SystemTime> {
        let mtime = fs::metadata(self.as_std_path())
            .and_then(|m| m.modified())
            .map_err(|e| Error::io("stat", self.as_str(), e))?;
        if mtime > UNIX_EPOCH {
            return Ok(mtime);
        }
        let offset = fastrand::u64(1..TEN_DAYS_SECS);
        let patched = UNIX_EPOCH + Duration::from_secs(Y2037_EPOCH_SECS + offset);
        filetime::set_file_mtime(self.as_std_path(), FileTime::from_system_time(patched))
            .map_err(|e| Error::io("set mtime", self.as_str(), e))?;
        log::debug!(
            "remediated overflowed mtime on {} to {}s past 2037-01-01",
            self.as_str(),
            offset
        );
        Ok(patched)
    }

    /// Set the file's modify time, preserving its access time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the timestamp cannot be written.
    pub fn set_modified(&self, mtime: SystemTime) -> Result<()> {
        filetime::set_file_mtime(self.as_std_path(), FileTime::from_system_time(mtime))
            .map_err(|e| Error::io("set mtime", self.as_str(), e))
    }

    /// The newest modify time anywhere under this path.
    ///
    /// For a file this is just [`modified`](Self::modified); for a
    /// directory the whole tree is scanned and the raw timestamps compared
    /// (no remediation rewrite happens during the scan).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the path cannot be stat'ed or the walk
    /// fails.
    pub fn latest_modified(&self) -> Result<SystemTime> {
        let meta =
            fs::metadata(self.as_std_path()).map_err(|e| Error::io("stat", self.as_str(), e))?;
        if !meta.is_dir() {
            return self.modified();
        }
        let mut newest = meta
            .modified()
            .map_err(|e| Error::io("stat", self.as_str(), e))?;
        for entry in WalkDir::new(self.as_std_path()).min_depth(1) {
            let entry = entry.map_err(|e| walk_io("scan", self.as_str(), e))?;
            let entry_meta = entry
                .metadata()
                .map_err(|e| walk_io("scan", self.as_str(), e))?;
            let mtime = entry_meta
                .modified()
                .map_err(|e| Error::io("scan", self.as_str(), e))?;
            if mtime > newest {
                newest = mtime;
            }
        }
        Ok(newest)
    }

    /// Whether the read-only flag is set.
    ///
    /// Informational: a missing path reads as writable.
    #[must_use]
    pub fn is_readonly(&self) -> bool {
        fs::metadata(self.as_std_path())
            .map(|m| m.permissions().readonly())
            .unwrap_or(false)
    }

    /// Set or clear the read-only flag.
    ///
    /// For a directory the flag is applied to every entry beneath it (the
    /// directory's own flag is left alone, matching the recursive clear
    /// used by [`remove`](Self::remove)).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] on the first entry whose permissions cannot
    /// be changed.
    pub fn set_readonly(&self, readonly: bool) -> Result<()> {
        let meta =
            fs::metadata(self.as_std_path()).map_err(|e| Error::io("chmod", self.as_str(), e))?;
        if !meta.is_dir() {
            return set_entry_readonly(self.as_std_path(), readonly)
                .map_err(|e| Error::io("chmod", self.as_str(), e));
        }
        for entry in WalkDir::new(self.as_std_path()).min_depth(1) {
            let entry = entry.map_err(|e| walk_io("chmod", self.as_str(), e))?;
            set_entry_readonly(entry.path(), readonly)
                .map_err(|e| Error::io("chmod", self.as_str(), e))?;
        }
        Ok(())
    }

    /// The four-part binary version of an executable or library.
    ///
    /// Delegates to the registered version-resource reader (see
    /// [`crate::version`]); `(0, 0, 0, 0)` when no resource is present or
    /// any read fails. Never errors.
    #[must_use]
    pub fn version(&self) -> (u16, u16, u16, u16) {
        version::file_version(self.as_std_path())
    }

    /// [`version`](Self::version) with leading and trailing zero
    /// components trimmed, always keeping at least one component.
    ///
    /// # Examples
    ///
    /// ```
    /// use unipath::intern;
    ///
    /// // No reader registered: version is zeroed, stripped keeps one part
    /// let path = intern("game.exe");
    /// assert_eq!(path.version_stripped(), vec![0]);
    /// ```
    #[must_use]
    pub fn version_stripped(&self) -> Vec<u16> {
        let (a, b, c, d) = self.version();
        let mut parts = vec![a, b, c, d];
        while parts.len() > 1 && parts[0] == 0 {
            parts.remove(0);
        }
        while parts.len() > 1 && parts[parts.len() - 1] == 0 {
            parts.pop();
        }
        parts
    }
}

fn set_entry_readonly(path: &std::path::Path, readonly: bool) -> std::io::Result<()> {
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_readonly(readonly);
    fs::set_permissions(path, perms)
}
