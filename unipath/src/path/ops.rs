//! Filesystem mutations: create, remove, copy, move.

use std::fs::{self, File};
use std::io;
use std::time::SystemTime;

use filetime::FileTime;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::path::meta::walk_io;
use crate::path::FsPath;

/// How a temporary copy name handles characters outside ASCII.
///
/// Some tools a temporary copy gets handed to cannot take non-ASCII
/// arguments; [`Ascii`](Self::Ascii) rewrites each offending character as
/// a decimal character reference (`ł` becomes `&#322;`), which is ugly but
/// lossless and round-trippable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TempNameEncoding {
    /// Keep the file name as-is.
    #[default]
    Unrestricted,
    /// Escape non-ASCII characters as `&#NNNN;` references.
    Ascii,
}

impl FsPath {
    /// Create this directory and any missing ancestors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if creation fails.
    pub fn make_dirs(&self) -> Result<()> {
        fs::create_dir_all(self.as_std_path()).map_err(|e| Error::io("mkdir", self.as_str(), e))
    }

    /// Create an empty file, or refresh the modify time of an existing one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be created or its
    /// timestamp cannot be written.
    pub fn touch(&self) -> Result<()> {
        if self.exists() {
            return self.set_modified(SystemTime::now());
        }
        File::create(self.as_std_path())
            .map(|_| ())
            .map_err(|e| Error::io("create", self.as_str(), e))
    }

    /// Remove this path, recursively for directories.
    ///
    /// A missing path is not an error. An entry whose read-only flag
    /// blocks deletion gets the flag cleared and the deletion retried
    /// once; this covers the path itself and every file and directory
    /// inside a removed tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if deletion still fails.
    pub fn remove(&self) -> Result<()> {
        let meta = match fs::symlink_metadata(self.as_std_path()) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(Error::io("remove", self.as_str(), e)),
        };
        if !meta.is_dir() {
            return remove_entry_retrying(self.as_std_path(), false)
                .map_err(|e| Error::io("remove", self.as_str(), e));
        }
        for entry in WalkDir::new(self.as_std_path()).contents_first(true) {
            let entry = entry.map_err(|e| walk_io("remove", self.as_str(), e))?;
            remove_entry_retrying(entry.path(), entry.file_type().is_dir())
                .map_err(|e| Error::io("remove", self.as_str(), e))?;
        }
        Ok(())
    }

    /// Remove empty directories beneath this one.
    ///
    /// Walks bottom-up so a chain of directories that are empty except for
    /// each other all go. Never deletes a file, and never deletes this
    /// directory itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the walk fails; a directory that turns out
    /// non-empty is simply kept.
    pub fn remove_empty_only(&self) -> Result<()> {
        if !self.is_dir() {
            return Ok(());
        }
        for entry in WalkDir::new(self.as_std_path())
            .min_depth(1)
            .contents_first(true)
        {
            let entry = entry.map_err(|e| walk_io("prune", self.as_str(), e))?;
            if entry.file_type().is_dir() {
                // Fails when the directory still has contents, which is
                // exactly the keep condition
                let _ = fs::remove_dir(entry.path());
            }
        }
        Ok(())
    }

    /// Copy this file or directory tree to `dest`, preserving file modify
    /// times.
    ///
    /// Missing ancestors of `dest` are created. Copying a path onto one
    /// that compares equal to it is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if any read, write or timestamp transfer
    /// fails.
    pub fn copy_to(&self, dest: &FsPath) -> Result<()> {
        if self.folded() == dest.folded() {
            return Ok(());
        }
        if !self.is_dir() {
            make_parent_dirs(dest)?;
            copy_file_with_mtime(self.as_std_path(), dest.as_std_path())
                .map_err(|e| Error::io("copy", self.as_str(), e))?;
            return Ok(());
        }
        for entry in WalkDir::new(self.as_std_path()) {
            let entry = entry.map_err(|e| walk_io("copy", self.as_str(), e))?;
            let rel = entry
                .path()
                .strip_prefix(self.as_std_path())
                .map_err(|e| Error::io("copy", self.as_str(), io::Error::new(io::ErrorKind::Other, e)))?;
            let target = dest.as_std_path().join(rel);
            if entry.file_type().is_dir() {
                fs::create_dir_all(&target).map_err(|e| Error::io("copy", self.as_str(), e))?;
            } else {
                copy_file_with_mtime(entry.path(), &target)
                    .map_err(|e| Error::io("copy", self.as_str(), e))?;
            }
        }
        Ok(())
    }

    /// Move this path to `dest`, replacing an existing destination file.
    ///
    /// Missing ancestors of `dest` are created and a read-only destination
    /// file is cleared before replacement. Renames across filesystems fall
    /// back to copy-then-remove.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the move fails both ways.
    pub fn move_to(&self, dest: &FsPath) -> Result<()> {
        if self.folded() == dest.folded() {
            return Ok(());
        }
        make_parent_dirs(dest)?;
        if dest.is_file() {
            remove_entry_retrying(dest.as_std_path(), false)
                .map_err(|e| Error::io("move", dest.as_str(), e))?;
        }
        if fs::rename(self.as_std_path(), dest.as_std_path()).is_ok() {
            return Ok(());
        }
        self.copy_to(dest)?;
        self.remove()
    }

    /// Move this file aside for the lifetime of the returned guard.
    ///
    /// The file moves to `dest` immediately; dropping the guard moves it
    /// back, so the original path is only vacated while the guard lives.
    /// Use [`TempMove::restore`] to move it back early and observe a
    /// restore failure instead of having the drop swallow it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the initial move fails.
    pub fn temp_move_to(&self, dest: &FsPath) -> Result<TempMove> {
        self.move_to(dest)?;
        Ok(TempMove {
            original: self.clone(),
            staged: dest.clone(),
            restored: false,
        })
    }

    /// Make this directory the process working directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the change fails.
    pub fn set_current_dir(&self) -> Result<()> {
        std::env::set_current_dir(self.as_std_path())
            .map_err(|e| Error::io("chdir", self.as_str(), e))
    }

    /// A unique path in the system temporary directory for a scratch copy
    /// of this file.
    ///
    /// The name keeps this file's stem and extension (optionally escaped
    /// per `encoding`) around a random infix, so concurrent temporary
    /// copies of the same file never collide and tools keyed on the
    /// extension still recognize the copy. Nothing is created on disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPathInput`] if the system temporary
    /// directory has no UTF-8 representation.
    pub fn temp_path(&self, encoding: TempNameEncoding) -> Result<FsPath> {
        let base = std::env::temp_dir();
        let base = self.interner().intern_os(base.as_os_str())?;
        let (stem, ext) = match encoding {
            TempNameEncoding::Unrestricted => {
                (self.file_stem_str().to_string(), self.extension().to_string())
            }
            TempNameEncoding::Ascii => (
                escape_non_ascii(self.file_stem_str()),
                escape_non_ascii(self.extension()),
            ),
        };
        let unique = format!("{stem}_{:08x}{ext}", fastrand::u32(..));
        Ok(base.join([unique.as_str()]))
    }

    /// Open this file for reading.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened.
    pub fn open_read(&self) -> Result<File> {
        File::open(self.as_std_path()).map_err(|e| Error::io("open", self.as_str(), e))
    }

    /// Create or truncate this file for writing, creating missing
    /// ancestors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the parents or the file cannot be created.
    pub fn create_write(&self) -> Result<File> {
        make_parent_dirs(self)?;
        File::create(self.as_std_path()).map_err(|e| Error::io("create", self.as_str(), e))
    }
}

/// A file parked elsewhere that moves back when this guard goes away.
///
/// Returned by [`FsPath::temp_move_to`]. While the guard lives the file
/// sits at [`staged`](Self::staged); on drop it moves back to where it
/// came from, logging a `debug` record if the move back fails.
#[derive(Debug)]
pub struct TempMove {
    original: FsPath,
    staged: FsPath,
    restored: bool,
}

impl TempMove {
    /// Where the file currently sits.
    #[must_use]
    pub fn staged(&self) -> &FsPath {
        &self.staged
    }

    /// Move the file back to its original path now.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the move back fails; the guard will not
    /// try again on drop.
    pub fn restore(mut self) -> Result<()> {
        self.restored = true;
        self.staged.move_to(&self.original)
    }
}

impl Drop for TempMove {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        if let Err(e) = self.staged.move_to(&self.original) {
            log::debug!(
                "failed to restore {} from {}: {e}",
                self.original,
                self.staged
            );
        }
    }
}

/// The process working directory as an interned path.
///
/// # Errors
///
/// Returns [`Error::Io`] if it cannot be read, or
/// [`Error::InvalidPathInput`] if it is not valid UTF-8.
pub fn current_dir() -> Result<FsPath> {
    let cwd = std::env::current_dir().map_err(|e| Error::io("getcwd", ".", e))?;
    crate::intern::global().intern_os(cwd.as_os_str())
}

/// The system temporary directory as an interned path.
///
/// # Errors
///
/// Returns [`Error::InvalidPathInput`] if it is not valid UTF-8.
pub fn temp_dir() -> Result<FsPath> {
    crate::intern::global().intern_os(std::env::temp_dir().as_os_str())
}

/// Create a fresh uniquely-named directory under the system temporary
/// directory and return it interned.
///
/// The directory persists until removed by the caller.
///
/// # Errors
///
/// Returns [`Error::Io`] if creation fails, or
/// [`Error::InvalidPathInput`] if the resulting path is not valid UTF-8.
pub fn make_temp_dir() -> Result<FsPath> {
    let dir = tempfile::Builder::new()
        .prefix("unipath-")
        .tempdir()
        .map_err(|e| Error::io("mkdtemp", "temp dir", e))?;
    crate::intern::global().intern_os(dir.into_path().as_os_str())
}

fn make_parent_dirs(path: &FsPath) -> Result<()> {
    let parent = path.parent_str();
    if parent.is_empty() {
        return Ok(());
    }
    fs::create_dir_all(parent).map_err(|e| Error::io("mkdir", parent.to_string(), e))
}

/// Remove a file or directory, clearing the read-only flag and retrying
/// once if the first attempt is denied.
fn remove_entry_retrying(path: &std::path::Path, is_dir: bool) -> io::Result<()> {
    let attempt = |p: &std::path::Path| {
        if is_dir {
            fs::remove_dir(p)
        } else {
            fs::remove_file(p)
        }
    };
    match attempt(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            log::debug!("clearing read-only flag to remove {}", path.display());
            let mut perms = fs::metadata(path)?.permissions();
            perms.set_readonly(false);
            fs::set_permissions(path, perms)?;
            attempt(path)
        }
        Err(e) => Err(e),
    }
}

fn copy_file_with_mtime(src: &std::path::Path, dest: &std::path::Path) -> io::Result<()> {
    fs::copy(src, dest)?;
    let meta = fs::metadata(src)?;
    filetime::set_file_mtime(dest, FileTime::from_last_modification_time(&meta))
}

fn escape_non_ascii(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            out.push_str(&format!("&#{};", c as u32));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intern::PathInterner;
    use crate::norm::NormConfig;
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::TempDir;

    fn interner() -> PathInterner {
        PathInterner::with_config(NormConfig::default())
    }

    fn intern_tmp(temp: &TempDir, rel: &str) -> FsPath {
        interner().intern(temp.path().join(rel).to_str().unwrap())
    }

    #[test]
    fn test_make_dirs_and_touch() {
        let temp = TempDir::new().unwrap();
        let dir = intern_tmp(&temp, "a/b/c");
        dir.make_dirs().unwrap();
        assert!(dir.is_dir());

        let file = dir.join(["new.txt"]);
        file.touch().unwrap();
        assert!(file.is_file());
        assert_eq!(file.size().unwrap(), 0);
    }

    #[test]
    fn test_touch_existing_refreshes_mtime() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("f"), b"content").unwrap();
        let file = intern_tmp(&temp, "f");
        file.set_modified(UNIX_EPOCH + Duration::from_secs(1_000_000_000))
            .unwrap();
        file.touch().unwrap();
        assert!(file.modified().unwrap() > UNIX_EPOCH + Duration::from_secs(1_500_000_000));
        // Content untouched
        assert_eq!(file.size().unwrap(), 7);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let temp = TempDir::new().unwrap();
        intern_tmp(&temp, "missing").remove().unwrap();
    }

    #[test]
    fn test_remove_readonly_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("locked"), b"x").unwrap();
        let file = intern_tmp(&temp, "locked");
        file.set_readonly(true).unwrap();
        file.remove().unwrap();
        assert!(!file.exists());
    }

    #[test]
    fn test_remove_directory_tree() {
        let temp = TempDir::new().unwrap();
        let dir = intern_tmp(&temp, "tree");
        dir.join(["deep", "deeper"]).make_dirs().unwrap();
        std::fs::write(temp.path().join("tree/deep/f"), b"x").unwrap();
        dir.remove().unwrap();
        assert!(!dir.exists());
    }

    #[test]
    fn test_remove_tree_with_readonly_entries() {
        let temp = TempDir::new().unwrap();
        let dir = intern_tmp(&temp, "tree");
        let locked_dir = dir.join(["locked"]);
        locked_dir.make_dirs().unwrap();
        std::fs::write(temp.path().join("tree/held.esp"), b"x").unwrap();
        dir.join(["held.esp"]).set_readonly(true).unwrap();
        // Flag the directory itself, not its contents
        let mut perms = std::fs::metadata(locked_dir.as_std_path())
            .unwrap()
            .permissions();
        perms.set_readonly(true);
        std::fs::set_permissions(locked_dir.as_std_path(), perms).unwrap();

        dir.remove().unwrap();
        assert!(!dir.exists());
    }

    #[test]
    fn test_remove_empty_only_keeps_files_and_root() {
        let temp = TempDir::new().unwrap();
        let dir = intern_tmp(&temp, "root");
        dir.join(["empty", "chain"]).make_dirs().unwrap();
        dir.join(["kept"]).make_dirs().unwrap();
        std::fs::write(temp.path().join("root/kept/f"), b"x").unwrap();

        dir.remove_empty_only().unwrap();

        assert!(dir.is_dir());
        assert!(dir.join(["kept"]).is_dir());
        assert!(dir.join(["kept", "f"]).is_file());
        assert!(!dir.join(["empty"]).exists());
    }

    #[test]
    fn test_copy_file_preserves_mtime() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("src"), b"payload").unwrap();
        let src = intern_tmp(&temp, "src");
        let stamp = UNIX_EPOCH + Duration::from_secs(1_234_567_890);
        src.set_modified(stamp).unwrap();

        let dest = intern_tmp(&temp, "sub/dest");
        src.copy_to(&dest).unwrap();

        assert_eq!(dest.size().unwrap(), 7);
        assert_eq!(dest.modified().unwrap(), stamp);
        assert!(src.exists());
    }

    #[test]
    fn test_copy_onto_equal_path_is_noop() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("f"), b"payload").unwrap();
        let a = intern_tmp(&temp, "f");
        let b = intern_tmp(&temp, "./f");
        a.copy_to(&b).unwrap();
        assert_eq!(a.size().unwrap(), 7);
    }

    #[test]
    fn test_copy_directory_tree() {
        let temp = TempDir::new().unwrap();
        let src = intern_tmp(&temp, "src");
        src.join(["nested"]).make_dirs().unwrap();
        std::fs::write(temp.path().join("src/top.txt"), b"1").unwrap();
        std::fs::write(temp.path().join("src/nested/deep.txt"), b"22").unwrap();

        let dest = intern_tmp(&temp, "dest");
        src.copy_to(&dest).unwrap();

        assert_eq!(dest.join(["top.txt"]).size().unwrap(), 1);
        assert_eq!(dest.join(["nested", "deep.txt"]).size().unwrap(), 2);
    }

    #[test]
    fn test_move_replaces_existing_destination() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("src"), b"new").unwrap();
        std::fs::write(temp.path().join("dest"), b"old-old").unwrap();
        let src = intern_tmp(&temp, "src");
        let dest = intern_tmp(&temp, "dest");
        dest.set_readonly(true).unwrap();

        src.move_to(&dest).unwrap();

        assert!(!src.exists());
        assert_eq!(dest.size().unwrap(), 3);
    }

    #[test]
    fn test_move_creates_parents() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("src"), b"x").unwrap();
        let src = intern_tmp(&temp, "src");
        let dest = intern_tmp(&temp, "a/b/dest");
        src.move_to(&dest).unwrap();
        assert!(dest.is_file());
    }

    #[test]
    fn test_temp_move_restores_on_drop() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("live.esp"), b"payload").unwrap();
        let file = intern_tmp(&temp, "live.esp");
        let aside = intern_tmp(&temp, "aside/parked.esp");

        {
            let parked = file.temp_move_to(&aside).unwrap();
            assert!(!file.exists());
            assert!(parked.staged().is_file());
        }

        assert!(file.is_file());
        assert!(!aside.exists());
        assert_eq!(file.size().unwrap(), 7);
    }

    #[test]
    fn test_temp_move_explicit_restore() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("live.esp"), b"x").unwrap();
        let file = intern_tmp(&temp, "live.esp");
        let aside = intern_tmp(&temp, "parked.esp");

        let parked = file.temp_move_to(&aside).unwrap();
        parked.restore().unwrap();

        assert!(file.is_file());
        assert!(!aside.exists());
    }

    #[test]
    fn test_temp_path_is_unique_and_in_temp() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("save.ess"), b"x").unwrap();
        let file = intern_tmp(&temp, "save.ess");

        let a = file.temp_path(TempNameEncoding::Unrestricted).unwrap();
        let b = file.temp_path(TempNameEncoding::Unrestricted).unwrap();
        assert_ne!(a, b);
        assert!(a.file_name_str().starts_with("save_"));
        assert_eq!(a.extension(), ".ess");
    }

    #[test]
    fn test_temp_path_ascii_escapes() {
        let temp = TempDir::new().unwrap();
        let file = intern_tmp(&temp, "ma\u{142}y.esp");
        let escaped = file.temp_path(TempNameEncoding::Ascii).unwrap();
        assert!(escaped.file_name_str().starts_with("ma&#322;y_"));
        assert_eq!(escaped.extension(), ".esp");
        assert!(escaped.file_name_str().is_ascii());
    }

    #[test]
    fn test_escape_non_ascii_passthrough() {
        assert_eq!(escape_non_ascii("plain.txt"), "plain.txt");
        assert_eq!(escape_non_ascii("\u{e9}"), "&#233;");
    }

    #[test]
    fn test_open_read_and_create_write() {
        use std::io::{Read, Write};

        let temp = TempDir::new().unwrap();
        let file = intern_tmp(&temp, "nested/out.txt");
        let mut w = file.create_write().unwrap();
        w.write_all(b"hello").unwrap();
        drop(w);

        let mut contents = String::new();
        file.open_read().unwrap().read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "hello");
    }

    #[test]
    fn test_free_function_directories() {
        let cwd = current_dir().unwrap();
        assert!(cwd.is_dir());
        let tmp = temp_dir().unwrap();
        assert!(tmp.is_dir());
        let fresh = make_temp_dir().unwrap();
        assert!(fresh.is_dir());
        fresh.remove().unwrap();
    }
}
