//! Directory listing and recursive walking.

use std::fs;

use crate::error::{Error, Result};
use crate::path::FsPath;

/// One visited directory: the directory itself plus the bare names of its
/// immediate subdirectories and files, each name an interned handle.
///
/// Names are sorted by their comparison form so traversal order is
/// deterministic regardless of what the filesystem returns.
#[derive(Debug, Clone)]
pub struct WalkEntry {
    /// The visited directory, absolute or root-relative per the walk mode.
    pub dir: FsPath,
    /// Bare names of immediate subdirectories.
    pub subdirs: Vec<FsPath>,
    /// Bare names of immediate files.
    pub files: Vec<FsPath>,
}

/// A recursive directory traversal yielding a [`WalkEntry`] per directory.
///
/// Top-down by default; [`bottom_up`](Self::bottom_up) emits each
/// directory after its subdirectories instead. [`relative`](Self::relative)
/// reports directories relative to the walk root, with the root itself
/// reported as the empty path.
///
/// # Examples
///
/// ```no_run
/// use unipath::intern;
///
/// for entry in intern("/srv/mods").walk() {
///     let entry = entry?;
///     println!("{}: {} files", entry.dir, entry.files.len());
/// }
/// # Ok::<(), unipath::Error>(())
/// ```
pub struct Walk {
    root: FsPath,
    relative: bool,
    bottom_up: bool,
    stack: Vec<Frame>,
}

enum Frame {
    Enter(FsPath),
    Exit(WalkEntry),
}

impl FsPath {
    /// Bare entry names of this directory, sorted, as interned handles.
    ///
    /// A path that is not a directory lists as empty rather than erroring,
    /// so callers can list speculative locations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if an existing directory cannot be read, or
    /// [`Error::InvalidPathInput`] for an entry name with no UTF-8 form.
    pub fn list(&self) -> Result<Vec<FsPath>> {
        if !self.is_dir() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        let entries =
            fs::read_dir(self.as_std_path()).map_err(|e| Error::io("list", self.as_str(), e))?;
        for entry in entries {
            let entry = entry.map_err(|e| Error::io("list", self.as_str(), e))?;
            names.push(self.interner().intern_os(&entry.file_name())?);
        }
        names.sort();
        Ok(names)
    }

    /// Walk this directory tree top-down.
    #[must_use]
    pub fn walk(&self) -> Walk {
        Walk {
            root: self.clone(),
            relative: false,
            bottom_up: false,
            stack: vec![Frame::Enter(self.clone())],
        }
    }
}

impl Walk {
    /// Emit each directory after its subdirectories.
    #[must_use]
    pub fn bottom_up(mut self) -> Walk {
        self.bottom_up = true;
        self
    }

    /// Report directories relative to the walk root; the root itself
    /// becomes the empty path.
    #[must_use]
    pub fn relative(mut self) -> Walk {
        self.relative = true;
        self
    }

    fn read_entry(&self, dir: &FsPath) -> Result<(WalkEntry, Vec<FsPath>)> {
        let mut subdirs = Vec::new();
        let mut files = Vec::new();
        let entries = fs::read_dir(dir.as_std_path())
            .map_err(|e| Error::io("walk", dir.as_str(), e))?;
        for entry in entries {
            let entry = entry.map_err(|e| Error::io("walk", dir.as_str(), e))?;
            let name = dir.interner().intern_os(&entry.file_name())?;
            let kind = entry
                .file_type()
                .map_err(|e| Error::io("walk", dir.as_str(), e))?;
            if kind.is_dir() {
                subdirs.push(name);
            } else {
                files.push(name);
            }
        }
        subdirs.sort();
        files.sort();

        let children: Vec<FsPath> = subdirs
            .iter()
            .map(|name| dir.join([name.as_str()]))
            .collect();
        let shown = if self.relative {
            self.relative_form(dir)?
        } else {
            dir.clone()
        };
        Ok((
            WalkEntry {
                dir: shown,
                subdirs,
                files,
            },
            children,
        ))
    }

    fn relative_form(&self, dir: &FsPath) -> Result<FsPath> {
        if dir.same_handle(&self.root) {
            return Ok(dir.interner().intern(""));
        }
        dir.relative_to(&self.root)
    }
}

impl Iterator for Walk {
    type Item = Result<WalkEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stack.pop()? {
                Frame::Exit(entry) => return Some(Ok(entry)),
                Frame::Enter(dir) => {
                    let (entry, children) = match self.read_entry(&dir) {
                        Ok(pair) => pair,
                        Err(e) => {
                            // Abandon the walk on error
                            self.stack.clear();
                            return Some(Err(e));
                        }
                    };
                    if self.bottom_up {
                        self.stack.push(Frame::Exit(entry));
                        for child in children.into_iter().rev() {
                            self.stack.push(Frame::Enter(child));
                        }
                    } else {
                        for child in children.into_iter().rev() {
                            self.stack.push(Frame::Enter(child));
                        }
                        return Some(Ok(entry));
                    }
                }
            }
        }
    }
}
