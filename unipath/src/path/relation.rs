//! Relationships between paths: relative forms and ancestry.

use crate::error::{Error, Result};
use crate::norm::split_drive;
use crate::path::handle::is_absolute_str;
use crate::path::FsPath;

impl FsPath {
    /// Resolve this path to its real, symlink-free absolute form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RealPath`] if the filesystem cannot resolve the
    /// path (for example when it does not exist), or if the resolved form
    /// is not valid UTF-8.
    pub fn real_path(&self) -> Result<FsPath> {
        let resolved = std::fs::canonicalize(self.as_std_path()).map_err(|e| Error::RealPath {
            path: self.as_str().to_string(),
            reason: e.to_string(),
        })?;
        let resolved = resolved.to_str().ok_or_else(|| Error::RealPath {
            path: self.as_str().to_string(),
            reason: "resolved path is not valid UTF-8".to_string(),
        })?;
        Ok(self.interner().intern(resolved))
    }

    /// Compute this path relative to `base`.
    ///
    /// Comparison is lexical on the case-folded forms; relative inputs are
    /// first made absolute against the current directory. The result is a
    /// left-inverse of [`join`](Self::join):
    /// `base.join([base_to_target]).folded() == target.folded()` whenever a
    /// relative path exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRelativePath`] when no relative representation
    /// exists (different drives on a drive-letter style), or an I/O error
    /// if the current directory is needed but unavailable.
    ///
    /// # Examples
    ///
    /// ```
    /// use unipath::{NormConfig, PathInterner};
    ///
    /// let interner = PathInterner::with_config(NormConfig::unix());
    /// let target = interner.intern("/srv/mods/armor.esp");
    /// let base = interner.intern("/srv/saves");
    /// assert_eq!(target.relative_to(&base).unwrap().as_str(), "../mods/armor.esp");
    /// ```
    pub fn relative_to(&self, base: &FsPath) -> Result<FsPath> {
        let style = self.config().style;
        let sep = style.separator();

        let target = self.absolutized()?;
        let base = base.absolutized()?;

        let (target_drive, target_rest) = split_drive(target.folded(), style);
        let (base_drive, base_rest) = split_drive(base.folded(), style);
        if target_drive != base_drive {
            return Err(Error::NoRelativePath {
                base: base.as_str().to_string(),
                target: self.as_str().to_string(),
            });
        }

        let target_fold: Vec<&str> = split_parts(target_rest, style);
        let base_fold: Vec<&str> = split_parts(base_rest, style);
        // Original-case components for building the result
        let (_, target_orig_rest) = split_drive(target.as_str(), style);
        let target_orig: Vec<&str> = split_parts(target_orig_rest, style);

        let common = target_fold
            .iter()
            .zip(&base_fold)
            .take_while(|(a, b)| *a == *b)
            .count();

        let mut parts: Vec<&str> = Vec::new();
        for _ in common..base_fold.len() {
            parts.push("..");
        }
        parts.extend(&target_orig[common..]);
        let sep = sep.to_string();
        let relative = if parts.is_empty() {
            ".".to_string()
        } else {
            parts.join(sep.as_str())
        };
        Ok(self.interner().intern(relative))
    }

    /// Whether `other` is lexically nested under this path.
    ///
    /// The test is strict: a path is not its own ancestor. Comparison uses
    /// the case-folded component sequences, so nesting respects the casing
    /// policy.
    ///
    /// When `follow_symlinks` is true, both sides are first resolved
    /// through [`real_path`](Self::real_path) before the nesting test;
    /// this can change the answer when symlinks are involved (a symlink
    /// that points outside this directory is lexically inside but really
    /// outside, and vice versa).
    ///
    /// # Errors
    ///
    /// With `follow_symlinks`, returns [`Error::RealPath`] if either side
    /// cannot be resolved. The purely lexical form never fails.
    pub fn is_ancestor_of(&self, other: &FsPath, follow_symlinks: bool) -> Result<bool> {
        if follow_symlinks {
            let real_self = self.real_path()?;
            let real_other = other.real_path()?;
            return Ok(nested_under(&real_self, &real_other));
        }
        Ok(nested_under(self, other))
    }

    /// Make this path absolute against the current directory, re-interned.
    fn absolutized(&self) -> Result<FsPath> {
        let style = self.config().style;
        if is_absolute_str(self.as_str(), style) {
            return Ok(self.clone());
        }
        let cwd = std::env::current_dir().map_err(|e| Error::io("getcwd", ".", e))?;
        let cwd = cwd.to_str().ok_or_else(|| Error::InvalidPathInput {
            reason: "current directory is not valid UTF-8".to_string(),
        })?;
        Ok(self
            .interner()
            .intern(format!("{cwd}{}{}", style.separator(), self.as_str())))
    }
}

/// Strict lexical nesting test on folded components.
fn nested_under(ancestor: &FsPath, candidate: &FsPath) -> bool {
    let style = ancestor.config().style;
    let (a_drive, a_rest) = split_drive(ancestor.folded(), style);
    let (c_drive, c_rest) = split_drive(candidate.folded(), style);
    if a_drive != c_drive {
        return false;
    }
    let a_parts = split_parts(a_rest, style);
    let c_parts = split_parts(c_rest, style);
    c_parts.len() > a_parts.len() && c_parts.starts_with(&a_parts)
}

fn split_parts(rest: &str, style: crate::norm::Style) -> Vec<&str> {
    rest.split(|c| style.is_separator(c))
        .filter(|p| !p.is_empty())
        .collect()
}
