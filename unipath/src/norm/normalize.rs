//! Path normalization and case-folding functions.

use crate::error::{Error, Result};
use crate::norm::style::{CaseFolding, NormConfig, Style};

/// Split a path string into its drive prefix and the remainder.
///
/// Only Windows-style paths have drive prefixes (`C:`); for Unix style the
/// drive is always empty. UNC share prefixes are not recognized.
///
/// # Examples
///
/// ```
/// use unipath::norm::{split_drive, Style};
///
/// assert_eq!(split_drive("C:\\Games", Style::Windows), ("C:", "\\Games"));
/// assert_eq!(split_drive("Games", Style::Windows), ("", "Games"));
/// assert_eq!(split_drive("/srv/mods", Style::Unix), ("", "/srv/mods"));
/// ```
#[must_use]
pub fn split_drive(raw: &str, style: Style) -> (&str, &str) {
    if style == Style::Windows {
        let bytes = raw.as_bytes();
        if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
            return raw.split_at(2);
        }
    }
    ("", raw)
}

/// Normalize a path string lexically.
///
/// Collapses redundant separators, removes `.` segments, resolves `..`
/// segments where a parent is available, strips trailing separators, and
/// preserves the drive prefix. Case is untouched and the filesystem is
/// never consulted.
///
/// The empty string normalizes to itself; any other input that collapses
/// to nothing normalizes to `"."`.
///
/// Normalization is idempotent: `normalize(normalize(x)) == normalize(x)`.
///
/// # Examples
///
/// ```
/// use unipath::norm::{normalize, NormConfig};
///
/// let cfg = NormConfig::unix();
/// assert_eq!(normalize("a//b/./c/..", cfg), "a/b");
/// assert_eq!(normalize("/..", cfg), "/");
/// assert_eq!(normalize("../x", cfg), "../x");
/// assert_eq!(normalize("", cfg), "");
///
/// let cfg = NormConfig::windows();
/// assert_eq!(normalize("C:/Games//Data\\", cfg), "C:\\Games\\Data");
/// ```
#[must_use]
pub fn normalize(raw: &str, config: NormConfig) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let style = config.style;
    let sep = style.separator();
    let (drive, rest) = split_drive(raw, style);
    let rooted = rest.chars().next().is_some_and(|c| style.is_separator(c));

    let mut stack: Vec<&str> = Vec::new();
    for part in rest.split(|c| style.is_separator(c)) {
        match part {
            "" | "." => {}
            ".." => {
                if stack.last().is_some_and(|p| *p != "..") {
                    stack.pop();
                } else if !rooted {
                    // Relative paths keep leading parent references
                    stack.push("..");
                }
            }
            other => stack.push(other),
        }
    }

    let mut out = String::with_capacity(raw.len());
    out.push_str(drive);
    if rooted {
        out.push(sep);
    }
    for (i, part) in stack.iter().enumerate() {
        if i > 0 {
            out.push(sep);
        }
        out.push_str(part);
    }
    if out.is_empty() {
        out.push('.');
    }
    out
}

/// Fold an already-normalized string per the configured case policy.
///
/// This is the second half of [`case_fold`]; it assumes its input came out
/// of [`normalize`] with the same configuration.
#[must_use]
pub fn fold_normalized(normalized: &str, config: NormConfig) -> String {
    match config.casing {
        CaseFolding::Preserve => normalized.to_string(),
        CaseFolding::Fold => normalized.to_lowercase(),
    }
}

/// Derive the case-folded comparison form of a path string.
///
/// Equivalent to [`normalize`] followed by the configured case fold. The
/// folded form is used for equality, ordering and hashing only; it is never
/// handed back to the filesystem.
///
/// # Examples
///
/// ```
/// use unipath::norm::{case_fold, NormConfig};
///
/// let cfg = NormConfig::windows();
/// assert_eq!(case_fold("C:\\Foo\\Bar.TXT", cfg), "c:\\foo\\bar.txt");
///
/// let cfg = NormConfig::unix();
/// assert_eq!(case_fold("/Foo/Bar.TXT", cfg), "/Foo/Bar.TXT");
/// ```
#[must_use]
pub fn case_fold(raw: &str, config: NormConfig) -> String {
    fold_normalized(&normalize(raw, config), config)
}

/// Expand a leading tilde to the user's home directory.
///
/// Handles `~` and `~/path` but not `~user` syntax. Paths without a leading
/// tilde are returned unchanged. This is a convenience for user-facing
/// input (the CLI applies it to its arguments); [`normalize`] itself never
/// expands tildes.
///
/// # Errors
///
/// Returns [`Error::InvalidPathInput`] if the home directory cannot be
/// determined, is not valid UTF-8, or the path uses `~user` syntax.
///
/// # Examples
///
/// ```
/// use unipath::norm::expand_tilde;
///
/// let expanded = expand_tilde("~/mods").unwrap();
/// assert!(expanded.ends_with("/mods") || expanded.ends_with("\\mods"));
///
/// assert_eq!(expand_tilde("/absolute").unwrap(), "/absolute");
/// assert!(expand_tilde("~user/mods").is_err());
/// ```
pub fn expand_tilde(raw: &str) -> Result<String> {
    if !raw.starts_with('~') {
        return Ok(raw.to_string());
    }
    let home = home::home_dir().ok_or_else(|| Error::InvalidPathInput {
        reason: "cannot determine home directory".to_string(),
    })?;
    let home = home.to_str().ok_or_else(|| Error::InvalidPathInput {
        reason: "home directory is not valid UTF-8".to_string(),
    })?;
    if raw == "~" {
        Ok(home.to_string())
    } else if raw.starts_with("~/") || raw.starts_with("~\\") {
        let sep = std::path::MAIN_SEPARATOR;
        Ok(format!("{home}{sep}{}", &raw[2..]))
    } else {
        Err(Error::InvalidPathInput {
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        })
    }
}
