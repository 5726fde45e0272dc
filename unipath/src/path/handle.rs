//! The immutable decomposed path value.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::intern::PathInterner;
use crate::norm::{fold_normalized, split_drive, NormConfig, Style};

/// Shared, immutable backing data for one interned path.
///
/// All fields are computed once from the normalized string at construction
/// and never mutated. The folded variants are derived from the folded full
/// form so they stay byte-consistent with it.
pub(crate) struct PathData {
    full: String,
    fold: String,
    root: String,
    root_fold: String,
    parent: String,
    name: String,
    stem: String,
    stem_fold: String,
    ext: String,
    ext_fold: String,
    interner: PathInterner,
}

impl PathData {
    /// Decompose a normalized string into its parts.
    ///
    /// Only the interner calls this, with an already-normalized string.
    pub(crate) fn build(full: String, interner: PathInterner) -> Self {
        let style = interner.config().style;
        let fold = fold_normalized(&full, interner.config());
        let (root, ext) = split_extension(&full, style);
        let (root_fold, ext_fold) = split_extension(&fold, style);
        let (parent, name) = split_last(&full, style);
        let stem = split_last(&root, style).1;
        let stem_fold = split_last(&root_fold, style).1;
        Self {
            full,
            fold,
            root,
            root_fold,
            parent,
            name,
            stem,
            stem_fold,
            ext,
            ext_fold,
            interner,
        }
    }
}

/// An interned filesystem path.
///
/// `FsPath` is a cheap-to-clone shared handle. Equality, ordering and
/// hashing all derive from the case-folded comparison form exclusively:
/// two paths differing only by case (under a folding configuration) or by
/// redundant separators compare equal and hash identically.
///
/// Handles are created through a [`PathInterner`](crate::PathInterner);
/// see [`crate::intern`].
///
/// # Examples
///
/// ```
/// use unipath::{NormConfig, PathInterner};
///
/// let interner = PathInterner::with_config(NormConfig::windows());
/// let path = interner.intern("C:\\Games\\Data\\Armor.esp");
/// assert_eq!(path.parent_str(), "C:\\Games\\Data");
/// assert_eq!(path.file_name_str(), "Armor.esp");
/// assert_eq!(path.file_stem_str(), "Armor");
/// assert_eq!(path.extension(), ".esp");
/// assert_eq!(path.drive(), "C:");
/// ```
#[derive(Clone)]
pub struct FsPath {
    data: Arc<PathData>,
}

impl FsPath {
    pub(crate) fn from_data(data: Arc<PathData>) -> Self {
        Self { data }
    }

    pub(crate) fn interner(&self) -> &PathInterner {
        &self.data.interner
    }

    /// The normalization configuration this path was interned under.
    #[must_use]
    pub fn config(&self) -> NormConfig {
        self.data.interner.config()
    }

    /// The normalized path string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.data.full
    }

    /// The case-folded comparison form.
    #[must_use]
    pub fn folded(&self) -> &str {
        &self.data.fold
    }

    /// Whether this is the empty path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.full.is_empty()
    }

    /// The path minus its extension, as a string.
    #[must_use]
    pub fn root_str(&self) -> &str {
        &self.data.root
    }

    /// The folded form of [`root_str`](Self::root_str).
    #[must_use]
    pub fn root_folded(&self) -> &str {
        &self.data.root_fold
    }

    /// The path minus its extension, as an interned handle.
    #[must_use]
    pub fn root(&self) -> FsPath {
        self.data.interner.intern(&self.data.root)
    }

    /// The extension including its leading period, or `""` if none.
    ///
    /// A leading period is not an extension: `.profile` has none.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.data.ext
    }

    /// The folded form of [`extension`](Self::extension).
    #[must_use]
    pub fn extension_folded(&self) -> &str {
        &self.data.ext_fold
    }

    /// Everything before the last separator, as a string.
    #[must_use]
    pub fn parent_str(&self) -> &str {
        &self.data.parent
    }

    /// Everything before the last separator, as an interned handle.
    ///
    /// For `alpha/beta.gamma` this is `alpha`.
    #[must_use]
    pub fn parent(&self) -> FsPath {
        self.data.interner.intern(&self.data.parent)
    }

    /// Everything after the last separator, as a string.
    #[must_use]
    pub fn file_name_str(&self) -> &str {
        &self.data.name
    }

    /// Everything after the last separator, as an interned handle.
    ///
    /// For `alpha/beta.gamma` this is `beta.gamma`.
    #[must_use]
    pub fn file_name(&self) -> FsPath {
        self.data.interner.intern(&self.data.name)
    }

    /// The file name without its extension, as a string.
    #[must_use]
    pub fn file_stem_str(&self) -> &str {
        &self.data.stem
    }

    /// The folded form of [`file_stem_str`](Self::file_stem_str).
    #[must_use]
    pub fn file_stem_folded(&self) -> &str {
        &self.data.stem_fold
    }

    /// The file name without its extension, as an interned handle.
    ///
    /// For `alpha/beta.gamma` this is `beta`.
    #[must_use]
    pub fn file_stem(&self) -> FsPath {
        self.data.interner.intern(&self.data.stem)
    }

    /// The drive prefix, or `""` when there is none.
    #[must_use]
    pub fn drive(&self) -> &str {
        split_drive(&self.data.full, self.config().style).0
    }

    /// Whether the path is absolute under its style.
    ///
    /// Windows style requires a rooted remainder after any drive prefix,
    /// so `C:file` is relative while `C:\file` and `\file` are absolute.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        is_absolute_str(&self.data.full, self.config().style)
    }

    /// Whether two handles are the same interned instance.
    ///
    /// This is identity, not equality: equal paths from different interners
    /// (or from strings that normalize differently) are distinct handles.
    #[must_use]
    pub fn same_handle(&self, other: &FsPath) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Join path segments onto this path with the style separator.
    ///
    /// The result is re-normalized and re-interned, so joining `""` or `.`
    /// yields this path's own handle back. An absolute segment restarts
    /// the path.
    ///
    /// # Examples
    ///
    /// ```
    /// use unipath::{NormConfig, PathInterner};
    ///
    /// let interner = PathInterner::with_config(NormConfig::unix());
    /// let base = interner.intern("/srv/mods");
    /// assert_eq!(base.join(["textures", "armor.dds"]).as_str(), "/srv/mods/textures/armor.dds");
    /// assert!(base.join([""]).same_handle(&base));
    /// ```
    #[must_use]
    pub fn join<I, S>(&self, segments: I) -> FsPath
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let style = self.config().style;
        let sep = style.separator();
        let mut joined = self.data.full.clone();
        for segment in segments {
            let segment = segment.as_ref();
            if is_absolute_str(segment, style) {
                joined = segment.to_string();
            } else {
                if !joined.is_empty() && !joined.ends_with(|c: char| style.is_separator(c)) {
                    joined.push(sep);
                }
                joined.push_str(segment);
            }
        }
        self.data.interner.intern(joined)
    }

    /// Concatenate a suffix onto this path without inserting a separator.
    ///
    /// # Examples
    ///
    /// ```
    /// use unipath::{NormConfig, PathInterner};
    ///
    /// let interner = PathInterner::with_config(NormConfig::unix());
    /// let path = interner.intern("save/auto");
    /// assert_eq!(path.concat(".bak").as_str(), "save/auto.bak");
    /// ```
    #[must_use]
    pub fn concat(&self, suffix: &str) -> FsPath {
        let mut s = self.data.full.clone();
        s.push_str(suffix);
        self.data.interner.intern(s)
    }

    /// Split the path into its components, drive first when present.
    ///
    /// # Examples
    ///
    /// ```
    /// use unipath::{NormConfig, PathInterner};
    ///
    /// let interner = PathInterner::with_config(NormConfig::windows());
    /// let path = interner.intern("C:\\Program Files\\Game");
    /// assert_eq!(path.split(), vec!["C:", "Program Files", "Game"]);
    /// ```
    #[must_use]
    pub fn split(&self) -> Vec<String> {
        let style = self.config().style;
        let (drive, rest) = split_drive(&self.data.full, style);
        let mut parts = Vec::new();
        if !drive.is_empty() {
            parts.push(drive.to_string());
        }
        parts.extend(
            rest.split(|c| style.is_separator(c))
                .filter(|p| !p.is_empty())
                .map(ToString::to_string),
        );
        parts
    }

    /// View this path as a standard library path for filesystem calls.
    #[must_use]
    pub fn as_std_path(&self) -> &std::path::Path {
        std::path::Path::new(self.as_str())
    }
}

/// Lexical absoluteness test for a path string under a style.
pub(crate) fn is_absolute_str(s: &str, style: Style) -> bool {
    let (_, rest) = split_drive(s, style);
    rest.chars().next().is_some_and(|c| style.is_separator(c))
}

/// Split at the last separator, like the original head/tail decomposition.
///
/// The head keeps its drive and loses trailing separators unless it is a
/// bare root; the tail never contains a separator.
fn split_last(s: &str, style: Style) -> (String, String) {
    let (drive, rest) = split_drive(s, style);
    match rest.rfind(|c| style.is_separator(c)) {
        None => (drive.to_string(), rest.to_string()),
        Some(i) => {
            let head = &rest[..=i];
            let tail = &rest[i + 1..];
            let trimmed = head.trim_end_matches(|c| style.is_separator(c));
            let head = if trimmed.is_empty() { head } else { trimmed };
            (format!("{drive}{head}"), tail.to_string())
        }
    }
}

/// Split off the extension of the last component.
///
/// The extension starts at the last period of the file name, provided at
/// least one non-period character precedes it; dotfiles therefore have no
/// extension.
fn split_extension(s: &str, style: Style) -> (String, String) {
    let (drive, rest) = split_drive(s, style);
    let base_start = rest
        .rfind(|c| style.is_separator(c))
        .map_or(0, |i| i + 1);
    let base = &rest[base_start..];
    if let Some(dot) = base.rfind('.') {
        if base[..dot].chars().any(|c| c != '.') {
            let cut = drive.len() + base_start + dot;
            return (s[..cut].to_string(), s[cut..].to_string());
        }
    }
    (s.to_string(), String::new())
}

impl fmt::Display for FsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data.full)
    }
}

impl fmt::Debug for FsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FsPath").field(&self.data.full).finish()
    }
}

impl PartialEq for FsPath {
    fn eq(&self, other: &Self) -> bool {
        self.data.fold == other.data.fold
    }
}

impl Eq for FsPath {}

impl PartialOrd for FsPath {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FsPath {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.data.fold.cmp(&other.data.fold)
    }
}

impl Hash for FsPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.fold.hash(state);
    }
}

impl AsRef<str> for FsPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<std::path::Path> for FsPath {
    fn as_ref(&self) -> &std::path::Path {
        self.as_std_path()
    }
}
