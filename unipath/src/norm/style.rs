//! Configuration for path syntax and case policy.

/// Path separator syntax.
///
/// Windows-style paths accept both separators, normalize to backslash, and
/// carry an optional drive-letter prefix. Unix-style paths use forward
/// slash only; a backslash is an ordinary file-name character.
///
/// Making the style explicit (rather than compiling it in) lets
/// Windows-syntax paths be exercised on any host, which is how the
/// case-insensitive scenarios in the test suite work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// Forward-slash separators, no drive prefixes.
    Unix,
    /// Backslash separators (forward slash accepted on input), drive-letter
    /// prefixes such as `C:`.
    Windows,
}

impl Style {
    /// The style of the host platform.
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }

    /// The canonical separator for this style.
    #[must_use]
    pub const fn separator(self) -> char {
        match self {
            Self::Unix => '/',
            Self::Windows => '\\',
        }
    }

    /// Whether `c` acts as a separator under this style.
    #[must_use]
    pub const fn is_separator(self, c: char) -> bool {
        match self {
            Self::Unix => c == '/',
            Self::Windows => c == '/' || c == '\\',
        }
    }

    /// The case policy conventionally paired with this style.
    ///
    /// Windows filesystems are case-insensitive, Unix filesystems are
    /// (usually) case-sensitive. This is only the default; callers may pair
    /// any style with any [`CaseFolding`].
    #[must_use]
    pub const fn default_casing(self) -> CaseFolding {
        match self {
            Self::Unix => CaseFolding::Preserve,
            Self::Windows => CaseFolding::Fold,
        }
    }
}

/// Case policy applied by [`case_fold`](crate::norm::case_fold).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseFolding {
    /// Comparison form is identical to the normalized form.
    Preserve,
    /// Comparison form is lowercased (case-insensitive filesystems).
    Fold,
}

/// Combined normalization configuration.
///
/// Every knob is an always-present field with a neutral default; there is
/// no conditionally-absent configuration.
///
/// # Examples
///
/// ```
/// use unipath::norm::{CaseFolding, NormConfig, Style};
///
/// let native = NormConfig::default();
/// assert_eq!(native.style, Style::native());
///
/// let custom = NormConfig::new(Style::Unix, CaseFolding::Fold);
/// assert_eq!(custom.casing, CaseFolding::Fold);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NormConfig {
    /// Separator and drive-prefix syntax.
    pub style: Style,
    /// Case policy for comparison forms.
    pub casing: CaseFolding,
}

impl NormConfig {
    /// Create a configuration from explicit parts.
    #[must_use]
    pub const fn new(style: Style, casing: CaseFolding) -> Self {
        Self { style, casing }
    }

    /// Windows syntax with case-insensitive comparison.
    #[must_use]
    pub const fn windows() -> Self {
        Self::new(Style::Windows, CaseFolding::Fold)
    }

    /// Unix syntax with case-sensitive comparison.
    #[must_use]
    pub const fn unix() -> Self {
        Self::new(Style::Unix, CaseFolding::Preserve)
    }
}

impl Default for NormConfig {
    fn default() -> Self {
        let style = Style::native();
        Self::new(style, style.default_casing())
    }
}
