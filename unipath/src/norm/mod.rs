//! Lexical path normalization and case folding.
//!
//! This module provides the pure string-level layer that everything else in
//! the crate is built on. Nothing here touches the filesystem.
//!
//! # Key Concepts
//!
//! ## Normalization
//!
//! [`normalize`] canonicalizes a path string lexically:
//! - collapses redundant separators (`a//b` becomes `a/b`)
//! - removes `.` segments and resolves `..` segments where possible
//! - strips trailing separators (except for a bare root)
//! - preserves the drive prefix on Windows-style paths
//!
//! Normalization is idempotent and never consults the filesystem, so
//! symlinks are not followed and case is untouched.
//!
//! ## Case folding
//!
//! [`case_fold`] applies the configured case policy on top of
//! normalization. The policy is explicit configuration, not a platform
//! hardcode: a [`NormConfig`] pairs a separator [`Style`] with a
//! [`CaseFolding`] choice, with platform-appropriate defaults. Case-folded
//! forms are used for comparison only; original case is always preserved in
//! the stored path string.
//!
//! # Examples
//!
//! ```
//! use unipath::norm::{case_fold, normalize, NormConfig};
//!
//! let cfg = NormConfig::windows();
//! assert_eq!(normalize("C:/Games//Data/./Textures/..", cfg), "C:\\Games\\Data");
//! assert_eq!(case_fold("C:\\Games\\DATA", cfg), "c:\\games\\data");
//!
//! let cfg = NormConfig::unix();
//! assert_eq!(normalize("/opt/../srv/mods/", cfg), "/srv/mods");
//! // Unix folding preserves case by default
//! assert_eq!(case_fold("/srv/Mods", cfg), "/srv/Mods");
//! ```

mod normalize;
mod style;

pub use normalize::{case_fold, expand_tilde, fold_normalized, normalize, split_drive};
pub use style::{CaseFolding, NormConfig, Style};
