#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # unipath
//!
//! Interned, case-fold-aware filesystem paths for managing game data
//! directories.
//!
//! Every path in the library is an [`FsPath`]: an immutable handle to a
//! normalized, pre-decomposed string, shared through a [`PathInterner`] so
//! that equal normalized forms are the same allocation. Equality, ordering
//! and hashing follow the configured case policy, which makes Windows-style
//! data paths (`Data\Armor.esp` vs `data\armor.ESP`) behave like the one
//! file they are, even when examined on a case-sensitive host.
//!
//! ## Core Types
//!
//! - [`FsPath`] and [`PathInterner`]: interned path values
//! - [`NormConfig`], [`Style`], [`CaseFolding`]: normalization policy
//! - [`PathUnion`] and [`UnionMode`]: layered directory resolution
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use unipath::{NormConfig, PathInterner};
//!
//! let interner = PathInterner::with_config(NormConfig::windows());
//! let a = interner.intern("Data\\Textures/armor.DDS");
//! let b = interner.intern("data\\textures\\Armor.dds");
//!
//! // One file, however it was spelled
//! assert_eq!(a, b);
//! assert_eq!(a.as_str(), "Data\\Textures\\armor.DDS");
//! assert_eq!(a.extension_folded(), ".dds");
//! ```

pub mod error;
pub mod intern;
pub mod logging;
pub mod norm;
pub mod path;
pub mod sysdir;
pub mod union;
pub mod version;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use intern::{global, intern, PathInterner};
pub use logging::{init_logger, LogLevel, Logger};
pub use norm::{case_fold, expand_tilde, normalize, CaseFolding, NormConfig, Style};
pub use path::{
    current_dir, make_temp_dir, temp_dir, FsPath, TempMove, TempNameEncoding, Walk, WalkEntry,
    DEFAULT_CHUNK_SIZE,
};
pub use sysdir::{system_dir, SystemDir};
pub use union::{MatchPolicy, PathUnion, UnionMode};
pub use version::{set_version_reader, NullVersionReader, RawVersion, VersionReader};
