//! The interned path value and its filesystem operations.
//!
//! [`FsPath`] is an immutable value decomposed into its string parts at
//! construction time (full form, folded comparison form, root, extension,
//! parent, file name, stem). It is also the crate's I/O facade: stat
//! accessors, copy/move/remove, checksumming and directory walking all live
//! on it.
//!
//! Handles are only created through an interner (see [`crate::intern`]);
//! everything derived here re-enters the same interner, so structural
//! accessors like [`FsPath::parent`] return shared handles too.

mod checksum;
mod handle;
mod meta;
mod ops;
mod relation;
mod walk;

pub use checksum::DEFAULT_CHUNK_SIZE;
pub use handle::FsPath;
pub(crate) use handle::PathData;
pub use ops::{current_dir, make_temp_dir, temp_dir, TempMove, TempNameEncoding};
pub use walk::{Walk, WalkEntry};
