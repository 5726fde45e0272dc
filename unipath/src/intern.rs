//! Process-wide path interning.
//!
//! Callers never build an [`FsPath`] directly; they go through a
//! [`PathInterner`], which normalizes the input string and either returns
//! the cached handle for that normalized string or builds and caches a new
//! one. Two `intern` calls with strings that normalize identically are
//! guaranteed to return the same handle identity.
//!
//! The cache holds weak references, so a path's data is reclaimed as soon
//! as the last external handle drops; [`PathInterner::purge`] compacts the
//! dead map slots left behind. This is behaviorally equivalent to the
//! retain-forever-and-sweep alternative: no externally reachable handle is
//! ever evicted, and the cache never resurrects a dropped one.
//!
//! # Examples
//!
//! ```
//! use unipath::intern;
//!
//! let a = intern("mods//textures/./armor");
//! let b = intern("mods/textures/armor");
//! assert!(a.same_handle(&b));
//! ```

use std::collections::HashMap;
use std::ffi::OsStr;
use std::sync::{Arc, Mutex, OnceLock, PoisonError, Weak};

use crate::error::{Error, Result};
use crate::norm::{normalize, NormConfig};
use crate::path::{FsPath, PathData};

/// A normalized-string-keyed cache of shared path handles.
///
/// Cloning an interner is cheap and yields a handle to the same cache.
/// `intern` and `purge` serialize on an internal mutex, so concurrent
/// callers can never observe two different canonical handles for one
/// normalized string, and a purge never races an in-flight intern.
///
/// # Examples
///
/// ```
/// use unipath::{NormConfig, PathInterner};
///
/// let interner = PathInterner::with_config(NormConfig::windows());
/// let a = interner.intern("C:\\Foo\\Bar.txt");
/// let b = interner.intern("c:\\foo\\bar.TXT");
/// // Different normalized strings, distinct handles, but equal paths
/// assert!(!a.same_handle(&b));
/// assert_eq!(a, b);
/// ```
#[derive(Clone)]
pub struct PathInterner {
    shared: Arc<Shared>,
}

struct Shared {
    config: NormConfig,
    cache: Mutex<HashMap<String, Weak<PathData>>>,
}

impl PathInterner {
    /// Create an interner with the platform-default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(NormConfig::default())
    }

    /// Create an interner with an explicit normalization configuration.
    #[must_use]
    pub fn with_config(config: NormConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                config,
                cache: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// The normalization configuration all paths from this interner share.
    #[must_use]
    pub fn config(&self) -> NormConfig {
        self.shared.config
    }

    /// Return the shared handle for a path string, creating it if absent.
    ///
    /// The input is normalized first; two inputs that normalize identically
    /// yield the same handle identity. Interning the string of an existing
    /// handle from this interner is a pass-through back to that handle.
    ///
    /// # Examples
    ///
    /// ```
    /// use unipath::PathInterner;
    ///
    /// let interner = PathInterner::new();
    /// let a = interner.intern("data/meshes");
    /// let b = interner.intern(a.as_str());
    /// assert!(a.same_handle(&b));
    /// ```
    pub fn intern(&self, raw: impl AsRef<str>) -> FsPath {
        let norm = normalize(raw.as_ref(), self.shared.config);
        let mut cache = self.lock();
        if let Some(weak) = cache.get(&norm) {
            if let Some(data) = weak.upgrade() {
                return FsPath::from_data(data);
            }
        }
        let data = Arc::new(PathData::build(norm.clone(), self.clone()));
        cache.insert(norm, Arc::downgrade(&data));
        FsPath::from_data(data)
    }

    /// Intern an OS string, rejecting input with no UTF-8 representation.
    ///
    /// This is the construction boundary for non-string input; everything
    /// past it works with validated strings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPathInput`] if the OS string is not valid
    /// UTF-8.
    pub fn intern_os(&self, raw: &OsStr) -> Result<FsPath> {
        let raw = raw.to_str().ok_or_else(|| Error::InvalidPathInput {
            reason: format!("not valid UTF-8: {raw:?}"),
        })?;
        Ok(self.intern(raw))
    }

    /// Drop cache slots whose path is no longer externally held.
    ///
    /// Path data itself is reclaimed by reference counting the moment the
    /// last handle drops; this compacts the map entries those drops leave
    /// behind. Returns the number of slots removed. Never evicts a handle
    /// that is still reachable.
    pub fn purge(&self) -> usize {
        let mut cache = self.lock();
        let before = cache.len();
        cache.retain(|_, weak| weak.strong_count() > 0);
        let removed = before - cache.len();
        if removed > 0 {
            log::debug!("purged {removed} dead intern cache entries");
        }
        removed
    }

    /// Number of cache slots, live or dead.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the cache has no slots at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Weak<PathData>>> {
        // A poisoned map only means a panic elsewhere mid-insert; the map
        // itself is still structurally sound.
        self.shared
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for PathInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PathInterner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathInterner")
            .field("config", &self.shared.config)
            .field("entries", &self.len())
            .finish()
    }
}

static GLOBAL: OnceLock<PathInterner> = OnceLock::new();

/// The process-wide default interner.
///
/// Uses the platform-default [`NormConfig`]. Construct a [`PathInterner`]
/// explicitly to get different separator or casing behavior.
#[must_use]
pub fn global() -> &'static PathInterner {
    GLOBAL.get_or_init(PathInterner::new)
}

/// Intern a path string through the process-wide default interner.
///
/// # Examples
///
/// ```
/// use unipath::intern;
///
/// let path = intern("saves/autosave.ess");
/// assert_eq!(path.extension(), ".ess");
/// ```
#[must_use]
pub fn intern(raw: impl AsRef<str>) -> FsPath {
    global().intern(raw)
}
