//! Layered directory resolution.
//!
//! A [`PathUnion`] overlays several directories that may each hold a file
//! of the same name and answers "which copy wins" by a fixed policy. This
//! mirrors how a game engine loads loose files: several data directories,
//! one effective file per name.

use std::collections::BTreeSet;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Error, Result};
use crate::path::FsPath;

/// Which copy of a name wins when several member directories hold it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchPolicy {
    /// The copy in the earliest member directory wins.
    #[default]
    Order,
    /// The most recently modified copy wins.
    Timestamp,
}

/// Resolution mode: a policy plus an optional reversal of member order.
///
/// Both fields are always present with neutral defaults, so callers state
/// the whole mode explicitly instead of probing for flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnionMode {
    /// The winning-copy policy.
    pub policy: MatchPolicy,
    /// Reverse the member directories before applying the policy.
    pub reverse: bool,
}

impl UnionMode {
    /// A mode with the given policy and no reversal.
    #[must_use]
    pub const fn new(policy: MatchPolicy) -> Self {
        Self {
            policy,
            reverse: false,
        }
    }

    /// The same mode with member order reversed.
    #[must_use]
    pub const fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }
}

/// An ordered overlay of directories resolving names to winning paths.
///
/// Reversal is applied once at construction: the member order is flipped,
/// and under [`MatchPolicy::Timestamp`] the oldest copy wins instead of
/// the newest. All later queries see the effective order.
///
/// # Examples
///
/// ```no_run
/// use unipath::{intern, MatchPolicy, PathUnion, UnionMode};
///
/// let union = PathUnion::new(
///     [intern("/srv/patch"), intern("/srv/base")],
///     UnionMode::new(MatchPolicy::Order),
/// )?;
/// let winner = union.resolve(["armor.esp"]);
/// # Ok::<(), unipath::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct PathUnion {
    dirs: Vec<FsPath>,
    policy: MatchPolicy,
    newest: bool,
}

impl PathUnion {
    /// Build a union over member directories in the given mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPathInput`] when no directories are given;
    /// resolution needs at least one member to fall back on.
    pub fn new<I>(dirs: I, mode: UnionMode) -> Result<Self>
    where
        I: IntoIterator<Item = FsPath>,
    {
        let mut dirs: Vec<FsPath> = dirs.into_iter().collect();
        if dirs.is_empty() {
            return Err(Error::InvalidPathInput {
                reason: "a path union needs at least one directory".to_string(),
            });
        }
        if mode.reverse {
            dirs.reverse();
        }
        Ok(Self {
            dirs,
            policy: mode.policy,
            newest: !mode.reverse,
        })
    }

    /// The member directories in effective order.
    #[must_use]
    pub fn dirs(&self) -> &[FsPath] {
        &self.dirs
    }

    /// The full path of the winning copy of the joined `segments`.
    ///
    /// The segments are joined under each member the way
    /// [`FsPath::join`] joins them, so a nested relative path resolves as
    /// readily as a bare name. Under [`MatchPolicy::Order`] the first
    /// member holding the path wins; under [`MatchPolicy::Timestamp`] the
    /// copy with the newest modify time (oldest for a reversed union)
    /// wins, and on an exact tie the copy in the later member wins. When
    /// no member holds the path, the result points into the first member,
    /// so a caller creating the file puts it in the highest-priority
    /// layer.
    #[must_use]
    pub fn resolve<I, S>(&self, segments: I) -> FsPath
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments: Vec<String> = segments
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect();
        match self.policy {
            MatchPolicy::Order => self
                .dirs
                .iter()
                .map(|dir| dir.join(&segments))
                .find(FsPath::exists)
                .unwrap_or_else(|| self.dirs[0].join(&segments)),
            MatchPolicy::Timestamp => {
                let mut winner: Option<(SystemTime, FsPath)> = None;
                for dir in &self.dirs {
                    let candidate = dir.join(&segments);
                    if !candidate.exists() {
                        continue;
                    }
                    let mtime = raw_mtime(&candidate);
                    // Non-strict comparisons so an exact tie goes to the
                    // later member
                    let wins = match &winner {
                        None => true,
                        Some((best, _)) if self.newest => mtime >= *best,
                        Some((best, _)) => mtime <= *best,
                    };
                    if wins {
                        winner = Some((mtime, candidate));
                    }
                }
                winner.map_or_else(|| self.dirs[0].join(&segments), |(_, path)| path)
            }
        }
    }

    /// All names present in any member, deduplicated by comparison form.
    ///
    /// Members that do not exist contribute nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if an existing member cannot be listed.
    pub fn list(&self) -> Result<BTreeSet<FsPath>> {
        let mut names = BTreeSet::new();
        for dir in &self.dirs {
            names.extend(dir.list()?);
        }
        Ok(names)
    }
}

/// A stat failure reads as the epoch so unreadable copies always lose.
fn raw_mtime(path: &FsPath) -> SystemTime {
    std::fs::metadata(path.as_std_path())
        .and_then(|m| m.modified())
        .unwrap_or(UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intern::PathInterner;
    use crate::norm::NormConfig;
    use filetime::FileTime;
    use tempfile::TempDir;

    struct Layers {
        _temp: TempDir,
        first: FsPath,
        second: FsPath,
    }

    fn layers() -> Layers {
        let temp = TempDir::new().unwrap();
        let interner = PathInterner::with_config(NormConfig::default());
        let first = interner.intern(temp.path().join("first").to_str().unwrap());
        let second = interner.intern(temp.path().join("second").to_str().unwrap());
        first.make_dirs().unwrap();
        second.make_dirs().unwrap();
        Layers {
            _temp: temp,
            first,
            second,
        }
    }

    fn write(dir: &FsPath, name: &str, mtime_secs: i64) {
        let path = dir.join([name]);
        std::fs::write(path.as_std_path(), b"x").unwrap();
        filetime::set_file_mtime(path.as_std_path(), FileTime::from_unix_time(mtime_secs, 0))
            .unwrap();
    }

    #[test]
    fn test_empty_union_is_rejected() {
        let err = PathUnion::new([], UnionMode::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidPathInput { .. }));
    }

    #[test]
    fn test_order_first_existing_wins() {
        let l = layers();
        write(&l.first, "shared.esp", 100);
        write(&l.second, "shared.esp", 999);
        let union = PathUnion::new(
            [l.first.clone(), l.second.clone()],
            UnionMode::new(MatchPolicy::Order),
        )
        .unwrap();
        assert!(union.resolve(["shared.esp"]).same_handle(&l.first.join(["shared.esp"])));
    }

    #[test]
    fn test_order_skips_missing_members() {
        let l = layers();
        write(&l.second, "only.esp", 100);
        let union = PathUnion::new(
            [l.first.clone(), l.second.clone()],
            UnionMode::new(MatchPolicy::Order),
        )
        .unwrap();
        assert!(union.resolve(["only.esp"]).same_handle(&l.second.join(["only.esp"])));
    }

    #[test]
    fn test_missing_everywhere_falls_back_to_first_member() {
        let l = layers();
        let union = PathUnion::new(
            [l.first.clone(), l.second.clone()],
            UnionMode::new(MatchPolicy::Order),
        )
        .unwrap();
        assert!(union.resolve(["ghost.esp"]).same_handle(&l.first.join(["ghost.esp"])));
    }

    #[test]
    fn test_reverse_applies_once_at_construction() {
        let l = layers();
        write(&l.first, "shared.esp", 100);
        write(&l.second, "shared.esp", 100);
        let union = PathUnion::new(
            [l.first.clone(), l.second.clone()],
            UnionMode::new(MatchPolicy::Order).reversed(),
        )
        .unwrap();
        assert!(union.resolve(["shared.esp"]).same_handle(&l.second.join(["shared.esp"])));
        // Fallback also honors the reversed order
        assert!(union.resolve(["ghost.esp"]).same_handle(&l.second.join(["ghost.esp"])));
    }

    #[test]
    fn test_resolve_joins_multiple_segments() {
        let l = layers();
        let nested = l.second.join(["textures", "armor.dds"]);
        l.second.join(["textures"]).make_dirs().unwrap();
        std::fs::write(nested.as_std_path(), b"x").unwrap();
        let union = PathUnion::new(
            [l.first.clone(), l.second.clone()],
            UnionMode::new(MatchPolicy::Order),
        )
        .unwrap();
        assert!(union
            .resolve(["textures", "armor.dds"])
            .same_handle(&nested));
        // Fallback joins the segments under the first member
        assert!(union
            .resolve(["meshes", "ghost.nif"])
            .same_handle(&l.first.join(["meshes", "ghost.nif"])));
    }

    #[test]
    fn test_timestamp_newest_wins() {
        let l = layers();
        write(&l.first, "shared.esp", 2_000_000);
        write(&l.second, "shared.esp", 1_000_000);
        let union = PathUnion::new(
            [l.first.clone(), l.second.clone()],
            UnionMode::new(MatchPolicy::Timestamp),
        )
        .unwrap();
        assert!(union.resolve(["shared.esp"]).same_handle(&l.first.join(["shared.esp"])));
    }

    #[test]
    fn test_timestamp_tie_later_member_wins() {
        let l = layers();
        write(&l.first, "shared.esp", 1_500_000);
        write(&l.second, "shared.esp", 1_500_000);
        let union = PathUnion::new(
            [l.first.clone(), l.second.clone()],
            UnionMode::new(MatchPolicy::Timestamp),
        )
        .unwrap();
        assert!(union.resolve(["shared.esp"]).same_handle(&l.second.join(["shared.esp"])));
    }

    #[test]
    fn test_timestamp_reversed_oldest_wins() {
        let l = layers();
        write(&l.first, "shared.esp", 1_000_000);
        write(&l.second, "shared.esp", 2_000_000);
        let union = PathUnion::new(
            [l.first.clone(), l.second.clone()],
            UnionMode::new(MatchPolicy::Timestamp).reversed(),
        )
        .unwrap();
        assert!(union.resolve(["shared.esp"]).same_handle(&l.first.join(["shared.esp"])));
    }

    #[test]
    fn test_timestamp_single_copy_wins_regardless_of_age() {
        let l = layers();
        write(&l.second, "lone.esp", 10);
        let union = PathUnion::new(
            [l.first.clone(), l.second.clone()],
            UnionMode::new(MatchPolicy::Timestamp),
        )
        .unwrap();
        assert!(union.resolve(["lone.esp"]).same_handle(&l.second.join(["lone.esp"])));
    }

    #[test]
    fn test_list_unions_and_dedups_names() {
        let l = layers();
        write(&l.first, "a.esp", 100);
        write(&l.first, "shared.esp", 100);
        write(&l.second, "b.esp", 100);
        write(&l.second, "shared.esp", 100);
        let union = PathUnion::new(
            [l.first.clone(), l.second.clone()],
            UnionMode::default(),
        )
        .unwrap();
        let names: Vec<String> = union
            .list()
            .unwrap()
            .iter()
            .map(|n| n.as_str().to_string())
            .collect();
        assert_eq!(names, vec!["a.esp", "b.esp", "shared.esp"]);
    }

    #[test]
    fn test_list_skips_missing_member() {
        let l = layers();
        write(&l.first, "a.esp", 100);
        let ghost = l.first.parent().join(["ghost"]);
        let union =
            PathUnion::new([l.first.clone(), ghost], UnionMode::default()).unwrap();
        assert_eq!(union.list().unwrap().len(), 1);
    }
}
