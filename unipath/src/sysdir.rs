//! Well-known per-user shell directories.

use std::path::PathBuf;

use crate::intern::global;
use crate::path::FsPath;

/// A well-known per-user shell directory.
///
/// The variant set follows the Windows shell folders game installers write
/// into; on other platforms each maps to the closest conventional
/// directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemDir {
    /// The user's desktop.
    Desktop,
    /// Per-user roaming application data.
    AppData,
    /// Per-user local (non-roaming) application data.
    LocalAppData,
    /// The user's documents folder.
    Personal,
    /// Saved bookmarks.
    Favorites,
    /// The start-menu root.
    StartMenu,
    /// The start-menu programs folder.
    Programs,
    /// Programs launched at login.
    Startup,
    /// Recently opened documents.
    Recent,
    /// The Send-To menu folder.
    SendTo,
}

/// Look up a well-known directory as an interned path.
///
/// Variants with no portable equivalent on this platform, and sessions
/// where the lookup fails, fall back to the current directory, so the
/// result is always usable as a base for joins. Never errors.
#[must_use]
pub fn system_dir(which: SystemDir) -> FsPath {
    let found: Option<PathBuf> = match which {
        SystemDir::Desktop => dirs::desktop_dir(),
        SystemDir::AppData => dirs::config_dir(),
        SystemDir::LocalAppData => dirs::data_local_dir(),
        SystemDir::Personal => dirs::document_dir(),
        // Shell-menu folders have no cross-platform home
        SystemDir::Favorites
        | SystemDir::StartMenu
        | SystemDir::Programs
        | SystemDir::Startup
        | SystemDir::Recent
        | SystemDir::SendTo => None,
    };
    let found = found.unwrap_or_else(|| PathBuf::from("."));
    global().intern(found.to_str().unwrap_or("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_dir_never_empty() {
        for which in [
            SystemDir::Desktop,
            SystemDir::AppData,
            SystemDir::LocalAppData,
            SystemDir::Personal,
            SystemDir::Favorites,
            SystemDir::StartMenu,
            SystemDir::Programs,
            SystemDir::Startup,
            SystemDir::Recent,
            SystemDir::SendTo,
        ] {
            assert!(!system_dir(which).is_empty());
        }
    }

    #[test]
    fn test_app_data_matches_dirs_crate() {
        if let Some(config) = dirs::config_dir() {
            assert_eq!(
                system_dir(SystemDir::AppData).as_str(),
                config.to_str().unwrap()
            );
        }
    }

    #[test]
    fn test_unportable_variant_falls_back_to_usable_base() {
        let sendto = system_dir(SystemDir::SendTo);
        // Usable as a join base even when unmapped
        assert!(!sendto.join(["anything"]).is_empty());
    }
}
