//! Application identity and per-user data paths

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Application title, used to namespace autostart entries
pub const APP_TITLE: &str = "FolderAutorun";

/// Vendor directory the store lives under
pub const VENDOR: &str = "Svetomech";

const DATABASE_NAME: &str = "FolderAutorun.db";

/// Immutable application configuration, built once at process start and
/// passed explicitly to the store and synchronizer.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Title prefixed onto every autostart entry name
    pub app_title: String,

    /// Flat text file holding one enabled folder path per line
    pub database_file: PathBuf,
}

impl AppConfig {
    /// Configuration rooted at the per-user default location
    /// - macOS: ~/Library/Application Support/Svetomech/FolderAutorun/FolderAutorun.db
    /// - Linux: ~/.config/Svetomech/FolderAutorun/FolderAutorun.db
    /// - Windows: %APPDATA%/Svetomech/FolderAutorun/FolderAutorun.db
    pub fn new() -> Result<Self> {
        let config = dirs::config_dir().context("Could not determine config directory")?;
        let database_file = config.join(VENDOR).join(APP_TITLE).join(DATABASE_NAME);
        Ok(Self {
            app_title: APP_TITLE.to_string(),
            database_file,
        })
    }

    /// Configuration with an explicit store file (--database override, tests)
    pub fn with_database_file(database_file: impl Into<PathBuf>) -> Self {
        Self {
            app_title: APP_TITLE.to_string(),
            database_file: database_file.into(),
        }
    }

    /// Create the application data directory if it does not exist yet
    pub fn ensure_app_dir(&self) -> Result<()> {
        if let Some(dir) = self.database_file.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create: {}", dir.display()))?;
        }
        Ok(())
    }

    /// Autostart entry name for one file: `<app_title>_<file name without extension>`
    pub fn entry_name(&self, file: &Path) -> String {
        let stem = file.file_stem().unwrap_or_default().to_string_lossy();
        format!("{}_{}", self.app_title, stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_name() {
        let config = AppConfig::with_database_file("/tmp/test.db");
        assert_eq!(
            config.entry_name(Path::new("/home/u/tools/backup.sh")),
            "FolderAutorun_backup"
        );
        assert_eq!(
            config.entry_name(Path::new("/home/u/tools/no_extension")),
            "FolderAutorun_no_extension"
        );
    }

    #[test]
    fn test_default_location() {
        // Should not panic; the path ends with vendor/title/db when a
        // config directory is available on this platform
        if let Ok(config) = AppConfig::new() {
            let path = config.database_file.to_string_lossy().to_string();
            assert!(path.contains(VENDOR));
            assert!(path.contains(APP_TITLE));
            assert!(path.ends_with("FolderAutorun.db"));
        }
    }
}
