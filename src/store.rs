//! Path store - the persisted set of autorun-enabled folders
//!
//! One absolute folder path per line, UTF-8, no header, no schema version.
//! Membership uses case-insensitive string equality with no trailing
//! separator or symlink normalization: `/a/B` and `/a/b` are the same
//! folder, `/a/b` and `/a/b/` are not.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Deduplicated set of folder paths backed by a flat text file
pub struct PathStore {
    database_file: PathBuf,
}

/// Case-insensitive path identity, deliberately un-normalized
fn paths_equal(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

impl PathStore {
    pub fn new(database_file: impl Into<PathBuf>) -> Self {
        Self {
            database_file: database_file.into(),
        }
    }

    /// Whether `folder` is currently enabled. A missing store file reads
    /// as an empty store.
    pub fn contains(&self, folder: &Path) -> Result<bool> {
        let file = match File::open(&self.database_file) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read: {}", self.database_file.display())
                })
            }
        };

        let folder = folder.to_string_lossy();
        for line in BufReader::new(file).lines() {
            let line = line.with_context(|| {
                format!("Failed to read: {}", self.database_file.display())
            })?;
            if paths_equal(&line, &folder) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Append `folder` to the store. No-op when it is already present or
    /// is not an existing directory.
    pub fn add(&self, folder: &Path) -> Result<()> {
        if !folder.is_dir() || self.contains(folder)? {
            return Ok(());
        }

        if let Some(dir) = self.database_file.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create: {}", dir.display()))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.database_file)
            .with_context(|| format!("Failed to open: {}", self.database_file.display()))?;
        writeln!(file, "{}", folder.display())
            .with_context(|| format!("Failed to write: {}", self.database_file.display()))?;
        Ok(())
    }

    /// Remove `folder` from the store via a filtered rewrite: stream every
    /// other line into a temp file in the same directory and atomically
    /// replace the original. A crash mid-rewrite leaves at worst a stray
    /// temp file behind with the original untouched.
    pub fn remove(&self, folder: &Path) -> Result<()> {
        if !folder.is_dir() {
            return Ok(());
        }
        let file = match File::open(&self.database_file) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read: {}", self.database_file.display())
                })
            }
        };

        let dir = self.database_file.parent().unwrap_or(Path::new("."));
        let mut temp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temp file in: {}", dir.display()))?;

        let folder = folder.to_string_lossy();
        for line in BufReader::new(file).lines() {
            let line = line.with_context(|| {
                format!("Failed to read: {}", self.database_file.display())
            })?;
            if !paths_equal(&line, &folder) {
                writeln!(temp, "{}", line).context("Failed to write temp file")?;
            }
        }

        temp.persist(&self.database_file)
            .with_context(|| format!("Failed to replace: {}", self.database_file.display()))?;
        Ok(())
    }

    /// All stored folder paths, in file order. Missing store reads as empty.
    pub fn entries(&self) -> Result<Vec<String>> {
        let file = match File::open(&self.database_file) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read: {}", self.database_file.display())
                })
            }
        };

        let mut entries = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line.with_context(|| {
                format!("Failed to read: {}", self.database_file.display())
            })?;
            if !line.is_empty() {
                entries.push(line);
            }
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> PathStore {
        PathStore::new(dir.path().join("FolderAutorun.db"))
    }

    #[test]
    fn test_contains_missing_store_is_false() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(!store.contains(dir.path()).unwrap());
    }

    #[test]
    fn test_add_then_contains() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let folder = dir.path().join("music");
        fs::create_dir(&folder).unwrap();

        store.add(&folder).unwrap();
        assert!(store.contains(&folder).unwrap());
    }

    #[test]
    fn test_add_is_deduplicated() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let folder = dir.path().join("music");
        fs::create_dir(&folder).unwrap();

        store.add(&folder).unwrap();
        store.add(&folder).unwrap();
        store.add(&folder).unwrap();

        let entries = store.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0], folder.to_string_lossy());
    }

    #[test]
    fn test_add_nonexistent_folder_is_noop() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.add(&dir.path().join("not-there")).unwrap();
        assert!(store.entries().unwrap().is_empty());
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let folder = dir.path().join("music");
        fs::create_dir(&folder).unwrap();

        // Stored line differs from the queried path only by case
        let stored = folder.to_string_lossy().to_uppercase();
        fs::write(dir.path().join("FolderAutorun.db"), format!("{}\n", stored)).unwrap();

        assert!(store.contains(&folder).unwrap());
    }

    #[test]
    fn test_add_sees_differently_cased_entry() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let folder = dir.path().join("music");
        fs::create_dir(&folder).unwrap();

        let stored = folder.to_string_lossy().to_uppercase();
        fs::write(dir.path().join("FolderAutorun.db"), format!("{}\n", stored)).unwrap();

        // Must not append a second, differently-cased duplicate
        store.add(&folder).unwrap();
        assert_eq!(store.entries().unwrap().len(), 1);
    }

    #[test]
    fn test_trailing_separator_is_a_different_folder() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let folder = dir.path().join("music");
        fs::create_dir(&folder).unwrap();

        let with_sep = format!("{}/", folder.to_string_lossy());
        fs::write(dir.path().join("FolderAutorun.db"), format!("{}\n", with_sep)).unwrap();

        assert!(!store.contains(&folder).unwrap());
    }

    #[test]
    fn test_remove_filters_only_matching_line() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let docs = dir.path().join("docs");
        let music = dir.path().join("music");
        fs::create_dir(&docs).unwrap();
        fs::create_dir(&music).unwrap();

        // Store holds a differently-cased form of the docs path
        let db = dir.path().join("FolderAutorun.db");
        fs::write(
            &db,
            format!(
                "{}\n{}\n",
                docs.to_string_lossy().to_uppercase(),
                music.to_string_lossy()
            ),
        )
        .unwrap();

        store.remove(&docs).unwrap();

        let entries = store.entries().unwrap();
        assert_eq!(entries, vec![music.to_string_lossy().to_string()]);
    }

    #[test]
    fn test_remove_missing_store_is_noop() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.remove(dir.path()).unwrap();
        assert!(!dir.path().join("FolderAutorun.db").exists());
    }

    #[test]
    fn test_remove_retries_after_interrupted_rewrite() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let docs = dir.path().join("docs");
        let music = dir.path().join("music");
        fs::create_dir(&docs).unwrap();
        fs::create_dir(&music).unwrap();

        store.add(&docs).unwrap();
        store.add(&music).unwrap();

        // A crash mid-rewrite leaves a temp file behind, original untouched
        fs::write(dir.path().join(".tmpXYZ123"), "garbage\n").unwrap();

        assert!(store.contains(&docs).unwrap());
        assert!(store.contains(&music).unwrap());

        store.remove(&docs).unwrap();
        assert!(!store.contains(&docs).unwrap());
        assert!(store.contains(&music).unwrap());
    }
}
