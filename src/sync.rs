//! Synchronizer - reconciles the autostart registrar with the path store
//!
//! The dual update is intentionally not atomic across the two stores: a
//! crash in between leaves a partial state that the next run converges,
//! because every per-file registrar update is independently idempotent.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::registrar::AutostartRegistrar;
use crate::store::PathStore;

/// Summary of what one synchronizer run touched
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    /// Regular files found directly in the folder
    pub files_seen: usize,
    /// Entries created or updated
    pub entries_written: usize,
    /// Entries deleted
    pub entries_removed: usize,
    /// Entries left untouched (already correct, or owned by another writer)
    pub entries_skipped: usize,
}

pub struct Synchronizer<'a> {
    config: &'a AppConfig,
    store: &'a PathStore,
    registrar: &'a mut dyn AutostartRegistrar,
}

impl<'a> Synchronizer<'a> {
    pub fn new(
        config: &'a AppConfig,
        store: &'a PathStore,
        registrar: &'a mut dyn AutostartRegistrar,
    ) -> Self {
        Self {
            config,
            store,
            registrar,
        }
    }

    /// Enable or disable autorun for every regular file directly inside
    /// `folder`, then commit the membership change to the store.
    pub fn apply(&mut self, folder: &Path, enable: bool) -> Result<SyncReport> {
        let mut report = SyncReport::default();

        for file in list_files(folder)? {
            report.files_seen += 1;

            let entry = self.config.entry_name(&file);
            let expected = file.to_string_lossy().to_string();
            let current = self.registrar.get(&entry)?;

            if enable {
                // The file may be gone since enumeration
                if !file.is_file() {
                    report.entries_skipped += 1;
                    continue;
                }
                if current.as_deref() == Some(expected.as_str()) {
                    report.entries_skipped += 1;
                } else {
                    self.registrar.set(&entry, &expected)?;
                    report.entries_written += 1;
                }
            } else if current.as_deref() == Some(expected.as_str()) {
                self.registrar.delete(&entry)?;
                report.entries_removed += 1;
            } else {
                // Another writer owns this entry now; leave it alone
                report.entries_skipped += 1;
            }
        }

        if enable {
            self.store.add(folder)?;
        } else {
            self.store.remove(folder)?;
        }

        Ok(report)
    }
}

/// Regular files directly inside `folder`, no recursion
pub fn list_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries = fs::read_dir(folder)
        .with_context(|| format!("Failed to read: {}", folder.display()))?;
    for entry in entries.flatten() {
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    Ok(files)
}
