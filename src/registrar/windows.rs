//! HKCU Run key backend
//!
//! Entries live as string values under
//! `HKCU\Software\Microsoft\Windows\CurrentVersion\Run`.

use anyhow::{Context, Result};
use std::io::ErrorKind;
use winreg::enums::HKEY_CURRENT_USER;
use winreg::RegKey;

use super::AutostartRegistrar;

const RUN_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Run";

pub struct RunKeyRegistrar;

impl RunKeyRegistrar {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RunKeyRegistrar {
    fn default() -> Self {
        Self::new()
    }
}

impl AutostartRegistrar for RunKeyRegistrar {
    fn get(&self, entry: &str) -> Result<Option<String>> {
        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let run = match hkcu.open_subkey(RUN_KEY) {
            Ok(key) => key,
            // A user profile without a Run key has no entries
            Err(_) => return Ok(None),
        };
        match run.get_value::<String, _>(entry) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read Run entry: {}", entry)),
        }
    }

    fn set(&mut self, entry: &str, value: &str) -> Result<()> {
        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let (run, _) = hkcu
            .create_subkey(RUN_KEY)
            .context("Failed to open Run key for writing")?;
        run.set_value(entry, &value)
            .with_context(|| format!("Failed to write Run entry: {}", entry))?;
        Ok(())
    }

    fn delete(&mut self, entry: &str) -> Result<()> {
        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let (run, _) = hkcu
            .create_subkey(RUN_KEY)
            .context("Failed to open Run key for writing")?;
        match run.delete_value(entry) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to delete Run entry: {}", entry)),
        }
    }
}
