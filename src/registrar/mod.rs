//! Key-value autostart registrar backends
//!
//! One named entry per registered file in the per-user autostart
//! mechanism: HKCU Run key on Windows, XDG autostart directory on Unix.

use anyhow::Result;
use std::collections::HashMap;

#[cfg(windows)]
pub mod windows;
#[cfg(unix)]
pub mod xdg;

/// Named key/value access to the per-user autostart mechanism
pub trait AutostartRegistrar {
    /// Current value registered under `entry`, or `None` if absent
    fn get(&self, entry: &str) -> Result<Option<String>>;

    fn set(&mut self, entry: &str, value: &str) -> Result<()>;

    /// Remove `entry`; removing an absent entry is not an error
    fn delete(&mut self, entry: &str) -> Result<()>;
}

/// Platform-default backend
#[cfg(windows)]
pub fn default_registrar() -> Result<Box<dyn AutostartRegistrar>> {
    Ok(Box::new(windows::RunKeyRegistrar::new()))
}

/// Platform-default backend
#[cfg(unix)]
pub fn default_registrar() -> Result<Box<dyn AutostartRegistrar>> {
    Ok(Box::new(xdg::XdgAutostartRegistrar::new()?))
}

/// In-memory backend for tests
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct MemoryRegistrar {
    entries: HashMap<String, String>,
}

#[allow(dead_code)]
impl MemoryRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &HashMap<String, String> {
        &self.entries
    }
}

impl AutostartRegistrar for MemoryRegistrar {
    fn get(&self, entry: &str) -> Result<Option<String>> {
        Ok(self.entries.get(entry).cloned())
    }

    fn set(&mut self, entry: &str, value: &str) -> Result<()> {
        self.entries.insert(entry.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, entry: &str) -> Result<()> {
        self.entries.remove(entry);
        Ok(())
    }
}
