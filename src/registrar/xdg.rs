//! XDG autostart backend
//!
//! One `.desktop` file per entry under `~/.config/autostart/`; the
//! registered file path is carried verbatim in the `Exec=` line.

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::AutostartRegistrar;

pub struct XdgAutostartRegistrar {
    autostart_dir: PathBuf,
}

impl XdgAutostartRegistrar {
    pub fn new() -> Result<Self> {
        let config = dirs::config_dir().context("Could not determine config directory")?;
        Ok(Self {
            autostart_dir: config.join("autostart"),
        })
    }

    /// Backend rooted at an explicit directory (tests)
    #[allow(dead_code)]
    pub fn with_dir(autostart_dir: impl Into<PathBuf>) -> Self {
        Self {
            autostart_dir: autostart_dir.into(),
        }
    }

    fn desktop_file(&self, entry: &str) -> PathBuf {
        self.autostart_dir.join(format!("{}.desktop", entry))
    }
}

impl AutostartRegistrar for XdgAutostartRegistrar {
    fn get(&self, entry: &str) -> Result<Option<String>> {
        let path = self.desktop_file(entry);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read: {}", path.display()))
            }
        };
        Ok(content
            .lines()
            .find_map(|line| line.strip_prefix("Exec="))
            .map(str::to_string))
    }

    fn set(&mut self, entry: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.autostart_dir).with_context(|| {
            format!("Failed to create: {}", self.autostart_dir.display())
        })?;
        let path = self.desktop_file(entry);
        let content = format!(
            "[Desktop Entry]\nType=Application\nName={}\nExec={}\n",
            entry, value
        );
        fs::write(&path, content)
            .with_context(|| format!("Failed to write: {}", path.display()))?;
        Ok(())
    }

    fn delete(&mut self, entry: &str) -> Result<()> {
        let path = self.desktop_file(entry);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to delete: {}", path.display())),
        }
    }
}
