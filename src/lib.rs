//! folder-autorun library
//!
//! Core store and synchronization logic for toggling login autostart
//! on every file inside a managed folder.

pub mod config;
pub mod registrar;
pub mod store;
pub mod sync;
