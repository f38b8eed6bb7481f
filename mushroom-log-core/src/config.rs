//! Session configuration types
//!
//! This module defines the knobs a monitoring session needs: where CSV
//! downloads go, which command backs the clipboard, how long notices stay
//! up and which phase the form opens on. Loading from a file is the
//! application layer's job.

use crate::phases::PhaseKey;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for a monitoring session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Phase selected when the session starts
    #[serde(default)]
    pub initial_phase: PhaseKey,

    /// Directory CSV downloads are written to
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,

    /// Clipboard helper command line (empty = platform default)
    #[serde(default)]
    pub clipboard_command: Vec<String>,

    /// How long a notice stays visible, in milliseconds (default: 3000)
    #[serde(default = "default_notice_ttl_ms")]
    pub notice_ttl_ms: u64,
}

fn default_download_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_notice_ttl_ms() -> u64 {
    3000
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_phase: PhaseKey::default(),
            download_dir: default_download_dir(),
            clipboard_command: Vec::new(),
            notice_ttl_ms: default_notice_ttl_ms(),
        }
    }
}

impl SessionConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the starting phase
    pub fn with_initial_phase(mut self, phase: PhaseKey) -> Self {
        self.initial_phase = phase;
        self
    }

    /// Builder method: set the download directory
    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    /// Builder method: set the clipboard command line
    pub fn with_clipboard_command<I, S>(mut self, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clipboard_command = command.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method: set the notice time-to-live
    pub fn with_notice_ttl(mut self, ttl: Duration) -> Self {
        self.notice_ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Notice time-to-live as a duration
    pub fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ttl_ms)
    }

    /// Clipboard command to run, falling back to the platform default
    pub fn effective_clipboard_command(&self) -> Vec<String> {
        if self.clipboard_command.is_empty() {
            crate::clipboard::default_command()
        } else {
            self.clipboard_command.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_builder() {
        let config = SessionConfig::new()
            .with_initial_phase(PhaseKey::Fruiting)
            .with_download_dir("/tmp/exports")
            .with_clipboard_command(["wl-copy"])
            .with_notice_ttl(Duration::from_millis(1500));

        assert_eq!(config.initial_phase, PhaseKey::Fruiting);
        assert_eq!(config.download_dir, PathBuf::from("/tmp/exports"));
        assert_eq!(config.clipboard_command, vec!["wl-copy".to_string()]);
        assert_eq!(config.notice_ttl(), Duration::from_millis(1500));
    }

    #[test]
    fn test_defaults() {
        let config = SessionConfig::new();
        assert_eq!(config.initial_phase, PhaseKey::Colonization);
        assert_eq!(config.notice_ttl(), Duration::from_secs(3));
        assert_eq!(config.download_dir, PathBuf::from("."));
        assert_eq!(config.effective_clipboard_command(), crate::clipboard::default_command());
    }

    #[test]
    fn test_huge_notice_ttl_saturates() {
        let config = SessionConfig::new().with_notice_ttl(Duration::MAX);
        assert_eq!(config.notice_ttl_ms, u64::MAX);
    }
}
