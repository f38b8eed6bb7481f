//! Configuration loading and parsing

use anyhow::{Context, Result};
use mushroom_log_core::{PhaseKey, SessionConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from a TOML file)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub session: SessionSection,
    #[serde(default)]
    pub clipboard: ClipboardSection,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionSection {
    pub initial_phase: Option<PhaseKey>,
    pub download_dir: Option<PathBuf>,
    pub notice_ttl_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ClipboardSection {
    /// Command line of the clipboard helper, e.g. ["wl-copy"]
    #[serde(default)]
    pub command: Vec<String>,
}

impl AppConfig {
    /// Merge file settings over library defaults
    pub fn session_config(&self) -> SessionConfig {
        let mut config = SessionConfig::new().with_clipboard_command(self.clipboard.command.clone());
        if let Some(phase) = self.session.initial_phase {
            config = config.with_initial_phase(phase);
        }
        if let Some(dir) = &self.session.download_dir {
            config = config.with_download_dir(dir.clone());
        }
        if let Some(ttl) = self.session.notice_ttl_ms {
            config.notice_ttl_ms = ttl;
        }
        config
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [session]
            initial_phase = "leather"
            download_dir = "exports"
            notice_ttl_ms = 5000

            [clipboard]
            command = ["wl-copy", "--type", "text/plain"]
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        let session = config.session_config();
        assert_eq!(session.initial_phase, PhaseKey::Leather);
        assert_eq!(session.download_dir, PathBuf::from("exports"));
        assert_eq!(session.notice_ttl_ms, 5000);
        assert_eq!(session.clipboard_command.len(), 3);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let session = config.session_config();
        assert_eq!(session, SessionConfig::new());
    }

    #[test]
    fn test_unknown_phase_rejected() {
        let result: std::result::Result<AppConfig, _> = toml::from_str(
            r#"
            [session]
            initial_phase = "incubation"
        "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/nonexistent/mushroom-log.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
