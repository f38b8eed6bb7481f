//! Clipboard access
//!
//! Exports reach the platform clipboard through the [`Clipboard`] trait.
//! [`CommandClipboard`] pipes text into a system helper (`pbcopy`, `clip`,
//! `xclip`, ...); [`MemoryClipboard`] keeps it in memory.

use crate::types::{MonitorError, Result};
use std::io::Write;
use std::process::{Command, Stdio};

/// Destination for copied text
pub trait Clipboard {
    /// Replace the clipboard contents with `text`
    ///
    /// # Errors
    /// * `MonitorError::Clipboard` - the platform refused or failed the write
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Default helper command for the current platform
pub fn default_command() -> Vec<String> {
    let parts: &[&str] = if cfg!(target_os = "macos") {
        &["pbcopy"]
    } else if cfg!(target_os = "windows") {
        &["clip"]
    } else {
        &["xclip", "-selection", "clipboard"]
    };
    parts.iter().map(|s| s.to_string()).collect()
}

/// Clipboard backed by an external command that reads stdin
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    /// Build from a command line; the first element is the program
    ///
    /// # Errors
    /// * `MonitorError::Clipboard` - `command` is empty
    pub fn new(command: &[String]) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| MonitorError::Clipboard("no clipboard command configured".to_string()))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Clipboard for CommandClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        log::debug!("Piping {} bytes into {} {:?}", text.len(), self.program, self.args);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| MonitorError::Clipboard(format!("cannot run {}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| MonitorError::Clipboard(format!("write to {} failed: {}", self.program, e)))?;
        }

        let status = child
            .wait()
            .map_err(|e| MonitorError::Clipboard(format!("{} did not finish: {}", self.program, e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(MonitorError::Clipboard(format!("{} exited with {}", self.program, status)))
        }
    }
}

/// In-memory clipboard; can be set to refuse writes
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    deny: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose writes always fail
    pub fn denying() -> Self {
        Self {
            contents: None,
            deny: true,
        }
    }

    /// Last text written, if any
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.deny {
            return Err(MonitorError::Clipboard("permission denied".to_string()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}
