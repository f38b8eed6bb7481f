//! Monitoring session
//!
//! [`Session`] is the state container a front end drives: it owns the entry
//! store, the notification channel, the clipboard and the download
//! directory. Each public method corresponds to one user gesture. Failures
//! are returned to the caller and also published as a notice; none of them
//! leaves the session unusable, and nothing is retried.

use crate::clipboard::{Clipboard, CommandClipboard};
use crate::config::SessionConfig;
use crate::export;
use crate::notify::{Notice, Notifier};
use crate::phases::{Phase, PhaseKey};
use crate::store::{ClearOutcome, EntryStore};
use crate::types::{BatchField, EntryDate, MonitorError, Result};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

/// Source of "today" for entry dates and file names
pub trait Clock {
    fn today(&self) -> EntryDate;
}

/// Wall clock, UTC calendar date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> EntryDate {
        Utc::now().date_naive()
    }
}

/// Clock stuck on one date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub EntryDate);

impl Clock for FixedClock {
    fn today(&self) -> EntryDate {
        self.0
    }
}

/// One monitoring session
pub struct Session<C: Clipboard = CommandClipboard> {
    store: EntryStore,
    notifier: Notifier,
    clipboard: C,
    clock: Box<dyn Clock>,
    download_dir: PathBuf,
}

impl Session<CommandClipboard> {
    /// Session using the configured clipboard command and the system clock
    ///
    /// # Errors
    /// * `MonitorError::Clipboard` - the configured clipboard command is unusable
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        let clipboard = CommandClipboard::new(&config.effective_clipboard_command())?;
        log::info!(
            "Session on {} (clipboard: {}, downloads: {:?})",
            config.initial_phase,
            clipboard.program(),
            config.download_dir
        );
        Ok(Self::new(config, clipboard, Box::new(SystemClock)))
    }
}

impl<C: Clipboard> Session<C> {
    /// Session with an explicit clipboard and clock
    pub fn new(config: &SessionConfig, clipboard: C, clock: Box<dyn Clock>) -> Self {
        Self {
            store: EntryStore::with_phase(config.initial_phase),
            notifier: Notifier::new(config.notice_ttl()),
            clipboard,
            clock,
            download_dir: config.download_dir.clone(),
        }
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    pub fn active_phase(&self) -> &'static Phase {
        self.store.active_phase_def()
    }

    /// The live notice, if any
    pub fn notice(&self) -> Option<&Notice> {
        self.notifier.current()
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Post a notice from outside the store operations (e.g. input errors)
    pub fn notify(&mut self, notice: Notice) {
        self.notifier.publish(notice);
    }

    pub fn select_phase(&mut self, phase: PhaseKey) {
        self.store.set_active_phase(phase);
    }

    pub fn set_batch_field(&mut self, field: BatchField, value: impl Into<String>) {
        self.store.update_batch_info(field, value);
    }

    pub fn set_entry_field(&mut self, column_key: impl Into<String>, value: impl Into<String>) {
        self.store.update_current_entry(column_key, value);
    }

    /// Save today's entry; returns the new number of saved entries
    pub fn save_entry(&mut self) -> Result<usize> {
        let today = self.clock.today();
        match self.store.save_entry(today) {
            Ok(_) => {
                self.notifier
                    .publish(Notice::success("Entry saved! Now copy it to Google Sheets"));
                Ok(self.store.len())
            }
            Err(e) => {
                self.notifier
                    .publish(Notice::warning("Please fill out at least one field!"));
                Err(e)
            }
        }
    }

    /// Delete the saved entry at `index` (0-based)
    pub fn delete_entry(&mut self, index: usize) -> Result<()> {
        match self.store.delete_entry(index) {
            Ok(_) => {
                self.notifier.publish(Notice::success("Entry deleted"));
                Ok(())
            }
            Err(e) => {
                self.notifier.publish(Notice::warning(format!("No entry #{}", index + 1)));
                Err(e)
            }
        }
    }

    /// Clear everything after `confirm` agrees
    pub fn clear_all<F>(&mut self, confirm: F) -> ClearOutcome
    where
        F: FnOnce(&str) -> bool,
    {
        let outcome = self.store.clear_all(confirm);
        if outcome == ClearOutcome::Cleared {
            self.notifier.publish(Notice::success("All data cleared"));
        }
        outcome
    }

    /// Copy the header and the most recent entry to the clipboard as TSV
    pub fn copy_last_entry(&mut self) -> Result<()> {
        let tsv = match export::last_entry_tsv(&self.store, self.store.active_phase_def()) {
            Ok(tsv) => tsv,
            Err(e) => {
                self.notifier
                    .publish(Notice::warning("No saved entries! Click \"Save Entry\" first"));
                return Err(e);
            }
        };

        match self.clipboard.write_text(&tsv) {
            Ok(()) => {
                log::info!("Copied last entry ({} bytes)", tsv.len());
                self.notifier
                    .publish(Notice::success("Entry with headers copied! Paste into Google Sheets"));
                Ok(())
            }
            Err(e) => {
                log::warn!("Copy of last entry failed: {}", e);
                self.notifier
                    .publish(Notice::failure("Copy failed. Check clipboard permissions."));
                Err(e)
            }
        }
    }

    /// Copy the header and all entries to the clipboard as TSV; returns the entry count
    pub fn copy_all_entries(&mut self) -> Result<usize> {
        let tsv = match export::all_entries_tsv(&self.store, self.store.active_phase_def()) {
            Ok(tsv) => tsv,
            Err(e) => {
                self.notifier.publish(Notice::warning("No entries to export!"));
                return Err(e);
            }
        };

        let count = self.store.len();
        match self.clipboard.write_text(&tsv) {
            Ok(()) => {
                log::info!("Copied {} entries ({} bytes)", count, tsv.len());
                self.notifier
                    .publish(Notice::success(format!("Copied {} entries with headers!", count)));
                Ok(count)
            }
            Err(e) => {
                log::warn!("Copy of all entries failed: {}", e);
                self.notifier
                    .publish(Notice::failure("Copy failed. Try CSV download instead."));
                Err(e)
            }
        }
    }

    /// Write all entries as CSV into the download directory; returns the file path
    pub fn export_csv(&mut self) -> Result<PathBuf> {
        let phase = self.store.active_phase_def();
        let csv = match export::entries_csv(&self.store, phase) {
            Ok(csv) => csv,
            Err(e) => {
                self.notifier.publish(Notice::warning("No entries to download!"));
                return Err(e);
            }
        };

        let path = self
            .download_dir
            .join(export::csv_filename(phase.key, self.clock.today()));

        match write_download(&path, &csv) {
            Ok(()) => {
                log::info!("CSV written: {:?} ({} entries)", path, self.store.len());
                self.notifier.publish(Notice::success("CSV downloaded!"));
                Ok(path)
            }
            Err(e) => {
                log::warn!("CSV download failed: {}", e);
                self.notifier
                    .publish(Notice::failure(format!("Download failed: {}", e)));
                Err(e)
            }
        }
    }
}

fn write_download(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, contents).map_err(MonitorError::from)
}
