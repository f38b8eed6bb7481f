//! Entry store
//!
//! Holds everything a monitoring session edits: the active phase, the batch
//! metadata, the in-progress entry and the ordered list of saved entries.
//! Every mutation goes through a method here; rendering layers only read.

use crate::phases::{self, Phase, PhaseKey};
use crate::types::{BatchField, BatchInfo, EntryDate, EntryFields, MonitorError, Result, SavedEntry};

/// Prompt shown before a clear-all
pub const CLEAR_ALL_PROMPT: &str = "Delete ALL entries? This cannot be undone!";

/// Result of a clear-all request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The user confirmed and everything was reset
    Cleared,
    /// The user declined; nothing changed
    ConfirmationDeclined,
}

/// In-memory state of one monitoring session
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    active_phase: PhaseKey,
    batch_info: BatchInfo,
    current: EntryFields,
    saved: Vec<SavedEntry>,
}

impl EntryStore {
    /// Create an empty store on the default phase (colonization)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store on a given phase
    pub fn with_phase(phase: PhaseKey) -> Self {
        Self {
            active_phase: phase,
            ..Self::default()
        }
    }

    /// Currently selected phase key
    pub fn active_phase(&self) -> PhaseKey {
        self.active_phase
    }

    /// Definition of the currently selected phase
    pub fn active_phase_def(&self) -> &'static Phase {
        phases::phase(self.active_phase)
    }

    /// Switch phase. Batch info, the current entry and saved entries are kept.
    pub fn set_active_phase(&mut self, phase: PhaseKey) {
        if phase != self.active_phase {
            log::debug!("Switching phase: {} -> {}", self.active_phase, phase);
        }
        self.active_phase = phase;
    }

    pub fn batch_info(&self) -> &BatchInfo {
        &self.batch_info
    }

    pub fn current_entry(&self) -> &EntryFields {
        &self.current
    }

    /// Saved entries in insertion order
    pub fn entries(&self) -> &[SavedEntry] {
        &self.saved
    }

    /// Most recently saved entry
    pub fn last_entry(&self) -> Option<&SavedEntry> {
        self.saved.last()
    }

    pub fn len(&self) -> usize {
        self.saved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }

    /// Set one batch field. No validation.
    pub fn update_batch_info(&mut self, field: BatchField, value: impl Into<String>) {
        let value = value.into();
        log::debug!("Batch {} = {:?}", field, value);
        self.batch_info.set(field, value);
    }

    /// Set one field of the in-progress entry. No validation.
    pub fn update_current_entry(&mut self, column_key: impl Into<String>, value: impl Into<String>) {
        let key = column_key.into();
        let value = value.into();
        log::debug!("Entry {} = {:?}", key, value);
        self.current.insert(key, value);
    }

    /// Snapshot the current entry and batch info into the saved list
    ///
    /// A field that was touched counts even if its value is now empty. On
    /// success the current entry is reset; batch info is left alone.
    ///
    /// # Errors
    /// * `MonitorError::Validation` - no field has been touched since the last save
    pub fn save_entry(&mut self, date: EntryDate) -> Result<&SavedEntry> {
        if self.current.is_empty() {
            log::warn!("Save rejected: current entry is empty");
            return Err(MonitorError::Validation);
        }

        let entry = SavedEntry {
            date,
            batch_info: self.batch_info.clone(),
            fields: std::mem::take(&mut self.current),
        };
        self.saved.push(entry);

        log::info!(
            "Saved entry #{} ({} fields) for {}",
            self.saved.len(),
            self.saved[self.saved.len() - 1].fields.len(),
            date
        );
        Ok(&self.saved[self.saved.len() - 1])
    }

    /// Remove the entry at `index`, keeping the order of the rest
    ///
    /// # Errors
    /// * `MonitorError::IndexOutOfRange` - `index` is not below `len()`; nothing is removed
    pub fn delete_entry(&mut self, index: usize) -> Result<SavedEntry> {
        if index >= self.saved.len() {
            log::warn!("Delete rejected: index {} of {}", index, self.saved.len());
            return Err(MonitorError::IndexOutOfRange {
                index,
                len: self.saved.len(),
            });
        }

        let removed = self.saved.remove(index);
        log::info!("Deleted entry at index {} ({} left)", index, self.saved.len());
        Ok(removed)
    }

    /// Reset saved entries, the current entry and batch info, after confirmation
    ///
    /// `confirm` receives [`CLEAR_ALL_PROMPT`] and returns whether to proceed.
    /// The active phase is kept.
    pub fn clear_all<F>(&mut self, confirm: F) -> ClearOutcome
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(CLEAR_ALL_PROMPT) {
            log::debug!("Clear-all declined");
            return ClearOutcome::ConfirmationDeclined;
        }

        let dropped = self.saved.len();
        self.saved.clear();
        self.current.clear();
        self.batch_info = BatchInfo::default();
        log::info!("Cleared all data ({} entries dropped)", dropped);
        ClearOutcome::Cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> EntryDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn test_save_takes_last_value_and_resets_current() {
        let mut store = EntryStore::new();
        store.update_current_entry("temp", "24");
        store.update_current_entry("temp", "26");
        store.update_current_entry("humidity", "75");

        let saved = store.save_entry(day(1)).unwrap().clone();
        assert_eq!(saved.field("temp"), "26");
        assert_eq!(saved.field("humidity"), "75");
        assert_eq!(saved.fields.len(), 2);
        assert!(store.current_entry().is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_empty_save_is_rejected() {
        let mut store = EntryStore::new();
        store.update_batch_info(BatchField::TentId, "TENT-A-001");

        assert!(matches!(store.save_entry(day(1)), Err(MonitorError::Validation)));
        assert!(store.is_empty());
        assert_eq!(store.batch_info().tent_id, "TENT-A-001");
    }

    #[test]
    fn test_touched_but_blank_field_counts() {
        let mut store = EntryStore::new();
        store.update_current_entry("odor", "");
        assert!(store.save_entry(day(1)).is_ok());
        assert_eq!(store.entries()[0].field("odor"), "");
    }

    #[test]
    fn test_save_keeps_batch_info_and_copies_it() {
        let mut store = EntryStore::new();
        store.update_batch_info(BatchField::Species, "Pleurotus ostreatus");
        store.update_current_entry("temp", "26");
        store.save_entry(day(1)).unwrap();

        assert_eq!(store.batch_info().species, "Pleurotus ostreatus");

        store.update_batch_info(BatchField::Species, "Ganoderma lucidum");
        assert_eq!(store.entries()[0].batch_info.species, "Pleurotus ostreatus");
    }

    #[test]
    fn test_delete_preserves_order() {
        let mut store = EntryStore::new();
        for (i, t) in ["20", "21", "22"].iter().enumerate() {
            store.update_current_entry("temp", *t);
            store.save_entry(day(i as u32 + 1)).unwrap();
        }

        let removed = store.delete_entry(1).unwrap();
        assert_eq!(removed.field("temp"), "21");
        let temps: Vec<_> = store.entries().iter().map(|e| e.field("temp")).collect();
        assert_eq!(temps, vec!["20", "22"]);
    }

    #[test]
    fn test_delete_out_of_range() {
        let mut store = EntryStore::new();
        store.update_current_entry("temp", "20");
        store.save_entry(day(1)).unwrap();

        assert!(matches!(
            store.delete_entry(1),
            Err(MonitorError::IndexOutOfRange { index: 1, len: 1 })
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear_all_confirmed() {
        let mut store = EntryStore::with_phase(PhaseKey::Fruiting);
        store.update_batch_info(BatchField::TentId, "T1");
        store.update_current_entry("pins", "12");
        store.save_entry(day(1)).unwrap();
        store.update_current_entry("pins", "14");

        let mut prompt_seen = String::new();
        let outcome = store.clear_all(|prompt| {
            prompt_seen = prompt.to_string();
            true
        });

        assert_eq!(outcome, ClearOutcome::Cleared);
        assert_eq!(prompt_seen, CLEAR_ALL_PROMPT);
        assert!(store.is_empty());
        assert!(store.current_entry().is_empty());
        assert_eq!(store.batch_info(), &BatchInfo::default());
        assert_eq!(store.active_phase(), PhaseKey::Fruiting);
    }

    #[test]
    fn test_clear_all_declined() {
        let mut store = EntryStore::new();
        store.update_batch_info(BatchField::TentId, "T1");
        store.update_current_entry("temp", "26");
        store.save_entry(day(1)).unwrap();

        assert_eq!(store.clear_all(|_| false), ClearOutcome::ConfirmationDeclined);
        assert_eq!(store.len(), 1);
        assert_eq!(store.batch_info().tent_id, "T1");
    }

    #[test]
    fn test_phase_switch_keeps_state() {
        let mut store = EntryStore::new();
        store.update_current_entry("temp", "26");
        store.update_batch_info(BatchField::TentId, "T1");

        store.set_active_phase(PhaseKey::Leather);
        assert_eq!(store.active_phase_def().key, PhaseKey::Leather);
        assert_eq!(store.current_entry().get("temp").map(String::as_str), Some("26"));
        assert_eq!(store.batch_info().tent_id, "T1");
    }
}
