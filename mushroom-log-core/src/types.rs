//! Core types for the monitoring log
//!
//! This module defines the records the entry store holds (batch metadata,
//! the in-progress entry and saved entries) and the error type shared by
//! the whole library.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Calendar date stamped on saved entries and export file names
pub type EntryDate = NaiveDate;

/// Result type for monitoring log operations
pub type Result<T> = std::result::Result<T, MonitorError>;

/// Field values of one entry, keyed by column key
pub type EntryFields = BTreeMap<String, String>;

/// Errors that can occur while recording or exporting entries
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("Nothing to save: fill out at least one field")]
    Validation,

    #[error("No saved entries")]
    EmptyStore,

    #[error("Clipboard write failed: {0}")]
    Clipboard(String),

    #[error("Entry index {index} out of range (have {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Unknown phase: {0} (expected colonization, fruiting or leather)")]
    UnknownPhase(String),

    #[error("Unknown batch field: {0}")]
    UnknownBatchField(String),

    #[error("Unknown column '{column}' for phase {phase}")]
    UnknownColumn { column: String, phase: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Metadata identifying the physical growing unit
///
/// Survives phase switches and saves; only a confirmed clear-all resets it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchInfo {
    /// Tent or batch identifier (e.g. "TENT-A-001")
    pub tent_id: String,
    /// Species or strain (e.g. "Pleurotus ostreatus")
    pub species: String,
    /// Phase start date as typed by the user
    pub start_date: String,
    /// Sterilization record (time, pressure, batch)
    pub sterilization: String,
}

impl BatchInfo {
    /// Set one field by name
    pub fn set(&mut self, field: BatchField, value: impl Into<String>) {
        let value = value.into();
        match field {
            BatchField::TentId => self.tent_id = value,
            BatchField::Species => self.species = value,
            BatchField::StartDate => self.start_date = value,
            BatchField::Sterilization => self.sterilization = value,
        }
    }

    /// Read one field by name
    pub fn get(&self, field: BatchField) -> &str {
        match field {
            BatchField::TentId => &self.tent_id,
            BatchField::Species => &self.species,
            BatchField::StartDate => &self.start_date,
            BatchField::Sterilization => &self.sterilization,
        }
    }

    /// True if every field is blank
    pub fn is_empty(&self) -> bool {
        BatchField::ALL.iter().all(|f| self.get(*f).is_empty())
    }
}

/// The four editable batch fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BatchField {
    TentId,
    Species,
    StartDate,
    Sterilization,
}

impl BatchField {
    pub const ALL: [BatchField; 4] = [
        BatchField::TentId,
        BatchField::Species,
        BatchField::StartDate,
        BatchField::Sterilization,
    ];

    /// Label shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            BatchField::TentId => "Tent ID / Batch ID",
            BatchField::Species => "Species / Strain",
            BatchField::StartDate => "Phase Start Date",
            BatchField::Sterilization => "Sterilization",
        }
    }
}

impl fmt::Display for BatchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchField::TentId => write!(f, "tentId"),
            BatchField::Species => write!(f, "species"),
            BatchField::StartDate => write!(f, "startDate"),
            BatchField::Sterilization => write!(f, "sterilization"),
        }
    }
}

impl FromStr for BatchField {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "tentid" | "tent" | "batchid" => Ok(BatchField::TentId),
            "species" | "strain" => Ok(BatchField::Species),
            "startdate" => Ok(BatchField::StartDate),
            "sterilization" => Ok(BatchField::Sterilization),
            _ => Err(MonitorError::UnknownBatchField(s.to_string())),
        }
    }
}

/// A snapshot taken by a save; never modified afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedEntry {
    /// Date of the save
    pub date: EntryDate,
    /// Copy of the batch info at save time
    pub batch_info: BatchInfo,
    /// Copy of the current entry at save time
    pub fields: EntryFields,
}

impl SavedEntry {
    /// Value recorded for a column key, or "" when the key is absent
    pub fn field(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }
}
