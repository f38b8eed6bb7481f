//! Mushroom Monitoring Log Library
//!
//! The data rules behind a daily cultivation monitoring form: which fields
//! each cultivation phase records, how entries are saved, deleted and
//! cleared, and how saved entries are turned into spreadsheet-ready text.
//!
//! # Architecture
//!
//! - [`phases`]: static catalog of the three phases (targets + columns)
//! - [`store`]: in-memory session state and its mutation rules
//! - [`export`]: header/data rows, TSV and CSV rendering
//! - [`session`]: store + notices + clipboard + downloads, one method per gesture
//!
//! The library does NOT:
//! - Persist anything between sessions
//! - Validate values beyond "at least one field filled"
//! - Render a user interface
//!
//! Rendering and input handling live in the application layer (mushroom-log-cli).
//!
//! # Example Usage
//!
//! ```
//! use mushroom_log_core::{export, phase, BatchField, EntryStore, PhaseKey};
//! use chrono::NaiveDate;
//!
//! let mut store = EntryStore::with_phase(PhaseKey::Colonization);
//! store.update_batch_info(BatchField::TentId, "TENT-A-001");
//! store.update_current_entry("temp", "26");
//! store.update_current_entry("humidity", "75");
//! store.save_entry(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()).unwrap();
//!
//! let tsv = export::last_entry_tsv(&store, phase(PhaseKey::Colonization)).unwrap();
//! let row: Vec<&str> = tsv.lines().nth(1).unwrap().split('\t').collect();
//! assert_eq!(row[5], "26");
//! ```

// Public modules
pub mod clipboard;
pub mod config;
pub mod export;
pub mod notify;
pub mod phases;
pub mod session;
pub mod store;
pub mod types;

// Re-export main types for convenience
pub use clipboard::{Clipboard, CommandClipboard, MemoryClipboard};
pub use config::SessionConfig;
pub use notify::{Notice, NoticeLevel, Notifier};
pub use phases::{all_phases, phase, ColumnDef, InputKind, Phase, PhaseKey, Targets};
pub use session::{Clock, FixedClock, Session, SystemClock};
pub use store::{ClearOutcome, EntryStore, CLEAR_ALL_PROMPT};
pub use types::{
    BatchField, BatchInfo, EntryDate, EntryFields, MonitorError, Result, SavedEntry,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: a fresh store starts empty on colonization
        let store = EntryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.active_phase(), PhaseKey::Colonization);
        assert!(!VERSION.is_empty());
    }
}
