//! Export and serialization
//!
//! Turns saved entries into spreadsheet-ready text. Every function takes the
//! phase whose column schema drives the layout; callers pass the *active*
//! phase, not the phase an entry was recorded under, so entries saved under
//! another phase export with blank cells where their keys don't match.
//!
//! Two text forms are produced:
//! - TSV (clipboard): cells joined by `\t`, rows by `\n`
//! - CSV (file): every cell wrapped in `"`, joined by `,`, rows by `\n`.
//!   Embedded quotes are written as-is.

use crate::phases::{Phase, PhaseKey};
use crate::store::EntryStore;
use crate::types::{EntryDate, MonitorError, Result, SavedEntry};

/// Fixed leading columns of every export row
pub const FIXED_HEADERS: [&str; 5] = ["Date", "Phase", "Tent ID", "Species", "Start Date"];

/// Placeholder for blank cells in the history table
pub const BLANK_CELL: &str = "—";

/// Header row: fixed columns followed by the phase's column labels
pub fn header_row(phase: &Phase) -> Vec<String> {
    FIXED_HEADERS
        .iter()
        .map(|h| h.to_string())
        .chain(phase.columns.iter().map(|c| c.label.to_string()))
        .collect()
}

/// Data row for one entry laid out under `phase`
pub fn data_row(entry: &SavedEntry, phase: &Phase) -> Vec<String> {
    let batch = &entry.batch_info;
    let mut row = Vec::with_capacity(FIXED_HEADERS.len() + phase.columns.len());
    row.push(entry.date.format("%Y-%m-%d").to_string());
    row.push(phase.title.to_string());
    row.push(batch.tent_id.clone());
    row.push(batch.species.clone());
    row.push(batch.start_date.clone());
    row.extend(phase.columns.iter().map(|c| entry.field(c.key).to_string()));
    row
}

/// Join rows as tab-separated text
pub fn to_tsv(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| row.join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Join rows as comma-separated text with every cell quoted
pub fn to_csv(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|cell| format!("\"{}\"", cell))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn table<'a, I>(entries: I, phase: &Phase) -> Vec<Vec<String>>
where
    I: IntoIterator<Item = &'a SavedEntry>,
{
    std::iter::once(header_row(phase))
        .chain(entries.into_iter().map(|e| data_row(e, phase)))
        .collect()
}

/// Header plus the most recent entry, as TSV
///
/// # Errors
/// * `MonitorError::EmptyStore` - nothing has been saved
pub fn last_entry_tsv(store: &EntryStore, phase: &Phase) -> Result<String> {
    let last = store.last_entry().ok_or(MonitorError::EmptyStore)?;
    Ok(to_tsv(&table([last], phase)))
}

/// Header plus every entry in store order, as TSV
///
/// # Errors
/// * `MonitorError::EmptyStore` - nothing has been saved
pub fn all_entries_tsv(store: &EntryStore, phase: &Phase) -> Result<String> {
    if store.is_empty() {
        return Err(MonitorError::EmptyStore);
    }
    Ok(to_tsv(&table(store.entries(), phase)))
}

/// Header plus every entry in store order, as CSV
///
/// # Errors
/// * `MonitorError::EmptyStore` - nothing has been saved
pub fn entries_csv(store: &EntryStore, phase: &Phase) -> Result<String> {
    if store.is_empty() {
        return Err(MonitorError::EmptyStore);
    }
    Ok(to_csv(&table(store.entries(), phase)))
}

/// File name for a CSV download: `monitoring-<phase>-<YYYY-MM-DD>.csv`
pub fn csv_filename(phase: PhaseKey, today: EntryDate) -> String {
    format!("monitoring-{}-{}.csv", phase, today.format("%Y-%m-%d"))
}

/// History table: header `Date` + column labels, one row per entry,
/// blank cells shown as [`BLANK_CELL`]
pub fn history_rows(store: &EntryStore, phase: &Phase) -> Vec<Vec<String>> {
    let header: Vec<String> = std::iter::once("Date".to_string())
        .chain(phase.columns.iter().map(|c| c.label.to_string()))
        .collect();

    let rows = store.entries().iter().map(|entry| {
        std::iter::once(entry.date.format("%Y-%m-%d").to_string())
            .chain(phase.columns.iter().map(|c| match entry.field(c.key) {
                "" => BLANK_CELL.to_string(),
                v => v.to_string(),
            }))
            .collect::<Vec<String>>()
    });

    std::iter::once(header).chain(rows).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phases::phase;
    use crate::types::BatchField;
    use chrono::NaiveDate;

    fn date() -> EntryDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn store_with(fields: &[(&str, &str)]) -> EntryStore {
        let mut store = EntryStore::new();
        store.update_batch_info(BatchField::TentId, "TENT-A-001");
        store.update_batch_info(BatchField::Species, "Pleurotus ostreatus");
        store.update_batch_info(BatchField::StartDate, "2024-03-01");
        for (k, v) in fields {
            store.update_current_entry(*k, *v);
        }
        store.save_entry(date()).unwrap();
        store
    }

    #[test]
    fn test_header_row() {
        let header = header_row(phase(PhaseKey::Colonization));
        assert_eq!(header.len(), 16);
        assert_eq!(&header[..5], &FIXED_HEADERS.map(String::from)[..]);
        assert_eq!(header[5], "Temperature (°C)");
        assert_eq!(header[15], "Initials");
    }

    #[test]
    fn test_data_row_fixed_cells() {
        let store = store_with(&[("temp", "26")]);
        let p = phase(PhaseKey::Colonization);
        let row = data_row(store.last_entry().unwrap(), p);

        assert_eq!(row[0], "2024-03-09");
        assert_eq!(row[1], p.title);
        assert_eq!(row[2], "TENT-A-001");
        assert_eq!(row[3], "Pleurotus ostreatus");
        assert_eq!(row[4], "2024-03-01");
        assert_eq!(row[5], "26");
        assert!(row[6..].iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_full_entry_under_own_and_other_phase() {
        let p = phase(PhaseKey::Colonization);
        let fields: Vec<(&str, &str)> = p.column_keys().map(|k| (k, "x")).collect();
        let store = store_with(&fields);
        let entry = store.last_entry().unwrap();

        let own = data_row(entry, p);
        assert!(own[5..].iter().all(|c| !c.is_empty()));

        let fruiting = phase(PhaseKey::Fruiting);
        let other = data_row(entry, fruiting);
        for (col, cell) in fruiting.columns.iter().zip(&other[5..]) {
            if p.column(col.key).is_none() {
                assert_eq!(cell, "", "column {} should be blank", col.key);
            }
        }
        // Phase cell follows the export phase, not the recording phase
        assert_eq!(other[1], fruiting.title);
    }

    #[test]
    fn test_last_entry_tsv_layout() {
        let store = store_with(&[("temp", "26"), ("humidity", "75")]);
        let tsv = last_entry_tsv(&store, phase(PhaseKey::Colonization)).unwrap();

        let lines: Vec<&str> = tsv.split('\n').collect();
        assert_eq!(lines.len(), 2);
        let cells: Vec<&str> = lines[1].split('\t').collect();
        assert_eq!(cells.len(), 16);
        assert_eq!(cells[5], "26");
        assert_eq!(cells[6], "75");
    }

    #[test]
    fn test_all_entries_tsv_in_order() {
        let mut store = store_with(&[("temp", "20")]);
        store.update_current_entry("temp", "21");
        store.save_entry(date()).unwrap();

        let tsv = all_entries_tsv(&store, phase(PhaseKey::Colonization)).unwrap();
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].split('\t').nth(5), Some("20"));
        assert_eq!(lines[2].split('\t').nth(5), Some("21"));
    }

    #[test]
    fn test_empty_store_errors() {
        let store = EntryStore::new();
        let p = phase(PhaseKey::Fruiting);
        assert!(matches!(last_entry_tsv(&store, p), Err(MonitorError::EmptyStore)));
        assert!(matches!(all_entries_tsv(&store, p), Err(MonitorError::EmptyStore)));
        assert!(matches!(entries_csv(&store, p), Err(MonitorError::EmptyStore)));
    }

    #[test]
    fn test_csv_quotes_every_cell_without_escaping() {
        let store = store_with(&[("odor", "say \"earthy\""), ("action", "misted, fanned")]);
        let csv = entries_csv(&store, phase(PhaseKey::Colonization)).unwrap();

        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("\"Date\",\"Phase\",\"Tent ID\""));
        assert!(lines[1].contains("\"say \"earthy\"\""));
        assert!(lines[1].contains("\"misted, fanned\""));
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_csv_filename() {
        assert_eq!(
            csv_filename(PhaseKey::Leather, date()),
            "monitoring-leather-2024-03-09.csv"
        );
    }

    #[test]
    fn test_history_rows_use_placeholder() {
        let store = store_with(&[("temp", "26")]);
        let rows = history_rows(&store, phase(PhaseKey::Colonization));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "Date");
        assert_eq!(rows[0].len(), 12);
        assert_eq!(rows[1][1], "26");
        assert_eq!(rows[1][2], BLANK_CELL);
    }
}
