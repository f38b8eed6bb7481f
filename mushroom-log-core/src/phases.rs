//! Phase catalog
//!
//! Static definitions of the three cultivation phases: display title,
//! target environment and the ordered data-entry columns. Column keys are
//! only meaningful relative to the phase they belong to; the same key
//! (e.g. `light`) can carry a different label and input kind in another
//! phase.

use crate::types::{MonitorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use InputKind::{Number, Text};

/// Identifies one of the three cultivation phases
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseKey {
    /// Spore and grain colonization (spawn preparation)
    #[default]
    Colonization,
    /// Mushroom production
    Fruiting,
    /// Tray-based mycelium leather mat formation
    Leather,
}

impl PhaseKey {
    pub const ALL: [PhaseKey; 3] = [PhaseKey::Colonization, PhaseKey::Fruiting, PhaseKey::Leather];

    /// Lowercase key used in file names and commands
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseKey::Colonization => "colonization",
            PhaseKey::Fruiting => "fruiting",
            PhaseKey::Leather => "leather",
        }
    }

    /// Short name for phase selectors
    pub fn short_name(&self) -> &'static str {
        match self {
            PhaseKey::Colonization => "Colonization",
            PhaseKey::Fruiting => "Fruiting",
            PhaseKey::Leather => "Mycelium Leather",
        }
    }
}

impl fmt::Display for PhaseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PhaseKey {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "colonization" => Ok(PhaseKey::Colonization),
            "fruiting" => Ok(PhaseKey::Fruiting),
            "leather" => Ok(PhaseKey::Leather),
            other => Err(MonitorError::UnknownPhase(other.to_string())),
        }
    }
}

/// Input kind of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Numeric reading (thermometer, hygrometer, ruler, hours)
    Number,
    /// Free-text observation
    Text,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            InputKind::Number => "number",
            InputKind::Text => "text",
        })
    }
}

/// One monitored field within a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    /// Key under which values are stored in an entry
    pub key: &'static str,
    /// Header label used in exports
    pub label: &'static str,
    /// Input kind
    pub kind: InputKind,
    /// Placeholder hint shown with the input
    pub hint: &'static str,
}

/// Target environmental ranges for a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Targets {
    pub temp: &'static str,
    pub humidity: &'static str,
    pub light: &'static str,
    pub airflow: &'static str,
}

impl Targets {
    /// Parameter name / range pairs in display order
    pub fn pairs(&self) -> [(&'static str, &'static str); 4] {
        [
            ("Temp", self.temp),
            ("Humidity", self.humidity),
            ("Light", self.light),
            ("Airflow", self.airflow),
        ]
    }
}

/// A complete phase definition
#[derive(Debug, PartialEq, Eq)]
pub struct Phase {
    pub key: PhaseKey,
    pub title: &'static str,
    pub targets: Targets,
    pub columns: &'static [ColumnDef],
}

impl Phase {
    /// Look up a column by key
    pub fn column(&self, key: &str) -> Option<&'static ColumnDef> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Like [`Phase::column`], but unknown keys are an error
    pub fn require_column(&self, key: &str) -> Result<&'static ColumnDef> {
        self.column(key).ok_or_else(|| MonitorError::UnknownColumn {
            column: key.to_string(),
            phase: self.key.to_string(),
        })
    }

    /// Column keys in schema order
    pub fn column_keys(&self) -> impl Iterator<Item = &'static str> {
        self.columns.iter().map(|c| c.key)
    }
}

const fn col(key: &'static str, label: &'static str, kind: InputKind, hint: &'static str) -> ColumnDef {
    ColumnDef { key, label, kind, hint }
}

const TEMP: ColumnDef = col("temp", "Temperature (°C)", Number, "Actual thermometer reading");
const HUMIDITY: ColumnDef = col("humidity", "Humidity (%)", Number, "Actual hygrometer reading");
const INITIALS: ColumnDef = col("initials", "Initials", Text, "Your initials");

static COLONIZATION_COLUMNS: [ColumnDef; 11] = [
    TEMP,
    HUMIDITY,
    col("light", "Light Status", Text, "OFF, Dark, or Covered"),
    col("airflow", "Airflow/Fan", Text, "Sealed, Filtered, or OFF"),
    col("bagIntegrity", "Bag/Jar Integrity", Text, "No leaks? Y/N + notes"),
    col("contamination", "Contamination", Text, "Green/yellow mold? Y/N + color"),
    col("odor", "Odor", Text, "Earthy=good, Sour=bad"),
    col("growth", "Colonization %", Text, "% coverage, whiteness"),
    col("sterilization", "Sterilization", Text, "Batch ID verified?"),
    col("action", "Action Taken", Text, "What did you do?"),
    INITIALS,
];

static FRUITING_COLUMNS: [ColumnDef; 12] = [
    TEMP,
    HUMIDITY,
    col("light", "Light Hours", Number, "Hours ON (e.g., 12)"),
    col("airflow", "Airflow/Fan", Text, "ON gentle, OFF, minutes"),
    col("co2", "CO₂ Levels", Text, "PPM or condensation notes"),
    col("moisture", "Surface Wetness", Text, "Moist? No pooling?"),
    col("contamination", "Contamination", Text, "Mold? Y/N + description"),
    col("odor", "Odor", Text, "Mushroomy=good, Sour=bad"),
    col("pins", "Pins", Text, "Count, size, distribution"),
    col("growth", "Growth", Text, "Size, cap opening, color"),
    col("action", "Action Taken", Text, "Misting, FAE, harvest?"),
    INITIALS,
];

static LEATHER_COLUMNS: [ColumnDef; 12] = [
    TEMP,
    HUMIDITY,
    col("light", "Light Status", Text, "OFF, Dark, Covered"),
    col("airflow", "Airflow/Fan", Text, "Minimal, OFF, Sealed"),
    col("moisture", "Surface Moisture", Text, "Even? No pooling?"),
    col("contamination", "Contamination", Text, "Discoloration? Y/N + notes"),
    col("odor", "Odor", Text, "Earthy=healthy"),
    col("thickness", "Thickness (mm)", Number, "Measure with ruler"),
    col("texture", "Texture", Text, "Velvety? Cohesive?"),
    col("growth", "Mat Formation", Text, "Coverage %, density"),
    col("action", "Action Taken", Text, "Substrate adjustments?"),
    INITIALS,
];

static PHASES: [Phase; 3] = [
    Phase {
        key: PhaseKey::Colonization,
        title: "Spore & Grain Colonization (Spawn Preparation)",
        targets: Targets {
            temp: "25–28 °C",
            humidity: "70–80%",
            light: "Dark / OFF",
            airflow: "Minimal (sealed or filtered vents)",
        },
        columns: &COLONIZATION_COLUMNS,
    },
    Phase {
        key: PhaseKey::Fruiting,
        title: "Fruiting Phase (Mushroom Production)",
        targets: Targets {
            temp: "18–24 °C",
            humidity: "90–95%",
            light: "12h ON / 12h OFF",
            airflow: "ON gently for FAE",
        },
        columns: &FRUITING_COLUMNS,
    },
    Phase {
        key: PhaseKey::Leather,
        title: "Mycelium Leather Growth (Tray-Based Mat Formation)",
        targets: Targets {
            temp: "25–28 °C",
            humidity: "85–90%",
            light: "Dark / OFF",
            airflow: "Minimal or OFF",
        },
        columns: &LEATHER_COLUMNS,
    },
];

/// Get the definition of a phase
pub fn phase(key: PhaseKey) -> &'static Phase {
    match key {
        PhaseKey::Colonization => &PHASES[0],
        PhaseKey::Fruiting => &PHASES[1],
        PhaseKey::Leather => &PHASES[2],
    }
}

/// All phases in selector order
pub fn all_phases() -> &'static [Phase] {
    &PHASES
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_keys_match() {
        for key in PhaseKey::ALL {
            assert_eq!(phase(key).key, key);
        }
        assert_eq!(all_phases().len(), 3);
    }

    #[test]
    fn test_column_counts() {
        assert_eq!(phase(PhaseKey::Colonization).columns.len(), 11);
        assert_eq!(phase(PhaseKey::Fruiting).columns.len(), 12);
        assert_eq!(phase(PhaseKey::Leather).columns.len(), 12);
    }

    #[test]
    fn test_column_keys_unique_per_phase() {
        for p in all_phases() {
            let keys: HashSet<_> = p.column_keys().collect();
            assert_eq!(keys.len(), p.columns.len(), "duplicate key in {}", p.key);
        }
    }

    #[test]
    fn test_temp_then_humidity_first() {
        for p in all_phases() {
            let keys: Vec<_> = p.column_keys().take(2).collect();
            assert_eq!(keys, vec!["temp", "humidity"]);
        }
    }

    #[test]
    fn test_same_key_differs_between_phases() {
        let colonization = phase(PhaseKey::Colonization).column("light").unwrap();
        let fruiting = phase(PhaseKey::Fruiting).column("light").unwrap();

        assert_eq!(colonization.kind, InputKind::Text);
        assert_eq!(fruiting.kind, InputKind::Number);
        assert_eq!(fruiting.label, "Light Hours");
    }

    #[test]
    fn test_phase_key_parsing() {
        assert_eq!("fruiting".parse::<PhaseKey>().unwrap(), PhaseKey::Fruiting);
        assert_eq!(" Leather ".parse::<PhaseKey>().unwrap(), PhaseKey::Leather);
        assert!(matches!(
            "incubation".parse::<PhaseKey>(),
            Err(MonitorError::UnknownPhase(_))
        ));
        assert_eq!(PhaseKey::Colonization.to_string(), "colonization");
    }

    #[test]
    fn test_require_column() {
        let p = phase(PhaseKey::Colonization);
        assert!(p.require_column("bagIntegrity").is_ok());
        assert!(matches!(
            p.require_column("pins"),
            Err(MonitorError::UnknownColumn { .. })
        ));
    }
}
