//! Hold parameter table loading.
//!
//! The per-hold-type drain and friction tables ship as JSON so designers can
//! retune difficulty without recompiling. A compiled-in copy of the shipped
//! tables is always available as a fallback.

use cragsim_logic::holds::HoldTables;

/// The tables shipped with the build.
const DEFAULT_TABLES_JSON: &str = include_str!("../../../data/hold_tables.json");

/// Parse hold tables from a JSON string.
pub fn load_tables_from_str(json: &str) -> Result<HoldTables, TableError> {
    let tables: HoldTables = serde_json::from_str(json)?;
    validate(&tables)?;
    Ok(tables)
}

/// Load hold tables from a file on disk.
pub fn load_tables_from_path(path: &std::path::Path) -> Result<HoldTables, TableError> {
    let json = std::fs::read_to_string(path)?;
    load_tables_from_str(&json)
}

/// The compiled-in default tables.
pub fn default_tables() -> HoldTables {
    // The shipped JSON is validated by test; fall back to the hardcoded
    // defaults if it has been corrupted in a custom build.
    load_tables_from_str(DEFAULT_TABLES_JSON).unwrap_or_default()
}

fn validate(tables: &HoldTables) -> Result<(), TableError> {
    use cragsim_logic::holds::HoldType;
    for t in HoldType::ALL {
        let drain = tables.drain(t);
        let friction = tables.friction(t);
        if !drain.is_finite() || drain < 0.0 {
            return Err(TableError::InvalidValue {
                table: "drain",
                hold_type: t,
                value: drain,
            });
        }
        if !friction.is_finite() || !(0.0..=1.0).contains(&friction) {
            return Err(TableError::InvalidValue {
                table: "friction",
                hold_type: t,
                value: friction,
            });
        }
    }
    Ok(())
}

/// Errors that can occur while loading hold tables
#[derive(Debug)]
pub enum TableError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    InvalidValue {
        table: &'static str,
        hold_type: cragsim_logic::holds::HoldType,
        value: f32,
    },
}

impl From<std::io::Error> for TableError {
    fn from(e: std::io::Error) -> Self {
        TableError::Io(e)
    }
}

impl From<serde_json::Error> for TableError {
    fn from(e: serde_json::Error) -> Self {
        TableError::Parse(e)
    }
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::Io(e) => write!(f, "IO error: {}", e),
            TableError::Parse(e) => write!(f, "Table parse error: {}", e),
            TableError::InvalidValue {
                table,
                hold_type,
                value,
            } => {
                write!(
                    f,
                    "Invalid {} value for {:?}: {}",
                    table, hold_type, value
                )
            }
        }
    }
}

impl std::error::Error for TableError {}
