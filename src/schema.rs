/// Column schema of the MET column-definition sheet
///
/// The sheet has nine columns in a fixed order. Each column has a declared
/// cell type that drives coercion in the importer and is reported back by
/// [`crate::models::ColumnTable::column_types`].
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Text used in the source workbook for a missing value
pub const NA_SENTINEL: &str = "NA";

/// Declared type of a sheet column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Numeric,
    Tool,
    Text,
    Logical,
}

/// A named, typed column of the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub cell_type: CellType,
}

const fn col(name: &'static str, cell_type: CellType) -> ColumnSpec {
    ColumnSpec { name, cell_type }
}

/// Column order and types, matching the header row of the workbook
pub const SCHEMA: [ColumnSpec; 9] = [
    col("version", CellType::Numeric),
    col("tool", CellType::Tool),
    col("table", CellType::Text),
    col("linetype", CellType::Text),
    col("name", CellType::Text),
    col("multi_column", CellType::Logical),
    col("description", CellType::Text),
    col("supported", CellType::Logical),
    col("datatype", CellType::Text),
];

/// MET verification tool that writes a given line type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tool {
    Point,
    Grid,
    Ensemble,
    Wavelet,
    Mode,
    Series,
    Stat,
    Tc,
}

impl Tool {
    pub const ALL: [Tool; 8] = [
        Tool::Point,
        Tool::Grid,
        Tool::Ensemble,
        Tool::Wavelet,
        Tool::Mode,
        Tool::Series,
        Tool::Stat,
        Tool::Tc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::Point => "Point",
            Tool::Grid => "Grid",
            Tool::Ensemble => "Ensemble",
            Tool::Wavelet => "Wavelet",
            Tool::Mode => "Mode",
            Tool::Series => "Series",
            Tool::Stat => "Stat",
            Tool::Tc => "Tc",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown MET tool: {0}")]
pub struct UnknownTool(pub String);

impl FromStr for Tool {
    type Err = UnknownTool;

    /// Accepts the short name ("Point") and the MET spellings
    /// ("Point-Stat", "point_stat"), case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let short = lowered
            .strip_suffix("-stat")
            .or_else(|| lowered.strip_suffix("_stat"))
            .unwrap_or(lowered.as_str());

        // Analysis and pairing tools go by their first word
        let short = match short {
            "stat-analysis" | "stat_analysis" => "stat",
            "series-analysis" | "series_analysis" => "series",
            "tc-pairs" | "tc_pairs" => "tc",
            other => other,
        };

        Tool::ALL
            .into_iter()
            .find(|tool| tool.as_str().eq_ignore_ascii_case(short))
            .ok_or_else(|| UnknownTool(s.to_string()))
    }
}
