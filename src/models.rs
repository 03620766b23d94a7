use serde::{Deserialize, Serialize};

use crate::schema::{ColumnSpec, Tool, SCHEMA};

/// One row of the MET column-definition table
///
/// Every cell is optional; a missing value in the workbook (empty cell or
/// the `NA` sentinel) ends up as `None` once the table is normalized.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnRow {
    pub version: Option<f64>,
    pub tool: Option<Tool>,
    pub table: Option<String>,
    pub linetype: Option<String>,
    pub name: Option<String>,
    pub multi_column: Option<bool>,
    pub description: Option<String>,
    pub supported: Option<bool>,
    pub datatype: Option<String>,
}

impl ColumnRow {
    /// Mutable access to the text cells, paired with their column names
    pub(crate) fn text_cells_mut(&mut self) -> [(&'static str, &mut Option<String>); 5] {
        [
            ("table", &mut self.table),
            ("linetype", &mut self.linetype),
            ("name", &mut self.name),
            ("description", &mut self.description),
            ("datatype", &mut self.datatype),
        ]
    }
}

/// The full column-definition table, in workbook row order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnTable {
    pub rows: Vec<ColumnRow>,
}

impl ColumnTable {
    pub fn new(rows: Vec<ColumnRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Declared column names and types, in column order
    pub fn column_types(&self) -> &'static [ColumnSpec] {
        &SCHEMA
    }

    /// Rows describing one line type of one tool for a given MET version
    pub fn columns_for(&self, version: f64, tool: Tool, linetype: &str) -> Vec<&ColumnRow> {
        self.rows
            .iter()
            .filter(|row| {
                row.version == Some(version)
                    && row.tool == Some(tool)
                    && row
                        .linetype
                        .as_deref()
                        .is_some_and(|lt| lt.eq_ignore_ascii_case(linetype))
            })
            .collect()
    }

    /// Distinct line types written by a tool, in first-seen order
    pub fn line_types(&self, tool: Tool) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for row in self.rows.iter().filter(|row| row.tool == Some(tool)) {
            if let Some(lt) = row.linetype.as_deref() {
                if !seen.contains(&lt) {
                    seen.push(lt);
                }
            }
        }
        seen
    }

    /// Distinct MET versions, ascending
    pub fn versions(&self) -> Vec<f64> {
        let mut versions: Vec<f64> = self.rows.iter().filter_map(|row| row.version).collect();
        versions.sort_by(|a, b| a.total_cmp(b));
        versions.dedup();
        versions
    }
}
