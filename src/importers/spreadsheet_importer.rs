use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::models::{ColumnRow, ColumnTable};
use crate::schema::{CellType, Tool, NA_SENTINEL, SCHEMA};

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to open workbook {path}: {msg}")]
    WorkbookOpen { path: String, msg: String },

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Failed to read sheet {sheet}: {msg}")]
    SheetRead { sheet: String, msg: String },

    #[error("Header mismatch at row {row}, col {col}: expected '{expected}', found '{found}'")]
    HeaderMismatch {
        row: usize,
        col: usize,
        expected: &'static str,
        found: String,
    },

    #[error("Invalid data at row {row}, col {col}: {msg}")]
    InvalidData { row: usize, col: usize, msg: String },
}

/// Reader for the MET column-definition workbook
///
/// # Expected Sheet Structure:
/// ```text
/// Rows before `header_row`: free text (title, notes), ignored
/// Row `header_row`: version | tool | table | linetype | name | multi_column | description | supported | datatype
/// Following rows: one output column definition per row
/// ```
pub struct SpreadsheetImporter {
    workbook_path: PathBuf,
}

impl SpreadsheetImporter {
    pub fn new(workbook_path: impl Into<PathBuf>) -> Self {
        Self {
            workbook_path: workbook_path.into(),
        }
    }

    pub fn workbook_path(&self) -> &Path {
        &self.workbook_path
    }

    /// Read `sheet_name` into a typed table
    ///
    /// `header_row` is the zero-based row index of the header row. Text
    /// cells are returned as-is, so `NA` sentinels in text columns are still
    /// present; run the table through [`crate::normalizer::normalize`].
    #[instrument(skip(self), fields(path = %self.workbook_path.display()))]
    pub fn load(&self, sheet_name: &str, header_row: usize) -> Result<ColumnTable, ImportError> {
        info!("Loading sheet: {}", sheet_name);

        let mut workbook: Xlsx<BufReader<File>> = match open_workbook(&self.workbook_path) {
            Ok(wb) => wb,
            Err(e) => {
                return Err(ImportError::WorkbookOpen {
                    path: self.workbook_path.display().to_string(),
                    msg: e.to_string(),
                })
            }
        };

        if !workbook.sheet_names().iter().any(|name| name == sheet_name) {
            return Err(ImportError::SheetNotFound(sheet_name.to_string()));
        }

        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| ImportError::SheetRead {
                sheet: sheet_name.to_string(),
                msg: e.to_string(),
            })?;

        self.check_header(&range, header_row)?;

        let last_row = match range.end() {
            Some((row, _)) => row as usize,
            None => header_row,
        };

        let mut rows = Vec::new();
        for row_idx in (header_row + 1)..=last_row {
            if (0..SCHEMA.len()).all(|col| is_blank(cell(&range, row_idx, col))) {
                debug!("Skipping empty row {}", row_idx);
                continue;
            }
            rows.push(self.parse_row(&range, row_idx)?);
        }

        info!("Loaded {} rows from sheet {}", rows.len(), sheet_name);
        Ok(ColumnTable::new(rows))
    }

    /// Verify the header row names the nine schema columns in order
    fn check_header(&self, range: &Range<Data>, header_row: usize) -> Result<(), ImportError> {
        for (col, spec) in SCHEMA.iter().enumerate() {
            let found = match cell(range, header_row, col) {
                Some(Data::String(s)) => s.trim().to_string(),
                Some(Data::Empty) | None => String::new(),
                Some(other) => other.to_string(),
            };
            if !found.eq_ignore_ascii_case(spec.name) {
                return Err(ImportError::HeaderMismatch {
                    row: header_row,
                    col,
                    expected: spec.name,
                    found,
                });
            }
        }
        debug!("Header row {} matches schema", header_row);
        Ok(())
    }

    fn parse_row(&self, range: &Range<Data>, row: usize) -> Result<ColumnRow, ImportError> {
        Ok(ColumnRow {
            version: parse_numeric(range, row, 0)?,
            tool: parse_tool(range, row, 1)?,
            table: parse_text(range, row, 2)?,
            linetype: parse_text(range, row, 3)?,
            name: parse_text(range, row, 4)?,
            multi_column: parse_logical(range, row, 5)?,
            description: parse_text(range, row, 6)?,
            supported: parse_logical(range, row, 7)?,
            datatype: parse_text(range, row, 8)?,
        })
    }
}

/// Cell at an absolute (row, col) position, independent of where the used range starts
///
/// Positions beyond the sheet's u32 addressing read as missing.
fn cell(range: &Range<Data>, row: usize, col: usize) -> Option<&Data> {
    let row = u32::try_from(row).ok()?;
    let col = u32::try_from(col).ok()?;
    range.get_value((row, col))
}

fn is_blank(value: Option<&Data>) -> bool {
    match value {
        Some(Data::Empty) | None => true,
        Some(Data::String(s)) => s.trim().is_empty(),
        _ => false,
    }
}

fn is_sentinel(s: &str) -> bool {
    s.trim() == NA_SENTINEL
}

fn invalid(row: usize, col: usize, expected: CellType, got: &Data) -> ImportError {
    ImportError::InvalidData {
        row,
        col,
        msg: format!(
            "Expected {:?} for column '{}', got: {got:?}",
            expected, SCHEMA[col].name
        ),
    }
}

/// Parse a numeric cell (the version column)
fn parse_numeric(range: &Range<Data>, row: usize, col: usize) -> Result<Option<f64>, ImportError> {
    let value = match cell(range, row, col) {
        Some(Data::Float(f)) => Some(*f),
        Some(Data::Int(i)) => Some(*i as f64),
        Some(Data::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() || is_sentinel(trimmed) {
                None
            } else {
                Some(
                    trimmed
                        .parse::<f64>()
                        .map_err(|_| ImportError::InvalidData {
                            row,
                            col,
                            msg: format!("Cannot parse number: {s}"),
                        })?,
                )
            }
        }
        Some(Data::Empty) | None => None,
        Some(other) => return Err(invalid(row, col, CellType::Numeric, other)),
    };

    // JSON has no representation for inf/NaN
    match value {
        Some(f) if !f.is_finite() => Err(ImportError::InvalidData {
            row,
            col,
            msg: format!("Number is not finite: {f}"),
        }),
        other => Ok(other),
    }
}

fn parse_tool(range: &Range<Data>, row: usize, col: usize) -> Result<Option<Tool>, ImportError> {
    match cell(range, row, col) {
        Some(Data::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() || is_sentinel(trimmed) {
                Ok(None)
            } else {
                trimmed
                    .parse::<Tool>()
                    .map(Some)
                    .map_err(|e| ImportError::InvalidData {
                        row,
                        col,
                        msg: e.to_string(),
                    })
            }
        }
        Some(Data::Empty) | None => Ok(None),
        Some(other) => Err(invalid(row, col, CellType::Tool, other)),
    }
}

/// Parse a text cell; the `NA` sentinel is kept verbatim
fn parse_text(range: &Range<Data>, row: usize, col: usize) -> Result<Option<String>, ImportError> {
    match cell(range, row, col) {
        Some(Data::String(s)) => Ok(Some(s.clone())),
        Some(Data::Float(f)) => Ok(Some(format_number(*f))),
        Some(Data::Int(i)) => Ok(Some(i.to_string())),
        Some(Data::Bool(b)) => Ok(Some(if *b { "TRUE" } else { "FALSE" }.to_string())),
        Some(Data::Empty) | None => Ok(None),
        Some(other) => Err(invalid(row, col, CellType::Text, other)),
    }
}

fn parse_logical(range: &Range<Data>, row: usize, col: usize) -> Result<Option<bool>, ImportError> {
    match cell(range, row, col) {
        Some(Data::Bool(b)) => Ok(Some(*b)),
        Some(Data::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() || is_sentinel(trimmed) {
                return Ok(None);
            }
            match trimmed.to_ascii_uppercase().as_str() {
                "TRUE" | "T" | "1" => Ok(Some(true)),
                "FALSE" | "F" | "0" => Ok(Some(false)),
                _ => Err(ImportError::InvalidData {
                    row,
                    col,
                    msg: format!("Cannot parse logical value: {s}"),
                }),
            }
        }
        Some(Data::Float(f)) if *f == 0.0 || *f == 1.0 => Ok(Some(*f == 1.0)),
        Some(Data::Int(i)) if *i == 0 || *i == 1 => Ok(Some(*i == 1)),
        Some(Data::Empty) | None => Ok(None),
        Some(other) => Err(invalid(row, col, CellType::Logical, other)),
    }
}

/// Render a number the way it reads in the sheet: `5` rather than `5.0`
fn format_number(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{f:.0}")
    } else {
        f.to_string()
    }
}
