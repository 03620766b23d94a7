// Importers for the MET column-definition workbook

pub mod spreadsheet_importer;

// Re-export commonly used items
pub use spreadsheet_importer::{ImportError, SpreadsheetImporter};
