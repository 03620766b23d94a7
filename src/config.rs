use std::env;
use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "data-raw/met_columns.xlsx";
pub const DEFAULT_SHEET: &str = "columns";
pub const DEFAULT_HEADER_ROW: usize = 1;
pub const DEFAULT_OUTPUT: &str = "data/met_columns.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory the relative `input` and `output` paths resolve against
    pub project_root: PathBuf,
    pub input: PathBuf,
    pub sheet: String,
    /// Zero-based index of the header row
    pub header_row: usize,
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            project_root: PathBuf::from("."),
            input: PathBuf::from(DEFAULT_INPUT),
            sheet: DEFAULT_SHEET.to_string(),
            header_row: DEFAULT_HEADER_ROW,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let header_row = match env::var("MET_COLUMNS_HEADER_ROW") {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    var: "MET_COLUMNS_HEADER_ROW",
                    value,
                })?,
            Err(_) => defaults.header_row,
        };

        Ok(Config {
            project_root: env::var("MET_COLUMNS_PROJECT_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.project_root),
            input: env::var("MET_COLUMNS_INPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.input),
            sheet: env::var("MET_COLUMNS_SHEET").unwrap_or(defaults.sheet),
            header_row,
            output: env::var("MET_COLUMNS_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.output),
        })
    }
}
