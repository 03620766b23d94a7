use clap::Parser;
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use met_columns::config::Config;
use met_columns::services::RefreshService;

#[derive(Parser)]
#[command(name = "met-columns")]
#[command(about = "Rebuild the MET output column table from the definition workbook", long_about = None)]
struct Cli {
    /// Directory that relative input/output paths resolve against
    #[arg(long, env = "MET_COLUMNS_PROJECT_ROOT")]
    project_root: Option<PathBuf>,

    /// Path to the column-definition workbook (.xlsx)
    #[arg(long, env = "MET_COLUMNS_INPUT")]
    input: Option<PathBuf>,

    /// Sheet holding the column definitions
    #[arg(long, env = "MET_COLUMNS_SHEET")]
    sheet: Option<String>,

    /// Zero-based index of the header row
    #[arg(long, env = "MET_COLUMNS_HEADER_ROW")]
    header_row: Option<usize>,

    /// Where to write the persisted table
    #[arg(long, env = "MET_COLUMNS_OUTPUT")]
    output: Option<PathBuf>,
}

impl Cli {
    fn apply(self, mut config: Config) -> Config {
        if let Some(root) = self.project_root {
            config.project_root = root;
        }
        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(sheet) = self.sheet {
            config.sheet = sheet;
        }
        if let Some(header_row) = self.header_row {
            config.header_row = header_row;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        config
    }
}

#[instrument]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing with environment filter support
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,met_columns=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = cli.apply(Config::from_env()?);
    info!("Refreshing MET column table with config: {:?}", config);

    let stats = RefreshService::new(config).run()?;
    info!(
        "Wrote {} rows to {}",
        stats.rows_written,
        stats.output.display()
    );

    Ok(())
}
