use calamine::{open_workbook_auto, DataType, Reader};
use clap::Parser;
use std::path::PathBuf;

use met_columns::config::{DEFAULT_INPUT, DEFAULT_SHEET};
use met_columns::schema::SCHEMA;

/// Print the top of a sheet to find where the header row sits
#[derive(Parser)]
#[command(name = "examine-sheet")]
struct Cli {
    #[arg(default_value = DEFAULT_INPUT)]
    file: PathBuf,

    #[arg(default_value = DEFAULT_SHEET)]
    sheet: String,

    /// Number of rows to print
    #[arg(long, default_value = "15")]
    rows: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    println!("Opening workbook: {}", cli.file.display());
    let mut workbook = open_workbook_auto(&cli.file)?;

    println!("\nSheet names:");
    for (i, name) in workbook.sheet_names().iter().enumerate() {
        println!("  {i}: {name}");
    }

    println!("\n\nExamining sheet: {}", cli.sheet);
    println!("{}", "=".repeat(100));

    let range = workbook.worksheet_range(&cli.sheet)?;
    let start_row = range.start().map(|(row, _)| row).unwrap_or(0);

    println!("Dimensions: {:?}", range.get_size());
    println!(
        "Expected header: {}",
        SCHEMA.iter().map(|c| c.name).collect::<Vec<_>>().join(" | ")
    );
    println!("{}", "=".repeat(100));

    for (offset, row) in range.rows().enumerate().take(cli.rows) {
        // Absolute index, as taken by --header-row
        let row_idx = start_row as usize + offset;
        let has_data = row.iter().any(|cell| !cell.is_empty());
        if has_data {
            print!("Row {row_idx:3}: ");
            for cell in row.iter().take(SCHEMA.len()) {
                if cell.is_empty() {
                    print!("[empty] ");
                } else {
                    print!("[{cell}] ");
                }
            }
            println!();
        }
    }

    Ok(())
}
