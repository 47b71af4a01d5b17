// ABOUTME: Spreadsheet subcommands - create, read and update .xlsx tables.
// ABOUTME: Parses comma-separated rows into typed cells before writing.

use anyhow::Context;
use clap::Subcommand;
use std::path::{Path, PathBuf};

use office_agent::office::{self, CellValue};
use office_agent::shell;

use super::print_rows;

#[derive(Subcommand)]
pub enum TableSubcommand {
    /// Create a spreadsheet
    Create {
        path: PathBuf,
        /// Comma-separated column names
        #[arg(long)]
        headers: Option<String>,
        /// One comma-separated data row (repeatable)
        #[arg(long = "row")]
        rows: Vec<String>,
    },
    /// Print every row of a spreadsheet
    Read {
        path: PathBuf,
        /// Sheet name (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,
    },
    /// Set one cell; row and column start at 1
    Update {
        path: PathBuf,
        row: u32,
        col: u32,
        value: String,
    },
}

pub fn run(subcmd: TableSubcommand) -> anyhow::Result<()> {
    match subcmd {
        TableSubcommand::Create {
            path,
            headers,
            rows,
        } => create(&path, headers.as_deref(), &rows),
        TableSubcommand::Read { path, sheet } => read(&path, sheet.as_deref()),
        TableSubcommand::Update {
            path,
            row,
            col,
            value,
        } => update(&path, row, col, &value),
    }
}

/// Parse comma-separated lines into cells. Rows match the header width when there is one.
pub fn parse_rows(lines: &[String], width: Option<usize>) -> Vec<Vec<CellValue>> {
    lines
        .iter()
        .map(|line| {
            let width = width.unwrap_or_else(|| line.split(',').count());
            shell::parse_row(line, width)
                .iter()
                .map(|v| CellValue::infer(v))
                .collect()
        })
        .collect()
}

fn create(path: &Path, headers: Option<&str>, lines: &[String]) -> anyhow::Result<()> {
    let headers = headers.map(shell::parse_headers);
    let rows = parse_rows(lines, headers.as_ref().map(Vec::len));

    let written = office::create_table(path, &rows, headers.as_deref())
        .with_context(|| format!("failed to create {}", path.display()))?;
    println!("Created {} ({} data rows)", written.display(), rows.len());
    Ok(())
}

fn read(path: &Path, sheet: Option<&str>) -> anyhow::Result<()> {
    let rows = office::read_table(path, sheet)
        .with_context(|| format!("failed to read {}", path.display()))?;
    print_rows(&rows);
    println!("({} rows)", rows.len());
    Ok(())
}

fn update(path: &Path, row: u32, col: u32, value: &str) -> anyhow::Result<()> {
    let value = CellValue::infer(value);
    office::update_cell(path, row, col, value.clone())
        .with_context(|| format!("failed to update {}", path.display()))?;
    println!("Updated cell ({row}, {col}) = {value}");
    Ok(())
}
