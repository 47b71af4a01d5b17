// ABOUTME: Subcommand modules for the office binary.
// ABOUTME: Shared helper printing table rows to stdout.

pub mod ai;
pub mod doc;
pub mod menu;
pub mod open;
pub mod table;

use office_agent::office::CellValue;

/// Print rows as ` | `-separated cells.
pub fn print_rows(rows: &[Vec<CellValue>]) {
    for row in rows {
        let cells: Vec<String> = row.iter().map(CellValue::to_string).collect();
        println!("{}", cells.join(" | "));
    }
}
