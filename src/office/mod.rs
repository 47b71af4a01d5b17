// ABOUTME: Office module - spreadsheet and document files plus model-output shaping.
// ABOUTME: Spreadsheets go through calamine/rust_xlsxwriter, documents through zip/quick-xml.

mod cell;
pub mod document;
pub mod extract;
pub mod spreadsheet;

pub use cell::{CellValue, Table};
pub use document::{append_paragraph, create_document, read_document, DocumentContent};
pub use extract::{extract_table, preview, split_paragraphs, strip_emphasis};
pub use spreadsheet::{create_table, read_table, update_cell};

#[cfg(test)]
mod spreadsheet_test;
